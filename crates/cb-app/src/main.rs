mod state;
mod ui;
mod worker;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use cb_core::templates::{self, type_info};
use cb_core::{AppConfig, CookbookStore, Length, ResetPolicy, Tone, Variant};
use clap::Parser;
use serde::de::DeserializeOwned;

use crate::state::{AppState, SessionOutcome};
use crate::worker::HttpGenerator;

/// Generate a cookbook from a template and watch it cook
#[derive(Parser, Debug)]
#[command(name = "cookbook-buddy", version, about)]
struct Args {
    /// Config file
    #[arg(long, default_value = "cookbook-buddy.toml")]
    config: PathBuf,

    /// Template id to start from
    #[arg(short, long, default_value = "weeknight-dinners")]
    template: String,

    /// Override the template title
    #[arg(long)]
    title: Option<String>,

    /// Override the template prompt
    #[arg(short, long)]
    prompt: Option<String>,

    /// professional, friendly, educational or persuasive
    #[arg(long, default_value = "friendly", value_parser = parse_enum::<Tone>)]
    tone: Tone,

    /// short, standard or detailed
    #[arg(long, default_value = "standard", value_parser = parse_enum::<Length>)]
    length: Length,

    /// Loading screen variant: default, magic, brain or book
    #[arg(long)]
    variant: Option<Variant>,

    /// Expected generation time in seconds
    #[arg(long)]
    expected_duration: Option<f64>,

    /// sticky or restart
    #[arg(long, value_parser = parse_enum::<ResetPolicy>)]
    reset_policy: Option<ResetPolicy>,

    /// Generation service base URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Print the template catalog and exit
    #[arg(long)]
    list_templates: bool,
}

/// Parses a lowercase enum name through its serde representation.
fn parse_enum<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
        .map_err(|_| format!("unrecognized value '{}'", s))
}

fn print_catalog() {
    for template in templates::templates() {
        let info = type_info(template.kind);
        println!(
            "{:<24} {:<32} {}{}",
            template.id,
            template.name,
            info.label,
            if template.is_premium { " (premium)" } else { "" }
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.list_templates {
        print_catalog();
        return Ok(());
    }

    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    if let Some(variant) = args.variant {
        config.loading.variant = variant;
    }
    if let Some(duration) = args.expected_duration {
        config.loading.expected_duration = duration;
    }
    if let Some(policy) = args.reset_policy {
        config.reset_policy = policy;
    }
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    config.validate()?;

    let template = templates::find_template(&args.template)?;
    let mut request = template.to_request(args.tone, args.length);
    let design = template.design();
    if let Some(title) = args.title {
        request.title = title;
    }
    if let Some(prompt) = args.prompt {
        request.prompt = prompt;
    }

    println!("🍳 Cookbook Buddy");
    println!("================\n");

    let store = CookbookStore::load(&config.store_path)
        .with_context(|| format!("Failed to load cookbooks from {}", config.store_path.display()))?;
    let generator = Arc::new(HttpGenerator::new(config.endpoint.clone()));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let outcome = rt.block_on(async {
        let mut state = AppState::new(config, store, generator);
        state.start_generation(request, design)?;
        let outcome = state.run_until_complete().await?;
        println!("{} cookbook(s) saved locally", state.store.cookbooks.len());
        anyhow::Ok(outcome)
    })?;

    match outcome {
        SessionOutcome::Completed(id) => println!("Done: {}", id),
        SessionOutcome::Failed(e) => anyhow::bail!("Generation failed: {}", e),
        SessionOutcome::Cancelled => println!("Cancelled"),
    }

    Ok(())
}
