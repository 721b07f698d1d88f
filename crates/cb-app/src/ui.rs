use cb_core::{ProgressSimulator, StepState, Variant, VariantStyle};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const PATIENCE_HINT: &str = "Detailed recipes take a bit more time - hang tight!";

/// Terminal rendition of the loading screen
pub struct LoadingView {
    bar: ProgressBar,
    current_message: Option<String>,
    shown_fact: Option<usize>,
    hint_shown: bool,
}

impl LoadingView {
    pub fn new(variant: Variant, current_message: Option<String>, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(100), target);
        bar.set_style(bar_style(variant.style()));
        bar.set_prefix(format!("[{}]", variant.style().icon));

        Self {
            bar,
            current_message,
            shown_fact: None,
            hint_shown: false,
        }
    }

    pub fn render(&mut self, sim: &ProgressSimulator, operation: Option<&str>) {
        self.bar.set_position(sim.displayed_progress_rounded() as u64);
        self.bar
            .set_message(status_line(sim, self.current_message.as_deref(), operation));

        if self.shown_fact != Some(sim.fact_index()) {
            self.bar.println(format!("  * {}", sim.current_fact()));
            self.shown_fact = Some(sim.fact_index());
        }

        if sim.show_patience_hint() && !self.hint_shown {
            self.bar.println(format!("  {}", PATIENCE_HINT));
            self.hint_shown = true;
        }
    }

    pub fn finish_ok(&self, message: &str) {
        self.bar
            .set_style(ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
        self.bar.finish_with_message(format!("✔ {}", message));
    }

    pub fn finish_err(&self, message: &str) {
        self.bar.abandon_with_message(format!("✘ {}", message));
    }
}

fn bar_color(style: VariantStyle) -> &'static str {
    if style.color.contains("purple") {
        "magenta"
    } else {
        "yellow"
    }
}

fn bar_style(style: VariantStyle) -> ProgressStyle {
    let template = format!(
        "{{prefix}} [{{bar:30.{}}}] {{pos:>3}}% {{msg}}",
        bar_color(style)
    );
    ProgressStyle::with_template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// One glyph per step: done, active, pending.
pub fn step_dots(states: &[StepState]) -> String {
    states
        .iter()
        .map(|s| match s {
            StepState::Done => '●',
            StepState::Active => '◉',
            StepState::Pending => '○',
        })
        .collect()
}

/// Text shown next to the bar: step label (or caller override), dots, operation, elapsed.
pub fn status_line(sim: &ProgressSimulator, current_message: Option<&str>, operation: Option<&str>) -> String {
    let label = current_message.unwrap_or(sim.current_step().label.as_str());
    let mut line = format!("{} {}", step_dots(&sim.step_states()), label);
    if let Some(op) = operation.filter(|op| !op.is_empty()) {
        line.push_str(&format!(" ({})", op));
    }
    line.push_str(&format!(" · {}", sim.elapsed_label()));
    line
}
