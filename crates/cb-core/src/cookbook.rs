use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::progress::DEFAULT_EXPECTED_DURATION;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CookbookType {
    RecipeCollection,
    MealPlan,
    CuisineGuide,
    CookingTips,
    IngredientGuide,
    DietPlan,
    BakingGuide,
}

impl CookbookType {
    pub const ALL: [CookbookType; 7] = [
        CookbookType::RecipeCollection,
        CookbookType::MealPlan,
        CookbookType::CuisineGuide,
        CookbookType::CookingTips,
        CookbookType::IngredientGuide,
        CookbookType::DietPlan,
        CookbookType::BakingGuide,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CookbookType::RecipeCollection => "recipe-collection",
            CookbookType::MealPlan => "meal-plan",
            CookbookType::CuisineGuide => "cuisine-guide",
            CookbookType::CookingTips => "cooking-tips",
            CookbookType::IngredientGuide => "ingredient-guide",
            CookbookType::DietPlan => "diet-plan",
            CookbookType::BakingGuide => "baking-guide",
        }
    }
}

impl fmt::Display for CookbookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    #[default]
    Friendly,
    Educational,
    Persuasive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Standard,
    Detailed,
}

impl Length {
    /// How long the loading screen should expect a generation of this length to take
    pub fn expected_duration(self) -> Duration {
        match self {
            Length::Short => Duration::from_secs(45),
            Length::Standard => Duration::from_secs_f64(DEFAULT_EXPECTED_DURATION),
            Length::Detailed => Duration::from_secs(150),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookbookStatus {
    #[default]
    Draft,
    Generating,
    Complete,
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Png,
    Html,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookbookDesign {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,

    pub font_family: String,
    pub title_size: TitleSize,

    pub template: String,
    pub show_logo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
}

impl Default for CookbookDesign {
    fn default() -> Self {
        Self {
            primary_color: "#ea580c".into(),
            secondary_color: "#fed7aa".into(),
            background_color: "#ffffff".into(),
            text_color: "#1c1917".into(),
            font_family: "Georgia".into(),
            title_size: TitleSize::Medium,
            template: "modern-recipe".into(),
            show_logo: false,
            logo_url: None,
            company_name: None,
            website_url: None,
            cta_text: None,
            cta_url: None,
        }
    }
}

/// Design fields a template pre-fills; everything else comes from the default design.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignOverrides {
    pub primary_color: Option<String>,
    pub template: Option<String>,
}

impl DesignOverrides {
    pub fn apply(&self, design: &mut CookbookDesign) {
        if let Some(color) = &self.primary_color {
            design.primary_color = color.clone();
        }
        if let Some(template) = &self.template {
            design.template = template.clone();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookbook {
    pub id: String,
    pub user_id: String,

    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: CookbookType,
    /// Generated HTML
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_solved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,

    pub tone: Tone,
    pub length: Length,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    pub design: CookbookDesign,

    pub status: CookbookStatus,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    /// Unix seconds
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<u64>,

    #[serde(default)]
    pub exported_formats: Vec<ExportFormat>,
    #[serde(default)]
    pub download_count: u32,
}

impl Cookbook {
    /// A fresh draft for `request`, not yet generated.
    pub fn draft(id: impl Into<String>, request: &GenerationRequest, now: u64) -> Self {
        Self {
            id: id.into(),
            user_id: request.user_id.clone().unwrap_or_default(),
            title: request.title.clone(),
            subtitle: None,
            description: None,
            kind: request.kind,
            content: String::new(),
            raw_content: None,
            target_audience: request.target_audience.clone(),
            problem_solved: None,
            niche: request.niche.clone(),
            tone: request.tone,
            length: request.length,
            prompt: Some(request.prompt.clone()),
            design: CookbookDesign::default(),
            status: CookbookStatus::Draft,
            word_count: 0,
            item_count: request.item_count,
            created_at: now,
            updated_at: now,
            generated_at: None,
            exported_formats: Vec::new(),
            download_count: 0,
        }
    }

    /// Fills in generated content, or marks the cookbook failed.
    pub fn apply_response(&mut self, response: &GenerationResponse, now: u64) {
        self.updated_at = now;
        if !response.success {
            self.status = CookbookStatus::Error;
            return;
        }
        self.content = response.content.clone();
        self.raw_content = Some(response.raw_content.clone());
        self.word_count = response.word_count;
        if response.item_count.is_some() {
            self.item_count = response.item_count;
        }
        self.status = CookbookStatus::Complete;
        self.generated_at = Some(now);
    }
}

/// Partial update merged into a cookbook by the store
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CookbookPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub prompt: Option<String>,
    pub tone: Option<Tone>,
    pub length: Option<Length>,
    pub design: Option<CookbookDesign>,
    pub status: Option<CookbookStatus>,
    pub word_count: Option<usize>,
    pub item_count: Option<u32>,
}

impl CookbookPatch {
    pub fn status(status: CookbookStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(&self, cookbook: &mut Cookbook) {
        if let Some(v) = &self.title {
            cookbook.title = v.clone();
        }
        if let Some(v) = &self.content {
            cookbook.content = v.clone();
        }
        if let Some(v) = &self.design {
            cookbook.design = v.clone();
        }
        if let Some(v) = self.tone {
            cookbook.tone = v;
        }
        if let Some(v) = self.length {
            cookbook.length = v;
        }
        if let Some(v) = self.status {
            cookbook.status = v;
        }
        if let Some(v) = self.word_count {
            cookbook.word_count = v;
        }
        if let Some(v) = &self.subtitle {
            cookbook.subtitle = Some(v.clone());
        }
        if let Some(v) = &self.description {
            cookbook.description = Some(v.clone());
        }
        if let Some(v) = &self.prompt {
            cookbook.prompt = Some(v.clone());
        }
        if let Some(v) = self.item_count {
            cookbook.item_count = Some(v);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(rename = "type")]
    pub kind: CookbookType,
    pub title: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    pub tone: Tone,
    pub length: Length,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    pub content: String,
    #[serde(default)]
    pub raw_content: String,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
