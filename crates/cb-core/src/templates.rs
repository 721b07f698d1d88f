//! Static cookbook catalog: per-type metadata and the pre-built templates.

use crate::cookbook::{CookbookDesign, CookbookType, DesignOverrides, GenerationRequest, Length, Tone};
use crate::error::{Error, Result};

/// Display metadata for a cookbook type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookbookTypeInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub default_item_count: Option<u32>,
    pub examples: &'static [&'static str],
    pub structure_hint: &'static str,
}

pub fn type_info(kind: CookbookType) -> CookbookTypeInfo {
    match kind {
        CookbookType::RecipeCollection => CookbookTypeInfo {
            label: "Recipe Collection",
            description: "Curated collection of recipes around a theme",
            icon: "BookOpen",
            default_item_count: Some(10),
            examples: &[
                "30-Minute Weeknight Dinners",
                "Holiday Cookie Collection",
                "One-Pot Comfort Meals",
            ],
            structure_hint: "Create a beautiful recipe collection with:\n\
                1. **Appetizing Introduction** - Set the theme\n\
                2. **Clear Recipe Cards** - Ingredients & steps\n\
                3. **Pro Tips** - Kitchen wisdom",
        },
        CookbookType::MealPlan => CookbookTypeInfo {
            label: "Meal Plan",
            description: "Weekly or monthly meal planning guide",
            icon: "Calendar",
            default_item_count: Some(7),
            examples: &["7-Day Healthy Meal Plan", "Budget-Friendly Weekly Menu"],
            structure_hint: "Create a practical meal planning guide.",
        },
        CookbookType::CuisineGuide => CookbookTypeInfo {
            label: "Cuisine Guide",
            description: "Deep dive into a specific cuisine",
            icon: "Globe",
            default_item_count: None,
            examples: &["Essential Thai Cooking", "Italian Kitchen Basics"],
            structure_hint: "Create an educational cuisine exploration.",
        },
        CookbookType::CookingTips => CookbookTypeInfo {
            label: "Cooking Tips",
            description: "Pro tips and kitchen hacks",
            icon: "Lightbulb",
            default_item_count: None,
            examples: &["Knife Skills 101", "25 Time-Saving Kitchen Hacks"],
            structure_hint: "Create actionable cooking advice.",
        },
        CookbookType::IngredientGuide => CookbookTypeInfo {
            label: "Ingredient Guide",
            description: "Master a specific ingredient",
            icon: "Leaf",
            default_item_count: None,
            examples: &["Everything About Garlic", "Seasonal Produce Guide"],
            structure_hint: "Create a comprehensive ingredient reference.",
        },
        CookbookType::DietPlan => CookbookTypeInfo {
            label: "Diet Plan",
            description: "Specialized dietary recipes",
            icon: "Heart",
            default_item_count: None,
            examples: &["Keto Recipe Collection", "Plant-Based Starter Guide"],
            structure_hint: "Create diet-focused recipe content.",
        },
        CookbookType::BakingGuide => CookbookTypeInfo {
            label: "Baking Guide",
            description: "Baking recipes and techniques",
            icon: "Cake",
            default_item_count: None,
            examples: &["Sourdough for Beginners", "Perfect Pie Crusts"],
            structure_hint: "Create detailed baking instructions.",
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CookbookTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CookbookType,
    pub category: &'static str,
    pub thumbnail: &'static str,

    pub default_title: &'static str,
    pub default_prompt: &'static str,
    pub example_content: &'static str,

    pub default_design: DesignOverrides,

    pub popular: bool,
    pub is_premium: bool,
}

impl CookbookTemplate {
    /// Generation request pre-filled from the template defaults
    pub fn to_request(&self, tone: Tone, length: Length) -> GenerationRequest {
        GenerationRequest {
            kind: self.kind,
            title: self.default_title.to_string(),
            prompt: self.default_prompt.to_string(),
            target_audience: None,
            niche: None,
            tone,
            length,
            item_count: type_info(self.kind).default_item_count,
            user_id: None,
        }
    }

    pub fn design(&self) -> CookbookDesign {
        let mut design = CookbookDesign::default();
        self.default_design.apply(&mut design);
        design
    }
}

fn design(primary_color: &str, template: &str) -> DesignOverrides {
    DesignOverrides {
        primary_color: Some(primary_color.into()),
        template: Some(template.into()),
    }
}

/// Pre-built templates, in catalog order.
pub fn templates() -> Vec<CookbookTemplate> {
    vec![
        CookbookTemplate {
            id: "weeknight-dinners",
            name: "30-Minute Weeknight Dinners",
            description: "Quick and easy dinners for busy families",
            kind: CookbookType::RecipeCollection,
            category: "Quick Meals",
            thumbnail: "/templates/weeknight-dinners.png",
            default_title: "30-Minute Weeknight Dinners",
            default_prompt: "Create a collection of quick, family-friendly dinner recipes that can be \
                prepared in 30 minutes or less, using common pantry ingredients.",
            example_content: "",
            default_design: design("#ea580c", "modern-recipe"),
            popular: true,
            is_premium: false,
        },
        CookbookTemplate {
            id: "healthy-meal-prep",
            name: "Healthy Meal Prep Guide",
            description: "Plan and prep your week in advance",
            kind: CookbookType::MealPlan,
            category: "Meal Planning",
            thumbnail: "/templates/meal-prep.png",
            default_title: "Weekly Healthy Meal Prep Guide",
            default_prompt: "Create a comprehensive meal prep guide with recipes that can be prepared \
                on Sunday and enjoyed throughout the week, focusing on balanced nutrition.",
            example_content: "",
            default_design: design("#16a34a", "clean-recipe"),
            popular: true,
            is_premium: false,
        },
        CookbookTemplate {
            id: "comfort-food-classics",
            name: "Comfort Food Classics",
            description: "Cozy recipes for the soul",
            kind: CookbookType::RecipeCollection,
            category: "Comfort Food",
            thumbnail: "/templates/comfort-food.png",
            default_title: "Comfort Food Classics Cookbook",
            default_prompt: "Create a collection of heartwarming comfort food recipes including soups, \
                casseroles, and classic dishes that bring warmth and nostalgia.",
            example_content: "",
            default_design: design("#d97706", "clean-recipe"),
            popular: true,
            is_premium: false,
        },
    ]
}

pub fn templates_by_type(kind: CookbookType) -> Vec<CookbookTemplate> {
    templates().into_iter().filter(|t| t.kind == kind).collect()
}

pub fn popular_templates() -> Vec<CookbookTemplate> {
    templates().into_iter().filter(|t| t.popular).collect()
}

pub fn free_templates() -> Vec<CookbookTemplate> {
    templates().into_iter().filter(|t| !t.is_premium).collect()
}

pub fn find_template(id: &str) -> Result<CookbookTemplate> {
    templates()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| Error::TemplateNotFound(id.to_string()))
}

pub const TEMPLATE_CATEGORIES: &[&str] = &[
    "Quick Meals",
    "Meal Planning",
    "Comfort Food",
];
