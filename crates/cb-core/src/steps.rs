use serde::{Deserialize, Serialize};

/// A named phase of a cookbook generation, shown on the loading screen.
///
/// `weight` is the phase's share of the reference duration, in seconds. It only
/// drives display sequencing, never the real work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStep {
    pub label: String,
    #[serde(default = "default_step_icon")]
    pub icon: String,
    pub weight: f64,
}

fn default_step_icon() -> String {
    "Sparkle".into()
}

impl GenerationStep {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            weight,
        }
    }

    /// Weights must be finite and strictly positive to take part in sequencing
    pub fn is_valid(&self) -> bool {
        self.weight.is_finite() && self.weight > 0.0
    }
}

const BUILTIN_STEPS: &[(&str, &str, f64)] = &[
    ("Understanding your recipe request", "Brain", 8.0),
    ("Researching ingredients & techniques", "BookOpen", 15.0),
    ("Writing your recipes", "PencilLine", 60.0),
    ("Adding cooking tips & variations", "CookingPot", 30.0),
    ("Formatting & organizing", "FileText", 20.0),
    ("Final taste test", "CheckCircle", 10.0),
];

pub const FUN_FACTS: &[&str] = &[
    "Did you know? Honey is the only food that never spoils.",
    "Pro tip: Salt your pasta water until it tastes like the ocean.",
    "Fun fact: Apples belong to the rose family, just like pears and plums.",
    "Chef secret: A dull knife is more dangerous than a sharp one.",
    "Did you know? Cranberries bounce when they are ripe.",
    "Cooking tip: Let your meat rest to keep those juices locked in!",
    "Fun fact: Wasabi is technically a member of the cabbage family.",
    "Pound cake got its name because it originally used a pound of every ingredient.",
];

/// The cooking-themed step table used when the caller supplies none.
pub fn default_steps() -> Vec<GenerationStep> {
    BUILTIN_STEPS
        .iter()
        .map(|&(label, icon, weight)| GenerationStep::new(label, icon, weight))
        .collect()
}

pub fn default_facts() -> Vec<String> {
    FUN_FACTS.iter().map(|f| f.to_string()).collect()
}

/// Sum of all step weights, i.e. the reference duration in seconds.
pub fn total_weight(steps: &[GenerationStep]) -> f64 {
    steps.iter().map(|s| s.weight).sum()
}
