use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Visual flavor of the loading screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Magic,
    Brain,
    Book,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantStyle {
    pub icon: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
}

impl Variant {
    pub const ALL: [Variant; 4] = [Variant::Default, Variant::Magic, Variant::Brain, Variant::Book];

    pub fn style(self) -> VariantStyle {
        match self {
            Variant::Default => VariantStyle {
                icon: "Sparkle",
                color: "text-primary",
                bg_color: "bg-primary/10",
            },
            Variant::Magic => VariantStyle {
                icon: "MagicWand",
                color: "text-purple-500",
                bg_color: "bg-purple-500/10",
            },
            Variant::Brain => VariantStyle {
                icon: "Brain",
                color: "text-primary",
                bg_color: "bg-primary/10",
            },
            Variant::Book => VariantStyle {
                icon: "BookOpen",
                color: "text-primary",
                bg_color: "bg-primary/10",
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Magic => "magic",
            Variant::Brain => "brain",
            Variant::Book => "book",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidConfig(format!("unknown variant '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_is_the_only_purple_variant() {
        let purple: Vec<_> = Variant::ALL
            .into_iter()
            .filter(|v| v.style().color == "text-purple-500")
            .collect();
        assert_eq!(purple, vec![Variant::Magic]);
        assert_eq!(Variant::Magic.style().icon, "MagicWand");
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("BOOK".parse::<Variant>().unwrap(), Variant::Book);
        assert_eq!("default".parse::<Variant>().unwrap(), Variant::Default);
        assert!("sparkly".parse::<Variant>().is_err());
    }
}
