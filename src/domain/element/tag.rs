//! Element value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidElementError;

/// All elements, in navigation order
pub const ALL_ELEMENTS: &[Element] = &[
    Element::Earth,
    Element::Water,
    Element::Fire,
    Element::Air,
    Element::Spirit,
];

/// Thematic journal category. Also used as the folder an entry is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    #[default]
    Earth,
    Water,
    Fire,
    Air,
    Spirit,
}

impl Element {
    /// Get the string tag for this element
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Earth => "earth",
            Self::Water => "water",
            Self::Fire => "fire",
            Self::Air => "air",
            Self::Spirit => "spirit",
        }
    }

    /// Get the capitalized display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Earth => "Earth",
            Self::Water => "Water",
            Self::Fire => "Fire",
            Self::Air => "Air",
            Self::Spirit => "Spirit",
        }
    }

    /// Look up an element by its exact tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        ALL_ELEMENTS.iter().copied().find(|e| e.as_str() == tag)
    }
}

/// Check whether `tag` names one of the five elements (exact, case-sensitive)
pub fn is_valid_element(tag: &str) -> bool {
    Element::from_tag(tag).is_some()
}

impl FromStr for Element {
    type Err = InvalidElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::from_tag(s.trim().to_lowercase().as_str())
            .ok_or_else(|| InvalidElementError { input: s.to_string() })
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
