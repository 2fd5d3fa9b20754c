//! Food item category.

use serde::{Deserialize, Serialize};

/// Menu category of a food item.
///
/// Wire format: capitalised string (`Starters`, `Mains`, `Desserts`,
/// `Beverages`), matching what clients render on menu cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodCategory {
    Starters,
    Mains,
    Desserts,
    Beverages,
}

impl FoodCategory {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_str(v: &str) -> Option<Self> {
        match v {
            "Starters" => Some(Self::Starters),
            "Mains" => Some(Self::Mains),
            "Desserts" => Some(Self::Desserts),
            "Beverages" => Some(Self::Beverages),
            _ => None,
        }
    }

    /// Wire string for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starters => "Starters",
            Self::Mains => "Mains",
            Self::Desserts => "Desserts",
            Self::Beverages => "Beverages",
        }
    }
}

impl Default for FoodCategory {
    fn default() -> Self {
        Self::Mains
    }
}
