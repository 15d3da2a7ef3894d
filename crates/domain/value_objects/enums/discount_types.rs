use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    None,
    Branch,
    Dish,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::None => "none",
            DiscountType::Branch => "branch",
            DiscountType::Dish => "dish",
        }
    }

    /// Unknown values fall back to `None`, matching an unset form field.
    pub fn from_str(value: &str) -> Self {
        match value {
            "branch" => DiscountType::Branch,
            "dish" => DiscountType::Dish,
            _ => DiscountType::None,
        }
    }
}

impl Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
