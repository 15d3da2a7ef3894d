use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DishCategory {
    Appetizer,
    Main,
    Dessert,
    Beverage,
}

impl DishCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DishCategory::Appetizer => "appetizer",
            DishCategory::Main => "main",
            DishCategory::Dessert => "dessert",
            DishCategory::Beverage => "beverage",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "appetizer" => Some(DishCategory::Appetizer),
            "main" => Some(DishCategory::Main),
            "dessert" => Some(DishCategory::Dessert),
            "beverage" => Some(DishCategory::Beverage),
            _ => None,
        }
    }
}

impl Display for DishCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
