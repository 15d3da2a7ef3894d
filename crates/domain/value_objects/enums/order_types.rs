use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderType {
    #[serde(rename = "dine-in")]
    DineIn,
    #[default]
    #[serde(rename = "takeaway")]
    Takeaway,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::Takeaway => "takeaway",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "dine-in" => Some(OrderType::DineIn),
            "takeaway" => Some(OrderType::Takeaway),
            _ => None,
        }
    }

    pub fn occupies_table(&self) -> bool {
        matches!(self, OrderType::DineIn)
    }
}

impl Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
