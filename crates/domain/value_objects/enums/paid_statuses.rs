use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Whether an order or reservation has been settled.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaidStatus {
    #[default]
    Unpaid,
    Paid,
}

impl PaidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidStatus::Unpaid => "unpaid",
            PaidStatus::Paid => "paid",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "paid" => PaidStatus::Paid,
            _ => PaidStatus::Unpaid,
        }
    }
}

impl Display for PaidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
