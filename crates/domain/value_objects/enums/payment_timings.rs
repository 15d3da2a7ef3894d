use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentTiming {
    #[default]
    Prepaid,
    Cod,
}

impl PaymentTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentTiming::Prepaid => "prepaid",
            PaymentTiming::Cod => "cod",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "prepaid" => Some(PaymentTiming::Prepaid),
            "cod" => Some(PaymentTiming::Cod),
            _ => None,
        }
    }
}

impl Display for PaymentTiming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
