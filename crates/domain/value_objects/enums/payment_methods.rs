use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Bank,
    Momo,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Bank => "bank",
            PaymentMethod::Momo => "momo",
            PaymentMethod::Cash => "cash",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "bank" => Some(PaymentMethod::Bank),
            "momo" => Some(PaymentMethod::Momo),
            "cash" => Some(PaymentMethod::Cash),
            _ => None,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
