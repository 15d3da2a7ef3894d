use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    LargeOrder,
    LargeReservation,
    General,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::LargeOrder => "large_order",
            NotificationType::LargeReservation => "large_reservation",
            NotificationType::General => "general",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "large_order" => NotificationType::LargeOrder,
            "large_reservation" => NotificationType::LargeReservation,
            _ => NotificationType::General,
        }
    }
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
