use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Paid,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Paid => "paid",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "paid" => Some(ReservationStatus::Paid),
            "completed" => Some(ReservationStatus::Completed),
            "cancelled" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;

        matches!(
            (self, next),
            (Pending, Confirmed | Paid | Cancelled)
                | (Paid, Confirmed | Completed | Cancelled)
                | (Confirmed, Completed | Cancelled)
        )
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_reservation_can_complete_or_cancel() {
        assert!(ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Completed));
        assert!(ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Cancelled));
        assert!(!ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Pending));
    }

    #[test]
    fn pending_reservation_cannot_complete_before_confirmation() {
        assert!(!ReservationStatus::Pending.can_transition_to(ReservationStatus::Completed));
    }
}
