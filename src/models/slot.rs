use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: i64,
    pub game_id: i64,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    pub is_available: bool,
    pub is_cancelled: bool,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

impl Slot {
    pub fn is_bookable(&self) -> bool {
        self.is_available && !self.is_cancelled
    }

    pub fn status_label(&self) -> String {
        if self.is_cancelled {
            match self.cancellation_reason.as_deref().filter(|r| !r.is_empty()) {
                Some(reason) => format!("Cancelled: {reason}"),
                None => "Cancelled".to_string(),
            }
        } else if !self.is_available {
            "Booked".to_string()
        } else {
            "Available".to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateSlots {
    pub game_id: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelSlots {
    pub game_id: String,
    pub date: String,
    pub reason: String,
}
