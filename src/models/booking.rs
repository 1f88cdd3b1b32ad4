use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::timestamp;

/// Entry of `GET /users/bookings/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingHistory {
    pub id: i64,
    pub game_name: String,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub other_players: Option<String>,
    #[serde(default)]
    pub checked_in: bool,
    #[serde(default, with = "timestamp::option")]
    pub check_in_time: Option<NaiveDateTime>,
}

impl BookingHistory {
    /// Upcoming iff the booking starts strictly after `now`.
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.start_time > now
    }
}

/// Most recent start first.
pub fn sort_history(bookings: &mut [BookingHistory]) {
    bookings.sort_by(|a, b| b.start_time.cmp(&a.start_time));
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub slot_id: i64,
    pub other_players: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: i64, start: &str) -> BookingHistory {
        let start_time = timestamp::parse(start).unwrap();
        BookingHistory {
            id,
            game_name: "Chess".to_string(),
            start_time,
            end_time: start_time + chrono::Duration::minutes(30),
            status: Some("pending".to_string()),
            other_players: None,
            checked_in: false,
            check_in_time: None,
        }
    }

    #[test]
    fn test_upcoming_is_strictly_after_now() {
        let now = timestamp::parse("2024-06-10T09:00:00").unwrap();
        assert!(booking(1, "2024-06-10T09:00:01").is_upcoming(now));
        assert!(!booking(2, "2024-06-10T09:00:00").is_upcoming(now));
        assert!(!booking(3, "2024-06-09T18:00:00").is_upcoming(now));
    }

    #[test]
    fn test_sort_descending_by_start() {
        let mut bookings = vec![
            booking(1, "2024-06-10T09:00:00"),
            booking(2, "2024-06-12T09:00:00"),
            booking(3, "2024-06-11T09:00:00"),
        ];
        sort_history(&mut bookings);
        assert_eq!(
            bookings.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_deserialize_history_without_optional_fields() {
        let b: BookingHistory = serde_json::from_str(
            r#"{"id":4,"game_name":"Carrom","start_time":"2024-06-10T10:00:00","end_time":"2024-06-10T10:30:00"}"#,
        )
        .unwrap();
        assert!(!b.checked_in);
        assert_eq!(b.check_in_time, None);
    }

    #[test]
    fn test_new_booking_body() {
        let body = serde_json::to_value(NewBooking {
            slot_id: 42,
            other_players: String::new(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"slot_id": 42, "other_players": ""}));
    }
}
