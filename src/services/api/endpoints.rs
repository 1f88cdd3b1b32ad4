use chrono::NaiveDate;

use super::{ApiClient, RequestOptions};
use crate::errors::ApiError;
use crate::models::{
    BookingHistory, CancelSlots, Credentials, Game, GameStatus, GameStatusUpdate, GenerateSlots,
    LoginResponse, NewBooking, NewGame, Registration, Slot, User,
};
use crate::services::dates::format_date;

type Reply = serde_json::Value;

impl ApiClient {
    // ── Users ──

    /// Logs in and keeps the returned token for later calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self
            .request("/users/login", RequestOptions::post(&credentials)?)
            .await?;
        self.tokens.set(&resp.access_token);
        tracing::info!(username, "logged in");
        Ok(resp)
    }

    pub async fn register(&self, email: &str, sap_id: &str, password: &str) -> Result<Reply, ApiError> {
        let registration = Registration {
            email: email.to_string(),
            sap_id: sap_id.to_string(),
            password: password.to_string(),
        };
        self.request("/users/register", RequestOptions::post(&registration)?)
            .await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request("/users/me", RequestOptions::get()).await
    }

    pub async fn booking_history(&self) -> Result<Vec<BookingHistory>, ApiError> {
        self.request("/users/bookings/history", RequestOptions::get())
            .await
    }

    // ── Games ──

    pub async fn games(&self) -> Result<Vec<Game>, ApiError> {
        self.request("/games", RequestOptions::get()).await
    }

    pub async fn game_slots(&self, game_id: i64, date: NaiveDate) -> Result<Vec<Slot>, ApiError> {
        let path = format!("/games/{game_id}/slots?date={}", format_date(date));
        self.request(&path, RequestOptions::get()).await
    }

    // ── Bookings ──

    pub async fn create_booking(&self, slot_id: i64, other_players: &str) -> Result<Reply, ApiError> {
        let booking = NewBooking {
            slot_id,
            other_players: other_players.to_string(),
        };
        self.request("/bookings", RequestOptions::post(&booking)?)
            .await
    }

    pub async fn cancel_booking(&self, booking_id: i64) -> Result<Reply, ApiError> {
        self.request(&format!("/bookings/{booking_id}"), RequestOptions::delete())
            .await
    }

    pub async fn check_in(&self, booking_id: i64) -> Result<Reply, ApiError> {
        let options = RequestOptions {
            method: reqwest::Method::POST,
            ..RequestOptions::default()
        };
        self.request(&format!("/bookings/{booking_id}/check-in"), options)
            .await
    }

    // ── Admin ──

    pub async fn create_game(&self, game: &NewGame) -> Result<Game, ApiError> {
        self.request("/admin/games", RequestOptions::post(game)?).await
    }

    pub async fn update_game_status(&self, game_id: i64, status: GameStatus) -> Result<Game, ApiError> {
        self.request(
            &format!("/admin/games/{game_id}/status"),
            RequestOptions::put(&GameStatusUpdate { status })?,
        )
        .await
    }

    pub async fn generate_slots(&self, game_id: i64, date: NaiveDate) -> Result<Reply, ApiError> {
        let body = GenerateSlots {
            game_id: game_id.to_string(),
            date: format_date(date),
        };
        self.request("/admin/slots/generate", RequestOptions::post(&body)?)
            .await
    }

    pub async fn cancel_slots(&self, game_id: i64, date: NaiveDate, reason: &str) -> Result<Reply, ApiError> {
        let body = CancelSlots {
            game_id: game_id.to_string(),
            date: format_date(date),
            reason: reason.to_string(),
        };
        self.request(
            "/admin/slots/cancel",
            RequestOptions::with_json(reqwest::Method::DELETE, &body)?,
        )
        .await
    }
}
