use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;

use crate::services::dates::normalize_date;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SlotsForm {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Deserialize)]
pub struct ConfirmBookingForm {
    #[serde(default)]
    pub other_players: String,
}

#[derive(Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub input: Option<String>,
}

// POST /slots
pub async fn select_slots(State(state): State<Arc<AppState>>, Form(form): Form<SlotsForm>) -> Redirect {
    state.controller.select_slots(&form.game_id, &form.date).await;
    Redirect::to("/")
}

// POST /slots/generate
pub async fn generate_for_grid(State(state): State<Arc<AppState>>, Form(form): Form<SlotsForm>) -> Redirect {
    match (form.game_id.trim().parse::<i64>(), normalize_date(&form.date)) {
        (Ok(game_id), Some(date)) => {
            state.controller.generate_slots_for_date(game_id, date).await;
        }
        _ => tracing::warn!(game_id = %form.game_id, date = %form.date, "ignoring malformed generate request"),
    }
    Redirect::to("/")
}

// POST /slots/:id/book
pub async fn open_modal(State(state): State<Arc<AppState>>, Path(slot_id): Path<i64>) -> Redirect {
    state.controller.open_booking_modal(slot_id);
    Redirect::to("/")
}

// POST /booking/confirm
pub async fn confirm(State(state): State<Arc<AppState>>, Form(form): Form<ConfirmBookingForm>) -> Redirect {
    state.controller.confirm_booking(&form.other_players).await;
    Redirect::to("/")
}

// POST /booking/close
pub async fn close_modal(State(state): State<Arc<AppState>>) -> Redirect {
    state.controller.close_booking_modal();
    Redirect::to("/")
}

// POST /bookings/:id/cancel
pub async fn request_cancel(State(state): State<Arc<AppState>>, Path(booking_id): Path<i64>) -> Redirect {
    state.controller.request_cancel_booking(booking_id);
    Redirect::to("/")
}

// POST /bookings/:id/check-in
pub async fn check_in(State(state): State<Arc<AppState>>, Path(booking_id): Path<i64>) -> Redirect {
    state.controller.check_in(booking_id).await;
    Redirect::to("/")
}

// POST /prompt
pub async fn resolve_prompt(State(state): State<Arc<AppState>>, Form(form): Form<PromptForm>) -> Redirect {
    let accepted = form.decision == "accept";
    state
        .controller
        .resolve_prompt(accepted, form.input.as_deref())
        .await;
    Redirect::to("/")
}
