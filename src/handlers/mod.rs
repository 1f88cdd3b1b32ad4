pub mod admin;
pub mod auth;
pub mod booking;
pub mod page;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(page::health))
        .route("/events", get(page::events_stream))
        .route("/static/:name", get(page::static_asset))
        .route("/toasts/:id/dismiss", post(page::dismiss_toast))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/show/login", post(auth::show_login))
        .route("/show/register", post(auth::show_register))
        .route("/slots", post(booking::select_slots))
        .route("/slots/generate", post(booking::generate_for_grid))
        .route("/slots/:id/book", post(booking::open_modal))
        .route("/booking/confirm", post(booking::confirm))
        .route("/booking/close", post(booking::close_modal))
        .route("/bookings/:id/cancel", post(booking::request_cancel))
        .route("/bookings/:id/check-in", post(booking::check_in))
        .route("/prompt", post(booking::resolve_prompt))
        .route("/admin/game-form", post(admin::toggle_game_form))
        .route("/admin/games", post(admin::create_game))
        .route("/admin/games/:id/toggle", post(admin::toggle_status))
        .route("/admin/slots/generate", post(admin::generate_slots))
        .route("/admin/slots/cancel", post(admin::cancel_slots))
        .with_state(state)
}
