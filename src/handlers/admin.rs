use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;

use crate::handlers::booking::SlotsForm;
use crate::models::GameStatus;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateGameForm {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub max_players: String,
}

#[derive(Deserialize)]
pub struct ToggleStatusForm {
    pub status: GameStatus,
}

// POST /admin/game-form
pub async fn toggle_game_form(State(state): State<Arc<AppState>>) -> Redirect {
    state.controller.toggle_game_form();
    Redirect::to("/")
}

// POST /admin/games
pub async fn create_game(State(state): State<Arc<AppState>>, Form(form): Form<CreateGameForm>) -> Redirect {
    state
        .controller
        .create_game(&form.name, &form.kind, &form.max_players)
        .await;
    Redirect::to("/")
}

// POST /admin/games/:id/toggle
pub async fn toggle_status(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
    Form(form): Form<ToggleStatusForm>,
) -> Redirect {
    state.controller.toggle_game_status(game_id, form.status).await;
    Redirect::to("/")
}

// POST /admin/slots/generate
pub async fn generate_slots(State(state): State<Arc<AppState>>, Form(form): Form<SlotsForm>) -> Redirect {
    state.controller.generate_slots(&form.game_id, &form.date).await;
    Redirect::to("/")
}

// POST /admin/slots/cancel
pub async fn cancel_slots(State(state): State<Arc<AppState>>, Form(form): Form<SlotsForm>) -> Redirect {
    state.controller.request_cancel_slots(&form.game_id, &form.date);
    Redirect::to("/")
}
