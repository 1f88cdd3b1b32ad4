use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use serde::Deserialize;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub sap_id: String,
    #[serde(default)]
    pub password: String,
}

// POST /login
pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Redirect {
    state.controller.login(&form.username, &form.password).await;
    Redirect::to("/")
}

// POST /register
pub async fn register(State(state): State<Arc<AppState>>, Form(form): Form<RegisterForm>) -> Redirect {
    state
        .controller
        .register(&form.email, &form.sap_id, &form.password)
        .await;
    Redirect::to("/")
}

// POST /logout
pub async fn logout(State(state): State<Arc<AppState>>) -> Redirect {
    state.controller.logout();
    Redirect::to("/")
}

// POST /show/login
pub async fn show_login(State(state): State<Arc<AppState>>) -> Redirect {
    state.controller.show_login_form();
    Redirect::to("/")
}

// POST /show/register
pub async fn show_register(State(state): State<Arc<AppState>>) -> Redirect {
    state.controller.show_register_form();
    Redirect::to("/")
}
