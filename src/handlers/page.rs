use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::sse::{Event, Sse};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

static STYLE_CSS: &str = include_str!("../web/style.css");
static APP_JS: &str = include_str!("../web/app.js");

pub async fn health() -> &'static str {
    "ok"
}

// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    state.controller.ensure_initialized().await;
    state.controller.settle().await;
    let page = state.controller.render(&state.toasts.active());
    Ok(Html(page.render()?))
}

// GET /static/:name
pub async fn static_asset(Path(name): Path<String>) -> Result<Response, AppError> {
    let (content_type, body) = match name.as_str() {
        "style.css" => ("text/css; charset=utf-8", STYLE_CSS),
        "app.js" => ("application/javascript; charset=utf-8", APP_JS),
        _ => return Err(AppError::NotFound(format!("static asset {name}"))),
    };
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

// POST /toasts/:id/dismiss
pub async fn dismiss_toast(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Redirect {
    if !state.toasts.dismiss(id) {
        tracing::debug!(%id, "toast already gone");
    }
    Redirect::to("/")
}

// GET /events
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.toasts.subscribe();

    let live_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => {
            let data = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok::<_, Infallible>(Event::default().data(data).event("toast")))
        }
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(_)) => None,
    });

    let keepalive_stream = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok::<_, Infallible>(Event::default().comment("keepalive")),
    );

    Sse::new(StreamExt::merge(live_stream, keepalive_stream))
}
