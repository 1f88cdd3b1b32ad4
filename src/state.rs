use std::sync::Arc;

use crate::controller::ViewController;
use crate::services::toasts::Toasts;

/// One controller per process. It guards its own page state, so handlers
/// share it without an outer lock.
pub struct AppState {
    pub controller: ViewController,
    pub toasts: Arc<Toasts>,
}
