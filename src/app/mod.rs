pub mod background;
pub mod input;
pub mod messages;
pub mod runtime;

pub use messages::BackgroundMessage;
pub use runtime::run_tui;

use crate::api::ApiClient;
use crate::session::SessionStore;
use std::sync::mpsc;
use std::sync::Arc;

/// Shared handles the input layer needs to dispatch background work.
pub struct RuntimeContext {
    pub client: Arc<ApiClient>,
    pub tx: mpsc::Sender<messages::BackgroundMessage>,
    /// `None` when no cache directory is available; the app then runs
    /// without session persistence.
    pub store: Option<SessionStore>,
}
