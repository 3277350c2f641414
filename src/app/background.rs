//! Background task handling
//!
//! Network calls run on tokio tasks and report back over an mpsc
//! channel the main loop drains between frames. Channel sends use
//! `let _ =`: a failed send means the receiver is gone because the app
//! is shutting down, so nobody needs the result.

use crate::api::ApiClient;
use crate::app::messages::BackgroundMessage;
use crate::app::RuntimeContext;
use crate::request::ValidationRequest;
use crate::session::SessionRecord;
use crate::ui::App;
use std::sync::mpsc;
use std::sync::Arc;

/// Submit an idea for validation. The request travels with the reply so
/// the session can be recorded from whatever the user actually sent.
pub fn spawn_validation(
    client: Arc<ApiClient>,
    tx: mpsc::Sender<BackgroundMessage>,
    request: ValidationRequest,
) {
    tokio::spawn(async move {
        let message = match client.submit(&request).await {
            Ok(result) => BackgroundMessage::ValidationReady { request, result },
            Err(e) => BackgroundMessage::ValidationFailed(e.to_string()),
        };
        let _ = tx.send(message);
    });
}

pub fn spawn_follow_up(
    client: Arc<ApiClient>,
    tx: mpsc::Sender<BackgroundMessage>,
    thread_id: String,
    question: String,
) {
    tokio::spawn(async move {
        let message = match client.ask_follow_up(&thread_id, &question).await {
            Ok(exchange) => BackgroundMessage::FollowUpReady(exchange),
            Err(e) => BackgroundMessage::FollowUpFailed(e.to_string()),
        };
        let _ = tx.send(message);
    });
}

pub fn spawn_health_check(client: Arc<ApiClient>, tx: mpsc::Sender<BackgroundMessage>) {
    tokio::spawn(async move {
        let healthy = client.check_health().await;
        let _ = tx.send(BackgroundMessage::HealthChecked(healthy));
    });
}

/// Apply queued background messages to the app state. Non-blocking.
/// Session persistence is best-effort; a failed save means nothing to
/// restore next launch.
pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>, ctx: &RuntimeContext) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            BackgroundMessage::ValidationReady { request, result } => {
                if let Some(store) = &ctx.store {
                    let _ = store.save(&SessionRecord {
                        idea_data: request.clone(),
                        result: result.clone(),
                        timestamp: chrono::Utc::now(),
                    });
                }
                app.apply_validation(request, result);
            }
            BackgroundMessage::ValidationFailed(e) => {
                app.apply_validation_error(e);
            }
            BackgroundMessage::FollowUpReady(exchange) => {
                app.apply_follow_up(exchange);
            }
            BackgroundMessage::FollowUpFailed(e) => {
                app.apply_follow_up_error(e);
            }
            BackgroundMessage::HealthChecked(healthy) => {
                app.backend_healthy = Some(healthy);
            }
        }
    }
}
