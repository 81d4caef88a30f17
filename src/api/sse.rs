//! Server-Sent Events support

use crate::runtime::UiEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert broadcast stream to SSE stream
pub fn sse_stream(
    init_event: UiEvent,
    broadcast_rx: tokio::sync::broadcast::Receiver<UiEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Stream starts with the init snapshot, then live broadcasts
    let init = futures::stream::once(async move { Ok(ui_event_to_axum(init_event)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(ui_event_to_axum(event))),
        Err(_) => None, // Skip lagged messages
    });

    let combined = init.chain(broadcasts);

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn ui_event_to_axum(event: UiEvent) -> Event {
    let (event_type, data) = match event {
        UiEvent::Init { snapshot } => (
            "init",
            json!({
                "type": "init",
                "snapshot": snapshot
            }),
        ),
        UiEvent::Message { message } => (
            "message",
            json!({
                "type": "message",
                "message": message
            }),
        ),
        UiEvent::ChatStateChanged { open, typing } => (
            "chat_state",
            json!({
                "type": "chat_state",
                "open": open,
                "typing": typing
            }),
        ),
        UiEvent::NotificationsChanged {
            notifications,
            unread_count,
        } => (
            "notifications",
            json!({
                "type": "notifications",
                "notifications": notifications,
                "unread_count": unread_count
            }),
        ),
        UiEvent::WelcomeChanged { visible } => (
            "welcome",
            json!({
                "type": "welcome",
                "visible": visible
            }),
        ),
        UiEvent::ScrollToLatest => (
            "scroll",
            json!({
                "type": "scroll"
            }),
        ),
        UiEvent::Error { message } => (
            "error",
            json!({
                "type": "error",
                "message": message
            }),
        ),
    };

    Event::default().event(event_type).data(data.to_string())
}
