// Server-sent event streaming of dashboard redraw events
use crate::application::dashboard_service::DashboardEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio::sync::broadcast::{self, error::RecvError};

/// Turn a redraw event into an SSE frame named after its type.
fn to_sse_event(event: &DashboardEvent) -> Result<Event, axum::Error> {
    let name = match event {
        DashboardEvent::Sample(_) => "sample",
        DashboardEvent::Cleared { .. } => "cleared",
        DashboardEvent::Status { .. } => "status",
    };
    Event::default().event(name).json_data(event)
}

/// Stream events from `rx` until the sender side goes away.
/// Sample events are incremental, so a lagging subscriber gets a `resync`
/// frame telling the client to refetch the snapshot.
pub fn event_stream(
    mut rx: broadcast::Receiver<DashboardEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => match to_sse_event(&event) {
                    Ok(frame) => yield Ok(frame),
                    Err(e) => tracing::error!("Failed to encode dashboard event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event subscriber lagging");
                    yield Ok(Event::default().event("resync").data(skipped.to_string()));
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}

/// Helper to create an SSE response from a receiver
pub fn sse_from_receiver(
    rx: broadcast::Receiver<DashboardEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(event_stream(rx)).keep_alive(KeepAlive::default())
}
