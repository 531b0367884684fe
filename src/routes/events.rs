//! Server-sent view-change events.
//!
//! - GET /api/v1/tree/events
//!   One SSE message per `ViewEvent`; the SSE event name is the variant
//!   name and the data is the JSON-encoded event.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::{stream, Stream};
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::warn;

use crate::browser::{RepoBrowser, ViewEvent};

pub fn routes(browser: RepoBrowser) -> Router {
    Router::new()
        .route("/api/v1/tree/events", get(stream_events))
        .with_state(browser)
}

async fn stream_events(
    State(browser): State<RepoBrowser>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    Sse::new(event_stream(browser.subscribe())).keep_alive(KeepAlive::default())
}

/// Ends when the notifier is dropped. Lagging subscribers skip the missed
/// events and keep streaming.
fn event_stream(rx: Receiver<ViewEvent>) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => return Some((to_sse(&event), rx)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

fn to_sse(event: &ViewEvent) -> Result<Event, axum::Error> {
    Event::default().event(event.name()).json_data(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::ChangeNotifier;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_stream_yields_events_in_order() {
        let notifier = ChangeNotifier::new(8);
        let events = event_stream(notifier.subscribe());

        notifier.notify(ViewEvent::TreeRebuilt { generation: 3 });
        notifier.notify(ViewEvent::NodeUpdated { generation: 3, path: "a.txt".into() });
        drop(notifier);

        let collected: Vec<_> = events.collect().await;
        assert_eq!(collected.len(), 2);
        assert!(collected.iter().all(|e| e.is_ok()));
    }

    #[tokio::test]
    async fn test_lagged_subscriber_keeps_streaming() {
        let notifier = ChangeNotifier::new(2);
        let events = event_stream(notifier.subscribe());

        for generation in 1..=5 {
            notifier.notify(ViewEvent::TreeRebuilt { generation });
        }
        drop(notifier);

        let collected: Vec<_> = events.collect().await;
        assert_eq!(collected.len(), 2);
    }
}
