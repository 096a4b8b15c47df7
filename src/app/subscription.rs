// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native window drag-and-drop events are routed to the upload box; a
//! periodic tick drives the spinner and notification auto-dismiss.

use super::Message;
use crate::config::TICK_INTERVAL_MS;
use crate::ui::components::upload_box;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Maps window file events to upload box messages.
fn route_window_event(event: &window::Event) -> Option<upload_box::Message> {
    match event {
        window::Event::FileHovered(_) => Some(upload_box::Message::FileHovered),
        window::Event::FilesHoveredLeft => Some(upload_box::Message::FilesHoveredLeft),
        window::Event::FileDropped(path) => Some(upload_box::Message::FileDropped(path.clone())),
        _ => None,
    }
}

/// Creates the drag-and-drop subscription.
///
/// Drops are forwarded even while an analysis runs; the upload box decides
/// to ignore them so that its highlight still resets.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match &event {
        event::Event::Window(window_event) => route_window_event(window_event).map(Message::Upload),
        _ => None,
    })
}

/// Creates a periodic tick subscription for the spinner and notification
/// auto-dismiss.
pub fn create_tick_subscription(is_loading: bool, has_notifications: bool) -> Subscription<Message> {
    if is_loading || has_notifications {
        time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_events_are_routed_to_the_upload_box() {
        let path = PathBuf::from("/photos/face.png");

        assert!(matches!(
            route_window_event(&window::Event::FileHovered(path.clone())),
            Some(upload_box::Message::FileHovered)
        ));
        assert!(matches!(
            route_window_event(&window::Event::FilesHoveredLeft),
            Some(upload_box::Message::FilesHoveredLeft)
        ));
        match route_window_event(&window::Event::FileDropped(path.clone())) {
            Some(upload_box::Message::FileDropped(dropped)) => assert_eq!(dropped, path),
            other => panic!("expected FileDropped, got {other:?}"),
        }
    }

    #[test]
    fn other_window_events_are_ignored() {
        assert!(route_window_event(&window::Event::Focused).is_none());
        assert!(route_window_event(&window::Event::CloseRequested).is_none());
    }
}
