// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native window events to the acquisition component and drives
//! the periodic ticks (spinner animation, toast expiry).

use super::{Message, Screen};
use crate::ui::acquisition;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Spinner frame interval.
const SPINNER_INTERVAL: Duration = Duration::from_millis(16);

/// Toast expiry and diagnostics drain interval.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Creates the event subscription for the current screen.
///
/// File drag-and-drop only applies while acquiring an image. Window close
/// requests are handled on every screen so diagnostics can be exported.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Acquisition => event::listen_with(|event, _status, window_id| match event {
            event::Event::Window(window::Event::CloseRequested) => {
                Some(Message::WindowCloseRequested(window_id))
            }
            event::Event::Window(window::Event::FileHovered(_)) => {
                Some(Message::Acquisition(acquisition::Message::FileHovered))
            }
            event::Event::Window(window::Event::FilesHoveredLeft) => {
                Some(Message::Acquisition(acquisition::Message::FilesHoveredLeft))
            }
            event::Event::Window(window::Event::FileDropped(path)) => {
                Some(Message::Acquisition(acquisition::Message::FileDropped(path)))
            }
            _ => None,
        }),
        Screen::Results => event::listen_with(|event, _status, window_id| {
            if let event::Event::Window(window::Event::CloseRequested) = event {
                return Some(Message::WindowCloseRequested(window_id));
            }
            None
        }),
    }
}

/// Periodic tick while toasts are on screen.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Animation frames while the acquisition component shows a spinner.
pub fn create_spinner_subscription(is_busy: bool) -> Subscription<Message> {
    if is_busy {
        time::every(SPINNER_INTERVAL)
            .map(|now| Message::Acquisition(acquisition::Message::SpinnerTick(now)))
    } else {
        Subscription::none()
    }
}
