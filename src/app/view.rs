// SPDX-License-Identifier: GPL-3.0-only

//! View rendering
//!
//! Turns the controller state into a surface-independent [`View`]: a title,
//! body lines, the actions available on the screen and a status line. Any
//! display surface (terminal, CLI) renders this and maps keys back to the
//! action messages.

use crate::app::state::{AppModel, CameraGate, LocationRequest, Message, Screen};
use crate::constants::text;

/// An action the user can trigger on the current screen
#[derive(Debug, Clone)]
pub struct ViewAction {
    pub key: char,
    pub label: &'static str,
    pub message: Message,
}

impl ViewAction {
    fn new(key: char, label: &'static str, message: Message) -> Self {
        Self {
            key,
            label,
            message,
        }
    }
}

/// Rendered state of one screen
#[derive(Debug, Clone)]
pub struct View {
    pub screen: Screen,
    pub title: String,
    pub body: Vec<String>,
    pub actions: Vec<ViewAction>,
    pub status: Option<String>,
}

impl View {
    /// Message bound to `key` on this screen
    pub fn action_for_key(&self, key: char) -> Option<&ViewAction> {
        self.actions
            .iter()
            .find(|action| action.key.eq_ignore_ascii_case(&key))
    }
}

fn back() -> ViewAction {
    ViewAction::new('b', text::BACK, Message::Navigate(Screen::Home))
}

impl AppModel {
    /// Render the current screen
    pub fn view(&self) -> View {
        match self.screen {
            Screen::Home => self.home_view(),
            Screen::Camera => self.camera_view(),
            Screen::Location => self.location_view(),
        }
    }

    fn home_view(&self) -> View {
        let status = if self.camera_gate == CameraGate::Pending {
            Some(text::REQUESTING_CAMERA_PERMISSION)
        } else {
            match self.location_request {
                LocationRequest::Idle => None,
                LocationRequest::AwaitingPermission => Some(text::WAITING_FOR_LOCATION_PERMISSION),
                LocationRequest::Fetching => Some(text::ACQUIRING_POSITION),
            }
        };

        View {
            screen: Screen::Home,
            title: text::HOME_TITLE.to_string(),
            body: Vec::new(),
            actions: vec![
                ViewAction::new('c', text::ACCESS_CAMERA, Message::AccessCamera),
                ViewAction::new('l', text::ACCESS_LOCATION, Message::AccessLocation),
            ],
            status: status.map(str::to_string),
        }
    }

    fn camera_view(&self) -> View {
        let mut view = View {
            screen: Screen::Camera,
            title: text::CAMERA_TITLE.to_string(),
            body: Vec::new(),
            actions: Vec::new(),
            status: None,
        };

        match self.camera_gate {
            CameraGate::Unrequested => {
                view.body.push(text::CAMERA_PERMISSION_NOT_REQUESTED.to_string());
                view.actions.push(ViewAction::new('c', text::ACCESS_CAMERA, Message::AccessCamera));
            }
            CameraGate::Pending => {
                view.body.push(text::REQUESTING_CAMERA_PERMISSION.to_string());
            }
            CameraGate::Blocked => {
                view.body.push(text::NO_CAMERA_ACCESS.to_string());
            }
            CameraGate::Ready => {
                match &self.camera {
                    Some(handle) => view.body.push(format!("Preview: {}", handle.device_name())),
                    None if self.camera_opening => view.body.push(text::OPENING_CAMERA.to_string()),
                    None => {}
                }
                if let Some(photo) = &self.photo {
                    view.body.push(format!("Last photo: {}", photo.uri));
                }
                if self.capturing {
                    view.status = Some(text::CAPTURING.to_string());
                }

                view.actions.push(ViewAction::new('p', text::TAKE_PHOTO, Message::TakePhoto));
                if self.photo.is_some() {
                    view.actions.push(ViewAction::new('o', text::OPEN_PHOTO, Message::OpenPhoto));
                }
            }
        }

        view.actions.push(back());
        view
    }

    fn location_view(&self) -> View {
        let body = match &self.location {
            Some(reading) => reading.to_display_string(),
            None => text::LOCATION_NOT_AVAILABLE.to_string(),
        };

        View {
            screen: Screen::Location,
            title: text::LOCATION_TITLE.to_string(),
            body: vec![body],
            actions: vec![back()],
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_keys_ignore_case() {
        let view = View {
            screen: Screen::Location,
            title: text::LOCATION_TITLE.to_string(),
            body: Vec::new(),
            actions: vec![back()],
            status: None,
        };

        assert!(view.action_for_key('B').is_some());
        assert!(matches!(
            view.action_for_key('b').map(|a| &a.message),
            Some(Message::Navigate(Screen::Home))
        ));
        assert!(view.action_for_key('x').is_none());
    }
}
