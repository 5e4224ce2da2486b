//! Backend boundary
//!
//! The backend owns the authoritative ring state. The engine only pulls full
//! snapshots and pushes single events; it never waits on a push.

use crate::error::TransportError;
use crate::ring::ColorIdentity;
use crate::settings::Endpoints;

/// An event pushed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishRequest {
    /// Single-actor controller touched a slot
    TouchLed { index: usize },
    /// A player moved to a slot
    PlayerPos { index: usize, color: ColorIdentity },
    /// A player activated their avatar
    PlayerClick { color: ColorIdentity },
}

impl PublishRequest {
    pub fn path<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        match self {
            PublishRequest::TouchLed { .. } => &endpoints.touch_led,
            PublishRequest::PlayerPos { .. } => &endpoints.player_pos,
            PublishRequest::PlayerClick { .. } => &endpoints.player_click,
        }
    }

    /// `application/x-www-form-urlencoded` body
    pub fn form_body(&self) -> String {
        match self {
            PublishRequest::TouchLed { index } => format!("i={index}"),
            PublishRequest::PlayerPos { index, color } => format!("i={index}&c={color}"),
            PublishRequest::PlayerClick { color } => format!("c={color}"),
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            PublishRequest::TouchLed { index } | PublishRequest::PlayerPos { index, .. } => {
                Some(*index)
            }
            PublishRequest::PlayerClick { .. } => None,
        }
    }
}

/// Content type of every request body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request/response access to the state owner
///
/// Futures are polled on a single-threaded executor and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Fetch the raw snapshot body
    async fn get_circle(&self) -> Result<String, TransportError>;

    /// Push one event; any response body is ignored
    async fn publish(&self, request: PublishRequest) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_bodies() {
        assert_eq!(PublishRequest::TouchLed { index: 3 }.form_body(), "i=3");
        assert_eq!(
            PublishRequest::PlayerPos {
                index: 17,
                color: ColorIdentity::Cyan
            }
            .form_body(),
            "i=17&c=Cyan"
        );
        assert_eq!(
            PublishRequest::PlayerClick {
                color: ColorIdentity::Red
            }
            .form_body(),
            "c=Red"
        );
    }

    #[test]
    fn test_paths_follow_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(
            PublishRequest::TouchLed { index: 0 }.path(&endpoints),
            "/api/touch_led"
        );
        assert_eq!(
            PublishRequest::PlayerClick {
                color: ColorIdentity::Blue
            }
            .path(&endpoints),
            "/api/player_click"
        );
    }

    #[test]
    fn test_click_carries_no_index() {
        let click = PublishRequest::PlayerClick {
            color: ColorIdentity::Green,
        };
        assert_eq!(click.index(), None);
        assert_eq!(PublishRequest::TouchLed { index: 9 }.index(), Some(9));
    }
}
