//! The local player's colour and avatar control

use crate::ring::{ColorIdentity, Rgb};
use crate::sync::PublishRequest;

/// Colour assigned to the local player in two-actor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerIdentity {
    color: ColorIdentity,
}

impl PlayerIdentity {
    pub fn new(color: ColorIdentity) -> Self {
        Self { color }
    }

    pub fn color(&self) -> ColorIdentity {
        self.color
    }

    /// Explicit re-assignment; normal interaction never changes the colour
    pub fn reassign(&mut self, color: ColorIdentity) {
        if color != self.color {
            log::info!("Player colour {} -> {}", self.color, color);
            self.color = color;
        }
    }

    /// Colour painted on the slot the player commits to
    pub fn slot_color(&self) -> Rgb {
        self.color.rgb()
    }

    /// Fill of the central avatar control
    pub fn avatar_color(&self) -> Rgb {
        self.color.pastel()
    }

    pub fn position_request(&self, index: usize) -> PublishRequest {
        PublishRequest::PlayerPos {
            index,
            color: self.color,
        }
    }

    /// Actor-level event: carries the colour only, never an index
    pub fn avatar_request(&self) -> PublishRequest {
        PublishRequest::PlayerClick { color: self.color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_carry_identity() {
        let mut me = PlayerIdentity::new(ColorIdentity::Yellow);
        assert_eq!(me.position_request(4).form_body(), "i=4&c=Yellow");
        assert_eq!(me.avatar_request().form_body(), "c=Yellow");

        me.reassign(ColorIdentity::Blue);
        assert_eq!(me.color(), ColorIdentity::Blue);
        assert_eq!(me.avatar_request().index(), None);
        assert_eq!(me.slot_color(), Rgb::new(0x44, 0x44, 0xff));
        assert_eq!(me.avatar_color(), Rgb::new(0x88, 0x88, 0xff));
    }
}
