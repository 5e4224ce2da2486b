//! Authoritative ring state for the simulated backend
//!
//! Touches drop a colour from a slowly cycling colour wheel; every tick the
//! colours bleed into their neighbours and the whole ring rotates one slot.
//! Players walk one slot per tick toward their last published position.

use crate::ring::color::{ColorIdentity, Rgb};
use crate::ring::geometry::{circular_distance, wrap_index};

/// Ticks a jump lasts
pub const JUMP_HEIGHT: u32 = 20;
/// Extra ticks before a player can jump again
pub const JUMP_COOLDOWN: u32 = 80;
/// Slots lit on each side of a grounded player
pub const HALO: i64 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimPlayer {
    pub color: ColorIdentity,
    pub pos: usize,
    dest: usize,
    jump: u32,
    jump_recover: u32,
}

impl SimPlayer {
    fn new(color: ColorIdentity, pos: usize) -> Self {
        Self {
            color,
            pos,
            dest: pos,
            jump: 0,
            jump_recover: 0,
        }
    }

    pub fn dest(&self) -> usize {
        self.dest
    }

    pub fn is_jumping(&self) -> bool {
        self.jump > 0
    }

    fn jump(&mut self) -> bool {
        if self.jump_recover > 0 {
            return false;
        }
        self.jump = JUMP_HEIGHT;
        self.jump_recover = JUMP_HEIGHT + JUMP_COOLDOWN;
        true
    }

    fn tick(&mut self, count: usize) {
        let step = circular_distance(count, self.pos, self.dest).signum();
        self.pos = wrap_index(count, self.pos as i64 + step);
        self.jump = self.jump.saturating_sub(1);
        self.jump_recover = self.jump_recover.saturating_sub(1);
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedRing {
    leds: Vec<Rgb>,
    /// Position on the colour wheel for the next touch (0..192)
    hue: u8,
    players: Vec<SimPlayer>,
    ticks: u64,
}

impl SimulatedRing {
    pub fn new(count: usize) -> Self {
        Self {
            leds: vec![Rgb::WHITE; count],
            hue: 0,
            players: Vec::new(),
            ticks: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.leds.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn leds(&self) -> &[Rgb] {
        &self.leds
    }

    pub fn players(&self) -> &[SimPlayer] {
        &self.players
    }

    /// Paint a slot with the current wheel colour. Out of range is ignored.
    pub fn touch_led(&mut self, index: usize) -> bool {
        let color = Rgb::from_hue(self.hue);
        match self.leds.get_mut(index) {
            Some(led) => {
                *led = color;
                true
            }
            None => false,
        }
    }

    /// Set a player's destination, adding the player at `index` if new
    pub fn player_pos(&mut self, color: ColorIdentity, index: usize) {
        if index >= self.count() {
            return;
        }
        match self.players.iter_mut().find(|p| p.color == color) {
            Some(player) => player.dest = index,
            None => self.players.push(SimPlayer::new(color, index)),
        }
    }

    /// Returns true if the player started a jump
    pub fn player_click(&mut self, color: ColorIdentity) -> bool {
        self.players
            .iter_mut()
            .find(|p| p.color == color)
            .is_some_and(SimPlayer::jump)
    }

    pub fn tick(&mut self) {
        let count = self.count();
        if count == 0 {
            return;
        }

        let mut next: Vec<Rgb> = (0..count)
            .map(|i| {
                let prev = self.leds[wrap_index(count, i as i64 - 1)];
                let after = self.leds[wrap_index(count, i as i64 + 1)];
                prev.mean(&[after])
            })
            .collect();
        next.rotate_left(1);
        self.leds = next;

        for player in &mut self.players {
            player.tick(count);
        }
        self.hue = (self.hue + 2) % 192;
        self.ticks += 1;
    }

    /// LED colours with players drawn on top
    pub fn frame(&self) -> Vec<Rgb> {
        let count = self.count();
        let mut frame = self.leds.clone();
        for player in &self.players {
            let color = player.color.rgb();
            if !player.is_jumping() {
                for d in 1..=HALO {
                    let dim = color.brightness(0.5);
                    frame[wrap_index(count, player.pos as i64 + d)] = dim;
                    frame[wrap_index(count, player.pos as i64 - d)] = dim;
                }
            }
            frame[player.pos] = color;
        }
        frame
    }

    /// Snapshot string: six hex digits per slot
    pub fn get_circle(&self) -> String {
        self.frame().iter().map(Rgb::to_hex).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_uses_wheel_color() {
        let mut ring = SimulatedRing::new(10);
        assert!(ring.touch_led(3));
        assert_eq!(ring.leds()[3], Rgb::from_hue(0));
        assert!(!ring.touch_led(10));
    }

    #[test]
    fn test_tick_diffuses_and_rotates() {
        let mut ring = SimulatedRing::new(4);
        ring.leds = vec![Rgb::BLACK, Rgb::WHITE, Rgb::BLACK, Rgb::BLACK];
        ring.tick();
        // Before rotation slots 0 and 2 average in the white; rotation shifts left
        let grey = Rgb::new(127, 127, 127);
        assert_eq!(ring.leds(), &[Rgb::BLACK, grey, Rgb::BLACK, grey]);
        assert_eq!(ring.ticks(), 1);
    }

    #[test]
    fn test_player_walks_shortest_way() {
        let mut ring = SimulatedRing::new(20);
        ring.player_pos(ColorIdentity::Red, 1);
        ring.player_pos(ColorIdentity::Red, 18);
        ring.tick();
        assert_eq!(ring.players()[0].pos, 0);
        ring.tick();
        ring.tick();
        ring.tick();
        assert_eq!(ring.players()[0].pos, 18);
        assert_eq!(ring.players()[0].dest(), 18);
    }

    #[test]
    fn test_jump_cooldown() {
        let mut ring = SimulatedRing::new(20);
        assert!(!ring.player_click(ColorIdentity::Blue));
        ring.player_pos(ColorIdentity::Blue, 5);
        assert!(ring.player_click(ColorIdentity::Blue));
        assert!(!ring.player_click(ColorIdentity::Blue));
        for _ in 0..(JUMP_HEIGHT + JUMP_COOLDOWN) {
            ring.tick();
        }
        assert!(ring.player_click(ColorIdentity::Blue));
    }

    #[test]
    fn test_frame_draws_player_and_halo() {
        let mut ring = SimulatedRing::new(10);
        ring.player_pos(ColorIdentity::Green, 0);
        let frame = ring.frame();
        let green = ColorIdentity::Green.rgb();
        assert_eq!(frame[0], green);
        assert_eq!(frame[1], green.brightness(0.5));
        assert_eq!(frame[9], green.brightness(0.5));
        assert_eq!(frame[8], green.brightness(0.5));
        assert_eq!(frame[3], Rgb::WHITE);

        ring.player_click(ColorIdentity::Green);
        assert_eq!(ring.frame()[1], Rgb::WHITE);
    }

    #[test]
    fn test_get_circle_length() {
        let ring = SimulatedRing::new(7);
        assert_eq!(ring.get_circle(), "ffffff".repeat(7));
    }
}
