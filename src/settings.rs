//! Deployment settings
//!
//! Ring size and layout are fixed per deployment. On the web they come from an
//! inline JSON block on the page or from LocalStorage; natively the defaults
//! are used.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::ring::{ColorIdentity, Rgb, RingGeometry, SnapshotCodec, WireFormat};

/// Unit for a configurable length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SizeUnit {
    #[default]
    Pixels,
    /// Percent of a reference length (see each field)
    Percent,
}

/// A length in pixels or percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub value: f32,
    pub unit: SizeUnit,
}

impl Size {
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: SizeUnit::Pixels,
        }
    }

    pub const fn percent(value: f32) -> Self {
        Self {
            value,
            unit: SizeUnit::Percent,
        }
    }

    /// Length in pixels, with percent taken of `reference`
    pub fn resolve(&self, reference: f32) -> f32 {
        match self.unit {
            SizeUnit::Pixels => self.value,
            SizeUnit::Percent => self.value / 100.0 * reference,
        }
    }
}

/// Gap kept between the ring and the container edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RadiusMargin {
    /// `spacing` pixels
    #[default]
    Spacing,
    /// Half the rendered slot size
    HalfSlot,
}

/// Backend location and endpoint paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Prefix for every path; empty means same origin
    pub base_url: String,
    pub get_circle: String,
    pub touch_led: String,
    pub player_pos: String,
    pub player_click: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            get_circle: "/api/get_circle".into(),
            touch_led: "/api/touch_led".into(),
            player_pos: "/api/player_pos".into(),
            player_click: "/api/player_click".into(),
        }
    }
}

impl Endpoints {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Full deployment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingSettings {
    /// Number of slots
    pub count: usize,

    // === Layout ===
    /// Container size (pixels)
    pub container_width: f32,
    pub container_height: f32,
    /// Ring center; defaults to the container center
    pub center: Option<Vec2>,
    /// Ring radius; defaults to half the container's smaller side minus the margin
    pub radius: Option<f32>,
    /// Slot diameter; percent is of the container's smaller side
    pub slot_size: Size,
    /// Pixels between the ring and the container edge
    pub spacing: f32,
    pub margin: RadiusMargin,
    /// Diameter of the central dead zone; percent is of the ring diameter.
    /// `None` disables the dead zone.
    pub dead_zone: Option<Size>,

    // === Sync ===
    /// Viewer polls per second
    pub cadence_hz: f32,
    pub wire_format: WireFormat,
    pub endpoints: Endpoints,

    // === Controller ===
    /// Publish player position and show the avatar control
    pub second_actor: bool,
    /// Colour of the committed slot in single-actor mode
    pub highlight: Rgb,
    /// Colour of every slot not lit by a snapshot or commit
    pub base_color: Rgb,
    /// A commit clears the previous local highlight
    pub exclusive_highlight: bool,
}

impl Default for RingSettings {
    fn default() -> Self {
        Self {
            count: LED_COUNT,
            container_width: 400.0,
            container_height: 400.0,
            center: None,
            radius: None,
            slot_size: Size::px(LED_SIZE),
            spacing: LED_SPACING,
            margin: RadiusMargin::Spacing,
            dead_zone: None,
            cadence_hz: UPDATE_FREQUENCY,
            wire_format: WireFormat::Auto,
            endpoints: Endpoints::default(),
            second_actor: false,
            highlight: Rgb::new(0xff, 0x88, 0x88),
            base_color: Rgb::WHITE,
            exclusive_highlight: true,
        }
    }
}

impl RingSettings {
    /// Defaults for a two-actor controller: avatar covers 40% of the ring
    pub fn two_actor() -> Self {
        Self {
            dead_zone: Some(Size::percent(40.0)),
            second_actor: true,
            ..Self::default()
        }
    }

    pub fn has_dead_zone(&self) -> bool {
        self.dead_zone.is_some()
    }

    pub fn has_second_actor(&self) -> bool {
        self.second_actor
    }

    /// Set the container size (layout is resolved when the geometry is built)
    pub fn with_container(mut self, width: f32, height: f32) -> Self {
        self.container_width = width;
        self.container_height = height;
        self
    }

    /// Milliseconds between polls
    pub fn cadence_ms(&self) -> f64 {
        1000.0 / self.cadence_hz as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.container_width, self.container_height);
        if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
            return Err(ConfigError::Container {
                width: w,
                height: h,
            });
        }
        if !self.cadence_hz.is_finite() || self.cadence_hz <= 0.0 {
            return Err(ConfigError::Cadence(self.cadence_hz));
        }
        if self.second_actor && self.dead_zone.is_none() {
            return Err(ConfigError::AvatarWithoutDeadZone);
        }
        Ok(())
    }

    /// Resolve the layout into pixel geometry
    pub fn geometry(&self) -> Result<RingGeometry, ConfigError> {
        self.validate()?;
        let short_side = self.container_width.min(self.container_height);
        let slot_size = self.slot_size.resolve(short_side);
        let center = self
            .center
            .unwrap_or(Vec2::new(self.container_width, self.container_height) / 2.0);
        let margin = match self.margin {
            RadiusMargin::Spacing => self.spacing,
            RadiusMargin::HalfSlot => slot_size / 2.0,
        };
        let radius = self.radius.unwrap_or(short_side / 2.0 - margin);
        let dead_zone = self.dead_zone.map(|d| d.resolve(radius * 2.0) / 2.0);
        RingGeometry::new(self.count, center, radius, slot_size, dead_zone)
    }

    pub fn codec(&self) -> SnapshotCodec {
        SnapshotCodec::new(self.count, self.wire_format)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "led_ring_settings";

    /// Id of the inline `<script type="application/json">` config block
    #[allow(dead_code)]
    const PAGE_CONFIG_ID: &'static str = "ring-config";

    /// Pick settings from the page block, then the stored copy, then defaults.
    /// Malformed JSON in either source is skipped.
    pub fn resolve(page: Option<&str>, stored: Option<&str>) -> (Self, SettingsSource) {
        if let Some(json) = page {
            match Self::from_json(json) {
                Ok(settings) => return (settings, SettingsSource::Page),
                Err(e) => log::warn!("Ignoring malformed page settings: {}", e),
            }
        }
        if let Some(json) = stored {
            match Self::from_json(json) {
                Ok(settings) => return (settings, SettingsSource::Storage),
                Err(e) => log::warn!("Ignoring malformed stored settings: {}", e),
            }
        }
        (Self::default(), SettingsSource::Default)
    }

    /// Load settings for this page. Settings found on the page are stored so
    /// routes without a config block pick them up.
    pub fn load() -> Self {
        let page = Self::page_config();
        let stored = Self::stored_config();
        let (settings, source) = Self::resolve(page.as_deref(), stored.as_deref());
        log::info!("Using {:?} settings", source);
        if source == SettingsSource::Page {
            settings.save();
        }
        settings
    }

    /// Adjust loaded settings to what `role` can use
    pub fn for_role(mut self, role: Role) -> Self {
        match role {
            // A viewer never shows the avatar
            Role::Viewer | Role::Touch => self.second_actor = false,
            Role::Player(_) => {
                self.second_actor = true;
                if self.dead_zone.is_none() {
                    self.dead_zone = Self::two_actor().dead_zone;
                }
            }
        }
        self
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    #[cfg(target_arch = "wasm32")]
    fn page_config() -> Option<String> {
        web_sys::window()?
            .document()?
            .get_element_by_id(Self::PAGE_CONFIG_ID)?
            .text_content()
    }

    #[cfg(target_arch = "wasm32")]
    fn stored_config() -> Option<String> {
        Self::storage()?.get_item(Self::STORAGE_KEY).ok()?
    }

    /// Write to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            log::warn!("No LocalStorage, settings not saved");
            return;
        };
        let result = serde_json::to_string(self)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                storage
                    .set_item(Self::STORAGE_KEY, &json)
                    .map_err(|e| format!("{e:?}"))
            });
        match result {
            Ok(()) => log::debug!("Settings stored under {}", Self::STORAGE_KEY),
            Err(e) => log::warn!("Failed to store settings: {}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn page_config() -> Option<String> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn stored_config() -> Option<String> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("No storage natively, {} not written", Self::STORAGE_KEY);
    }
}

/// Where [`RingSettings::resolve`] found the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    Page,
    Storage,
    Default,
}

/// Which client a page runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Polls and renders the ring
    Viewer,
    /// Publishes touched slot indices
    Touch,
    /// Publishes a player's position and avatar clicks
    Player(ColorIdentity),
}

impl Role {
    /// Role for a page path: `/display`, `/touch` or `/play/<Color>`
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let trimmed = path.trim_end_matches('/');
        let mut parts = trimmed.split('/').filter(|p| !p.is_empty());
        let role = match (parts.next(), parts.next(), parts.next()) {
            (Some("display"), None, None) => Some(Role::Viewer),
            (Some("touch"), None, None) => Some(Role::Touch),
            (Some("play"), Some(color), None) => color.parse().ok().map(Role::Player),
            _ => None,
        };
        role.ok_or_else(|| ConfigError::Route(path.to_string()))
    }

    pub fn is_controller(&self) -> bool {
        !matches!(self, Role::Viewer)
    }
}
