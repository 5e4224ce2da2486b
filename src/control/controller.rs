//! Controller role: pointer events in, previews and publishes out

use std::rc::Rc;

use futures::task::LocalSpawn;
use glam::Vec2;

use super::identity::PlayerIdentity;
use super::interaction::{InteractionZone, PointerState, Zone};
use crate::error::ConfigError;
use crate::ring::{ColorIdentity, Rgb, SharedView};
use crate::settings::RingSettings;
use crate::sync::{Backend, OptimisticPaint, PublishChannel, PublishRequest, PublishStats};

/// Pointer input, in container-relative pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Mouse move or touch move
    Move(Vec2),
    /// Click, tap or touch end
    Commit(Vec2),
    /// Pointer left the container
    Leave,
}

/// What a pointer event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Preview(usize),
    Committed(PublishRequest),
    Avatar(PublishRequest),
}

pub struct Controller<B, S> {
    zone: InteractionZone,
    channel: PublishChannel<B, S>,
    view: SharedView,
    identity: Option<PlayerIdentity>,
    highlight: Rgb,
    base: Rgb,
    exclusive: bool,
}

impl<B, S> Controller<B, S>
where
    B: Backend + 'static,
    S: LocalSpawn,
{
    /// Build a controller over `view`. Two-actor settings need an `identity`
    /// and fail with [`ConfigError::MissingIdentity`] without one.
    pub fn new(
        settings: &RingSettings,
        view: SharedView,
        backend: Rc<B>,
        spawner: S,
        identity: Option<PlayerIdentity>,
    ) -> Result<Self, ConfigError> {
        let geometry = view.borrow().ring().geometry().clone();
        let identity = if settings.has_second_actor() {
            if geometry.dead_zone().is_none() {
                return Err(ConfigError::AvatarWithoutDeadZone);
            }
            Some(identity.ok_or(ConfigError::MissingIdentity)?)
        } else {
            None
        };

        if let (Some(me), Some(r0)) = (identity, geometry.dead_zone()) {
            view.borrow_mut().place_avatar(r0, me.avatar_color());
        }

        Ok(Self {
            zone: InteractionZone::new(geometry, identity.is_some()),
            channel: PublishChannel::new(backend, spawner),
            view,
            identity,
            highlight: settings.highlight,
            base: settings.base_color,
            exclusive: settings.exclusive_highlight,
        })
    }

    pub fn identity(&self) -> Option<PlayerIdentity> {
        self.identity
    }

    /// Give the local player a new colour and repaint the avatar
    pub fn reassign(&mut self, color: ColorIdentity) {
        let Some(me) = self.identity.as_mut() else {
            return;
        };
        me.reassign(color);
        let avatar_color = me.avatar_color();
        if let Some(r0) = self.zone.geometry().dead_zone() {
            self.view.borrow_mut().place_avatar(r0, avatar_color);
        }
    }

    pub fn pointer_state(&self) -> PointerState {
        self.zone.state()
    }

    pub fn publish_stats(&self) -> Rc<PublishStats> {
        self.channel.stats()
    }

    pub fn handle(&mut self, event: PointerEvent) -> Outcome {
        match event {
            PointerEvent::Move(point) => self.hover(point),
            PointerEvent::Commit(point) => self.commit(point),
            PointerEvent::Leave => {
                self.zone.leave();
                self.view.borrow_mut().set_preview(None);
                Outcome::Ignored
            }
        }
    }

    fn hover(&mut self, point: Vec2) -> Outcome {
        let Some(index) = self.zone.hover(point).and_then(|s| s.index) else {
            return Outcome::Ignored;
        };
        log::debug!("Hover slot {}", index);
        self.view.borrow_mut().set_preview(Some(index));
        Outcome::Preview(index)
    }

    fn commit(&mut self, point: Vec2) -> Outcome {
        match self.zone.zone_at(point) {
            Zone::Ring(_) => {}
            Zone::Avatar => return self.activate_avatar(),
            Zone::Excluded => return Outcome::Ignored,
        }
        let Some(index) = self.zone.commit(point).and_then(|s| s.index) else {
            return Outcome::Ignored;
        };

        let (color, request) = match self.identity {
            Some(me) => (me.slot_color(), me.position_request(index)),
            None => (self.highlight, PublishRequest::TouchLed { index }),
        };
        let paint = OptimisticPaint {
            index,
            color,
            clear_to: self.exclusive.then_some(self.base),
        };

        self.view.borrow_mut().set_preview(None);
        self.channel.commit(&self.view, paint, request);
        Outcome::Committed(request)
    }

    fn activate_avatar(&mut self) -> Outcome {
        match self.identity {
            Some(me) => {
                let request = me.avatar_request();
                self.channel.publish(request);
                Outcome::Avatar(request)
            }
            None => Outcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::{MemoryRenderer, Ring, RingView};
    use crate::settings::Size;
    use crate::sync::test_support::ScriptedBackend;
    use futures::executor::{LocalPool, LocalSpawner};

    struct Rig {
        controller: Controller<ScriptedBackend, LocalSpawner>,
        backend: Rc<ScriptedBackend>,
        view: SharedView,
        renderer: MemoryRenderer,
        pool: LocalPool,
    }

    fn rig(settings: RingSettings, identity: Option<ColorIdentity>) -> Rig {
        let geometry = settings.geometry().unwrap();
        let renderer = MemoryRenderer::new();
        let view = RingView::new(
            Ring::new(geometry, settings.base_color),
            Box::new(renderer.clone()),
        )
        .shared();
        let backend = Rc::new(ScriptedBackend::default());
        let pool = LocalPool::new();
        let controller = Controller::new(
            &settings,
            Rc::clone(&view),
            Rc::clone(&backend),
            pool.spawner(),
            identity.map(PlayerIdentity::new),
        )
        .unwrap();
        Rig {
            controller,
            backend,
            view,
            renderer,
            pool,
        }
    }

    fn eight_slots() -> RingSettings {
        RingSettings {
            count: 8,
            radius: Some(150.0),
            ..RingSettings::default()
        }
    }

    #[test]
    fn test_commit_scenario_eight_slots() {
        let settings = RingSettings {
            dead_zone: Some(Size::percent(50.0)),
            second_actor: true,
            ..eight_slots()
        };
        let mut rig = rig(settings, Some(ColorIdentity::Red));
        let p3 = rig.view.borrow().ring().geometry().point(3);

        let outcome = rig.controller.handle(PointerEvent::Commit(p3));
        let expected = PublishRequest::PlayerPos {
            index: 3,
            color: ColorIdentity::Red,
        };
        assert_eq!(outcome, Outcome::Committed(expected));

        // Painted before the publish task has run
        assert_eq!(
            rig.view.borrow().ring().color(3),
            Some(ColorIdentity::Red.rgb())
        );
        assert!(rig.backend.published().is_empty());

        rig.pool.run_until_stalled();
        let sent = rig.backend.published();
        assert_eq!(sent, vec![expected]);
        assert!(sent[0].form_body().contains("i=3"));
    }

    #[test]
    fn test_hover_previews_without_publishing() {
        let mut rig = rig(eight_slots(), None);
        let p6 = rig.view.borrow().ring().geometry().point(6);

        assert_eq!(rig.controller.handle(PointerEvent::Move(p6)), Outcome::Preview(6));
        assert_eq!(rig.renderer.frame().preview, Some(6));
        assert_eq!(rig.controller.pointer_state(), PointerState::Hover(6));

        rig.pool.run_until_stalled();
        assert!(rig.backend.published().is_empty());
        assert_eq!(rig.controller.publish_stats().issued(), 0);

        rig.controller.handle(PointerEvent::Leave);
        assert_eq!(rig.renderer.frame().preview, None);
        assert_eq!(rig.controller.pointer_state(), PointerState::Idle);
    }

    #[test]
    fn test_single_actor_touch_publishes_index_only() {
        let mut rig = rig(eight_slots(), Some(ColorIdentity::Blue));
        let p1 = rig.view.borrow().ring().geometry().point(1);
        let p4 = rig.view.borrow().ring().geometry().point(4);

        rig.controller.handle(PointerEvent::Commit(p1));
        rig.controller.handle(PointerEvent::Commit(p4));
        rig.pool.run_until_stalled();

        // Identity is ignored without the second-actor flag
        assert_eq!(rig.controller.identity(), None);
        let sent = rig.backend.published();
        assert_eq!(sent.len(), 2);
        assert!(sent.contains(&PublishRequest::TouchLed { index: 1 }));
        assert!(sent.contains(&PublishRequest::TouchLed { index: 4 }));
        let highlight = RingSettings::default().highlight;
        assert_eq!(rig.view.borrow().ring().color(4), Some(highlight));
        assert_eq!(rig.view.borrow().ring().color(1), Some(Rgb::WHITE));
        assert_eq!(rig.renderer.hex().len(), 8 * 6);
    }

    #[test]
    fn test_avatar_at_center_publishes_click() {
        let settings = RingSettings {
            dead_zone: Some(Size::percent(50.0)),
            second_actor: true,
            ..eight_slots()
        };
        let mut rig = rig(settings, Some(ColorIdentity::Green));
        let center = rig.view.borrow().ring().geometry().center();
        let before = rig.view.borrow().ring().colors();

        let outcome = rig.controller.handle(PointerEvent::Commit(center));
        assert_eq!(
            outcome,
            Outcome::Avatar(PublishRequest::PlayerClick {
                color: ColorIdentity::Green
            })
        );
        assert_eq!(rig.view.borrow().ring().colors(), before);
        assert_eq!(rig.controller.pointer_state(), PointerState::Idle);

        // Moving over the avatar is not a ring hover
        assert_eq!(rig.controller.handle(PointerEvent::Move(center)), Outcome::Ignored);

        rig.pool.run_until_stalled();
        assert_eq!(rig.backend.published()[0].form_body(), "c=Green");

        let (avatar_center, radius, color) = rig.renderer.frame().avatar.unwrap();
        assert_eq!(avatar_center, center);
        assert_eq!(radius, 75.0);
        assert_eq!(color, ColorIdentity::Green.pastel());

        rig.controller.reassign(ColorIdentity::Cyan);
        rig.controller.handle(PointerEvent::Commit(center));
        rig.pool.run_until_stalled();
        assert_eq!(rig.backend.published()[1].form_body(), "c=Cyan");
        let (_, _, color) = rig.renderer.frame().avatar.unwrap();
        assert_eq!(color, ColorIdentity::Cyan.pastel());
    }

    #[test]
    fn test_dead_zone_without_avatar_is_ignored() {
        let settings = RingSettings {
            dead_zone: Some(Size::px(60.0)),
            ..eight_slots()
        };
        let mut rig = rig(settings, None);
        let center = rig.view.borrow().ring().geometry().center();
        assert_eq!(rig.controller.handle(PointerEvent::Commit(center)), Outcome::Ignored);
        rig.pool.run_until_stalled();
        assert!(rig.backend.published().is_empty());
    }

    #[test]
    fn test_two_actor_needs_dead_zone() {
        let settings = RingSettings {
            second_actor: true,
            ..eight_slots()
        };
        let geometry = RingSettings {
            second_actor: false,
            ..settings.clone()
        }
        .geometry()
        .unwrap();
        let view =
            RingView::new(Ring::new(geometry, Rgb::WHITE), Box::new(MemoryRenderer::new()))
                .shared();
        let pool = LocalPool::new();
        let result = Controller::new(
            &settings,
            view,
            Rc::new(ScriptedBackend::default()),
            pool.spawner(),
            Some(PlayerIdentity::new(ColorIdentity::Red)),
        );
        assert!(matches!(result, Err(ConfigError::AvatarWithoutDeadZone)));
    }

    #[test]
    fn test_two_actor_needs_identity() {
        let settings = RingSettings {
            dead_zone: Some(Size::percent(50.0)),
            second_actor: true,
            ..eight_slots()
        };
        let view = RingView::new(
            Ring::new(settings.geometry().unwrap(), Rgb::WHITE),
            Box::new(MemoryRenderer::new()),
        )
        .shared();
        let pool = LocalPool::new();
        let result = Controller::new(
            &settings,
            view,
            Rc::new(ScriptedBackend::default()),
            pool.spawner(),
            None,
        );
        assert!(matches!(result, Err(ConfigError::MissingIdentity)));
    }
}
