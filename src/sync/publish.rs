//! Fire-and-forget publishing
//!
//! A commit paints the local view first, then sends the request without
//! waiting for it. A failed publish is logged and never rolled back; the view
//! stays in its optimistic state until a later snapshot overwrites it.

use std::cell::Cell;
use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};

use super::backend::{Backend, PublishRequest};
use crate::ring::{Rgb, SharedView};

#[derive(Debug, Default)]
pub struct PublishStats {
    issued: Cell<u64>,
    delivered: Cell<u64>,
    failed: Cell<u64>,
}

impl PublishStats {
    pub fn issued(&self) -> u64 {
        self.issued.get()
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.get()
    }

    pub fn failed(&self) -> u64 {
        self.failed.get()
    }
}

/// Local paint applied before a publish is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticPaint {
    pub index: usize,
    pub color: Rgb,
    /// Repaint every other slot with this colour
    pub clear_to: Option<Rgb>,
}

pub struct PublishChannel<B, S> {
    backend: Rc<B>,
    spawner: S,
    stats: Rc<PublishStats>,
}

impl<B, S> PublishChannel<B, S>
where
    B: Backend + 'static,
    S: LocalSpawn,
{
    pub fn new(backend: Rc<B>, spawner: S) -> Self {
        Self {
            backend,
            spawner,
            stats: Rc::new(PublishStats::default()),
        }
    }

    pub fn stats(&self) -> Rc<PublishStats> {
        Rc::clone(&self.stats)
    }

    /// Send `request` without waiting for the backend
    pub fn publish(&self, request: PublishRequest) -> bool {
        let backend = Rc::clone(&self.backend);
        let stats = Rc::clone(&self.stats);

        let task = async move {
            match backend.publish(request).await {
                Ok(()) => stats.delivered.set(stats.delivered.get() + 1),
                Err(e) => {
                    log::warn!("Publish {:?} failed: {}", request, e);
                    stats.failed.set(stats.failed.get() + 1);
                }
            }
        };

        match self.spawner.spawn_local(task) {
            Ok(()) => {
                self.stats.issued.set(self.stats.issued.get() + 1);
                true
            }
            Err(e) => {
                log::warn!("Could not spawn publish {:?}: {}", request, e);
                false
            }
        }
    }

    /// Paint the view, then publish
    pub fn commit(&self, view: &SharedView, paint: OptimisticPaint, request: PublishRequest) -> bool {
        {
            let mut view = view.borrow_mut();
            match paint.clear_to {
                Some(base) => view.paint_exclusive(paint.index, paint.color, base),
                None => view.paint(paint.index, paint.color),
            }
        }
        self.publish(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::ring::{ColorIdentity, MemoryRenderer, Ring, RingGeometry, RingView};
    use crate::sync::test_support::ScriptedBackend;
    use futures::executor::LocalPool;
    use glam::Vec2;

    fn view(count: usize) -> SharedView {
        let geometry = RingGeometry::new(count, Vec2::splat(50.0), 40.0, 4.0, None).unwrap();
        RingView::new(Ring::new(geometry, Rgb::WHITE), Box::new(MemoryRenderer::new())).shared()
    }

    #[test]
    fn test_commit_paints_before_request_resolves() {
        let backend = Rc::new(ScriptedBackend::default());
        let mut pool = LocalPool::new();
        let channel = PublishChannel::new(Rc::clone(&backend), pool.spawner());
        let view = view(4);
        let red = ColorIdentity::Red.rgb();

        let request = PublishRequest::PlayerPos {
            index: 2,
            color: ColorIdentity::Red,
        };
        let paint = OptimisticPaint {
            index: 2,
            color: red,
            clear_to: None,
        };
        assert!(channel.commit(&view, paint, request));

        // Nothing has run on the executor yet
        assert_eq!(view.borrow().ring().color(2), Some(red));
        assert!(backend.published().is_empty());

        pool.run_until_stalled();
        assert_eq!(backend.published(), vec![request]);
        assert_eq!(channel.stats().delivered(), 1);
    }

    #[test]
    fn test_failed_publish_is_not_rolled_back() {
        let backend = Rc::new(ScriptedBackend::default());
        backend.fail_publish(TransportError::Status(500));
        let mut pool = LocalPool::new();
        let channel = PublishChannel::new(Rc::clone(&backend), pool.spawner());
        let view = view(4);
        let pink = Rgb::new(0xff, 0x88, 0x88);

        channel.commit(
            &view,
            OptimisticPaint {
                index: 1,
                color: pink,
                clear_to: Some(Rgb::WHITE),
            },
            PublishRequest::TouchLed { index: 1 },
        );
        pool.run_until_stalled();

        assert_eq!(channel.stats().failed(), 1);
        assert_eq!(view.borrow().ring().color(1), Some(pink));
    }

    #[test]
    fn test_exclusive_paint_clears_previous_highlight() {
        let backend = Rc::new(ScriptedBackend::default());
        let pool = LocalPool::new();
        let channel = PublishChannel::new(Rc::clone(&backend), pool.spawner());
        let view = view(3);
        let hl = Rgb::new(1, 1, 1);
        for index in [0, 2] {
            channel.commit(
                &view,
                OptimisticPaint {
                    index,
                    color: hl,
                    clear_to: Some(Rgb::WHITE),
                },
                PublishRequest::TouchLed { index },
            );
        }
        assert_eq!(
            view.borrow().ring().colors(),
            vec![Rgb::WHITE, Rgb::WHITE, hl]
        );
        assert_eq!(channel.stats().issued(), 2);
    }
}
