//! Browser clock driving a [`PollLoop`]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::task::LocalSpawn;
use gloo_timers::callback::Interval;

use crate::sync::{Backend, CancelToken, PollLoop};

/// Fires at the loop's cadence and feeds it measured wall time, so a
/// throttled tab catches up (bounded) instead of drifting
pub struct PollTimer {
    interval: Option<Interval>,
    cancel: CancelToken,
}

impl PollTimer {
    pub fn start<B, S>(poll: Rc<RefCell<PollLoop<B, S>>>) -> Self
    where
        B: Backend + 'static,
        S: LocalSpawn + 'static,
    {
        let (period_ms, cancel) = {
            let p = poll.borrow();
            (p.cadence().period_ms(), p.cancel_token())
        };
        let last = Cell::new(js_sys::Date::now());
        let interval = Interval::new(period_ms.round().max(1.0) as u32, move || {
            let now = js_sys::Date::now();
            let dt = now - last.replace(now);
            poll.borrow_mut().advance(dt);
        });
        log::info!("Polling every {:.0}ms", period_ms);
        Self {
            interval: Some(interval),
            cancel,
        }
    }

    /// Stop the loop and the interval
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }

    /// Keep the interval alive for the lifetime of the page
    pub fn forget(mut self) {
        if let Some(interval) = self.interval.take() {
            interval.forget();
        }
    }
}
