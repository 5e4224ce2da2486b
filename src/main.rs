//! LED Ring entry point
//!
//! On wasm the page path picks the role (viewer or controller) and the loop
//! runs against the HTTP backend. Natively a short demo drives a viewer and
//! two controllers against the simulated backend.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use led_ring::control::{Controller, PlayerIdentity};
    use led_ring::platform::{BrowserSpawner, DomRenderer, FetchBackend, PollTimer, input};
    use led_ring::ring::{Ring, RingView};
    use led_ring::sync::{Cadence, PollLoop};
    use led_ring::{RingSettings, Role};

    const CONTAINER_ID: &str = "circle-container";

    fn to_js(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let path = window.location().pathname()?;
        let role = Role::from_path(&path).unwrap_or_else(|e| {
            log::warn!("{}, running as viewer", e);
            Role::Viewer
        });
        log::info!("LED ring starting as {:?}", role);

        let container = document
            .get_element_by_id(CONTAINER_ID)
            .ok_or_else(|| to_js(format!("no #{CONTAINER_ID} element")))?;

        let settings = RingSettings::load()
            .for_role(role)
            .with_container(
                container.client_width() as f32,
                container.client_height() as f32,
            );

        let geometry = settings.geometry().map_err(to_js)?;
        let renderer = DomRenderer::new(document.clone(), container.clone(), geometry.slot_size());
        let view =
            RingView::new(Ring::new(geometry, settings.base_color), Box::new(renderer)).shared();
        let backend = Rc::new(FetchBackend::new(settings.endpoints.clone()));

        match role {
            Role::Viewer => {
                let cadence = Cadence::from_hz(settings.cadence_hz).map_err(to_js)?;
                let poll = PollLoop::new(backend, view, settings.codec(), cadence, BrowserSpawner);
                // First frame without waiting a full period
                poll.poll_once();
                PollTimer::start(Rc::new(RefCell::new(poll))).forget();
            }
            Role::Touch | Role::Player(_) => {
                let identity = match role {
                    Role::Player(color) => Some(PlayerIdentity::new(color)),
                    _ => None,
                };
                let controller =
                    Controller::new(&settings, view, backend, BrowserSpawner, identity)
                        .map_err(to_js)?;
                input::attach(&container, Rc::new(RefCell::new(controller)));
            }
        }

        log::info!("LED ring running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("LED ring (native) starting against the simulated backend...");

    if let Err(e) = demo::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::LocalPool;

    use led_ring::ConfigError;
    use led_ring::control::{Controller, PlayerIdentity, PointerEvent};
    use led_ring::ring::{ColorIdentity, MemoryRenderer, Ring, RingView, WireFormat};
    use led_ring::settings::{RingSettings, Size};
    use led_ring::sim::{SimulatedBackend, SimulatedRing};
    use led_ring::sync::{Cadence, PollLoop};

    const STEPS: usize = 60;
    const FRAME_MS: f64 = 50.0;

    pub fn run() -> Result<(), ConfigError> {
        let settings = RingSettings {
            count: 24,
            dead_zone: Some(Size::percent(40.0)),
            second_actor: true,
            ..RingSettings::default()
        };
        let touch_settings = RingSettings {
            dead_zone: None,
            second_actor: false,
            ..settings.clone()
        };
        let geometry = settings.geometry()?;

        let ring = Rc::new(RefCell::new(SimulatedRing::new(settings.count)));
        let backend = Rc::new(
            SimulatedBackend::new(Rc::clone(&ring)).with_format(WireFormat::JsonString),
        );
        let mut pool = LocalPool::new();

        let screen = MemoryRenderer::new();
        let viewer = RingView::new(
            Ring::new(geometry.clone(), settings.base_color),
            Box::new(screen.clone()),
        )
        .shared();
        let mut poll = PollLoop::new(
            Rc::clone(&backend),
            viewer,
            settings.codec(),
            Cadence::from_hz(settings.cadence_hz)?,
            pool.spawner(),
        );

        let player_view = RingView::new(
            Ring::new(geometry.clone(), settings.base_color),
            Box::new(MemoryRenderer::new()),
        )
        .shared();
        let mut player = Controller::new(
            &settings,
            player_view,
            Rc::clone(&backend),
            pool.spawner(),
            Some(PlayerIdentity::new(ColorIdentity::Red)),
        )?;

        let touch_view = RingView::new(
            Ring::new(touch_settings.geometry()?, settings.base_color),
            Box::new(MemoryRenderer::new()),
        )
        .shared();
        let mut touch = Controller::new(
            &touch_settings,
            touch_view,
            Rc::clone(&backend),
            pool.spawner(),
            None,
        )?;

        for step in 0..STEPS {
            if step % 8 == 0 {
                let index = (step * 5) % settings.count;
                touch.handle(PointerEvent::Commit(geometry.point(index)));
            }
            match step {
                2 => {
                    player.handle(PointerEvent::Commit(geometry.point(18)));
                }
                30 => {
                    player.handle(PointerEvent::Commit(geometry.center()));
                }
                40 => {
                    player.handle(PointerEvent::Commit(geometry.point(6)));
                }
                _ => {}
            }

            ring.borrow_mut().tick();
            poll.advance(FRAME_MS);
            pool.run_until_stalled();

            if step % 10 == 9 {
                log::info!("step {:>2}: {}", step + 1, screen.hex());
            }
        }
        poll.stop();

        let stats = poll.stats();
        log::info!(
            "Polls: {} issued, {} applied, {} transport failures, {} decode failures",
            stats.issued(),
            stats.applied(),
            stats.transport_failures(),
            stats.decode_failures()
        );
        log::info!(
            "Events published: {} ({} from the player)",
            backend.published().len(),
            player.publish_stats().delivered()
        );
        Ok(())
    }
}
