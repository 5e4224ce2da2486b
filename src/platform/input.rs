//! Pointer and touch listeners feeding a [`Controller`]

use std::cell::RefCell;
use std::rc::Rc;

use futures::task::LocalSpawn;
use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, Touch, TouchEvent};

use crate::control::{Controller, PointerEvent};
use crate::sync::Backend;

/// Client coordinates relative to the container's top-left corner
fn local_point(container: &Element, client_x: i32, client_y: i32) -> Vec2 {
    let rect = container.get_bounding_client_rect();
    Vec2::new(
        client_x as f32 - rect.left() as f32,
        client_y as f32 - rect.top() as f32,
    )
}

fn touch_point(container: &Element, touch: &Touch) -> Vec2 {
    local_point(container, touch.client_x(), touch.client_y())
}

/// Attach mouse and touch listeners to `container`. Closures live as long as the page.
pub fn attach<B, S>(container: &Element, controller: Rc<RefCell<Controller<B, S>>>)
where
    B: Backend + 'static,
    S: LocalSpawn + 'static,
{
    // Mouse move (hover)
    {
        let controller = controller.clone();
        let target = container.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let point = local_point(&target, event.client_x(), event.client_y());
            controller.borrow_mut().handle(PointerEvent::Move(point));
        });
        let _ = container
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Click (commit)
    {
        let controller = controller.clone();
        let target = container.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let point = local_point(&target, event.client_x(), event.client_y());
            let outcome = controller.borrow_mut().handle(PointerEvent::Commit(point));
            log::debug!("Click: {:?}", outcome);
        });
        let _ =
            container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Mouse leave
    {
        let controller = controller.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            controller.borrow_mut().handle(PointerEvent::Leave);
        });
        let _ = container
            .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch move (hover)
    {
        let controller = controller.clone();
        let target = container.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(touch) = event.touches().get(0) {
                let point = touch_point(&target, &touch);
                controller.borrow_mut().handle(PointerEvent::Move(point));
            }
        });
        let _ = container
            .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch end (commit); the lifted finger is only in changedTouches
    {
        let target = container.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            let mut controller = controller.borrow_mut();
            if let Some(touch) = event.changed_touches().get(0) {
                let point = touch_point(&target, &touch);
                controller.handle(PointerEvent::Commit(point));
            }
            controller.handle(PointerEvent::Leave);
        });
        let _ = container
            .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
