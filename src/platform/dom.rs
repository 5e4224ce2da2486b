//! DOM rendering: one absolutely positioned div per slot

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::ring::{RenderTarget, Rgb, Slot};

const LED_CLASS: &str = "led";
const PREVIEW_CLASS: &str = "preview";
const AVATAR_ID: &str = "avatar";

pub struct DomRenderer {
    document: Document,
    container: Element,
    slot_size: f32,
    leds: Vec<HtmlElement>,
    preview: Option<usize>,
    avatar: Option<HtmlElement>,
}

impl DomRenderer {
    pub fn new(document: Document, container: Element, slot_size: f32) -> Self {
        Self {
            document,
            container,
            slot_size,
            leds: Vec::new(),
            preview: None,
            avatar: None,
        }
    }

    fn create_div(&self, class: &str) -> Result<HtmlElement, JsValue> {
        let div: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        div.set_class_name(class);
        self.container.append_child(&div)?;
        Ok(div)
    }

    fn led(&self, index: usize) -> Option<&HtmlElement> {
        self.leds.get(index)
    }
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("Failed to set {}: {:?}", property, e);
    }
}

fn px(value: f32) -> String {
    format!("{value}px")
}

impl RenderTarget for DomRenderer {
    fn place_slot(&mut self, slot: &Slot) {
        let div = match self.create_div(LED_CLASS) {
            Ok(div) => div,
            Err(e) => {
                log::error!("Failed to create slot {}: {:?}", slot.index, e);
                return;
            }
        };
        let size = px(self.slot_size);
        set_style(&div, "width", &size);
        set_style(&div, "height", &size);
        set_style(
            &div,
            "transform",
            &format!("translate({}px, {}px)", slot.position.x, slot.position.y),
        );
        set_style(&div, "background-color", &slot.color.to_css());
        self.leds.push(div);
    }

    fn paint_slot(&mut self, index: usize, color: Rgb) {
        if let Some(led) = self.led(index) {
            set_style(led, "background-color", &color.to_css());
        }
    }

    fn preview(&mut self, index: Option<usize>) {
        if let Some(led) = self.preview.and_then(|i| self.led(i)) {
            let _ = led.class_list().remove_1(PREVIEW_CLASS);
        }
        if let Some(led) = index.and_then(|i| self.led(i)) {
            let _ = led.class_list().add_1(PREVIEW_CLASS);
        }
        self.preview = index;
    }

    fn place_avatar(&mut self, center: Vec2, radius: f32, color: Rgb) {
        if self.avatar.is_none() {
            match self.create_div(AVATAR_ID) {
                Ok(div) => {
                    div.set_id(AVATAR_ID);
                    self.avatar = Some(div);
                }
                Err(e) => {
                    log::error!("Failed to create avatar: {:?}", e);
                    return;
                }
            }
        }
        let Some(avatar) = self.avatar.as_ref() else {
            return;
        };
        let diameter = px(radius * 2.0);
        set_style(avatar, "width", &diameter);
        set_style(avatar, "height", &diameter);
        set_style(avatar, "border-radius", "50%");
        set_style(
            avatar,
            "transform",
            &format!("translate({}px, {}px)", center.x - radius, center.y - radius),
        );
        set_style(avatar, "background-color", &color.to_css());
    }
}
