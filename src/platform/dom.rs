//! DOM binding: the page's fish, boat, line and hook elements

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use super::{RELAYOUT_EVENT, facing_classes, hook_offset, pose_transform, px, rod_style};
use crate::sim::{Frame, Rect, SceneProbe};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Elements the simulation reads from and writes to
pub struct DomScene {
    window: Window,
    fish: HtmlElement,
    /// Inner sprite carrying the facing class (optional in the markup)
    sprite: Option<HtmlElement>,
    boat: Option<Element>,
    line: Option<HtmlElement>,
    hook: Option<HtmlElement>,
    /// Arm + rod wrapped in a rotatable group (only when casting)
    rod_group: Option<Element>,
}

fn html_child(parent: &Element, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

impl DomScene {
    /// Find the scene elements; None when there is no fish to drive
    pub fn bind(casting: bool) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;

        let fish: HtmlElement = document.get_element_by_id("fish")?.dyn_into().ok()?;
        let sprite = html_child(&fish, ".sprite");
        let boat = document.query_selector(".boat").ok().flatten();
        let line = boat.as_ref().and_then(|b| html_child(b, ".line"));
        let hook = boat.as_ref().and_then(|b| html_child(b, ".hook"));

        if line.is_none() || hook.is_none() {
            log::warn!("Boat line/hook not found, hook animation disabled");
        }

        let mut scene = Self {
            window,
            fish,
            sprite,
            boat,
            line,
            hook,
            rod_group: None,
        };
        if casting {
            scene.ensure_rod_group(&document);
        }
        if let Some(sprite) = &scene.sprite {
            let _ = sprite.class_list().add_1("face-right");
        }
        Some(scene)
    }

    /// Casting flag changed at runtime
    pub fn set_casting(&mut self, casting: bool) {
        if casting && self.rod_group.is_none() {
            if let Some(document) = self.window.document() {
                self.ensure_rod_group(&document);
            }
        }
        if let Some(group) = &self.rod_group {
            let _ = group.set_attribute("style", &rod_style(0.0));
        }
    }

    /// Wrap the arm and rod paths in a group so they rotate together
    fn ensure_rod_group(&mut self, document: &Document) {
        let Some(boat) = &self.boat else {
            return;
        };
        let find = |selector: &str| boat.query_selector(selector).ok().flatten();
        let (Some(svg), Some(arm), Some(rod)) = (find("svg"), find("#arm"), find("#rod")) else {
            log::warn!("Boat SVG has no #arm/#rod, cast rotation disabled");
            return;
        };

        let Ok(group) = document.create_element_ns(Some(SVG_NS), "g") else {
            return;
        };
        let _ = group.set_attribute("id", "rodGroup");
        if group.append_child(&arm).is_err() || group.append_child(&rod).is_err() {
            log::warn!("Could not regroup rod paths");
            return;
        }
        let after_first = svg.first_child().and_then(|c| c.next_sibling());
        if svg.insert_before(&group, after_first.as_ref()).is_err() {
            log::warn!("Could not insert rod group");
            return;
        }
        let _ = group.set_attribute("style", &rod_style(0.0));
        self.rod_group = Some(group);
    }

    /// Apply a simulation frame to the page
    pub fn render(&self, frame: &Frame) {
        let style = self.fish.style();
        let _ = style.set_property("left", &px(frame.fish.pos.x));
        let _ = style.set_property("top", &px(frame.fish.pos.y));
        let _ = style.set_property("transform", pose_transform(frame.fish.pose));

        if let Some(sprite) = &self.sprite {
            let (add, remove) = facing_classes(frame.fish.facing);
            let classes = sprite.class_list();
            let _ = classes.remove_1(remove);
            let _ = classes.add_1(add);
        }

        if let (Some(view), Some(line), Some(hook)) = (frame.hook, &self.line, &self.hook) {
            let _ = line.style().set_property("height", &px(view.line_length));
            let offset = hook_offset(&view);
            let hook_style = hook.style();
            let _ = hook_style.set_property("left", &px(offset.x));
            let _ = hook_style.set_property("top", &px(offset.y));
        }

        if let (Some(degrees), Some(group)) = (frame.rod_rotation, &self.rod_group) {
            let _ = group.set_attribute("style", &rod_style(degrees));
        }
    }

    /// Ask the page to lay its scenery out again
    pub fn request_relayout(&self) {
        match web_sys::Event::new(RELAYOUT_EVENT) {
            Ok(event) => {
                let _ = self.window.dispatch_event(&event);
            }
            Err(_) => log::warn!("Could not create relayout event"),
        }
    }
}

impl SceneProbe for DomScene {
    fn viewport_size(&self) -> Vec2 {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Vec2::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }

    fn fish_height(&self) -> Option<f32> {
        let el: &Element = match &self.sprite {
            Some(sprite) => sprite.as_ref(),
            None => self.fish.as_ref(),
        };
        let height = el.get_bounding_client_rect().height() as f32;
        (height > 0.0).then_some(height)
    }

    fn boat_rect(&self) -> Option<Rect> {
        // Without a line and hook there is nothing to animate under the boat
        if self.line.is_none() || self.hook.is_none() {
            return None;
        }
        let r = self.boat.as_ref()?.get_bounding_client_rect();
        Some(Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        ))
    }
}
