//! Browser binding: canvas 2D surface, `requestAnimationFrame` scheduling and
//! the exported `mount_backdrop` entry point

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::backdrop::Backdrop;
use crate::color::Color;
use crate::config::{self, PRESETS, SurfaceConfig, Variant};
use crate::driver::{CancelToken, FrameScheduler};
use crate::renderer::DrawSurface;
use crate::sim::Viewport;

type WebBackdrop = Backdrop<CanvasSurface, i32>;
type Slot = Rc<RefCell<Option<WebBackdrop>>>;

/// `<canvas>` element with its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawSurface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.ctx
            .clear_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, point: Vec2) {
        self.ctx.move_to(point.x as f64, point.y as f64);
    }

    fn line_to(&mut self, point: Vec2) {
        self.ctx.line_to(point.x as f64, point.y as f64);
    }

    fn quadratic_curve_to(&mut self, control: Vec2, end: Vec2) {
        self.ctx
            .quadratic_curve_to(control.x as f64, control.y as f64, end.x as f64, end.y as f64);
    }

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        // Only fails for a negative radius
        if let Err(err) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            start as f64,
            end as f64,
        ) {
            log::warn!("arc rejected: {err:?}");
        }
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke(&mut self, color: Color, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f32, color: Color) {
        self.ctx.set_font(&format!("{font_px}px serif"));
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }

    fn set_shadow(&mut self, color: Color, blur: f32) {
        self.ctx.set_shadow_color(&color.to_css());
        self.ctx.set_shadow_blur(blur as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = self.ctx.rotate(radians as f64);
    }
}

/// `requestAnimationFrame` with one reusable callback per mount
#[derive(Clone)]
pub struct AnimationFrameScheduler {
    window: Window,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    fn install(&self, callback: Closure<dyn FnMut(f64)>) {
        *self.callback.borrow_mut() = Some(callback);
    }

    /// Drop the callback; pending frames can no longer reach the backdrop
    fn release(&self) {
        self.callback.borrow_mut().take();
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_tick(&mut self, token: &CancelToken) -> Option<i32> {
        if token.is_cancelled() {
            return None;
        }
        let callback = self.callback.borrow();
        let closure = callback.as_ref()?;
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {err:?}");
                None
            }
        }
    }

    fn cancel_tick(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {err:?}");
        }
    }
}

fn window_viewport(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(0, |v| v.max(0.0) as u32)
    };
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

/// A mounted backdrop, owned by JavaScript
#[wasm_bindgen]
pub struct BackdropHandle {
    slot: Slot,
    variant: Variant,
    scheduler: AnimationFrameScheduler,
    on_resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Stop the animation and detach from the page. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.teardown();
    }

    pub fn variant(&self) -> String {
        self.variant.as_str().to_string()
    }

    pub fn entity_count(&self) -> usize {
        self.slot
            .borrow()
            .as_ref()
            .map_or(0, |b| b.state().entity_count())
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().as_ref().is_some_and(|b| b.is_running())
    }
}

impl BackdropHandle {
    fn teardown(&mut self) {
        if let Some(listener) = self.on_resize.take() {
            let _ = self
                .scheduler
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }

        let backdrop = self.slot.borrow_mut().take();
        if let Some(mut backdrop) = backdrop {
            backdrop.unmount(&mut self.scheduler);
        }
        self.scheduler.release();
    }
}

impl Drop for BackdropHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn tick_callback(
    slot: Weak<RefCell<Option<WebBackdrop>>>,
    mut scheduler: AnimationFrameScheduler,
) -> Closure<dyn FnMut(f64)> {
    Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
        let Some(cell) = slot.upgrade() else {
            return;
        };
        let Ok(mut guard) = cell.try_borrow_mut() else {
            return;
        };
        if let Some(backdrop) = guard.as_mut() {
            backdrop.on_tick(&mut scheduler);
        }
    })
}

fn resize_callback(
    slot: Weak<RefCell<Option<WebBackdrop>>>,
    window: Window,
) -> Closure<dyn FnMut(web_sys::Event)> {
    Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let Some(cell) = slot.upgrade() else {
            return;
        };
        let Ok(mut guard) = cell.try_borrow_mut() else {
            return;
        };
        if let Some(backdrop) = guard.as_mut() {
            backdrop.on_resize(window_viewport(&window));
        }
    })
}

/// Mount a backdrop on the canvas with id `canvas_id`.
///
/// `config` is either a preset name (see [`available_presets`]) or a JSON
/// surface configuration.
#[wasm_bindgen]
pub fn mount_backdrop(canvas_id: &str, config: &str) -> Result<BackdropHandle, JsValue> {
    let config = SurfaceConfig::resolve(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("'{canvas_id}' is not a canvas")))?;
    let surface = CanvasSurface::new(canvas)?;

    let slot: Slot = Rc::new(RefCell::new(None));
    let mut scheduler = AnimationFrameScheduler::new(window.clone());
    scheduler.install(tick_callback(Rc::downgrade(&slot), scheduler.clone()));

    let backdrop = Backdrop::mount(&config, surface, window_viewport(&window), &mut scheduler);
    *slot.borrow_mut() = Some(backdrop);

    let mut handle = BackdropHandle {
        slot: slot.clone(),
        variant: config.variant(),
        scheduler,
        on_resize: None,
    };

    let listener = resize_callback(Rc::downgrade(&slot), window.clone());
    if let Err(err) =
        window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
    {
        handle.teardown();
        return Err(err);
    }
    handle.on_resize = Some(listener);

    Ok(handle)
}

/// Preset names accepted by [`mount_backdrop`]
#[wasm_bindgen]
pub fn available_presets() -> js_sys::Array {
    PRESETS.iter().map(|name| JsValue::from_str(name)).collect()
}

/// Selector label for a preset, e.g. `"Circuit Board"` for `"circuit"`
#[wasm_bindgen]
pub fn preset_label(name: &str) -> Option<String> {
    config::preset_label(name).map(str::to_string)
}
