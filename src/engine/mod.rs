use crate::browser;
use anyhow::{anyhow, Error, Result};
// wasm is single threaded, so Rc RefCell over Arc Mutex
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - we create the closures ourselves so the expected type is known
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub mod game_loop;
pub mod input;

pub use game_loop::{AnimationFrames, FrameClock, FrameScheduler, Game, GameLoop};

// ==================== Geometry ====================
// Canvas space : origin top left, y grows downward
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn translate(self, by: Point) -> Self {
        Point {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// Component wise minimum, the part of `self` that fits in `other`
    pub fn min(self, other: Size) -> Self {
        Size {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub fn from_size(size: Size) -> Self {
        Rect {
            position: Point::ORIGIN,
            size,
        }
    }
}

// ==================== Drawing ====================
/// Everything the scene needs from a 2d drawing surface
/// - `Image` is whatever handle the surface can blit from
pub trait Surface {
    type Image;

    /// Current drawable area, follows the host element on resize
    fn size(&self) -> Size;
    fn clear(&self, rect: &Rect);
    fn stroke_rect(&self, rect: &Rect, color: &str);
    /// Blit `source` (image space) of `image` into `destination` (surface space)
    fn draw_image_region(&self, image: &Self::Image, source: &Rect, destination: &Rect);
}

/// Image handle that may still be decoding
pub trait Bitmap {
    fn is_ready(&self) -> bool;
}

impl Bitmap for HtmlImageElement {
    fn is_ready(&self) -> bool {
        // `complete` is also true for an image that failed or has no src,
        // a zero natural width tells those apart
        self.complete() && self.natural_width() > 0
    }
}

/// Canvas 2d implementation of [`Surface`]
pub struct Renderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let context = browser::context(&canvas)?;
        Ok(Renderer { canvas, context })
    }
}

impl Surface for Renderer {
    type Image = HtmlImageElement;

    fn size(&self) -> Size {
        Size {
            width: self.canvas.width().into(),
            height: self.canvas.height().into(),
        }
    }

    fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.position.x,
            rect.position.y,
            rect.size.width,
            rect.size.height,
        );
    }

    fn stroke_rect(&self, rect: &Rect, color: &str) {
        self.context.set_stroke_style_str(color);
        self.context.stroke_rect(
            rect.position.x,
            rect.position.y,
            rect.size.width,
            rect.size.height,
        );
    }

    fn draw_image_region(&self, image: &HtmlImageElement, source: &Rect, destination: &Rect) {
        let drawn = self
            .context
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                source.position.x,
                source.position.y,
                source.size.width,
                source.size.height,
                destination.position.x,
                destination.position.y,
                destination.size.width,
                destination.size.height,
            );
        // a throwing drawImage only loses this frame's background
        if let Err(err) = drawn {
            log::error!("drawImage failed for {:?} : {:#?}", source, err);
        }
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let owned_source = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "Error loading image '{}' : {:#?}",
                owned_source,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - outer ? : channel result
    // - inner ? : image load result
    rx.await??;

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_adds_components() {
        let moved = Point::new(500.0, 400.0).translate(Point::new(-200.0, 50.5));
        assert_eq!(moved, Point::new(300.0, 450.5));
    }

    #[test]
    fn size_min_keeps_the_smaller_axis_each() {
        let viewport = Size::new(1920.0, 1080.0);
        let map = Size::new(1500.0, 2500.0);
        assert_eq!(viewport.min(map), Size::new(1500.0, 1080.0));
    }
}
