use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use std::future::Future;
use wasm_bindgen::closure::{Closure, WasmClosure, WasmClosureFnOnce};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[rustfmt::skip]
use web_sys::{
    CanvasRenderingContext2d,
    Document,
    Element,
    Event,
    HtmlCanvasElement,
    HtmlImageElement,
    Response,
    Window,
};

// ==================== Constants ====================
// Constants related to HTML elements
mod html {
    pub const WRAPPER_ID: &str = "wrapper";
    pub const CANVAS_TAG: &str = "canvas";
    pub const CONTEXT_2D: &str = "2d";
    pub const RESIZE: &str = "resize";
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

/// Host element the scene lives in, the canvas always fills it
pub fn wrapper() -> Result<Element> {
    document()?
        .get_element_by_id(html::WRAPPER_ID)
        .ok_or_else(|| anyhow!("No Element found with ID : '{}'", html::WRAPPER_ID))
}

pub fn create_canvas() -> Result<HtmlCanvasElement> {
    document()?
        .create_element(html::CANVAS_TAG)
        .map_err(|err| anyhow!("Could not create canvas element : {:#?}", err))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|element| anyhow!("Error converting {:#?} to HtmlCanvasElement", element))
}

/// Creates a canvas inside the wrapper and keeps it sized to the wrapper
/// - sized once right away
/// - re-sized on every window `resize` event
pub fn mount_canvas() -> Result<HtmlCanvasElement> {
    let wrapper = wrapper()?;
    let canvas = create_canvas()?;
    wrapper
        .append_child(&canvas)
        .map_err(|err| anyhow!("Could not append canvas to wrapper : {:#?}", err))?;
    fit_to(&canvas, &wrapper);

    let resize_canvas = canvas.clone();
    let on_resize = closure_wrap(Box::new(move |_event: Event| {
        fit_to(&resize_canvas, &wrapper);
    }) as Box<dyn FnMut(Event)>);
    listen(html::RESIZE, on_resize)?;

    Ok(canvas)
}

fn fit_to(canvas: &HtmlCanvasElement, wrapper: &Element) {
    // client sizes are never negative, max(0) only guards the cast
    canvas.set_width(wrapper.client_width().max(0) as u32);
    canvas.set_height(wrapper.client_height().max(0) as u32);
}

pub fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context(html::CONTEXT_2D)
        // Result<Option<Object>, JsValue>
        // - JsValue error becomes an anyhow error
        // - None becomes an anyhow error
        .map_err(|js_value| anyhow!("Error getting context : {:#?}", js_value))?
        .ok_or_else(|| anyhow!("No 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "Error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

pub fn new_image() -> Result<HtmlImageElement> {
    HtmlImageElement::new()
        .map_err(|err| anyhow!("Could not create image element : {:#?}", err))
}

pub fn closure_once<F, A, R>(f: F) -> Closure<F::FnMut>
where
    F: 'static + WasmClosureFnOnce<A, R>,
{
    Closure::once(f)
}

pub fn closure_wrap<T: WasmClosure + ?Sized>(data: Box<T>) -> Closure<T> {
    Closure::wrap(data)
}

/// Registers a window listener for the lifetime of the page
pub fn listen<T: WasmClosure + ?Sized>(event: &str, listener: Closure<T>) -> Result<()> {
    window()?
        .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Could not listen to '{}' : {:#?}", event, err))?;
    // listener must outlive this function, the page owns it from here on
    listener.forget();
    Ok(())
}

/// Runs `callback` on the next display refresh
/// - the JS function frees itself once it has been called
pub fn request_animation_frame<F>(callback: F) -> Result<i32>
where
    F: 'static + FnOnce(f64),
{
    let callback = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
    window()?
        .request_animation_frame(callback.unchecked_ref())
        .map_err(|err| anyhow!("Cannot request animation frame : {:#?}", err))
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

pub async fn fetch_json<T>(json_path: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let resp_value = fetch_with_str(json_path).await?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|element| anyhow!("error converting [{:#?}] to Response", element))?;
    if !resp.ok() {
        return Err(anyhow!(
            "fetching [{}] answered with status {}",
            json_path,
            resp.status()
        ));
    }
    let json = resp
        .json()
        .map_err(|err| anyhow!("Could not get JSON from response [{:#?}]", err))?;

    let json_value = JsFuture::from(json)
        .await
        .map_err(|err| anyhow!("error fetching [{:#?}]", err))?;

    serde_wasm_bindgen::from_value(json_value)
        .map_err(|err| anyhow!("error converting response : {:#?}", err))
}

async fn fetch_with_str(resource: &str) -> Result<JsValue> {
    let resp = window()?.fetch_with_str(resource);

    JsFuture::from(resp)
        .await
        .map_err(|err| anyhow!("error fetching : {:#?}", err))
}
