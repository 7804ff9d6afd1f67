pub mod app;
pub mod config;
pub mod order_tracking;
pub mod shared;

use crate::app::App;
use crate::config::ClientConfig;
use contracts::OrderTrackingError;
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

/// Called by the host page once its DOM is ready.
///
/// `config` is an optional object, see [`ClientConfig`].
#[wasm_bindgen]
pub fn host_ready(config: JsValue) {
    let config = ClientConfig::from_js(config);
    if let Err(e) = mount(config) {
        log::error!("Order tracking not mounted: {}", e);
    }
}

fn mount(config: ClientConfig) -> Result<(), OrderTrackingError> {
    let Some(element_id) = config.mount_element_id.clone() else {
        leptos::mount::mount_to_body(move || view! { <App config=config /> });
        return Ok(());
    };

    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&element_id))
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or(OrderTrackingError::MissingElement(element_id))?;

    leptos::mount::mount_to(element, move || view! { <App config=config /> })
        .forget();
    Ok(())
}
