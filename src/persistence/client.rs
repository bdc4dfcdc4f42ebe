//! HTTP client for the device's `/load` and `/save` endpoints

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::{Bundle, PersistError, parse_load};
use crate::consts::{LOAD_ENDPOINT, SAVE_ENDPOINT};

fn js_error(err: JsValue) -> PersistError {
    PersistError::Transport(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

async fn send(request: Request) -> Result<String, PersistError> {
    let window = web_sys::window().ok_or_else(|| PersistError::Transport("no window".into()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;
    if !response.ok() {
        return Err(PersistError::Status(response.status()));
    }
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    Ok(text.as_string().unwrap_or_default())
}

/// Fetch the stored bundle from the device
pub async fn load() -> Result<Bundle, PersistError> {
    let init = RequestInit::new();
    init.set_method("GET");
    let request = Request::new_with_str_and_init(LOAD_ENDPOINT, &init).map_err(js_error)?;
    let text = send(request).await?;
    parse_load(&text)
}

/// Post a serialized save body to the device
pub async fn save(body: String) -> Result<(), PersistError> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(SAVE_ENDPOINT, &init).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;
    send(request).await?;
    log::info!("Saved {} bytes to {}", body.len(), SAVE_ENDPOINT);
    Ok(())
}
