//! Banner upload: file picker, drag and drop, preview and ratio warning

use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, File, HtmlElement, HtmlImageElement, HtmlInputElement, MouseEvent};

use super::SharedState;
use crate::banner::IngestError;
use crate::platform::{alert, by_id, listen, read_file_bytes, set_visible};

const DROP_ZONE: &str = "dropZone";
const INPUT: &str = "imageInput";
const PREVIEW: &str = "imagePreview";
const PLACEHOLDER: &str = "placeholder";
const RATIO_WARNING: &str = "ratioWarning";

fn set_border(zone: &Element, color: &str) {
    if let Some(zone) = zone.dyn_ref::<HtmlElement>() {
        let _ = zone.style().set_property("border-color", color);
    }
}

fn handle_file(state: &SharedState, file: File) {
    if !file.type_().starts_with("image/") {
        log::debug!("Ignoring non-image upload ({})", file.type_());
        return;
    }
    let state = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let bytes = match read_file_bytes(&file).await {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("Could not read {}: {:?}", file.name(), err);
                return;
            }
        };
        log::info!("Ingesting {} ({} bytes)", file.name(), bytes.len());
        let result = state.borrow_mut().ingest_upload(bytes);
        match result {
            Ok(()) => set_visible(RATIO_WARNING, false),
            Err(err @ IngestError::Ratio { .. }) => {
                log::warn!("{}", err);
                set_visible(RATIO_WARNING, true);
                if let Some(input) = by_id::<HtmlInputElement>(INPUT) {
                    input.set_value("");
                }
            }
            Err(err) => alert(&err.to_string()),
        }
        render(&state);
    });
}

fn first_file(files: Option<web_sys::FileList>) -> Option<File> {
    files?.get(0)
}

pub fn setup(state: &SharedState) {
    let Some(zone) = by_id::<Element>(DROP_ZONE) else {
        log::warn!("Missing #{}", DROP_ZONE);
        return;
    };
    let input = by_id::<HtmlInputElement>(INPUT);

    if let Some(input) = input.clone() {
        let state = state.clone();
        listen(&zone, "click", move |_event: MouseEvent| {
            if state.borrow().image().is_none() {
                input.click();
            }
        });
    }

    if let Some(input) = input {
        let state = state.clone();
        let target = input.clone();
        listen(&input, "change", move |_event: Event| {
            if let Some(file) = first_file(target.files()) {
                handle_file(&state, file);
            }
        });
    }

    {
        let target = zone.clone();
        listen(&zone, "dragover", move |event: DragEvent| {
            event.prevent_default();
            set_border(&target, "#333");
        });
    }
    {
        let target = zone.clone();
        listen(&zone, "dragleave", move |event: DragEvent| {
            event.prevent_default();
            set_border(&target, "#aaa");
        });
    }
    {
        let state = state.clone();
        let target = zone.clone();
        listen(&zone, "drop", move |event: DragEvent| {
            event.prevent_default();
            set_border(&target, "#aaa");
            if let Some(file) = first_file(event.data_transfer().and_then(|t| t.files())) {
                handle_file(&state, file);
            }
        });
    }
}

/// Show the current banner, or the placeholder when there is none
pub fn render(state: &SharedState) {
    let state = state.borrow();
    let preview = by_id::<HtmlImageElement>(PREVIEW);
    match state.image() {
        Some(asset) => {
            if let Some(preview) = preview {
                preview.set_src(asset.as_str());
            }
            set_visible(PREVIEW, true);
            set_visible(PLACEHOLDER, false);
            set_visible(RATIO_WARNING, false);
        }
        None => {
            if let Some(preview) = preview {
                preview.set_src("");
            }
            set_visible(PREVIEW, false);
            set_visible(PLACEHOLDER, true);
        }
    }
}
