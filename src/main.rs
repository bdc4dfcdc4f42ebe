//! Kamer Config entry point
//!
//! In the browser this loads the stored configuration from the device and
//! wires up the editor. Natively it prints a summary of an exported
//! `settings.json`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use web_sys::{BeforeUnloadEvent, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, MouseEvent};

    use kamer_config::AppState;
    use kamer_config::consts::{EXPORT_FILE_NAME, STATUS_CLEAR_MS};
    use kamer_config::persistence::{self, client};
    use kamer_config::platform::{alert, by_id, download, listen, read_file_text, set_text, set_timeout, window};
    use kamer_config::ui::{self, SharedState};

    const SAVE_BUTTON: &str = "btnSave";
    const SAVE_STATUS: &str = "saveStatus";
    const EXPORT_BUTTON: &str = "btnExport";
    const IMPORT_BUTTON: &str = "btnImport";
    const IMPORT_INPUT: &str = "importFile";

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Kamer config starting...");

        let state: SharedState = Rc::new(RefCell::new(AppState::new()));

        // Static structure first, so the page is usable while loading
        ui::nav::setup();
        ui::form::setup(&state);
        ui::room_list::setup(&state);
        ui::grid::setup(&state);
        ui::banner::setup(&state);
        ui::chart::setup(&state);
        setup_save_button(state.clone());
        setup_export_button(state.clone());
        setup_import(state.clone());
        setup_unload_guard(state.clone());

        match client::load().await {
            Ok(bundle) => {
                state.borrow_mut().replace_bundle(bundle);
                log::info!("Configuration loaded from device");
            }
            Err(err) => {
                log::error!("Load failed, starting with defaults: {}", err);
                state.borrow_mut().rooms.ensure_minimum();
            }
        }
        ui::refresh_all(&state);

        log::info!("Kamer config running!");
    }

    fn set_status(text: &str, color: &str) {
        set_text(SAVE_STATUS, text);
        if let Some(el) = by_id::<HtmlElement>(SAVE_STATUS) {
            let _ = el.style().set_property("color", color);
        }
    }

    async fn save(state: SharedState, button: HtmlButtonElement) {
        if !state.borrow_mut().begin_save() {
            return;
        }
        button.set_disabled(true);
        set_status("⏳ Opslaan...", "#555");

        let body = state.borrow().save_body();
        let result = match body {
            Ok(body) => client::save(body).await,
            Err(err) => Err(err),
        };
        state.borrow_mut().finish_save(result.is_ok());

        match result {
            Ok(()) => {
                set_status("✅ Opgeslagen", "green");
                set_timeout(STATUS_CLEAR_MS, || set_text(SAVE_STATUS, ""));
            }
            Err(err) => {
                log::error!("Save failed: {}", err);
                set_status("❌ Opslaan mislukt", "red");
            }
        }
        button.set_disabled(false);
    }

    fn setup_save_button(state: SharedState) {
        let Some(button) = by_id::<HtmlButtonElement>(SAVE_BUTTON) else {
            log::warn!("Missing #{}", SAVE_BUTTON);
            return;
        };
        let target = button.clone();
        listen(&button, "click", move |_event: MouseEvent| {
            wasm_bindgen_futures::spawn_local(save(state.clone(), target.clone()));
        });
    }

    fn setup_export_button(state: SharedState) {
        let Some(button) = by_id::<Element>(EXPORT_BUTTON) else {
            log::warn!("Missing #{}", EXPORT_BUTTON);
            return;
        };
        listen(&button, "click", move |_event: MouseEvent| {
            let json = state.borrow().export_json();
            let result = match json {
                Ok(json) => download(EXPORT_FILE_NAME, "application/json", &json)
                    .map_err(|err| format!("{:?}", err)),
                Err(err) => Err(err.to_string()),
            };
            if let Err(err) = result {
                log::error!("Export failed: {}", err);
                alert(&format!("Fout bij exporteren: {}", err));
            }
        });
    }

    async fn import(state: SharedState, input: HtmlInputElement) {
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let text = match read_file_text(&file).await {
            Ok(text) => text,
            Err(err) => {
                log::error!("Could not read {}: {:?}", file.name(), err);
                alert("Fout bij importeren: bestand kon niet gelezen worden");
                return;
            }
        };
        // allow picking the same file again
        input.set_value("");

        match persistence::parse_import(&text) {
            Ok(bundle) => {
                state.borrow_mut().import_bundle(bundle);
                ui::refresh_all(&state);
                log::info!("Imported {}", file.name());
                alert("Instellingen succesvol geïmporteerd!");
            }
            Err(err) => {
                log::error!("Import failed: {}", err);
                alert(&format!("Fout bij importeren: {}", err));
            }
        }
    }

    fn setup_import(state: SharedState) {
        let Some(input) = by_id::<HtmlInputElement>(IMPORT_INPUT) else {
            log::warn!("Missing #{}", IMPORT_INPUT);
            return;
        };
        if let Some(button) = by_id::<Element>(IMPORT_BUTTON) {
            let input = input.clone();
            listen(&button, "click", move |_event: MouseEvent| input.click());
        }
        let target = input.clone();
        listen(&input, "change", move |_event: Event| {
            wasm_bindgen_futures::spawn_local(import(state.clone(), target.clone()));
        });
    }

    /// Ask before leaving with unsaved changes
    fn setup_unload_guard(state: SharedState) {
        listen(&window(), "beforeunload", move |event: BeforeUnloadEvent| {
            if state.borrow().is_dirty() {
                event.prevent_default();
                event.set_return_value("");
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Kamer config (native) starting...");

    let Some(path) = std::env::args().nth(1) else {
        log::info!("The editor runs in the browser - build for wasm32 and serve with `trunk serve`");
        println!("usage: kamer-config <settings.json>");
        return;
    };
    if let Err(err) = inspect(&path) {
        log::error!("Could not read {}: {}", path, err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Print an exported configuration the way the editor would show it
#[cfg(not(target_arch = "wasm32"))]
fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    use kamer_config::AppState;
    use kamer_config::consts::MAX_DIFFICULTY;
    use kamer_config::persistence::parse_import;

    let text = std::fs::read_to_string(path)?;
    let mut state = AppState::new();
    state.import_bundle(parse_import(&text)?);

    println!("{} kamers", state.rooms.len());
    for (index, room) in state.rooms.iter().enumerate() {
        let position = room
            .grid_position
            .map(|p| format!("({}, {})", p.x, p.y))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:>2}. {:<24} beacon {:<16} compartment {:<14} actie {:<14} positie {:<8} antwoorden {:?}",
            index + 1,
            room.button_label(index),
            room.beacon_address,
            room.open_compartment.label(),
            room.special_action.label(),
            position,
            room.answers(),
        );
    }

    let settings = &state.settings;
    println!(
        "moeilijkheid {}/{} ({}), start-tijd {}, audio {}",
        settings.difficulty.level(),
        MAX_DIFFICULTY,
        settings.difficulty.penalty(),
        settings.start_time_seconds
            .map(|s| format!("{} s", s))
            .unwrap_or_else(|| "leeg".into()),
        settings.audio.label(),
    );
    println!(
        "banner: {}",
        if state.image().is_some() { "aanwezig" } else { "geen" }
    );
    Ok(())
}
