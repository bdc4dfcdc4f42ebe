//! Room buttons: select, delete, drag to reorder, add
//!
//! Listeners live on the list wrapper and resolve the room from the
//! button's `data-index`, so re-rendering the buttons adds no closures.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element, Event, MouseEvent};

use super::{SharedState, refresh_rooms};
use crate::platform::{alert, by_id, create, document, listen, query};
use crate::rooms::RoomId;

const WRAPPER: &str = ".kamers-list-wrapper";
const ADD_BUTTON: &str = "btnAddKamer";

/// Index of the room button an event happened in, plus the actual target
fn event_room(event: &Event) -> Option<(usize, Element)> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let button = target.closest(".kamer-item").ok()??;
    let index = button.get_attribute("data-index")?.parse().ok()?;
    Some((index, target))
}

fn room_at(state: &SharedState, index: usize) -> Option<RoomId> {
    state.borrow().rooms.rooms().get(index).map(|r| r.id)
}

pub fn setup(state: &SharedState) {
    let Some(wrapper) = query::<Element>(WRAPPER) else {
        log::warn!("Missing {}", WRAPPER);
        return;
    };
    let dragged: Rc<Cell<Option<RoomId>>> = Rc::default();

    // Select, or delete via the bin icon
    {
        let state = state.clone();
        listen(&wrapper, "click", move |event: MouseEvent| {
            let Some((index, target)) = event_room(&event) else {
                return;
            };
            let Some(id) = room_at(&state, index) else {
                return;
            };
            if target.closest(".delete-icon").ok().flatten().is_some() {
                let result = state.borrow_mut().remove_room(id);
                match result {
                    Ok(()) => log::info!("Removed room {}", index + 1),
                    Err(err) => {
                        alert(&err.to_string());
                        return;
                    }
                }
            } else {
                state.borrow_mut().select_room(id);
            }
            refresh_rooms(&state);
        });
    }

    {
        let state = state.clone();
        let dragged = dragged.clone();
        listen(&wrapper, "dragstart", move |event: DragEvent| {
            let id = event_room(&event).and_then(|(index, _)| room_at(&state, index));
            if let Some(transfer) = event.data_transfer() {
                let _ = transfer.set_data("text/plain", "");
            }
            dragged.set(id);
        });
    }

    listen(&wrapper, "dragover", |event: DragEvent| event.prevent_default());

    {
        let state = state.clone();
        listen(&wrapper, "drop", move |event: DragEvent| {
            event.prevent_default();
            let Some(from) = dragged.take() else {
                return;
            };
            let Some(onto) = event_room(&event).and_then(|(index, _)| room_at(&state, index)) else {
                return;
            };
            let moved = state.borrow_mut().move_room(from, onto);
            if moved {
                refresh_rooms(&state);
            }
        });
    }

    if let Some(add) = by_id::<Element>(ADD_BUTTON) {
        let state = state.clone();
        listen(&add, "click", move |_event: MouseEvent| {
            let result = state.borrow_mut().add_room();
            match result {
                Ok(_) => refresh_rooms(&state),
                Err(err) => alert(&err.to_string()),
            }
        });
    } else {
        log::warn!("Missing #{}", ADD_BUTTON);
    }
}

fn append_button(wrapper: &Element, index: usize, label: &str, active: bool) -> Result<(), JsValue> {
    let button = create("button", "kamer-item")?;
    if active {
        button.class_list().add_1("active")?;
    }
    button.set_attribute("data-index", &index.to_string())?;
    button.set_attribute("draggable", "true")?;
    button.append_child(&document().create_text_node(label))?;

    let delete = create("span", "delete-icon")?;
    delete.set_text_content(Some(" 🗑️"));
    button.append_child(&delete)?;
    wrapper.append_child(&button)?;
    Ok(())
}

pub fn render(state: &SharedState) {
    let Some(wrapper) = query::<Element>(WRAPPER) else {
        return;
    };
    wrapper.set_inner_html("");
    let state = state.borrow();
    let active = state.rooms.active_id();
    for (index, room) in state.rooms.iter().enumerate() {
        let label = room.button_label(index);
        if let Err(err) = append_button(&wrapper, index, &label, active == Some(room.id)) {
            log::warn!("Could not render room button {}: {:?}", index, err);
        }
    }
}

/// Update one button's caption without rebuilding the list
pub fn relabel(index: usize, label: &str) {
    let selector = format!("{} .kamer-item[data-index=\"{}\"]", WRAPPER, index);
    if let Some(text) = query::<Element>(&selector).and_then(|b| b.first_child()) {
        text.set_node_value(Some(label));
    }
}
