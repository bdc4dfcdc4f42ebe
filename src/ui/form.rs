//! Settings tables for the active room and the global settings
//!
//! Tables are built once from the field schemas; switching rooms only
//! refills the values.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement};

use super::{SharedState, room_list};
use crate::form::{
    Commit, FieldKey, FieldKind, FieldSpec, FormTarget, Rejection, global_schema, room_schema,
};
use crate::platform::{alert, create, document, listen, query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Room,
    Global,
}

impl Scope {
    fn container(self) -> &'static str {
        match self {
            Scope::Room => ".kamer-settings",
            Scope::Global => ".global-settings",
        }
    }

    fn schema(self) -> Vec<FieldSpec> {
        match self {
            Scope::Room => room_schema(),
            Scope::Global => global_schema(),
        }
    }
}

fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

fn set_field_value(field: &Element, value: &str) {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

fn build_field(spec: &FieldSpec) -> Result<Element, JsValue> {
    let field = match &spec.kind {
        FieldKind::Select(options) => {
            let select = create("select", "settings-input")?;
            for opt in options {
                let option = create("option", "")?;
                option.set_attribute("value", &opt.value.to_string())?;
                option.set_text_content(Some(opt.label));
                select.append_child(&option)?;
            }
            select
        }
        FieldKind::Text => {
            let input = create("input", "settings-input")?;
            input.set_attribute("type", "text")?;
            input
        }
        FieldKind::Range { min, max, step } => {
            let input = create("input", "settings-input")?;
            input.set_attribute("type", "range")?;
            input.set_attribute("min", &min.to_string())?;
            input.set_attribute("max", &max.to_string())?;
            input.set_attribute("step", &step.to_string())?;
            input
        }
    };
    field.set_attribute("data-key", spec.key.wire_key())?;
    Ok(field)
}

fn build_row(spec: &FieldSpec, state: &SharedState, scope: Scope) -> Result<Element, JsValue> {
    let row = create("tr", "")?;

    let label_cell = create("td", "settings-label")?;
    let label = create("span", "")?;
    label.set_text_content(Some(spec.label));
    if let Some(help) = &spec.help {
        let tooltip = create("span", "tooltip")?;
        tooltip.set_inner_html(help);
        label.class_list().add_1("has-tooltip")?;
        label.append_child(&tooltip)?;
    }
    label_cell.append_child(&label)?;

    let input_cell = create("td", "settings-input-container")?;
    let field = build_field(spec)?;
    let value_label = match spec.kind {
        FieldKind::Range { .. } => {
            input_cell.class_list().add_1("range-container")?;
            let value_label = create("span", "range-value")?;
            value_label.set_attribute("data-key", spec.key.wire_key())?;
            input_cell.append_child(&value_label)?;
            Some(value_label)
        }
        _ => None,
    };
    input_cell.append_child(&field)?;

    row.append_child(&label_cell)?;
    row.append_child(&input_cell)?;

    let state = state.clone();
    let key = spec.key;
    let target = field.clone();
    listen(&field, "input", move |_event: Event| {
        on_input(&state, scope, key, &target);
        if let Some(value_label) = &value_label {
            value_label.set_text_content(Some(&field_value(&target)));
        }
    });
    Ok(row)
}

fn build(scope: Scope, state: &SharedState) -> Result<(), JsValue> {
    let Some(container) = query::<Element>(scope.container()) else {
        log::warn!("Missing {}", scope.container());
        return Ok(());
    };
    container.set_inner_html("");
    let table = create("table", "settings-table")?;
    for spec in scope.schema() {
        table.append_child(&build_row(&spec, state, scope)?)?;
    }
    container.append_child(&table)?;
    Ok(())
}

fn on_input(state: &SharedState, scope: Scope, key: FieldKey, field: &Element) {
    let raw = field_value(field);
    let result: Option<Result<Commit, Rejection>> = {
        let mut state = state.borrow_mut();
        match scope {
            Scope::Room => state.commit_room_field(key, &raw),
            Scope::Global => Some(state.commit_global_field(key, &raw)),
        }
    };
    match result {
        None => {}
        Some(Ok(commit)) => {
            if let Some(notice) = &commit.notice {
                alert(&notice.to_string());
            }
            if let Some(text) = &commit.field_text {
                set_field_value(field, text);
            }
            if key == FieldKey::RoomName {
                relabel_active(state);
            }
        }
        Some(Err(rejection)) => {
            log::warn!("Rejected {}: {}", key.wire_key(), rejection);
            alert(&rejection.to_string());
            set_field_value(field, &rejection.replacement());
        }
    }
}

fn relabel_active(state: &SharedState) {
    let state = state.borrow();
    if let (Some(index), Some(room)) = (state.rooms.active_index(), state.rooms.active()) {
        room_list::relabel(index, &room.button_label(index));
    }
}

/// Write every field of a form from `target`
fn fill(scope: Scope, target: Option<&dyn FormTarget>) {
    let selector = format!("{} [data-key]", scope.container());
    let Ok(nodes) = document().query_selector_all(&selector) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(key) = el
            .get_attribute("data-key")
            .and_then(|k| FieldKey::from_wire_key(&k))
        else {
            continue;
        };
        let text = target.map(|t| t.field_text(key)).unwrap_or_default();
        if el.class_list().contains("range-value") {
            el.set_text_content(Some(&text));
        } else {
            set_field_value(&el, &text);
        }
    }
}

pub fn fill_room_form(state: &SharedState) {
    let state = state.borrow();
    fill(Scope::Room, state.rooms.active().map(|r| r as &dyn FormTarget));
}

pub fn fill_global_form(state: &SharedState) {
    let state = state.borrow();
    fill(Scope::Global, Some(&state.settings as &dyn FormTarget));
}

pub fn setup(state: &SharedState) {
    for scope in [Scope::Room, Scope::Global] {
        if let Err(err) = build(scope, state) {
            log::error!("Could not build {:?} form: {:?}", scope, err);
        }
    }
    fill_room_form(state);
    fill_global_form(state);
}
