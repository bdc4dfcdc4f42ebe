//! Placement grid cells and axis labels over the banner drop zone

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, MouseEvent};

use super::SharedState;
use crate::grid::{self, AxisLabel};
use crate::platform::{by_id, create, document, listen};

const DROP_ZONE: &str = "dropZone";
const AXIS_COLOR: &str = "#b2aca2";

fn style(el: &Element, props: &[(&str, &str)]) -> Result<(), JsValue> {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let style = el.style();
        for (name, value) in props {
            style.set_property(name, value)?;
        }
    }
    Ok(())
}

fn build_cells(zone: &Element, state: &SharedState) -> Result<(), JsValue> {
    for cell in grid::cells() {
        let button = create("div", "gridButton")?;
        let (x, y) = (u32::from(cell.pos.x), u32::from(cell.pos.y));
        button.set_attribute("data-x", &x.to_string())?;
        button.set_attribute("data-y", &y.to_string())?;
        let (left, top) = (format!("{}%", cell.left_pct), format!("{}%", cell.top_pct));
        let (width, height) = (format!("{}%", cell.width_pct), format!("{}%", cell.height_pct));
        style(
            &button,
            &[
                ("left", left.as_str()),
                ("top", top.as_str()),
                ("width", width.as_str()),
                ("height", height.as_str()),
            ],
        )?;

        let indicator = create("div", "gridButtonindIcator")?;
        button.append_child(&indicator)?;

        let state = state.clone();
        listen(&button, "click", move |event: MouseEvent| {
            // keep the drop zone from opening the file picker
            event.stop_propagation();
            let placed = state.borrow_mut().place(x, y);
            if placed.is_some() {
                render(&state);
            }
        });
        zone.append_child(&button)?;
    }
    Ok(())
}

fn build_axis(zone: &Element, labels: Vec<AxisLabel>, horizontal: bool) -> Result<(), JsValue> {
    for label in labels {
        let el = create("div", "axis-label")?;
        el.set_text_content(Some(&label.value.to_string()));
        let offset = format!("{}%", label.offset_pct);
        if horizontal {
            style(
                &el,
                &[
                    ("color", AXIS_COLOR),
                    ("left", offset.as_str()),
                    ("top", "100%"),
                    ("transform", "translate(-50%, 4px)"),
                ],
            )?;
        } else {
            style(
                &el,
                &[
                    ("color", AXIS_COLOR),
                    ("left", "17px"),
                    ("top", offset.as_str()),
                    ("transform", "translate(-16px, -50%)"),
                ],
            )?;
        }
        zone.append_child(&el)?;
    }
    Ok(())
}

pub fn setup(state: &SharedState) {
    let Some(zone) = by_id::<Element>(DROP_ZONE) else {
        log::warn!("Missing #{}", DROP_ZONE);
        return;
    };
    let built = build_cells(&zone, state)
        .and_then(|_| build_axis(&zone, grid::x_axis_labels(), true))
        .and_then(|_| build_axis(&zone, grid::y_axis_labels(), false));
    if let Err(err) = built {
        log::error!("Could not build placement grid: {:?}", err);
    }
    render(state);
}

/// Highlight the active room's cell and nothing else
pub fn render(state: &SharedState) {
    let doc = document();
    if let Ok(active) = doc.query_selector_all(".gridButtonindIcator.active") {
        for i in 0..active.length() {
            if let Some(el) = active.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = el.class_list().remove_1("active");
            }
        }
    }

    let Some(pos) = grid::active_cell(&state.borrow().rooms) else {
        return;
    };
    let selector = format!(
        "#{} .gridButton[data-x=\"{}\"][data-y=\"{}\"] .gridButtonindIcator",
        DROP_ZONE, pos.x, pos.y
    );
    if let Some(indicator) = doc.query_selector(&selector).ok().flatten() {
        let _ = indicator.class_list().add_1("active");
    }
}
