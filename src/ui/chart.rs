//! Run history page: bar chart, statistics and run picker

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, Event, HtmlCanvasElement, HtmlElement, MouseEvent};

use super::SharedState;
use crate::history::{ChartLayout, RunSummary, outcome_mark, run_label};
use crate::platform::{by_id, create, listen, set_text, window};

const CONTAINER: &str = "chartContainer";
const CANVAS_ID: &str = "myChart";
const BUTTONS: &str = "recordingButtons";

const TEXT_COLOR: &str = "#b2aca2";
const BAR_FILL: &str = "rgba(43, 42, 51, 0.8)";
const BAR_STROKE: &str = "rgba(98, 101, 112, 1)";
const FONT: &str = "17px Arial";

pub fn setup(state: &SharedState) {
    let Some(container) = by_id::<Element>(CONTAINER) else {
        log::warn!("Missing #{}", CONTAINER);
        return;
    };
    let canvas = create("canvas", "").and_then(|canvas| {
        canvas.set_id(CANVAS_ID);
        if let Some(el) = canvas.dyn_ref::<HtmlElement>() {
            el.style().set_property("width", "100%")?;
            el.style().set_property("height", "95%")?;
        }
        container.append_child(&canvas)?;
        Ok(())
    });
    if let Err(err) = canvas {
        log::error!("Could not create chart canvas: {:?}", err);
        return;
    }

    let state = state.clone();
    listen(&window(), "resize", move |_event: Event| render(&state));
}

fn draw(canvas: &HtmlCanvasElement, values: &[f64]) -> Result<(), JsValue> {
    let rect = canvas.get_bounding_client_rect();
    let dpr = window().device_pixel_ratio();
    canvas.set_width((rect.width() * dpr) as u32);
    canvas.set_height((rect.height() * dpr) as u32);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

    let layout = ChartLayout::compute(values, rect.width(), rect.height());
    ctx.clear_rect(0.0, 0.0, layout.width, layout.height);

    ctx.set_stroke_style_str(TEXT_COLOR);
    ctx.set_fill_style_str(TEXT_COLOR);
    ctx.set_font(FONT);
    ctx.set_text_baseline("middle");

    // y axis title
    ctx.save();
    ctx.translate(15.0, layout.height / 2.0)?;
    ctx.rotate(-PI / 2.0)?;
    ctx.set_text_align("center");
    ctx.fill_text("Tijd (min)", 0.0, 0.0)?;
    ctx.restore();

    ctx.set_text_align("right");
    ctx.set_line_width(1.0);
    for line in &layout.gridlines {
        ctx.begin_path();
        ctx.move_to(layout.axis_x, line.y);
        ctx.line_to(layout.width, line.y);
        ctx.stroke();
        ctx.fill_text(&line.value.to_string(), layout.axis_x - 5.0, line.y)?;
    }

    ctx.set_text_align("center");
    for bar in &layout.bars {
        ctx.set_fill_style_str(BAR_FILL);
        ctx.set_stroke_style_str(BAR_STROKE);
        ctx.set_line_width(3.0);
        ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);
        ctx.stroke_rect(bar.x, bar.y, bar.width, bar.height);

        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.fill_text(&bar.room_label, bar.label_x, bar.room_label_y)?;
        ctx.fill_text(&bar.value_label, bar.label_x, bar.value_label_y)?;
    }
    Ok(())
}

fn show_summary(summary: &RunSummary) {
    set_text("totaleTijd", &summary.total);
    set_text("snelsteTijd", &summary.fastest);
    set_text("langsteTijd", &summary.slowest);
    set_text("gemiddeldeTijd", &summary.average);
    set_text("tijdOver", &summary.remaining);
    set_text("geslaagd", summary.outcome);
    set_text("aantalFouten", &summary.errors);
    set_text("moeilijkheid", &summary.difficulty);
    set_text("bomTijd", &summary.bomb_time);
    set_text("kamners", &summary.rooms);
}

/// Draw the selected run and its statistics
pub fn render(state: &SharedState) {
    let state = state.borrow();
    let Some(record) = state.history.current() else {
        return;
    };
    if let Some(canvas) = by_id::<HtmlCanvasElement>(CANVAS_ID) {
        if let Err(err) = draw(&canvas, &record.per_room_minutes) {
            log::error!("Chart draw failed: {:?}", err);
        }
    }
    show_summary(&RunSummary::new(record));
}

fn append_run_button(container: &Element, state: &SharedState, index: usize, succeeded: bool, active: bool) -> Result<(), JsValue> {
    let button = create("button", "")?;
    button.set_text_content(Some(&run_label(index)));
    button.set_attribute("data-run", &index.to_string())?;
    if active {
        button.class_list().add_1("active")?;
    }

    let indicator = create("span", "")?;
    indicator.set_text_content(Some(outcome_mark(succeeded)));
    if let Some(el) = indicator.dyn_ref::<HtmlElement>() {
        el.style().set_property("color", if succeeded { "green" } else { "red" })?;
        el.style().set_property("margin-left", "5px")?;
    }
    button.append_child(&indicator)?;

    let state = state.clone();
    let container_ref = container.clone();
    listen(&button, "click", move |_event: MouseEvent| {
        if !state.borrow_mut().history.select_run(index) {
            return;
        }
        mark_active_run(&container_ref, index);
        render(&state);
    });
    container.append_child(&button)?;
    Ok(())
}

fn mark_active_run(container: &Element, index: usize) {
    let Ok(buttons) = container.query_selector_all("button") else {
        return;
    };
    for i in 0..buttons.length() {
        if let Some(button) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            let _ = button.class_list().toggle_with_force("active", i as usize == index);
        }
    }
}

/// One button per recorded run, newest first
pub fn render_run_buttons(state: &SharedState) {
    let Some(container) = by_id::<Element>(BUTTONS) else {
        return;
    };
    container.set_inner_html("");
    let runs: Vec<bool> = state.borrow().history.records().iter().map(|r| r.succeeded).collect();
    let current = state.borrow().history.current_index();
    for (index, succeeded) in runs.into_iter().enumerate() {
        if let Err(err) = append_run_button(&container, state, index, succeeded, index == current) {
            log::warn!("Could not render run button {}: {:?}", index, err);
        }
    }
}
