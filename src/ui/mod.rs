//! DOM views
//!
//! Each view builds its static structure once in a `setup` function and
//! redraws from [`AppState`] in a `render` function. Handlers take the
//! state borrow, mutate, drop it, then call the matching refresh.

pub mod banner;
pub mod chart;
pub mod form;
pub mod grid;
pub mod nav;
pub mod room_list;

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::AppState;

pub type SharedState = Rc<RefCell<AppState>>;

/// Redraw everything tied to the room list and its active room
pub fn refresh_rooms(state: &SharedState) {
    room_list::render(state);
    form::fill_room_form(state);
    grid::render(state);
}

/// Redraw every view after a full state replacement
pub fn refresh_all(state: &SharedState) {
    refresh_rooms(state);
    form::fill_global_form(state);
    banner::render(state);
    chart::render_run_buttons(state);
    chart::render(state);
}
