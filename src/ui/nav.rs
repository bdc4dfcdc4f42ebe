//! Menu row switching between the three pages

use web_sys::{Element, MouseEvent};

use crate::platform::{by_id, listen, set_visible};

/// (menu button id, page id)
const PAGES: [(&str, &str); 3] = [
    ("btn_Instellingen", "pageInstellingen"),
    ("btn_Gegevens", "pageGegevens"),
    ("btn_Overige", "pageOverige"),
];

const START_PAGE: &str = "btn_Gegevens";

pub fn setup() {
    for (button_id, _) in PAGES {
        let Some(button) = by_id::<Element>(button_id) else {
            log::warn!("Missing menu button #{}", button_id);
            continue;
        };
        listen(&button, "click", move |_event: MouseEvent| show(button_id));
    }
    show(START_PAGE);
}

/// Show the page belonging to `button_id` and hide the others
pub fn show(button_id: &str) {
    for (id, page) in PAGES {
        let selected = id == button_id;
        set_visible(page, selected);
        if let Some(button) = by_id::<Element>(id) {
            let _ = button.class_list().toggle_with_force("active", selected);
        }
    }
    log::debug!("Page switched to {}", button_id);
}
