//! Kamer Config - browser editor for the escape-room controller
//!
//! Core modules:
//! - `rooms`: Ordered room list with a single active room
//! - `form`: Field schemas, validation and form binding
//! - `grid`: 16x8 placement grid over the banner
//! - `banner`: Banner image checks, recolouring and downscaling
//! - `history`: Past runs, statistics and chart layout
//! - `persistence`: Device wire format, import/export and the HTTP client
//! - `state`: Application state shared by the views
//! - `ui`: DOM views (wasm only)

pub mod banner;
pub mod form;
pub mod grid;
pub mod history;
pub mod persistence;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod rooms;
pub mod settings;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use rooms::{RoomId, RoomList};
pub use settings::GlobalSettings;
pub use state::AppState;

/// Editor configuration constants
pub mod consts {
    /// Room list bounds once initialised
    pub const MIN_ROOMS: usize = 3;
    pub const MAX_ROOMS: usize = 20;

    /// Placement grid size
    pub const GRID_COLS: u32 = 16;
    pub const GRID_ROWS: u32 = 8;

    /// Free-text field limit, in characters
    pub const MAX_TEXT_LEN: usize = 50;
    /// Accepted answers per room
    pub const MAX_ANSWERS: usize = 5;

    pub const MIN_DIFFICULTY: u8 = 1;
    pub const MAX_DIFFICULTY: u8 = 5;
    pub const DEFAULT_DIFFICULTY: u8 = 2;
    pub const DEFAULT_START_TIME: u32 = 60;

    /// Banner width:height
    pub const TARGET_RATIO: f64 = 2.0;
    /// Relative deviation allowed from `TARGET_RATIO`
    pub const RATIO_TOLERANCE: f64 = 0.05;
    /// Mean luminance above which uploads are recoloured
    pub const BRIGHTNESS_THRESHOLD: f64 = 10.0;
    /// Pixel budget for the banner sent to the device
    pub const SAVE_PIXEL_BUDGET: u64 = 5000;

    /// Delay before the "saved" status disappears
    pub const STATUS_CLEAR_MS: i32 = 2000;

    pub const LOAD_ENDPOINT: &str = "/load";
    pub const SAVE_ENDPOINT: &str = "/save";
    pub const EXPORT_FILE_NAME: &str = "settings.json";
}
