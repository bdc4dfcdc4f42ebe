//! Settings forms
//!
//! - `schema`: declarative field lists for the room and global forms
//! - `validate`: pure edit-time validation (input -> value | rejection)
//! - `binder`: commits field edits into a [`RoomRecord`] or [`GlobalSettings`]
//!
//! The DOM side lives in `ui::form`.
//!
//! [`RoomRecord`]: crate::rooms::RoomRecord
//! [`GlobalSettings`]: crate::settings::GlobalSettings

pub mod binder;
pub mod schema;
pub mod validate;

pub use binder::{Commit, FormTarget};
pub use schema::{FieldKey, FieldKind, FieldSpec, SelectOption, global_schema, room_schema};
pub use validate::{Rejection, split_answers, validate_answers, validate_start_time, validate_text};
