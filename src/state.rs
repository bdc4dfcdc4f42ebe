//! Application state
//!
//! One struct owns everything the editor shows and sends. The browser code
//! shares it between event closures as `Rc<RefCell<AppState>>`; all
//! mutation goes through the methods here so the dirty flag stays honest.

use crate::banner::{self, ImageAsset, IngestError};
use crate::consts::SAVE_PIXEL_BUDGET;
use crate::form::{Commit, FieldKey, FormTarget, Rejection};
use crate::grid;
use crate::history::RunHistory;
use crate::persistence::{self, Bundle, PersistError};
use crate::rooms::{CapacityError, GridPos, RoomId, RoomList};
use crate::settings::GlobalSettings;

#[derive(Debug, Default)]
pub struct AppState {
    pub rooms: RoomList,
    pub settings: GlobalSettings,
    pub history: RunHistory,
    image: Option<ImageAsset>,
    /// Raw bytes of the last accepted upload, downscaled at save time
    pending_upload: Option<Vec<u8>>,
    dirty: bool,
    save_in_flight: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a bundle from the device
    pub fn replace_bundle(&mut self, bundle: Bundle) {
        self.rooms = RoomList::from_drafts(bundle.rooms);
        self.rooms.ensure_minimum();
        self.settings = bundle.settings;
        self.history = RunHistory::new(bundle.runs);
        self.image = bundle.image;
        self.pending_upload = None;
        self.dirty = false;
    }

    /// Replace the configuration with an imported bundle. Run history is
    /// device data and stays as it is.
    pub fn import_bundle(&mut self, bundle: Bundle) {
        self.rooms = RoomList::from_drafts(bundle.rooms);
        self.rooms.ensure_minimum();
        self.settings = bundle.settings;
        self.image = bundle.image;
        self.pending_upload = None;
        self.dirty = true;
    }

    pub fn export_json(&self) -> Result<String, PersistError> {
        persistence::export_json(&self.rooms.drafts(), &self.settings, self.image.as_ref())
    }

    /// Build the `/save` body, downscaling the pending upload if there is one
    pub fn save_body(&self) -> Result<String, PersistError> {
        let upload = match &self.pending_upload {
            Some(bytes) => Some(banner::downscale(bytes, SAVE_PIXEL_BUDGET)?),
            None => None,
        };
        persistence::save_json(&self.rooms.drafts(), &self.settings, upload.as_ref())
    }

    /// Claim the save slot. Returns false while another save is running.
    pub fn begin_save(&mut self) -> bool {
        if self.save_in_flight {
            return false;
        }
        self.save_in_flight = true;
        true
    }

    pub fn finish_save(&mut self, ok: bool) {
        self.save_in_flight = false;
        if ok {
            self.dirty = false;
        }
    }

    pub fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn image(&self) -> Option<&ImageAsset> {
        self.image.as_ref()
    }

    pub fn has_pending_upload(&self) -> bool {
        self.pending_upload.is_some()
    }

    /// Validate and recolour an uploaded file. A ratio rejection clears the
    /// current image and pending upload; unreadable files change nothing.
    pub fn ingest_upload(&mut self, bytes: Vec<u8>) -> Result<(), IngestError> {
        match banner::ingest(&bytes) {
            Ok(asset) => {
                self.image = Some(asset);
                self.pending_upload = Some(bytes);
                self.dirty = true;
                Ok(())
            }
            Err(err @ IngestError::Ratio { .. }) => {
                self.image = None;
                self.pending_upload = None;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    pub fn add_room(&mut self) -> Result<RoomId, CapacityError> {
        let id = self.rooms.add()?;
        self.dirty = true;
        Ok(id)
    }

    pub fn remove_room(&mut self, id: RoomId) -> Result<(), CapacityError> {
        self.rooms.remove(id)?;
        self.dirty = true;
        Ok(())
    }

    pub fn move_room(&mut self, dragged: RoomId, target: RoomId) -> bool {
        let moved = self.rooms.move_onto(dragged, target);
        self.dirty |= moved;
        moved
    }

    pub fn select_room(&mut self, id: RoomId) -> bool {
        self.rooms.select(id)
    }

    pub fn place(&mut self, x: u32, y: u32) -> Option<GridPos> {
        let pos = grid::select(&mut self.rooms, x, y)?;
        self.dirty = true;
        Some(pos)
    }

    /// Commit a room form field into the active room. `None` when no room
    /// is active.
    pub fn commit_room_field(&mut self, key: FieldKey, raw: &str) -> Option<Result<Commit, Rejection>> {
        let result = self.rooms.active_mut()?.commit(key, raw);
        if result.is_ok() {
            self.dirty = true;
        }
        Some(result)
    }

    pub fn commit_global_field(&mut self, key: FieldKey, raw: &str) -> Result<Commit, Rejection> {
        let commit = self.settings.commit(key, raw)?;
        self.dirty = true;
        Ok(commit)
    }
}
