//! Room ("kamer") list model
//!
//! Ordered list of room records with a single active entry. Rooms carry a
//! stable [`RoomId`] so selection and drag references survive reordering;
//! the wire format stays positional.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GRID_COLS, GRID_ROWS, MAX_ROOMS, MIN_ROOMS};

/// Stable identifier assigned when a room is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(u32);

impl RoomId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Cell on the placement grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u8,
    pub y: u8,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { x: 0, y: 0 };

    /// Returns `None` for coordinates outside the 16x8 grid
    pub fn new(x: u32, y: u32) -> Option<Self> {
        if x < GRID_COLS && y < GRID_ROWS {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }
}

/// Compartment opened after the room's puzzle is solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenCompartment {
    #[default]
    None,
    First,
    Second,
    Third,
}

impl OpenCompartment {
    pub const ALL: [OpenCompartment; 4] = [
        OpenCompartment::None,
        OpenCompartment::First,
        OpenCompartment::Second,
        OpenCompartment::Third,
    ];

    pub fn code(self) -> u8 {
        match self {
            OpenCompartment::None => 0,
            OpenCompartment::First => 1,
            OpenCompartment::Second => 2,
            OpenCompartment::Third => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            OpenCompartment::None => "Geen",
            OpenCompartment::First => "Compartment 1",
            OpenCompartment::Second => "Compartment 2",
            OpenCompartment::Third => "Compartment 3",
        }
    }
}

/// Physical action the players must perform in the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialAction {
    #[default]
    None,
    CutWire,
    TurnKey,
    Fingerprint,
}

impl SpecialAction {
    pub const ALL: [SpecialAction; 4] = [
        SpecialAction::None,
        SpecialAction::CutWire,
        SpecialAction::TurnKey,
        SpecialAction::Fingerprint,
    ];

    pub fn code(self) -> u8 {
        match self {
            SpecialAction::None => 0,
            SpecialAction::CutWire => 1,
            SpecialAction::TurnKey => 2,
            SpecialAction::Fingerprint => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            SpecialAction::None => "Geen",
            SpecialAction::CutWire => "Knip draad",
            SpecialAction::TurnKey => "Draai sleutel",
            SpecialAction::Fingerprint => "Vingerprint",
        }
    }
}

/// One room's configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RoomRecord {
    pub id: RoomId,
    pub name: String,
    pub beacon_address: String,
    /// Comma-joined accepted answers, as typed
    pub accepted_answers: String,
    pub open_compartment: OpenCompartment,
    pub special_action: SpecialAction,
    /// `None` when the device sent an empty position
    pub grid_position: Option<GridPos>,
}

impl RoomRecord {
    /// Split the answer text into trimmed, non-empty answers
    pub fn answers(&self) -> Vec<&str> {
        crate::form::split_answers(&self.accepted_answers)
    }

    /// Caption for the room's list button at `index`
    pub fn button_label(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("Kamer {}", index + 1)
        } else {
            self.name.clone()
        }
    }
}

/// Room fields without an identity, as read from a bundle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoomDraft {
    pub name: String,
    pub beacon_address: String,
    pub accepted_answers: String,
    pub open_compartment: OpenCompartment,
    pub special_action: SpecialAction,
    pub grid_position: Option<GridPos>,
}

impl From<&RoomRecord> for RoomDraft {
    fn from(room: &RoomRecord) -> Self {
        Self {
            name: room.name.clone(),
            beacon_address: room.beacon_address.clone(),
            accepted_answers: room.accepted_answers.clone(),
            open_compartment: room.open_compartment,
            special_action: room.special_action,
            grid_position: room.grid_position,
        }
    }
}

/// Room count bounds violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("Je kan niet meer dan {} kamers hebben", MAX_ROOMS)]
    TooMany,
    #[error("Je kunt niet minder dan {} kamers hebben.", MIN_ROOMS)]
    TooFew,
}

/// Ordered room list with exactly one active room while non-empty
#[derive(Debug, Clone, Default)]
pub struct RoomList {
    rooms: Vec<RoomRecord>,
    active: Option<RoomId>,
    next_id: u32,
}

impl RoomList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from drafts, keeping at most `MAX_ROOMS` entries.
    /// The first room becomes active.
    pub fn from_drafts(drafts: impl IntoIterator<Item = RoomDraft>) -> Self {
        let mut list = Self::new();
        for draft in drafts {
            if list.rooms.len() >= MAX_ROOMS {
                log::warn!("Dropping rooms beyond the {} room limit", MAX_ROOMS);
                break;
            }
            let id = list.next_room_id();
            list.rooms.push(RoomRecord {
                id,
                name: draft.name,
                beacon_address: draft.beacon_address,
                accepted_answers: draft.accepted_answers,
                open_compartment: draft.open_compartment,
                special_action: draft.special_action,
                grid_position: draft.grid_position,
            });
        }
        list.active = list.rooms.first().map(|r| r.id);
        list
    }

    fn next_room_id(&mut self) -> RoomId {
        let id = RoomId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> &[RoomRecord] {
        &self.rooms
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomRecord> {
        self.rooms.iter()
    }

    pub fn get(&self, id: RoomId) -> Option<&RoomRecord> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut RoomRecord> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn index_of(&self, id: RoomId) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == id)
    }

    pub fn active_id(&self) -> Option<RoomId> {
        self.active
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.and_then(|id| self.index_of(id))
    }

    pub fn active(&self) -> Option<&RoomRecord> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut RoomRecord> {
        let id = self.active?;
        self.get_mut(id)
    }

    /// Append a room with default fields and make it active
    pub fn add(&mut self) -> Result<RoomId, CapacityError> {
        if self.rooms.len() >= MAX_ROOMS {
            return Err(CapacityError::TooMany);
        }
        let id = self.next_room_id();
        self.rooms.push(RoomRecord {
            id,
            name: format!("Kamer {}", self.rooms.len() + 1),
            beacon_address: String::new(),
            accepted_answers: String::new(),
            open_compartment: OpenCompartment::None,
            special_action: SpecialAction::None,
            grid_position: Some(GridPos::ORIGIN),
        });
        self.active = Some(id);
        Ok(id)
    }

    /// Remove a room. Falls back to the first room when the active one goes.
    /// Unknown ids are ignored.
    pub fn remove(&mut self, id: RoomId) -> Result<(), CapacityError> {
        if self.rooms.len() <= MIN_ROOMS {
            return Err(CapacityError::TooFew);
        }
        let Some(index) = self.index_of(id) else {
            return Ok(());
        };
        self.rooms.remove(index);
        if self.active == Some(id) {
            self.active = self.rooms.first().map(|r| r.id);
        }
        Ok(())
    }

    /// Move the room at `from` so it ends up at index `to`.
    /// Returns false if either index is out of range or they are equal.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.rooms.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let moved = self.rooms.remove(from);
        self.rooms.insert(to, moved);
        true
    }

    /// Drop the dragged room onto the target room
    pub fn move_onto(&mut self, dragged: RoomId, target: RoomId) -> bool {
        match (self.index_of(dragged), self.index_of(target)) {
            (Some(from), Some(to)) => self.reorder(from, to),
            _ => false,
        }
    }

    /// Make `id` the active room. Returns false for unknown ids.
    pub fn select(&mut self, id: RoomId) -> bool {
        if self.get(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Pad the list with default rooms up to the minimum, keeping the
    /// current active room when there was one
    pub fn ensure_minimum(&mut self) {
        let previous = self.active;
        while self.rooms.len() < MIN_ROOMS {
            if self.add().is_err() {
                break;
            }
        }
        if let Some(id) = previous {
            self.active = Some(id);
        }
    }

    /// Store a placement for the active room
    pub fn place_active(&mut self, pos: GridPos) -> bool {
        match self.active_mut() {
            Some(room) => {
                room.grid_position = Some(pos);
                true
            }
            None => false,
        }
    }

    pub fn drafts(&self) -> Vec<RoomDraft> {
        self.rooms.iter().map(RoomDraft::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list_of(n: usize) -> RoomList {
        let mut list = RoomList::new();
        for _ in 0..n {
            list.add().unwrap();
        }
        list
    }

    fn names(list: &RoomList) -> Vec<String> {
        list.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_add_defaults() {
        let mut list = list_of(2);
        let id = list.add().unwrap();
        let room = list.get(id).unwrap();
        assert_eq!(room.name, "Kamer 3");
        assert_eq!(room.beacon_address, "");
        assert_eq!(room.open_compartment, OpenCompartment::None);
        assert_eq!(room.special_action, SpecialAction::None);
        assert_eq!(room.grid_position, Some(GridPos::ORIGIN));
        assert_eq!(list.active_id(), Some(id));
    }

    #[test]
    fn test_button_label_falls_back_to_position() {
        let mut list = list_of(3);
        let room = list.active_mut().unwrap();
        assert_eq!(room.button_label(2), "Kamer 3");
        room.name.clear();
        assert_eq!(room.button_label(0), "Kamer 1");
    }

    #[test]
    fn test_add_beyond_max_is_rejected() {
        let mut list = list_of(MAX_ROOMS);
        assert_eq!(list.add(), Err(CapacityError::TooMany));
        assert_eq!(list.len(), MAX_ROOMS);
    }

    #[test]
    fn test_remove_below_min_is_rejected() {
        let mut list = list_of(MIN_ROOMS);
        let id = list.rooms()[1].id;
        assert_eq!(list.remove(id), Err(CapacityError::TooFew));
        assert_eq!(list.len(), MIN_ROOMS);
    }

    #[test]
    fn test_remove_active_selects_first() {
        let mut list = list_of(5);
        let active = list.rooms()[3].id;
        list.select(active);
        list.remove(active).unwrap();
        assert_eq!(list.active_index(), Some(0));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_remove_inactive_keeps_selection() {
        let mut list = list_of(5);
        let active = list.rooms()[3].id;
        list.select(active);
        list.remove(list.rooms()[1].id).unwrap();
        assert_eq!(list.active_id(), Some(active));
        assert_eq!(list.active_index(), Some(2));
    }

    #[test]
    fn test_reorder_down_lands_after_target() {
        let mut list = list_of(5);
        assert!(list.reorder(1, 3));
        assert_eq!(
            names(&list),
            ["Kamer 1", "Kamer 3", "Kamer 4", "Kamer 2", "Kamer 5"]
        );
    }

    #[test]
    fn test_reorder_up_lands_before_target() {
        let mut list = list_of(5);
        assert!(list.reorder(4, 1));
        assert_eq!(
            names(&list),
            ["Kamer 1", "Kamer 5", "Kamer 2", "Kamer 3", "Kamer 4"]
        );
    }

    #[test]
    fn test_reorder_keeps_active_identity() {
        let mut list = list_of(4);
        let active = list.rooms()[0].id;
        list.select(active);
        list.reorder(0, 3);
        assert_eq!(list.active_id(), Some(active));
        assert_eq!(list.active_index(), Some(3));
    }

    #[test]
    fn test_move_onto_unknown_is_noop() {
        let mut list = list_of(3);
        let other = list_of(4).rooms()[3].id;
        assert!(!list.move_onto(other, list.rooms()[0].id));
    }

    #[test]
    fn test_ensure_minimum_pads_and_keeps_active() {
        let mut list = RoomList::from_drafts(vec![RoomDraft {
            name: "Kelder".into(),
            ..Default::default()
        }]);
        let first = list.active_id();
        list.ensure_minimum();
        assert_eq!(list.len(), MIN_ROOMS);
        assert_eq!(list.active_id(), first);
        assert_eq!(list.rooms()[2].name, "Kamer 3");
    }

    #[test]
    fn test_from_drafts_truncates() {
        let drafts = (0..MAX_ROOMS + 4).map(|_| RoomDraft::default());
        let list = RoomList::from_drafts(drafts);
        assert_eq!(list.len(), MAX_ROOMS);
        assert_eq!(list.active_index(), Some(0));
    }

    #[test]
    fn test_place_active() {
        let mut list = list_of(3);
        let pos = GridPos::new(15, 7).unwrap();
        assert!(list.place_active(pos));
        assert_eq!(list.active().unwrap().grid_position, Some(pos));
        assert!(GridPos::new(16, 0).is_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
        Reorder(usize, usize),
        Select(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            (0usize..25).prop_map(Op::Remove),
            (0usize..25, 0usize..25).prop_map(|(a, b)| Op::Reorder(a, b)),
            (0usize..25).prop_map(Op::Select),
        ]
    }

    proptest! {
        #[test]
        fn prop_length_stays_in_bounds(ops in proptest::collection::vec(op_strategy(), 0..80)) {
            let mut list = list_of(MIN_ROOMS);
            for op in ops {
                match op {
                    Op::Add => { let _ = list.add(); }
                    Op::Remove(i) => {
                        if let Some(id) = list.rooms().get(i).map(|r| r.id) {
                            let _ = list.remove(id);
                        }
                    }
                    Op::Reorder(a, b) => { list.reorder(a, b); }
                    Op::Select(i) => {
                        if let Some(id) = list.rooms().get(i).map(|r| r.id) {
                            list.select(id);
                        }
                    }
                }
                prop_assert!(list.len() >= MIN_ROOMS && list.len() <= MAX_ROOMS);
                prop_assert!(list.active().is_some());
            }
        }

        #[test]
        fn prop_reorder_preserves_membership(n in 3usize..20, from in 0usize..20, to in 0usize..20) {
            let mut list = list_of(n);
            let mut before: Vec<RoomId> = list.iter().map(|r| r.id).collect();
            let moved = before.get(from).copied();
            let changed = list.reorder(from, to);
            let after: Vec<RoomId> = list.iter().map(|r| r.id).collect();
            prop_assert_eq!(after.len(), n);
            if changed {
                prop_assert_eq!(Some(after[to]), moved);
                // everything else keeps its relative order
                let rest_after: Vec<RoomId> = after.iter().copied().filter(|id| Some(*id) != moved).collect();
                before.retain(|id| Some(*id) != moved);
                prop_assert_eq!(rest_after, before);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }
}
