//! Placement grid
//!
//! A fixed 16x8 grid over the banner image. The highlighted cell always
//! mirrors the active room's stored position, so there is exactly one
//! marker on screen no matter how many rooms have a placement.

use crate::consts::{GRID_COLS, GRID_ROWS};
use crate::rooms::{GridPos, RoomList};

/// Cell placement in percent of the grid container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    pub pos: GridPos,
    pub left_pct: f32,
    pub top_pct: f32,
    pub width_pct: f32,
    pub height_pct: f32,
}

/// Axis tick label placement in percent of the grid container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLabel {
    pub value: u32,
    /// Centre of the column (x axis) or row (y axis)
    pub offset_pct: f32,
}

/// Record a click on cell (x, y) as the active room's placement.
/// Returns the stored position, or `None` when nothing could be placed.
pub fn select(rooms: &mut RoomList, x: u32, y: u32) -> Option<GridPos> {
    if rooms.is_empty() {
        return None;
    }
    let pos = GridPos::new(x, y)?;
    rooms.place_active(pos).then_some(pos)
}

/// The single cell to highlight
pub fn active_cell(rooms: &RoomList) -> Option<GridPos> {
    rooms.active().and_then(|r| r.grid_position)
}

/// All cells, column by column
pub fn cells() -> impl Iterator<Item = CellLayout> {
    let width_pct = 100.0 / GRID_COLS as f32;
    let height_pct = 100.0 / GRID_ROWS as f32;
    (0..GRID_COLS).flat_map(move |x| {
        (0..GRID_ROWS).filter_map(move |y| {
            let pos = GridPos::new(x, y)?;
            Some(CellLayout {
                pos,
                left_pct: x as f32 * width_pct,
                top_pct: y as f32 * height_pct,
                width_pct,
                height_pct,
            })
        })
    })
}

pub fn x_axis_labels() -> Vec<AxisLabel> {
    (0..GRID_COLS)
        .map(|x| AxisLabel {
            value: x,
            offset_pct: (x as f32 + 0.5) / GRID_COLS as f32 * 100.0,
        })
        .collect()
}

pub fn y_axis_labels() -> Vec<AxisLabel> {
    (0..GRID_ROWS)
        .map(|y| AxisLabel {
            value: y,
            offset_pct: (y as f32 + 0.5) / GRID_ROWS as f32 * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> RoomList {
        let mut list = RoomList::new();
        for _ in 0..3 {
            list.add().unwrap();
        }
        list
    }

    #[test]
    fn test_cell_count_and_layout() {
        let all: Vec<_> = cells().collect();
        assert_eq!(all.len(), 128);
        let last = all.last().unwrap();
        assert_eq!(last.pos, GridPos { x: 15, y: 7 });
        assert!((last.left_pct - 93.75).abs() < 1e-4);
        assert!((last.top_pct - 87.5).abs() < 1e-4);
    }

    #[test]
    fn test_select_follows_active_room() {
        let mut list = rooms();
        let first = list.rooms()[0].id;
        let second = list.rooms()[1].id;

        list.select(first);
        assert_eq!(select(&mut list, 4, 2), Some(GridPos { x: 4, y: 2 }));
        list.select(second);
        assert_eq!(select(&mut list, 9, 6), Some(GridPos { x: 9, y: 6 }));

        // switching back shows only the first room's cell
        list.select(first);
        assert_eq!(active_cell(&list), Some(GridPos { x: 4, y: 2 }));
        list.select(second);
        assert_eq!(active_cell(&list), Some(GridPos { x: 9, y: 6 }));
    }

    #[test]
    fn test_select_on_empty_list_is_noop() {
        let mut list = RoomList::new();
        assert_eq!(select(&mut list, 1, 1), None);
        assert_eq!(active_cell(&list), None);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut list = rooms();
        assert_eq!(select(&mut list, 16, 0), None);
        assert_eq!(active_cell(&list), Some(GridPos::ORIGIN));
    }

    #[test]
    fn test_axis_labels_centred() {
        let xs = x_axis_labels();
        assert_eq!(xs.len(), 16);
        assert!((xs[0].offset_pct - 3.125).abs() < 1e-4);
        let ys = y_axis_labels();
        assert_eq!(ys.len(), 8);
        assert!((ys[7].offset_pct - 93.75).abs() < 1e-4);
    }
}
