//! Run history
//!
//! Past runs reported by the device, one selected at a time. Provides the
//! derived statistics and the bar chart geometry; drawing happens in
//! `ui::chart`.

use crate::consts::MAX_DIFFICULTY;

/// A finished (or aborted) game, newest first in the history
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// Minutes spent per room, in play order
    pub per_room_minutes: Vec<f64>,
    pub succeeded: bool,
    pub error_count: u32,
    /// Minutes on the bomb timer at start
    pub total_budget_minutes: f64,
    pub difficulty: u8,
    pub max_rooms: u32,
}

/// Run list with a selected entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunHistory {
    records: Vec<RunRecord>,
    current: usize,
}

impl RunHistory {
    pub fn new(records: Vec<RunRecord>) -> Self {
        Self {
            records,
            current: 0,
        }
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&RunRecord> {
        self.records.get(self.current)
    }

    /// Switch the displayed run. Out-of-range indices are ignored.
    pub fn select_run(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.current = index;
            true
        } else {
            false
        }
    }
}

/// Button caption for the run at `index` (0 = most recent)
pub fn run_label(index: usize) -> String {
    if index == 0 {
        "Afgelopen run".to_string()
    } else {
        format!("{} Runs geleden", index)
    }
}

pub fn outcome_mark(succeeded: bool) -> &'static str {
    if succeeded { "✓" } else { "✗" }
}

/// Format minutes as `M min [S sec]`, rounded to whole seconds
pub fn format_minutes(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0).round() as i64;
    let sign = if total_seconds < 0 { "-" } else { "" };
    let total_seconds = total_seconds.abs();
    let min = total_seconds / 60;
    let sec = total_seconds % 60;
    if sec > 0 {
        format!("{sign}{min} min {sec} sec")
    } else {
        format!("{sign}{min} min")
    }
}

/// Numeric statistics for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub total: f64,
    pub fastest: Option<f64>,
    pub slowest: Option<f64>,
    /// Rounded to one decimal minute
    pub average: Option<f64>,
    pub remaining: f64,
}

impl RunStats {
    pub fn compute(record: &RunRecord) -> Self {
        let values = &record.per_room_minutes;
        let total: f64 = values.iter().sum();
        let fastest = values.iter().copied().reduce(f64::min);
        let slowest = values.iter().copied().reduce(f64::max);
        let average = (!values.is_empty())
            .then(|| ((total / values.len() as f64) * 10.0).round() / 10.0);
        Self {
            total,
            fastest,
            slowest,
            average,
            remaining: record.total_budget_minutes - total,
        }
    }
}

/// Everything shown in the statistics panel, pre-formatted
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: String,
    pub fastest: String,
    pub slowest: String,
    pub average: String,
    pub remaining: String,
    pub outcome: &'static str,
    pub errors: String,
    pub difficulty: String,
    pub bomb_time: String,
    pub rooms: String,
}

impl RunSummary {
    pub fn new(record: &RunRecord) -> Self {
        let stats = RunStats::compute(record);
        let fmt_opt = |v: Option<f64>| v.map(format_minutes).unwrap_or_else(|| "-".into());
        Self {
            total: format_minutes(stats.total),
            fastest: fmt_opt(stats.fastest),
            slowest: fmt_opt(stats.slowest),
            average: fmt_opt(stats.average),
            remaining: format_minutes(stats.remaining),
            outcome: if record.succeeded {
                "Gehaald"
            } else {
                "Niet gehaald"
            },
            errors: record.error_count.to_string(),
            difficulty: format!("{}/{}", record.difficulty, MAX_DIFFICULTY),
            bomb_time: format_minutes(record.total_budget_minutes),
            rooms: format!("{}/{}", record.per_room_minutes.len(), record.max_rooms),
        }
    }
}

// Chart margins (CSS pixels)
const AXIS_LEFT: f64 = 40.0;
const PAD_Y: f64 = 20.0;
const ROOM_LABEL_OFFSET: f64 = 11.0;
const VALUE_LABEL_OFFSET: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub value: u32,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Centre x for the labels
    pub label_x: f64,
    pub room_label: String,
    pub room_label_y: f64,
    pub value_label: String,
    pub value_label_y: f64,
}

/// Bar chart geometry for one run, in CSS pixels
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub y_max: f64,
    pub axis_x: f64,
    pub gridlines: Vec<Gridline>,
    pub bars: Vec<Bar>,
}

impl ChartLayout {
    pub fn compute(values: &[f64], width: f64, height: f64) -> Self {
        let y_max = values.iter().copied().fold(0.0, f64::max) + 2.0;
        let plot_height = (height - 2.0 * PAD_Y).max(0.0);
        let y_for = |v: f64| height - (v / y_max) * plot_height - PAD_Y;

        let gridlines = (0..=y_max.floor() as u32)
            .map(|value| Gridline {
                value,
                y: y_for(value as f64),
            })
            .collect();

        let n = values.len().max(1) as f64;
        let bar_width = width / n * 0.6;
        let spacing = width / n * 0.4;
        let bars = values
            .iter()
            .enumerate()
            .map(|(i, &val)| {
                let bar_height = (val / y_max) * plot_height;
                let x = i as f64 * (bar_width + spacing) + spacing / 2.0 + AXIS_LEFT;
                let y = height - bar_height - PAD_Y;
                Bar {
                    x,
                    y,
                    width: bar_width,
                    height: bar_height,
                    label_x: x + bar_width / 2.0,
                    room_label: format!("Kamer {}", i + 1),
                    room_label_y: height - ROOM_LABEL_OFFSET,
                    value_label: format!("{} min", val),
                    value_label_y: y - VALUE_LABEL_OFFSET,
                }
            })
            .collect();

        Self {
            width,
            height,
            y_max,
            axis_x: AXIS_LEFT,
            gridlines,
            bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunRecord {
        RunRecord {
            per_room_minutes: vec![2.0, 3.0, 4.0, 5.0, 6.0],
            succeeded: false,
            error_count: 2,
            total_budget_minutes: 60.0,
            difficulty: 2,
            max_rooms: 5,
        }
    }

    #[test]
    fn test_stats() {
        let stats = RunStats::compute(&sample());
        assert_eq!(stats.total, 20.0);
        assert_eq!(stats.fastest, Some(2.0));
        assert_eq!(stats.slowest, Some(6.0));
        assert_eq!(stats.average, Some(4.0));
        assert_eq!(stats.remaining, 40.0);
    }

    #[test]
    fn test_summary_formatting() {
        let summary = RunSummary::new(&sample());
        assert_eq!(summary.total, "20 min");
        assert_eq!(summary.fastest, "2 min");
        assert_eq!(summary.slowest, "6 min");
        assert_eq!(summary.average, "4 min");
        assert_eq!(summary.remaining, "40 min");
        assert_eq!(summary.outcome, "Niet gehaald");
        assert_eq!(summary.difficulty, "2/5");
        assert_eq!(summary.bomb_time, "60 min");
        assert_eq!(summary.rooms, "5/5");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0.0), "0 min");
        assert_eq!(format_minutes(2.5), "2 min 30 sec");
        assert_eq!(format_minutes(3.3), "3 min 18 sec");
        assert_eq!(format_minutes(1.0 / 120.0), "0 min 1 sec");
        assert_eq!(format_minutes(-1.5), "-1 min 30 sec");
    }

    #[test]
    fn test_average_rounded_first() {
        let mut record = sample();
        record.per_room_minutes = vec![1.0, 2.0, 2.0];
        let stats = RunStats::compute(&record);
        assert_eq!(stats.average, Some(1.7));
        assert_eq!(format_minutes(stats.average.unwrap()), "1 min 42 sec");
    }

    #[test]
    fn test_empty_run() {
        let mut record = sample();
        record.per_room_minutes.clear();
        let summary = RunSummary::new(&record);
        assert_eq!(summary.total, "0 min");
        assert_eq!(summary.fastest, "-");
        assert_eq!(summary.remaining, "60 min");
        let layout = ChartLayout::compute(&[], 400.0, 200.0);
        assert!(layout.bars.is_empty());
        assert_eq!(layout.y_max, 2.0);
    }

    #[test]
    fn test_select_run() {
        let mut history = RunHistory::new(vec![sample(), sample()]);
        assert!(history.select_run(1));
        assert_eq!(history.current_index(), 1);
        assert!(!history.select_run(2));
        assert_eq!(history.current_index(), 1);
        assert!(RunHistory::default().current().is_none());
    }

    #[test]
    fn test_run_labels() {
        assert_eq!(run_label(0), "Afgelopen run");
        assert_eq!(run_label(3), "3 Runs geleden");
        assert_eq!(outcome_mark(true), "✓");
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_chart_layout() {
        let layout = ChartLayout::compute(&[2.0, 3.0, 4.0, 5.0, 6.0], 500.0, 240.0);
        assert_eq!(layout.y_max, 8.0);
        assert_eq!(layout.gridlines.len(), 9);
        // gridline 0 sits on the baseline, the top one at the padding
        assert!(approx(layout.gridlines[0].y, 220.0));
        assert!(approx(layout.gridlines[8].y, 20.0));

        let last = layout.bars.last().unwrap();
        assert!(approx(last.width, 60.0));
        assert!(approx(last.x, 4.0 * 100.0 + 20.0 + 40.0));
        assert!(approx(last.height, 150.0));
        assert!(approx(last.y, 70.0));
        assert_eq!(last.room_label, "Kamer 5");
        assert_eq!(last.value_label, "6 min");
    }
}
