//! JSON shapes exchanged with the device and the export file
//!
//! Field names follow the device firmware. Values written by older pages
//! may be numbers or numeric strings, so decoding is lenient per field.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::history::RunRecord;
use crate::rooms::{GridPos, OpenCompartment, RoomDraft, SpecialAction};
use crate::settings::{AudioMode, Difficulty, GlobalSettings};

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Integer from a number or numeric string
pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn lenient_code<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_i64(&value)
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or(0))
}

/// Room fields as stored on the device
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomRaw {
    #[serde(rename = "naam-kamer", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "becon-ip", default, deserialize_with = "lenient_string")]
    pub beacon: String,
    #[serde(rename = "antwoord", default, deserialize_with = "lenient_string")]
    pub answers: String,
    #[serde(rename = "open-compartment", default, deserialize_with = "lenient_code")]
    pub open_compartment: u8,
    #[serde(rename = "special-acties", default, deserialize_with = "lenient_code")]
    pub special_action: u8,
}

impl RoomRaw {
    pub fn into_draft(self, grid_position: Option<GridPos>) -> RoomDraft {
        let open_compartment = OpenCompartment::from_code(self.open_compartment).unwrap_or_else(|| {
            log::warn!("Unknown compartment code {}", self.open_compartment);
            OpenCompartment::None
        });
        let special_action = SpecialAction::from_code(self.special_action).unwrap_or_else(|| {
            log::warn!("Unknown special action code {}", self.special_action);
            SpecialAction::None
        });
        RoomDraft {
            name: self.name,
            beacon_address: self.beacon,
            accepted_answers: self.answers,
            open_compartment,
            special_action,
            grid_position,
        }
    }
}

impl From<&RoomDraft> for RoomRaw {
    fn from(draft: &RoomDraft) -> Self {
        Self {
            name: draft.name.clone(),
            beacon: draft.beacon_address.clone(),
            answers: draft.accepted_answers.clone(),
            open_compartment: draft.open_compartment.code(),
            special_action: draft.special_action.code(),
        }
    }
}

/// Position slot of a room entry: `[x, y]` or empty
pub fn parse_position(value: Option<&Value>) -> Option<GridPos> {
    let items = value?.as_array()?;
    if items.len() != 2 {
        return None;
    }
    let x = value_as_i64(&items[0])?;
    let y = value_as_i64(&items[1])?;
    let pos = u32::try_from(x)
        .ok()
        .zip(u32::try_from(y).ok())
        .and_then(|(x, y)| GridPos::new(x, y));
    if pos.is_none() {
        log::warn!("Ignoring out-of-grid position [{}, {}]", x, y);
    }
    pos
}

pub fn position_value(pos: Option<GridPos>) -> Vec<u8> {
    match pos {
        Some(p) => vec![p.x, p.y],
        None => Vec::new(),
    }
}

/// One `kamerList` entry as written: `[null, [x, y] | [], room]`
pub type RoomEntryOut = ((), Vec<u8>, RoomRaw);

pub fn room_entry(draft: &RoomDraft) -> RoomEntryOut {
    ((), position_value(draft.grid_position), RoomRaw::from(draft))
}

/// Global settings as stored on the device
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GlobalSettingsRaw {
    #[serde(rename = "moeilijkheid", default)]
    pub difficulty: Value,
    #[serde(rename = "start-tijd", default)]
    pub start_time: Value,
    #[serde(rename = "audio", default)]
    pub audio: Value,
}

impl GlobalSettingsRaw {
    /// Missing or unreadable keys take their defaults; an empty start time
    /// stays empty.
    pub fn into_settings(self) -> GlobalSettings {
        let defaults = GlobalSettings::default();
        let difficulty = value_as_i64(&self.difficulty)
            .map(Difficulty::clamped)
            .unwrap_or(defaults.difficulty);
        let start_time_seconds = match &self.start_time {
            Value::String(s) if s.trim().is_empty() => None,
            other => value_as_i64(other)
                .and_then(|v| u32::try_from(v).ok())
                .or(defaults.start_time_seconds),
        };
        let audio = value_as_i64(&self.audio)
            .and_then(|v| u8::try_from(v).ok())
            .and_then(AudioMode::from_code)
            .unwrap_or(defaults.audio);
        GlobalSettings {
            difficulty,
            start_time_seconds,
            audio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSettingsOut {
    #[serde(rename = "moeilijkheid")]
    pub difficulty: u8,
    /// Number, or `""` when left empty
    #[serde(rename = "start-tijd")]
    pub start_time: Value,
    pub audio: u8,
}

impl From<&GlobalSettings> for GlobalSettingsOut {
    fn from(settings: &GlobalSettings) -> Self {
        Self {
            difficulty: settings.difficulty.level(),
            start_time: settings
                .start_time_seconds
                .map(Value::from)
                .unwrap_or_else(|| Value::String(String::new())),
            audio: settings.audio.code(),
        }
    }
}

/// `[minutes[], succeeded, errors, budget, difficulty, maxRooms]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecordRaw(pub Vec<f64>, pub bool, pub u32, pub f64, pub u8, pub u32);

impl From<RunRecordRaw> for RunRecord {
    fn from(raw: RunRecordRaw) -> Self {
        let RunRecordRaw(per_room_minutes, succeeded, error_count, total_budget_minutes, difficulty, max_rooms) =
            raw;
        Self {
            per_room_minutes,
            succeeded,
            error_count,
            total_budget_minutes,
            difficulty,
            max_rooms,
        }
    }
}

/// Body of `GET /load` and of an export file (which has no recordings)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleIn {
    #[serde(rename = "Recordings", default)]
    pub recordings: Option<Vec<RunRecordRaw>>,
    #[serde(rename = "kamerList", default)]
    pub kamer_list: Option<Vec<Vec<Value>>>,
    #[serde(rename = "uploadedImageData", default)]
    pub uploaded_image_data: Option<String>,
    #[serde(rename = "globalSettings", default)]
    pub global_settings: Option<GlobalSettingsRaw>,
}

/// Body of `POST /save`
#[derive(Debug, Clone, Serialize)]
pub struct SavePayload {
    #[serde(rename = "kamerList")]
    pub kamer_list: Vec<RoomEntryOut>,
    #[serde(rename = "globalSettings")]
    pub global_settings: GlobalSettingsOut,
    #[serde(rename = "uploadedImageData")]
    pub uploaded_image_data: Option<String>,
}

/// Contents of `settings.json`
#[derive(Debug, Clone, Serialize)]
pub struct ExportPayload {
    #[serde(rename = "kamerList")]
    pub kamer_list: Vec<RoomEntryOut>,
    #[serde(rename = "uploadedImageData")]
    pub uploaded_image_data: Option<String>,
    #[serde(rename = "globalSettings")]
    pub global_settings: GlobalSettingsOut,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_raw_lenient() {
        let raw: RoomRaw = serde_json::from_value(json!({
            "naam-kamer": "Kelder",
            "becon-ip": null,
            "open-compartment": "2",
            "special-acties": 1
        }))
        .unwrap();
        assert_eq!(raw.name, "Kelder");
        assert_eq!(raw.beacon, "");
        assert_eq!(raw.answers, "");
        assert_eq!(raw.open_compartment, 2);
        assert_eq!(raw.special_action, 1);
    }

    #[test]
    fn test_room_entry_shape() {
        let draft = RoomDraft {
            name: "Hal".into(),
            grid_position: Some(GridPos { x: 3, y: 4 }),
            ..Default::default()
        };
        let value = serde_json::to_value(room_entry(&draft)).unwrap();
        assert_eq!(
            value,
            json!([null, [3, 4], {
                "naam-kamer": "Hal",
                "becon-ip": "",
                "antwoord": "",
                "open-compartment": 0,
                "special-acties": 0
            }])
        );

        let unplaced = RoomDraft::default();
        let value = serde_json::to_value(room_entry(&unplaced)).unwrap();
        assert_eq!(value[1], json!([]));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(Some(&json!([2, 5]))), Some(GridPos { x: 2, y: 5 }));
        assert_eq!(parse_position(Some(&json!([]))), None);
        assert_eq!(parse_position(Some(&json!(null))), None);
        assert_eq!(parse_position(Some(&json!([20, 1]))), None);
        assert_eq!(parse_position(None), None);
    }

    #[test]
    fn test_global_settings_defaults() {
        let settings = GlobalSettingsRaw::default().into_settings();
        assert_eq!(settings, GlobalSettings::default());

        let raw: GlobalSettingsRaw = serde_json::from_value(json!({
            "moeilijkheid": 4,
            "start-tijd": "",
            "audio": "1"
        }))
        .unwrap();
        let settings = raw.into_settings();
        assert_eq!(settings.difficulty.level(), 4);
        assert_eq!(settings.start_time_seconds, None);
        assert_eq!(settings.audio, AudioMode::Off);
    }

    #[test]
    fn test_global_settings_out() {
        let mut settings = GlobalSettings::default();
        let value = serde_json::to_value(GlobalSettingsOut::from(&settings)).unwrap();
        assert_eq!(value, json!({"moeilijkheid": 2, "start-tijd": 60, "audio": 0}));
        settings.start_time_seconds = None;
        let value = serde_json::to_value(GlobalSettingsOut::from(&settings)).unwrap();
        assert_eq!(value["start-tijd"], json!(""));
    }

    #[test]
    fn test_run_record_tuple() {
        let raw: RunRecordRaw = serde_json::from_value(json!([[2, 3, 4.5], true, 1, 60, 3, 5])).unwrap();
        let record = RunRecord::from(raw);
        assert_eq!(record.per_room_minutes, vec![2.0, 3.0, 4.5]);
        assert!(record.succeeded);
        assert_eq!(record.max_rooms, 5);
    }
}
