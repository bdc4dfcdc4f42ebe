//! Device persistence and local import/export
//!
//! The device serves the whole configuration as one JSON bundle and takes it
//! back the same way. Loading and importing always replace the full bundle;
//! there is no partial merge.

pub mod wire;

#[cfg(target_arch = "wasm32")]
pub mod client;

use serde_json::Value;
use thiserror::Error;

use crate::banner::{ImageAsset, IngestError};
use crate::history::RunRecord;
use crate::rooms::{GridPos, RoomDraft};
use crate::settings::GlobalSettings;
use wire::{BundleIn, ExportPayload, GlobalSettingsOut, RoomRaw, SavePayload};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Verbinding mislukt: {0}")]
    Transport(String),
    #[error("Server gaf status {0}")]
    Status(u16),
    #[error("Ongeldige JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] IngestError),
}

/// Everything a load or import replaces
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bundle {
    pub rooms: Vec<RoomDraft>,
    pub settings: GlobalSettings,
    pub image: Option<ImageAsset>,
    pub runs: Vec<RunRecord>,
}

fn entry_room(entry: &[Value]) -> Result<Option<RoomRaw>, PersistError> {
    match entry.get(2) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

/// Parse a `GET /load` response. Entries without room data are skipped.
pub fn parse_load(text: &str) -> Result<Bundle, PersistError> {
    let raw: BundleIn = serde_json::from_str(text)?;

    let mut rooms = Vec::new();
    for entry in raw.kamer_list.unwrap_or_default() {
        let Some(room) = entry_room(&entry)? else {
            log::warn!("Skipping room entry without data");
            continue;
        };
        rooms.push(room.into_draft(wire::parse_position(entry.get(1))));
    }

    let bundle = Bundle {
        rooms,
        settings: raw
            .global_settings
            .map(|g| g.into_settings())
            .unwrap_or_default(),
        image: raw.uploaded_image_data.map(ImageAsset::from_data_url),
        runs: raw
            .recordings
            .unwrap_or_default()
            .into_iter()
            .map(RunRecord::from)
            .collect(),
    };
    log::debug!(
        "Loaded {} rooms, {} runs, image: {}",
        bundle.rooms.len(),
        bundle.runs.len(),
        bundle.image.is_some()
    );
    Ok(bundle)
}

/// Parse an exported `settings.json`. Missing room data takes the defaults
/// and a missing position becomes (0,0).
pub fn parse_import(text: &str) -> Result<Bundle, PersistError> {
    let raw: BundleIn = serde_json::from_str(text)?;

    let mut rooms = Vec::new();
    for entry in raw.kamer_list.unwrap_or_default() {
        let room = entry_room(&entry)?.unwrap_or_default();
        let position = match entry.get(1) {
            None | Some(Value::Null) => Some(GridPos::ORIGIN),
            slot => wire::parse_position(slot),
        };
        rooms.push(room.into_draft(position));
    }

    Ok(Bundle {
        rooms,
        settings: raw
            .global_settings
            .map(|g| g.into_settings())
            .unwrap_or_default(),
        image: raw.uploaded_image_data.map(ImageAsset::from_data_url),
        runs: Vec::new(),
    })
}

/// Pretty-printed contents of `settings.json`
pub fn export_json(
    rooms: &[RoomDraft],
    settings: &GlobalSettings,
    image: Option<&ImageAsset>,
) -> Result<String, PersistError> {
    let payload = ExportPayload {
        kamer_list: rooms.iter().map(wire::room_entry).collect(),
        uploaded_image_data: image.map(|i| i.as_str().to_string()),
        global_settings: GlobalSettingsOut::from(settings),
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Body for `POST /save`. `upload` is the downscaled pending upload, not
/// the preview.
pub fn save_json(
    rooms: &[RoomDraft],
    settings: &GlobalSettings,
    upload: Option<&ImageAsset>,
) -> Result<String, PersistError> {
    let payload = SavePayload {
        kamer_list: rooms.iter().map(wire::room_entry).collect(),
        global_settings: GlobalSettingsOut::from(settings),
        uploaded_image_data: upload.map(|i| i.as_str().to_string()),
    };
    Ok(serde_json::to_string(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::{OpenCompartment, SpecialAction};
    use crate::settings::{AudioMode, Difficulty};
    use serde_json::json;

    fn load_body() -> String {
        json!({
            "Recordings": [[[2, 3, 4, 5, 6], false, 2, 60, 2, 5]],
            "kamerList": [
                [null, [1, 2], {"naam-kamer": "Hal", "becon-ip": "10.0.0.7", "antwoord": "rood",
                                "open-compartment": 1, "special-acties": "2"}],
                [null, [], {"naam-kamer": "Kelder"}],
                [null, [3, 3], null]
            ],
            "uploadedImageData": "data:image/png;base64,AAAA",
            "globalSettings": {"moeilijkheid": 3, "start-tijd": 90, "audio": 1}
        })
        .to_string()
    }

    #[test]
    fn test_parse_load() {
        let bundle = parse_load(&load_body()).unwrap();
        assert_eq!(bundle.rooms.len(), 2);
        let hal = &bundle.rooms[0];
        assert_eq!(hal.name, "Hal");
        assert_eq!(hal.grid_position, Some(GridPos { x: 1, y: 2 }));
        assert_eq!(hal.open_compartment, OpenCompartment::First);
        assert_eq!(hal.special_action, SpecialAction::TurnKey);
        assert_eq!(bundle.rooms[1].grid_position, None);
        assert_eq!(bundle.settings.difficulty.level(), 3);
        assert_eq!(bundle.settings.start_time_seconds, Some(90));
        assert_eq!(bundle.settings.audio, AudioMode::Off);
        assert_eq!(bundle.runs.len(), 1);
        assert_eq!(bundle.image.unwrap().as_str(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_parse_load_missing_sections() {
        let bundle = parse_load("{}").unwrap();
        assert!(bundle.rooms.is_empty());
        assert!(bundle.runs.is_empty());
        assert!(bundle.image.is_none());
        assert_eq!(bundle.settings, GlobalSettings::default());

        let bundle = parse_load(r#"{"kamerList": null, "uploadedImageData": null}"#).unwrap();
        assert!(bundle.rooms.is_empty());
    }

    #[test]
    fn test_parse_load_malformed() {
        assert!(matches!(parse_load("<html>"), Err(PersistError::Json(_))));
        assert!(parse_load(r#"{"Recordings": [[1, 2]]}"#).is_err());
    }

    #[test]
    fn test_import_defaults() {
        let text = json!({
            "kamerList": [[null, null, {"naam-kamer": "A"}], [null, [4, 1], null]]
        })
        .to_string();
        let bundle = parse_import(&text).unwrap();
        assert_eq!(bundle.rooms.len(), 2);
        assert_eq!(bundle.rooms[0].grid_position, Some(GridPos::ORIGIN));
        assert_eq!(bundle.rooms[1].name, "");
        assert_eq!(bundle.rooms[1].grid_position, Some(GridPos { x: 4, y: 1 }));
        assert_eq!(bundle.settings, GlobalSettings::default());
    }

    #[test]
    fn test_export_import_round_trip() {
        let rooms = vec![
            RoomDraft {
                name: "Zolder".into(),
                beacon_address: "192.168.4.2".into(),
                accepted_answers: "a, b".into(),
                open_compartment: OpenCompartment::Third,
                special_action: SpecialAction::CutWire,
                grid_position: Some(GridPos { x: 15, y: 7 }),
            },
            RoomDraft {
                name: "Gang".into(),
                grid_position: None,
                ..Default::default()
            },
        ];
        let settings = GlobalSettings {
            difficulty: Difficulty::clamped(4),
            start_time_seconds: None,
            audio: AudioMode::Off,
        };
        let image = ImageAsset::from_data_url("data:image/png;base64,iVBORw0KGgo=");

        let text = export_json(&rooms, &settings, Some(&image)).unwrap();
        let bundle = parse_import(&text).unwrap();
        assert_eq!(bundle.rooms, rooms);
        assert_eq!(bundle.settings, settings);
        assert_eq!(bundle.image, Some(image));
    }

    #[test]
    fn test_save_body() {
        let rooms = vec![RoomDraft {
            name: "Hal".into(),
            grid_position: Some(GridPos::ORIGIN),
            ..Default::default()
        }];
        let body = save_json(&rooms, &GlobalSettings::default(), None).unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["uploadedImageData"], Value::Null);
        assert_eq!(value["kamerList"][0][0], Value::Null);
        assert_eq!(value["kamerList"][0][1], json!([0, 0]));
        assert_eq!(value["kamerList"][0][2]["naam-kamer"], json!("Hal"));
        assert_eq!(value["globalSettings"]["start-tijd"], json!(60));
    }
}
