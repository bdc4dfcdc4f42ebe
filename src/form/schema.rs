//! Field schemas for the room and global settings forms

use crate::consts::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::rooms::{OpenCompartment, SpecialAction};
use crate::settings::{AudioMode, Difficulty};

/// Every editable field, across both forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    RoomName,
    BeaconAddress,
    Answers,
    OpenCompartment,
    SpecialAction,
    Difficulty,
    StartTime,
    Audio,
}

impl FieldKey {
    pub const ALL: [FieldKey; 8] = [
        FieldKey::RoomName,
        FieldKey::BeaconAddress,
        FieldKey::Answers,
        FieldKey::OpenCompartment,
        FieldKey::SpecialAction,
        FieldKey::Difficulty,
        FieldKey::StartTime,
        FieldKey::Audio,
    ];

    /// Key used by the device JSON and the `data-key` attribute
    pub fn wire_key(self) -> &'static str {
        match self {
            FieldKey::RoomName => "naam-kamer",
            FieldKey::BeaconAddress => "becon-ip",
            FieldKey::Answers => "antwoord",
            FieldKey::OpenCompartment => "open-compartment",
            FieldKey::SpecialAction => "special-acties",
            FieldKey::Difficulty => "moeilijkheid",
            FieldKey::StartTime => "start-tijd",
            FieldKey::Audio => "audio",
        }
    }

    pub fn from_wire_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.wire_key() == key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: u8,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Select(Vec<SelectOption>),
    Range { min: u8, max: u8, step: u8 },
}

impl FieldKind {
    /// Range and select values are numeric on commit
    pub fn is_numeric(&self) -> bool {
        !matches!(self, FieldKind::Text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Tooltip markup
    pub help: Option<String>,
}

pub fn room_schema() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            key: FieldKey::RoomName,
            label: "Naam kamer",
            kind: FieldKind::Text,
            help: Some("De naam van de kamer".into()),
        },
        FieldSpec {
            key: FieldKey::BeaconAddress,
            label: "Beacon ip",
            kind: FieldKind::Text,
            help: Some("Het adres van de beacon".into()),
        },
        FieldSpec {
            key: FieldKey::Answers,
            label: "Antwoord",
            kind: FieldKind::Text,
            help: Some(
                "Welke antwoorden goed zijn <br> Gebruik een ',' om meerdere antwoorden in te vullen <br>"
                    .into(),
            ),
        },
        FieldSpec {
            key: FieldKey::OpenCompartment,
            label: "Open compartment",
            kind: FieldKind::Select(
                OpenCompartment::ALL
                    .iter()
                    .map(|c| SelectOption {
                        value: c.code(),
                        label: c.label(),
                    })
                    .collect(),
            ),
            help: Some("Welke ruimte er open gaat na het oplossen van de puzzel".into()),
        },
        FieldSpec {
            key: FieldKey::SpecialAction,
            label: "Speciale acties",
            kind: FieldKind::Select(
                SpecialAction::ALL
                    .iter()
                    .map(|a| SelectOption {
                        value: a.code(),
                        label: a.label(),
                    })
                    .collect(),
            ),
            help: Some("Extra actie die uitgevoerd moet worden".into()),
        },
    ]
}

pub fn global_schema() -> Vec<FieldSpec> {
    let mut difficulty_help =
        String::from("Hoe hoger de moeilijkheid, hoe strenger de straf bij foute antwoorden.<br><br>");
    for level in MIN_DIFFICULTY..=MAX_DIFFICULTY {
        if let Some(d) = Difficulty::new(level) {
            difficulty_help.push_str(&format!("<b>{}</b>: {}<br>", level, d.penalty()));
        }
    }

    vec![
        FieldSpec {
            key: FieldKey::Difficulty,
            label: "Moeilijkheid",
            kind: FieldKind::Range {
                min: MIN_DIFFICULTY,
                max: MAX_DIFFICULTY,
                step: 1,
            },
            help: Some(difficulty_help),
        },
        FieldSpec {
            key: FieldKey::StartTime,
            label: "Start tijd",
            kind: FieldKind::Text,
            help: Some("Hoeveel tijd er is om het spel op te lossen".into()),
        },
        FieldSpec {
            key: FieldKey::Audio,
            label: "Audio",
            kind: FieldKind::Select(
                AudioMode::ALL
                    .iter()
                    .map(|m| SelectOption {
                        value: m.code(),
                        label: m.label(),
                    })
                    .collect(),
            ),
            help: Some("Geluidseffecten en getik aan of uit".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys_round_trip() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::from_wire_key(key.wire_key()), Some(key));
        }
        assert_eq!(FieldKey::from_wire_key("onbekend"), None);
    }

    #[test]
    fn test_room_schema_fields() {
        let keys: Vec<_> = room_schema().iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            [
                FieldKey::RoomName,
                FieldKey::BeaconAddress,
                FieldKey::Answers,
                FieldKey::OpenCompartment,
                FieldKey::SpecialAction
            ]
        );
    }

    #[test]
    fn test_global_schema_difficulty_range() {
        let schema = global_schema();
        assert_eq!(
            schema[0].kind,
            FieldKind::Range {
                min: 1,
                max: 5,
                step: 1
            }
        );
        let help = schema[0].help.as_deref().unwrap();
        assert!(help.contains("<b>4</b>: -15 min"));
        assert!(!schema[1].kind.is_numeric());
        assert!(schema[2].kind.is_numeric());
    }
}
