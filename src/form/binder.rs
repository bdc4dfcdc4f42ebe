//! Two-way binding between form fields and their data targets

use crate::form::schema::FieldKey;
use crate::form::validate::{Rejection, validate_answers, validate_start_time, validate_text};
use crate::rooms::{OpenCompartment, RoomRecord, SpecialAction};
use crate::settings::{AudioMode, Difficulty, GlobalSettings};

/// Result of a successful commit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    /// New text for the input when the committed value differs from what
    /// was typed
    pub field_text: Option<String>,
    /// Committed with an adjustment the operator should be told about
    pub notice: Option<Rejection>,
}

/// Something a settings form can read from and write into
pub trait FormTarget {
    /// Current value of `key` as field text
    fn field_text(&self, key: FieldKey) -> String;

    /// Validate `raw` and store it under `key`. On `Err` the target is
    /// unchanged.
    fn commit(&mut self, key: FieldKey, raw: &str) -> Result<Commit, Rejection>;
}

fn parse_code(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok()
}

impl FormTarget for RoomRecord {
    fn field_text(&self, key: FieldKey) -> String {
        match key {
            FieldKey::RoomName => self.name.clone(),
            FieldKey::BeaconAddress => self.beacon_address.clone(),
            FieldKey::Answers => self.accepted_answers.clone(),
            FieldKey::OpenCompartment => self.open_compartment.code().to_string(),
            FieldKey::SpecialAction => self.special_action.code().to_string(),
            _ => String::new(),
        }
    }

    fn commit(&mut self, key: FieldKey, raw: &str) -> Result<Commit, Rejection> {
        match key {
            FieldKey::RoomName => {
                self.name = validate_text(raw)?.to_string();
                Ok(Commit::default())
            }
            FieldKey::BeaconAddress => {
                self.beacon_address = validate_text(raw)?.to_string();
                Ok(Commit::default())
            }
            FieldKey::Answers => {
                let raw = validate_text(raw)?;
                match validate_answers(raw) {
                    Ok(answers) => {
                        self.accepted_answers = answers.to_string();
                        Ok(Commit::default())
                    }
                    // Overflow keeps the first five
                    Err(rejection @ Rejection::TooManyAnswers { .. }) => {
                        let kept = rejection.replacement();
                        self.accepted_answers = kept.clone();
                        Ok(Commit {
                            field_text: Some(kept),
                            notice: Some(rejection),
                        })
                    }
                    Err(other) => Err(other),
                }
            }
            FieldKey::OpenCompartment => {
                let compartment = parse_code(raw)
                    .and_then(OpenCompartment::from_code)
                    .ok_or_else(|| Rejection::OutOfRange {
                        field: key.wire_key(),
                        previous: self.field_text(key),
                    })?;
                self.open_compartment = compartment;
                Ok(Commit::default())
            }
            FieldKey::SpecialAction => {
                let action = parse_code(raw)
                    .and_then(SpecialAction::from_code)
                    .ok_or_else(|| Rejection::OutOfRange {
                        field: key.wire_key(),
                        previous: self.field_text(key),
                    })?;
                self.special_action = action;
                Ok(Commit::default())
            }
            _ => Err(Rejection::Unsupported {
                field: key.wire_key(),
            }),
        }
    }
}

impl FormTarget for GlobalSettings {
    fn field_text(&self, key: FieldKey) -> String {
        match key {
            FieldKey::Difficulty => self.difficulty.level().to_string(),
            FieldKey::StartTime => self.start_time_text(),
            FieldKey::Audio => self.audio.code().to_string(),
            _ => String::new(),
        }
    }

    fn commit(&mut self, key: FieldKey, raw: &str) -> Result<Commit, Rejection> {
        match key {
            FieldKey::Difficulty => {
                let difficulty = parse_code(raw)
                    .and_then(Difficulty::new)
                    .ok_or_else(|| Rejection::OutOfRange {
                        field: key.wire_key(),
                        previous: self.field_text(key),
                    })?;
                self.difficulty = difficulty;
                Ok(Commit::default())
            }
            FieldKey::StartTime => {
                let raw = validate_text(raw)?;
                let seconds = validate_start_time(raw, self.start_time_seconds)?;
                self.start_time_seconds = seconds;
                let normalized = self.start_time_text();
                Ok(Commit {
                    field_text: (normalized != raw).then_some(normalized),
                    notice: None,
                })
            }
            FieldKey::Audio => {
                let audio = parse_code(raw)
                    .and_then(AudioMode::from_code)
                    .ok_or_else(|| Rejection::OutOfRange {
                        field: key.wire_key(),
                        previous: self.field_text(key),
                    })?;
                self.audio = audio;
                Ok(Commit::default())
            }
            _ => Err(Rejection::Unsupported {
                field: key.wire_key(),
            }),
        }
    }
}
