//! Edit-time validation for form fields
//!
//! Each check is a pure function: input text in, accepted value or a
//! [`Rejection`] out. A rejection carries the text the field should show
//! afterwards; its `Display` is the message shown to the operator.

use thiserror::Error;

use crate::consts::{MAX_ANSWERS, MAX_TEXT_LEN};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Mag maximaal {} tekens bevatten.", MAX_TEXT_LEN)]
    TooLong { truncated: String },
    #[error("Maximaal {} antwoorden toegestaan.", MAX_ANSWERS)]
    TooManyAnswers { kept: String },
    #[error("Start tijd moet een positief geheel getal zijn.")]
    NotAnInteger { previous: String },
    #[error("Start tijd mag niet negatief zijn.")]
    Negative,
    #[error("Ongeldige waarde voor {field}.")]
    OutOfRange { field: &'static str, previous: String },
    #[error("Veld {field} hoort niet bij dit formulier.")]
    Unsupported { field: &'static str },
}

impl Rejection {
    /// Text to put back into the field
    pub fn replacement(&self) -> String {
        match self {
            Rejection::TooLong { truncated } => truncated.clone(),
            Rejection::TooManyAnswers { kept } => kept.clone(),
            Rejection::NotAnInteger { previous } => previous.clone(),
            Rejection::OutOfRange { previous, .. } => previous.clone(),
            Rejection::Negative | Rejection::Unsupported { .. } => String::new(),
        }
    }
}

/// Free text is capped at 50 characters
pub fn validate_text(raw: &str) -> Result<&str, Rejection> {
    if raw.chars().count() > MAX_TEXT_LEN {
        let truncated = raw.chars().take(MAX_TEXT_LEN).collect();
        return Err(Rejection::TooLong { truncated });
    }
    Ok(raw)
}

/// Comma-split, trimmed, empties dropped
pub fn split_answers(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

/// At most five answers. On overflow the rejection holds the first five,
/// re-joined with ", ".
pub fn validate_answers(raw: &str) -> Result<&str, Rejection> {
    let answers = split_answers(raw);
    if answers.len() > MAX_ANSWERS {
        let kept = answers[..MAX_ANSWERS].join(", ");
        return Err(Rejection::TooManyAnswers { kept });
    }
    Ok(raw)
}

/// Start time in seconds: empty is allowed, negatives clear the field,
/// anything else that is not all digits reverts to `previous`.
pub fn validate_start_time(raw: &str, previous: Option<u32>) -> Result<Option<u32>, Rejection> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.parse::<i64>().is_ok_and(|v| v < 0) {
        return Err(Rejection::Negative);
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::NotAnInteger {
            previous: previous.map(|p| p.to_string()).unwrap_or_default(),
        });
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| Rejection::NotAnInteger {
            previous: previous.map(|p| p.to_string()).unwrap_or_default(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_limit() {
        assert_eq!(validate_text("Kelder"), Ok("Kelder"));
        let long = "x".repeat(51);
        let err = validate_text(&long).unwrap_err();
        assert_eq!(err.replacement(), "x".repeat(50));
        assert_eq!(err.to_string(), "Mag maximaal 50 tekens bevatten.");
    }

    #[test]
    fn test_text_limit_counts_chars() {
        let accents = "é".repeat(50);
        assert!(validate_text(&accents).is_ok());
    }

    #[test]
    fn test_split_answers() {
        assert_eq!(split_answers(" a, ,b ,, c "), ["a", "b", "c"]);
        assert!(split_answers("").is_empty());
    }

    #[test]
    fn test_sixth_answer_dropped() {
        let err = validate_answers("a, b ,c,d,e,f").unwrap_err();
        assert_eq!(err.replacement(), "a, b, c, d, e");
        assert_eq!(split_answers(&err.replacement()), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_five_answers_accepted() {
        assert_eq!(validate_answers("a,b,c,d,e"), Ok("a,b,c,d,e"));
    }

    #[test]
    fn test_start_time_negative_clears() {
        let err = validate_start_time("-3", Some(60)).unwrap_err();
        assert_eq!(err, Rejection::Negative);
        assert_eq!(err.replacement(), "");
    }

    #[test]
    fn test_start_time_integer() {
        assert_eq!(validate_start_time("45", Some(60)), Ok(Some(45)));
        assert_eq!(validate_start_time(" 007 ", None), Ok(Some(7)));
    }

    #[test]
    fn test_start_time_empty() {
        assert_eq!(validate_start_time("", Some(60)), Ok(None));
        assert_eq!(validate_start_time("   ", Some(60)), Ok(None));
    }

    #[test]
    fn test_start_time_garbage_reverts() {
        let err = validate_start_time("4a", Some(90)).unwrap_err();
        assert_eq!(err.replacement(), "90");
        let err = validate_start_time("1.5", None).unwrap_err();
        assert_eq!(err.replacement(), "");
    }
}
