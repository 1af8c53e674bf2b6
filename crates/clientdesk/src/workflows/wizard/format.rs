use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Identifies a field formatter. Wire form matches the formatter ids the
/// console attaches to fields ("phone", "national-id").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatterId {
    Phone,
    NationalId,
}

impl FormatterId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::NationalId => "national-id",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "phone" => Some(Self::Phone),
            "national-id" => Some(Self::NationalId),
            _ => None,
        }
    }
}

/// Outcome of formatting a raw input. `formatted` always carries the best
/// value the formatter could produce; a rejection is reported in-band, and
/// the caller decides what to write back to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatResult {
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FormatResult {
    fn clean(formatted: String) -> Self {
        Self {
            formatted,
            error: None,
        }
    }

    fn rejected(formatted: String, error: impl Into<String>) -> Self {
        Self {
            formatted,
            error: Some(error.into()),
        }
    }
}

const PHONE_MAX_DIGITS: usize = 10;
const NATIONAL_ID_MAX_DIGITS: usize = 9;

/// Normalize a raw keystroke-level input for the given formatter. Pure:
/// no session state is touched.
pub fn format(id: FormatterId, raw: &str) -> FormatResult {
    match id {
        FormatterId::Phone => format_phone(raw),
        FormatterId::NationalId => format_digits(raw, NATIONAL_ID_MAX_DIGITS, "national id"),
    }
}

/// Check a candidate identification value against the catalog's pattern
/// for its id type. Unknown id types never validate.
pub fn validate(catalog: &Catalog, id_type: &str, value: &str) -> bool {
    catalog
        .id_pattern(id_type)
        .map(|pattern| pattern.is_match(value))
        .unwrap_or(false)
}

/// Phone numbers keep digits only and regroup as `3 3 rest`, capped at ten
/// digits. Spaces are separators we may have inserted ourselves, so they
/// strip silently; any other character is a rejection.
fn format_phone(raw: &str) -> FormatResult {
    let (digits, rejected, overflow) = take_digits(raw, PHONE_MAX_DIGITS);
    let mut formatted = String::with_capacity(digits.len() + 2);
    for (index, ch) in digits.chars().enumerate() {
        if index == 3 || index == 6 {
            formatted.push(' ');
        }
        formatted.push(ch);
    }

    if rejected {
        FormatResult::rejected(formatted, "phone numbers may only contain digits")
    } else if overflow {
        FormatResult::rejected(formatted, "phone numbers have at most ten digits")
    } else {
        FormatResult::clean(formatted)
    }
}

fn format_digits(raw: &str, max: usize, what: &str) -> FormatResult {
    let (digits, rejected, overflow) = take_digits(raw, max);
    if rejected {
        FormatResult::rejected(digits, format!("{what} values may only contain digits"))
    } else if overflow {
        FormatResult::rejected(digits, format!("{what} values have at most {max} digits"))
    } else {
        FormatResult::clean(digits)
    }
}

/// Returns (kept digits, saw a rejected character, saw digit overflow).
fn take_digits(raw: &str, max: usize) -> (String, bool, bool) {
    let mut digits = String::new();
    let mut rejected = false;
    let mut overflow = false;
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            if digits.len() < max {
                digits.push(ch);
            } else {
                overflow = true;
            }
        } else if ch != ' ' {
            rejected = true;
        }
    }
    (digits, rejected, overflow)
}
