//! Violation messages.
//!
//! Each variant carries only the data its message needs. The messages are
//! part of the output contract and must not change wording.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::schema::DateFormat;

/// A single reason a value failed its column rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Required column has no value.
    RequiredMissing,
    ExceedsMaxLength(usize),
    BelowMinLength(usize),
    PatternMismatch,
    InvalidDate,
    /// Date parsed but is not written in the configured layout.
    DateFormatMismatch(DateFormat),
    NotANumber,
    BelowMinimum(f64),
    ExceedsMaximum(f64),
    SinLength,
    SinChecksum,
    InvalidEmail,
    InvalidPhone,
}

impl Violation {
    /// Stable identifier, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequiredMissing => "required",
            Self::ExceedsMaxLength(_) => "max_length",
            Self::BelowMinLength(_) => "min_length",
            Self::PatternMismatch => "pattern",
            Self::InvalidDate => "date",
            Self::DateFormatMismatch(_) => "date_format",
            Self::NotANumber => "number",
            Self::BelowMinimum(_) => "min",
            Self::ExceedsMaximum(_) => "max",
            Self::SinLength => "sin_length",
            Self::SinChecksum => "sin_checksum",
            Self::InvalidEmail => "email",
            Self::InvalidPhone => "phone",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredMissing => f.write_str("Required field is missing"),
            Self::ExceedsMaxLength(max) => write!(f, "Exceeds maximum length of {max}"),
            Self::BelowMinLength(min) => write!(f, "Below minimum length of {min}"),
            Self::PatternMismatch => f.write_str("Does not match required pattern"),
            Self::InvalidDate => f.write_str("Invalid date format"),
            Self::DateFormatMismatch(format) => write!(f, "Date must be in {format} format"),
            Self::NotANumber => f.write_str("Not a valid number"),
            // f64's Display drops a trailing `.0`, so 100.0 prints as "100".
            Self::BelowMinimum(min) => write!(f, "Below minimum value of {min}"),
            Self::ExceedsMaximum(max) => write!(f, "Exceeds maximum value of {max}"),
            Self::SinLength => f.write_str("SIN must be 9 digits"),
            Self::SinChecksum => f.write_str("Invalid SIN checksum"),
            Self::InvalidEmail => f.write_str("Invalid email format"),
            Self::InvalidPhone => f.write_str("Invalid phone number format"),
        }
    }
}

impl Serialize for Violation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
