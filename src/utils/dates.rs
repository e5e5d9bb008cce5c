//! Publication-date boundary parsing and comparison

use crate::utils::error::VodfetchError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar date in the fixed-width `YYYYMMDD` form.
///
/// The retrieval engine reports upload dates in the same zero-padded form,
/// so plain string ordering is date ordering. That is the property the
/// candidate filter relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateStamp(String);

impl DateStamp {
    /// Parse operator input, accepting `YYYY-MM-DD` or `YYYYMMDD`.
    ///
    /// Both forms are validated as real calendar dates; anything else is a
    /// [`VodfetchError::InvalidDate`].
    pub fn parse(input: &str) -> Result<Self, VodfetchError> {
        let trimmed = input.trim();
        let format = if trimmed.contains('-') { "%Y-%m-%d" } else { "%Y%m%d" };
        let date = NaiveDate::parse_from_str(trimmed, format)
            .map_err(|_| VodfetchError::InvalidDate(input.to_string()))?;
        Ok(Self(date.format("%Y%m%d").to_string()))
    }

    /// Parse an optional boundary; empty or whitespace-only input means
    /// "no boundary" rather than an error.
    pub fn parse_optional(input: Option<&str>) -> Result<Option<Self>, VodfetchError> {
        match input.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => Self::parse(s).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
