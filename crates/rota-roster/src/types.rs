use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RosterError};

/// Categorical label for one calendar day's work assignment.
///
/// The set is closed — anything that does not parse as one of the three
/// labels is rejected at the boundary, never stored raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Day,
    Night,
    Off,
}

impl ShiftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Day => "day",
            ShiftType::Night => "night",
            ShiftType::Off => "off",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "day" => Ok(ShiftType::Day),
            "night" => Ok(ShiftType::Night),
            "off" => Ok(ShiftType::Off),
            other => Err(format!("unknown shift type: {}", other)),
        }
    }
}

/// One persisted shift assignment.
///
/// At most one record exists per date — the table's primary key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Calendar date, the natural key. ISO-8601 on the wire and in SQLite.
    pub date: NaiveDate,
    /// The originally computed or manually created assignment. Never mutated
    /// after insert.
    pub work_type: ShiftType,
    /// Manual correction shown in place of `work_type` when present.
    pub changed_work_type: Option<ShiftType>,
    /// RFC3339 creation timestamp.
    pub created_at: String,
    /// RFC3339 timestamp of the last override update.
    pub updated_at: String,
}

impl ShiftRecord {
    /// Build a fresh record with audit timestamps set to now.
    pub fn new(date: NaiveDate, work_type: ShiftType) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            date,
            work_type,
            changed_work_type: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Summary returned by a range fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Rows actually inserted; dates that already had a record are untouched.
    pub generated: u64,
}

/// Parse an ISO-8601 `YYYY-MM-DD` date received at the API boundary.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RosterError::InvalidDate(s.to_string()))
}

/// Parse a shift-type label received at the API boundary.
pub fn parse_shift_type(s: &str) -> Result<ShiftType> {
    s.parse()
        .map_err(|_| RosterError::InvalidShiftType(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_from_str_round_trip() {
        for t in [ShiftType::Day, ShiftType::Night, ShiftType::Off] {
            assert_eq!(ShiftType::from_str(&t.to_string()).unwrap(), t);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(ShiftType::from_str("overtime").is_err());
        assert!(ShiftType::from_str("Day").is_err());
    }

    #[test]
    fn serde_uses_lowercase_labels() {
        assert_eq!(
            serde_json::to_string(&ShiftType::Night).unwrap(),
            "\"night\""
        );
        let t: ShiftType = serde_json::from_str("\"off\"").unwrap();
        assert_eq!(t, ShiftType::Off);
    }

    #[test]
    fn record_serializes_date_as_iso() {
        let record = ShiftRecord::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ShiftType::Day,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["work_type"], "day");
        assert!(json["changed_work_type"].is_null());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2025-01-01").is_ok());
        assert!(parse_date("01/01/2025").is_err());
        assert!(parse_date("2025-13-40").is_err());
    }
}
