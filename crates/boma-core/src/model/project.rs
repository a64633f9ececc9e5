use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::DraftError;
use crate::model::constituency;

/// The six funding categories a project is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Infrastructure,
    Education,
    Health,
    #[serde(rename = "Water & Sanitation")]
    WaterSanitation,
    Youth,
    Economic,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Infrastructure,
        Self::Education,
        Self::Health,
        Self::WaterSanitation,
        Self::Youth,
        Self::Economic,
    ];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastructure",
            Self::Education => "Education",
            Self::Health => "Health",
            Self::WaterSanitation => "Water & Sanitation",
            Self::Youth => "Youth",
            Self::Economic => "Economic",
        }
    }
}

/// The four lifecycle statuses.
///
/// Records are born `Planned`; the create form cannot set any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Planned,
    Active,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Planned, Self::Active, Self::Completed, Self::OnHold];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "infrastructure" => Ok(Self::Infrastructure),
            "education" => Ok(Self::Education),
            "health" => Ok(Self::Health),
            "water & sanitation" | "water-sanitation" | "water" => Ok(Self::WaterSanitation),
            "youth" => Ok(Self::Youth),
            "economic" => Ok(Self::Economic),
            _ => Err(ParseEnumError {
                expected: "category",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "planned" => Ok(Self::Planned),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "on hold" | "on-hold" | "onhold" => Ok(Self::OnHold),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

/// One project record.
///
/// Wire documents carry every field except `id`, which the store assigns on
/// insert and the adapter attaches at read time. Timestamps are epoch
/// microseconds (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub category: Category,
    pub constituency: String,
    pub budget: u64,
    pub spent: u64,
    pub progress: u8,
    pub status: Status,
    pub start_us: i64,
    pub end_us: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Project {
    /// Build the record inserted for `draft`: store defaults applied, start
    /// stamped with the caller's clock. The id stays empty until the store
    /// assigns one.
    pub fn from_draft(draft: &ProjectDraft, start_us: i64) -> Result<Self, DraftError> {
        Ok(Self {
            id: String::new(),
            name: draft.name.clone(),
            category: draft.category,
            constituency: draft.constituency.clone(),
            budget: draft.budget,
            spent: 0,
            progress: 0,
            status: Status::Planned,
            start_us,
            end_us: draft.end_us()?,
            description: if draft.description.trim().is_empty() {
                None
            } else {
                Some(draft.description.clone())
            },
        })
    }

    /// The wire payload for this record (no `id`; the store owns that).
    #[must_use]
    pub fn wire_fields(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "category": self.category,
            "constituency": self.constituency,
            "budget": self.budget,
            "spent": self.spent,
            "progress": self.progress,
            "status": self.status,
            "start_us": self.start_us,
            "end_us": self.end_us,
            "description": self.description,
        })
    }

    /// Reject decoded documents that violate record invariants. The store is
    /// schema-less, so range checks happen here rather than at the wire.
    pub fn check(&self) -> Result<(), String> {
        if self.progress > 100 {
            return Err(format!("progress {} out of range 0..=100", self.progress));
        }
        Ok(())
    }

    /// Planned end date rendered as `YYYY-MM-DD` (empty if out of range).
    #[must_use]
    pub fn end_date(&self) -> String {
        chrono::DateTime::from_timestamp_micros(self.end_us)
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// In-progress field values for a new record.
///
/// The guard in [`ProjectDraft::validate`] is the only validation the create
/// path performs; the store adapter trusts drafts that pass it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub category: Category,
    pub constituency: String,
    pub budget: u64,
    /// Planned end date as typed, `YYYY-MM-DD`.
    pub end: String,
    pub description: String,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::Infrastructure,
            constituency: constituency::default_name().to_string(),
            budget: 0,
            end: String::new(),
            description: String::new(),
        }
    }
}

impl ProjectDraft {
    /// The submission guard: name and constituency present, constituency
    /// registered, budget positive, end date parseable.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        if self.constituency.trim().is_empty() {
            return Err(DraftError::EmptyConstituency);
        }
        if !constituency::is_known(&self.constituency) {
            return Err(DraftError::UnknownConstituency(self.constituency.clone()));
        }
        if self.budget == 0 {
            return Err(DraftError::ZeroBudget);
        }
        self.end_us().map(|_| ())
    }

    /// Planned end date as epoch microseconds (midnight UTC).
    pub fn end_us(&self) -> Result<i64, DraftError> {
        let date = NaiveDate::parse_from_str(self.end.trim(), "%Y-%m-%d")
            .map_err(|_| DraftError::BadEndDate(self.end.clone()))?;
        Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_micros())
    }
}
