use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::models::interviewer::InterviewerId;

pub type InterviewId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterviewType {
    Technical,
    #[serde(rename = "HR")]
    Hr,
    Behavioral,
}

impl InterviewType {
    pub const ALL: [InterviewType; 3] = [
        InterviewType::Technical,
        InterviewType::Hr,
        InterviewType::Behavioral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Technical => "Technical",
            InterviewType::Hr => "HR",
            InterviewType::Behavioral => "Behavioral",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewType {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        InterviewType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SchedulerError::UnknownInterviewType(s.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: InterviewId,
    pub candidate_name: String,
    pub interviewer_id: InterviewerId,
    #[serde(with = "utc_millis")]
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
    pub time_zone: String,
}

impl Interview {
    /// Same interviewer booked at exactly the same instant.
    pub fn occupies_same_slot(&self, interviewer_id: InterviewerId, at: DateTime<Utc>) -> bool {
        self.interviewer_id == interviewer_id && self.date_time == at
    }
}

/// Ids are creation timestamps in milliseconds, bumped past `last` when the
/// clock has not moved so they stay unique and increasing.
pub fn next_interview_id(last: Option<InterviewId>, now: DateTime<Utc>) -> InterviewId {
    let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    match last {
        Some(last) if candidate <= last => last.saturating_add(1),
        _ => candidate,
    }
}

// `2024-03-10T13:00:00.000Z`, the shape browsers produce for ISO instants.
mod utc_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
