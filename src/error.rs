use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::interview::InterviewId;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Missing required field: {0}")]
    Validation(&'static str),

    #[error("Interviewer {interviewer} is already booked at {at}")]
    Conflict { interviewer: u32, at: DateTime<Utc> },

    #[error("Stored interviews could not be read: {0}")]
    PersistenceRead(String),

    #[error("Failed to write interviews: {0}")]
    PersistenceWrite(#[from] std::io::Error),

    #[error("Failed to serialize interviews: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("{wall_clock} does not exist in {zone}")]
    NonexistentLocalTime { wall_clock: String, zone: String },

    #[error("Unknown interviewer: {0}")]
    UnknownInterviewer(String),

    #[error("Unknown interview type: {0}")]
    UnknownInterviewType(String),

    #[error("Interview not found: {0}")]
    InterviewNotFound(InterviewId),
}

impl SchedulerError {
    /// Message shown to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please fill in all fields".to_string(),
            Self::Conflict { .. } => {
                "Interview time slot is already booked for this interviewer".to_string()
            }
            Self::PersistenceRead(_) => "Saved interviews could not be loaded".to_string(),
            Self::PersistenceWrite(_) | Self::Serialize(_) => {
                "Interview could not be saved".to_string()
            }
            Self::UnknownTimeZone(zone) => format!("Unsupported time zone: {}", zone),
            Self::InvalidDateTime(text) => format!("Invalid date and time: {}", text),
            Self::NonexistentLocalTime { wall_clock, zone } => {
                format!("{} is skipped by a clock change in {}", wall_clock, zone)
            }
            Self::UnknownInterviewer(id) => format!("Unknown interviewer: {}", id),
            Self::UnknownInterviewType(kind) => format!("Unknown interview type: {}", kind),
            Self::InterviewNotFound(_) => "Interview not found".to_string(),
        }
    }

    /// Rejections produced while validating a form, as opposed to storage failures.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::PersistenceRead(_) | Self::PersistenceWrite(_) | Self::Serialize(_)
        )
    }
}
