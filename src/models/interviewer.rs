use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier into the fixed interviewer list.
///
/// Stored records may carry it as an integer or as a numeric string, since
/// form values were historically saved as text. It is always written back
/// as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterviewerId(pub u32);

impl fmt::Display for InterviewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InterviewerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(InterviewerId)
    }
}

impl Serialize for InterviewerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for InterviewerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(InterviewerId(id)),
            Raw::Text(text) => text
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid interviewer id {:?}", text))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interviewer {
    pub id: InterviewerId,
    pub name: &'static str,
}

pub const INTERVIEWERS: [Interviewer; 3] = [
    Interviewer { id: InterviewerId(1), name: "John Doe" },
    Interviewer { id: InterviewerId(2), name: "Jane Smith" },
    Interviewer { id: InterviewerId(3), name: "Mike Johnson" },
];

pub fn find_interviewer(id: InterviewerId) -> Option<&'static Interviewer> {
    INTERVIEWERS.iter().find(|interviewer| interviewer.id == id)
}
