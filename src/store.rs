use crate::error::SchedulerError;
use crate::models::interview::{Interview, InterviewId};
use crate::storage::{SLOT_NAME, Slot};

/// In-order interview list mirrored to a durable slot.
///
/// The list is read once from the slot when the store is opened and written
/// back in full after every mutation. The store does no validation of its
/// own; callers check required fields and slot conflicts before `add` or
/// `update`.
#[derive(Debug)]
pub struct InterviewStore {
    slot: Slot,
    interviews: Vec<Interview>,
}

impl InterviewStore {
    /// Store backed by the standard slot inside `location`.
    pub fn open_in(location: impl AsRef<std::path::Path>) -> Self {
        Self::open(Slot::new(location, SLOT_NAME))
    }

    /// Rehydrates from `slot`. A missing or unreadable slot yields an empty list.
    pub fn open(slot: Slot) -> Self {
        let interviews = match slot.read::<Option<Vec<Interview>>>() {
            Ok(stored) => stored.flatten().unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %slot.path().display(), error = %e, "discarding stored interviews");
                Vec::new()
            }
        };
        tracing::debug!(count = interviews.len(), "interview store opened");
        Self { slot, interviews }
    }

    pub fn load_all(&self) -> &[Interview] {
        &self.interviews
    }

    pub fn get(&self, id: InterviewId) -> Option<&Interview> {
        self.interviews.iter().find(|interview| interview.id == id)
    }

    pub fn last_id(&self) -> Option<InterviewId> {
        self.interviews.iter().map(|interview| interview.id).max()
    }

    pub fn add(&mut self, interview: Interview) -> Result<(), SchedulerError> {
        tracing::info!(id = interview.id, candidate = %interview.candidate_name, "adding interview");
        self.interviews.push(interview);
        self.persist()
    }

    /// Replaces the entry with the same id in place. Returns `false`, without
    /// writing, when no such entry exists.
    pub fn update(&mut self, interview: Interview) -> Result<bool, SchedulerError> {
        let Some(index) = self.interviews.iter().position(|existing| existing.id == interview.id) else {
            tracing::debug!(id = interview.id, "update ignored for unknown interview");
            return Ok(false);
        };
        tracing::info!(id = interview.id, "updating interview");
        self.interviews[index] = interview;
        self.persist()?;
        Ok(true)
    }

    /// Removes every entry carrying `id` and returns how many were removed.
    pub fn delete(&mut self, id: InterviewId) -> Result<usize, SchedulerError> {
        let before = self.interviews.len();
        self.interviews.retain(|interview| interview.id != id);
        let removed = before - self.interviews.len();
        tracing::info!(id, removed, "deleting interview");
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), SchedulerError> {
        self.slot.write(&self.interviews)
    }
}
