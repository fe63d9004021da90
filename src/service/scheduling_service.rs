use chrono::{DateTime, Utc};

use crate::error::SchedulerError;
use crate::models::interview::{Interview, InterviewId, InterviewType, next_interview_id};
use crate::models::interviewer::{InterviewerId, find_interviewer};
use crate::store::InterviewStore;
use crate::time_utils::{detect_user_zone, to_utc, to_wall_clock_input};

/// Raw form input. Empty fields count as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewDraft {
    pub candidate_name: String,
    pub interviewer_id: String,
    pub date_time: String,
    pub interview_type: String,
    pub time_zone: String,
}

impl InterviewDraft {
    /// Blank form defaulting to the viewer's zone.
    pub fn new() -> Self {
        Self::with_zone(detect_user_zone())
    }

    pub fn with_zone(time_zone: impl Into<String>) -> Self {
        Self {
            time_zone: time_zone.into(),
            ..Default::default()
        }
    }

    /// Form pre-filled from a stored interview, wall clock shown in its own zone.
    pub fn from_interview(interview: &Interview) -> Self {
        let date_time = to_wall_clock_input(interview.date_time, &interview.time_zone)
            .or_else(|_| to_wall_clock_input(interview.date_time, "UTC"))
            .unwrap_or_default();
        Self {
            candidate_name: interview.candidate_name.clone(),
            interviewer_id: interview.interviewer_id.to_string(),
            date_time,
            interview_type: interview.interview_type.to_string(),
            time_zone: interview.time_zone.clone(),
        }
    }

    fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("candidateName", &self.candidate_name),
            ("interviewerId", &self.interviewer_id),
            ("dateTime", &self.date_time),
            ("type", &self.interview_type),
            ("timeZone", &self.time_zone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Empty,
    Validating,
    Rejected(String),
    Accepted,
    Persisted(InterviewId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Scheduled(Interview),
    Updated(Interview),
}

impl FormOutcome {
    pub fn interview(&self) -> &Interview {
        match self {
            FormOutcome::Scheduled(interview) | FormOutcome::Updated(interview) => interview,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FormOutcome::Scheduled(_) => "Interview scheduled successfully",
            FormOutcome::Updated(_) => "Interview updated successfully",
        }
    }
}

/// First record, other than `exclude`, booking `interviewer` at exactly `at`.
pub fn find_conflict(
    interviews: &[Interview],
    interviewer: InterviewerId,
    at: DateTime<Utc>,
    exclude: Option<InterviewId>,
) -> Option<&Interview> {
    interviews
        .iter()
        .filter(|existing| Some(existing.id) != exclude)
        .find(|existing| existing.occupies_same_slot(interviewer, at))
}

pub struct SchedulingService;

impl SchedulingService {
    /// Validates `draft` and turns it into a record ready for the store.
    ///
    /// Checks run in order and the first failure is returned: required
    /// fields, field parsing, then the slot conflict against `interviews`.
    pub fn validate(
        interviews: &[Interview],
        draft: &InterviewDraft,
        editing: Option<InterviewId>,
        id: InterviewId,
    ) -> Result<Interview, SchedulerError> {
        if let Some(field) = draft.first_missing_field() {
            return Err(SchedulerError::Validation(field));
        }

        let interviewer_id: InterviewerId = draft
            .interviewer_id
            .parse()
            .map_err(|_| SchedulerError::UnknownInterviewer(draft.interviewer_id.clone()))?;
        if find_interviewer(interviewer_id).is_none() {
            return Err(SchedulerError::UnknownInterviewer(draft.interviewer_id.clone()));
        }
        let interview_type: InterviewType = draft.interview_type.parse()?;
        let time_zone = draft.time_zone.trim();
        let date_time = to_utc(&draft.date_time, time_zone)?;

        if find_conflict(interviews, interviewer_id, date_time, editing).is_some() {
            return Err(SchedulerError::Conflict {
                interviewer: interviewer_id.0,
                at: date_time,
            });
        }

        Ok(Interview {
            id,
            candidate_name: draft.candidate_name.trim().to_string(),
            interviewer_id,
            date_time,
            interview_type,
            time_zone: time_zone.to_string(),
        })
    }

    /// Assigns the id and validates: new interviews get a fresh id, edits keep
    /// theirs and must refer to a stored interview.
    pub fn prepare(
        store: &InterviewStore,
        draft: &InterviewDraft,
        editing: Option<InterviewId>,
        now: DateTime<Utc>,
    ) -> Result<Interview, SchedulerError> {
        let id = match editing {
            Some(id) if store.get(id).is_some() => Ok(id),
            Some(id) => Err(SchedulerError::InterviewNotFound(id)),
            None => Ok(next_interview_id(store.last_id(), now)),
        };
        id.and_then(|id| Self::validate(store.load_all(), draft, editing, id))
            .inspect_err(|e| tracing::info!(reason = %e, "scheduling rejected"))
    }

    pub fn persist(
        store: &mut InterviewStore,
        interview: Interview,
        editing: bool,
    ) -> Result<FormOutcome, SchedulerError> {
        if editing {
            store.update(interview.clone())?;
            Ok(FormOutcome::Updated(interview))
        } else {
            store.add(interview.clone())?;
            Ok(FormOutcome::Scheduled(interview))
        }
    }

    pub fn submit(
        store: &mut InterviewStore,
        draft: &InterviewDraft,
        editing: Option<InterviewId>,
        now: DateTime<Utc>,
    ) -> Result<FormOutcome, SchedulerError> {
        let interview = Self::prepare(store, draft, editing, now)?;
        Self::persist(store, interview, editing.is_some())
    }
}

/// Create/edit form driven through `Empty -> Validating -> Rejected | Accepted -> Persisted`.
#[derive(Debug, Clone)]
pub struct SchedulingForm {
    pub draft: InterviewDraft,
    editing: Option<InterviewId>,
    state: FormState,
}

impl SchedulingForm {
    pub fn create(draft: InterviewDraft) -> Self {
        Self {
            draft,
            editing: None,
            state: FormState::Empty,
        }
    }

    pub fn edit(interview: &Interview) -> Self {
        Self {
            draft: InterviewDraft::from_interview(interview),
            editing: Some(interview.id),
            state: FormState::Empty,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn editing(&self) -> Option<InterviewId> {
        self.editing
    }

    pub fn submit(
        &mut self,
        store: &mut InterviewStore,
        now: DateTime<Utc>,
    ) -> Result<FormOutcome, SchedulerError> {
        self.state = FormState::Validating;
        let interview = SchedulingService::prepare(store, &self.draft, self.editing, now)
            .inspect_err(|e| self.state = FormState::Rejected(e.user_message()))?;

        self.state = FormState::Accepted;
        let outcome = SchedulingService::persist(store, interview, self.editing.is_some())
            .inspect_err(|e| self.state = FormState::Rejected(e.user_message()))?;

        self.state = FormState::Persisted(outcome.interview().id);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{SLOT_NAME, Slot};
    use chrono::TimeZone;

    fn draft(candidate: &str, interviewer: &str, date_time: &str) -> InterviewDraft {
        InterviewDraft {
            candidate_name: candidate.to_string(),
            interviewer_id: interviewer.to_string(),
            date_time: date_time.to_string(),
            interview_type: "Technical".to_string(),
            time_zone: "America/New_York".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn first_missing_field_wins() {
        let mut incomplete = draft("", "", "2024-03-10T09:00");
        let err = SchedulingService::validate(&[], &incomplete, None, 1).unwrap_err();
        assert!(matches!(err, SchedulerError::Validation("candidateName")));

        incomplete.candidate_name = "Alice".to_string();
        let err = SchedulingService::validate(&[], &incomplete, None, 1).unwrap_err();
        assert!(matches!(err, SchedulerError::Validation("interviewerId")));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let blank = draft("   ", "1", "2024-03-10T09:00");
        let err = SchedulingService::validate(&[], &blank, None, 1).unwrap_err();
        assert!(matches!(err, SchedulerError::Validation("candidateName")));
    }

    #[test]
    fn rejects_unknown_interviewer() {
        let err = SchedulingService::validate(&[], &draft("Alice", "7", "2024-03-10T09:00"), None, 1)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::UnknownInterviewer(_)));
    }

    #[test]
    fn rejects_unknown_zone_once() {
        let mut elsewhere = draft("Alice", "1", "2024-03-10T09:00");
        elsewhere.time_zone = " Mars/Olympus ".to_string();
        let err = SchedulingService::validate(&[], &elsewhere, None, 1).unwrap_err();
        assert!(matches!(err, SchedulerError::UnknownTimeZone(_)));

        elsewhere.time_zone = " Asia/Tokyo ".to_string();
        let accepted = SchedulingService::validate(&[], &elsewhere, None, 1).unwrap();
        assert_eq!(accepted.time_zone, "Asia/Tokyo");
    }

    #[test]
    fn conflict_excludes_the_record_being_edited() {
        let existing = SchedulingService::validate(&[], &draft("Alice", "1", "2024-03-10T09:00"), None, 5)
            .unwrap();
        let interviews = vec![existing.clone()];

        let clash = SchedulingService::validate(&interviews, &draft("Bob", "1", "2024-03-10T09:00"), None, 6);
        assert!(matches!(clash, Err(SchedulerError::Conflict { interviewer: 1, .. })));

        let resave = SchedulingService::validate(&interviews, &draft("Alice B", "1", "2024-03-10T09:00"), Some(5), 5);
        assert!(resave.is_ok());
    }

    #[test]
    fn conflict_compares_instants_not_wall_clocks() {
        let existing = SchedulingService::validate(&[], &draft("Alice", "2", "2024-03-10T09:00"), None, 5)
            .unwrap();
        let mut same_instant = draft("Bob", "2", "2024-03-10T06:00");
        same_instant.time_zone = "America/Los_Angeles".to_string();
        let clash = SchedulingService::validate(&[existing], &same_instant, None, 6);
        assert!(matches!(clash, Err(SchedulerError::Conflict { .. })));
    }

    #[test]
    fn form_moves_through_states() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InterviewStore::open(Slot::new(dir.path(), SLOT_NAME));

        let mut form = SchedulingForm::create(draft("", "1", "2024-03-10T09:00"));
        assert_eq!(form.state(), &FormState::Empty);
        assert!(form.submit(&mut store, now()).is_err());
        assert_eq!(form.state(), &FormState::Rejected("Please fill in all fields".to_string()));
        assert!(store.load_all().is_empty());

        form.draft.candidate_name = "Alice".to_string();
        let outcome = form.submit(&mut store, now()).unwrap();
        assert_eq!(form.state(), &FormState::Persisted(outcome.interview().id));
        assert_eq!(outcome.message(), "Interview scheduled successfully");
    }

    #[test]
    fn editing_keeps_id_and_reuses_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InterviewStore::open(Slot::new(dir.path(), SLOT_NAME));
        let created = SchedulingService::submit(&mut store, &draft("Alice", "1", "2024-03-10T09:00"), None, now())
            .unwrap();
        let id = created.interview().id;

        let mut form = SchedulingForm::edit(store.get(id).unwrap());
        assert_eq!(form.draft.date_time, "2024-03-10T09:00");
        form.draft.interview_type = "HR".to_string();
        let updated = form.submit(&mut store, now()).unwrap();

        assert!(matches!(updated, FormOutcome::Updated(_)));
        assert_eq!(store.load_all().len(), 1);
        assert_eq!(store.get(id).unwrap().interview_type, InterviewType::Hr);
    }

    #[test]
    fn editing_an_unknown_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InterviewStore::open(Slot::new(dir.path(), SLOT_NAME));
        let err = SchedulingService::submit(&mut store, &draft("Alice", "1", "2024-03-10T09:00"), Some(3), now())
            .unwrap_err();
        assert!(matches!(err, SchedulerError::InterviewNotFound(3)));
        assert!(store.load_all().is_empty());
    }
}
