use chrono::{TimeZone, Utc};
use interviewScheduler::models::interview::InterviewType;
use interviewScheduler::service::calendar_service::{CalendarService, CalendarView};
use interviewScheduler::service::listing_service::ListingService;
use interviewScheduler::service::scheduling_service::{FormState, InterviewDraft, SchedulingForm};
use interviewScheduler::store::InterviewStore;
use interviewScheduler::time_utils::format_for_display;

#[test]
fn schedule_edit_and_delete_alice() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let mut store = InterviewStore::open_in(dir.path());
    let mut form = SchedulingForm::create(InterviewDraft {
        candidate_name: "Alice".to_string(),
        interviewer_id: "1".to_string(),
        date_time: "2024-03-10T09:00".to_string(),
        interview_type: "Technical".to_string(),
        time_zone: "America/New_York".to_string(),
    });
    let outcome = form.submit(&mut store, now).unwrap();
    let id = outcome.interview().id;
    assert_eq!(form.state(), &FormState::Persisted(id));

    // Reload as a fresh process would.
    let mut store = InterviewStore::open_in(dir.path());
    let stored = store.get(id).unwrap().clone();
    assert_eq!(stored.date_time, Utc.with_ymd_and_hms(2024, 3, 10, 13, 0, 0).unwrap());
    assert_eq!(
        format_for_display(stored.date_time, &stored.time_zone).unwrap(),
        "2024-03-10 09:00 EDT"
    );

    let listing = ListingService::dashboard(store.load_all(), "America/Los_Angeles").unwrap();
    assert_eq!(listing[0].date, "2024-03-10 06:00 PDT");

    let page = CalendarService::page(
        store.load_all(),
        CalendarView::Week,
        chrono::NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        "America/New_York",
    )
    .unwrap();
    assert_eq!(page.days[0].events[0].title, "Alice - Technical");

    let mut edit = SchedulingForm::edit(&stored);
    edit.draft.interview_type = "Behavioral".to_string();
    edit.draft.date_time = "2024-03-10T10:00".to_string();
    edit.submit(&mut store, now).unwrap();

    let store_after_edit = InterviewStore::open_in(dir.path());
    let edited = store_after_edit.get(id).unwrap();
    assert_eq!(edited.interview_type, InterviewType::Behavioral);
    assert_eq!(edited.date_time, Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap());
    assert_eq!(store_after_edit.load_all().len(), 1);

    store.delete(id).unwrap();
    assert!(InterviewStore::open_in(dir.path()).load_all().is_empty());
}

#[test]
fn rejected_form_leaves_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = InterviewStore::open_in(dir.path());
    let mut form = SchedulingForm::create(InterviewDraft::with_zone("UTC"));
    form.draft.candidate_name = "Dana".to_string();

    assert!(form.submit(&mut store, Utc::now()).is_err());
    assert!(matches!(form.state(), FormState::Rejected(_)));
    assert!(store.load_all().is_empty());
    assert!(InterviewStore::open_in(dir.path()).load_all().is_empty());
}
