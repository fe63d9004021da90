use std::fmt;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select, Text};

use interviewScheduler::models::interview::{InterviewId, InterviewType};
use interviewScheduler::models::interviewer::{INTERVIEWERS, Interviewer};
use interviewScheduler::service::calendar_service::{CalendarService, CalendarView, Navigation};
use interviewScheduler::service::listing_service::ListingService;
use interviewScheduler::service::scheduling_service::{InterviewDraft, SchedulingForm};
use interviewScheduler::store::InterviewStore;
use interviewScheduler::time_utils::{INPUT_FORMAT, SUPPORTED_TIME_ZONES, parse_zone};

#[derive(Parser)]
#[command(name = "interview-scheduler", about = "Schedule interviews across time zones")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every interview with dates in your time zone
    List {
        #[arg(long)]
        zone: Option<String>,
    },
    Schedule {
        #[arg(long)]
        candidate: String,
        #[arg(long)]
        interviewer: String,
        /// Wall-clock time in the interview's zone, e.g. 2024-03-10T09:00
        #[arg(long)]
        date_time: String,
        #[arg(long = "type")]
        interview_type: String,
        #[arg(long)]
        zone: Option<String>,
    },
    SchedulePrompt {},
    Edit {
        id: InterviewId,
        #[arg(long)]
        candidate: Option<String>,
        #[arg(long)]
        interviewer: Option<String>,
        #[arg(long)]
        date_time: Option<String>,
        #[arg(long = "type")]
        interview_type: Option<String>,
        #[arg(long)]
        zone: Option<String>,
        /// Walk through every field interactively
        #[arg(long)]
        prompt: bool,
    },
    Delete {
        id: InterviewId,
        #[arg(long)]
        yes: bool,
    },
    Calendar {
        #[arg(long, default_value = "month")]
        view: CalendarView,
        /// Anchor date, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// today, prev or next
        #[arg(long)]
        go: Option<Navigation>,
        #[arg(long)]
        zone: Option<String>,
    },
    Interviewers,
    Zones,
}

pub fn cli(
    cli: Cli,
    store: &mut InterviewStore,
    viewer_zone: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List { zone } => {
            let zone = zone.as_deref().unwrap_or(viewer_zone);
            let entries = ListingService::dashboard(store.load_all(), zone)?;
            println!("{}", ListingService::render(&entries));
        }
        Commands::Schedule { candidate, interviewer, date_time, interview_type, zone } => {
            let draft = InterviewDraft {
                candidate_name: candidate,
                interviewer_id: interviewer,
                date_time,
                interview_type,
                time_zone: zone.unwrap_or_else(|| viewer_zone.to_string()),
            };
            submit(store, SchedulingForm::create(draft))?;
        }
        Commands::SchedulePrompt {} => {
            let mut form = SchedulingForm::create(InterviewDraft::with_zone(viewer_zone));
            fill_from_prompt(&mut form.draft)?;
            submit(store, form)?;
        }
        Commands::Edit { id, candidate, interviewer, date_time, interview_type, zone, prompt } => {
            let Some(existing) = store.get(id) else {
                return Err(format!("No interview with id {}", id).into());
            };
            let mut form = SchedulingForm::edit(existing);
            let draft = &mut form.draft;
            for (field, value) in [
                (&mut draft.candidate_name, candidate),
                (&mut draft.interviewer_id, interviewer),
                (&mut draft.date_time, date_time),
                (&mut draft.interview_type, interview_type),
                (&mut draft.time_zone, zone),
            ] {
                if let Some(value) = value {
                    *field = value;
                }
            }
            if prompt {
                fill_from_prompt(&mut form.draft)?;
            }
            submit(store, form)?;
        }
        Commands::Delete { id, yes } => {
            if store.get(id).is_none() {
                println!("No interview with id {}", id);
                return Ok(());
            }
            let confirmed = yes
                || Confirm::new("Are you sure you want to delete this interview?")
                    .with_default(false)
                    .prompt()?;
            if confirmed {
                store.delete(id)?;
                println!("Interview deleted successfully");
            }
        }
        Commands::Calendar { view, date, go, zone } => {
            let zone_name = zone.as_deref().unwrap_or(viewer_zone);
            let today = Utc::now().with_timezone(&parse_zone(zone_name)?).date_naive();
            let mut anchor = date.unwrap_or(today);
            if let Some(go) = go {
                anchor = CalendarService::navigate(view, anchor, go, today);
            }
            let page = CalendarService::page(store.load_all(), view, anchor, zone_name)?;
            println!("{}", CalendarService::render(&page)?);
        }
        Commands::Interviewers => {
            for interviewer in INTERVIEWERS {
                println!("{}", InterviewerChoice(interviewer));
            }
        }
        Commands::Zones => {
            for zone in SUPPORTED_TIME_ZONES {
                println!("{}", zone);
            }
        }
    }
    Ok(())
}

fn submit(store: &mut InterviewStore, mut form: SchedulingForm) -> Result<(), Box<dyn std::error::Error>> {
    match form.submit(store, Utc::now()) {
        Ok(outcome) => {
            println!("{} (id {})", outcome.message(), outcome.interview().id);
            Ok(())
        }
        Err(e) if e.is_rejection() => Err(e.user_message().into()),
        Err(e) => Err(e.into()),
    }
}

struct InterviewerChoice(Interviewer);

impl fmt::Display for InterviewerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.0.id, self.0.name)
    }
}

// Prompts for every field, starting from whatever the draft already holds.
fn fill_from_prompt(draft: &mut InterviewDraft) -> Result<(), Box<dyn std::error::Error>> {
    draft.candidate_name = Text::new("Candidate Name")
        .with_initial_value(&draft.candidate_name)
        .prompt()?;

    let interviewers: Vec<InterviewerChoice> = INTERVIEWERS.into_iter().map(InterviewerChoice).collect();
    let cursor = interviewers
        .iter()
        .position(|choice| choice.0.id.to_string() == draft.interviewer_id.trim())
        .unwrap_or(0);
    let interviewer = Select::new("Interviewer", interviewers)
        .with_starting_cursor(cursor)
        .prompt()?;
    draft.interviewer_id = interviewer.0.id.to_string();

    draft.date_time = Text::new("Date and Time")
        .with_initial_value(&draft.date_time)
        .with_help_message(&format!("Wall-clock time in the interview's zone ({})", INPUT_FORMAT))
        .prompt()?;

    let types: Vec<InterviewType> = InterviewType::ALL.to_vec();
    let cursor = draft
        .interview_type
        .parse::<InterviewType>()
        .ok()
        .and_then(|current| types.iter().position(|kind| *kind == current))
        .unwrap_or(0);
    draft.interview_type = Select::new("Interview Type", types)
        .with_starting_cursor(cursor)
        .prompt()?
        .to_string();

    let zones: Vec<&str> = SUPPORTED_TIME_ZONES.to_vec();
    let cursor = zones
        .iter()
        .position(|zone| *zone == draft.time_zone)
        .unwrap_or(0);
    draft.time_zone = Select::new("Time Zone", zones)
        .with_starting_cursor(cursor)
        .prompt()?
        .to_string();
    Ok(())
}
