use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::SchedulerError;
use crate::models::interview::{Interview, InterviewId};
use crate::time_utils::parse_zone;

pub const EVENT_LENGTH_MINUTES: i64 = 60;
pub const AGENDA_LENGTH_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Month,
    Week,
    Day,
    Agenda,
}

impl FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(CalendarView::Month),
            "week" => Ok(CalendarView::Week),
            "day" => Ok(CalendarView::Day),
            "agenda" => Ok(CalendarView::Agenda),
            other => Err(format!("unknown calendar view {:?}", other)),
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarView::Month => "month",
            CalendarView::Week => "week",
            CalendarView::Day => "day",
            CalendarView::Agenda => "agenda",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Today,
    Prev,
    Next,
}

impl FromStr for Navigation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Navigation::Today),
            "prev" | "back" => Ok(Navigation::Prev),
            "next" => Ok(Navigation::Next),
            other => Err(format!("unknown navigation {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: InterviewId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub tooltip: String,
}

impl CalendarEvent {
    pub fn from_interview(interview: &Interview) -> Self {
        Self {
            id: interview.id,
            title: format!("{} - {}", interview.candidate_name, interview.interview_type),
            start: interview.date_time,
            end: interview.date_time + Duration::minutes(EVENT_LENGTH_MINUTES),
            tooltip: format!("Time Zone: {}", interview.time_zone),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarPage {
    pub view: CalendarView,
    pub zone: String,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub days: Vec<CalendarDay>,
}

pub struct CalendarService;

impl CalendarService {
    /// Inclusive date range covered by `view` around `anchor`.
    pub fn range(view: CalendarView, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        match view {
            CalendarView::Month => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(first);
                (first, last)
            }
            CalendarView::Week => {
                let back = anchor.weekday().num_days_from_sunday() as i64;
                let first = step(anchor, back, false).unwrap_or(NaiveDate::MIN);
                (first, step(first, 6, true).unwrap_or(NaiveDate::MAX))
            }
            CalendarView::Day => (anchor, anchor),
            CalendarView::Agenda => (
                anchor,
                step(anchor, AGENDA_LENGTH_DAYS - 1, true).unwrap_or(NaiveDate::MAX),
            ),
        }
    }

    /// Moves the anchor by one unit of `view`, or back to `today`.
    pub fn navigate(view: CalendarView, anchor: NaiveDate, action: Navigation, today: NaiveDate) -> NaiveDate {
        let forward = match action {
            Navigation::Today => return today,
            Navigation::Next => true,
            Navigation::Prev => false,
        };
        let shifted = match view {
            CalendarView::Month if forward => anchor.checked_add_months(Months::new(1)),
            CalendarView::Month => anchor.checked_sub_months(Months::new(1)),
            CalendarView::Week => step(anchor, 7, forward),
            CalendarView::Day => step(anchor, 1, forward),
            CalendarView::Agenda => step(anchor, AGENDA_LENGTH_DAYS, forward),
        };
        shifted.unwrap_or(anchor)
    }

    /// Buckets events by their start date in `viewer_zone`. Month, week and
    /// day pages list every date in range; agenda pages only dates with events.
    pub fn page(
        interviews: &[Interview],
        view: CalendarView,
        anchor: NaiveDate,
        viewer_zone: &str,
    ) -> Result<CalendarPage, SchedulerError> {
        let zone = parse_zone(viewer_zone)?;
        let (first, last) = Self::range(view, anchor);

        let mut events: Vec<CalendarEvent> = interviews
            .iter()
            .map(CalendarEvent::from_interview)
            .filter(|event| {
                let date = local_date(event.start, &zone);
                date >= first && date <= last
            })
            .collect();
        events.sort_by_key(|event| event.start);

        let mut days: Vec<CalendarDay> = first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| CalendarDay { date, events: Vec::new() })
            .collect();
        for event in events {
            let date = local_date(event.start, &zone);
            if let Some(day) = days.iter_mut().find(|day| day.date == date) {
                day.events.push(event);
            }
        }
        if view == CalendarView::Agenda {
            days.retain(|day| !day.events.is_empty());
        }

        Ok(CalendarPage {
            view,
            zone: viewer_zone.to_string(),
            first,
            last,
            days,
        })
    }

    pub fn render(page: &CalendarPage) -> Result<String, SchedulerError> {
        let zone = parse_zone(&page.zone)?;
        let mut body = format!("Your Time Zone: {}\n", page.zone);
        body.push_str(&match page.view {
            CalendarView::Month => page.first.format("%B %Y").to_string(),
            CalendarView::Day => page.first.format("%A %b %d").to_string(),
            CalendarView::Week | CalendarView::Agenda => format!(
                "{} - {}",
                page.first.format("%b %d"),
                page.last.format("%b %d")
            ),
        });
        body.push('\n');

        if page.days.is_empty() {
            body.push_str("There are no events in this range.\n");
        }
        for day in &page.days {
            body.push_str(&format!("{}\n", day.date.format("%a %b %d")));
            for event in &day.events {
                body.push_str(&format!(
                    "  {}-{}  {}  ({})\n",
                    event.start.with_timezone(&zone).format("%H:%M"),
                    event.end.with_timezone(&zone).format("%H:%M"),
                    event.title,
                    event.tooltip
                ));
            }
        }
        Ok(body.trim_end().to_string())
    }
}

// `None` past the ends of the representable calendar.
fn step(anchor: NaiveDate, days: i64, forward: bool) -> Option<NaiveDate> {
    if forward {
        anchor.checked_add_signed(Duration::days(days))
    } else {
        anchor.checked_sub_signed(Duration::days(days))
    }
}

fn local_date(instant: DateTime<Utc>, zone: &Tz) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}
