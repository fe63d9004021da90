use crate::error::SchedulerError;
use crate::models::interview::{Interview, InterviewId, InterviewType};
use crate::models::interviewer::find_interviewer;
use crate::time_utils::{format_for_display, parse_zone};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardEntry {
    pub id: InterviewId,
    pub candidate_name: String,
    pub interview_type: InterviewType,
    pub interviewer: String,
    pub date: String,
    pub time_zone: String,
}

impl DashboardEntry {
    pub fn render(&self) -> String {
        format!(
            "[{}] {} ({})\n    Interviewer: {}\n    Date: {}\n    Time Zone: {}",
            self.id, self.candidate_name, self.interview_type, self.interviewer, self.date, self.time_zone
        )
    }
}

pub struct ListingService;

impl ListingService {
    /// One entry per interview, in stored order, with dates shown in `viewer_zone`.
    pub fn dashboard(
        interviews: &[Interview],
        viewer_zone: &str,
    ) -> Result<Vec<DashboardEntry>, SchedulerError> {
        parse_zone(viewer_zone)?;
        interviews
            .iter()
            .map(|interview| -> Result<DashboardEntry, SchedulerError> {
                Ok(DashboardEntry {
                    id: interview.id,
                    candidate_name: interview.candidate_name.clone(),
                    interview_type: interview.interview_type,
                    interviewer: find_interviewer(interview.interviewer_id)
                        .map(|interviewer| interviewer.name.to_string())
                        .unwrap_or_else(|| format!("Unknown ({})", interview.interviewer_id)),
                    date: format_for_display(interview.date_time, viewer_zone)?,
                    time_zone: interview.time_zone.clone(),
                })
            })
            .collect()
    }

    pub fn render(entries: &[DashboardEntry]) -> String {
        if entries.is_empty() {
            return "No interviews scheduled.".to_string();
        }
        entries
            .iter()
            .map(DashboardEntry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
