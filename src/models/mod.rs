pub mod interview;
pub mod interviewer;
