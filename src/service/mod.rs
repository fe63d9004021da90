pub mod calendar_service;
pub mod listing_service;
pub mod scheduling_service;
