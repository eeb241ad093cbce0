pub mod daily_summary;
pub mod history_format;
pub mod hourly_record;
pub mod observation_date;
