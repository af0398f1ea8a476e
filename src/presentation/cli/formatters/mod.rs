pub mod monitor_fmt;
pub mod report_fmt;
pub mod status_fmt;
