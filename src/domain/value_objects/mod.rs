pub mod name_index;
pub mod time_window;

pub use name_index::NameIndex;
pub use time_window::{TimeWindow, TimeWindowError};
