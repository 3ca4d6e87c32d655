pub mod market_data;
pub mod record;

pub use market_data::{Bar, Series};
pub use record::{CycleReport, Record};
