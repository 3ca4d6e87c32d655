pub mod csv_file;
pub mod memory;
pub mod provider;
pub mod yahoo;

pub use csv_file::CsvDataProvider;
pub use memory::InMemoryDataProvider;
pub use provider::HistoricalDataProvider;
pub use yahoo::YahooChartProvider;
