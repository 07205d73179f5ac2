mod types;

pub use types::{CsvFileError, FetchError, LoadError};
