use thiserror::Error;

#[derive(Error, Debug)]
/// Export error
pub enum ExportError {
    #[error("RecordFetcher from: {0}")]
    Fetch(String),

    #[error("FileSink from: {0}")]
    Sink(String),
}
