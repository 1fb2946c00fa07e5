use std::time::{Duration, Instant};

use log::{debug, error, info};
use uuid::Uuid;

use crate::core::column::{ColumnConfig, resolve_columns};
use crate::core::encoder::encode;
use crate::core::record::Record;
use crate::sink::notice::{ExportNotice, ExportNotifier, LogNotifier};
use crate::sink::{CSV_CONTENT_TYPE, FileSink};
use crate::source::{FetchParams, NoFetcher, RecordFetcher};

use super::build_default_filename;

/// States of one export run.
///
/// `Acquiring`, `Encoding` and `Delivering` are the transient phases the run
/// passes through; `Done`, `EmptyWarning` and `Failed` are terminal and are
/// the only values a finished [`ExportSummary`] carries. A new export always
/// starts a fresh run; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    /// Awaiting the injected fetch collaborator.
    Acquiring,
    /// Resolving columns and encoding the document.
    Encoding,
    /// Handing the document to the sink.
    Delivering,
    /// The document was delivered.
    Done,
    /// The source resolved with zero records; nothing was delivered and the
    /// no-data notice was raised.
    EmptyWarning,
    /// The fetch or the delivery failed; the error was logged, the failure
    /// notice was raised and nothing was delivered.
    Failed,
}

/// Outcome of one export run.
#[derive(Debug)]
pub struct ExportSummary {
    /// Unique identifier of the run, also used in its log entries.
    pub id: Uuid,
    /// The time when the export started.
    pub start: Instant,
    /// The time when the export finished.
    pub end: Instant,
    /// The total duration of the export.
    pub duration: Duration,
    /// The terminal status of the run.
    pub status: ExportStatus,
    /// Number of records acquired.
    pub record_count: usize,
    /// Name the document was delivered under, when it was delivered.
    pub filename: Option<String>,
}

/// Where the records of one export come from.
pub enum RecordSource<F = NoFetcher> {
    /// An already-materialized ordered record sequence.
    Memory(Vec<Record>),
    /// A remote resource behind an injected fetcher.
    Remote { fetcher: F, params: FetchParams },
}

/// One export invocation: columns, record source, optional file name, and the
/// delivery collaborators. Built with [`ExporterBuilder`], consumed by
/// [`Exporter::run`] and discarded; no state survives a run.
pub struct Exporter<'a, F = NoFetcher> {
    id: Uuid,
    columns: Vec<(String, ColumnConfig)>,
    source: RecordSource<F>,
    filename: Option<String>,
    sink: &'a dyn FileSink,
    notifier: &'a dyn ExportNotifier,
}

impl<F: RecordFetcher> Exporter<'_, F> {
    /// Runs the export to one of its terminal states.
    ///
    /// This method:
    /// 1. Acquires the records (awaiting the fetcher for a remote source)
    /// 2. Raises the no-data notice and stops when zero records came back
    /// 3. Resolves the columns and encodes the document
    /// 4. Delivers the document under the resolved file name
    ///
    /// All failure is absorbed here: a rejected fetch or a sink error is
    /// logged once, surfaced through the notifier, and reported as the
    /// `Failed` status. Nothing throws past this boundary.
    pub async fn run(self) -> ExportSummary {
        let start = Instant::now();

        info!("Start of export, id: {}", self.id);

        let records = match self.source {
            RecordSource::Memory(records) => records,
            RecordSource::Remote { fetcher, params } => {
                enter(self.id, ExportStatus::Acquiring);

                match fetcher.fetch(&params).await {
                    Ok(records) => records,
                    Err(error) => {
                        error!("Export {}: record acquisition failed: {}", self.id, error);
                        self.notifier.notify(ExportNotice::ExportFailed);
                        return summarize(self.id, start, ExportStatus::Failed, 0, None);
                    }
                }
            }
        };

        if records.is_empty() {
            debug!("Export {}: no records to deliver", self.id);
            self.notifier.notify(ExportNotice::NoRecords);
            return summarize(self.id, start, ExportStatus::EmptyWarning, 0, None);
        }

        enter(self.id, ExportStatus::Encoding);
        let columns = resolve_columns(self.columns);
        let document = encode(&columns, &records);

        let filename = self.filename.unwrap_or_else(build_default_filename);

        enter(self.id, ExportStatus::Delivering);
        let delivery = self
            .sink
            .deliver(&document.to_text(), &filename, CSV_CONTENT_TYPE);

        if let Err(error) = delivery {
            error!("Export {}: delivery failed: {}", self.id, error);
            self.notifier.notify(ExportNotice::ExportFailed);
            return summarize(self.id, start, ExportStatus::Failed, records.len(), None);
        }

        info!(
            "End of export, id: {}, delivered {} records as {}",
            self.id,
            records.len(),
            filename
        );

        summarize(
            self.id,
            start,
            ExportStatus::Done,
            records.len(),
            Some(filename),
        )
    }
}

fn enter(id: Uuid, status: ExportStatus) {
    debug!("Export {}: entering {:?}", id, status);
}

fn summarize(
    id: Uuid,
    start: Instant,
    status: ExportStatus,
    record_count: usize,
    filename: Option<String>,
) -> ExportSummary {
    ExportSummary {
        id,
        start,
        end: Instant::now(),
        duration: start.elapsed(),
        status,
        record_count,
        filename,
    }
}

static LOG_NOTIFIER: LogNotifier = LogNotifier;

/// Builder for one export invocation.
///
/// # Example
///
/// ```no_run
/// use csv_export_rs::core::column::ColumnConfig;
/// use csv_export_rs::core::orchestrator::{ExportStatus, ExporterBuilder};
/// use csv_export_rs::core::record::{FieldValue, Record};
/// use csv_export_rs::sink::FileSystemSink;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut record = Record::new();
/// record.insert("sku".to_string(), FieldValue::Text("A-1".to_string()));
///
/// let sink = FileSystemSink::new(std::env::temp_dir());
///
/// let summary = ExporterBuilder::new()
///     .column("sku", ColumnConfig::Label("SKU".to_string()))
///     .records(vec![record])
///     .filename("products.csv")
///     .sink(&sink)
///     .build()
///     .run()
///     .await;
///
/// assert_eq!(summary.status, ExportStatus::Done);
/// # }
/// ```
pub struct ExporterBuilder<'a, F = NoFetcher> {
    columns: Vec<(String, ColumnConfig)>,
    source: Option<RecordSource<F>>,
    filename: Option<String>,
    sink: Option<&'a dyn FileSink>,
    notifier: Option<&'a dyn ExportNotifier>,
}

impl<'a> ExporterBuilder<'a, NoFetcher> {
    pub fn new() -> ExporterBuilder<'a, NoFetcher> {
        ExporterBuilder {
            columns: Vec::new(),
            source: None,
            filename: None,
            sink: None,
            notifier: None,
        }
    }
}

impl Default for ExporterBuilder<'_, NoFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, F: RecordFetcher> ExporterBuilder<'a, F> {
    /// Appends one output column. Columns keep their insertion order.
    pub fn column(mut self, id: impl Into<String>, config: ColumnConfig) -> ExporterBuilder<'a, F> {
        self.columns.push((id.into(), config));
        self
    }

    /// Appends a batch of output columns.
    pub fn columns<I>(mut self, columns: I) -> ExporterBuilder<'a, F>
    where
        I: IntoIterator<Item = (String, ColumnConfig)>,
    {
        self.columns.extend(columns);
        self
    }

    /// Uses an already-materialized record sequence as the source.
    pub fn records(mut self, records: Vec<Record>) -> ExporterBuilder<'a, F> {
        self.source = Some(RecordSource::Memory(records));
        self
    }

    /// Uses a remote fetch collaborator as the source.
    pub fn fetcher<G: RecordFetcher>(
        self,
        fetcher: G,
        params: FetchParams,
    ) -> ExporterBuilder<'a, G> {
        ExporterBuilder {
            columns: self.columns,
            source: Some(RecordSource::Remote { fetcher, params }),
            filename: self.filename,
            sink: self.sink,
            notifier: self.notifier,
        }
    }

    /// Sets the delivered file name. Defaults to a UTC date stamp with a
    /// `.csv` suffix when not set.
    pub fn filename(mut self, filename: impl Into<String>) -> ExporterBuilder<'a, F> {
        self.filename = Some(filename.into());
        self
    }

    pub fn sink(mut self, sink: &'a dyn FileSink) -> ExporterBuilder<'a, F> {
        self.sink = Some(sink);
        self
    }

    pub fn notifier(mut self, notifier: &'a dyn ExportNotifier) -> ExporterBuilder<'a, F> {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Exporter<'a, F> {
        Exporter {
            id: Uuid::new_v4(),
            columns: self.columns,
            source: self.source.unwrap_or(RecordSource::Memory(Vec::new())),
            filename: self.filename,
            sink: self.sink.unwrap(),
            notifier: self.notifier.unwrap_or(&LOG_NOTIFIER),
        }
    }
}
