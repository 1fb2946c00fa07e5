/*!
 # CSV Export for Rust

 A unified engine for exporting tabular records to a delimited text document.
 It consolidates the usual ad hoc exporters (direct in-memory export,
 button-triggered export with custom key sets, paginated remote-fetch export
 with column-mapping callbacks) behind one coherent component with a single
 encoding contract.

 ## Core Concepts

 - **ColumnConfig:** the caller-supplied configuration for one output column,
   either a plain display label or a richer [`ColumnDescriptor`](core::column::ColumnDescriptor)
   carrying source keys, a join rule, a formatter and a skip flag.
 - **Resolver:** [`resolve_columns`](core::column::resolve_columns) normalizes
   the configuration into an ordered list of [`ColumnSpec`](core::column::ColumnSpec)s.
 - **Encoder:** [`encode`](core::encoder::encode) projects records through the
   column specs into an [`EncodedDocument`](core::encoder::EncodedDocument).
   Every field is double-quoted and embedded quotes are doubled, so the output
   round-trips through any standard CSV reader.
 - **Orchestrator:** an [`Exporter`](core::orchestrator::Exporter) acquires the
   records (in memory, or from an injected [`RecordFetcher`](source::RecordFetcher)),
   runs the encoder and hands the document to a [`FileSink`](sink::FileSink).
   Empty results and fetch failures end in their own terminal states instead
   of surfacing as panics or silent no-ops.

 ## Getting Started

```
use csv_export_rs::core::column::{resolve_columns, ColumnConfig, ColumnDescriptor};
use csv_export_rs::core::encoder::encode;
use csv_export_rs::core::record::{FieldValue, Record};

let columns = vec![
    ("name".to_string(), ColumnConfig::Label("Name".to_string())),
    (
        "email".to_string(),
        ColumnConfig::Descriptor(ColumnDescriptor::new("Email").keys(["email"])),
    ),
];

let mut record = Record::new();
record.insert("name".to_string(), FieldValue::Text("A, Inc.".to_string()));
record.insert("email".to_string(), FieldValue::Text("a@x.com".to_string()));

let document = encode(&resolve_columns(columns), &[record]);

assert_eq!(
    document.to_text(),
    "\"Name\",\"Email\"\n\"A, Inc.\",\"a@x.com\""
);
```

 For the full pipeline, build an [`Exporter`](core::orchestrator::Exporter)
 with [`ExporterBuilder`](core::orchestrator::ExporterBuilder) and run it on an
 async executor; see [`core::orchestrator`].
*/

/// Core module for the export engine: column resolution, record projection,
/// encoding and orchestration.
pub mod core;

/// Error types for export operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Delivery-side collaborators: file sinks and user notices
pub mod sink;

/// Acquisition-side collaborators: record fetchers
pub mod source;
