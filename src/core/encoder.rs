use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::core::column::ColumnSpec;
use crate::core::record::Record;

/// The final delimited-text output: a header line followed by one line per
/// record. Immutable once produced.
pub struct EncodedDocument {
    lines: Vec<String>,
}

impl EncodedDocument {
    /// The header line.
    pub fn header(&self) -> &str {
        &self.lines[0]
    }

    /// All lines, header first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of data lines.
    pub fn record_count(&self) -> usize {
        self.lines.len() - 1
    }

    /// Joins the lines into one document with `\n`, no trailing terminator.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Projects the records through the column specs and encodes the document.
///
/// Every field, header and data alike, is wrapped in double quotes with
/// embedded quotes doubled. That uniform rule is the one variant that
/// round-trips arbitrary text (commas, quotes, newlines) through a standard
/// CSV reader, so no field is ever left unquoted for "looking safe".
///
/// This layer has no error conditions: a record missing all of a column's
/// source keys simply yields an empty quoted field.
///
/// # Example
///
/// ```
/// use csv_export_rs::core::column::{resolve_columns, ColumnConfig};
/// use csv_export_rs::core::encoder::encode;
/// use csv_export_rs::core::record::{FieldValue, Record};
///
/// let columns = resolve_columns(vec![(
///     "note".to_string(),
///     ColumnConfig::Label("Note".to_string()),
/// )]);
///
/// let mut record = Record::new();
/// record.insert(
///     "note".to_string(),
///     FieldValue::Text("He said \"hi\"".to_string()),
/// );
///
/// let document = encode(&columns, &[record]);
///
/// assert_eq!(document.lines()[1], "\"He said \"\"hi\"\"\"");
/// ```
pub fn encode(columns: &[ColumnSpec], records: &[Record]) -> EncodedDocument {
    let mut lines = Vec::with_capacity(records.len() + 1);

    let labels: Vec<String> = columns.iter().map(|column| column.label.clone()).collect();
    lines.push(encode_line(&labels));

    for record in records {
        lines.push(encode_line(&project(columns, record)));
    }

    EncodedDocument { lines }
}

/// Resolves one record into its ordered field strings.
fn project(columns: &[ColumnSpec], record: &Record) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            let parts: Vec<String> = column
                .source_keys
                .iter()
                .map(|key| resolve_field(record, key, column))
                .collect();

            parts.join(&column.join_with)
        })
        .collect()
}

fn resolve_field(record: &Record, key: &str, column: &ColumnSpec) -> String {
    match record.get(key) {
        // Missing and null both resolve to the empty string, formatter or not.
        None => String::new(),
        Some(value) if value.is_null() => String::new(),
        Some(value) => match &column.formatter {
            Some(formatter) => formatter(value),
            None => value.to_field_string(),
        },
    }
}

fn encode_line(fields: &[String]) -> String {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    // Writing a record into an in-memory buffer cannot fail.
    let _ = writer.write_record(fields);

    let mut bytes = writer.into_inner().unwrap_or_default();
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    String::from_utf8(bytes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use csv::ReaderBuilder;

    use crate::core::column::{ColumnConfig, ColumnDescriptor, resolve_columns};
    use crate::core::record::{FieldValue, Record};

    use super::encode;

    fn record(fields: Vec<(&str, &str)>) -> Record {
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), FieldValue::Text(value.to_string())))
            .collect()
    }

    fn columns(pairs: Vec<(&str, ColumnConfig)>) -> Vec<crate::core::column::ColumnSpec> {
        resolve_columns(
            pairs
                .into_iter()
                .map(|(id, config)| (id.to_string(), config)),
        )
    }

    #[test]
    fn header_and_data_lines_are_fully_quoted() {
        let columns = columns(vec![
            ("name", ColumnConfig::Label("Name".to_string())),
            (
                "email",
                ColumnConfig::Descriptor(ColumnDescriptor::new("Email").keys(["email"])),
            ),
        ]);
        let records = vec![record(vec![("name", "A, Inc."), ("email", "a@x.com")])];

        let document = encode(&columns, &records);

        assert_eq!(document.header(), "\"Name\",\"Email\"");
        assert_eq!(document.lines()[1], "\"A, Inc.\",\"a@x.com\"");
        assert_eq!(document.record_count(), 1);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let columns = columns(vec![("note", ColumnConfig::Label("Note".to_string()))]);
        let records = vec![record(vec![("note", "He said \"hi\"")])];

        let document = encode(&columns, &records);

        assert_eq!(document.lines()[1], "\"He said \"\"hi\"\"\"");
    }

    #[test]
    fn multi_key_columns_join_resolved_values() {
        let columns = columns(vec![(
            "pair",
            ColumnConfig::Descriptor(
                ColumnDescriptor::new("Pair").keys(["a", "b"]).join_with("-"),
            ),
        )]);
        let records = vec![record(vec![("a", "X"), ("b", "Y")])];

        let document = encode(&columns, &records);

        assert_eq!(document.lines()[1], "\"X-Y\"");
    }

    #[test]
    fn missing_fields_yield_empty_quoted_strings() {
        let columns = columns(vec![
            ("present", ColumnConfig::Label("Present".to_string())),
            ("absent", ColumnConfig::Label("Absent".to_string())),
        ]);
        let records = vec![record(vec![("present", "here")])];

        let document = encode(&columns, &records);

        assert_eq!(document.lines()[1], "\"here\",\"\"");
    }

    #[test]
    fn null_fields_yield_empty_strings() {
        let columns = columns(vec![("gone", ColumnConfig::Label("Gone".to_string()))]);
        let mut rec = Record::new();
        rec.insert("gone".to_string(), FieldValue::Null);

        let document = encode(&columns, &[rec]);

        assert_eq!(document.lines()[1], "\"\"");
    }

    #[test]
    fn formatter_replaces_default_stringification() {
        let columns = columns(vec![(
            "total",
            ColumnConfig::Descriptor(ColumnDescriptor::new("Total").formatter(Box::new(
                |value: &FieldValue| format!("${}", value.to_field_string()),
            ))),
        )]);
        let mut rec = Record::new();
        rec.insert("total".to_string(), FieldValue::Float(12.5));

        let document = encode(&columns, &[rec]);

        assert_eq!(document.lines()[1], "\"$12.5\"");
    }

    #[test]
    fn column_order_is_independent_of_record_content() {
        let columns = columns(vec![
            ("b", ColumnConfig::Label("B".to_string())),
            ("a", ColumnConfig::Label("A".to_string())),
        ]);
        let records = vec![
            record(vec![("a", "1"), ("b", "2")]),
            record(vec![("b", "3"), ("a", "4")]),
        ];

        let document = encode(&columns, &records);

        assert_eq!(document.header(), "\"B\",\"A\"");
        assert_eq!(document.lines()[1], "\"2\",\"1\"");
        assert_eq!(document.lines()[2], "\"3\",\"4\"");
    }

    #[test]
    fn document_round_trips_through_a_standard_reader() {
        let columns = columns(vec![
            ("a", ColumnConfig::Label("A".to_string())),
            ("b", ColumnConfig::Label("B".to_string())),
        ]);
        let tricky = "line one\nline two, with \"quotes\", and commas";
        let records = vec![record(vec![("a", tricky), ("b", "plain")])];

        let document = encode(&columns, &records);

        let text = document.to_text();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());
        let row = reader
            .records()
            .next()
            .expect("one data row")
            .expect("row parses");

        assert_eq!(&row[0], tricky);
        assert_eq!(&row[1], "plain");
    }
}
