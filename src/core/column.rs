use crate::core::record::FieldValue;

/// Separator used for multi-key columns when the caller does not set one.
pub const DEFAULT_JOIN: &str = ", ";

/// Custom stringification for a column, applied to each present raw value in
/// place of the default.
pub type Formatter = Box<dyn Fn(&FieldValue) -> String + Send + Sync>;

/// Caller-supplied configuration for one output column.
///
/// Call sites historically passed either a bare display label or a richer
/// per-column object; the two shapes are kept apart explicitly instead of
/// being duck-typed.
pub enum ColumnConfig {
    /// A plain display label; the column identifier doubles as the field name
    /// read from each record.
    Label(String),
    /// A full descriptor with explicit source mapping.
    Descriptor(ColumnDescriptor),
}

/// The rich column configuration shape.
///
/// # Example
///
/// ```
/// use csv_export_rs::core::column::ColumnDescriptor;
///
/// let descriptor = ColumnDescriptor::new("Customer")
///     .keys(["first_name", "last_name"])
///     .join_with(" ");
/// ```
pub struct ColumnDescriptor {
    label: String,
    keys: Option<Vec<String>>,
    key: Option<String>,
    join_with: Option<String>,
    skip: bool,
    formatter: Option<Formatter>,
}

impl ColumnDescriptor {
    pub fn new(label: impl Into<String>) -> ColumnDescriptor {
        ColumnDescriptor {
            label: label.into(),
            keys: None,
            key: None,
            join_with: None,
            skip: false,
            formatter: None,
        }
    }

    /// Sets the ordered source keys read from each record.
    pub fn keys<I, S>(mut self, keys: I) -> ColumnDescriptor
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Sets a single source key. Ignored when `keys` is also set.
    pub fn key(mut self, key: impl Into<String>) -> ColumnDescriptor {
        self.key = Some(key.into());
        self
    }

    /// Sets the separator used when the column reads more than one key.
    pub fn join_with(mut self, join_with: impl Into<String>) -> ColumnDescriptor {
        self.join_with = Some(join_with.into());
        self
    }

    /// Excludes the column from the output entirely.
    pub fn skip(mut self, skip: bool) -> ColumnDescriptor {
        self.skip = skip;
        self
    }

    /// Overrides the default stringification for this column.
    pub fn formatter(mut self, formatter: Formatter) -> ColumnDescriptor {
        self.formatter = Some(formatter);
        self
    }
}

/// One normalized output column.
///
/// The ordered sequence of specs defines the column order of the header line
/// and of every data line; it never depends on record content.
pub struct ColumnSpec {
    pub label: String,
    pub source_keys: Vec<String>,
    pub join_with: String,
    pub formatter: Option<Formatter>,
}

/// Normalizes a header/column configuration into the canonical ordered
/// [`ColumnSpec`] sequence.
///
/// Resolution rule per column, in priority order: a `skip` descriptor is
/// dropped entirely; otherwise the source keys are the descriptor's `keys`
/// when non-empty, else its single `key`, else the logical column identifier
/// itself. Insertion order is preserved. There are no error conditions:
/// absent or malformed descriptors degrade to the identifier-as-key fallback.
pub fn resolve_columns<I>(columns: I) -> Vec<ColumnSpec>
where
    I: IntoIterator<Item = (String, ColumnConfig)>,
{
    let mut specs = Vec::new();

    for (id, config) in columns {
        match config {
            ColumnConfig::Label(label) => specs.push(ColumnSpec {
                label,
                source_keys: vec![id],
                join_with: DEFAULT_JOIN.to_string(),
                formatter: None,
            }),
            ColumnConfig::Descriptor(descriptor) => {
                let ColumnDescriptor {
                    label,
                    keys,
                    key,
                    join_with,
                    skip,
                    formatter,
                } = descriptor;

                if skip {
                    continue;
                }

                let source_keys = match (keys, key) {
                    (Some(keys), _) if !keys.is_empty() => keys,
                    (_, Some(key)) => vec![key],
                    _ => vec![id],
                };

                specs.push(ColumnSpec {
                    label,
                    source_keys,
                    join_with: join_with.unwrap_or_else(|| DEFAULT_JOIN.to_string()),
                    formatter,
                });
            }
        }
    }

    specs
}
