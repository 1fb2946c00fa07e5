use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::error::ExportError;

pub mod notice;

/// Content classification attached to every delivered export document.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// The delivery seam of the engine: turn an encoded document into a file
/// offered to the user under the given name.
pub trait FileSink {
    fn deliver(
        &self,
        document: &str,
        filename: &str,
        content_type: &str,
    ) -> Result<(), ExportError>;
}

/// Sink that writes the document into a target directory.
pub struct FileSystemSink {
    dir: PathBuf,
}

impl FileSystemSink {
    pub fn new(dir: impl Into<PathBuf>) -> FileSystemSink {
        FileSystemSink { dir: dir.into() }
    }
}

impl FileSink for FileSystemSink {
    fn deliver(
        &self,
        document: &str,
        filename: &str,
        content_type: &str,
    ) -> Result<(), ExportError> {
        let path = self.dir.join(filename);

        fs::write(&path, document).map_err(|error| ExportError::Sink(error.to_string()))?;

        debug!("Delivered {} ({}) to {}", filename, content_type, path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use super::{CSV_CONTENT_TYPE, FileSink, FileSystemSink};

    #[test]
    fn delivers_document_under_the_given_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let sink = FileSystemSink::new(dir.path());

        sink.deliver("\"A\"\n\"1\"", "out.csv", CSV_CONTENT_TYPE)
            .expect("deliver");

        let content = read_to_string(dir.path().join("out.csv")).expect("read back");
        assert_eq!(content, "\"A\"\n\"1\"");
    }

    #[test]
    fn missing_target_directory_is_a_sink_error() {
        let sink = FileSystemSink::new("/definitely/not/a/real/dir");

        let result = sink.deliver("x", "out.csv", CSV_CONTENT_TYPE);

        assert!(result.is_err());
    }
}
