//! Mock version of the delivery sink.
use mockall::mock;

use csv_export_rs::error::ExportError;
use csv_export_rs::sink::FileSink;

mock! {
    pub Sink {}
    impl FileSink for Sink {
        fn deliver(
            &self,
            document: &str,
            filename: &str,
            content_type: &str,
        ) -> Result<(), ExportError>;
    }
}
