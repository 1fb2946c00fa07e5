use log::warn;

/// User-visible outcome notices raised by the orchestrator for the two
/// non-delivering terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportNotice {
    /// The export ran but there was nothing to deliver.
    NoRecords,
    /// The export could not be completed.
    ExportFailed,
}

/// Surface for the minimal user-visible affordance on empty or failed
/// exports. A UI host would show a toast or inline notice; the default
/// implementation writes to the log.
pub trait ExportNotifier {
    fn notify(&self, notice: ExportNotice);
}

#[derive(Default)]
pub struct LogNotifier;

impl ExportNotifier for LogNotifier {
    fn notify(&self, notice: ExportNotice) {
        match notice {
            ExportNotice::NoRecords => {
                warn!("There is no data to export for the given request.")
            }
            ExportNotice::ExportFailed => {
                warn!("The export could not be completed. Please try again.")
            }
        }
    }
}
