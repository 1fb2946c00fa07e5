use time::OffsetDateTime;
use time::macros::format_description;

pub mod column;

pub mod encoder;

pub mod orchestrator;

pub mod record;

/// Builds the default date-stamped file name (`YYYY-MM-DD.csv`, UTC) used
/// when the caller does not supply one.
///
/// # Returns
///
/// A `String` containing the generated file name.
fn build_default_filename() -> String {
    let format = format_description!("[year]-[month]-[day]");
    match OffsetDateTime::now_utc().date().format(&format) {
        Ok(stamp) => format!("{stamp}.csv"),
        Err(_) => "export.csv".to_string(),
    }
}
