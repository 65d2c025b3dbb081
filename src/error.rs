use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid month \"{input}\" (expected YYYYMM or YYYY-MM)")]
    InvalidMonth { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Unknown schedule source: {input}")]
    UnknownSource { input: String },
}
