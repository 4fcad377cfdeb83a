use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnsoError {
    #[error("analysis range {start}..={end} spans {span} years; at least 31 are required for climatology windows")]
    InsufficientRange { start: i32, end: i32, span: i64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
