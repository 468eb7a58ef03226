use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error(
        "specification/result length mismatch: {specifications} specifications, {results} results"
    )]
    LengthMismatch {
        specifications: usize,
        results: usize,
    },

    #[error("subplot position out of bounds: row={row}, col={col} in {num_rows}x{num_cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        num_rows: usize,
        num_cols: usize,
    },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid builder state: {0}")]
    InvalidState(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
