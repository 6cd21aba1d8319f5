use std::fmt;

/// Axis a stride check failed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "rows"),
            Axis::Columns => write!(f, "columns"),
        }
    }
}

/// Every failure the grid and window routines can report.
/// Validation errors are raised before any output is produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("'{name}' cannot be even (got {value})")]
    EvenDimension { name: &'static str, value: usize },

    #[error("'{name}' value {value} is out of range{}", bounds(.min, .max))]
    OutOfRange {
        name: &'static str,
        value: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    #[error("{axis} stride {stride} must be <= window size {window}")]
    StrideExceedsWindow {
        axis: Axis,
        stride: usize,
        window: usize,
    },

    #[error("remaining {axis} {remaining} must be divisible by stride {stride}")]
    StrideNotDivisible {
        axis: Axis,
        remaining: usize,
        stride: usize,
    },

    #[error("index ({row}, {col}) is outside a {rows}x{cols} grid")]
    IndexOutOfBounds {
        row: isize,
        col: isize,
        rows: usize,
        cols: usize,
    },

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled,

    #[error("thread pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, GridError>;

fn bounds(min: &Option<usize>, max: &Option<usize>) -> String {
    match (*min, *max) {
        (Some(lo), Some(hi)) => format!(" ({lo}, {hi})"),
        (Some(lo), None) => format!(" (must be > {lo})"),
        (None, Some(hi)) => format!(" (must be < {hi})"),
        (None, None) => String::new(),
    }
}

/// Reject even values.
#[inline]
pub fn check_odd(name: &'static str, value: usize) -> Result<()> {
    if value % 2 == 0 {
        return Err(GridError::EvenDimension { name, value });
    }
    Ok(())
}

/// Open-interval check: `value` must satisfy `min < value < max` for each bound given.
#[inline]
pub fn check_range(
    name: &'static str,
    value: usize,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<()> {
    let too_big = max.is_some_and(|hi| value >= hi);
    let too_small = min.is_some_and(|lo| value <= lo);
    if too_big || too_small {
        return Err(GridError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
