use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result, check_range};

/// Cooperative cancellation flag shared between the caller and the row workers.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-call options for the windowed reductions.
#[derive(Clone, Debug)]
pub struct BoxOptions {
    pub y_stride: usize,
    pub x_stride: usize,
    /// Worker threads; 1 runs on the calling thread.
    pub parallelism: usize,
    pub cancel: Option<CancelToken>,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            y_stride: 1,
            x_stride: 1,
            parallelism: 1,
            cancel: None,
        }
    }
}

impl BoxOptions {
    pub fn with_stride(mut self, y_stride: usize, x_stride: usize) -> Self {
        self.y_stride = y_stride;
        self.x_stride = x_stride;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn check_parallelism(&self) -> Result<()> {
        check_range("parallelism", self.parallelism, Some(0), None)
    }

    #[inline]
    pub(crate) fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(GridError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Demo run configuration, loadable from JSON. Missing keys take the defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Source grid
    pub rows: usize,
    pub cols: usize,
    pub seed: u64,
    pub min_value: i64,
    pub max_value: i64,

    // Window
    pub box_rows: usize,
    pub box_cols: usize,
    pub y_stride: usize,
    pub x_stride: usize,

    // Execution
    pub parallelism: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rows: 300,
            cols: 300,
            seed: 42,
            min_value: -3000,
            max_value: 3000,
            box_rows: 11,
            box_cols: 11,
            y_stride: 2,
            x_stride: 2,
            parallelism: 4,
        }
    }
}

impl Params {
    pub fn box_options(&self) -> BoxOptions {
        BoxOptions::default()
            .with_stride(self.y_stride, self.x_stride)
            .with_parallelism(self.parallelism)
    }
}
