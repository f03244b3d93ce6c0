//! Iteration count statistics.

use std::fmt;

use fnv::FnvHashMap;
use log::trace;

use crate::grid::Frame;

/// How many pixels of a [`Frame`] stopped at each iteration count.
#[derive(Clone, Debug, Default)]
pub struct IterationHistogram {
    max_iterations: u32,
    total_samples: usize,
    interior_samples: usize,
    histogram: FnvHashMap<u32, u32>,
}

impl IterationHistogram {
    pub fn from_frame(frame: &Frame) -> Self {
        trace!("begin IterationHistogram::from_frame");

        let mut histogram = Self {
            max_iterations: frame.max_iterations(),
            ..Self::default()
        };
        for &iteration in frame.iterations() {
            histogram.add(iteration);
        }

        debug_assert_eq!(
            histogram.total_samples,
            histogram
                .histogram
                .values()
                .map(|value| *value as usize)
                .sum::<usize>()
        );

        trace!("end IterationHistogram::from_frame");
        histogram
    }

    fn add(&mut self, iteration: u32) {
        *self.histogram.entry(iteration).or_insert(0) += 1;
        self.total_samples += 1;
        if iteration >= self.max_iterations {
            self.interior_samples += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.total_samples
    }

    /// Pixels that reached the iteration limit without escaping.
    pub fn interior(&self) -> usize {
        self.interior_samples
    }

    pub fn escaped(&self) -> usize {
        self.total_samples - self.interior_samples
    }

    pub fn count(&self, iteration: u32) -> u32 {
        self.histogram.get(&iteration).copied().unwrap_or(0)
    }

    /// `(iteration count, pixels)` pairs, lowest iteration count first.
    pub fn buckets(&self) -> Vec<(u32, u32)> {
        let mut buckets: Vec<(u32, u32)> = self
            .histogram
            .iter()
            .map(|(iteration, count)| (*iteration, *count))
            .collect();
        buckets.sort_unstable();
        buckets
    }

    /// Average iteration count over escaped pixels, `None` if nothing escaped.
    pub fn mean_escape_iterations(&self) -> Option<f64> {
        if self.escaped() == 0 {
            return None;
        }

        let sum: u64 = self
            .histogram
            .iter()
            .filter(|(iteration, _)| **iteration < self.max_iterations)
            .map(|(iteration, count)| u64::from(*iteration) * u64::from(*count))
            .sum();
        Some(sum as f64 / self.escaped() as f64)
    }
}

/// One-line summary for the debug log.
impl fmt::Display for IterationHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pixels: {} interior, {} escaped",
            self.total(),
            self.interior(),
            self.escaped()
        )?;
        match self.mean_escape_iterations() {
            Some(mean) => write!(f, " after {:.2} iterations on average", mean),
            None => Ok(()),
        }
    }
}
