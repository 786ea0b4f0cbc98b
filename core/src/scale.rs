//! The fixed matrix of workload sizes shared by every workload.

use std::fmt;
use std::ops::Range;

/// Item counts every workload is parameterised over, ascending.
pub const SCALE_MATRIX: [usize; 8] = [0, 1, 10, 100, 1_000, 10_000, 100_000, 1_000_000];

/// Number of values pre-loaded by workloads that measure a container already
/// holding data (`RefillFull`, `Stable`).
pub const FILL_COUNT: usize = 10_000;

/// Number of fill/drain cycles one `Refill`/`RefillFull` repetition performs.
pub const REFILL_COUNT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalePoint {
    pub index: usize,
    pub count: usize,
}

impl ScalePoint {
    /// Region label handed to the measurement sink.
    pub fn label(&self) -> String {
        self.count.to_string()
    }
}

impl fmt::Display for ScalePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count)
    }
}

/// Index range over [`SCALE_MATRIX`] a workload runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleRange {
    start: usize,
    end: usize,
}

impl ScaleRange {
    /// Every point, including the empty one.
    pub const FULL: ScaleRange = ScaleRange::new(0, SCALE_MATRIX.len());
    /// Skips N=0, which is meaningless for fill/drain semantics.
    pub const NON_ZERO: ScaleRange = ScaleRange::new(1, SCALE_MATRIX.len());
    /// Skips N=0 and the largest point, too slow to repeat `REFILL_COUNT` times.
    pub const BOUNDED: ScaleRange = ScaleRange::new(1, SCALE_MATRIX.len() - 1);

    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end.min(SCALE_MATRIX.len())
    }

    pub fn contains(&self, count: usize) -> bool {
        self.points().any(|p| p.count == count)
    }

    pub fn points(&self) -> impl Iterator<Item = ScalePoint> + '_ {
        self.indices().map(|index| ScalePoint {
            index,
            count: SCALE_MATRIX[index],
        })
    }

    /// Points of this range whose count does not exceed `max_count`.
    pub fn capped(&self, max_count: Option<usize>) -> Vec<ScalePoint> {
        self.points()
            .filter(|p| max_count.is_none_or(|max| p.count <= max))
            .collect()
    }
}

/// Every point of the matrix, regardless of any workload's range.
pub fn all_points() -> impl Iterator<Item = ScalePoint> {
    SCALE_MATRIX
        .iter()
        .enumerate()
        .map(|(index, &count)| ScalePoint { index, count })
}
