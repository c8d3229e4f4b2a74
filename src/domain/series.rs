// Live chart series with front eviction.
// Invariants: insertion order == arrival order, len <= capacity after every push.
use serde::Serialize;
use std::collections::VecDeque;

/// Points kept by each time series chart.
pub const DEFAULT_TIME_SERIES_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Unbounded,
    Bounded(usize),
}

impl Capacity {
    fn exceeded_by(self, len: usize) -> bool {
        match self {
            Capacity::Unbounded => false,
            Capacity::Bounded(max) => len > max,
        }
    }
}

/// Unlabeled series, e.g. the position scatter.
#[derive(Debug, Clone)]
pub struct Series<T> {
    values: VecDeque<T>,
    capacity: Capacity,
}

impl<T: Clone> Series<T> {
    pub fn new(capacity: Capacity) -> Self {
        Self {
            values: VecDeque::new(),
            capacity,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(Capacity::Unbounded)
    }

    /// Append a value, evicting the oldest one if the series overflows.
    /// Returns the evicted value.
    pub fn push(&mut self, value: T) -> Option<T> {
        self.values.push_back(value);
        if self.capacity.exceeded_by(self.values.len()) {
            self.values.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.values.iter().cloned().collect()
    }
}

/// Time series sharing one label axis across `TRACKS` value tracks.
///
/// Labels and every track are pushed and evicted together, so they always
/// have the same length.
#[derive(Debug, Clone)]
pub struct LabeledSeries<const TRACKS: usize> {
    labels: VecDeque<String>,
    tracks: [VecDeque<f64>; TRACKS],
    capacity: Capacity,
}

impl<const TRACKS: usize> LabeledSeries<TRACKS> {
    pub fn new(capacity: Capacity) -> Self {
        Self {
            labels: VecDeque::new(),
            tracks: std::array::from_fn(|_| VecDeque::new()),
            capacity,
        }
    }

    pub fn bounded(max: usize) -> Self {
        Self::new(Capacity::Bounded(max))
    }

    /// Append one label and one value per track. At most one entry is
    /// evicted, from the front of every sequence; returns whether it was.
    pub fn push(&mut self, label: impl Into<String>, values: [f64; TRACKS]) -> bool {
        self.labels.push_back(label.into());
        for (track, value) in self.tracks.iter_mut().zip(values) {
            track.push_back(value);
        }

        if !self.capacity.exceeded_by(self.labels.len()) {
            return false;
        }
        self.labels.pop_front();
        for track in self.tracks.iter_mut() {
            track.pop_front();
        }
        true
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        for track in self.tracks.iter_mut() {
            track.clear();
        }
    }

    pub fn snapshot(&self) -> LabeledSeriesSnapshot {
        LabeledSeriesSnapshot {
            labels: self.labels.iter().cloned().collect(),
            datasets: self
                .tracks
                .iter()
                .map(|track| track.iter().copied().collect())
                .collect(),
        }
    }
}

/// Chart-ready copy of a labeled series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeriesSnapshot {
    pub labels: Vec<String>,
    pub datasets: Vec<Vec<f64>>,
}
