// Ports for sample generation and time labels
use crate::domain::sample::Sample;

/// Produces one sample per accepted tick.
pub trait SampleSource: Send {
    fn next_sample(&mut self) -> Sample;
}

/// Formats the current time for chart labels.
pub trait LabelClock: Send + Sync {
    fn now_label(&self) -> String;
}
