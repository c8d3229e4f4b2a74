// Wall clock labels for the time series charts
use crate::application::sample_source::LabelClock;
use chrono::Local;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl LabelClock for LocalClock {
    fn now_label(&self) -> String {
        Local::now().format("%H:%M:%S").to_string()
    }
}
