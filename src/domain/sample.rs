// Sample domain model
use serde::Serialize;
use std::ops::Range;

pub const COORDINATE_RANGE: Range<f64> = -100.0..100.0;
pub const RCS_RANGE: Range<f64> = 0.0..10.0;
pub const SPEED_RANGE: Range<f64> = 0.0..2.0;
pub const DISTANCE_RANGE: Range<f64> = 0.0..60.0;

/// Readout shown for the position before any sample arrives.
pub const EMPTY_COORDINATE: &str = "0.0000";

/// One generated radar reading.
///
/// Coordinates are kept as fixed 4-decimal strings, the form they are
/// displayed in; the plotted position is parsed back from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub longitude: String,
    pub latitude: String,
    pub rcs: f64,
    pub speed: f64,
    pub distance: f64,
}

impl Sample {
    pub fn new(longitude: f64, latitude: f64, rcs: f64, speed: f64, distance: f64) -> Self {
        Self {
            longitude: format_coordinate(longitude),
            latitude: format_coordinate(latitude),
            rcs,
            speed,
            distance,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.longitude.parse().unwrap_or_default(),
            y: self.latitude.parse().unwrap_or_default(),
        }
    }
}

/// A point on the coordinate chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

pub fn format_coordinate(value: f64) -> String {
    format!("{:.4}", value)
}
