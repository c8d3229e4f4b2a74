// Dashboard domain model - the three live charts and the position readout
use super::sample::{EMPTY_COORDINATE, Position, Sample};
use super::series::{LabeledSeries, LabeledSeriesSnapshot, Series};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Dashboard {
    positions: Series<Position>,
    rcs: LabeledSeries<1>,
    speed_distance: LabeledSeries<2>,
    longitude: String,
    latitude: String,
}

impl Dashboard {
    /// `capacity` bounds the RCS and speed/distance charts; the position
    /// chart keeps every point for the session.
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: Series::unbounded(),
            rcs: LabeledSeries::bounded(capacity),
            speed_distance: LabeledSeries::bounded(capacity),
            longitude: EMPTY_COORDINATE.to_string(),
            latitude: EMPTY_COORDINATE.to_string(),
        }
    }

    /// Feed one sample to every chart. `label` is the time axis label.
    /// The returned update is what a client needs to replay the change on
    /// its own copy of the charts.
    pub fn apply(&mut self, sample: &Sample, label: &str) -> ChartUpdate {
        let position = sample.position();
        self.positions.push(position);
        let rcs_evicted = self.rcs.push(label, [sample.rcs]);
        let speed_distance_evicted = self
            .speed_distance
            .push(label, [sample.speed, sample.distance]);
        self.longitude = sample.longitude.clone();
        self.latitude = sample.latitude.clone();

        ChartUpdate {
            sample: sample.clone(),
            label: label.to_string(),
            position,
            rcs_evicted,
            speed_distance_evicted,
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.rcs.clear();
        self.speed_distance.clear();
        self.longitude = EMPTY_COORDINATE.to_string();
        self.latitude = EMPTY_COORDINATE.to_string();
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            coordinate: self.positions.to_vec(),
            rcs: self.rcs.snapshot(),
            speed_distance: self.speed_distance.snapshot(),
            longitude: self.longitude.clone(),
            latitude: self.latitude.clone(),
        }
    }
}

/// One applied sample: append it to every chart, then drop the front
/// point of each time series whose flag is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartUpdate {
    pub sample: Sample,
    pub label: String,
    pub position: Position,
    pub rcs_evicted: bool,
    pub speed_distance_evicted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub coordinate: Vec<Position>,
    pub rcs: LabeledSeriesSnapshot,
    pub speed_distance: LabeledSeriesSnapshot,
    pub longitude: String,
    pub latitude: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(i: usize) -> Sample {
        Sample::new(i as f64, -(i as f64), 0.1 * i as f64, 0.01 * i as f64, i as f64)
    }

    #[test]
    fn test_apply_feeds_every_chart() {
        let mut dashboard = Dashboard::new(20);
        for i in 0..25 {
            dashboard.apply(&sample(i), &format!("00:00:{:02}", i));
        }

        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.coordinate.len(), 25);
        assert_eq!(snapshot.coordinate[24], Position { x: 24.0, y: -24.0 });
        assert_eq!(snapshot.rcs.labels.len(), 20);
        assert_eq!(snapshot.rcs.labels[0], "00:00:05");
        assert_eq!(snapshot.speed_distance.datasets.len(), 2);
        assert_eq!(snapshot.speed_distance.datasets[1][0], 5.0);
        assert_eq!(snapshot.speed_distance.datasets[1][19], 24.0);
        assert_eq!(snapshot.longitude, "24.0000");
        assert_eq!(snapshot.latitude, "-24.0000");
    }

    #[test]
    fn test_update_reports_evictions() {
        let mut dashboard = Dashboard::new(20);
        for i in 0..20 {
            let update = dashboard.apply(&sample(i), "t");
            assert!(!update.rcs_evicted && !update.speed_distance_evicted);
        }

        let update = dashboard.apply(&sample(20), "t");
        assert!(update.rcs_evicted);
        assert!(update.speed_distance_evicted);
        assert_eq!(update.position, Position { x: 20.0, y: -20.0 });
        assert_eq!(update.sample, sample(20));
    }

    #[test]
    fn test_update_size_independent_of_history() {
        let same = Sample::new(12.5, -40.25, 3.0, 1.5, 30.0);
        let mut dashboard = Dashboard::new(20);

        let mut sizes = Vec::new();
        for applied in 1..=2000 {
            let update = dashboard.apply(&same, "10:00:00");
            if [21, 1000, 2000].contains(&applied) {
                sizes.push(serde_json::to_vec(&update).unwrap().len());
            }
        }
        assert_eq!(sizes.len(), 3);
        assert!(sizes.iter().all(|&size| size == sizes[0]), "sizes {:?}", sizes);
        assert_eq!(dashboard.snapshot().coordinate.len(), 2000);
    }

    #[test]
    fn test_clear_resets_series_and_readout() {
        let mut dashboard = Dashboard::new(20);
        dashboard.apply(&sample(3), "t");
        dashboard.clear();

        let snapshot = dashboard.snapshot();
        assert!(snapshot.coordinate.is_empty());
        assert!(snapshot.rcs.labels.is_empty());
        assert!(snapshot.speed_distance.labels.is_empty());
        assert_eq!(snapshot.longitude, "0.0000");
        assert_eq!(snapshot.latitude, "0.0000");

        dashboard.apply(&sample(1), "t");
        let snapshot = dashboard.snapshot();
        assert_eq!(snapshot.coordinate, vec![Position { x: 1.0, y: -1.0 }]);
        assert_eq!(snapshot.rcs.datasets, vec![vec![0.1]]);
    }
}
