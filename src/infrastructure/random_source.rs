// Pseudo-random sample source
use crate::application::sample_source::SampleSource;
use crate::domain::sample::{COORDINATE_RANGE, DISTANCE_RANGE, RCS_RANGE, SPEED_RANGE, Sample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws every field uniformly from its display range.
#[derive(Debug)]
pub struct RandomSampleSource {
    rng: StdRng,
}

impl RandomSampleSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl SampleSource for RandomSampleSource {
    fn next_sample(&mut self) -> Sample {
        Sample::new(
            self.rng.gen_range(COORDINATE_RANGE),
            self.rng.gen_range(COORDINATE_RANGE),
            self.rng.gen_range(RCS_RANGE),
            self.rng.gen_range(SPEED_RANGE),
            self.rng.gen_range(DISTANCE_RANGE),
        )
    }
}
