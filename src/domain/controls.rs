// Control state: mode flags, update frequency and the lock screen
use super::error::DashboardError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Updates per second, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frequency(u32);

impl Frequency {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 5;

    pub fn new(hz: u32) -> Result<Self, DashboardError> {
        if (Self::MIN..=Self::MAX).contains(&hz) {
            Ok(Self(hz))
        } else {
            Err(DashboardError::InvalidFrequency(hz.to_string()))
        }
    }

    /// Parse user input. Only a plain integer in range is accepted; unlike a
    /// lenient prefix parse, `"2.5"` and `"3abc"` are rejected rather than
    /// read as 2 and 3.
    pub fn parse(input: &str) -> Result<Self, DashboardError> {
        let invalid = || DashboardError::InvalidFrequency(input.to_string());
        let hz: i64 = input.trim().parse().map_err(|_| invalid())?;
        u32::try_from(hz)
            .ok()
            .and_then(|hz| Self::new(hz).ok())
            .ok_or_else(invalid)
    }

    pub fn hz(self) -> u32 {
        self.0
    }

    /// Tick period, `1000 / hz` whole milliseconds.
    pub fn period(self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.0))
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

/// What a fired tick does given the current flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickMode {
    /// Not transmitting, no ticks scheduled.
    Idle,
    /// Ticks fire but produce no sample.
    Armed,
    /// Every tick applies one sample.
    Active,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub tracking: bool,
    pub transmitting: bool,
    pub frequency: Frequency,
}

impl ControlState {
    pub fn with_frequency(frequency: Frequency) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> TickMode {
        match (self.transmitting, self.tracking) {
            (false, _) => TickMode::Idle,
            (true, false) => TickMode::Armed,
            (true, true) => TickMode::Active,
        }
    }
}

/// Password-gated screen lock. The password input itself lives in the
/// client, which empties it after a successful unlock.
#[derive(Debug, Clone)]
pub struct LockScreen {
    secret: String,
    locked: bool,
}

impl LockScreen {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Unlock if `password` matches the secret exactly.
    pub fn unlock(&mut self, password: &str) -> Result<(), DashboardError> {
        if password != self.secret {
            return Err(DashboardError::WrongPassword);
        }
        self.locked = false;
        Ok(())
    }

    pub fn ensure_unlocked(&self) -> Result<(), DashboardError> {
        if self.locked {
            Err(DashboardError::Locked)
        } else {
            Ok(())
        }
    }
}
