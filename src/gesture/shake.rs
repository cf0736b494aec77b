//! Shake-to-reveal
//!
//! Motion samples above the threshold count as shakes, debounced by the
//! minimum interval. Without a motion sensor the screen falls back to a
//! manual control where every press counts.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::ProgressAccumulator;
use crate::config::ShakeConfig;
use crate::{KeepsakeError, Result};

/// One accelerometer reading, in g
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Source of motion samples
pub trait MotionSensor: Send {
    fn name(&self) -> &str;

    /// Begin sampling. Fails when no hardware is present.
    fn start(&mut self) -> Result<()>;

    /// Next pending sample, if any
    fn poll(&mut self) -> Option<MotionSample>;
}

/// Stand-in for machines without an accelerometer
#[derive(Debug, Default)]
pub struct NoMotionSensor;

impl MotionSensor for NoMotionSensor {
    fn name(&self) -> &str {
        "none"
    }

    fn start(&mut self) -> Result<()> {
        Err(KeepsakeError::Sensor("no accelerometer available".to_string()))
    }

    fn poll(&mut self) -> Option<MotionSample> {
        None
    }
}

/// Where shakes come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeSource {
    Sensor,
    Manual,
}

pub struct ShakeDetector {
    progress: ProgressAccumulator,
    threshold_g: f64,
    min_interval: Duration,
    last_shake: Option<Instant>,
    source: ShakeSource,
    sensor: Option<Box<dyn MotionSensor>>,
}

impl std::fmt::Debug for ShakeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShakeDetector")
            .field("progress", &self.progress)
            .field("source", &self.source)
            .field("sensor", &self.sensor.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}

impl ShakeDetector {
    /// Starts in manual mode until a sensor is attached
    pub fn new(config: &ShakeConfig) -> Self {
        let required = config.required_shakes as f64;
        Self {
            progress: ProgressAccumulator::new(required, required),
            threshold_g: config.threshold_g,
            min_interval: config.min_interval,
            last_shake: None,
            source: ShakeSource::Manual,
            sensor: None,
        }
    }

    /// Try to start `sensor`; on failure stay on the manual control
    pub fn attach(&mut self, mut sensor: Box<dyn MotionSensor>) -> ShakeSource {
        match sensor.start() {
            Ok(()) => {
                info!(sensor = sensor.name(), "motion sensor started");
                self.sensor = Some(sensor);
                self.source = ShakeSource::Sensor;
            }
            Err(e) => {
                warn!(sensor = sensor.name(), error = %e, "motion sensor unavailable, using manual shakes");
                self.sensor = None;
                self.source = ShakeSource::Manual;
            }
        }
        self.source
    }

    pub fn source(&self) -> ShakeSource {
        self.source
    }

    /// Drain pending samples from the attached sensor
    pub fn poll_sensor(&mut self, now: Instant) -> bool {
        let mut revealed = false;
        while let Some(sample) = self.sensor.as_mut().and_then(|s| s.poll()) {
            revealed |= self.on_sample(sample, now);
        }
        revealed
    }

    /// Feed one reading. Returns true on the shake that reveals.
    pub fn on_sample(&mut self, sample: MotionSample, now: Instant) -> bool {
        if self.progress.is_revealed() || sample.magnitude() <= self.threshold_g {
            return false;
        }
        if let Some(last) = self.last_shake {
            if now.saturating_duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_shake = Some(now);
        self.count_shake()
    }

    /// The fallback control; each press is one shake
    pub fn manual_shake(&mut self) -> bool {
        self.count_shake()
    }

    fn count_shake(&mut self) -> bool {
        if self.progress.is_revealed() {
            return false;
        }
        let revealed = self.progress.advance(1.0);
        debug!(shakes = self.shakes(), "shake counted");
        if revealed {
            info!("shake reveal complete");
        }
        revealed
    }

    pub fn shakes(&self) -> u32 {
        self.progress.value() as u32
    }

    pub fn required(&self) -> u32 {
        self.progress.max() as u32
    }

    pub fn is_revealed(&self) -> bool {
        self.progress.is_revealed()
    }
}
