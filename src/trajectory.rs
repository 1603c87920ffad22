//! Closed-form projectile trajectory sampled once per timeline frame.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DURATION_SECONDS, DEFAULT_FRAME_RATE, DEFAULT_GRAVITY, MAX_TRAJECTORY_FRAMES};
use crate::error::{LaunchError, Result};
use crate::velocity::VelocitySpec;

/// Input to [`generate_trajectory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRequest {
    pub velocity: VelocitySpec,
    pub duration_seconds: f64,
    pub gravity: f64,            // units/s², negative pulls toward -Y
    pub frame_rate: f64,         // frames per second
    pub start_position: Vector3<f64>,
    pub start_frame: i64,
}

impl Default for TrajectoryRequest {
    fn default() -> Self {
        Self {
            velocity: VelocitySpec::default(),
            duration_seconds: DEFAULT_DURATION_SECONDS,
            gravity: DEFAULT_GRAVITY,
            frame_rate: DEFAULT_FRAME_RATE,
            start_position: Vector3::zeros(),
            start_frame: 0,
        }
    }
}

/// One keyed position of the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub frame: i64,
    pub time_seconds: f64,
    pub position: Vector3<f64>,
}

/// Aggregate figures for a generated trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub sample_count: usize,
    pub start_frame: i64,
    pub end_frame: i64,
    pub duration_seconds: f64,
    pub apex_height: f64,
    pub apex_frame: i64,
    pub horizontal_distance: f64,
    pub final_position: Vector3<f64>,
}

impl TrajectoryRequest {
    fn validate(&self) -> Result<()> {
        if !(self.frame_rate > 0.0) || !self.frame_rate.is_finite() {
            return Err(LaunchError::config(format!(
                "frame rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if !self.duration_seconds.is_finite() {
            return Err(LaunchError::config(format!(
                "duration must be finite, got {}",
                self.duration_seconds
            )));
        }
        if !self.gravity.is_finite() {
            return Err(LaunchError::config(format!("gravity must be finite, got {}", self.gravity)));
        }
        if !self.velocity.is_finite() {
            return Err(LaunchError::config("velocity components must be finite"));
        }
        if !self.start_position.iter().all(|c| c.is_finite()) {
            return Err(LaunchError::config("start position must be finite"));
        }
        Ok(())
    }

    /// Number of frames after the start frame, i.e. one less than the sample count.
    ///
    /// Fails when the count exceeds [`MAX_TRAJECTORY_FRAMES`] or the last
    /// frame number does not fit in an `i64`.
    pub fn total_frames(&self) -> Result<i64> {
        self.validate()?;
        let frames = total_frames(self.duration_seconds, self.frame_rate);
        if frames > MAX_TRAJECTORY_FRAMES {
            return Err(LaunchError::config(format!(
                "{}s at {} fps is more than {} frames",
                self.duration_seconds, self.frame_rate, MAX_TRAJECTORY_FRAMES
            )));
        }
        if self.start_frame.checked_add(frames).is_none() {
            return Err(LaunchError::config(format!(
                "last frame overflows: start frame {} plus {} frames",
                self.start_frame, frames
            )));
        }
        Ok(frames)
    }

    /// Position at `t` seconds after launch.
    pub fn position_at(&self, time_seconds: f64) -> Vector3<f64> {
        let v = self.velocity.resolve();
        let t = time_seconds;
        self.start_position + v * t + Vector3::new(0.0, 0.5 * self.gravity * t * t, 0.0)
    }
}

/// `floor(duration * frame_rate)`, zero for a non-positive duration.
/// Saturates at `i64::MAX`; see [`TrajectoryRequest::total_frames`] for the checked form.
pub fn total_frames(duration_seconds: f64, frame_rate: f64) -> i64 {
    if duration_seconds <= 0.0 {
        return 0;
    }
    (duration_seconds * frame_rate).floor() as i64
}

/// Computes one sample per frame from the start frame through
/// `start_frame + total_frames`, inclusive.
pub fn generate_trajectory(request: &TrajectoryRequest) -> Result<Vec<TrajectorySample>> {
    let frames = request.total_frames()?;

    let samples: Vec<TrajectorySample> = (0..=frames)
        .map(|f| {
            let time_seconds = f as f64 / request.frame_rate;
            TrajectorySample {
                frame: request.start_frame + f,
                time_seconds,
                position: request.position_at(time_seconds),
            }
        })
        .collect();

    log::debug!(
        "Generated {} samples for frames {}..={} at {} fps",
        samples.len(),
        request.start_frame,
        request.start_frame + frames,
        request.frame_rate
    );

    Ok(samples)
}

/// Time until the projectile falls back to its launch height.
///
/// `None` when it never comes back down (non-negative gravity or no upward velocity).
pub fn flight_time(velocity: &VelocitySpec, gravity: f64) -> Option<f64> {
    let vy = velocity.resolve().y;
    if gravity >= 0.0 || vy <= 0.0 || !gravity.is_finite() || !vy.is_finite() {
        return None;
    }
    Some(-2.0 * vy / gravity)
}

/// [`flight_time`] expressed in whole frames.
pub fn flight_frames(velocity: &VelocitySpec, gravity: f64, frame_rate: f64) -> Option<i64> {
    if !(frame_rate > 0.0) {
        return None;
    }
    flight_time(velocity, gravity).map(|t| total_frames(t, frame_rate))
}

pub fn summarize(samples: &[TrajectorySample]) -> Option<TrajectorySummary> {
    let first = samples.first()?;
    let last = samples.last()?;

    let apex = samples
        .iter()
        .fold(first, |best, s| if s.position.y > best.position.y { s } else { best });

    let offset = last.position - first.position;

    Some(TrajectorySummary {
        sample_count: samples.len(),
        start_frame: first.frame,
        end_frame: last.frame,
        duration_seconds: last.time_seconds - first.time_seconds,
        apex_height: apex.position.y,
        apex_frame: apex.frame,
        horizontal_distance: (offset.x * offset.x + offset.z * offset.z).sqrt(),
        final_position: last.position,
    })
}
