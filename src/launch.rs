//! Launch command: resolve the camera, generate its trajectory and key it.

use serde::{Deserialize, Serialize};

use crate::animation::{write_trajectory, AnimationCurve, AnimationWriter, Channel, PlaybackRange};
use crate::constants::{DEFAULT_DURATION_SECONDS, DEFAULT_FRAME_RATE, DEFAULT_GRAVITY};
use crate::error::{LaunchError, Result};
use crate::scene::{resolve_camera, SceneProvider};
use crate::trajectory::{generate_trajectory, summarize, TrajectoryRequest, TrajectorySummary};
use crate::velocity::VelocitySpec;

/// Everything a launch needs besides the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSettings {
    /// Used when the selection holds no camera
    pub camera: Option<String>,
    pub velocity: VelocitySpec,
    pub duration_seconds: f64,
    pub gravity: f64,
    pub frame_rate: f64,
    /// Overrides the scene's current frame
    pub start_frame: Option<i64>,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            camera: None,
            velocity: VelocitySpec::default(),
            duration_seconds: DEFAULT_DURATION_SECONDS,
            gravity: DEFAULT_GRAVITY,
            frame_rate: DEFAULT_FRAME_RATE,
            start_frame: None,
        }
    }
}

impl LaunchSettings {
    pub fn request_for<S: SceneProvider + ?Sized>(&self, scene: &S, camera: &str) -> Result<TrajectoryRequest> {
        let start_position = scene
            .world_translation(camera)
            .ok_or_else(|| LaunchError::selection(format!("no object named '{camera}'")))?;

        Ok(TrajectoryRequest {
            velocity: self.velocity,
            duration_seconds: self.duration_seconds,
            gravity: self.gravity,
            frame_rate: self.frame_rate,
            start_position,
            start_frame: self.start_frame.unwrap_or_else(|| scene.current_frame()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchReport {
    pub camera: String,
    pub playback_range: PlaybackRange,
    pub summary: TrajectorySummary,
}

// State replaced by a launch, kept for undo
#[derive(Debug, Clone)]
struct Snapshot {
    camera: String,
    curves: Vec<(Channel, Option<AnimationCurve>)>,
    playback_range: Option<PlaybackRange>,
    selection: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandState {
    Pending,
    Done,
    Undone,
}

/// Undoable launch of one camera.
#[derive(Debug, Clone)]
pub struct LaunchCommand {
    settings: LaunchSettings,
    state: CommandState,
    snapshot: Option<Snapshot>,
    report: Option<LaunchReport>,
}

impl LaunchCommand {
    pub fn new(settings: LaunchSettings) -> Self {
        Self {
            settings,
            state: CommandState::Pending,
            snapshot: None,
            report: None,
        }
    }

    pub fn settings(&self) -> &LaunchSettings {
        &self.settings
    }

    pub fn report(&self) -> Option<&LaunchReport> {
        self.report.as_ref()
    }

    /// Runs the launch. Nothing is modified when it fails.
    pub fn execute<S, W>(&mut self, scene: &mut S, timeline: &mut W) -> Result<LaunchReport>
    where
        S: SceneProvider + ?Sized,
        W: AnimationWriter + ?Sized,
    {
        if self.state != CommandState::Pending {
            return Err(LaunchError::InvalidState("launch has already been executed".into()));
        }

        let camera = resolve_camera(&*scene, self.settings.camera.as_deref())?;
        let request = self.settings.request_for(&*scene, &camera)?;
        let samples = generate_trajectory(&request)?;
        let summary = summarize(&samples)
            .ok_or_else(|| LaunchError::InvalidState("trajectory produced no samples".into()))?;

        self.snapshot = Some(Snapshot {
            camera: camera.clone(),
            curves: Channel::TRANSLATE
                .into_iter()
                .map(|channel| (channel, timeline.curve(&camera, channel).cloned()))
                .collect(),
            playback_range: timeline.playback_range(),
            selection: scene.selection(),
        });

        let playback_range = write_trajectory(timeline, &camera, &samples)
            .ok_or_else(|| LaunchError::InvalidState("trajectory produced no samples".into()))?;
        scene.set_selection(vec![camera.clone()]);

        log::info!(
            "Camera '{}' launched with {:?}, duration={}s, frames {}..={}",
            camera,
            self.settings.velocity,
            self.settings.duration_seconds,
            playback_range.min_frame,
            playback_range.max_frame
        );

        let report = LaunchReport {
            camera,
            playback_range,
            summary,
        };
        self.report = Some(report.clone());
        self.state = CommandState::Done;
        Ok(report)
    }

    /// Restores the curves, playback range and selection from before the launch.
    pub fn undo<S, W>(&mut self, scene: &mut S, timeline: &mut W) -> Result<()>
    where
        S: SceneProvider + ?Sized,
        W: AnimationWriter + ?Sized,
    {
        if self.state != CommandState::Done {
            return Err(LaunchError::InvalidState("nothing to undo".into()));
        }
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| LaunchError::InvalidState("nothing to undo".into()))?;

        for (channel, curve) in &snapshot.curves {
            timeline.set_curve(&snapshot.camera, *channel, curve.clone());
        }
        timeline.set_playback_range(snapshot.playback_range);
        scene.set_selection(snapshot.selection.clone());

        log::debug!("Undid launch of '{}'", snapshot.camera);
        self.state = CommandState::Undone;
        Ok(())
    }

    /// Re-applies an undone launch against the restored scene.
    pub fn redo<S, W>(&mut self, scene: &mut S, timeline: &mut W) -> Result<LaunchReport>
    where
        S: SceneProvider + ?Sized,
        W: AnimationWriter + ?Sized,
    {
        if self.state != CommandState::Undone {
            return Err(LaunchError::InvalidState("nothing to redo".into()));
        }
        self.state = CommandState::Pending;
        self.execute(scene, timeline)
    }
}
