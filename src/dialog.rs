//! Launch dialog: field model and the owner that keeps a single instance open.

use crate::constants::{
    DEFAULT_DIALOG_DURATION_SECONDS, DEFAULT_DIALOG_START_FRAME, DEFAULT_DIALOG_VELOCITY, DEFAULT_FRAME_RATE,
    DEFAULT_GRAVITY, GRAVITY_FIELD_RANGE, START_FRAME_FIELD_RANGE, VELOCITY_FIELD_RANGE,
};
use crate::launch::LaunchSettings;
use crate::velocity::VelocitySpec;

/// Values entered in the launch dialog. Setters clamp to the field ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchForm {
    camera_name: String,
    velocity: [f64; 3],
    gravity: f64,
    start_frame: i64,
    duration_seconds: f64,
    frame_rate: f64,
}

impl Default for LaunchForm {
    fn default() -> Self {
        Self {
            camera_name: String::new(),
            velocity: DEFAULT_DIALOG_VELOCITY,
            gravity: DEFAULT_GRAVITY,
            start_frame: DEFAULT_DIALOG_START_FRAME,
            duration_seconds: DEFAULT_DIALOG_DURATION_SECONDS,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

fn clamp_field(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        min.max(0.0).min(max)
    } else {
        value.clamp(min, max)
    }
}

impl LaunchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera_name(&self) -> &str {
        &self.camera_name
    }

    pub fn velocity(&self) -> [f64; 3] {
        self.velocity
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn start_frame(&self) -> i64 {
        self.start_frame
    }

    pub fn set_camera_name(&mut self, name: impl Into<String>) {
        self.camera_name = name.into();
    }

    /// Sets one velocity component; `axis` is 0, 1 or 2.
    pub fn set_velocity(&mut self, axis: usize, value: f64) {
        if let Some(slot) = self.velocity.get_mut(axis) {
            *slot = clamp_field(value, VELOCITY_FIELD_RANGE);
        }
    }

    pub fn set_gravity(&mut self, value: f64) {
        self.gravity = clamp_field(value, GRAVITY_FIELD_RANGE);
    }

    pub fn set_start_frame(&mut self, frame: i64) {
        self.start_frame = frame.clamp(START_FRAME_FIELD_RANGE.0, START_FRAME_FIELD_RANGE.1);
    }

    pub fn set_duration(&mut self, seconds: f64) {
        self.duration_seconds = seconds;
    }

    pub fn set_frame_rate(&mut self, frame_rate: f64) {
        self.frame_rate = frame_rate;
    }

    /// Settings for the "Launch" button. An empty camera field means
    /// "use the selection only".
    pub fn settings(&self) -> LaunchSettings {
        let camera = Some(self.camera_name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let [vx, vy, vz] = self.velocity;

        LaunchSettings {
            camera,
            velocity: VelocitySpec::cartesian(vx, vy, vz),
            duration_seconds: self.duration_seconds,
            gravity: self.gravity,
            frame_rate: self.frame_rate,
            start_frame: Some(self.start_frame),
        }
    }
}

/// A window that can be closed by its host.
pub trait Dialog {
    fn title(&self) -> &str;
    fn close(&mut self);
}

/// Owns at most one open dialog of a kind.
#[derive(Debug)]
pub struct DialogHost<D: Dialog> {
    current: Option<D>,
}

impl<D: Dialog> Default for DialogHost<D> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<D: Dialog> DialogHost<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the open dialog, if any, and makes `dialog` the open one.
    pub fn show(&mut self, dialog: D) -> &mut D {
        self.close();
        log::debug!("Showing dialog '{}'", dialog.title());
        self.current.insert(dialog)
    }

    pub fn close(&mut self) {
        if let Some(mut previous) = self.current.take() {
            log::debug!("Closing dialog '{}'", previous.title());
            previous.close();
        }
    }

    pub fn current(&self) -> Option<&D> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut D> {
        self.current.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

/// The "Launch Camera" dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDialog {
    pub form: LaunchForm,
    open: bool,
}

impl LaunchDialog {
    pub const TITLE: &'static str = "Launch Camera";

    pub fn new() -> Self {
        Self {
            form: LaunchForm::default(),
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Default for LaunchDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog for LaunchDialog {
    fn title(&self) -> &str {
        Self::TITLE
    }

    fn close(&mut self) {
        self.open = false;
    }
}
