//! Default launch parameters and unit conversions

/// Acceleration along Y in scene units per s² (Y is up, so negative pulls down)
pub const DEFAULT_GRAVITY: f64 = -9.81;

/// Default timeline frame rate (frames per second)
pub const DEFAULT_FRAME_RATE: f64 = 24.0;

/// Default launch speed for the polar velocity mode (units/s)
pub const DEFAULT_SPEED: f64 = 20.0;

/// Default launch angle above the horizontal (degrees)
pub const DEFAULT_ANGLE_DEGREES: f64 = 45.0;

/// Default length of the keyed trajectory for the shelf button (seconds)
pub const DEFAULT_DURATION_SECONDS: f64 = 3.0;

/// Default length of the keyed trajectory for the dialog (seconds)
pub const DEFAULT_DIALOG_DURATION_SECONDS: f64 = 1.0;

/// Default per-axis velocity shown by the launch dialog
pub const DEFAULT_DIALOG_VELOCITY: [f64; 3] = [10.0, 10.0, 3.0];

/// Longest trajectory a single request may key, in frames after the start frame
pub const MAX_TRAJECTORY_FRAMES: i64 = 1_000_000;

/// Default start frame shown by the launch dialog
pub const DEFAULT_DIALOG_START_FRAME: i64 = 1;

// Dialog field ranges
pub const VELOCITY_FIELD_RANGE: (f64, f64) = (-1000.0, 1000.0);
pub const GRAVITY_FIELD_RANGE: (f64, f64) = (-100.0, 100.0);
pub const START_FRAME_FIELD_RANGE: (i64, i64) = (0, 10000);

/// Name of the shelf created by the installer
pub const SHELF_NAME: &str = "CameraLaunch";

/// Name of the translate channels keyed by a launch
pub const TRANSLATE_ATTRIBUTES: [&str; 3] = ["translateX", "translateY", "translateZ"];

/// Conversion factor: degrees to radians
pub const DEGREES_TO_RADIANS: f64 = std::f64::consts::PI / 180.0;
