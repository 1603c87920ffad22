//! # Camera Launch
//!
//! Projectile-style camera trajectories: pick a camera, give it a launch
//! velocity and gravity, and key its translate channels one frame at a time.

// Re-export the main types and functions
pub use animation::{write_trajectory, AnimationCurve, AnimationWriter, Channel, Keyframe, PlaybackRange, TangentKind, Timeline};
pub use dialog::{Dialog, DialogHost, LaunchDialog, LaunchForm};
pub use error::LaunchError;
pub use launch::{LaunchCommand, LaunchReport, LaunchSettings};
pub use scene::{resolve_camera, ObjectKind, Scene, SceneObject, SceneProvider};
pub use shelf::{ShelfButton, ShelfDefinition, ShelfRegistry};
pub use trajectory::{
    flight_frames, flight_time, generate_trajectory, summarize, total_frames, TrajectoryRequest, TrajectorySample,
    TrajectorySummary,
};
pub use velocity::VelocitySpec;

// Module declarations
pub mod animation;
pub mod config;
pub mod constants;
pub mod dialog;
mod error;
pub mod launch;
pub mod scene;
pub mod shelf;
pub mod trajectory;
mod velocity;

pub type Result<T> = error::Result<T>;
