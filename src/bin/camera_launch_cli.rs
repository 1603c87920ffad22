use anyhow::{bail, Context, Result};
use camera_launch::{
    config::{load_preset, load_scene, save_scene, write_json_file},
    constants::{DEFAULT_ANGLE_DEGREES, DEFAULT_SPEED},
    flight_time, generate_trajectory, summarize, LaunchCommand, LaunchReport, LaunchSettings, ShelfDefinition,
    ShelfRegistry, Timeline, TrajectoryRequest, TrajectorySample, TrajectorySummary, VelocitySpec,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nalgebra::Vector3;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "camera-launch")]
#[command(author = "Camera Launch Team")]
#[command(version = "0.1.0")]
#[command(about = "Keys projectile trajectories onto cameras", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a trajectory and print its samples
    Trajectory {
        #[command(flatten)]
        motion: MotionArgs,

        /// Start position
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        start: Option<Vec<f64>>,

        /// Frame of the first sample
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        start_frame: i64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show every frame in the table)
        #[arg(long)]
        full: bool,
    },

    /// Launch a camera from a scene file
    Launch {
        /// Scene file (RON)
        #[arg(long)]
        scene: PathBuf,

        /// Camera to launch when the selection holds none
        #[arg(short = 'c', long)]
        camera: Option<String>,

        #[command(flatten)]
        motion: MotionArgs,

        /// Start frame (defaults to the scene's current frame)
        #[arg(short = 's', long, allow_negative_numbers = true)]
        start_frame: Option<i64>,

        /// Write the resulting timeline as JSON
        #[arg(long)]
        timeline_out: Option<PathBuf>,

        /// Write the scene (with the updated selection) back as RON
        #[arg(long)]
        scene_out: Option<PathBuf>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Install or remove the launch shelf
    Shelf {
        #[command(subcommand)]
        action: ShelfAction,

        /// Shelf registry file (RON)
        #[arg(long, global = true, default_value = "shelves.ron")]
        registry: PathBuf,
    },

    /// Display tool information
    Info,
}

#[derive(Subcommand, Clone, Copy)]
enum ShelfAction {
    Install,
    Uninstall,
}

#[derive(Args)]
struct MotionArgs {
    /// Launch preset (RON); flags given here override it
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Initial speed (units/s)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "velocity")]
    speed: Option<f64>,

    /// Launch angle above the horizontal (degrees)
    #[arg(short = 'a', long, allow_negative_numbers = true, conflicts_with = "velocity")]
    angle: Option<f64>,

    /// Per-axis initial velocity
    #[arg(short = 'v', long, num_args = 3, value_names = ["VX", "VY", "VZ"], allow_negative_numbers = true)]
    velocity: Option<Vec<f64>>,

    /// Duration (seconds)
    #[arg(short = 'd', long, allow_negative_numbers = true, conflicts_with = "until_landing")]
    duration: Option<f64>,

    /// Key until the camera falls back to its launch height
    #[arg(long)]
    until_landing: bool,

    /// Gravity along Y (units/s²)
    #[arg(short = 'g', long, allow_negative_numbers = true)]
    gravity: Option<f64>,

    /// Frame rate (frames/s)
    #[arg(short = 'f', long, allow_negative_numbers = true)]
    frame_rate: Option<f64>,
}

impl MotionArgs {
    fn settings(&self) -> Result<LaunchSettings> {
        let mut settings = match &self.preset {
            Some(path) => {
                load_preset(path).with_context(|| format!("Could not load preset {}", path.display()))?
            }
            None => LaunchSettings::default(),
        };

        if let Some(v) = &self.velocity {
            settings.velocity = VelocitySpec::cartesian(v[0], v[1], v[2]);
        } else if self.speed.is_some() || self.angle.is_some() {
            // A cartesian preset contributes nothing to a polar launch
            let (speed, angle_degrees) = match settings.velocity {
                VelocitySpec::Polar { speed, angle_degrees } => (speed, angle_degrees),
                VelocitySpec::Cartesian { .. } => (DEFAULT_SPEED, DEFAULT_ANGLE_DEGREES),
            };
            settings.velocity = VelocitySpec::polar(
                self.speed.unwrap_or(speed),
                self.angle.unwrap_or(angle_degrees),
            );
        }

        if let Some(gravity) = self.gravity {
            settings.gravity = gravity;
        }
        if let Some(frame_rate) = self.frame_rate {
            settings.frame_rate = frame_rate;
        }
        if let Some(duration) = self.duration {
            settings.duration_seconds = duration;
        }
        if self.until_landing {
            settings.duration_seconds = match flight_time(&settings.velocity, settings.gravity) {
                Some(t) => t,
                None => bail!("The camera never falls back to its launch height with this velocity and gravity"),
            };
        }

        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
struct TrajectoryOutput<'a> {
    request: &'a TrajectoryRequest,
    summary: &'a TrajectorySummary,
    samples: &'a [TrajectorySample],
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Trajectory { motion, start, start_frame, output, full } => {
            let settings = motion.settings()?;
            let start_position = match start {
                Some(p) => Vector3::new(p[0], p[1], p[2]),
                None => Vector3::zeros(),
            };

            let request = TrajectoryRequest {
                velocity: settings.velocity,
                duration_seconds: settings.duration_seconds,
                gravity: settings.gravity,
                frame_rate: settings.frame_rate,
                start_position,
                start_frame,
            };

            let samples = generate_trajectory(&request)?;
            let summary = summarize(&samples).context("Trajectory produced no samples")?;

            display_trajectory(&request, &summary, &samples, output, full)?;
        }

        Commands::Launch { scene, camera, motion, start_frame, timeline_out, scene_out, output } => {
            let mut settings = motion.settings()?;
            if camera.is_some() {
                settings.camera = camera;
            }
            if start_frame.is_some() {
                settings.start_frame = start_frame;
            }

            let scene_path = scene;
            let mut scene = load_scene(&scene_path)
                .with_context(|| format!("Could not load scene {}", scene_path.display()))?;
            let mut timeline = Timeline::new();

            let report = LaunchCommand::new(settings).execute(&mut scene, &mut timeline)?;

            if let Some(path) = timeline_out {
                write_json_file(&timeline, &path)
                    .with_context(|| format!("Could not write timeline {}", path.display()))?;
            }
            if let Some(path) = scene_out {
                save_scene(&scene, &path).with_context(|| format!("Could not write scene {}", path.display()))?;
            }

            display_launch(&report, output)?;
        }

        Commands::Shelf { action, registry } => {
            let mut shelves = ShelfRegistry::load(&registry)
                .with_context(|| format!("Could not load shelf registry {}", registry.display()))?;
            let shelf = ShelfDefinition::default();

            match action {
                ShelfAction::Install => {
                    shelves.install(shelf.clone());
                    println!("{} shelf installed.", shelf.name);
                }
                ShelfAction::Uninstall => {
                    if shelves.uninstall(&shelf.name) {
                        println!("{} shelf has been removed.", shelf.name);
                    } else {
                        println!("{} shelf not found.", shelf.name);
                    }
                }
            }

            shelves
                .save(&registry)
                .with_context(|| format!("Could not save shelf registry {}", registry.display()))?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      CAMERA LAUNCH v0.1.0              ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Keys projectile trajectories onto      ║");
            println!("║ camera translate channels.             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Features:                              ║");
            println!("║ • Speed + angle or per-axis velocity   ║");
            println!("║ • One linear key per frame             ║");
            println!("║ • Undoable launches                    ║");
            println!("║ • RON presets and scenes               ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_trajectory(
    request: &TrajectoryRequest,
    summary: &TrajectorySummary,
    samples: &[TrajectorySample],
    format: OutputFormat,
    full: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let out = TrajectoryOutput { request, summary, samples };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        OutputFormat::Csv => {
            println!("frame,time,x,y,z");
            for s in samples {
                println!(
                    "{},{:.4},{:.4},{:.4},{:.4}",
                    s.frame, s.time_seconds, s.position.x, s.position.y, s.position.z
                );
            }
        }

        OutputFormat::Table => {
            print_summary(summary);

            let step = if full { 1 } else { (samples.len() / 10).max(1) };
            if full {
                println!("\nAll Frames:");
            } else {
                println!(
                    "\nTrajectory Frames (every {} frames, {:.3}s):",
                    step,
                    step as f64 / request.frame_rate
                );
            }
            println!("┌──────────┬──────────┬──────────┬──────────┬──────────┐");
            println!("│  Frame   │ Time (s) │    X     │    Y     │    Z     │");
            println!("├──────────┼──────────┼──────────┼──────────┼──────────┤");

            for (i, s) in samples.iter().enumerate() {
                if i % step == 0 || i == samples.len() - 1 {
                    println!(
                        "│ {:>8} │ {:>8.3} │ {:>8.3} │ {:>8.3} │ {:>8.3} │",
                        s.frame, s.time_seconds, s.position.x, s.position.y, s.position.z
                    );
                }
            }
            println!("└──────────┴──────────┴──────────┴──────────┴──────────┘");
        }
    }

    Ok(())
}

fn print_summary(summary: &TrajectorySummary) {
    println!("╔════════════════════════════════════════╗");
    println!("║         TRAJECTORY RESULTS             ║");
    println!("╠════════════════════════════════════════╣");
    println!("║ Frames:            {:>6} - {:<6}     ║", summary.start_frame, summary.end_frame);
    println!("║ Samples:           {:>8}            ║", summary.sample_count);
    println!("║ Duration:          {:>8.3} s          ║", summary.duration_seconds);
    println!("║ Apex Height:       {:>8.3}            ║", summary.apex_height);
    println!("║ Apex Frame:        {:>8}            ║", summary.apex_frame);
    println!("║ Distance:          {:>8.3}            ║", summary.horizontal_distance);
    println!("╚════════════════════════════════════════╝");
}

fn display_launch(report: &LaunchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Csv => {
            println!("camera,min_frame,max_frame,samples,apex_height,distance");
            println!(
                "{},{},{},{},{:.4},{:.4}",
                report.camera,
                report.playback_range.min_frame,
                report.playback_range.max_frame,
                report.summary.sample_count,
                report.summary.apex_height,
                report.summary.horizontal_distance
            );
        }
        OutputFormat::Table => {
            println!("Camera '{}' launched.", report.camera);
            println!(
                "Playback range: {} - {}",
                report.playback_range.min_frame, report.playback_range.max_frame
            );
            print_summary(&report.summary);
        }
    }

    Ok(())
}
