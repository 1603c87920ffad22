//! RON files for launch presets and scenes, plus JSON export.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{LaunchError, Result};
use crate::launch::LaunchSettings;
use crate::scene::{Scene, SceneObject};

fn read_text_file(file_path: &Path) -> Result<String> {
    fs::read_to_string(file_path).map_err(|err| LaunchError::file("read", file_path, err))
}

/// Writes `text` to the given path, creating missing parent directories.
fn write_text_file(text: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| LaunchError::file("create directory for", file_path, err))?;
    }
    fs::write(file_path, text).map_err(|err| LaunchError::file("write", file_path, err))
}

/// Reads the RON file at the given path and deserializes it into `T`.
pub fn parse_ron_file<T>(file_path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let file_path = file_path.as_ref();
    log::debug!("Reading {}", file_path.display());
    let text = read_text_file(file_path)?;
    Ok(ron::from_str::<T>(&text)?)
}

/// Serializes `value` as pretty RON and writes it to the given path.
pub fn write_ron_file<T: Serialize>(value: &T, output_file_path: impl AsRef<Path>) -> Result<()> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?;
    write_text_file(&text, output_file_path.as_ref())
}

/// Serializes `value` as pretty JSON, e.g. a keyed timeline for other tools.
pub fn write_json_file<T: Serialize>(value: &T, output_file_path: impl AsRef<Path>) -> Result<()> {
    let output_file_path = output_file_path.as_ref();
    log::debug!("Writing {}", output_file_path.display());
    let text = serde_json::to_string_pretty(value)?;
    write_text_file(&text, output_file_path)
}

/// Launch parameters stored on disk. Missing fields take their defaults.
pub fn load_preset(file_path: impl AsRef<Path>) -> Result<LaunchSettings> {
    parse_ron_file(file_path)
}

/// On-disk form of a [`Scene`].
///
/// ```ron
/// (
///     objects: [
///         (name: "camera1", kind: Transform, translation: (0.0, 5.0, 0.0)),
///         (name: "camera1Shape", kind: CameraShape, parent: Some("camera1")),
///     ],
///     selection: ["camera1"],
///     current_frame: 1,
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    pub objects: Vec<SceneObject>,
    pub selection: Vec<String>,
    pub current_frame: i64,
}

impl From<SceneFile> for Scene {
    fn from(file: SceneFile) -> Self {
        let mut scene = Scene::new();
        for object in file.objects {
            scene.add(object);
        }
        let selection: Vec<&str> = file.selection.iter().map(String::as_str).collect();
        scene.select(&selection).set_current_frame(file.current_frame);
        scene
    }
}

impl From<&Scene> for SceneFile {
    fn from(scene: &Scene) -> Self {
        use crate::scene::SceneProvider;

        SceneFile {
            objects: scene.objects().cloned().collect(),
            selection: scene.selection(),
            current_frame: scene.current_frame(),
        }
    }
}

pub fn load_scene(file_path: impl AsRef<Path>) -> Result<Scene> {
    let file: SceneFile = parse_ron_file(file_path)?;
    Ok(file.into())
}

pub fn save_scene(scene: &Scene, output_file_path: impl AsRef<Path>) -> Result<()> {
    write_ron_file(&SceneFile::from(scene), output_file_path)
}
