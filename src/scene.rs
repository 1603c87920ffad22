//! Scene and selection model used to find the camera to launch.

use std::collections::BTreeMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{LaunchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Plain transform node
    Transform,
    /// Camera shape; its parent transform carries the animation
    CameraShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default = "origin")]
    pub translation: Vector3<f64>,  // world space
}

fn origin() -> Vector3<f64> {
    Vector3::zeros()
}

impl SceneObject {
    pub fn transform(name: impl Into<String>, translation: Vector3<f64>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Transform,
            parent: None,
            translation,
        }
    }

    pub fn camera_shape(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::CameraShape,
            parent: Some(parent.into()),
            translation: Vector3::zeros(),
        }
    }
}

/// Read/write access to the host scene needed by a launch.
pub trait SceneProvider {
    fn selection(&self) -> Vec<String>;
    fn set_selection(&mut self, names: Vec<String>);
    fn object(&self, name: &str) -> Option<&SceneObject>;
    /// Whether the transform `name` owns a camera shape.
    fn has_camera_shape(&self, name: &str) -> bool;
    fn current_frame(&self) -> i64;

    fn world_translation(&self, name: &str) -> Option<Vector3<f64>> {
        self.object(name).map(|o| o.translation)
    }
}

/// In-memory scene. Objects are kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    objects: BTreeMap<String, SceneObject>,
    selection: Vec<String>,
    current_frame: i64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> &mut Self {
        self.objects.insert(object.name.clone(), object);
        self
    }

    /// Adds a camera transform at `translation` together with its `<name>Shape`.
    pub fn add_camera(&mut self, name: &str, translation: Vector3<f64>) -> &mut Self {
        self.add(SceneObject::transform(name, translation));
        self.add(SceneObject::camera_shape(format!("{name}Shape"), name))
    }

    pub fn select(&mut self, names: &[&str]) -> &mut Self {
        self.selection = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn set_current_frame(&mut self, frame: i64) -> &mut Self {
        self.current_frame = frame;
        self
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }
}

impl SceneProvider for Scene {
    fn selection(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn set_selection(&mut self, names: Vec<String>) {
        self.selection = names;
    }

    fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    fn has_camera_shape(&self, name: &str) -> bool {
        self.objects
            .values()
            .any(|o| o.kind == ObjectKind::CameraShape && o.parent.as_deref() == Some(name))
    }

    fn current_frame(&self) -> i64 {
        self.current_frame
    }
}

/// Finds the camera transform to animate.
///
/// Selected camera shapes win, then selected transforms owning a camera
/// shape, then `fallback` (the name typed into the launch dialog).
pub fn resolve_camera<S: SceneProvider + ?Sized>(scene: &S, fallback: Option<&str>) -> Result<String> {
    let selection = scene.selection();

    for name in &selection {
        if let Some(object) = scene.object(name) {
            if object.kind == ObjectKind::CameraShape {
                if let Some(parent) = &object.parent {
                    return Ok(parent.clone());
                }
            }
        }
    }

    for name in &selection {
        if let Some(object) = scene.object(name) {
            if object.kind == ObjectKind::Transform && scene.has_camera_shape(name) {
                return Ok(name.clone());
            }
        }
    }

    match fallback.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => match scene.object(name) {
            Some(object) if object.kind == ObjectKind::CameraShape => object
                .parent
                .clone()
                .ok_or_else(|| LaunchError::selection(format!("camera shape '{name}' has no transform"))),
            Some(_) if scene.has_camera_shape(name) => Ok(name.to_string()),
            Some(_) => Err(LaunchError::selection(format!("'{name}' is not a camera"))),
            None => Err(LaunchError::selection(format!("no object named '{name}'"))),
        },
        None if selection.is_empty() => Err(LaunchError::selection("please select a camera")),
        None => Err(LaunchError::selection(format!("'{}' is not a camera", selection[0]))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene
            .add_camera("camera1", Vector3::new(1.0, 2.0, 3.0))
            .add_camera("camera2", Vector3::zeros())
            .add(SceneObject::transform("pCube1", Vector3::zeros()));
        scene
    }

    #[test]
    fn test_selected_camera_shape_resolves_to_parent() {
        let mut scene = scene();
        scene.select(&["pCube1", "camera2Shape"]);
        assert_eq!(resolve_camera(&scene, None).unwrap(), "camera2");
    }

    #[test]
    fn test_shape_takes_priority_over_transform() {
        let mut scene = scene();
        scene.select(&["camera1", "camera2Shape"]);
        assert_eq!(resolve_camera(&scene, None).unwrap(), "camera2");
    }

    #[test]
    fn test_selected_camera_transform() {
        let mut scene = scene();
        scene.select(&["pCube1", "camera1"]);
        assert_eq!(resolve_camera(&scene, Some("camera2")).unwrap(), "camera1");
        assert_eq!(scene.world_translation("camera1"), Some(Vector3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_fallback_name_used_without_selection() {
        let scene = scene();
        assert_eq!(resolve_camera(&scene, Some(" camera2 ")).unwrap(), "camera2");
        assert_eq!(resolve_camera(&scene, Some("camera1Shape")).unwrap(), "camera1");
    }

    #[test]
    fn test_invalid_selections() {
        let mut scene = scene();
        let err = resolve_camera(&scene, None).unwrap_err();
        assert!(matches!(err, LaunchError::InvalidSelection(ref m) if m.contains("select a camera")));

        scene.select(&["pCube1"]);
        let err = resolve_camera(&scene, Some("")).unwrap_err();
        assert!(matches!(err, LaunchError::InvalidSelection(ref m) if m.contains("'pCube1' is not a camera")));

        let err = resolve_camera(&scene, Some("missing")).unwrap_err();
        assert!(matches!(err, LaunchError::InvalidSelection(ref m) if m.contains("no object named")));
    }
}
