//! Shelf buttons that trigger a launch, and the registry they are installed into.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{parse_ron_file, write_ron_file};
use crate::constants::SHELF_NAME;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfButton {
    pub label: String,
    pub annotation: String,
    pub image: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfDefinition {
    pub name: String,
    pub buttons: Vec<ShelfButton>,
}

impl Default for ShelfDefinition {
    fn default() -> Self {
        Self {
            name: SHELF_NAME.to_string(),
            buttons: vec![ShelfButton {
                label: "Launch".to_string(),
                annotation: format!("{SHELF_NAME}: Launch selected camera"),
                image: "Camera.png".to_string(),
                command: "camera-launch-cli launch".to_string(),
            }],
        }
    }
}

/// Installed shelves, in installation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfRegistry {
    shelves: Vec<ShelfDefinition>,
}

impl ShelfRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the registry, or starts an empty one when the file does not exist yet.
    pub fn load(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        if !file_path.exists() {
            return Ok(Self::new());
        }
        parse_ron_file(file_path)
    }

    pub fn save(&self, file_path: impl AsRef<Path>) -> Result<()> {
        write_ron_file(self, file_path)
    }

    pub fn get(&self, name: &str) -> Option<&ShelfDefinition> {
        self.shelves.iter().find(|s| s.name == name)
    }

    pub fn shelves(&self) -> &[ShelfDefinition] {
        &self.shelves
    }

    /// Installs `shelf`, replacing an existing shelf of the same name in place.
    pub fn install(&mut self, shelf: ShelfDefinition) {
        match self.shelves.iter_mut().find(|s| s.name == shelf.name) {
            Some(existing) => {
                log::debug!("Replacing shelf '{}'", shelf.name);
                *existing = shelf;
            }
            None => {
                log::info!("{} shelf created", shelf.name);
                self.shelves.push(shelf);
            }
        }
    }

    /// Removes the named shelf. Returns `false` when it was not installed.
    pub fn uninstall(&mut self, name: &str) -> bool {
        let before = self.shelves.len();
        self.shelves.retain(|s| s.name != name);
        let removed = self.shelves.len() != before;
        if removed {
            log::info!("{name} shelf has been removed");
        } else {
            log::warn!("{name} shelf not found");
        }
        removed
    }
}
