//! JSON scene files.
//!
//! A scene file names the scene, lists its objects and carries a render
//! section whose type belongs to the renderer:
//!
//! ```json
//! {
//!   "name": "mirrors",
//!   "render": { "width": 320, "height": 240 },
//!   "objects": [
//!     { "type": "sphere", "center": [0, 0, -3], "radius": 1,
//!       "surface": { "solid": [0.9, 0.2, 0.2] } },
//!     { "type": "plane", "point": [0, -1, 0], "normal": [0, 1, 0] }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shape::{InvalidShape, Shape};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid object #{index}: {source}")]
    InvalidShape {
        index: usize,
        #[source]
        source: InvalidShape,
    },
}

/// Parsed contents of a scene file.
///
/// `R` is the render-settings type; a missing `render` section yields
/// `R::default()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "R: Serialize",
    deserialize = "R: Deserialize<'de> + Default"
))]
pub struct SceneDescription<R> {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub render: R,

    #[serde(default)]
    pub objects: Vec<Shape>,
}

impl<R: DeserializeOwned + Default> SceneDescription<R> {
    /// Parse a scene description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Load a scene description from a JSON file.
///
/// An unnamed scene takes the file stem as its name.
pub fn load_scene_file<R, P>(path: P) -> Result<SceneDescription<R>, SceneError>
where
    R: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut description = SceneDescription::<R>::from_json(&content)?;

    if description.name.is_empty() {
        description.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    log::info!(
        "Loaded scene file {} ({} objects)",
        path.display(),
        description.objects.len()
    );
    Ok(description)
}
