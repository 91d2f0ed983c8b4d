use crate::foundation::core::TimeMs;
use crate::foundation::error::{RevealError, RevealResult};
use crate::scene::model::SceneDef;
use crate::scene::validate::validate_scene;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Scene boundary object.
///
/// This is the JSON-facing, human-edited description of what to play. It is validated before
/// a [`crate::ScenePlayer`] is built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RevealResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| RevealError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RevealError::config(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build a scene from an in-memory definition.
    pub fn from_def(def: SceneDef) -> Self {
        Self { def }
    }

    /// Validate geometry, ids and scroll ordering.
    pub fn validate(&self) -> RevealResult<()> {
        validate_scene(&self.def)
            .map_err(|e| RevealError::validation(format!("scene validation failed: {e}")))
    }

    /// Declared playback length.
    pub fn duration(&self) -> TimeMs {
        TimeMs(self.def.duration_ms)
    }

    /// Borrow the underlying definition.
    pub fn def(&self) -> &SceneDef {
        &self.def
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> RevealResult<String> {
        serde_json::to_string_pretty(&self.def)
            .map_err(|e| RevealError::serde(format!("serialize scene JSON: {e}")))
    }
}
