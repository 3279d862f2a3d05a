//! Config domain: clip manifest loading.
//!
//! Loads the clip manifest JSON exported by the animation authoring
//! pipeline, which defines clip durations, looping, and the authored
//! mid-clip event tracks (hit frames, footsteps, attack windows).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A named moment inside a clip, authored on the clip's event track.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ClipEventKind {
    HitFrame,
    Footstep,
    AttackWindowOpen,
    AttackWindowClose,
    /// Forward-compatible named event with no dedicated handling.
    Marker(String),
}

/// A single authored event on a clip's track.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClipEventDef {
    /// Seconds from clip start.
    pub time: f32,
    pub event: ClipEventKind,
}

/// Playback metadata for one graph state's clip.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClipDef {
    /// Clip length in seconds.
    pub duration: f32,
    /// Looping clips (locomotion) never emit a completion.
    #[serde(default)]
    pub looped: bool,
    /// Authored event track, sorted by time after load.
    #[serde(default)]
    pub events: Vec<ClipEventDef>,
}

/// Raw manifest JSON structure.
#[derive(Deserialize)]
struct ManifestJson {
    version: u32,
    clips: HashMap<String, ClipDef>,
}

/// Resource containing clip metadata keyed by graph state name.
#[derive(Resource, Default)]
pub struct ClipManifest {
    /// Version of the manifest schema.
    pub version: u32,
    pub clips: HashMap<String, ClipDef>,
}

impl ClipManifest {
    /// Load the manifest from a JSON file. Missing or malformed files
    /// leave the manifest empty; playback degrades, the game keeps
    /// running.
    pub fn load_from_file(&mut self, path: &str) {
        let manifest_path = Path::new(path);

        if !manifest_path.exists() {
            warn!("Clip manifest not found at {:?}, using empty manifest", path);
            return;
        }

        let contents = match fs::read_to_string(manifest_path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to read clip manifest: {}", e);
                return;
            }
        };

        if !self.load_from_str(&contents) {
            return;
        }

        info!(
            "Loaded clip manifest v{} with {} clips",
            self.version,
            self.clips.len()
        );
    }

    /// Parse manifest JSON from a string. Returns false on parse failure.
    pub fn load_from_str(&mut self, contents: &str) -> bool {
        let manifest_json: ManifestJson = match serde_json::from_str(contents) {
            Ok(m) => m,
            Err(e) => {
                error!("Failed to parse clip manifest: {}", e);
                return false;
            }
        };

        self.version = manifest_json.version;
        self.clips = manifest_json.clips;

        // Event tracks are consumed by a forward-walking cursor.
        for clip in self.clips.values_mut() {
            clip.events
                .sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        }
        true
    }

    /// Get a clip definition by graph state name.
    pub fn get(&self, state: &str) -> Option<&ClipDef> {
        self.clips.get(state)
    }

    /// Check if a clip exists for a graph state.
    pub fn contains(&self, state: &str) -> bool {
        self.clips.contains_key(state)
    }
}
