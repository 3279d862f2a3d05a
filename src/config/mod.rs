//! Config domain: animation profiles, clip manifest, and validation.
//!
//! This module handles:
//! - Loading animation profiles from RON (per-archetype records)
//! - Loading the clip manifest JSON (durations, looping, event tracks)
//! - Cross-reference validation between the two

pub mod clips;
pub mod data;
pub mod loader;
pub mod registry;
pub mod validation;

pub use clips::{ClipDef, ClipEventDef, ClipEventKind, ClipManifest};
pub use data::{AnimationProfile, DataFile, GraphBackendKind, LocomotionParams};
pub use loader::{ProfileLoadError, load_profiles, parse_data_file};
pub use registry::ProfileRegistry;
pub use validation::{
    ValidationError, validate_clip_tracks, validate_profile_values, validate_profiles,
};

use bevy::prelude::*;
use std::path::Path;

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProfileRegistry>()
            .init_resource::<ClipManifest>()
            .add_systems(Startup, load_animation_content);
    }
}

/// System to load profiles and the clip manifest at startup.
///
/// Load and validation failures are reported and tolerated; characters
/// without a usable profile simply animate with degraded fidelity.
fn load_animation_content(
    mut registry: ResMut<ProfileRegistry>,
    mut manifest: ResMut<ClipManifest>,
) {
    manifest.load_from_file("assets/data/clips.json");

    match load_profiles(Path::new("assets/data")) {
        Ok(loaded) => {
            *registry = loaded;
            info!("{}", registry.summary());
        }
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
        }
    }

    for e in validate_profiles(&registry, &manifest) {
        warn!("{}", e);
    }
    for w in validate_profile_values(&registry) {
        warn!("{}", w);
    }
    for w in validate_clip_tracks(&manifest) {
        warn!("{}", w);
    }
}
