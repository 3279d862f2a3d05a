//! Config domain: ProfileRegistry resource providing lookup by archetype id.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use super::data::AnimationProfile;

/// Central registry of loaded animation profiles.
///
/// Profiles are immutable after load and handed out as `Arc` so every
/// instance of an archetype shares one record without synchronization.
#[derive(Resource, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, Arc<AnimationProfile>>,
}

impl ProfileRegistry {
    pub fn insert(&mut self, profile: AnimationProfile) {
        self.profiles.insert(profile.id.clone(), Arc::new(profile));
    }

    pub fn get(&self, id: &str) -> Option<Arc<AnimationProfile>> {
        self.profiles.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<AnimationProfile>)> {
        self.profiles.iter()
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!("ProfileRegistry loaded: {} animation profiles", self.profiles.len())
    }
}
