//! Config domain: loader for RON profile files at startup.

use ron::Options;
use std::path::Path;

use super::data::{AnimationProfile, DataFile};
use super::registry::ProfileRegistry;

/// Error type for profile loading failures.
#[derive(Debug)]
pub struct ProfileLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ProfileLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ProfileLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|e| ProfileLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_data_file(&contents).map_err(|message| ProfileLoadError {
        file: file_name,
        message,
    })
}

/// Parse a DataFile<T> wrapper from RON text.
pub fn parse_data_file<T>(contents: &str) -> Result<Vec<T>, String>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| format!("Parse error: {}", e))?;
    Ok(data.items)
}

/// Load animation profiles from assets/data/animation_profiles.ron into
/// a ProfileRegistry. Returns errors for any files that fail to load.
pub fn load_profiles(base_path: &Path) -> Result<ProfileRegistry, Vec<ProfileLoadError>> {
    let mut registry = ProfileRegistry::default();
    let mut errors = Vec::new();

    let path = base_path.join("animation_profiles.ron");
    match load_data_file::<AnimationProfile>(&path) {
        Ok(items) => {
            for item in items {
                registry.insert(item);
            }
        }
        Err(e) => errors.push(e),
    }

    if errors.is_empty() {
        Ok(registry)
    } else {
        Err(errors)
    }
}
