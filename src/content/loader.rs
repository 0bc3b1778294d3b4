//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Everything read from the data directory. Files that failed to load leave
/// their defaults in place and an entry in `errors`.
#[derive(Debug, Default)]
pub struct LoadedContent {
    pub registry: ContentRegistry,
    pub defaults: GameplayDefaults,
    pub errors: Vec<ContentLoadError>,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse RON text, naming `file` in any error.
pub fn parse_ron<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options().from_str(contents).map_err(|e| ContentLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })
}

/// Parse a DataFile<T> wrapper, rejecting unknown schema versions.
pub fn parse_data_file<T>(file: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = parse_ron(file, contents)?;
    check_schema(file, data.schema_version)?;
    Ok(data.items)
}

fn check_schema(file: &str, version: u32) -> Result<(), ContentLoadError> {
    if version != SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                version, SCHEMA_VERSION
            ),
        });
    }
    Ok(())
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read_file(path)?;
    parse_data_file(&path.display().to_string(), &contents)
}

/// Load the gameplay defaults (single struct, not a list).
fn load_defaults_file(path: &Path) -> Result<GameplayDefaults, ContentLoadError> {
    let file = path.display().to_string();
    let contents = read_file(path)?;
    let defaults: GameplayDefaults = parse_ron(&file, &contents)?;
    check_schema(&file, defaults.schema_version)?;
    Ok(defaults)
}

/// Load all content from `base_path` (normally assets/data).
pub fn load_all_content(base_path: &Path) -> LoadedContent {
    let mut loaded = LoadedContent::default();

    match load_data_file::<EnemyDef>(&base_path.join("enemies.ron")) {
        Ok(items) => {
            for item in items {
                loaded.registry.insert_enemy(item);
            }
        }
        Err(e) => loaded.errors.push(e),
    }

    match load_defaults_file(&base_path.join("gameplay.ron")) {
        Ok(defaults) => loaded.defaults = defaults,
        Err(e) => loaded.errors.push(e),
    }

    loaded
}
