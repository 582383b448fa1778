use std::path::Path;

use serde::de::DeserializeOwned;

/// Attempt to read a file as a [`String`], returning a helpful error message on failure
pub fn read_file_to_string(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::Error::msg(format!("Can't open {:?}: {}", path, e)))
}

/// Attempt to parse a TOML string, returning a helpful error message on failure
pub fn parse_toml<T: DeserializeOwned>(s: &str) -> anyhow::Result<T> {
    toml::from_str(s).map_err(|e| anyhow::Error::msg(format!("Error parsing scenario file: {}", e)))
}

pub fn get_true() -> bool {
    true
}
