// Manifest parser - composer.json

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A PSR-4 entry value: one directory or an ordered list of directories
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Psr4Target {
    One(String),
    Many(Vec<String>),
}

impl Psr4Target {
    pub fn dirs(&self) -> Vec<&str> {
        match self {
            Psr4Target::One(dir) => vec![dir.as_str()],
            Psr4Target::Many(dirs) => dirs.iter().map(String::as_str).collect(),
        }
    }
}

/// The parts of composer.json the autoloader reads
#[derive(Debug, Clone)]
pub struct ComposerManifest {
    /// Package name, only used for logging
    pub name: Option<String>,

    /// `autoload.psr-4`, in file order
    pub psr4: Vec<(String, Psr4Target)>,

    /// `autoload-dev.psr-4`, in file order (empty when absent)
    pub psr4_dev: Vec<(String, Psr4Target)>,
}

impl ComposerManifest {
    /// Parse composer.json from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read composer.json from: {}", path.as_ref().display()))?;

        Self::from_str(&content)
    }

    /// Parse composer.json from string
    pub fn from_str(content: &str) -> Result<Self> {
        let document: Value =
            serde_json::from_str(content).context("Invalid JSON in composer.json")?;

        let psr4 = match document.pointer("/autoload/psr-4") {
            Some(section) => parse_psr4_section(section, "autoload.psr-4")?,
            None => anyhow::bail!("No PSR-4 configuration found in composer.json"),
        };

        let psr4_dev = match document.pointer("/autoload-dev/psr-4") {
            Some(section) => parse_psr4_section(section, "autoload-dev.psr-4")?,
            None => Vec::new(),
        };

        let name = document
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            name,
            psr4,
            psr4_dev,
        })
    }

    /// Entries to register: `autoload` first, then `autoload-dev` if requested
    pub fn entries(&self, include_dev: bool) -> impl Iterator<Item = &(String, Psr4Target)> {
        let dev: &[(String, Psr4Target)] = if include_dev { &self.psr4_dev } else { &[] };
        self.psr4.iter().chain(dev.iter())
    }
}

fn parse_psr4_section(section: &Value, label: &str) -> Result<Vec<(String, Psr4Target)>> {
    let map = match section {
        Value::Object(map) => map,
        // PHP encodes an empty associative array as []
        Value::Array(items) if items.is_empty() => return Ok(Vec::new()),
        _ => anyhow::bail!("No PSR-4 configuration found in composer.json ({} is not an object)", label),
    };

    let mut entries = Vec::with_capacity(map.len());
    for (prefix, value) in map {
        let target: Psr4Target = serde_json::from_value(value.clone()).with_context(|| {
            format!(
                "Invalid {} entry for '{}': expected a directory or a list of directories",
                label, prefix
            )
        })?;

        if let Psr4Target::Many(dirs) = &target {
            if dirs.is_empty() {
                anyhow::bail!("Empty directory list in {} for '{}'", label, prefix);
            }
        }

        entries.push((prefix.clone(), target));
    }

    Ok(entries)
}

/// Walk from `start_dir` up to the filesystem root looking for `file_name`.
///
/// The root directory itself is checked too.
pub fn find_manifest(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(file_name);
        log::trace!("looking for {}", candidate.display());
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
