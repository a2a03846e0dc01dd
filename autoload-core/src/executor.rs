// Source execution for resolved files

use crate::error::LoadError;
use crate::mapping::NAMESPACE_SEPARATOR;
use std::fs;
use std::path::{Path, PathBuf};

/// Runs a resolved source file and reports the symbols it declared
pub trait SourceExecutor {
    fn execute(&mut self, path: &Path) -> Result<Vec<String>, LoadError>;
}

/// Default executor: records each included file and scans it for
/// `namespace` / `class` / `interface` / `trait` / `enum` declarations.
#[derive(Debug, Default)]
pub struct DeclarationScanner {
    includes: Vec<PathBuf>,
}

impl DeclarationScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every file executed so far, in execution order (repeats included)
    pub fn includes(&self) -> &[PathBuf] {
        &self.includes
    }

    /// Number of times `path` was executed
    pub fn include_count(&self, path: &Path) -> usize {
        self.includes.iter().filter(|p| p.as_path() == path).count()
    }
}

impl SourceExecutor for DeclarationScanner {
    fn execute(&mut self, path: &Path) -> Result<Vec<String>, LoadError> {
        let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.includes.push(path.to_path_buf());
        let declared = scan_declarations(&source);
        log::debug!("executed {} (declares {:?})", path.display(), declared);
        Ok(declared)
    }
}

const DECLARATION_KEYWORDS: &[&str] = &["class", "interface", "trait", "enum"];

const DECLARATION_MODIFIERS: &[&str] = &["abstract", "final", "readonly"];

/// Collect fully-qualified names declared at the top level of `source`
pub fn scan_declarations(source: &str) -> Vec<String> {
    let mut namespace = String::new();
    let mut declared = Vec::new();

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") || trimmed.starts_with('#') || trimmed.starts_with('*') {
            continue;
        }

        let mut words = trimmed
            .split(|c: char| c.is_whitespace() || c == ';' || c == '{')
            .filter(|w| !w.is_empty());

        let Some(first) = words.next() else {
            continue;
        };

        if first == "namespace" {
            namespace = words
                .next()
                .unwrap_or_default()
                .trim_matches(NAMESPACE_SEPARATOR)
                .to_string();
            continue;
        }

        let mut keyword = first;
        while DECLARATION_MODIFIERS.contains(&keyword) {
            match words.next() {
                Some(next) => keyword = next,
                None => break,
            }
        }

        if !DECLARATION_KEYWORDS.contains(&keyword) {
            continue;
        }

        if let Some(name) = words.next() {
            let name = name.trim_end_matches(':');
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                continue;
            }
            if namespace.is_empty() {
                declared.push(name.to_string());
            } else {
                declared.push(format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, name));
            }
        }
    }

    declared
}
