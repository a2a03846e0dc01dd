// Namespace prefix -> base directory table

use std::path::{Path, PathBuf};

/// Namespace separator used in symbol names
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Strip trailing namespace separators from a prefix (`Foo\` -> `Foo`)
pub fn normalize_prefix(prefix: &str) -> String {
    prefix.trim_end_matches(NAMESPACE_SEPARATOR).to_string()
}

/// Strip trailing path separators and append exactly one `/` (`src` -> `src/`)
pub fn normalize_base_dir(base_dir: &str) -> String {
    let trimmed = base_dir.trim_end_matches(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR);
    format!("{}/", trimmed)
}

/// One registered prefix.
///
/// `anchor` is set for mappings read from a manifest: relative directories of
/// that entry resolve against the manifest's directory. Explicit registrations
/// have no anchor and are used as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMapping {
    pub prefix: String,
    pub dirs: Vec<String>,
    pub anchor: Option<PathBuf>,
}

impl NamespaceMapping {
    /// `base_dir + relative`, joined onto the anchor when the directory is relative
    pub fn candidate(&self, base_dir: &str, relative: &str) -> PathBuf {
        let path = PathBuf::from(format!("{}{}", base_dir, relative));
        match &self.anchor {
            Some(anchor) if path.is_relative() => anchor.join(path),
            _ => path,
        }
    }
}

/// Ordered set of namespace mappings.
///
/// Keys are unique. Registering an existing prefix replaces its directories in
/// place, so iteration order is first-registration order.
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    entries: Vec<NamespaceMapping>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) a prefix with a single base directory
    pub fn add(&mut self, prefix: &str, base_dir: &str) {
        self.add_dirs(prefix, &[base_dir]);
    }

    /// Register (or overwrite) a prefix with an ordered list of base directories
    pub fn add_dirs<S: AsRef<str>>(&mut self, prefix: &str, base_dirs: &[S]) {
        self.add_anchored(prefix, base_dirs, None);
    }

    /// Register (or overwrite) a prefix whose relative directories resolve against `anchor`
    pub fn add_anchored<S: AsRef<str>>(
        &mut self,
        prefix: &str,
        base_dirs: &[S],
        anchor: Option<&Path>,
    ) {
        let mapping = NamespaceMapping {
            prefix: normalize_prefix(prefix),
            dirs: base_dirs
                .iter()
                .map(|d| normalize_base_dir(d.as_ref()))
                .collect(),
            anchor: anchor.map(Path::to_path_buf),
        };

        log::trace!("mapping {} -> {:?}", mapping.prefix, mapping.dirs);

        match self.entries.iter_mut().find(|m| m.prefix == mapping.prefix) {
            Some(existing) => *existing = mapping,
            None => self.entries.push(mapping),
        }
    }

    /// Exact-key lookup of the base directories
    pub fn get(&self, prefix: &str) -> Option<&[String]> {
        self.lookup(prefix).map(|m| m.dirs.as_slice())
    }

    /// Exact-key lookup of the whole entry
    pub fn lookup(&self, prefix: &str) -> Option<&NamespaceMapping> {
        self.entries.iter().find(|m| m.prefix == prefix)
    }

    /// Longest registered prefix covering whole leading segments of `symbol`
    pub fn longest_prefix_of(&self, symbol: &str) -> Option<&NamespaceMapping> {
        self.entries
            .iter()
            .filter(|m| covers(&m.prefix, symbol))
            .max_by_key(|m| m.prefix.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamespaceMapping> {
        self.entries.iter()
    }
}

/// `App\Http` covers `App\Http\Kernel` and `App\Http`, but not `App\HttpClient`.
/// The empty prefix covers everything.
fn covers(prefix: &str, symbol: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match symbol.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(NAMESPACE_SEPARATOR),
        None => false,
    }
}
