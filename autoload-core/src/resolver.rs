// Namespace resolver: symbol name -> source file

use crate::config::{AutoloadConfig, MatchStrategy, INSTALL_DIR_ENV};
use crate::error::{LoadError, ManifestError};
use crate::executor::SourceExecutor;
use crate::manifest::{find_manifest, ComposerManifest};
use crate::mapping::{MappingStore, NamespaceMapping, NAMESPACE_SEPARATOR};
use crate::runtime::{ClassLoader, Runtime, SourceHost};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Maps namespace prefixes to base directories and loads the file a symbol
/// name points at.
#[derive(Debug, Clone)]
pub struct Resolver {
    mappings: MappingStore,
    extension: String,
    strategy: MatchStrategy,
    include_dev: bool,
    manifest_name: String,
    install_dir: Option<PathBuf>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::from_config(&AutoloadConfig::default())
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AutoloadConfig) -> Self {
        Self {
            mappings: MappingStore::new(),
            extension: config.extension.trim_start_matches('.').to_string(),
            strategy: config.strategy,
            include_dev: config.include_dev,
            manifest_name: config.manifest_name.clone(),
            install_dir: config.install_dir.clone(),
        }
    }

    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Register a namespace prefix with its base directory (overwrites)
    pub fn add_mapping(&mut self, prefix: &str, base_dir: &str) {
        self.mappings.add(prefix, base_dir);
    }

    /// Register a namespace prefix with several base directories, tried in order
    pub fn add_mapping_dirs<S: AsRef<str>>(&mut self, prefix: &str, base_dirs: &[S]) {
        self.mappings.add_dirs(prefix, base_dirs);
    }

    pub fn mappings(&self) -> &MappingStore {
        &self.mappings
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Directory the manifest search starts from.
    ///
    /// Explicit setting, then `AUTOLOAD_INSTALL_DIR`, then the directory holding
    /// the running executable.
    pub fn install_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.install_dir {
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var(INSTALL_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let exe = std::env::current_exe().context("Cannot determine install directory")?;
        exe.parent()
            .map(Path::to_path_buf)
            .context("Executable path has no parent directory")
    }

    /// Find the manifest above the install directory and register its PSR-4 mappings
    pub fn load_mappings_from_manifest(&mut self) -> Result<bool, ManifestError> {
        let install_dir = self.install_dir()?;
        // A relative start would run out of components before the real parents
        let start = std::path::absolute(&install_dir).with_context(|| {
            format!("Cannot make install directory absolute: {}", install_dir.display())
        })?;
        let path = find_manifest(&start, &self.manifest_name).ok_or_else(|| {
            ManifestError::new(format!(
                "{} file not found in {} or any parent directory",
                self.manifest_name,
                start.display()
            ))
        })?;

        self.load_mappings_from_file(&path)
    }

    /// Register the PSR-4 mappings of a specific manifest file.
    ///
    /// Relative directories of these entries resolve against the manifest's
    /// directory. Mappings added by hand are left alone.
    pub fn load_mappings_from_file(&mut self, path: &Path) -> Result<bool, ManifestError> {
        let manifest = ComposerManifest::from_file(path)?;
        let anchor = path.parent();

        let mut count = 0;
        for (prefix, target) in manifest.entries(self.include_dev) {
            self.mappings.add_anchored(prefix, target.dirs().as_slice(), anchor);
            count += 1;
        }

        log::info!(
            "loaded {} PSR-4 mapping(s) from {}{}",
            count,
            path.display(),
            manifest
                .name
                .as_deref()
                .map(|n| format!(" ({})", n))
                .unwrap_or_default()
        );

        Ok(true)
    }

    /// Match `symbol` against the registered prefixes using the configured strategy
    fn match_prefix(&self, symbol: &str) -> Option<&NamespaceMapping> {
        match self.strategy {
            MatchStrategy::FirstSegment => {
                let first = symbol.split(NAMESPACE_SEPARATOR).next()?;
                if first.is_empty() {
                    return None;
                }
                self.mappings.lookup(first)
            }
            MatchStrategy::LongestPrefix => self.mappings.longest_prefix_of(symbol),
        }
    }

    /// `App\Models\User` with prefix `App` -> `Models/User.php`
    fn relative_path(&self, symbol: &str, prefix: &str) -> Option<String> {
        let tail = symbol
            .strip_prefix(prefix)?
            .trim_start_matches(NAMESPACE_SEPARATOR);
        if tail.is_empty() {
            return None;
        }

        Some(format!(
            "{}.{}",
            tail.replace(NAMESPACE_SEPARATOR, "/"),
            self.extension
        ))
    }

    /// Path of the file that would be loaded for `symbol`, if it exists
    pub fn find_file(&self, symbol: &str) -> Option<PathBuf> {
        let symbol = symbol.trim_start_matches(NAMESPACE_SEPARATOR);
        let mapping = self.match_prefix(symbol)?;
        let relative = self.relative_path(symbol, &mapping.prefix)?;

        mapping
            .dirs
            .iter()
            .map(|dir| mapping.candidate(dir, &relative))
            .find(|path| {
                let found = path.is_file();
                log::trace!("{} -> {} ({})", symbol, path.display(), found);
                found
            })
    }

    /// Load the file for `symbol` through `host`.
    ///
    /// `Ok(false)` when the symbol is outside every mapped namespace or the file
    /// is missing, so other loaders can still claim it.
    pub fn resolve(&self, symbol: &str, host: &mut dyn SourceHost) -> Result<bool, LoadError> {
        match self.find_file(symbol) {
            Some(path) => {
                log::debug!("loading {} from {}", symbol, path.display());
                host.execute_file(&path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append this resolver to the runtime's loader chain
    pub fn register<E: SourceExecutor>(self: &Rc<Self>, runtime: &mut Runtime<E>) {
        runtime.register_loader(Rc::clone(self) as Rc<dyn ClassLoader>);
    }
}

impl ClassLoader for Resolver {
    fn load_class(&self, symbol: &str, host: &mut dyn SourceHost) -> Result<bool, LoadError> {
        self.resolve(symbol, host)
    }
}
