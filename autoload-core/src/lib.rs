// autoload-core - namespace class loader
// Maps namespace prefixes to directories (from composer.json) and loads the
// file a fully-qualified symbol name points at.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod executor;
pub mod manifest;
pub mod mapping;
pub mod resolver;
pub mod runtime;

pub use bootstrap::bootstrap;
pub use config::{AutoloadConfig, MatchStrategy, INSTALL_DIR_ENV};
pub use error::{LoadError, ManifestError};
pub use executor::{scan_declarations, DeclarationScanner, SourceExecutor};
pub use manifest::{find_manifest, ComposerManifest, Psr4Target};
pub use mapping::{MappingStore, NamespaceMapping, NAMESPACE_SEPARATOR};
pub use resolver::Resolver;
pub use runtime::{ClassLoader, Runtime, SourceHost};
