// Entry point: build a resolver from config, load mappings, register it

use crate::config::AutoloadConfig;
use crate::error::ManifestError;
use crate::executor::SourceExecutor;
use crate::resolver::Resolver;
use crate::runtime::Runtime;
use std::rc::Rc;

/// Construct the resolver, load its manifest and append it to `runtime`.
///
/// The resolver is returned for reuse. Manifest errors are not recovered here;
/// on failure nothing is registered.
pub fn bootstrap<E: SourceExecutor>(
    runtime: &mut Runtime<E>,
    config: &AutoloadConfig,
) -> Result<Rc<Resolver>, ManifestError> {
    let mut resolver = Resolver::from_config(config);

    match &config.manifest_path {
        Some(path) => resolver.load_mappings_from_file(path)?,
        None => resolver.load_mappings_from_manifest()?,
    };

    let resolver = Rc::new(resolver);
    resolver.register(runtime);
    Ok(resolver)
}
