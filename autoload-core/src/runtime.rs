// Symbol runtime with an ordered chain of fallback loaders

use crate::error::LoadError;
use crate::executor::SourceExecutor;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

/// Something a loader can ask to execute a source file
pub trait SourceHost {
    fn execute_file(&mut self, path: &Path) -> Result<(), LoadError>;
}

/// A fallback loader consulted when a symbol is not yet defined.
///
/// `Ok(false)` means "not mine" and lets the next loader in the chain try.
pub trait ClassLoader {
    fn load_class(&self, symbol: &str, host: &mut dyn SourceHost) -> Result<bool, LoadError>;
}

/// Owns the defined-symbol table and the loader chain.
///
/// Loaders are append-only and consulted in registration order.
pub struct Runtime<E: SourceExecutor> {
    defined: HashSet<String>,
    loaders: Vec<Rc<dyn ClassLoader>>,
    executor: E,
}

impl<E: SourceExecutor> Runtime<E> {
    pub fn new(executor: E) -> Self {
        Self {
            defined: HashSet::new(),
            loaders: Vec::new(),
            executor,
        }
    }

    pub fn register_loader(&mut self, loader: Rc<dyn ClassLoader>) {
        self.loaders.push(loader);
        log::debug!("registered loader #{}", self.loaders.len());
    }

    pub fn loaders_len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.defined.contains(symbol)
    }

    pub fn define(&mut self, symbol: impl Into<String>) {
        self.defined.insert(symbol.into());
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Make sure `symbol` is defined, running loaders on a miss.
    ///
    /// Returns whether the symbol is defined afterwards. A loader that executes
    /// a file without declaring the symbol does not stop the chain.
    pub fn ensure_loaded(&mut self, symbol: &str) -> Result<bool, LoadError> {
        let symbol = symbol.trim_start_matches('\\');
        if self.is_defined(symbol) {
            return Ok(true);
        }

        let loaders = self.loaders.clone();
        for loader in loaders {
            loader.load_class(symbol, &mut *self)?;
            if self.is_defined(symbol) {
                return Ok(true);
            }
        }

        log::debug!("symbol {} is still undefined", symbol);
        Ok(false)
    }
}

impl<E: SourceExecutor> SourceHost for Runtime<E> {
    fn execute_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let declared = self.executor.execute(path)?;
        self.defined.extend(declared);
        Ok(())
    }
}
