//! Block services and the registry that resolves them.

use std::collections::BTreeMap;
use std::sync::Arc;

use blockkit_core::Block;
use blockkit_settings::SettingsSchema;

use crate::services::{EmptyBlockService, RssBlockService, TextBlockService};
use crate::Error;

/// A service that knows how to configure (and, elsewhere, render) one
/// block type.
pub trait BlockService: Send + Sync {
    /// The type tag this service is registered under.
    fn name(&self) -> &str;

    /// Declare the service's options on top of the builtin ones.
    ///
    /// May be called more than once per resolution: once for the stored
    /// settings and once more if those fail validation.
    fn configure_settings(&self, _schema: &mut SettingsSchema) {}
}

/// Finds the service responsible for a block.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn BlockServiceResolver>`.
pub trait BlockServiceResolver: Send + Sync {
    /// Returns [`Error::ServiceNotFound`] when nothing handles the block's type.
    fn get(&self, block: &Block) -> Result<Arc<dyn BlockService>, Error>;
}

impl<T: BlockServiceResolver + ?Sized> BlockServiceResolver for &T {
    fn get(&self, block: &Block) -> Result<Arc<dyn BlockService>, Error> {
        (*self).get(block)
    }
}

impl<T: BlockServiceResolver + ?Sized> BlockServiceResolver for Arc<T> {
    fn get(&self, block: &Block) -> Result<Arc<dyn BlockService>, Error> {
        self.as_ref().get(block)
    }
}

impl<T: BlockServiceResolver + ?Sized> BlockServiceResolver for Box<T> {
    fn get(&self, block: &Block) -> Result<Arc<dyn BlockService>, Error> {
        self.as_ref().get(block)
    }
}

/// In-memory registry of block services keyed by type tag.
#[derive(Clone, Default)]
pub struct BlockServiceManager {
    services: BTreeMap<String, Arc<dyn BlockService>>,
}

impl BlockServiceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the empty, text and RSS services.
    pub fn with_builtin_services() -> Self {
        let mut manager = Self::new();
        manager
            .add(EmptyBlockService)
            .add(TextBlockService)
            .add(RssBlockService);
        manager
    }

    /// Register a service under its own name, replacing any previous one.
    pub fn add<S: BlockService + 'static>(&mut self, service: S) -> &mut Self {
        self.add_shared(Arc::new(service))
    }

    pub fn add_shared(&mut self, service: Arc<dyn BlockService>) -> &mut Self {
        log::debug!("registering block service {}", service.name());
        self.services.insert(service.name().to_string(), service);
        self
    }

    pub fn has(&self, block_type: &str) -> bool {
        self.services.contains_key(block_type)
    }

    pub fn service(&self, block_type: &str) -> Option<Arc<dyn BlockService>> {
        self.services.get(block_type).cloned()
    }

    /// Registered type tags, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}

impl BlockServiceResolver for BlockServiceManager {
    fn get(&self, block: &Block) -> Result<Arc<dyn BlockService>, Error> {
        self.service(block.block_type())
            .ok_or_else(|| Error::ServiceNotFound {
                block_type: block.block_type().to_string(),
            })
    }
}
