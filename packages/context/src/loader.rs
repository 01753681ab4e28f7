//! Turning inline block descriptors into blocks.

use std::collections::BTreeSet;
use std::sync::Arc;

use blockkit_core::{Block, BlockDescriptor};

use crate::{BlockServiceManager, Error};

/// Builds blocks from descriptors.
pub trait BlockLoader: Send + Sync {
    fn supports(&self, descriptor: &BlockDescriptor) -> bool;

    fn load(&self, descriptor: &BlockDescriptor) -> Result<Block, Error>;
}

/// Loads unsaved blocks for a known set of service types.
///
/// The block carries the descriptor's settings and no id.
#[derive(Clone, Debug, Default)]
pub struct ServiceLoader {
    types: BTreeSet<String>,
}

impl ServiceLoader {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// A loader accepting every type registered with `manager`.
    pub fn for_services(manager: &BlockServiceManager) -> Self {
        Self::new(manager.names())
    }
}

impl BlockLoader for ServiceLoader {
    fn supports(&self, descriptor: &BlockDescriptor) -> bool {
        self.types.contains(&descriptor.block_type)
    }

    fn load(&self, descriptor: &BlockDescriptor) -> Result<Block, Error> {
        if !self.supports(descriptor) {
            return Err(Error::LoaderNotFound {
                block_type: descriptor.block_type.clone(),
            });
        }
        Ok(Block::new(descriptor.block_type.clone()).with_settings(descriptor.settings.clone()))
    }
}

/// Tries loaders in order; the first one that supports a descriptor loads it.
#[derive(Clone, Default)]
pub struct BlockLoaderChain {
    loaders: Vec<Arc<dyn BlockLoader>>,
}

impl BlockLoaderChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader<L: BlockLoader + 'static>(mut self, loader: L) -> Self {
        self.loaders.push(Arc::new(loader));
        self
    }
}

impl BlockLoader for BlockLoaderChain {
    fn supports(&self, descriptor: &BlockDescriptor) -> bool {
        self.loaders.iter().any(|loader| loader.supports(descriptor))
    }

    fn load(&self, descriptor: &BlockDescriptor) -> Result<Block, Error> {
        match self.loaders.iter().find(|loader| loader.supports(descriptor)) {
            Some(loader) => loader.load(descriptor),
            None => Err(Error::LoaderNotFound {
                block_type: descriptor.block_type.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{RSS_BLOCK, TEXT_BLOCK};
    use blockkit_core::Value;

    #[test]
    fn service_loader_builds_unsaved_block() {
        let loader = ServiceLoader::new([TEXT_BLOCK]);
        let descriptor = BlockDescriptor::new(TEXT_BLOCK).with_setting("content", "hi");

        let block = loader.load(&descriptor).unwrap();
        assert_eq!(block.block_type(), TEXT_BLOCK);
        assert_eq!(block.id(), None);
        assert_eq!(block.settings().get("content"), Some(&Value::from("hi")));
    }

    #[test]
    fn service_loader_rejects_unknown_type() {
        let loader = ServiceLoader::new([TEXT_BLOCK]);
        let err = loader.load(&BlockDescriptor::new(RSS_BLOCK)).unwrap_err();
        assert!(matches!(err, Error::LoaderNotFound { .. }));
    }

    #[test]
    fn loader_for_services_tracks_registry() {
        let loader = ServiceLoader::for_services(&BlockServiceManager::with_builtin_services());
        assert!(loader.supports(&BlockDescriptor::new(RSS_BLOCK)));
        assert!(!loader.supports(&BlockDescriptor::new("acme.block.menu")));
    }

    #[test]
    fn chain_uses_first_supporting_loader() {
        let chain = BlockLoaderChain::new()
            .with_loader(ServiceLoader::new([TEXT_BLOCK]))
            .with_loader(ServiceLoader::new([RSS_BLOCK]));

        assert!(chain.supports(&BlockDescriptor::new(RSS_BLOCK)));
        assert_eq!(
            chain.load(&BlockDescriptor::new(RSS_BLOCK)).unwrap().block_type(),
            RSS_BLOCK
        );
        assert!(chain.load(&BlockDescriptor::new("acme.block.menu")).is_err());
    }
}
