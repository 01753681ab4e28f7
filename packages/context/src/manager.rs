//! BlockContextManager: resolve a block and caller overrides into a context.
//!
//! Resolution runs in a fixed order:
//! 1. look up the block's service,
//! 2. build a schema from the builtin options, the service's options and
//!    the deployment's per-type/per-class defaults,
//! 3. validate the block's stored settings, falling back to pure defaults
//!    (and logging) when they are invalid,
//! 4. shallow-merge caller overrides on top,
//! 5. record the final template under [`CACHE_KEY`] in `extra_cache_keys`
//!    when any override was given.
//!
//! Only service lookup failures reach the caller; invalid stored settings
//! never do.

use std::collections::BTreeMap;
use std::sync::Arc;

use blockkit_core::{Block, BlockDescriptor, Settings, Value, ValueKind};
use blockkit_settings::{SettingsSchema, SettingsValidator, ValidationError};
use collection_literals::btree;

use crate::cache::CacheKeyStrategy;
use crate::config::ContextConfig;
use crate::loader::BlockLoader;
use crate::logger::Logger;
use crate::{BlockContext, BlockServiceResolver, Error};

/// Key under which the override overlay is stored in `extra_cache_keys`.
pub const CACHE_KEY: &str = "context";

/// Options every block has, with their defaults.
pub fn builtin_defaults() -> Settings {
    btree! {
        "use_cache".into() => Value::Bool(true),
        "extra_cache_keys".into() => Value::map(),
        "attr".into() => Value::map(),
        "template".into() => Value::Bool(false),
        "ttl".into() => Value::Integer(0),
    }
}

/// The builtin options as a schema, with their accepted kinds.
pub fn builtin_schema() -> SettingsSchema {
    let mut schema = SettingsSchema::new();
    schema
        .set_defaults(builtin_defaults())
        .set_allowed_kinds("use_cache", &[ValueKind::Bool])
        .set_allowed_kinds("extra_cache_keys", &[ValueKind::Map])
        .set_allowed_kinds("attr", &[ValueKind::Map])
        .set_allowed_kinds("template", &[ValueKind::String, ValueKind::Bool])
        .set_allowed_kinds("ttl", &[ValueKind::Integer]);
    schema
}

/// Builds [`BlockContext`]s.
///
/// Stateless between calls: every resolution repeats the full computation,
/// so the manager can be shared across threads without locking.
pub struct BlockContextManager<R> {
    resolver: R,
    cache: CacheKeyStrategy,
    settings_by_type: BTreeMap<String, Settings>,
    settings_by_class: BTreeMap<String, Settings>,
    loader: Option<Arc<dyn BlockLoader>>,
    logger: Option<Arc<dyn Logger>>,
}

impl<R: BlockServiceResolver> BlockContextManager<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            cache: CacheKeyStrategy::default(),
            settings_by_type: BTreeMap::new(),
            settings_by_class: BTreeMap::new(),
            loader: None,
            logger: None,
        }
    }

    pub fn from_config(resolver: R, config: &ContextConfig) -> Self {
        Self {
            cache: config.cache_strategy(),
            settings_by_type: config.settings_by_type.clone(),
            settings_by_class: config.settings_by_class.clone(),
            ..Self::new(resolver)
        }
    }

    pub fn with_cache_strategy(mut self, cache: CacheKeyStrategy) -> Self {
        self.cache = cache;
        self
    }

    /// Deployment defaults for every block of `block_type`.
    pub fn with_type_settings(mut self, block_type: impl Into<String>, settings: Settings) -> Self {
        self.settings_by_type.insert(block_type.into(), settings);
        self
    }

    /// Deployment defaults for every block stored as `class`. Applied after
    /// the per-type defaults.
    pub fn with_class_settings(mut self, class: impl Into<String>, settings: Settings) -> Self {
        self.settings_by_class.insert(class.into(), settings);
        self
    }

    pub fn with_loader<L: BlockLoader + 'static>(mut self, loader: L) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn cache_strategy(&self) -> &CacheKeyStrategy {
        &self.cache
    }

    /// Resolve `block` with caller `overrides` into a context.
    ///
    /// Overrides are merged after validation and are not checked against
    /// the schema. Fails only when no service handles the block.
    pub fn resolve(&self, block: &Block, overrides: &Settings) -> Result<BlockContext, Error> {
        let mut settings = match self.validate(block, block.settings()) {
            Ok(settings) => settings,
            Err(Error::Validation(err)) => {
                self.log_fallback(block, &err);
                self.validate(block, &Settings::new())?
            }
            Err(err) => return Err(err),
        };

        for (name, value) in overrides {
            settings.insert(name.clone(), value.clone());
        }

        if !overrides.is_empty() {
            apply_cache_overlay(&mut settings);
        }

        let cache_service = self.cache.service_for(block);
        Ok(BlockContext::new(block.clone(), settings, cache_service))
    }

    /// Load a block from a descriptor and resolve it.
    ///
    /// The descriptor's settings become the block's stored settings and go
    /// through validation, falling back to defaults like any stored
    /// settings. Only the caller's `overrides` bypass validation.
    pub fn load(
        &self,
        descriptor: &BlockDescriptor,
        overrides: &Settings,
    ) -> Result<BlockContext, Error> {
        let loader = self.loader.as_ref().ok_or_else(|| Error::LoaderNotFound {
            block_type: descriptor.block_type.clone(),
        })?;
        let block = loader.load(descriptor)?;
        self.resolve(&block, overrides)
    }

    fn validate(&self, block: &Block, raw: &Settings) -> Result<Settings, Error> {
        let service = self.resolver.get(block)?;
        let validator = SettingsValidator::new(builtin_schema())
            .configure(|schema| service.configure_settings(schema))
            .configure(|schema| self.apply_deployment_defaults(block, schema));
        Ok(validator.validate(raw)?)
    }

    fn apply_deployment_defaults(&self, block: &Block, schema: &mut SettingsSchema) {
        if let Some(defaults) = self.settings_by_type.get(block.block_type()) {
            schema.set_defaults(defaults.clone());
        }
        if let Some(defaults) = self.settings_by_class.get(block.class()) {
            schema.set_defaults(defaults.clone());
        }
    }

    fn log_fallback(&self, block: &Block, err: &ValidationError) {
        let Some(logger) = &self.logger else {
            return;
        };
        let message = format!(
            "[blockkit::context] block.id={} - error while resolving settings - {}",
            block.identity(),
            err
        );
        let context = btree! {
            "block_id".into() => Value::from(block.identity()),
            "block_type".into() => Value::from(block.block_type()),
            "error".into() => Value::from(err.to_string()),
        };
        logger.error(&message, &context);
    }
}

/// Record the final template under [`CACHE_KEY`] so cache identity follows
/// manual template overrides.
fn apply_cache_overlay(settings: &mut Settings) {
    let template = settings
        .get("template")
        .cloned()
        .unwrap_or(Value::Bool(false));

    let mut keys = match settings.remove("extra_cache_keys") {
        Some(Value::Map(keys)) => keys,
        Some(other) => {
            log::debug!("replacing non-map extra_cache_keys override {}", other);
            BTreeMap::new()
        }
        None => BTreeMap::new(),
    };
    keys.insert(
        CACHE_KEY.to_string(),
        Value::Map(btree! { "template".into() => template }),
    );
    settings.insert("extra_cache_keys".into(), Value::Map(keys));
}
