//! A settings validator: a schema plus the configuration step that fills it.

use blockkit_core::Settings;

use crate::{SettingsSchema, ValidationError};

/// Validates raw settings against a block-type-specific schema.
///
/// Seed it with a base schema (typically the builtin defaults every block
/// shares), let the block service declare its own options through
/// [`configure`](Self::configure), then [`validate`](Self::validate).
#[derive(Clone, Debug, Default)]
pub struct SettingsValidator {
    schema: SettingsSchema,
}

impl SettingsValidator {
    pub fn new(schema: SettingsSchema) -> Self {
        Self { schema }
    }

    /// Let a caller declare options on the underlying schema.
    pub fn configure<F>(mut self, declare: F) -> Self
    where
        F: FnOnce(&mut SettingsSchema),
    {
        declare(&mut self.schema);
        self
    }

    pub fn schema(&self) -> &SettingsSchema {
        &self.schema
    }

    pub fn validate(&self, raw: &Settings) -> Result<Settings, ValidationError> {
        self.schema.resolve(raw)
    }
}
