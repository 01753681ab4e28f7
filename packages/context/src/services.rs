//! Builtin block services.

use blockkit_core::{Value, ValueKind};
use blockkit_settings::SettingsSchema;

use crate::BlockService;

pub const EMPTY_BLOCK: &str = "blockkit.block.empty";
pub const TEXT_BLOCK: &str = "blockkit.block.text";
pub const RSS_BLOCK: &str = "blockkit.block.rss";

/// A block with no options of its own. Renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyBlockService;

impl BlockService for EmptyBlockService {
    fn name(&self) -> &str {
        EMPTY_BLOCK
    }
}

/// Static text content.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextBlockService;

impl BlockService for TextBlockService {
    fn name(&self) -> &str {
        TEXT_BLOCK
    }

    fn configure_settings(&self, schema: &mut SettingsSchema) {
        schema
            .set_default("content", "Insert your custom content here")
            .set_allowed_kinds("content", &[ValueKind::String])
            .set_default("template", "block/text.html");
    }
}

/// An RSS feed reader. `url` stays `false` until configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct RssBlockService;

impl BlockService for RssBlockService {
    fn name(&self) -> &str {
        RSS_BLOCK
    }

    fn configure_settings(&self, schema: &mut SettingsSchema) {
        schema
            .set_default("url", false)
            .set_allowed_kinds("url", &[ValueKind::String, ValueKind::Bool])
            .set_default("title", Value::Null)
            .set_allowed_kinds("title", &[ValueKind::String, ValueKind::Null])
            .set_default("template", "block/rss.html");
    }
}
