//! Settings schemas for blockkit.
//!
//! Block services describe their options by filling a [`SettingsSchema`]:
//! names, defaults, accepted [`ValueKind`](blockkit_core::ValueKind)s,
//! whitelisted values and normalizers. A [`SettingsValidator`] applies the
//! schema to raw settings and either returns a fully populated map or a
//! [`ValidationError`].

mod error;
mod schema;
mod validator;

pub use error::ValidationError;
pub use schema::{Normalizer, SettingsSchema};
pub use validator::SettingsValidator;
