//! Settings schemas.
//!
//! A [`SettingsSchema`] is plain data: the set of options a block type
//! declares, each with an optional default, the value kinds it accepts, an
//! optional whitelist of values, and an optional normalizer. Block services
//! populate a schema, then [`SettingsSchema::resolve`] checks raw settings
//! against it and fills in the defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use blockkit_core::{Settings, Value, ValueKind};

use crate::ValidationError;

/// Transforms an option's value after kind checks.
///
/// Receives the merged settings (every option with a value already present)
/// and the value to normalize. Runs only for options that have a value. An `Err` message becomes
/// [`ValidationError::InvalidValue`].
pub type Normalizer = Arc<dyn Fn(&Settings, Value) -> Result<Value, String> + Send + Sync>;

#[derive(Clone, Default)]
struct OptionSpec {
    default: Option<Value>,
    required: bool,
    allowed_kinds: Vec<ValueKind>,
    allowed_values: Vec<Value>,
    normalizer: Option<Normalizer>,
}

impl OptionSpec {
    fn check(&self, name: &str, value: &Value) -> Result<(), ValidationError> {
        if !self.allowed_kinds.is_empty() && !self.allowed_kinds.contains(&value.kind()) {
            return Err(ValidationError::InvalidType {
                option: name.to_string(),
                expected: self.allowed_kinds.clone(),
                actual: value.kind(),
            });
        }

        if !self.allowed_values.is_empty() && !self.allowed_values.contains(value) {
            let accepted = self
                .allowed_values
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ValidationError::InvalidValue {
                option: name.to_string(),
                message: format!("{} is not one of {}", value, accepted),
            });
        }

        Ok(())
    }
}

/// The declared options of a block type.
///
/// Declaring an option again replaces its default but keeps its constraints,
/// so a block service can override a builtin default (say, `template`)
/// without re-stating the accepted kinds.
///
/// Constraining an option that was never declared makes it optional: it is
/// accepted when supplied and left out of the result otherwise. Only
/// [`set_required`](Self::set_required) makes an option mandatory.
///
/// # Example
///
/// ```rust
/// use blockkit_core::{Settings, Value, ValueKind};
/// use blockkit_settings::SettingsSchema;
///
/// let mut schema = SettingsSchema::new();
/// schema
///     .set_default("ttl", 0)
///     .set_allowed_kinds("ttl", &[ValueKind::Integer]);
///
/// let resolved = schema.resolve(&Settings::new()).unwrap();
/// assert_eq!(resolved.get("ttl"), Some(&Value::Integer(0)));
/// ```
#[derive(Clone, Default)]
pub struct SettingsSchema {
    options: BTreeMap<String, OptionSpec>,
}

impl SettingsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    fn spec_mut(&mut self, name: &str) -> &mut OptionSpec {
        self.options.entry(name.to_string()).or_default()
    }

    /// Declare an option with a default value.
    pub fn set_default(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.spec_mut(name).default = Some(value.into());
        self
    }

    /// Declare several options with defaults at once.
    pub fn set_defaults(&mut self, defaults: Settings) -> &mut Self {
        for (name, value) in defaults {
            self.spec_mut(&name).default = Some(value);
        }
        self
    }

    /// Declare an option with no default; raw settings must supply it.
    pub fn set_required(&mut self, name: &str) -> &mut Self {
        let spec = self.spec_mut(name);
        spec.default = None;
        spec.required = true;
        self
    }

    /// Replace the kinds an option accepts. An empty list accepts any kind.
    pub fn set_allowed_kinds(&mut self, name: &str, kinds: &[ValueKind]) -> &mut Self {
        self.spec_mut(name).allowed_kinds = kinds.to_vec();
        self
    }

    /// Accept additional kinds for an option.
    pub fn add_allowed_kinds(&mut self, name: &str, kinds: &[ValueKind]) -> &mut Self {
        let spec = self.spec_mut(name);
        for kind in kinds {
            if !spec.allowed_kinds.contains(kind) {
                spec.allowed_kinds.push(*kind);
            }
        }
        self
    }

    /// Restrict an option to an enumerated set of values.
    pub fn set_allowed_values(&mut self, name: &str, values: Vec<Value>) -> &mut Self {
        self.spec_mut(name).allowed_values = values;
        self
    }

    pub fn set_normalizer<F>(&mut self, name: &str, normalizer: F) -> &mut Self
    where
        F: Fn(&Settings, Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.spec_mut(name).normalizer = Some(Arc::new(normalizer));
        self
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.options
            .get(name)
            .is_some_and(|spec| spec.required && spec.default.is_none())
    }

    /// Declared option names, sorted.
    pub fn defined_options(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn default_of(&self, name: &str) -> Option<&Value> {
        self.options.get(name)?.default.as_ref()
    }

    /// Check raw settings against the schema and fill in defaults.
    ///
    /// On success every option with a default or marked required is present
    /// in the result; optional options only when supplied. Raw keys
    /// that are not declared are rejected, as are values of the wrong kind.
    /// Values are never coerced between kinds.
    pub fn resolve(&self, raw: &Settings) -> Result<Settings, ValidationError> {
        let undefined: Vec<String> = raw
            .keys()
            .filter(|key| !self.options.contains_key(*key))
            .cloned()
            .collect();
        if !undefined.is_empty() {
            return Err(ValidationError::UndefinedOptions {
                options: undefined,
                defined: self.options.keys().cloned().collect(),
            });
        }

        let mut resolved = Settings::new();
        for (name, spec) in &self.options {
            let value = match raw.get(name).or(spec.default.as_ref()) {
                Some(value) => value.clone(),
                None if spec.required => {
                    return Err(ValidationError::MissingOption {
                        option: name.clone(),
                    })
                }
                None => continue,
            };
            spec.check(name, &value)?;
            resolved.insert(name.clone(), value);
        }

        // Normalizers run once every present option is checked
        for (name, spec) in &self.options {
            let (Some(normalizer), Some(value)) = (&spec.normalizer, resolved.get(name).cloned())
            else {
                continue;
            };
            let normalized =
                normalizer(&resolved, value).map_err(|message| ValidationError::InvalidValue {
                    option: name.clone(),
                    message,
                })?;
            resolved.insert(name.clone(), normalized);
        }

        Ok(resolved)
    }
}

impl fmt::Debug for SettingsSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, spec) in &self.options {
            map.entry(name, &(&spec.default, &spec.allowed_kinds));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    fn template_schema() -> SettingsSchema {
        let mut schema = SettingsSchema::new();
        schema
            .set_default("template", false)
            .set_allowed_kinds("template", &[ValueKind::String, ValueKind::Bool])
            .set_default("ttl", 0)
            .set_allowed_kinds("ttl", &[ValueKind::Integer]);
        schema
    }

    #[test]
    fn defaults_fill_missing_options() {
        let resolved = template_schema().resolve(&Settings::new()).unwrap();
        assert_eq!(
            resolved,
            btree! {
                "template".into() => Value::Bool(false),
                "ttl".into() => Value::Integer(0),
            }
        );
    }

    #[test]
    fn raw_values_win_over_defaults() {
        let raw = btree! { "template".into() => Value::from("block.html") };
        let resolved = template_schema().resolve(&raw).unwrap();
        assert_eq!(resolved.get("template"), Some(&Value::from("block.html")));
        assert_eq!(resolved.get("ttl"), Some(&Value::Integer(0)));
    }

    #[test]
    fn undeclared_keys_are_all_reported() {
        let raw = btree! {
            "zeta".into() => Value::Null,
            "alpha".into() => Value::Null,
            "ttl".into() => Value::Integer(1),
        };
        let err = template_schema().resolve(&raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UndefinedOptions {
                options: vec!["alpha".into(), "zeta".into()],
                defined: vec!["template".into(), "ttl".into()],
            }
        );
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let raw = btree! { "template".into() => Value::array() };
        let err = template_schema().resolve(&raw).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidType { ref option, actual: ValueKind::Array, .. } if option == "template"
        ));
    }

    #[test]
    fn strings_are_not_coerced_to_integers() {
        let raw = btree! { "ttl".into() => Value::from("60") };
        let err = template_schema().resolve(&raw).unwrap_err();
        assert_eq!(err.option(), Some("ttl"));
    }

    #[test]
    fn required_option_must_be_supplied() {
        let mut schema = template_schema();
        schema.set_required("url");
        assert!(schema.is_required("url"));

        let err = schema.resolve(&Settings::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingOption {
                option: "url".into()
            }
        );

        let raw = btree! { "url".into() => Value::from("https://example.org/feed") };
        assert!(schema.resolve(&raw).is_ok());
    }

    #[test]
    fn redeclaring_keeps_constraints() {
        let mut schema = template_schema();
        schema.set_default("template", "text.html");

        assert_eq!(schema.default_of("template"), Some(&Value::from("text.html")));
        let err = schema
            .resolve(&btree! { "template".into() => Value::Integer(3) })
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType { .. }));
    }

    #[test]
    fn add_allowed_kinds_extends() {
        let mut schema = template_schema();
        schema.add_allowed_kinds("ttl", &[ValueKind::Null, ValueKind::Integer]);
        let resolved = schema
            .resolve(&btree! { "ttl".into() => Value::Null })
            .unwrap();
        assert_eq!(resolved.get("ttl"), Some(&Value::Null));
    }

    #[test]
    fn allowed_values_are_enforced() {
        let mut schema = SettingsSchema::new();
        schema
            .set_default("cache_policy", "public")
            .set_allowed_values("cache_policy", vec!["public".into(), "private".into()]);

        assert!(schema
            .resolve(&btree! { "cache_policy".into() => Value::from("private") })
            .is_ok());
        let err = schema
            .resolve(&btree! { "cache_policy".into() => Value::from("shared") })
            .unwrap_err();
        assert!(err.to_string().contains("\"shared\""));
    }

    #[test]
    fn normalizer_sees_merged_settings() {
        let mut schema = template_schema();
        schema.set_default("label", "").set_normalizer("label", |settings, value| {
            let ttl = settings.get("ttl").and_then(Value::as_i64).unwrap_or(0);
            match value {
                Value::String(s) => Ok(Value::String(format!("{} ({}s)", s, ttl))),
                other => Err(format!("cannot label {}", other)),
            }
        });

        let resolved = schema
            .resolve(&btree! {
                "label".into() => Value::from("news"),
                "ttl".into() => Value::Integer(30),
            })
            .unwrap();
        assert_eq!(resolved.get("label"), Some(&Value::from("news (30s)")));
    }

    #[test]
    fn normalizer_error_becomes_invalid_value() {
        let mut schema = SettingsSchema::new();
        schema
            .set_default("ttl", 0)
            .set_normalizer("ttl", |_, value| match value.as_i64() {
                Some(ttl) if ttl >= 0 => Ok(value),
                _ => Err("ttl must not be negative".into()),
            });

        let err = schema
            .resolve(&btree! { "ttl".into() => Value::Integer(-5) })
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                option: "ttl".into(),
                message: "ttl must not be negative".into(),
            }
        );
    }

    #[test]
    fn constraining_undeclared_option_makes_it_optional() {
        let mut schema = SettingsSchema::new();
        schema
            .set_allowed_kinds("title", &[ValueKind::String])
            .set_allowed_values("align", vec![Value::from("left"), Value::from("right")])
            .set_normalizer("label", |_, value| Ok(value));
        assert!(schema.is_defined("title"));
        assert!(!schema.is_required("title"));
        assert_eq!(
            schema.defined_options().collect::<Vec<_>>(),
            vec!["align", "label", "title"]
        );

        assert_eq!(schema.resolve(&Settings::new()).unwrap(), Settings::new());

        let resolved = schema
            .resolve(&btree! { "title".into() => Value::from("News") })
            .unwrap();
        assert_eq!(resolved.get("title"), Some(&Value::from("News")));
        assert_eq!(resolved.get("align"), None);

        let err = schema
            .resolve(&btree! { "title".into() => Value::Integer(1) })
            .unwrap_err();
        assert_eq!(err.option(), Some("title"));
    }

    #[test]
    fn required_stays_required_after_constraints() {
        let mut schema = SettingsSchema::new();
        schema
            .set_required("url")
            .set_allowed_kinds("url", &[ValueKind::String]);
        assert!(schema.is_required("url"));
        assert_eq!(
            schema.resolve(&Settings::new()).unwrap_err(),
            ValidationError::MissingOption {
                option: "url".into()
            }
        );
    }
}
