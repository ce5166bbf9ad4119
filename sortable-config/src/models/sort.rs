use crate::error::{ConfigError, Result};
use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use sortable_core::headers::DEFAULT_SINGLE_HEADER;
use sortable_core::{
    Collection, FieldAccess, FieldMap, FieldSpec, HeaderKind, HeaderSettings, HeaderedSortable,
    SortValue, Sortable,
};
use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Environment variable naming a TOML or JSON config file
pub const CONFIG_PATH_ENV: &str = "SORTABLE_CONFIG_PATH";
/// Environment variable holding an inline JSON config
pub const CONFIG_JSON_ENV: &str = "SORTABLE_CONFIG_JSON";

fn default_single_label() -> String {
    DEFAULT_SINGLE_HEADER.to_string()
}

fn default_related_key_field() -> String {
    "id".to_string()
}

/// Source that produced the sort configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Concrete field tokens behind one logical name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldTokens {
    One(String),
    Many(Vec<String>),
}

impl FieldTokens {
    fn to_spec(&self, logical: &str) -> FieldSpec {
        match self {
            FieldTokens::One(token) => FieldSpec::Single(logical.to_string(), token.clone()),
            FieldTokens::Many(tokens) => FieldSpec::Many(logical.to_string(), tokens.clone()),
        }
    }
}

/// Declarative sort settings for one collection.
///
/// ```toml
/// default_order = ["-created"]
///
/// [fields]
/// title = "title"
/// name = ["last", "first"]
/// newest = ["--created", "++title"]
///
/// [headers]
/// kind = "alpha"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SortConfig {
    /// Logical field name to one token or a list of tokens. Tokens may carry
    /// the `--`, `++`, `-` and `+` direction prefixes.
    pub fields: BTreeMap<String, FieldTokens>,
    /// Tokens used by `sql_predicate` when the requested field is unknown
    pub default_order: Vec<String>,
    pub headers: Option<HeadersConfig>,
}

/// Header bucketing settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadersConfig {
    pub kind: HeaderKind,
    /// Label for the bucket used when fewer than two headers apply
    #[serde(default = "default_single_label")]
    pub single_label: String,
    /// Return the plain sort instead of a single labelled bucket when fewer
    /// than two headers apply. Does not affect `kind = "none"`.
    pub flat_when_sparse: bool,
    /// Values for `list_values` headers, in display order
    pub fixed_values: Vec<SortValue>,
    /// Related-item field holding the header label
    pub related_header_field: Option<String>,
    /// Related-item field holding the key stored on records
    #[serde(default = "default_related_key_field")]
    pub related_key_field: String,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            kind: HeaderKind::None,
            single_label: default_single_label(),
            flat_when_sparse: false,
            fixed_values: Vec::new(),
            related_header_field: None,
            related_key_field: default_related_key_field(),
        }
    }
}

impl HeadersConfig {
    fn is_related(&self) -> bool {
        matches!(self.kind, HeaderKind::RelatedSingle | HeaderKind::RelatedMany)
    }

    fn apply_label(&self, settings: HeaderSettings) -> HeaderSettings {
        let label = (!self.flat_when_sparse).then(|| self.single_label.clone());
        settings.with_single_label(label)
    }

    /// Settings for every kind that needs no related items
    pub fn settings(&self) -> Result<HeaderSettings> {
        let settings = match self.kind {
            HeaderKind::None => HeaderSettings::single(),
            HeaderKind::Alpha => HeaderSettings::alpha(),
            HeaderKind::ListValues => HeaderSettings::list_values(self.fixed_values.clone()),
            HeaderKind::DateBucket => HeaderSettings::date_buckets(),
            kind @ (HeaderKind::RelatedSingle | HeaderKind::RelatedMany) => {
                return Err(ConfigError::RelatedItemsRequired { kind });
            }
        };
        Ok(self.apply_label(settings))
    }

    /// Settings with labels and keys read from `items` for related kinds
    pub fn settings_with_related<T: FieldAccess>(&self, items: &[T]) -> Result<HeaderSettings> {
        if !self.is_related() {
            return self.settings();
        }

        let header_field = self
            .related_header_field
            .as_deref()
            .ok_or(ConfigError::MissingRelatedHeaderField { kind: self.kind })?;
        let key_field = self.related_key_field.as_str();

        let settings = if self.kind == HeaderKind::RelatedMany {
            HeaderSettings::related_many(items, header_field, key_field)
        } else {
            HeaderSettings::related_single(items, header_field, key_field)
        }
        .map_err(ConfigError::Headers)?;

        Ok(self.apply_label(settings))
    }
}

impl SortConfig {
    /// Load sort configuration using environment variables.
    /// Evaluation order:
    /// 1) `$SORTABLE_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$SORTABLE_CONFIG_JSON` (inline JSON),
    /// 3) `sortable.toml` / `sortable.json` in the working directory,
    /// 4) defaults if none of these exist.
    pub fn load_from_env() -> anyhow::Result<(Self, SortConfigSource)> {
        Self::load_with(|key| env::var(key).ok())
    }

    pub(crate) fn load_with<F>(lookup: F) -> anyhow::Result<(Self, SortConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            debug!("Loading sort config from {} ({})", path.display(), CONFIG_PATH_ENV);
            let config = Self::load_from_file(&path)?;
            return Ok((config, SortConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_ENV)
            && !raw.trim().is_empty()
        {
            debug!("Loading sort config from {}", CONFIG_JSON_ENV);
            let parsed = Self::parse_json(&raw).context("failed to parse SORTABLE_CONFIG_JSON")?;
            return Ok((parsed, SortConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            debug!("Loading sort config from {}", path.display());
            let config = Self::load_from_file(&path)?;
            return Ok((config, SortConfigSource::File(path)));
        }

        debug!("No sort config found, using defaults");
        Ok((Self::default(), SortConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read sort config from {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("invalid sort config {}", path.display())),
            Some("toml") | Some("tml") => toml::from_str(&contents)
                .map_err(|err| anyhow!("invalid sort config {}: {}", path.display(), err)),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // TOML first, then JSON
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse sort config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|err| anyhow!("invalid sort config json: {err}"))
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "sortable.toml",
            "sortable.json",
            "config/sortable.toml",
            "config/sortable.json",
        ];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }

    /// Validated field map; empty when no fields are configured
    pub fn field_map(&self) -> Result<FieldMap> {
        FieldMap::try_from_specs(
            self.fields
                .iter()
                .map(|(logical, tokens)| tokens.to_spec(logical)),
        )
        .map_err(ConfigError::Fields)
    }

    /// Fallback tokens for `sql_predicate`, `None` when not configured
    pub fn default_order(&self) -> Option<Vec<&str>> {
        (!self.default_order.is_empty())
            .then(|| self.default_order.iter().map(String::as_str).collect())
    }

    /// Header settings, or a single `All` bucket when no headers are configured
    pub fn header_settings(&self) -> Result<HeaderSettings> {
        self.headers
            .as_ref()
            .map_or_else(|| Ok(HeaderSettings::single()), HeadersConfig::settings)
    }

    /// Header settings for configs whose headers come from related items
    pub fn header_settings_with_related<T: FieldAccess>(
        &self,
        items: &[T],
    ) -> Result<HeaderSettings> {
        match &self.headers {
            Some(headers) => headers.settings_with_related(items),
            None => Ok(HeaderSettings::single()),
        }
    }

    pub fn sortable<R: FieldAccess, Q>(
        &self,
        objects: impl Into<Collection<R, Q>>,
    ) -> Result<Sortable<R, Q>> {
        Ok(Sortable::new(objects, Some(self.field_map()?)))
    }

    pub fn headered<R: FieldAccess, Q>(
        &self,
        objects: impl Into<Collection<R, Q>>,
    ) -> Result<HeaderedSortable<R, Q>> {
        Ok(HeaderedSortable::new(self.sortable(objects)?, self.header_settings()?))
    }

    pub fn headered_with_related<R: FieldAccess, Q, T: FieldAccess>(
        &self,
        objects: impl Into<Collection<R, Q>>,
        items: &[T],
    ) -> Result<HeaderedSortable<R, Q>> {
        Ok(HeaderedSortable::new(
            self.sortable(objects)?,
            self.header_settings_with_related(items)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
default_order = ["-created", "title"]

[fields]
title = "title"
name = ["last", "first"]
newest = ["--created", "++title"]

[headers]
kind = "alpha"
single_label = "Everything"
"#;

    #[test]
    fn test_parse_toml() {
        let config = SortConfig::parse_from_str(SAMPLE, "inline").unwrap();

        assert_eq!(config.fields["title"], FieldTokens::One("title".into()));
        assert_eq!(
            config.fields["name"],
            FieldTokens::Many(vec!["last".into(), "first".into()])
        );

        let headers = config.headers.as_ref().unwrap();
        assert_eq!(headers.kind, HeaderKind::Alpha);
        assert_eq!(headers.single_label, "Everything");
        assert_eq!(headers.related_key_field, "id");
    }

    #[test]
    fn test_parse_falls_back_to_json() {
        let raw = r#"{ "fields": { "rating": ["-rating", "title"] } }"#;
        let config = SortConfig::parse_from_str(raw, "inline").unwrap();
        assert!(config.headers.is_none());
        assert_eq!(
            config.field_map().unwrap().get("rating").unwrap(),
            &["-rating".to_string(), "title".to_string()]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = SortConfig::parse_from_str("fields = [", "broken").unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_field_map_rejects_empty_tokens() {
        let config = SortConfig::parse_json(r#"{ "fields": { "title": [] } }"#).unwrap();
        assert!(matches!(config.field_map(), Err(ConfigError::Fields(_))));
    }

    #[test]
    fn test_default_order() {
        let config = SortConfig::parse_from_str(SAMPLE, "inline").unwrap();
        assert_eq!(config.default_order(), Some(vec!["-created", "title"]));
        assert_eq!(SortConfig::default().default_order(), None);
    }

    #[test]
    fn test_header_settings_without_headers_is_single() {
        let settings = SortConfig::default().header_settings().unwrap();
        assert_eq!(settings.kind, HeaderKind::None);
        assert_eq!(settings.single_label.as_deref(), Some("All"));
    }

    #[test]
    fn test_flat_when_sparse_clears_label() {
        let raw = r#"{
            "headers": {
                "kind": "list_values",
                "fixed_values": [1, "two"],
                "flat_when_sparse": true
            }
        }"#;
        let config = SortConfig::parse_json(raw).unwrap();
        let settings = config.header_settings().unwrap();

        assert_eq!(settings.kind, HeaderKind::ListValues);
        assert_eq!(settings.single_label, None);
        assert_eq!(
            settings.fixed_values,
            vec![SortValue::Int(1), SortValue::from("two")]
        );
    }

    #[test]
    fn test_related_headers_need_items() {
        let raw = r#"{ "headers": { "kind": "related_single", "related_header_field": "name" } }"#;
        let config = SortConfig::parse_json(raw).unwrap();
        assert_eq!(
            config.header_settings().unwrap_err(),
            ConfigError::RelatedItemsRequired {
                kind: HeaderKind::RelatedSingle
            }
        );

        let studios = vec![json!({ "id": 7, "name": "Fox" })];
        let settings = config.header_settings_with_related(&studios).unwrap();
        assert_eq!(settings.related.len(), 1);
        assert_eq!(settings.related[0].label, "Fox");
        assert_eq!(settings.related[0].key, SortValue::Int(7));
    }

    #[test]
    fn test_related_headers_need_header_field() {
        let config =
            SortConfig::parse_json(r#"{ "headers": { "kind": "related_many" } }"#).unwrap();
        let items: Vec<Value> = Vec::new();
        assert_eq!(
            config.header_settings_with_related(&items).unwrap_err(),
            ConfigError::MissingRelatedHeaderField {
                kind: HeaderKind::RelatedMany
            }
        );
    }

    #[test]
    fn test_load_with_inline_json() {
        let vars = HashMap::from([(
            CONFIG_JSON_ENV,
            r#"{ "fields": { "title": "title" } }"#.to_string(),
        )]);
        let (config, source) = SortConfig::load_with(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(source, SortConfigSource::EnvInline);
        assert!(config.fields.contains_key("title"));
    }

    #[test]
    fn test_load_with_blank_path_falls_through() {
        let vars = HashMap::from([
            (CONFIG_PATH_ENV, "   ".to_string()),
            (CONFIG_JSON_ENV, r#"{ "default_order": ["id"] }"#.to_string()),
        ]);
        let (config, source) = SortConfig::load_with(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(source, SortConfigSource::EnvInline);
        assert_eq!(config.default_order, vec!["id"]);
    }

    #[test]
    fn test_load_with_bad_inline_json_reports_variable() {
        let vars = HashMap::from([(CONFIG_JSON_ENV, "{".to_string())]);
        let err = SortConfig::load_with(|key| vars.get(key).cloned()).unwrap_err();
        assert!(format!("{err:#}").contains("SORTABLE_CONFIG_JSON"));
    }
}
