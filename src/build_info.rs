//! Build metadata loading.
//!
//! The build writes `build_info.json` next to the firmware image. Only the
//! version field is required; every other key is carried through untouched.

use crate::error::{NotFoundReason, PublishError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Field holding the release version identifier
pub const VERSION_FIELD: &str = "DEVICE_SW_VERSION_NUM";

/// Parsed build metadata document
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInfo {
    path: PathBuf,
    fields: Map<String, Value>,
    version: String,
}

impl BuildInfo {
    /// Load and validate the document at `path` using [`VERSION_FIELD`]
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_field(path, VERSION_FIELD)
    }

    /// Load and validate the document at `path`, requiring `field`
    pub fn load_with_field(path: &Path, field: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PublishError::NotFound {
                    path: path.to_path_buf(),
                    reason: NotFoundReason::Missing,
                }
            } else {
                PublishError::Io(e)
            }
        })?;

        Self::parse(path, &content, field)
    }

    /// Validate already-read document text
    pub fn parse(path: &Path, content: &str, field: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|source| PublishError::MalformedInput {
                path: path.to_path_buf(),
                source,
            })?;

        let fields = match value {
            Value::Object(map) => map,
            other => {
                let source = <serde_json::Error as serde::de::Error>::custom(format!(
                    "expected a JSON object at the top level, found {}",
                    json_kind(&other)
                ));
                return Err(PublishError::MalformedInput {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let version = match fields.get(field) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        if version.is_empty() {
            return Err(missing(path, field));
        }

        if semver::Version::parse(&version).is_err() {
            log::warn!(
                "{} = '{}' in {} is not a semantic version; publishing it verbatim",
                field,
                version,
                path.display()
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            fields,
            version,
        })
    }

    /// Trimmed release version identifier
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Document the info was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up any field of the document
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields, unmodified
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn missing(path: &Path, field: &str) -> PublishError {
    PublishError::MissingField {
        path: path.to_path_buf(),
        field: field.to_string(),
    }
}
