//! Package descriptor parsing for `package.json` files.
//!
//! Every installed package carries a descriptor at its root. The resolver
//! only trusts descriptors that name the package, its version and its
//! display name; anything less is treated as "not a package".
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "name": "com.example.tools",
//!   "version": "1.2.0",
//!   "displayName": "Example Tools",
//!   "description": "Editor helpers",
//!   "keywords": ["editor", "tools"],
//!   "dependencies": { "com.unity.ugui": "1.0.0" },
//!   "gitDependencies": { "com.example.core": "https://github.com/example/core.git#v2" }
//! }
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use gitdeps_fs::{NormalizedPath, io};

use crate::DESCRIPTOR_FILENAME;
use crate::error::DescriptorError;

type DecodeResult<T> = std::result::Result<T, DescriptorError>;

/// One installed package's descriptor.
///
/// Only ever constructed fully valid: the three identity fields are always
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dependencies: Option<IndexMap<String, String>>,
}

impl PackageRecord {
    /// Read the descriptor inside `dir`, or `None` if there is no usable one.
    pub fn from_directory(dir: &NormalizedPath) -> Option<Self> {
        Self::from_descriptor_path(&dir.join(DESCRIPTOR_FILENAME))
    }

    /// Read a descriptor file, collapsing every failure to `None`.
    pub fn from_descriptor_path(path: &NormalizedPath) -> Option<Self> {
        Self::read_descriptor(path).ok()
    }

    /// Read a descriptor file, keeping the reason it was rejected.
    pub fn read_descriptor(path: &NormalizedPath) -> DecodeResult<Self> {
        let content = io::read_text(path)?;
        Self::parse(&content)
    }

    /// Parse descriptor JSON text.
    pub fn parse(json: &str) -> DecodeResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Build a record from an already-decoded JSON document.
    pub fn from_value(value: &Value) -> DecodeResult<Self> {
        let object = value.as_object().ok_or(DescriptorError::NotAnObject)?;

        Ok(Self {
            name: required_str(object, "name")?,
            version: required_str(object, "version")?,
            display_name: required_str(object, "displayName")?,
            description: optional_str(object, "description")?,
            keywords: string_list(object, "keywords")?,
            dependencies: string_map(object, "dependencies")?,
            git_dependencies: string_map(object, "gitDependencies")?,
        })
    }

    /// Declared git dependencies in document order.
    pub fn git_dependencies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.git_dependencies
            .iter()
            .flatten()
            .map(|(name, reference)| (name.as_str(), reference.as_str()))
    }
}

fn required_str(object: &Map<String, Value>, field: &'static str) -> DecodeResult<String> {
    match object.get(field) {
        None => Err(DescriptorError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DescriptorError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn optional_str(object: &Map<String, Value>, field: &'static str) -> DecodeResult<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DescriptorError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

// Non-string elements are dropped rather than failing the record.
fn string_list(object: &Map<String, Value>, field: &'static str) -> DecodeResult<Option<Vec<String>>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        )),
        Some(_) => Err(DescriptorError::WrongType {
            field,
            expected: "an array",
        }),
    }
}

// Entries whose value is not a string carry no reference and are dropped.
fn string_map(
    object: &Map<String, Value>,
    field: &'static str,
) -> DecodeResult<Option<IndexMap<String, String>>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(entries)) => Ok(Some(
            entries
                .iter()
                .filter_map(|(name, value)| value.as_str().map(|v| (name.clone(), v.to_string())))
                .collect(),
        )),
        Some(_) => Err(DescriptorError::WrongType {
            field,
            expected: "an object",
        }),
    }
}
