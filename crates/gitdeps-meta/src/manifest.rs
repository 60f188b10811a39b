//! The project's root dependency manifest (`Packages/manifest.json`).
//!
//! The manifest is the package manager's source of truth for what to install
//! next. Only `dependencies` is interpreted; every other top-level key is
//! carried through untouched so writes never drop registry or testables
//! configuration.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use gitdeps_fs::{NormalizedPath, RobustnessConfig, io};

use crate::error::{Error, ManifestLoadError, Result};

const DEPENDENCIES_KEY: &str = "dependencies";

/// In-memory view of the manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestRecord {
    /// Package name to requested version or reference, in file order.
    pub dependencies: IndexMap<String, String>,
    /// The full top-level document, used to preserve unrelated keys.
    document: Map<String, Value>,
}

impl ManifestRecord {
    /// A manifest holding only the given dependencies.
    pub fn from_dependencies<I, K, V>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            dependencies: dependencies
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            document: Map::new(),
        }
    }

    /// Parse manifest JSON text.
    pub fn parse(json: &str) -> std::result::Result<Self, ManifestLoadError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(document) = value else {
            return Err(ManifestLoadError::NotAnObject);
        };

        let entries = document
            .get(DEPENDENCIES_KEY)
            .and_then(Value::as_object)
            .ok_or(ManifestLoadError::MissingDependencies)?;

        let mut dependencies = IndexMap::with_capacity(entries.len());
        for (name, reference) in entries {
            let reference = reference
                .as_str()
                .ok_or_else(|| ManifestLoadError::NonStringReference(name.clone()))?;
            dependencies.insert(name.clone(), reference.to_string());
        }

        Ok(Self {
            dependencies,
            document,
        })
    }

    /// Requested reference for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).map(String::as_str)
    }

    /// Render pretty-printed JSON, one dependency per line, with a trailing
    /// newline.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut document = self.document.clone();
        let dependencies: Map<String, Value> = self
            .dependencies
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        document.insert(DEPENDENCIES_KEY.to_string(), Value::Object(dependencies));

        let mut rendered = serde_json::to_string_pretty(&Value::Object(document))?;
        rendered.push('\n');
        Ok(rendered)
    }
}

/// Loads and persists the manifest at a fixed path.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: NormalizedPath,
}

impl ManifestStore {
    pub fn new(path: NormalizedPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Load the manifest, keeping the reason on failure.
    pub fn read(&self) -> std::result::Result<ManifestRecord, ManifestLoadError> {
        let content = io::read_text(&self.path).map_err(|e| {
            if e.is_not_found() {
                ManifestLoadError::NotFound(self.path.to_native())
            } else {
                ManifestLoadError::Read(e)
            }
        })?;
        ManifestRecord::parse(&content)
    }

    /// Load the manifest; a missing or malformed file yields `None`.
    pub fn load(&self) -> Option<ManifestRecord> {
        match self.read() {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(path = %self.path, error = %e, "Manifest unavailable");
                None
            }
        }
    }

    /// Overwrite the manifest file with `record`.
    pub fn save(&self, record: &ManifestRecord) -> Result<()> {
        let rendered = record.to_json_pretty().map_err(|source| Error::ManifestSerialize {
            path: self.path.to_native(),
            source,
        })?;
        io::write_atomic(&self.path, rendered.as_bytes(), RobustnessConfig::default())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UNITY_MANIFEST: &str = r#"{
  "scopedRegistries": [
    { "name": "example", "url": "https://registry.example.com", "scopes": ["com.example"] }
  ],
  "dependencies": {
    "com.unity.ugui": "1.0.0",
    "com.unity.textmeshpro": "3.0.6"
  },
  "testables": ["com.example.tools"]
}"#;

    #[test]
    fn test_parse_keeps_order() {
        let record = ManifestRecord::parse(UNITY_MANIFEST).unwrap();
        let names: Vec<&str> = record.dependencies.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["com.unity.ugui", "com.unity.textmeshpro"]);
        assert_eq!(record.get("com.unity.textmeshpro"), Some("3.0.6"));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_render_preserves_other_keys_in_place() {
        let mut record = ManifestRecord::parse(UNITY_MANIFEST).unwrap();
        record
            .dependencies
            .shift_insert(0, "com.example.core".into(), "git://core".into());

        let rendered = record.to_json_pretty().unwrap();
        let scoped = rendered.find("scopedRegistries").unwrap();
        let deps = rendered.find("\"dependencies\"").unwrap();
        let testables = rendered.find("testables").unwrap();
        assert!(scoped < deps && deps < testables);

        let reparsed = ManifestRecord::parse(&rendered).unwrap();
        assert_eq!(reparsed.dependencies, record.dependencies);
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_pretty_output_one_entry_per_line() {
        let record = ManifestRecord::from_dependencies([("C", "git://c"), ("B", "git://b"), ("A", "1.0")]);
        insta::assert_snapshot!(record.to_json_pretty().unwrap(), @r###"
        {
          "dependencies": {
            "C": "git://c",
            "B": "git://b",
            "A": "1.0"
          }
        }
        "###);
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            ManifestRecord::parse("[]").unwrap_err(),
            ManifestLoadError::NotAnObject
        ));
        assert!(matches!(
            ManifestRecord::parse(r#"{"dependencies": []}"#).unwrap_err(),
            ManifestLoadError::MissingDependencies
        ));
        assert!(matches!(
            ManifestRecord::parse(r#"{"other": {}}"#).unwrap_err(),
            ManifestLoadError::MissingDependencies
        ));
        assert!(matches!(
            ManifestRecord::parse(r#"{"dependencies": {"a": 1}}"#).unwrap_err(),
            ManifestLoadError::NonStringReference(name) if name == "a"
        ));
        assert!(matches!(
            ManifestRecord::parse("{").unwrap_err(),
            ManifestLoadError::Decode(_)
        ));
    }
}
