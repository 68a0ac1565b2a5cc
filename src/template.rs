//! In-memory template tree and the structured (YAML) template format.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use crate::constants::YAML_EXTENSIONS;
use crate::error::{Error, Result};
use crate::parser::parse_flat;

/// Target file/directory layout, before it is written to disk.
///
/// Serializes untagged, so a tree dumped with `serde_yaml` is itself a valid
/// structured template: directories become mappings, files strings, empty
/// directories null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateTree {
    Directory(IndexMap<String, TemplateTree>),
    File(String),
    EmptyDirectory,
}

impl TemplateTree {
    /// Interprets a decoded YAML document as a template tree.
    ///
    /// # Errors
    /// * `Error::MalformedTemplateError` for numbers, booleans, sequences,
    ///   tagged values, and mapping keys that are not a single path segment
    pub fn from_yaml(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(TemplateTree::EmptyDirectory),
            Value::String(content) => Ok(TemplateTree::File(content)),
            Value::Mapping(mapping) => {
                let mut children = IndexMap::with_capacity(mapping.len());
                for (key, child) in mapping {
                    let name = yaml_key(key)?;
                    children.insert(name, TemplateTree::from_yaml(child)?);
                }
                Ok(TemplateTree::Directory(children))
            }
            other => Err(Error::MalformedTemplateError { value: describe(&other) }),
        }
    }

    /// Directory with no children, either spelled as a marker or as an
    /// empty mapping.
    pub fn is_empty_directory(&self) -> bool {
        match self {
            TemplateTree::EmptyDirectory => true,
            TemplateTree::Directory(children) => children.is_empty(),
            TemplateTree::File(_) => false,
        }
    }
}

fn yaml_key(key: Value) -> Result<String> {
    let name = match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => return Err(Error::MalformedTemplateError { value: describe(&other) }),
    };
    if !is_valid_segment(&name) {
        return Err(Error::MalformedTemplateError { value: format!("{name:?}") });
    }
    Ok(name)
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}

/// Returns true when `name` can be used as one path segment of the tree.
pub fn is_valid_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && name.trim() == name
}

/// Syntax of a template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TemplateFormat {
    /// Choose from the template file extension.
    Auto,
    /// Key-nested YAML: mappings are directories, strings are files.
    Yaml,
    /// Indentation based plain text, directories end with `/`.
    Flat,
}

impl TemplateFormat {
    /// Resolves `Auto` against the template path; explicit formats are kept.
    pub fn for_path<P: AsRef<Path>>(self, path: P) -> Self {
        match self {
            TemplateFormat::Auto => {
                let is_yaml = path
                    .as_ref()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| YAML_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false);
                if is_yaml {
                    TemplateFormat::Yaml
                } else {
                    TemplateFormat::Flat
                }
            }
            explicit => explicit,
        }
    }
}

/// Parses already substituted template text into a tree.
///
/// `format` must be resolved; `Auto` is treated as flat.
pub fn parse_template(text: &str, format: TemplateFormat) -> Result<TemplateTree> {
    match format {
        TemplateFormat::Yaml => {
            let value: Value = serde_yaml::from_str(text)?;
            TemplateTree::from_yaml(value)
        }
        TemplateFormat::Flat | TemplateFormat::Auto => parse_flat(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(entries: Vec<(&str, TemplateTree)>) -> TemplateTree {
        TemplateTree::Directory(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn decodes_nested_mapping() {
        let tree = parse_template("a:\n  b.txt: hi\n  c:\n", TemplateFormat::Yaml).unwrap();
        assert_eq!(
            tree,
            dir(vec![(
                "a",
                dir(vec![
                    ("b.txt", TemplateTree::File("hi".to_string())),
                    ("c", TemplateTree::EmptyDirectory)
                ])
            )])
        );
    }

    #[test]
    fn keeps_mapping_order() {
        let tree = parse_template("z: ''\na: ''\nm: ''\n", TemplateFormat::Yaml).unwrap();
        let TemplateTree::Directory(children) = tree else { panic!("expected directory") };
        let keys: Vec<_> = children.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn rejects_numbers_and_sequences() {
        for source in ["a: 42", "a: true", "a:\n  - x\n  - y"] {
            match parse_template(source, TemplateFormat::Yaml) {
                Err(Error::MalformedTemplateError { .. }) => {}
                other => panic!("expected MalformedTemplateError for {source:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn reports_offending_value() {
        let err = parse_template("a: 42", TemplateFormat::Yaml).unwrap_err();
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn rejects_keys_with_separators() {
        let err = parse_template("a/b: x", TemplateFormat::Yaml).unwrap_err();
        assert!(matches!(err, Error::MalformedTemplateError { .. }));
    }

    #[test]
    fn stringifies_numeric_keys() {
        let tree = parse_template("2024: notes", TemplateFormat::Yaml).unwrap();
        assert_eq!(tree, dir(vec![("2024", TemplateTree::File("notes".to_string()))]));
    }

    #[test]
    fn dumps_back_to_yaml() {
        let tree = dir(vec![
            ("a.txt", TemplateTree::File("x".to_string())),
            ("empty", TemplateTree::EmptyDirectory),
        ]);
        let text = serde_yaml::to_string(&tree).unwrap();
        assert_eq!(parse_template(&text, TemplateFormat::Yaml).unwrap(), tree);
    }

    #[test]
    fn resolves_auto_format() {
        assert_eq!(TemplateFormat::Auto.for_path("t.yaml"), TemplateFormat::Yaml);
        assert_eq!(TemplateFormat::Auto.for_path("t.YML"), TemplateFormat::Yaml);
        assert_eq!(TemplateFormat::Auto.for_path("t.txt"), TemplateFormat::Flat);
        assert_eq!(TemplateFormat::Auto.for_path("template"), TemplateFormat::Flat);
        assert_eq!(TemplateFormat::Flat.for_path("t.yaml"), TemplateFormat::Flat);
    }

    #[test]
    fn validates_segments() {
        assert!(is_valid_segment("main.rs"));
        assert!(!is_valid_segment(""));
        assert!(!is_valid_segment(".."));
        assert!(!is_valid_segment("a/b"));
        assert!(!is_valid_segment(" padded"));
    }
}
