//! Reads an existing directory back into template form.

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::constants::{DIRECTORY_MARKER, INDENT_WIDTH};
use crate::error::{Error, Result};
use crate::ioutils::{ensure_dir, read_file};
use crate::template::{is_valid_segment, TemplateFormat, TemplateTree};

/// Builds a tree from the file system.
///
/// A directory becomes a `Directory` of its entries sorted by name, or an
/// `EmptyDirectory` when it has none. A regular file given as `path` is
/// wrapped in a one-entry directory so the result is always a valid root.
/// Symlinks and other special files are skipped.
///
/// # Errors
/// * `Error::PathError` if `path` is neither a file nor a directory
/// * `Error::MalformedTemplateError` if an entry name is not UTF-8 or cannot
///   be written back as a single template segment
/// * `Error::IoError` if a file cannot be read as UTF-8 text
pub fn read_tree<P: AsRef<Path>>(path: P) -> Result<TemplateTree> {
    let path = path.as_ref();
    if path.is_file() {
        let name = entry_name(path)?;
        let mut root = IndexMap::new();
        root.insert(name, TemplateTree::File(read_file(path)?));
        return Ok(TemplateTree::Directory(root));
    }
    let root = ensure_dir(path)?;
    read_dir(&root)
}

fn read_dir(path: &Path) -> Result<TemplateTree> {
    let mut children = IndexMap::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let file_type = entry.file_type();
        if !file_type.is_dir() && !file_type.is_file() {
            warn!("Skipping '{}': not a regular file or directory", entry.path().display());
            continue;
        }

        let name = entry_name(entry.path())?;
        let node = if file_type.is_dir() {
            read_dir(entry.path())?
        } else {
            debug!("Reading file: {}", entry.path().display());
            TemplateTree::File(read_file(entry.path())?)
        };
        children.insert(name, node);
    }

    if children.is_empty() {
        Ok(TemplateTree::EmptyDirectory)
    } else {
        Ok(TemplateTree::Directory(children))
    }
}

fn entry_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| is_valid_segment(name))
        .map(str::to_string)
        .ok_or_else(|| Error::MalformedTemplateError {
            value: format!("'{}' has a name no template can spell", path.display()),
        })
}

/// Renders a tree in the flat indentation format.
///
/// File content lines are indented one level deeper than their entry. A
/// trailing newline in the content becomes a final indented blank line, so
/// parsing the output gives back identical bytes.
///
/// # Errors
/// * `Error::MalformedTemplateError` if the root is a file, which the flat
///   format has no way to spell
pub fn to_flat(tree: &TemplateTree) -> Result<String> {
    let mut out = String::new();
    match tree {
        TemplateTree::Directory(children) => write_entries(&mut out, children, 0),
        TemplateTree::EmptyDirectory => {}
        TemplateTree::File(_) => {
            return Err(Error::MalformedTemplateError {
                value: "a single file cannot be the root of a flat template".to_string(),
            })
        }
    }
    Ok(out)
}

fn write_entries(out: &mut String, children: &IndexMap<String, TemplateTree>, level: usize) {
    let indent = " ".repeat(level * INDENT_WIDTH);
    let body_indent = " ".repeat((level + 1) * INDENT_WIDTH);

    for (name, node) in children {
        match node {
            TemplateTree::Directory(grandchildren) => {
                out.push_str(&format!("{indent}{name}{DIRECTORY_MARKER}\n"));
                write_entries(out, grandchildren, level + 1);
            }
            TemplateTree::EmptyDirectory => {
                out.push_str(&format!("{indent}{name}{DIRECTORY_MARKER}\n"));
            }
            TemplateTree::File(content) => {
                out.push_str(&format!("{indent}{name}\n"));
                if content.is_empty() {
                    continue;
                }
                for line in content.split('\n') {
                    out.push_str(&body_indent);
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }
}

/// Renders a tree as a structured YAML template.
pub fn to_yaml(tree: &TemplateTree) -> Result<String> {
    Ok(serde_yaml::to_string(tree)?)
}

/// Reads `path` into flat template text.
pub fn serialize<P: AsRef<Path>>(path: P) -> Result<String> {
    serialize_as(path, TemplateFormat::Flat)
}

/// Reads `path` into template text of the given format. `Auto` means flat.
pub fn serialize_as<P: AsRef<Path>>(path: P, format: TemplateFormat) -> Result<String> {
    let tree = read_tree(path)?;
    match format {
        TemplateFormat::Yaml => to_yaml(&tree),
        TemplateFormat::Flat | TemplateFormat::Auto => to_flat(&tree),
    }
}
