//! Writes a template tree to the file system.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::ioutils::{create_dir_all, write_file};
use crate::template::TemplateTree;

/// Switches for a single materialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Print the file tree as it is written.
    pub verbose: bool,
    /// Walk and print the tree without touching the file system.
    pub dry_run: bool,
}

/// Depth-first, pre-order writer for [`TemplateTree`]s.
///
/// Dry runs share the traversal with real runs, so the returned list of
/// paths is the same in both modes.
#[derive(Debug, Default)]
pub struct Materializer {
    options: MaterializeOptions,
}

impl Materializer {
    pub fn new(options: MaterializeOptions) -> Self {
        Self { options }
    }

    /// Writes `tree` at `root` and returns every path touched, in order.
    ///
    /// Files are always truncated and rewritten; directories are created
    /// with their ancestors when missing. Nothing written before a failure
    /// is rolled back.
    pub fn materialize<P: AsRef<Path>>(&self, root: P, tree: &TemplateTree) -> Result<Vec<PathBuf>> {
        let mut touched = Vec::new();
        self.visit(root.as_ref(), tree, 0, &mut touched)?;
        Ok(touched)
    }

    fn visit(
        &self,
        path: &Path,
        node: &TemplateTree,
        level: usize,
        touched: &mut Vec<PathBuf>,
    ) -> Result<()> {
        self.report(path, level);
        touched.push(path.to_path_buf());

        match node {
            TemplateTree::EmptyDirectory => {
                debug!("Creating directory: {}", path.display());
                if !self.options.dry_run {
                    create_dir_all(path)?;
                }
            }
            TemplateTree::File(content) => {
                debug!("Writing file: {}", path.display());
                if !self.options.dry_run {
                    write_file(content, path)?;
                }
            }
            TemplateTree::Directory(children) => {
                debug!("Creating directory: {}", path.display());
                if !self.options.dry_run {
                    create_dir_all(path)?;
                }
                for (name, child) in children {
                    self.visit(&path.join(name), child, level + 1, touched)?;
                }
            }
        }
        Ok(())
    }

    fn report(&self, path: &Path, level: usize) {
        if self.options.verbose || self.options.dry_run {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            println!("{}{}", "  ".repeat(level), name);
        }
    }
}
