//! Orchestrates one invocation: template text in, file tree out, or the
//! reverse when reading a directory into a template.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info};

use crate::cli::Args;
use crate::error::Result;
use crate::ioutils::{ensure_dir, ensure_file, read_file, write_file};
use crate::processor::{MaterializeOptions, Materializer};
use crate::prompt::Prompter;
use crate::serializer::serialize_as;
use crate::template::{parse_template, TemplateFormat, TemplateTree};
use crate::variables::{parse_assignments, resolve, substitute, VariableSet};

/// What a [`Pipeline`] does with its two paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Materialize the template at the destination path.
    Write,
    /// Serialize the path into the template file.
    Read,
    /// Only list the variables the template uses.
    ListVariables,
}

/// Result of a finished (or refused) run.
#[derive(Debug)]
pub enum Outcome {
    /// Paths touched by the materializer, in order. Nothing was written on a
    /// dry run.
    Written(Vec<PathBuf>),
    /// Template text produced in read mode; `saved` is false on a dry run.
    Serialized { text: String, saved: bool },
    /// Variables discovered in the template.
    Variables(VariableSet),
    /// The user declined the overwrite confirmation.
    Aborted,
}

/// Everything one invocation needs, passed explicitly instead of living in
/// globals.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Template file to read from, or to write in `Mode::Read`.
    pub template: PathBuf,
    /// Destination root in `Mode::Write`, input path in `Mode::Read`.
    pub path: PathBuf,
    /// Values supplied up front as `name=value`.
    pub variables: IndexMap<String, String>,
    pub mode: Mode,
    pub format: TemplateFormat,
    pub options: MaterializeOptions,
    /// Answer every confirmation with yes.
    pub skip_confirm: bool,
}

impl Pipeline {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(template: P, path: Q) -> Self {
        Self {
            template: template.into(),
            path: path.into(),
            variables: IndexMap::new(),
            mode: Mode::Write,
            format: TemplateFormat::Auto,
            options: MaterializeOptions::default(),
            skip_confirm: false,
        }
    }

    /// Builds a pipeline from parsed command line arguments.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if a `name=value` argument is malformed
    pub fn from_args(args: Args) -> Result<Self> {
        let mode = if args.vars {
            Mode::ListVariables
        } else if args.read {
            Mode::Read
        } else {
            Mode::Write
        };

        Ok(Self {
            variables: parse_assignments(&args.variables)?,
            mode,
            format: args.format,
            options: MaterializeOptions { verbose: args.verbose, dry_run: args.dryrun },
            skip_confirm: args.yes,
            ..Self::new(args.template, args.path)
        })
    }

    /// Format of the template file, with `Auto` resolved from its extension.
    pub fn template_format(&self) -> TemplateFormat {
        self.format.for_path(&self.template)
    }

    pub fn run(&self, prompt: &dyn Prompter) -> Result<Outcome> {
        match self.mode {
            Mode::ListVariables => self.list_variables(),
            Mode::Write => self.write(prompt),
            Mode::Read => self.read(prompt),
        }
    }

    fn load_template(&self) -> Result<String> {
        let template = ensure_file(&self.template)?;
        debug!("Loading template from {}", template.display());
        read_file(template)
    }

    fn list_variables(&self) -> Result<Outcome> {
        let variables = VariableSet::discover(&self.load_template()?);
        println!("{}", describe_variables(&variables));
        Ok(Outcome::Variables(variables))
    }

    fn write(&self, prompt: &dyn Prompter) -> Result<Outcome> {
        let source = self.load_template()?;
        let format = self.template_format();
        ensure_destination(&self.path, root_is_file(&source, format))?;

        if !self.options.dry_run && self.path.exists() {
            let question = format!(
                "Overwrite directories and files specified in template '{}' at '{}'?",
                self.template.display(),
                self.path.display()
            );
            if !prompt.confirm(self.skip_confirm, question)? {
                return Ok(Outcome::Aborted);
            }
        }

        let mut variables = VariableSet::discover(&source);
        debug!("Template uses {} variable(s)", variables.len());
        resolve(&mut variables, &self.variables, prompt)?;
        let text = substitute(&source, &variables);

        debug!("Parsing template as {:?}", format);
        let tree = parse_template(&text, format)?;
        ensure_destination(&self.path, matches!(tree, TemplateTree::File(_)))?;

        let touched = Materializer::new(self.options).materialize(&self.path, &tree)?;
        info!("Materialized {} path(s) at {}", touched.len(), self.path.display());
        Ok(Outcome::Written(touched))
    }

    fn read(&self, prompt: &dyn Prompter) -> Result<Outcome> {
        let format = self.template_format();
        let text = serialize_as(&self.path, format)?;

        if self.options.dry_run {
            print!("{text}");
            return Ok(Outcome::Serialized { text, saved: false });
        }

        if self.template.exists() {
            ensure_file(&self.template)?;
            let question = format!("Overwrite template at '{}'?", self.template.display());
            if !prompt.confirm(self.skip_confirm, question)? {
                return Ok(Outcome::Aborted);
            }
        }

        save_template(&text, &self.template)?;
        if self.options.verbose {
            print!("{text}");
        }
        Ok(Outcome::Serialized { text, saved: true })
    }
}

/// Root kind read from the unsubstituted source, so the destination can be
/// checked before anything is asked. A YAML document that is a plain string
/// writes a single file; every other template writes a directory.
fn root_is_file(source: &str, format: TemplateFormat) -> bool {
    match format {
        TemplateFormat::Yaml => serde_yaml::from_str::<serde_yaml::Value>(source)
            .is_ok_and(|value| value.is_string()),
        TemplateFormat::Flat | TemplateFormat::Auto => false,
    }
}

/// An existing destination must be of the kind the template root writes.
fn ensure_destination(path: &Path, root_is_file: bool) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if root_is_file {
        ensure_file(path)?;
    } else {
        ensure_dir(path)?;
    }
    Ok(())
}

fn save_template(text: &str, template: &Path) -> Result<()> {
    debug!("Writing template to {}", template.display());
    write_file(text, template)
}

/// Human readable listing used by `--vars`.
pub fn describe_variables(variables: &VariableSet) -> String {
    if variables.is_empty() {
        "No variables".to_string()
    } else {
        format!("Variables:\n{}", variables.names().collect::<Vec<_>>().join(", "))
    }
}
