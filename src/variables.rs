//! Variable discovery, resolution and substitution.
//!
//! The three phases are kept apart: discovery and substitution are pure text
//! operations, only [`resolve`] talks to a [`Prompter`].

use std::sync::LazyLock;

use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;

use crate::constants::SIGIL;
use crate::error::{Error, Result};
use crate::prompt::Prompter;

static VARIABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z0-9_]+)").expect("variable pattern is valid"));

/// Variables referenced by a template, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    values: IndexMap<String, Option<String>>,
}

impl VariableSet {
    /// Collects every distinct `$name` in `text`, all unresolved.
    pub fn discover(text: &str) -> Self {
        let mut values = IndexMap::new();
        for captures in VARIABLE_PATTERN.captures_iter(text) {
            values.entry(captures[1].to_string()).or_insert(None);
        }
        Self { values }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    /// Sets the value of a discovered variable. Unknown names are ignored and
    /// reported as `false`.
    pub fn set<S: Into<String>>(&mut self, name: &str, value: S) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Names that still have no value, in discovery order.
    pub fn unresolved(&self) -> Vec<String> {
        self.values.iter().filter(|(_, v)| v.is_none()).map(|(k, _)| k.clone()).collect()
    }

    pub fn is_resolved(&self) -> bool {
        self.values.values().all(Option::is_some)
    }

    /// Overlays externally supplied values onto the discovered names.
    pub fn apply(&mut self, supplied: &IndexMap<String, String>) {
        for (name, value) in supplied {
            if self.set(name, value.clone()) {
                debug!("Variable '{name}' supplied as '{value}'");
            } else {
                warn!("Variable '{name}' is not used by the template");
            }
        }
    }
}

/// Turns `name=value` arguments into an ordered map of assignments.
///
/// The first `=` separates name and value, so values may contain `=` or be
/// empty. A later assignment to the same name replaces the earlier one.
///
/// # Errors
/// * `Error::ConfigurationError` if an argument has no `=` or an empty name
pub fn parse_assignments<S: AsRef<str>>(args: &[S]) -> Result<IndexMap<String, String>> {
    let mut assignments = IndexMap::new();
    for arg in args {
        let arg = arg.as_ref();
        match arg.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                assignments.insert(name.to_string(), value.to_string());
            }
            _ => {
                return Err(Error::ConfigurationError(format!(
                    "invalid assignment '{arg}', must take form var=value"
                )))
            }
        }
    }
    Ok(assignments)
}

/// Fills every variable: supplied values first, then one prompt per name
/// still missing, in discovery order.
pub fn resolve(
    variables: &mut VariableSet,
    supplied: &IndexMap<String, String>,
    prompt: &dyn Prompter,
) -> Result<()> {
    variables.apply(supplied);

    let missing = variables.unresolved();
    if missing.is_empty() {
        return Ok(());
    }
    debug!("Prompting for {} variable(s)", missing.len());
    for name in missing {
        let value = prompt.input(&name)?;
        variables.set(&name, value);
    }
    Ok(())
}

/// Replaces `$name` with its value for every resolved variable.
///
/// Longer names are replaced first so `$ab` is never split by a shorter
/// `$a`. A value that itself contains `$other` can still be rewritten by a
/// later replacement; there is no escape syntax.
pub fn substitute(text: &str, variables: &VariableSet) -> String {
    let mut ordered: Vec<(&String, &Option<String>)> = variables.values.iter().collect();
    // Stable sort keeps discovery order among names of equal length.
    ordered.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));

    let mut output = text.to_string();
    for (name, value) in ordered {
        match value {
            Some(value) => output = output.replace(&format!("{SIGIL}{name}"), value),
            None => warn!("Variable '{name}' has no value and is left as is"),
        }
    }
    output
}
