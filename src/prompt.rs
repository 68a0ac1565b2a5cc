//! User input and interaction handling.
//!
//! The pipeline only sees the [`Prompter`] trait, so variable resolution and
//! the overwrite confirmation can be driven without a terminal.

use dialoguer::{Confirm, Input};

use crate::error::Result;

pub trait Prompter {
    /// Asks a yes/no question. Returns `true` right away when `skip` is set.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;

    /// Asks for the value of the template variable `name`.
    fn input(&self, name: &str) -> Result<String>;
}

/// Terminal prompts backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }

        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn input(&self, name: &str) -> Result<String> {
        Ok(Input::<String>::new().with_prompt(name).allow_empty(true).interact_text()?)
    }
}
