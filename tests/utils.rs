use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use platelet::error::Result;
use platelet::prompt::Prompter;

/// Prompter that replays canned answers and records what it was asked.
pub struct ScriptedPrompter {
    confirms: RefCell<VecDeque<bool>>,
    inputs: RefCell<VecDeque<String>>,
    pub confirmations: RefCell<Vec<String>>,
    pub questions: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(confirms: &[bool], inputs: &[&str]) -> Self {
        Self {
            confirms: RefCell::new(confirms.iter().copied().collect()),
            inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()),
            confirmations: RefCell::new(Vec::new()),
            questions: RefCell::new(Vec::new()),
        }
    }

    /// Never expects to be asked anything.
    pub fn silent() -> Self {
        Self::new(&[], &[])
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        self.confirmations.borrow_mut().push(prompt);
        Ok(self.confirms.borrow_mut().pop_front().unwrap_or(false))
    }

    fn input(&self, name: &str) -> Result<String> {
        self.questions.borrow_mut().push(name.to_string());
        Ok(self.inputs.borrow_mut().pop_front().unwrap_or_default())
    }
}

/// Builds a small project directory used by several tests.
#[allow(dead_code)]
pub fn make_project(root: &Path) {
    fs::create_dir_all(root.join("src/nested/empty")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {\n\tprintln!(\"hi\");\n}\n").unwrap();
    fs::write(root.join("src/nested/notes.txt"), "line one\n\n    indented\nlast").unwrap();
    fs::write(root.join("src/nested/blank.txt"), "\n\n").unwrap();
    fs::write(root.join("docs/index.md"), "# Docs\n  trailing spaces  \n").unwrap();
}
