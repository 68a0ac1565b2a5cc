//! Line-oriented parser for the flat template format.
//!
//! ```text
//! src/
//!   main.rs
//!     fn main() {}
//! README.md
//!   # $project
//! ```
//!
//! A line ending with `/` opens a directory one level deeper. Any other line
//! opens a file whose content is every following line indented at least one
//! level deeper than the entry; one level below the entry is stripped from
//! each content line.

use std::borrow::Cow;

use indexmap::IndexMap;
use log::trace;

use crate::constants::{DIRECTORY_MARKER, INDENT_WIDTH};
use crate::error::{Error, Result};
use crate::template::{is_valid_segment, TemplateTree};

const BAD_TOKEN: &str = "Bad token";
const UNEXPECTED_INDENTATION: &str = "Unexpected indentation";
const DUPLICATE_ENTRY: &str = "Duplicate entry";

/// Measures leading whitespace in columns. A tab is one full indent level.
pub fn indent_width(line: &str) -> usize {
    line.chars()
        .map_while(|c| match c {
            ' ' => Some(1),
            '\t' => Some(INDENT_WIDTH),
            _ => None,
        })
        .sum()
}

/// Removes `width` columns of leading indentation, leaving the rest verbatim.
/// A tab that straddles the boundary keeps its remaining columns as spaces.
fn strip_indent(line: &str, width: usize) -> Cow<'_, str> {
    let mut consumed = 0;
    for (idx, c) in line.char_indices() {
        if consumed >= width {
            return Cow::Borrowed(&line[idx..]);
        }
        consumed += match c {
            ' ' => 1,
            '\t' => INDENT_WIDTH,
            _ => return Cow::Borrowed(&line[idx..]),
        };
        if consumed > width {
            let rest = &line[idx + c.len_utf8()..];
            return Cow::Owned(format!("{}{rest}", " ".repeat(consumed - width)));
        }
    }
    Cow::Borrowed("")
}

/// Splits template text into lines without producing a phantom last line for
/// a trailing newline.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let mut lines = text.split('\n');
    if text.is_empty() {
        lines.next();
    }
    lines
}

/// Name of an open file and the content lines collected so far.
struct OpenFile {
    name: String,
    level: usize,
    lines: Vec<String>,
}

enum State {
    ExpectEntry,
    InFileBody(OpenFile),
}

/// Directories opened so far, root at the bottom. Depth is `len() - 1`.
struct DirStack {
    frames: Vec<(String, IndexMap<String, TemplateTree>)>,
}

impl DirStack {
    fn new() -> Self {
        Self { frames: vec![(String::new(), IndexMap::new())] }
    }

    fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    fn current(&mut self) -> &mut IndexMap<String, TemplateTree> {
        // The root frame is never popped.
        let last = self.frames.len() - 1;
        &mut self.frames[last].1
    }

    fn contains(&self, name: &str) -> bool {
        self.frames.last().is_some_and(|(_, children)| children.contains_key(name))
    }

    fn push(&mut self, name: String) {
        self.frames.push((name, IndexMap::new()));
    }

    fn pop(&mut self) {
        if self.frames.len() > 1 {
            if let Some((name, children)) = self.frames.pop() {
                self.current().insert(name, TemplateTree::Directory(children));
            }
        }
    }

    fn pop_to(&mut self, level: usize) {
        while self.depth() > level {
            self.pop();
        }
    }

    fn finish(mut self) -> TemplateTree {
        self.pop_to(0);
        let (_, root) = self.frames.swap_remove(0);
        TemplateTree::Directory(root)
    }
}

/// Parses a flat template into a tree rooted at the destination directory.
///
/// # Errors
/// * `Error::ParseError` with `Bad token` for blank or unusable entry lines
/// * `Error::ParseError` with `Unexpected indentation` when an entry is
///   indented deeper than the current directory or off the indent grid
/// * `Error::ParseError` with `Duplicate entry` when a name repeats inside
///   the same directory
pub fn parse_flat(text: &str) -> Result<TemplateTree> {
    let mut stack = DirStack::new();
    let mut state = State::ExpectEntry;

    for (idx, line) in split_lines(text).enumerate() {
        let line_no = idx + 1;
        let width = indent_width(line);

        if let State::InFileBody(mut file) = state {
            let body_width = (file.level + 1) * INDENT_WIDTH;
            if width >= body_width {
                file.lines.push(strip_indent(line, body_width).into_owned());
                state = State::InFileBody(file);
                continue;
            }
            close_file(&mut stack, file);
            state = State::ExpectEntry;
        }

        let token = line.trim();
        if token.is_empty() {
            return Err(Error::parse(BAD_TOKEN, line_no, line));
        }
        if width % INDENT_WIDTH != 0 || width / INDENT_WIDTH > stack.depth() {
            return Err(Error::parse(UNEXPECTED_INDENTATION, line_no, line));
        }
        let level = width / INDENT_WIDTH;
        stack.pop_to(level);

        let (name, is_dir) = match token.strip_suffix(DIRECTORY_MARKER) {
            Some(name) => (name.trim_end(), true),
            None => (token, false),
        };
        if !is_valid_segment(name) {
            return Err(Error::parse(BAD_TOKEN, line_no, line));
        }
        if stack.contains(name) {
            return Err(Error::parse(DUPLICATE_ENTRY, line_no, line));
        }

        trace!("line {line_no}: level {level}, {} '{name}'", if is_dir { "dir" } else { "file" });
        if is_dir {
            stack.push(name.to_string());
        } else {
            state = State::InFileBody(OpenFile { name: name.to_string(), level, lines: Vec::new() });
        }
    }

    if let State::InFileBody(file) = state {
        close_file(&mut stack, file);
    }
    Ok(stack.finish())
}

fn close_file(stack: &mut DirStack, file: OpenFile) {
    stack.current().insert(file.name, TemplateTree::File(file.lines.join("\n")));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content: &str) -> TemplateTree {
        TemplateTree::File(content.to_string())
    }

    fn dir(entries: Vec<(&str, TemplateTree)>) -> TemplateTree {
        TemplateTree::Directory(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    fn parse_error(text: &str) -> (String, usize) {
        match parse_flat(text) {
            Err(Error::ParseError { message, line, .. }) => (message, line),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn parses_file_inside_directory() {
        let tree = parse_flat("src/\n  main.txt\n    hello").unwrap();
        assert_eq!(tree, dir(vec![("src", dir(vec![("main.txt", file("hello"))]))]));
    }

    #[test]
    fn rejects_skipped_level() {
        assert_eq!(parse_error("a/\n    b"), (UNEXPECTED_INDENTATION.to_string(), 2));
    }

    #[test]
    fn rejects_odd_indentation() {
        assert_eq!(parse_error("a/\n   b"), (UNEXPECTED_INDENTATION.to_string(), 2));
    }

    #[test]
    fn rejects_blank_entry_line() {
        assert_eq!(parse_error("a.txt\n\nb.txt"), (BAD_TOKEN.to_string(), 2));
    }

    #[test]
    fn rejects_bare_separator() {
        assert_eq!(parse_error("/"), (BAD_TOKEN.to_string(), 1));
        assert_eq!(parse_error("a/b.txt"), (BAD_TOKEN.to_string(), 1));
    }

    #[test]
    fn rejects_duplicates() {
        assert_eq!(parse_error("a.txt\nb.txt\na.txt"), (DUPLICATE_ENTRY.to_string(), 3));
    }

    #[test]
    fn error_message_names_the_line() {
        let err = parse_flat("a/\n    b").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected indentation at line 2: '    b'.");
    }

    #[test]
    fn dedent_returns_to_ancestor() {
        let text = "a/\n  b/\n    c.txt\n      deep\n  d.txt\ne.txt\n  top";
        let tree = parse_flat(text).unwrap();
        assert_eq!(
            tree,
            dir(vec![
                ("a", dir(vec![("b", dir(vec![("c.txt", file("deep"))])), ("d.txt", file(""))])),
                ("e.txt", file("top")),
            ])
        );
    }

    #[test]
    fn keeps_nested_content_indentation() {
        let text = "main.rs\n  fn main() {\n      println!();\n  }\n";
        let tree = parse_flat(text).unwrap();
        assert_eq!(tree, dir(vec![("main.rs", file("fn main() {\n    println!();\n}"))]));
    }

    #[test]
    fn content_may_look_like_entries() {
        let tree = parse_flat("notes.txt\n  todo/\n  done").unwrap();
        assert_eq!(tree, dir(vec![("notes.txt", file("todo/\ndone"))]));
    }

    #[test]
    fn indented_blank_lines_are_content() {
        let tree = parse_flat("a.txt\n  one\n  \n  two\n  ").unwrap();
        assert_eq!(tree, dir(vec![("a.txt", file("one\n\ntwo\n"))]));
    }

    #[test]
    fn tabs_count_as_one_level() {
        let tree = parse_flat("src/\n\tlib.rs\n\t\tpub fn f() {}\n\t\t\tbody").unwrap();
        assert_eq!(tree, dir(vec![("src", dir(vec![("lib.rs", file("pub fn f() {}\n\tbody"))]))]));
    }

    #[test]
    fn empty_directory_entry() {
        let tree = parse_flat("build/\nsrc/\n  x.txt").unwrap();
        assert_eq!(
            tree,
            dir(vec![("build", dir(vec![])), ("src", dir(vec![("x.txt", file(""))]))])
        );
        let TemplateTree::Directory(children) = tree else { unreachable!() };
        assert!(children["build"].is_empty_directory());
    }

    #[test]
    fn empty_input_is_empty_root() {
        assert_eq!(parse_flat("").unwrap(), dir(vec![]));
    }

    #[test]
    fn measures_indent() {
        assert_eq!(indent_width("    x"), 4);
        assert_eq!(indent_width("\t x"), 3);
        assert_eq!(indent_width("x"), 0);
        assert_eq!(strip_indent("      x", 4), "  x");
        assert_eq!(strip_indent("  \tx", 2), "\tx");
        assert_eq!(strip_indent("  ", 4), "");
        assert_eq!(strip_indent(" \tx", 2), " x");
    }

    #[test]
    fn tab_across_body_boundary_keeps_its_extra_column() {
        let tree = parse_flat("a.txt\n \tx\n\t y").unwrap();
        assert_eq!(tree, dir(vec![("a.txt", file(" x\n y"))]));
    }
}
