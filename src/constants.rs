//! Common constants used throughout the platelet application.

/// Marker preceding a variable name in template text.
pub const SIGIL: char = '$';

/// Trailing character that turns a flat template entry into a directory.
pub const DIRECTORY_MARKER: char = '/';

/// Width in columns of one indentation level. A tab counts as one level.
pub const INDENT_WIDTH: usize = 2;

/// File extensions treated as structured (YAML) templates.
pub const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}
