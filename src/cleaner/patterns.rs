//! Source file recognition and the `console.log` removal transform.
//!
//! Removal is a plain regular-expression substitution, not a parse. A match
//! never crosses a line break and needs a `)` on the same line, so a call whose
//! arguments span several lines is left alone. Calls inside string literals or
//! comments are removed like any other.

use regex::Regex;
use std::sync::OnceLock;

/// File name suffixes that are cleaned. Matching is case-sensitive.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".mjs", ".ts", ".tsx", ".vue", ".svelte", ".rs",
];

/// `console.log(` up to the last `)` on the line, an optional `;` and the newline
pub const LOG_STATEMENT_PATTERN: &str = r"console\.log\(.*\);?\n?";

static LOG_STATEMENT: OnceLock<Regex> = OnceLock::new();

fn log_statement() -> &'static Regex {
    LOG_STATEMENT
        .get_or_init(|| Regex::new(LOG_STATEMENT_PATTERN).expect("log statement pattern is valid"))
}

/// Whether a file with this bare name should be cleaned
pub fn is_source_file(name: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Result of running the removal transform over one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub text: String,
    /// Number of statements removed
    pub removed: usize,
}

impl Removal {
    pub fn is_changed(&self) -> bool {
        self.removed > 0
    }
}

/// Remove every single-line `console.log(...)` statement from `text`
pub fn strip_console_logs(text: &str) -> Removal {
    let re = log_statement();
    let removed = re.find_iter(text).count();
    if removed == 0 {
        return Removal {
            text: text.to_string(),
            removed,
        };
    }

    Removal {
        text: re.replace_all(text, "").into_owned(),
        removed,
    }
}
