use std::path::PathBuf;

/// Load-time error taxonomy. Query-time classification never fails —
/// "no match" is represented by `None`, not an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read catalog from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line {line}: {text:?} (expected `key=value`, a `[section]` header, or a comment)")]
    MalformedLine { line: usize, text: String },

    #[error("invalid value for {field} on line {line}: expected `true`/`false`, got {value:?}")]
    BadBoolean {
        field: &'static str,
        value: String,
        line: usize,
    },

    #[error("duplicate section name on line {line}: {name:?}")]
    DuplicateSection { name: String, line: usize },

    #[error("section {section:?} references unknown Parent {parent:?}")]
    UnknownParent { section: String, parent: String },

    #[error("failed to compile pattern regex {pattern:?}: {source}")]
    PatternRegex {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("failed to compile batch regex for batch {index}: {source}")]
    BatchRegex {
        index: usize,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("batch_size must be at least 1")]
    ZeroBatchSize,
}

pub type Result<T> = std::result::Result<T, Error>;
