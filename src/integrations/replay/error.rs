use thiserror::Error;

/// Shown when neither strategy recovered ten heroes
pub const UNSUCCESSFUL_EXTRACTION_MESSAGE: &str = "Could not extract heroes from replay. \
     Please open an issue on github: https://github.com/RLKRo/meta-madness-tracker/issues.";

/// Everything that can go wrong between raw replay bytes and a hero list.
///
/// The display text of each variant is the message handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// Not a replay container, or unreadable
    #[error("Could not read replay container: {0}")]
    Container(String),

    #[error("Replay container has no '{0}' entry")]
    EntryNotFound(String),

    #[error("Unsupported replay build: {0}")]
    UnsupportedBuild(u32),

    #[error("Could not decode replay: {0}")]
    Decode(String),

    /// Neither strategy reached ten heroes. Never reports the raw count.
    #[error("{}", UNSUCCESSFUL_EXTRACTION_MESSAGE)]
    Incomplete { found: usize },
}

impl From<std::io::Error> for ExtractionError {
    fn from(err: std::io::Error) -> Self {
        ExtractionError::Container(err.to_string())
    }
}
