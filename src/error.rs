use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConcordError {
    // Input
    #[error("could not load vocabulary")]
    VocabularyLoad(#[source] std::io::Error),

    // Per-chapter
    #[error("chapter {chapter} unreadable")]
    ChapterRead {
        chapter: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("chapter {chapter}, line {line}: invalid encoding")]
    Encoding { chapter: u32, line: u32 },

    // Config
    #[error("invalid thread count")]
    InvalidThreadCount(usize),

    // Runtime
    #[error("thread pool failure")]
    ThreadPool(String),

    // Third-party extensibility
    #[error("chapter source error")]
    Source { chapter: u32, message: String },
}

impl ConcordError {
    /// The chapter this error occurred in, if applicable.
    /// Callers use this to present "Chapter <n> failed: <cause>" without
    /// pattern matching on variants.
    pub fn chapter(&self) -> Option<u32> {
        match self {
            Self::ChapterRead { chapter, .. }
            | Self::Encoding { chapter, .. }
            | Self::Source { chapter, .. } => Some(*chapter),
            _ => None,
        }
    }

    /// Whether scanning can continue after this error.
    ///
    /// Recoverable errors (an undecodable line) are skipped in place and the
    /// worker keeps scanning the rest of its chapter.
    ///
    /// Everything else raised inside a worker fails that chapter as a whole;
    /// other chapters are unaffected.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }
}
