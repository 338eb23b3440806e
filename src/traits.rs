use crate::error::ConcordError;

/// One unit of book text, scanned by exactly one worker.
///
/// Implement this to make concord index anything — plain-text files,
/// in-memory strings, database rows, or any other line-oriented source.
/// The engine never enumerates chapters itself; callers hand it an ordered
/// list of sources via the builder.
///
/// # Object Safety
///
/// `ChapterSource` is object-safe. The builder stores chapters as
/// `Box<dyn ChapterSource>`, so `lines()` returns
/// `Box<dyn Iterator<Item = Result<String, ConcordError>>>` rather than
/// `impl Iterator` (which would not be object-safe).
///
/// # Thread Safety
///
/// `Send + Sync` are required — each chapter is read from whichever worker
/// thread the engine schedules it on.
///
/// # Error Handling
///
/// Yield `Err(ConcordError::Encoding { .. })` for a line that cannot be
/// decoded — the engine skips it (the line still consumes its line number)
/// and keeps scanning. Any other `Err` fails the whole chapter: the engine
/// discards what the worker had gathered so far and records a
/// [`ChapterFailure`](crate::results::ChapterFailure). Other chapters are
/// never affected.
///
/// # Example
///
/// ```rust
/// use concord::{ChapterSource, ConcordError};
///
/// struct MemChapter(u32, Vec<String>);
///
/// impl ChapterSource for MemChapter {
///     fn number(&self) -> u32 {
///         self.0
///     }
///
///     fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_> {
///         Box::new(self.1.iter().map(|l| Ok(l.clone())))
///     }
/// }
/// ```
pub trait ChapterSource: Send + Sync {
    /// The chapter's 1-based number, used as the integer part of every
    /// `chapter.line` location this chapter produces.
    fn number(&self) -> u32;

    /// Yield the chapter's lines in order, first line = line 1.
    ///
    /// Fatal read failures should surface as the iterator's `Err` items —
    /// typically a single `ChapterRead` as the only item when the source
    /// cannot be opened at all.
    fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_>;
}

/// Splits a line into candidate tokens to test against the vocabulary.
///
/// Implement this to define custom token boundaries — whitespace splitting,
/// Unicode word segmentation, n-grams, or anything else. Tokens are borrowed
/// from the line; matching against the vocabulary is the engine's job, not
/// the tokenizer's.
///
/// The default is whitespace splitting with no punctuation stripping. The
/// builder's [`unicode_words()`](crate::IndexBuilder::unicode_words)
/// shorthand switches to Unicode word boundaries.
///
/// # Thread Safety
///
/// `Send + Sync` are required — one tokenizer instance is shared across all
/// workers and called concurrently on different lines.
///
/// # Example
///
/// ```rust
/// use concord::Tokenizer;
///
/// /// Splits on commas — e.g. for indexing CSV-ish chapter dumps.
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize<'a>(&self, line: &'a str) -> Vec<&'a str> {
///         line.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Split `line` into tokens, in order of appearance.
    fn tokenize<'a>(&self, line: &'a str) -> Vec<&'a str>;
}
