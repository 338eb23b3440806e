//! # concord
//!
//! Parallel concordance indexer — generic, embeddable, zero opinions.
//!
//! concord builds a word-occurrence index over a multi-chapter text,
//! restricted to a supplied vocabulary of words of interest. It owns the
//! concurrent scan engine, the contracts ([`ChapterSource`], [`Tokenizer`]),
//! the error type, the builder API, and the deterministic listing format. It
//! does **not** own file enumeration, dictionary pickers, or on-disk output
//! writing — those belong to the caller.
//!
//! Chapters are scanned concurrently, one worker per chapter; the merged
//! index maps each word to every `chapter.line` location it occurs at, and
//! serializes byte-identically across runs regardless of scheduling.
//!
//! # Quick Start
//!
//! ```rust
//! use concord::{ChapterSource, ConcordError};
//!
//! // A minimal in-memory chapter for demonstration
//! struct MemChapter(u32, &'static [&'static str]);
//!
//! impl ChapterSource for MemChapter {
//!     fn number(&self) -> u32 {
//!         self.0
//!     }
//!
//!     fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_> {
//!         Box::new(self.1.iter().map(|l| Ok(l.to_string())))
//!     }
//! }
//!
//! let results = concord::index()
//!     .chapter(MemChapter(1, &["call me ishmael", "the whale and the sea"]))
//!     .chapter(MemChapter(2, &["a whale appears"]))
//!     .words(["whale", "sea"])
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.matches, 3);
//! assert_eq!(results.index.to_listing(), "sea 1.2\nwhale 1.2 2.1\n");
//! ```
//!
//! # Custom Chapters and Tokenizers
//!
//! Implement [`ChapterSource`] to index anything line-oriented:
//!
//! ```rust
//! use concord::{ChapterSource, ConcordError};
//!
//! struct StringChapter {
//!     number: u32,
//!     text:   String,
//! }
//!
//! impl ChapterSource for StringChapter {
//!     fn number(&self) -> u32 {
//!         self.number
//!     }
//!
//!     fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_> {
//!         Box::new(self.text.lines().map(|l| Ok(l.to_string())))
//!     }
//! }
//! ```
//!
//! Implement [`Tokenizer`] for custom token boundaries:
//!
//! ```rust
//! use concord::Tokenizer;
//!
//! struct CommaTokenizer;
//!
//! impl Tokenizer for CommaTokenizer {
//!     fn tokenize<'a>(&self, line: &'a str) -> Vec<&'a str> {
//!         line.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod error;
mod index;
mod results;
mod traits;
mod vocabulary;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::IndexBuilder;
pub use error::ConcordError;
pub use index::{IndexedResult, Occurrence};
pub use results::{ChapterFailure, IndexStats, Results};
pub use traits::{ChapterSource, Tokenizer};
pub use vocabulary::Vocabulary;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`IndexBuilder`] to configure and run an indexing pass.
///
/// # Example
///
/// ```rust
/// use concord::{ChapterSource, ConcordError};
///
/// struct MemChapter(u32, &'static [&'static str]);
///
/// impl ChapterSource for MemChapter {
///     fn number(&self) -> u32 {
///         self.0
///     }
///
///     fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_> {
///         Box::new(self.1.iter().map(|l| Ok(l.to_string())))
///     }
/// }
///
/// let results = concord::index()
///     .chapter(MemChapter(1, &["a whale appears"]))
///     .words(["whale"])
///     .run()
///     .unwrap();
///
/// assert_eq!(results.matches, 1);
/// assert_eq!(results.index.get("whale"), Some(&[concord::Occurrence { chapter: 1, line: 1 }][..]));
/// ```
pub fn index() -> IndexBuilder {
    IndexBuilder::default()
}
