use unicode_segmentation::UnicodeSegmentation;

use crate::engine::{run, EngineOptions, ScanConfig};
use crate::error::ConcordError;
use crate::results::Results;
use crate::traits::{ChapterSource, Tokenizer};
use crate::vocabulary::Vocabulary;

// ---------------------------------------------------------------------------
// IndexBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a concord indexing run.
///
/// Created via [`concord::index()`](crate::index()). Configure with chained
/// builder methods, then call [`run()`](IndexBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let results = concord::index()
///     .chapters(my_chapters)
///     .vocabulary(my_vocabulary)
///     .threads(8)
///     .fail_fast(true)
///     .run()?;
/// ```
pub struct IndexBuilder {
    chapters:   Vec<Box<dyn ChapterSource>>,
    vocabulary: Option<Vocabulary>,
    tokenizer:  Option<Box<dyn Tokenizer>>,
    threads:    usize,
    fail_fast:  bool,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self {
            chapters:   Vec::new(),
            vocabulary: None,
            tokenizer:  None,
            threads:    num_cpus(),
            fail_fast:  false,
        }
    }
}

impl IndexBuilder {
    // ── Chapters ──────────────────────────────────────────────────────────

    /// Add one chapter to the run.
    ///
    /// Any type implementing [`ChapterSource`] is accepted — text files,
    /// in-memory strings, database rows, etc. Each chapter is scanned by
    /// exactly one worker, exactly once.
    pub fn chapter(mut self, c: impl ChapterSource + 'static) -> Self {
        self.chapters.push(Box::new(c));
        self
    }

    /// Add a whole ordered chapter list at once.
    ///
    /// Useful when the caller has already enumerated its book — e.g. one
    /// boxed source per text file, ordered by filename.
    pub fn chapters(mut self, cs: impl IntoIterator<Item = Box<dyn ChapterSource>>) -> Self {
        self.chapters.extend(cs);
        self
    }

    // ── Vocabulary ────────────────────────────────────────────────────────

    /// Set the vocabulary to index against.
    ///
    /// Defaults to the empty vocabulary, which indexes nothing — build one
    /// with [`Vocabulary::from_words`] or [`Vocabulary::from_reader`].
    pub fn vocabulary(mut self, v: Vocabulary) -> Self {
        self.vocabulary = Some(v);
        self
    }

    /// Shorthand for setting the vocabulary from a word list.
    ///
    /// Equivalent to `.vocabulary(Vocabulary::from_words(words))`.
    /// Matching is case-sensitive; for case-insensitive matching build the
    /// vocabulary yourself and apply [`Vocabulary::fold_case`].
    pub fn words<I, W>(self, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.vocabulary(Vocabulary::from_words(words))
    }

    // ── Tokenization ──────────────────────────────────────────────────────

    /// Set a custom tokenizer.
    ///
    /// Any type implementing [`Tokenizer`] is accepted. Use this for custom
    /// token boundaries — n-grams, domain-specific separators, etc.
    ///
    /// The default splits on whitespace and keeps punctuation attached, so
    /// `"whale,"` does not match the vocabulary word `"whale"`. For
    /// punctuation-aware splitting, prefer `.unicode_words()`.
    pub fn with_tokenizer(mut self, t: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Some(Box::new(t));
        self
    }

    /// Shorthand for Unicode word-boundary tokenization.
    ///
    /// Splits lines per UAX #29 word segmentation, which strips punctuation:
    /// `"whale,"` tokenizes to `whale` and matches. For custom logic, use
    /// `.with_tokenizer()` instead.
    pub fn unicode_words(mut self) -> Self {
        self.tokenizer = Some(Box::new(UnicodeTokenizer));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Number of worker threads for parallel scanning.
    ///
    /// Defaults to the number of logical CPU cores. Values exceeding the
    /// chapter count are accepted but won't improve performance.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Turn any chapter failure into an `Err` from [`run()`](Self::run).
    ///
    /// Disabled by default: a run with failed chapters still returns the
    /// index built from the chapters that succeeded, with failures listed in
    /// [`Results::failures`]. Fail-fast does not abort workers that are
    /// already running — the error is surfaced after all of them finish.
    pub fn fail_fast(mut self, yes: bool) -> Self {
        self.fail_fast = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the indexing run and return results.
    ///
    /// Blocks until every chapter worker has terminated — the index is
    /// never observable in a half-built state.
    ///
    /// # Errors
    ///
    /// Returns `Err` for fatal configuration errors (zero thread count,
    /// thread pool failure) and, in fail-fast mode, for the first chapter
    /// failure. Under the default best-effort policy, chapter failures are
    /// collected into [`Results::failures`] instead.
    pub fn run(self) -> Result<Results, ConcordError> {
        if self.threads == 0 {
            return Err(ConcordError::InvalidThreadCount(self.threads));
        }

        // Default vocabulary: empty — indexes nothing, by the contract that
        // an empty vocabulary is valid input rather than an error.
        let vocabulary = self
            .vocabulary
            .unwrap_or_else(|| Vocabulary::from_words(std::iter::empty::<String>()));

        // Default tokenizer: whitespace splitting, punctuation kept.
        let tokenizer: Box<dyn Tokenizer> = match self.tokenizer {
            Some(t) => t,
            None    => Box::new(WhitespaceTokenizer),
        };

        let opts = EngineOptions {
            config: ScanConfig {
                threads:   self.threads,
                fail_fast: self.fail_fast,
            },
            chapters: self.chapters,
            vocabulary,
            tokenizer,
        };

        run(opts)
    }
}

// ---------------------------------------------------------------------------
// Built-in tokenizers (concord ships these as conveniences)
// ---------------------------------------------------------------------------

/// Splits on whitespace, keeping punctuation attached. The default.
struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split_whitespace().collect()
    }
}

/// Splits on Unicode word boundaries (UAX #29), stripping punctuation.
struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn tokenize<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.unicode_words().collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Get the logical CPU count, with a safe fallback.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
