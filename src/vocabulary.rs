use std::collections::HashSet;
use std::io::BufRead;

use crate::error::ConcordError;

/// The fixed set of words eligible to be indexed.
///
/// Built once before a run starts and never mutated afterwards, so workers
/// share it read-only with no synchronization. Matching is exact,
/// case-sensitive string equality unless [`fold_case()`](Self::fold_case)
/// was applied.
///
/// An empty vocabulary is valid: every chapter then indexes to nothing,
/// without error.
///
/// # Example
///
/// ```rust
/// use concord::Vocabulary;
///
/// let vocab = Vocabulary::from_words(["whale", "sea"]);
/// assert!(vocab.contains("whale"));
/// assert!(!vocab.contains("Whale"));
///
/// let folded = Vocabulary::from_words(["Whale"]).fold_case();
/// assert!(folded.contains("WHALE"));
/// ```
pub struct Vocabulary {
    words: HashSet<String>,
    fold_case: bool,
}

impl Vocabulary {
    /// Build a vocabulary from any iterator of words.
    ///
    /// Duplicates collapse — the vocabulary is a set.
    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            fold_case: false,
        }
    }

    /// Load a vocabulary from a dictionary source, one word per line.
    ///
    /// Surrounding whitespace is trimmed; blank lines are skipped. How the
    /// reader was obtained (file pickers, paths, stdin) is the caller's
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns [`ConcordError::VocabularyLoad`] if the source cannot be
    /// read. This is fatal by design: it happens before any chapter work
    /// starts, so there is no partial state to clean up.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ConcordError> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line.map_err(ConcordError::VocabularyLoad)?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_string());
            }
        }
        Ok(Self {
            words,
            fold_case: false,
        })
    }

    /// Switch to case-insensitive matching.
    ///
    /// Stored words are lowercased once here; probes are lowercased per
    /// lookup. Indexed entries report the lowercased form.
    pub fn fold_case(mut self) -> Self {
        self.words = self.words.into_iter().map(|w| w.to_lowercase()).collect();
        self.fold_case = true;
        self
    }

    /// Whether `token` is a vocabulary word under the configured matching rule.
    pub fn contains(&self, token: &str) -> bool {
        self.matched(token).is_some()
    }

    /// Look up `token`; on a match, return the stored form of the word
    /// (identical to the token unless case folding is on).
    pub fn matched(&self, token: &str) -> Option<&str> {
        if self.fold_case {
            self.words
                .get(token.to_lowercase().as_str())
                .map(String::as_str)
        } else {
            self.words.get(token).map(String::as_str)
        }
    }

    /// Number of distinct words in the vocabulary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` if the vocabulary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
