use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{self, Write};

/// A single location where a vocabulary word occurs.
///
/// Derived ordering is field order — chapter first, then line — which is
/// exactly the order the listing contract wants, so occurrence vectors are
/// sorted with a plain `sort_unstable()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    /// 1-based chapter number.
    pub chapter: u32,

    /// 1-based line number within the chapter.
    pub line: u32,
}

impl fmt::Display for Occurrence {
    /// Renders as `chapter.line` — the listing's location encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.chapter, self.line)
    }
}

/// The finalized, read-only index produced by a completed run.
///
/// Words iterate in lexicographic order; each word's occurrences are sorted
/// ascending by (chapter, line). Both orders are imposed once, when the
/// engine finalizes the accumulator after the join barrier — which is what
/// makes the serialized listing byte-identical across runs regardless of
/// worker scheduling.
#[derive(Debug)]
pub struct IndexedResult {
    entries: BTreeMap<String, Vec<Occurrence>>,
}

impl IndexedResult {
    /// Finalize the raw accumulator into the sorted view.
    ///
    /// Merge order from unsynchronized chapter completion is arbitrary;
    /// sorting here is what restores determinism.
    pub(crate) fn finalize(accumulated: HashMap<String, Vec<Occurrence>>) -> Self {
        let entries = accumulated
            .into_iter()
            .map(|(word, mut occurrences)| {
                occurrences.sort_unstable();
                (word, occurrences)
            })
            .collect();
        Self { entries }
    }

    /// The occurrences recorded for `word`, sorted by (chapter, line).
    /// `None` if the word never occurred (or was not in the vocabulary).
    pub fn get(&self, word: &str) -> Option<&[Occurrence]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Iterate `(word, occurrences)` pairs in lexicographic word order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Occurrence])> {
        self.entries
            .iter()
            .map(|(word, occurrences)| (word.as_str(), occurrences.as_slice()))
    }

    /// Iterate indexed words in lexicographic order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct words with at least one occurrence.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no vocabulary word occurred anywhere.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded occurrences across all words.
    pub fn occurrences(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Write the deterministic listing: one line per word,
    /// `<word> <c1>.<l1> <c2>.<l2> ...`, words in lexicographic order,
    /// locations ascending by chapter then line.
    ///
    /// # Example
    ///
    /// ```text
    /// sea 1.2
    /// whale 1.2 2.1
    /// ```
    pub fn write_listing(&self, out: &mut dyn Write) -> io::Result<()> {
        for (word, occurrences) in &self.entries {
            write!(out, "{word}")?;
            for occurrence in occurrences {
                write!(out, " {occurrence}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// The listing as a `String`. Convenience over [`write_listing`](Self::write_listing).
    pub fn to_listing(&self) -> String {
        let mut out = String::new();
        for (word, occurrences) in &self.entries {
            out.push_str(word);
            for occurrence in occurrences {
                out.push(' ');
                out.push_str(&occurrence.to_string());
            }
            out.push('\n');
        }
        out
    }
}
