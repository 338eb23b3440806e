use std::time::Duration;

use crate::error::ConcordError;
use crate::index::IndexedResult;

/// The output of a completed indexing run.
///
/// A run with some failed chapters still returns `Ok` under the default
/// best-effort policy: `index` covers every chapter that succeeded, and
/// `failures` enumerates every chapter that did not, with its cause. Nothing
/// is dropped silently. Opt into `.fail_fast(true)` on the builder to turn
/// any chapter failure into an `Err` from `run()` instead.
#[derive(Debug)]
pub struct Results {
    /// Total number of occurrences recorded across all words.
    pub matches: usize,

    /// The finalized word index, sorted for deterministic serialization.
    pub index: IndexedResult,

    /// Chapters that failed, in ascending chapter order.
    /// Empty on a fully clean run.
    pub failures: Vec<ChapterFailure>,

    /// Scan performance statistics.
    pub stats: IndexStats,
}

/// One failed chapter and why it failed.
///
/// Failures are isolated: a failed chapter contributes nothing to the index,
/// and occurrences recorded by other chapters are unaffected.
#[derive(Debug)]
pub struct ChapterFailure {
    /// 1-based number of the chapter that failed.
    pub chapter: u32,

    /// What went wrong. Use [`ConcordError::is_recoverable`] to distinguish
    /// variants if needed; failures recorded here are always chapter-fatal.
    pub error: ConcordError,
}

/// Performance statistics for a completed run.
#[derive(Debug)]
pub struct IndexStats {
    /// Chapters scanned to completion (failed chapters excluded).
    pub chapters: usize,

    /// Total lines scanned across all successful chapters.
    pub lines: usize,

    /// Lines skipped because they could not be decoded.
    pub skipped_lines: usize,

    /// Wall-clock time from first worker spawn to the join barrier.
    pub duration: Duration,

    /// Lines scanned per second. Convenience field — equals
    /// `lines / duration.as_secs_f64()`, clamped to 0 on zero-duration runs.
    pub lines_per_sec: usize,
}

impl IndexStats {
    /// Compute `lines_per_sec` from raw counts and duration.
    pub(crate) fn compute(
        chapters: usize,
        lines: usize,
        skipped_lines: usize,
        duration: Duration,
    ) -> Self {
        let lps = if duration.as_secs_f64() > 0.0 {
            (lines as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            chapters,
            lines,
            skipped_lines,
            duration,
            lines_per_sec: lps,
        }
    }
}
