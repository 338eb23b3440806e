use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use rayon::prelude::*;

use crate::error::ConcordError;
use crate::index::{IndexedResult, Occurrence};
use crate::results::{ChapterFailure, IndexStats, Results};
use crate::traits::{ChapterSource, Tokenizer};
use crate::vocabulary::Vocabulary;

// ---------------------------------------------------------------------------
// ScanConfig
// ---------------------------------------------------------------------------

/// Run parameters passed from the builder to the engine.
///
/// `pub(crate)` — not part of the public API. Callers configure these
/// via the builder methods (`.threads()`, `.fail_fast()`).
pub(crate) struct ScanConfig {
    pub threads:   usize,
    pub fail_fast: bool,
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub config:     ScanConfig,
    pub chapters:   Vec<Box<dyn ChapterSource>>,
    pub vocabulary: Vocabulary,
    pub tokenizer:  Box<dyn Tokenizer>,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Execute one indexing run over the configured chapters.
///
/// This is the core engine — all parallelism lives here.
/// Called by `IndexBuilder::run()` after validating inputs.
///
/// One worker per chapter, scheduled on a dedicated pool. Each worker scans
/// into a private map; a completed map is merged into the shared accumulator
/// under a single lock, so unrelated chapters never contend per occurrence
/// and a failed chapter publishes nothing. `for_each` returns only once
/// every worker has terminated — that return is the join barrier, and no
/// read of the accumulator happens before it.
pub(crate) fn run(opts: EngineOptions) -> Result<Results, ConcordError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.config.threads)
        .build()
        .map_err(|e| ConcordError::ThreadPool(e.to_string()))?;

    // Shared state across workers
    let accumulated = Mutex::new(HashMap::<String, Vec<Occurrence>>::new());
    let failures    = Mutex::new(Vec::<ChapterFailure>::new());
    let chapters_ok = AtomicUsize::new(0);
    let lines       = AtomicUsize::new(0);
    let skipped     = AtomicUsize::new(0);

    let vocabulary = &opts.vocabulary;
    let tokenizer  = opts.tokenizer.as_ref();

    let start = Instant::now();

    pool.install(|| {
        opts.chapters.par_iter().for_each(|chapter| {
            match scan_chapter(chapter.as_ref(), vocabulary, tokenizer) {
                Ok(scan) => {
                    chapters_ok.fetch_add(1, Ordering::Relaxed);
                    lines.fetch_add(scan.lines, Ordering::Relaxed);
                    skipped.fetch_add(scan.skipped, Ordering::Relaxed);

                    if let Ok(mut index) = accumulated.lock() {
                        for (word, mut occurrences) in scan.occurrences {
                            index.entry(word).or_default().append(&mut occurrences);
                        }
                    }
                }
                Err(error) => {
                    if let Ok(mut fs) = failures.lock() {
                        fs.push(ChapterFailure {
                            chapter: chapter.number(),
                            error,
                        });
                    }
                }
            }
        });
    });

    // Join barrier passed — every worker has terminated, the accumulator
    // is final, and reads below are single-threaded.
    let duration = start.elapsed();

    let mut failures = failures.into_inner().unwrap_or_default();
    failures.sort_by_key(|f| f.chapter);

    if opts.config.fail_fast && !failures.is_empty() {
        return Err(failures.remove(0).error);
    }

    let index = IndexedResult::finalize(accumulated.into_inner().unwrap_or_default());

    Ok(Results {
        matches: index.occurrences(),
        index,
        failures,
        stats: IndexStats::compute(
            chapters_ok.load(Ordering::Relaxed),
            lines.load(Ordering::Relaxed),
            skipped.load(Ordering::Relaxed),
            duration,
        ),
    })
}

// ---------------------------------------------------------------------------
// Chapter worker
// ---------------------------------------------------------------------------

/// Everything one worker gathered from its chapter.
struct ChapterScan {
    occurrences: HashMap<String, Vec<Occurrence>>,
    lines:       usize,
    skipped:     usize,
}

/// Scan a single chapter against the vocabulary.
///
/// Lines are numbered from 1 in iteration order. A line that fails with a
/// recoverable error is skipped but still consumes its line number. Any
/// other error aborts the chapter; the partial scan is dropped by the
/// caller, so a failed chapter never reaches the shared accumulator.
fn scan_chapter(
    chapter: &dyn ChapterSource,
    vocabulary: &Vocabulary,
    tokenizer: &dyn Tokenizer,
) -> Result<ChapterScan, ConcordError> {
    let number = chapter.number();

    let mut occurrences = HashMap::<String, Vec<Occurrence>>::new();
    let mut lines = 0usize;
    let mut skipped = 0usize;
    let mut line_number = 0u32;

    for item in chapter.lines() {
        line_number += 1;

        let line = match item {
            Ok(line) => line,
            Err(e) if e.is_recoverable() => {
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        lines += 1;

        for token in tokenizer.tokenize(&line) {
            if let Some(word) = vocabulary.matched(token) {
                let occurrence = Occurrence {
                    chapter: number,
                    line:    line_number,
                };
                // One entry per token match — a word twice on one line is
                // recorded twice.
                match occurrences.get_mut(word) {
                    Some(list) => list.push(occurrence),
                    None => {
                        occurrences.insert(word.to_string(), vec![occurrence]);
                    }
                }
            }
        }
    }

    Ok(ChapterScan {
        occurrences,
        lines,
        skipped,
    })
}
