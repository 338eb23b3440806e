use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use concord::{index, ChapterSource, ConcordError, Occurrence, Vocabulary};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary book directory for testing.
///
/// Structure:
/// ```
/// tmp/
///   chapter_1.txt   -> "call me ishmael" / "the whale and the sea"
///   chapter_2.txt   -> "a whale appears"
///   notes.md        (not a chapter, ignored by dir_book)
/// ```
fn setup_book_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(
        root.join("chapter_1.txt"),
        "call me ishmael\nthe whale and the sea\n",
    )
    .unwrap();
    fs::write(root.join("chapter_2.txt"), "a whale appears\n").unwrap();
    fs::write(root.join("notes.md"), "editor notes, not book text").unwrap();

    dir
}

/// A file-backed chapter — mirrors what a CLI front-end will provide.
struct FileChapter {
    number: u32,
    path:   PathBuf,
}

impl ChapterSource for FileChapter {
    fn number(&self) -> u32 {
        self.number
    }

    fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_> {
        let content = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(source) => {
                let err = ConcordError::ChapterRead {
                    chapter: self.number,
                    source,
                };
                return Box::new(std::iter::once(Err(err)));
            }
        };

        let mut raw: Vec<&[u8]> = content.split(|b| *b == b'\n').collect();
        if raw.last().is_some_and(|l| l.is_empty()) {
            raw.pop(); // trailing newline, not an extra empty line
        }

        let chapter = self.number;
        let lines: Vec<Result<String, ConcordError>> = raw
            .into_iter()
            .enumerate()
            .map(|(i, bytes)| {
                String::from_utf8(bytes.to_vec()).map_err(|_| ConcordError::Encoding {
                    chapter,
                    line: (i + 1) as u32,
                })
            })
            .collect();

        Box::new(lines.into_iter())
    }
}

/// Enumerate `.txt` chapters under `root`, ordered by filename.
fn dir_book(root: &std::path::Path) -> Vec<Box<dyn ChapterSource>> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().map(|ext| ext == "txt").unwrap_or(false))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .enumerate()
        .map(|(i, path)| {
            Box::new(FileChapter {
                number: (i + 1) as u32,
                path,
            }) as Box<dyn ChapterSource>
        })
        .collect()
}

/// An in-memory chapter for tests that don't need the filesystem.
struct MemChapter(u32, Vec<&'static str>);

impl ChapterSource for MemChapter {
    fn number(&self) -> u32 {
        self.0
    }

    fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_> {
        Box::new(self.1.iter().map(|l| Ok(l.to_string())))
    }
}

/// A chapter whose source cannot be read at all.
struct FailingChapter(u32);

impl ChapterSource for FailingChapter {
    fn number(&self) -> u32 {
        self.0
    }

    fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_> {
        let err = ConcordError::ChapterRead {
            chapter: self.0,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such chapter"),
        };
        Box::new(std::iter::once(Err(err)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn indexes_book_from_files() {
    let dir = setup_book_dir();
    let results = index()
        .chapters(dir_book(dir.path()))
        .words(["whale", "sea"])
        .run()
        .unwrap();

    assert_eq!(results.matches, 3, "two whales and one sea");
    assert!(results.failures.is_empty());
    assert_eq!(results.index.to_listing(), "sea 1.2\nwhale 1.2 2.1\n");
}

#[test]
fn records_every_token_match_on_one_line() {
    let results = index()
        .chapter(FailingChapter(1))
        .chapter(MemChapter(2, vec!["x x"]))
        .words(["x"])
        .run()
        .unwrap();

    assert_eq!(
        results.index.to_listing(),
        "x 2.1 2.1\n",
        "a word twice on one line is recorded twice"
    );
    assert_eq!(results.failures.len(), 1);
    assert_eq!(results.failures[0].chapter, 1);
    assert_eq!(results.failures[0].error.chapter(), Some(1));
}

#[test]
fn empty_vocabulary_indexes_nothing() {
    let dir = setup_book_dir();
    let results = index()
        .chapters(dir_book(dir.path()))
        .run()
        .unwrap();

    assert_eq!(results.matches, 0);
    assert!(results.index.is_empty());
    assert!(results.failures.is_empty(), "empty vocabulary is not an error");
}

#[test]
fn listing_is_deterministic_across_runs() {
    // Chapters of uneven sizes so completion order varies between runs.
    fn chapters() -> Vec<Box<dyn ChapterSource>> {
        vec![
            Box::new(MemChapter(1, vec!["whale sea whale"; 40])),
            Box::new(MemChapter(2, vec!["sea"])),
            Box::new(MemChapter(3, vec!["whale and whale again"; 15])),
            Box::new(MemChapter(4, vec!["ishmael", "sea whale sea"])),
            Box::new(MemChapter(5, vec!["nothing relevant here"; 25])),
        ]
    }

    fn listing() -> String {
        index()
            .chapters(chapters())
            .words(["whale", "sea", "ishmael"])
            .threads(4)
            .run()
            .unwrap()
            .index
            .to_listing()
    }

    let reference = listing();
    for _ in 0..8 {
        assert_eq!(listing(), reference, "scheduling must not change the output");
    }
}

#[test]
fn failed_chapter_does_not_disturb_others() {
    let results = index()
        .chapter(MemChapter(1, vec!["the whale"]))
        .chapter(FailingChapter(2))
        .chapter(MemChapter(3, vec!["another whale"]))
        .words(["whale"])
        .run()
        .unwrap();

    assert_eq!(
        results.index.get("whale"),
        Some(
            &[
                Occurrence { chapter: 1, line: 1 },
                Occurrence { chapter: 3, line: 1 },
            ][..]
        )
    );
    assert_eq!(results.failures.len(), 1);
    assert_eq!(results.failures[0].chapter, 2);
}

#[test]
fn listing_is_sorted() {
    let results = index()
        .chapter(MemChapter(3, vec!["zebra apple", "apple"]))
        .chapter(MemChapter(1, vec!["mango zebra"]))
        .chapter(MemChapter(2, vec!["apple mango"]))
        .words(["apple", "mango", "zebra"])
        .threads(3)
        .run()
        .unwrap();

    let words: Vec<&str> = results.index.words().collect();
    let mut sorted = words.clone();
    sorted.sort_unstable();
    assert_eq!(words, sorted, "words must be lexicographically ordered");

    for (word, occurrences) in results.index.iter() {
        let mut expected = occurrences.to_vec();
        expected.sort_unstable();
        assert_eq!(
            occurrences, &expected[..],
            "occurrences for {word} must ascend by (chapter, line)"
        );
    }
}

#[test]
fn fail_fast_surfaces_first_failure() {
    let err = index()
        .chapter(MemChapter(1, vec!["the whale"]))
        .chapter(FailingChapter(2))
        .words(["whale"])
        .fail_fast(true)
        .run()
        .unwrap_err();

    assert!(matches!(err, ConcordError::ChapterRead { chapter: 2, .. }));
}

#[test]
fn case_folding_matches_any_case() {
    let results = index()
        .chapter(MemChapter(1, vec!["Whale WHALE whale"]))
        .vocabulary(Vocabulary::from_words(["Whale"]).fold_case())
        .run()
        .unwrap();

    assert_eq!(
        results.index.to_listing(),
        "whale 1.1 1.1 1.1\n",
        "folded vocabulary reports the lowercased form"
    );
}

#[test]
fn default_tokenizer_keeps_punctuation() {
    let results = index()
        .chapter(MemChapter(1, vec!["whale, sea."]))
        .words(["whale", "sea"])
        .run()
        .unwrap();

    assert_eq!(results.matches, 0, "\"whale,\" is not \"whale\" under whitespace splitting");
}

#[test]
fn unicode_tokenizer_strips_punctuation() {
    let results = index()
        .chapter(MemChapter(1, vec!["whale, sea."]))
        .words(["whale", "sea"])
        .unicode_words()
        .run()
        .unwrap();

    assert_eq!(results.index.to_listing(), "sea 1.1\nwhale 1.1\n");
}

#[test]
fn undecodable_line_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chapter_1.txt");
    // Line 2 is invalid UTF-8; lines 1 and 3 are fine.
    fs::write(&path, b"whale ahead\n\xff\xfe\xfd\nwhale astern\n").unwrap();

    let results = index()
        .chapter(FileChapter { number: 1, path })
        .words(["whale"])
        .run()
        .unwrap();

    assert!(results.failures.is_empty());
    assert_eq!(results.stats.skipped_lines, 1);
    assert_eq!(
        results.index.get("whale"),
        Some(
            &[
                Occurrence { chapter: 1, line: 1 },
                Occurrence { chapter: 1, line: 3 },
            ][..]
        ),
        "a skipped line still consumes its line number"
    );
}

#[test]
fn partial_chapter_is_discarded_on_failure() {
    /// Yields one matching line, then fails mid-read.
    struct PartialChapter;

    impl ChapterSource for PartialChapter {
        fn number(&self) -> u32 {
            1
        }

        fn lines(&self) -> Box<dyn Iterator<Item = Result<String, ConcordError>> + '_> {
            let items = vec![
                Ok("an early whale".to_string()),
                Err(ConcordError::ChapterRead {
                    chapter: 1,
                    source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"),
                }),
            ];
            Box::new(items.into_iter())
        }
    }

    let results = index()
        .chapter(PartialChapter)
        .chapter(MemChapter(2, vec!["a late whale"]))
        .words(["whale"])
        .run()
        .unwrap();

    assert_eq!(
        results.index.get("whale"),
        Some(&[Occurrence { chapter: 2, line: 1 }][..]),
        "a failed chapter publishes nothing, not even lines read before the failure"
    );
    assert_eq!(results.failures.len(), 1);
}

#[test]
fn stats_are_populated() {
    let dir = setup_book_dir();
    let results = index()
        .chapters(dir_book(dir.path()))
        .words(["whale"])
        .run()
        .unwrap();

    assert_eq!(results.stats.chapters, 2);
    assert_eq!(results.stats.lines, 3);
    assert_eq!(results.stats.skipped_lines, 0);
    assert!(results.stats.duration.as_nanos() > 0);
}

#[test]
fn zero_threads_is_invalid() {
    let err = index()
        .chapter(MemChapter(1, vec!["whale"]))
        .words(["whale"])
        .threads(0)
        .run()
        .unwrap_err();

    assert!(matches!(err, ConcordError::InvalidThreadCount(0)));
}

#[test]
fn empty_book_yields_empty_index() {
    let results = index().words(["whale"]).run().unwrap();

    assert_eq!(results.matches, 0);
    assert!(results.index.is_empty());
    assert!(results.failures.is_empty());
}

#[test]
fn vocabulary_parses_one_word_per_line() {
    let vocab = Vocabulary::from_reader(Cursor::new("whale\n\n  sea \n")).unwrap();

    assert_eq!(vocab.len(), 2);
    assert!(vocab.contains("whale"));
    assert!(vocab.contains("sea"), "surrounding whitespace is trimmed");
    assert!(!vocab.contains(""));
}
