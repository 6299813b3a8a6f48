//! Wordlist management module
//!
//! Answers one question: does a password appear as a whole line in any of
//! the configured breach corpora?
//!
//! A corpus is anything implementing [`WordlistSource`]. Two implementations
//! are provided:
//!
//! - [`PathSource`]: rereads a file (or every file under a directory) on each
//!   check. Missing, unreadable or oversized files are skipped silently.
//! - [`IndexedSource`]: loads the same content once into a set of line tails.
//!
//! Both agree on what a match is: the password followed by `\n` occurs in the
//! corpus, so it equals a whole line or the end of one. `\r\n` and lone `\r`
//! count as `\n`. A final line without a trailing newline never matches.

use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::CheckerConfig;

#[derive(Error, Debug)]
pub enum WordlistError {
    #[error("Wordlist not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read wordlist: {0}")]
    Read(#[from] std::io::Error),
    #[error("Wordlist is empty: {0}")]
    Empty(PathBuf),
    #[error("Wordlist {path} has at least {size} bytes, over the {limit} byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

/// A breach corpus that can be asked for an exact line.
pub trait WordlistSource: fmt::Debug + Send + Sync {
    /// Stable display name used in verdict remarks.
    fn name(&self) -> &str;

    /// Returns `true` if `password` followed by a newline occurs in the corpus.
    ///
    /// Must not fail: sources that cannot be read report `false`.
    fn contains_line(&self, password: &str) -> bool;
}

/// Scans a file or directory tree from disk on every check.
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
    name: String,
    max_bytes: Option<u64>,
}

impl PathSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
            max_bytes: None,
        }
    }

    /// Skips any file larger than `limit` bytes.
    pub fn with_max_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_bytes = limit;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_contains(&self, file: &Path, needles: &[Vec<u8>]) -> bool {
        match read_corpus(file, self.max_bytes) {
            Ok(content) => has_token(&content, needles),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Skipping wordlist file {:?}: {}", file, _e);
                false
            }
        }
    }
}

impl WordlistSource for PathSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains_line(&self, password: &str) -> bool {
        let Ok(meta) = fs::metadata(&self.path) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("Wordlist source {:?} unavailable, skipping", self.path);
            return false;
        };

        let needles = needles(password);
        if meta.is_dir() {
            walk_files(&self.path).any(|file| self.file_contains(&file, &needles))
        } else {
            self.file_contains(&self.path, &needles)
        }
    }
}

/// A corpus preloaded into memory as the set of all line tails.
///
/// Memory grows with the summed length of the lines, not their count.
#[derive(Clone)]
pub struct IndexedSource {
    name: String,
    lines: HashSet<Vec<u8>>,
}

impl fmt::Debug for IndexedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedSource")
            .field("name", &self.name)
            .field("lines", &self.lines.len())
            .finish()
    }
}

impl IndexedSource {
    /// Builds an index from in-memory lines, e.g. a bundled list. Each line
    /// is treated as newline-terminated.
    pub fn from_lines<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            lines: lines
                .into_iter()
                .flat_map(|l| {
                    let line = l.as_ref().as_bytes().to_vec();
                    (0..=line.len()).map(move |i| line[i..].to_vec())
                })
                .collect(),
        }
    }

    /// Loads every tail of every newline-terminated line of a file, or of
    /// all files under a directory, into memory.
    ///
    /// Inside a directory, unreadable or oversized files are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Path does not exist
    /// - A single-file source cannot be read or exceeds `max_bytes`
    /// - No lines were loaded
    pub fn load<P: AsRef<Path>>(path: P, max_bytes: Option<u64>) -> Result<Self, WordlistError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(WordlistError::NotFound(path.to_path_buf()));
        }

        let mut lines = HashSet::new();
        if path.is_dir() {
            for file in walk_files(path) {
                match read_corpus(&file, max_bytes) {
                    Ok(content) => {
                        lines.extend(line_suffixes(&content).map(<[u8]>::to_vec));
                    }
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("Not indexing {:?}: {}", file, _e);
                    }
                }
            }
        } else {
            let content = read_corpus(path, max_bytes)?;
            lines.extend(line_suffixes(&content).map(<[u8]>::to_vec));
        }

        if lines.is_empty() {
            return Err(WordlistError::Empty(path.to_path_buf()));
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Wordlist indexed: {} lines from {:?}", lines.len(), path);

        Ok(Self {
            name: display_name(path),
            lines,
        })
    }

    /// Number of distinct indexed entries.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl WordlistSource for IndexedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains_line(&self, password: &str) -> bool {
        needles(password).iter().any(|n| self.lines.contains(n))
    }
}

/// Ordered set of sources, scanned first-match-wins.
#[derive(Debug, Clone, Default)]
pub struct WordlistMatcher {
    sources: Vec<Arc<dyn WordlistSource>>,
}

impl WordlistMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the matcher described by `config`.
    ///
    /// With `index_wordlists` set, each path is loaded up front and paths
    /// that fail to load are left out. Otherwise every path is kept and
    /// resolved on each check.
    pub fn from_config(config: &CheckerConfig) -> Self {
        let mut matcher = Self::new();

        for path in &config.wordlist_paths {
            if config.index_wordlists {
                match IndexedSource::load(path, config.max_source_bytes) {
                    Ok(source) => matcher.push(source),
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("Wordlist {:?} not loaded: {}", path, _e);
                    }
                }
            } else {
                matcher.push(PathSource::new(path).with_max_bytes(config.max_source_bytes));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Wordlist matcher ready: {} sources (indexed: {})",
            matcher.sources.len(),
            config.index_wordlists
        );

        matcher
    }

    pub fn with_source<S: WordlistSource + 'static>(mut self, source: S) -> Self {
        self.push(source);
        self
    }

    pub fn push<S: WordlistSource + 'static>(&mut self, source: S) {
        self.sources.push(Arc::new(source));
    }

    /// Configured sources, in scan order.
    pub fn sources(&self) -> impl Iterator<Item = &dyn WordlistSource> {
        self.sources.iter().map(|s| s.as_ref())
    }

    /// Returns the names of the sources containing `password`.
    ///
    /// Scanning stops at the first hit, so the result holds at most one name.
    pub fn check(&self, password: &str) -> Vec<String> {
        self.check_while(password, || true).unwrap_or_default()
    }

    /// Like [`check`](Self::check), but asks `keep_going` before each source
    /// and returns `None` once it says no. A source already being scanned
    /// runs to completion.
    pub fn check_while<F>(&self, password: &str, keep_going: F) -> Option<Vec<String>>
    where
        F: Fn() -> bool,
    {
        for source in &self.sources {
            if !keep_going() {
                #[cfg(feature = "tracing")]
                tracing::debug!("Wordlist scan stopped before {}", source.name());
                return None;
            }
            if source.contains_line(password) {
                #[cfg(feature = "tracing")]
                tracing::info!("Password found in wordlist {}", source.name());
                return Some(vec![source.name().to_string()]);
            }
        }
        Some(Vec::new())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Byte forms a password may take inside a corpus: UTF-8, and Latin-1 when
/// the password fits in it and is not plain ASCII.
fn needles(password: &str) -> Vec<Vec<u8>> {
    let mut out = vec![password.as_bytes().to_vec()];
    if !password.is_ascii() && password.chars().all(|c| (c as u32) <= 0xFF) {
        out.push(password.chars().map(|c| c as u8).collect());
    }
    out
}

/// Rewrites `\r\n` and lone `\r` as `\n`.
fn normalize_newlines(content: Vec<u8>) -> Vec<u8> {
    if !content.contains(&b'\r') {
        return content;
    }
    let mut out = Vec::with_capacity(content.len());
    let mut bytes = content.into_iter().peekable();
    while let Some(b) = bytes.next() {
        if b == b'\r' {
            let _ = bytes.next_if_eq(&b'\n');
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }
    out
}

/// Lines followed by `\n`, without it. A trailing unterminated line is dropped.
fn terminated_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    content
        .split_inclusive(|&b| b == b'\n')
        .filter_map(|line| line.strip_suffix(b"\n"))
}

/// Every tail of every terminated line, the empty tail included. A password
/// is in the corpus exactly when it is one of these.
fn line_suffixes(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    terminated_lines(content).flat_map(|line| (0..=line.len()).map(move |i| &line[i..]))
}

/// True if some needle followed by `\n` occurs anywhere in `content`.
fn has_token(content: &[u8], needles: &[Vec<u8>]) -> bool {
    needles.iter().any(|needle| {
        let mut token = Vec::with_capacity(needle.len() + 1);
        token.extend_from_slice(needle);
        token.push(b'\n');
        content.windows(token.len()).any(|w| w == token.as_slice())
    })
}

fn read_corpus(path: &Path, max_bytes: Option<u64>) -> Result<Vec<u8>, WordlistError> {
    read_capped(path, max_bytes).map(normalize_newlines)
}

fn read_capped(path: &Path, max_bytes: Option<u64>) -> Result<Vec<u8>, WordlistError> {
    let Some(limit) = max_bytes else {
        return Ok(fs::read(path)?);
    };

    let file = File::open(path)?;
    let size = file.metadata()?.len();
    if size > limit {
        return Err(WordlistError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }
    read_limited(file, path, limit)
}

/// Reads at most `limit + 1` bytes so content appended after the size check
/// still trips the cap.
fn read_limited<R: Read>(reader: R, path: &Path, limit: u64) -> Result<Vec<u8>, WordlistError> {
    let mut buf = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut buf)?;
    let size = buf.len() as u64;
    if size > limit {
        return Err(WordlistError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }
    Ok(buf)
}

/// Regular files under `root`: at each level files by name, then
/// subdirectories by name. Entries that fail to walk are skipped.
fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn setup_with_tempfile(content: &[u8]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file.write_all(content).expect("Failed to write");
        temp_file
    }

    fn write_file(dir: &Path, rel: &str, content: &[u8]) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        fs::write(path, content).expect("Failed to write");
    }

    #[test]
    fn test_exact_line_match() {
        let temp_file = setup_with_tempfile(b"qwerty\nabc\nletmein\n");
        let source = PathSource::new(temp_file.path());
        assert!(source.contains_line("abc"));
        assert!(source.contains_line("qwerty"));
        assert!(!source.contains_line("ab"));
    }

    #[test]
    fn test_password_inside_line_does_not_match() {
        let temp_file = setup_with_tempfile(b"xabcx\n");
        let source = PathSource::new(temp_file.path());
        assert!(!source.contains_line("abc"));
    }

    #[test]
    fn test_line_ending_in_password_matches() {
        let temp_file = setup_with_tempfile(b"abc123456\nxabc\n");
        let source = PathSource::new(temp_file.path());
        assert!(source.contains_line("123456"));
        assert!(source.contains_line("abc"));
        assert!(!source.contains_line("abc1"));
    }

    #[test]
    fn test_empty_password_matches_any_newline() {
        let with_newline = setup_with_tempfile(b"letmein\n");
        assert!(PathSource::new(with_newline.path()).contains_line(""));

        let without = setup_with_tempfile(b"letmein");
        assert!(!PathSource::new(without.path()).contains_line(""));
    }

    #[test]
    fn test_last_line_without_newline_does_not_match() {
        let temp_file = setup_with_tempfile(b"first\nlast");
        let source = PathSource::new(temp_file.path());
        assert!(source.contains_line("first"));
        assert!(!source.contains_line("last"));
    }

    #[test]
    fn test_crlf_lines_match() {
        let temp_file = setup_with_tempfile(b"windows\r\nother\r\n");
        let source = PathSource::new(temp_file.path());
        assert!(source.contains_line("windows"));
        assert!(source.contains_line("other"));
    }

    #[test]
    fn test_lone_carriage_return_ends_line() {
        let temp_file = setup_with_tempfile(b"classic\rmac\r");
        let source = PathSource::new(temp_file.path());
        assert!(source.contains_line("classic"));
        assert!(source.contains_line("mac"));
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines(b"a\r\nb\rc\n".to_vec()), b"a\nb\nc\n".to_vec());
        assert_eq!(normalize_newlines(b"\r\r\n".to_vec()), b"\n\n".to_vec());
        assert_eq!(normalize_newlines(b"plain\n".to_vec()), b"plain\n".to_vec());
    }

    #[test]
    fn test_invalid_utf8_does_not_abort_scan() {
        let temp_file = setup_with_tempfile(b"\xff\xfe\x00junk\nhunter2\n\xc3\x28\n");
        assert!(PathSource::new(temp_file.path()).contains_line("hunter2"));
    }

    #[test]
    fn test_latin1_corpus_match() {
        // "passé" encoded as Latin-1
        let temp_file = setup_with_tempfile(b"pass\xe9\n");
        let source = PathSource::new(temp_file.path());
        assert!(source.contains_line("passé"));
        assert!(!source.contains_line("pass"));
    }

    #[test]
    fn test_utf8_corpus_match() {
        let temp_file = setup_with_tempfile("contraseña\n".as_bytes());
        assert!(PathSource::new(temp_file.path()).contains_line("contraseña"));
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let source = PathSource::new("/nonexistent/path/rockyou.txt");
        assert_eq!(source.name(), "rockyou.txt");
        assert!(!source.contains_line("password"));
    }

    #[test]
    fn test_size_cap_skips_file() {
        let temp_file = setup_with_tempfile(b"password\n");
        let capped = PathSource::new(temp_file.path()).with_max_bytes(Some(4));
        assert!(!capped.contains_line("password"));

        let roomy = PathSource::new(temp_file.path()).with_max_bytes(Some(1024));
        assert!(roomy.contains_line("password"));
    }

    #[test]
    fn test_directory_source_recurses() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_file(dir.path(), "a.txt", b"alpha\n");
        write_file(dir.path(), "nested/deeper/b.txt", b"bravo\n");

        let source = PathSource::new(dir.path());
        assert!(source.contains_line("alpha"));
        assert!(source.contains_line("bravo"));
        assert!(!source.contains_line("charlie"));
    }

    #[test]
    fn test_directory_name_is_directory_basename() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let lists = dir.path().join("SecLists");
        write_file(&lists, "Passwords/common.txt", b"dragon\n");

        let matcher = WordlistMatcher::new().with_source(PathSource::new(&lists));
        assert_eq!(matcher.check("dragon"), vec!["SecLists".to_string()]);
    }

    #[test]
    fn test_walk_order_files_before_subdirectories() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_file(dir.path(), "b.txt", b"");
        write_file(dir.path(), "a/z.txt", b"");
        write_file(dir.path(), "a.txt", b"");
        write_file(dir.path(), "c/y.txt", b"");

        let names: Vec<PathBuf> = walk_files(dir.path())
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("a/z.txt"),
                PathBuf::from("c/y.txt"),
            ]
        );
    }

    #[test]
    fn test_matcher_first_match_wins() {
        let first = setup_with_tempfile(b"shared\n");
        let second = setup_with_tempfile(b"shared\nonly-second\n");

        let matcher = WordlistMatcher::new()
            .with_source(PathSource::new(first.path()))
            .with_source(PathSource::new(second.path()));

        let first_name = display_name(first.path());
        let second_name = display_name(second.path());
        assert_eq!(matcher.check("shared"), vec![first_name]);
        assert_eq!(matcher.check("only-second"), vec![second_name]);
        assert!(matcher.check("absent").is_empty());
    }

    #[test]
    fn test_matcher_skips_missing_sources() {
        let real = setup_with_tempfile(b"letmein\n");
        let matcher = WordlistMatcher::new()
            .with_source(PathSource::new("/nonexistent/a.txt"))
            .with_source(PathSource::new("/nonexistent/dir"))
            .with_source(PathSource::new(real.path()));

        assert_eq!(matcher.check("letmein").len(), 1);
        assert_eq!(matcher.sources().count(), 3);
    }

    #[test]
    fn test_check_while_stops_between_sources() {
        use std::cell::Cell;

        let first = setup_with_tempfile(b"alpha\n");
        let second = setup_with_tempfile(b"bravo\n");
        let matcher = WordlistMatcher::new()
            .with_source(PathSource::new(first.path()))
            .with_source(PathSource::new(second.path()));

        let asked = Cell::new(0);
        let result = matcher.check_while("bravo", || {
            asked.set(asked.get() + 1);
            asked.get() < 2
        });
        assert_eq!(result, None);
        assert_eq!(asked.get(), 2);

        assert_eq!(matcher.check_while("bravo", || false), None);
        assert_eq!(
            matcher.check_while("bravo", || true),
            Some(vec![display_name(second.path())])
        );
        assert_eq!(matcher.check_while("absent", || true), Some(Vec::new()));
    }

    #[test]
    fn test_indexed_source_load() {
        let temp_file = setup_with_tempfile(b"password\n123456\ntrailing");
        let source = IndexedSource::load(temp_file.path(), None).expect("Failed to load");

        assert!(!source.is_empty());
        assert!(source.contains_line("password"));
        assert!(source.contains_line("word"));
        assert!(source.contains_line("3456"));
        assert!(!source.contains_line("trailing"));
        assert!(!source.contains_line("pass"));
    }

    #[test]
    fn test_indexed_source_errors() {
        assert!(matches!(
            IndexedSource::load("/nonexistent/path/list.txt", None),
            Err(WordlistError::NotFound(_))
        ));

        let empty = setup_with_tempfile(b"");
        assert!(matches!(
            IndexedSource::load(empty.path(), None),
            Err(WordlistError::Empty(_))
        ));

        let big = setup_with_tempfile(b"0123456789\n");
        assert!(matches!(
            IndexedSource::load(big.path(), Some(3)),
            Err(WordlistError::TooLarge { size: 11, limit: 3, .. })
        ));
    }

    #[test]
    fn test_read_limited_stops_past_cap() {
        // Content longer than the size seen at open time
        let grown = std::io::Cursor::new(b"0123456789\n".to_vec());
        let result = read_limited(grown, Path::new("grown.txt"), 4);
        assert!(matches!(
            result,
            Err(WordlistError::TooLarge { size: 5, limit: 4, .. })
        ));

        let fits = std::io::Cursor::new(b"ok\n".to_vec());
        let content = read_limited(fits, Path::new("fits.txt"), 3).expect("Should fit");
        assert_eq!(content, b"ok\n".to_vec());
    }

    #[test]
    fn test_indexed_and_path_sources_agree() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write_file(dir.path(), "one.txt", b"alpha\nxbetax\n");
        write_file(dir.path(), "sub/two.txt", b"gamma\ndelta");
        write_file(dir.path(), "three.txt", b"echo\r\nfoxtrot\r");

        let scanned = PathSource::new(dir.path());
        let indexed = IndexedSource::load(dir.path(), None).expect("Failed to load");

        for candidate in [
            "alpha", "pha", "beta", "xbetax", "betax", "gamma", "delta", "echo", "cho", "foxtrot",
            "",
        ] {
            assert_eq!(
                scanned.contains_line(candidate),
                indexed.contains_line(candidate),
                "disagreement on {candidate:?}"
            );
        }
    }

    #[test]
    fn test_from_config_indexed_drops_missing() {
        let real = setup_with_tempfile(b"monkey\n");
        let config = CheckerConfig::default()
            .with_wordlist_paths([PathBuf::from("/nonexistent/x.txt"), real.path().to_path_buf()])
            .with_index(true);

        let matcher = WordlistMatcher::from_config(&config);
        assert_eq!(matcher.sources().count(), 1);
        assert_eq!(matcher.check("monkey").len(), 1);
    }

    #[test]
    fn test_from_config_scanning_keeps_all_paths() {
        let config = CheckerConfig::default()
            .with_wordlist_paths(["/nonexistent/x.txt", "/nonexistent/y"]);

        let matcher = WordlistMatcher::from_config(&config);
        let names: Vec<&str> = matcher.sources().map(|s| s.name()).collect();
        assert_eq!(names, vec!["x.txt", "y"]);
        assert!(matcher.check("anything").is_empty());
    }

    #[test]
    fn test_from_lines() {
        let source = IndexedSource::from_lines("bundled", ["admin", "root"]);
        assert_eq!(source.name(), "bundled");
        assert!(source.contains_line("root"));
        assert!(source.contains_line("oot"));
        assert!(!source.contains_line("Root"));
        assert!(!source.contains_line("adm"));
    }
}
