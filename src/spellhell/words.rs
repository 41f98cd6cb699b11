//! Utilities for iterating over the "words" in a string literal, and
//! checking them.

use std::str;

use crate::dict::Dictionary;
use crate::ir::Location;
use crate::report::Reporter;

/// Size of the scratch buffer a word is copied into, including the
/// terminator.
pub const WORD_CAPACITY: usize = 32;

/// The longest word that gets checked.
pub const MAX_WORD_LEN: usize = WORD_CAPACITY - 1;

/// What to do on meeting a run of letters too long for the word
/// buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Stop checking the rest of the string. Long runs are usually
    /// encoded data or code rather than prose.
    #[default]
    AbandonString,
    /// Skip just the long run and carry on with the next one.
    SkipWord,
}

/// Struct for the `alpha_runs` iterator.
pub struct AlphaRuns<'a> {
    bytes: &'a [u8],
    pos: usize,
}

/// Iterate over the maximal runs of ASCII letters in `bytes`, stopping
/// at the first NUL, e.g. `Foo_bar12Baz\0qux` -> `Foo`, `bar`, `Baz`.
/// Everything else, including non-ASCII bytes, separates words.
pub fn alpha_runs(bytes: &[u8]) -> AlphaRuns<'_> {
    AlphaRuns { bytes, pos: 0 }
}

impl<'a> Iterator for AlphaRuns<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        // skip leading separators
        loop {
            match self.bytes.get(self.pos) {
                None | Some(&0) => {
                    self.pos = self.bytes.len();
                    return None;
                }
                Some(b) if b.is_ascii_alphabetic() => break,
                Some(_) => self.pos += 1,
            }
        }

        let start = self.pos;
        while self.bytes.get(self.pos).map_or(false, |b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        Some(&self.bytes[start..self.pos])
    }
}

/// Struct for the `candidates` iterator.
pub struct Candidates<'a> {
    runs: AlphaRuns<'a>,
    policy: OverflowPolicy,
    done: bool,
}

/// The runs of `bytes` that get submitted to the dictionary: those that
/// fit in the word buffer, up to the first one that doesn't if `policy`
/// is `AbandonString`.
pub fn candidates(bytes: &[u8], policy: OverflowPolicy) -> Candidates<'_> {
    Candidates { runs: alpha_runs(bytes), policy, done: false }
}

impl<'a> Iterator for Candidates<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.done {
            return None;
        }
        for run in self.runs.by_ref() {
            if run.len() <= MAX_WORD_LEN {
                return Some(run);
            }
            trace!("{} letter run exceeds the word buffer ({:?})", run.len(), self.policy);
            if self.policy == OverflowPolicy::AbandonString {
                self.done = true;
                return None;
            }
        }
        None
    }
}

/// The run didn't fit in a `WordBuffer`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Overflow {
    pub len: usize,
}

/// A fixed-size scratch buffer holding one word.
pub struct WordBuffer {
    buf: [u8; WORD_CAPACITY],
    len: usize,
}

impl Default for WordBuffer {
    fn default() -> WordBuffer {
        WordBuffer { buf: [0; WORD_CAPACITY], len: 0 }
    }
}

impl WordBuffer {
    pub fn new() -> WordBuffer {
        WordBuffer::default()
    }

    /// Copy `run` in and terminate it. A run that doesn't fit leaves the
    /// buffer untouched.
    pub fn fill(&mut self, run: &[u8]) -> Result<&str, Overflow> {
        if run.len() > MAX_WORD_LEN {
            return Err(Overflow { len: run.len() });
        }
        self.buf[..run.len()].copy_from_slice(run);
        self.buf[run.len()] = 0;
        self.len = run.len();
        Ok(self.as_str())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current word. Only ASCII letters are ever copied in, so this
    /// is always valid UTF-8.
    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }
}

/// Check every word of `bytes` against `dict`, reporting the unknown
/// ones at `location`. Returns the number of words reported.
pub fn check<D, R>(bytes: &[u8],
                   location: &Location,
                   dict: &D,
                   reporter: &mut R,
                   policy: OverflowPolicy) -> usize
    where D: Dictionary + ?Sized, R: Reporter + ?Sized
{
    trace!("spell checking string {:?}", String::from_utf8_lossy(bytes));

    let mut buf = WordBuffer::new();
    let mut reported = 0;
    for run in candidates(bytes, policy) {
        // candidates always fit
        let word = match buf.fill(run) {
            Ok(word) => word,
            Err(_) => continue,
        };
        if !dict.check(word) {
            reporter.report(location, word);
            reported += 1;
        }
    }
    reported
}

#[test]
fn test_alpha_runs() {
    let s = b"Foo_barBaz\xc3\xa4x 12C\0never";

    assert_eq!(alpha_runs(s).collect::<Vec<_>>(),
               vec![&b"Foo"[..], &b"barBaz"[..], &b"x"[..], &b"C"[..]]);
    assert_eq!(alpha_runs(b"").count(), 0);
    assert_eq!(alpha_runs(b"\0word").count(), 0);
    assert_eq!(alpha_runs(b"12 !?").count(), 0);
}

#[test]
fn test_word_buffer() {
    let mut buf = WordBuffer::new();
    assert!(buf.is_empty());
    assert_eq!(buf.fill(b"hello"), Ok("hello"));
    assert_eq!(buf.fill(b"hi"), Ok("hi"));
    assert_eq!(buf.len(), 2);

    let max = [b'a'; MAX_WORD_LEN];
    assert_eq!(buf.fill(&max).map(|w| w.len()), Ok(MAX_WORD_LEN));
    assert_eq!(buf.fill(&[b'a'; WORD_CAPACITY]), Err(Overflow { len: WORD_CAPACITY }));
    assert_eq!(buf.len(), MAX_WORD_LEN);
}

#[test]
fn test_candidates_overflow() {
    let long = "a".repeat(MAX_WORD_LEN + 1);
    let s = format!("one {} two", long);

    assert_eq!(candidates(s.as_bytes(), OverflowPolicy::AbandonString).collect::<Vec<_>>(),
               vec![&b"one"[..]]);
    assert_eq!(candidates(s.as_bytes(), OverflowPolicy::SkipWord).collect::<Vec<_>>(),
               vec![&b"one"[..], &b"two"[..]]);

    let fits = format!("{} two", "b".repeat(MAX_WORD_LEN));
    assert_eq!(candidates(fits.as_bytes(), OverflowPolicy::AbandonString).count(), 2);
}

#[test]
fn test_check_follows_candidates() {
    use std::collections::HashSet;
    use crate::report::Diagnostic;

    let s = format!("one {} two", "c".repeat(MAX_WORD_LEN + 1));
    for &policy in &[OverflowPolicy::AbandonString, OverflowPolicy::SkipWord] {
        let mut out: Vec<Diagnostic> = vec![];
        let n = check(s.as_bytes(), &Location::default(), &HashSet::<String>::new(), &mut out, policy);
        let words: Vec<_> = out.iter().map(|d| d.word.clone()).collect();
        let expected: Vec<String> = candidates(s.as_bytes(), policy)
            .map(|w| String::from_utf8(w.to_vec()).unwrap())
            .collect();
        assert_eq!(n, expected.len());
        assert_eq!(words, expected);
    }
}
