//! The spelling oracle: a read-only word list, loaded once for a
//! locale before any checking happens.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rust_stemmers::{Algorithm, Stemmer};
use thiserror::Error;

/// Locale used when none is configured.
pub const DEFAULT_LANG: &str = "en_US";

/// Answers "is this a known word?".
pub trait Dictionary {
    fn check(&self, word: &str) -> bool;
}

impl<'a, D: Dictionary + ?Sized> Dictionary for &'a D {
    fn check(&self, word: &str) -> bool {
        (**self).check(word)
    }
}

impl Dictionary for HashSet<String> {
    fn check(&self, word: &str) -> bool {
        self.contains(word)
    }
}

#[derive(Error, Debug)]
pub enum DictError {
    #[error("The language \"{0}\" is not a known locale, expected e.g. \"en_US\".")]
    InvalidLocale(String),

    #[error("No word lists can be found for the language \"{0}\".")]
    UnsupportedLocale(String),

    #[error("error loading `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// How to build a `Speller`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictConfig {
    /// Locale, `ll` or `ll_CC`.
    pub lang: String,
    /// Word lists to load. When empty, `dirs` is searched for a list
    /// matching `lang` instead.
    pub paths: Vec<PathBuf>,
    /// Directories holding per-locale word lists.
    pub dirs: Vec<PathBuf>,
    /// Extra words accepted on top of the word lists.
    pub extra_words: Vec<String>,
    /// Also accept words whose stem is listed. English only; off by
    /// default since it lets through misspellings like "begining".
    pub stemming: bool,
}

impl Default for DictConfig {
    fn default() -> DictConfig {
        DictConfig {
            lang: DEFAULT_LANG.to_string(),
            paths: vec![],
            dirs: vec![PathBuf::from("/usr/share/hunspell"),
                       PathBuf::from("/usr/share/myspell"),
                       PathBuf::from("/usr/share/dict")],
            extra_words: vec![],
            stemming: false,
        }
    }
}

/// A parsed `ll_CC` locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    pub language: String,
    pub country: Option<String>,
}

impl Locale {
    pub fn parse(s: &str) -> Result<Locale, DictError> {
        let (language, country) = match s.split_once('_') {
            Some((l, c)) => (l, Some(c)),
            None => (s, None),
        };
        let lang_ok = (2..=3).contains(&language.len()) &&
            language.bytes().all(|b| b.is_ascii_lowercase());
        let country_ok = country.map_or(true, |c| {
            c.len() == 2 && c.bytes().all(|b| b.is_ascii_uppercase())
        });
        if !(lang_ok && country_ok) {
            return Err(DictError::InvalidLocale(s.to_string()));
        }
        Ok(Locale { language: language.to_string(), country: country.map(|c| c.to_string()) })
    }

    /// Only English gets a stemmer.
    fn stemmer(&self) -> Option<Stemmer> {
        if self.language == "en" {
            Some(Stemmer::create(Algorithm::English))
        } else {
            None
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.country {
            Some(ref c) => write!(f, "{}_{}", self.language, c),
            None => write!(f, "{}", self.language),
        }
    }
}

/// A word list with case-folding and stemming fallbacks.
pub struct Speller {
    words: HashSet<String>,
    stemmer: Option<Stemmer>,
}

impl fmt::Debug for Speller {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Speller")
            .field("words", &self.words.len())
            .field("stemming", &self.stemmer.is_some())
            .finish()
    }
}

impl Speller {
    /// Load the word lists for `config.lang`. Fails if there are none.
    pub fn new(config: &DictConfig) -> Result<Speller, DictError> {
        let locale = Locale::parse(&config.lang)?;

        let paths = if config.paths.is_empty() {
            match find_word_list(&locale, &config.dirs) {
                Some(p) => vec![p],
                None => return Err(DictError::UnsupportedLocale(config.lang.clone())),
            }
        } else {
            config.paths.clone()
        };

        let mut words: HashSet<String> = HashSet::new();
        for p in &paths {
            let before = words.len();
            read_word_list(p, &mut words)?;
            debug!("loaded {} words from `{}`", words.len() - before, p.display());
        }
        words.extend(config.extra_words.iter().cloned());

        let stemmer = if config.stemming { locale.stemmer() } else { None };
        if config.stemming && stemmer.is_none() {
            warn!("no stemming for `{}`, only for English", locale);
        }
        Ok(Speller { words, stemmer })
    }

    /// A speller over just `words`, with no stemming.
    pub fn from_words<I, S>(words: I) -> Speller
        where I: IntoIterator<Item = S>, S: Into<String>
    {
        Speller { words: words.into_iter().map(Into::into).collect(), stemmer: None }
    }

    /// Turn on stemming if `locale` is English.
    pub fn with_stemming(mut self, locale: &Locale) -> Speller {
        self.stemmer = locale.stemmer();
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn stemmed_word_is_correct(&self, w: &str) -> bool {
        self.stemmer.as_ref().map_or(false, |s| self.words.contains(&*s.stem(w)))
    }
}

impl Dictionary for Speller {
    /// Known as is, or as the lowercase form of a capitalised or
    /// all-caps word (and an all-caps word as its capitalised form), or
    /// with stemming as the stem of that lowercase form. Oddly cased
    /// words like `hELLO` must match exactly.
    fn check(&self, w: &str) -> bool {
        if self.words.contains(w) {
            return true;
        }
        let lower = match Case::of(w) {
            Case::Mixed => return false,
            Case::Lower | Case::Capitalised => w.to_ascii_lowercase(),
            Case::Upper => {
                let lower = w.to_ascii_lowercase();
                if self.words.contains(&capitalise(&lower)) {
                    return true;
                }
                lower
            }
        };
        self.words.contains(&lower) || self.stemmed_word_is_correct(&lower)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Case {
    Lower,
    Capitalised,
    Upper,
    Mixed,
}

impl Case {
    fn of(w: &str) -> Case {
        let mut chars = w.chars();
        let first_upper = chars.next().map_or(false, |c| c.is_ascii_uppercase());
        let rest: Vec<char> = chars.collect();
        if !first_upper {
            if rest.iter().all(|c| !c.is_ascii_uppercase()) { Case::Lower } else { Case::Mixed }
        } else if rest.iter().all(|c| !c.is_ascii_uppercase()) {
            Case::Capitalised
        } else if rest.iter().all(|c| !c.is_ascii_lowercase()) {
            Case::Upper
        } else {
            Case::Mixed
        }
    }
}

fn capitalise(lower: &str) -> String {
    let mut chars = lower.chars();
    match chars.next() {
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// The first word list in `dirs` for `locale`, trying the full locale
/// before the bare language.
fn find_word_list(locale: &Locale, dirs: &[PathBuf]) -> Option<PathBuf> {
    let full = locale.to_string();
    let mut names = vec![format!("{}.dic", full), format!("{}.txt", full)];
    if locale.country.is_some() {
        names.push(format!("{}.dic", locale.language));
        names.push(format!("{}.txt", locale.language));
    }
    if locale.language == "en" {
        // the traditional unix word list
        names.push("words".to_string());
    }

    dirs.iter()
        .flat_map(|d| names.iter().map(move |n| d.join(n)))
        .find(|p| p.is_file())
}

/// Load each word of the list at `p` into `words`. Plain lists (one
/// word per line) and hunspell `.dic` files are both understood.
pub fn read_word_list<E: Extend<String>>(p: &Path, words: &mut E) -> Result<(), DictError> {
    let raw = fs::read(p).map_err(|e| DictError::Io { path: p.to_path_buf(), source: e })?;
    let text = String::from_utf8_lossy(&raw);
    words.extend(parse_word_list(&text).map(|w| w.to_string()));
    Ok(())
}

fn parse_word_list(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.trim();
            // hunspell: a word count on the first line
            if i == 0 && !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            if line.starts_with('#') {
                return None;
            }
            // drop affix flags and morphological fields
            let word = line.split_whitespace().next()?;
            let word = word.split('/').next().unwrap_or(word);
            if word.is_empty() { None } else { Some(word) }
        })
}
