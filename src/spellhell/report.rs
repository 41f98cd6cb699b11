//! Where misspellings go.

use std::fmt;
use std::io::{self, Write};

use crate::ir::Location;

/// A suspected misspelling.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Diagnostic {
    pub location: Location,
    pub word: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: warning: {} (bad spelling)", self.location, self.word)
    }
}

/// Receives each misspelling as soon as it is found.
pub trait Reporter {
    fn report(&mut self, location: &Location, word: &str);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, location: &Location, word: &str) {
        self.push(Diagnostic { location: location.clone(), word: word.to_string() })
    }
}

impl<'a, R: Reporter + ?Sized> Reporter for &'a mut R {
    fn report(&mut self, location: &Location, word: &str) {
        (**self).report(location, word)
    }
}

/// Writes compiler-style warnings, one per line.
pub struct WarningPrinter<W> {
    out: W,
    count: usize,
    error: Option<io::Error>,
}

impl<W: Write> WarningPrinter<W> {
    pub fn new(out: W) -> WarningPrinter<W> {
        WarningPrinter { out, count: 0, error: None }
    }

    /// Number of warnings reported so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flush, returning the warning count or the first write error.
    pub fn finish(mut self) -> io::Result<usize> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.count)
    }
}

impl<W: Write> Reporter for WarningPrinter<W> {
    fn report(&mut self, location: &Location, word: &str) {
        self.count += 1;
        // keep going after a failed write; `finish` hands back the error
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}: warning: {} (bad spelling)", location, word) {
            self.error = Some(e);
        }
    }
}
