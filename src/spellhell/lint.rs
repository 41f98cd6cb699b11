use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::dict::{Dictionary, Speller};
use crate::error::{Error, Result};
use crate::ir::{Statement, Unit};
use crate::report::Reporter;
use crate::resolve::Resolver;
use crate::visitor::SpellingVisitor;
use crate::words::OverflowPolicy;

/// What one pass over a unit found.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub strings_checked: usize,
    pub misspellings: usize,
}

/// The string literal spelling lint: a dictionary loaded once, plus
/// the settings every check runs with.
#[derive(Debug)]
pub struct LiteralLint<D = Speller> {
    dict: D,
    resolver: Resolver,
    overflow: OverflowPolicy,
}

impl LiteralLint<Speller> {
    /// Load the dictionary described by `config`. Failure here is fatal:
    /// there is no checking without a dictionary.
    pub fn load(config: &Config) -> Result<LiteralLint<Speller>> {
        match Speller::new(&config.dict) {
            Ok(dict) => {
                debug!("dictionary for `{}` ready with {} words", config.dict.lang, dict.len());
                Ok(LiteralLint::with_config(dict, config))
            }
            Err(e) => {
                error!("failed to start misspelling lint: {}", e);
                Err(Error::Dictionary(e))
            }
        }
    }
}

impl<D: Dictionary> LiteralLint<D> {
    pub fn new(dict: D) -> LiteralLint<D> {
        LiteralLint::with_config(dict, &Config::default())
    }

    /// Use `dict`, taking the remaining settings from `config`.
    pub fn with_config(dict: D, config: &Config) -> LiteralLint<D> {
        LiteralLint {
            dict,
            resolver: Resolver::with_extra_layers(config.extra_unwrap_layers),
            overflow: config.overflow,
        }
    }

    pub fn dictionary(&self) -> &D {
        &self.dict
    }

    fn visitor<'a, R>(&'a self, reporter: &'a mut R) -> SpellingVisitor<'a, D, R>
        where R: Reporter + ?Sized
    {
        SpellingVisitor::new(&self.dict, reporter)
            .resolver(self.resolver)
            .overflow(self.overflow)
    }

    /// Check a single statement, returning the number of misspellings.
    pub fn check_statement<S, R>(&self, stmt: &S, reporter: &mut R) -> usize
        where S: Statement, R: Reporter + ?Sized
    {
        let mut v = self.visitor(reporter);
        v.check_statement(stmt);
        v.misspellings
    }

    pub fn check_unit<R: Reporter + ?Sized>(&self, unit: &Unit, reporter: &mut R) -> Summary {
        let mut v = self.visitor(reporter);
        v.check_unit(unit);
        Summary { strings_checked: v.strings_checked, misspellings: v.misspellings }
    }

    /// Read a JSON IR dump from `path` and check it.
    pub fn check_dump<R: Reporter + ?Sized>(&self, path: &Path, reporter: &mut R) -> Result<Summary> {
        let unit = read_dump(path)?;
        let summary = self.check_unit(&unit, reporter);
        debug!("`{}`: {} strings checked, {} misspellings",
               path.display(), summary.strings_checked, summary.misspellings);
        Ok(summary)
    }
}

/// Parse the JSON IR dump at `path`.
pub fn read_dump(path: &Path) -> Result<Unit> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::ReadDump { path: path.to_path_buf(), source: e })?;
    serde_json::from_str(&text)
        .map_err(|e| Error::ParseDump { path: path.to_path_buf(), source: e })
}
