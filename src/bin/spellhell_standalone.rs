#![crate_name = "spellhell_standalone"]
#![deny(missing_docs)]

//! Prints the misspelled words in the string literals of one or more
//! JSON IR dumps.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use spellhell::dict::DEFAULT_LANG;
use spellhell::resolve::DEFAULT_EXTRA_LAYERS;
use spellhell::{Config, LiteralLint, OverflowPolicy, Speller, WarningPrinter};

/// Spell check the string literals in compiled IR
#[derive(Parser, Debug)]
#[command(name = "spellhell_standalone", version)]
struct Args {
    /// dictionary locale, e.g. en_GB
    #[arg(short, long, env = "SPELLHELL_LANG", default_value = DEFAULT_LANG)]
    lang: String,

    /// dictionary file (a list of words, one per line); overrides $SPELLHELL_DICT
    #[arg(short, long = "dict", value_name = "PATH")]
    dicts: Vec<PathBuf>,

    /// don't search the default dictionary directories
    #[arg(short, long)]
    no_def_dict: bool,

    /// accept WORD as correctly spelled
    #[arg(short, long = "word", value_name = "WORD")]
    words: Vec<String>,

    /// skip words too long to check instead of giving up on the rest of the string
    #[arg(long)]
    skip_long_words: bool,

    /// wrapping layers to look through when finding a string literal
    #[arg(long, value_name = "N", default_value_t = DEFAULT_EXTRA_LAYERS)]
    unwrap_layers: usize,

    /// also accept inflections of known words (English only)
    #[arg(long)]
    stem: bool,

    /// more logging; repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// IR dumps to check
    #[arg(required = true, value_name = "DUMP")]
    dumps: Vec<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        // $SPELLHELL_DICT
        let mut config = Config::from_env();
        config.dict.lang = self.lang.clone();
        if !self.dicts.is_empty() {
            config.dict.paths = self.dicts.clone();
        }
        if self.no_def_dict {
            config.dict.dirs.clear();
        }
        config.dict.extra_words.extend(self.words.iter().cloned());
        if self.skip_long_words {
            config.overflow = OverflowPolicy::SkipWord;
        }
        config.dict.stemming |= self.stem;
        config.extra_unwrap_layers = self.unwrap_layers;
        config
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let targets = Targets::new()
        .with_default(Level::WARN)
        .with_target("spellhell", level)
        .with_target("spellhell_standalone", level);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_filter(targets))
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.config();
    info!("checking against `{}`", config.dict.lang);

    let lint = match LiteralLint::load(&config) {
        Ok(lint) => lint,
        // already logged by `load`
        Err(_) => return ExitCode::from(10),
    };
    if lint.dictionary().is_empty() {
        warn!("the dictionary is empty, every word will be reported");
    } else {
        info!("{} known words", lint.dictionary().len());
    }

    match run(&lint, &args.dumps) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(n) => {
            info!("{} misspelled word{}", n, if n == 1 { "" } else { "s" });
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Check each dump in turn, printing warnings to stdout as they are
/// found. Returns the total number of misspellings.
fn run(lint: &LiteralLint<Speller>, dumps: &[PathBuf]) -> anyhow::Result<usize> {
    let stdout = io::stdout();
    let mut printer = WarningPrinter::new(stdout.lock());

    for path in dumps {
        check_one(lint, path, &mut printer)?;
    }

    printer.finish().context("failed to write warnings")
}

fn check_one<W: io::Write>(lint: &LiteralLint<Speller>,
                           path: &Path,
                           printer: &mut WarningPrinter<W>) -> anyhow::Result<()> {
    let summary = lint.check_dump(path, printer)?;
    if summary.strings_checked == 0 {
        warn!("`{}` contains no string literals", path.display());
    }
    Ok(())
}
