//! Runtime settings for the lint.

use std::env;

use crate::dict::DictConfig;
use crate::resolve::DEFAULT_EXTRA_LAYERS;
use crate::words::OverflowPolicy;

/// Path list of word lists to load instead of searching for one.
pub static DICT_ENV_VAR: &str = "SPELLHELL_DICT";

/// Locale to check against.
pub static LANG_ENV_VAR: &str = "SPELLHELL_LANG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub dict: DictConfig,
    pub overflow: OverflowPolicy,
    /// Wrapping layers the resolver looks through beyond the
    /// declaration/address-of step.
    pub extra_unwrap_layers: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            dict: DictConfig::default(),
            overflow: OverflowPolicy::default(),
            extra_unwrap_layers: DEFAULT_EXTRA_LAYERS,
        }
    }
}

impl Config {
    /// The defaults, overridden by `SPELLHELL_LANG` and `SPELLHELL_DICT`.
    pub fn from_env() -> Config {
        let mut config = Config::default();
        if let Some(lang) = env::var_os(LANG_ENV_VAR) {
            config.dict.lang = lang.to_string_lossy().into_owned();
        }
        if let Some(paths) = env::var_os(DICT_ENV_VAR) {
            config.dict.paths = env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()).collect();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::DEFAULT_LANG;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.dict.lang, DEFAULT_LANG);
        assert!(c.dict.paths.is_empty());
        assert!(!c.dict.stemming);
        assert_eq!(c.overflow, OverflowPolicy::AbandonString);
        assert_eq!(c.extra_unwrap_layers, 1);
    }
}
