//! Configuration for the CLI front end.
//!
//! Uses Figment to merge `quickrag.toml` with `QUICKRAG_*` env vars. The
//! retrieval engine itself takes no configuration; only the CLI's defaults
//! (documents directory, result counts) live here.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Directory scanned for `.txt` documents when none is given on the
    /// command line.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
    /// Result count for `search` when not given on the command line.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Sentence budget for `compress` when not given on the command line.
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
}

fn default_docs_dir() -> String {
    "./docs".to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_max_sentences() -> usize {
    5
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            top_k: default_top_k(),
            max_sentences: default_max_sentences(),
        }
    }
}

impl CliConfig {
    pub fn load() -> Result<Self> {
        Figment::new()
            .merge(Toml::file("quickrag.toml"))
            .merge(Env::prefixed("QUICKRAG_"))
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
