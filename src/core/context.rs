use std::{env, path::PathBuf};

use anyhow::{Context as _, Result};

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        console::Console,
        corpus::{Corpus, CorpusFilter, load_corpus},
        locales::{LoadedLocales, load_locales},
        patterns::PatternTable,
    },
};

/// Everything a command needs before it starts working.
///
/// Built once per run: configuration is resolved with the usual precedence
/// (CLI args > config file > defaults) and the `Console` is created from the
/// verbosity flags.
pub struct RunContext {
    pub config: Config,
    pub console: Console,
}

impl RunContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let console = Console::new(common_args.verbose, common_args.debug);
        let cwd = env::current_dir().context("Failed to determine the working directory")?;
        let loaded = load_config(&cwd)?;

        match &loaded.path {
            Some(path) => console.note(format!("using config {}", path.display())),
            None => console.note(format!(
                "no {} found, using default configuration",
                CONFIG_FILE_NAME
            )),
        }

        Ok(Self::with_config(loaded.config, common_args, console))
    }

    /// Apply CLI overrides on top of an already loaded config.
    pub fn with_config(
        mut config: Config,
        common_args: &CommonArgs,
        console: Console,
    ) -> Self {
        if let Some(source_root) = &common_args.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }
        if let Some(locales_root) = &common_args.locales_root {
            config.locales_root = locales_root.to_string_lossy().to_string();
        }
        if let Some(master_locale) = &common_args.master_locale {
            config.master_locale = master_locale.clone();
        }

        Self { config, console }
    }

    pub fn source_root(&self) -> PathBuf {
        self.config.source_root()
    }

    pub fn locales_root(&self) -> PathBuf {
        self.config.locales_root()
    }

    /// Built-in call-site idioms followed by the configured ones.
    pub fn patterns(&self) -> Result<PatternTable> {
        let table = PatternTable::with_custom(&self.config.call_patterns);
        table.validate()?;
        Ok(table)
    }

    pub fn load_corpus(&self) -> Result<Corpus> {
        let filter = CorpusFilter::new(&self.config.extensions, &self.config.ignores)?;
        load_corpus(&self.source_root(), &filter, &self.console)
    }

    pub fn load_locales(&self) -> Result<LoadedLocales> {
        load_locales(
            &self.locales_root(),
            &self.config.dictionary_file,
            &self.config.master_locale,
            &self.console,
        )
    }

    /// Load the corpus and the locales concurrently.
    pub fn load_all(&self) -> Result<(Corpus, LoadedLocales)> {
        let (corpus, locales) = rayon::join(|| self.load_corpus(), || self.load_locales());
        Ok((corpus?, locales?))
    }
}
