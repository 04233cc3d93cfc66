use std::path::PathBuf;

use earlysign_instruments::{Questionnaire, get_questionnaire};
use earlysign_storage::backend::FileBackend;
use earlysign_storage::store::ResultStore;

use crate::cli::Cli;
use crate::config::EarlysignConfig;

/// Everything a command needs, resolved once from config and flags.
pub struct AppState {
    pub questionnaire: Box<dyn Questionnaire>,
    pub store: ResultStore<FileBackend>,
    pub json: bool,
}

impl AppState {
    pub fn new(config: &EarlysignConfig, cli: &Cli) -> eyre::Result<Self> {
        let data_dir = resolve_data_dir(config, cli)?;
        let questionnaire = get_questionnaire(&config.questionnaire)?;

        tracing::debug!(
            data_dir = %data_dir.display(),
            questionnaire = questionnaire.id(),
            "state initialized"
        );

        Ok(Self {
            questionnaire,
            store: ResultStore::new(FileBackend::new(data_dir)),
            json: cli.json,
        })
    }
}

/// `--data-dir` if given, else the config's data directory.
pub fn resolve_data_dir(config: &EarlysignConfig, cli: &Cli) -> eyre::Result<PathBuf> {
    match &cli.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => config.resolve_data_dir(),
    }
}
