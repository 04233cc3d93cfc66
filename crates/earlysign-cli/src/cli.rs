use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "earlysign", version, about = "Developmental screening questionnaire")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Directory holding the stored result")]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the questions and the answer scale.
    Questions,
    /// Answer the questionnaire, score it and save the result.
    Assess {
        #[arg(
            long,
            value_delimiter = ',',
            help = "Answer values in question order (e.g. always,never,...); prompts when omitted"
        )]
        answers: Option<Vec<String>>,
    },
    /// Show the most recent result with its recommendation.
    Dashboard,
    /// List the available screening tools.
    Tools,
    /// Run a screening tool by id.
    RunTool { id: String },
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        #[arg(long, help = "Overwrite an existing config")]
        force: bool,
    },
}
