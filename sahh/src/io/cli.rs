use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Folder with the instances the hyper-heuristic is trained on
    #[arg(long, value_name = "FOLDER")]
    pub training_folder: PathBuf,
    /// Folder with the instances the trained hyper-heuristic is evaluated on
    #[arg(long, value_name = "FOLDER")]
    pub testing_folder: PathBuf,
    #[arg(short, long, value_name = "FOLDER")]
    pub output_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    /// Previously trained conditions, training is skipped when provided
    #[arg(long, value_name = "FILE")]
    pub conditions_file: Option<PathBuf>,
    /// Write the solution of every testing instance as json
    #[arg(long)]
    pub export_solutions: bool,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}
