use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, ensure};
use ccbp::entities::CCBPInstance;
use ccbp::io::import::read_instance;
use log::{LevelFilter, info};
use rayon::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::EPOCH;
use crate::report::Report;

pub mod cli;
pub mod output;

/// Reads every file in `folder` as an instance, in order of file name.
pub fn read_problem_set(folder: &Path) -> Result<Vec<CCBPInstance>> {
    ensure!(
        folder.is_dir(),
        "not a valid problem set folder: {}",
        folder.display()
    );
    let mut paths = fs::read_dir(folder)
        .with_context(|| format!("could not list problem set folder: {}", folder.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.retain(|p| p.is_file());
    paths.sort();

    let instances = paths
        .par_iter()
        .map(|p| read_instance(p))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "[IO] read {} instances from {}",
        instances.len(),
        folder.display()
    );
    Ok(instances)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("could not open file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("could not parse file: {}", path.display()))
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, json)
        .with_context(|| format!("could not write file: {}", path.display()))?;

    info!("[IO] json written to file://{}", fs::canonicalize(path)?.display());
    Ok(())
}

pub fn write_csv(report: &Report, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(report.to_csv().as_bytes())
        .with_context(|| format!("could not write file: {}", path.display()))?;
    writer.flush()?;

    info!("[IO] csv written to file://{}", fs::canonicalize(path)?.display());
    Ok(())
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{:<27}{}", prefix, message))
        })
        // Add blanket level filter -
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    info!("time: {}", jiff::Timestamp::now());
    Ok(())
}
