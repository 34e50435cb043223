use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use ccbp::entities::CCBPInstance;
use ccbp::io::export::{export, export_instance};
use clap::Parser as ClapParser;
use log::{info, warn};
use sahh::config::SAHHConfig;
use sahh::hh::{ConditionSet, HyperHeuristic, NearestConditionHH, SATrainer};
use sahh::io;
use sahh::io::cli::Cli;
use sahh::io::output::CCBPOutput;
use sahh::report::{characterize_set, solve_set, solve_set_hh};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: SAHHConfig = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            SAHHConfig::default()
        }
        Some(config_file) => io::read_json(config_file).context("incorrect config file format")?,
    };
    config.validate()?;

    info!("Successfully parsed SAHHConfig: {config:?}");

    let output_folder = args.output_folder.as_path();
    fs::create_dir_all(output_folder).with_context(|| {
        format!("could not create output folder: {}", output_folder.display())
    })?;
    io::write_json(&config, &output_folder.join("config.json"))?;

    let training = io::read_problem_set(&args.training_folder)?;
    let testing = io::read_problem_set(&args.testing_folder)?;

    io::write_csv(
        &characterize_set(&training, &config.features),
        &output_folder.join("features.csv"),
    )?;
    io::write_csv(
        &solve_set(&training, &config.heuristics),
        &output_folder.join("heuristics.csv"),
    )?;

    let trained = match &args.conditions_file {
        Some(conditions_file) => {
            let conditions: ConditionSet = io::read_json(conditions_file)
                .context("incorrect conditions file format")?;
            let conditions = ConditionSet::new(
                conditions.features,
                conditions.heuristics,
                conditions.points,
            )?;
            info!("[MAIN] loaded conditions, skipping training:\n{conditions}");
            NearestConditionHH::from_conditions(conditions)
        }
        None => train(&config, &training, &testing, output_folder)?,
    };

    report_hh(&trained, "hyperHeuristic", &training, &testing, output_folder)?;
    io::write_json(
        trained.conditions(),
        &output_folder.join("conditions_trained.json"),
    )?;
    info!("[MAIN] trained conditions:\n{}", trained.conditions());

    if args.export_solutions {
        export_solutions(&trained, &testing, &config, output_folder)?;
    }

    Ok(())
}

/// Trains fresh conditions on the training set.
/// The untrained conditions are reported as the random baseline.
fn train(
    config: &SAHHConfig,
    training: &[CCBPInstance],
    testing: &[CCBPInstance],
    output_folder: &Path,
) -> Result<NearestConditionHH> {
    let mut trainer = SATrainer::new(config.features.clone(), config.heuristics.clone(), config.sa);
    info!("[MAIN] initial conditions:\n{}", trainer.conditions);
    io::write_json(
        &trainer.conditions,
        &output_folder.join("conditions_initial.json"),
    )?;

    let baseline = NearestConditionHH::from_conditions(trainer.conditions.clone());
    report_hh(&baseline, "randomHyperHeuristic", training, testing, output_folder)?;

    trainer.train(training)?;
    Ok(NearestConditionHH::from_conditions(trainer.conditions))
}

fn report_hh(
    hh: &(impl HyperHeuristic + Sync),
    name: &str,
    training: &[CCBPInstance],
    testing: &[CCBPInstance],
    output_folder: &Path,
) -> Result<()> {
    for (set, label) in [(training, "Training"), (testing, "Testing")] {
        let report = solve_set_hh(set, hh);
        info!(
            "[MAIN] {name} average waste on {} {} instances: {:.4}",
            set.len(),
            label.to_lowercase(),
            report.column_means()[0]
        );
        io::write_csv(&report, &output_folder.join(format!("{name}-{label}.csv")))?;
    }
    Ok(())
}

fn export_solutions(
    hh: &impl HyperHeuristic,
    instances: &[CCBPInstance],
    config: &SAHHConfig,
    output_folder: &Path,
) -> Result<()> {
    let solution_folder = output_folder.join("solutions");
    fs::create_dir_all(&solution_folder)?;

    for instance in instances {
        let start = Instant::now();
        let solution = hh.solve(instance);
        let output = CCBPOutput {
            instance: export_instance(instance),
            solution: export(&solution, start.elapsed().as_secs_f64()),
            config: config.clone(),
        };
        let stem = Path::new(&instance.name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| instance.name.clone());
        io::write_json(&output, &solution_folder.join(format!("{stem}.json")))?;
    }
    Ok(())
}
