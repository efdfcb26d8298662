use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use cangrid::cli::cli::Args;
use cangrid::config::gwp::MassUnit;
use cangrid::models::intensity::IntensityResults;
use cangrid::utils::logging::{self, OperationCategory};
use cangrid::{BreakdownSources, FuelCategory, Pipeline, Region};

/// JSON document written by `--output`
#[derive(Serialize)]
struct ScenarioReport<'a> {
    generated_at: String,
    scenarios: Vec<ScenarioResults<'a>>,
}

#[derive(Serialize)]
struct ScenarioResults<'a> {
    scenario: &'a str,
    workbook: &'a Path,
    results: &'a IntensityResults,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())
        .context("Failed to set up tracing subscriber")?;

    let config = args.to_run_config().context("Invalid run configuration")?;
    info!(
        "Grid intensity model: data dir {}, unit {}/kWh, GWP CO2 {} CH4 {} N2O {} SF6 {}",
        config.data_dir.display(),
        config.unit,
        config.gwp.co2,
        config.gwp.ch4,
        config.gwp.n2o,
        config.gwp.sf6
    );

    let sources = BreakdownSources::in_dir(&config.data_dir);
    let pipeline = Pipeline::load(&sources).context("Failed to load technology breakdowns")?;

    let workbooks = config.workbooks();
    let progress = if workbooks.len() > 1 {
        let pb = ProgressBar::new(workbooks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?,
        );
        Some(pb)
    } else {
        None
    };

    let mut computed = Vec::with_capacity(workbooks.len());
    for (label, path) in &workbooks {
        if let Some(pb) = &progress {
            pb.set_message(label.clone());
        }
        let results = pipeline
            .run(path, &config.gwp, config.unit)
            .with_context(|| format!("Failed to compute intensities for {}", label))?;
        report_summary(label, &results, args.region(), args.year(), config.unit);
        computed.push((label.as_str(), path.as_path(), results));
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    if let Some(output) = args.output() {
        let _timing = logging::start_timing("write_report", OperationCategory::Output);
        let report = ScenarioReport {
            generated_at: Local::now().to_rfc3339(),
            scenarios: computed
                .iter()
                .map(|(scenario, workbook, results)| ScenarioResults {
                    scenario: *scenario,
                    workbook: *workbook,
                    results,
                })
                .collect(),
        };
        let file = File::create(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Results written to {}", output.display());
    }

    logging::print_timing_report();
    Ok(())
}

fn report_summary(label: &str, results: &IntensityResults, region: Region, year: u32, unit: MassUnit) {
    let Some(region_result) = results.regions.get(&region) else {
        warn!("{}: no results for {}", label, region);
        return;
    };
    let Some(year_result) = region_result.year(year) else {
        warn!("{}: year {} is outside the modelled range", label, year);
        return;
    };

    println!(
        "\n{} | {} {} | grid intensity {:.4} {}CO2e/kWh",
        label,
        region.name(),
        year,
        year_result.grid_intensity,
        unit
    );
    println!(
        "{:<22} {:>10} {:>10} {:>10} {:>8} {:>8}",
        "Fuel", "Operating", "Embodied", "Total", "Share", "Carbon"
    );
    for category in FuelCategory::ALL {
        let c = year_result.category(category);
        println!(
            "{:<22} {:>10.4} {:>10.4} {:>10.4} {:>7.1}% {:>7.1}%",
            category.label(),
            c.operating,
            c.embodied,
            c.total,
            c.electricity_share * 100.0,
            c.carbon_share * 100.0
        );
    }

    let fossil_share: f64 = year_result
        .categories
        .iter()
        .filter(|c| c.category.is_fossil())
        .map(|c| c.electricity_share)
        .sum();
    println!("Fossil share of generation: {:.1}%", fossil_share * 100.0);
}
