//! XAML Analyzer CLI

use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use xaml_analyzer::{
    analyze_with_config, find_project_file, get_formatter, AnalyzeError, Config, OutputFormat,
    WorkflowAnalysis,
};

#[derive(Parser)]
#[command(name = "xaml-analyzer")]
#[command(about = "UiPath workflow analyzer - error handling, logging, selector and structure checks")]
#[command(version)]
struct Cli {
    /// Workflow files or directories to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Project metadata file (defaults to project.json next to each workflow)
    #[arg(long, short = 'm')]
    metadata: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Output format (text, json, markdown, html)
    #[arg(long, short = 'f', default_value = "text")]
    format: OutputFormat,

    /// Configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Fail with exit code 2 when any workflow scores below this
    #[arg(long)]
    min_score: Option<f64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let inputs = collect_files(&cli.paths, &config);
    for path in &inputs.missing {
        eprintln!("Error: {} does not exist", path.display());
    }
    if inputs.files.is_empty() {
        eprintln!("No workflow files found");
        return ExitCode::FAILURE;
    }
    log::info!("Analyzing {} workflow(s)", inputs.files.len());

    let results: Vec<Result<WorkflowAnalysis, AnalyzeError>> = inputs
        .files
        .par_iter()
        .map(|file| {
            let metadata = cli.metadata.clone().or_else(|| find_project_file(file));
            analyze_with_config(file, metadata.as_deref(), &config)
        })
        .collect();

    let mut analyses = Vec::with_capacity(results.len());
    // A missing input fails the run even when other files were analyzed
    let mut failed = !inputs.missing.is_empty();
    for result in results {
        match result {
            Ok(analysis) => analyses.push(analysis),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    let colored = cli.output.is_none() && !cli.no_color && atty::is(atty::Stream::Stdout);
    if !colored {
        colored::control::set_override(false);
    }
    let report = get_formatter(cli.format, colored).format(&analyses);

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &report) {
                eprintln!("Error: Failed to write {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            log::info!("Report written to {}", path.display());
        }
        None => println!("{}", report),
    }

    if failed {
        return ExitCode::FAILURE;
    }

    if let Some(min_score) = cli.min_score {
        let below: Vec<&WorkflowAnalysis> = analyses
            .iter()
            .filter(|a| a.health_score < min_score)
            .collect();
        if !below.is_empty() {
            for analysis in below {
                eprintln!(
                    "{}: score {:.1} is below {:.1}",
                    analysis.file.display(),
                    analysis.health_score,
                    min_score
                );
            }
            return ExitCode::from(2);
        }
    }

    ExitCode::SUCCESS
}

fn load_config(cli: &Cli) -> Result<Config, xaml_analyzer::ConfigError> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Ok(
            Config::find_and_load(&std::env::current_dir().unwrap_or_default()).unwrap_or_default(),
        ),
    }
}

/// Workflow files resolved from the command line
#[derive(Debug, Default)]
struct Inputs {
    files: Vec<PathBuf>,
    /// Arguments that name neither a file nor a directory
    missing: Vec<PathBuf>,
}

fn collect_files(paths: &[PathBuf], config: &Config) -> Inputs {
    let mut inputs = Inputs::default();

    for path in paths {
        if path.is_file() {
            // Explicit files are analyzed even when an exclude pattern matches
            inputs.files.push(path.clone());
        } else if path.is_dir() {
            for entry in walkdir::WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let file_path = entry.path();
                if file_path.is_file() && is_workflow_file(file_path) && !config.is_excluded(file_path)
                {
                    inputs.files.push(file_path.to_path_buf());
                }
            }
        } else {
            inputs.missing.push(path.clone());
        }
    }

    inputs.files.sort();
    inputs.files.dedup();
    inputs
}

fn is_workflow_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xaml"))
}
