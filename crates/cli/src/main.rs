//! trfreq CLI
//!
//! Cleans Turkish word-frequency lists: drops rare and non-alphabetic words
//! from a raw corpus dump, then drops words spelled outside the allowed
//! alphabet.

mod config;
mod progress;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use trfreq_core::pipeline::{run_pipeline_with_progress, Stage};
use trfreq_core::reviser::{revise_alphabet_with_progress, DEFAULT_REVISED_PATH};
use trfreq_core::sorter::{sort_corpus_with_progress, DEFAULT_RAW_PATH, DEFAULT_SORTED_PATH};
use trfreq_core::{MalformedPolicy, Progress, ReviseConfig, SortConfig};
use trfreq_filters::CaseMode;

use config::PipelineConfig;
use progress::ProgressReporter;

#[derive(Parser)]
#[command(name = "trfreq")]
#[command(version, about = "Clean and alphabet-filter Turkish word-frequency lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output statistics in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop rare and non-alphabetic words from a raw tab-delimited dump
    Sort {
        /// Raw frequency dump (plain or .gz)
        #[arg(short, long, default_value = DEFAULT_RAW_PATH)]
        input: PathBuf,

        /// Output word,count list
        #[arg(short, long, default_value = DEFAULT_SORTED_PATH)]
        output: PathBuf,

        /// Keep words whose frequency is strictly greater than this
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        min_frequency: i64,

        /// Lowercase with Turkish rules (I → ı, İ → i)
        #[arg(long)]
        turkish_casing: bool,

        /// Apply Unicode NFC composition before lowercasing
        #[arg(long)]
        nfc: bool,

        /// Skip lines with a non-integer frequency instead of aborting
        #[arg(long)]
        skip_malformed: bool,

        /// Write the output in place instead of via a temp file
        #[arg(long)]
        no_atomic: bool,

        /// Show statistics without writing output
        #[arg(long)]
        dry_run: bool,
    },

    /// Drop words containing characters outside the allowed alphabet
    Revise {
        /// Input word,count list
        #[arg(short, long, default_value = DEFAULT_SORTED_PATH)]
        input: PathBuf,

        /// Output word,count list
        #[arg(short, long, default_value = DEFAULT_REVISED_PATH)]
        output: PathBuf,

        /// Replace the base alphabet (defaults to the Turkish alphabet)
        #[arg(long, value_name = "CHARS")]
        base: Option<String>,

        /// Replace the extended accented set
        #[arg(long, value_name = "CHARS", conflicts_with = "strict")]
        extended: Option<String>,

        /// Accept the base alphabet only
        #[arg(long)]
        strict: bool,

        /// Skip malformed rows instead of aborting
        #[arg(long)]
        skip_malformed: bool,

        /// Write the output in place instead of via a temp file
        #[arg(long)]
        no_atomic: bool,

        /// Show statistics without writing output
        #[arg(long)]
        dry_run: bool,
    },

    /// Run sort then revise
    Pipeline {
        /// Pipeline config file (YAML or TOML); defaults are used without one
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the first records of a word,count list
    Inspect {
        /// Path to the frequency list
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of records to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Write the default pipeline config (YAML or TOML by extension)
    InitConfig {
        /// Destination file
        #[arg(value_name = "FILE", default_value = "trfreq.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.json)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Sort {
            input,
            output,
            min_frequency,
            turkish_casing,
            nfc,
            skip_malformed,
            no_atomic,
            dry_run,
        } => {
            let config = SortConfig {
                input_path: input,
                output_path: output,
                min_frequency,
                casing: if turkish_casing {
                    CaseMode::Turkish
                } else {
                    CaseMode::Unicode
                },
                unicode_nfc: nfc,
                on_malformed: malformed_policy(skip_malformed),
                atomic_write: !no_atomic,
                dry_run,
            };
            sort(&config, cli.json)?;
        }
        Commands::Revise {
            input,
            output,
            base,
            extended,
            strict,
            skip_malformed,
            no_atomic,
            dry_run,
        } => {
            let mut config = ReviseConfig {
                input_path: input,
                output_path: output,
                on_malformed: malformed_policy(skip_malformed),
                atomic_write: !no_atomic,
                dry_run,
                ..Default::default()
            };
            if let Some(base) = base {
                config.alphabet.base = base;
            }
            if let Some(extended) = extended {
                config.alphabet.extended = extended;
            }
            if strict {
                config.alphabet.extended.clear();
            }
            revise(&config, cli.json)?;
        }
        Commands::Pipeline { config } => {
            run_pipeline(config, cli.json)?;
        }
        Commands::Inspect { input, limit } => {
            inspect_list(&input, limit)?;
        }
        Commands::InitConfig { path, force } => {
            init_config(&path, force)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn malformed_policy(skip: bool) -> MalformedPolicy {
    if skip {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Fail
    }
}

/// Lazily created progress display; nothing is drawn in JSON mode
struct StageProgress {
    label: &'static str,
    enabled: bool,
    reporter: Option<ProgressReporter>,
}

impl StageProgress {
    fn new(label: &'static str, enabled: bool) -> Self {
        Self {
            label,
            enabled,
            reporter: None,
        }
    }

    fn update(&mut self, progress: &Progress) {
        if !self.enabled {
            return;
        }
        let label = self.label;
        self.reporter
            .get_or_insert_with(|| ProgressReporter::new(label, progress.total_bytes))
            .update(progress);
    }

    fn finish(&self) {
        if let Some(reporter) = &self.reporter {
            reporter.finish();
        }
    }
}

fn sort(config: &SortConfig, json_output: bool) -> Result<()> {
    let mut progress = StageProgress::new("sort", !json_output);
    let stats = sort_corpus_with_progress(config, |p| progress.update(p))?;
    progress.finish();

    let output = (!config.dry_run).then_some(config.output_path.as_path());
    if json_output {
        let report = serde_json::json!({
            "input": config.input_path.to_string_lossy(),
            "output": output.map(|p| p.to_string_lossy()),
            "stats": &stats,
            "retention_rate": stats.retention_rate(),
            "dry_run": config.dry_run,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_sort_report(&config.input_path, output, &stats);
    }

    Ok(())
}

fn revise(config: &ReviseConfig, json_output: bool) -> Result<()> {
    let mut progress = StageProgress::new("revise", !json_output);
    let stats = revise_alphabet_with_progress(config, |p| progress.update(p))?;
    progress.finish();

    let output = (!config.dry_run).then_some(config.output_path.as_path());
    if json_output {
        let report = serde_json::json!({
            "input": config.input_path.to_string_lossy(),
            "output": output.map(|p| p.to_string_lossy()),
            "stats": &stats,
            "dry_run": config.dry_run,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_revise_report(&config.input_path, output, &stats);
    }

    Ok(())
}

fn run_pipeline(config_path: Option<PathBuf>, json_output: bool) -> Result<()> {
    let config = match &config_path {
        Some(path) => {
            info!("Loading pipeline config: {:?}", path);
            PipelineConfig::load(path)?
        }
        None => PipelineConfig::default(),
    };

    let mut sort_progress = StageProgress::new("sort", !json_output);
    let mut revise_progress = StageProgress::new("revise", !json_output);
    let stats = run_pipeline_with_progress(&config.sort, &config.revise, |stage, p| match stage {
        Stage::Sort => sort_progress.update(p),
        Stage::Revise => revise_progress.update(p),
    })?;
    sort_progress.finish();
    revise_progress.finish();

    if json_output {
        let report = serde_json::json!({
            "config": config_path.map(|p| p.to_string_lossy().into_owned()),
            "input": config.sort.input_path.to_string_lossy(),
            "intermediate": config.sort.output_path.to_string_lossy(),
            "output": config.revise.output_path.to_string_lossy(),
            "stats": &stats,
            "retention_rate": stats.retention_rate(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_sort_report(
            &config.sort.input_path,
            Some(config.sort.output_path.as_path()),
            &stats.sort,
        );
        progress::print_revise_report(
            &config.revise.input_path,
            Some(config.revise.output_path.as_path()),
            &stats.revise,
        );
        println!(
            "Overall retention:  {:.1}% of raw lines",
            stats.retention_rate()
        );
    }

    Ok(())
}

fn inspect_list(input: &Path, limit: usize) -> Result<()> {
    use trfreq_formats::{FreqLine, FreqListReader};

    info!("Inspecting frequency list: {:?}", input);

    let mut reader = FreqListReader::open(input)?;
    let mut shown = 0;

    while shown < limit {
        match reader.next() {
            Some(line) => {
                if let FreqLine::Entry(entry) = line? {
                    println!("{:>8}  {:<24} {}", entry.source_line, entry.word, entry.frequency);
                    shown += 1;
                }
            }
            None => break,
        }
    }

    info!(
        "Processed {} rows ({} bytes)",
        reader.records_processed(),
        reader.bytes_processed()
    );

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    PipelineConfig::default().save(path)?;
    info!("Wrote default pipeline config to {:?}", path);
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
