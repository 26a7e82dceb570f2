use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::Config;
use crate::generation::SamplingPolicy;
use crate::layout::{default_page_config, DEFAULT_COLUMN_CAPACITY};
use crate::models::{parse_operations, OperationSet};
use crate::render::OutputFormat;
use crate::worksheet::{checked_iterations, write_worksheets, OutputTarget, WorksheetRequest};

#[derive(Parser, Debug)]
#[command(
    name = "worksheets",
    about = "Printable arithmetic worksheet generator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one worksheet file per iteration.
    Generate(GenerateArgs),
    /// Serve the worksheet HTTP API.
    Serve {
        #[arg(long, help = "HTTP port (overrides PORT)")]
        port: Option<u16>,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Upper bound for every operand and result (>= 10).
    #[arg(allow_negative_numbers = true)]
    pub limit: i64,
    /// Equations per worksheet; 200 fits on a letter page.
    #[arg(allow_negative_numbers = true)]
    pub count: i64,
    /// Number of worksheets to write.
    #[arg(allow_negative_numbers = true)]
    pub iterations: i64,
    /// Comma-separated list of ADDITION,SUBTRACTION,MULTIPLICATION,DIVISION.
    pub operations: Option<String>,

    #[arg(long, help = "Seed for reproducible worksheets")]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pdf)]
    pub format: OutputFormat,

    #[arg(long, value_name = "DIR", help = "Output directory (overrides OUTPUT_DIR)")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "File name stem (overrides OUTPUT_BASE_NAME)")]
    pub base_name: Option<String>,

    #[arg(long, help = "Appended after the iteration number (overrides OUTPUT_SUFFIX)")]
    pub suffix: Option<String>,

    #[arg(
        long,
        value_name = "N",
        help = "Stop rejection sampling after N attempts (overrides SAMPLING_MAX_ATTEMPTS)"
    )]
    pub max_attempts: Option<u32>,

    #[arg(long, value_name = "N", default_value_t = DEFAULT_COLUMN_CAPACITY)]
    pub column_capacity: usize,
}

impl GenerateArgs {
    pub fn request(&self, config: &Config) -> Result<WorksheetRequest> {
        let operations = match &self.operations {
            Some(arg) => parse_operations(arg)?,
            None => OperationSet::default(),
        };
        let mut request = WorksheetRequest::from_raw(self.limit, self.count, operations)?;
        request.column_capacity = self.column_capacity;
        request.policy =
            SamplingPolicy::from_max_attempts(self.max_attempts.or(config.sampling_max_attempts));
        Ok(request)
    }

    pub fn target(&self, config: &Config) -> OutputTarget {
        OutputTarget {
            dir: self.output_dir.clone().unwrap_or_else(|| config.output_dir.clone()),
            base_name: self
                .base_name
                .clone()
                .unwrap_or_else(|| config.output_base_name.clone()),
            suffix: self
                .suffix
                .clone()
                .unwrap_or_else(|| config.output_suffix.clone()),
        }
    }
}

/// Runs the `generate` subcommand.
pub fn run_generate(args: &GenerateArgs, config: &Config) -> Result<Vec<PathBuf>> {
    let request = args.request(config)?;
    let iterations = checked_iterations(args.iterations)?;
    let target = args.target(config);
    let renderer = args.format.renderer(&default_page_config());

    info!(
        limit = request.limit,
        count = request.count,
        iterations,
        operations = ?request.operations.as_slice(),
        "Generating worksheets"
    );

    let written = match args.seed {
        Some(seed) => write_worksheets(
            &request,
            iterations,
            renderer.as_ref(),
            &target,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => write_worksheets(
            &request,
            iterations,
            renderer.as_ref(),
            &target,
            &mut rand::thread_rng(),
        ),
    }
    .context("Worksheet generation failed")?;

    Ok(written)
}
