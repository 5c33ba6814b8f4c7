use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use pdfpages::config::{self, DEFAULT_SCALE, JobConfig};
use pdfpages::{PdfiumRasterizer, extract_pages};

#[derive(Parser)]
#[command(name = "pdfpages", version, about = "Render PDF pages to PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Extra directory to search for the PDFium library
    #[arg(long, global = true)]
    pdfium_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every PDF listed in a job config
    Run {
        /// Job config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the render scale (2.0 = 144 dpi)
        #[arg(long)]
        scale: Option<f32>,

        /// Override the output directory (relative to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the run summary as JSON
        #[arg(long)]
        summary_json: bool,
    },

    /// Extract a single PDF
    Extract {
        pdf: PathBuf,

        /// Output file name prefix
        #[arg(short, long)]
        prefix: String,

        /// Output directory (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Render scale (2.0 = 144 dpi)
        #[arg(long, default_value_t = DEFAULT_SCALE)]
        scale: f32,
    },

    /// Print the effective job config and exit
    DumpConfig {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_job_config(explicit: Option<&Path>) -> Result<JobConfig> {
    let Some(path) = config::locate_config(explicit) else {
        bail!(
            "no job config found; pass --config or create {}",
            config::LOCAL_CONFIG_FILE
        );
    };

    log::debug!("Using job config {}", path.display());
    JobConfig::load(&path).with_context(|| format!("loading {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            scale,
            output,
            summary_json,
        } => {
            let mut job = load_job_config(config.as_deref())?;
            if let Some(scale) = scale {
                job.scale = scale;
            }
            if let Some(output) = output {
                let cwd = std::env::current_dir().context("reading current directory")?;
                job.override_output_dir(&output, &cwd);
            }
            if cli.pdfium_dir.is_some() {
                job.pdfium_dir = cli.pdfium_dir;
            }
            job.validate()?;

            let rasterizer = PdfiumRasterizer::bind(job.pdfium_dir.as_deref())?;
            let summary = pdfpages::run(&job, &rasterizer)?;

            if summary_json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }

        Commands::Extract {
            pdf,
            prefix,
            output,
            scale,
        } => {
            JobConfig::new("", &output)
                .with_scale(scale)
                .with_input(&pdf, &prefix)
                .validate()?;

            if !pdf.exists() {
                bail!("Not found: {}", pdf.display());
            }

            let rasterizer = PdfiumRasterizer::bind(cli.pdfium_dir.as_deref())?;
            let pages = extract_pages(&rasterizer, &pdf, &output, &prefix, scale)
                .with_context(|| format!("extracting {}", pdf.display()))?;
            log::info!("Done! {} page(s)", pages);
        }

        Commands::DumpConfig { config } => {
            let mut job = load_job_config(config.as_deref())?;
            if cli.pdfium_dir.is_some() {
                job.pdfium_dir = cli.pdfium_dir;
            }
            println!("{}", job.to_json_pretty()?);
        }
    }

    Ok(())
}
