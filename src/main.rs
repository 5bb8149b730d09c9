use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dabiao_tools::config::{
    DEFAULT_DATA_OFFSET, DEFAULT_SEPARATOR, Job, JobFile, MergeJob, SheetLayout, SingleJob,
    parse_postage,
};
use dabiao_tools::io::launcher;
use dabiao_tools::jobs;
use dabiao_tools::{Result, ToolError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let (job, open) = match cli.command {
        Command::Single(args) => (Job::Single(args.to_job()?), !args.output.no_open),
        Command::Merge(args) => (Job::Merge(args.to_job()?), !args.output.no_open),
        Command::Job(args) => (JobFile::load(&args.config)?.into_job()?, !args.no_open),
    };

    let output = match job {
        Job::Single(job) => jobs::run_single(&job)?,
        Job::Merge(job) => {
            let report = jobs::run_merge(&job)?;
            for failure in &report.failures {
                eprintln!("skipped {}: {}", failure.path.display(), failure.message);
            }
            report.output
        }
    };

    println!("{}", output.display());
    if open {
        open_output(&output);
    }
    Ok(())
}

/// Opening the result is a convenience; a failure is reported but the billing
/// sheet has already been written. Returns whether the file was opened.
fn open_output(path: &Path) -> bool {
    match launcher::open_in_default_app(path) {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "could not open the billing sheet");
            eprintln!("warning: {error}");
            false
        }
    }
}

#[derive(Parser)]
#[command(
    name = "dabiao",
    author,
    version,
    about = "Turn order sheets into billing sheets and split postage across buyers."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a billing sheet from one order sheet.
    Single(SingleArgs),
    /// Merge several order sheets into one billing sheet, grouped by key.
    Merge(MergeArgs),
    /// Run a job described in a JSON file.
    Job(JobArgs),
}

#[derive(clap::Args)]
struct SingleArgs {
    /// Order sheet to process.
    #[arg(long)]
    input: PathBuf,

    /// Series name; used as the title and the output file name.
    #[arg(long)]
    series: String,

    /// Item type appended to every item column label and to the title.
    #[arg(long)]
    suffix: Option<String>,

    /// Postage fee shared by all buyers. Blank or negative means no postage.
    #[arg(long, allow_hyphen_values = true)]
    postage: Option<String>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Order sheets to merge.
    #[arg(long = "input", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Series name; used as the title and the output file name.
    #[arg(long)]
    series: String,

    /// Postage fee shared by all buyers of the merged sheet.
    #[arg(long, allow_hyphen_values = true)]
    postage: Option<String>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct JobArgs {
    /// JSON job description.
    #[arg(long)]
    config: PathBuf,

    /// Do not open the written file.
    #[arg(long)]
    no_open: bool,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Row (after the header row is removed) where buyer rows start.
    #[arg(long, default_value_t = DEFAULT_DATA_OFFSET)]
    data_offset: usize,

    /// Text placed between an item name and its quantity.
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    separator: String,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Directory the billing sheet is written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Do not open the written file.
    #[arg(long)]
    no_open: bool,
}

impl From<&LayoutArgs> for SheetLayout {
    fn from(args: &LayoutArgs) -> Self {
        SheetLayout {
            data_offset: args.data_offset,
            separator: args.separator.clone(),
        }
    }
}

impl SingleArgs {
    fn to_job(&self) -> Result<SingleJob> {
        let postage = parse_postage(self.postage.as_deref().unwrap_or_default())?;
        let job = SingleJob {
            input: self.input.clone(),
            series_name: self.series.trim().to_string(),
            suffix: self.suffix.clone().unwrap_or_default(),
            postage,
            output_dir: self.output.output_dir.clone(),
            layout: SheetLayout::from(&self.layout),
        };
        job.validate()?;
        Ok(job)
    }
}

impl MergeArgs {
    fn to_job(&self) -> Result<MergeJob> {
        let postage = parse_postage(self.postage.as_deref().unwrap_or_default())?;
        let job = MergeJob {
            inputs: self.inputs.clone(),
            series_name: self.series.trim().to_string(),
            postage,
            output_dir: self.output.output_dir.clone(),
            layout: SheetLayout::from(&self.layout),
        };
        job.validate()?;
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn single(args: &[&str]) -> SingleArgs {
        let argv = ["dabiao", "single", "--input", "orders.xlsx", "--series", "Spring"];
        let cli = Cli::try_parse_from(argv.iter().chain(args)).unwrap();
        match cli.command {
            Command::Single(args) => args,
            _ => panic!("expected the single subcommand"),
        }
    }

    #[test]
    fn negative_postage_is_accepted_and_means_no_postage() {
        let job = single(&["--postage", "-5"]).to_job().unwrap();
        assert_eq!(job.postage, Decimal::from(-5));
    }

    #[test]
    fn negative_postage_is_accepted_by_merge() {
        let cli = Cli::try_parse_from([
            "dabiao", "merge", "--input", "a.xlsx", "--series", "Spring", "--postage", "-1.5",
        ])
        .unwrap();
        let Command::Merge(args) = cli.command else {
            panic!("expected the merge subcommand");
        };
        assert_eq!(args.to_job().unwrap().postage, Decimal::new(-15, 1));
    }

    #[test]
    fn failing_to_open_the_output_is_not_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing").join("Spring.xlsx");
        assert!(!open_output(&missing));
    }
}
