use color_print::{cformat, cprintln};
use pseudo::{
    config::{Config, Format},
    display, Error, Report,
};
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files
    #[clap(default_value = "main.pseudo")]
    input: Vec<String>,

    /// YAML config file
    #[clap(short, long)]
    config: Option<String>,

    /// Print the cell allocation map
    #[clap(short = 'm', long)]
    cell_map: bool,

    /// Print the usage history of every cell
    #[clap(long)]
    history: bool,

    /// Output format
    #[clap(short, long, value_enum)]
    format: Option<Format>,

    /// Fail on warnings
    #[clap(short = 'D', long)]
    deny_warnings: bool,

    /// Only print diagnostics
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    use clap::Parser;
    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` when some input has errors, or warnings under deny-warnings.
fn run(args: Args) -> Result<bool, Error> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.cell_map |= args.cell_map;
    config.history |= args.history;
    config.deny_warnings |= args.deny_warnings;
    if let Some(format) = args.format {
        config.format = format;
    }

    let text = config.format == Format::Text;
    let verbose = text && !args.quiet;

    let mut reports = vec![];
    for path in &args.input {
        if verbose {
            println!("1. Parse");
            println!("  < {}", path);
        }
        let source = std::fs::read_to_string(path).map_err(|e| Error::FileOpen(path.clone(), e))?;
        let report = Report::check(path, &source);

        if text {
            if verbose {
                println!("2. Validate");
                println!("  {} statements", report.statements);
            }
            for diag in &report.diagnostics {
                diag.print(path, &source);
            }
            if config.cell_map {
                if verbose {
                    println!("3. Cell Map");
                }
                display::cellprint(&report.cells, &report.claims);
            }
            if config.history {
                display::historyprint(&report.history);
            }
        }
        reports.push(report);
    }

    let errors: usize = reports.iter().map(Report::errors).sum();
    let warnings: usize = reports.iter().map(Report::warnings).sum();
    let passed = !reports
        .iter()
        .any(|report| report.failed(config.deny_warnings));

    match config.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        Format::Text => println!(
            "{}",
            if passed {
                cformat!("<green,bold>ok</>: {} error(s), {} warning(s)", errors, warnings)
            } else {
                cformat!("<red,bold>failed</>: {} error(s), {} warning(s)", errors, warnings)
            }
        ),
    }
    Ok(passed)
}
