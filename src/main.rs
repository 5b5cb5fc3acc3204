//! imginline - embed local images into an HTML file

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "imginline")]
#[command(version, about = "Inline local images into HTML as base64 data URIs", long_about = None)]
#[command(after_help = "EXAMPLES:
    imginline -i page.html -o page.inline.html")]
struct Cli {
    /// Path to input HTML file
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Path to output HTML file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (Some(input), Some(output)) = (cli.input, cli.output) else {
        eprintln!("error: both input (-i) and output (-o) paths are required");
        return ExitCode::FAILURE;
    };

    match imginline::convert_file(&input, &output) {
        Ok(report) => {
            if report.has_failures() {
                log::warn!(
                    "{} of {} images could not be inlined",
                    report.failures.len(),
                    report.total()
                );
            }
            println!("Conversion completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
