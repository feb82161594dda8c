use clap::Parser;
use json_log_term::cli::{Cli, ColorChoice, FormatChoice};
use json_log_term::filter::SeverityFilter;
use json_log_term::format::{LogfmtFormat, TermFormat};
use json_log_term::mapping::RecordMapper;
use json_log_term::pipeline::{self, PipelineError, RunStats};
use json_log_term::sink::LineSink;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr so they never interleave with rendered lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(termion::is_tty(&io::stderr()))
        .init();

    match run(&cli) {
        Ok(stats) => {
            tracing::debug!(
                decoded = stats.decoded,
                admitted = stats.admitted,
                suppressed = stats.suppressed,
                warnings = stats.warnings,
                "log stream drained"
            );
            ExitCode::SUCCESS
        }
        // The consumer of our output went away (e.g. piped into `head`);
        // everything written so far arrived, so exit quietly.
        Err(err) if err.is_broken_pipe() => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunStats, PipelineError> {
    let mapper = RecordMapper::new(cli.field_mapping(), cli.time_layout.clone());
    let filter = SeverityFilter::new(cli.min_level);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let tty = termion::is_tty(&stdout);
    let out = io::BufWriter::new(stdout.lock());

    let term = match cli.format {
        FormatChoice::Term => true,
        FormatChoice::Logfmt => false,
        FormatChoice::Auto => tty,
    };
    let colored = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => tty,
    };

    if term {
        let mut sink = LineSink::new(out, TermFormat::new(colored));
        pipeline::run(stdin.lock(), &mapper, &filter, &mut sink)
    } else {
        let mut sink = LineSink::new(out, LogfmtFormat::new(cli.field_mapping()));
        pipeline::run(stdin.lock(), &mapper, &filter, &mut sink)
    }
}
