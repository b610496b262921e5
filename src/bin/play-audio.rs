use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

use jumpscare::{JumpscareError, init_logging, play_blocking};

#[derive(Parser, Debug)]
#[command(name = "play-audio", version, about = "Play an audio file with a system player")]
struct Cli {
    /// Audio file to play.
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let Some(path) = cli.path else {
        eprintln!("usage: play-audio <path-to-audio>");
        return ExitCode::from(1);
    };

    match play_blocking(&path) {
        Ok(backend) => {
            tracing::info!(backend = backend.program(), "played");
            ExitCode::SUCCESS
        }
        Err(e @ JumpscareError::ResourceMissing(_)) => {
            eprintln!("[play_audio] file not found: {}", path.display());
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            eprintln!("[play_audio] {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
