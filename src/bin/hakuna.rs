use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;

use jumpscare::{
    JumpscareResult, SystemClock, TerminalGuard, TerminalInput,
    confetti::{GridPainter, run_animation},
    init_logging, spawn_background,
};

#[derive(Parser, Debug)]
#[command(name = "hakuna", version, about = "Rainbow title, a bouncing figure and confetti")]
struct Cli {
    /// Draw without colors (also honored through `NO_COLOR`).
    #[arg(long)]
    no_color: bool,

    /// Audio file played in the background.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Stop after this many ticks instead of waiting for Q.
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {e:#}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> JumpscareResult<()> {
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty());

    let _audio = cli
        .audio
        .as_deref()
        .and_then(|path| match spawn_background(path) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "continuing without audio");
                None
            }
        });

    let guard = TerminalGuard::enter(false)?;
    let mut painter = GridPainter::new(io::stdout());
    run_animation(
        &mut painter,
        &mut TerminalInput,
        &mut SystemClock::new(),
        &mut rand::thread_rng(),
        || guard.size(),
        color,
        cli.ticks,
    )?;
    Ok(())
}
