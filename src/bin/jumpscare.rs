use std::{
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use jumpscare::{
    JumpscareResult, PngDumpSurface, Prank, PrankConfig, PrankOutcome, ScriptedInput, Selection,
    SurfaceSize, SystemClock, TerminalGuard, TerminalInput, TerminalSurface, default_base_dir,
    init_logging, spawn_background,
};

/// Still images end after this long when nobody can press a key.
const HEADLESS_STILL_MS: u64 = 1500;

#[derive(Parser, Debug)]
#[command(name = "jumpscare", version, about = "Show the next scare from resources/")]
struct Cli {
    /// Directory holding `resources/` and the rotation state (default: next to the executable).
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// JSON config file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write frames as PNG files into this directory instead of drawing in the terminal.
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Surface width in pixels for `--dump-dir`.
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Surface height in pixels for `--dump-dir`.
    #[arg(long, default_value_t = 180)]
    height: u32,

    /// Keep every Nth frame for `--dump-dir`.
    #[arg(long, default_value_t = 1)]
    dump_stride: u32,

    /// Audio file played in the background while the scare runs.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Seed for the pre-roll delay and the shake (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
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
    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => default_base_dir()?,
    };
    let mut config = match &cli.config {
        Some(path) => PrankConfig::load(path)?,
        None => PrankConfig::default(),
    };
    if cli.dump_dir.is_some() && config.playback.static_timeout_ms.is_none() {
        config.playback.static_timeout_ms = Some(HEADLESS_STILL_MS);
    }

    let prank = Prank::new(base_dir, config)?;
    let selection = prank.select_next()?;

    let audio = cli
        .audio
        .as_deref()
        .and_then(|path| match spawn_background(path) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "continuing without audio");
                None
            }
        });

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut clock = SystemClock::new();

    // Surface setup failures land in `outcome` so the rotation still moves on.
    let outcome = match &cli.dump_dir {
        Some(dir) => {
            let size = (cli.width, cli.height);
            play_headless(&prank, &selection, dir, size, cli.dump_stride, &mut clock, &mut rng)
        }
        None => play_in_terminal(&prank, &selection, &mut clock, &mut rng),
    };

    drop(audio);
    prank.commit(&selection);

    let outcome = outcome?;
    tracing::info!(?outcome, "finished");
    Ok(())
}

fn play_headless(
    prank: &Prank,
    selection: &Selection,
    dir: &Path,
    (width, height): (u32, u32),
    stride: u32,
    clock: &mut SystemClock,
    rng: &mut StdRng,
) -> JumpscareResult<PrankOutcome> {
    let size = SurfaceSize::new(width, height)?;
    let mut surface = PngDumpSurface::new(dir, size, stride)?;
    let outcome = prank.play(selection, &mut surface, &mut ScriptedInput::idle(), clock, rng);
    eprintln!("wrote {} frames to {}", surface.written(), dir.display());
    outcome
}

fn play_in_terminal(
    prank: &Prank,
    selection: &Selection,
    clock: &mut SystemClock,
    rng: &mut StdRng,
) -> JumpscareResult<PrankOutcome> {
    let guard = TerminalGuard::enter(true)?;
    let (cols, rows) = guard.size()?;
    let mut surface =
        TerminalSurface::centered(io::stdout(), cols, rows, prank.config().window_scale)?;
    prank.play(selection, &mut surface, &mut TerminalInput, clock, rng)
}
