use std::path::PathBuf;

use clap::Parser;
use judge::{judge_game, load_rules, Config, GameInput, Recorder, Verdict};
use tak::{GameResult, Player, Rules};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Transcripts (.ptn) or JSON move logs (.json) to judge
    #[clap(num_args(1..), value_delimiter = ' ')]
    inputs: Vec<PathBuf>,

    /// JSON file with stone allotments that override the standard ones
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Log the final position of every game
    #[arg(long, default_value_t = false)]
    show_board: bool,

    /// Stop as soon as one input is rejected
    #[arg(short, long, default_value_t = false)]
    stop_on_error: bool,

    /// Write a normalized transcript of every game into this directory
    #[arg(short, long)]
    write_transcripts_to: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Tally {
    wins: [usize; 2],
    draws: usize,
    unfinished: usize,
    rejected: usize,
}

impl Tally {
    fn record_result(&mut self, result: GameResult) {
        match result.winner() {
            Some(Player::White) => self.wins[0] += 1,
            Some(Player::Black) => self.wins[1] += 1,
            None => self.draws += 1,
        }
    }
}

fn judge_all(inputs: &[PathBuf], config: &mut Config, stop_on_error: bool) -> anyhow::Result<Tally> {
    let mut tally = Tally::default();

    for (game_idx, path) in inputs.iter().enumerate() {
        let input = GameInput::load(path)?;
        match judge_game(&input, config)? {
            Verdict::Finished(result) => {
                debug!(path = %path.display(), game_idx, %result, "Game over");
                tally.record_result(result);
            }
            Verdict::Unfinished => {
                debug!(path = %path.display(), game_idx, "Game not finished");
                tally.unfinished += 1;
            }
            Verdict::Rejected(err) => {
                warn!(path = %path.display(), game_idx, "Rejected input");
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                tally.rejected += 1;
                if stop_on_error {
                    break;
                }
            }
        }
    }

    eprintln!(
        "End result:\n- {} won by White\n- {} won by Black\n- {} draws\n- {} unfinished\n- {} rejected",
        tally.wins[0], tally.wins[1], tally.draws, tally.unfinished, tally.rejected
    );

    Ok(tally)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => Rules::default(),
    };
    info!(sizes = rules.allotments.len(), "Loaded rules");

    let recorder = if let Some(dir_path) = args.write_transcripts_to {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut config = Config {
        rules,
        show_board: args.show_board,
        recorder,
    };

    let tally = judge_all(&args.inputs, &mut config, args.stop_on_error)?;
    if tally.rejected > 0 {
        anyhow::bail!("{} of {} inputs were rejected", tally.rejected, args.inputs.len());
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
