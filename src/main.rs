#![warn(clippy::all, clippy::pedantic)]

use argh::FromArgs;
use tracing_subscriber::EnvFilter;

use tictactoe::ai::Heuristic;
use tictactoe::app::{App, Mode, Theme};
use tictactoe::score::ScoreStore;
use tictactoe::ui;

/// Tic-tac-toe with score tracking and a heuristic computer opponent.
#[derive(FromArgs)]
struct Args {
    /// start in player-vs-player mode instead of playing the computer
    #[argh(switch)]
    pvp: bool,

    /// start with the dark theme
    #[argh(switch)]
    dark: bool,

    /// seed for the computer's randomized tie-breaking
    #[argh(option)]
    seed: Option<u64>,
}

fn main() {
    let args: Args = argh::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mode = if args.pvp {
        Mode::PlayerVsPlayer
    } else {
        Mode::PlayerVsComputer
    };
    let theme = if args.dark { Theme::Dark } else { Theme::Light };
    let chooser = match args.seed {
        Some(seed) => Heuristic::seeded(seed),
        None => Heuristic::new(),
    };

    let mut app = App::new(mode, theme, chooser, ScoreStore::from_data_dir());
    let mut client = ui::init();
    ui::run(&mut app, &mut client);
}
