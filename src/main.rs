//! tictree - play tic-tac-toe against an exhaustively explored game tree.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use tictree::bits::bit_to_index;
use tictree::opponent::{RandomOpponent, run_selfplay};
use tictree::render::describe;
use tictree::shell::Shell;
use tictree::tree::GameTree;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play tic-tac-toe against a computer that has seen every possible game
#[derive(Parser, Debug)]
#[command(name = "tictree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to run, defaults to `play`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play rounds against the computer, alternating who opens
    Play {
        /// Let the computer open the first round
        #[arg(long)]
        computer_first: bool,

        /// Stop after this many rounds instead of playing until input ends
        #[arg(short, long)]
        rounds: Option<usize>,
    },

    /// Print the tree size, outcome tallies and opening scores
    Stats,

    /// Print terminal positions with their verdict
    Winners {
        /// Print at most this many positions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Pit the computer against a random opponent
    Selfplay {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play {
        computer_first: false,
        rounds: None,
    });

    info!("Exploring the game tree");
    let tree = GameTree::explored();
    info!(nodes = tree.len(), "Game tree ready");

    match command {
        Command::Play {
            computer_first,
            rounds,
        } => play(tree, computer_first, rounds),
        Command::Stats => stats(&tree),
        Command::Winners { limit } => winners(&tree, limit),
        Command::Selfplay { games, seed } => selfplay(tree, games, seed),
    }
}

fn play(tree: GameTree, computer_first: bool, rounds: Option<usize>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(tree, stdin.lock(), stdout.lock());
    let scoreboard = shell.run(rounds, !computer_first)?;
    info!(
        human = scoreboard.human,
        computer = scoreboard.computer,
        draws = scoreboard.draws,
        "Session over"
    );
    Ok(())
}

fn stats(tree: &GameTree) -> Result<()> {
    let root = tree.root_id();
    let counts = tree.count_outcomes(root);
    println!("nodes: {}", tree.count(root));
    println!(
        "terminal positions: {} (x wins {}, o wins {}, draws {})",
        counts.total(),
        counts.first_wins,
        counts.second_wins,
        counts.draws
    );
    for score in tree.move_scores(root) {
        println!(
            "cell {}: x {} / o {} / draw {} -> {:.2}%",
            bit_to_index(score.mv).unwrap_or_default(),
            score.counts.first_wins,
            score.counts.second_wins,
            score.counts.draws,
            score.score * 100.0
        );
    }
    if let Some(best) = tree.best_move(root) {
        println!("best opening: cell {}", bit_to_index(best).unwrap_or_default());
    }
    Ok(())
}

fn winners(tree: &GameTree, limit: Option<usize>) -> Result<()> {
    let terminals = tree.terminals(tree.root_id());
    for id in terminals.take(limit.unwrap_or(usize::MAX)) {
        println!("{}", describe(tree.node(id).outcome()));
        print!("{}", tree.render(id, false));
    }
    Ok(())
}

fn selfplay(mut tree: GameTree, games: usize, seed: Option<u64>) -> Result<()> {
    let mut opponent = match seed {
        Some(seed) => RandomOpponent::seeded(seed),
        None => RandomOpponent::default(),
    };
    let summary = run_selfplay(&mut tree, &mut opponent, games)?;
    println!(
        "computer won {}, lost {}, drew {} of {} games",
        summary.computer_wins,
        summary.computer_losses,
        summary.draws,
        summary.games()
    );
    Ok(())
}
