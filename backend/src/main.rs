//! Sets up a position, makes the requested move on it and prints what happened

use std::process::ExitCode;

use backend::{demo_board, Backend};
use board::{Coordinate, Game};
use clap::Parser;
use rules::{BoardManager, Movement};

#[derive(Debug, Parser)]
#[command(about = "Referee a move on a chess board")]
struct Args {
    /// Square of the piece to move
    #[arg(long, default_value = "f6")]
    from: Coordinate,
    /// Square to move it to
    #[arg(long, default_value = "d4")]
    to: Coordinate,
    /// Start from the standard initial position instead of the demo position
    #[arg(long)]
    initial: bool,
    /// After the move, keep going with this many random moves
    #[arg(long, default_value_t = 0)]
    random_plies: usize,
    /// Seed for the random moves
    #[arg(long)]
    seed: Option<u64>,
}

fn run<G: Game>(args: &Args) -> ExitCode {
    let game = if args.initial {
        G::initial_state()
    } else {
        G::from_board(demo_board())
    };
    let mut backend = Backend::new(game, args.seed);

    let board = backend.game().board();
    println!("{board}");
    match board.piece_at(args.from) {
        Some(piece) => println!(
            "{piece:?} on {} can capture on:\n{}",
            args.from,
            piece.possible_capture_moves(args.from),
        ),
        None => println!("Nothing on {}", args.from),
    }

    match backend.play_move(args.from, args.to) {
        Ok(mv) => println!("Played {mv}"),
        Err(err) => {
            eprintln!("Move {}-{} rejected: {err}", args.from, args.to);
            return ExitCode::FAILURE;
        }
    }
    println!("{}", backend.game().board());

    if args.random_plies > 0 {
        let before = backend.game().board().history().len();
        let outcome = match backend.play_random_game(args.random_plies) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("Random play stopped: {err}");
                return ExitCode::FAILURE;
            }
        };
        let board = backend.game().board();
        for mv in &board.history()[before..] {
            println!("{mv}");
        }
        println!("{board}");
        match outcome {
            Some(outcome) => println!("Game over: {outcome:?}"),
            None => println!("State: {}", board.state()),
        }
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args = Args::parse();
    run::<BoardManager>(&args)
}
