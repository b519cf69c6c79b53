use board::{Board, Color, Coordinate, Game, GameOutcome, Move, Piece, PieceKind};

use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

/// The demo position: a white queen on f6 facing a black pawn on d4, with both kings on their
/// original squares
pub fn demo_board() -> Board {
    let mut board = Board::empty();
    for (x, y, kind, color) in [
        (5, 5, PieceKind::Queen, Color::White),
        (3, 3, PieceKind::Pawn, Color::Black),
        (4, 0, PieceKind::King, Color::White),
        (4, 7, PieceKind::King, Color::Black),
    ] {
        board.set_piece_at(Some(Piece::new(kind, color)), Coordinate::new(x, y));
    }
    board
}

/// A backend which makes moves in a game, as requested or at random
pub struct Backend<G> {
    /// The game being played
    game: G,
    /// How random moves get picked
    rng: SmallRng,
}

impl<G: Game> Backend<G> {
    /// Create a new instance around the game, with random moves seeded by `seed` if given
    pub fn new(game: G, seed: Option<u64>) -> Self {
        Self {
            game,
            rng: seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64),
        }
    }

    /// Get the game as it is right now
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Make the requested move, if it is legal
    pub fn play_move(&mut self, from: Coordinate, to: Coordinate) -> Result<Move, G::Err> {
        self.game.perform_move(from, to)
    }

    /// Make a random legal move for the side to move, if there is any
    pub fn play_random_move(&mut self) -> Result<Option<Move>, G::Err> {
        let moves = self.game.legal_moves()?;
        let Some(&mv) = moves.choose(&mut self.rng) else {
            return Ok(None);
        };
        self.game.perform_move(mv.from, mv.to).map(Some)
    }

    /// Make random moves until the game ends, or until `max_plies` moves were made
    pub fn play_random_game(&mut self, max_plies: usize) -> Result<Option<GameOutcome>, G::Err> {
        for _ in 0..max_plies {
            if let Some(outcome) = self.game.outcome()? {
                return Ok(Some(outcome));
            }
            if self.play_random_move()?.is_none() {
                break;
            }
        }
        self.game.outcome()
    }
}
