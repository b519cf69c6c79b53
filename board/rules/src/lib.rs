use board::{
    Board, BoardState, Color, Coordinate, EnPassantTarget, Game, InvalidColor, Move, MoveKind,
    Piece, PieceKind, Position, SIZE,
};

mod movement;
mod validation;

pub use crate::{
    movement::{Movement, CASTLING_DISTANCE},
    validation::{generate_move, king_origin, Validation, KING_FILE},
};
use crate::validation::{castling_rook_destination, castling_rook_square};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Why a move breaks the rules, not counting check
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("the square {0} is out of the board")]
    OffBoard(Coordinate),
    #[error("the start square {0} is empty")]
    EmptySource(Coordinate),
    #[error("next color to perform a move is {0}")]
    WrongSide(Color),
    #[error("the piece can't get to {0} with this kind of move")]
    OutOfPattern(Coordinate),
    #[error("not attempted to capture, but there is a piece on {0}")]
    DestinationOccupied(Coordinate),
    #[error("attempted to capture on {0}, but no piece there to be captured")]
    NothingToCapture(Coordinate),
    #[error("attempted to capture own piece on {0}")]
    OwnPiece(Coordinate),
    #[error("given move is blocked by another piece")]
    Blocked,
    #[error("attempted castle not allowed in current board state")]
    IllegalCastle,
    #[error("attempted en passant not allowed in current board state")]
    IllegalEnPassant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("attempted move leaves the moving side's king in check")]
    KingInCheck,
    #[error("there is no {0} king on the board")]
    NoKing(Color),
    #[error(transparent)]
    InvalidColor(#[from] InvalidColor),
}

impl Error {
    /// Whether this only means the requested move can't be made, as opposed to the board being
    /// broken
    pub const fn is_invalid_move(&self) -> bool {
        matches!(self, Self::InvalidMove(_) | Self::KingInCheck)
    }
}

/// The pieces on the home ranks, from the `a` file to the `h` file
const BACK_RANK: [PieceKind; SIZE as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// How many moves in a row without a capture or a pawn move draw the game
const FIFTY_MOVE_WINDOW: usize = 100;

/// How many times the current position has to turn up while replaying the moves since the last
/// irreversible one, counting itself, to draw the game
const REPETITIONS_FOR_DRAW: usize = 2;

/// The position at the start of a game
pub fn initial_position() -> Position {
    let mut position = Position::EMPTY;
    for (x, kind) in (0..).zip(BACK_RANK) {
        for color in [Color::White, Color::Black] {
            let home = color.home_rank();
            position.set_piece_at(Some(Piece::new(kind, color)), Coordinate::new(x, home));
            position.set_piece_at(
                Some(Piece::new(PieceKind::Pawn, color)),
                Coordinate::new(x, home + color.forward()),
            );
        }
    }
    position
}

/// Returns whether any piece of color `by` could capture on `square`
fn is_attacked(position: &Position, square: Coordinate, by: Color) -> bool {
    position.pieces(by).any(|(from, piece)| {
        piece.possible_capture_moves(from).has(square)
            && piece.is_the_way_free(position, from, square)
    })
}

/// Returns whether the king of the given color is attacked
fn king_in_check(position: &Position, color: Color) -> Result<bool> {
    let king = position.find_king(color).ok_or(Error::NoKing(color))?;
    Ok(is_attacked(position, king, color.other()))
}

/// Referees a game on one board: every move goes through here to be checked, carried out and
/// recorded
#[derive(Clone, Debug)]
pub struct BoardManager {
    board: Board,
    /// The position the history is replayed onto
    origin: Position,
    /// How many moves of the history were already on the board when it was handed over, and so
    /// can't be replayed
    origin_moves: usize,
}

impl BoardManager {
    /// Create a new game in the initial position
    pub fn new() -> Self {
        Self::from_board(Board::from_position(initial_position()))
    }

    /// Create a game by making the given moves from the initial position.
    ///
    /// The moves are trusted and not validated.
    pub fn from_moves(moves: impl IntoIterator<Item = Move>) -> Self {
        let mut manager = Self::new();
        for mv in moves {
            manager.add_move(mv);
        }
        manager
    }

    /// Take over an arbitrary board, with whatever history it already has
    pub fn from_board(board: Board) -> Self {
        Self {
            origin: *board.position(),
            origin_moves: board.history().len(),
            board,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Validate the move and, if it is legal, carry it out
    pub fn perform_move(&mut self, from: Coordinate, to: Coordinate) -> Result<Move> {
        let mv = self.validate_move(from, to)?;
        self.add_move(mv);
        Ok(mv)
    }

    /// Returns the move of the piece on `from` to `to`, if it is legal for the side to move
    ///
    /// The board is left as it is either way.
    pub fn validate_move(&self, from: Coordinate, to: Coordinate) -> Result<Move> {
        for square in [from, to] {
            if !square.is_valid() {
                return Err(InvalidMove::OffBoard(square).into());
            }
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(InvalidMove::EmptySource(from))?;
        let side = self.board.side_to_move();
        if piece.color != side {
            return Err(InvalidMove::WrongSide(side).into());
        }

        let mv = generate_move(&self.board, from, to)?;
        mv.validate(&self.board)?;

        if mv.kind == MoveKind::Castling {
            self.check_castling_path(&mv)?;
        } else if king_in_check(&self.simulate(&mv), side)? {
            return Err(Error::KingInCheck);
        }
        Ok(mv)
    }

    /// Returns whether the king of the given color is attacked right now
    pub fn is_king_in_check(&self, color: Color) -> Result<bool> {
        king_in_check(self.board.position(), color)
    }

    /// Every legal move for the side to move
    pub fn legal_moves(&self) -> Result<Vec<Move>> {
        let mut moves = Vec::new();
        for candidate in self.candidate_moves() {
            match candidate {
                Ok(mv) => moves.push(mv),
                Err(err) if err.is_invalid_move() => {}
                Err(err) => return Err(err),
            }
        }
        Ok(moves)
    }

    /// Returns whether the side to move has any legal move at all
    pub fn is_any_move_valid(&self) -> Result<bool> {
        for candidate in self.candidate_moves() {
            match candidate {
                Ok(_) => return Ok(true),
                Err(err) if err.is_invalid_move() => {}
                Err(err) => return Err(err),
            }
        }
        Ok(false)
    }

    /// Work out the state of the side to move and store it on the board
    pub fn update_board_state(&mut self) -> Result<BoardState> {
        let side = self.board.side_to_move();
        let in_check = self.is_king_in_check(side)?;
        let can_move = self.is_any_move_valid()?;
        let state = match (in_check, can_move) {
            (true, true) => BoardState::Check,
            (true, false) => BoardState::CheckMate,
            (false, true) => BoardState::Regular,
            (false, false) => BoardState::StaleMate,
        };
        self.board.set_state(state);
        Ok(state)
    }

    /// Returns whether the current position came up again since the last capture, castle or en
    /// passant
    ///
    /// The position after each move from that one onwards is compared with the current one.
    /// Moves made before the board was handed over are never replayed.
    pub fn check_threefold_repetition_rule(&self) -> bool {
        let history = self.board.history();
        let window_start = history
            .iter()
            .rposition(|mv| mv.kind.is_irreversible())
            .unwrap_or(0)
            .max(self.origin_moves);

        let current = self.board.position();
        let mut shadow = self.replay_until(window_start);
        let mut occurrences = 0;
        for mv in &history[window_start..] {
            shadow.add_move(*mv);
            if shadow.board.position() == current {
                occurrences += 1;
            }
        }
        occurrences >= REPETITIONS_FOR_DRAW
    }

    /// Returns whether the last hundred moves were made without a capture or a pawn moving
    pub fn check_fifty_move_rule(&self) -> bool {
        let history = self.board.history();
        history.len() >= FIFTY_MOVE_WINDOW
            && history[history.len() - FIFTY_MOVE_WINDOW..]
                .iter()
                .all(|mv| mv.kind == MoveKind::Attack && !mv.piece.is_pawn())
    }

    /// Carry out the move on the board and record it, without checking it
    fn add_move(&mut self, mv: Move) {
        let victim = match mv.kind {
            MoveKind::EnPassant => self.en_passant_victim(),
            _ => None,
        };
        let position = self.board.position_mut();

        let moved = position.take_piece_at(mv.from);
        if let Some(piece) = moved {
            position.set_piece_at(Some(piece), mv.to);
        }
        if mv.kind == MoveKind::Castling {
            if let Some(rook) = position.take_piece_at(castling_rook_square(&mv)) {
                position.set_piece_at(Some(rook), castling_rook_destination(&mv));
            }
        }
        if let Some(victim) = victim {
            position.set_piece_at(None, victim);
        }

        let mut en_passant = None;
        if let Some(pawn) = moved.filter(|piece| piece.is_pawn()) {
            let kind = if mv.to.y == 0 || mv.to.y == SIZE - 1 {
                PieceKind::Queen
            } else {
                PieceKind::PawnAfterFirstMove
            };
            position.set_piece_at(Some(Piece::new(kind, pawn.color)), mv.to);

            let double_step = mv.from.x == mv.to.x && mv.from.y.abs_diff(mv.to.y) == 2;
            let skipped = Coordinate::new(mv.from.x, (mv.from.y + mv.to.y) / 2);
            // A pawn that hopped over a piece leaves no target behind
            if mv.kind == MoveKind::Attack && double_step && position.is_vacant(skipped) {
                en_passant = Some(EnPassantTarget {
                    square: skipped,
                    color: pawn.color,
                });
            }
        }
        position.set_en_passant(en_passant);

        self.board.record(mv);
    }

    /// The position right after the move, as far as the safety of the kings goes
    fn simulate(&self, mv: &Move) -> Position {
        let mut position = *self.board.position();
        if let Some(piece) = position.take_piece_at(mv.from) {
            position.set_piece_at(Some(piece), mv.to);
        }
        if mv.kind == MoveKind::EnPassant {
            if let Some(victim) = self.en_passant_victim() {
                position.set_piece_at(None, victim);
            }
        }
        position
    }

    /// Checks the king isn't castling out of, through or into check
    fn check_castling_path(&self, mv: &Move) -> Result<()> {
        let color = mv.piece.color;
        let position = self.board.position();
        if king_in_check(position, color)? {
            return Err(Error::KingInCheck);
        }
        let step = (mv.to.x - mv.from.x).signum();
        let mut square = mv.from;
        while square != mv.to {
            square = square.offset(step, 0);
            let mut crossing = *position;
            crossing.set_piece_at(None, mv.from);
            crossing.set_piece_at(Some(mv.piece), square);
            if king_in_check(&crossing, color)? {
                return Err(Error::KingInCheck);
            }
        }
        Ok(())
    }

    /// Where the pawn that can be taken en passant stands: wherever the last move ended
    fn en_passant_victim(&self) -> Option<Coordinate> {
        match self.board.history().last() {
            Some(last) => Some(last.to),
            None => self
                .board
                .position()
                .en_passant()
                .map(|target| target.pawn_square()),
        }
    }

    /// Every move of a piece of the side to move onto any square, validated
    fn candidate_moves(&self) -> impl Iterator<Item = Result<Move>> + '_ {
        let side = self.board.side_to_move();
        self.board.position().pieces(side).flat_map(move |(from, _)| {
            Coordinate::all_squares().map(move |to| self.validate_move(from, to))
        })
    }

    /// A new manager on the origin, with the first `len` moves of the history replayed
    fn replay_until(&self, len: usize) -> Self {
        let history = self.board.history();
        let mut board = Board::from_position(self.origin);
        for mv in &history[..self.origin_moves] {
            board.record(*mv);
        }
        let mut shadow = Self::from_board(board);
        for mv in &history[self.origin_moves..len] {
            shadow.add_move(*mv);
        }
        shadow
    }
}

impl Default for BoardManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for BoardManager {
    type Err = Error;

    fn initial_state() -> Self {
        Self::new()
    }

    fn from_board(board: Board) -> Self {
        BoardManager::from_board(board)
    }

    fn from_move_sequence(moves: impl IntoIterator<Item = Move>) -> Self {
        Self::from_moves(moves)
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn legal_moves(&self) -> Result<Vec<Move>> {
        BoardManager::legal_moves(self)
    }

    fn perform_move(&mut self, from: Coordinate, to: Coordinate) -> Result<Move> {
        BoardManager::perform_move(self, from, to)
    }

    fn update_board_state(&mut self) -> Result<BoardState> {
        BoardManager::update_board_state(self)
    }

    fn check_threefold_repetition_rule(&self) -> bool {
        BoardManager::check_threefold_repetition_rule(self)
    }

    fn check_fifty_move_rule(&self) -> bool {
        BoardManager::check_fifty_move_rule(self)
    }
}
