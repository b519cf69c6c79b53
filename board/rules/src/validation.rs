//! Classifying a requested move, and checking it against the rules of its kind
//!
//! None of this looks at check: a move that passes here may still leave the mover's king
//! attacked, which is for [`BoardManager`](crate::BoardManager) to find out.

use board::{Bitboard, Board, Color, Coordinate, Move, MoveKind, PieceKind, SIZE};

use crate::{
    movement::{Movement, CASTLING_DISTANCE},
    InvalidMove,
};

/// The file kings start on, which is the only file they can castle from
pub const KING_FILE: i8 = 4;

/// Work out what kind of move taking the piece on `from` to `to` would be
///
/// The returned move carries a snapshot of the piece on `from`, and is not yet known to be legal.
pub fn generate_move(board: &Board, from: Coordinate, to: Coordinate) -> Result<Move, InvalidMove> {
    let position = board.position();
    let piece = position.piece_at(from).ok_or(InvalidMove::EmptySource(from))?;
    let onto_en_passant = position.en_passant().is_some_and(|target| target.square == to);
    let kind = if onto_en_passant {
        MoveKind::EnPassant
    } else if position.is_vacant(to) {
        let files = to.x.abs_diff(from.x);
        if piece.kind == PieceKind::King && files == CASTLING_DISTANCE.unsigned_abs() {
            MoveKind::Castling
        } else {
            MoveKind::Attack
        }
    } else {
        MoveKind::Capture
    };
    Ok(Move::new(kind, from, to, piece))
}

/// Checking a move against the rules for its kind
pub trait Validation {
    /// Returns why this move can't be made on the board, if it can't
    fn validate(&self, board: &Board) -> Result<(), InvalidMove>;
}

impl Validation for Move {
    fn validate(&self, board: &Board) -> Result<(), InvalidMove> {
        match self.kind {
            MoveKind::Attack => validate_attack(self, board),
            MoveKind::Capture => validate_capture(self, board),
            MoveKind::Castling => validate_castling(self, board),
            MoveKind::EnPassant => validate_en_passant(self, board),
        }
    }
}

fn validate_attack(mv: &Move, board: &Board) -> Result<(), InvalidMove> {
    let reachable = if board.was_moved_from(mv.from) {
        mv.piece.possible_attack_moves(mv.from)
    } else {
        mv.piece.possible_attack_moves_for_first_move(mv.from)
    };
    if !reachable.has(mv.to) {
        return Err(InvalidMove::OutOfPattern(mv.to));
    }
    if !board.position().is_vacant(mv.to) {
        return Err(InvalidMove::DestinationOccupied(mv.to));
    }
    if !mv.piece.is_the_way_free(board.position(), mv.from, mv.to) {
        return Err(InvalidMove::Blocked);
    }
    Ok(())
}

fn validate_capture(mv: &Move, board: &Board) -> Result<(), InvalidMove> {
    if !mv.piece.possible_capture_moves(mv.from).has(mv.to) {
        return Err(InvalidMove::OutOfPattern(mv.to));
    }
    match board.piece_at(mv.to) {
        None => return Err(InvalidMove::NothingToCapture(mv.to)),
        Some(victim) if victim.color == mv.piece.color => {
            return Err(InvalidMove::OwnPiece(mv.to))
        }
        Some(_) => {}
    }
    if !mv.piece.is_the_way_free(board.position(), mv.from, mv.to) {
        return Err(InvalidMove::Blocked);
    }
    Ok(())
}

/// Only a pawn takes en passant, so the target square is off limits to everything else
fn validate_en_passant(mv: &Move, board: &Board) -> Result<(), InvalidMove> {
    if !mv.piece.is_pawn() {
        return Err(InvalidMove::IllegalEnPassant);
    }
    if !mv.piece.possible_capture_moves(mv.from).has(mv.to) {
        return Err(InvalidMove::OutOfPattern(mv.to));
    }
    match board.position().en_passant() {
        Some(target) if target.square == mv.to && target.color != mv.piece.color => Ok(()),
        _ => Err(InvalidMove::IllegalEnPassant),
    }
}

fn validate_castling(mv: &Move, board: &Board) -> Result<(), InvalidMove> {
    let color = mv.piece.color;
    if mv.piece.kind != PieceKind::King
        || mv.from != king_origin(color)
        || board.was_moved_from(mv.from)
    {
        return Err(InvalidMove::IllegalCastle);
    }
    if !mv.piece.castling_moves(mv.from).has(mv.to) {
        return Err(InvalidMove::OutOfPattern(mv.to));
    }
    let rook_square = castling_rook_square(mv);
    match board.piece_at(rook_square) {
        Some(rook)
            if rook.kind == PieceKind::Rook
                && rook.color == color
                && !board.was_moved_from(rook_square) => {}
        _ => return Err(InvalidMove::IllegalCastle),
    }
    let between = Bitboard::orthogonal_between(mv.from, rook_square);
    if between.intersects(board.position().occupied()) {
        return Err(InvalidMove::Blocked);
    }
    Ok(())
}

/// The square the king of the given color starts the game on
pub const fn king_origin(color: Color) -> Coordinate {
    Coordinate::new(KING_FILE, color.home_rank())
}

/// Where the rook taking part in a castle stands before it
pub(crate) const fn castling_rook_square(mv: &Move) -> Coordinate {
    let file = if mv.is_queenside_castle() { 0 } else { SIZE - 1 };
    Coordinate::new(file, mv.from.y)
}

/// Where the rook taking part in a castle ends up: next to the king, on the side it came from
pub(crate) const fn castling_rook_destination(mv: &Move) -> Coordinate {
    let step = if mv.is_queenside_castle() { 1 } else { -1 };
    mv.to.offset(step, 0)
}
