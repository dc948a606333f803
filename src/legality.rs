// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The move builder and legality pipeline.
//!
//! A coordinate pair becomes a `Move` through `build_move`, which handles the
//! structural rules (ownership, captures, en passant, castling eligibility,
//! promotion flagging). A built move is then simulated on a scratch board and
//! rejected if it leaves the mover's king attacked. Everything that produces
//! a `LegalMove` goes through both stages.
use std::error::Error;
use std::fmt;

use crate::attacks::is_square_attacked;
use crate::board::rook_file;
use crate::game::GameState;
use crate::movement::{can_move, pawn_attacks};
use crate::moves::{LegalMove, Move, MoveKind};
use crate::types::{Color, File, Piece, PieceKind, Square, PROMOTION_CHOICES};

/// Reasons a textual or coordinate move can be rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The text could not be parsed as a move token or square.
    Malformed,
    /// The move is not legal in the current position.
    Illegal,
    /// The move promotes a pawn but no promotion piece was given.
    PromotionRequired,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MoveError::Malformed => write!(f, "malformed move"),
            MoveError::Illegal => write!(f, "illegal move"),
            MoveError::PromotionRequired => write!(f, "move requires a promotion piece"),
        }
    }
}

impl Error for MoveError {}

//
// Structural validation
//

impl GameState {
    /// Turns a coordinate pair into a fully described move, or None if the
    /// move is structurally invalid. If `color` is given, the source must
    /// hold a piece of that color. The result is not yet checked for
    /// self-check; see `leaves_king_in_check`.
    pub fn build_move(&self, from: Square, to: Square, color: Option<Color>) -> Option<Move> {
        if from == to {
            return None;
        }

        let board = self.board();
        let piece = board.piece_at(from)?;
        if color.map_or(false, |c| c != piece.color) {
            return None;
        }

        let target = board.piece_at(to);
        if let Some(target) = target {
            if target.color == piece.color || target.kind == PieceKind::King {
                return None;
            }
        }

        match piece.kind {
            PieceKind::Pawn => self.build_pawn_move(from, to, piece, target),
            PieceKind::King if from.rank() == to.rank() && file_distance(from, to) == 2 => {
                self.build_castle(from, to, piece)
            }
            _ if can_move(board, piece, from, to) => Some(Move::normal(from, to, piece, target)),
            _ => None,
        }
    }

    fn build_pawn_move(
        &self,
        from: Square,
        to: Square,
        piece: Piece,
        target: Option<Piece>,
    ) -> Option<Move> {
        let mov = if can_move(self.board(), piece, from, to) {
            Move::normal(from, to, piece, target)
        } else if self.is_en_passant_capture(from, to, piece) {
            Move::en_passant(from, to, piece)
        } else {
            return None;
        };

        if to.rank() == piece.color.promotion_rank() {
            Some(mov.requiring_promotion())
        } else {
            Some(mov)
        }
    }

    fn is_en_passant_capture(&self, from: Square, to: Square, piece: Piece) -> bool {
        if self.en_passant_square() != Some(to) {
            return false;
        }

        if !pawn_attacks(piece.color, from, to) || !self.board().is_empty(to) {
            return false;
        }

        let victim = Piece::new(PieceKind::Pawn, piece.color.toggle());
        self.board().piece_at(Square::of(from.rank(), to.file())) == Some(victim)
    }

    /// Castling eligibility: the king stands on its home square and is not in
    /// check, the right is intact, the rook is home, the squares between them
    /// are empty and no square the king crosses is attacked.
    fn build_castle(&self, from: Square, to: Square, piece: Piece) -> Option<Move> {
        let color = piece.color;
        let rank = color.back_rank();
        if from != Square::of(rank, File::E) {
            return None;
        }

        let kingside = to.file() == File::G;
        let (kind, empty, transit): (MoveKind, &[File], &[File]) = if kingside {
            if !self.can_castle_kingside(color) {
                return None;
            }

            (MoveKind::KingsideCastle, &KINGSIDE_EMPTY[..], &KINGSIDE_TRANSIT[..])
        } else if to.file() == File::C {
            if !self.can_castle_queenside(color) {
                return None;
            }

            (MoveKind::QueensideCastle, &QUEENSIDE_EMPTY[..], &QUEENSIDE_TRANSIT[..])
        } else {
            return None;
        };

        let board = self.board();
        let rook = Piece::new(PieceKind::Rook, color);
        if board.piece_at(Square::of(rank, rook_file(kingside))) != Some(rook) {
            return None;
        }

        if empty.iter().any(|&file| !board.is_empty(Square::of(rank, file))) {
            return None;
        }

        if self.is_check(color) {
            return None;
        }

        let opponent = color.toggle();
        if transit
            .iter()
            .any(|&file| is_square_attacked(board, Square::of(rank, file), opponent))
        {
            return None;
        }

        Some(Move::castle(from, to, piece, kind))
    }
}

static KINGSIDE_EMPTY: [File; 2] = [File::F, File::G];
static KINGSIDE_TRANSIT: [File; 2] = [File::F, File::G];
static QUEENSIDE_EMPTY: [File; 3] = [File::B, File::C, File::D];
static QUEENSIDE_TRANSIT: [File; 2] = [File::D, File::C];

fn file_distance(from: Square, to: Square) -> i32 {
    (to.file() as i32 - from.file() as i32).abs()
}

//
// Self-check rejection and enumeration
//

impl GameState {
    /// Simulates `mov` on a scratch copy of the board, exactly as commit
    /// would apply it, and returns whether the mover's king is then attacked.
    pub fn leaves_king_in_check(&self, mov: &Move, promotion: Option<PieceKind>) -> bool {
        let mut scratch = *self.board();
        scratch.apply_move(mov, promotion);
        let color = mov.color();
        match scratch.find_king(color) {
            Some(king) => is_square_attacked(&scratch, king, color.toggle()),
            None => panic!("invariant violated: {:?} king missing after {}", color, mov),
        }
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        self.legal_moves_for(self.side_to_move())
    }

    /// All legal moves for `color`, in source-then-destination square order.
    /// A promoting move appears once per promotion choice that keeps the
    /// king safe, in bishop, knight, queen, rook order.
    pub fn legal_moves_for(&self, color: Color) -> Vec<LegalMove> {
        let mut moves = Vec::new();
        self.visit_legal_moves(color, |legal| {
            moves.push(legal);
            true
        });
        moves
    }

    /// Whether `color` has at least one legal move. Stops at the first one.
    pub fn has_any_legal_move(&self, color: Color) -> bool {
        let mut found = false;
        self.visit_legal_moves(color, |_| {
            found = true;
            false
        });
        found
    }

    /// Feeds every legal move for `color` to `visit` until it returns false.
    fn visit_legal_moves<F>(&self, color: Color, mut visit: F)
    where
        F: FnMut(LegalMove) -> bool,
    {
        let sources: Vec<Square> = self.board().pieces_of(color).map(|(sq, _)| sq).collect();
        for from in sources {
            for to in Square::all() {
                let mov = match self.build_move(from, to, Some(color)) {
                    Some(mov) => mov,
                    None => continue,
                };

                if mov.requires_promotion() {
                    for &choice in &PROMOTION_CHOICES {
                        if !self.leaves_king_in_check(&mov, Some(choice))
                            && !visit(LegalMove::new(mov, Some(choice)))
                        {
                            return;
                        }
                    }
                } else if !self.leaves_king_in_check(&mov, None)
                    && !visit(LegalMove::new(mov, None))
                {
                    return;
                }
            }
        }
    }

    /// Runs the full pipeline on a coordinate pair for the side to move.
    /// A promoting move needs a promotion choice; a non-promoting move must
    /// not be given one.
    pub fn legalize(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<LegalMove, MoveError> {
        let mov = self
            .build_move(from, to, Some(self.side_to_move()))
            .ok_or(MoveError::Illegal)?;

        let promotion = match (mov.requires_promotion(), promotion) {
            (true, None) => return Err(MoveError::PromotionRequired),
            (true, Some(kind)) if kind.is_promotion_choice() => Some(kind),
            (false, None) => None,
            _ => return Err(MoveError::Illegal),
        };

        if self.leaves_king_in_check(&mov, promotion) {
            return Err(MoveError::Illegal);
        }

        Ok(LegalMove::new(mov, promotion))
    }
}

//
// Move tokens and coordinate entry
//

/// Splits a move token into its squares and optional promotion piece.
/// Tokens are trimmed and case-insensitive.
pub fn parse_uci_move(token: &str) -> Result<(Square, Square, Option<PieceKind>), MoveError> {
    let token = token.trim().to_ascii_lowercase();
    if !token.is_ascii() || (token.len() != 4 && token.len() != 5) {
        return Err(MoveError::Malformed);
    }

    let from: Square = token[0..2].parse().map_err(|_| MoveError::Malformed)?;
    let to: Square = token[2..4].parse().map_err(|_| MoveError::Malformed)?;
    let promotion = match token[4..].chars().next() {
        Some(c) => Some(PieceKind::from_promotion_char(c).ok_or(MoveError::Malformed)?),
        None => None,
    };

    Ok((from, to, promotion))
}

impl GameState {
    /// Parses a move token and runs it through the legality pipeline.
    pub fn legalize_uci(&self, token: &str) -> Result<LegalMove, MoveError> {
        let (from, to, promotion) = parse_uci_move(token)?;
        self.legalize(from, to, promotion)
    }

    /// The legal move a token names in the current position, if any.
    pub fn move_from_uci(&self, token: &str) -> Option<LegalMove> {
        self.legalize_uci(token).ok()
    }

    /// Parses, validates and commits a move token.
    pub fn apply_uci_move(&mut self, token: &str) -> Result<LegalMove, MoveError> {
        let legal = self.legalize_uci(token)?;
        self.commit(legal);
        Ok(legal)
    }

    /// Validates and commits a move given by its squares.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<LegalMove, MoveError> {
        let legal = self.legalize(from, to, promotion)?;
        self.commit(legal);
        Ok(legal)
    }
}
