// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use hashbrown::HashMap;

use crate::board::{rook_file, Board};
use crate::moves::{LegalMove, Move};
use crate::position_key::PositionKey;
use crate::types::{CastleStatus, Color, PieceKind, Square};

/// Everything a commit changes, captured before the commit so that undo can
/// restore it wholesale.
#[derive(Clone, Debug)]
struct Snapshot {
    board: Board,
    side_to_move: Color,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    position_counts: HashMap<PositionKey, u32>,
}

/// The mutable root of a game: the board, the side to move, castling rights,
/// the en passant target, both clocks, repetition counts and the undo
/// history. `commit` and `undo` are the only operations that change it.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    position_counts: HashMap<PositionKey, u32>,
    history: Vec<Snapshot>,
}

//
// Construction and state getters
//

impl GameState {
    /// A new game from the standard starting position.
    pub fn new() -> GameState {
        GameState::from_parts(
            Board::initial(),
            Color::White,
            CastleStatus::all(),
            None,
            0,
            1,
        )
    }

    /// Builds a game from its parts, counting the given position once.
    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castle_status: CastleStatus,
        en_passant_square: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> GameState {
        let mut game = GameState {
            board,
            side_to_move,
            castle_status,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
            position_counts: HashMap::new(),
            history: Vec::new(),
        };

        game.record_position();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of commits that can currently be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey::new(
            &self.board,
            self.side_to_move,
            self.castle_status,
            self.en_passant_square,
        )
    }

    /// How many times the current position has occurred in this game.
    pub fn repetition_count(&self) -> u32 {
        self.position_counts
            .get(&self.position_key())
            .copied()
            .unwrap_or(0)
    }

    /// The square of the given side's king. A missing king means a move was
    /// applied incorrectly somewhere, so it is treated as fatal.
    pub fn king_square(&self, color: Color) -> Square {
        match self.board.find_king(color) {
            Some(square) => square,
            None => panic!("invariant violated: no {:?} king on the board", color),
        }
    }

    /// A copy of this game without its undo history, for simulating moves
    /// during search. Repetition counts are kept.
    pub fn fork(&self) -> GameState {
        GameState {
            board: self.board,
            side_to_move: self.side_to_move,
            castle_status: self.castle_status,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            position_counts: self.position_counts.clone(),
            history: Vec::new(),
        }
    }

    fn record_position(&mut self) {
        let key = self.position_key();
        *self.position_counts.entry(key).or_insert(0) += 1;
    }
}

//
// Commit and undo
//

impl GameState {
    /// Plays a legal move. All of the move's effects become visible at once:
    /// the prior state is pushed onto the history, then castling rights, the
    /// board, the en passant square, both clocks and the side to move are
    /// updated, and the resulting position is counted.
    pub fn commit(&mut self, legal: LegalMove) {
        let mov = *legal.mov();
        debug_assert_eq!(mov.color(), self.side_to_move);

        self.history.push(self.snapshot());
        self.update_castle_status(&mov);
        self.board.apply_move(&mov, legal.promotion());

        // Only a double step leaves an en passant square behind, on the square
        // the pawn passed over.
        self.en_passant_square = if mov.is_double_pawn_push() {
            mov.source().offset(mov.color().pawn_direction(), 0)
        } else {
            None
        };

        if mov.piece().kind == PieceKind::Pawn || mov.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.side_to_move = mov.color().toggle();
        if mov.color() == Color::Black {
            self.fullmove_number += 1;
        }

        self.record_position();
        debug!("committed {}: {}", legal, self.as_fen());
    }

    /// Undoes up to `steps` commits, restoring each prior state wholesale.
    /// Returns how many were actually undone, which is less than `steps` when
    /// the history runs out.
    pub fn undo(&mut self, steps: usize) -> usize {
        let mut undone = 0;
        while undone < steps {
            match self.history.pop() {
                Some(snapshot) => self.restore(snapshot),
                None => break,
            }

            undone += 1;
        }

        debug!("undid {} of {} requested plies", undone, steps);
        undone
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            side_to_move: self.side_to_move,
            castle_status: self.castle_status,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            position_counts: self.position_counts.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.side_to_move = snapshot.side_to_move;
        self.castle_status = snapshot.castle_status;
        self.en_passant_square = snapshot.en_passant_square;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
        self.position_counts = snapshot.position_counts;
    }

    fn update_castle_status(&mut self, mov: &Move) {
        let color = mov.color();
        match mov.piece().kind {
            // Moving a king forfeits both sides for good.
            PieceKind::King => self.castle_status.remove(CastleStatus::both(color)),
            PieceKind::Rook => self
                .castle_status
                .remove(rook_home_rights(color, mov.source())),
            _ => {}
        }

        if let (Some(captured), Some(square)) = (mov.captured(), mov.capture_square()) {
            if captured.kind == PieceKind::Rook {
                self.castle_status
                    .remove(rook_home_rights(captured.color, square));
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

/// The castling right tied to a rook of `color` standing on `square`, if that
/// square is one of the rook home squares.
fn rook_home_rights(color: Color, square: Square) -> CastleStatus {
    let rank = color.back_rank();
    if square == Square::of(rank, rook_file(true)) {
        CastleStatus::kingside(color)
    } else if square == Square::of(rank, rook_file(false)) {
        CastleStatus::queenside(color)
    } else {
        CastleStatus::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::types::{Color, PieceKind, Square};

    fn play(game: &mut GameState, token: &str) {
        game.apply_uci_move(token)
            .unwrap_or_else(|e| panic!("{} rejected: {:?}", token, e));
    }

    #[test]
    fn new_game_state() {
        let game = GameState::new();
        assert_eq!(Color::White, game.side_to_move());
        assert_eq!(0, game.halfmove_clock());
        assert_eq!(1, game.fullmove_number());
        assert_eq!(1, game.repetition_count());
        assert_eq!(0, game.history_len());
        assert!(game.can_castle_kingside(Color::Black));
    }

    #[test]
    fn smoke_test_opening_pawn() {
        let mut game = GameState::new();
        play(&mut game, "e2e3");

        assert_eq!(Color::Black, game.side_to_move());
        // the fullmove number only moves after Black plays.
        assert_eq!(1, game.fullmove_number());
        assert_eq!(0, game.halfmove_clock());
        assert_eq!(None, game.en_passant_square());
        assert!(game.board().is_empty(Square::E2));
        assert_eq!(
            Some(PieceKind::Pawn),
            game.board().piece_at(Square::E3).map(|p| p.kind)
        );
    }

    #[test]
    fn double_pawn_push_sets_ep() {
        let mut game = GameState::new();
        play(&mut game, "e2e4");
        assert_eq!(Some(Square::E3), game.en_passant_square());
        play(&mut game, "g8f6");
        assert_eq!(None, game.en_passant_square());
        assert_eq!(1, game.halfmove_clock());
        assert_eq!(2, game.fullmove_number());
    }

    #[test]
    fn undo_restores_everything() {
        let mut game = GameState::new();
        let start = game.clone();
        play(&mut game, "e2e4");

        assert_eq!(1, game.undo(1));
        assert_eq!(start.as_fen(), game.as_fen());
        assert_eq!(start.board(), game.board());
        assert_eq!(1, game.repetition_count());
    }

    #[test]
    fn undo_multiple_moves() {
        let mut game = GameState::new();
        play(&mut game, "e2e4");
        play(&mut game, "e7e5");
        play(&mut game, "g1f3");

        assert_eq!(2, game.undo(2));
        assert_eq!(Color::Black, game.side_to_move());
        assert!(game.board().piece_at(Square::E4).is_some());
        assert!(game.board().is_empty(Square::E5));
    }

    #[test]
    fn undo_past_history_reports_actual_count() {
        let mut game = GameState::new();
        assert_eq!(0, game.undo(1));
        play(&mut game, "d2d4");
        assert_eq!(1, game.undo(5));
        assert_eq!(0, game.history_len());
    }

    #[test]
    fn fork_drops_history_but_keeps_counts() {
        let mut game = GameState::new();
        play(&mut game, "g1f3");
        let fork = game.fork();
        assert_eq!(0, fork.history_len());
        assert_eq!(game.as_fen(), fork.as_fen());
        assert_eq!(game.repetition_count(), fork.repetition_count());
    }

    #[test]
    fn moving_king_castle_status() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        play(&mut game, "e1e2");
        assert!(!game.can_castle_kingside(Color::White));
        assert!(!game.can_castle_queenside(Color::White));
    }

    #[test]
    fn moving_rooks_castle_status() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        play(&mut game, "h1g1");
        assert!(!game.can_castle_kingside(Color::White));
        assert!(game.can_castle_queenside(Color::White));

        play(&mut game, "e8d8");
        play(&mut game, "a1b1");
        assert!(!game.can_castle_queenside(Color::White));
    }

    #[test]
    fn rook_capture_castle_status() {
        // the rook on h1 is captured on its home square; a different rook
        // arriving there later does not bring the right back.
        let mut game = GameState::from_fen("4k3/8/8/8/8/7r/4P3/R3K2R b KQ - 0 1").unwrap();
        play(&mut game, "h3h1");
        assert!(!game.can_castle_kingside(Color::White));
        assert!(game.can_castle_queenside(Color::White));
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn missing_king_is_fatal() {
        let game = GameState::new();
        let mut board = *game.board();
        board.clear(Square::E1);
        let broken = GameState::from_parts(
            board,
            Color::White,
            game.castle_status(),
            None,
            0,
            1,
        );
        broken.king_square(Color::White);
    }
}
