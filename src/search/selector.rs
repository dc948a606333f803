// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use crate::eval::{BoardEvaluator, MaterialEvaluator};
use crate::game::GameState;
use crate::moves::LegalMove;
use crate::search::{Level, MoveDelegate, Provenance, Selection, SelectorConfig};

/// Promotion value counts for a fifth of a capture of the same piece. Scores
/// are kept in tenths so they stay integral.
const CAPTURE_WEIGHT: i32 = 10;
const PROMOTION_WEIGHT: i32 = 2;

/// Chooses a move for the side to move, or None if it has no legal moves.
///
/// When `config.use_delegate` is set and a delegate is given, its suggestion
/// is used verbatim if it names a legal move. Otherwise the tier for
/// `config.level` runs. Ties are broken with `rng`.
pub fn choose_move<R: Rng + ?Sized>(
    game: &GameState,
    config: &SelectorConfig,
    delegate: Option<&dyn MoveDelegate>,
    rng: &mut R,
) -> Option<Selection> {
    if config.use_delegate {
        if let Some(delegate) = delegate {
            let fen = game.as_fen();
            match delegate.suggest(&fen, &config.budget) {
                Some(ref token) if game.move_from_uci(token).is_some() => {
                    info!("delegate chose {}", token);
                    return Some(Selection::new(token.as_str(), Provenance::Delegate));
                }
                Some(token) => warn!("delegate suggested unusable move {:?} for {}", token, fen),
                None => warn!("delegate had no suggestion for {}", fen),
            }
        }
    }

    let selection = match config.level {
        Level::Easy => select_easy(game, rng),
        Level::Hard => select_hard(game, rng),
        Level::VeryHard => select_very_hard(game, rng),
    };

    if let Some(ref selection) = selection {
        info!("{} tier chose {}", selection.provenance, selection.token);
    }

    selection
}

/// Uniformly random among all legal moves.
pub fn select_easy<R: Rng + ?Sized>(game: &GameState, rng: &mut R) -> Option<Selection> {
    let moves = game.legal_moves();
    debug!("easy: {} candidates", moves.len());
    moves
        .choose(rng)
        .map(|legal| Selection::new(legal.to_uci(), Provenance::Easy))
}

/// Greedy on material won this ply: the captured piece's value plus a fifth
/// of the promoted piece's value. No lookahead.
pub fn select_hard<R: Rng + ?Sized>(game: &GameState, rng: &mut R) -> Option<Selection> {
    let moves = game.legal_moves();
    debug!("hard: {} candidates", moves.len());
    let scored: Vec<(String, i32)> = moves
        .iter()
        .map(|legal| (legal.to_uci(), immediate_gain(legal)))
        .collect();

    pick_best(scored, rng).map(|token| Selection::new(token, Provenance::Hard))
}

fn immediate_gain(legal: &LegalMove) -> i32 {
    let captured = legal.mov().captured().map_or(0, |piece| piece.kind.value());
    let promoted = legal.promotion().map_or(0, |kind| kind.value());
    CAPTURE_WEIGHT * captured + PROMOTION_WEIGHT * promoted
}

/// One ply for us and one for the opponent, scored by `MaterialEvaluator`.
pub fn select_very_hard<R: Rng + ?Sized>(game: &GameState, rng: &mut R) -> Option<Selection> {
    select_very_hard_with::<MaterialEvaluator, R>(game, rng)
}

/// Every candidate is simulated, every opponent reply to it is simulated,
/// and the candidate is worth the worst resulting score from the mover's
/// point of view (or the score of the position itself if there are no
/// replies). The best candidate wins; if no candidate could be simulated,
/// this falls back to the hard tier.
///
/// Candidates are evaluated in parallel. The tie-break only ever sees the
/// complete candidate list in enumeration order.
pub fn select_very_hard_with<E, R>(game: &GameState, rng: &mut R) -> Option<Selection>
where
    E: BoardEvaluator,
    R: Rng + ?Sized,
{
    let moves = game.legal_moves();
    if moves.is_empty() {
        return None;
    }

    let evaluator = E::default();
    let perspective = game.side_to_move();
    let scored: Vec<(String, i32)> = moves
        .par_iter()
        .filter_map(|legal| {
            let token = legal.to_uci();
            let mut sim = game.fork();
            sim.apply_uci_move(&token).ok()?;
            let replies = sim.legal_moves();
            let worst = replies
                .iter()
                .filter_map(|reply| {
                    let mut after_reply = sim.fork();
                    after_reply.apply_uci_move(&reply.to_uci()).ok()?;
                    Some(evaluator.evaluate(&after_reply, perspective))
                })
                .min();

            let score = worst.unwrap_or_else(|| evaluator.evaluate(&sim, perspective));
            Some((token, score))
        })
        .collect();

    debug!(
        "very hard: {} of {} candidates simulated",
        scored.len(),
        moves.len()
    );

    match pick_best(scored, rng) {
        Some(token) => Some(Selection::new(token, Provenance::VeryHard)),
        None => {
            warn!("no candidate survived simulation, falling back to hard tier");
            select_hard(game, rng)
        }
    }
}

/// Uniformly random among the maximal-score entries.
fn pick_best<R: Rng + ?Sized>(scored: Vec<(String, i32)>, rng: &mut R) -> Option<String> {
    let best = scored.iter().map(|&(_, score)| score).max()?;
    let ties: Vec<String> = scored
        .into_iter()
        .filter(|&(_, score)| score == best)
        .map(|(token, _)| token)
        .collect();

    ties.choose(rng).cloned()
}
