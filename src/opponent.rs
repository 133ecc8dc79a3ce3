//! Computer opponents.
//!
//! An opponent sees the same legal-move list a human would and picks one
//! member of it. Move quality is not a goal here; these policies exist so
//! a table can be filled and so replays are reproducible.

use log::trace;

use crate::core::rng::GameRng;
use crate::rules::RulesEngine;

/// Picks a move for the awaited player.
pub trait OpponentPolicy<E: RulesEngine>: Send + Sync {
    /// Choose a move from `engine.legal_moves(state)`.
    ///
    /// Returns `None` if no legal moves exist.
    fn choose_move(&self, engine: &E, state: &E::State, rng: &mut GameRng) -> Option<E::Move>;
}

/// Uniform random opponent.
#[derive(Clone, Debug, Default)]
pub struct UniformOpponent;

impl<E: RulesEngine> OpponentPolicy<E> for UniformOpponent {
    fn choose_move(&self, engine: &E, state: &E::State, rng: &mut GameRng) -> Option<E::Move> {
        let moves = engine.legal_moves(state);
        let choice = rng.choose(&moves).cloned();
        trace!("uniform opponent picked {:?} of {}", choice, moves.len());
        choice
    }
}

/// Always the first legal move. Deterministic without touching the RNG.
#[derive(Clone, Debug, Default)]
pub struct FirstLegalOpponent;

impl<E: RulesEngine> OpponentPolicy<E> for FirstLegalOpponent {
    fn choose_move(&self, engine: &E, state: &E::State, _rng: &mut GameRng) -> Option<E::Move> {
        engine.legal_moves(state).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mancala::{self, MancalaEngine};

    #[test]
    fn test_uniform_picks_legal_moves() {
        let engine = MancalaEngine;
        let state = mancala::initialize();
        let mut rng = GameRng::new(7);
        for _ in 0..50 {
            let mv = UniformOpponent.choose_move(&engine, &state, &mut rng).unwrap();
            assert!(engine.is_legal(&state, &mv));
        }
    }

    #[test]
    fn test_uniform_is_seed_deterministic() {
        let engine = MancalaEngine;
        let state = mancala::initialize();
        let picks = |seed| {
            let mut rng = GameRng::new(seed);
            (0..10)
                .map(|_| UniformOpponent.choose_move(&engine, &state, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(3), picks(3));
    }

    #[test]
    fn test_first_legal() {
        let engine = MancalaEngine;
        let state = mancala::apply_move(&mancala::initialize(), 0);
        let mut rng = GameRng::new(0);
        assert_eq!(FirstLegalOpponent.choose_move(&engine, &state, &mut rng), Some(6));
    }

    #[test]
    fn test_no_moves_no_choice() {
        let engine = MancalaEngine;
        let mut state = mancala::initialize();
        state.is_game_over = true;
        let mut rng = GameRng::new(0);
        assert_eq!(UniformOpponent.choose_move(&engine, &state, &mut rng), None);
        assert_eq!(FirstLegalOpponent.choose_move(&engine, &state, &mut rng), None);
    }
}
