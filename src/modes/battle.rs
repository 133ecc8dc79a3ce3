//! Stake ("battle") mode.
//!
//! Every seat puts the same stake into a pot before the first move. When
//! the wrapped game reports an outcome the pot is settled exactly once:
//! the winner takes it all, a draw hands every stake back.

use log::{debug, info};

use crate::core::config::BattleConfig;
use crate::core::error::RulesError;
use crate::core::player::{PlayerId, PlayerMap};
use crate::rules::{GameResult, RulesEngine};

/// Can a player with `balance` coins join a table at `stake`?
#[must_use]
pub fn is_eligible(balance: u64, stake: u64) -> bool {
    balance >= stake
}

/// How a finished pot was paid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub result: GameResult,
    /// Coins paid back to each seat from the pot.
    pub payouts: PlayerMap<u64>,
}

/// A game wrapped with escrowed stakes.
#[derive(Clone, Debug)]
pub struct BattleSession<E: RulesEngine> {
    engine: E,
    state: E::State,
    balances: PlayerMap<u64>,
    stake: u64,
    pot: u64,
    settlement: Option<Settlement>,
}

impl<E: RulesEngine> BattleSession<E> {
    /// Seat the players and escrow their stakes.
    ///
    /// `balances` must have one entry per seat in `state`, and every seat
    /// must afford the stake. Nothing is escrowed on error.
    pub fn open(
        engine: E,
        state: E::State,
        mut balances: PlayerMap<u64>,
        config: &BattleConfig,
    ) -> Result<Self, RulesError> {
        let players = engine.player_count(&state);
        if balances.player_count() != players {
            return Err(RulesError::SeatMismatch {
                balances: balances.player_count(),
                players,
            });
        }
        if let Some((player, balance)) = balances.iter().find(|(_, b)| !is_eligible(**b, config.stake)) {
            return Err(RulesError::InsufficientBalance {
                player,
                balance: *balance,
                stake: config.stake,
            });
        }

        let Some(pot) = config.stake.checked_mul(players as u64) else {
            return Err(RulesError::InvalidConfig(format!(
                "stake {} for {} seats overflows the pot",
                config.stake, players
            )));
        };
        for player in PlayerId::all(players) {
            balances[player] -= config.stake;
        }
        info!("battle opened: {} seats at stake {}, pot {}", players, config.stake, pot);

        let mut session = Self {
            engine,
            state,
            balances,
            stake: config.stake,
            pot,
            settlement: None,
        };
        session.settle_if_over();
        Ok(session)
    }

    #[must_use]
    pub fn state(&self) -> &E::State {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn balances(&self) -> &PlayerMap<u64> {
        &self.balances
    }

    #[must_use]
    pub fn stake(&self) -> u64 {
        self.stake
    }

    /// Coins still in escrow. Zero once settled.
    #[must_use]
    pub fn pot(&self) -> u64 {
        self.pot
    }

    #[must_use]
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settlement.is_some()
    }

    /// Apply a move for the awaited player and settle if it ended the game.
    pub fn apply(&mut self, mv: &E::Move) -> Result<&E::State, RulesError> {
        if self.is_settled() {
            return Err(RulesError::GameOver);
        }
        self.state = self.engine.apply_move(&self.state, mv)?;
        self.settle_if_over();
        Ok(&self.state)
    }

    /// Swap in a state produced outside the move set, such as a Ludo roll
    /// or a Mancala clock tick.
    pub fn replace_state(&mut self, state: E::State) -> Result<&E::State, RulesError> {
        if self.is_settled() {
            return Err(RulesError::GameOver);
        }
        self.state = state;
        self.settle_if_over();
        Ok(&self.state)
    }

    fn settle_if_over(&mut self) {
        if self.settlement.is_some() {
            return;
        }
        let Some(result) = self.engine.result(&self.state) else {
            return;
        };

        let players = self.balances.player_count();
        let payouts = match result {
            GameResult::Winner(winner) => {
                PlayerMap::new(players, |p| if p == winner { self.pot } else { 0 })
            }
            GameResult::Draw => PlayerMap::with_value(players, self.stake),
        };
        for (player, &paid) in payouts.iter() {
            self.balances[player] = self.balances[player].saturating_add(paid);
        }
        match result {
            GameResult::Winner(winner) => info!("battle settled: {} takes {}", winner, self.pot),
            GameResult::Draw => info!("battle settled: draw, {} refunded to each seat", self.stake),
        }
        debug!("balances after settlement: {:?}", self.balances);

        self.pot = 0;
        self.settlement = Some(Settlement { result, payouts });
    }
}
