//! Online play against a remote peer.
//!
//! The transport (polling, retries) lives elsewhere. A session only
//! validates moves proposed by the local seat before they are published,
//! and takes remote snapshots wholesale. Conflicts resolve as
//! last-writer-wins on the revision counter; older snapshots are dropped.
//!
//! Enum-valued fields normalize their casing while deserializing, so a
//! snapshot accepted here is already in canonical form.
//!
//! A session may also carry a shared [`GameRng`]. Its position rides along
//! in every snapshot, so whichever peer rolls next continues the same
//! dice and shuffle stream.

use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::error::RulesError;
use crate::core::player::PlayerId;
use crate::core::rng::{GameRng, GameRngState};
use crate::rules::{GameResult, RulesEngine};

/// What goes over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    pub revision: u64,
    pub state: S,
    /// Shared generator position after this revision, if any.
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

/// One side of an online game.
#[derive(Clone, Debug)]
pub struct OnlineSession<E: RulesEngine> {
    engine: E,
    local_player: PlayerId,
    state: E::State,
    revision: u64,
    rng: Option<GameRng>,
}

impl<E> OnlineSession<E>
where
    E: RulesEngine,
    E::State: Serialize + DeserializeOwned,
{
    #[must_use]
    pub fn new(engine: E, local_player: PlayerId, state: E::State) -> Self {
        Self {
            engine,
            local_player,
            state,
            revision: 0,
            rng: None,
        }
    }

    /// Share `rng` with the peer. Both sides should start from the same
    /// seed; afterwards the position travels with each snapshot.
    #[must_use]
    pub fn with_shared_rng(mut self, rng: GameRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// The shared generator, for rolls and shuffles made on this side.
    pub fn shared_rng(&mut self) -> Option<&mut GameRng> {
        self.rng.as_mut()
    }

    #[must_use]
    pub fn state(&self) -> &E::State {
        &self.state
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn local_player(&self) -> PlayerId {
        self.local_player
    }

    #[must_use]
    pub fn is_local_turn(&self) -> bool {
        self.engine.actor(&self.state) == self.local_player
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.engine.result(&self.state)
    }

    /// Validate and apply a local move; returns the JSON snapshot to publish.
    pub fn propose(&mut self, mv: &E::Move) -> Result<String, RulesError> {
        let expected = self.engine.actor(&self.state);
        if expected != self.local_player {
            return Err(RulesError::NotYourTurn {
                player: self.local_player,
                expected,
            });
        }
        let next = self.engine.apply_move(&self.state, mv)?;
        self.commit(next)
    }

    /// Publish a locally produced state that is not a move, e.g. a dice
    /// roll. Bumps the revision like a move would.
    pub fn publish(&mut self, state: E::State) -> Result<String, RulesError> {
        self.commit(state)
    }

    fn commit(&mut self, state: E::State) -> Result<String, RulesError> {
        let json = serde_json::to_string(&Snapshot {
            revision: self.revision + 1,
            state: &state,
            rng: self.rng.as_ref().map(GameRng::state),
        })?;
        self.state = state;
        self.revision += 1;
        trace!("{} published revision {}", self.local_player, self.revision);
        Ok(json)
    }

    /// Take a remote JSON snapshot. Returns `false` if it was stale.
    pub fn accept_remote(&mut self, json: &str) -> Result<bool, RulesError> {
        let snapshot: Snapshot<E::State> = serde_json::from_str(json)?;
        Ok(self.accept(snapshot))
    }

    /// Take a remote binary snapshot. Returns `false` if it was stale.
    pub fn accept_remote_bytes(&mut self, bytes: &[u8]) -> Result<bool, RulesError> {
        let snapshot: Snapshot<E::State> = bincode::deserialize(bytes)?;
        Ok(self.accept(snapshot))
    }

    fn accept(&mut self, snapshot: Snapshot<E::State>) -> bool {
        if snapshot.revision <= self.revision {
            debug!(
                "dropping stale snapshot {} (at {})",
                snapshot.revision, self.revision
            );
            return false;
        }
        self.revision = snapshot.revision;
        self.state = snapshot.state;
        if let Some(position) = snapshot.rng {
            self.rng = Some(GameRng::from_state(&position));
        }
        trace!("{} accepted revision {}", self.local_player, self.revision);
        true
    }

    /// Compact binary form of the current snapshot.
    pub fn encode_snapshot(&self) -> Result<Vec<u8>, RulesError> {
        Ok(bincode::serialize(&Snapshot {
            revision: self.revision,
            state: &self.state,
            rng: self.rng.as_ref().map(GameRng::state),
        })?)
    }
}

/// Decode a binary snapshot without a session.
pub fn decode_snapshot<S: DeserializeOwned>(bytes: &[u8]) -> Result<Snapshot<S>, RulesError> {
    Ok(bincode::deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mancala::{self, MancalaEngine, MancalaState};

    fn pair() -> (OnlineSession<MancalaEngine>, OnlineSession<MancalaEngine>) {
        let state = mancala::initialize();
        (
            OnlineSession::new(MancalaEngine, PlayerId::new(0), state.clone()),
            OnlineSession::new(MancalaEngine, PlayerId::new(1), state),
        )
    }

    #[test]
    fn test_propose_and_accept() {
        let (mut host, mut guest) = pair();
        assert!(host.is_local_turn());
        assert!(!guest.is_local_turn());

        let wire = host.propose(&2).unwrap();
        assert_eq!(host.revision(), 1);
        assert!(guest.accept_remote(&wire).unwrap());
        assert_eq!(guest.state(), host.state());
        assert!(guest.is_local_turn());
    }

    #[test]
    fn test_propose_out_of_turn() {
        let (_, mut guest) = pair();
        assert!(matches!(guest.propose(&6), Err(RulesError::NotYourTurn { .. })));
        assert_eq!(guest.revision(), 0);
    }

    #[test]
    fn test_illegal_proposal_keeps_revision() {
        let (mut host, _) = pair();
        assert!(host.propose(&9).is_err());
        assert_eq!(host.revision(), 0);
    }

    #[test]
    fn test_stale_snapshot_dropped() {
        let (mut host, mut guest) = pair();
        let first = host.propose(&0).unwrap();
        assert!(guest.accept_remote(&first).unwrap());
        let second = guest.propose(&6).unwrap();
        assert!(host.accept_remote(&second).unwrap());

        let before = host.state().clone();
        assert!(!host.accept_remote(&first).unwrap());
        assert_eq!(host.state(), &before);
    }

    #[test]
    fn test_binary_snapshot() {
        let (mut host, mut guest) = pair();
        host.propose(&3).unwrap();
        let bytes = host.encode_snapshot().unwrap();

        let decoded: Snapshot<MancalaState> = decode_snapshot(&bytes).unwrap();
        assert_eq!(decoded.revision, 1);
        assert!(guest.accept_remote_bytes(&bytes).unwrap());
        assert_eq!(guest.state(), host.state());
    }

    #[test]
    fn test_garbage_is_an_error() {
        let (mut host, _) = pair();
        assert!(matches!(host.accept_remote("{not json"), Err(RulesError::Json(_))));
    }
}
