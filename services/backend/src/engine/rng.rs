//! Coin draw sources
//!
//! The draw is behind a trait so tests can force outcomes while production
//! keeps an unbiased independent flip per call.

use rand::Rng;
use shared::CoinSide;
use std::collections::VecDeque;
use std::sync::Mutex;

pub trait OutcomeSource: Send + Sync {
    /// One independent fair draw, P(heads) = P(tails) = 0.5.
    fn flip(&self) -> CoinSide;
}

/// Production source backed by the thread-local RNG.
pub struct ThreadRngSource;

impl OutcomeSource for ThreadRngSource {
    fn flip(&self) -> CoinSide {
        if rand::thread_rng().gen_bool(0.5) {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        }
    }
}

/// Always returns the same side. Test support.
pub struct FixedOutcome(pub CoinSide);

impl OutcomeSource for FixedOutcome {
    fn flip(&self) -> CoinSide {
        self.0
    }
}

/// Replays a scripted sequence of draws, then falls back to a fixed side
/// once the sequence is exhausted. Test support.
pub struct SequenceOutcome {
    queue: Mutex<VecDeque<CoinSide>>,
    exhausted: CoinSide,
}

impl SequenceOutcome {
    pub fn new(flips: impl IntoIterator<Item = CoinSide>, exhausted: CoinSide) -> Self {
        Self {
            queue: Mutex::new(flips.into_iter().collect()),
            exhausted,
        }
    }
}

impl OutcomeSource for SequenceOutcome {
    fn flip(&self) -> CoinSide {
        self.queue
            .lock()
            .expect("outcome queue poisoned")
            .pop_front()
            .unwrap_or(self.exhausted)
    }
}
