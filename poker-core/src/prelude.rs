pub use crate::poker::cards::{Card, CardView, Deck, Rank, Suit, Tier, HAND_SIZE};
pub use crate::poker::dealer::{Dealer, MatchEntry, MatchRecord, RoundPhase, StageConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use crate::poker::error::{Error, Result};
pub use crate::poker::hand::Hand;
pub use crate::poker::hand_evaluator::{HandEvaluator, Showdown};
pub use crate::poker::player::{Player, MAX_NICKNAME_LEN};
