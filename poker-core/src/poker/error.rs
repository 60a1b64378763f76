use thiserror::Error;

use crate::poker::cards::Card;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("`{ident}` is not a card identifier")]
    InvalidCard { ident: String },
    #[error("a hand can have a maximum of 5 cards")]
    CapacityExceeded,
    #[error("{0} is already in the hand")]
    DuplicateCard(Card),
    #[error("a hand needs exactly 5 cards to be opened, it has {len}")]
    IncompleteHand { len: usize },
    #[error("the hand has not been opened")]
    HandNotOpened,

    #[error("a table seats at most {max} players")]
    TooManyPlayers { max: usize },
    #[error("a round needs at least {min} players, {actual} enrolled")]
    NotEnoughPlayers { min: usize, actual: usize },
    #[error("player `{0}` is already enrolled")]
    DuplicatePlayer(String),
    #[error("nickname `{0}` must be 1 to 20 characters")]
    InvalidNickname(String),
    #[error("players cannot enroll while a round is in progress")]
    EnrollmentClosed,
    #[error("no fresh deck, start a new game first")]
    DeckNotReady,
    #[error("the deck has not been shuffled")]
    DeckNotShuffled,
    #[error("the deck ran out of cards")]
    DeckExhausted,
    #[error("cards from the previous round were not retrieved")]
    RoundInProgress,
    #[error("the hands of this round are already open")]
    HandsAlreadyOpened,
    #[error("cards can only be retrieved after the hands are opened")]
    HandsNotRevealed,
}

pub type Result<T> = std::result::Result<T, Error>;
