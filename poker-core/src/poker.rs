pub mod cards;
pub mod cardset;
pub mod dealer;
pub mod error;
pub mod hand;
pub mod hand_evaluator;
pub mod player;
pub mod tiebreak;
