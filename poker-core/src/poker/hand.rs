use std::cmp::Ordering;
use std::fmt;

use colored::Colorize;
use heapless;
use itertools::Itertools;
use tracing::debug;

use crate::poker::cards::{Card, CardView, Tier, HAND_SIZE};
use crate::poker::cardset::CardSet;
use crate::poker::error::{Error, Result};
use crate::poker::hand_evaluator::{HandEvaluator, Showdown};

/// Five cards collected one at a time, then opened once to reveal the tier.
///
/// ```
/// # use poker_core::prelude::{Card, Hand, Tier};
/// let mut hand = Hand::empty();
/// for ident in ["TS", "JS", "QS", "KS", "AS"] {
///     hand.add(ident.parse().unwrap()).unwrap();
/// }
/// hand.open().unwrap();
/// assert_eq!(hand.tier().unwrap(), Tier::RoyalFlush);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Hand {
    /// Kept in card order.
    cards: heapless::Vec<Card, HAND_SIZE>,
    cardset: CardSet,
    showdown: Option<Showdown>,
}

impl Hand {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_slice(cards: &[Card]) -> Result<Self> {
        let mut hand = Self::empty();
        for card in cards {
            hand.add(*card)?;
        }
        Ok(hand)
    }

    /// Convert a series of shorthand identifiers into an unopened `Hand`.
    /// Panics if the input is incorrect. This exists only for test-writing.
    pub fn from_idents(idents: &str) -> Self {
        let cards: Vec<Card> = idents
            .split_ascii_whitespace()
            .map(Card::from_ident)
            .collect();
        Self::from_slice(&cards).unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn add(&mut self, card: Card) -> Result<()> {
        if self.cards.len() >= HAND_SIZE {
            return Err(Error::CapacityExceeded);
        }
        if self.cardset.contains(card) {
            return Err(Error::DuplicateCard(card));
        }

        let position = self.cards.partition_point(|held| *held < card);
        self.cards
            .insert(position, card)
            .map_err(|_| Error::CapacityExceeded)?;
        self.cardset.insert(card);

        Ok(())
    }

    /// Evaluate the hand. Opening an already opened hand changes nothing.
    pub fn open(&mut self) -> Result<&Showdown> {
        if self.cards.len() != HAND_SIZE {
            return Err(Error::IncompleteHand {
                len: self.cards.len(),
            });
        }

        let showdown = match self.showdown.take() {
            Some(showdown) => showdown,
            None => {
                let showdown = HandEvaluator::new(&self.cards, self.cardset).evaluate();
                debug!(
                    tier = %showdown.tier(),
                    kickers = showdown.kickers().len(),
                    "opened hand"
                );
                showdown
            }
        };

        Ok(&*self.showdown.insert(showdown))
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.cardset = CardSet::empty();
        self.showdown = None;
    }

    pub fn is_opened(&self) -> bool {
        self.showdown.is_some()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    pub fn showdown(&self) -> Result<&Showdown> {
        self.showdown.as_ref().ok_or(Error::HandNotOpened)
    }

    pub fn tier(&self) -> Result<Tier> {
        self.showdown().map(Showdown::tier)
    }

    pub fn tier_cards(&self) -> Result<&[Card]> {
        self.showdown().map(Showdown::tier_cards)
    }

    pub fn kickers(&self) -> Result<&[Card]> {
        self.showdown().map(Showdown::kickers)
    }

    /// `Greater` when this hand beats `other`, `Equal` on a true tie.
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        Ok(self.showdown()?.cmp(other.showdown()?))
    }
}

#[macro_export]
macro_rules! hand {
    ($idents:literal) => {
        $crate::poker::hand::Hand::from_idents($idents)
    };
}

impl CardView for Hand {
    fn view(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|card| match &self.showdown {
                Some(showdown) if showdown.is_tier_card(*card) => {
                    card.to_string().green().bold().underline().to_string()
                }
                _ => card.to_string(),
            })
            .join(", ");

        match &self.showdown {
            Some(showdown) => write!(f, "{} {cards}", showdown.tier()),
            None if self.cards.len() < HAND_SIZE => {
                write!(f, "Incomplete hand ({}/{HAND_SIZE}) {cards}", self.cards.len())
            }
            None => write!(f, "Unopened hand {cards}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::cards::Rank;
    use crate::{card, cards};

    fn opened(idents: &str) -> Hand {
        let mut hand = Hand::from_idents(idents);
        hand.open().unwrap();
        hand
    }

    #[test]
    fn add_test() {
        let mut hand = Hand::empty();
        for card in cards!("KH 2S 9D TC 3H") {
            hand.add(card).unwrap();
        }
        assert_eq!(hand.len(), 5);
        assert_eq!(
            hand.cards().collect::<Vec<_>>(),
            cards!("2S 3H 9D TC KH")
        );
        assert_eq!(hand.add(card!("AS")), Err(Error::CapacityExceeded));
        assert_eq!(hand.add(card!("KH")), Err(Error::CapacityExceeded));
    }

    #[test]
    fn duplicate_card_test() {
        let mut hand = Hand::empty();
        hand.add(card!("AS")).unwrap();
        assert_eq!(
            hand.add(card!("AS")),
            Err(Error::DuplicateCard(card!("AS")))
        );
        hand.add(card!("AH")).unwrap();
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn open_requires_five_cards_test() {
        let mut hand = hand!("AS KS QS JS");
        assert_eq!(
            hand.open().unwrap_err(),
            Error::IncompleteHand { len: 4 }
        );
        assert!(!hand.is_opened());
        assert_eq!(
            Hand::empty().open().unwrap_err(),
            Error::IncompleteHand { len: 0 }
        );
    }

    #[test]
    fn unopened_queries_test() {
        let a = hand!("AS KS QS JS 9H");
        let b = opened("AH KH QH JH 9S");
        assert_eq!(a.tier(), Err(Error::HandNotOpened));
        assert_eq!(a.kickers(), Err(Error::HandNotOpened));
        assert_eq!(a.tier_cards(), Err(Error::HandNotOpened));
        assert_eq!(a.compare(&b), Err(Error::HandNotOpened));
        assert_eq!(b.compare(&a), Err(Error::HandNotOpened));
    }

    #[test]
    fn open_is_stable_test() {
        let mut hand = hand!("7S 7H 7D 2C 2S");
        hand.open().unwrap();
        assert_eq!(hand.tier(), Ok(Tier::FullHouse));
        hand.open().unwrap();
        assert_eq!(hand.tier(), Ok(Tier::FullHouse));
        assert_eq!(hand.tier(), hand.tier());
        assert_eq!(hand.kickers().unwrap(), &[] as &[Card]);
    }

    #[test]
    fn partition_test() {
        let hand = opened("5S 5H 5D 5C AS");
        assert_eq!(hand.tier(), Ok(Tier::FourOfAKind));
        assert_eq!(hand.kickers().unwrap(), &[card!("AS")]);
        assert_eq!(hand.tier_cards().unwrap(), cards!("5C 5D 5H 5S").as_slice());

        let hand = opened("AS 9C 6C KH TS");
        assert_eq!(hand.tier(), Ok(Tier::HighCard));
        assert!(hand.tier_cards().unwrap().is_empty());
        assert_eq!(hand.kickers().unwrap().len(), 5);

        let hand = opened("AS TS 9S 2S 5S");
        assert_eq!(hand.tier(), Ok(Tier::Flush));
        assert!(hand.kickers().unwrap().is_empty());
    }

    #[test]
    fn clear_test() {
        let mut hand = opened("TS JS QS KS AS");
        hand.clear();
        assert!(hand.is_empty());
        assert!(!hand.is_opened());
        assert_eq!(hand.tier(), Err(Error::HandNotOpened));

        // Cards from the previous round can be dealt again.
        for card in cards!("TS JS QS KS 9S") {
            hand.add(card).unwrap();
        }
        hand.open().unwrap();
        assert_eq!(hand.tier(), Ok(Tier::StraightFlush));
    }

    #[test]
    fn compare_test() {
        let royal = opened("TS JS QS KS AS");
        let quads = opened("5S 5H 5D 5C AS");
        assert_eq!(royal.compare(&quads), Ok(Ordering::Greater));
        assert_eq!(quads.compare(&royal), Ok(Ordering::Less));
        assert_eq!(royal.compare(&royal), Ok(Ordering::Equal));

        let sevens = opened("7S 7H 7D 2C 2S");
        let sixes = opened("6S 6H 6D AC AS");
        assert_eq!(sevens.compare(&sixes), Ok(Ordering::Greater));
    }

    #[test]
    fn one_pair_full_kicker_sequence_test() {
        // Same pair, same 9 and 8; the last kicker decides.
        let six_low = opened("TS TH 9D 8C 6S");
        let seven_low = opened("TC TD 9S 8H 7D");
        assert_eq!(six_low.tier(), Ok(Tier::OnePair));
        assert_eq!(seven_low.tier(), Ok(Tier::OnePair));
        assert_eq!(six_low.compare(&seven_low), Ok(Ordering::Less));
    }

    #[test]
    fn wheel_test() {
        let wheel = opened("AS 2H 3D 4C 5S");
        let six_high = opened("2S 3H 4D 5C 6S");
        assert_eq!(wheel.tier(), Ok(Tier::Straight));
        assert_eq!(wheel.compare(&six_high), Ok(Ordering::Less));
        assert_eq!(
            wheel.showdown().unwrap().straight_high_rank(),
            Some(Rank::Five)
        );

        let steel_wheel = opened("AH 2H 3H 4H 5H");
        assert_eq!(steel_wheel.tier(), Ok(Tier::StraightFlush));
    }

    #[test]
    fn display_test() {
        colored::control::set_override(false);

        let mut hand = hand!("AS KH");
        assert_eq!(
            hand.to_string(),
            "Incomplete hand (2/5) \u{2665}\u{fe0f} K, \u{2660}\u{fe0f} A"
        );

        hand.add(card!("2C")).unwrap();
        hand.add(card!("2D")).unwrap();
        hand.add(card!("TS")).unwrap();
        assert!(hand.to_string().starts_with("Unopened hand "));

        hand.open().unwrap();
        assert_eq!(
            hand.to_string(),
            "ONE_PAIR \u{2663}\u{fe0f} 2, \u{2666}\u{fe0f} 2, \u{2660}\u{fe0f}10, \u{2665}\u{fe0f} K, \u{2660}\u{fe0f} A"
        );

        // With styling on, only the pair is emphasised.
        colored::control::set_override(true);
        let styled = hand.to_string();
        let emphasised: Vec<String> = cards!("2C 2D")
            .into_iter()
            .map(|card| card.to_string().green().bold().underline().to_string())
            .collect();
        colored::control::set_override(false);

        for rendered in &emphasised {
            assert!(rendered.contains("\u{1b}["));
            assert!(styled.contains(rendered.as_str()));
        }
        assert!(styled.starts_with("ONE_PAIR \u{1b}["));
        assert!(styled.ends_with(
            ", \u{2660}\u{fe0f}10, \u{2665}\u{fe0f} K, \u{2660}\u{fe0f} A"
        ));
    }
}
