use std::cmp::Ordering;

use heapless;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::poker::cards::{Card, CardView, Rank, Suit, Tier, HAND_SIZE};
use crate::poker::cardset::CardSet;
use crate::poker::error::{Error, Result};
use crate::poker::tiebreak::TieBreaker;

const WHEEL: [Rank; HAND_SIZE] = [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Ace];

/// The evaluated form of an opened five-card hand: its tier, the cards that
/// make up the tier and the kickers left over.
///
/// Showdowns are ordered by hand strength, so two showdowns compare equal
/// exactly when the hands tie, whatever their suits.
#[derive(Clone, Debug)]
pub struct Showdown {
    tier: Tier,
    tier_cards: heapless::Vec<Card, HAND_SIZE>,
    kickers: heapless::Vec<Card, HAND_SIZE>,
    cardset: CardSet,
}

impl Showdown {
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Cards that make up the tier, in card order.
    pub fn tier_cards(&self) -> &[Card] {
        &self.tier_cards
    }

    /// Cards outside the tier grouping, in card order.
    pub fn kickers(&self) -> &[Card] {
        &self.kickers
    }

    pub fn is_tier_card(&self, card: Card) -> bool {
        self.tier_cards.contains(&card)
    }

    /// Ranks that occur exactly `count` times in the hand, highest first.
    pub(crate) fn ranks_with_count(&self, count: usize) -> heapless::Vec<Rank, HAND_SIZE> {
        Rank::iter()
            .rev()
            .filter(|rank| self.cardset.count_of_rank(*rank) == count)
            .collect()
    }

    /// Every rank in the hand, highest first.
    pub(crate) fn ranks_descending(&self) -> heapless::Vec<Rank, HAND_SIZE> {
        self.tier_cards
            .iter()
            .chain(self.kickers.iter())
            .map(|card| card.rank)
            .sorted_by(|a, b| b.cmp(a))
            .collect()
    }

    pub(crate) fn kicker_ranks_descending(&self) -> heapless::Vec<Rank, HAND_SIZE> {
        self.kickers
            .iter()
            .map(|card| card.rank)
            .sorted_by(|a, b| b.cmp(a))
            .collect()
    }

    /// The rank a straight is ranked by. The wheel counts as Five-high.
    pub(crate) fn straight_high_rank(&self) -> Option<Rank> {
        let ranks: heapless::Vec<Rank, HAND_SIZE> = self
            .tier_cards
            .iter()
            .chain(self.kickers.iter())
            .map(|card| card.rank)
            .sorted()
            .collect();
        straight_high_rank(&ranks)
    }
}

impl PartialEq for Showdown {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Showdown {}

impl PartialOrd for Showdown {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Showdown {
    fn cmp(&self, other: &Self) -> Ordering {
        TieBreaker::compare_showdowns(self, other)
    }
}

/// Takes ranks in ascending order.
fn straight_high_rank(ranks: &[Rank]) -> Option<Rank> {
    if ranks.len() != HAND_SIZE {
        return None;
    }

    let consecutive = ranks
        .iter()
        .tuple_windows()
        .all(|(low, high)| *low as u8 + 1 == *high as u8);

    if consecutive {
        ranks.last().copied()
    } else if ranks == WHEEL {
        Some(Rank::Five)
    } else {
        None
    }
}

#[derive(Debug)]
pub struct HandEvaluator {
    sorted: heapless::Vec<Card, HAND_SIZE>,
    cardset: CardSet,
}

impl HandEvaluator {
    /// `cards` must hold exactly five distinct cards, and `cardset` those
    /// same cards.
    pub(crate) fn new(cards: &[Card], cardset: CardSet) -> Self {
        let sorted = cards.iter().copied().sorted().collect();
        Self { sorted, cardset }
    }

    fn evaluate_run(&self) -> Option<Rank> {
        let ranks: heapless::Vec<Rank, HAND_SIZE> =
            self.sorted.iter().map(|card| card.rank).collect();
        straight_high_rank(&ranks)
    }

    fn evaluate_suit_matches(&self) -> bool {
        Suit::iter().any(|suit| self.cardset.count_in_suit(suit) == HAND_SIZE)
    }

    fn evaluate_rank_matches(&self, match_size: usize, match_count: usize) -> bool {
        Rank::iter()
            .filter(|rank| self.cardset.count_of_rank(*rank) == match_size)
            .count()
            == match_count
    }

    fn evaluate_full_house(&self) -> bool {
        self.evaluate_rank_matches(3, 1) && self.evaluate_rank_matches(2, 1)
    }

    fn lowest_rank(&self) -> Option<Rank> {
        self.sorted.first().map(|card| card.rank)
    }

    fn evaluate_tier(&self) -> Tier {
        let straight = self.evaluate_run().is_some();
        let flush = self.evaluate_suit_matches();

        // 1. ROYAL FLUSH
        if straight && flush && self.lowest_rank() == Some(Rank::Ten) {
            return Tier::RoyalFlush;
        }

        // 2. STRAIGHT FLUSH
        if straight && flush {
            return Tier::StraightFlush;
        }

        // 3. FOUR OF A KIND
        if self.evaluate_rank_matches(4, 1) {
            return Tier::FourOfAKind;
        }

        // 4. FULL HOUSE
        if self.evaluate_full_house() {
            return Tier::FullHouse;
        }

        // 5. FLUSH
        if flush {
            return Tier::Flush;
        }

        // 6. STRAIGHT
        if straight {
            return Tier::Straight;
        }

        // 7. THREE OF A KIND
        if self.evaluate_rank_matches(3, 1) {
            return Tier::ThreeOfAKind;
        }

        // 8. TWO PAIR
        if self.evaluate_rank_matches(2, 2) {
            return Tier::TwoPair;
        }

        // 9. PAIR
        if self.evaluate_rank_matches(2, 1) {
            return Tier::OnePair;
        }

        // 10. HIGH CARD
        Tier::HighCard
    }

    fn defines_tier(&self, tier: Tier, card: Card) -> bool {
        let count = self.cardset.count_of_rank(card.rank);
        match tier {
            Tier::HighCard => false,
            Tier::OnePair | Tier::TwoPair => count == 2,
            Tier::ThreeOfAKind => count == 3,
            Tier::FourOfAKind => count == 4,
            Tier::Straight
            | Tier::Flush
            | Tier::FullHouse
            | Tier::StraightFlush
            | Tier::RoyalFlush => true,
        }
    }

    pub(crate) fn evaluate(&self) -> Showdown {
        let tier = self.evaluate_tier();

        let (tier_cards, kickers): (heapless::Vec<Card, HAND_SIZE>, heapless::Vec<Card, HAND_SIZE>) = self
            .sorted
            .iter()
            .copied()
            .partition(|card| self.defines_tier(tier, *card));

        Showdown {
            tier,
            tier_cards,
            kickers,
            cardset: self.cardset,
        }
    }

    /// Evaluate five distinct cards without going through a [`Hand`].
    ///
    /// ```
    /// # use poker_core::prelude::{Card, HandEvaluator, Tier};
    /// let cards: Vec<Card> = ["5S", "5H", "5D", "5C", "AS"]
    ///     .iter()
    ///     .map(|ident| ident.parse().unwrap())
    ///     .collect();
    /// let showdown = HandEvaluator::evaluate_poker_hand(cards).unwrap();
    /// assert_eq!(showdown.tier(), Tier::FourOfAKind);
    /// assert_eq!(showdown.kickers(), &[Card::from_ident("AS")]);
    /// ```
    ///
    /// [`Hand`]: crate::poker::hand::Hand
    pub fn evaluate_poker_hand(card_view: impl CardView) -> Result<Showdown> {
        let cards = card_view.view();
        if cards.len() > HAND_SIZE {
            return Err(Error::CapacityExceeded);
        }

        let mut cardset = CardSet::empty();
        for card in cards {
            if cardset.contains(*card) {
                return Err(Error::DuplicateCard(*card));
            }
            cardset.insert(*card);
        }

        if cards.len() < HAND_SIZE {
            return Err(Error::IncompleteHand { len: cards.len() });
        }

        Ok(Self::new(cards, cardset).evaluate())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;
    use crate::cards;
    use crate::poker::cards::Deck;

    fn expect(cards: Vec<Card>, expected_tier: Tier, expected_tier_cards: Vec<Card>) {
        let showdown = HandEvaluator::evaluate_poker_hand(&cards).unwrap();
        assert_eq!(showdown.tier(), expected_tier);

        let mut expected_tier_cards = expected_tier_cards;
        expected_tier_cards.sort();
        assert_eq!(showdown.tier_cards(), expected_tier_cards.as_slice());

        let expected_kickers: Vec<_> = cards
            .iter()
            .copied()
            .filter(|card| !expected_tier_cards.contains(card))
            .sorted()
            .collect();
        assert_eq!(showdown.kickers(), expected_kickers.as_slice());
    }

    #[test]
    fn partition_covers_hand_test() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..2_000 {
            let mut deck = Deck::shuffled(&mut rng);
            let cards: Vec<Card> = (0..HAND_SIZE).filter_map(|_| deck.draw()).collect();
            let showdown = HandEvaluator::evaluate_poker_hand(&cards).unwrap();

            assert_eq!(showdown.tier_cards().len() + showdown.kickers().len(), HAND_SIZE);
            let rejoined: Vec<Card> = showdown
                .tier_cards()
                .iter()
                .chain(showdown.kickers())
                .copied()
                .sorted()
                .collect();
            assert_eq!(rejoined, cards.iter().copied().sorted().collect::<Vec<_>>());
        }
    }

    #[test]
    fn wrong_size_test() {
        assert_eq!(
            HandEvaluator::evaluate_poker_hand(cards!("AS KS")).unwrap_err(),
            Error::IncompleteHand { len: 2 }
        );
        assert_eq!(
            HandEvaluator::evaluate_poker_hand(cards!("AS KS QS JS TS 9S")).unwrap_err(),
            Error::CapacityExceeded
        );
        assert_eq!(
            HandEvaluator::evaluate_poker_hand(cards!("AS KS QS JS AS")).unwrap_err(),
            Error::DuplicateCard(Card::from_ident("AS"))
        );
    }

    #[test]
    fn high_card_test() {
        expect(cards!("AS 9C 6C KH TS"), Tier::HighCard, cards!(""));
    }

    #[test]
    fn pair_test() {
        expect(cards!("9S 2S 3C 9D AS"), Tier::OnePair, cards!("9S 9D"));
    }

    #[test]
    fn two_pair_test() {
        expect(cards!("9S 2S 3C 9D 2H"), Tier::TwoPair, cards!("9S 2S 9D 2H"));
    }

    #[test]
    fn three_of_a_kind_test() {
        expect(cards!("9S 2S 3C 9D 9H"), Tier::ThreeOfAKind, cards!("9S 9D 9H"));
    }

    #[test]
    fn straight_test() {
        expect(
            cards!("5S 8D 7S 6C 9S"),
            Tier::Straight,
            cards!("5S 8D 7S 6C 9S"),
        );
        // Wheel
        expect(
            cards!("AS 2D 3S 4C 5S"),
            Tier::Straight,
            cards!("AS 2D 3S 4C 5S"),
        );
        // Ace-high
        expect(
            cards!("AS KD QS JC TS"),
            Tier::Straight,
            cards!("AS KD QS JC TS"),
        );
        // No wrapping past the ace
        expect(cards!("QS KD AS 2C 3S"), Tier::HighCard, cards!(""));
        // Gapped
        expect(cards!("5S 8D 7S 6C TS"), Tier::HighCard, cards!(""));
    }

    #[test]
    fn flush_test() {
        expect(
            cards!("AS TS 9S 2S 5S"),
            Tier::Flush,
            cards!("AS TS 9S 2S 5S"),
        );
        // A pair inside a flush is still a flush
        expect(
            cards!("AH TH 9H 2H 5H"),
            Tier::Flush,
            cards!("AH TH 9H 2H 5H"),
        );
    }

    #[test]
    fn full_house_test() {
        expect(
            cards!("9S 2D 2S 9D 9C"),
            Tier::FullHouse,
            cards!("9S 2D 2S 9D 9C"),
        );
        expect(
            cards!("7S 7H 7D 2C 2S"),
            Tier::FullHouse,
            cards!("7S 7H 7D 2C 2S"),
        );
    }

    #[test]
    fn four_of_a_kind_test() {
        expect(
            cards!("5S 5H 5D 5C AS"),
            Tier::FourOfAKind,
            cards!("5S 5H 5D 5C"),
        );
    }

    #[test]
    fn straight_flush_test() {
        expect(
            cards!("5S 8S 7S 6S 9S"),
            Tier::StraightFlush,
            cards!("5S 8S 7S 6S 9S"),
        );
        expect(
            cards!("AD 2D 3D 4D 5D"),
            Tier::StraightFlush,
            cards!("AD 2D 3D 4D 5D"),
        );
        expect(
            cards!("9H TH JH QH KH"),
            Tier::StraightFlush,
            cards!("9H TH JH QH KH"),
        );
    }

    #[test]
    fn royal_flush_test() {
        expect(
            cards!("TS JS QS KS AS"),
            Tier::RoyalFlush,
            cards!("TS JS QS KS AS"),
        );
        // Ace-high straight in mixed suits is only a straight
        expect(
            cards!("TS JS QS KS AH"),
            Tier::Straight,
            cards!("TS JS QS KS AH"),
        );
    }

    #[test]
    fn straight_high_rank_test() {
        let high = |cards: Vec<Card>| {
            HandEvaluator::evaluate_poker_hand(cards)
                .unwrap()
                .straight_high_rank()
        };
        assert_eq!(high(cards!("AS 2D 3S 4C 5S")), Some(Rank::Five));
        assert_eq!(high(cards!("6S 2D 3S 4C 5S")), Some(Rank::Six));
        assert_eq!(high(cards!("AS KD QS JC TS")), Some(Rank::Ace));
        assert_eq!(high(cards!("AS KD QS JC 9S")), None);
    }

    #[test]
    fn rank_groups_test() {
        let showdown = HandEvaluator::evaluate_poker_hand(cards!("KS KD 4S 4C 9H")).unwrap();
        assert_eq!(
            showdown.ranks_with_count(2).as_slice(),
            &[Rank::King, Rank::Four]
        );
        assert_eq!(showdown.kicker_ranks_descending().as_slice(), &[Rank::Nine]);
        assert_eq!(
            showdown.ranks_descending().as_slice(),
            &[Rank::King, Rank::King, Rank::Nine, Rank::Four, Rank::Four]
        );
    }
}
