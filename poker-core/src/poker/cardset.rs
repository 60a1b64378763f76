use static_assertions::const_assert;

use super::cards::{Card, Rank, Suit};
#[cfg(test)]
use super::cards::CardView;

/// One bit per card, thirteen ranks per 16-bit suit lane. Doubles as the
/// suit and rank tallies of a hand, since a hand never holds a card twice.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CardSet(u64);

#[rustfmt::skip]
impl CardSet {
    const CLUBS_MASK:    u64 = 0x0000_0000_0000_1fff;
    const DIAMONDS_MASK: u64 = 0x0000_0000_1fff_0000;
    const HEARTS_MASK:   u64 = 0x0000_1fff_0000_0000;
    const SPADES_MASK:   u64 = 0x1fff_0000_0000_0000;

    const ALL_CARDS_MASK: u64 = Self::CLUBS_MASK | Self::DIAMONDS_MASK | Self::HEARTS_MASK | Self::SPADES_MASK;

    const SUIT_MASK_TABLE: [u64; 4] = [
        Self::CLUBS_MASK,
        Self::DIAMONDS_MASK,
        Self::HEARTS_MASK,
        Self::SPADES_MASK,
    ];

    // The lowest rank of every suit lane; shift by the rank to select it.
    const RANK_MASK: u64 = 0x0001_0001_0001_0001;
}

const_assert!(CardSet::CLUBS_MASK.count_ones() == 13);
const_assert!(CardSet::DIAMONDS_MASK.count_ones() == 13);
const_assert!(CardSet::HEARTS_MASK.count_ones() == 13);
const_assert!(CardSet::SPADES_MASK.count_ones() == 13);
const_assert!(CardSet::ALL_CARDS_MASK.count_ones() == 52);
const_assert!((CardSet::RANK_MASK << 12) & CardSet::ALL_CARDS_MASK == CardSet::RANK_MASK << 12);

#[allow(clippy::multiple_inherent_impl)]
impl CardSet {
    pub fn empty() -> Self {
        Self(0)
    }

    #[cfg(test)]
    pub fn full() -> Self {
        Self(Self::ALL_CARDS_MASK)
    }

    #[cfg(test)]
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn count_in_suit(self, suit: Suit) -> usize {
        (self.0 & Self::SUIT_MASK_TABLE[suit as usize]).count_ones() as usize
    }

    pub fn count_of_rank(self, rank: Rank) -> usize {
        (self.0 & (Self::RANK_MASK << (rank as u8))).count_ones() as usize
    }

    pub fn insert(&mut self, card: Card) {
        self.0 |= Self::get_mask(card);
    }

    #[cfg(test)]
    pub fn remove(&mut self, card: Card) {
        self.0 &= Self::ALL_CARDS_MASK & !Self::get_mask(card);
    }

    pub fn contains(self, card: Card) -> bool {
        (self.0 & Self::get_mask(card)) > 0
    }

    #[inline]
    fn get_index(card: Card) -> usize {
        ((card.suit as u8 as usize) << 4) | (card.rank as u8 as usize)
    }

    #[inline]
    fn get_mask(card: Card) -> u64 {
        1_u64 << Self::get_index(card)
    }
}

#[cfg(test)]
impl<V: CardView> From<V> for CardSet {
    fn from(value: V) -> Self {
        let mut cardset = Self::empty();
        for card in value.view() {
            cardset.insert(*card);
        }
        cardset
    }
}
