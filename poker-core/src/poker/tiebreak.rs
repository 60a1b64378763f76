use std::cmp::Ordering;

use crate::poker::cards::{Rank, Tier};
use crate::poker::hand_evaluator::Showdown;

/// Orders two showdowns by strength. `Greater` means `left` wins. Suits are
/// never consulted.
pub(crate) struct TieBreaker<'a> {
    left: &'a Showdown,
    right: &'a Showdown,
}

impl<'a> TieBreaker<'a> {
    fn new(left: &'a Showdown, right: &'a Showdown) -> Self {
        Self { left, right }
    }

    fn compare_groups(&self, count: usize) -> Ordering {
        compare_rank_lists(
            &self.left.ranks_with_count(count),
            &self.right.ranks_with_count(count),
        )
    }

    fn compare_kickers(&self) -> Ordering {
        compare_rank_lists(
            &self.left.kicker_ranks_descending(),
            &self.right.kicker_ranks_descending(),
        )
    }

    fn compare_all_ranks(&self) -> Ordering {
        compare_rank_lists(
            &self.left.ranks_descending(),
            &self.right.ranks_descending(),
        )
    }

    fn compare_straights(&self) -> Ordering {
        self.left
            .straight_high_rank()
            .cmp(&self.right.straight_high_rank())
    }

    fn compare(&self) -> Ordering {
        let tier = self.left.tier();
        if tier != self.right.tier() {
            return tier.cmp(&self.right.tier());
        }

        match tier {
            Tier::RoyalFlush => Ordering::Equal,
            Tier::StraightFlush | Tier::Straight => self.compare_straights(),
            Tier::FourOfAKind => self
                .compare_groups(4)
                .then_with(|| self.compare_kickers()),
            Tier::FullHouse => self
                .compare_groups(3)
                .then_with(|| self.compare_groups(2)),
            Tier::Flush | Tier::HighCard => self.compare_all_ranks(),
            Tier::ThreeOfAKind => self
                .compare_groups(3)
                .then_with(|| self.compare_kickers()),
            // Pairs come out highest first, so this is high pair, then low pair.
            Tier::TwoPair | Tier::OnePair => self
                .compare_groups(2)
                .then_with(|| self.compare_kickers()),
        }
    }

    pub fn compare_showdowns(left: &'a Showdown, right: &'a Showdown) -> Ordering {
        let tiebreaker = Self::new(left, right);
        tiebreaker.compare()
    }
}

/// Position-by-position over two descending rank lists; a strict prefix loses.
fn compare_rank_lists(left: &[Rank], right: &[Rank]) -> Ordering {
    left.iter().cmp(right.iter())
}
