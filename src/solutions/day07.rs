use advent_runner::parsing::{parse_input_lines, parse_with_context};
use advent_runner::runner::solution_runner;
use advent_runner::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

pub(super) const NAME: &str = "Day 7: Camel Cards";

#[solution_runner(name = NAME, parsed = HandList, part_one = Day07, part_two = Day07)]
impl super::Calendar2023<7> {}

/*
Input lists hands of five cards, each followed by a bid:

    32T3K 765

Cards are labeled `A`, `K`, `Q`, `J`, `T`, and `9` down to `2`, strongest first.
*/

/// Card labels from weakest to strongest.
const LABELS: &[u8; 13] = b"23456789TJQKA";
/// Index of `J` within [`LABELS`].
const JACK: u8 = 9;

/// A card as its index in [`LABELS`].
type Card = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl HandType {
    /// Classify by the sizes of the groups of equal cards, largest first.
    fn from_group_sizes(sizes: &[u8]) -> Self {
        match sizes {
            [5, ..] => Self::FiveOfAKind,
            [4, ..] => Self::FourOfAKind,
            [3, 2, ..] => Self::FullHouse,
            [3, ..] => Self::ThreeOfAKind,
            [2, 2, ..] => Self::TwoPair,
            [2, ..] => Self::OnePair,
            _ => Self::HighCard,
        }
    }
}

/// How `J` cards are read.
#[derive(Debug, Clone, Copy)]
enum JRule {
    Jack,
    Joker,
}

impl JRule {
    /// Strength of a card for breaking ties between hands of the same type.
    fn strength(self, card: Card) -> u8 {
        match self {
            Self::Jack => card + 1,
            Self::Joker if card == JACK => 0,
            Self::Joker => card + 1,
        }
    }

    fn hand_type(self, cards: &[Card; 5]) -> HandType {
        let mut counts = [0u8; LABELS.len()];
        for &card in cards {
            counts[usize::from(card)] += 1;
        }

        let jokers = match self {
            Self::Jack => 0,
            Self::Joker => std::mem::take(&mut counts[usize::from(JACK)]),
        };

        let mut sizes: Vec<u8> = counts.into_iter().filter(|&count| count > 0).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        // jokers always do best joining the largest group
        match sizes.first_mut() {
            Some(largest) => *largest += jokers,
            None => sizes.push(jokers),
        }
        HandType::from_group_sizes(&sizes)
    }
}

#[derive(Debug)]
struct Hand {
    cards: [Card; 5],
    bid: u32,
}

#[derive(thiserror::Error, Debug)]
enum ParseHandError {
    #[error("expected \"<cards> <bid>\"")]
    ExpectedHandBid,

    #[error("expected 5 cards, found {0}")]
    WrongCardCount(usize),

    #[error("unknown card label {0:?}")]
    UnknownLabel(char),
}

struct HandList(Vec<Hand>);

impl ParseData for HandList {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let hands = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let (cards_str, bid_str) = line
                .split_once(' ')
                .ok_or(ParseHandError::ExpectedHandBid)?;

            let cards: Vec<Card> = cards_str
                .chars()
                .map(|label| {
                    LABELS
                        .iter()
                        .position(|&known| char::from(known) == label)
                        .and_then(|index| Card::try_from(index).ok())
                        .ok_or(ParseHandError::UnknownLabel(label))
                })
                .collect::<Result<_, _>>()?;
            let card_count = cards.len();
            let cards: [Card; 5] = cards
                .try_into()
                .map_err(|_| ParseHandError::WrongCardCount(card_count))?;

            let bid: u32 = parse_with_context(bid_str.trim())?;
            Ok(Hand { cards, bid })
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(hands))
    }
}

/// Total winnings: each bid times the rank of its hand, weakest hand ranking 1.
fn total_winnings(hands: &[Hand], rule: JRule) -> DynamicResult<u64> {
    let mut ranked: Vec<(HandType, [u8; 5], u32)> = hands
        .iter()
        .map(|hand| {
            (
                rule.hand_type(&hand.cards),
                hand.cards.map(|card| rule.strength(card)),
                hand.bid,
            )
        })
        .collect();
    ranked.sort_unstable_by_key(|&(hand_type, strengths, _)| (hand_type, strengths));

    let winnings: Vec<u64> = ranked
        .iter()
        .zip(1u64..)
        .map(|(&(_, _, bid), rank)| rank.checked_mul(u64::from(bid)))
        .collect::<Option<_>>()
        .ok_or("winnings overflowed")?;
    Ok(winnings
        .into_iter()
        .checked_sum()
        .ok_or("total winnings overflowed")?)
}

/*
For part 1, hands rank first by type, five of a kind being strongest, then card by card from the
first card. Find the total winnings.
*/

struct Day07;

impl Solution<PartOne> for Day07 {
    type Input = HandList;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        total_winnings(&input.0, JRule::Jack)
    }
}

/*
For part 2, `J` cards are jokers. A joker acts as whatever card makes the strongest hand type, but
is the weakest card when breaking ties.
*/

impl Solution<PartTwo> for Day07 {
    type Input = HandList;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        total_winnings(&input.0, JRule::Joker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = HandList::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 6440);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = HandList::parse(EXAMPLE_INPUT)?;
        let result = <Day07 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 5905);
        Ok(())
    }

    fn hand_type(cards: &str, rule: JRule) -> DynamicResult<HandType> {
        let parsed = HandList::parse(&format!("{cards} 1"))?;
        Ok(rule.hand_type(&parsed.0[0].cards))
    }

    #[test]
    fn classifies_hand_types() -> DynamicResult<()> {
        assert_eq!(hand_type("AAAAA", JRule::Jack)?, HandType::FiveOfAKind);
        assert_eq!(hand_type("AA8AA", JRule::Jack)?, HandType::FourOfAKind);
        assert_eq!(hand_type("23332", JRule::Jack)?, HandType::FullHouse);
        assert_eq!(hand_type("TTT98", JRule::Jack)?, HandType::ThreeOfAKind);
        assert_eq!(hand_type("23432", JRule::Jack)?, HandType::TwoPair);
        assert_eq!(hand_type("A23A4", JRule::Jack)?, HandType::OnePair);
        assert_eq!(hand_type("23456", JRule::Jack)?, HandType::HighCard);
        Ok(())
    }

    #[test]
    fn jokers_join_the_largest_group() -> DynamicResult<()> {
        assert_eq!(hand_type("JJJJJ", JRule::Joker)?, HandType::FiveOfAKind);
        assert_eq!(hand_type("QJJQ2", JRule::Joker)?, HandType::FourOfAKind);
        assert_eq!(hand_type("2345J", JRule::Joker)?, HandType::OnePair);
        assert_eq!(hand_type("22J33", JRule::Joker)?, HandType::FullHouse);
        assert_eq!(hand_type("JJJJJ", JRule::Jack)?, HandType::FiveOfAKind);
        Ok(())
    }

    #[test]
    fn joker_is_weakest_in_ties() {
        assert!(JRule::Joker.strength(JACK) < JRule::Joker.strength(0));
        assert!(JRule::Jack.strength(JACK) > JRule::Jack.strength(0));
    }

    #[test]
    fn rejects_bad_hands() {
        assert!(HandList::parse("2345 1\n").is_err());
        assert!(HandList::parse("2345X 1\n").is_err());
        assert!(HandList::parse("23456\n").is_err());
    }
}
