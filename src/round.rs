//! Round generation: which item is asked, which four choices fill the
//! quadrants, and which direction (script) the prompt is shown in.

use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index;

use crate::bank::{CHOICES_PER_ROUND, CognateItem, WordBank};
use crate::config::Presentation;
use crate::drag::Quadrant;

/// Session-wide direction choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Mode {
    /// Arabic shown, Hebrew meaning expected ("Arabic for Hebrew Speakers").
    SourceToTarget,
    /// Hebrew shown, Arabic meaning expected ("Hebrew for Arabic Speakers").
    TargetToSource,
    /// Direction picked at random each round.
    Mixed,
}

impl Mode {
    pub fn id(self) -> &'static str {
        match self {
            Mode::SourceToTarget => "arabic-to-hebrew",
            Mode::TargetToSource => "hebrew-to-arabic",
            Mode::Mixed => "mix",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::SourceToTarget => "Arabic for Hebrew Speakers",
            Mode::TargetToSource => "Hebrew for Arabic Speakers",
            Mode::Mixed => "Mix Mode",
        }
    }

    fn direction<R: Rng + ?Sized>(self, rng: &mut R) -> Direction {
        match self {
            Mode::SourceToTarget => Direction::SourceToTarget,
            Mode::TargetToSource => Direction::TargetToSource,
            Mode::Mixed => {
                if rng.gen_bool(0.5) {
                    Direction::SourceToTarget
                } else {
                    Direction::TargetToSource
                }
            }
        }
    }
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arabic-to-hebrew" => Ok(Mode::SourceToTarget),
            "hebrew-to-arabic" => Ok(Mode::TargetToSource),
            "mix" => Ok(Mode::Mixed),
            _ => Err(()),
        }
    }
}

/// Resolved per-round direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Direction {
    SourceToTarget,
    TargetToSource,
}

impl Direction {
    /// Asset tag of the morph animation for this direction.
    pub fn morph_tag(self) -> &'static str {
        match self {
            Direction::SourceToTarget => "ArHb",
            Direction::TargetToSource => "HbAr",
        }
    }

    /// Text shown as the prompt.
    pub fn prompt_text(self, item: &CognateItem) -> &str {
        match self {
            Direction::SourceToTarget => &item.target_text,
            Direction::TargetToSource => &item.source_text,
        }
    }

    /// Text the prompt morphs into / the answer script.
    pub fn answer_text(self, item: &CognateItem) -> &str {
        match self {
            Direction::SourceToTarget => &item.source_text,
            Direction::TargetToSource => &item.target_text,
        }
    }
}

/// One generated round. Choices are item ids in quadrant order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub index: u32,
    pub direction: Direction,
    pub choices: [u32; CHOICES_PER_ROUND],
    pub correct: usize,
}

impl Round {
    pub fn correct_id(&self) -> u32 {
        self.choices[self.correct]
    }

    pub fn correct_quadrant(&self) -> Quadrant {
        Quadrant::ALL[self.correct]
    }

    pub fn is_correct(&self, dropped: Quadrant) -> bool {
        dropped.index() == self.correct
    }
}

/// Builds a fresh round. The bank is validated to hold at least
/// `CHOICES_PER_ROUND` items, so sampling never runs dry here.
pub fn generate_round<R: Rng + ?Sized>(
    bank: &WordBank,
    mode: Mode,
    presentation: Presentation,
    index: u32,
    rng: &mut R,
) -> Round {
    let direction = mode.direction(rng);
    let items = bank.items();
    let (choices, correct) = match presentation {
        Presentation::Text => pick_target_then_distractors(items, rng),
        Presentation::Image => pick_four_then_target(items, rng),
    };
    Round {
        index,
        direction,
        choices,
        correct,
    }
}

/// Target first, then three distractors from the rest, then a uniform shuffle.
fn pick_target_then_distractors<R: Rng + ?Sized>(
    items: &[CognateItem],
    rng: &mut R,
) -> ([u32; CHOICES_PER_ROUND], usize) {
    let target = rng.gen_range(0..items.len());
    let mut picked = vec![target];
    // Sample over the bank minus the target, then map indices past it.
    for i in index::sample(rng, items.len() - 1, CHOICES_PER_ROUND - 1) {
        picked.push(if i >= target { i + 1 } else { i });
    }
    picked.shuffle(rng);
    let mut choices = [0u32; CHOICES_PER_ROUND];
    for (slot, &i) in choices.iter_mut().zip(&picked) {
        *slot = items[i].id;
    }
    let correct = picked.iter().position(|&i| i == target).unwrap_or(0);
    (choices, correct)
}

/// Four distinct items via partial Fisher-Yates, then one slot picked as the answer.
fn pick_four_then_target<R: Rng + ?Sized>(
    items: &[CognateItem],
    rng: &mut R,
) -> ([u32; CHOICES_PER_ROUND], usize) {
    let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
    let mut choices = [0u32; CHOICES_PER_ROUND];
    for (slot, &id) in choices
        .iter_mut()
        .zip(ids.choose_multiple(rng, CHOICES_PER_ROUND))
    {
        *slot = id;
    }
    choices.shuffle(rng);
    (choices, rng.gen_range(0..CHOICES_PER_ROUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn assert_valid(round: &Round, bank: &WordBank) {
        let distinct: HashSet<u32> = round.choices.iter().copied().collect();
        assert_eq!(distinct.len(), 4, "choices not distinct: {:?}", round.choices);
        assert!(round.correct < 4);
        for id in round.choices {
            assert!(bank.get(id).is_some());
        }
        let concepts: HashSet<&str> = round
            .choices
            .iter()
            .map(|id| bank.get(*id).unwrap().concept.as_str())
            .collect();
        assert_eq!(concepts.len(), 4);
    }

    #[test]
    fn test_rounds_have_four_distinct_choices() {
        let mut rng = StdRng::seed_from_u64(7);
        for presentation in [Presentation::Text, Presentation::Image] {
            let bank = crate::config::SessionConfig::default()
                .with_presentation(presentation)
                .default_bank()
                .unwrap();
            for i in 1..=500 {
                let r = generate_round(&bank, Mode::Mixed, presentation, i, &mut rng);
                assert_valid(&r, &bank);
                assert_eq!(r.index, i);
                assert!(r.is_correct(r.correct_quadrant()));
            }
        }
    }

    #[test]
    fn test_minimal_bank_uses_every_item() {
        let bank = WordBank::numbered_assets(4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for presentation in [Presentation::Text, Presentation::Image] {
            let r = generate_round(&bank, Mode::SourceToTarget, presentation, 1, &mut rng);
            let mut ids = r.choices;
            ids.sort_unstable();
            assert_eq!(ids, [1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_correct_position_roughly_uniform() {
        let bank = WordBank::cognates().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 4];
        for i in 0..4000 {
            let r = generate_round(&bank, Mode::SourceToTarget, Presentation::Text, i, &mut rng);
            counts[r.correct] += 1;
        }
        for c in counts {
            assert!((800..1200).contains(&c), "skewed positions: {counts:?}");
        }
    }

    #[test]
    fn test_mode_direction() {
        let bank = WordBank::cognates().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let r = generate_round(&bank, Mode::SourceToTarget, Presentation::Text, 1, &mut rng);
        assert_eq!(r.direction, Direction::SourceToTarget);
        let item = bank.get(r.correct_id()).unwrap();
        assert_eq!(r.direction.prompt_text(item), item.target_text);
        let r = generate_round(&bank, Mode::TargetToSource, Presentation::Text, 2, &mut rng);
        assert_eq!(r.direction, Direction::TargetToSource);
        assert_eq!(r.direction.morph_tag(), "HbAr");

        let mut seen = HashSet::new();
        for i in 0..64 {
            seen.insert(generate_round(&bank, Mode::Mixed, Presentation::Text, i, &mut rng).direction);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("mix".parse::<Mode>(), Ok(Mode::Mixed));
        assert_eq!("arabic-to-hebrew".parse::<Mode>(), Ok(Mode::SourceToTarget));
        assert_eq!(Mode::TargetToSource.id().parse::<Mode>(), Ok(Mode::TargetToSource));
        assert!("klingon".parse::<Mode>().is_err());
        assert!("".parse::<Mode>().is_err());
    }
}
