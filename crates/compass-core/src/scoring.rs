//! Trait score normalization, modality bonus, and dominant-trait selection.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Modality, ScoreVector, Trait};

/// Percentage points added to each of the modality's bonus traits.
pub const MODALITY_BONUS: i32 = 5;

/// Upper bound applied when the bonus is added.
pub const BONUS_CLAMP: i32 = 100;

/// Per-trait raw score that maps to 100%.
///
/// Every entry is positive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxScores(ScoreVector);

impl MaxScores {
    /// The fixed table used by the shipped quiz.
    pub const DEFAULT: MaxScores = MaxScores(ScoreVector::from_array([40, 45, 45, 45, 45]));

    pub fn new(values: ScoreVector) -> Result<Self, QuizError> {
        match values.iter().find(|&(_, v)| v <= 0) {
            Some((t, _)) => Err(QuizError::ZeroMaxScore(t)),
            None => Ok(Self(values)),
        }
    }

    pub fn get(&self, t: Trait) -> i32 {
        self.0[t]
    }
}

impl Default for MaxScores {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Final outcome of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Percentages after normalization and the modality bonus.
    pub normalized_scores: ScoreVector,
    /// Highest-scoring trait; ties go to the earliest in enumeration order.
    pub top_trait: Trait,
    pub modality: Modality,
}

/// Convert raw scores into a [`QuizResult`].
pub fn compute_results(scores: &ScoreVector, modality: Modality, max: &MaxScores) -> QuizResult {
    let mut normalized = normalize(scores, max);
    apply_modality_bonus(&mut normalized, modality);
    let top_trait = top_trait(&normalized);

    tracing::debug!(%modality, %top_trait, ?normalized, "computed quiz results");

    QuizResult {
        normalized_scores: normalized,
        top_trait,
        modality,
    }
}

/// `round(100 * score / max)` for every trait, rounding halves up.
pub fn normalize(scores: &ScoreVector, max: &MaxScores) -> ScoreVector {
    ScoreVector::from_pairs(Trait::ALL.map(|t| (t, percent(scores[t], max.get(t)))))
}

/// Add [`MODALITY_BONUS`] to the modality's traits, capped at [`BONUS_CLAMP`].
pub fn apply_modality_bonus(normalized: &mut ScoreVector, modality: Modality) {
    for t in modality.bonus_traits() {
        normalized[t] = normalized[t].saturating_add(MODALITY_BONUS).min(BONUS_CLAMP);
    }
}

/// The first trait, in enumeration order, holding the maximum value.
pub fn top_trait(scores: &ScoreVector) -> Trait {
    let mut best = Trait::ALL[0];
    for t in Trait::ALL.into_iter().skip(1) {
        if scores[t] > scores[best] {
            best = t;
        }
    }
    best
}

// floor(100 * score / max + 1/2) in exact integer arithmetic, saturating at
// the i32 range; max > 0.
fn percent(score: i32, max: i32) -> i32 {
    let max = i64::from(max);
    let twice = 200 * i64::from(score) + max;
    let quotient = twice.div_euclid(2 * max);
    quotient.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: [i32; 5]) -> ScoreVector {
        ScoreVector::from_array(values)
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(40, 40), 100);
        assert_eq!(percent(1, 45), 2);
        assert_eq!(percent(9, 40), 23); // 22.5
        assert_eq!(percent(-9, 40), -22); // -22.5
        assert_eq!(percent(-1, 45), -2);
        assert_eq!(percent(0, 45), 0);
    }

    #[test]
    fn single_choice_hero_example() {
        let raw = ScoreVector::from_pairs([(Trait::Extraversion, 40)]);
        let result = compute_results(&raw, Modality::Hero, &MaxScores::DEFAULT);
        assert_eq!(result.normalized_scores[Trait::Extraversion], 100);
        assert_eq!(result.normalized_scores[Trait::Conscientiousness], 5);
        assert_eq!(result.normalized_scores[Trait::Agreeableness], 0);
        assert_eq!(result.top_trait, Trait::Extraversion);
        assert_eq!(result.modality, Modality::Hero);
    }

    #[test]
    fn empty_team_session_breaks_tie_by_order() {
        let result = compute_results(&ScoreVector::zero(), Modality::Team, &MaxScores::DEFAULT);
        assert_eq!(result.normalized_scores, scores([0, 5, 5, 0, 0]));
        assert_eq!(result.top_trait, Trait::Agreeableness);
    }

    #[test]
    fn bonus_is_clamped_at_100() {
        let mut normalized = scores([100, 98, 100, 0, 0]);
        apply_modality_bonus(&mut normalized, Modality::Team);
        assert_eq!(normalized[Trait::Agreeableness], 100);
        assert_eq!(normalized[Trait::Conscientiousness], 100);
        assert_eq!(normalized[Trait::Extraversion], 100);
    }

    #[test]
    fn tie_break_prefers_enumeration_order() {
        assert_eq!(top_trait(&scores([10, 10, 10, 10, 10])), Trait::Extraversion);
        assert_eq!(top_trait(&scores([0, 3, 7, 7, 7])), Trait::Conscientiousness);
        assert_eq!(top_trait(&scores([0, 0, 0, 1, 1])), Trait::Neuroticism);
        assert_eq!(top_trait(&scores([-5, -3, -4, -9, -3])), Trait::Agreeableness);
    }

    #[test]
    fn normalization_is_monotonic() {
        for t in Trait::ALL {
            let mut previous = i32::MIN;
            for raw in -60..=60 {
                let n = normalize(&ScoreVector::from_pairs([(t, raw)]), &MaxScores::DEFAULT)[t];
                assert!(n >= previous, "{t}: raw {raw} gave {n} < {previous}");
                previous = n;
            }
        }
    }

    #[test]
    fn normalization_saturates_for_huge_scores() {
        let samples = [
            i32::MIN,
            i32::MIN + 1,
            -900_000_000,
            -800_000_000,
            -1,
            0,
            1,
            800_000_000,
            860_000_000,
            900_000_000,
            i32::MAX - 1,
            i32::MAX,
        ];
        for t in Trait::ALL {
            let values: Vec<i32> = samples
                .iter()
                .map(|&raw| normalize(&ScoreVector::from_pairs([(t, raw)]), &MaxScores::DEFAULT)[t])
                .collect();
            assert!(
                values.windows(2).all(|w| w[0] <= w[1]),
                "{t}: not monotonic: {values:?}"
            );
        }

        let raw = ScoreVector::from_pairs([(Trait::Extraversion, 900_000_000)]);
        assert_eq!(normalize(&raw, &MaxScores::DEFAULT)[Trait::Extraversion], i32::MAX);
        assert_eq!(percent(i32::MIN, 40), i32::MIN);
    }

    #[test]
    fn huge_scores_keep_the_top_trait() {
        let raw = ScoreVector::from_pairs([(Trait::Openness, 900_000_000), (Trait::Agreeableness, 10)]);
        let result = compute_results(&raw, Modality::Hero, &MaxScores::DEFAULT);
        assert_eq!(result.top_trait, Trait::Openness);

        let mut normalized = ScoreVector::from_pairs([(Trait::Extraversion, i32::MAX)]);
        apply_modality_bonus(&mut normalized, Modality::Hero);
        assert_eq!(normalized[Trait::Extraversion], BONUS_CLAMP);
    }

    #[test]
    fn over_max_is_not_clamped_without_bonus() {
        let raw = ScoreVector::from_pairs([(Trait::Openness, 50)]);
        let result = compute_results(&raw, Modality::Hero, &MaxScores::DEFAULT);
        assert_eq!(result.normalized_scores[Trait::Openness], 111);
        assert_eq!(result.top_trait, Trait::Openness);
    }

    #[test]
    fn max_scores_reject_zero() {
        let err = MaxScores::new(scores([40, 45, 0, 45, 45])).unwrap_err();
        assert_eq!(err, QuizError::ZeroMaxScore(Trait::Conscientiousness));
        assert!(MaxScores::new(scores([1, 1, 1, 1, 1])).is_ok());
        assert_eq!(MaxScores::default().get(Trait::Extraversion), 40);
    }
}
