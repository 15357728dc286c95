//! Core data model types for compass.
//!
//! A quiz is an ordered list of questions; each choice carries a weight per
//! personality trait. Traits form a closed set so every score table is a
//! fixed-size array indexed by [`Trait`].

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five personality dimensions tracked by a quiz.
///
/// Declaration order is the enumeration order used for iteration,
/// serialization, and tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Extraversion,
    Agreeableness,
    Conscientiousness,
    Neuroticism,
    Openness,
}

impl Trait {
    /// All traits in enumeration order.
    pub const ALL: [Trait; 5] = [
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::Conscientiousness,
        Trait::Neuroticism,
        Trait::Openness,
    ];

    /// Capitalized display name (e.g. "Extraversion").
    pub fn label(self) -> &'static str {
        match self {
            Trait::Extraversion => "Extraversion",
            Trait::Agreeableness => "Agreeableness",
            Trait::Conscientiousness => "Conscientiousness",
            Trait::Neuroticism => "Neuroticism",
            Trait::Openness => "Openness",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trait::Extraversion => write!(f, "extraversion"),
            Trait::Agreeableness => write!(f, "agreeableness"),
            Trait::Conscientiousness => write!(f, "conscientiousness"),
            Trait::Neuroticism => write!(f, "neuroticism"),
            Trait::Openness => write!(f, "openness"),
        }
    }
}

impl FromStr for Trait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extraversion" => Ok(Trait::Extraversion),
            "agreeableness" => Ok(Trait::Agreeableness),
            "conscientiousness" => Ok(Trait::Conscientiousness),
            "neuroticism" => Ok(Trait::Neuroticism),
            "openness" => Ok(Trait::Openness),
            other => Err(format!("unknown trait: {other}")),
        }
    }
}

/// The role a user declares before the quiz starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Hero,
    Team,
}

impl Modality {
    /// Traits that receive the modality bonus after normalization.
    pub fn bonus_traits(self) -> [Trait; 2] {
        match self {
            Modality::Hero => [Trait::Extraversion, Trait::Conscientiousness],
            Modality::Team => [Trait::Agreeableness, Trait::Conscientiousness],
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Hero => write!(f, "hero"),
            Modality::Team => write!(f, "team"),
        }
    }
}

impl FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hero" => Ok(Modality::Hero),
            "team" => Ok(Modality::Team),
            other => Err(format!("unknown modality: {other} (expected hero or team)")),
        }
    }
}

/// An integer score for every trait.
///
/// Serialized as a JSON object keyed by trait name. Missing keys read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Trait, i32>", into = "BTreeMap<Trait, i32>")]
pub struct ScoreVector([i32; 5]);

impl ScoreVector {
    /// All traits at zero.
    pub const fn zero() -> Self {
        Self([0; 5])
    }

    /// Build from values given in enumeration order.
    pub const fn from_array(values: [i32; 5]) -> Self {
        Self(values)
    }

    /// Build from `(trait, value)` pairs; unspecified traits are 0.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Trait, i32)>,
    {
        let mut scores = Self::zero();
        for (t, value) in pairs {
            scores[t] = value;
        }
        scores
    }

    pub fn get(&self, t: Trait) -> i32 {
        self[t]
    }

    /// Element-wise addition, saturating at the i32 bounds.
    pub fn add(&mut self, other: &ScoreVector) {
        for t in Trait::ALL {
            self[t] = self[t].saturating_add(other[t]);
        }
    }

    /// Element-wise subtraction, saturating at the i32 bounds.
    pub fn sub(&mut self, other: &ScoreVector) {
        for t in Trait::ALL {
            self[t] = self[t].saturating_sub(other[t]);
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    /// Iterate `(trait, value)` in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, i32)> + '_ {
        Trait::ALL.into_iter().map(move |t| (t, self[t]))
    }
}

impl Index<Trait> for ScoreVector {
    type Output = i32;

    fn index(&self, t: Trait) -> &i32 {
        &self.0[t.position()]
    }
}

impl IndexMut<Trait> for ScoreVector {
    fn index_mut(&mut self, t: Trait) -> &mut i32 {
        &mut self.0[t.position()]
    }
}

impl From<BTreeMap<Trait, i32>> for ScoreVector {
    fn from(map: BTreeMap<Trait, i32>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<ScoreVector> for BTreeMap<Trait, i32> {
    fn from(scores: ScoreVector) -> Self {
        scores.iter().collect()
    }
}

/// A selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Display text.
    pub text: String,
    /// Weight added to each trait when this choice is picked.
    #[serde(default)]
    pub scores: ScoreVector,
}

impl Choice {
    pub fn new(text: impl Into<String>, scores: ScoreVector) -> Self {
        Self {
            text: text.into(),
            scores,
        }
    }
}

/// A question with its ordered choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Display text.
    pub question: String,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn new(question: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            question: question.into(),
            choices,
        }
    }
}

/// An ordered, immutable sequence of questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
