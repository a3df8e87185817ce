//! Sentiment scoring.
//!
//! [`SentimentScorer`] is the seam to the scoring backend. [`LexiconScorer`] is
//! the built-in rule-based backend: a valence lexicon with negation, booster
//! words and exclamation emphasis, normalized the way VADER normalizes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Compound in [-1, 1]; the three proportions in [0, 1] summing to ~1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentScores {
    /// Scores for text with no sentiment at all.
    pub const NEUTRAL: SentimentScores = SentimentScores {
        compound: 0.0,
        positive: 0.0,
        neutral: 1.0,
        negative: 0.0,
    };

    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_compound(compound: f64) -> Self {
        if compound >= 0.05 {
            SentimentLabel::Positive
        } else if compound <= -0.05 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        })
    }
}

/// Per-label counts over a batch of texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn add(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Maps text to polarity scores. Implementations must be pure so they can be
/// shared across tasks.
pub trait SentimentScorer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> SentimentScores;
}

/// Score text, treating blank input as neutral without consulting the scorer.
pub fn analyze_sentiment(text: &str, scorer: &dyn SentimentScorer) -> SentimentScores {
    if text.trim().is_empty() {
        return SentimentScores::NEUTRAL;
    }
    scorer.polarity_scores(text)
}

/// Count comment sentiment labels; blank comments are skipped.
pub fn analyze_comments_sentiment<S: AsRef<str>>(
    comments: &[S],
    scorer: &dyn SentimentScorer,
) -> SentimentCounts {
    let mut counts = SentimentCounts::default();
    for comment in comments {
        let comment = comment.as_ref();
        if comment.trim().is_empty() {
            continue;
        }
        counts.add(analyze_sentiment(comment, scorer).label());
    }
    counts
}

const NEGATION_SCALAR: f64 = -0.74;
const BOOST_INCREMENT: f64 = 0.293;
const EXCLAMATION_EMPHASIS: f64 = 0.292;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Valences on the -4..4 scale.
const LEXICON: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("clean", 1.7),
    ("cool", 1.3),
    ("easy", 1.9),
    ("enjoy", 2.2),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fantastic", 2.6),
    ("fast", 1.0),
    ("fine", 0.8),
    ("fun", 2.3),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressive", 2.5),
    ("improved", 2.1),
    ("incredible", 2.5),
    ("like", 1.5),
    ("love", 3.2),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("powerful", 1.8),
    ("reliable", 1.9),
    ("smart", 1.7),
    ("solid", 1.3),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("wow", 2.8),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("broken", -2.1),
    ("bug", -1.0),
    ("buggy", -1.6),
    ("crap", -1.6),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("frustrating", -1.9),
    ("garbage", -2.2),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("lazy", -1.4),
    ("mess", -1.5),
    ("nerfed", -1.5),
    ("overpriced", -1.8),
    ("problem", -1.7),
    ("sad", -2.1),
    ("scam", -2.6),
    ("slow", -1.2),
    ("stupid", -2.4),
    ("terrible", -2.1),
    ("useless", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "neither", "nor", "cannot", "cant", "can't",
    "dont", "don't", "doesnt", "doesn't", "didnt", "didn't", "isnt", "isn't", "wasnt", "wasn't",
    "arent", "aren't", "wont", "won't", "without", "hardly", "barely",
];

/// Booster words; positive entries intensify, negative ones dampen.
const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("super", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("absolutely", BOOST_INCREMENT),
    ("slightly", -BOOST_INCREMENT),
    ("somewhat", -BOOST_INCREMENT),
    ("barely", -BOOST_INCREMENT),
    ("kinda", -BOOST_INCREMENT),
    ("marginally", -BOOST_INCREMENT),
];

/// Built-in rule-based scorer.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            words: LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        }
    }

    fn valence_at(&self, tokens: &[String], i: usize) -> f64 {
        let Some(&base) = self.words.get(tokens[i].as_str()) else {
            return 0.0;
        };
        let mut valence = base;
        // Boosters within three preceding tokens, damped with distance.
        for (k, damp) in [(1usize, 1.0), (2, 0.95), (3, 0.9)] {
            if i >= k
                && let Some(&scalar) = self.boosters.get(tokens[i - k].as_str())
            {
                valence += scalar * damp * valence.signum();
            }
        }
        let negated = (1..=3).any(|k| i >= k && NEGATIONS.contains(&tokens[i - k].as_str()));
        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

impl SentimentScorer for LexiconScorer {
    fn polarity_scores(&self, text: &str) -> SentimentScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentScores::NEUTRAL;
        }
        let valences: Vec<f64> = (0..tokens.len()).map(|i| self.valence_at(&tokens, i)).collect();

        let exclamations = text.matches('!').count().min(4) as f64 * EXCLAMATION_EMPHASIS;
        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += exclamations;
        } else if sum < 0.0 {
            sum -= exclamations;
        }
        let compound = if sum == 0.0 { 0.0 } else { normalize(sum) };

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &v in &valences {
            if v > 0.0 {
                pos_sum += v + 1.0;
            } else if v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += exclamations;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= exclamations;
        }
        let total = pos_sum + neg_sum.abs() + neu_count;
        SentimentScores {
            compound: round3(compound),
            positive: round3((pos_sum / total).abs()),
            neutral: round3((neu_count / total).abs()),
            negative: round3((neg_sum / total).abs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_neutral() {
        let s = LexiconScorer::new();
        assert_eq!(analyze_sentiment("", &s), SentimentScores::NEUTRAL);
        assert_eq!(analyze_sentiment("  \n", &s), SentimentScores::NEUTRAL);
        assert_eq!(analyze_sentiment("--- ...", &s), SentimentScores::NEUTRAL);
    }

    #[test]
    fn polarity_direction() {
        let s = LexiconScorer::new();
        let pos = analyze_sentiment("I love Claude, it is great", &s);
        assert!(pos.compound > 0.5, "{:?}", pos);
        assert_eq!(pos.label(), SentimentLabel::Positive);
        let neg = analyze_sentiment("This update is terrible and I hate it", &s);
        assert!(neg.compound < -0.5, "{:?}", neg);
        assert_eq!(neg.label(), SentimentLabel::Negative);
        let flat = analyze_sentiment("The model was released on Tuesday", &s);
        assert_eq!(flat.compound, 0.0);
        assert_eq!(flat.neutral, 1.0);
    }

    #[test]
    fn negation_flips_and_boosters_scale() {
        let s = LexiconScorer::new();
        assert!(s.polarity_scores("this is not good").compound < 0.0);
        let plain = s.polarity_scores("this is good").compound;
        let boosted = s.polarity_scores("this is very good").compound;
        let damped = s.polarity_scores("this is slightly good").compound;
        assert!(boosted > plain && plain > damped);
        let shouted = s.polarity_scores("this is good!!!").compound;
        assert!(shouted > plain);
    }

    #[test]
    fn proportions_sum_to_one() {
        let s = LexiconScorer::new();
        let r = s.polarity_scores("great speed but awful pricing and a weird UI");
        let sum = r.positive + r.neutral + r.negative;
        assert!((sum - 1.0).abs() < 0.01, "{:?}", r);
        assert!(r.positive > 0.0 && r.negative > 0.0);
    }

    #[test]
    fn labels_follow_thresholds() {
        assert_eq!(SentimentLabel::from_compound(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(0.049), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_compound(-0.05), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::Negative.to_string(), "negative");
    }

    #[test]
    fn comment_counts_skip_blank() {
        let s = LexiconScorer::new();
        let comments = vec!["love it", "", "hate it", "   ", "it exists"];
        let counts = analyze_comments_sentiment(&comments, &s);
        assert_eq!(
            counts,
            SentimentCounts {
                positive: 1,
                neutral: 1,
                negative: 1
            }
        );
        assert_eq!(counts.total(), 3);
    }
}
