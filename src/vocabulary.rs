use std::collections::BTreeSet;

use tracing::info;

use crate::config::TriggersConfig;
use crate::providers::{BreedSource, ProviderError};

/// Emoji that mark a message or sticker as dog-related.
pub const DOG_EMOJIS: &[&str] = &["🐶", "🐕", "🐩", "🌭", "🦮", "🦴", "🐾"];

// Word prefixes, so "pup" already covers "puppy" and "pupper"
const DOG_WORDS: &[&str] = &["woof", "bark", "pup", "dog", "perr", "lomito", "pooch"];

const FOX_TRIGGERS: &[&str] = &["🦊", "zorr", "fox", "vixen", "fennec"];

const WOLF_TRIGGERS: &[&str] = &["🐺", "wolf", "wolves", "lobo", "howl"];

const SAD_TRIGGERS: &[&str] = &[
    "😔",
    "😢",
    "😭",
    "😓",
    "😞",
    "💔",
    "sad",
    "unhappy",
    "depressed",
    "miserable",
    "down",
    "downhearted",
    "triste",
    "despechad",
    "deprimid",
    "tusa",
];

/// How a trigger is compared against a candidate word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// The word starts with the trigger.
    WordPrefix,
    /// The trigger appears anywhere inside the candidate.
    Substring,
}

/// An immutable, lowercase set of triggers for one category.
#[derive(Debug, Clone)]
pub struct TriggerSet {
    rule: MatchRule,
    triggers: Vec<String>,
}

impl TriggerSet {
    pub fn new<I, S>(rule: MatchRule, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let triggers = triggers
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        Self { rule, triggers }
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Whether any candidate matches any trigger under this set's rule.
    /// Candidates are expected to be lowercase already.
    pub fn matches<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates.into_iter().any(|candidate| {
            self.triggers.iter().any(|trigger| match self.rule {
                MatchRule::WordPrefix => candidate.starts_with(trigger.as_str()),
                MatchRule::Substring => candidate.contains(trigger.as_str()),
            })
        })
    }
}

/// Every trigger category the classifier consults, built once at startup.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub dog: TriggerSet,
    pub fox: TriggerSet,
    pub wolf: TriggerSet,
    pub sad: TriggerSet,
    /// Checked against sticker emoji by containment.
    pub dog_emoji: TriggerSet,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::with_extras(&TriggersConfig::default())
    }
}

impl Vocabulary {
    /// Built-in triggers plus any extra ones from `[triggers]`.
    pub fn with_extras(extra: &TriggersConfig) -> Self {
        let dog_builtin: Vec<&str> = DOG_WORDS.iter().chain(DOG_EMOJIS).copied().collect();

        Self {
            dog: prefix_set(&dog_builtin, &extra.dog),
            fox: prefix_set(FOX_TRIGGERS, &extra.fox),
            wolf: prefix_set(WOLF_TRIGGERS, &extra.wolf),
            sad: prefix_set(SAD_TRIGGERS, &extra.sad),
            dog_emoji: TriggerSet::new(MatchRule::Substring, DOG_EMOJIS),
        }
    }
}

fn prefix_set(builtin: &[&str], extra: &[String]) -> TriggerSet {
    let all = builtin
        .iter()
        .map(|t| t.to_string())
        .chain(extra.iter().cloned());
    TriggerSet::new(MatchRule::WordPrefix, all)
}

/// Known breed names in the order the breed source returned them.
#[derive(Debug, Clone)]
pub struct BreedRegistry {
    breeds: Vec<String>,
}

impl BreedRegistry {
    /// Fetch the breed list once. An unreachable source or an empty list is
    /// an error: the bot must not serve without breed detection.
    pub async fn fetch(source: &dyn BreedSource) -> Result<Self, ProviderError> {
        let breeds = source.fetch_all_breeds().await?;
        let registry = Self::from_names(breeds)?;
        info!("Loaded {} dog breeds", registry.len());
        Ok(registry)
    }

    pub fn from_names<I, S>(names: I) -> Result<Self, ProviderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let breeds: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty() && seen.insert(n.clone()))
            .collect();

        if breeds.is_empty() {
            return Err(ProviderError::Malformed(
                "breed list is empty".to_string(),
            ));
        }
        Ok(Self { breeds })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.breeds.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }
}
