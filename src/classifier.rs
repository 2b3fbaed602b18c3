use std::collections::BTreeSet;

use tracing::debug;

use crate::platform::{ChatKind, IncomingMessage};
use crate::responses::{select_caption, CaptionKind};
use crate::vocabulary::{BreedRegistry, TriggerSet, Vocabulary};

/// Per-message signals. Computed fresh for every message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationSignals {
    pub mentioned_breed: Option<String>,
    pub has_fox_reference: bool,
    pub has_wolf_reference: bool,
    pub is_sad: bool,
    pub mentions_dog: bool,
    pub is_personal_chat: bool,
}

/// The action picked for a message, before any caption is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Silent,
    Fox,
    Wolf,
    SadDog { breed: Option<String> },
    Dog { breed: Option<String> },
}

impl ClassificationSignals {
    /// Fox, then wolf, then sadness, then any dog signal. First match wins.
    pub fn outcome(&self) -> Outcome {
        if self.has_fox_reference {
            Outcome::Fox
        } else if self.has_wolf_reference {
            Outcome::Wolf
        } else if self.is_sad {
            Outcome::SadDog {
                breed: self.mentioned_breed.clone(),
            }
        } else if self.mentions_dog || self.is_personal_chat || self.mentioned_breed.is_some() {
            Outcome::Dog {
                breed: self.mentioned_breed.clone(),
            }
        } else {
            Outcome::Silent
        }
    }
}

/// At most one of these is produced per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseDirective {
    None,
    DogGeneric { caption: String },
    DogBreed { breed: String, caption: String },
    Fox { caption: String },
    Wolf { caption: String },
}

impl ResponseDirective {
    /// Attach a caption to the outcome.
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Silent => Self::None,
            Outcome::Fox => Self::Fox {
                caption: select_caption(CaptionKind::Fox),
            },
            Outcome::Wolf => Self::Wolf {
                caption: select_caption(CaptionKind::Wolf),
            },
            Outcome::SadDog { breed } => Self::dog(breed, select_caption(CaptionKind::DogSad)),
            Outcome::Dog { breed } => Self::dog(breed, select_caption(CaptionKind::DogRandom)),
        }
    }

    pub fn random_dog() -> Self {
        Self::dog(None, select_caption(CaptionKind::DogRandom))
    }

    fn dog(breed: Option<String>, caption: String) -> Self {
        match breed {
            Some(breed) => Self::DogBreed { breed, caption },
            None => Self::DogGeneric { caption },
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::DogGeneric { caption }
            | Self::DogBreed { caption, .. }
            | Self::Fox { caption }
            | Self::Wolf { caption } => Some(caption),
        }
    }
}

/// First breed, in registry order, that appears inside any word.
///
/// Matching is by substring, so "pug" is found in "pugs" and "pugtastic!".
pub fn find_mentioned_breed<'a>(
    breeds: &'a BreedRegistry,
    words: &BTreeSet<String>,
) -> Option<&'a str> {
    breeds
        .iter()
        .find(|breed| words.iter().any(|word| word.contains(breed)))
}

/// True iff the sticker has an emoji containing any dog emoji.
pub fn is_dog_sticker(emoji: Option<&str>, dog_emoji: &TriggerSet) -> bool {
    emoji.is_some_and(|e| dog_emoji.matches([e]))
}

/// Pure message classification over the startup vocabulary and breed list.
pub struct Classifier {
    vocabulary: Vocabulary,
    breeds: BreedRegistry,
}

impl Classifier {
    pub fn new(vocabulary: Vocabulary, breeds: BreedRegistry) -> Self {
        Self { vocabulary, breeds }
    }

    pub fn classify(&self, words: &BTreeSet<String>, chat_kind: ChatKind) -> ClassificationSignals {
        let hits = |set: &TriggerSet| set.matches(words.iter().map(String::as_str));

        ClassificationSignals {
            mentioned_breed: find_mentioned_breed(&self.breeds, words).map(str::to_string),
            has_fox_reference: hits(&self.vocabulary.fox),
            has_wolf_reference: hits(&self.vocabulary.wolf),
            is_sad: hits(&self.vocabulary.sad),
            mentions_dog: hits(&self.vocabulary.dog),
            is_personal_chat: chat_kind.is_personal(),
        }
    }

    /// Directive for a text message.
    pub fn directive_for_text(&self, message: &IncomingMessage) -> ResponseDirective {
        debug!("Received message: {}", message.raw_text);
        debug!(
            "Split words: {}",
            message.words.iter().cloned().collect::<Vec<_>>().join(", ")
        );

        let signals = self.classify(&message.words, message.chat_kind);
        let outcome = signals.outcome();
        debug!(?signals, ?outcome, "Classified message");
        ResponseDirective::from_outcome(outcome)
    }

    /// Directive for a sticker message: a random dog for dog stickers, else nothing.
    pub fn directive_for_sticker(&self, message: &IncomingMessage) -> ResponseDirective {
        if is_dog_sticker(message.sticker_emoji.as_deref(), &self.vocabulary.dog_emoji) {
            ResponseDirective::random_dog()
        } else {
            ResponseDirective::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::tokenize;
    use crate::responses::{DOG_SOUNDS, FOX_SOUNDS, SAD_CAPTION};

    fn classifier() -> Classifier {
        let breeds = BreedRegistry::from_names(["pug", "collie", "dalmatian"]).unwrap();
        Classifier::new(Vocabulary::default(), breeds)
    }

    fn outcome(text: &str, chat_kind: ChatKind) -> Outcome {
        classifier().classify(&tokenize(text), chat_kind).outcome()
    }

    #[test]
    fn test_group_dog_messages_trigger_dog() {
        for text in [
            "I really like dogs",
            "Dogs go woof",
            "woof woof",
            "I have a new pup",
            "I have a new pupper",
            "tengo un perro",
            "mira mi lomito",
            "look a doggo",
            "look! a! doggo!",
            "puppy!",
            "woof!",
            "pooch!",
        ] {
            assert_eq!(outcome(text, ChatKind::Group), Outcome::Dog { breed: None }, "{text}");
        }
    }

    #[test]
    fn test_group_message_without_triggers_is_silent() {
        assert_eq!(outcome("I really like plants", ChatKind::Group), Outcome::Silent);
        assert_eq!(outcome("hello there", ChatKind::Supergroup), Outcome::Silent);
    }

    #[test]
    fn test_personal_chat_always_gets_a_dog() {
        assert_eq!(outcome("hello there", ChatKind::Private), Outcome::Dog { breed: None });
    }

    #[test]
    fn test_empty_message_yields_all_false_signals() {
        let signals = classifier().classify(&BTreeSet::new(), ChatKind::Group);
        assert_eq!(signals, ClassificationSignals::default());
        assert_eq!(signals.outcome(), Outcome::Silent);
    }

    #[test]
    fn test_sad_messages() {
        for text in [
            "sad",
            "i'm really sad right now",
            "😢",
            "😭😓",
            "She left me 💔",
            "I'm not gonna make it 😞",
            "mano, estoy triste",
            "estoy despechado",
            "ando deprimido",
            "tengo tusa",
        ] {
            assert_eq!(outcome(text, ChatKind::Group), Outcome::SadDog { breed: None }, "{text}");
        }
    }

    #[test]
    fn test_sad_message_keeps_mentioned_breed() {
        assert_eq!(
            outcome("my pug is sad", ChatKind::Group),
            Outcome::SadDog {
                breed: Some("pug".to_string())
            }
        );
    }

    #[test]
    fn test_breed_mentions_use_substring_semantics() {
        for text in ["i have a pug at home", "i have two pugs at home", "this is pugtastic!"] {
            assert_eq!(
                outcome(text, ChatKind::Group),
                Outcome::Dog {
                    breed: Some("pug".to_string())
                },
                "{text}"
            );
        }
    }

    #[test]
    fn test_first_breed_in_registry_order_wins() {
        let breeds = BreedRegistry::from_names(["collie", "pug"]).unwrap();
        let words = tokenize("a pug and a collie");
        assert_eq!(find_mentioned_breed(&breeds, &words), Some("collie"));
    }

    #[test]
    fn test_fox_messages() {
        for text in [
            "🦊",
            "me gusta mucho este animal 🦊",
            "foxes are the best",
            "i saw a fennec the other day",
            "do you have a fox?",
            "mira un zorro!",
        ] {
            assert_eq!(outcome(text, ChatKind::Group), Outcome::Fox, "{text}");
        }
    }

    #[test]
    fn test_wolf_messages() {
        for text in [
            "🐺",
            "me gusta mucho este animal 🐺",
            "wolves are the best",
            "is that a wolf?",
            "¡mira un lobo!",
            "howl howl howl!",
        ] {
            assert_eq!(outcome(text, ChatKind::Group), Outcome::Wolf, "{text}");
        }
    }

    #[test]
    fn test_fox_beats_dog() {
        assert_eq!(outcome("my dog chased a fox", ChatKind::Group), Outcome::Fox);
        assert_eq!(outcome("pug vs fox", ChatKind::Private), Outcome::Fox);
    }

    #[test]
    fn test_fox_beats_wolf() {
        assert_eq!(outcome("fox and wolf", ChatKind::Group), Outcome::Fox);
    }

    #[test]
    fn test_wolf_beats_sad() {
        assert_eq!(outcome("the wolf is sad", ChatKind::Group), Outcome::Wolf);
    }

    #[test]
    fn test_sad_beats_plain_dog() {
        assert_eq!(
            outcome("my dog is sad", ChatKind::Group),
            Outcome::SadDog { breed: None }
        );
    }

    #[test]
    fn test_classification_is_repeatable() {
        let classifier = classifier();
        let words = tokenize("this is pugtastic! woof");
        assert_eq!(
            classifier.classify(&words, ChatKind::Group),
            classifier.classify(&words, ChatKind::Group)
        );
    }

    #[test]
    fn test_directive_captions() {
        match ResponseDirective::from_outcome(Outcome::Dog { breed: None }) {
            ResponseDirective::DogGeneric { caption } => {
                assert!(DOG_SOUNDS.contains(&caption.as_str()))
            }
            other => panic!("unexpected directive: {other:?}"),
        }
        match ResponseDirective::from_outcome(Outcome::SadDog {
            breed: Some("pug".to_string()),
        }) {
            ResponseDirective::DogBreed { breed, caption } => {
                assert_eq!(breed, "pug");
                assert_eq!(caption, SAD_CAPTION);
            }
            other => panic!("unexpected directive: {other:?}"),
        }
        match ResponseDirective::from_outcome(Outcome::Fox) {
            ResponseDirective::Fox { caption } => assert!(FOX_SOUNDS.contains(&caption.as_str())),
            other => panic!("unexpected directive: {other:?}"),
        }
        assert_eq!(
            ResponseDirective::from_outcome(Outcome::Wolf).caption(),
            Some("Howl!")
        );
        assert_eq!(ResponseDirective::from_outcome(Outcome::Silent), ResponseDirective::None);
    }

    #[test]
    fn test_dog_stickers() {
        let vocab = Vocabulary::default();
        for emoji in ["🐶", "🐕", "🐩", "🌭"] {
            assert!(is_dog_sticker(Some(emoji), &vocab.dog_emoji), "{emoji}");
        }
        assert!(!is_dog_sticker(Some("😀"), &vocab.dog_emoji));
        assert!(!is_dog_sticker(None, &vocab.dog_emoji));
    }

    #[test]
    fn test_sticker_directive() {
        let classifier = classifier();
        let dog = IncomingMessage::sticker(Some("🐶".to_string()), ChatKind::Group);
        assert!(matches!(
            classifier.directive_for_sticker(&dog),
            ResponseDirective::DogGeneric { .. }
        ));
        let other = IncomingMessage::sticker(Some("😀".to_string()), ChatKind::Private);
        assert_eq!(classifier.directive_for_sticker(&other), ResponseDirective::None);
    }
}
