use rand::seq::SliceRandom;

/// Bark-like phrases used as the default dog caption.
pub const DOG_SOUNDS: &[&str] = &["Woof woof!", "Bark!", "Awoooo!", "Awroooo!", "Bark bark!"];

pub const FOX_SOUNDS: &[&str] = &[
    "Yip yip!",
    "Ring-ding-ding-ding-dingeringeding!",
    "Wa-pa-pa-pa-pa-pa-pow!",
    "Hatee-hatee-hatee-ho!",
    "Joff-tchoff-tchoffo-tchoffo-tchoff!",
];

pub const WOLF_CAPTION: &str = "Howl!";

pub const SAD_CAPTION: &str = "Don't be sad, have a cute dog!";

/// Which caption pool a reply draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionKind {
    DogRandom,
    DogSad,
    Fox,
    Wolf,
}

pub fn select_caption(kind: CaptionKind) -> String {
    match kind {
        CaptionKind::DogRandom => pick(DOG_SOUNDS),
        CaptionKind::Fox => pick(FOX_SOUNDS),
        CaptionKind::Wolf => WOLF_CAPTION.to_string(),
        CaptionKind::DogSad => SAD_CAPTION.to_string(),
    }
}

pub fn random_dog_sound() -> String {
    select_caption(CaptionKind::DogRandom)
}

/// Reply for /start and /help.
pub fn help_text() -> String {
    format!(
        "{} If you want a dog picture, send me a message or use the /dog command.",
        random_dog_sound()
    )
}

fn pick(pool: &[&str]) -> String {
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}
