//! Static content for the journey
//!
//! Answer keys, messages and media references. Nothing here is mutated at
//! runtime; screens copy what they need when they open.

use crate::puzzle::crossword::{Direction, EntrySpec};
use crate::puzzle::word_search::{Orientation, Placement};

pub const DEFAULT_NAME: &str = "Sehaj";
pub const DEFAULT_LOCK_CODE: &str = "0711";

/// Crossword answer key: three across, three down on an 8x8 grid
pub const CROSSWORD_SIZE: usize = 8;

pub const CROSSWORD_ENTRIES: &[EntrySpec] = &[
    EntrySpec { number: 2, direction: Direction::Across, word: "SOULMATE", row: 2, col: 0, hint: "What you feel like to me" },
    EntrySpec { number: 4, direction: Direction::Across, word: "SEHAJ", row: 4, col: 0, hint: "Her name, my favorite word" },
    EntrySpec { number: 6, direction: Direction::Across, word: "PRABH", row: 5, col: 3, hint: "The name she teases and loves" },
    EntrySpec { number: 1, direction: Direction::Down, word: "FOREVER", row: 1, col: 1, hint: "How long I want you" },
    EntrySpec { number: 3, direction: Direction::Down, word: "ALWAYS", row: 2, col: 5, hint: "When I choose you" },
    EntrySpec { number: 5, direction: Direction::Down, word: "HOME", row: 4, col: 2, hint: "Where my heart feels safe" },
];

/// Word search answer key on a 15x15 grid
pub const WORD_SEARCH_SIZE: usize = 15;

pub const WORD_SEARCH_PLACEMENTS: &[Placement] = &[
    Placement { word: "TOGETHER", row: 1, col: 3, orientation: Orientation::Horizontal },
    Placement { word: "SOULMATE", row: 3, col: 1, orientation: Orientation::Horizontal },
    Placement { word: "KISSING", row: 6, col: 1, orientation: Orientation::Horizontal },
    Placement { word: "FOREVER", row: 7, col: 4, orientation: Orientation::Horizontal },
    Placement { word: "HOME", row: 8, col: 1, orientation: Orientation::Horizontal },
    Placement { word: "PROMISE", row: 9, col: 7, orientation: Orientation::Horizontal },
    Placement { word: "DATING", row: 11, col: 4, orientation: Orientation::Horizontal },
    Placement { word: "SEHAJ", row: 13, col: 9, orientation: Orientation::Horizontal },
    Placement { word: "HEART", row: 0, col: 0, orientation: Orientation::Vertical },
    Placement { word: "HUG", row: 0, col: 13, orientation: Orientation::Vertical },
    Placement { word: "LOYAL", row: 2, col: 14, orientation: Orientation::Vertical },
    Placement { word: "PRABH", row: 4, col: 12, orientation: Orientation::Vertical },
    Placement { word: "TRUST", row: 10, col: 2, orientation: Orientation::Vertical },
    Placement { word: "LOVE", row: 4, col: 6, orientation: Orientation::Diagonal },
];

pub const PHOTOS: [&str; 4] = [
    "https://customer-assets.emergentagent.com/job_sehaj-love/artifacts/c4js402r_IMG_2322.jpeg",
    "https://customer-assets.emergentagent.com/job_sehaj-love/artifacts/f4wz0r37_IMG_2420.jpeg",
    "https://customer-assets.emergentagent.com/job_sehaj-love/artifacts/a9ttyijr_IMG_4718.jpeg",
    "https://customer-assets.emergentagent.com/job_sehaj-love/artifacts/nxt2uyzr_IMG_4344.jpeg",
];

/// Card match pairs: photo n matches caption n
pub const CARD_CAPTIONS: [&str; 4] = ["My Heart", "My Love", "My Baby", "My World"];

pub const LOVE_MESSAGES: &[&str] = &[
    "I love you more than yesterday, but less than tomorrow.",
    "You're the reason I believe in love.",
    "Every love story is beautiful, but ours is my favorite.",
    "I fell in love with you because of all the little things.",
];

pub struct Memory {
    pub title: &'static str,
    pub content: &'static str,
}

pub const MEMORIES: &[Memory] = &[
    Memory { title: "Funny Memory", content: "Remember getting eaten alive by mosquitoes?" },
    Memory {
        title: "Sweet Memory",
        content: "Remember when you sat down with me to eat pepperoni pizza, and refused to eat until I did.",
    },
    Memory {
        title: "Meaningful Memory",
        content: "When you took me back to the Legos store. I know it's not that deep but to me it's really special.",
    },
];

pub const NICKNAMES: &[&str] = &[
    "Baby", "Bub", "Bubster", "Berryboo", "Poopypants", "Wife", "Princess", "Morni", "My Painting",
    "Babe", "Snowflake", "Sehajpal", "Mrs. Sandhu",
];

pub struct Poem {
    pub title: &'static str,
    pub mood: &'static str,
    pub lines: &'static [&'static str],
}

pub const POEMS: &[Poem] = &[
    Poem {
        title: "Sehaj's Poem",
        mood: "sweet",
        lines: &[
            "In your eyes, I found my home,",
            "A place where I no longer roam.",
            "Your smile lights up my darkest days,",
            "In countless beautiful, gentle ways.",
            "With every heartbeat, I feel so blessed,",
            "With you, my love, I am at rest.",
        ],
    },
    Poem {
        title: "Berryboo's Poem",
        mood: "playful",
        lines: &[
            "You make me laugh until I cry,",
            "With you, the time just flies by.",
            "We're weird together, that's our thing,",
            "Our inside jokes make my heart sing.",
            "I'd choose your chaos every day,",
            "You drive me crazy in the best way!",
        ],
    },
    Poem {
        title: "Mrs. Sandhu's Poem",
        mood: "sincere",
        lines: &[
            "I never knew love could feel this way,",
            "Until you came and chose to stay.",
            "You see the parts I try to hide,",
            "And love me from the other side.",
            "Through every storm, you hold my hand,",
            "With you, I finally understand.",
        ],
    },
];

pub const ENTRY_TAGLINE: &str = "A small journey through us";
pub const ENTRY_SIGNATURE: &str = "Made with love";

pub const ORIGIN_STORY: &[&str] = &[
    "It started like most good things do: quietly, without either of us noticing.",
    "A conversation that went on longer than it needed to. Then another.",
    "Somewhere in there, you became my favorite part of every day.",
];

pub const EARLY_FEELINGS: &[(&str, &str)] = &[
    ("When I First Liked You", "I caught myself smiling at my phone before I even read your message."),
    ("When I Knew", "Everything felt easier with you next to me, even the hard days."),
];

pub const CONFESSION_LINES: &[&str] = &["You changed me.", "You made me better.", "You feel like home."];

pub const CONFESSION_CLOSING: &str = "Every moment with you feels like a gift I never knew I deserved. \
You've become my favorite person, my safe place, my everything.";

pub const CONFESSION_DATE: &str = "July 11 - Our day";

pub const QUESTION_LINES: &[&str] = &[
    "I already know my answer.",
    "You already have my heart.",
    "So I was hoping...",
];

pub const CELEBRATION_MEMORIES: &[&str] = &[
    "Click the blue heart heheheh",
    "I will always love you",
    "You're not that dumb",
    "I miss terms and conditions",
    "Thank you for being my sweet girl",
];

pub const HOLD_MESSAGE: &str =
    "\"I wanted to see if you would stay.\"\n\nAnd you did.\n\nJust like you always do.\nThat's why I love you.";

pub const SHAKE_MESSAGE: &str = "You shook up my whole world, and I wouldn't have it any other way.";

pub const LOVE_METER_MESSAGE: &str =
    "Sorry, it's broken...\nIt only shows 100%\n\nNo matter what, my love for you is always at maximum.";

pub const SURPRISE_MESSAGE: &str = "That was a kiss. You'll get the real one soon.";

pub const SECRET_MESSAGE: &str = "P.S. I choose you every day.";

pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    pub url: &'static str,
}

pub const PLAYLIST: &[Track] = &[
    Track {
        title: "It's Love",
        artist: "RealestK",
        url: "https://customer-assets.emergentagent.com/job_love-adventure-49/artifacts/230dit60_RealestK%20-%20It%27s%20Love%20%28Official%20Audio%29.mp3",
    },
    Track {
        title: "Apocalypse",
        artist: "Cigarettes After Sex",
        url: "https://customer-assets.emergentagent.com/job_add-this-1/artifacts/cufh3d12_Apocalypse%20-%20Cigarettes%20After%20Sex.mp3",
    },
    Track {
        title: "Fall in Love with You",
        artist: "Montell Fish",
        url: "https://customer-assets.emergentagent.com/job_add-this-1/artifacts/ixjjhzww_Montell%20Fish%20-%20Fall%20in%20Love%20with%20You.%20%28Lyrics%29.mp3",
    },
    Track {
        title: "Love Me",
        artist: "RealestK",
        url: "https://customer-assets.emergentagent.com/job_add-this-1/artifacts/2b5nalgs_RealestK%20-%20Love%20Me%20%28Official%20Audio%29.mp3",
    },
    Track {
        title: "Meet Me in Amsterdam",
        artist: "RINI",
        url: "https://customer-assets.emergentagent.com/job_add-this-1/artifacts/950vb5hm_RINI%20-%20Meet%20Me%20in%20Amsterdam%20%28Audio%29.mp3",
    },
];

pub const WHISPER_TRACK: Track = Track {
    title: "i'm whispering...",
    artist: "",
    url: "https://customer-assets.emergentagent.com/job_sehaj-love/artifacts/n3ojmbeq_e6d8893a.mp3",
};
