//! Built-in lexicon data

use crate::lexicon::{CategorySpec, LexiconSpec, PatternSpec};
use sentiment_shield_core::Category;
use std::collections::BTreeMap;

const ANGER_WORDS: &[&str] = &[
    "angry", "anger", "furious", "rage", "outraged", "infuriated", "livid", "enraged",
    "mad", "pissed", "hate", "despise", "loathe", "disgusted", "furiously", "hatred",
    "violent", "attack", "destroy", "kill", "murder", "idiots", "morons", "stupid",
    "ridiculous", "absurd", "pathetic", "worthless", "garbage", "trash", "screw",
    "damn", "hell", "crap", "bastard", "jerk", "asshole", "idiot", "fool", "dumb",
    "worst", "terrible", "horrible", "awful", "disgusting", "revolting", "vile",
    "infuriating", "maddening", "outrageous", "unacceptable", "intolerable",
];

// (regex, case_insensitive)
const ANGER_PATTERNS: &[(&str, bool)] = &[
    (r"\bwtf\b", true),
    (r"\bffs\b", true),
    (r"\bstfu\b", true),
    (r"!{2,}", false),
    (r"[A-Z]{4,}", false),
    (r"\bso\s+stupid\b", true),
    (r"\bcan'?t\s+stand\b", true),
    (r"\bdone\s+with\b", true),
];

const SADNESS_WORDS: &[&str] = &[
    "sad", "sadness", "depressed", "depression", "hopeless", "hopelessness", "grief",
    "grieve", "mourning", "mourn", "cry", "crying", "tears", "weep", "heartbroken",
    "devastated", "miserable", "suffering", "pain", "lonely", "alone", "empty",
    "worthless", "failure", "failed", "lost", "give up", "giving up", "no hope",
    "never gets better", "why bother", "pointless", "meaningless", "numb",
    "exhausted", "drained", "broken", "shattered", "crushed", "defeated", "helpless",
    "despair", "despairing", "unfortunate", "tragic", "tragedy", "terrible loss",
    "miss", "missing", "gone", "never coming back", "rip", "passed away",
];

const SADNESS_PATTERNS: &[(&str, bool)] = &[
    (r"\b(i|we)\s+(can'?t|cannot)\s+go\s+on\b", true),
    (r"\bno\s+(one|point|reason)\b", true),
    (r"\bwish\s+i\s+was(n'?t)?\b", true),
];

const TOXIC_WORDS: &[&str] = &[
    "toxic", "toxicity", "harassment", "harass", "bully", "bullying", "abuse", "abusive",
    "racist", "racism", "sexist", "sexism", "bigot", "bigotry", "nazi", "fascist",
    "slur", "slurs", "dehumanize", "dehumanizing", "threaten", "threat", "stalk",
    "doxx", "doxxing", "manipulate", "manipulative", "gaslight", "gaslighting",
    "narcissist", "predator", "groomer", "exploit", "exploitation", "coerce",
    "intimidate", "discrimination", "xenophobia", "homophobia", "transphobia",
    "misogyny", "misogynist", "incel", "conspiracy", "extremist", "radicalize",
];

const TOXIC_PATTERNS: &[(&str, bool)] = &[
    (r"\bkill\s+yourself\b", true),
    (r"\byou\s+should\s+(die|suffer)\b", true),
    (r"\bgo\s+(to\s+hell|f+\s*yourself)\b", true),
    (r"\b(n|f)[*\-]word\b", true),
];

const FEAR_WORDS: &[&str] = &[
    "afraid", "fear", "scared", "terrified", "panic", "anxiety", "anxious", "worried",
    "worry", "dread", "dreading", "nightmare", "horror", "horrifying", "alarming",
    "threatening", "dangerous", "unsafe", "crisis", "catastrophe", "disaster",
    "emergency", "warning", "alert", "beware", "caution", "hazard", "risk",
    "threat", "imminent", "attack", "invasion", "collapse", "apocalypse", "doomed",
];

const FEAR_PATTERNS: &[(&str, bool)] = &[
    (r"\boh\s+no\b", true),
    (r"\bthis\s+is\s+(bad|terrible|awful)\b", true),
    (r"\bwe'?re\s+(all\s+)?doomed\b", true),
];

const SPAM_WORDS: &[&str] = &[
    "click here", "buy now", "limited offer", "act now", "exclusive deal",
    "free money", "make money", "earn cash", "work from home", "guaranteed",
    "no risk", "100% free", "click the link", "subscribe now", "follow back",
    "dm me", "check my bio", "check bio", "promo code", "use code", "discount",
];

const SPAM_PATTERNS: &[(&str, bool)] = &[
    (r"\b(https?://\S+){3,}", false),
    (r"\$\d+[\s/]+(hour|day|week|month)", true),
    (r"\b\d{3}[-%]\s*(off|discount)\b", true),
    (r"\bfollow\s+(me|for\s+follow)\b", true),
];

/// Words that negate a trigger word within the negation window
pub const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "hardly", "barely", "scarcely",
    "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't", "can't",
    "cannot", "couldn't", "won't", "wouldn't", "shouldn't", "haven't", "hasn't", "hadn't",
];

/// Booster words that amplify the trigger word right after them
pub const INTENSIFIER_WORDS: &[&str] = &[
    "very", "extremely", "incredibly", "absolutely", "totally", "completely",
    "utterly", "seriously", "deeply", "profoundly", "massively", "hugely",
];

fn category(words: &[&str], patterns: &[(&str, bool)], weight: f64) -> CategorySpec {
    CategorySpec {
        words: words.iter().map(|w| w.to_string()).collect(),
        patterns: patterns
            .iter()
            .map(|(regex, case_insensitive)| PatternSpec {
                regex: regex.to_string(),
                case_insensitive: *case_insensitive,
            })
            .collect(),
        weight,
    }
}

/// The lexicon specification the engine ships with
pub fn builtin_spec() -> LexiconSpec {
    let mut categories = BTreeMap::new();
    categories.insert(Category::Anger, category(ANGER_WORDS, ANGER_PATTERNS, 1.0));
    categories.insert(Category::Sadness, category(SADNESS_WORDS, SADNESS_PATTERNS, 0.9));
    categories.insert(Category::Toxic, category(TOXIC_WORDS, TOXIC_PATTERNS, 1.5));
    categories.insert(Category::Fear, category(FEAR_WORDS, FEAR_PATTERNS, 0.8));
    categories.insert(Category::Spam, category(SPAM_WORDS, SPAM_PATTERNS, 0.7));

    LexiconSpec {
        categories,
        negations: NEGATION_WORDS.iter().map(|w| w.to_string()).collect(),
        intensifiers: INTENSIFIER_WORDS.iter().map(|w| w.to_string()).collect(),
    }
}
