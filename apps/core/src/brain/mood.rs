//! Mood detection from text.
//!
//! Scores the text against twelve mood pattern groups and attaches a static
//! learning-style profile to the winner. Explicit negative statements
//! ("not happy", "feeling down") are checked first and override scoring.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

use super::patterns::PatternTable;

/// Mood category, in scoring order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Fearful,
    Surprised,
    Disgusted,
    #[default]
    Neutral,
    Confused,
    Tired,
    Stressed,
    Curious,
    Motivated,
}

impl Mood {
    pub const ALL: [Mood; 12] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Fearful,
        Mood::Surprised,
        Mood::Disgusted,
        Mood::Neutral,
        Mood::Confused,
        Mood::Tired,
        Mood::Stressed,
        Mood::Curious,
        Mood::Motivated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Fearful => "fearful",
            Mood::Surprised => "surprised",
            Mood::Disgusted => "disgusted",
            Mood::Neutral => "neutral",
            Mood::Confused => "confused",
            Mood::Tired => "tired",
            Mood::Stressed => "stressed",
            Mood::Curious => "curious",
            Mood::Motivated => "motivated",
        }
    }

    /// Static learning profile for this mood
    pub fn profile(&self) -> &'static LearningProfile {
        match self {
            Mood::Happy => &HAPPY_PROFILE,
            Mood::Sad => &SAD_PROFILE,
            Mood::Angry => &ANGRY_PROFILE,
            Mood::Fearful => &FEARFUL_PROFILE,
            Mood::Surprised => &SURPRISED_PROFILE,
            Mood::Disgusted => &DISGUSTED_PROFILE,
            Mood::Neutral => &NEUTRAL_PROFILE,
            Mood::Confused => &CONFUSED_PROFILE,
            Mood::Tired => &TIRED_PROFILE,
            Mood::Stressed => &STRESSED_PROFILE,
            Mood::Curious => &CURIOUS_PROFILE,
            Mood::Motivated => &MOTIVATED_PROFILE,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Learning-style recommendation attached to a mood
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProfile {
    pub description: &'static str,
    pub learning_style: &'static str,
    pub recommended_approaches: &'static [&'static str],
}

/// Result of mood analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysis {
    pub mood: Mood,
    /// Winner's share of all pattern matches (0.0 - 1.0)
    pub confidence: f32,
    #[serde(flatten)]
    pub profile: &'static LearningProfile,
}

impl MoodAnalysis {
    fn new(mood: Mood, confidence: f32) -> Self {
        Self {
            mood,
            confidence,
            profile: mood.profile(),
        }
    }

    pub fn description(&self) -> &'static str {
        self.profile.description
    }

    pub fn learning_style(&self) -> &'static str {
        self.profile.learning_style
    }

    pub fn recommended_approaches(&self) -> &'static [&'static str] {
        self.profile.recommended_approaches
    }
}

static HAPPY_PROFILE: LearningProfile = LearningProfile {
    description: "Your positive mood is great for creative and exploratory learning!",
    learning_style: "Exploratory and creative learning",
    recommended_approaches: &[
        "Try challenging, novel concepts",
        "Engage in group discussions or collaborative projects",
        "Explore creative applications of what you're learning",
    ],
};

static SAD_PROFILE: LearningProfile = LearningProfile {
    description: "When feeling down, gentle and supportive learning approaches work best.",
    learning_style: "Supportive and structured learning",
    recommended_approaches: &[
        "Focus on small, achievable goals",
        "Review familiar material before tackling new concepts",
        "Use positive reinforcement and celebrate small wins",
    ],
};

static ANGRY_PROFILE: LearningProfile = LearningProfile {
    description: "Channel your energy into focused, practical learning tasks.",
    learning_style: "Practical and focused learning",
    recommended_approaches: &[
        "Work on problem-solving exercises",
        "Focus on practical applications",
        "Break complex tasks into manageable steps",
    ],
};

static FEARFUL_PROFILE: LearningProfile = LearningProfile {
    description:
        "When feeling anxious, structured and clear learning paths help build confidence.",
    learning_style: "Structured and guided learning",
    recommended_approaches: &[
        "Follow step-by-step tutorials",
        "Start with the basics and build gradually",
        "Use familiar learning methods that have worked for you before",
    ],
};

static SURPRISED_PROFILE: LearningProfile = LearningProfile {
    description: "Your curious state of mind is perfect for exploring new perspectives!",
    learning_style: "Exploratory and innovative learning",
    recommended_approaches: &[
        "Connect new concepts to what you already know",
        "Explore different perspectives on the topic",
        "Try unconventional learning approaches",
    ],
};

static DISGUSTED_PROFILE: LearningProfile = LearningProfile {
    description: "When feeling averse, focus on clear, relevant content with obvious value.",
    learning_style: "Clear and purposeful learning",
    recommended_approaches: &[
        "Focus on the practical value and relevance of what you're learning",
        "Use clean, well-organized learning materials",
        "Set clear objectives for your learning session",
    ],
};

static NEUTRAL_PROFILE: LearningProfile = LearningProfile {
    description: "Your balanced state is good for comprehensive, analytical learning.",
    learning_style: "Balanced and analytical learning",
    recommended_approaches: &[
        "Take a systematic approach to the subject",
        "Balance theory with practical applications",
        "Engage in critical thinking and analysis",
    ],
};

static CONFUSED_PROFILE: LearningProfile = LearningProfile {
    description: "When confused, focus on clarifying fundamentals before moving forward.",
    learning_style: "Clarifying and foundational learning",
    recommended_approaches: &[
        "Review basic concepts and terminology",
        "Seek clear explanations and examples",
        "Ask questions and verify your understanding",
    ],
};

static TIRED_PROFILE: LearningProfile = LearningProfile {
    description: "When tired, shorter, more engaging learning sessions are most effective.",
    learning_style: "Brief and engaging learning",
    recommended_approaches: &[
        "Keep learning sessions short (15-25 minutes)",
        "Use multimedia and interactive content",
        "Take frequent breaks and vary your activities",
    ],
};

static STRESSED_PROFILE: LearningProfile = LearningProfile {
    description:
        "When stressed, organized and manageable learning approaches help reduce overwhelm.",
    learning_style: "Organized and manageable learning",
    recommended_approaches: &[
        "Break learning into small, manageable chunks",
        "Create a clear study plan with priorities",
        "Use relaxation techniques before studying",
    ],
};

static CURIOUS_PROFILE: LearningProfile = LearningProfile {
    description: "Your curiosity is perfect for deep, inquiry-based learning!",
    learning_style: "Inquiry-based and exploratory learning",
    recommended_approaches: &[
        "Follow your questions and interests",
        "Explore connections between different topics",
        "Seek out diverse resources and perspectives",
    ],
};

static MOTIVATED_PROFILE: LearningProfile = LearningProfile {
    description: "Your motivation is perfect for goal-oriented, challenging learning!",
    learning_style: "Goal-oriented and challenging learning",
    recommended_approaches: &[
        "Set specific learning goals and track your progress",
        "Challenge yourself with advanced material",
        "Apply what you learn to real-world projects",
    ],
};

/// Confidence reported when an explicit negative statement is found
pub const NEGATION_CONFIDENCE: f32 = 0.8;

const HAPPY_PATTERNS: &[&str] = &[
    r"happy|joy|excited|great|wonderful|fantastic|excellent|awesome|delighted|pleased|thrilled|cheerful|content|glad|positive|smile|laugh",
    r"having fun|feeling good|good mood|great day|love it|enjoying|excited about",
];

const SAD_PATTERNS: &[&str] = &[
    r"sad|unhappy|depressed|down|blue|gloomy|miserable|heartbroken|disappointed|upset|discouraged|hopeless|grief|sorrow",
    r"feeling down|bad day|not feeling well|lost|alone|lonely|miss|missing|hard time|struggling with",
];

const ANGRY_PATTERNS: &[&str] = &[
    r"angry|mad|furious|annoyed|irritated|frustrated|outraged|enraged|hostile|bitter|resentful|indignant|irate",
    r"pissed off|fed up|had enough|so annoying|hate|can't stand|sick of|tired of|bothers me",
];

const FEARFUL_PATTERNS: &[&str] = &[
    r"afraid|scared|frightened|terrified|anxious|worried|nervous|uneasy|apprehensive|concerned|dread|panic|terror|horror",
    r"fear of|worried about|nervous about|scared of|afraid of|terrified of|anxious about|panic attack",
];

const SURPRISED_PATTERNS: &[&str] = &[
    r"surprised|shocked|amazed|astonished|stunned|startled|unexpected|wow|whoa|unbelievable|incredible|remarkable",
    r"can't believe|didn't expect|never thought|who knew|surprising|out of nowhere|blown away",
];

const DISGUSTED_PATTERNS: &[&str] = &[
    r"disgusted|gross|revolting|nauseated|repulsed|sickened|appalled|horrified|offended|dislike|aversion",
    r"makes me sick|can't stomach|turned off by|grossed out|put off|distasteful|offensive",
];

const NEUTRAL_PATTERNS: &[&str] = &[
    r"okay|fine|alright|so-so|average|neutral|indifferent|neither|balanced|moderate|standard|typical",
    r"just okay|doing fine|nothing special|as usual|normal day|regular|ordinary|common|everyday",
];

const CONFUSED_PATTERNS: &[&str] = &[
    r"confused|puzzled|perplexed|unsure|uncertain|unclear|ambiguous|bewildered|disoriented|lost|doubtful",
    r"don't understand|not sure|what do you mean|how does|why is|can you explain|need help with|struggling to understand",
];

const TIRED_PATTERNS: &[&str] = &[
    r"tired|exhausted|sleepy|fatigued|drained|weary|worn out|lethargic|drowsy|sluggish|beat|spent",
    r"need sleep|lack of energy|no energy|low energy|need rest|haven't slept|sleep deprived|burned out",
];

const STRESSED_PATTERNS: &[&str] = &[
    r"stressed|overwhelmed|pressured|burdened|overloaded|tense|strained|frazzled|swamped|busy|hectic",
    r"too much|can't handle|lot of pressure|deadline|running out of time|no time|behind schedule",
];

const CURIOUS_PATTERNS: &[&str] = &[
    r"curious|interested|intrigued|fascinated|wonder|questioning|inquisitive|eager|keen|captivated",
    r"want to know|tell me about|how does|what is|why does|interested in learning|want to learn",
];

const MOTIVATED_PATTERNS: &[&str] = &[
    r"motivated|inspired|determined|driven|ambitious|enthusiastic|eager|passionate|dedicated|committed",
    r"want to achieve|going to|planning to|working on|trying to|aiming to|goal|objective|purpose",
];

// Checked in order before scoring; any hit means the user said they feel bad.
static NEGATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"not (?:in a |feeling )?good",
        r"not (?:in a |feeling )?great",
        r"not (?:in a |feeling )?well",
        r"not (?:in a |feeling )?happy",
        r"not (?:in a |feeling )?positive",
        r"bad mood",
        r"feeling bad",
        r"feeling down",
        r"feeling sad",
        r"feeling terrible",
        r"feeling awful",
        r"feeling depressed",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).expect("Invalid regex: negation pattern"))
    .collect()
});

static MOOD_TABLE: LazyLock<PatternTable<Mood>> = LazyLock::new(|| {
    PatternTable::new(&[
        (Mood::Happy, HAPPY_PATTERNS),
        (Mood::Sad, SAD_PATTERNS),
        (Mood::Angry, ANGRY_PATTERNS),
        (Mood::Fearful, FEARFUL_PATTERNS),
        (Mood::Surprised, SURPRISED_PATTERNS),
        (Mood::Disgusted, DISGUSTED_PATTERNS),
        (Mood::Neutral, NEUTRAL_PATTERNS),
        (Mood::Confused, CONFUSED_PATTERNS),
        (Mood::Tired, TIRED_PATTERNS),
        (Mood::Stressed, STRESSED_PATTERNS),
        (Mood::Curious, CURIOUS_PATTERNS),
        (Mood::Motivated, MOTIVATED_PATTERNS),
    ])
});

/// Detect the mood expressed in `text`.
///
/// Never fails: empty input is neutral with zero confidence.
pub fn analyze_text_mood(text: &str) -> MoodAnalysis {
    if text.trim().is_empty() {
        return MoodAnalysis::new(Mood::Neutral, 0.0);
    }

    if NEGATION_PATTERNS.iter().any(|p| p.is_match(text)) {
        debug!("Explicit negative mood statement, overriding scorer");
        return MoodAnalysis::new(Mood::Sad, NEGATION_CONFIDENCE);
    }

    let scores = MOOD_TABLE.score(text);

    let mut detected = Mood::Neutral;
    let mut highest = 0usize;
    for &(mood, score) in &scores {
        if score > highest {
            highest = score;
            detected = mood;
        }
    }

    let total: usize = scores.iter().map(|(_, score)| score).sum();
    let confidence = if total > 0 {
        highest as f32 / total as f32
    } else {
        0.0
    };

    debug!(mood = %detected, confidence, total, "Mood analyzed");

    MoodAnalysis::new(detected, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tables_compile() {
        assert_eq!(MOOD_TABLE.len(), Mood::ALL.len());
        assert_eq!(NEGATION_PATTERNS.len(), 12);
    }

    #[test]
    fn test_empty_is_neutral() {
        for text in ["", "  \n "] {
            let analysis = analyze_text_mood(text);
            assert_eq!(analysis.mood, Mood::Neutral);
            assert_eq!(analysis.confidence, 0.0);
            assert_eq!(analysis.profile, Mood::Neutral.profile());
        }
    }

    #[test]
    fn test_negation_override() {
        let analysis = analyze_text_mood("I am not happy today");
        assert_eq!(analysis.mood, Mood::Sad);
        assert_eq!(analysis.confidence, NEGATION_CONFIDENCE);

        let analysis = analyze_text_mood("happy happy joy joy, but not in a good place");
        assert_eq!(analysis.mood, Mood::Sad);
        assert_eq!(analysis.confidence, 0.8);
    }

    #[test]
    fn test_scored_mood() {
        let analysis = analyze_text_mood("I feel so happy and cheerful");
        assert_eq!(analysis.mood, Mood::Happy);
        assert_eq!(analysis.confidence, 1.0);
        assert_eq!(analysis.learning_style(), "Exploratory and creative learning");
    }

    #[test]
    fn test_confidence_is_share_of_matches() {
        // stressed: "stressed", "deadline"; tired: "exhausted"
        let analysis = analyze_text_mood("stressed and exhausted by the deadline");
        assert_eq!(analysis.mood, Mood::Stressed);
        assert!((analysis.confidence - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        // one hit each for angry ("furious") and fearful ("scared")
        let analysis = analyze_text_mood("furious, scared");
        assert_eq!(analysis.mood, Mood::Angry);
        assert_eq!(analysis.confidence, 0.5);
    }

    #[test]
    fn test_no_match_is_neutral() {
        let analysis = analyze_text_mood("xyz");
        assert_eq!(analysis.mood, Mood::Neutral);
        assert_eq!(analysis.confidence, 0.0);
    }

    #[test]
    fn test_every_profile_has_approaches() {
        for mood in Mood::ALL {
            let profile = mood.profile();
            assert!(!profile.description.is_empty());
            assert!(!profile.learning_style.is_empty());
            assert_eq!(profile.recommended_approaches.len(), 3, "{mood}");
        }
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(analyze_text_mood("I am not happy")).unwrap();
        assert_eq!(json["mood"], "sad");
        assert_eq!(json["learningStyle"], "Supportive and structured learning");
        assert_eq!(json["recommendedApproaches"].as_array().unwrap().len(), 3);
    }
}
