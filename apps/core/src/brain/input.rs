//! Input analysis using regex pattern tables.
//!
//! Classifies an utterance into question types, topics, sentiment and
//! commands. Every call is independent; conversation state lives in
//! [`ConversationMemory`](super::memory::ConversationMemory).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

use super::patterns::PatternTable;

/// Interrogative intent of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    /// "how do I...", guides, steps
    HowTo,
    /// "what is...", "do you know..."
    Factual,
    /// "what do you think...", "should I..."
    Opinion,
    /// "what do you mean...", "I don't understand"
    Clarification,
    /// Questions about the companion itself
    Personal,
    /// "do you like...", "what's your favorite..."
    Preference,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::HowTo => "howTo",
            QuestionType::Factual => "factual",
            QuestionType::Opinion => "opinion",
            QuestionType::Clarification => "clarification",
            QuestionType::Personal => "personal",
            QuestionType::Preference => "preference",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Conversation topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Study,
    Subject,
    Career,
    Health,
    Entertainment,
    Technology,
    Personal,
}

impl Topic {
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Study => "study",
            Topic::Subject => "subject",
            Topic::Career => "career",
            Topic::Health => "health",
            Topic::Entertainment => "entertainment",
            Topic::Technology => "technology",
            Topic::Personal => "personal",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Imperative request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Help,
    Suggestion,
    Explanation,
}

/// Result of input analysis
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputAnalysis {
    /// Trimmed input was empty
    pub is_empty: bool,
    /// Ends with `?` or starts with an interrogative word
    pub is_question: bool,
    /// Detected question types, first-detected order
    pub question_types: Vec<QuestionType>,
    /// Detected topics, first-detected order
    pub topics: Vec<Topic>,
    pub sentiment: Sentiment,
    /// Detected commands, first-detected order
    pub commands: Vec<Command>,
    /// Trimmed input text
    pub original_input: String,
}

impl InputAnalysis {
    /// Record for empty or whitespace-only input
    pub fn empty() -> Self {
        Self {
            is_empty: true,
            ..Self::default()
        }
    }

    /// Question type driving template selection
    pub fn primary_question_type(&self) -> Option<QuestionType> {
        self.question_types.first().copied()
    }

    pub fn primary_topic(&self) -> Option<Topic> {
        self.topics.first().copied()
    }

    pub fn primary_command(&self) -> Option<Command> {
        self.commands.first().copied()
    }
}

const HOW_TO_PATTERNS: &[&str] = &[
    r"how (do|can|should|would) (i|you|we|they|one)",
    r"what('s| is) the (best|right|proper|recommended) way to",
    r"what steps (should|do) (i|you|we|they)",
    r"guide|tutorial|instructions|steps|process",
];

const FACTUAL_PATTERNS: &[&str] = &[
    r"what (is|are|was|were)",
    r"who (is|are|was|were)",
    r"where (is|are|was|were)",
    r"when (is|are|was|were)",
    r"why (is|are|was|were)",
    r"can you (tell|explain)",
    r"do you know",
];

const OPINION_PATTERNS: &[&str] = &[
    r"what do you think",
    r"how do you feel",
    r"your (thoughts|opinion|take|perspective)",
    r"would you recommend",
    r"is it (good|bad|worth|better)",
    r"should i",
];

const CLARIFICATION_PATTERNS: &[&str] = &[
    r"what do you mean",
    r"can you clarify",
    r"i don't understand",
    r"that doesn't make sense",
    r"confused|unclear|ambiguous",
];

const PERSONAL_QUESTION_PATTERNS: &[&str] = &[
    r"how are you",
    r"what('s| is) your name",
    r"who are you",
    r"tell me about yourself",
    r"what can you do",
    r"your (capabilities|functions|features)",
];

const PREFERENCE_PATTERNS: &[&str] = &[
    r"do you (like|enjoy|prefer|love|hate)",
    r"what('s| is) your favorite",
    r"would you rather",
];

const STUDY_PATTERNS: &[&str] = &[
    r"study(ing)?|learn(ing)?|education|school|college|university|course|class|lecture|assignment|homework|exam|test|quiz|grade",
];

const SUBJECT_PATTERNS: &[&str] = &[
    r"math|mathematics|algebra|calculus|geometry|trigonometry",
    r"science|biology|chemistry|physics|astronomy|geology",
    r"history|geography|economics|politics|sociology|psychology",
    r"literature|language|grammar|writing|reading|poetry|essay",
    r"art|music|painting|drawing|sculpture|photography",
    r"computer|programming|coding|software|hardware|technology",
];

const CAREER_PATTERNS: &[&str] = &[
    r"job|career|profession|work|employment|resume|interview|hiring|salary|wage",
    r"company|business|industry|market|startup|entrepreneur",
];

const HEALTH_PATTERNS: &[&str] = &[
    r"health|fitness|exercise|workout|diet|nutrition|food|eating|sleep|rest|stress|anxiety|depression|mental health",
];

const ENTERTAINMENT_PATTERNS: &[&str] = &[
    r"movie|film|tv|television|show|series|episode|actor|actress|director|book|novel|author|game|gaming|play",
];

const TECHNOLOGY_PATTERNS: &[&str] = &[
    r"computer|laptop|phone|smartphone|tablet|device|software|app|application|website|internet|online|digital",
];

const PERSONAL_TOPIC_PATTERNS: &[&str] = &[
    r"family|friend|relationship|partner|spouse|marriage|dating|love|emotion|feeling|life|personal",
];

const POSITIVE_PATTERNS: &[&str] = &[
    r"good|great|excellent|amazing|wonderful|fantastic|awesome|brilliant|outstanding|superb|terrific|fabulous",
    r"happy|glad|pleased|delighted|content|satisfied|joy|enjoy|love|like|appreciate|grateful|thankful",
    r"excited|thrilled|enthusiastic|eager|interested|curious|motivated|inspired|impressed|hopeful",
];

const NEGATIVE_PATTERNS: &[&str] = &[
    r"bad|terrible|horrible|awful|poor|disappointing|frustrating|annoying|irritating|infuriating",
    r"sad|unhappy|upset|depressed|miserable|gloomy|disappointed|discouraged|disheartened",
    r"angry|mad|furious|outraged|enraged|hostile|bitter|resentful|indignant|irate",
    r"afraid|scared|frightened|terrified|anxious|worried|nervous|uneasy|apprehensive|concerned",
    r"confused|puzzled|perplexed|unsure|uncertain|unclear|ambiguous|bewildered|disoriented",
    r"tired|exhausted|sleepy|fatigued|drained|weary|worn out|lethargic|drowsy|sluggish",
    r"stressed|overwhelmed|pressured|burdened|overloaded|tense|strained|frazzled|swamped",
];

const NEUTRAL_PATTERNS: &[&str] = &[
    r"okay|fine|alright|so-so|average|neutral|indifferent|neither|balanced|moderate|standard|typical",
    r"normal|regular|ordinary|common|everyday|usual|routine|standard|conventional|traditional",
];

const HELP_PATTERNS: &[&str] = &[
    r"help( me)?|assist( me)?|support( me)?",
    r"i need (help|assistance|support)",
];

const SUGGESTION_PATTERNS: &[&str] = &[
    r"suggest|recommend|advise|propose|offer",
    r"give me (a|some) (suggestion|recommendation|advice|idea|tip)",
    r"what should i",
];

const EXPLANATION_PATTERNS: &[&str] = &[
    r"explain|describe|elaborate|clarify|define",
    r"tell me (about|how|why|what|when|where)",
    r"i want to (know|understand|learn)",
];

// NOTE: expect() is acceptable for literal patterns compiled once at startup
static QUESTION_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?$").expect("Invalid regex: question mark pattern"));

static INTERROGATIVE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(what|who|where|when|why|how|can|could|would|should|is|are|do|does|did)")
        .expect("Invalid regex: interrogative prefix pattern")
});

static QUESTION_TABLE: LazyLock<PatternTable<QuestionType>> = LazyLock::new(|| {
    PatternTable::new(&[
        (QuestionType::HowTo, HOW_TO_PATTERNS),
        (QuestionType::Factual, FACTUAL_PATTERNS),
        (QuestionType::Opinion, OPINION_PATTERNS),
        (QuestionType::Clarification, CLARIFICATION_PATTERNS),
        (QuestionType::Personal, PERSONAL_QUESTION_PATTERNS),
        (QuestionType::Preference, PREFERENCE_PATTERNS),
    ])
});

static TOPIC_TABLE: LazyLock<PatternTable<Topic>> = LazyLock::new(|| {
    PatternTable::new(&[
        (Topic::Study, STUDY_PATTERNS),
        (Topic::Subject, SUBJECT_PATTERNS),
        (Topic::Career, CAREER_PATTERNS),
        (Topic::Health, HEALTH_PATTERNS),
        (Topic::Entertainment, ENTERTAINMENT_PATTERNS),
        (Topic::Technology, TECHNOLOGY_PATTERNS),
        (Topic::Personal, PERSONAL_TOPIC_PATTERNS),
    ])
});

static SENTIMENT_TABLE: LazyLock<PatternTable<Sentiment>> = LazyLock::new(|| {
    PatternTable::new(&[
        (Sentiment::Positive, POSITIVE_PATTERNS),
        (Sentiment::Negative, NEGATIVE_PATTERNS),
        (Sentiment::Neutral, NEUTRAL_PATTERNS),
    ])
});

static COMMAND_TABLE: LazyLock<PatternTable<Command>> = LazyLock::new(|| {
    PatternTable::new(&[
        (Command::Help, HELP_PATTERNS),
        (Command::Suggestion, SUGGESTION_PATTERNS),
        (Command::Explanation, EXPLANATION_PATTERNS),
    ])
});

/// Analyze an utterance.
///
/// Total over every string: empty or whitespace-only input yields
/// [`InputAnalysis::empty`].
pub fn analyze_input(input: &str) -> InputAnalysis {
    let clean_input = input.trim();

    if clean_input.is_empty() {
        return InputAnalysis::empty();
    }

    let is_question =
        QUESTION_MARK.is_match(clean_input) || INTERROGATIVE_PREFIX.is_match(clean_input);

    let analysis = InputAnalysis {
        is_empty: false,
        is_question,
        question_types: QUESTION_TABLE.detect(clean_input),
        topics: TOPIC_TABLE.detect(clean_input),
        sentiment: dominant_sentiment(clean_input),
        commands: COMMAND_TABLE.detect(clean_input),
        original_input: clean_input.to_string(),
    };

    debug!(
        is_question = analysis.is_question,
        question_types = ?analysis.question_types,
        topics = ?analysis.topics,
        sentiment = ?analysis.sentiment,
        commands = ?analysis.commands,
        "Input analyzed"
    );

    analysis
}

/// The sentiment with the strictly highest match count; ties and no
/// matches resolve to neutral.
fn dominant_sentiment(text: &str) -> Sentiment {
    let (mut positive, mut negative, mut neutral) = (0, 0, 0);

    for (sentiment, hits) in SENTIMENT_TABLE.score(text) {
        match sentiment {
            Sentiment::Positive => positive += hits,
            Sentiment::Negative => negative += hits,
            Sentiment::Neutral => neutral += hits,
        }
    }

    if positive > negative && positive > neutral {
        Sentiment::Positive
    } else if negative > positive && negative > neutral {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
