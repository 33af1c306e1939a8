//! Reply generation.
//!
//! Turns an [`InputAnalysis`] plus conversation memory into a reply. Branches
//! are tried in priority order: empty input, greeting, repetition guard,
//! question, command, topic, and finally a mood-based reply.
//!
//! Templates are a fixed lead text followed by an optional typed [`Slot`],
//! so every reply is fully rendered before it is returned.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::input::{Command, InputAnalysis, QuestionType, Sentiment, Topic};
use super::memory::ConversationMemory;
use super::mood::{analyze_text_mood, Mood, MoodAnalysis};
use super::select::{choose, RandomSelector, Selector, TemplateList};

/// Content appended after a template's lead text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Template is complete as written
    None,
    /// A recommended approach for the current mood
    Suggestion,
    /// A sentence about the primary topic
    TopicContent,
}

#[derive(Debug, Clone, Copy)]
struct Template {
    lead: &'static str,
    slot: Slot,
}

const fn fixed(lead: &'static str) -> Template {
    Template {
        lead,
        slot: Slot::None,
    }
}

const fn suggestion(lead: &'static str) -> Template {
    Template {
        lead,
        slot: Slot::Suggestion,
    }
}

const fn content(lead: &'static str) -> Template {
    Template {
        lead,
        slot: Slot::TopicContent,
    }
}

const HOW_TO_TEMPLATES: &[Template] = &[
    suggestion("Here's a step-by-step approach you could try: "),
    suggestion("One effective method is to "),
    suggestion("I'd recommend starting with "),
    suggestion("Based on your current mood, you might want to "),
    suggestion("A good approach would be to "),
    suggestion("Consider trying this approach: "),
];

const FACTUAL_TEMPLATES: &[Template] = &[
    content("From what I understand, "),
    content("According to my knowledge, "),
    content("Here's what I know about that: "),
    content("I can tell you that "),
    content("The information I have suggests that "),
];

const OPINION_TEMPLATES: &[Template] = &[
    content("In my view, "),
    content("I think "),
    content("From my perspective, "),
    content("Based on what I know, "),
    content("My take on this is that "),
];

const CLARIFICATION_TEMPLATES: &[Template] = &[
    content("Let me clarify: "),
    content("To be more specific, "),
    content("What I meant was "),
    content("To put it another way, "),
    content("Let me explain that better: "),
];

const PERSONAL_TEMPLATES: &[Template] = &[
    fixed("I'm your AI learning companion, designed to help you with your studies based on your emotional state."),
    fixed("I'm here to provide personalized learning recommendations based on how you're feeling."),
    fixed("I'm an AI assistant that adapts to your mood to suggest the most effective study approaches."),
    fixed("I'm your adaptive learning companion, focused on helping you learn effectively regardless of your mood."),
    fixed("I'm an AI designed to understand your emotional state and provide tailored learning suggestions."),
];

const PREFERENCE_TEMPLATES: &[Template] = &[
    fixed("As an AI, I don't have personal preferences, but I can suggest what might work well for you based on your mood."),
    fixed("While I don't have personal likes or dislikes, I can recommend what might be most effective for your current state of mind."),
    fixed("I don't experience preferences like humans do, but I can analyze what approaches might suit your current mood best."),
    fixed("Rather than my preferences, I'm designed to understand what would work best for you right now."),
    fixed("I'm focused on what would be most helpful for you, rather than having preferences of my own."),
];

const HELP_TEMPLATES: &[Template] = &[
    fixed("I'd be happy to help. What specific aspect are you looking for assistance with?"),
    fixed("I'm here to assist you. Could you tell me more about what you need help with?"),
    fixed("I'll do my best to help you. What particular challenge are you facing?"),
    fixed("I'm ready to support you. What would you like help with specifically?"),
    fixed("I'm here to provide assistance. Could you share more details about what you need?"),
];

const SUGGESTION_TEMPLATES: &[Template] = &[
    suggestion("Based on your current mood, I'd suggest "),
    suggestion("Given how you're feeling, you might want to try "),
    suggestion("A recommendation that might work well for you right now is "),
    suggestion("Considering your state of mind, I'd recommend "),
    suggestion("An approach that could be effective for you now is "),
];

const EXPLANATION_TEMPLATES: &[Template] = &[
    content("Let me explain that for you. "),
    content("Here's an explanation: "),
    content("I'd be happy to clarify that. "),
    content("To explain this concept: "),
    content("Here's what you should know about that: "),
];

const STUDY_POSITIVE: &[&str] = &[
    "Your positive mood is perfect for tackling challenging study material. Consider diving into complex topics or trying creative learning approaches.",
    "With your current positive energy, it's a great time to explore new study techniques or tackle difficult subjects.",
    "Your good mood creates an excellent opportunity for collaborative learning or tackling subjects you find challenging.",
    "This positive state is ideal for making connections between different subjects or exploring the practical applications of what you're learning.",
];

const STUDY_NEGATIVE: &[&str] = &[
    "When you're not feeling your best, it can help to focus on reviewing familiar material or breaking your study sessions into smaller chunks.",
    "For your current mood, gentle study approaches like summarizing what you already know or working on simple practice problems might be best.",
    "Consider taking a more structured approach to studying right now, with clear goals and frequent breaks.",
    "It might help to focus on subjects you enjoy or find easier when you're feeling this way. Small wins can help improve your mood.",
];

const STUDY_NEUTRAL: &[&str] = &[
    "Your balanced mood is well-suited for analytical study approaches and methodical learning.",
    "This neutral state is good for objective analysis and systematic study methods.",
    "With your current mindset, you might find it effective to alternate between different subjects or study techniques.",
    "Your balanced state is ideal for critical thinking and detailed analysis of complex material.",
];

const SUBJECT_POSITIVE: &[&str] = &[
    "Your enthusiasm could be channeled into exploring advanced concepts in this subject or making connections to real-world applications.",
    "With your current energy, you might enjoy tackling the more challenging aspects of this subject or exploring it from creative angles.",
    "Your positive mood is perfect for diving deep into this subject and exploring its complexities.",
    "This is a great time to challenge yourself with advanced material or try teaching concepts to others to deepen your understanding.",
];

const SUBJECT_NEGATIVE: &[&str] = &[
    "When approaching this subject in your current mood, focus on the fundamentals and take small, manageable steps.",
    "It might help to review the basics of this subject or focus on aspects you already feel confident about.",
    "Consider using visual aids or different learning formats to make this subject more approachable right now.",
    "Breaking this subject down into smaller, more digestible parts might make it feel less overwhelming.",
];

const SUBJECT_NEUTRAL: &[&str] = &[
    "Your balanced perspective is ideal for methodical progress through this subject material.",
    "This neutral state allows for objective analysis and systematic learning of the subject.",
    "You're in a good position to evaluate different approaches to this subject and determine what works best for you.",
    "Your current mindset is well-suited for building a comprehensive understanding of this subject.",
];

const FALLBACK_RESPONSES: &[&str] = &[
    "I'm not sure I understand what you're asking. Could you rephrase that or provide more details?",
    "I'd like to help, but I'm having trouble understanding your question. Could you elaborate?",
    "I'm not quite following. Could you explain what you're looking for in different words?",
    "I want to assist you, but I'm not sure what you're asking. Could you provide more context?",
    "I'm sorry, but I'm having difficulty understanding your request. Could you be more specific?",
];

const GREETING_RESPONSES: &[&str] = &[
    "Hello! How are you feeling today? I can suggest study approaches based on your mood.",
    "Hi there! How's your mood today? I can recommend learning strategies that match how you're feeling.",
    "Welcome! How are you doing? I'd love to suggest study techniques tailored to your current emotional state.",
    "Greetings! How are you feeling? I can provide personalized learning recommendations based on your mood.",
    "Hello! How's your day going? I can help with study approaches that work well with your current mood.",
];

const OPENING_GREETINGS: &[&str] = &[
    "Hi there! I'm your AI learning companion. How are you feeling today?",
    "Hello! I'm your AI study assistant. How's your mood today?",
    "Welcome! I'm here to help with your studies. How are you feeling right now?",
    "Greetings! I'm your AI learning partner. How's your day going?",
    "Hi! I'm your personalized study companion. How are you feeling today?",
];

/// Appended to every opening line
const OPENING_INVITATION: &str = "Tell me about your mood or what's on your mind, and I'll recommend study approaches that might work best for you right now.";

const VARIETY_TRANSITIONS: &[&str] = &[
    "Let's try a different approach this time. ",
    "I notice we've been discussing similar things. Let's explore something new. ",
    "How about we look at this from a fresh perspective? ",
    "Let's change direction a bit. ",
    "I'd like to offer a different kind of suggestion this time. ",
];

const VARIETY_APPROACHES: &[&str] = &[
    "try a completely different learning environment",
    "consider taking a short break before returning to your studies",
    "experiment with a new study technique like the Pomodoro method",
    "try explaining the concepts to someone else or even to an imaginary student",
    "create visual maps or diagrams of the material",
    "record yourself explaining difficult concepts and listen back",
    "find real-world applications for what you're learning",
];

const POSITIVE_COURSE_RECOMMENDATIONS: &[&str] = &[
    "try tackling the most challenging concepts first while your energy is high",
    "consider exploring advanced topics or optional materials that extend beyond the core curriculum",
    "you might benefit from collaborative study sessions or discussion groups",
];

const NEGATIVE_COURSE_RECOMMENDATIONS: &[&str] = &[
    "focus on reviewing fundamental concepts and building confidence with the basics",
    "break complex topics into smaller, more manageable parts",
    "consider using visual aids or alternative learning formats that might feel less demanding",
];

const NEUTRAL_COURSE_RECOMMENDATIONS: &[&str] = &[
    "a systematic approach to covering all the required material might be most effective",
    "balancing theory with practical applications can help solidify your understanding",
    "alternating between different topics within the course can help maintain engagement",
];

const DEFAULT_SUGGESTION: &str = "focus on what interests you most and take breaks when needed";

const DEFAULT_TOPIC_CONTENT: &str =
    "focusing on your current interests while being mindful of your emotional state can enhance learning";

// NOTE: expect() is acceptable for a literal pattern compiled once
static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(hi|hello|hey|greetings|howdy|hiya)").expect("Invalid regex: greeting pattern")
});

/// Greetings longer than this many words are treated as regular input
const GREETING_MAX_WORDS: usize = 3;

fn question_templates(question_type: QuestionType) -> &'static [Template] {
    match question_type {
        QuestionType::HowTo => HOW_TO_TEMPLATES,
        QuestionType::Factual => FACTUAL_TEMPLATES,
        QuestionType::Opinion => OPINION_TEMPLATES,
        QuestionType::Clarification => CLARIFICATION_TEMPLATES,
        QuestionType::Personal => PERSONAL_TEMPLATES,
        QuestionType::Preference => PREFERENCE_TEMPLATES,
    }
}

fn command_templates(command: Command) -> &'static [Template] {
    match command {
        Command::Help => HELP_TEMPLATES,
        Command::Suggestion => SUGGESTION_TEMPLATES,
        Command::Explanation => EXPLANATION_TEMPLATES,
    }
}

/// Topic replies exist for study and subject topics only; other topics get
/// the mood-based reply.
fn topic_templates(topic: Topic, sentiment: Sentiment) -> Option<&'static [&'static str]> {
    match (topic, sentiment) {
        (Topic::Study, Sentiment::Positive) => Some(STUDY_POSITIVE),
        (Topic::Study, Sentiment::Negative) => Some(STUDY_NEGATIVE),
        (Topic::Study, Sentiment::Neutral) => Some(STUDY_NEUTRAL),
        (Topic::Subject, Sentiment::Positive) => Some(SUBJECT_POSITIVE),
        (Topic::Subject, Sentiment::Negative) => Some(SUBJECT_NEGATIVE),
        (Topic::Subject, Sentiment::Neutral) => Some(SUBJECT_NEUTRAL),
        _ => None,
    }
}

fn topic_content(topic: Option<Topic>) -> &'static str {
    match topic {
        Some(Topic::Study) => "effective study techniques include active recall, spaced repetition, and teaching concepts to others",
        Some(Topic::Subject) => "approaching this subject with a growth mindset can help you overcome challenges and deepen your understanding",
        Some(Topic::Career) => "balancing your studies with career planning can help you apply what you're learning to real-world scenarios",
        Some(Topic::Health) => "maintaining a balance between studying and self-care is crucial for long-term success",
        Some(Topic::Technology) => "using technology mindfully can enhance your learning experience without becoming a distraction",
        Some(Topic::Personal) => "your personal experiences and perspectives can enrich your learning process",
        Some(Topic::Entertainment) | None => DEFAULT_TOPIC_CONTENT,
    }
}

/// Sentiment bucket a mood falls into
pub fn mood_sentiment(mood: Mood) -> Sentiment {
    match mood {
        Mood::Happy => Sentiment::Positive,
        Mood::Sad | Mood::Angry | Mood::Fearful => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

/// Generates replies, routing every random choice through its selector.
pub struct ResponseGenerator<S: Selector> {
    selector: S,
}

impl Default for ResponseGenerator<RandomSelector> {
    fn default() -> Self {
        Self::new(RandomSelector)
    }
}

impl<S: Selector> ResponseGenerator<S> {
    pub fn new(selector: S) -> Self {
        Self { selector }
    }

    /// Line the companion opens a new session with.
    pub fn opening(&mut self) -> String {
        opening_greeting(&mut self.selector)
    }

    /// Reply to `analysis` given the memory of the previous turns.
    pub fn generate(
        &mut self,
        analysis: &InputAnalysis,
        memory: &ConversationMemory,
        course: Option<&str>,
    ) -> String {
        generate_response_with(analysis, memory, course, &mut self.selector)
    }
}

/// Opening line for a new session: a greeting followed by an invitation to
/// share mood or concerns.
pub fn opening_greeting(selector: &mut dyn Selector) -> String {
    let greeting = choose(selector, OPENING_GREETINGS, TemplateList::Opening);
    format!("{greeting} {OPENING_INVITATION}")
}

/// Reply with uniformly random template selection.
pub fn generate_response(
    analysis: &InputAnalysis,
    memory: &ConversationMemory,
    course: Option<&str>,
) -> String {
    generate_response_with(analysis, memory, course, &mut RandomSelector)
}

/// Reply with template selection delegated to `selector`.
///
/// The mood is re-derived from `analysis.original_input`. A blank course is
/// treated as no course.
pub fn generate_response_with(
    analysis: &InputAnalysis,
    memory: &ConversationMemory,
    course: Option<&str>,
    selector: &mut dyn Selector,
) -> String {
    let course = course.map(str::trim).filter(|c| !c.is_empty());

    if analysis.is_empty {
        return choose(selector, FALLBACK_RESPONSES, TemplateList::Fallback).to_string();
    }

    if is_greeting(&analysis.original_input) {
        debug!("Greeting reply");
        return choose(selector, GREETING_RESPONSES, TemplateList::Greeting).to_string();
    }

    let mood = analyze_text_mood(&analysis.original_input);

    if memory.is_repetitive(analysis.primary_question_type()) {
        debug!(
            repeated = ?memory.last_input_type,
            count = memory.repetitive_input_count,
            "Repetitive input, switching to variety reply"
        );
        return variety_response(course, selector);
    }

    let mut writer = ReplyWriter {
        analysis,
        mood: &mood,
        course,
        selector,
    };

    if analysis.is_question {
        if let Some(question_type) = analysis.primary_question_type() {
            debug!(%question_type, "Question reply");
            return writer.question_response(question_type);
        }
    }

    if let Some(command) = analysis.primary_command() {
        debug!(?command, "Command reply");
        return writer.command_response(command);
    }

    if let Some(topic) = analysis.primary_topic() {
        if let Some(reply) = writer.topic_response(topic) {
            debug!(%topic, "Topic reply");
            return reply;
        }
    }

    debug!(mood = %mood.mood, "Mood reply");
    writer.mood_response()
}

fn is_greeting(input: &str) -> bool {
    GREETING.is_match(input) && input.split(' ').count() <= GREETING_MAX_WORDS
}

fn variety_response(course: Option<&str>, selector: &mut dyn Selector) -> String {
    let transition = choose(selector, VARIETY_TRANSITIONS, TemplateList::VarietyTransition);
    let approach = choose(selector, VARIETY_APPROACHES, TemplateList::VarietyApproach);

    let follow_up = match course {
        Some(course) => format!(
            "Would you like me to suggest some specific {course} resources that align with this approach?"
        ),
        None => "Would you like to tell me more about what you're studying so I can provide more specific suggestions?".to_string(),
    };

    format!("{transition}One idea might be to {approach}. {follow_up}")
}

/// Per-reply state shared by the template branches
struct ReplyWriter<'a> {
    analysis: &'a InputAnalysis,
    mood: &'a MoodAnalysis,
    course: Option<&'a str>,
    selector: &'a mut dyn Selector,
}

impl ReplyWriter<'_> {
    fn question_response(&mut self, question_type: QuestionType) -> String {
        let template = *choose(
            self.selector,
            question_templates(question_type),
            TemplateList::QuestionTemplate,
        );
        let mut reply = self.render(template);

        if let Some(course) = self.course {
            reply.push_str(&format!(
                " Since you're studying {course}, you might find it helpful to relate these concepts to your coursework."
            ));
        }

        reply
    }

    fn command_response(&mut self, command: Command) -> String {
        let template = *choose(
            self.selector,
            command_templates(command),
            TemplateList::CommandTemplate,
        );
        let mut reply = self.render(template);

        if let Some(course) = self.course {
            reply.push_str(&format!(
                " This approach can be particularly effective for your {course} studies."
            ));
        }

        reply
    }

    /// `None` when the topic has no reply table.
    fn topic_response(&mut self, topic: Topic) -> Option<String> {
        let sentiment = match self.analysis.sentiment {
            Sentiment::Neutral => mood_sentiment(self.mood.mood),
            other => other,
        };

        let templates = topic_templates(topic, sentiment)?;
        let mut reply = choose(self.selector, templates, TemplateList::TopicTemplate).to_string();

        if let Some(course) = self.course {
            let recommendation = self.course_recommendation();
            reply.push_str(&format!(
                " For your {course} studies specifically, {recommendation}."
            ));
        }

        Some(reply)
    }

    fn mood_response(&mut self) -> String {
        let mood = self.mood;
        let mut reply = format!(
            "I sense that you're feeling {}. {} ",
            mood.mood,
            mood.description()
        );

        if !mood.recommended_approaches().is_empty() {
            let approach = choose(
                self.selector,
                mood.recommended_approaches(),
                TemplateList::MoodApproach,
            );
            reply.push_str(&format!(
                "One effective approach might be to {}. ",
                approach.to_lowercase()
            ));
        }

        match self.course {
            Some(course) => reply.push_str(&format!(
                "Since you're studying {course}, I've prepared some learning resources that might work well with your current mood."
            )),
            None => reply.push_str(&format!(
                "I'd recommend focusing on {} right now. Would you like some specific study suggestions?",
                mood.learning_style().to_lowercase()
            )),
        }

        reply
    }

    fn render(&mut self, template: Template) -> String {
        let filling = match template.slot {
            Slot::None => return template.lead.to_string(),
            Slot::Suggestion => self.mood_suggestion(),
            Slot::TopicContent => topic_content(self.analysis.primary_topic()).to_string(),
        };
        format!("{}{}", template.lead, filling)
    }

    fn mood_suggestion(&mut self) -> String {
        let approaches = self.mood.recommended_approaches();
        if approaches.is_empty() {
            return DEFAULT_SUGGESTION.to_string();
        }
        choose(self.selector, approaches, TemplateList::MoodApproach).to_lowercase()
    }

    fn course_recommendation(&mut self) -> &'static str {
        let recommendations = match mood_sentiment(self.mood.mood) {
            Sentiment::Positive => POSITIVE_COURSE_RECOMMENDATIONS,
            Sentiment::Negative => NEGATIVE_COURSE_RECOMMENDATIONS,
            Sentiment::Neutral => NEUTRAL_COURSE_RECOMMENDATIONS,
        };
        *choose(
            self.selector,
            recommendations,
            TemplateList::CourseRecommendation,
        )
    }
}

/// Every template lead and fixed reply, for template hygiene checks
#[cfg(test)]
pub(crate) fn all_template_texts() -> Vec<&'static str> {
    let templates = [
        HOW_TO_TEMPLATES,
        FACTUAL_TEMPLATES,
        OPINION_TEMPLATES,
        CLARIFICATION_TEMPLATES,
        PERSONAL_TEMPLATES,
        PREFERENCE_TEMPLATES,
        HELP_TEMPLATES,
        SUGGESTION_TEMPLATES,
        EXPLANATION_TEMPLATES,
    ];
    let texts = [
        STUDY_POSITIVE,
        STUDY_NEGATIVE,
        STUDY_NEUTRAL,
        SUBJECT_POSITIVE,
        SUBJECT_NEGATIVE,
        SUBJECT_NEUTRAL,
        FALLBACK_RESPONSES,
        GREETING_RESPONSES,
        OPENING_GREETINGS,
        VARIETY_TRANSITIONS,
        VARIETY_APPROACHES,
        POSITIVE_COURSE_RECOMMENDATIONS,
        NEGATIVE_COURSE_RECOMMENDATIONS,
        NEUTRAL_COURSE_RECOMMENDATIONS,
    ];

    templates
        .iter()
        .flat_map(|list| list.iter().map(|t| t.lead))
        .chain(texts.iter().flat_map(|list| list.iter().copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::input::analyze_input;
    use crate::brain::select::FixedSelector;

    fn reply(input: &str, course: Option<&str>) -> String {
        generate_response_with(
            &analyze_input(input),
            &ConversationMemory::new(),
            course,
            &mut FixedSelector(0),
        )
    }

    #[test]
    fn test_empty_input_gets_fallback() {
        assert_eq!(reply("   ", None), FALLBACK_RESPONSES[0]);
    }

    #[test]
    fn test_short_greeting() {
        assert_eq!(reply("Hello there", None), GREETING_RESPONSES[0]);
        assert_ne!(reply("hey you over there", None), GREETING_RESPONSES[0]);
    }

    #[test]
    fn test_how_to_question_uses_mood_suggestion() {
        assert_eq!(
            reply("How do I study better?", None),
            "Here's a step-by-step approach you could try: take a systematic approach to the subject"
        );
    }

    #[test]
    fn test_factual_question_uses_topic_content() {
        assert_eq!(
            reply("What is calculus?", None),
            "From what I understand, approaching this subject with a growth mindset can help you overcome challenges and deepen your understanding"
        );
    }

    #[test]
    fn test_question_with_course() {
        assert_eq!(
            reply("How do I study better?", Some("Physics")),
            "Here's a step-by-step approach you could try: take a systematic approach to the subject \
             Since you're studying Physics, you might find it helpful to relate these concepts to your coursework."
        );
    }

    #[test]
    fn test_suggestion_command() {
        assert_eq!(
            reply("Please suggest a plan", Some("Physics")),
            "Based on your current mood, I'd suggest take a systematic approach to the subject \
             This approach can be particularly effective for your Physics studies."
        );
    }

    #[test]
    fn test_explanation_command_uses_topic_content() {
        assert_eq!(
            reply("Explain photosynthesis in biology", None),
            "Let me explain that for you. approaching this subject with a growth mindset can help you overcome challenges and deepen your understanding"
        );
    }

    #[test]
    fn test_topic_reply_with_neutral_mood() {
        assert_eq!(
            reply("I have an exam tomorrow", Some("Physics")),
            format!(
                "{} For your Physics studies specifically, {}.",
                STUDY_NEUTRAL[0], NEUTRAL_COURSE_RECOMMENDATIONS[0]
            )
        );
    }

    #[test]
    fn test_topic_sentiment_remapped_from_mood() {
        // no sentiment words, but the negation table makes the mood sad
        assert_eq!(
            reply("Feeling down about my exam", Some("Physics")),
            format!(
                "{} For your Physics studies specifically, {}.",
                STUDY_NEGATIVE[0], NEGATIVE_COURSE_RECOMMENDATIONS[0]
            )
        );
    }

    #[test]
    fn test_topic_without_table_falls_back_to_mood() {
        assert_eq!(
            reply("My job interview", None),
            "I sense that you're feeling neutral. Your balanced state is good for comprehensive, analytical learning. \
             One effective approach might be to take a systematic approach to the subject. \
             I'd recommend focusing on balanced and analytical learning right now. Would you like some specific study suggestions?"
        );
    }

    #[test]
    fn test_mood_reply() {
        assert_eq!(
            reply("I feel so happy and cheerful", Some("Physics")),
            "I sense that you're feeling happy. Your positive mood is great for creative and exploratory learning! \
             One effective approach might be to try challenging, novel concepts. \
             Since you're studying Physics, I've prepared some learning resources that might work well with your current mood."
        );
    }

    #[test]
    fn test_repetition_guard() {
        let memory = ConversationMemory {
            last_input_type: Some(QuestionType::Factual),
            repetitive_input_count: 2,
            ..ConversationMemory::default()
        };
        let analysis = analyze_input("What is calculus?");

        let reply = generate_response_with(&analysis, &memory, None, &mut FixedSelector(0));
        assert_eq!(
            reply,
            "Let's try a different approach this time. One idea might be to try a completely different learning environment. \
             Would you like to tell me more about what you're studying so I can provide more specific suggestions?"
        );

        let reply = generate_response_with(&analysis, &memory, Some("Physics"), &mut FixedSelector(0));
        assert!(reply.ends_with(
            "Would you like me to suggest some specific Physics resources that align with this approach?"
        ));
    }

    #[test]
    fn test_repetition_guard_needs_count_above_one() {
        let memory = ConversationMemory {
            last_input_type: Some(QuestionType::Factual),
            repetitive_input_count: 1,
            ..ConversationMemory::default()
        };
        let analysis = analyze_input("What is calculus?");
        let reply = generate_response_with(&analysis, &memory, None, &mut FixedSelector(0));
        assert!(reply.starts_with("From what I understand, "));
    }

    #[test]
    fn test_blank_course_is_ignored() {
        assert_eq!(reply("How do I study better?", Some("  ")), reply("How do I study better?", None));
    }

    #[test]
    fn test_selector_order_for_topic_reply() {
        let mut lists = Vec::new();
        let mut selector = |_choices: usize, list: TemplateList| {
            lists.push(list);
            0
        };
        generate_response_with(
            &analyze_input("I have an exam tomorrow"),
            &ConversationMemory::new(),
            Some("Physics"),
            &mut selector,
        );
        assert_eq!(
            lists,
            vec![TemplateList::TopicTemplate, TemplateList::CourseRecommendation]
        );
    }

    #[test]
    fn test_template_texts_have_no_placeholders() {
        for text in all_template_texts() {
            assert!(!text.contains('{') && !text.contains('}'), "{text}");
        }
    }

    #[test]
    fn test_question_without_topic_uses_default_content() {
        let analysis = analyze_input("What do you think?");
        assert!(analysis.topics.is_empty());
        assert_eq!(
            reply("What do you think?", None),
            format!("In my view, {}", DEFAULT_TOPIC_CONTENT)
        );
        assert_eq!(
            reply("What is it?", None),
            format!("From what I understand, {}", DEFAULT_TOPIC_CONTENT)
        );
    }

    #[test]
    fn test_clarification_question() {
        assert_eq!(
            reply("Can you clarify?", None),
            format!("Let me clarify: {}", DEFAULT_TOPIC_CONTENT)
        );
    }

    #[test]
    fn test_personal_question() {
        assert_eq!(
            reply("What can you do?", None),
            "I'm your AI learning companion, designed to help you with your studies based on your emotional state."
        );
    }

    #[test]
    fn test_factual_pattern_outranks_personal() {
        // "who are" is a factual pattern and factual is declared first
        let analysis = analyze_input("Who are you?");
        assert_eq!(
            analysis.question_types,
            vec![QuestionType::Factual, QuestionType::Personal]
        );
        assert_eq!(
            reply("Who are you?", None),
            format!("From what I understand, {}", DEFAULT_TOPIC_CONTENT)
        );
    }

    #[test]
    fn test_preference_question() {
        assert_eq!(
            reply("Do you like music?", None),
            "As an AI, I don't have personal preferences, but I can suggest what might work well for you based on your mood."
        );
    }

    #[test]
    fn test_help_command() {
        let analysis = analyze_input("Please help me");
        assert!(!analysis.is_question);
        assert_eq!(analysis.commands, vec![Command::Help]);
        assert_eq!(
            reply("Please help me", None),
            "I'd be happy to help. What specific aspect are you looking for assistance with?"
        );
        assert_eq!(
            reply("Please help me", Some("Art")),
            "I'd be happy to help. What specific aspect are you looking for assistance with? This approach can be particularly effective for your Art studies."
        );
    }

    #[test]
    fn test_opening_greeting() {
        let opening = opening_greeting(&mut FixedSelector(1));
        assert_eq!(
            opening,
            format!("Hello! I'm your AI study assistant. How's your mood today? {}", OPENING_INVITATION)
        );

        let mut lists = Vec::new();
        let mut selector = |choices: usize, list: TemplateList| {
            lists.push((choices, list));
            0
        };
        opening_greeting(&mut selector);
        assert_eq!(lists, vec![(OPENING_GREETINGS.len(), TemplateList::Opening)]);
        assert!(!OPENING_INVITATION.contains('{'));
    }

    #[test]
    fn test_mood_sentiment_buckets() {
        assert_eq!(mood_sentiment(Mood::Happy), Sentiment::Positive);
        assert_eq!(mood_sentiment(Mood::Fearful), Sentiment::Negative);
        assert_eq!(mood_sentiment(Mood::Curious), Sentiment::Neutral);
    }
}
