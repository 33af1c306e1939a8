//! Rolling conversation memory.
//!
//! Memory is a plain value: each completed turn produces the next memory
//! through [`ConversationMemory::advance`]. The generator only ever reads
//! the memory of the turns *before* the one it is answering.

use serde::{Deserialize, Serialize};

use super::input::{InputAnalysis, QuestionType, Topic};
use super::mood::Mood;

pub const MAX_PREVIOUS_INPUTS: usize = 5;
pub const MAX_PREVIOUS_RESPONSES: usize = 5;
pub const MAX_MENTIONED_TOPICS: usize = 5;
pub const MAX_USER_MOODS: usize = 3;

/// What happened in one completed turn
#[derive(Debug, Clone)]
pub struct TurnRecord<'a> {
    /// Raw user input
    pub input: &'a str,
    pub analysis: &'a InputAnalysis,
    pub mood: Mood,
    /// Reply given for this turn
    pub response: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMemory {
    pub previous_inputs: Vec<String>,
    pub previous_responses: Vec<String>,
    /// Primary question type of the last turn
    pub last_input_type: Option<QuestionType>,
    /// Consecutive turns sharing the same primary question type
    pub repetitive_input_count: u32,
    /// Distinct topics, oldest first
    pub mentioned_topics: Vec<Topic>,
    pub user_moods: Vec<Mood>,
}

impl ConversationMemory {
    /// Memory for a fresh session
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory after `turn` has completed.
    pub fn advance(&self, turn: &TurnRecord<'_>) -> Self {
        let current_type = turn.analysis.primary_question_type();

        let repeated = current_type.is_some() && current_type == self.last_input_type;
        let repetitive_input_count = if repeated {
            self.repetitive_input_count.saturating_add(1)
        } else {
            0
        };

        let mut mentioned_topics = self.mentioned_topics.clone();
        for topic in &turn.analysis.topics {
            if !mentioned_topics.contains(topic) {
                mentioned_topics.push(*topic);
            }
        }

        Self {
            previous_inputs: push_capped(
                &self.previous_inputs,
                turn.input.to_string(),
                MAX_PREVIOUS_INPUTS,
            ),
            previous_responses: push_capped(
                &self.previous_responses,
                turn.response.to_string(),
                MAX_PREVIOUS_RESPONSES,
            ),
            last_input_type: current_type,
            repetitive_input_count,
            mentioned_topics: keep_last(mentioned_topics, MAX_MENTIONED_TOPICS),
            user_moods: push_capped(&self.user_moods, turn.mood, MAX_USER_MOODS),
        }
    }

    /// Whether the current turn repeats the question type of recent turns
    /// often enough to warrant a change of direction.
    pub fn is_repetitive(&self, current: Option<QuestionType>) -> bool {
        current.is_some() && self.last_input_type == current && self.repetitive_input_count > 1
    }

    /// Most recently detected mood
    pub fn last_mood(&self) -> Option<Mood> {
        self.user_moods.last().copied()
    }
}

fn push_capped<T: Clone>(items: &[T], item: T, cap: usize) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(item);
    keep_last(next, cap)
}

fn keep_last<T>(mut items: Vec<T>, cap: usize) -> Vec<T> {
    if items.len() > cap {
        items.drain(..items.len() - cap);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::input::analyze_input;

    fn advance(memory: &ConversationMemory, input: &str) -> ConversationMemory {
        let analysis = analyze_input(input);
        memory.advance(&TurnRecord {
            input,
            analysis: &analysis,
            mood: Mood::Neutral,
            response: "ok",
        })
    }

    #[test]
    fn test_fresh_memory() {
        let memory = ConversationMemory::new();
        assert!(memory.previous_inputs.is_empty());
        assert_eq!(memory.last_input_type, None);
        assert_eq!(memory.repetitive_input_count, 0);
        assert_eq!(memory.last_mood(), None);
    }

    #[test]
    fn test_advance_leaves_original_untouched() {
        let memory = ConversationMemory::new();
        let next = advance(&memory, "What is calculus?");
        assert_eq!(memory, ConversationMemory::new());
        assert_eq!(next.previous_inputs, vec!["What is calculus?"]);
        assert_eq!(next.previous_responses, vec!["ok"]);
        assert_eq!(next.last_input_type, Some(QuestionType::Factual));
        assert_eq!(next.mentioned_topics, vec![Topic::Subject]);
    }

    #[test]
    fn test_repetition_counter() {
        let mut memory = ConversationMemory::new();
        memory = advance(&memory, "What is calculus?");
        assert_eq!(memory.repetitive_input_count, 0);
        memory = advance(&memory, "What is algebra?");
        assert_eq!(memory.repetitive_input_count, 1);
        memory = advance(&memory, "What is geometry?");
        assert_eq!(memory.repetitive_input_count, 2);
        assert!(memory.is_repetitive(Some(QuestionType::Factual)));
        assert!(!memory.is_repetitive(Some(QuestionType::HowTo)));

        memory = advance(&memory, "How do I study?");
        assert_eq!(memory.repetitive_input_count, 0);
        assert_eq!(memory.last_input_type, Some(QuestionType::HowTo));
    }

    #[test]
    fn test_turns_without_question_type_never_repeat() {
        let mut memory = ConversationMemory::new();
        for _ in 0..4 {
            memory = advance(&memory, "hmm");
        }
        assert_eq!(memory.last_input_type, None);
        assert_eq!(memory.repetitive_input_count, 0);
        assert!(!memory.is_repetitive(None));
    }

    #[test]
    fn test_caps() {
        let mut memory = ConversationMemory::new();
        for i in 0..8 {
            let analysis = analyze_input("anything");
            let input = format!("input {i}");
            let response = format!("response {i}");
            memory = memory.advance(&TurnRecord {
                input: &input,
                analysis: &analysis,
                mood: Mood::ALL[i],
                response: &response,
            });
        }
        assert_eq!(memory.previous_inputs.len(), MAX_PREVIOUS_INPUTS);
        assert_eq!(memory.previous_inputs[0], "input 3");
        assert_eq!(memory.previous_responses.last().unwrap(), "response 7");
        assert_eq!(memory.user_moods, vec![Mood::ALL[5], Mood::ALL[6], Mood::ALL[7]]);
        assert_eq!(memory.last_mood(), Some(Mood::ALL[7]));
    }

    #[test]
    fn test_topics_distinct_and_capped() {
        let mut memory = ConversationMemory::new();
        memory = advance(&memory, "my exam");
        memory = advance(&memory, "my exam again");
        assert_eq!(memory.mentioned_topics, vec![Topic::Study]);

        memory = advance(&memory, "math");
        memory = advance(&memory, "my job");
        memory = advance(&memory, "sleep");
        memory = advance(&memory, "a movie");
        memory = advance(&memory, "my laptop");
        assert_eq!(memory.mentioned_topics.len(), MAX_MENTIONED_TOPICS);
        assert_eq!(memory.mentioned_topics[0], Topic::Subject);
        assert_eq!(memory.mentioned_topics[4], Topic::Technology);
    }
}
