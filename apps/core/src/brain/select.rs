//! Template selection.
//!
//! Every random choice made while generating a reply goes through a
//! [`Selector`], so callers can pin the exact template picked.

use rand::Rng;

/// Which fixed list a choice is being made from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateList {
    /// Opening line of a new session
    Opening,
    Fallback,
    Greeting,
    VarietyTransition,
    VarietyApproach,
    QuestionTemplate,
    CommandTemplate,
    TopicTemplate,
    MoodApproach,
    CourseRecommendation,
}

/// Picks an index into a list of `choices` candidates.
///
/// `choices` is always at least 1. Implementations may return any index;
/// out-of-range values are reduced modulo `choices` by the caller.
pub trait Selector {
    fn pick(&mut self, choices: usize, list: TemplateList) -> usize;
}

impl<F> Selector for F
where
    F: FnMut(usize, TemplateList) -> usize,
{
    fn pick(&mut self, choices: usize, list: TemplateList) -> usize {
        self(choices, list)
    }
}

/// Uniform random selection (production default)
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl Selector for RandomSelector {
    fn pick(&mut self, choices: usize, _list: TemplateList) -> usize {
        rand::thread_rng().gen_range(0..choices.max(1))
    }
}

/// Always picks the same index
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl Selector for FixedSelector {
    fn pick(&mut self, _choices: usize, _list: TemplateList) -> usize {
        self.0
    }
}

/// Pick one item of a non-empty slice through `selector`.
pub(crate) fn choose<'a, T>(
    selector: &mut dyn Selector,
    items: &'a [T],
    list: TemplateList,
) -> &'a T {
    debug_assert!(!items.is_empty(), "template list {list:?} is empty");
    let index = selector.pick(items.len(), list) % items.len();
    &items[index]
}
