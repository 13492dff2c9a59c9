//! Shuffled answer choices, cached per question index.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Question;

/// The answer choices for one question in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    index: usize,
    options: Vec<String>,
}

impl OptionSet {
    fn shuffled<R: Rng + ?Sized>(index: usize, question: &Question, rng: &mut R) -> Self {
        let mut options = question.choices();
        options.shuffle(rng);
        Self { index, options }
    }

    /// Question index this ordering belongs to.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.options.get(position).map(String::as_str)
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }
}

/// Holds the ordering for the active question.
///
/// Only a change of index produces a new shuffle.
#[derive(Debug, Default)]
pub struct OptionCache {
    current: Option<OptionSet>,
}

impl OptionCache {
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        question: &Question,
        rng: &mut R,
    ) -> &OptionSet {
        if self.current.as_ref().is_some_and(|set| set.index != index) {
            self.current = None;
        }
        self.current
            .get_or_insert_with(|| OptionSet::shuffled(index, question, rng))
    }

    pub fn current(&self) -> Option<&OptionSet> {
        self.current.as_ref()
    }
}
