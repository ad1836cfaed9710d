pub mod badges;
pub mod questions;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{EngineError, EngineResult};
pub use badges::{Badge, QuizResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub explanation: String,
    pub category: String,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(
        id: u32,
        prompt: impl Into<String>,
        options: &[&str],
        correct_option: usize,
        explanation: impl Into<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option,
            explanation: explanation.into(),
            category: category.into(),
            difficulty,
        }
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_option).map(String::as_str)
    }

    fn validate(&self) -> EngineResult<()> {
        if self.options.len() < 2 {
            return Err(EngineError::malformed_question(
                self.id,
                "needs at least two options",
            ));
        }
        if self.correct_option >= self.options.len() {
            return Err(EngineError::malformed_question(
                self.id,
                format!(
                    "correct option {} is outside its {} options",
                    self.correct_option,
                    self.options.len()
                ),
            ));
        }
        Ok(())
    }
}

/// Where a session is in its question/answer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    AwaitingAnswer(usize),
    Answered { index: usize, selected: usize },
    Completed,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizPhase::AwaitingAnswer(index) => {
                write!(f, "awaiting an answer to question {}", index + 1)
            }
            QuizPhase::Answered { index, .. } => {
                write!(f, "showing the answer to question {}", index + 1)
            }
            QuizPhase::Completed => f.write_str("completed"),
        }
    }
}

/// One attempt at a quiz.
///
/// Every transition borrows the current value and hands back the next one, so
/// a rejected transition leaves the caller's session exactly as it was. The
/// caller samples the clock and passes `now` in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    selected_answer: Option<usize>,
    answered: bool,
    score: u32,
    streak: u32,
    max_streak: u32,
    started_at: DateTime<Utc>,
    // frozen when the last question is advanced past
    elapsed_seconds: Option<u64>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, now: DateTime<Utc>) -> EngineResult<Self> {
        if questions.is_empty() {
            return Err(EngineError::EmptyQuiz);
        }
        for question in &questions {
            question.validate()?;
        }

        Ok(Self::fresh(questions, now))
    }

    fn fresh(questions: Vec<Question>, now: DateTime<Utc>) -> Self {
        Self {
            questions,
            current_index: 0,
            selected_answer: None,
            answered: false,
            score: 0,
            streak: 0,
            max_streak: 0,
            started_at: now,
            elapsed_seconds: None,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        match (self.elapsed_seconds, self.selected_answer) {
            (Some(_), _) => QuizPhase::Completed,
            (None, Some(selected)) if self.answered => QuizPhase::Answered {
                index: self.current_index,
                selected,
            },
            _ => QuizPhase::AwaitingAnswer(self.current_index),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_completed(&self) -> bool {
        self.phase() == QuizPhase::Completed
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// Whether the submitted answer to the current question was right.
    /// `None` until an answer has been submitted.
    pub fn is_correct(&self) -> Option<bool> {
        self.selected_answer
            .map(|selected| selected == self.current_question().correct_option)
    }

    /// Share of the quiz reached, counting the question on screen.
    pub fn progress_percent(&self) -> u32 {
        let total = self.total_questions() as u32;
        ((self.current_index as u32 + 1) * 100) / total
    }

    /// Seconds since the start, or the frozen value once completed.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        self.elapsed_seconds
            .unwrap_or_else(|| seconds_between(self.started_at, now))
    }

    pub fn submit_answer(&self, option: usize) -> EngineResult<Self> {
        let phase = self.phase();
        if !matches!(phase, QuizPhase::AwaitingAnswer(_)) {
            return Err(EngineError::invalid_transition("submit an answer", phase));
        }

        let question = self.current_question();
        if option >= question.options.len() {
            return Err(EngineError::OptionOutOfRange {
                index: option,
                len: question.options.len(),
            });
        }

        let mut next = self.clone();
        next.selected_answer = Some(option);
        next.answered = true;
        if option == question.correct_option {
            next.score += 1;
            next.streak += 1;
            next.max_streak = next.max_streak.max(next.streak);
        } else {
            next.streak = 0;
        }

        log::debug!(
            "Question {} answered with option {} (score {}, streak {})",
            question.id,
            option,
            next.score,
            next.streak
        );
        Ok(next)
    }

    pub fn advance(&self, now: DateTime<Utc>) -> EngineResult<Self> {
        let phase = self.phase();
        if !matches!(phase, QuizPhase::Answered { .. }) {
            return Err(EngineError::invalid_transition("move on", phase));
        }

        let mut next = self.clone();
        if self.current_index + 1 == self.total_questions() {
            next.elapsed_seconds = Some(seconds_between(self.started_at, now));
        } else {
            next.current_index += 1;
            next.selected_answer = None;
            next.answered = false;
        }
        Ok(next)
    }

    pub fn restart(&self, now: DateTime<Utc>) -> Self {
        Self::fresh(self.questions.clone(), now)
    }

    pub fn compute_result(&self) -> EngineResult<QuizResult> {
        match self.elapsed_seconds {
            Some(elapsed_seconds) => Ok(QuizResult::new(
                self.score,
                self.total_questions() as u32,
                elapsed_seconds,
                self.max_streak,
            )),
            None => Err(EngineError::invalid_transition(
                "compute a result",
                self.phase(),
            )),
        }
    }
}

// Clock skew between `started_at` and `now` counts as zero elapsed time.
fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    (end - start).num_seconds().max(0) as u64
}
