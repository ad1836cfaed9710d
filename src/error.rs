//! Error types shared by the catalog, quiz and cart engines

use thiserror::Error;

use crate::quiz::QuizPhase;

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Everything an engine operation can reject.
///
/// None of these are transient: they are caller mistakes, and the state value
/// the operation was invoked on is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot {action} while the quiz is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: QuizPhase,
    },

    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("product {0} is not in the cart")]
    UnknownCartLine(u32),

    #[error("a cart line for product {product_id} cannot hold {quantity} items")]
    QuantityTooLarge { product_id: u32, quantity: i64 },

    #[error("a quiz needs at least one question")]
    EmptyQuiz,

    #[error("question {id} is malformed: {reason}")]
    MalformedQuestion { id: u32, reason: String },
}

impl EngineError {
    pub fn invalid_transition(action: &'static str, phase: QuizPhase) -> Self {
        Self::InvalidTransition { action, phase }
    }

    pub fn malformed_question(id: u32, reason: impl Into<String>) -> Self {
        Self::MalformedQuestion {
            id,
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading the bot configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    NotAPositiveInteger { key: &'static str, value: String },
}
