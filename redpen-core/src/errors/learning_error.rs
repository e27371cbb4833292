/// Feedback processing errors.
#[derive(Debug, thiserror::Error)]
pub enum LearningError {
    #[error("malformed feedback event {id}: {reason}")]
    MalformedEvent { id: String, reason: String },

    #[error("no rule matches expression '{expression}'")]
    UnknownRule { expression: String },
}
