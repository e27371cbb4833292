//! The write path of the Redpen engine: consumes reviewer feedback events
//! and mutates the rule store by creating rules, adjusting weights, and
//! marking rules for removal.

pub mod categorize;
pub mod processor;
pub mod source;
pub mod weights;

pub use processor::FeedbackProcessor;
pub use source::{FeedbackSource, InMemoryFeedbackQueue};
