//! Shared trait seams.

use std::sync::Arc;

use crate::category::ErrorCategory;
use crate::report::AnalysisReport;

/// Essay analysis seam.
///
/// The local match engine is the authoritative implementation; a remote
/// analysis service can substitute for it when reachable, falling back to
/// the local engine otherwise. Analysis is best-effort advisory: an
/// implementation that cannot analyze returns an empty report rather than
/// an error.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str, category_hint: Option<ErrorCategory>) -> AnalysisReport;
}

/// `Arc<T>` analyzes by delegating to the inner `T`, so shared engines can
/// be passed wherever `&dyn Analyzer` is needed.
impl<T: Analyzer> Analyzer for Arc<T> {
    fn analyze(&self, text: &str, category_hint: Option<ErrorCategory>) -> AnalysisReport {
        (**self).analyze(text, category_hint)
    }
}
