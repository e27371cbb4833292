//! Whole-engine flow: learn from feedback, detect, reject, maintain.

use std::sync::Arc;

use redpen_analysis::MatchEngine;
use redpen_core::{ErrorCategory, FeedbackEvent, FeedbackKind};
use redpen_learning::{FeedbackProcessor, InMemoryFeedbackQueue};
use redpen_maintenance::Maintainer;
use redpen_store::StoreEngine;

fn missed(wrong: &str, correct: &str) -> FeedbackEvent {
    FeedbackEvent::new("essay-1", "teacher-1", FeedbackKind::MissedIssue)
        .with_expressions(wrong, Some(correct))
}

fn false_positive(expression: &str) -> FeedbackEvent {
    FeedbackEvent::new("essay-2", "teacher-2", FeedbackKind::FalsePositive)
        .with_expressions(expression, None)
}

#[test]
fn learn_detect_reject_maintain() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(StoreEngine::open_in_dir(dir.path()).unwrap());
    let processor = FeedbackProcessor::new(engine.clone());
    let matcher = MatchEngine::new(engine.clone());
    let maintainer = Maintainer::new(engine.clone());

    // 1. The engine knows nothing yet.
    assert!(matcher.analyze("They is happy today.", None).is_clean());

    // 2. A reviewer reports the miss; the engine learns the rule.
    let mut queue = InMemoryFeedbackQueue::new();
    queue.push(missed("they is", "they are"));
    let stats = processor.drain(&mut queue).unwrap();
    assert_eq!(stats.missed, 1);

    // 3. The same essay now gets flagged.
    let report = matcher.analyze("They is happy today.", None);
    assert_eq!(
        report.issues[&ErrorCategory::SubjectVerbAgreement],
        vec!["'they is' possibly should be 'they are'"]
    );

    // 4. Three rejections soft-delete the rule and detection stops.
    let mut queue = InMemoryFeedbackQueue::new();
    for _ in 0..3 {
        queue.push(false_positive("they is"));
    }
    let stats = processor.drain(&mut queue).unwrap();
    assert_eq!(stats.false_positive, 3);
    assert!(matcher.analyze("They is happy today.", None).is_clean());

    // 5. Maintenance purges the soft-deleted rule for good.
    let report = maintainer.run().unwrap();
    assert_eq!(report.removed, 1);
    assert_eq!(engine.snapshot().total_rules(), 0);

    // 6. And a second pass has nothing left to do.
    assert!(maintainer.run().unwrap().is_noop());
}

#[test]
fn duplicate_rules_from_feedback_merge_in_maintenance() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(StoreEngine::open_in_dir(dir.path()).unwrap());
    let processor = FeedbackProcessor::new(engine.clone());
    let maintainer = Maintainer::new(engine.clone());

    // Two reviewers report the same miss with different corrections; the
    // second lands on the same rule, but a duplicate can also be seeded
    // directly (e.g. by an import), which maintenance must fold.
    processor.apply(&mut [missed("buyed", "bought")]).unwrap();
    engine
        .commit(|store| {
            store.insert_rule(
                ErrorCategory::Tense,
                redpen_core::Rule::new("buyed", vec!["purchased".into()], 1),
            );
        })
        .unwrap();
    assert_eq!(engine.snapshot().rules[&ErrorCategory::Tense].len(), 2);

    let report = maintainer.run().unwrap();
    assert_eq!(report.merged, 1);

    let store = engine.snapshot();
    let rules = &store.rules[&ErrorCategory::Tense];
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].corrected, vec!["bought", "purchased"]);
    assert_eq!(rules[0].weight, 3);
}

#[test]
fn analysis_reads_are_isolated_from_concurrent_learning() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(StoreEngine::open_in_dir(dir.path()).unwrap());
    let processor = FeedbackProcessor::new(engine.clone());

    processor.apply(&mut [missed("buyed", "bought")]).unwrap();
    let before = engine.snapshot();

    let engine2 = engine.clone();
    let writer = std::thread::spawn(move || {
        let processor = FeedbackProcessor::new(engine2);
        processor.apply(&mut [missed("goed", "went")]).unwrap();
    });
    writer.join().unwrap();

    // The held snapshot still sees exactly one rule; a fresh one sees two.
    assert_eq!(before.total_rules(), 1);
    assert_eq!(engine.snapshot().total_rules(), 2);
}
