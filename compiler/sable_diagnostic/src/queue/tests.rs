use super::*;
use crate::Severity;
use pretty_assertions::assert_eq;
use sable_ir::SourceId;

fn span(start: u32) -> Span {
    Span::new(SourceId::ROOT, start, start + 1)
}

#[test]
fn test_duplicates_collapse() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.deprecation(span(0), "color arithmetic"));
    assert!(!queue.deprecation(span(0), "color arithmetic"));
    assert!(queue.deprecation(span(4), "color arithmetic"));
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_quiet_drops_user_output_only() {
    let mut queue = DiagnosticQueue::with_config(QueueConfig {
        quiet: true,
        deduplicate: true,
    });
    assert!(!queue.user_warning(span(0), "hello"));
    assert!(!queue.debug(span(0), "hello"));
    assert!(queue.deprecation(span(0), "old"));
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_flush_preserves_order() {
    let mut queue = DiagnosticQueue::new();
    queue.user_warning(span(3), "first");
    queue.debug(span(1), "second");
    let flushed = queue.flush();
    assert_eq!(
        flushed.iter().map(|d| d.message.as_str()).collect::<Vec<_>>(),
        vec!["first", "second"]
    );
    assert!(queue.is_empty());
    assert!(queue.user_warning(span(3), "first"));
}

#[test]
fn test_severity_per_channel() {
    let mut queue = DiagnosticQueue::new();
    queue.deprecation(span(0), "old");
    queue.user_warning(span(1), "careful");
    queue.debug(span(2), "value");
    let severities: Vec<Severity> = queue.iter().map(|d| d.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Warning, Severity::Warning, Severity::Note]
    );
    assert!(queue.iter().all(|d| !d.is_error()));
}
