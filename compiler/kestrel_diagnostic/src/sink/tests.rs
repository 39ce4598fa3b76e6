use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn warning(message: &str) -> Diagnostic {
    Diagnostic::warning(ErrorCode::W3001).with_message(message)
}

#[test]
fn buffer_sink_captures_in_order() {
    let sink = BufferSink::new();
    sink.emit(warning("first"));
    sink.emit(warning("second"));

    let messages: Vec<_> = sink
        .diagnostics()
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(messages, vec!["first".to_string(), "second".to_string()]);
    assert_eq!(sink.len(), 2);
}

#[test]
fn buffer_sink_take_empties_buffer() {
    let sink = BufferSink::new();
    sink.emit(warning("once"));
    assert_eq!(sink.take().len(), 1);
    assert!(sink.is_empty());
}

#[test]
fn silent_sink_discards() {
    let sink = SilentSink;
    sink.emit(warning("ignored"));
}

#[test]
fn tracing_sink_accepts_every_severity() {
    let sink = TracingSink;
    sink.emit(warning("logged"));
    sink.emit(Diagnostic::error(ErrorCode::E3001).with_message("logged"));
}

#[test]
fn sinks_work_as_trait_objects() {
    let buffer = BufferSink::new();
    let sink: &dyn DiagnosticSink = &buffer;
    sink.emit(warning("dyn"));
    assert_eq!(buffer.len(), 1);
}
