use super::*;
use serde_json::json;

#[test]
fn single_push_of_valid_json_matches_serde() {
    for s in [
        "{\"a\": [1, 2], \"b\": \"x\"}",
        "[null, true, 2.5]",
        "\"plain\"",
        "42",
    ] {
        let mut acc = JsonAccumulator::new(Options::default());
        let expected: serde_json::Value = serde_json::from_str(s).unwrap();
        assert_eq!(acc.push(s), Progress::Complete(expected));
    }
}

#[test]
fn truncated_then_completed() {
    let mut acc = JsonAccumulator::new(Options::default());
    assert_eq!(acc.push("{\"a\": 1"), Progress::Incomplete);
    assert_eq!(acc.push("}"), Progress::Complete(json!({"a": 1})));
}

#[test]
fn dangling_comma_waits_for_more() {
    let mut acc = JsonAccumulator::new(Options::default());
    assert_eq!(acc.push("{\"count\": 10, "), Progress::Incomplete);
    assert_eq!(
        acc.push("\"done\": true}"),
        Progress::Complete(json!({"count": 10, "done": true}))
    );
}

#[test]
fn buffer_is_the_concatenation() {
    let mut acc = JsonAccumulator::new(Options::default());
    let _ = acc.push("{\"a\":");
    let _ = acc.push(" 1}");
    assert_eq!(acc.buffer(), "{\"a\": 1}");
}

#[test]
fn incomplete_is_not_sticky() {
    // the accumulator stays ready for more fragments after reporting
    // Incomplete any number of times
    let mut acc = JsonAccumulator::new(Options::default());
    for chunk in ["{\"items\"", ": [1", ", 2", ", 3"] {
        assert_eq!(acc.push(chunk), Progress::Incomplete);
    }
    assert_eq!(acc.push("]}"), Progress::Complete(json!({"items": [1, 2, 3]})));
}

#[test]
fn whitespace_only_buffer_is_incomplete() {
    let mut acc = JsonAccumulator::new(Options::default());
    assert_eq!(acc.push("  \n"), Progress::Incomplete);
}

#[test]
fn log_collected_only_when_enabled() {
    let opts = Options {
        logging: true,
        ..Default::default()
    };
    let mut acc = JsonAccumulator::new(opts);
    assert_eq!(acc.push("{\"a\": "), Progress::Incomplete);
    let log = acc.take_log();
    assert!(!log.is_empty());
    assert!(log.iter().any(|e| e.attempt == 0));
    // drained
    assert!(acc.take_log().is_empty());

    let mut quiet = JsonAccumulator::new(Options::default());
    assert_eq!(quiet.push("{\"a\": "), Progress::Incomplete);
    assert!(quiet.take_log().is_empty());
}

#[test]
fn progress_accessors() {
    let complete: Progress = Progress::Complete(json!(1));
    assert!(!complete.is_incomplete());
    assert_eq!(complete.complete(), Some(json!(1)));
    let pending: Progress = Progress::Incomplete;
    assert!(pending.is_incomplete());
    assert_eq!(pending.complete(), None);
}
