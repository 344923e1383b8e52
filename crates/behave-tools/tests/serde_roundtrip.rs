#![cfg(feature = "serde")]

use behave_tools::{TraceEvent, TraceLog};

#[test]
fn trace_log_json_roundtrip() {
    let log = TraceLog {
        events: vec![
            TraceEvent::new(1, "behave.log").with_message("spawned"),
            TraceEvent::new(2, "behave.log").with_message("chasing"),
            TraceEvent::new(3, "behave.completed").with_message("Success"),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}
