use super::*;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

fn reply_schema() -> Schema {
    Schema::object([
        ("message", Schema::String),
        ("count", Schema::Number),
        ("isActive", Schema::Boolean.optional()),
    ])
}

#[test]
fn three_chunk_stream_completes_on_the_last_fragment() {
    let mut acc = StructuredAccumulator::new(reply_schema(), Options::default());
    assert_eq!(
        acc.push("{\"message\": \"This is a test\", \"count\": 10, ").unwrap(),
        Progress::Incomplete
    );
    assert_eq!(acc.push("\"isActive\": tru").unwrap(), Progress::Incomplete);
    assert_eq!(
        acc.push("e}").unwrap(),
        Progress::Complete(json!({
            "message": "This is a test",
            "count": 10,
            "isActive": true
        }))
    );
}

#[test]
fn complete_candidate_gets_defaults_for_missing_fields() {
    let mut acc = StructuredAccumulator::new(reply_schema(), Options::default());
    assert_eq!(
        acc.push("{\"message\": \"hi\"}").unwrap(),
        Progress::Complete(json!({"message": "hi", "count": 0}))
    );
}

#[test]
fn mismatch_is_surfaced_not_swallowed() {
    let mut acc = StructuredAccumulator::new(reply_schema(), Options::default());
    let err = acc.push("{\"message\": \"hi\", \"count\": \"ten\"}").unwrap_err();
    assert_eq!(err.path, "$[count]");
    assert_eq!(err.expected, "number");
}

#[test]
fn snapshots_supersede_each_other() {
    let schema = Schema::object([("items", Schema::array(Schema::Number))]);
    let mut acc = StructuredAccumulator::new(schema, Options::default());
    assert_eq!(acc.push("{\"items\": [1").unwrap(), Progress::Incomplete);
    assert_eq!(
        acc.push(", 2]}").unwrap(),
        Progress::Complete(json!({"items": [1, 2]}))
    );
}

#[test]
fn typed_snapshots_deserialize() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        message: String,
        count: i64,
    }

    let schema = Schema::object([
        ("message", Schema::String),
        ("count", Schema::Number),
    ]);
    let mut acc = StructuredAccumulator::new(schema, Options::default());
    assert_eq!(
        acc.push_as::<Reply>("{\"message\": \"hi\"}").unwrap(),
        Progress::Complete(Reply {
            message: "hi".into(),
            count: 0
        })
    );
}

#[test]
fn relaxed_schema_is_shareable_across_documents() {
    let schema = Arc::new(reply_schema());
    let relaxed = Arc::new(schema.relax());

    let mut first =
        StructuredAccumulator::with_shared(schema.clone(), relaxed.clone(), Options::default());
    let mut second =
        StructuredAccumulator::with_shared(schema.clone(), relaxed.clone(), Options::default());

    assert_eq!(
        first.push("{\"message\": \"one\", \"count\": 1}").unwrap(),
        Progress::Complete(json!({"message": "one", "count": 1}))
    );
    assert_eq!(
        second.push("{\"message\": \"two\", \"count\": 2}").unwrap(),
        Progress::Complete(json!({"message": "two", "count": 2}))
    );
    assert_eq!(first.schema().kind(), SchemaKind::Object);
    assert_eq!(first.relaxed_schema().kind(), SchemaKind::Lenient);
}

#[test]
fn incomplete_skips_validation_entirely() {
    // a buffer that would mismatch once complete still reports Incomplete
    // while it is structurally open
    let mut acc = StructuredAccumulator::new(reply_schema(), Options::default());
    assert_eq!(acc.push("{\"count\": \"te").unwrap(), Progress::Incomplete);
}

#[test]
fn log_available_through_the_structured_layer() {
    let opts = Options {
        logging: true,
        ..Default::default()
    };
    let mut acc = StructuredAccumulator::new(reply_schema(), opts);
    let _ = acc.push("{\"message\": ").unwrap();
    assert!(!acc.take_log().is_empty());
    assert_eq!(acc.buffer(), "{\"message\": ");
}
