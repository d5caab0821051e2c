//! Purpose: Stable JSON schema for demo runs and the tag listing.
//! Exports: `DemoReport`, `demo_report_json`, `generations_json`, `now_rfc3339`.
//! Role: Shared contract helper for the CLI's JSON output.
//! Invariants: Schema is additive-only once published; keys are never renamed.
use crate::error::{Error, ErrorKind, Result};
use crate::generation::{ContractGroup, Tag};
use serde_json::{Map, Value, json};

/// Results of one pass over every public entry point.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DemoReport {
    pub time: String,
    pub init_tag: Tag,
    pub init: String,
    pub foo: String,
    pub bar_tag: Tag,
    pub bar: i32,
    pub use_some_class: String,
    pub internal_value: i32,
}

pub fn demo_report_json(report: &DemoReport) -> Value {
    json!({
        "time": report.time,
        "init": { "tag": report.init_tag.to_string(), "text": report.init },
        "foo": report.foo,
        "bar": { "tag": report.bar_tag.to_string(), "value": report.bar },
        "use_some_class": report.use_some_class,
        "internal_value": report.internal_value,
        "generations": generations_json(),
    })
}

/// `{ "public": { "current": "v_1", "tags": [...] }, "inline": ... }`
pub fn generations_json() -> Value {
    let mut groups = Map::new();
    for group in ContractGroup::ALL {
        let tags: Vec<Value> = group.tags().map(|tag| json!(tag.to_string())).collect();
        groups.insert(
            group.as_str().to_string(),
            json!({
                "current": Tag::current(group).to_string(),
                "tags": tags,
            }),
        );
    }
    Value::Object(groups)
}

pub fn now_rfc3339() -> Result<String> {
    use time::format_description::well_known::Rfc3339;
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("timestamp format failed")
                .with_source(err)
        })
}
