//! End-to-end runs of the decode → map → filter → render pipeline over
//! in-memory streams, checking the rendered bytes and exit conditions.

use json_log_term::decode::DecodeError;
use json_log_term::filter::SeverityFilter;
use json_log_term::format::LogfmtFormat;
use json_log_term::mapping::{FieldMapping, RecordMapper, TimeLayout};
use json_log_term::pipeline::{self, PipelineError, RunStats};
use json_log_term::record::Severity;
use json_log_term::sink::LineSink;

fn run_logfmt(input: &str, threshold: Severity) -> (Result<RunStats, PipelineError>, String) {
    let mapper = RecordMapper::new(FieldMapping::default(), TimeLayout::default());
    let filter = SeverityFilter::new(threshold);
    let mut out = Vec::new();

    let result = pipeline::run(
        input.as_bytes(),
        &mapper,
        &filter,
        &mut LineSink::new(&mut out, LogfmtFormat::new(FieldMapping::default())),
    );
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn two_events_render_two_lines_in_arrival_order() {
    let input = concat!(
        r#"{"t":"2024-01-01T00:00:00Z","lvl":3,"msg":"a"}"#,
        r#"{"t":"2024-01-01T00:00:01Z","lvl":1,"msg":"b"}"#,
    );
    let (result, output) = run_logfmt(input, Severity::Info);

    let stats = result.unwrap();
    assert_eq!(stats.decoded, 2);
    assert_eq!(stats.admitted, 2);
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        [
            "t=2024-01-01T00:00:00+0000 lvl=info msg=a",
            "t=2024-01-01T00:00:01+0000 lvl=eror msg=b",
        ],
    );
}

#[test]
fn malformed_json_stops_the_stream_after_flushing_prior_output() {
    let (result, output) = run_logfmt(r#"{"lvl":1}{bad json"#, Severity::Info);

    // The first event made it out before the fatal decode error.
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        ["t=1970-01-01T00:00:00+0000 lvl=eror msg="],
    );
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Decode(DecodeError::Malformed(_))
    ));
}

#[test]
fn filter_boundary_is_inclusive_end_to_end() {
    let input = r#"{"lvl":1,"msg":"error"}{"lvl":2,"msg":"warning"}{"lvl":3,"msg":"info"}"#;
    let (result, output) = run_logfmt(input, Severity::Warning);

    let stats = result.unwrap();
    assert_eq!(stats.admitted, 2);
    assert_eq!(stats.suppressed, 1);
    assert!(output.contains("msg=error"));
    assert!(output.contains("msg=warning"));
    assert!(!output.contains("msg=info"));
}

#[test]
fn attributes_never_leak_between_records() {
    let (result, output) = run_logfmt(r#"{"a":1}{"b":2}"#, Severity::Info);
    result.unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" a=1"), "{:?}", lines[0]);
    assert!(!lines[0].contains("b="));
    assert!(lines[1].ends_with(" b=2"), "{:?}", lines[1]);
    assert!(!lines[1].contains("a="));
}

#[test]
fn attribute_numbers_keep_every_digit_end_to_end() {
    // Beyond 2^53: a float round-trip would mangle it.
    let (result, output) = run_logfmt(r#"{"n":9007199254740993,"msg":"big"}"#, Severity::Info);
    result.unwrap();
    assert!(output.contains("n=9007199254740993"), "{output:?}");
}

#[test]
fn malformed_reserved_fields_fall_back_and_still_render() {
    let input = r#"{"lvl":"high","msg":42,"t":false,"k":"v"}"#;
    let (result, output) = run_logfmt(input, Severity::Info);

    let stats = result.unwrap();
    assert_eq!(stats.warnings, 3);
    assert_eq!(
        output.trim_end(),
        "t=1970-01-01T00:00:00+0000 lvl=info msg= k=v",
    );
}

#[test]
fn out_of_range_level_defaults_to_info_and_renders() {
    let (result, output) = run_logfmt(r#"{"lvl":5,"msg":"odd"}"#, Severity::Info);

    let stats = result.unwrap();
    assert_eq!(stats.warnings, 1);
    assert!(output.contains("lvl=info msg=odd"), "{output:?}");
}

#[test]
fn renamed_reserved_keys_apply_to_both_mapping_and_rendering() {
    let keys = FieldMapping {
        time: "ts".to_string(),
        level: "severity".to_string(),
        message: "text".to_string(),
    };
    let mapper = RecordMapper::new(keys.clone(), TimeLayout::default());
    let filter = SeverityFilter::new(Severity::Info);
    let mut out = Vec::new();

    let input = r#"{"ts":"2024-06-01T12:00:00Z","severity":2,"text":"renamed","msg":"plain"}"#;
    pipeline::run(
        input.as_bytes(),
        &mapper,
        &filter,
        &mut LineSink::new(&mut out, LogfmtFormat::new(keys)),
    )
    .unwrap();

    let output = String::from_utf8(out).unwrap();
    // The default "msg" key is now an ordinary attribute.
    assert_eq!(
        output.trim_end(),
        "ts=2024-06-01T12:00:00+0000 severity=warn text=renamed msg=plain",
    );
}

#[test]
fn blank_input_exits_cleanly_with_no_output() {
    let (result, output) = run_logfmt(" \n ", Severity::Info);
    assert_eq!(result.unwrap(), RunStats::default());
    assert!(output.is_empty());
}
