use slha_core::errors::{ErrorInfo, SlhaError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("block", "HMIX")
        .with_context("index", 2)
}

#[test]
fn convert_error_surface() {
    let err = SlhaError::Convert(sample_info("missing-tan-beta", "HMIX(2) is required"));
    assert_eq!(err.info().code, "missing-tan-beta");
    assert_eq!(err.info().context.get("block").map(String::as_str), Some("HMIX"));
}

#[test]
fn parse_error_display_lists_context_and_hint() {
    let err = SlhaError::Parse(
        ErrorInfo::new("bad-value", "value is not a number")
            .with_context("line", 12)
            .with_hint("use a decimal literal"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("parse error: value is not a number (code: bad-value)"));
    assert!(rendered.contains("line=12"));
    assert!(rendered.ends_with("hint: use a decimal literal"));
}

#[test]
fn errors_round_trip_json() {
    let err = SlhaError::Model(sample_info("missing-parameter", "no value for MT"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Model\""));
    let decoded: SlhaError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
