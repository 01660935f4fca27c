use rulesub::{Mode, Options};

#[test]
fn json_options_parse() {
    let options = serde_json::from_str::<Options>(r#"{"delimiter": "~", "mode": "Regex"}"#)
        .expect("parsing options");

    assert_eq!(options.delimiter, '~');
    assert_eq!(options.mode, Mode::Regex);
    assert!(!options.ignore_case);
}

#[test]
fn json_options_reject_long_delimiter() {
    assert!(serde_json::from_str::<Options>(r#"{"delimiter": "||"}"#).is_err());
}
