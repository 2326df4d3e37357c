use std::fs;

use hessian_pack::cli::{pack, parse_args, run, to_hex, CliError, PackArgs};
use hessian_pack::EncodeError;

fn args(list: &[&str]) -> Result<PackArgs, CliError> {
    parse_args(list.iter().map(|s| s.to_string()))
}

#[test]
fn parse_args_matrix() {
    assert_eq!(args(&[]).unwrap(), PackArgs::default());
    let parsed = args(&["--hex", "--exact-lists", "--options", "opts.json"]).unwrap();
    assert!(parsed.hex);
    assert!(parsed.exact_lists);
    assert_eq!(parsed.options.as_deref(), Some(std::path::Path::new("opts.json")));

    assert!(matches!(args(&["--options"]), Err(CliError::Usage(_))));
    assert!(matches!(args(&["--verbose"]), Err(CliError::Usage(_))));
}

#[test]
fn pack_json_values() {
    assert_eq!(pack("null").unwrap(), [b'N']);
    assert_eq!(pack("[1, true, \"a\"]").unwrap(), [0x7b, 0x91, b'T', 0x01, b'a']);
    assert_eq!(pack("1.5").unwrap(), [0x5f, 0x00, 0x00, 0x05, 0xdc]);
    assert_eq!(pack(r#"{"a": 1}"#).unwrap(), [b'H', 0x01, b'a', 0x91, b'Z']);
    assert_eq!(
        pack(r#"{"$date": 60000}"#).unwrap(),
        [0x4b, 0x00, 0x00, 0x00, 0x01]
    );
    assert_eq!(
        pack(r#"{"$type": "P", "x": 1}"#).unwrap(),
        [b'C', 0x01, b'P', 0x91, 0x01, b'x', 0x60, 0x91]
    );
}

#[test]
fn pack_rejects_bad_json() {
    assert!(matches!(pack("{"), Err(CliError::Json(_))));
}

#[test]
fn to_hex_is_lowercase() {
    assert_eq!(to_hex(&[0x00, 0xab, 0x5c]), "00ab5c");
    assert_eq!(to_hex(&[]), "");
}

#[test]
fn run_writes_raw_or_hex() {
    let mut raw = Vec::new();
    run(&PackArgs::default(), "[1]\n", &mut raw).unwrap();
    assert_eq!(raw, [0x79, 0x91]);

    let mut hex = Vec::new();
    let hex_args = PackArgs {
        hex: true,
        ..PackArgs::default()
    };
    run(&hex_args, "true", &mut hex).unwrap();
    assert_eq!(hex, b"54\n");
}

#[test]
fn run_with_options_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    fs::write(
        &path,
        r#"{"list-shape": "exact", "type-map": {"P": "com.example.P"}}"#,
    )
    .unwrap();
    let with_options = PackArgs {
        options: Some(path),
        hex: true,
        ..PackArgs::default()
    };

    let mut out = Vec::new();
    run(&with_options, r#"{"$type": "P", "x": 1}"#, &mut out).unwrap();
    let expected = format!("430d{}9101786091\n", to_hex(b"com.example.P"));
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn run_reports_invalid_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    fs::write(&path, r#"{"list-shape": "sorted"}"#).unwrap();
    let with_options = PackArgs {
        options: Some(path),
        ..PackArgs::default()
    };
    let err = run(&with_options, "1", &mut Vec::new()).unwrap_err();
    assert!(matches!(err, CliError::Options(_)), "{err}");

    let missing = PackArgs {
        options: Some(dir.path().join("nope.json")),
        ..PackArgs::default()
    };
    assert!(matches!(
        run(&missing, "1", &mut Vec::new()),
        Err(CliError::Io(_))
    ));
}

#[test]
fn encode_errors_surface_through_cli() {
    let err = pack("\"\\ud800\"");
    // serde_json rejects lone surrogates before encoding starts.
    assert!(matches!(err, Err(CliError::Json(_))));

    let err = CliError::from(EncodeError::InvalidEncoding);
    assert_eq!(
        err.to_string(),
        "input is not well-formed UTF-8 or contains codepoints outside the Unicode range"
    );
}
