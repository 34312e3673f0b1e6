// CLI integration tests driving the built `cbor` binary.
use std::io::Write;
use std::process::{Command, Output, Stdio};

use anyhow::Result;
use ciborium::Value as CborValue;
use serde_json::{json, Value};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_cbor");
    Command::new(exe)
}

fn run_with_stdin(args: &[&str], input: &[u8]) -> Result<Output> {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input)?;
    Ok(child.wait_with_output()?)
}

fn to_cbor(value: &CborValue) -> Vec<u8> {
    let mut out = Vec::new();
    ciborium::into_writer(value, &mut out).expect("encode cbor");
    out
}

#[test]
fn json_stdin_becomes_cbor() -> Result<()> {
    let output = run_with_stdin(&[], br#"{"x": 1, "y": [1,2,3]}"#)?;
    assert!(output.status.success());

    let decoded: CborValue = ciborium::from_reader(output.stdout.as_slice())?;
    assert_eq!(
        decoded,
        CborValue::Map(vec![
            (CborValue::Text("x".into()), CborValue::Integer(1.into())),
            (
                CborValue::Text("y".into()),
                CborValue::Array(vec![
                    CborValue::Integer(1.into()),
                    CborValue::Integer(2.into()),
                    CborValue::Integer(3.into()),
                ])
            ),
        ])
    );
    Ok(())
}

#[test]
fn cbor_file_becomes_json() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("doc.cbor");
    let doc = CborValue::Map(vec![
        (CborValue::Integer(1.into()), CborValue::Text("one".into())),
        (CborValue::Text("a".into()), CborValue::Bytes(vec![1, 2, 3])),
    ]);
    std::fs::write(&path, to_cbor(&doc))?;

    let output = cmd().arg(&path).output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "{\"1\":\"one\",\"a\":\"AQID\"}\n"
    );
    Ok(())
}

#[test]
fn byte_strings_as_arrays() -> Result<()> {
    let input = to_cbor(&CborValue::Bytes(vec![0, 255]));
    let output = run_with_stdin(&["--bytes", "array"], &input)?;
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json, json!([0, 255]));
    Ok(())
}

#[test]
fn invalid_input_reports_usage() -> Result<()> {
    let output = run_with_stdin(&[], b"not: valid: anything")?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid CBOR or JSON value"));
    assert!(stderr.contains("Turns CBOR into JSON or JSON into CBOR."));
    Ok(())
}

#[test]
fn missing_file_exits_non_zero() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let output = cmd().arg(temp.path().join("absent.json")).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read file"));
    Ok(())
}

#[test]
fn unencodable_value_exits_non_zero() -> Result<()> {
    let input = to_cbor(&CborValue::Float(f64::INFINITY));
    let output = run_with_stdin(&[], &input)?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot encode JSON"));
    Ok(())
}

#[test]
fn json_round_trips_through_cbor() -> Result<()> {
    let original = json!({
        "id": 9_007_199_254_740_993_i64,
        "neg": -42,
        "flags": [true, false, null],
        "inner": {"name": "sensor", "list": []}
    });
    let encoded = run_with_stdin(&[], original.to_string().as_bytes())?;
    assert!(encoded.status.success());

    let back = run_with_stdin(&[], &encoded.stdout)?;
    assert!(back.status.success());
    let json: Value = serde_json::from_slice(&back.stdout)?;
    assert_eq!(json, original);
    Ok(())
}

#[test]
fn too_many_arguments_is_rejected() -> Result<()> {
    let output = cmd().args(["a.json", "b.json"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("b.json"));
    assert!(stderr.contains("Turns CBOR into JSON or JSON into CBOR."));
    Ok(())
}

#[test]
fn number_fallback_keeps_literal_text() -> Result<()> {
    let output = run_with_stdin(&[], b"[1e400]")?;
    assert!(output.status.success());
    let decoded: CborValue = ciborium::from_reader(output.stdout.as_slice())?;
    assert_eq!(decoded, CborValue::Array(vec![CborValue::Text("1e400".into())]));
    Ok(())
}

#[test]
fn wide_bignum_becomes_exact_json_number() -> Result<()> {
    let input = to_cbor(&CborValue::Tag(2, Box::new(CborValue::Bytes(vec![1; 9]))));
    let output = run_with_stdin(&[], &input)?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "18519084246547628289\n");
    Ok(())
}

#[test]
fn no_newline_flag() -> Result<()> {
    let input = to_cbor(&CborValue::Bool(true));
    let output = run_with_stdin(&["--no-newline"], &input)?;
    assert!(output.status.success());
    assert_eq!(output.stdout, b"true");
    Ok(())
}
