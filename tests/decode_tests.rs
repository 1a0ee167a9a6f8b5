//! # Decode Integration Tests
//!
//! Secret manifests (YAML and JSON) → env lines, through the public API.

use secret_env_codec::{
    decode, decode_json, decode_with, decode_yaml, CodecError, Document, ErrorKind, Format,
    JsonCodec, YamlCodec,
};

const JSON_EMPTY: &str = r#"{
	"apiVersion": "v1",
	"data": {},
	"kind": "Secret",
	"metadata": {
		"name": "json-empty"
	},
	"type": "Opaque"
}"#;

const JSON_ONE: &str = r#"{"apiVersion":"v1","data":{"a":"Yg=="},"kind":"Secret","metadata":{"name":"json-one"},"type":"Opaque"}"#;

const YAML_EMPTY: &str = "apiVersion: v1
kind: Secret
metadata:
  name: yaml-empty
type: Opaque
data:
";

const YAML_EMPTY_MAPPING: &str = "apiVersion: v1
kind: Secret
metadata:
  name: yaml-empty2
type: Opaque
data: {}
";

const YAML_ONE: &str = "apiVersion: v1
kind: Secret
metadata:
  name: yaml-one
type: Opaque
data:
  a: Yg==
";

const YAML_NON_ASCII: &str = "apiVersion: v1
kind: Secret
metadata:
  name: error-test4
type: Opaque
data:
  a: 世界
";

fn decode_to_string(input: &str, format: Format) -> Result<String, CodecError> {
    decode(input.as_bytes(), format).map(|out| String::from_utf8(out).unwrap())
}

#[test]
fn test_decode_success_cases() {
    let cases = [
        ("json-empty", JSON_EMPTY, Format::Json, ""),
        ("yaml-empty", YAML_EMPTY, Format::Yaml, ""),
        ("yaml-empty2", YAML_EMPTY_MAPPING, Format::Yaml, ""),
        ("json-one", JSON_ONE, Format::Json, "a=b"),
        ("yaml-one", YAML_ONE, Format::Yaml, "a=b"),
    ];

    for (name, input, format, expected) in cases {
        let out = decode_to_string(input, format)
            .unwrap_or_else(|e| panic!("{name}: decode failed: {e}"));
        assert_eq!(out, expected, "{name}: unexpected output");
    }
}

#[test]
fn test_decode_json_document_with_yaml_parser() {
    // JSON is a subset of YAML, so the YAML codec accepts it as well
    assert_eq!(decode_to_string(JSON_ONE, Format::Yaml).unwrap(), "a=b");
}

#[test]
fn test_decode_top_level_not_a_mapping() {
    let cases = [
        ("-1", Format::Yaml),
        ("[1, 2]", Format::Yaml),
        ("\"str\"", Format::Json),
    ];
    for (input, format) in cases {
        let err = decode_to_string(input, format).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedType, "input {input:?}");
        assert!(err.to_string().starts_with("unexpected type: "));
    }
}

#[test]
fn test_decode_data_not_a_mapping() {
    let err = decode_to_string("data: -1", Format::Yaml).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedType { found: "number", .. }));

    let err = decode_to_string(r#"{"data": ["Yg=="]}"#, Format::Json).unwrap_err();
    assert!(matches!(err, CodecError::UnexpectedType { found: "sequence", .. }));
}

#[test]
fn test_decode_document_syntax_errors() {
    let err = decode_to_string("value: -", Format::Yaml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("block sequence entries are not allowed"));

    let err = decode_to_string("[asdf]", Format::Json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("expected value"));
}

#[test]
fn test_decode_invalid_base64_reports_offset() {
    let err = decode_to_string(YAML_NON_ASCII, Format::Yaml).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
    assert!(matches!(err, CodecError::InvalidBase64 { ref key, .. } if key == "a"));
    assert!(
        err.to_string().contains("offset 0"),
        "message should name the byte offset: {err}"
    );

    let err = decode_to_string(r#"{"data": {"a": "Yg=", "b": "Yg=="}}"#, Format::Json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
}

#[test]
fn test_decode_escapes_special_characters() {
    // "line1\nsay \"hi\"\\" base64-encoded
    let manifest = "data:\n  MSG: bGluZTEKc2F5ICJoaSJc\n";
    let out = decode_to_string(manifest, Format::Yaml).unwrap();
    assert_eq!(out, r#"MSG=line1\nsay \"hi\"\\"#);
}

#[test]
fn test_decode_escapes_shell_metacharacters() {
    // "$HOME `id` !x\r" base64-encoded
    let manifest = r#"{"data": {"CMD": "JEhPTUUgYGlkYCAheA0="}}"#;
    let out = decode_to_string(manifest, Format::Json).unwrap();
    assert_eq!(out, r"CMD=\$HOME \`id\` \!x\r");
}

#[test]
fn test_decode_sorts_lines() {
    let manifest = "data:\n  b: Mg==\n  B: Mw==\n  a: MQ==\n";
    assert_eq!(decode_to_string(manifest, Format::Yaml).unwrap(), "B=3\na=1\nb=2");
}

#[test]
fn test_decode_is_deterministic() {
    let manifest = "data:\n  z: MQ==\n  y: Mg==\n  x: Mw==\n";
    let first = decode(manifest.as_bytes(), Format::Yaml).unwrap();
    let second = decode(manifest.as_bytes(), Format::Yaml).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_decode_with_explicit_codec() {
    let out = decode_with(JSON_ONE.as_bytes(), &JsonCodec).unwrap();
    assert_eq!(out, b"a=b");

    let out = decode_with(YAML_ONE.as_bytes(), &YamlCodec).unwrap();
    assert_eq!(out, b"a=b");
}

#[test]
fn test_decode_json_and_yaml_documents() {
    let json = decode_json(r#"{"a":"b"}"#.as_bytes()).unwrap();
    let yaml = decode_yaml("a: b".as_bytes()).unwrap();
    let expected = Document::Mapping(vec![(
        Document::String("a".to_string()),
        Document::String("b".to_string()),
    )]);
    assert_eq!(json, expected);
    assert_eq!(yaml, expected);
}
