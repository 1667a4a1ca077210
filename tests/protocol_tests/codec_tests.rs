//! Codec Tests
//!
//! Tests for payload/id decoding and response status mapping.

use serde_json::json;
use snapkv::entry::{generate_id, Entry};
use snapkv::protocol::{decode_id, decode_payload, Command, CommandType, Response, Status};
use snapkv::{SnapError, Snapshot};

// =============================================================================
// Payload Decoding Tests
// =============================================================================

#[test]
fn test_decode_payload_accepts_any_json_value() {
    assert_eq!(decode_payload(br#""hi""#).unwrap(), json!("hi"));
    assert_eq!(decode_payload(b"42").unwrap(), json!(42));
    assert_eq!(decode_payload(b"true").unwrap(), json!(true));
    assert_eq!(decode_payload(b"[1, 2]").unwrap(), json!([1, 2]));
    assert_eq!(
        decode_payload(br#"{"a": {"b": null}}"#).unwrap(),
        json!({"a": {"b": null}})
    );
}

#[test]
fn test_decode_payload_allows_surrounding_whitespace() {
    assert_eq!(decode_payload(b"  \"hi\"\n").unwrap(), json!("hi"));
}

#[test]
fn test_decode_payload_rejects_invalid_json() {
    let bodies: [&[u8]; 5] = [b"{not json", b"hi", b"'single'", b"{\"a\":}", b"1 2"];
    for body in bodies {
        let err = decode_payload(body).unwrap_err();
        assert!(
            matches!(err, SnapError::InvalidPayload(_)),
            "expected InvalidPayload for {:?}",
            String::from_utf8_lossy(body)
        );
    }
}

#[test]
fn test_decode_payload_rejects_null() {
    assert!(matches!(
        decode_payload(b"null"),
        Err(SnapError::InvalidPayload(_))
    ));
}

#[test]
fn test_decode_payload_rejects_empty_body() {
    assert!(matches!(decode_payload(b""), Err(SnapError::InvalidPayload(_))));
    assert!(matches!(decode_payload(b"  \n"), Err(SnapError::InvalidPayload(_))));
}

// =============================================================================
// Id Decoding Tests
// =============================================================================

#[test]
fn test_decode_id() {
    let id = generate_id();

    assert_eq!(decode_id(&id.to_string()), Some(id));
    assert_eq!(decode_id(&id.to_string().to_uppercase()), Some(id));
    assert_eq!(decode_id("not-a-uuid"), None);
    assert_eq!(decode_id(""), None);
    assert_eq!(decode_id(&format!("{{{}}}", id)), None);
}

// =============================================================================
// Command/Response Tests
// =============================================================================

#[test]
fn test_command_types() {
    let id = generate_id();

    assert_eq!(Command::List.command_type(), CommandType::List);
    assert_eq!(Command::Get { id }.command_type(), CommandType::Get);
    assert_eq!(
        Command::Create { data: json!(1) }.command_type(),
        CommandType::Create
    );
    assert_eq!(
        Command::Update { id, data: json!(1) }.command_type(),
        CommandType::Update
    );
    assert_eq!(Command::Delete { id }.command_type(), CommandType::Delete);
    assert_eq!(CommandType::Delete.as_str(), "delete");
}

#[test]
fn test_response_status_codes() {
    let entry = Entry::new(generate_id(), json!("x"));

    assert_eq!(Response::Mapping(Snapshot::new()).status(), Status::Ok);
    assert_eq!(Response::Entry(entry).status(), Status::Ok);
    assert_eq!(Response::Deleted.status(), Status::NoContent);
    assert_eq!(Response::NotFound.status(), Status::NotFound);
    assert_eq!(Response::InvalidPayload.status(), Status::InvalidPayload);

    assert_eq!(Status::Ok.http_status().as_u16(), 200);
    assert_eq!(Status::NoContent.http_status().as_u16(), 204);
    assert_eq!(Status::NotFound.http_status().as_u16(), 404);
    assert_eq!(Status::InvalidPayload.http_status().as_u16(), 400);
}
