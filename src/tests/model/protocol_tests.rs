use super::*;

use serde_json::json;

#[test]
fn listing_wait_is_pending() {
    let poll = ListingPoll::from_wire(json!({ "status": "wait" })).unwrap();
    assert_eq!(poll, ListingPoll::Pending);
}

#[test]
fn listing_overflow_switches_mode() {
    let poll = ListingPoll::from_wire(json!({ "status": "overflow" })).unwrap();
    assert_eq!(poll, ListingPoll::Overflow);
}

#[test]
fn listing_ready_with_status_word() {
    let poll =
        ListingPoll::from_wire(json!({ "status": "ok", "filenames": ["a.iso", "b.iso"] })).unwrap();
    assert_eq!(
        poll,
        ListingPoll::Ready(vec!["a.iso".to_string(), "b.iso".to_string()])
    );
}

#[test]
fn listing_ready_without_status_word() {
    // The firmware's ready reply is just the filename array.
    let poll = ListingPoll::from_wire(json!({ "filenames": ["a.iso"] })).unwrap();
    assert_eq!(poll, ListingPoll::Ready(vec!["a.iso".to_string()]));
}

#[test]
fn listing_unexpected_status_is_protocol_error() {
    let err = ListingPoll::from_wire(json!({ "status": "bogus" })).unwrap_err();
    assert!(matches!(err, ProtocolError::UnexpectedStatus(word) if word == "bogus"));
}

#[test]
fn listing_ok_without_filenames_is_protocol_error() {
    let err = ListingPoll::from_wire(json!({ "status": "ok" })).unwrap_err();
    assert!(matches!(err, ProtocolError::MissingField { .. }));
}

#[test]
fn image_wait_is_pending() {
    let poll = ImagePoll::from_wire(json!({ "status": "wait" })).unwrap();
    assert_eq!(poll, ImagePoll::Pending);
}

#[test]
fn image_done_completes() {
    let poll = ImagePoll::from_wire(json!({ "status": "done" })).unwrap();
    assert_eq!(poll, ImagePoll::Complete);
}

#[test]
fn image_record_is_item() {
    let poll = ImagePoll::from_wire(json!({ "filename": "x.iso", "size": 1024 })).unwrap();
    assert_eq!(poll, ImagePoll::Item("x.iso".to_string()));
}

#[test]
fn image_record_with_foreign_status_still_carries_filename() {
    let poll = ImagePoll::from_wire(json!({ "status": "cached", "filename": "x.iso" })).unwrap();
    assert_eq!(poll, ImagePoll::Item("x.iso".to_string()));
}

#[test]
fn image_reply_without_filename_is_protocol_error() {
    let err = ImagePoll::from_wire(json!({ "size": 1024 })).unwrap_err();
    assert!(matches!(err, ProtocolError::MissingField { .. }));

    let err = ImagePoll::from_wire(json!({ "status": "bogus" })).unwrap_err();
    assert!(matches!(err, ProtocolError::UnexpectedStatus(word) if word == "bogus"));
}

#[test]
fn action_ok_and_failure_words() {
    assert!(ActionReply::from_wire(json!({ "status": "ok" }))
        .unwrap()
        .is_ok());
    let reply = ActionReply::from_wire(json!({ "status": "busy" })).unwrap();
    assert_eq!(reply, ActionReply::Failed("busy".to_string()));
}

#[test]
fn action_without_status_is_protocol_error() {
    let err = ActionReply::from_wire(json!({})).unwrap_err();
    assert!(matches!(err, ProtocolError::MissingField { .. }));
}
