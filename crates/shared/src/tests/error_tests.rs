use super::{ApiError, ErrorCode};

#[test]
fn prefers_json_error_field_over_raw_body() {
    let err = ApiError::from_response(400, r#"{"error":"Collection name is required"}"#);
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, "Collection name is required");
}

#[test]
fn falls_back_to_message_field() {
    let err = ApiError::from_response(500, r#"{"message":"Fehler beim Löschen"}"#);
    assert_eq!(err.code, ErrorCode::Internal);
    assert_eq!(err.message, "Fehler beim Löschen");
}

#[test]
fn empty_body_reports_status() {
    let err = ApiError::from_response(404, "   ");
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "HTTP error! status: 404");
}

#[test]
fn plain_text_body_is_kept_verbatim() {
    let err = ApiError::from_response(502, "bad gateway\n");
    assert_eq!(err.code, ErrorCode::Unavailable);
    assert_eq!(err.message, "bad gateway");
}
