use minihttp::http::response::{Response, ResponseBuilder, StatusCode};
use minihttp::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::NoContent.as_u16(), 204);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_from_u16() {
    for status in [
        StatusCode::Ok,
        StatusCode::Created,
        StatusCode::NoContent,
        StatusCode::BadRequest,
        StatusCode::NotFound,
        StatusCode::MethodNotAllowed,
        StatusCode::InternalServerError,
    ] {
        assert_eq!(StatusCode::from_u16(status.as_u16()), Some(status));
    }
    assert_eq!(StatusCode::from_u16(418), None);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
    assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");
    assert_eq!(response.headers.get("X-Custom").unwrap(), "value");
    assert_eq!(response.version, "HTTP/1.1");
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok).body(body.clone()).build();

    assert_eq!(response.header("Content-Length"), Some("16"));
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Length").unwrap(), "999");
}

#[test]
fn test_response_new_is_status_only() {
    let response = Response::new(StatusCode::BadRequest);

    assert!(response.headers.is_empty());
    assert!(response.body.is_empty());
}

#[test]
fn test_response_helpers() {
    assert_eq!(Response::not_found().status, StatusCode::NotFound);
    assert_eq!(Response::bad_request().status, StatusCode::BadRequest);
    assert_eq!(Response::created().status, StatusCode::Created);
    assert_eq!(Response::internal_error().status, StatusCode::InternalServerError);

    let text = Response::text("hi");
    assert_eq!(text.header("Content-Type"), Some("text/plain"));
    assert_eq!(text.header("Content-Length"), Some("2"));
    assert_eq!(text.body, b"hi");
}

#[test]
fn test_encode_status_only() {
    let bytes = serialize_response(&Response::new(StatusCode::Created));
    assert_eq!(bytes, b"HTTP/1.1 201 Created\r\n\r\n");
}

#[test]
fn test_encode_single_header_and_body() {
    let response = ResponseBuilder::new(StatusCode::Ok).body("abc").build();
    let bytes = serialize_response(&response);

    assert_eq!(bytes, b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nabc\r\n");
}

#[test]
fn test_encode_body_without_headers() {
    let mut response = Response::new(StatusCode::Ok);
    response.body = b"raw".to_vec();

    assert_eq!(serialize_response(&response), b"HTTP/1.1 200 OK\r\nraw\r\n");
}

#[test]
fn test_encode_respects_version() {
    let mut response = Response::new(StatusCode::NotFound);
    response.version = "HTTP/1.0".to_string();

    assert!(serialize_response(&response).starts_with(b"HTTP/1.0 404 Not Found\r\n"));
}

#[test]
fn test_encode_is_pure() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("A", "1")
        .header("B", "2")
        .body("x")
        .build();

    assert_eq!(serialize_response(&response), serialize_response(&response));
}

#[test]
fn test_encode_parses_with_reference_parser() {
    let response = ResponseBuilder::new(StatusCode::Created)
        .header("Content-Type", "text/plain")
        .header("X-Trace", "abc-123")
        .body("hello world")
        .build();
    let bytes = serialize_response(&response);

    let mut headers = [httparse::EMPTY_HEADER; 16];
    let mut parsed = httparse::Response::new(&mut headers);
    let status = parsed.parse(&bytes).unwrap();

    let httparse::Status::Complete(header_len) = status else {
        panic!("incomplete response");
    };

    assert_eq!(parsed.code, Some(201));
    assert_eq!(parsed.reason, Some("Created"));
    assert_eq!(parsed.headers.len(), response.headers.len());
    for header in parsed.headers.iter() {
        let expected = response.headers.get(header.name).unwrap();
        assert_eq!(header.value, expected.as_bytes());
    }

    let content_length: usize = response.header("Content-Length").unwrap().parse().unwrap();
    assert_eq!(&bytes[header_len..header_len + content_length], b"hello world");
}
