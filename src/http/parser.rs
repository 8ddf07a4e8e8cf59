use std::collections::HashMap;

use bytes::Bytes;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::request::{Method, Request};

/// Longest accepted request or header line, CRLF included.
pub const MAX_LINE_LENGTH: usize = 8 * 1024;

/// Most header lines accepted in one request.
pub const MAX_HEADERS: usize = 100;

const CRLF: &[u8] = b"\r\n";

/// Ways a request can fail to decode. Every variant is a malformed request
/// and is answered with 400 by the connection driver.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid request line: {0:?}")]
    InvalidRequestLine(String),

    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    #[error("invalid header line: {0:?}")]
    InvalidHeader(String),

    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    #[error("line longer than {} bytes", MAX_LINE_LENGTH)]
    LineTooLong,

    #[error("more than {} header lines", MAX_HEADERS)]
    TooManyHeaders,

    #[error("body of {length} bytes exceeds the {limit} byte limit")]
    BodyTooLarge { length: usize, limit: usize },

    #[error("connection closed before {expected} body bytes were read")]
    IncompleteBody { expected: usize },

    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),
}

/// Decodes one request from `reader`.
///
/// Returns `Ok(None)` when the stream ends before a single byte is read.
/// The body is read only for methods that carry one, and only when
/// `Content-Length` is present and nonzero.
pub async fn decode<R>(reader: &mut R, max_body_bytes: usize) -> Result<Option<Request>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::with_capacity(256);

    // Request line
    if read_line(reader, &mut line).await? == 0 {
        return Ok(None);
    }

    let request_line = std::str::from_utf8(strip_crlf(&line))
        .map_err(|_| ParseError::InvalidRequestLine(String::from_utf8_lossy(&line).into_owned()))?;

    let parts: Vec<&str> = request_line.split(' ').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(ParseError::InvalidRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])
        .ok_or_else(|| ParseError::InvalidMethod(parts[0].to_string()))?;
    let path = parts[1].to_string();
    let version = parts[2].to_string();

    // Headers
    let mut headers = HashMap::new();
    let mut count = 0;

    loop {
        if read_line(reader, &mut line).await? == 0 || line == CRLF {
            break;
        }

        count += 1;
        if count > MAX_HEADERS {
            return Err(ParseError::TooManyHeaders);
        }

        let text = std::str::from_utf8(strip_crlf(&line))
            .map_err(|_| ParseError::InvalidHeader(String::from_utf8_lossy(&line).into_owned()))?;

        let (key, value) = text
            .split_once(": ")
            .ok_or_else(|| ParseError::InvalidHeader(text.to_string()))?;

        headers.insert(key.to_string(), value.to_string());
    }

    // Body
    let body = if method.carries_body() {
        read_body(reader, &headers, max_body_bytes).await?
    } else {
        None
    };

    Ok(Some(Request {
        method,
        path,
        version,
        headers,
        body,
    }))
}

async fn read_body<R>(
    reader: &mut R,
    headers: &HashMap<String, String>,
    max_body_bytes: usize,
) -> Result<Option<Bytes>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let Some(raw) = headers.get("Content-Length") else {
        return Ok(None);
    };

    let length = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidContentLength(raw.clone()))?;

    if length == 0 {
        return Ok(None);
    }

    if length > max_body_bytes {
        return Err(ParseError::BodyTooLarge {
            length,
            limit: max_body_bytes,
        });
    }

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ParseError::IncompleteBody { expected: length }
        } else {
            ParseError::Io(e)
        }
    })?;

    Ok(Some(Bytes::from(body)))
}

/// Reads up to and including the next `\n` into `buf`, bounded by `MAX_LINE_LENGTH`.
async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> Result<usize, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let n = (&mut *reader)
        .take(MAX_LINE_LENGTH as u64 + 1)
        .read_until(b'\n', buf)
        .await?;

    if n > MAX_LINE_LENGTH {
        return Err(ParseError::LineTooLong);
    }

    Ok(n)
}

fn strip_crlf(line: &[u8]) -> &[u8] {
    line.strip_suffix(CRLF).unwrap_or(line)
}
