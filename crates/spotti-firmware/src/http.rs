//! Minimal HTTP GET over an embassy-net TCP socket.
//!
//! Just enough protocol for one small JSON document: the request is sent as
//! HTTP/1.0 so the body arrives close-delimited (no chunked encoding), the
//! status line is checked, headers are skipped, and the body is returned.
//! Keep-alive and TLS are not implemented; the feed is a single plain-HTTP
//! resource.

use core::fmt::Write as _;

use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpEndpoint, Stack};
use embassy_time::Duration;
use embedded_io_async::Write as _;
use heapless::String;
use thiserror_no_std::Error;

const SOCKET_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("DNS lookup failed")]
    Dns,
    #[error("TCP connect failed")]
    Connect,
    #[error("socket I/O failed")]
    Io,
    #[error("response is not valid HTTP")]
    Malformed,
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("response larger than the receive buffer")]
    Overflow,
}

/// GET `http://host:port/path` and return the response body.
///
/// The whole response is read into `buf` until the server closes the
/// connection; the returned body slice borrows from it.
pub async fn get<'b>(
    stack: Stack<'_>,
    host: &str,
    port: u16,
    path: &str,
    buf: &'b mut [u8],
) -> Result<&'b [u8], HttpError> {
    let address = stack
        .dns_query(host, DnsQueryType::A)
        .await
        .map_err(|_| HttpError::Dns)?
        .first()
        .copied()
        .ok_or(HttpError::Dns)?;

    let mut rx_buffer = [0u8; 4096];
    let mut tx_buffer = [0u8; 512];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(SOCKET_TIMEOUT));

    socket
        .connect(IpEndpoint::new(address, port))
        .await
        .map_err(|_| HttpError::Connect)?;

    let mut request: String<256> = String::new();
    let _ = write!(
        request,
        "GET {path} HTTP/1.0\r\nHost: {host}\r\nConnection: close\r\n\r\n"
    );
    socket
        .write_all(request.as_bytes())
        .await
        .map_err(|_| HttpError::Io)?;

    let mut total = 0usize;
    loop {
        if total == buf.len() {
            return Err(HttpError::Overflow);
        }
        match socket.read(&mut buf[total..]).await {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(_) => return Err(HttpError::Io),
        }
    }

    let response = &buf[..total];
    let status = parse_status(response)?;
    if status != 200 {
        return Err(HttpError::Status(status));
    }

    let body_start = find_body(response).ok_or(HttpError::Malformed)?;
    Ok(&response[body_start..])
}

/// Status code from a `HTTP/1.x NNN ...` status line.
fn parse_status(response: &[u8]) -> Result<u16, HttpError> {
    let line_end = response
        .iter()
        .position(|&b| b == b'\r')
        .ok_or(HttpError::Malformed)?;
    let line = &response[..line_end];

    if !line.starts_with(b"HTTP/1.") {
        return Err(HttpError::Malformed);
    }

    let code = line
        .split(|&b| b == b' ')
        .nth(1)
        .ok_or(HttpError::Malformed)?;
    if code.len() != 3 || !code.iter().all(|b| b.is_ascii_digit()) {
        return Err(HttpError::Malformed);
    }

    Ok(code.iter().fold(0u16, |acc, &b| acc * 10 + u16::from(b - b'0')))
}

/// Offset of the first body byte, past the blank line ending the headers.
fn find_body(response: &[u8]) -> Option<usize> {
    response
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|index| index + 4)
}
