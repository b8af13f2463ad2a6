//! One-shot SNTP client.
//!
//! Sends a single mode-3 request and reads the server transmit timestamp.
//! That is all the accuracy the display needs; see
//! [`WallClock`](crate::wall_clock::WallClock).

use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{IpEndpoint, Stack};
use embassy_time::{with_timeout, Duration};
use thiserror_no_std::Error;

const NTP_SERVER: &str = "pool.ntp.org";
const NTP_PORT: u16 = 123;

/// Seconds between the NTP era (1900) and the Unix epoch (1970).
const NTP_UNIX_OFFSET_SECS: i64 = 2_208_988_800;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SntpError {
    #[error("DNS lookup failed")]
    Dns,
    #[error("request timed out")]
    Timeout,
    #[error("short or invalid response")]
    InvalidResponse,
    #[error("socket error")]
    Socket,
}

/// Query the pool once and return Unix seconds.
pub async fn query_unix_time(stack: Stack<'_>) -> Result<i64, SntpError> {
    let server = stack
        .dns_query(NTP_SERVER, DnsQueryType::A)
        .await
        .map_err(|_| SntpError::Dns)?
        .first()
        .copied()
        .ok_or(SntpError::Dns)?;

    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; 128];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_buffer = [0u8; 128];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    socket.bind(NTP_PORT).map_err(|_| SntpError::Socket)?;

    // Mode 3 (client), version 4, everything else zero.
    let mut request = [0u8; 48];
    request[0] = 0b00_100_011;

    socket
        .send_to(&request, IpEndpoint::new(server, NTP_PORT))
        .await
        .map_err(|_| SntpError::Socket)?;

    let mut response = [0u8; 48];
    let (len, _meta) = with_timeout(REQUEST_TIMEOUT, socket.recv_from(&mut response))
        .await
        .map_err(|_| SntpError::Timeout)?
        .map_err(|_| SntpError::Socket)?;
    if len < 48 {
        return Err(SntpError::InvalidResponse);
    }

    // Transmit timestamp seconds, bytes 40..44, NTP era 0.
    let secs = u32::from_be_bytes([response[40], response[41], response[42], response[43]]);
    if secs == 0 {
        return Err(SntpError::InvalidResponse);
    }

    Ok(i64::from(secs) - NTP_UNIX_OFFSET_SECS)
}
