//! Lightweight client for the Minecraft Server List Ping protocol
//!
//! Connects to a server, sends the Handshake and Status Request packets and
//! reads back the framed Status Response, returning the embedded JSON status
//! string. The wire layer (VarInt codec, length-prefixed framing over a
//! stream that may arrive in arbitrary fragments) lives in [`varint`] and
//! [`status`]; [`MCConn`] wraps any `Read + Write` stream.
//!
//! ```no_run
//! use rust_mc_ping::MCConnTcp;
//!
//! fn main() -> Result<(), rust_mc_ping::ProtocolError> {
//!     let mut conn = MCConnTcp::connect("mc.hypixel.net:25565")?;
//!     let status = conn.status(765, "mc.hypixel.net", 25565)?;
//!     println!("{status}");
//!     Ok(())
//! }
//! ```

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use thiserror::Error;
use tracing::trace;

pub mod data;
pub mod packet;
pub mod status;
pub mod varint;


pub use data::{DataReader, DataWriter};
pub use packet::Packet;

use varint::{write_varint, MAX_VARINT_SIZE};

/// Errors of the ping exchange. All of them are terminal for the whole
/// exchange; there is no retry or resend path.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("could not resolve server address")]
    AddressParseError,
    #[error("failed to connect to server: {0}")]
    StreamConnectError(std::io::Error),
    #[error("failed to read from stream: {0}")]
    ReadError(std::io::Error),
    #[error("failed to write to stream: {0}")]
    WriteError(std::io::Error),
    #[error("connection closed by server")]
    ConnectionClosedError,
    #[error("malformed varint: continuation past 5 bytes")]
    VarIntError,
    #[error("invalid packet length: {0}")]
    PacketLengthError(i32),
    #[error("unexpected packet id: 0x{0:02x}")]
    PacketIdError(u8),
    #[error("packet data ran out")]
    DataRanOutError,
    #[error("invalid string length: {0}")]
    StringLengthError(i32),
    #[error("string is not valid utf-8")]
    StringParseError,
}

/// Connection to a Minecraft server over any `Read + Write` stream
pub struct MCConn<T> {
    stream: T,
}

/// TCP connection to a Minecraft server
pub type MCConnTcp = MCConn<TcpStream>;

impl MCConnTcp {
    /// Resolve `addr` and connect to the first resolved address
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<MCConnTcp, ProtocolError> {
        let addr = match addr.to_socket_addrs() {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => addr,
                None => return Err(ProtocolError::AddressParseError),
            },
            Err(_) => return Err(ProtocolError::AddressParseError),
        };

        let stream = TcpStream::connect(addr).map_err(ProtocolError::StreamConnectError)?;

        Ok(MCConn::new(stream))
    }

    /// Shut down both directions of the socket, ignoring errors
    pub fn close(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

impl<T: Read + Write> MCConn<T> {
    /// Wrap an already-connected stream
    pub fn new(stream: T) -> MCConn<T> {
        MCConn { stream }
    }

    /// Get the underlying stream back
    pub fn into_inner(self) -> T {
        self.stream
    }

    /// Frame and send a packet: `VarInt(len) | id | body`, transmitted as a
    /// single write. A short write is a hard failure, the protocol has no
    /// way to resume a partially sent packet.
    pub fn write_packet(&mut self, packet: &Packet) -> Result<(), ProtocolError> {
        let mut buf: Vec<u8> = Vec::with_capacity(MAX_VARINT_SIZE + 1 + packet.len());

        write_varint(packet.len() as i32 + 1, &mut buf)?;
        buf.write_byte(packet.id())?;
        buf.write_bytes(packet.get_bytes())?;

        trace!(id = packet.id(), length = packet.len() + 1, "sending packet");

        self.stream
            .write_all(&buf)
            .map_err(ProtocolError::WriteError)
    }

    pub(crate) fn stream_mut(&mut self) -> &mut T {
        &mut self.stream
    }
}
