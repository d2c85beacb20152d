//! Server List Ping exchange
//!
//! Handshake and Status Request out, one framed Status Response back. The
//! response reader never assumes anything about TCP fragment boundaries: it
//! accumulates partial reads into one buffer and re-runs the VarInt decoder
//! until the length prefix terminates, then drains exactly the declared
//! number of payload bytes.

use std::io::{Read, Write};

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::packet::Packet;
use crate::varint::read_varint;
use crate::{DataWriter, MCConn, ProtocolError};

/// Packet ID shared by Handshake, Status Request and Status Response
const STATUS_PACKET_ID: u8 = 0x00;
/// Next-state field of the Handshake: 1 = status
const NEXT_STATE_STATUS: u8 = 0x01;
/// A status response is at least an ID byte and one string-length byte
const MIN_PACKET_LENGTH: i32 = 2;
/// Receive granularity of the response reader
const RECV_CHUNK_SIZE: usize = 4096;

impl<T: Read + Write> MCConn<T> {
    /// Send the Handshake packet: protocol version, server address, server
    /// port and the status next-state.
    pub fn send_handshake(
        &mut self,
        protocol_version: i32,
        server_address: &str,
        server_port: u16,
    ) -> Result<(), ProtocolError> {
        self.write_packet(&Packet::build(STATUS_PACKET_ID, |packet| {
            packet.write_i32_varint(protocol_version)?;
            packet.write_string(server_address)?;
            packet.write_unsigned_short(server_port)?;
            packet.write_byte(NEXT_STATE_STATUS)
        })?)
    }

    /// Send the Status Request packet (empty body, wire bytes `01 00`)
    pub fn send_status_request(&mut self) -> Result<(), ProtocolError> {
        self.write_packet(&Packet::empty(STATUS_PACKET_ID))
    }

    /// Read the Status Response packet and extract its JSON status string.
    ///
    /// Linear one-shot state machine: discover the declared packet length,
    /// accumulate exactly that many payload bytes, check the packet ID,
    /// decode the string length from bytes already received and bounds-check
    /// it against the declared packet before slicing out the string. Every
    /// failure is terminal; the only retry is "receive more bytes" while a
    /// prefix is still incomplete.
    pub fn read_status_response(&mut self) -> Result<String, ProtocolError> {
        let mut buf = BytesMut::with_capacity(RECV_CHUNK_SIZE);

        // packet length prefix, re-decoded from offset 0 as fragments arrive
        let (packet_length, prefix_size) = loop {
            if let Some(decoded) = read_varint(&buf)? {
                break decoded;
            }
            if self.fill(&mut buf)? == 0 {
                return Err(ProtocolError::ConnectionClosedError);
            }
        };

        if packet_length < MIN_PACKET_LENGTH {
            return Err(ProtocolError::PacketLengthError(packet_length));
        }
        let packet_length = packet_length as usize;

        debug!(packet_length, "reading status response");

        while buf.len() - prefix_size < packet_length {
            if self.fill(&mut buf)? == 0 {
                return Err(ProtocolError::ConnectionClosedError);
            }
        }

        let payload = &buf[prefix_size..prefix_size + packet_length];

        if payload[0] != STATUS_PACKET_ID {
            return Err(ProtocolError::PacketIdError(payload[0]));
        }
        let body = &payload[1..];

        // the string length must already sit inside the declared packet,
        // no further receives happen past this point
        let (string_length, length_size) = match read_varint(body)? {
            Some(decoded) => decoded,
            None => return Err(ProtocolError::DataRanOutError),
        };

        let remaining = body.len() - length_size;
        if string_length < 0 || string_length as usize > remaining {
            return Err(ProtocolError::StringLengthError(string_length));
        }

        debug!(string_length, "extracting status string");

        let json = &body[length_size..length_size + string_length as usize];
        match std::str::from_utf8(json) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => Err(ProtocolError::StringParseError),
        }
    }

    /// Run the whole exchange on this connection and return the status JSON
    pub fn status(
        &mut self,
        protocol_version: i32,
        server_address: &str,
        server_port: u16,
    ) -> Result<String, ProtocolError> {
        self.send_handshake(protocol_version, server_address, server_port)?;
        self.send_status_request()?;
        self.read_status_response()
    }

    /// One receive into the buffer tail; 0 means the peer closed
    fn fill(&mut self, buf: &mut BytesMut) -> Result<usize, ProtocolError> {
        let mut chunk = [0u8; RECV_CHUNK_SIZE];
        let received = self
            .stream_mut()
            .read(&mut chunk)
            .map_err(ProtocolError::ReadError)?;

        trace!(received, "received fragment");

        buf.extend_from_slice(&chunk[..received]);
        Ok(received)
    }
}
