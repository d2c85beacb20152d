//! Minecraft packet struct

use crate::data::{DataReader, DataWriter};
use crate::ProtocolError;
use std::io::{Cursor, Read};

/// A packet body with its packet ID. The length prefix is not stored here,
/// framing adds it on write and strips it on read.
#[derive(Debug, Clone)]
pub struct Packet {
    id: u8,
    cursor: Cursor<Vec<u8>>,
}

impl Packet {
    /// Create new packet from raw payload (ID byte + body)
    pub fn from_data(data: &[u8]) -> Result<Packet, ProtocolError> {
        match data.split_first() {
            Some((&id, body)) => Ok(Packet::from_bytes(id, body)),
            None => Err(ProtocolError::DataRanOutError),
        }
    }

    /// Create new packet from id and body bytes
    pub fn from_bytes(id: u8, data: &[u8]) -> Packet {
        Packet {
            id,
            cursor: Cursor::new(data.to_vec()),
        }
    }

    /// Create new packet with id and empty body
    pub fn empty(id: u8) -> Packet {
        Packet {
            id,
            cursor: Cursor::new(Vec::new()),
        }
    }

    /// Build packet with lambda
    pub fn build<F>(id: u8, builder: F) -> Result<Packet, ProtocolError>
    where
        F: FnOnce(&mut Packet) -> Result<(), ProtocolError>,
    {
        let mut packet = Self::empty(id);
        builder(&mut packet)?;
        Ok(packet)
    }

    /// Get packet id
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get body length in bytes
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Is the body empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the whole body
    pub fn get_bytes(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    fn remaining(&self) -> usize {
        self.len() - self.cursor.position() as usize
    }
}

impl DataReader for Packet {
    fn read_bytes(&mut self, size: usize) -> Result<Vec<u8>, ProtocolError> {
        if size > self.remaining() {
            return Err(ProtocolError::DataRanOutError);
        }

        let mut buf = vec![0; size];
        match self.cursor.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(_) => Err(ProtocolError::DataRanOutError),
        }
    }
}

impl DataWriter for Packet {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        self.cursor.write_bytes(bytes)
    }
}
