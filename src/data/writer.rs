use crate::varint::write_varint;
use crate::ProtocolError;
use std::io::Write;

/// Packet data writer trait
pub trait DataWriter {
    /// Write bytes
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError>;

    /// Write byte
    fn write_byte(&mut self, byte: u8) -> Result<(), ProtocolError> {
        self.write_bytes(&[byte])
    }
    /// Write String, VarInt byte-length prefix then the raw bytes
    fn write_string(&mut self, val: &str) -> Result<(), ProtocolError> {
        let bytes = val.as_bytes();
        self.write_usize_varint(bytes.len())?;
        self.write_bytes(bytes)
    }
    /// Write Unsigned Short as big-endian u16
    fn write_unsigned_short(&mut self, val: u16) -> Result<(), ProtocolError> {
        self.write_bytes(&val.to_be_bytes())
    }

    /// Write VarInt as i32
    fn write_i32_varint(&mut self, val: i32) -> Result<(), ProtocolError> {
        write_varint(val, self)?;
        Ok(())
    }
    /// Write VarInt as usize; lengths beyond i32 range are unrepresentable
    fn write_usize_varint(&mut self, val: usize) -> Result<(), ProtocolError> {
        match i32::try_from(val) {
            Ok(val) => self.write_i32_varint(val),
            Err(_) => Err(ProtocolError::VarIntError),
        }
    }
}

impl<W: Write> DataWriter for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        self.write_all(bytes).map_err(ProtocolError::WriteError)
    }
}
