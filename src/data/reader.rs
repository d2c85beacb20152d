use crate::varint::{CONTINUE_BIT, MAX_VARINT_SIZE, SEGMENT_BITS};
use crate::ProtocolError;
use std::io::Read;

/// Packet data reader trait
pub trait DataReader {
    /// Read bytes
    fn read_bytes(&mut self, size: usize) -> Result<Vec<u8>, ProtocolError>;

    /// Read byte
    fn read_byte(&mut self) -> Result<u8, ProtocolError> {
        Ok(self.read_bytes(1)?[0])
    }
    /// Read String, VarInt byte-length prefix then the raw bytes
    fn read_string(&mut self) -> Result<String, ProtocolError> {
        let size = self.read_usize_varint()?;
        match String::from_utf8(self.read_bytes(size)?) {
            Ok(i) => Ok(i),
            Err(_) => Err(ProtocolError::StringParseError),
        }
    }
    /// Read Unsigned Short as big-endian u16
    fn read_unsigned_short(&mut self) -> Result<u16, ProtocolError> {
        match self.read_bytes(2)?.try_into() {
            Ok(i) => Ok(u16::from_be_bytes(i)),
            Err(_) => Err(ProtocolError::DataRanOutError),
        }
    }

    /// Read VarInt as i32
    fn read_i32_varint(&mut self) -> Result<i32, ProtocolError> {
        let mut value: i32 = 0;

        for i in 0..MAX_VARINT_SIZE {
            let byte = self.read_byte()?;
            value |= ((byte & SEGMENT_BITS) as i32) << (7 * i);

            if byte & CONTINUE_BIT == 0 {
                return Ok(value);
            }
        }

        Err(ProtocolError::VarIntError)
    }
    /// Read VarInt as usize; negative values are malformed here
    fn read_usize_varint(&mut self) -> Result<usize, ProtocolError> {
        match usize::try_from(self.read_i32_varint()?) {
            Ok(val) => Ok(val),
            Err(_) => Err(ProtocolError::VarIntError),
        }
    }
}

impl<R: Read> DataReader for R {
    fn read_bytes(&mut self, size: usize) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = vec![0; size];
        let mut filled = 0;

        while filled < size {
            match self.read(&mut buf[filled..]) {
                Ok(0) => return Err(ProtocolError::ConnectionClosedError),
                Ok(n) => filled += n,
                Err(e) => return Err(ProtocolError::ReadError(e)),
            }
        }

        Ok(buf)
    }
}
