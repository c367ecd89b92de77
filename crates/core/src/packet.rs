//! Intercepted client messages.
//!
//! A [`WorldPacket`] is an opcode plus an already-framed payload. Payload
//! fields are little-endian. The packet carries its own read cursor so a
//! handler can decode the fields it needs and then hand the very same
//! message to a bot's session handler after rewinding it.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::PacketError;
use crate::guid::ObjectGuid;
use crate::opcode::Opcode;

/// An intercepted message with a read cursor.
#[derive(Debug, Clone)]
pub struct WorldPacket {
    opcode: Opcode,
    data: Bytes,
    rpos: usize,
}

impl WorldPacket {
    pub fn new(opcode: Opcode, data: impl Into<Bytes>) -> Self {
        Self {
            opcode,
            data: data.into(),
            rpos: 0,
        }
    }

    /// An empty-bodied message (e.g. logout request).
    pub fn empty(opcode: Opcode) -> Self {
        Self::new(opcode, Bytes::new())
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn payload(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read position.
    pub fn rpos(&self) -> usize {
        self.rpos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.rpos
    }

    /// Move the read cursor back to the start of the payload.
    pub fn rewind(&mut self) {
        self.rpos = 0;
    }

    fn take(&mut self, n: usize) -> Result<&[u8], PacketError> {
        if self.remaining() < n {
            return Err(PacketError::TooShort {
                need: self.rpos + n,
                got: self.data.len(),
            });
        }
        let start = self.rpos;
        self.rpos += n;
        Ok(&self.data[start..start + n])
    }

    pub fn read_u8(&mut self) -> Result<u8, PacketError> {
        let mut buf = self.take(1)?;
        Ok(buf.get_u8())
    }

    pub fn read_u32(&mut self) -> Result<u32, PacketError> {
        let mut buf = self.take(4)?;
        Ok(buf.get_u32_le())
    }

    pub fn read_u64(&mut self) -> Result<u64, PacketError> {
        let mut buf = self.take(8)?;
        Ok(buf.get_u64_le())
    }

    pub fn read_f32(&mut self) -> Result<f32, PacketError> {
        let mut buf = self.take(4)?;
        Ok(buf.get_f32_le())
    }

    /// A full 8-byte guid.
    pub fn read_guid(&mut self) -> Result<ObjectGuid, PacketError> {
        self.read_u64().map(ObjectGuid)
    }

    /// A packed guid: one mask byte, then one byte per set mask bit.
    pub fn read_packed_guid(&mut self) -> Result<ObjectGuid, PacketError> {
        let mask = self.read_u8()?;
        let mut raw = 0u64;
        for i in 0..8 {
            if mask & (1 << i) != 0 {
                raw |= u64::from(self.read_u8()?) << (i * 8);
            }
        }
        Ok(ObjectGuid(raw))
    }

    /// Advance the cursor without decoding.
    pub fn skip(&mut self, n: usize) -> Result<(), PacketError> {
        self.take(n).map(|_| ())
    }
}

/// Builds packet payloads in wire order.
#[derive(Debug, Default)]
pub struct PacketBuilder {
    buf: BytesMut,
}

impl PacketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.buf.put_u8(v);
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.buf.put_u32_le(v);
        self
    }

    pub fn u64(mut self, v: u64) -> Self {
        self.buf.put_u64_le(v);
        self
    }

    pub fn f32(mut self, v: f32) -> Self {
        self.buf.put_f32_le(v);
        self
    }

    pub fn guid(self, guid: ObjectGuid) -> Self {
        self.u64(guid.raw())
    }

    pub fn packed_guid(mut self, guid: ObjectGuid) -> Self {
        let bytes = guid.raw().to_le_bytes();
        let mut mask = 0u8;
        for (i, b) in bytes.iter().enumerate() {
            if *b != 0 {
                mask |= 1 << i;
            }
        }
        self.buf.put_u8(mask);
        for b in bytes.iter().filter(|b| **b != 0) {
            self.buf.put_u8(*b);
        }
        self
    }

    pub fn build(self, opcode: Opcode) -> WorldPacket {
        WorldPacket::new(opcode, self.buf.freeze())
    }
}
