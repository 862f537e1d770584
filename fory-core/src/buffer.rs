// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::Error;
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

// sli64 small form covers [i32::MIN/2, i32::MAX/2]; the shifted value must
// stay a valid i32 with the low bit free.
const SLI64_HALF_MIN: i64 = (i32::MIN / 2) as i64;
const SLI64_HALF_MAX: i64 = (i32::MAX / 2) as i64;

#[derive(Default)]
pub struct Writer {
    bf: Vec<u8>,
}

impl Writer {
    pub fn from_vec(bf: Vec<u8>) -> Writer {
        Writer { bf }
    }

    pub fn dump(&self) -> Vec<u8> {
        self.bf.clone()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bf
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn clear(&mut self) {
        self.bf.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.bf.reserve(additional);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bf.write_u8(value).unwrap();
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bf.write_i8(value).unwrap();
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bf.write_u16::<LittleEndian>(value).unwrap();
    }

    pub fn write_i16(&mut self, value: i16) {
        self.bf.write_i16::<LittleEndian>(value).unwrap();
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bf.write_u32::<LittleEndian>(value).unwrap();
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bf.write_i32::<LittleEndian>(value).unwrap();
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bf.write_u64::<LittleEndian>(value).unwrap();
    }

    pub fn write_i64(&mut self, value: i64) {
        self.bf.write_i64::<LittleEndian>(value).unwrap();
    }

    pub fn write_f32(&mut self, value: f32) {
        self.bf.write_f32::<LittleEndian>(value).unwrap();
    }

    pub fn write_f64(&mut self, value: f64) {
        self.bf.write_f64::<LittleEndian>(value).unwrap();
    }

    pub fn write_bytes(&mut self, v: &[u8]) {
        self.bf.extend_from_slice(v);
    }

    /// Patch already-written bytes, used for back-filled length slots.
    pub fn set_bytes(&mut self, offset: usize, data: &[u8]) {
        self.bf[offset..offset + data.len()].copy_from_slice(data);
    }

    /// LEB128, 7 data bits per byte, at most 5 bytes.
    pub fn write_varuint32(&mut self, value: u32) {
        let mut v = value;
        while v >= 0x80 {
            self.write_u8(((v & 0x7F) | 0x80) as u8);
            v >>= 7;
        }
        self.write_u8(v as u8);
    }

    /// ZigZag-mapped `varuint32`.
    pub fn write_varint32(&mut self, value: i32) {
        self.write_varuint32(((value << 1) ^ (value >> 31)) as u32);
    }

    /// LEB128 up to 9 bytes; the ninth byte carries 8 raw bits with no
    /// continuation marker.
    pub fn write_varuint64(&mut self, value: u64) {
        let mut v = value;
        for _ in 0..8 {
            if v < 0x80 {
                self.write_u8(v as u8);
                return;
            }
            self.write_u8(((v & 0x7F) | 0x80) as u8);
            v >>= 7;
        }
        self.write_u8(v as u8);
    }

    /// ZigZag-mapped `varuint64`.
    pub fn write_varint64(&mut self, value: i64) {
        self.write_varuint64(((value << 1) ^ (value >> 63)) as u64);
    }

    /// Small-long-as-int: values fitting half the i32 range are written as a
    /// 4-byte LE i32 holding `value << 1` (low bit clear); anything else
    /// writes a single 0b1 flag byte followed by the full 8-byte value.
    pub fn write_sli64(&mut self, value: i64) {
        if (SLI64_HALF_MIN..=SLI64_HALF_MAX).contains(&value) {
            self.write_i32((value as i32) << 1);
        } else {
            self.write_u8(0b1);
            self.write_i64(value);
        }
    }
}

pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    fn check(&self, needed: usize) -> Result<(), Error> {
        if self.cursor + needed > self.bf.len() {
            return Err(Error::Eof {
                offset: self.cursor,
                needed: self.cursor + needed - self.bf.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.check(1)?;
        let result = self.bf[self.cursor];
        self.cursor += 1;
        Ok(result)
    }

    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.check(2)?;
        let result = LittleEndian::read_u16(&self.bf[self.cursor..]);
        self.cursor += 2;
        Ok(result)
    }

    pub fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.check(4)?;
        let result = LittleEndian::read_u32(&self.bf[self.cursor..]);
        self.cursor += 4;
        Ok(result)
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        self.check(8)?;
        let result = LittleEndian::read_u64(&self.bf[self.cursor..]);
        self.cursor += 8;
        Ok(result)
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.check(len)?;
        let result = &self.bf[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(result)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), Error> {
        self.check(len)?;
        self.cursor += len;
        Ok(())
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let start = self.cursor;
        let mut result: u32 = 0;
        let mut shift = 0;
        for _ in 0..5 {
            let b = self.read_u8()?;
            result |= ((b & 0x7F) as u32) << shift;
            if b & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
        Err(Error::Overflow {
            offset: start,
            budget: 5,
        })
    }

    pub fn read_varint32(&mut self) -> Result<i32, Error> {
        let v = self.read_varuint32()?;
        Ok(((v >> 1) as i32) ^ -((v & 1) as i32))
    }

    pub fn read_varuint64(&mut self) -> Result<u64, Error> {
        let mut result: u64 = 0;
        let mut shift = 0;
        for _ in 0..8 {
            let b = self.read_u8()?;
            result |= ((b & 0x7F) as u64) << shift;
            if b & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
        // ninth byte: 8 raw bits, no continuation marker
        let b = self.read_u8()?;
        result |= (b as u64) << 56;
        Ok(result)
    }

    pub fn read_varint64(&mut self) -> Result<i64, Error> {
        let v = self.read_varuint64()?;
        Ok(((v >> 1) as i64) ^ -((v & 1) as i64))
    }

    pub fn read_sli64(&mut self) -> Result<i64, Error> {
        let raw = self.read_i32()?;
        if raw & 0b1 == 0 {
            Ok((raw >> 1) as i64)
        } else {
            // flag byte plus 8-byte body; the i32 read consumed 3 body bytes
            self.cursor -= 3;
            self.read_i64()
        }
    }
}
