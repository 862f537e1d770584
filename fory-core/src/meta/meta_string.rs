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

//! Compact encoding of short identifier strings (namespaces, type names,
//! field names). Each string is packed into the narrowest alphabet that
//! covers it; the wire carries the encoding tag and the packed bytes.

use crate::error::Error;

const MAX_LENGTH: usize = 32767;

// The 5-bit alphabet is fixed: a-z plus the four identifier specials below.
// Uppercase letters ride on a `|x` escape. The 6-bit alphabet maps the
// identifier role's special pair onto values 62/63.
const LOWER_SPECIALS: [char; 4] = ['.', '_', '$', '|'];

pub static NAMESPACE_ENCODER: MetaStringEncoder = MetaStringEncoder::new('.', '_');
pub static FIELD_NAME_ENCODER: MetaStringEncoder = MetaStringEncoder::new('$', '_');
pub static TYPE_NAME_ENCODER: MetaStringEncoder = MetaStringEncoder::new('$', '.');

pub static NAMESPACE_DECODER: MetaStringDecoder = MetaStringDecoder::new('.', '_');
pub static FIELD_NAME_DECODER: MetaStringDecoder = MetaStringDecoder::new('$', '_');
pub static TYPE_NAME_DECODER: MetaStringDecoder = MetaStringDecoder::new('$', '.');

/// Field names never use the first-to-lower tag: in field headers tag value 3
/// marks a field identified by numeric id instead of by name.
pub static FIELD_NAME_ENCODINGS: &[Encoding] = &[
    Encoding::Utf8,
    Encoding::AllToLowerSpecial,
    Encoding::LowerUpperDigitSpecial,
];

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[repr(u8)]
pub enum Encoding {
    #[default]
    Utf8 = 0x00,
    AllToLowerSpecial = 0x01,
    LowerUpperDigitSpecial = 0x02,
    FirstToLowerSpecial = 0x03,
}

impl Encoding {
    pub fn try_from_u8(value: u8) -> Result<Encoding, Error> {
        match value {
            0x00 => Ok(Encoding::Utf8),
            0x01 => Ok(Encoding::AllToLowerSpecial),
            0x02 => Ok(Encoding::LowerUpperDigitSpecial),
            0x03 => Ok(Encoding::FirstToLowerSpecial),
            _ => Err(Error::encode_error(format!(
                "unsupported meta string encoding tag: {value}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetaString {
    pub original: String,
    pub encoding: Encoding,
    pub bytes: Vec<u8>,
    pub special_char1: char,
    pub special_char2: char,
}

impl PartialEq for MetaString {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding && self.bytes == other.bytes
    }
}

impl Eq for MetaString {}

impl std::hash::Hash for MetaString {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.encoding.hash(state);
        self.bytes.hash(state);
    }
}

#[derive(Debug)]
struct StringStatistics {
    digit_count: usize,
    upper_count: usize,
    pure_lower_special: bool,
    lower_special_with_escape: bool,
    lower_upper_digit_special: bool,
}

#[derive(Clone)]
pub struct MetaStringEncoder {
    special_char1: char,
    special_char2: char,
}

impl MetaStringEncoder {
    pub const fn new(special_char1: char, special_char2: char) -> Self {
        MetaStringEncoder {
            special_char1,
            special_char2,
        }
    }

    pub fn encode(&self, input: &str) -> Result<MetaString, Error> {
        self.encode_with_encodings(input, &[])
    }

    /// Greedy tag choice restricted to `allowed` (empty slice = all tags).
    pub fn encode_with_encodings(
        &self,
        input: &str,
        allowed: &[Encoding],
    ) -> Result<MetaString, Error> {
        if input.len() >= MAX_LENGTH {
            return Err(Error::encode_error(format!(
                "meta string too long, max: {MAX_LENGTH}, current: {}",
                input.len()
            )));
        }
        let encoding = self.compute_encoding(input, allowed);
        self.encode_as(input, encoding)
    }

    fn compute_encoding(&self, input: &str, allowed: &[Encoding]) -> Encoding {
        let allow = |e: Encoding| allowed.is_empty() || allowed.contains(&e);
        if input.is_empty() || !input.is_ascii() {
            return Encoding::Utf8;
        }
        let stats = self.compute_statistics(input);
        if stats.pure_lower_special && allow(Encoding::AllToLowerSpecial) {
            return Encoding::AllToLowerSpecial;
        }
        if stats.lower_upper_digit_special
            && stats.digit_count != 0
            && allow(Encoding::LowerUpperDigitSpecial)
        {
            return Encoding::LowerUpperDigitSpecial;
        }
        if stats.lower_special_with_escape {
            if stats.upper_count == 1
                && input.chars().next().unwrap().is_ascii_uppercase()
                && allow(Encoding::FirstToLowerSpecial)
            {
                return Encoding::FirstToLowerSpecial;
            }
            if (input.len() + stats.upper_count) * 5 < input.len() * 6
                && allow(Encoding::AllToLowerSpecial)
            {
                return Encoding::AllToLowerSpecial;
            }
        }
        if stats.lower_upper_digit_special && allow(Encoding::LowerUpperDigitSpecial) {
            return Encoding::LowerUpperDigitSpecial;
        }
        Encoding::Utf8
    }

    fn compute_statistics(&self, input: &str) -> StringStatistics {
        let mut digit_count = 0;
        let mut upper_count = 0;
        let mut pure_lower_special = true;
        let mut lower_special_with_escape = true;
        let mut lower_upper_digit_special = true;
        for c in input.chars() {
            let is_lower_special = c.is_ascii_lowercase() || LOWER_SPECIALS.contains(&c);
            if !is_lower_special {
                pure_lower_special = false;
                if !c.is_ascii_uppercase() {
                    lower_special_with_escape = false;
                }
            }
            if !(c.is_ascii_alphanumeric() || c == self.special_char1 || c == self.special_char2) {
                lower_upper_digit_special = false;
            }
            if c.is_ascii_digit() {
                digit_count += 1;
            }
            if c.is_ascii_uppercase() {
                upper_count += 1;
            }
        }
        StringStatistics {
            digit_count,
            upper_count,
            pure_lower_special,
            lower_special_with_escape,
            lower_upper_digit_special,
        }
    }

    pub fn encode_as(&self, input: &str, encoding: Encoding) -> Result<MetaString, Error> {
        let bytes = match encoding {
            Encoding::Utf8 => input.as_bytes().to_vec(),
            Encoding::AllToLowerSpecial => {
                let mut expanded = String::with_capacity(input.len() * 2);
                for c in input.chars() {
                    if c.is_ascii_uppercase() {
                        expanded.push('|');
                        expanded.push(c.to_ascii_lowercase());
                    } else {
                        expanded.push(c);
                    }
                }
                self.pack(&expanded, 5)?
            }
            Encoding::FirstToLowerSpecial => {
                let mut lowered = String::with_capacity(input.len());
                let mut chars = input.chars();
                if let Some(first) = chars.next() {
                    lowered.push(first.to_ascii_lowercase());
                }
                lowered.extend(chars);
                self.pack(&lowered, 5)?
            }
            Encoding::LowerUpperDigitSpecial => self.pack(input, 6)?,
        };
        Ok(MetaString {
            original: input.to_string(),
            encoding,
            bytes,
            special_char1: self.special_char1,
            special_char2: self.special_char2,
        })
    }

    /// Packs `bits`-wide character values big-endian. Bit 0 of byte 0 flags
    /// whether the zero padding in the final byte is wide enough to decode as
    /// a spurious character that the reader must drop.
    fn pack(&self, input: &str, bits: u8) -> Result<Vec<u8>, Error> {
        if input.is_empty() {
            return Ok(vec![]);
        }
        let total_bits = input.len() * bits as usize + 1;
        let byte_len = (total_bits + 7) / 8;
        let mut out = vec![0u8; byte_len];
        let mut bit = 1;
        for c in input.chars() {
            let value = self.char_value(c, bits)?;
            for i in (0..bits).rev() {
                if value & (1 << i) != 0 {
                    out[bit / 8] |= 1 << (7 - bit % 8);
                }
                bit += 1;
            }
        }
        if byte_len * 8 >= total_bits + bits as usize {
            out[0] |= 0x80;
        }
        Ok(out)
    }

    fn char_value(&self, c: char, bits: u8) -> Result<u8, Error> {
        match bits {
            5 => match c {
                'a'..='z' => Ok(c as u8 - b'a'),
                '.' => Ok(26),
                '_' => Ok(27),
                '$' => Ok(28),
                '|' => Ok(29),
                _ => Err(Error::encode_error(format!(
                    "character {c:?} is outside the 5-bit alphabet"
                ))),
            },
            _ => match c {
                'a'..='z' => Ok(c as u8 - b'a'),
                'A'..='Z' => Ok(c as u8 - b'A' + 26),
                '0'..='9' => Ok(c as u8 - b'0' + 52),
                c if c == self.special_char1 => Ok(62),
                c if c == self.special_char2 => Ok(63),
                _ => Err(Error::encode_error(format!(
                    "character {c:?} is outside the 6-bit alphabet"
                ))),
            },
        }
    }
}

#[derive(Clone)]
pub struct MetaStringDecoder {
    special_char1: char,
    special_char2: char,
}

impl MetaStringDecoder {
    pub const fn new(special_char1: char, special_char2: char) -> Self {
        MetaStringDecoder {
            special_char1,
            special_char2,
        }
    }

    pub fn decode(&self, data: &[u8], encoding: Encoding) -> Result<MetaString, Error> {
        let original = match encoding {
            Encoding::Utf8 => String::from_utf8(data.to_vec())
                .map_err(|_| Error::encode_error("invalid utf-8 in meta string"))?,
            Encoding::AllToLowerSpecial => {
                let raw = self.unpack(data, 5, Self::lower_special_char)?;
                Self::unescape_upper(&raw)
            }
            Encoding::FirstToLowerSpecial => {
                let raw = self.unpack(data, 5, Self::lower_special_char)?;
                let mut chars = raw.chars();
                match chars.next() {
                    Some(first) => {
                        let mut s = first.to_ascii_uppercase().to_string();
                        s.extend(chars);
                        s
                    }
                    None => raw,
                }
            }
            Encoding::LowerUpperDigitSpecial => {
                self.unpack(data, 6, |v| self.lower_upper_digit_char(v))?
            }
        };
        Ok(MetaString {
            original,
            encoding,
            bytes: data.to_vec(),
            special_char1: self.special_char1,
            special_char2: self.special_char2,
        })
    }

    fn unpack(
        &self,
        data: &[u8],
        bits: u8,
        to_char: impl Fn(u8) -> Result<char, Error>,
    ) -> Result<String, Error> {
        if data.is_empty() {
            return Ok(String::new());
        }
        let strip_last = data[0] & 0x80 != 0;
        let mut n_chars = (data.len() * 8 - 1) / bits as usize;
        if strip_last {
            n_chars -= 1;
        }
        let mut out = String::with_capacity(n_chars);
        let mut bit = 1;
        for _ in 0..n_chars {
            let mut value = 0u8;
            for _ in 0..bits {
                value <<= 1;
                if data[bit / 8] & (1 << (7 - bit % 8)) != 0 {
                    value |= 1;
                }
                bit += 1;
            }
            out.push(to_char(value)?);
        }
        Ok(out)
    }

    fn lower_special_char(value: u8) -> Result<char, Error> {
        match value {
            0..=25 => Ok((b'a' + value) as char),
            26 => Ok('.'),
            27 => Ok('_'),
            28 => Ok('$'),
            29 => Ok('|'),
            _ => Err(Error::encode_error(format!(
                "invalid 5-bit character value: {value}"
            ))),
        }
    }

    fn lower_upper_digit_char(&self, value: u8) -> Result<char, Error> {
        match value {
            0..=25 => Ok((b'a' + value) as char),
            26..=51 => Ok((b'A' + value - 26) as char),
            52..=61 => Ok((b'0' + value - 52) as char),
            62 => Ok(self.special_char1),
            63 => Ok(self.special_char2),
            _ => Err(Error::encode_error(format!(
                "invalid 6-bit character value: {value}"
            ))),
        }
    }

    fn unescape_upper(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c == '|' {
                if let Some(next) = chars.next() {
                    out.push(next.to_ascii_uppercase());
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}
