/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use crate::helper::buf2str;

use crate::fru::{
    IPMI_FRU_LANGUAGE_CODE_ENGLISH, IPMI_FRU_LANGUAGE_CODE_ENGLISH_LEGACY,
    IPMI_FRU_SENTINEL_VALUE, IPMI_FRU_TYPE_LENGTH_NUMBER_OF_DATA_BYTES_MASK,
    IPMI_FRU_TYPE_LENGTH_TYPE_CODE_MASK, IPMI_FRU_TYPE_LENGTH_TYPE_CODE_SHIFT,
};

/// Type code from bits 7..6 of a type-length tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruTypeCode {
    Binary = 0,
    BcdPlus = 1,
    SixBitAscii = 2,
    LanguageDependent = 3,
}

impl FruTypeCode {
    fn from_tag(tag: u8) -> Self {
        match (tag & IPMI_FRU_TYPE_LENGTH_TYPE_CODE_MASK) >> IPMI_FRU_TYPE_LENGTH_TYPE_CODE_SHIFT {
            0 => FruTypeCode::Binary,
            1 => FruTypeCode::BcdPlus,
            2 => FruTypeCode::SixBitAscii,
            _ => FruTypeCode::LanguageDependent,
        }
    }
}

/// A decoded type-length tag: 2-bit type code, 6-bit data length.
/// Decoded once at the area walk boundary; the raw tag byte is not
/// carried any further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruTypeLength {
    pub type_code: FruTypeCode,
    pub len: usize,
}

impl FruTypeLength {
    /// `None` for the reserved end-of-fields sentinel (0xC1), which is not
    /// a real tag even though it parses as type 3, length 1.
    pub fn decode(tag: u8) -> Option<Self> {
        if tag == IPMI_FRU_SENTINEL_VALUE {
            return None;
        }
        Some(FruTypeLength {
            type_code: FruTypeCode::from_tag(tag),
            len: (tag & IPMI_FRU_TYPE_LENGTH_NUMBER_OF_DATA_BYTES_MASK) as usize,
        })
    }
}

/// Raw value bytes of one type-length field, owned by the decoded area
/// that produced it and discarded when the query completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruField {
    pub type_code: FruTypeCode,
    pub data: Vec<u8>,
}

impl FruField {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Human-readable rendering for display paths (the dfd_* query API
    /// copies raw bytes and does not go through here).
    pub fn text(&self, language_code: u8) -> String {
        match self.type_code {
            FruTypeCode::Binary => buf2str(&self.data, self.data.len()),
            FruTypeCode::BcdPlus => bcd_plus_to_string(&self.data),
            FruTypeCode::SixBitAscii => six_bit_ascii_to_string(&self.data),
            FruTypeCode::LanguageDependent => {
                if language_code == IPMI_FRU_LANGUAGE_CODE_ENGLISH_LEGACY
                    || language_code == IPMI_FRU_LANGUAGE_CODE_ENGLISH
                {
                    String::from_utf8_lossy(&self.data).into_owned()
                } else {
                    // non-English codes mean 2-byte unicode per IPMI;
                    // not interpreted here, dump as hex
                    buf2str(&self.data, self.data.len())
                }
            }
        }
    }
}

/// BCD plus digits: 0-9, then space, dash, dot. Reserved nibbles render
/// as '?'.
fn bcd_plus_to_string(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        for nibble in [byte >> 4, byte & 0x0F] {
            out.push(match nibble {
                0x0..=0x9 => (b'0' + nibble) as char,
                0xA => ' ',
                0xB => '-',
                0xC => '.',
                _ => '?',
            });
        }
    }
    out
}

/// Unpack 6-bit packed ASCII: every 3 bytes carry 4 characters, each
/// character is the 6-bit value plus 0x20.
fn six_bit_ascii_to_string(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 4 / 3 + 4);
    for chunk in data.chunks(3) {
        let b0 = chunk[0];
        out.push((0x20 + (b0 & 0x3F)) as char);
        if chunk.len() > 1 {
            let b1 = chunk[1];
            out.push((0x20 + (((b1 & 0x0F) << 2) | (b0 >> 6))) as char);
            if chunk.len() > 2 {
                let b2 = chunk[2];
                out.push((0x20 + (((b2 & 0x03) << 4) | (b1 >> 4))) as char);
                out.push((0x20 + (b2 >> 2)) as char);
            }
        }
    }
    out
}
