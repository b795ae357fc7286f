/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

//! IPMI v2.0 FRU EEPROM decoding: common header, Board Info and Product
//! Info areas, type-length fields. Layout constants follow the IPMI
//! Platform Management FRU Information Storage Definition byte for byte.

pub mod area;
pub mod field;
pub mod header;
pub mod query;

pub use area::{decode_board_area, decode_product_area, BoardInfo, ProductInfo};
pub use field::{FruField, FruTypeCode, FruTypeLength};
pub use header::{FruAreaKind, FruCommonHeader};
pub use query::{dfd_get_fru_board_data, dfd_get_fru_data, get_fru_field_text, FruInfoType};

/* first byte in header is 1h per IPMI V2 spec. */
pub const IPMI_FRU_HDR_BYTE_ZERO: u8 = 1;
pub const IPMI_EIGHT_BYTES: usize = 8;

/// Smallest well-formed area bodies: format version, length, language code
/// plus the sentinel and checksum (and mfg time for board).
pub const IPMI_FRU_PRODUCT_AREA_MIN_LEN: usize = 7;
pub const IPMI_FRU_BOARD_AREA_MIN_LEN: usize = 5;

pub const IPMI_FRU_AREA_TYPE_LENGTH_FIELD_MAX: usize = 512;
pub const IPMI_FRU_BOARD_INFO_MFG_TIME_LENGTH: usize = 3;
pub const IPMI_FRU_SENTINEL_VALUE: u8 = 0xC1;
pub const IPMI_FRU_TYPE_LENGTH_TYPE_CODE_MASK: u8 = 0xC0;
pub const IPMI_FRU_TYPE_LENGTH_TYPE_CODE_SHIFT: u8 = 0x06;
pub const IPMI_FRU_TYPE_LENGTH_NUMBER_OF_DATA_BYTES_MASK: u8 = 0x3F;

/// Language code values for which language-dependent fields are plain
/// ASCII/Latin-1. 0 means "English, default".
pub const IPMI_FRU_LANGUAGE_CODE_ENGLISH_LEGACY: u8 = 0;
pub const IPMI_FRU_LANGUAGE_CODE_ENGLISH: u8 = 25;

use std::collections::HashMap;

lazy_static::lazy_static! {
    static ref LANGUAGE_CODES: HashMap<u8, &'static str> = {
        let mut m = HashMap::new();
        m.insert(0, "English (default)");
        m.insert(25, "English");
        m.insert(8, "Chinese");
        m.insert(12, "German");
        m.insert(15, "French");
        m.insert(22, "Japanese");
        m.insert(33, "Korean");
        m
    };
}

/// Display name for an area language code byte.
pub fn language2str(code: u8) -> &'static str {
    LANGUAGE_CODES.get(&code).copied().unwrap_or("Unknown language")
}
