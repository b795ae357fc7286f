/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::debug2;
use crate::debug3;
use crate::error::{FruError, FruResult};
use crate::helper::ipmi24toh;

use crate::fru::field::{FruField, FruTypeLength};
use crate::fru::{
    IPMI_EIGHT_BYTES, IPMI_FRU_AREA_TYPE_LENGTH_FIELD_MAX, IPMI_FRU_BOARD_AREA_MIN_LEN,
    IPMI_FRU_BOARD_INFO_MFG_TIME_LENGTH, IPMI_FRU_PRODUCT_AREA_MIN_LEN, IPMI_FRU_SENTINEL_VALUE,
};

/// Area format version, low nibble of the first area byte. 1h per IPMI v2.
const IPMI_FRU_AREA_FORMAT_VERSION: u8 = 1;

/// Product Info area: language code plus the fixed IPMI field order,
/// then custom fields until the sentinel.
#[derive(Debug, Clone, Default)]
pub struct ProductInfo {
    pub language_code: u8,
    pub manufacturer: Option<FruField>,
    pub product_name: Option<FruField>,
    pub part_model_number: Option<FruField>,
    pub version: Option<FruField>,
    pub serial_number: Option<FruField>,
    pub asset_tag: Option<FruField>,
    pub fru_file_id: Option<FruField>,
    pub custom_fields: Vec<FruField>,
}

/// Board Info area: language code, 3-byte manufacture time, fixed field
/// order, then custom fields (this platform stores the hardware version
/// as the first custom field).
#[derive(Debug, Clone, Default)]
pub struct BoardInfo {
    pub language_code: u8,
    /// Minutes since 1996-01-01T00:00 UTC, little-endian on the wire.
    pub mfg_time_minutes: u32,
    pub manufacturer: Option<FruField>,
    pub product_name: Option<FruField>,
    pub serial_number: Option<FruField>,
    pub part_number: Option<FruField>,
    pub fru_file_id: Option<FruField>,
    pub custom_fields: Vec<FruField>,
}

impl BoardInfo {
    /// Manufacture timestamp. The 24-bit counter tops out in 2027, well
    /// inside chrono's range, so this cannot overflow.
    pub fn mfg_date(&self) -> DateTime<Utc> {
        let epoch = Utc.with_ymd_and_hms(1996, 1, 1, 0, 0, 0).unwrap();
        epoch + Duration::minutes(self.mfg_time_minutes as i64)
    }
}

/// Shared area prologue checks: format version, declared length, strict
/// checksum. Returns the area end (exclusive byte offset).
fn area_bounds(image: &[u8], offset: usize, min_len: usize, strict: bool) -> FruResult<usize> {
    if offset + 2 > image.len() {
        return Err(FruError::TruncatedArea(format!(
            "area header at offset {} past image end ({})",
            offset,
            image.len()
        )));
    }
    let version = image[offset] & 0x0F;
    if version != IPMI_FRU_AREA_FORMAT_VERSION {
        return Err(FruError::InvalidHeader(format!(
            "area format version {} at offset {}, expected {}",
            version, offset, IPMI_FRU_AREA_FORMAT_VERSION
        )));
    }
    let area_len = image[offset + 1] as usize * IPMI_EIGHT_BYTES;
    if area_len < min_len {
        return Err(FruError::TruncatedArea(format!(
            "declared area length {} below minimum {}",
            area_len, min_len
        )));
    }
    let end = offset + area_len;
    if end > image.len() {
        return Err(FruError::TruncatedArea(format!(
            "declared area length {} runs past image end ({})",
            area_len,
            image.len()
        )));
    }
    if strict {
        let sum = image[offset..end]
            .iter()
            .fold(0u8, |acc, b| acc.wrapping_add(*b));
        if sum != 0 {
            return Err(FruError::InvalidHeader(format!(
                "area checksum mismatch, bytes sum to 0x{:02x}",
                sum
            )));
        }
    }
    Ok(end)
}

/// Walk type-length fields from `cursor` until the sentinel or the area
/// end. The area's declared length bounds the walk, so corrupt data can
/// never push the cursor past `end` or the image.
fn walk_fields(image: &[u8], mut cursor: usize, end: usize) -> FruResult<Vec<FruField>> {
    let mut fields = Vec::new();
    while cursor < end {
        let tag = image[cursor];
        if tag == IPMI_FRU_SENTINEL_VALUE {
            debug2!("fru: sentinel at offset {}, {} fields", cursor, fields.len());
            return Ok(fields);
        }
        // sentinel already handled, decode cannot fail here
        let tl = match FruTypeLength::decode(tag) {
            Some(tl) => tl,
            None => break,
        };
        cursor += 1;
        if tl.len > IPMI_FRU_AREA_TYPE_LENGTH_FIELD_MAX {
            return Err(FruError::FieldTooLong(tl.len));
        }
        if cursor + tl.len > end {
            return Err(FruError::TruncatedArea(format!(
                "field of {} bytes at offset {} exceeds area end ({})",
                tl.len, cursor, end
            )));
        }
        debug3!(
            "fru: field {} type {:?} len {} at offset {}",
            fields.len(),
            tl.type_code,
            tl.len,
            cursor - 1
        );
        fields.push(FruField {
            type_code: tl.type_code,
            data: image[cursor..cursor + tl.len].to_vec(),
        });
        cursor += tl.len;
    }
    Err(FruError::TruncatedArea(
        "no sentinel before end of area".to_string(),
    ))
}

/// Decode the Product Info area starting at `offset`. `strict` also
/// verifies the area checksum byte.
pub fn decode_product_area(image: &[u8], offset: usize, strict: bool) -> FruResult<ProductInfo> {
    let end = area_bounds(image, offset, IPMI_FRU_PRODUCT_AREA_MIN_LEN, strict)?;
    if offset + 3 > end {
        return Err(FruError::TruncatedArea(
            "product area too short for language code".to_string(),
        ));
    }
    let mut info = ProductInfo {
        language_code: image[offset + 2],
        ..Default::default()
    };

    let mut fields = walk_fields(image, offset + 3, end)?.into_iter();
    info.manufacturer = fields.next();
    info.product_name = fields.next();
    info.part_model_number = fields.next();
    info.version = fields.next();
    info.serial_number = fields.next();
    info.asset_tag = fields.next();
    info.fru_file_id = fields.next();
    info.custom_fields = fields.collect();
    Ok(info)
}

/// Decode the Board Info area starting at `offset`.
pub fn decode_board_area(image: &[u8], offset: usize, strict: bool) -> FruResult<BoardInfo> {
    let end = area_bounds(image, offset, IPMI_FRU_BOARD_AREA_MIN_LEN, strict)?;
    let prelude = 3 + IPMI_FRU_BOARD_INFO_MFG_TIME_LENGTH;
    if offset + prelude > end {
        return Err(FruError::TruncatedArea(
            "board area too short for language code and mfg time".to_string(),
        ));
    }
    let mfg = &image[offset + 3..offset + 3 + IPMI_FRU_BOARD_INFO_MFG_TIME_LENGTH];
    let mut info = BoardInfo {
        language_code: image[offset + 2],
        mfg_time_minutes: ipmi24toh(&[mfg[0], mfg[1], mfg[2]]),
        ..Default::default()
    };

    let mut fields = walk_fields(image, offset + prelude, end)?.into_iter();
    info.manufacturer = fields.next();
    info.product_name = fields.next();
    info.serial_number = fields.next();
    info.part_number = fields.next();
    info.fru_file_id = fields.next();
    info.custom_fields = fields.collect();
    Ok(info)
}
