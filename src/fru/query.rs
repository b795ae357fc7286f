/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use crate::debug1;
use crate::debug3;
use crate::error::{FruError, FruResult};
use crate::helper::buf2str;
use crate::logging;
use crate::transport::FruIntf;

use crate::fru::area::{decode_board_area, decode_product_area, BoardInfo, ProductInfo};
use crate::fru::field::FruField;
use crate::fru::header::{FruAreaKind, FruCommonHeader};

/// Caller-facing semantic field indices, shared by the product and board
/// query paths. The numeric values are the sysfs attribute contract:
/// 2 = name, 3 = serial number, 5 = hardware version, 6 = product id.
/// Values from `CUSTOM_TYPE_BASE` up select custom/OEM fields by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruInfoType {
    Name,
    SerialNumber,
    HardwareVersion,
    ProductId,
    Custom(usize),
}

pub const DFD_FRU_TYPE_NAME: i32 = 2;
pub const DFD_FRU_TYPE_SERIAL_NUMBER: i32 = 3;
pub const DFD_FRU_TYPE_HW_VERSION: i32 = 5;
pub const DFD_FRU_TYPE_PRODUCT_ID: i32 = 6;
pub const DFD_FRU_CUSTOM_TYPE_BASE: i32 = 0x10;

impl FruInfoType {
    pub fn from_type_code(typ: i32) -> Option<Self> {
        match typ {
            DFD_FRU_TYPE_NAME => Some(FruInfoType::Name),
            DFD_FRU_TYPE_SERIAL_NUMBER => Some(FruInfoType::SerialNumber),
            DFD_FRU_TYPE_HW_VERSION => Some(FruInfoType::HardwareVersion),
            DFD_FRU_TYPE_PRODUCT_ID => Some(FruInfoType::ProductId),
            t if t >= DFD_FRU_CUSTOM_TYPE_BASE => {
                Some(FruInfoType::Custom((t - DFD_FRU_CUSTOM_TYPE_BASE) as usize))
            }
            _ => None,
        }
    }
}

/// Product area index table. The hardware version of a product module is
/// the IPMI product version field; the product id is the part/model
/// number.
pub fn product_field(info: &ProductInfo, typ: FruInfoType) -> FruResult<&FruField> {
    let field = match typ {
        FruInfoType::Name => info.product_name.as_ref(),
        FruInfoType::SerialNumber => info.serial_number.as_ref(),
        FruInfoType::HardwareVersion => info.version.as_ref(),
        FruInfoType::ProductId => info.part_model_number.as_ref(),
        FruInfoType::Custom(n) => info.custom_fields.get(n),
    };
    field.ok_or(FruError::FieldAbsent)
}

/// Board area index table. Board FRUs on this platform carry the hardware
/// version as the first custom field, there is no fixed IPMI slot for it.
pub fn board_field(info: &BoardInfo, typ: FruInfoType) -> FruResult<&FruField> {
    let field = match typ {
        FruInfoType::Name => info.product_name.as_ref(),
        FruInfoType::SerialNumber => info.serial_number.as_ref(),
        FruInfoType::HardwareVersion => info.custom_fields.first(),
        FruInfoType::ProductId => info.part_number.as_ref(),
        FruInfoType::Custom(n) => info.custom_fields.get(n),
    };
    field.ok_or(FruError::FieldAbsent)
}

fn copy_field(field: &FruField, buf: &mut [u8]) -> FruResult<usize> {
    if field.len() > buf.len() {
        return Err(FruError::BufferTooSmall {
            need: field.len(),
            have: buf.len(),
        });
    }
    buf[..field.len()].copy_from_slice(&field.data);
    Ok(field.len())
}

fn get_fru_field(
    intf: &dyn FruIntf,
    bus: i32,
    dev_addr: u16,
    kind: FruAreaKind,
    typ: i32,
    buf: &mut [u8],
) -> FruResult<usize> {
    let image = intf.read_eeprom(bus, dev_addr)?;
    debug1!("fru: read {} bytes from bus {} addr 0x{:02x}", image.len(), bus, dev_addr);
    // hex dump is expensive, only build it when -vvv is active
    if logging::is_debug_enabled(3) {
        debug3!("fru: image: {}", buf2str(&image, image.len()));
    }
    let header = FruCommonHeader::from_bytes(&image)?;
    let offset = header.area_offset(kind)?;
    let typ = FruInfoType::from_type_code(typ).ok_or(FruError::FieldAbsent)?;
    match kind {
        FruAreaKind::Product => {
            let info = decode_product_area(&image, offset, false)?;
            copy_field(product_field(&info, typ)?, buf)
        }
        FruAreaKind::Board => {
            let info = decode_board_area(&image, offset, false)?;
            copy_field(board_field(&info, typ)?, buf)
        }
    }
}

/// Decode one field and render it for display. Unlike the raw-copy
/// contract of the `dfd_*` entry points, the result carries the decoded
/// field length, so binary values with interior 0x00 bytes survive.
pub fn get_fru_field_text(
    intf: &dyn FruIntf,
    bus: i32,
    dev_addr: u16,
    kind: FruAreaKind,
    typ: i32,
    strict: bool,
) -> FruResult<String> {
    let image = intf.read_eeprom(bus, dev_addr)?;
    let header = FruCommonHeader::from_bytes(&image)?;
    let offset = header.area_offset(kind)?;
    let typ = FruInfoType::from_type_code(typ).ok_or(FruError::FieldAbsent)?;
    match kind {
        FruAreaKind::Product => {
            let info = decode_product_area(&image, offset, strict)?;
            Ok(product_field(&info, typ)?.text(info.language_code))
        }
        FruAreaKind::Board => {
            let info = decode_board_area(&image, offset, strict)?;
            Ok(board_field(&info, typ)?.text(info.language_code))
        }
    }
}

/// Obtain one Product Info field of the FRU EEPROM at `(bus, dev_addr)`
/// and copy it into `buf`. Returns 0 on success, a negative error code
/// otherwise; `buf` is written only on success. `sysfs_name` names the
/// inventory attribute being served, for diagnostics only.
pub fn dfd_get_fru_data(
    intf: &dyn FruIntf,
    bus: i32,
    dev_addr: u16,
    typ: i32,
    buf: &mut [u8],
    sysfs_name: &str,
) -> i32 {
    match get_fru_field(intf, bus, dev_addr, FruAreaKind::Product, typ, buf) {
        Ok(_) => 0,
        Err(e) => {
            log::error!("{}: product fru read (type {}) failed: {}", sysfs_name, typ, e);
            e.code()
        }
    }
}

/// Board Info counterpart of [`dfd_get_fru_data`].
pub fn dfd_get_fru_board_data(
    intf: &dyn FruIntf,
    bus: i32,
    dev_addr: u16,
    typ: i32,
    buf: &mut [u8],
    sysfs_name: &str,
) -> i32 {
    match get_fru_field(intf, bus, dev_addr, FruAreaKind::Board, typ, buf) {
        Ok(_) => 0,
        Err(e) => {
            log::error!("{}: board fru read (type {}) failed: {}", sysfs_name, typ, e);
            e.code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fru::IPMI_FRU_SENTINEL_VALUE;
    use crate::transport::MockEeprom;

    /// Assemble a full EEPROM image: common header, board area, product
    /// area, both 8-byte aligned.
    fn mk_image(board: Option<&[u8]>, product: Option<&[u8]>) -> Vec<u8> {
        let mut image = vec![1u8, 0, 0, 0, 0, 0, 0, 0];
        if let Some(area) = board {
            image[3] = (image.len() / 8) as u8;
            image.extend_from_slice(area);
        }
        if let Some(area) = product {
            image[4] = (image.len() / 8) as u8;
            image.extend_from_slice(area);
        }
        let sum: u8 = image[..7].iter().fold(0u8, |a, b| a.wrapping_add(*b));
        image[7] = 0u8.wrapping_sub(sum);
        image
    }

    fn mk_area(prelude: &[u8], fields: &[&[u8]]) -> Vec<u8> {
        let mut area = vec![0x01, 0x00];
        area.extend_from_slice(prelude);
        for f in fields {
            // a 1-byte text field tags as 0xC1, which is the sentinel
            assert!(f.len() != 1, "1-byte text field would encode as the sentinel");
            area.push(0xC0 | f.len() as u8);
            area.extend_from_slice(f);
        }
        area.push(IPMI_FRU_SENTINEL_VALUE);
        while area.len() % 8 != 7 {
            area.push(0x00);
        }
        area.push(0x00);
        area[1] = (area.len() / 8) as u8;
        let sum: u8 = area.iter().fold(0u8, |a, b| a.wrapping_add(*b));
        let last = area.len() - 1;
        area[last] = 0u8.wrapping_sub(sum);
        area
    }

    fn product_image() -> Vec<u8> {
        let product = mk_area(&[0x00], &[b"ACME", b"SwitchX", b"P/N-7", b"v1", b"SN42"]);
        let board = mk_area(
            &[0x00, 0x10, 0x27, 0x00],
            &[b"ACME", b"BoardY", b"BSN99", b"BPN-1", b"", b"HV2"],
        );
        mk_image(Some(&board), Some(&product))
    }

    #[test]
    fn test_product_query_by_type_code() {
        let intf = MockEeprom::new(product_image());
        let mut buf = [0u8; 32];

        let rc = dfd_get_fru_data(&intf, 2, 0x51, DFD_FRU_TYPE_NAME, &mut buf, "product_name");
        assert_eq!(rc, 0);
        assert_eq!(&buf[..7], b"SwitchX");

        let rc = dfd_get_fru_data(&intf, 2, 0x51, DFD_FRU_TYPE_SERIAL_NUMBER, &mut buf, "sn");
        assert_eq!(rc, 0);
        assert_eq!(&buf[..4], b"SN42");

        let rc = dfd_get_fru_data(&intf, 2, 0x51, DFD_FRU_TYPE_HW_VERSION, &mut buf, "hw");
        assert_eq!(rc, 0);
        assert_eq!(&buf[..2], b"v1");

        let rc = dfd_get_fru_data(&intf, 2, 0x51, DFD_FRU_TYPE_PRODUCT_ID, &mut buf, "id");
        assert_eq!(rc, 0);
        assert_eq!(&buf[..5], b"P/N-7");
    }

    #[test]
    fn test_board_query_by_type_code() {
        let intf = MockEeprom::new(product_image());
        let mut buf = [0u8; 32];

        let rc = dfd_get_fru_board_data(&intf, 2, 0x51, DFD_FRU_TYPE_NAME, &mut buf, "name");
        assert_eq!(rc, 0);
        assert_eq!(&buf[..6], b"BoardY");

        let rc =
            dfd_get_fru_board_data(&intf, 2, 0x51, DFD_FRU_TYPE_SERIAL_NUMBER, &mut buf, "sn");
        assert_eq!(rc, 0);
        assert_eq!(&buf[..5], b"BSN99");

        // board hardware version comes from the first custom field
        let rc = dfd_get_fru_board_data(&intf, 2, 0x51, DFD_FRU_TYPE_HW_VERSION, &mut buf, "hw");
        assert_eq!(rc, 0);
        assert_eq!(&buf[..3], b"HV2");
    }

    #[test]
    fn test_custom_field_by_ordinal() {
        let product = mk_area(
            &[0x00],
            &[b"Mf", b"Nm", b"Pn", b"Vr", b"Sn", b"At", b"Fi", b"C1", b"C2"],
        );
        let intf = MockEeprom::new(mk_image(None, Some(&product)));
        let mut buf = [0u8; 8];

        let rc = dfd_get_fru_data(&intf, 0, 0, DFD_FRU_CUSTOM_TYPE_BASE + 1, &mut buf, "c1");
        assert_eq!(rc, 0);
        assert_eq!(&buf[..2], b"C2");

        // ordinal past the decoded custom run
        let rc = dfd_get_fru_data(&intf, 0, 0, DFD_FRU_CUSTOM_TYPE_BASE + 2, &mut buf, "c2");
        assert_eq!(rc, FruError::FieldAbsent.code());
    }

    #[test]
    fn test_field_text_keeps_interior_nul_bytes() {
        // manufacturer, name, then a binary part number with an embedded
        // 0x00: the rendered field must not stop at the first NUL
        let mut area = vec![0x01u8, 0x00, 0x00];
        for f in [b"Mf", b"Nm"] {
            area.push(0xC0 | 2);
            area.extend_from_slice(f);
        }
        area.push(0x03); // binary tag, 3 bytes
        area.extend_from_slice(&[0x00, 0xAB, 0x00]);
        area.push(IPMI_FRU_SENTINEL_VALUE);
        while area.len() % 8 != 0 {
            area.push(0x00);
        }
        area[1] = (area.len() / 8) as u8;

        let intf = MockEeprom::new(mk_image(None, Some(&area)));
        let text = get_fru_field_text(
            &intf,
            0,
            0,
            FruAreaKind::Product,
            DFD_FRU_TYPE_PRODUCT_ID,
            false,
        )
        .unwrap();
        assert_eq!(text, "00 ab 00");
    }

    #[test]
    fn test_absent_optional_field() {
        // only manufacturer and name populated, serial missing
        let product = mk_area(&[0x00], &[b"ACME", b"SwitchX"]);
        let intf = MockEeprom::new(mk_image(None, Some(&product)));
        let mut buf = [0u8; 8];
        let rc = dfd_get_fru_data(&intf, 0, 0, DFD_FRU_TYPE_SERIAL_NUMBER, &mut buf, "sn");
        assert_eq!(rc, FruError::FieldAbsent.code());
    }

    #[test]
    fn test_area_absent() {
        let product = mk_area(&[0x00], &[b"ACME"]);
        let intf = MockEeprom::new(mk_image(None, Some(&product)));
        let mut buf = [0u8; 8];
        let rc = dfd_get_fru_board_data(&intf, 0, 0, DFD_FRU_TYPE_NAME, &mut buf, "name");
        assert_eq!(rc, -2);
    }

    #[test]
    fn test_buffer_too_small_leaves_buf_unmodified() {
        let intf = MockEeprom::new(product_image());
        let mut buf = [0xEEu8; 4];
        let rc = dfd_get_fru_data(&intf, 0, 0, DFD_FRU_TYPE_NAME, &mut buf, "name");
        assert_eq!(rc, FruError::BufferTooSmall { need: 7, have: 4 }.code());
        assert_eq!(buf, [0xEE; 4]);
    }

    #[test]
    fn test_invalid_header_propagates() {
        let mut image = product_image();
        image[7] = image[7].wrapping_add(1);
        let intf = MockEeprom::new(image);
        let mut buf = [0u8; 32];
        let rc = dfd_get_fru_data(&intf, 0, 0, DFD_FRU_TYPE_NAME, &mut buf, "name");
        assert_eq!(rc, -1);
    }

    #[test]
    fn test_transport_error_propagates() {
        let intf = MockEeprom::failing("i2c timeout");
        let mut buf = [0u8; 32];
        let rc = dfd_get_fru_data(&intf, 0, 0, DFD_FRU_TYPE_NAME, &mut buf, "name");
        assert_eq!(rc, -5);
    }

    #[test]
    fn test_unknown_type_code_is_field_absent() {
        let intf = MockEeprom::new(product_image());
        let mut buf = [0u8; 32];
        let rc = dfd_get_fru_data(&intf, 0, 0, 4, &mut buf, "attr");
        assert_eq!(rc, FruError::FieldAbsent.code());
    }
}
