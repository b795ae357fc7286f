/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use std::fmt;

use crate::error::{FruError, FruResult};
use crate::fru::{IPMI_EIGHT_BYTES, IPMI_FRU_HDR_BYTE_ZERO};

/// FRU areas this decoder knows how to walk. Chassis, internal-use and
/// multi-record offsets are kept in the header but not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruAreaKind {
    Board,
    Product,
}

impl fmt::Display for FruAreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FruAreaKind::Board => write!(f, "board"),
            FruAreaKind::Product => write!(f, "product"),
        }
    }
}

/// 8-byte FRU common header, per IPMI v2.0 FRU spec.
/// Offsets are stored as counts of 8-byte blocks; 0 means the area is
/// absent. Rebuilt from the raw image on every query, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruCommonHeader {
    pub fixed: u8,
    pub internal_offset: u8,
    pub chassis_offset: u8,
    pub board_offset: u8,
    pub product_offset: u8,
    pub multi_offset: u8,
    pub pad: u8,
    pub crc: u8,
}

impl FruCommonHeader {
    pub const LEN: usize = 8;

    /// Validate and decode the common header from the start of an EEPROM
    /// image. The 8 header bytes must sum to 0 mod 256 and the fixed byte
    /// must be 1.
    pub fn from_bytes(image: &[u8]) -> FruResult<Self> {
        if image.len() < Self::LEN {
            return Err(FruError::InvalidHeader(format!(
                "image is {} bytes, need at least {}",
                image.len(),
                Self::LEN
            )));
        }
        if image[0] != IPMI_FRU_HDR_BYTE_ZERO {
            return Err(FruError::InvalidHeader(format!(
                "fixed byte is 0x{:02x}, expected 0x{:02x}",
                image[0], IPMI_FRU_HDR_BYTE_ZERO
            )));
        }
        let sum = image[..Self::LEN]
            .iter()
            .fold(0u8, |acc, b| acc.wrapping_add(*b));
        if sum != 0 {
            return Err(FruError::InvalidHeader(format!(
                "checksum mismatch, header bytes sum to 0x{:02x}",
                sum
            )));
        }
        Ok(FruCommonHeader {
            fixed: image[0],
            internal_offset: image[1],
            chassis_offset: image[2],
            board_offset: image[3],
            product_offset: image[4],
            multi_offset: image[5],
            pad: image[6],
            crc: image[7],
        })
    }

    /// Byte offset of the requested area from the start of the image.
    pub fn area_offset(&self, kind: FruAreaKind) -> FruResult<usize> {
        let blocks = match kind {
            FruAreaKind::Board => self.board_offset,
            FruAreaKind::Product => self.product_offset,
        };
        if blocks == 0 {
            return Err(FruError::AreaAbsent(kind));
        }
        Ok(blocks as usize * IPMI_EIGHT_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 构造合法头部, 自动补校验和
    fn mk_header(board_blocks: u8, product_blocks: u8) -> [u8; 8] {
        let mut h = [1u8, 0, 0, board_blocks, product_blocks, 0, 0, 0];
        let sum: u8 = h[..7].iter().fold(0u8, |a, b| a.wrapping_add(*b));
        h[7] = 0u8.wrapping_sub(sum);
        h
    }

    #[test]
    fn test_valid_header_decodes() {
        let h = mk_header(1, 2);
        let hdr = FruCommonHeader::from_bytes(&h).unwrap();
        assert_eq!(hdr.fixed, 1);
        assert_eq!(hdr.board_offset, 1);
        assert_eq!(hdr.product_offset, 2);
        assert_eq!(hdr.area_offset(FruAreaKind::Board).unwrap(), 8);
        assert_eq!(hdr.area_offset(FruAreaKind::Product).unwrap(), 16);
    }

    #[test]
    fn test_any_single_byte_flip_rejected() {
        let h = mk_header(1, 2);
        for i in 0..8 {
            let mut bad = h;
            bad[i] ^= 0x01;
            assert!(
                matches!(FruCommonHeader::from_bytes(&bad), Err(FruError::InvalidHeader(_))),
                "flip of byte {} accepted",
                i
            );
        }
    }

    #[test]
    fn test_fixed_byte_must_be_one() {
        // keep checksum consistent so only the fixed byte is wrong
        let mut h = [2u8, 0, 0, 1, 2, 0, 0, 0];
        let sum: u8 = h[..7].iter().fold(0u8, |a, b| a.wrapping_add(*b));
        h[7] = 0u8.wrapping_sub(sum);
        assert!(matches!(
            FruCommonHeader::from_bytes(&h),
            Err(FruError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_short_image_rejected() {
        assert!(matches!(
            FruCommonHeader::from_bytes(&[1, 0, 0]),
            Err(FruError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_zero_offset_signals_area_absent() {
        let h = mk_header(0, 0);
        let hdr = FruCommonHeader::from_bytes(&h).unwrap();
        assert_eq!(
            hdr.area_offset(FruAreaKind::Product),
            Err(FruError::AreaAbsent(FruAreaKind::Product))
        );
        assert_eq!(
            hdr.area_offset(FruAreaKind::Board),
            Err(FruError::AreaAbsent(FruAreaKind::Board))
        );
    }
}
