/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use std::fmt;

use crate::fru::header::FruAreaKind;

/// FRU decode error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FruError {
    /// EEPROM read failure (I2C/sysfs transport)
    Transport(String),
    /// Common header checksum or fixed-byte mismatch
    InvalidHeader(String),
    /// Area offset field in the common header is 0
    AreaAbsent(FruAreaKind),
    /// Type-length encoding runs past the image or the declared area length
    TruncatedArea(String),
    /// A type-length field claims more bytes than the field buffer limit
    FieldTooLong(usize),
    /// Valid area, but the requested field is not populated
    FieldAbsent,
    /// Caller buffer smaller than the decoded field
    BufferTooSmall { need: usize, have: usize },
}

impl fmt::Display for FruError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FruError::Transport(msg) => write!(f, "eeprom read error: {}", msg),
            FruError::InvalidHeader(msg) => write!(f, "invalid FRU header: {}", msg),
            FruError::AreaAbsent(kind) => write!(f, "{} area not present", kind),
            FruError::TruncatedArea(msg) => write!(f, "truncated FRU area: {}", msg),
            FruError::FieldTooLong(len) => {
                write!(f, "type-length field too long: {} bytes", len)
            }
            FruError::FieldAbsent => write!(f, "requested FRU field not populated"),
            FruError::BufferTooSmall { need, have } => {
                write!(f, "buffer too small: field is {} bytes, buffer {}", need, have)
            }
        }
    }
}

impl std::error::Error for FruError {}

impl From<std::io::Error> for FruError {
    fn from(error: std::io::Error) -> Self {
        FruError::Transport(error.to_string())
    }
}

/// 便利类型别名
pub type FruResult<T> = Result<T, FruError>;

impl FruError {
    /// Legacy negative return code, used only at the dfd_* API boundary.
    /// The decode path itself carries `FruError` values.
    pub fn code(&self) -> i32 {
        match self {
            FruError::InvalidHeader(_) => -1,
            FruError::AreaAbsent(_) => -2,
            FruError::TruncatedArea(_) => -3,
            FruError::FieldTooLong(_) => -4,
            FruError::Transport(_) => -5,
            FruError::FieldAbsent => -6,
            FruError::BufferTooSmall { .. } => -7,
        }
    }
}
