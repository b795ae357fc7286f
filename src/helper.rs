/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

/// Decode a 3-byte little-endian quantity (IPMI 24-bit values, e.g. the
/// board manufacture time counter).
pub fn ipmi24toh(data: &[u8; 3]) -> u32 {
    u32::from_le_bytes([data[0], data[1], data[2], 0])
}

pub fn buf2str(data: &[u8], len: usize) -> String {
    data.iter()
        .take(len)
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}
