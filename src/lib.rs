/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

pub mod error;
pub mod fru;
pub mod helper;
pub mod logging;
pub mod transport;

// 调试宏: -v/-vv/-vvv 对应 debug1/debug2/debug3
#[macro_export]
macro_rules! debug1 {
    ($($arg:tt)*) => {
        log::debug!(target: "debug1", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug2 {
    ($($arg:tt)*) => {
        log::debug!(target: "debug2", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug3 {
    ($($arg:tt)*) => {
        log::debug!(target: "debug3", $($arg)*)
    };
}
