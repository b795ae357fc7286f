/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

// 主命令结构
#[derive(Parser, Debug)]
#[command(
    name = "ufrutool",
    version = "0.1.0",
    about = "FRU EEPROM decode utility for switch platform inventory"
)]
pub struct Cli {
    /// Verbose output (-v, -vv, -vvv)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: MainCommand,
}

#[derive(Subcommand, Debug)]
pub enum MainCommand {
    /// Decode the Product Info area
    Product(AreaArgs),
    /// Decode the Board Info area
    Board(AreaArgs),
}

#[derive(Args, Debug)]
pub struct AreaArgs {
    /// Decode an offline image dump instead of a live device
    #[arg(long, conflicts_with_all = ["bus", "addr"])]
    pub file: Option<PathBuf>,

    /// I2C bus number of the FRU EEPROM
    #[arg(long, requires = "addr")]
    pub bus: Option<i32>,

    /// I2C device address, e.g. 0x51
    #[arg(long, requires = "bus", value_parser = parse_dev_addr)]
    pub addr: Option<u16>,

    /// Read through /dev/i2c-N instead of the sysfs eeprom attribute
    #[arg(long)]
    pub raw: bool,

    /// Bytes to read in --raw mode
    #[arg(long, default_value_t = 256)]
    pub len: usize,

    /// Print one field by its sysfs type code (2 name, 3 serial number,
    /// 5 hardware version, 6 product id) instead of the whole area
    #[arg(long = "type")]
    pub type_code: Option<i32>,

    /// Also verify the per-area checksum byte
    #[arg(long)]
    pub strict: bool,
}

// 设备地址支持0x前缀或十进制
fn parse_dev_addr(s: &str) -> Result<u16, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse::<u16>()
    };
    parsed.map_err(|_| format!("invalid device address: {}", s))
}
