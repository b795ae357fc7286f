/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

mod cli;

use clap::Parser;
use cli::{AreaArgs, Cli, MainCommand};

use ufrutool::error::FruResult;
use ufrutool::fru::header::{FruAreaKind, FruCommonHeader};
use ufrutool::fru::{
    decode_board_area, decode_product_area, get_fru_field_text, language2str, FruField,
};
use ufrutool::logging;
use ufrutool::transport::{FruIntf, I2cDevEeprom, ImageFile, SysfsEeprom};

fn main() {
    let cli = Cli::parse();
    logging::setup_logger(cli.verbose);

    let rc = match &cli.command {
        MainCommand::Product(args) => run_area(FruAreaKind::Product, args),
        MainCommand::Board(args) => run_area(FruAreaKind::Board, args),
    };
    if rc != 0 {
        std::process::exit(1);
    }
}

fn build_intf(args: &AreaArgs) -> Option<Box<dyn FruIntf>> {
    if let Some(file) = &args.file {
        return Some(Box::new(ImageFile::new(file)));
    }
    if args.bus.is_none() || args.addr.is_none() {
        eprintln!("either --file or --bus/--addr is required");
        return None;
    }
    if args.raw {
        Some(Box::new(I2cDevEeprom::new(args.len)))
    } else {
        Some(Box::new(SysfsEeprom::new()))
    }
}

fn run_area(kind: FruAreaKind, args: &AreaArgs) -> i32 {
    let intf = match build_intf(args) {
        Some(intf) => intf,
        None => return -1,
    };
    let bus = args.bus.unwrap_or(0);
    let addr = args.addr.unwrap_or(0);

    if let Some(type_code) = args.type_code {
        return match get_fru_field_text(intf.as_ref(), bus, addr, kind, type_code, args.strict) {
            Ok(text) => {
                println!("{}", text);
                0
            }
            Err(e) => {
                log::error!("{} field (type {}) read failed: {}", kind, type_code, e);
                e.code()
            }
        };
    }

    match print_area(intf.as_ref(), bus, addr, kind, args.strict) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{} area decode failed: {}", kind, e);
            e.code()
        }
    }
}

fn field_or_dash(field: &Option<FruField>, lang: u8) -> String {
    field.as_ref().map(|f| f.text(lang)).unwrap_or_else(|| "-".to_string())
}

fn print_area(
    intf: &dyn FruIntf,
    bus: i32,
    addr: u16,
    kind: FruAreaKind,
    strict: bool,
) -> FruResult<()> {
    let image = intf.read_eeprom(bus, addr)?;
    let header = FruCommonHeader::from_bytes(&image)?;
    let offset = header.area_offset(kind)?;

    match kind {
        FruAreaKind::Product => {
            let info = decode_product_area(&image, offset, strict)?;
            let lang = info.language_code;
            println!("Language             : {}", language2str(lang));
            println!("Product Manufacturer : {}", field_or_dash(&info.manufacturer, lang));
            println!("Product Name         : {}", field_or_dash(&info.product_name, lang));
            println!("Product Part Number  : {}", field_or_dash(&info.part_model_number, lang));
            println!("Product Version      : {}", field_or_dash(&info.version, lang));
            println!("Product Serial       : {}", field_or_dash(&info.serial_number, lang));
            println!("Product Asset Tag    : {}", field_or_dash(&info.asset_tag, lang));
            println!("Product FRU File ID  : {}", field_or_dash(&info.fru_file_id, lang));
            for (i, f) in info.custom_fields.iter().enumerate() {
                println!("Product Custom {}     : {}", i, f.text(lang));
            }
        }
        FruAreaKind::Board => {
            let info = decode_board_area(&image, offset, strict)?;
            let lang = info.language_code;
            println!("Language             : {}", language2str(lang));
            println!(
                "Board Mfg Date       : {}",
                info.mfg_date().format("%m/%d/%Y %H:%M:%S")
            );
            println!("Board Manufacturer   : {}", field_or_dash(&info.manufacturer, lang));
            println!("Board Product Name   : {}", field_or_dash(&info.product_name, lang));
            println!("Board Serial         : {}", field_or_dash(&info.serial_number, lang));
            println!("Board Part Number    : {}", field_or_dash(&info.part_number, lang));
            println!("Board FRU File ID    : {}", field_or_dash(&info.fru_file_id, lang));
            for (i, f) in info.custom_fields.iter().enumerate() {
                println!("Board Custom {}       : {}", i, f.text(lang));
            }
        }
    }
    Ok(())
}
