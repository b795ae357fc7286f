/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

use std::fs;
use std::io::{Read, Write};
use std::os::fd::{AsRawFd, FromRawFd};
use std::path::{Path, PathBuf};

use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;

use crate::debug2;
use crate::error::{FruError, FruResult};

/// EEPROM transport collaborator. Implementations may sleep during the
/// read; the decoder itself never blocks. The decoder treats the returned
/// bytes as immutable, so one transport may serve concurrent queries.
pub trait FruIntf {
    fn read_eeprom(&self, bus: i32, dev_addr: u16) -> FruResult<Vec<u8>>;
}

/// Reads the kernel-exported eeprom attribute,
/// `/sys/bus/i2c/devices/<bus>-<addr>/eeprom`. This is the normal path on
/// platforms where the at24 driver is already bound.
pub struct SysfsEeprom {
    root: PathBuf,
}

impl SysfsEeprom {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/sys/bus/i2c/devices"),
        }
    }

    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl Default for SysfsEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl FruIntf for SysfsEeprom {
    fn read_eeprom(&self, bus: i32, dev_addr: u16) -> FruResult<Vec<u8>> {
        let path = self.root.join(format!("{}-{:04x}", bus, dev_addr)).join("eeprom");
        debug2!("fru: reading {}", path.display());
        fs::read(&path).map_err(|e| {
            FruError::Transport(format!("{}: {}", path.display(), e))
        })
    }
}

const I2C_SLAVE: libc::c_ulong = 0x0703;

/// EEPROM word-address preamble. Parts up to 256 bytes (at24c02 class)
/// take a single address byte; larger parts address with two.
fn address_preamble(len: usize) -> &'static [u8] {
    if len > 256 {
        &[0u8, 0u8]
    } else {
        &[0u8]
    }
}

/// Raw i2c-dev transport for devices without a bound EEPROM driver:
/// set the slave address, write a 2-byte word offset of 0, then read the
/// image sequentially.
pub struct I2cDevEeprom {
    /// Bytes to read from the device; FRU EEPROMs on this platform are
    /// 256 bytes.
    pub len: usize,
}

impl I2cDevEeprom {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl FruIntf for I2cDevEeprom {
    fn read_eeprom(&self, bus: i32, dev_addr: u16) -> FruResult<Vec<u8>> {
        let path = format!("/dev/i2c-{}", bus);
        let fd = open(path.as_str(), OFlag::O_RDWR, Mode::empty())
            .map_err(|e| FruError::Transport(format!("{}: {}", path, e)))?;
        // take ownership right away so every error path below closes it
        let mut file = unsafe { fs::File::from_raw_fd(fd) };

        let rc = unsafe { libc::ioctl(file.as_raw_fd(), I2C_SLAVE, dev_addr as libc::c_ulong) };
        if rc < 0 {
            return Err(FruError::Transport(format!(
                "{}: I2C_SLAVE 0x{:02x}: {}",
                path,
                dev_addr,
                std::io::Error::last_os_error()
            )));
        }

        // rewind the device's internal address counter
        file.write_all(address_preamble(self.len))?;

        let mut image = vec![0u8; self.len];
        let mut got = 0;
        while got < self.len {
            match file.read(&mut image[got..])? {
                0 => break,
                n => got += n,
            }
        }
        image.truncate(got);
        debug2!("fru: {} returned {} of {} bytes", path, got, self.len);
        Ok(image)
    }
}

/// Reads a FRU image dump from a plain file, ignoring the bus/address
/// pair. Used by the CLI to decode offline dumps.
pub struct ImageFile {
    path: PathBuf,
}

impl ImageFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FruIntf for ImageFile {
    fn read_eeprom(&self, _bus: i32, _dev_addr: u16) -> FruResult<Vec<u8>> {
        fs::read(&self.path)
            .map_err(|e| FruError::Transport(format!("{}: {}", self.path.display(), e)))
    }
}

/// In-memory transport for tests.
#[cfg(test)]
pub struct MockEeprom {
    image: Result<Vec<u8>, String>,
}

#[cfg(test)]
impl MockEeprom {
    pub fn new(image: Vec<u8>) -> Self {
        Self { image: Ok(image) }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            image: Err(msg.to_string()),
        }
    }
}

#[cfg(test)]
impl FruIntf for MockEeprom {
    fn read_eeprom(&self, _bus: i32, _dev_addr: u16) -> FruResult<Vec<u8>> {
        match &self.image {
            Ok(image) => Ok(image.clone()),
            Err(msg) => Err(FruError::Transport(msg.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sysfs_read_from_fake_root() {
        let root = std::env::temp_dir().join(format!("frutest-{}", std::process::id()));
        let dev = root.join("3-0051");
        fs::create_dir_all(&dev).unwrap();
        fs::write(dev.join("eeprom"), [1u8, 2, 3, 4]).unwrap();

        let intf = SysfsEeprom::with_root(&root);
        assert_eq!(intf.read_eeprom(3, 0x51).unwrap(), vec![1, 2, 3, 4]);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_sysfs_missing_device_is_transport_error() {
        let intf = SysfsEeprom::with_root("/nonexistent-frutest");
        match intf.read_eeprom(9, 0x50) {
            Err(FruError::Transport(_)) => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_nix_open_fd_wraps_into_file() {
        // the i2c-dev path hands the raw fd from nix's open to a File;
        // exercise that exact handoff on a plain file
        let path = std::env::temp_dir().join(format!("frufd-{}", std::process::id()));
        fs::write(&path, b"fdtest").unwrap();

        let fd = open(path.as_path(), OFlag::O_RDONLY, Mode::empty()).unwrap();
        let mut file = unsafe { fs::File::from_raw_fd(fd) };
        let mut out = Vec::new();
        file.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"fdtest");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_address_preamble_width() {
        assert_eq!(address_preamble(256), &[0u8]);
        assert_eq!(address_preamble(128), &[0u8]);
        assert_eq!(address_preamble(4096), &[0u8, 0u8]);
    }

    #[test]
    fn test_image_file_read() {
        let path = std::env::temp_dir().join(format!("fruimg-{}.bin", std::process::id()));
        fs::write(&path, [0xAAu8; 16]).unwrap();
        let intf = ImageFile::new(&path);
        assert_eq!(intf.read_eeprom(0, 0).unwrap(), vec![0xAA; 16]);
        fs::remove_file(&path).ok();
    }
}
