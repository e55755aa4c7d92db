//! Build-time configuration of the gateway node.

/// RS485 address of this node on the host link.
pub const MODULE_ADDRESS: u8 = 1;

/// RS485 address replies are sent to.
pub const HOST_ADDRESS: u8 = 2;

/// Homebus address of the single slave controller.
pub const SLAVE_ADDRESS: u8 = 1;

/// Ticks to wait for a Homebus reply before giving up.
pub const DEVICE_REPLY_TIMEOUT_TICKS: u32 = 100;

/// Version identifier reported to the host (module type, `V`, version).
pub const VERSION_STRING: [u8; 8] = *b"0025V100";

/// Module type, high byte first.
pub const DEVICE_TYPE: [u8; 2] = [0x00, 0x19];

/// Firmware version, major then minor.
pub const FIRMWARE_VERSION: [u8; 2] = [1, 0];

/// How replies received over the Homebus are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceChecksum {
    /// Discard replies whose checksum does not match.
    Verify,
    /// Copy replies without looking at the checksum byte.
    Trust,
}

/// Addresses, timing and identification of the node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub module_address: u8,
    pub host_address: u8,
    pub slave_address: u8,
    pub reply_timeout_ticks: u32,
    pub version_string: [u8; 8],
    pub device_type: [u8; 2],
    pub firmware_version: [u8; 2],
    pub device_checksum: DeviceChecksum,
}

impl Config {
    pub const DEFAULT: Self = Self {
        module_address: MODULE_ADDRESS,
        host_address: HOST_ADDRESS,
        slave_address: SLAVE_ADDRESS,
        reply_timeout_ticks: DEVICE_REPLY_TIMEOUT_TICKS,
        version_string: VERSION_STRING,
        device_type: DEVICE_TYPE,
        firmware_version: FIRMWARE_VERSION,
        device_checksum: DeviceChecksum::Verify,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
