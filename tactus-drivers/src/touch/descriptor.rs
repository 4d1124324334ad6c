//! HID device descriptor block
//!
//! The device keeps a fixed-layout metadata block at a board-defined
//! register address. It is fetched once during the boot handshake and
//! parameterizes every frame built afterwards: register indices to
//! address, report sizes to pad to.

/// Size of the descriptor block on the wire
///
/// Thirteen little-endian 16-bit fields followed by four reserved bytes.
/// The block's own first field declares this length.
pub const DEVICE_DESCRIPTOR_LEN: usize = 30;

/// Parsed HID device descriptor
///
/// All fields are read verbatim from the device; no validation happens
/// here. A device that reports nonsense gets nonsense frames back, which
/// the recovery path sorts out at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceDescriptor {
    /// Declared length of this block (30 for the parts we drive)
    pub device_descriptor_length: u16,
    /// Protocol format version (bcd)
    pub format_version: u16,
    /// Length of the report descriptor
    pub report_descriptor_length: u16,
    /// Register index of the report descriptor
    pub report_descriptor_index: u16,
    /// Register index input reports are read from
    pub input_register_index: u16,
    /// Maximum input report length; doubles as the validation gate for
    /// read responses
    pub input_report_max_length: u16,
    /// Register index output reports are written to
    pub output_register_index: u16,
    /// Maximum output report length; undersized output reports are
    /// rejected by the device, so frames are padded up to this
    pub output_report_max_length: u16,
    /// Register index for power/reset/feature commands
    pub command_register_index: u16,
    /// Register index feature report payloads go through
    pub data_register_index: u16,
    /// USB-style vendor id
    pub vendor_id: u16,
    /// USB-style product id
    pub product_id: u16,
    /// Firmware version id
    pub version_id: u16,
}

impl DeviceDescriptor {
    /// Parse the raw descriptor block
    ///
    /// The trailing four reserved bytes are ignored.
    pub fn parse(raw: &[u8; DEVICE_DESCRIPTOR_LEN]) -> Self {
        Self {
            device_descriptor_length: le16(raw, 0),
            format_version: le16(raw, 2),
            report_descriptor_length: le16(raw, 4),
            report_descriptor_index: le16(raw, 6),
            input_register_index: le16(raw, 8),
            input_report_max_length: le16(raw, 10),
            output_register_index: le16(raw, 12),
            output_report_max_length: le16(raw, 14),
            command_register_index: le16(raw, 16),
            data_register_index: le16(raw, 18),
            vendor_id: le16(raw, 20),
            product_id: le16(raw, 22),
            version_id: le16(raw, 24),
        }
    }
}

fn le16(raw: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([raw[offset], raw[offset + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_golden_block() {
        let mut raw = [0u8; DEVICE_DESCRIPTOR_LEN];
        raw[0] = 30; // device_descriptor_length
        raw[2] = 0x00;
        raw[3] = 0x01; // format_version 1.00
        raw[8] = 0x21; // input_register_index 0x0021
        raw[10] = 62; // input_report_max_length
        raw[12] = 0x22; // output_register_index 0x0022
        raw[14] = 64; // output_report_max_length
        raw[16] = 0x23; // command_register_index
        raw[18] = 0x24; // data_register_index
        raw[20] = 0xc9;
        raw[21] = 0x06; // vendor_id 0x06c9

        let desc = DeviceDescriptor::parse(&raw);
        assert_eq!(desc.device_descriptor_length, 30);
        assert_eq!(desc.format_version, 0x0100);
        assert_eq!(desc.input_register_index, 0x0021);
        assert_eq!(desc.input_report_max_length, 62);
        assert_eq!(desc.output_register_index, 0x0022);
        assert_eq!(desc.output_report_max_length, 64);
        assert_eq!(desc.command_register_index, 0x0023);
        assert_eq!(desc.data_register_index, 0x0024);
        assert_eq!(desc.vendor_id, 0x06c9);
        assert_eq!(desc.product_id, 0);
        assert_eq!(desc.version_id, 0);
    }

    #[test]
    fn test_parse_is_little_endian() {
        let mut raw = [0u8; DEVICE_DESCRIPTOR_LEN];
        raw[14] = 0x34;
        raw[15] = 0x12;
        assert_eq!(
            DeviceDescriptor::parse(&raw).output_report_max_length,
            0x1234
        );
    }
}
