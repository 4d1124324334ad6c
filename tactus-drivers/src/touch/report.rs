//! HID report framing for the RMI bridge
//!
//! The RMI register space is tunneled as payload inside HID output and
//! input reports. These are pure byte-layout functions; the driver in
//! `rmi_hid` decides when to send what. Every offset and tag value here
//! matches the physical device's expectations exactly - none of them is
//! negotiable.

use super::descriptor::DeviceDescriptor;

/// Report id tags
pub const REPORT_ID_GET_BLOB: u8 = 0x07;
pub const REPORT_ID_WRITE: u8 = 0x09;
pub const REPORT_ID_READ_ADDRESS: u8 = 0x0a;
pub const REPORT_ID_READ_DATA: u8 = 0x0b;
pub const REPORT_ID_SET_RMI_MODE: u8 = 0x0f;

/// Report type nibble combined into the top nibble of the report-id byte
/// for feature reports
pub const FEATURE_REPORT_TYPE: u8 = 0x03;

/// Command-register opcodes
pub const OPCODE_GET_REPORT: u8 = 0x02;
pub const OPCODE_SET_REPORT: u8 = 0x03;

/// Command bytes accepted by the command register
pub const POWER_COMMAND: u8 = 0x08;
pub const RESET_COMMAND: u8 = 0x01;

/// Report modes settable via the mode feature report
pub const FINGER_MODE: u8 = 0x00;
pub const RMI_MODE: u8 = 0x02;

/// Size of the boot-sequence blob report
pub const BLOB_REPORT_SIZE: usize = 256 + 3;

/// Bytes of input-report framing in front of the RMI payload of a read
/// response: a 16-bit byte count plus a reserved header word
pub const RESPONSE_HEADER_LEN: usize = 4;

/// Bytes of output-report framing in front of the RMI payload of a write
/// frame: output register, byte-count prefix, report id, reserved byte,
/// register address, payload length
pub const WRITE_HEADER_LEN: usize = 10;

const fn feature_report_tag(report_id: u8) -> u8 {
    (FEATURE_REPORT_TYPE << 4) | report_id
}

/// Length of the outbound frame carrying an RMI write of `payload_len` bytes
///
/// The device rejects output reports shorter than its declared maximum,
/// so small writes are padded up to `output_report_max_length + 2`.
pub fn write_frame_len(desc: &DeviceDescriptor, payload_len: usize) -> usize {
    let natural = payload_len + WRITE_HEADER_LEN;
    let minimum = desc.output_report_max_length as usize + 2;
    natural.max(minimum)
}

/// Length of the outbound frame carrying an RMI read request
pub fn read_request_len(desc: &DeviceDescriptor) -> usize {
    desc.output_report_max_length as usize + 2
}

/// Common first 10 bytes of the write and read-request frames
fn frame_header(frame: &mut [u8], desc: &DeviceDescriptor, report_id: u8, addr: u16, length: u16) {
    frame[0..2].copy_from_slice(&desc.output_register_index.to_le_bytes());
    frame[2..4].copy_from_slice(&desc.output_report_max_length.to_le_bytes());
    frame[4] = report_id;
    frame[5] = 0x00;
    frame[6..8].copy_from_slice(&addr.to_le_bytes());
    frame[8..10].copy_from_slice(&length.to_le_bytes());
}

/// Serialize an RMI write into `frame`
///
/// `frame` must be exactly [`write_frame_len`] bytes; everything past the
/// payload is zero-filled.
pub fn build_write_frame(frame: &mut [u8], desc: &DeviceDescriptor, addr: u16, data: &[u8]) {
    debug_assert_eq!(frame.len(), write_frame_len(desc, data.len()));
    frame.fill(0);
    frame_header(frame, desc, REPORT_ID_WRITE, addr, data.len() as u16);
    frame[WRITE_HEADER_LEN..WRITE_HEADER_LEN + data.len()].copy_from_slice(data);
}

/// Serialize an RMI read request into `frame`
///
/// `frame` must be exactly [`read_request_len`] bytes. The requested byte
/// count rides in the length field; there is no payload.
pub fn build_read_request(frame: &mut [u8], desc: &DeviceDescriptor, addr: u16, length: u16) {
    debug_assert_eq!(frame.len(), read_request_len(desc));
    frame.fill(0);
    frame_header(frame, desc, REPORT_ID_READ_ADDRESS, addr, length);
}

/// Register-address write that selects the device descriptor block for
/// the following read
pub fn descriptor_request(descriptor_addr: u16) -> [u8; 2] {
    descriptor_addr.to_le_bytes()
}

/// Command frame (power on, reset) aimed at the command register
pub fn command_frame(command_register: u16, command: u8) -> [u8; 4] {
    let reg = command_register.to_le_bytes();
    [reg[0], reg[1], 0x00, command]
}

/// GET_REPORT request for the boot-sequence blob
pub fn blob_request(desc: &DeviceDescriptor) -> [u8; 6] {
    let cmd = desc.command_register_index.to_le_bytes();
    let data = desc.data_register_index.to_le_bytes();
    [
        cmd[0],
        cmd[1],
        feature_report_tag(REPORT_ID_GET_BLOB),
        OPCODE_GET_REPORT,
        data[0],
        data[1],
    ]
}

/// SET_REPORT feature frame that writes the report-mode byte
pub fn mode_frame(desc: &DeviceDescriptor, mode: u8) -> [u8; 11] {
    let cmd = desc.command_register_index.to_le_bytes();
    let data = desc.data_register_index.to_le_bytes();
    [
        cmd[0],
        cmd[1],
        feature_report_tag(REPORT_ID_SET_RMI_MODE),
        OPCODE_SET_REPORT,
        REPORT_ID_SET_RMI_MODE,
        data[0],
        data[1],
        0x04, // feature payload byte count, low
        0x00, // feature payload byte count, high
        REPORT_ID_SET_RMI_MODE,
        mode,
    ]
}

/// Byte count declared by the input-report framing of a read response
///
/// Anything other than the descriptor's `input_report_max_length` means
/// the report is stale or misaligned and must be discarded.
pub fn response_report_len(raw: &[u8]) -> u16 {
    u16::from_le_bytes([raw[0], raw[1]])
}
