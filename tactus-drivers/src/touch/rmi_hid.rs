//! RMI-over-HID-I2C bridge driver
//!
//! The sensor speaks HID-over-I2C on the wire but its register space is
//! addressed with RMI read/write operations. This driver translates each
//! RMI operation into the report frames the link requires, retries
//! transient bus failures, and re-runs the boot handshake once per call
//! when the link wedges.
//!
//! One bridge operation is in flight at a time: every entry point takes
//! `&mut self`, so the scratch buffers and cached descriptor need no
//! internal locking. Callers sharing a device across threads wrap it in
//! their own mutex.

use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;
use tactus_core::{BoardConfig, RmiBus, RmiError};
use tactus_hal::{I2cBus, InputPin};

use super::descriptor::{DeviceDescriptor, DEVICE_DESCRIPTOR_LEN};
use super::report;

/// Attempts per bus transfer, and per read-report validation loop
const RETRY_LIMIT: u8 = 10;

/// Delay between transfer retries, stale-report retries and readiness polls
const RETRY_DELAY_MS: u32 = 20;

/// Settle time before fetching the boot blob
const BLOB_SETTLE_MS: u32 = 20;

/// Budget for the post-reset ready wait. Reset completion has no signal
/// other than the attention line, and a dead device would otherwise hang
/// the call forever.
const RESET_TIMEOUT_MS: u32 = 2_000;

/// Reusable transfer buffers
///
/// Grown to the largest length ever requested per direction, never
/// shrunk, so steady-state operation does not allocate.
struct ScratchBuffers {
    read: Vec<u8>,
    write: Vec<u8>,
}

impl ScratchBuffers {
    const fn new() -> Self {
        Self {
            read: Vec::new(),
            write: Vec::new(),
        }
    }
}

/// Grow `buf` to at least `len` zeroed bytes
fn ensure_capacity(buf: &mut Vec<u8>, len: usize) -> Result<(), RmiError> {
    if buf.len() < len {
        let mut grown = Vec::new();
        grown.try_reserve_exact(len).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("scratch buffer growth to {=usize} bytes failed", len);
            RmiError::OutOfMemory
        })?;
        grown.resize(len, 0);
        *buf = grown;
    }
    Ok(())
}

/// RMI register access bridged over HID-over-I2C report framing
///
/// Generic over the bus ([`I2cBus`]), the attention line ([`InputPin`])
/// and a blocking delay provider ([`DelayNs`]); multiple sensor instances
/// coexist by constructing one device per sensor.
pub struct RmiHidDevice<I2C, PIN, D> {
    bus: I2C,
    attn: PIN,
    delay: D,
    config: BoardConfig,
    descriptor: Option<DeviceDescriptor>,
    scratch: ScratchBuffers,
}

impl<I2C, PIN, D> RmiHidDevice<I2C, PIN, D>
where
    I2C: I2cBus,
    PIN: InputPin,
    D: DelayNs,
{
    /// Create a driver for the sensor described by `config`
    ///
    /// No bus traffic happens here; call [`init_ui`](Self::init_ui) to
    /// bring the link up.
    pub fn new(bus: I2C, attn: PIN, delay: D, config: BoardConfig) -> Self {
        Self {
            bus,
            attn,
            delay,
            config,
            descriptor: None,
            scratch: ScratchBuffers::new(),
        }
    }

    /// Latest descriptor fetched from the device, if the handshake has run
    pub fn descriptor(&self) -> Option<&DeviceDescriptor> {
        self.descriptor.as_ref()
    }

    /// Read `out.len()` bytes of register space starting at `addr`
    ///
    /// Recovers the link with one full handshake if the operation fails;
    /// a second failure surfaces as [`RmiError::LinkDown`].
    pub fn read(&mut self, addr: u16, out: &mut [u8]) -> Result<u16, RmiError> {
        self.with_recovery(|dev| dev.try_read(addr, out))
    }

    /// Write `data` to register space starting at `addr`
    ///
    /// Same one-shot recovery policy as [`read`](Self::read).
    pub fn write(&mut self, addr: u16, data: &[u8]) -> Result<u16, RmiError> {
        self.with_recovery(|dev| dev.try_write(addr, data))
    }

    /// Full boot handshake
    ///
    /// Fetches the device descriptor, powers the device up, resets it,
    /// waits for the attention line, discards the spurious post-reset
    /// report, fetches the boot blob, then switches the device into RMI
    /// mode. Runs once at attach and again as link recovery.
    pub fn init_ui(&mut self) -> Result<(), RmiError> {
        // A failed handshake must never leave frames built from stale
        // register indices
        self.descriptor = None;

        self.send(&report::descriptor_request(
            self.config.device_descriptor_addr,
        ))?;
        self.transfer_read(DEVICE_DESCRIPTOR_LEN)?;
        let mut raw = [0u8; DEVICE_DESCRIPTOR_LEN];
        raw.copy_from_slice(&self.scratch.read[..DEVICE_DESCRIPTOR_LEN]);
        let desc = DeviceDescriptor::parse(&raw);
        self.descriptor = Some(desc);

        self.send(&report::command_frame(
            desc.command_register_index,
            report::POWER_COMMAND,
        ))?;
        self.send(&report::command_frame(
            desc.command_register_index,
            report::RESET_COMMAND,
        ))?;
        self.wait_for_reset()?;

        // The device emits one spurious input report after reset
        self.transfer_read(desc.input_report_max_length as usize)?;

        self.send(&report::blob_request(&desc))?;
        self.delay.delay_ms(BLOB_SETTLE_MS);
        self.transfer_read(report::BLOB_REPORT_SIZE)?;

        self.init_bootloader_mode()
    }

    /// Switch the device into register-addressable (RMI) report mode
    /// without the rest of the boot sequence
    ///
    /// Requires a descriptor from an earlier handshake.
    pub fn init_bootloader_mode(&mut self) -> Result<(), RmiError> {
        let desc = self.cached_descriptor()?;
        self.send(&report::mode_frame(&desc, report::RMI_MODE))
    }

    fn cached_descriptor(&self) -> Result<DeviceDescriptor, RmiError> {
        match self.descriptor {
            Some(desc) => Ok(desc),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("no device descriptor; treating link as down");
                Err(RmiError::LinkDown)
            }
        }
    }

    /// Run `op`, allowing one full handshake recovery before giving up
    ///
    /// Allocation failure surfaces directly: re-initialising the device
    /// would not produce memory.
    fn with_recovery<T>(
        &mut self,
        mut op: impl FnMut(&mut Self) -> Result<T, RmiError>,
    ) -> Result<T, RmiError> {
        let mut recovered = false;
        loop {
            match op(self) {
                Ok(value) => return Ok(value),
                Err(RmiError::OutOfMemory) => return Err(RmiError::OutOfMemory),
                Err(_cause) if !recovered => {
                    recovered = true;
                    #[cfg(feature = "defmt")]
                    defmt::warn!("bridge operation failed ({}), re-initialising link", _cause);
                    if let Err(_init_err) = self.init_ui() {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("link recovery failed ({})", _init_err);
                        return Err(RmiError::LinkDown);
                    }
                }
                Err(_cause) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("bridge operation failed after recovery ({})", _cause);
                    return Err(RmiError::LinkDown);
                }
            }
        }
    }

    fn try_read(&mut self, addr: u16, out: &mut [u8]) -> Result<u16, RmiError> {
        let desc = self.cached_descriptor()?;
        let length = out.len();
        debug_assert!(length <= u16::MAX as usize);

        let req_len = report::read_request_len(&desc);
        ensure_capacity(&mut self.scratch.write, req_len)?;
        report::build_read_request(&mut self.scratch.write[..req_len], &desc, addr, length as u16);
        self.transfer_write(req_len)?;

        // The device needs time to produce the report; a mismatched byte
        // count means it is not ready yet, not that the bus failed
        let resp_len = length + report::RESPONSE_HEADER_LEN;
        for _ in 0..RETRY_LIMIT {
            self.transfer_read(resp_len)?;
            let declared = report::response_report_len(&self.scratch.read);
            if declared == desc.input_report_max_length {
                out.copy_from_slice(&self.scratch.read[report::RESPONSE_HEADER_LEN..resp_len]);
                return Ok(length as u16);
            }
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "stale read report: byte count {=u16}, expected {=u16}",
                declared,
                desc.input_report_max_length
            );
            self.delay.delay_ms(RETRY_DELAY_MS);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("failed to receive read report");
        Err(RmiError::Exhausted)
    }

    fn try_write(&mut self, addr: u16, data: &[u8]) -> Result<u16, RmiError> {
        let desc = self.cached_descriptor()?;
        debug_assert!(data.len() <= u16::MAX as usize);

        let frame_len = report::write_frame_len(&desc, data.len());
        ensure_capacity(&mut self.scratch.write, frame_len)?;
        report::build_write_frame(&mut self.scratch.write[..frame_len], &desc, addr, data);
        self.transfer_write(frame_len)?;
        Ok(data.len() as u16)
    }

    /// Bounded poll of the attention line after reset; low means ready
    fn wait_for_reset(&mut self) -> Result<(), RmiError> {
        let mut waited_ms = 0;
        while self.attn.is_high() {
            if waited_ms >= RESET_TIMEOUT_MS {
                #[cfg(feature = "defmt")]
                defmt::warn!("device never signalled ready after reset");
                return Err(RmiError::Timeout);
            }
            self.delay.delay_ms(RETRY_DELAY_MS);
            waited_ms += RETRY_DELAY_MS;
        }
        Ok(())
    }

    /// Copy a fixed frame into the write scratch buffer and send it
    fn send(&mut self, frame: &[u8]) -> Result<(), RmiError> {
        ensure_capacity(&mut self.scratch.write, frame.len())?;
        self.scratch.write[..frame.len()].copy_from_slice(frame);
        self.transfer_write(frame.len())
    }

    /// One outbound bus transaction from the write scratch buffer,
    /// retried on transfer failure
    fn transfer_write(&mut self, len: usize) -> Result<(), RmiError> {
        for _attempt in 1..=RETRY_LIMIT {
            match self
                .bus
                .write(self.config.bus_address, &self.scratch.write[..len])
            {
                Ok(()) => return Ok(()),
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("i2c write retry {=u8}", _attempt);
                    self.delay.delay_ms(RETRY_DELAY_MS);
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("i2c write over retry limit");
        Err(RmiError::TransferFailed)
    }

    /// One inbound bus transaction into the read scratch buffer,
    /// retried on transfer failure
    fn transfer_read(&mut self, len: usize) -> Result<(), RmiError> {
        ensure_capacity(&mut self.scratch.read, len)?;
        for _attempt in 1..=RETRY_LIMIT {
            match self
                .bus
                .read(self.config.bus_address, &mut self.scratch.read[..len])
            {
                Ok(()) => return Ok(()),
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("i2c read retry {=u8}", _attempt);
                    self.delay.delay_ms(RETRY_DELAY_MS);
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("i2c read over retry limit");
        Err(RmiError::TransferFailed)
    }
}

impl<I2C, PIN, D> RmiBus for RmiHidDevice<I2C, PIN, D>
where
    I2C: I2cBus,
    PIN: InputPin,
    D: DelayNs,
{
    fn read(&mut self, addr: u16, out: &mut [u8]) -> Result<u16, RmiError> {
        RmiHidDevice::read(self, addr, out)
    }

    fn write(&mut self, addr: u16, data: &[u8]) -> Result<u16, RmiError> {
        RmiHidDevice::write(self, addr, data)
    }

    fn init_ui(&mut self) -> Result<(), RmiError> {
        RmiHidDevice::init_ui(self)
    }

    fn init_bootloader_mode(&mut self) -> Result<(), RmiError> {
        RmiHidDevice::init_bootloader_mode(self)
    }
}
