//! RMI register access trait

/// Errors that can escape a bridge operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RmiError {
    /// A bus transfer kept failing after the per-transfer retry bound
    TransferFailed,
    /// The device never produced a matching read report within the
    /// validation retry bound
    Exhausted,
    /// Recovery was already attempted once for this call and the
    /// operation still failed; the link is considered down
    LinkDown,
    /// The device never signalled ready after reset
    Timeout,
    /// Scratch buffer growth failed
    OutOfMemory,
}

/// Register-level access to the sensor's RMI address space
///
/// This is the boundary the input/event pipeline consumes. `read` and
/// `write` move raw register bytes; the two init entry points re-arm the
/// link. Implementations are expected to recover a wedged link on their
/// own - callers only ever see [`RmiError::LinkDown`] once recovery has
/// been tried and failed.
pub trait RmiBus {
    /// Read `out.len()` bytes of register space starting at `addr`
    ///
    /// Returns the number of bytes read (always `out.len()` on success).
    fn read(&mut self, addr: u16, out: &mut [u8]) -> Result<u16, RmiError>;

    /// Write `data.len()` bytes of register space starting at `addr`
    ///
    /// Returns the number of bytes written (always `data.len()` on success).
    fn write(&mut self, addr: u16, data: &[u8]) -> Result<u16, RmiError>;

    /// Run the full boot handshake; called once at attach
    fn init_ui(&mut self) -> Result<(), RmiError>;

    /// Switch the device into register-addressable mode without the rest
    /// of the boot sequence (bootloader-adjacent contexts)
    fn init_bootloader_mode(&mut self) -> Result<(), RmiError>;
}
