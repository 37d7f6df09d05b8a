//! Register access seam.
//!
//! Every driver in this crate is generic over [`RegisterIo`] and holds its
//! own clone of the bus handle. On the target the handle is [`MmioBus`],
//! which performs volatile 32-bit accesses at physical addresses. On the
//! host, `adapters::sim_bus::SimBus` backs the same trait with an in-memory
//! register file.

/// 32-bit register read/write at an absolute byte address.
pub trait RegisterIo: Clone {
    fn read32(&self, addr: u32) -> u32;
    fn write32(&self, addr: u32, value: u32);
}

/// Volatile access to the processor's physical address map.
#[derive(Debug, Clone, Copy)]
pub struct MmioBus {
    _private: (),
}

impl MmioBus {
    /// # Safety
    ///
    /// Every address later passed to [`RegisterIo`] must be a mapped,
    /// 4-byte-aligned device register of the running FPGA image, and no
    /// other code may hold a conflicting view of those registers.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterIo for MmioBus {
    fn read32(&self, addr: u32) -> u32 {
        // SAFETY: validity of `addr` is the contract of `MmioBus::new`.
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }

    fn write32(&self, addr: u32, value: u32) {
        // SAFETY: validity of `addr` is the contract of `MmioBus::new`.
        unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}
