/// Byte-addressable device seen through a 16-bit address space.
///
/// The processor only talks to the outside world through this trait, and
/// every console device (TIA, RIOT, cartridge) implements it so the address
/// decoder can forward accesses without knowing what sits behind them.
pub trait Memory {
    /// Read a byte from the specified `address`.
    ///
    /// Reads take `&self` but some devices have read side effects (e.g. the
    /// RIOT clears its timer flag); those use interior mutability.
    fn read(&self, address: u16) -> u8;

    /// Write a byte of `data` to the specified `address`
    fn write(&mut self, address: u16, data: u8);
}
