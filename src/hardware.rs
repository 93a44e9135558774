//! Atari VCS hardware constants

// Clocks
// ------

/// NTSC TIA color clock, the master clock of the console (dots per second)
pub const TIA_CLOCK_RATE: u32 = 3_579_545;
pub const FRAME_RATE: u32 = 60;
/// Dot clock ticks that make up one host frame
pub const TICKS_PER_FRAME: u32 = TIA_CLOCK_RATE / FRAME_RATE;
/// The 6507 runs at a third of the TIA clock
pub const CPU_CLOCK_DIVIDER: u32 = 3;

// Processor
// ---------

pub const STACK_PAGE: u16 = 0x0100;
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

// Address space
// -------------
//
// The 6507 only has 13 address lines, the rest of the 16-bit address is
// ignored by every device on the console.

pub const ADDRESS_MASK: u16 = 0x1FFF;

pub const RAM_SELECT_MASK: u16 = 0x1280;
pub const RAM_SELECT: u16 = 0x0080;
pub const RAM_SIZE: usize = 128;
pub const RAM_ADDRESS_MASK: u16 = 0x007F;

pub const RIOT_SELECT_MASK: u16 = 0x1280;
pub const RIOT_SELECT: u16 = 0x0280;

pub const TIA_INPUT_SELECT_MASK: u16 = 0x1088;
pub const TIA_INPUT_SELECT: u16 = 0x0008;

pub const TIA_SELECT_MASK: u16 = 0x1080;
pub const TIA_SELECT: u16 = 0x0000;
pub const TIA_READ_MASK: u16 = 0x0007;
pub const TIA_WRITE_MASK: u16 = 0x003F;

pub const CARTRIDGE_ADDRESS_MASK: u16 = 0x0FFF;
pub const CARTRIDGE_WINDOW_SIZE: usize = 0x1000;

// TIA write registers
// -------------------

pub const VSYNC: u16 = 0x00;
pub const VBLANK: u16 = 0x01;
pub const WSYNC: u16 = 0x02;
pub const RSYNC: u16 = 0x03;
pub const NUSIZ0: u16 = 0x04;
pub const NUSIZ1: u16 = 0x05;
pub const COLUP0: u16 = 0x06;
pub const COLUP1: u16 = 0x07;
pub const COLUPF: u16 = 0x08;
pub const COLUBK: u16 = 0x09;
pub const CTRLPF: u16 = 0x0A;
pub const REFP0: u16 = 0x0B;
pub const REFP1: u16 = 0x0C;
pub const PF0: u16 = 0x0D;
pub const PF1: u16 = 0x0E;
pub const PF2: u16 = 0x0F;
pub const RESP0: u16 = 0x10;
pub const RESP1: u16 = 0x11;
pub const RESM0: u16 = 0x12;
pub const RESM1: u16 = 0x13;
pub const RESBL: u16 = 0x14;
pub const AUDC0: u16 = 0x15;
pub const AUDC1: u16 = 0x16;
pub const AUDF0: u16 = 0x17;
pub const AUDF1: u16 = 0x18;
pub const AUDV0: u16 = 0x19;
pub const AUDV1: u16 = 0x1A;
pub const GRP0: u16 = 0x1B;
pub const GRP1: u16 = 0x1C;
pub const ENAM0: u16 = 0x1D;
pub const ENAM1: u16 = 0x1E;
pub const ENABL: u16 = 0x1F;
pub const HMP0: u16 = 0x20;
pub const HMP1: u16 = 0x21;
pub const HMM0: u16 = 0x22;
pub const HMM1: u16 = 0x23;
pub const HMBL: u16 = 0x24;
pub const VDELP0: u16 = 0x25;
pub const VDELP1: u16 = 0x26;
pub const VDELBL: u16 = 0x27;
pub const RESMP0: u16 = 0x28;
pub const RESMP1: u16 = 0x29;
pub const HMOVE: u16 = 0x2A;
pub const HMCLR: u16 = 0x2B;
pub const CXCLR: u16 = 0x2C;

// TIA read registers
// ------------------

pub const CXM0P: u16 = 0x00;
pub const CXM1P: u16 = 0x01;
pub const CXP0FB: u16 = 0x02;
pub const CXP1FB: u16 = 0x03;
pub const CXM0FB: u16 = 0x04;
pub const CXM1FB: u16 = 0x05;
pub const CXBLPF: u16 = 0x06;
pub const CXPPMM: u16 = 0x07;
pub const INPT4: u16 = 0x0C;
pub const INPT5: u16 = 0x0D;

// RIOT registers (relative to the RIOT select)
// --------------------------------------------

pub const SWCHA: u16 = 0x00;
pub const SWACNT: u16 = 0x01;
pub const SWCHB: u16 = 0x02;
pub const SWBCNT: u16 = 0x03;
pub const INTIM: u16 = 0x04;
pub const TIMINT: u16 = 0x05;
pub const TIM1T: u16 = 0x14;
pub const TIM8T: u16 = 0x15;
pub const TIM64T: u16 = 0x16;
pub const T1024T: u16 = 0x17;

/// Timer writes have both of these address bits set
pub const RIOT_TIMER_SELECT: u16 = 0x14;
/// Selects RAM (clear) or I/O and timer (set) inside the RIOT
pub const RIOT_IO_SELECT: u16 = 0x0200;

// Screen
// ------

/// Dot clocks in a scanline, horizontal blank included
pub const SCANLINE_TICKS: u16 = 228;
pub const HORIZONTAL_BLANK_TICKS: u16 = 68;
pub const SCREEN_WIDTH: usize = 160;
pub const TOTAL_SCANLINES: u16 = 262;
pub const SCREEN_HEIGHT: usize = TOTAL_SCANLINES as usize;
