use crate::graphics::Pixel;

/// NTSC palette. Rows are hues, columns are the eight luminances of a hue
const NTSC_PALETTE: [Pixel; 128] = [
    // hue 0
    Pixel::from_hex(0x000000), Pixel::from_hex(0x404040), Pixel::from_hex(0x6C6C6C), Pixel::from_hex(0x909090),
    Pixel::from_hex(0xB0B0B0), Pixel::from_hex(0xC8C8C8), Pixel::from_hex(0xDCDCDC), Pixel::from_hex(0xECECEC),
    // hue 1
    Pixel::from_hex(0x444400), Pixel::from_hex(0x646410), Pixel::from_hex(0x848424), Pixel::from_hex(0xA0A034),
    Pixel::from_hex(0xB8B840), Pixel::from_hex(0xD0D050), Pixel::from_hex(0xE8E85C), Pixel::from_hex(0xFCFC68),
    // hue 2
    Pixel::from_hex(0x702800), Pixel::from_hex(0x844414), Pixel::from_hex(0x985C28), Pixel::from_hex(0xAC783C),
    Pixel::from_hex(0xBC8C4C), Pixel::from_hex(0xCCA05C), Pixel::from_hex(0xDCB468), Pixel::from_hex(0xECC878),
    // hue 3
    Pixel::from_hex(0x841800), Pixel::from_hex(0x983418), Pixel::from_hex(0xAC5030), Pixel::from_hex(0xC06848),
    Pixel::from_hex(0xD0805C), Pixel::from_hex(0xE09470), Pixel::from_hex(0xECA880), Pixel::from_hex(0xFCBC94),
    // hue 4
    Pixel::from_hex(0x880000), Pixel::from_hex(0x9C2020), Pixel::from_hex(0xB03C3C), Pixel::from_hex(0xC05858),
    Pixel::from_hex(0xD07070), Pixel::from_hex(0xE08888), Pixel::from_hex(0xECA0A0), Pixel::from_hex(0xFCB4B4),
    // hue 5
    Pixel::from_hex(0x78005C), Pixel::from_hex(0x8C2074), Pixel::from_hex(0xA03C88), Pixel::from_hex(0xB0589C),
    Pixel::from_hex(0xC070B0), Pixel::from_hex(0xD084C0), Pixel::from_hex(0xDC9CD0), Pixel::from_hex(0xECB0E0),
    // hue 6
    Pixel::from_hex(0x480078), Pixel::from_hex(0x602090), Pixel::from_hex(0x783CA4), Pixel::from_hex(0x8C58B8),
    Pixel::from_hex(0xA070CC), Pixel::from_hex(0xB484DC), Pixel::from_hex(0xC49CEC), Pixel::from_hex(0xD4B0FC),
    // hue 7
    Pixel::from_hex(0x140084), Pixel::from_hex(0x302098), Pixel::from_hex(0x4C3CAC), Pixel::from_hex(0x6858C0),
    Pixel::from_hex(0x7C70D0), Pixel::from_hex(0x9488E0), Pixel::from_hex(0xA8A0EC), Pixel::from_hex(0xBCB4FC),
    // hue 8
    Pixel::from_hex(0x000088), Pixel::from_hex(0x1C209C), Pixel::from_hex(0x3840B0), Pixel::from_hex(0x505CC0),
    Pixel::from_hex(0x6874D0), Pixel::from_hex(0x7C8CE0), Pixel::from_hex(0x90A4EC), Pixel::from_hex(0xA4B8FC),
    // hue 9
    Pixel::from_hex(0x00187C), Pixel::from_hex(0x1C3890), Pixel::from_hex(0x3854A8), Pixel::from_hex(0x5070BC),
    Pixel::from_hex(0x6888CC), Pixel::from_hex(0x7C9CDC), Pixel::from_hex(0x90B4EC), Pixel::from_hex(0xA4C8FC),
    // hue 10
    Pixel::from_hex(0x002C5C), Pixel::from_hex(0x1C4C78), Pixel::from_hex(0x386890), Pixel::from_hex(0x5084AC),
    Pixel::from_hex(0x689CC0), Pixel::from_hex(0x7CB4D4), Pixel::from_hex(0x90CCE8), Pixel::from_hex(0xA4E0FC),
    // hue 11
    Pixel::from_hex(0x003C2C), Pixel::from_hex(0x1C5C48), Pixel::from_hex(0x387C64), Pixel::from_hex(0x509C80),
    Pixel::from_hex(0x68B494), Pixel::from_hex(0x7CD0AC), Pixel::from_hex(0x90E4C0), Pixel::from_hex(0xA4FCD4),
    // hue 12
    Pixel::from_hex(0x003C00), Pixel::from_hex(0x205C20), Pixel::from_hex(0x407C40), Pixel::from_hex(0x5C9C5C),
    Pixel::from_hex(0x74B474), Pixel::from_hex(0x8CD08C), Pixel::from_hex(0xA4E4A4), Pixel::from_hex(0xB8FCB8),
    // hue 13
    Pixel::from_hex(0x143800), Pixel::from_hex(0x345C1C), Pixel::from_hex(0x507C38), Pixel::from_hex(0x6C9850),
    Pixel::from_hex(0x84B468), Pixel::from_hex(0x9CCC7C), Pixel::from_hex(0xB4E490), Pixel::from_hex(0xC8FCA4),
    // hue 14
    Pixel::from_hex(0x2C3000), Pixel::from_hex(0x4C501C), Pixel::from_hex(0x687034), Pixel::from_hex(0x848C4C),
    Pixel::from_hex(0x9CA864), Pixel::from_hex(0xB4C078), Pixel::from_hex(0xCCD488), Pixel::from_hex(0xE0EC9C),
    // hue 15
    Pixel::from_hex(0x442800), Pixel::from_hex(0x644818), Pixel::from_hex(0x846830), Pixel::from_hex(0xA08444),
    Pixel::from_hex(0xB89C58), Pixel::from_hex(0xD0B46C), Pixel::from_hex(0xE8CC7C), Pixel::from_hex(0xFCE08C),
];

impl From<u8> for Pixel {
    /// Convert a color register value to its RGB representation. Bit 0 of
    /// the register is not wired, the remaining seven bits pick one of the
    /// 128 NTSC colors
    fn from(color: u8) -> Self {
        NTSC_PALETTE[(color >> 1) as usize]
    }
}
