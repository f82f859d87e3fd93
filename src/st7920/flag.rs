/// Function Set (0x2X) bit flags for the ST7920 controller.
///
/// The instruction-mode byte is composed from these: `0x30` selects the basic
/// instruction set over the 8-bit interface, `0x34` the extended set, `0x36`
/// the extended set with the graphic display engine running.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Function Set (0x20) bits
    pub const FUNCTION_SET_BASE: u8 = 0x20;
    pub const DATA_LENGTH_8BIT: u8 = 0x10; // DL=1, full 8-bit bus
    pub const EXTENDED_INSTRUCTION: u8 = 0x04; // RE=1, extended instruction set
    pub const GRAPHIC_DISPLAY_ON: u8 = 0x02; // G=1, valid only while RE=1

    // Composed instruction-mode bytes
    pub const BASIC_INSTRUCTION: u8 = Self::FUNCTION_SET_BASE | Self::DATA_LENGTH_8BIT;
    pub const EXT_INSTRUCTION: u8 = Self::BASIC_INSTRUCTION | Self::EXTENDED_INSTRUCTION;
}
