pub struct Cmd;
impl Cmd {
    // Basic instruction set
    pub const CLEAR_SCREEN: u8 = 0x01;
    pub const CURSOR_HOME: u8 = 0x02;
    pub const DISPLAY_OFF: u8 = 0x08;
    pub const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
    pub const DISPLAY_ON_CURSOR_ON: u8 = 0x0E;
    pub const DISPLAY_ON_CURSOR_BLINK: u8 = 0x0F;
    pub const MOVE_CURSOR_RIGHT: u8 = 0x14;

    // DDRAM addressing. The two-row text matrix has two base addresses; the
    // controller has no column-jump instruction, columns are reached with
    // MOVE_CURSOR_RIGHT one step at a time.
    pub const SET_DDRAM_TOP_ROW: u8 = 0x80;
    pub const SET_DDRAM_BOTTOM_ROW: u8 = 0x90;

    // Extended instruction set
    pub const SET_GRAPHIC_ADDRESS: u8 = 0x80;
}

/*
ST7920 datasheet, table 7 (basic) and table 8 (extended):
0x01 - Display Clear
0x02 - Return Home
0x08/0x0C/0x0E/0x0F - Display Control (D, C, B bits)
0x14 - Cursor/Display Shift (cursor right)
0x30/0x34/0x36 - Function Set (see flag.rs for the bit layout)
0x80 - Set DDRAM Address (basic) / Set GDRAM Address (extended)
*/
