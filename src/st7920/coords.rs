//! Logical-to-native coordinate mapping
//!
//! The 128x64 module wires the controller's 256x32 matrix as two stacked
//! halves: logical rows 32..63 live at the same native line index as rows
//! 0..31, with the page (or wide-character) index offset by the logical width.
//! Every conversion here applies that fold and nothing else; all functions are
//! pure and return `None` for coordinates outside the logical geometry.

use crate::st7920::{
    HEIGHT, NATIVE_HEIGHT, NATIVE_TEXT_LINES, NATIVE_WIDTH_PAGES, N_CHARS, N_LINES, N_WCHARS,
    PAGE_WIDTH, WIDTH, WIDTH_PAGES,
};

/// Native address of one pixel: its page cell plus the bit inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelAddress {
    /// Index into the shadow page buffer
    pub buffer_index: usize,
    /// Native page index, as sent to the controller
    pub page_index: usize,
    /// Native line index, as sent to the controller
    pub line_index: usize,
    /// Bit position inside the 16-bit page cell
    pub bit_offset: u32,
}

/// Native address of one page cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAddress {
    /// Index into the shadow page buffer
    pub buffer_index: usize,
    /// Native page index, as sent to the controller
    pub page_index: usize,
    /// Native line index, as sent to the controller
    pub line_index: usize,
}

/// Native address of one text cell, in wide-character units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAddress {
    /// Native wide-character column
    pub column: usize,
    /// Native text row (0 or 1)
    pub row: usize,
    /// Logical column was odd: a space must be written right after
    /// positioning, since the controller cannot address the second half of a
    /// wide cell on its own
    pub pad_space: bool,
}

/// Native address of one wide-character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideTextAddress {
    /// Native wide-character column
    pub column: usize,
    /// Native text row (0 or 1)
    pub row: usize,
}

/// Maps a logical pixel to its page cell and bit.
///
/// Bit order inside a page is reversed: the leftmost pixel of the page is the
/// most significant bit, so bit `15 - (cx % 16)` carries pixel `cx % 16`.
pub fn pixel_address(cx: usize, cy: usize) -> Option<PixelAddress> {
    if cx >= WIDTH || cy >= HEIGHT {
        return None;
    }

    let mut page_index = cx / PAGE_WIDTH;
    let bit_offset = (PAGE_WIDTH - 1 - cx % PAGE_WIDTH) as u32;

    let mut line_index = cy;
    if line_index >= NATIVE_HEIGHT {
        line_index -= NATIVE_HEIGHT;
        page_index += WIDTH_PAGES;
    }

    Some(PixelAddress {
        buffer_index: NATIVE_WIDTH_PAGES * line_index + page_index,
        page_index,
        line_index,
        bit_offset,
    })
}

/// Maps logical page coordinates to the native page cell.
pub fn page_address(page_index: usize, cy: usize) -> Option<PageAddress> {
    if page_index >= WIDTH_PAGES || cy >= HEIGHT {
        return None;
    }

    let mut page_index = page_index;
    let mut line_index = cy;
    if line_index >= NATIVE_HEIGHT {
        line_index -= NATIVE_HEIGHT;
        page_index += WIDTH_PAGES;
    }

    Some(PageAddress {
        buffer_index: NATIVE_WIDTH_PAGES * line_index + page_index,
        page_index,
        line_index,
    })
}

/// Maps logical 8-bit text coordinates to the native wide-character grid.
///
/// Two logical columns share one wide cell; an odd logical column lands on
/// the second byte of the cell and is flagged for space padding.
pub fn text_address(cx: usize, cy: usize) -> Option<TextAddress> {
    if cx >= N_CHARS || cy >= N_LINES {
        return None;
    }

    let pad_space = cx & 0x1 != 0;
    let mut column = cx >> 1;

    let mut row = cy;
    if row >= NATIVE_TEXT_LINES {
        row -= NATIVE_TEXT_LINES;
        column += N_WCHARS;
    }

    Some(TextAddress {
        column,
        row,
        pad_space,
    })
}

/// Maps logical wide-character coordinates to the native grid.
pub fn wide_text_address(cx: usize, cy: usize) -> Option<WideTextAddress> {
    if cx >= N_WCHARS || cy >= N_LINES {
        return None;
    }

    let mut column = cx;
    let mut row = cy;
    if row >= NATIVE_TEXT_LINES {
        row -= NATIVE_TEXT_LINES;
        column += N_WCHARS;
    }

    Some(WideTextAddress { column, row })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_top_half_maps_straight_through() {
        let addr = pixel_address(0, 0).unwrap();
        assert_eq!(addr.buffer_index, 0);
        assert_eq!(addr.page_index, 0);
        assert_eq!(addr.line_index, 0);
        assert_eq!(addr.bit_offset, 15);

        let addr = pixel_address(127, 31).unwrap();
        assert_eq!(addr.page_index, 7);
        assert_eq!(addr.line_index, 31);
        assert_eq!(addr.bit_offset, 0);
    }

    #[test]
    fn pixel_bottom_half_folds_into_page_offset() {
        // First pixel of the bottom half: native page 8, native line 0.
        let addr = pixel_address(0, 32).unwrap();
        assert_eq!(addr.page_index, WIDTH_PAGES);
        assert_eq!(addr.line_index, 0);
        assert_eq!(addr.buffer_index, 8);

        let addr = pixel_address(127, 63).unwrap();
        assert_eq!(addr.page_index, 15);
        assert_eq!(addr.line_index, 31);
        assert_eq!(addr.buffer_index, 31 * NATIVE_WIDTH_PAGES + 15);
    }

    #[test]
    fn pixel_bit_order_is_msb_leftmost() {
        for cx in 0..PAGE_WIDTH {
            let addr = pixel_address(cx, 0).unwrap();
            assert_eq!(addr.bit_offset, 15 - cx as u32);
        }
    }

    #[test]
    fn pixel_rejects_out_of_range() {
        assert_eq!(pixel_address(WIDTH, 0), None);
        assert_eq!(pixel_address(0, HEIGHT), None);
        assert_eq!(pixel_address(usize::MAX, usize::MAX), None);
    }

    #[test]
    fn page_fold_matches_pixel_fold() {
        for cy in 0..HEIGHT {
            for page in 0..WIDTH_PAGES {
                let from_page = page_address(page, cy).unwrap();
                let from_pixel = pixel_address(page * PAGE_WIDTH, cy).unwrap();
                assert_eq!(from_page.buffer_index, from_pixel.buffer_index);
                assert_eq!(from_page.page_index, from_pixel.page_index);
                assert_eq!(from_page.line_index, from_pixel.line_index);
            }
        }
    }

    #[test]
    fn page_rejects_out_of_range() {
        assert_eq!(page_address(WIDTH_PAGES, 0), None);
        assert_eq!(page_address(0, HEIGHT), None);
    }

    #[test]
    fn text_even_and_odd_columns_share_a_wide_cell() {
        let even = text_address(0, 0).unwrap();
        assert_eq!(even.column, 0);
        assert_eq!(even.row, 0);
        assert!(!even.pad_space);

        let odd = text_address(1, 0).unwrap();
        assert_eq!(odd.column, 0);
        assert!(odd.pad_space);
    }

    #[test]
    fn text_bottom_rows_fold_into_column_offset() {
        let addr = text_address(0, NATIVE_TEXT_LINES).unwrap();
        assert_eq!(addr.row, 0);
        assert_eq!(addr.column, N_WCHARS);

        let addr = text_address(N_CHARS - 1, N_LINES - 1).unwrap();
        assert_eq!(addr.row, NATIVE_TEXT_LINES - 1);
        assert_eq!(addr.column, 2 * N_WCHARS - 1);
        assert!(addr.pad_space);
    }

    #[test]
    fn text_rejects_out_of_range() {
        assert_eq!(text_address(N_CHARS, 0), None);
        assert_eq!(text_address(0, N_LINES), None);
    }

    #[test]
    fn wide_text_fold() {
        let addr = wide_text_address(0, 0).unwrap();
        assert_eq!((addr.column, addr.row), (0, 0));

        let addr = wide_text_address(3, 2).unwrap();
        assert_eq!((addr.column, addr.row), (3 + N_WCHARS, 0));

        assert_eq!(wide_text_address(N_WCHARS, 0), None);
        assert_eq!(wide_text_address(0, N_LINES), None);
    }
}
