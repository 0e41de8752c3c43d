//! Run-length codec for row-major tile streams
//!
//! The stream is a sequence of tokens:
//! - **Literal**: one byte with the top bit clear, one cell.
//! - **Run**: a byte with the top bit set followed by a count byte. The low
//!   seven bits are the tile, the count is `1..=255`, and `0` stands for 256.
//!
//! The encoder appends a single [`TERMINATOR`] after the last token. The
//! decoder stops as soon as every cell is filled and never looks at it.

use crate::{GridError, Result, TilePos};

/// Top bit marking a run token
pub const RUN_FLAG: u8 = 0x80;
/// Mask extracting the tile value from a run token
pub const TILE_MASK: u8 = 0x7F;
/// Largest tile value that can be encoded
pub const MAX_TILE: u8 = 0x7F;
/// Longest run a single run token can describe
pub const MAX_RUN: usize = 256;
/// End marker appended by the encoder
pub const TERMINATOR: u8 = 0xFF;

/// Decode tokens from `data` until `cells` is full.
///
/// Returns the number of bytes consumed. Bytes after the last needed token
/// (including any terminator) are left untouched.
pub fn decode_into(data: &[u8], cells: &mut [u8]) -> Result<usize> {
    let expected = cells.len();
    let mut offset = 0;
    let mut filled = 0;

    while filled < expected {
        let Some(&token) = data.get(offset) else {
            return Err(unexpected_eof(data, filled, expected));
        };

        if token & RUN_FLAG == 0 {
            cells[filled] = token;
            filled += 1;
            offset += 1;
            continue;
        }

        let Some(&count_byte) = data.get(offset + 1) else {
            return Err(unexpected_eof(data, filled, expected));
        };
        let count = run_length(count_byte);
        let remaining = expected - filled;
        if count > remaining {
            return Err(GridError::RunOverflow {
                offset,
                count,
                remaining,
            });
        }

        cells[filled..filled + count].fill(token & TILE_MASK);
        filled += count;
        offset += 2;
    }

    Ok(offset)
}

/// Encode row-major `cells` of a grid `width` cells wide.
///
/// Any cell above [`MAX_TILE`] is rejected, since it would collide with the
/// run flag.
pub fn encode(cells: &[u8], width: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(cells.len() / 2 + 1);
    let mut index = 0;

    while index < cells.len() {
        let value = cells[index];
        if value > MAX_TILE {
            return Err(GridError::TileOutOfRange {
                pos: TilePos::new(index % width, index / width),
                value,
            });
        }

        let run = cells[index..]
            .iter()
            .take(MAX_RUN)
            .take_while(|&&cell| cell == value)
            .count();

        if run > 1 {
            out.push(value | RUN_FLAG);
            out.push(count_byte(run));
        } else {
            out.push(value);
        }
        index += run;
    }

    out.push(TERMINATOR);
    Ok(out)
}

/// Count byte to run length, `0` meaning [`MAX_RUN`]
pub const fn run_length(count_byte: u8) -> usize {
    if count_byte == 0 {
        MAX_RUN
    } else {
        count_byte as usize
    }
}

/// Run length (`1..=256`) to count byte
pub const fn count_byte(run: usize) -> u8 {
    if run == MAX_RUN {
        0
    } else {
        run as u8
    }
}

fn unexpected_eof(data: &[u8], cells: usize, expected: usize) -> GridError {
    GridError::UnexpectedEof {
        offset: data.len(),
        cells,
        expected,
    }
}
