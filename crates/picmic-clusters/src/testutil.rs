//! Synthetic address table addressed directly by normalized strip index.
//!
//! Row 0 holds Y strips, row 1 B strips, row 2 R strips and row 3 dummy
//! cells. The column of a line hit is its table strip number minus the
//! orientation's first strip, so `hit(o, v)` fires normalized index `v`.

use picmic_core::{Hit, LineLabel, LookupTable, Orientation};

pub(crate) const COLS: usize = 900;

pub(crate) fn table() -> LookupTable {
    let mut table = LookupTable::new(4, COLS);
    for col in 0..COLS {
        let strip = col as i32;
        table
            .set(
                Hit::new(0, col),
                LineLabel::Line {
                    orientation: Orientation::Y,
                    strip: strip + 1,
                },
            )
            .unwrap();
        table
            .set(
                Hit::new(1, col),
                LineLabel::Line {
                    orientation: Orientation::B,
                    strip: strip + 2,
                },
            )
            .unwrap();
        table
            .set(
                Hit::new(2, col),
                LineLabel::Line {
                    orientation: Orientation::R,
                    strip,
                },
            )
            .unwrap();
        table
            .set(Hit::new(3, col), LineLabel::Dummy { id: strip })
            .unwrap();
    }
    table
}

/// Hit firing normalized index `v` of orientation `o`.
pub(crate) fn hit(o: Orientation, v: i32) -> Hit {
    match o {
        Orientation::Y => Hit::new(0, v as usize),
        Orientation::B => Hit::new(1, v as usize),
        Orientation::R => Hit::new(2, (v + 427) as usize),
    }
}

pub(crate) fn dummy(col: usize) -> Hit {
    Hit::new(3, col)
}
