//! Line-packet encoding of the fired strips of an event.
//!
//! Each orientation's strips are written as packets: a header word
//! `(data_words << 12) | (color << 10) | start` followed by up to
//! [`MAX_DATA_WORDS`] bitmap words. Bit `15 - i` of data word `k` marks
//! strip `start + 1 + 16k + i`. Strips are the normalized line indices
//! shifted into `0..STRIP_COUNT` (R lines by +427).

use picmic_core::{EventLines, Orientation};
use serde::Serialize;

/// Strips per orientation in packet numbering.
pub const STRIP_COUNT: usize = 852;
/// Data words a single packet can carry.
pub const MAX_DATA_WORDS: usize = 15;

const WORD_BITS: usize = 16;
/// Packets are written in this orientation order.
const PACKET_ORDER: [Orientation; 3] = [Orientation::B, Orientation::Y, Orientation::R];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("packet header {header:#06x} at word {index} has invalid color bits")]
    InvalidColor { index: usize, header: u16 },
    #[error("packet at word {index} announces {expected} data words, only {available} left")]
    Truncated {
        index: usize,
        expected: usize,
        available: usize,
    },
    #[error("{orientation} strip {strip} is outside 0..{STRIP_COUNT}")]
    StripOutOfRange { orientation: Orientation, strip: i32 },
}

/// Lines recovered from a packet stream, sorted and duplicate-free.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DecodedLines {
    pub ylines: Vec<i32>,
    pub blines: Vec<i32>,
    pub rlines: Vec<i32>,
}

impl DecodedLines {
    pub fn get(&self, o: Orientation) -> &[i32] {
        match o {
            Orientation::Y => &self.ylines,
            Orientation::B => &self.blines,
            Orientation::R => &self.rlines,
        }
    }

    fn get_mut(&mut self, o: Orientation) -> &mut Vec<i32> {
        match o {
            Orientation::Y => &mut self.ylines,
            Orientation::B => &mut self.blines,
            Orientation::R => &mut self.rlines,
        }
    }
}

fn color(o: Orientation) -> u16 {
    match o {
        Orientation::Y => 0b00,
        Orientation::R => 0b01,
        Orientation::B => 0b10,
    }
}

fn orientation_of(color: u16) -> Option<Orientation> {
    match color {
        0b00 => Some(Orientation::Y),
        0b01 => Some(Orientation::R),
        0b10 => Some(Orientation::B),
        _ => None,
    }
}

fn base(o: Orientation) -> i32 {
    match o {
        Orientation::R => 427,
        Orientation::Y | Orientation::B => 0,
    }
}

/// Encode the lines of an event as B, Y then R packets.
///
/// Repeated lines collapse into one strip. Fails if a line falls outside
/// the sensor.
pub fn encode_lines(lines: &EventLines) -> Result<Vec<u16>, PacketError> {
    let mut words = Vec::new();
    for o in PACKET_ORDER {
        let states = strip_states(o, lines.get(o))?;
        pack(o, &states, &mut words);
    }
    Ok(words)
}

fn strip_states(o: Orientation, lines: &[i32]) -> Result<[bool; STRIP_COUNT], PacketError> {
    let mut states = [false; STRIP_COUNT];
    for &v in lines {
        let strip = v + base(o);
        let slot = usize::try_from(strip)
            .ok()
            .and_then(|s| states.get_mut(s))
            .ok_or(PacketError::StripOutOfRange {
                orientation: o,
                strip,
            })?;
        *slot = true;
    }
    Ok(states)
}

fn pack(o: Orientation, states: &[bool; STRIP_COUNT], out: &mut Vec<u16>) {
    let mut i = 0;
    while i < STRIP_COUNT {
        if !states[i] {
            i += 1;
            continue;
        }
        let header_at = out.len();
        out.push(0);
        let start = i;
        i += 1;
        let mut data_words = 0;
        while data_words < MAX_DATA_WORDS {
            let chunk = &states[i.min(STRIP_COUNT)..(i + WORD_BITS).min(STRIP_COUNT)];
            if !chunk.contains(&true) {
                break;
            }
            let word = chunk
                .iter()
                .enumerate()
                .filter(|&(_, &set)| set)
                .fold(0u16, |w, (bit, _)| w | (1 << (WORD_BITS - 1 - bit)));
            out.push(word);
            data_words += 1;
            i += WORD_BITS;
        }
        out[header_at] = ((data_words as u16) << 12) | (color(o) << 10) | start as u16;
    }
}

/// Decode a packet stream back into normalized lines.
pub fn decode_lines(words: &[u16]) -> Result<DecodedLines, PacketError> {
    let mut decoded = DecodedLines::default();
    let mut index = 0;
    while let Some(&header) = words.get(index) {
        let o = orientation_of((header >> 10) & 0b11)
            .ok_or(PacketError::InvalidColor { index, header })?;
        let start = i32::from(header & 0x3FF);
        let expected = usize::from(header >> 12);
        let data = words
            .get(index + 1..index + 1 + expected)
            .ok_or(PacketError::Truncated {
                index,
                expected,
                available: words.len() - index - 1,
            })?;

        let out = decoded.get_mut(o);
        let mut push = |strip: i32| {
            if strip as usize >= STRIP_COUNT {
                return Err(PacketError::StripOutOfRange {
                    orientation: o,
                    strip,
                });
            }
            out.push(strip - base(o));
            Ok(())
        };
        push(start)?;
        for (k, &word) in data.iter().enumerate() {
            for bit in 0..WORD_BITS {
                if word & (1 << (WORD_BITS - 1 - bit)) != 0 {
                    push(start + 1 + (k * WORD_BITS + bit) as i32)?;
                }
            }
        }
        index += 1 + expected;
    }

    for o in Orientation::ALL {
        let lines = decoded.get_mut(o);
        lines.sort_unstable();
        lines.dedup();
    }
    Ok(decoded)
}
