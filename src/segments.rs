//! Seven-segment font for the decimal digits.
//!
//! ```text
//!    --A--
//!   |     |
//!   F     B
//!   |     |
//!    --G--
//!   |     |
//!   E     C
//!   |     |
//!    --D--
//! ```

use core::fmt;

/// One of the seven segments of a cell, in line order.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    /// All segments, in the order of the segment lines.
    pub const ALL: [Self; 7] = [Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G];

    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of segments, one bit per segment (bit 0 = A ... bit 6 = G).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SegmentSet(u8);

impl SegmentSet {
    pub const EMPTY: Self = Self(0);

    const SEG_A: u8 = Segment::A.bit();
    const SEG_B: u8 = Segment::B.bit();
    const SEG_C: u8 = Segment::C.bit();
    const SEG_D: u8 = Segment::D.bit();
    const SEG_E: u8 = Segment::E.bit();
    const SEG_F: u8 = Segment::F.bit();
    const SEG_G: u8 = Segment::G.bit();

    /// Segments for digits 0-9.
    const DIGITS: [Self; 10] = [
        Self(Self::SEG_A | Self::SEG_B | Self::SEG_C | Self::SEG_D | Self::SEG_E | Self::SEG_F),
        Self(Self::SEG_B | Self::SEG_C),
        Self(Self::SEG_A | Self::SEG_B | Self::SEG_G | Self::SEG_E | Self::SEG_D),
        Self(Self::SEG_A | Self::SEG_B | Self::SEG_C | Self::SEG_D | Self::SEG_G),
        Self(Self::SEG_B | Self::SEG_C | Self::SEG_F | Self::SEG_G),
        Self(Self::SEG_A | Self::SEG_F | Self::SEG_G | Self::SEG_C | Self::SEG_D),
        Self(Self::SEG_A | Self::SEG_F | Self::SEG_G | Self::SEG_C | Self::SEG_D | Self::SEG_E),
        Self(Self::SEG_A | Self::SEG_B | Self::SEG_C),
        Self(
            Self::SEG_A
                | Self::SEG_B
                | Self::SEG_C
                | Self::SEG_D
                | Self::SEG_E
                | Self::SEG_F
                | Self::SEG_G,
        ),
        Self(Self::SEG_A | Self::SEG_B | Self::SEG_G | Self::SEG_F | Self::SEG_C),
    ];

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The lit segments, in line order.
    pub fn iter(self) -> impl Iterator<Item = Segment> {
        Segment::ALL
            .into_iter()
            .filter(move |&segment| self.contains(segment))
    }
}

impl FromIterator<Segment> for SegmentSet {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().fold(0, |bits, segment| bits | segment.bit()))
    }
}

impl fmt::Debug for SegmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Returns the segments that draw `digit`.
///
/// Callers pass 0-9; anything else yields [`SegmentSet::EMPTY`].
#[must_use]
pub fn segments_for(digit: u8) -> SegmentSet {
    SegmentSet::DIGITS
        .get(usize::from(digit))
        .copied()
        .unwrap_or(SegmentSet::EMPTY)
}
