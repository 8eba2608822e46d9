//! # Duration Codec
//!
//! Conversions between rhythm figure names (MusicXML note types such as
//! `"quarter"`, `"16th"`, `"breve"`, with optional `-dot` / `-dot-dot`
//! suffixes) and tick counts relative to a *divisions-per-quarter-note*
//! resolution (dpq).
//!
//! Name-to-ticks is exact arithmetic (short fractional figures round to the
//! nearest tick). Ticks-to-name is a classifier: the tick/dpq ratio, scaled
//! by 1e6, is matched against one band per supported figure-and-dots
//! combination. A tick count outside every band is a soft failure: it logs a
//! warning and yields `None`.

use crate::error::TertianError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A rhythm figure, from maxima (8 whole notes) down to the 1024th note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RhythmFigure {
    Maxima,
    Long,
    Breve,
    Whole,
    Half,
    Quarter,
    Eighth,
    N16th,
    N32nd,
    N64th,
    N128th,
    N256th,
    N512th,
    N1024th,
}

impl RhythmFigure {
    /// Power of two relative to a quarter note: quarter = 2^0, whole = 2^2,
    /// maxima = 2^5, 1024th = 2^-8.
    pub fn power(&self) -> i32 {
        match self {
            RhythmFigure::Maxima => 5,
            RhythmFigure::Long => 4,
            RhythmFigure::Breve => 3,
            RhythmFigure::Whole => 2,
            RhythmFigure::Half => 1,
            RhythmFigure::Quarter => 0,
            RhythmFigure::Eighth => -1,
            RhythmFigure::N16th => -2,
            RhythmFigure::N32nd => -3,
            RhythmFigure::N64th => -4,
            RhythmFigure::N128th => -5,
            RhythmFigure::N256th => -6,
            RhythmFigure::N512th => -7,
            RhythmFigure::N1024th => -8,
        }
    }

    /// MusicXML note-type name.
    pub fn name(&self) -> &'static str {
        match self {
            RhythmFigure::Maxima => "maxima",
            RhythmFigure::Long => "long",
            RhythmFigure::Breve => "breve",
            RhythmFigure::Whole => "whole",
            RhythmFigure::Half => "half",
            RhythmFigure::Quarter => "quarter",
            RhythmFigure::Eighth => "eighth",
            RhythmFigure::N16th => "16th",
            RhythmFigure::N32nd => "32nd",
            RhythmFigure::N64th => "64th",
            RhythmFigure::N128th => "128th",
            RhythmFigure::N256th => "256th",
            RhythmFigure::N512th => "512th",
            RhythmFigure::N1024th => "1024th",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "maxima" => Some(RhythmFigure::Maxima),
            "long" => Some(RhythmFigure::Long),
            "breve" => Some(RhythmFigure::Breve),
            "whole" => Some(RhythmFigure::Whole),
            "half" => Some(RhythmFigure::Half),
            "quarter" => Some(RhythmFigure::Quarter),
            "eighth" => Some(RhythmFigure::Eighth),
            "16th" => Some(RhythmFigure::N16th),
            "32nd" => Some(RhythmFigure::N32nd),
            "64th" => Some(RhythmFigure::N64th),
            "128th" => Some(RhythmFigure::N128th),
            "256th" => Some(RhythmFigure::N256th),
            "512th" => Some(RhythmFigure::N512th),
            "1024th" => Some(RhythmFigure::N1024th),
        _ => None,
        }
    }
}

impl std::fmt::Display for RhythmFigure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a note-type name (case-insensitive) into a figure and dot count.
///
/// ```
/// use tertian::{parse_note_type, RhythmFigure};
///
/// assert_eq!(parse_note_type("Quarter-Dot").unwrap(), (RhythmFigure::Quarter, 1));
/// ```
pub fn parse_note_type(note_type: &str) -> Result<(RhythmFigure, u8), TertianError> {
    let lower = note_type.to_lowercase();
    let (base, dots) = if let Some(stripped) = lower.strip_suffix("-dot-dot") {
        (stripped, 2u8)
    } else if let Some(stripped) = lower.strip_suffix("-dot") {
        (stripped, 1u8)
    } else {
        (lower.as_str(), 0u8)
    };

    let figure = RhythmFigure::from_name(base)
        .ok_or_else(|| TertianError::UnknownNoteType(note_type.to_string()))?;
    Ok((figure, dots))
}

/// Tick count of a figure with dots at the given resolution, rounded to the
/// nearest tick.
pub fn figure_ticks(figure: RhythmFigure, dots: u8, dpq: i32) -> i32 {
    let base = f64::from(dpq) * f64::powi(2.0, figure.power());
    let mut ticks = base;
    if dots >= 1 {
        ticks += base / 2.0;
    }
    if dots >= 2 {
        ticks += base / 4.0;
    }
    ticks.round() as i32
}

/// Tick count of a note-type name at the given resolution.
///
/// ```
/// use tertian::note_type_to_ticks;
///
/// assert_eq!(note_type_to_ticks("quarter", 256).unwrap(), 256);
/// assert_eq!(note_type_to_ticks("quarter-dot", 256).unwrap(), 384);
/// ```
pub fn note_type_to_ticks(note_type: &str, dpq: i32) -> Result<i32, TertianError> {
    let (figure, dots) = parse_note_type(note_type)?;
    Ok(figure_ticks(figure, dots, dpq))
}

// One classification band per figure-and-dots combination, over the
// tick/dpq ratio scaled by 1e6. Bounds are inclusive.
const BANDS: [(i64, i64, RhythmFigure, u8); 42] = [
    (56_000_000, 63_999_999, RhythmFigure::Maxima, 2),
    (48_000_000, 55_999_999, RhythmFigure::Maxima, 1),
    (32_000_000, 47_999_999, RhythmFigure::Maxima, 0),
    (28_000_000, 31_999_999, RhythmFigure::Long, 2),
    (24_000_000, 27_999_999, RhythmFigure::Long, 1),
    (16_000_000, 23_999_999, RhythmFigure::Long, 0),
    (14_000_000, 15_999_999, RhythmFigure::Breve, 2),
    (12_000_000, 13_999_999, RhythmFigure::Breve, 1),
    (8_000_000, 11_999_999, RhythmFigure::Breve, 0),
    (7_000_000, 7_999_999, RhythmFigure::Whole, 2),
    (6_000_000, 6_999_999, RhythmFigure::Whole, 1),
    (4_000_000, 5_999_999, RhythmFigure::Whole, 0),
    (3_500_000, 3_999_999, RhythmFigure::Half, 2),
    (3_000_000, 3_499_999, RhythmFigure::Half, 1),
    (2_000_000, 2_999_999, RhythmFigure::Half, 0),
    (1_750_000, 1_999_999, RhythmFigure::Quarter, 2),
    (1_500_000, 1_749_999, RhythmFigure::Quarter, 1),
    (1_000_000, 1_499_999, RhythmFigure::Quarter, 0),
    (875_000, 999_999, RhythmFigure::Eighth, 2),
    (750_000, 874_999, RhythmFigure::Eighth, 1),
    (500_000, 749_999, RhythmFigure::Eighth, 0),
    (437_500, 499_999, RhythmFigure::N16th, 2),
    (375_000, 437_499, RhythmFigure::N16th, 1),
    (250_000, 374_999, RhythmFigure::N16th, 0),
    (218_750, 249_999, RhythmFigure::N32nd, 2),
    (187_500, 218_749, RhythmFigure::N32nd, 1),
    (125_000, 187_499, RhythmFigure::N32nd, 0),
    (109_375, 124_999, RhythmFigure::N64th, 2),
    (93_750, 109_374, RhythmFigure::N64th, 1),
    (62_500, 93_749, RhythmFigure::N64th, 0),
    (54_688, 62_499, RhythmFigure::N128th, 2),
    (46_875, 54_687, RhythmFigure::N128th, 1),
    (31_250, 46_874, RhythmFigure::N128th, 0),
    (27_344, 31_249, RhythmFigure::N256th, 2),
    (23_438, 27_343, RhythmFigure::N256th, 1),
    (15_625, 23_437, RhythmFigure::N256th, 0),
    (13_672, 15_624, RhythmFigure::N512th, 2),
    (11_719, 13_671, RhythmFigure::N512th, 1),
    (7_813, 11_718, RhythmFigure::N512th, 0),
    (6_836, 7_812, RhythmFigure::N1024th, 2),
    (5_859, 6_835, RhythmFigure::N1024th, 1),
    (3_906, 5_858, RhythmFigure::N1024th, 0),
];

/// Classify a tick count as a figure with dots.
///
/// Out-of-band counts log a warning and yield `None`.
///
/// ```
/// use tertian::{ticks_to_note_type, RhythmFigure};
///
/// assert_eq!(ticks_to_note_type(384, 256), Some((RhythmFigure::Quarter, 1)));
/// ```
pub fn ticks_to_note_type(ticks: i32, dpq: i32) -> Option<(RhythmFigure, u8)> {
    if dpq <= 0 {
        warn!(ticks, dpq, "non-positive divisions-per-quarter-note");
        return None;
    }

    let scaled = (f64::from(ticks) / f64::from(dpq) * 1_000_000.0).round() as i64;
    for &(lo, hi, figure, dots) in BANDS.iter() {
        if (lo..=hi).contains(&scaled) {
            return Some((figure, dots));
        }
    }

    warn!(ticks, dpq, "tick count outside every rhythm figure band");
    None
}

/// Note-type name, with dot suffixes, for a tick count. `None` when the
/// count falls outside every band.
pub fn ticks_to_note_type_name(ticks: i32, dpq: i32) -> Option<String> {
    ticks_to_note_type(ticks, dpq).map(|(figure, dots)| note_type_name(figure, dots))
}

/// Render a figure and dot count as a note-type name.
pub fn note_type_name(figure: RhythmFigure, dots: u8) -> String {
    match dots {
        0 => figure.name().to_string(),
        1 => format!("{}-dot", figure.name()),
        _ => format!("{}-dot-dot", figure.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_type_to_ticks_canonical_resolution() {
        assert_eq!(note_type_to_ticks("quarter", 256).unwrap(), 256);
        assert_eq!(note_type_to_ticks("quarter-dot", 256).unwrap(), 384);
        assert_eq!(note_type_to_ticks("quarter-dot-dot", 256).unwrap(), 448);
        assert_eq!(note_type_to_ticks("whole", 256).unwrap(), 1024);
        assert_eq!(note_type_to_ticks("maxima", 256).unwrap(), 8192);
        assert_eq!(note_type_to_ticks("eighth", 256).unwrap(), 128);
        assert_eq!(note_type_to_ticks("1024th", 256).unwrap(), 1);
    }

    #[test]
    fn test_note_type_to_ticks_rounds_short_figures() {
        // 1024th-dot at dpq 256 is 1.5 ticks, rounded away from zero.
        assert_eq!(note_type_to_ticks("1024th-dot", 256).unwrap(), 2);
    }

    #[test]
    fn test_note_type_parsing() {
        assert_eq!(parse_note_type("QUARTER").unwrap(), (RhythmFigure::Quarter, 0));
        assert_eq!(parse_note_type("Breve-Dot-Dot").unwrap(), (RhythmFigure::Breve, 2));
        assert!(parse_note_type("quaver").is_err());
        assert!(parse_note_type("quarter-dot-dot-dot").is_err());
    }

    #[test]
    fn test_ticks_to_note_type_bands() {
        assert_eq!(ticks_to_note_type(256, 256), Some((RhythmFigure::Quarter, 0)));
        assert_eq!(ticks_to_note_type(384, 256), Some((RhythmFigure::Quarter, 1)));
        assert_eq!(ticks_to_note_type(448, 256), Some((RhythmFigure::Quarter, 2)));
        assert_eq!(ticks_to_note_type(1024, 256), Some((RhythmFigure::Whole, 0)));
        assert_eq!(ticks_to_note_type(1, 256), Some((RhythmFigure::N1024th, 0)));
        // A slightly long quarter still classifies as a quarter.
        assert_eq!(ticks_to_note_type(300, 256), Some((RhythmFigure::Quarter, 0)));
    }

    #[test]
    fn test_ticks_to_note_type_out_of_band() {
        assert_eq!(ticks_to_note_type(0, 256), None);
        assert_eq!(ticks_to_note_type(1, 512), None); // below the finest band
        assert_eq!(ticks_to_note_type(100_000, 256), None); // beyond maxima-dot-dot
        assert_eq!(ticks_to_note_type(256, 0), None);
    }

    #[test]
    fn test_round_trip_all_figures() {
        // dpq 1024 keeps every dotted short figure integral.
        let dpq = 1024;
        let figures = [
            RhythmFigure::Maxima,
            RhythmFigure::Long,
            RhythmFigure::Breve,
            RhythmFigure::Whole,
            RhythmFigure::Half,
            RhythmFigure::Quarter,
            RhythmFigure::Eighth,
            RhythmFigure::N16th,
            RhythmFigure::N32nd,
            RhythmFigure::N64th,
            RhythmFigure::N128th,
            RhythmFigure::N256th,
            RhythmFigure::N512th,
            RhythmFigure::N1024th,
        ];
        for figure in figures {
            for dots in 0..=2u8 {
                let ticks = figure_ticks(figure, dots, dpq);
                assert_eq!(
                    ticks_to_note_type(ticks, dpq),
                    Some((figure, dots)),
                    "{} with {} dots ({} ticks)",
                    figure,
                    dots,
                    ticks
                );
            }
        }
    }

    #[test]
    fn test_note_type_name_rendering() {
        assert_eq!(note_type_name(RhythmFigure::N16th, 0), "16th");
        assert_eq!(note_type_name(RhythmFigure::Half, 1), "half-dot");
        assert_eq!(ticks_to_note_type_name(448, 256).as_deref(), Some("quarter-dot-dot"));
    }
}
