//! # Pitch Codec
//!
//! Conversions between the three pitch representations used across the crate:
//!
//! - **Pitch strings**: `<step><accidental?><octave?>`, e.g. `"C4"`, `"Eb5"`,
//!   `"F#"` (octave defaults to 4), `"rest"`.
//! - **MIDI numbers**: integers 12..=132 (`C0`..`C10`), with `-1` as the
//!   rest sentinel.
//! - **Frequencies**: Hz, from an empirical per-pitch-class base table.
//!
//! ## Accidental families
//! A MIDI number has up to three enharmonic spellings, one per *accidental
//! family* (double-flat, flat, natural, sharp, double-sharp). Each chroma
//! admits only some families: MIDI 60 can be written `C4`, `B#3` or `Dbb4`,
//! but there is no flat-family spelling for it. [`midi_to_pitch`] rejects
//! impossible requests; [`midi_to_pitches`] enumerates the valid ones.
//!
//! Quarter-tone symbols (`1b`, `3b`, `1x`, `3x`) are accepted by
//! [`split_pitch`], the alter plumbing and [`pitch_to_freq`], but have no
//! MIDI spelling and are rejected by [`pitch_to_midi`].
//!
//! ## Octave transitions
//! Spellings that cross the B/C boundary carry the neighboring octave:
//! `Cb4` is MIDI 59, `B#3` is MIDI 60, `Cbb5` is MIDI 70.

use crate::error::TertianError;
use serde::{Deserialize, Serialize};

/// MIDI sentinel for rests.
pub const MIDI_REST: i32 = -1;

/// Pitch string for rests.
pub const REST_PITCH: &str = "rest";

/// Lowest MIDI number with a pitch-string spelling (`C0`).
pub const MIDI_MIN: i32 = 12;

/// Highest MIDI number with a pitch-string spelling (`C10`).
pub const MIDI_MAX: i32 = 132;

// Chromatic spellings per family, indexed by chroma (midi % 12).
const SHARP_SCALE: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_SCALE: [&str; 12] = [
    "C", "Db", "D", "Eb", "Fb", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];
const DOUBLE_SHARP_SCALE: [&str; 12] = [
    "C", "Bx", "Cx", "D#", "Dx", "E#", "Ex", "Fx", "G#", "Gx", "A#", "Ax",
];
const DOUBLE_FLAT_SCALE: [&str; 12] = [
    "C", "Db", "Ebb", "Fbb", "Fb", "Gbb", "Gb", "Abb", "Ab", "Bbb", "Bb", "Cb",
];

/// One of the five MIDI-expressible accidental families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// The written symbol: `bb`, `b`, empty, `#` or `x`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "x",
        }
    }

    /// Parse a written symbol. Quarter-tone symbols are not families.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "bb" => Some(Accidental::DoubleFlat),
            "b" => Some(Accidental::Flat),
            "" => Some(Accidental::Natural),
            "#" => Some(Accidental::Sharp),
            "x" => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    /// Chromatic alteration in semitones (-2..=2).
    pub fn alter(&self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    fn can_spell(&self, chroma: i32) -> bool {
        match self {
            Accidental::DoubleFlat => matches!(chroma, 0 | 2 | 3 | 5 | 7 | 9 | 10),
            Accidental::Flat => matches!(chroma, 1 | 3 | 4 | 6 | 8 | 10 | 11),
            // The natural family falls back to sharp-scale names on black
            // keys, so it can spell every chroma.
            Accidental::Natural => true,
            Accidental::Sharp => matches!(chroma, 0 | 1 | 3 | 5 | 6 | 8 | 10),
            Accidental::DoubleSharp => matches!(chroma, 1 | 2 | 4 | 6 | 7 | 9 | 11),
        }
    }
}

/// The parsed parts of a pitch string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchComponents {
    /// Step letter plus accidental symbol, e.g. `"Eb"`; `"rest"` for rests.
    pub pitch_class: String,
    /// Step letter alone, e.g. `"E"`; `"rest"` for rests.
    pub step: String,
    /// Octave number; defaults to 4 when the string carries none.
    pub octave: i32,
    /// Chromatic alteration, `-2.0..=2.0` in steps of 0.5.
    pub alter_value: f64,
    /// The written alter symbol, possibly a quarter-tone one.
    pub alter_symbol: String,
}

impl PitchComponents {
    fn rest() -> Self {
        PitchComponents {
            pitch_class: REST_PITCH.to_string(),
            step: REST_PITCH.to_string(),
            octave: 0,
            alter_value: 0.0,
            alter_symbol: String::new(),
        }
    }

    /// True when the components describe a rest.
    pub fn is_rest(&self) -> bool {
        self.pitch_class == REST_PITCH
    }
}

fn step_semitone(step: char) -> Option<i32> {
    match step {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Index of a step letter in the C diatonic scale (C=0 .. B=6).
pub(crate) fn step_index(step: char) -> Option<usize> {
    "CDEFGAB".find(step)
}

/// Split a pitch string into its components.
///
/// Bare pitch classes get octave 4; `"rest"` (or an empty string) yields the
/// rest components. Unknown step letters and alter symbols are hard errors.
///
/// ```
/// use tertian::split_pitch;
///
/// let c = split_pitch("Eb5").unwrap();
/// assert_eq!(c.pitch_class, "Eb");
/// assert_eq!(c.step, "E");
/// assert_eq!(c.octave, 5);
/// assert_eq!(c.alter_value, -1.0);
/// ```
pub fn split_pitch(pitch: &str) -> Result<PitchComponents, TertianError> {
    if pitch.is_empty() || pitch == REST_PITCH {
        return Ok(PitchComponents::rest());
    }

    let step = match pitch.chars().next() {
        Some(c) if step_semitone(c).is_some() => c,
        Some(c) => {
            return Err(TertianError::InvalidPitch {
                pitch: pitch.to_string(),
                message: format!("unknown step letter '{c}'"),
            })
        }
        None => unreachable!(),
    };

    // Trailing digits form the octave; everything between the step letter
    // and the octave is the alter symbol.
    let digits = pitch.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    let (body, octave_str) = pitch.split_at(pitch.len() - digits);
    let octave = if octave_str.is_empty() {
        4
    } else {
        octave_str.parse::<i32>().map_err(|_| TertianError::InvalidPitch {
            pitch: pitch.to_string(),
            message: format!("invalid octave '{octave_str}'"),
        })?
    };

    let alter_symbol = &body[1..];
    let alter_value = alter_symbol_to_value(alter_symbol).ok_or_else(|| {
        TertianError::InvalidPitch {
            pitch: pitch.to_string(),
            message: format!("unknown alter symbol '{alter_symbol}'"),
        }
    })?;

    Ok(PitchComponents {
        pitch_class: body.to_string(),
        step: step.to_string(),
        octave,
        alter_value,
        alter_symbol: alter_symbol.to_string(),
    })
}

/// Spell a MIDI number in the given accidental family.
///
/// Negative numbers spell as `"rest"`. Numbers outside 12..=132 or families
/// that cannot spell the chroma are errors.
///
/// ```
/// use tertian::{midi_to_pitch, Accidental};
///
/// assert_eq!(midi_to_pitch(60, Accidental::Natural).unwrap(), "C4");
/// assert_eq!(midi_to_pitch(60, Accidental::Sharp).unwrap(), "B#3");
/// assert!(midi_to_pitch(60, Accidental::Flat).is_err());
/// ```
pub fn midi_to_pitch(midi: i32, accidental: Accidental) -> Result<String, TertianError> {
    if midi < 0 {
        return Ok(REST_PITCH.to_string());
    }
    if !(MIDI_MIN..=MIDI_MAX).contains(&midi) {
        return Err(TertianError::MidiOutOfRange(midi));
    }

    let chroma = midi % 12;
    if !accidental.can_spell(chroma) {
        return Err(TertianError::InvalidAccidentalForMidi {
            midi,
            accidental: accidental.symbol().to_string(),
        });
    }

    let chroma_idx = chroma as usize;
    let pitch_class = match accidental {
        Accidental::Sharp => match chroma {
            0 => "B#",
            5 => "E#",
            _ => SHARP_SCALE[chroma_idx],
        },
        Accidental::Flat => match chroma {
            11 => "Cb",
            _ => FLAT_SCALE[chroma_idx],
        },
        Accidental::DoubleSharp => DOUBLE_SHARP_SCALE[chroma_idx],
        Accidental::DoubleFlat => match chroma {
            0 => "Dbb",
            10 => "Cbb",
            _ => DOUBLE_FLAT_SCALE[chroma_idx],
        },
        Accidental::Natural => SHARP_SCALE[chroma_idx],
    };

    let mut octave = midi / 12 - 1;
    // Spellings that borrow their letter from across the B/C boundary sit in
    // the neighboring octave.
    if (chroma == 0 && accidental == Accidental::Sharp)
        || (chroma == 1 && accidental == Accidental::DoubleSharp)
    {
        octave -= 1;
    }
    if (chroma == 10 && accidental == Accidental::DoubleFlat)
        || (chroma == 11 && accidental == Accidental::Flat)
    {
        octave += 1;
    }

    // MIDI 12 and 13 cannot borrow a letter from below octave 0.
    if octave < 0 {
        return Err(TertianError::InvalidAccidentalForMidi {
            midi,
            accidental: accidental.symbol().to_string(),
        });
    }

    Ok(format!("{pitch_class}{octave}"))
}

/// All valid spellings of a MIDI number, sorted and deduplicated.
///
/// ```
/// use tertian::midi_to_pitches;
///
/// assert_eq!(midi_to_pitches(60), vec!["B#3", "C4", "Dbb4"]);
/// ```
pub fn midi_to_pitches(midi: i32) -> Vec<String> {
    let families = [
        Accidental::DoubleFlat,
        Accidental::Flat,
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::DoubleSharp,
    ];
    let mut pitches: Vec<String> = families
        .iter()
        .filter_map(|&acc| midi_to_pitch(midi, acc).ok())
        .collect();
    pitches.sort();
    pitches.dedup();
    pitches
}

/// Convert a pitch string to its MIDI number.
///
/// Covers octaves 0..=10 (MIDI 12..=132); `"rest"` maps to [`MIDI_REST`].
/// Quarter-tone spellings and out-of-range octaves are hard errors.
///
/// ```
/// use tertian::pitch_to_midi;
///
/// assert_eq!(pitch_to_midi("C4").unwrap(), 60);
/// assert_eq!(pitch_to_midi("Cb4").unwrap(), 59);
/// assert!(pitch_to_midi("Db11").is_err());
/// ```
pub fn pitch_to_midi(pitch: &str) -> Result<i32, TertianError> {
    let components = split_pitch(pitch)?;
    if components.is_rest() {
        return Ok(MIDI_REST);
    }

    let accidental = Accidental::from_symbol(&components.alter_symbol).ok_or_else(|| {
        TertianError::InvalidPitch {
            pitch: pitch.to_string(),
            message: format!(
                "quarter-tone symbol '{}' has no MIDI spelling",
                components.alter_symbol
            ),
        }
    })?;

    let step = components.step.chars().next().ok_or_else(|| {
        TertianError::InvalidPitch {
            pitch: pitch.to_string(),
            message: "empty step".to_string(),
        }
    })?;
    let semitone = step_semitone(step).ok_or_else(|| TertianError::InvalidPitch {
        pitch: pitch.to_string(),
        message: format!("unknown step letter '{step}'"),
    })?;

    let midi = 12 * (components.octave + 1) + semitone + accidental.alter();
    if !(MIDI_MIN..=MIDI_MAX).contains(&midi) {
        return Err(TertianError::InvalidPitch {
            pitch: pitch.to_string(),
            message: format!("MIDI number {midi} is outside the supported range"),
        });
    }

    // The family must actually spell this chroma ("Cb" is fine, "Fx" is
    // fine, but e.g. "Bx" names chroma 1 in the double-sharp family only).
    if !accidental.can_spell(midi % 12) {
        return Err(TertianError::InvalidPitch {
            pitch: pitch.to_string(),
            message: format!(
                "'{}' is not a valid spelling in the '{}' family",
                components.pitch_class,
                accidental.symbol()
            ),
        });
    }

    Ok(midi)
}

/// Transpose a pitch string by a number of semitones, spelling the result in
/// the given accidental family.
pub fn transpose_pitch(
    pitch: &str,
    semitones: i32,
    accidental: Accidental,
) -> Result<String, TertianError> {
    let midi = pitch_to_midi(pitch)?;
    if midi == MIDI_REST {
        return Ok(REST_PITCH.to_string());
    }
    midi_to_pitch(midi + semitones, accidental)
}

/// Semitone distance from `pitch_a` to `pitch_b` (positive when ascending).
pub fn semitones_between(pitch_a: &str, pitch_b: &str) -> Result<i32, TertianError> {
    Ok(pitch_to_midi(pitch_b)? - pitch_to_midi(pitch_a)?)
}

// ===== Frequency model ===== //

// Empirical base frequencies (octave 0 divided by 2^octave), one per written
// pitch class. Several entries are deliberate approximations of their
// enharmonic neighbors rather than 12-TET values.
fn base_frequency(pitch_class: &str) -> Option<f64> {
    let freq = match pitch_class {
        "C" => 16.35,
        "Dbb" => 16.40,
        "Db" => 17.16,
        "C#" => 17.40,
        "Cx" => 18.30,
        "D" => 18.35,
        "Ebb" => 18.40,
        "Eb" => 19.31,
        "Fbb" => 19.40,
        "D#" => 19.57,
        "Dx" => 20.55,
        "E" => 20.60,
        "Fb" => 20.34,
        "E#" => 22.02,
        "F" => 21.83,
        "Gbb" => 22.33,
        "Gb" => 22.89,
        "Ex" => 23.00,
        "F#" => 23.20,
        "Fx" => 24.00,
        "G" => 24.50,
        "Abb" => 25.00,
        "Ab" => 25.75,
        "G#" => 26.10,
        "Gx" => 27.00,
        "A" => 27.50,
        "Bbb" => 28.00,
        "Bb" => 28.43,
        "Cbb" => 28.60,
        "A#" => 28.97,
        "Ax" => 29.10,
        "B" => 30.36,
        "Cb" => 30.52,
        "B#" => 33.03,
        "Bx" => 34.30,
        _ => return None,
    };
    Some(freq)
}

/// Frequency of a pitch string under the empirical model.
///
/// Quarter-tone accidentals apply a fixed ratio to the plain step's base
/// frequency. Rests, empty strings and unknown classes yield 0.0.
///
/// ```
/// use tertian::pitch_to_freq;
///
/// assert_eq!(pitch_to_freq("A4"), 440.0);
/// ```
pub fn pitch_to_freq(pitch: &str) -> f64 {
    let components = match split_pitch(pitch) {
        Ok(c) => c,
        Err(_) => return 0.0,
    };
    if components.is_rest() {
        return 0.0;
    }

    let (class, quarter_ratio) = match components.alter_symbol.as_str() {
        "1x" => (components.step.as_str(), 1.005),
        "3x" => (components.step.as_str(), 1.015),
        "1b" => (components.step.as_str(), 0.095),
        "3b" => (components.step.as_str(), 0.085),
        _ => (components.pitch_class.as_str(), 1.0),
    };

    let base = match base_frequency(class) {
        Some(f) => f,
        None => return 0.0,
    };

    base * f64::powi(2.0, components.octave) * quarter_ratio
}

/// 12-TET frequency of a MIDI number; rests yield 0.0.
pub fn midi_to_freq(midi: i32) -> f64 {
    if midi < 0 {
        return 0.0;
    }
    f64::powf(2.0, (f64::from(midi) - 69.0) / 12.0) * 440.0
}

/// Closest 12-TET MIDI number for a frequency, with the cents deviation from
/// that note. Non-positive frequencies yield the rest sentinel.
///
/// ```
/// use tertian::freq_to_midi;
///
/// assert_eq!(freq_to_midi(440.0), (69, 0));
/// ```
pub fn freq_to_midi(freq: f64) -> (i32, i32) {
    if freq <= 0.0 {
        return (MIDI_REST, 0);
    }

    let closest = (12.0 * (freq / 440.0).log2() + 69.0).round() as i32;
    let closest_freq = midi_to_freq(closest);
    let cents = (1200.0 * (freq / closest_freq).log2()).round() as i32;

    (closest, cents)
}

/// Closest spelled pitch for a frequency, with the cents deviation.
pub fn freq_to_pitch(freq: f64, accidental: Accidental) -> Result<(String, i32), TertianError> {
    let (midi, cents) = freq_to_midi(freq);
    Ok((midi_to_pitch(midi, accidental)?, cents))
}

// ===== Alter symbol / value / name plumbing ===== //

/// Chromatic alteration of a written symbol, in semitones.
pub fn alter_symbol_to_value(symbol: &str) -> Option<f64> {
    match symbol {
        "bb" => Some(-2.0),
        "3b" => Some(-1.5),
        "b" => Some(-1.0),
        "1b" => Some(-0.5),
        "" => Some(0.0),
        "1x" => Some(0.5),
        "#" => Some(1.0),
        "3x" => Some(1.5),
        "x" => Some(2.0),
        _ => None,
    }
}

/// Written symbol for a chromatic alteration.
pub fn alter_value_to_symbol(value: f64) -> Option<&'static str> {
    let half_steps = (value * 2.0).round();
    if (value * 2.0 - half_steps).abs() > f64::EPSILON {
        return None;
    }
    match half_steps as i32 {
        -4 => Some("bb"),
        -3 => Some("3b"),
        -2 => Some("b"),
        -1 => Some("1b"),
        0 => Some(""),
        1 => Some("1x"),
        2 => Some("#"),
        3 => Some("3x"),
        4 => Some("x"),
        _ => None,
    }
}

/// MusicXML accidental name for a chromatic alteration.
pub fn alter_value_to_name(value: f64) -> Option<&'static str> {
    let half_steps = (value * 2.0).round();
    if (value * 2.0 - half_steps).abs() > f64::EPSILON {
        return None;
    }
    match half_steps as i32 {
        -4 => Some("flat-flat"),
        -3 => Some("flat-down"),
        -2 => Some("flat"),
        -1 => Some("flat-up"),
        0 => Some("natural"),
        1 => Some("sharp-down"),
        2 => Some("sharp"),
        3 => Some("sharp-up"),
        4 => Some("double-sharp"),
        _ => None,
    }
}

/// Written symbol for a MusicXML accidental name.
pub fn alter_name_to_symbol(name: &str) -> Option<&'static str> {
    match name {
        "flat-flat" => Some("bb"),
        "flat-down" => Some("3b"),
        "flat" => Some("b"),
        "flat-up" => Some("1b"),
        "natural" => Some(""),
        "sharp-down" => Some("1x"),
        "sharp" => Some("#"),
        "sharp-up" => Some("3x"),
        "double-sharp" => Some("x"),
        _ => None,
    }
}
