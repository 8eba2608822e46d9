//! # Interval
//!
//! The directed distance between two notes, measured both chromatically
//! (semitones, from MIDI numbers) and diatonically (step letters with octave
//! carry). Interval naming combines the two: a diatonic third spanning four
//! semitones is `M3`, the same four semitones written as a fourth is `d4`.
//!
//! `is_tonal` is a whitelist over (diatonic number, semitones) pairs. The
//! perfect and major/minor qualities are tonal, and so are `A4`, `d5`, `A5`
//! and `d7`; every other augmented or diminished quality is not.

use crate::error::TertianError;
use crate::note::Note;
use crate::pitch::step_index;

/// A directed interval between two notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    notes: [Note; 2],
    num_semitones: i32,
}

impl Interval {
    /// Build an interval from two pitch strings.
    ///
    /// ```
    /// use tertian::Interval;
    ///
    /// let fifth = Interval::new("C4", "G4").unwrap();
    /// assert_eq!(fifth.num_semitones(false), 7);
    /// assert_eq!(fifth.name(), "P5");
    /// ```
    pub fn new(pitch_a: &str, pitch_b: &str) -> Result<Self, TertianError> {
        Interval::from_notes(Note::new(pitch_a)?, Note::new(pitch_b)?)
    }

    /// Build an interval from two notes. Rests are not valid endpoints.
    pub fn from_notes(note_a: Note, note_b: Note) -> Result<Self, TertianError> {
        if note_a.is_rest() || note_b.is_rest() {
            return Err(TertianError::RestInterval);
        }
        let num_semitones = note_b.midi_number() - note_a.midi_number();
        Ok(Interval {
            notes: [note_a, note_b],
            num_semitones,
        })
    }

    pub fn notes(&self) -> &[Note; 2] {
        &self.notes
    }

    /// Semitone count, signed or absolute.
    pub fn num_semitones(&self, absolute: bool) -> i32 {
        if absolute {
            self.num_semitones.abs()
        } else {
            self.num_semitones
        }
    }

    /// Octave difference between the two written octaves.
    pub fn num_octaves(&self, absolute: bool) -> i32 {
        let diff = self.notes[1].octave() - self.notes[0].octave();
        if absolute {
            diff.abs()
        } else {
            diff
        }
    }

    fn step_of(&self, idx: usize) -> i32 {
        self.notes[idx]
            .step()
            .and_then(step_index)
            .map(|i| i as i32)
            .unwrap_or(0)
    }

    /// Signed distance in white keys, octave-aware. Positive when the second
    /// note sits above the first on the staff.
    pub fn white_key_distance(&self) -> i32 {
        let first = self.notes[0].octave() * 7 + self.step_of(0);
        let second = self.notes[1].octave() * 7 + self.step_of(1);
        second - first
    }

    /// Diatonic step count between the two step letters.
    pub fn diatonic_steps(&self, single_octave: bool, absolute: bool) -> i32 {
        let distance = self.step_of(1) - self.step_of(0) + self.num_octaves(false) * 7;
        let value = if absolute { distance.abs() } else { distance };
        if single_octave {
            value % 7
        } else {
            value
        }
    }

    /// Diatonic interval number (1 = unison/octave, 2 = second, ...).
    pub fn diatonic_interval(&self, single_octave: bool, absolute: bool) -> i32 {
        let steps = self.diatonic_steps(single_octave, absolute);
        if steps == 0 {
            return 1;
        }
        let interval = steps + 1;
        if self.is_ascendant() {
            return interval;
        }
        if absolute {
            interval.abs()
        } else {
            steps - 1
        }
    }

    pub fn is_ascendant(&self) -> bool {
        self.white_key_distance() > 0
    }

    pub fn is_descendant(&self) -> bool {
        self.white_key_distance() < 0
    }

    /// Simple intervals span at most one octave.
    pub fn is_simple(&self) -> bool {
        self.num_semitones.abs() <= 12
    }

    pub fn is_compound(&self) -> bool {
        !self.is_simple()
    }

    /// Diatonic interval number counted on the first note's letter scale,
    /// ignoring octaves (always 1..=7).
    pub fn pitch_step_interval(&self) -> i32 {
        let distance = (self.step_of(1) - self.step_of(0)).rem_euclid(7);
        distance + 1
    }

    /// Name and tonal flag for the interval.
    ///
    /// Octave-reduced: compound intervals name as their simple equivalent
    /// (`m9` reports as `m2`), except exact octave multiples.
    pub fn analyse(&self) -> (String, bool) {
        let diatonic_interval = self.diatonic_interval(true, true);
        let semitones = self.num_semitones(true);

        match diatonic_interval {
            1 => {
                if semitones % 12 == 0 {
                    let octaves = semitones / 12;
                    return match octaves {
                        0 => ("unison".to_string(), true),
                        1 => ("1 oct".to_string(), true),
                        n => (format!("{n} oct"), true),
                    };
                }
            }
            2 => {
                let named = match semitones % 12 {
                    0 => Some(("d2", false)),
                    1 => Some(("m2", true)),
                    2 => Some(("M2", true)),
                    3 => Some(("A2", false)),
                    4 => Some(("+A2", false)),
                    5 => Some(("++A2", false)),
                    6 => Some(("+++A2", false)),
                    _ => None,
                };
                if let Some((name, tonal)) = named {
                    return (name.to_string(), tonal);
                }
            }
            3 => {
                let named = match semitones % 12 {
                    0 => Some(("++d3", false)),
                    1 => Some(("+d3", false)),
                    2 => Some(("d3", false)),
                    3 => Some(("m3", true)),
                    4 => Some(("M3", true)),
                    5 => Some(("A3", false)),
                    6 => Some(("+A3", false)),
                    7 => Some(("++A3", false)),
                    8 => Some(("+++A3", false)),
                    _ => None,
                };
                if let Some((name, tonal)) = named {
                    return (name.to_string(), tonal);
                }
            }
            4 => {
                let named = match semitones % 12 {
                    1 => Some(("+++d4", false)),
                    2 => Some(("++d4", false)),
                    3 => Some(("+d4", false)),
                    4 => Some(("d4", false)),
                    5 => Some(("P4", true)),
                    6 => Some(("A4", true)),
                    7 => Some(("+A4", false)),
                    8 => Some(("++A4", false)),
                    9 => Some(("+++A4", false)),
                    _ => None,
                };
                if let Some((name, tonal)) = named {
                    return (name.to_string(), tonal);
                }
            }
            5 => {
                let named = match semitones % 12 {
                    3 => Some(("+++d5", false)),
                    4 => Some(("++d5", false)),
                    5 => Some(("+d5", false)),
                    6 => Some(("d5", true)),
                    7 => Some(("P5", true)),
                    8 => Some(("A5", true)),
                    9 => Some(("+A5", false)),
                    10 => Some(("++A5", false)),
                    11 => Some(("+++A5", false)),
                    _ => None,
                };
                if let Some((name, tonal)) = named {
                    return (name.to_string(), tonal);
                }
            }
            6 => {
                let named = match semitones % 12 {
                    4 => Some(("+++d6", false)),
                    5 => Some(("++d6", false)),
                    6 => Some(("+d6", false)),
                    7 => Some(("d6", false)),
                    8 => Some(("m6", true)),
                    9 => Some(("M6", true)),
                    10 => Some(("A6", false)),
                    11 => Some(("+A6", false)),
                    _ => None,
                };
                if let Some((name, tonal)) = named {
                    return (name.to_string(), tonal);
                }
            }
            7 => {
                let named = match semitones % 12 {
                    6 => Some(("+++d7", false)),
                    7 => Some(("++d7", false)),
                    8 => Some(("+d7", false)),
                    9 => Some(("d7", true)),
                    10 => Some(("m7", true)),
                    11 => Some(("M7", true)),
                    // Enharmonic wrap: an augmented seventh spans a full
                    // octave of semitones.
                    0 => Some(("A7", false)),
                    _ => None,
                };
                if let Some((name, tonal)) = named {
                    return (name.to_string(), tonal);
                }
            }
            _ => {}
        }

        (String::new(), false)
    }

    /// Interval name, e.g. `"M3"`, `"d5"`, `"1 oct"`.
    pub fn name(&self) -> String {
        self.analyse().0
    }

    /// True for intervals usable in tonal harmony.
    pub fn is_tonal(&self) -> bool {
        self.analyse().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semitones_and_direction() {
        let fifth = Interval::new("C4", "G4").unwrap();
        assert_eq!(fifth.num_semitones(false), 7);
        assert!(fifth.is_ascendant());

        let down = Interval::new("G4", "C4").unwrap();
        assert_eq!(down.num_semitones(false), -7);
        assert_eq!(down.num_semitones(true), 7);
        assert!(down.is_descendant());
    }

    #[test]
    fn test_rest_endpoints_are_rejected() {
        assert!(Interval::new("C4", "rest").is_err());
        assert!(Interval::new("rest", "C4").is_err());
    }

    #[test]
    fn test_diatonic_math() {
        let fifth = Interval::new("C4", "G4").unwrap();
        assert_eq!(fifth.diatonic_steps(true, true), 4);
        assert_eq!(fifth.diatonic_interval(true, true), 5);

        let ninth = Interval::new("C4", "D5").unwrap();
        assert_eq!(ninth.diatonic_steps(false, true), 8);
        assert_eq!(ninth.diatonic_interval(true, true), 2);

        let second_down = Interval::new("C4", "B3").unwrap();
        assert_eq!(second_down.diatonic_interval(true, true), 2);
    }

    #[test]
    fn test_names() {
        assert_eq!(Interval::new("C4", "E4").unwrap().name(), "M3");
        assert_eq!(Interval::new("C4", "Eb4").unwrap().name(), "m3");
        assert_eq!(Interval::new("C4", "Gb4").unwrap().name(), "d5");
        assert_eq!(Interval::new("C4", "G#4").unwrap().name(), "A5");
        assert_eq!(Interval::new("C4", "F#4").unwrap().name(), "A4");
        assert_eq!(Interval::new("C4", "Bb4").unwrap().name(), "m7");
        assert_eq!(Interval::new("C4", "C4").unwrap().name(), "unison");
        assert_eq!(Interval::new("C4", "C5").unwrap().name(), "1 oct");
        assert_eq!(Interval::new("C4", "C6").unwrap().name(), "2 oct");
        // Compound intervals reduce to their simple name.
        assert_eq!(Interval::new("C4", "Db5").unwrap().name(), "m2");
        // Diminished seventh is the 9-semitone case.
        assert_eq!(Interval::new("C4", "Bbb4").unwrap().name(), "d7");
    }

    #[test]
    fn test_tonal_whitelist() {
        assert!(Interval::new("C4", "E4").unwrap().is_tonal()); // M3
        assert!(Interval::new("C4", "Gb4").unwrap().is_tonal()); // d5
        assert!(Interval::new("C4", "G#4").unwrap().is_tonal()); // A5
        assert!(Interval::new("C4", "Bbb4").unwrap().is_tonal()); // d7
        assert!(!Interval::new("C4", "D#4").unwrap().is_tonal()); // A2
        assert!(!Interval::new("F4", "A#4").unwrap().is_tonal()); // A3
        assert!(!Interval::new("C4", "Ebb4").unwrap().is_tonal()); // d3
    }

    #[test]
    fn test_simple_and_compound() {
        assert!(Interval::new("C4", "C5").unwrap().is_simple());
        assert!(Interval::new("C4", "D5").unwrap().is_compound());
    }

    #[test]
    fn test_pitch_step_interval() {
        assert_eq!(Interval::new("C4", "E4").unwrap().pitch_step_interval(), 3);
        assert_eq!(Interval::new("C4", "G5").unwrap().pitch_step_interval(), 5);
        assert_eq!(Interval::new("B3", "D4").unwrap().pitch_step_interval(), 3);
    }
}
