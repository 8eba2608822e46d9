//! # Chord
//!
//! A chord holds its notes in insertion order and, on demand, a *close
//! stack*: the same pitch classes reordered root-first in stacked thirds,
//! octave-normalized with the root at octave 4. Stacking is lazy; every
//! mutator clears the stacked flag and the next stack-dependent query
//! recomputes.
//!
//! ## Stacking
//! Rests are filtered out, notes are sorted by MIDI number (the lowest is
//! recorded as the bass) and deduplicated by pitch class. Each surviving
//! note is tried as the root: the cost of a candidate is the sum over all
//! notes of their step letter's index in the candidate's tertian rotation
//! (for C: `C E G B D F A`). The cheapest candidate wins, ties going to the
//! lowest-sounding one, and the stack is rebuilt in rotation order.
//!
//! Chords with fewer than three unique pitch classes are left unstacked with
//! a logged warning; that is not an error.
//!
//! ## Analysis
//! From the stack, semitone distances to the root set one flag per tertian
//! degree (minor/major third, the three fifths, seventh variants up to the
//! thirteenth). The diminished seventh is the 9-semitone interval, so
//! `{C4, Eb4, Gb4, Bb4}` is half-diminished but not diminished. Names come
//! from the third/fifth/seventh matrix plus extension tokens and a slash
//! bass, e.g. `"C7M/G"` or `"Am7"`.

use crate::error::TertianError;
use crate::interval::Interval;
use crate::note::Note;
use crate::pitch::{midi_to_pitch, split_pitch, Accidental};
use tracing::warn;

// Tertian rotation of the seven step letters for each possible root.
const TERTIAN_ROTATIONS: [(char, [char; 7]); 7] = [
    ('C', ['C', 'E', 'G', 'B', 'D', 'F', 'A']),
    ('D', ['D', 'F', 'A', 'C', 'E', 'G', 'B']),
    ('E', ['E', 'G', 'B', 'D', 'F', 'A', 'C']),
    ('F', ['F', 'A', 'C', 'E', 'G', 'B', 'D']),
    ('G', ['G', 'B', 'D', 'F', 'A', 'C', 'E']),
    ('A', ['A', 'C', 'E', 'G', 'B', 'D', 'F']),
    ('B', ['B', 'D', 'F', 'A', 'C', 'E', 'G']),
];

// Close-stack octave for each rotation slot, keeping the root at octave 4
// and every later third above the previous one.
const CLOSE_STACK_OCTAVES: [(char, [i32; 7]); 7] = [
    ('C', [4, 4, 4, 4, 5, 5, 5]),
    ('D', [4, 4, 4, 5, 5, 5, 5]),
    ('E', [4, 4, 4, 5, 5, 5, 6]),
    ('F', [4, 4, 5, 5, 5, 5, 6]),
    ('G', [4, 4, 5, 5, 5, 6, 6]),
    ('A', [4, 5, 5, 5, 5, 6, 6]),
    ('B', [4, 5, 5, 5, 6, 6, 6]),
];

fn tertian_rotation(root: char) -> Option<&'static [char; 7]> {
    TERTIAN_ROTATIONS
        .iter()
        .find(|(letter, _)| *letter == root)
        .map(|(_, rotation)| rotation)
}

fn close_stack_octaves(root: char) -> Option<&'static [i32; 7]> {
    CLOSE_STACK_OCTAVES
        .iter()
        .find(|(letter, _)| *letter == root)
        .map(|(_, octaves)| octaves)
}

fn tertian_distance(root: char, letter: char) -> Option<usize> {
    tertian_rotation(root)?.iter().position(|&l| l == letter)
}

/// One flag per tertian degree found in the stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct IntervalFlags {
    minor_third: bool,
    major_third: bool,
    diminished_fifth: bool,
    perfect_fifth: bool,
    augmented_fifth: bool,
    diminished_seventh: bool,
    minor_seventh: bool,
    major_seventh: bool,
    minor_ninth: bool,
    major_ninth: bool,
    perfect_eleventh: bool,
    sharp_eleventh: bool,
    minor_thirteenth: bool,
    major_thirteenth: bool,
}

impl IntervalFlags {
    fn any_seventh(&self) -> bool {
        self.diminished_seventh || self.minor_seventh || self.major_seventh
    }
}

/// A set of notes analyzable as a tertian chord.
#[derive(Debug, Clone, Default)]
pub struct Chord {
    notes: Vec<Note>,
    stack: Vec<Note>,
    bass: Option<Note>,
    midi_intervals: Vec<i32>,
    flags: IntervalFlags,
    is_stacked: bool,
}

impl Chord {
    /// An empty chord.
    pub fn new() -> Self {
        Chord::default()
    }

    /// Build a chord from pitch strings.
    ///
    /// ```
    /// use tertian::Chord;
    ///
    /// let mut chord = Chord::from_pitches(&["C4", "E4", "G4"]).unwrap();
    /// assert_eq!(chord.name(), "C");
    /// ```
    pub fn from_pitches(pitches: &[&str]) -> Result<Self, TertianError> {
        let mut chord = Chord::new();
        for pitch in pitches {
            chord.add_note(Note::new(pitch)?);
        }
        Ok(chord)
    }

    /// Build a chord from existing notes.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let mut chord = Chord::new();
        for note in notes {
            chord.add_note(note);
        }
        chord
    }

    // ===== Mutators (all clear the stacked flag) ===== //

    /// Append a note. The first note of a chord is flagged not-in-chord,
    /// later ones in-chord; rests are never in-chord.
    pub fn add_note(&mut self, mut note: Note) {
        note.set_in_chord(!self.notes.is_empty());
        self.notes.push(note);
        self.is_stacked = false;
    }

    /// Append a note given as a pitch string.
    pub fn add_pitch(&mut self, pitch: &str) -> Result<(), TertianError> {
        self.add_note(Note::new(pitch)?);
        Ok(())
    }

    /// Insert a note at an insertion-order position.
    pub fn insert_note(&mut self, index: usize, mut note: Note) {
        note.set_in_chord(true);
        let index = index.min(self.notes.len());
        self.notes.insert(index, note);
        self.is_stacked = false;
    }

    /// Remove the note at an insertion-order position.
    pub fn remove_note(&mut self, index: usize) {
        if index < self.notes.len() {
            self.notes.remove(index);
            self.is_stacked = false;
        }
    }

    /// Remove the most recently added note.
    pub fn remove_top_note(&mut self) {
        self.notes.pop();
        self.is_stacked = false;
    }

    /// Transpose every note, preserving each note's accidental family where
    /// the target chroma has a spelling in it, falling back to the natural
    /// family otherwise.
    pub fn transpose(&mut self, semitones: i32) -> Result<(), TertianError> {
        if semitones == 0 {
            return Ok(());
        }
        for note in &mut self.notes {
            let family = Accidental::from_symbol(note.alter_symbol()).unwrap_or_default();
            if note.transpose(semitones, family).is_err() {
                note.transpose(semitones, Accidental::Natural)?;
            }
        }
        self.is_stacked = false;
        Ok(())
    }

    /// Set the duration of every note from a tick count.
    pub fn set_duration_ticks(&mut self, ticks: i32) {
        for note in &mut self.notes {
            note.set_duration_ticks(ticks);
        }
        for note in &mut self.stack {
            note.set_duration_ticks(ticks);
        }
    }

    // ===== Plain queries ===== //

    pub fn size(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    /// Chord duration: the minimum duration over its notes.
    pub fn duration_ticks(&self) -> i32 {
        self.notes
            .iter()
            .map(Note::duration_ticks)
            .min()
            .unwrap_or(0)
    }

    /// Chord duration in quarter notes.
    pub fn quarter_duration(&self) -> f64 {
        self.notes
            .iter()
            .map(|n| n.duration().quarter_duration())
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    // ===== Stacking ===== //

    /// True when the current stack matches the current notes.
    pub fn is_stacked_in_thirds(&self) -> bool {
        self.is_stacked
    }

    fn ensure_stacked(&mut self) {
        if !self.is_stacked {
            self.stack_in_thirds();
        }
    }

    /// Rebuild the close stack from the current notes.
    ///
    /// Soft failures (no sounding notes, fewer than three unique pitch
    /// classes) log a warning and leave the previous stack stale with the
    /// stacked flag down.
    pub fn stack_in_thirds(&mut self) {
        self.is_stacked = false;

        let mut sounding: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.is_note_on())
            .cloned()
            .collect();
        if sounding.is_empty() {
            warn!("cannot stack an empty chord");
            return;
        }

        sounding.sort_by_key(Note::midi_number);
        self.bass = sounding.first().cloned();

        // Keep one note per pitch class, the lowest-sounding one.
        let mut unique: Vec<Note> = Vec::new();
        for note in sounding {
            if !unique.iter().any(|n| n.pitch_class() == note.pitch_class()) {
                unique.push(note);
            }
        }
        if unique.len() < 3 {
            warn!(
                unique_pitch_classes = unique.len(),
                "chord has fewer than 3 unique pitch classes, leaving it unstacked"
            );
            return;
        }

        // Try each note as the root; the cheapest tertian rotation wins,
        // ties going to the lowest-sounding candidate.
        let mut best: Option<(usize, char, usize)> = None; // (cost, letter, index)
        for (index, candidate) in unique.iter().enumerate() {
            let root_letter = match candidate.step() {
                Some(letter) => letter,
                None => continue,
            };
            let mut cost = 0usize;
            let mut valid = true;
            for note in &unique {
                match note.step().and_then(|l| tertian_distance(root_letter, l)) {
                    Some(distance) => cost += distance,
                    None => {
                        valid = false;
                        break;
                    }
                }
            }
            if valid && best.map_or(true, |(c, _, _)| cost < c) {
                best = Some((cost, root_letter, index));
            }
        }

        let (_, root_letter, _) = match best {
            Some(found) => found,
            None => {
                warn!("no viable root candidate for chord");
                return;
            }
        };

        // Rebuild ascending by rotation distance; on step-letter collisions
        // the first-seen (lowest) note wins.
        let mut slots: [Option<Note>; 7] = Default::default();
        for note in &unique {
            if let Some(distance) = note.step().and_then(|l| tertian_distance(root_letter, l)) {
                if slots[distance].is_none() {
                    slots[distance] = Some(note.clone());
                }
            }
        }

        let octaves = match close_stack_octaves(root_letter) {
            Some(octaves) => octaves,
            None => return,
        };

        let mut stack: Vec<Note> = Vec::new();
        for (distance, slot) in slots.iter().enumerate() {
            if let Some(note) = slot {
                let mut normalized = note.clone();
                if normalized.set_octave(octaves[distance]).is_err() {
                    warn!(pitch = %note.pitch(), "could not normalize stack octave");
                    return;
                }
                stack.push(normalized);
            }
        }

        // Force every member acoustically above its predecessor, in the
        // lowest octave that gets it there. Boundary spellings like B#
        // already sound above a lower-lettered neighbor, so the comparison
        // is on MIDI numbers, not written octaves.
        for i in 1..stack.len() {
            let prev_midi = stack[i - 1].midi_number();
            while stack[i].midi_number() <= prev_midi {
                let octave = stack[i].octave() + 1;
                if stack[i].set_octave(octave).is_err() {
                    warn!(pitch = %stack[i].pitch(), "could not align stack octave");
                    return;
                }
            }
        }

        let root_midi = match stack.first() {
            Some(root) => root.midi_number(),
            None => return,
        };
        self.midi_intervals = stack[1..]
            .iter()
            .map(|note| note.midi_number() - root_midi)
            .collect();
        self.flags = compute_flags(&stack, &self.midi_intervals);
        self.stack = stack;
        self.is_stacked = true;
    }

    /// The close stack, root first. Empty when the chord cannot be stacked.
    pub fn stack(&mut self) -> &[Note] {
        self.ensure_stacked();
        if self.is_stacked {
            &self.stack
        } else {
            &[]
        }
    }

    /// Number of notes in the close stack.
    pub fn stack_size(&mut self) -> usize {
        self.stack().len()
    }

    /// The stacking root.
    pub fn root(&mut self) -> Option<&Note> {
        self.ensure_stacked();
        if self.is_stacked {
            self.stack.first()
        } else {
            None
        }
    }

    /// The lowest sounding note, recorded even when stacking fails.
    pub fn bass_note(&mut self) -> Option<&Note> {
        self.ensure_stacked();
        self.bass.as_ref()
    }

    /// Semitone distances from the root to every later stack member.
    pub fn midi_intervals(&mut self) -> &[i32] {
        self.ensure_stacked();
        if self.is_stacked {
            &self.midi_intervals
        } else {
            &[]
        }
    }

    /// Names of the root-to-member stack intervals.
    pub fn interval_names(&mut self) -> Vec<String> {
        self.ensure_stacked();
        if !self.is_stacked {
            return Vec::new();
        }
        let root = self.stack[0].clone();
        self.stack[1..]
            .iter()
            .filter_map(|note| Interval::from_notes(root.clone(), note.clone()).ok())
            .map(|interval| interval.name())
            .collect()
    }

    // ===== Quality predicates ===== //

    pub fn is_major(&mut self) -> bool {
        self.ensure_stacked();
        self.is_stacked && self.flags.major_third && !self.flags.augmented_fifth
    }

    pub fn is_minor(&mut self) -> bool {
        self.ensure_stacked();
        self.is_stacked && self.flags.minor_third && !self.flags.diminished_fifth
    }

    pub fn is_augmented(&mut self) -> bool {
        self.ensure_stacked();
        self.is_stacked && self.flags.major_third && self.flags.augmented_fifth
    }

    /// The written diminished-seventh chord: minor third, diminished fifth
    /// and the 9-semitone diminished seventh.
    pub fn is_diminished(&mut self) -> bool {
        self.ensure_stacked();
        self.is_stacked
            && self.flags.minor_third
            && self.flags.diminished_fifth
            && self.flags.diminished_seventh
    }

    pub fn is_half_diminished(&mut self) -> bool {
        self.ensure_stacked();
        self.is_stacked && self.flags.minor_third && self.flags.diminished_fifth
    }

    pub fn is_dominant_seventh(&mut self) -> bool {
        self.ensure_stacked();
        self.is_stacked
            && self.flags.major_third
            && !self.flags.diminished_fifth
            && !self.flags.augmented_fifth
            && self.flags.minor_seventh
    }

    /// True when every adjacent stack interval passes the tonal whitelist.
    pub fn is_tonal(&mut self) -> bool {
        self.ensure_stacked();
        if !self.is_stacked {
            return false;
        }
        for pair in self.stack.windows(2) {
            let tonal = Interval::from_notes(pair[0].clone(), pair[1].clone())
                .map(|interval| interval.is_tonal())
                .unwrap_or(false);
            if !tonal {
                return false;
            }
        }
        true
    }

    /// Tonality under a caller-supplied model instead of the builtin
    /// whitelist.
    pub fn is_tonal_with<F>(&mut self, model: F) -> bool
    where
        F: Fn(&mut Chord) -> bool,
    {
        self.ensure_stacked();
        if !self.is_stacked {
            return false;
        }
        model(self)
    }

    // ===== Naming ===== //

    /// Chord name with enharmonic root re-spelling.
    pub fn name(&mut self) -> String {
        self.get_name(true)
    }

    /// Chord name. With `use_enharmonic`, a root whose step distance to the
    /// second stack member is not a third is re-spelled through the opposite
    /// accidental family.
    pub fn get_name(&mut self, use_enharmonic: bool) -> String {
        self.ensure_stacked();
        if !self.is_stacked || !self.is_tonal() {
            warn!("unable to name a non-tonal chord");
            return "non-tonal chord".to_string();
        }

        let flags = self.flags;
        if !flags.minor_third && !flags.major_third {
            return String::new();
        }

        let basic = basic_classification(&flags);

        let ninth = if flags.minor_ninth {
            "9b"
        } else if flags.major_ninth {
            "9"
        } else {
            ""
        };
        let eleventh = if flags.perfect_eleventh {
            "(11)"
        } else if flags.sharp_eleventh {
            "(#11)"
        } else {
            ""
        };
        let thirteenth = if flags.minor_thirteenth {
            "13b"
        } else if flags.major_thirteenth {
            "13"
        } else {
            ""
        };

        let mut root_class = self.stack[0].pitch_class().to_string();
        if use_enharmonic {
            if let Some(respelled) = self.respelled_root() {
                root_class = respelled;
            }
        }

        let mut bass_suffix = String::new();
        if let Some(bass) = &self.bass {
            if bass.pitch_class() != self.stack[0].pitch_class() {
                bass_suffix = format!("/{}", bass.pitch_class());
            }
        }

        format!("{root_class}{basic}{ninth}{eleventh}{thirteenth}{bass_suffix}")
    }

    // A root not a written third below the next stack member is re-spelled
    // through the opposite accidental family; naturals stay put.
    fn respelled_root(&self) -> Option<String> {
        if self.stack.len() < 2 {
            return None;
        }
        let root = &self.stack[0];
        let interval = Interval::from_notes(root.clone(), self.stack[1].clone()).ok()?;
        if interval.pitch_step_interval() == 3 {
            return None;
        }

        let family = Accidental::from_symbol(root.alter_symbol())?;
        let opposite = match family {
            Accidental::Sharp | Accidental::DoubleSharp => Accidental::Flat,
            Accidental::Flat | Accidental::DoubleFlat => Accidental::Sharp,
            Accidental::Natural => return None,
        };

        let respelled = midi_to_pitch(root.midi_number(), opposite).ok()?;
        let components = split_pitch(&respelled).ok()?;
        Some(components.pitch_class)
    }
}

fn compute_flags(stack: &[Note], midi_intervals: &[i32]) -> IntervalFlags {
    let mut flags = IntervalFlags::default();
    for (offset, &semitones) in midi_intervals.iter().enumerate() {
        let member = &stack[offset + 1];
        match semitones {
            3 => flags.minor_third = true,
            4 => flags.major_third = true,
            6 => flags.diminished_fifth = true,
            7 => flags.perfect_fifth = true,
            8 => flags.augmented_fifth = true,
            9 => flags.diminished_seventh = true,
            10 => flags.minor_seventh = true,
            11 => flags.major_seventh = true,
            13 => flags.minor_ninth = true,
            14 => flags.major_ninth = true,
            17 => flags.perfect_eleventh = true,
            // 18 semitones reads as a sharp eleventh only when written
            // sharp; otherwise it is a compound flat fifth.
            18 => {
                if member.alter_symbol() == "#" {
                    flags.sharp_eleventh = true;
                } else {
                    flags.diminished_fifth = true;
                }
            }
            20 => flags.minor_thirteenth = true,
            21 => flags.major_thirteenth = true,
            _ => {}
        }
    }
    flags
}

// Third/fifth/seventh matrix for the basic chord quality token.
fn basic_classification(flags: &IntervalFlags) -> &'static str {
    if flags.minor_third {
        if flags.diminished_fifth {
            if !flags.any_seventh() {
                "m(b5)"
            } else if flags.diminished_seventh {
                "º"
            } else if flags.minor_seventh {
                "m7(b5)"
            } else {
                "m7M(b5)"
            }
        } else if flags.perfect_fifth || !flags.augmented_fifth {
            if !flags.any_seventh() {
                "m"
            } else if flags.diminished_seventh {
                "dim7"
            } else if flags.minor_seventh {
                "m7"
            } else {
                "m7M"
            }
        } else {
            ""
        }
    } else if flags.diminished_fifth {
        if !flags.any_seventh() {
            "(b5)"
        } else if flags.diminished_seventh {
            "dim7(b5)"
        } else if flags.minor_seventh {
            "7(b5)"
        } else {
            "7M(b5)"
        }
    } else if flags.augmented_fifth {
        if !flags.any_seventh() {
            "aug"
        } else if flags.diminished_seventh {
            "aug(dim7)"
        } else if flags.minor_seventh {
            "aug(7)"
        } else {
            "aug(7M)"
        }
    } else if !flags.any_seventh() {
        ""
    } else if flags.diminished_seventh {
        "dim7"
    } else if flags.minor_seventh {
        "7"
    } else {
        "7M"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(pitches: &[&str]) -> Chord {
        Chord::from_pitches(pitches).unwrap()
    }

    #[test]
    fn test_major_triad() {
        let mut c = chord(&["C4", "E4", "G4"]);
        assert_eq!(c.name(), "C");
        assert!(c.is_major());
        assert!(!c.is_minor());
        assert_eq!(c.midi_intervals(), &[4, 7]);
        assert_eq!(c.interval_names(), vec!["M3", "P5"]);
    }

    #[test]
    fn test_stack_reorders_and_normalizes_octaves() {
        let mut c = chord(&["C4", "D7", "G6", "E4"]);
        let stack: Vec<String> = c.stack().iter().map(|n| n.pitch()).collect();
        assert_eq!(stack, vec!["C4", "E4", "G4", "D5"]);
        assert_eq!(c.name(), "C9");
    }

    #[test]
    fn test_stack_is_strictly_ascending() {
        let mut c = chord(&["A5", "C5", "E7", "G3"]);
        let midis: Vec<i32> = c.stack().iter().map(Note::midi_number).collect();
        assert!(midis.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_boundary_spelling_keeps_minimal_octave() {
        // B#4 (MIDI 72) already sounds above G4; it must not be pushed to
        // B#5.
        let mut c = chord(&["C4", "E4", "G4", "B#4"]);
        let midis: Vec<i32> = c.stack().iter().map(Note::midi_number).collect();
        assert_eq!(midis, vec![60, 64, 67, 72]);
        assert_eq!(c.midi_intervals(), &[4, 7, 12]);
    }

    #[test]
    fn test_stack_size_equals_unique_pitch_classes() {
        let mut c = chord(&["C4", "C5", "E4", "G4", "G5"]);
        assert_eq!(c.size(), 5);
        assert_eq!(c.stack_size(), 3);
    }

    #[test]
    fn test_stacking_is_idempotent() {
        let mut c = chord(&["E5", "C5", "G3", "Bb3"]);
        c.stack_in_thirds();
        let first: Vec<String> = c.stack().iter().map(|n| n.pitch()).collect();
        c.stack_in_thirds();
        let second: Vec<String> = c.stack().iter().map(|n| n.pitch()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_too_few_pitch_classes_is_soft() {
        let mut c = chord(&["C4", "C4", "C4"]);
        assert!(!c.is_stacked_in_thirds());
        assert_eq!(c.stack_size(), 0);
        assert_eq!(c.name(), "non-tonal chord");
        assert_eq!(c.size(), 3);
    }

    #[test]
    fn test_empty_chord_is_soft() {
        let mut c = Chord::new();
        c.stack_in_thirds();
        assert!(!c.is_stacked_in_thirds());
        assert_eq!(c.name(), "non-tonal chord");
    }

    #[test]
    fn test_rests_are_filtered() {
        let mut c = chord(&["C4", "rest", "E4", "G4"]);
        assert_eq!(c.size(), 4);
        assert_eq!(c.stack_size(), 3);
        assert_eq!(c.name(), "C");
    }

    #[test]
    fn test_half_diminished_is_not_diminished() {
        let mut c = chord(&["C4", "Eb4", "Gb4", "Bb4"]);
        assert!(c.is_half_diminished());
        assert!(!c.is_diminished());
        assert_eq!(c.midi_intervals(), &[3, 6, 10]);
        assert_eq!(c.name(), "Cm7(b5)");
    }

    #[test]
    fn test_diminished_seventh_chord() {
        let mut c = chord(&["C4", "Eb4", "Gb4", "Bbb4"]);
        assert!(c.is_diminished());
        assert_eq!(c.midi_intervals(), &[3, 6, 9]);
        assert_eq!(c.name(), "Cº");
    }

    #[test]
    fn test_dominant_seventh() {
        let mut c = chord(&["C4", "E4", "G4", "Bb4"]);
        assert!(c.is_dominant_seventh());
        assert_eq!(c.name(), "C7");
    }

    #[test]
    fn test_augmented_triad() {
        let mut c = chord(&["C4", "E4", "G#4"]);
        assert!(c.is_augmented());
        assert_eq!(c.name(), "Caug");
    }

    #[test]
    fn test_slash_bass() {
        let mut c = chord(&["C4", "E4", "G3", "B4"]);
        assert_eq!(c.name(), "C7M/G");
        assert_eq!(c.bass_note().map(|n| n.pitch()), Some("G3".to_string()));
        assert_eq!(c.root().map(|n| n.pitch_class().to_string()), Some("C".to_string()));
    }

    #[test]
    fn test_minor_chords() {
        let mut am = chord(&["A4", "C5", "E7"]);
        assert_eq!(am.name(), "Am");
        assert!(am.is_minor());

        let mut cm_over_g = chord(&["C5", "Eb5", "G3"]);
        assert_eq!(cm_over_g.name(), "Cm/G");

        let mut am7_over_g = chord(&["A5", "C5", "E7", "G3"]);
        assert_eq!(am7_over_g.name(), "Am7/G");
    }

    #[test]
    fn test_tonality() {
        assert!(chord(&["C4", "E4", "G4"]).is_tonal());
        assert!(chord(&["D4", "F4", "A4"]).is_tonal());
        // F to A# is an augmented third, not tonal.
        assert!(!chord(&["D4", "F4", "A#4"]).is_tonal());
    }

    #[test]
    fn test_custom_tonality_model() {
        let mut c = chord(&["D4", "F4", "A#4"]);
        assert!(c.is_tonal_with(|_| true));
        let mut c2 = chord(&["C4", "E4", "G4"]);
        assert!(!c2.is_tonal_with(|_| false));
    }

    #[test]
    fn test_mutators_clear_stacked_flag() {
        let mut c = chord(&["C4", "E4", "G4"]);
        c.stack_in_thirds();
        assert!(c.is_stacked_in_thirds());

        c.add_note(Note::new("Bb4").unwrap());
        assert!(!c.is_stacked_in_thirds());
        assert_eq!(c.name(), "C7");

        c.remove_top_note();
        assert!(!c.is_stacked_in_thirds());
        assert_eq!(c.name(), "C");
    }

    #[test]
    fn test_in_chord_flags() {
        let c = chord(&["C4", "E4", "G4"]);
        assert!(!c.notes()[0].in_chord());
        assert!(c.notes()[1].in_chord());
        assert!(c.notes()[2].in_chord());
    }

    #[test]
    fn test_transpose_whole_chord() {
        let mut c = chord(&["C4", "E4", "G4"]);
        c.transpose(2).unwrap();
        let pitches: Vec<String> = c.notes().iter().map(|n| n.pitch()).collect();
        assert_eq!(pitches, vec!["D4", "F#4", "A4"]);
        assert_eq!(c.name(), "D");
    }

    #[test]
    fn test_duration_is_minimum_over_notes() {
        let mut c = chord(&["C4", "E4", "G4"]);
        assert_eq!(c.duration_ticks(), 256);
        c.set_duration_ticks(128);
        assert_eq!(c.duration_ticks(), 128);
        assert_eq!(c.quarter_duration(), 0.5);
    }
}
