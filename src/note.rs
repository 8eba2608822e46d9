//! # Note
//!
//! A single written note (or rest) with its duration, chord membership and
//! optional transposing-instrument interval.
//!
//! A note keeps its *written* spelling (`"Eb"`, octave 5) separate from its
//! *sounding* spelling: setting a transposing interval (e.g. diatonic -1,
//! chromatic +2 for a Bb clarinet) rewrites the sounding pitch class by
//! walking the family-appropriate chromatic scale, carrying the octave
//! across the scale boundary. Untransposed notes sound as written.

use crate::duration::{figure_ticks, parse_note_type, note_type_name, ticks_to_note_type, RhythmFigure};
use crate::error::TertianError;
use crate::pitch::{
    pitch_to_freq, pitch_to_midi, midi_to_pitch, split_pitch, Accidental, MIDI_REST, REST_PITCH,
};

/// Default resolution for note durations, in divisions per quarter note.
pub const DEFAULT_DIVISIONS_PER_QUARTER: i32 = 256;

/// A note's rhythmic value at a fixed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteDuration {
    pub figure: RhythmFigure,
    pub dots: u8,
    pub ticks: i32,
    pub divisions_per_quarter: i32,
}

impl Default for NoteDuration {
    fn default() -> Self {
        NoteDuration {
            figure: RhythmFigure::Quarter,
            dots: 0,
            ticks: DEFAULT_DIVISIONS_PER_QUARTER,
            divisions_per_quarter: DEFAULT_DIVISIONS_PER_QUARTER,
        }
    }
}

impl NoteDuration {
    /// Duration in quarter notes.
    pub fn quarter_duration(&self) -> f64 {
        f64::from(self.ticks) / f64::from(self.divisions_per_quarter)
    }

    /// MusicXML note-type name with dot suffixes.
    pub fn note_type(&self) -> String {
        note_type_name(self.figure, self.dots)
    }
}

/// A written note or rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    written_pitch_class: String,
    written_octave: i32,
    sounding_pitch_class: String,
    sounding_octave: i32,
    alter_symbol: String,
    midi_number: i32,
    is_note_on: bool,
    in_chord: bool,
    transpose_diatonic: i32,
    transpose_chromatic: i32,
    voice: i32,
    staff: i32,
    duration: NoteDuration,
}

impl Note {
    /// Build a note from a pitch string. Bare pitch classes get octave 4;
    /// `"rest"` builds a rest.
    ///
    /// ```
    /// use tertian::Note;
    ///
    /// let note = Note::new("Eb5").unwrap();
    /// assert_eq!(note.midi_number(), 75);
    /// assert_eq!(note.pitch_class(), "Eb");
    /// ```
    pub fn new(pitch: &str) -> Result<Self, TertianError> {
        let mut note = Note::rest();
        note.set_pitch(pitch)?;
        Ok(note)
    }

    /// Build a note from a MIDI number, spelled in the given family.
    pub fn from_midi(midi: i32, accidental: Accidental) -> Result<Self, TertianError> {
        let pitch = midi_to_pitch(midi, accidental)?;
        Note::new(&pitch)
    }

    /// Build a rest.
    pub fn rest() -> Self {
        Note {
            written_pitch_class: REST_PITCH.to_string(),
            written_octave: 0,
            sounding_pitch_class: REST_PITCH.to_string(),
            sounding_octave: 0,
            alter_symbol: String::new(),
            midi_number: MIDI_REST,
            is_note_on: false,
            in_chord: false,
            transpose_diatonic: 0,
            transpose_chromatic: 0,
            voice: 1,
            staff: 0,
            duration: NoteDuration::default(),
        }
    }

    /// Replace the written pitch, keeping duration and transposing interval.
    pub fn set_pitch(&mut self, pitch: &str) -> Result<(), TertianError> {
        let components = split_pitch(pitch)?;
        if components.is_rest() {
            self.written_pitch_class = REST_PITCH.to_string();
            self.written_octave = 0;
            self.sounding_pitch_class = REST_PITCH.to_string();
            self.sounding_octave = 0;
            self.alter_symbol = String::new();
            self.midi_number = MIDI_REST;
            self.is_note_on = false;
            self.in_chord = false;
            self.transpose_diatonic = 0;
            self.transpose_chromatic = 0;
            return Ok(());
        }

        // The MIDI codec also validates the spelling (quarter tones and
        // impossible family/chroma pairs are rejected here).
        let full = format!("{}{}", components.pitch_class, components.octave);
        let written_midi = pitch_to_midi(&full)?;

        self.written_pitch_class = components.pitch_class.clone();
        self.written_octave = components.octave;
        self.sounding_pitch_class = components.pitch_class;
        self.sounding_octave = components.octave;
        self.alter_symbol = components.alter_symbol;
        self.midi_number = written_midi;
        self.is_note_on = true;

        self.set_transposing_interval(self.transpose_diatonic, self.transpose_chromatic);
        Ok(())
    }

    /// Move the written note to another octave, recomputing MIDI and
    /// sounding state.
    pub fn set_octave(&mut self, octave: i32) -> Result<(), TertianError> {
        if !self.is_note_on {
            return Ok(());
        }
        let pitch = format!("{}{}", self.written_pitch_class, octave);
        self.set_pitch(&pitch)
    }

    /// Transpose the written pitch by semitones, spelling the result in the
    /// given family.
    pub fn transpose(&mut self, semitones: i32, accidental: Accidental) -> Result<(), TertianError> {
        if !self.is_note_on {
            return Ok(());
        }
        let written_midi = self.midi_number - self.transpose_chromatic;
        let pitch = midi_to_pitch(written_midi + semitones, accidental)?;
        self.set_pitch(&pitch)
    }

    /// Set the transposing-instrument interval (written-to-sounding), as a
    /// diatonic step count and a chromatic semitone count.
    pub fn set_transposing_interval(&mut self, diatonic: i32, chromatic: i32) {
        if !self.is_note_on {
            return;
        }

        let written_midi = self.midi_number - self.transpose_chromatic;
        self.transpose_diatonic = diatonic;
        self.transpose_chromatic = chromatic;
        self.midi_number = written_midi + chromatic;

        if chromatic == 0 {
            self.sounding_pitch_class = self.written_pitch_class.clone();
            self.sounding_octave = self.written_octave;
            return;
        }

        // Single-octave scales used only for the written-to-sounding walk.
        const SHARP: [&str; 12] = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        const FLAT: [&str; 12] = [
            "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
        ];
        const DOUBLE_SHARP: [&str; 12] = [
            "C#", "Cx", "D#", "Dx", "E#", "F#", "Fx", "G#", "Gx", "A#", "Ax", "B#",
        ];
        const DOUBLE_FLAT: [&str; 12] = [
            "Cb", "Dbb", "Db", "Ebb", "Eb", "Fb", "Gbb", "Gb", "Abb", "Ab", "Bbb", "Bb",
        ];

        let class = self.written_pitch_class.as_str();
        let up = chromatic > 0;

        let sharp_idx = SHARP.iter().position(|&p| p == class);
        let flat_idx = FLAT.iter().position(|&p| p == class);
        let double_sharp_idx = DOUBLE_SHARP.iter().position(|&p| p == class);
        let double_flat_idx = DOUBLE_FLAT.iter().position(|&p| p == class);

        // Upward transpositions of naturals/sharps walk the sharp scale,
        // downward ones prefer the flat scale; double accidentals keep
        // their own family.
        let (scale, idx): (&[&str; 12], usize) = if up && sharp_idx.is_some() {
            (&SHARP, sharp_idx.unwrap_or_default())
        } else if let Some(i) = flat_idx {
            (&FLAT, i)
        } else if let Some(i) = sharp_idx {
            (&SHARP, i)
        } else if let Some(i) = double_sharp_idx {
            (&DOUBLE_SHARP, i)
        } else if let Some(i) = double_flat_idx {
            (&DOUBLE_FLAT, i)
        } else {
            return;
        };

        let temp_idx = idx as i32 + chromatic;
        let sounding_idx = temp_idx.rem_euclid(12) as usize;
        let octave_shift = temp_idx.div_euclid(12);

        self.sounding_pitch_class = scale[sounding_idx].to_string();
        self.sounding_octave = self.written_octave + octave_shift;
    }

    // ===== Queries ===== //

    /// Written pitch string, e.g. `"Eb5"`; `"rest"` for rests.
    pub fn pitch(&self) -> String {
        if !self.is_note_on {
            return REST_PITCH.to_string();
        }
        format!("{}{}", self.written_pitch_class, self.written_octave)
    }

    /// Sounding pitch string (equals the written pitch for untransposed
    /// notes).
    pub fn sounding_pitch(&self) -> String {
        if !self.is_note_on {
            return REST_PITCH.to_string();
        }
        format!("{}{}", self.sounding_pitch_class, self.sounding_octave)
    }

    pub fn pitch_class(&self) -> &str {
        &self.written_pitch_class
    }

    pub fn sounding_pitch_class(&self) -> &str {
        &self.sounding_pitch_class
    }

    /// Step letter of the written pitch, e.g. `'E'` for `"Eb5"`.
    pub fn step(&self) -> Option<char> {
        if !self.is_note_on {
            return None;
        }
        self.written_pitch_class.chars().next()
    }

    pub fn octave(&self) -> i32 {
        self.written_octave
    }

    pub fn sounding_octave(&self) -> i32 {
        self.sounding_octave
    }

    /// Sounding MIDI number; [`MIDI_REST`] for rests.
    pub fn midi_number(&self) -> i32 {
        self.midi_number
    }

    pub fn alter_symbol(&self) -> &str {
        &self.alter_symbol
    }

    /// Chromatic alteration of the written accidental.
    pub fn alter_value(&self) -> f64 {
        crate::pitch::alter_symbol_to_value(&self.alter_symbol).unwrap_or(0.0)
    }

    /// Frequency of the sounding pitch under the empirical model.
    pub fn frequency(&self) -> f64 {
        pitch_to_freq(&self.sounding_pitch())
    }

    pub fn is_note_on(&self) -> bool {
        self.is_note_on
    }

    pub fn is_rest(&self) -> bool {
        !self.is_note_on
    }

    pub fn is_transposed(&self) -> bool {
        self.transpose_chromatic != 0
    }

    pub fn transpose_diatonic(&self) -> i32 {
        self.transpose_diatonic
    }

    pub fn transpose_chromatic(&self) -> i32 {
        self.transpose_chromatic
    }

    pub fn in_chord(&self) -> bool {
        self.in_chord
    }

    pub fn set_in_chord(&mut self, in_chord: bool) {
        self.in_chord = in_chord && self.is_note_on;
    }

    pub fn voice(&self) -> i32 {
        self.voice
    }

    pub fn set_voice(&mut self, voice: i32) {
        self.voice = voice;
    }

    pub fn staff(&self) -> i32 {
        self.staff
    }

    pub fn set_staff(&mut self, staff: i32) {
        self.staff = staff;
    }

    // ===== Duration ===== //

    pub fn duration(&self) -> &NoteDuration {
        &self.duration
    }

    pub fn duration_ticks(&self) -> i32 {
        self.duration.ticks
    }

    /// Set the duration from a note-type name, e.g. `"half-dot"`.
    pub fn set_note_type(&mut self, note_type: &str) -> Result<(), TertianError> {
        let (figure, dots) = parse_note_type(note_type)?;
        self.duration.figure = figure;
        self.duration.dots = dots;
        self.duration.ticks = figure_ticks(figure, dots, self.duration.divisions_per_quarter);
        Ok(())
    }

    /// Set the duration from a raw tick count. When the count classifies as
    /// a figure the stored figure follows it; out-of-band counts keep the
    /// previous figure (the classifier logs the warning).
    pub fn set_duration_ticks(&mut self, ticks: i32) {
        self.duration.ticks = ticks;
        if let Some((figure, dots)) = ticks_to_note_type(ticks, self.duration.divisions_per_quarter)
        {
            self.duration.figure = figure;
            self.duration.dots = dots;
        }
    }
}
