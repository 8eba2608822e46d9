pub mod chord;
pub mod duration;
pub mod error;
pub mod interval;
pub mod note;
pub mod pitch;

pub use chord::Chord;
pub use duration::{
    figure_ticks, note_type_name, note_type_to_ticks, parse_note_type, ticks_to_note_type,
    ticks_to_note_type_name, RhythmFigure,
};
pub use error::TertianError;
pub use interval::Interval;
pub use note::{Note, NoteDuration, DEFAULT_DIVISIONS_PER_QUARTER};
pub use pitch::{
    alter_name_to_symbol, alter_symbol_to_value, alter_value_to_name, alter_value_to_symbol,
    freq_to_midi, freq_to_pitch, midi_to_freq, midi_to_pitch, midi_to_pitches, pitch_to_freq,
    pitch_to_midi, semitones_between, split_pitch, transpose_pitch, Accidental, PitchComponents,
    MIDI_MAX, MIDI_MIN, MIDI_REST, REST_PITCH,
};

/// Name a set of pitches as a tertian chord.
/// This is the main entry point for the library.
///
/// ```
/// use tertian::name_chord;
///
/// assert_eq!(name_chord(&["C4", "E4", "G3", "B4"]).unwrap(), "C7M/G");
/// ```
pub fn name_chord(pitches: &[&str]) -> Result<String, TertianError> {
    let mut chord = Chord::from_pitches(pitches)?;
    Ok(chord.name())
}
