//! Integration tests for the tertian analyzer
//!
//! Tests the full pipeline from pitch strings through stacking to chord
//! names, plus the codec surfaces the analyzer is built on.

use tertian::{
    freq_to_midi, midi_to_pitch, midi_to_pitches, name_chord, pitch_to_freq, pitch_to_midi,
    Accidental, Chord, Interval, Note, TertianError,
};

#[test]
fn test_name_chord_triads() {
    assert_eq!(name_chord(&["C4", "E4", "G4"]).unwrap(), "C");
    assert_eq!(name_chord(&["A4", "C5", "E7"]).unwrap(), "Am");
    assert_eq!(name_chord(&["C4", "E4", "G#4"]).unwrap(), "Caug");
    assert_eq!(name_chord(&["C4", "Eb4", "Gb4"]).unwrap(), "Cm(b5)");
}

#[test]
fn test_name_chord_sevenths() {
    assert_eq!(name_chord(&["C4", "E4", "G4", "Bb4"]).unwrap(), "C7");
    assert_eq!(name_chord(&["C4", "E4", "G4", "B4"]).unwrap(), "C7M");
    assert_eq!(name_chord(&["C4", "Eb4", "G4", "Bb4"]).unwrap(), "Cm7");
    assert_eq!(name_chord(&["C4", "Eb4", "Gb4", "Bb4"]).unwrap(), "Cm7(b5)");
    assert_eq!(name_chord(&["C4", "Eb4", "Gb4", "Bbb4"]).unwrap(), "Cº");
}

#[test]
fn test_name_chord_inversions_get_slash_bass() {
    // The analyzer finds the root from the tertian rotation, not the bass.
    assert_eq!(name_chord(&["C4", "E4", "G3", "B4"]).unwrap(), "C7M/G");
    assert_eq!(name_chord(&["E5", "C5", "G3", "Bb3"]).unwrap(), "C7/G");
    assert_eq!(name_chord(&["C5", "Eb5", "G3"]).unwrap(), "Cm/G");
    assert_eq!(name_chord(&["A5", "C5", "E7", "G3"]).unwrap(), "Am7/G");
}

#[test]
fn test_name_chord_extensions() {
    // Input octaves are scattered; the close stack normalizes them.
    assert_eq!(name_chord(&["C4", "D7", "G6", "E4"]).unwrap(), "C9");
}

#[test]
fn test_name_chord_sentinel() {
    // Single pitch class repeated: nothing to stack.
    assert_eq!(name_chord(&["C4", "C4", "C4"]).unwrap(), "non-tonal chord");
}

#[test]
fn test_chord_analysis_pipeline() {
    let mut chord = Chord::from_pitches(&["E5", "C5", "G3", "Bb3"]).unwrap();

    let stack: Vec<String> = chord.stack().iter().map(|n| n.pitch()).collect();
    assert_eq!(stack, vec!["C4", "E4", "G4", "Bb4"]);
    assert_eq!(chord.midi_intervals(), &[4, 7, 10]);
    assert_eq!(chord.interval_names(), vec!["M3", "P5", "m7"]);

    assert!(chord.is_major());
    assert!(chord.is_dominant_seventh());
    assert!(!chord.is_minor());
    assert!(!chord.is_augmented());
    assert!(chord.is_tonal());

    assert_eq!(chord.root().map(|n| n.pitch()), Some("C4".to_string()));
    assert_eq!(chord.bass_note().map(|n| n.pitch()), Some("G3".to_string()));
}

#[test]
fn test_chord_mutation_reanalyzes() {
    let mut chord = Chord::from_pitches(&["C4", "E4", "G4"]).unwrap();
    assert_eq!(chord.name(), "C");

    chord.add_note(Note::new("Bb4").unwrap());
    assert_eq!(chord.name(), "C7");

    chord.transpose(2).unwrap();
    assert_eq!(chord.name(), "D7");

    chord.remove_top_note();
    assert_eq!(chord.name(), "D");
}

#[test]
fn test_enharmonic_spellings_per_family() {
    assert_eq!(midi_to_pitches(60), vec!["B#3", "C4", "Dbb4"]);
    assert_eq!(midi_to_pitch(61, Accidental::Flat).unwrap(), "Db4");
    assert_eq!(midi_to_pitch(61, Accidental::Sharp).unwrap(), "C#4");

    // Every spelling converts back to the same MIDI number.
    for pitch in midi_to_pitches(61) {
        assert_eq!(pitch_to_midi(&pitch).unwrap(), 61);
    }
}

#[test]
fn test_pitch_codec_errors_are_hard() {
    assert!(matches!(
        pitch_to_midi("H4"),
        Err(TertianError::InvalidPitch { .. })
    ));
    assert!(matches!(
        midi_to_pitch(60, Accidental::Flat),
        Err(TertianError::InvalidAccidentalForMidi { .. })
    ));
    assert!(matches!(
        midi_to_pitch(300, Accidental::Natural),
        Err(TertianError::MidiOutOfRange(300))
    ));
}

#[test]
fn test_interval_analysis() {
    let third = Interval::new("C4", "E4").unwrap();
    assert_eq!(third.name(), "M3");
    assert!(third.is_tonal());

    let tritone = Interval::new("C4", "F#4").unwrap();
    assert_eq!(tritone.name(), "A4");
    assert!(tritone.is_tonal());

    // Same 9 semitones, different written intervals.
    assert_eq!(Interval::new("C4", "A4").unwrap().name(), "M6");
    assert_eq!(Interval::new("C4", "Bbb4").unwrap().name(), "d7");

    let rest = Note::rest();
    assert!(matches!(
        Interval::from_notes(Note::new("C4").unwrap(), rest),
        Err(TertianError::RestInterval)
    ));
}

#[test]
fn test_frequency_round_trip() {
    assert_eq!(pitch_to_freq("A4"), 440.0);
    assert_eq!(freq_to_midi(440.0), (69, 0));

    let (midi, cents) = freq_to_midi(261.63);
    assert_eq!(midi, 60);
    assert!(cents.abs() <= 1);
}

#[test]
fn test_transposing_instrument_notes() {
    // A written C4 on a Bb instrument sounds a major second lower.
    let mut note = Note::new("C4").unwrap();
    note.set_transposing_interval(-1, -2);
    assert_eq!(note.pitch(), "C4");
    assert_eq!(note.sounding_pitch(), "Bb3");
    assert_eq!(note.midi_number(), 58);
}

#[test]
fn test_note_durations() {
    let mut note = Note::new("C4").unwrap();
    note.set_note_type("eighth-dot").unwrap();
    assert_eq!(note.duration_ticks(), 192);
    assert_eq!(note.duration().note_type(), "eighth-dot");

    let mut chord = Chord::from_pitches(&["C4", "E4", "G4"]).unwrap();
    chord.set_duration_ticks(512);
    assert_eq!(chord.duration_ticks(), 512);
    assert_eq!(chord.quarter_duration(), 2.0);
}
