//! # Error Types
//!
//! This module defines all error types for the tertian crate.
//!
//! Conversion and construction functions return these as hard failures:
//! malformed pitch strings, enharmonic spellings that don't exist for a
//! given MIDI number, unknown rhythm figure names, and intervals built on
//! rests. Soft failures (an empty chord asked to stack, a tick count that
//! falls outside every rhythm band) never surface here; they log a warning
//! and return a sentinel instead.
//!
//! ## Usage
//! ```rust
//! use tertian::{pitch_to_midi, TertianError};
//!
//! match pitch_to_midi("H4") {
//!     Ok(midi) => println!("{midi}"),
//!     Err(TertianError::InvalidPitch { pitch, message }) => {
//!         eprintln!("bad pitch '{}': {}", pitch, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TertianError {
    /// Malformed or unrepresentable pitch string.
    ///
    /// Occurs when a pitch string fails the `<step><accidental?><octave?>`
    /// grammar, or names a spelling outside the supported table
    /// (octaves 0..=10, MIDI 12..=132).
    ///
    /// # Example
    /// ```
    /// # use tertian::TertianError;
    /// let err = TertianError::InvalidPitch {
    ///     pitch: "H4".to_string(),
    ///     message: "unknown step letter 'H'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid pitch 'H4': unknown step letter 'H'");
    /// ```
    #[error("Invalid pitch '{pitch}': {message}")]
    InvalidPitch { pitch: String, message: String },

    /// The requested accidental family cannot spell this MIDI number.
    ///
    /// Each chroma admits only some of the five spelling families; asking
    /// for, say, the flat spelling of MIDI 60 (chroma C) fails.
    ///
    /// # Example
    /// ```
    /// # use tertian::TertianError;
    /// let err = TertianError::InvalidAccidentalForMidi {
    ///     midi: 60,
    ///     accidental: "b".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "MIDI note 60 has no spelling in the 'b' accidental family"
    /// );
    /// ```
    #[error("MIDI note {midi} has no spelling in the '{accidental}' accidental family")]
    InvalidAccidentalForMidi { midi: i32, accidental: String },

    /// A MIDI number outside the supported 12..=132 range (and not the
    /// rest sentinel) was passed to a spelling conversion.
    #[error("MIDI note {0} is outside the supported range 12..=132")]
    MidiOutOfRange(i32),

    /// Unknown rhythm figure name.
    ///
    /// # Example
    /// ```
    /// # use tertian::TertianError;
    /// let err = TertianError::UnknownNoteType("quaver".to_string());
    /// assert_eq!(err.to_string(), "Unknown note type 'quaver'");
    /// ```
    #[error("Unknown note type '{0}'")]
    UnknownNoteType(String),

    /// Intervals are defined between sounding pitches only.
    #[error("Cannot build an interval from a rest")]
    RestInterval,
}
