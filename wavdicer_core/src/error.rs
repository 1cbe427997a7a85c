use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while dicing a wave file.
#[derive(Debug, Error)]
pub enum DiceError {
    /// Wrapper around IO errors encountered while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper around errors produced by the wave container codec.
    #[error(transparent)]
    Wav(#[from] hound::Error),

    /// Error returned when the source holds floating point samples.
    #[error("only integer PCM wave files are supported")]
    UnsupportedSampleFormat,

    /// Error returned when the header advertises no channels.
    #[error("input stream does not contain any channels")]
    NoChannels,

    /// Error returned when the header advertises a frame rate of zero.
    #[error("input stream does not advertise a frame rate")]
    MissingFrameRate,

    /// Error returned when no track lengths were requested.
    #[error("at least one track length is required")]
    NoTracks,

    /// Error returned when the pre-roll is negative or not a number.
    #[error("pre-roll must be a finite, non-negative number of seconds")]
    InvalidPreRoll,

    /// Error returned when a track would be written over the input file.
    #[error("track '{}' would overwrite the input file", .0.display())]
    OutputOverwritesInput(PathBuf),

    /// Error produced when a file name cannot be derived from the input path.
    #[error("failed to derive a file name from '{}'", .0.display())]
    InvalidInputName(PathBuf),
}
