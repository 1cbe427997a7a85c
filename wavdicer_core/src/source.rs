use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec};

use crate::DiceError;

/// Header values of a PCM source; output tracks inherit all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioInfo {
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Frames per second, per channel.
    pub frame_rate: u32,
    pub total_frames: u64,
}

impl AudioInfo {
    /// Bytes used by a single sample of one channel.
    pub fn sample_width(&self) -> u16 {
        self.bits_per_sample.div_ceil(8)
    }

    /// Whole seconds of audio; any fractional remainder is dropped.
    pub fn total_seconds(&self) -> u64 {
        self.total_frames / u64::from(self.frame_rate)
    }

    pub fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.frame_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }

    fn from_spec(spec: WavSpec, total_frames: u64) -> Result<Self, DiceError> {
        if spec.sample_format != SampleFormat::Int {
            return Err(DiceError::UnsupportedSampleFormat);
        }
        if spec.channels == 0 {
            return Err(DiceError::NoChannels);
        }
        if spec.sample_rate == 0 {
            return Err(DiceError::MissingFrameRate);
        }

        Ok(Self {
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            frame_rate: spec.sample_rate,
            total_frames,
        })
    }
}

/// A forward-only reader of interleaved PCM frames with a resettable cursor.
///
/// Samples are widened to `i32` whatever the stored sample width, so
/// channel 0 of a frame is always `frame[0]`.
pub trait FrameSource {
    fn info(&self) -> &AudioInfo;

    /// Fill `frame` (one slot per channel) with the next frame. Returns
    /// `false` once the stream is exhausted.
    fn read_frame(&mut self, frame: &mut [i32]) -> Result<bool, DiceError>;

    /// Move the cursor to `frame`, counted from the start of the stream.
    fn seek(&mut self, frame: u64) -> Result<(), DiceError>;
}

/// [`FrameSource`] over a RIFF/WAVE container.
pub struct WavSource<R> {
    reader: WavReader<R>,
    info: AudioInfo,
}

impl WavSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DiceError> {
        Self::new(WavReader::open(path)?)
    }
}

impl<R: Read> WavSource<R> {
    pub fn new(reader: WavReader<R>) -> Result<Self, DiceError> {
        let info = AudioInfo::from_spec(reader.spec(), u64::from(reader.duration()))?;
        Ok(Self { reader, info })
    }
}

impl<R: Read + Seek> FrameSource for WavSource<R> {
    fn info(&self) -> &AudioInfo {
        &self.info
    }

    fn read_frame(&mut self, frame: &mut [i32]) -> Result<bool, DiceError> {
        let mut samples = self.reader.samples::<i32>();
        for slot in frame.iter_mut() {
            match samples.next() {
                Some(sample) => *slot = sample?,
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    fn seek(&mut self, frame: u64) -> Result<(), DiceError> {
        let frame = frame.min(self.info.total_frames);
        // hound addresses frames with u32, which bounds total_frames as well.
        self.reader.seek(frame as u32)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;

    /// Interleaved samples held in memory, for exercising the pipeline
    /// without touching the file system.
    pub struct MemorySource {
        info: AudioInfo,
        samples: Vec<i32>,
        cursor: u64,
        pub frames_read: u64,
    }

    impl MemorySource {
        pub fn new(channels: u16, frame_rate: u32, samples: Vec<i32>) -> Self {
            let total_frames = (samples.len() / usize::from(channels)) as u64;
            Self {
                info: AudioInfo {
                    channels,
                    bits_per_sample: 16,
                    frame_rate,
                    total_frames,
                },
                samples,
                cursor: 0,
                frames_read: 0,
            }
        }

        pub fn position(&self) -> u64 {
            self.cursor
        }
    }

    impl FrameSource for MemorySource {
        fn info(&self) -> &AudioInfo {
            &self.info
        }

        fn read_frame(&mut self, frame: &mut [i32]) -> Result<bool, DiceError> {
            if self.cursor >= self.info.total_frames {
                return Ok(false);
            }
            let start = self.cursor as usize * frame.len();
            frame.copy_from_slice(&self.samples[start..start + frame.len()]);
            self.cursor += 1;
            self.frames_read += 1;
            Ok(true)
        }

        fn seek(&mut self, frame: u64) -> Result<(), DiceError> {
            self.cursor = frame.min(self.info.total_frames);
            Ok(())
        }
    }
}
