use log::{debug, info};

use crate::{DiceError, FrameSource};

/// Walk the source one frame at a time from its current position and return
/// the index of the first frame whose channel-0 sample is strictly positive.
///
/// Only positive samples count as sound; a stream that starts with negative
/// values is still considered silent until the waveform crosses above zero.
/// When no such frame exists the whole stream is consumed and `0` is
/// returned.
pub fn find_first_sound<S: FrameSource>(source: &mut S) -> Result<u64, DiceError> {
    let mut frame = vec![0i32; usize::from(source.info().channels)];
    let mut index = 0u64;

    while source.read_frame(&mut frame)? {
        if frame[0] > 0 {
            debug!("first non-silent frame at {index}");
            return Ok(index);
        }
        index += 1;
    }

    info!("no non-silent frame found in {index} frames");
    Ok(0)
}

/// Frames covered by `seconds` of pre-roll, truncated toward zero.
///
/// The pre-roll itself is floored before it is subtracted, so at odd frame
/// rates the start lands on `first - floor(rate / 2)` rather than on
/// `trunc(first - rate / 2)`: rate 11 with sound at frame 30 starts at 25.
pub fn pre_roll_frames(seconds: f64, frame_rate: u32) -> u64 {
    (seconds * f64::from(frame_rate)) as u64
}

/// Reset the cursor and skip ahead to `pre_roll` frames before
/// `first_sound_frame`, never before the start of the stream.
///
/// Returns the frame the cursor now points at.
pub fn rewind_to_pre_roll<S: FrameSource>(
    source: &mut S,
    first_sound_frame: u64,
    pre_roll: u64,
) -> Result<u64, DiceError> {
    let start_frame = first_sound_frame.saturating_sub(pre_roll);
    source.seek(0)?;
    if start_frame > 0 {
        source.seek(start_frame)?;
    }
    Ok(start_frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemorySource;

    fn mono_with_pulse(total: usize, at: usize, value: i32) -> MemorySource {
        let mut samples = vec![0; total];
        samples[at] = value;
        MemorySource::new(1, 8_000, samples)
    }

    #[test]
    fn finds_single_positive_sample() {
        let mut source = mono_with_pulse(16_000, 4_000, 100);
        assert_eq!(find_first_sound(&mut source).unwrap(), 4_000);
        assert_eq!(source.frames_read, 4_001);
    }

    #[test]
    fn ignores_negative_samples() {
        let mut samples = vec![0; 100];
        samples[10] = -3_000;
        samples[20] = 1;
        let mut source = MemorySource::new(1, 8_000, samples);
        assert_eq!(find_first_sound(&mut source).unwrap(), 20);
    }

    #[test]
    fn only_inspects_the_first_channel() {
        let mut samples = vec![0; 20];
        samples[5] = 500;
        samples[12] = 7;
        let mut source = MemorySource::new(2, 8_000, samples);
        assert_eq!(find_first_sound(&mut source).unwrap(), 6);
    }

    #[test]
    fn silent_stream_reports_zero_and_is_consumed() {
        let mut source = MemorySource::new(1, 8_000, vec![0, -1, -2, 0]);
        assert_eq!(find_first_sound(&mut source).unwrap(), 0);
        assert_eq!(source.position(), 4);
    }

    #[test]
    fn rewinds_half_a_second_before_sound() {
        let mut source = mono_with_pulse(16_000, 6_000, 1);
        let first = find_first_sound(&mut source).unwrap();
        let start = rewind_to_pre_roll(&mut source, first, pre_roll_frames(0.5, 8_000)).unwrap();
        assert_eq!(start, 2_000);
        assert_eq!(source.position(), 2_000);
    }

    #[test]
    fn rewind_clamps_to_start() {
        let mut source = mono_with_pulse(16_000, 4_000, 1);
        find_first_sound(&mut source).unwrap();
        assert_eq!(rewind_to_pre_roll(&mut source, 4_000, 4_000).unwrap(), 0);
        assert_eq!(source.position(), 0);

        find_first_sound(&mut source).unwrap();
        assert_eq!(rewind_to_pre_roll(&mut source, 10, 4_000).unwrap(), 0);
        assert_eq!(source.position(), 0);
    }

    #[test]
    fn odd_rates_floor_the_pre_roll_before_subtracting() {
        let mut source = mono_with_pulse(100, 30, 1);
        let first = find_first_sound(&mut source).unwrap();
        let start = rewind_to_pre_roll(&mut source, first, pre_roll_frames(0.5, 11)).unwrap();
        assert_eq!(start, 25);
        assert_eq!(source.position(), 25);
    }

    #[test]
    fn pre_roll_truncates() {
        assert_eq!(pre_roll_frames(0.5, 8_000), 4_000);
        assert_eq!(pre_roll_frames(0.5, 44_101), 22_050);
        assert_eq!(pre_roll_frames(0.0, 44_100), 0);
    }
}
