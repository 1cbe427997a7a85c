use std::io::{Seek, Write};

use hound::WavWriter;

use crate::{DiceError, FrameSource};

/// Copy up to `frames` frames from the source's cursor into `writer`, then
/// finalize it so the header describes exactly what was written.
///
/// Running out of input early is not an error; the track is simply shorter.
/// Returns the number of frames copied.
pub fn write_track<S, W>(
    source: &mut S,
    mut writer: WavWriter<W>,
    frames: u64,
) -> Result<u64, DiceError>
where
    S: FrameSource,
    W: Write + Seek,
{
    let mut frame = vec![0i32; usize::from(source.info().channels)];
    let mut written = 0u64;

    while written < frames && source.read_frame(&mut frame)? {
        for &sample in &frame {
            writer.write_sample(sample)?;
        }
        written += 1;
    }

    writer.finalize()?;
    Ok(written)
}
