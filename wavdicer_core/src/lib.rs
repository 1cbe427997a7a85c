use std::fs;
use std::path::{Path, PathBuf};

use hound::WavWriter;
use log::{debug, info};

mod error;
mod scan;
mod slice;
mod source;
mod times;

pub use error::DiceError;
pub use scan::{find_first_sound, pre_roll_frames, rewind_to_pre_roll};
pub use slice::write_track;
pub use source::{AudioInfo, FrameSource, WavSource};
pub use times::{
    parse_time_token, parse_track_times, track_frames, TimeParseError, TokenPart,
    REST_OF_STREAM_SECS,
};

/// Prefix given to every output file.
pub const DEFAULT_TRACK_NAME: &str = "Track";
/// Audio kept in front of the first detected sound, in seconds.
pub const DEFAULT_PRE_ROLL_SECS: f64 = 0.5;
/// Extension used when the input file has none.
pub const DEFAULT_EXTENSION: &str = "wav";

/// Configuration for a single dicing run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Path of the source wave file.
    pub input_path: PathBuf,
    /// Directory into which the tracks are written.
    pub output_dir: PathBuf,
    /// Requested track lengths in seconds; zero or less means "the rest".
    pub track_lengths: Vec<f64>,
    /// Literal prefix of the output file names.
    pub track_name: String,
    /// Extension of the output file names, without the dot.
    pub extension: String,
    /// Seconds of audio kept before the first non-silent frame.
    pub pre_roll_secs: f64,
}

impl Config {
    /// Construct a [`Config`] with default naming, writing next to the input.
    pub fn new<P: AsRef<Path>>(input: P, track_lengths: Vec<f64>) -> Result<Self, DiceError> {
        Self::builder(input, track_lengths).build()
    }

    pub fn builder<P: AsRef<Path>>(input: P, track_lengths: Vec<f64>) -> ConfigBuilder {
        ConfigBuilder {
            input_path: input.as_ref().to_path_buf(),
            output_dir: None,
            track_lengths,
            track_name: DEFAULT_TRACK_NAME.to_owned(),
            pre_roll_secs: DEFAULT_PRE_ROLL_SECS,
        }
    }

    /// Full path of the track with the given 1-based index.
    pub fn track_path(&self, index: u32) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}.{}",
            self.track_name,
            format_track_number(index),
            self.extension
        ))
    }

    /// File name of the track without directory or extension, e.g. `Track01`.
    pub fn track_label(&self, index: u32) -> String {
        format!("{}{}", self.track_name, format_track_number(index))
    }
}

#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    input_path: PathBuf,
    output_dir: Option<PathBuf>,
    track_lengths: Vec<f64>,
    track_name: String,
    pre_roll_secs: f64,
}

impl ConfigBuilder {
    pub fn output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn track_name<S: Into<String>>(mut self, name: S) -> Self {
        self.track_name = name.into();
        self
    }

    pub fn pre_roll_secs(mut self, seconds: f64) -> Self {
        self.pre_roll_secs = seconds;
        self
    }

    pub fn build(self) -> Result<Config, DiceError> {
        if self.track_lengths.is_empty() {
            return Err(DiceError::NoTracks);
        }
        if !self.pre_roll_secs.is_finite() || self.pre_roll_secs < 0.0 {
            return Err(DiceError::InvalidPreRoll);
        }

        let file_name = self
            .input_path
            .file_name()
            .ok_or_else(|| DiceError::InvalidInputName(self.input_path.clone()))?;
        let extension = Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned());

        let output_dir = self
            .output_dir
            .unwrap_or_else(|| input_directory(&self.input_path));

        Ok(Config {
            input_path: self.input_path,
            output_dir,
            track_lengths: self.track_lengths,
            track_name: self.track_name,
            extension,
            pre_roll_secs: self.pre_roll_secs,
        })
    }
}

/// Directory part of `path`; empty when the path is a bare file name, which
/// `Path::join` treats as the working directory.
fn input_directory(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Format a track number with at least two digits: `1` becomes `"01"`,
/// `100` stays `"100"`.
pub fn format_track_number(number: u32) -> String {
    format!("{number:02}")
}

/// A track written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenTrack {
    /// 1-based position in the requested sequence.
    pub index: u32,
    pub label: String,
    pub path: PathBuf,
    pub frames: u64,
}

/// A track a run would produce, as computed by [`plan_tracks`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedTrack {
    pub index: u32,
    pub path: PathBuf,
    /// Source frame at which the track begins.
    pub start_frame: u64,
    pub frames: u64,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct DiceReport {
    pub info: AudioInfo,
    pub first_sound_frame: u64,
    /// Frame the first track starts at, after pre-roll.
    pub start_frame: u64,
    pub tracks: Vec<WrittenTrack>,
}

/// Milestones of a run, delivered in order.
#[derive(Debug)]
pub enum ProgressEvent<'a> {
    /// The header was read; nothing has been consumed yet.
    Opened { info: &'a AudioInfo },
    /// Leading silence was scanned and the cursor rewound.
    SoundDetected {
        first_sound_frame: u64,
        start_frame: u64,
    },
    TrackWritten { track: &'a WrittenTrack },
    Finish,
}

/// Dice the input described by `config`, without progress reporting.
pub fn run(config: Config) -> Result<DiceReport, DiceError> {
    run_with_progress(config, |_| {})
}

/// Dice the input described by `config`, calling `on_event` as the run
/// advances.
///
/// Tracks are written one after another; if a write fails the run stops and
/// tracks already written stay on disk.
pub fn run_with_progress<F>(config: Config, mut on_event: F) -> Result<DiceReport, DiceError>
where
    F: FnMut(ProgressEvent<'_>),
{
    let mut source = WavSource::open(&config.input_path)?;
    ensure_input_not_overwritten(&config)?;
    let info = *source.info();
    info!(
        "opened '{}': {} channel(s), {} bit, {} Hz, {} frames",
        config.input_path.display(),
        info.channels,
        info.bits_per_sample,
        info.frame_rate,
        info.total_frames
    );
    on_event(ProgressEvent::Opened { info: &info });

    let (first_sound_frame, start_frame) = trim_silence(&mut source, &config)?;
    on_event(ProgressEvent::SoundDetected {
        first_sound_frame,
        start_frame,
    });

    let mut tracks = Vec::with_capacity(config.track_lengths.len());
    for (index, &seconds) in (1u32..).zip(&config.track_lengths) {
        let path = config.track_path(index);
        let requested = track_frames(seconds, info.frame_rate);

        let writer = WavWriter::create(&path, info.wav_spec())?;
        let frames = write_track(&mut source, writer, requested)?;
        debug!(
            "wrote {frames} of {requested} requested frames to '{}'",
            path.display()
        );

        let track = WrittenTrack {
            index,
            label: config.track_label(index),
            path,
            frames,
        };
        on_event(ProgressEvent::TrackWritten { track: &track });
        tracks.push(track);
    }

    on_event(ProgressEvent::Finish);
    info!("wrote {} track(s)", tracks.len());

    Ok(DiceReport {
        info,
        first_sound_frame,
        start_frame,
        tracks,
    })
}

/// Work out which tracks a run would write, and how long each would be,
/// without creating any files.
pub fn plan_tracks(config: &Config) -> Result<Vec<PlannedTrack>, DiceError> {
    let mut source = WavSource::open(&config.input_path)?;
    ensure_input_not_overwritten(config)?;
    let total_frames = source.info().total_frames;
    let frame_rate = source.info().frame_rate;

    let (_, mut cursor) = trim_silence(&mut source, config)?;

    let plan = (1u32..)
        .zip(&config.track_lengths)
        .map(|(index, &seconds)| {
            let frames = track_frames(seconds, frame_rate).min(total_frames - cursor);
            let track = PlannedTrack {
                index,
                path: config.track_path(index),
                start_frame: cursor,
                frames,
            };
            cursor += frames;
            track
        })
        .collect();

    Ok(plan)
}

/// Refuse to run when any track path names the input file, since creating
/// that track would truncate the source while it is still being read.
fn ensure_input_not_overwritten(config: &Config) -> Result<(), DiceError> {
    let input = fs::canonicalize(&config.input_path)?;
    for index in (1u32..).take(config.track_lengths.len()) {
        let path = config.track_path(index);
        if fs::canonicalize(&path).is_ok_and(|existing| existing == input) {
            return Err(DiceError::OutputOverwritesInput(path));
        }
    }
    Ok(())
}

fn trim_silence<S: FrameSource>(source: &mut S, config: &Config) -> Result<(u64, u64), DiceError> {
    let first_sound_frame = find_first_sound(source)?;
    let pre_roll = pre_roll_frames(config.pre_roll_secs, source.info().frame_rate);
    let start_frame = rewind_to_pre_roll(source, first_sound_frame, pre_roll)?;
    info!("first sound at frame {first_sound_frame}, starting at frame {start_frame}");
    Ok((first_sound_frame, start_frame))
}
