mod cli;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::debug;
use wavdicer_core::{plan_tracks, run_with_progress, Config, ProgressEvent};

use crate::cli::build_cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = build_cli().get_matches();

    let input_path = matches
        .get_one::<PathBuf>("input")
        .expect("required argument");
    if !input_path.is_file() {
        return Err(anyhow!(
            "input file does not exist: {}",
            input_path.display()
        ));
    }

    let track_lengths = matches
        .get_one::<Vec<f64>>("times")
        .cloned()
        .expect("required argument");
    let track_name = matches
        .get_one::<String>("track-name")
        .expect("defaulted argument");
    let dry_run = matches.get_flag("dry-run");

    let mut builder = Config::builder(input_path, track_lengths).track_name(track_name.as_str());
    if let Some(output_dir) = matches.get_one::<PathBuf>("output") {
        builder = builder.output_dir(output_dir);
    }
    let config = builder.build().with_context(|| {
        format!(
            "failed to create configuration for '{}'",
            input_path.display()
        )
    })?;
    debug!("{config:?}");

    if dry_run {
        let plan = plan_tracks(&config)
            .with_context(|| format!("failed to plan tracks for '{}'", input_path.display()))?;

        println!("Dry run: would write {} track(s):", plan.len());
        for track in plan {
            println!("  {} ({} frames)", track.path.display(), track.frames);
        }

        return Ok(());
    }

    let progress = ProgressBar::new_spinner();
    progress.set_draw_target(ProgressDrawTarget::stderr());
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let progress_handle = progress.clone();
    let track_count = config.track_lengths.len();
    let result = run_with_progress(config, move |event| match event {
        ProgressEvent::Opened { info } => {
            progress_handle.suspend(|| {
                println!("Channels: {}", info.channels);
                println!("Sample width: {}", info.sample_width());
                println!("Frequency: {}", info.frame_rate);
                println!("Frames: {}", info.total_frames);
                println!("Seconds: {}", info.total_seconds());
            });
            progress_handle.set_message("Scanning for sound");
        }
        ProgressEvent::SoundDetected { start_frame, .. } => {
            progress_handle.set_message(format!("Slicing from frame {start_frame}"));
        }
        ProgressEvent::TrackWritten { track } => {
            progress_handle.suspend(|| println!("Finished writing {}", track.label));
            progress_handle.set_message(format!("{} / {track_count} tracks", track.index));
        }
        ProgressEvent::Finish => {
            progress_handle.set_message("Completed");
        }
    })
    .with_context(|| format!("failed to dice '{}'", input_path.display()));

    progress.finish_and_clear();

    result?;

    Ok(())
}
