use std::path::PathBuf;

use clap::{builder::ValueParser, value_parser, Arg, ArgAction, Command};
use wavdicer_core::{parse_track_times, DEFAULT_TRACK_NAME};

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Dices a single wave file into multiple wave files.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("input")
                .long("input")
                .value_name("P")
                .help("Path to the input wave file.")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("times")
                .long("times")
                .value_name("T")
                .help("Lengths of output wave files, e.g. \"1:04 4:31 10:13\" (with quotes). 0:00 takes the rest.")
                .required(true)
                .value_parser(ValueParser::new(parse_track_times)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("OUTPUT_DIR")
                .help("Directory where the tracks are written [default: the input's directory]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("track-name")
                .long("track-name")
                .value_name("NAME")
                .help("Prefix of the generated file names")
                .default_value(DEFAULT_TRACK_NAME),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Preview the tracks without writing files")
                .action(ArgAction::SetTrue),
        )
}
