use thiserror::Error;

/// Length substituted for a zero (or negative) track length: ten hours, which
/// in practice means "everything that is left".
pub const REST_OF_STREAM_SECS: f64 = 36_000.0;

/// Which side of a `minutes:seconds` token failed to parse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenPart {
    Minutes,
    Seconds,
}

impl std::fmt::Display for TokenPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPart::Minutes => f.write_str("minutes"),
            TokenPart::Seconds => f.write_str("seconds"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("no track lengths given")]
    Empty,
    #[error("'{token}' is not of the form minutes:seconds")]
    MissingColon { token: String },
    #[error("invalid {part} in '{token}'")]
    InvalidNumber { token: String, part: TokenPart },
}

/// Convert a `minutes:seconds` token such as `"1:20"` into seconds.
///
/// Both sides must be non-negative integers. Seconds are not limited to
/// `0..60`, so `"0:90"` is a valid way of writing a minute and a half.
pub fn parse_time_token(token: &str) -> Result<f64, TimeParseError> {
    let (minutes, seconds) = token
        .split_once(':')
        .ok_or_else(|| TimeParseError::MissingColon {
            token: token.to_owned(),
        })?;

    let invalid = |part| TimeParseError::InvalidNumber {
        token: token.to_owned(),
        part,
    };
    let minutes = minutes
        .parse::<u64>()
        .map_err(|_| invalid(TokenPart::Minutes))?;
    let seconds = seconds
        .parse::<u64>()
        .map_err(|_| invalid(TokenPart::Seconds))?;

    Ok(60.0 * minutes as f64 + seconds as f64)
}

/// Convert a whitespace separated list of tokens (`"1:04 4:31 10:13"`) into
/// track lengths in seconds, keeping their order.
pub fn parse_track_times(value: &str) -> Result<Vec<f64>, TimeParseError> {
    let lengths = value
        .split_ascii_whitespace()
        .map(parse_time_token)
        .collect::<Result<Vec<_>, _>>()?;

    if lengths.is_empty() {
        return Err(TimeParseError::Empty);
    }

    Ok(lengths)
}

/// Number of frames covered by a track of `seconds` at `frame_rate`.
///
/// Lengths of zero or below select the rest of the stream.
pub fn track_frames(seconds: f64, frame_rate: u32) -> u64 {
    let seconds = if seconds <= 0.0 {
        REST_OF_STREAM_SECS
    } else {
        seconds
    };
    (seconds * f64::from(frame_rate)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(parse_time_token("1:20").unwrap(), 80.0);
        assert_eq!(parse_time_token("0:05").unwrap(), 5.0);
        assert_eq!(parse_time_token("10:13").unwrap(), 613.0);
        assert_eq!(parse_time_token("0:90").unwrap(), 90.0);
    }

    #[test]
    fn parses_lists_in_order() {
        assert_eq!(
            parse_track_times("1:04 4:31 10:13").unwrap(),
            vec![64.0, 271.0, 613.0]
        );
        assert_eq!(parse_track_times("  0:01  0:00 ").unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn rejects_tokens_without_colon() {
        assert!(matches!(
            parse_time_token("90"),
            Err(TimeParseError::MissingColon { .. })
        ));
    }

    #[test]
    fn rejects_non_integer_parts() {
        assert_eq!(
            parse_time_token("a:10"),
            Err(TimeParseError::InvalidNumber {
                token: "a:10".into(),
                part: TokenPart::Minutes,
            })
        );
        assert_eq!(
            parse_time_token("1:1.5"),
            Err(TimeParseError::InvalidNumber {
                token: "1:1.5".into(),
                part: TokenPart::Seconds,
            })
        );
        assert!(parse_time_token("1:-5").is_err());
        assert!(parse_time_token("1:").is_err());
    }

    #[test]
    fn rejects_empty_lists() {
        assert_eq!(parse_track_times("   "), Err(TimeParseError::Empty));
    }

    #[test]
    fn zero_length_selects_the_rest() {
        assert_eq!(track_frames(1.0, 8_000), 8_000);
        assert_eq!(track_frames(0.0, 8_000), 288_000_000);
        assert_eq!(track_frames(-3.0, 10), 360_000);
        assert_eq!(track_frames(0.5, 44_101), 22_050);
    }
}
