use std::fmt;

/// Duration in the worklog's "{h}h {m}m {s}s" notation.
///
/// Fields are kept as written: adding two durations never carries minutes
/// into hours or seconds into minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LogDuration {
    pub(crate) hours: u64,
    pub(crate) minutes: u64,
    pub(crate) seconds: u64,
}

impl LogDuration {
    /// Split whole seconds into hours/minutes/seconds by truncating division
    pub(crate) fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: total % 3600 / 60,
            seconds: total % 60,
        }
    }

    /// Saturates at `u64::MAX` for absurd recorded values
    pub(crate) fn total_seconds(self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }

    /// Per-field addition without carry. Fails instead of wrapping.
    pub(crate) fn add(self, other: LogDuration) -> Result<Self, String> {
        let field = |a: u64, b: u64, unit: &str| {
            a.checked_add(b)
                .ok_or_else(|| format!("{unit} overflow adding {b} to {a}"))
        };
        Ok(Self {
            hours: field(self.hours, other.hours, "hours")?,
            minutes: field(self.minutes, other.minutes, "minutes")?,
            seconds: field(self.seconds, other.seconds, "seconds")?,
        })
    }

    /// Parse "1h 2m 3s". Exactly three tokens, suffixed h, m, s in that order.
    pub(crate) fn parse(s: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [h, m, sec] = tokens.as_slice() else {
            return Err(format!(
                "expected 3 duration tokens, found {}",
                tokens.len()
            ));
        };
        Ok(Self {
            hours: parse_token(h, 'h')?,
            minutes: parse_token(m, 'm')?,
            seconds: parse_token(sec, 's')?,
        })
    }
}

fn parse_token(token: &str, suffix: char) -> Result<u64, String> {
    let digits = token
        .strip_suffix(suffix)
        .ok_or_else(|| format!("duration token \"{token}\" does not end in '{suffix}'"))?;
    digits
        .parse::<u64>()
        .map_err(|_| format!("duration token \"{token}\" is not a number"))
}

impl fmt::Display for LogDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}
