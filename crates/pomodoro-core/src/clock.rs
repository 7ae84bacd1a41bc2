use anyhow::{
    anyhow,
    bail,
};

/// Parse a `MM:SS` duration into total seconds.
///
/// Minutes take one to three digits (at most 999), seconds one or two digits
/// below 60.
/// A zero-length duration is rejected so progress always has a divisor.
pub fn parse_clock(text: &str) -> anyhow::Result<u32> {
    let trimmed = text.trim();
    let (minutes, seconds) = trimmed
        .split_once(':')
        .ok_or_else(|| anyhow!("expected MM:SS, got {trimmed:?}"))?;

    let minutes = parse_field(minutes, 3)
        .map_err(|err| anyhow!("invalid minutes in {trimmed:?}: {err}"))?;
    let seconds = parse_field(seconds, 2)
        .map_err(|err| anyhow!("invalid seconds in {trimmed:?}: {err}"))?;

    if seconds >= 60 {
        bail!("seconds must be below 60, got {seconds}");
    }

    let total = minutes * 60 + seconds;
    if total == 0 {
        bail!("duration must be longer than 00:00");
    }
    Ok(total)
}

fn parse_field(raw: &str, max_digits: usize) -> anyhow::Result<u32> {
    if raw.is_empty()
        || raw.len() > max_digits
        || !raw.bytes().all(|b| b.is_ascii_digit())
    {
        bail!("expected 1-{max_digits} digits, got {raw:?}");
    }
    Ok(raw.parse()?)
}

/// Forgiving conversion: every part that is not a number counts as zero.
pub fn clock_seconds_lossy(text: &str) -> u32 {
    let mut parts = text
        .trim()
        .splitn(2, ':')
        .map(|part| part.trim().parse::<u32>().unwrap_or(0));
    let minutes = parts.next().unwrap_or(0);
    let seconds = parts.next().unwrap_or(0);
    minutes.saturating_mul(60).saturating_add(seconds)
}

/// Render seconds as zero-padded `MM:SS`. Minutes never roll over into hours.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Elapsed share of `total` as a percentage in `0.0..=100.0`.
pub fn progress_percent(total: u32, remaining: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let elapsed = total.saturating_sub(remaining);
    f64::from(elapsed) / f64::from(total) * 100.0
}
