/// One timed lyric line.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Seconds from the start of the track.
    pub time: f64,
    pub text: String,
}

/// Timed lyrics sorted ascending by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricsDocument {
    pub lines: Vec<LyricLine>,
}

impl LyricsDocument {
    /// Parse LRC text.
    ///
    /// Every leading `[mm:ss]` / `[mm:ss.f]` tag on a line yields one entry
    /// with the line's text. Lines without a time tag (including ID tags
    /// such as `[ar:...]`) are dropped.
    pub fn parse(input: &str) -> Self {
        let mut lines = Vec::new();
        for raw in input.lines() {
            lines.extend(parse_lyric_line(raw.trim()));
        }

        // Stable: equal timestamps keep input order.
        lines.sort_by(|a: &LyricLine, b: &LyricLine| a.time.total_cmp(&b.time));
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Index of the last line whose time is at or before `position`.
    pub fn active_index(&self, position: f64) -> Option<usize> {
        // `lines` is sorted, so the lines at or before `position` form a prefix.
        let n = self.lines.partition_point(|l| l.time <= position);
        n.checked_sub(1)
    }

    pub fn line(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }
}

fn parse_lyric_line(line: &str) -> Vec<LyricLine> {
    let mut remaining = line;
    let mut stamps = Vec::new();

    // Extract all timestamps at the beginning
    while remaining.starts_with('[') {
        let Some(end) = remaining.find(']') else {
            break;
        };
        match parse_timestamp(&remaining[1..end]) {
            Some(t) => {
                stamps.push(t);
                remaining = &remaining[end + 1..];
            }
            None => break,
        }
    }

    let text = remaining.trim();
    stamps
        .into_iter()
        .map(|time| LyricLine {
            time,
            text: text.to_string(),
        })
        .collect()
}

/// Parse `mm:ss` or `mm:ss.f` with one to three fraction digits.
fn parse_timestamp(s: &str) -> Option<f64> {
    let (minutes, rest) = s.split_once(':')?;
    let (seconds, fraction) = match rest.split_once('.') {
        Some((sec, frac)) => (sec, Some(frac)),
        None => (rest, None),
    };

    let all_digits = |v: &str| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(minutes) || !all_digits(seconds) || seconds.len() > 2 {
        return None;
    }
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;

    let millis = match fraction {
        None => 0,
        Some(f) if all_digits(f) && f.len() <= 3 => {
            let value: u64 = f.parse().ok()?;
            value * 10u64.pow(3 - f.len() as u32)
        }
        Some(_) => return None,
    };

    // Absurd minute counts overflow; treat them like any other bad tag.
    let total_ms = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))?;
    Some(total_ms as f64 / 1000.0)
}
