//! Clock text formatting and parsing shared by the scoreboard surfaces.

/// Render the main clock for display.
///
/// Above one minute the clock reads `m:ss`; within the final minute it
/// switches to `seconds.tenths` so the closing seconds stay legible on an
/// overlay. Zero (or anything clamped to zero) reads `0:00`.
pub fn format_remaining(ms: u64) -> String {
    if ms == 0 {
        return "0:00".to_string();
    }

    if ms <= 60_000 {
        let seconds = ms / 1000;
        let tenths = (ms % 1000) / 100;
        return format!("{seconds}.{tenths}");
    }

    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Render a penalty countdown as `m:ss`, rounded up to the next whole second.
///
/// Ceiling rounding keeps a live penalty from ever reading `0:00` while any
/// time remains. The main clock deliberately rounds the other way; the two
/// rules are not unified.
pub fn format_penalty_remaining(ms: u64) -> String {
    let total_seconds = ms.div_ceil(1000);
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Parse free-form operator clock input into milliseconds.
///
/// Accepts `m:ss` with both halves numeric. Anything else is reduced to its
/// digits and read by length: one or two digits are seconds, three digits are
/// `m` + `ss`, four or more treat the last two digits as seconds and the rest
/// as minutes. Returns `None` for input that fits none of these shapes, in
/// which case the caller keeps the prior value.
pub fn parse_operator_input(text: &str) -> Option<u64> {
    let text = text.trim();

    if text.contains(':') {
        let mut parts = text.splitn(3, ':');
        let minutes: u64 = parts.next()?.trim().parse().ok()?;
        let seconds: u64 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        return Some((minutes * 60 + seconds) * 1000);
    }

    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    if digits.len() <= 2 {
        let seconds: u64 = digits.parse().ok()?;
        return Some(seconds * 1000);
    }

    let (minute_digits, second_digits) = if digits.len() == 3 {
        digits.split_at(1)
    } else {
        digits.split_at(digits.len() - 2)
    };

    let minutes: u64 = minute_digits.parse().ok()?;
    let seconds: u64 = second_digits.parse().ok()?;
    Some((minutes * 60 + seconds) * 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds_above_one_minute() {
        assert_eq!(format_remaining(125_000), "2:05");
        assert_eq!(format_remaining(1_200_000), "20:00");
        assert_eq!(format_remaining(61_000), "1:01");
    }

    #[test]
    fn formats_tenths_within_final_minute() {
        assert_eq!(format_remaining(45_300), "45.3");
        assert_eq!(format_remaining(60_000), "60.0");
        assert_eq!(format_remaining(999), "0.9");
    }

    #[test]
    fn formats_zero_as_flat_clock() {
        assert_eq!(format_remaining(0), "0:00");
    }

    #[test]
    fn penalty_display_rounds_up_to_whole_seconds() {
        assert_eq!(format_penalty_remaining(120_000), "2:00");
        assert_eq!(format_penalty_remaining(119_001), "2:00");
        assert_eq!(format_penalty_remaining(1), "0:01");
        assert_eq!(format_penalty_remaining(0), "0:00");
    }

    #[test]
    fn parses_colon_form() {
        assert_eq!(parse_operator_input("2:05"), Some(125_000));
        assert_eq!(parse_operator_input("20:00"), Some(1_200_000));
        assert_eq!(parse_operator_input(" 0:30 "), Some(30_000));
    }

    #[test]
    fn parses_bare_digits_by_length() {
        assert_eq!(parse_operator_input("5"), Some(5_000));
        assert_eq!(parse_operator_input("45"), Some(45_000));
        assert_eq!(parse_operator_input("205"), Some(125_000));
        assert_eq!(parse_operator_input("2000"), Some(1_200_000));
        assert_eq!(parse_operator_input("12034"), Some(7_234_000));
    }

    #[test]
    fn strips_stray_characters_before_digit_parsing() {
        assert_eq!(parse_operator_input("2m05s"), Some(125_000));
    }

    #[test]
    fn rejects_unparseable_input() {
        assert_eq!(parse_operator_input("abc"), None);
        assert_eq!(parse_operator_input(""), None);
        assert_eq!(parse_operator_input("1:2:3"), None);
        assert_eq!(parse_operator_input("a:b"), None);
    }
}
