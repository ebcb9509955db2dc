//! Number and text formatting shared by tables, score cards and maps.

/// Counts with thousands separators; fewer decimals as values grow. Negative or NaN shows a dash.
pub fn nice_count(value: f64) -> String {
    if value >= 1000.0 {
        let digits = format!("{value:.0}");
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    } else if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 10.0 {
        format!("{value:.1}")
    } else if value >= 0.0 {
        format!("{value:.2}")
    } else {
        "–".to_string()
    }
}

/// `0.474` → `47.4%`
pub fn nice_percent(value: f64) -> String {
    if value.is_nan() { return "–".to_string() }
    format!("{:.1}%", 100.0 * value)
}

/// `0.474` → `47%`, with `<1%` and `>99%` at the extremes.
pub fn nice_round_percent(value: f64) -> String {
    if value.is_nan() {
        "–".to_string()
    } else if value < 0.01 {
        "<1%".to_string()
    } else if value > 0.99 {
        ">99%".to_string()
    } else {
        format!("{:.0}%", 100.0 * value)
    }
}

/// `0.1` → `+10.0% for Democrats`
pub fn nice_gap(value: f64) -> String {
    if value > 0.0 {
        format!("+{} for Democrats", nice_percent(value))
    } else {
        format!("+{} for Republicans", nice_percent(-value))
    }
}

/// HTML suffix naming the favored party.
pub fn partisan_suffix(value: f64) -> &'static str {
    if value.is_nan() || value == 0.0 {
        ""
    } else if value > 0.0 {
        "&nbsp;D"
    } else {
        "&nbsp;R"
    }
}

/// Encode every character as a numeric HTML entity.
pub fn nice_string(value: &str) -> String {
    value.encode_utf16().map(|unit| format!("&#{unit};")).collect()
}

/// Magnitude rounded to two places, printed without trailing zeros (`0.12`, `0.1`, `0`).
pub fn round_hundredths(value: f64) -> String {
    let rounded = (value.abs() * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Replace the `{id}` placeholder in a URL pattern.
pub fn format_url(url_pattern: &str, id: &str) -> String {
    url_pattern.replacen("{id}", id, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        assert_eq!(nice_count(7654321.0), "7,654,321");
        assert_eq!(nice_count(654321.0), "654,321");
        assert_eq!(nice_count(54321.0), "54,321");
        assert_eq!(nice_count(4321.0), "4,321");
        assert_eq!(nice_count(321.0), "321");
        assert_eq!(nice_count(21.0), "21.0");
        assert_eq!(nice_count(1.0), "1.00");
        assert_eq!(nice_count(-1.0), "–");
        assert_eq!(nice_count(f64::NAN), "–");
    }

    #[test]
    fn percents() {
        assert_eq!(nice_percent(1.0), "100.0%");
        assert_eq!(nice_percent(0.1), "10.0%");
        assert_eq!(nice_percent(0.01), "1.0%");
        assert_eq!(nice_percent(0.001), "0.1%");
        assert_eq!(nice_percent(f64::NAN), "–");
    }

    #[test]
    fn round_percents() {
        assert_eq!(nice_round_percent(0.989), "99%");
        assert_eq!(nice_round_percent(0.011), "1%");
        assert_eq!(nice_round_percent(0.009), "<1%");
        assert_eq!(nice_round_percent(0.0), "<1%");
        assert_eq!(nice_round_percent(0.991), ">99%");
        assert_eq!(nice_round_percent(1.0), ">99%");
    }

    #[test]
    fn gaps_and_suffixes() {
        assert_eq!(nice_gap(0.1), "+10.0% for Democrats");
        assert_eq!(nice_gap(-0.1), "+10.0% for Republicans");
        assert_eq!(partisan_suffix(0.0), "");
        assert_eq!(partisan_suffix(1.0), "&nbsp;D");
        assert_eq!(partisan_suffix(-1.0), "&nbsp;R");
    }

    #[test]
    fn strings_and_urls() {
        assert_eq!(nice_string("yo"), "&#121;&#111;");
        assert_eq!(format_url("https://example.com/{id}.html", "xyz"), "https://example.com/xyz.html");
        assert_eq!(round_hundredths(-0.1234), "0.12");
        assert_eq!(round_hundredths(0.1), "0.1");
        assert_eq!(round_hundredths(0.0), "0");
    }
}
