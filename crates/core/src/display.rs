//! Display strings shared by every front end.

pub const UNKNOWN_YEAR: &str = "TBA";
pub const UNKNOWN_VALUE: &str = "N/A";

/// Four-digit year of a `YYYY-MM-DD` release date, or `"TBA"`.
pub fn release_year(release_date: Option<&str>) -> String {
    release_date
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse::<i32>().ok())
        .map(|y| y.to_string())
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
}

/// Rating with one decimal. A missing or zero rating means nobody voted.
pub fn rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v > 0.0 => format!("{v:.1}"),
        _ => UNKNOWN_VALUE.to_string(),
    }
}

/// `"2h 28m"` style runtime.
pub fn runtime(minutes: Option<i64>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => UNKNOWN_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_year_or_tba() {
        assert_eq!(release_year(Some("2010-07-16")), "2010");
        assert_eq!(release_year(Some("")), "TBA");
        assert_eq!(release_year(None), "TBA");
    }

    #[test]
    fn rating_or_na() {
        assert_eq!(rating(Some(8.364)), "8.4");
        assert_eq!(rating(Some(0.0)), "N/A");
        assert_eq!(rating(None), "N/A");
    }

    #[test]
    fn runtime_hours_and_minutes() {
        assert_eq!(runtime(Some(148)), "2h 28m");
        assert_eq!(runtime(Some(45)), "0h 45m");
        assert_eq!(runtime(Some(0)), "N/A");
        assert_eq!(runtime(None), "N/A");
    }
}
