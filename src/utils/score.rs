//! Score-to-band mapping for match results. Thresholds are fixed; a score
//! equal to a threshold belongs to the higher band.

pub const COLOR_GOOD_THRESHOLD: f64 = 0.7;
pub const COLOR_WARN_THRESHOLD: f64 = 0.5;

/// Traffic-light band behind the score indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    Good,
    Warn,
    Bad,
}

impl ColorBand {
    /// Hex color used by the original indicator.
    pub fn hex(&self) -> &'static str {
        match self {
            ColorBand::Good => "#4caf50",
            ColorBand::Warn => "#ff9800",
            ColorBand::Bad => "#f44336",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictBand {
    Excellent,
    Good,
    Medium,
    Low,
}

impl VerdictBand {
    pub fn display_label(&self) -> &'static str {
        match self {
            VerdictBand::Excellent => "Отличное соответствие",
            VerdictBand::Good => "Хорошее соответствие",
            VerdictBand::Medium => "Среднее соответствие",
            VerdictBand::Low => "Низкое соответствие",
        }
    }
}

pub fn color_band(score: f64) -> ColorBand {
    if score >= COLOR_GOOD_THRESHOLD {
        ColorBand::Good
    } else if score >= COLOR_WARN_THRESHOLD {
        ColorBand::Warn
    } else {
        ColorBand::Bad
    }
}

pub fn verdict_band(score: f64) -> VerdictBand {
    if score >= 0.8 {
        VerdictBand::Excellent
    } else if score >= 0.6 {
        VerdictBand::Good
    } else if score >= 0.4 {
        VerdictBand::Medium
    } else {
        VerdictBand::Low
    }
}

/// Integer percent string, rounding half away from zero.
pub fn format_percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_boundaries_belong_to_the_higher_band() {
        assert_eq!(verdict_band(0.8), VerdictBand::Excellent);
        assert_eq!(verdict_band(0.79), VerdictBand::Good);
        assert_eq!(verdict_band(0.6), VerdictBand::Good);
        assert_eq!(verdict_band(0.4), VerdictBand::Medium);
        assert_eq!(verdict_band(0.39), VerdictBand::Low);
        assert_eq!(verdict_band(0.0), VerdictBand::Low);
    }

    #[test]
    fn color_boundaries_belong_to_the_higher_band() {
        assert_eq!(color_band(1.0), ColorBand::Good);
        assert_eq!(color_band(0.7), ColorBand::Good);
        assert_eq!(color_band(0.69), ColorBand::Warn);
        assert_eq!(color_band(0.5), ColorBand::Warn);
        assert_eq!(color_band(0.49), ColorBand::Bad);
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(format_percent(0.666), "67%");
        assert_eq!(format_percent(0.664), "66%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
    }
}
