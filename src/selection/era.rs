use std::fmt;

/// Decade bucket a player's career started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Era {
    Pioneer,
    Sixties,
    Seventies,
    Eighties,
    Nineties,
    TwoThousands,
    TwentyTens,
    TwentyTwenties,
    Unknown,
}

impl Era {
    pub fn from_first_year(first_year: Option<f64>) -> Era {
        let year = match first_year {
            Some(y) if y.is_finite() => y.trunc() as i64,
            _ => return Era::Unknown,
        };
        match year {
            i64::MIN..=1959 => Era::Pioneer,
            1960..=1969 => Era::Sixties,
            1970..=1979 => Era::Seventies,
            1980..=1989 => Era::Eighties,
            1990..=1999 => Era::Nineties,
            2000..=2009 => Era::TwoThousands,
            2010..=2019 => Era::TwentyTens,
            _ => Era::TwentyTwenties,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Era::Pioneer => "Pioneer Era (Pre-1960)",
            Era::Sixties => "1960s",
            Era::Seventies => "1970s",
            Era::Eighties => "1980s",
            Era::Nineties => "1990s",
            Era::TwoThousands => "2000s",
            Era::TwentyTens => "2010s",
            Era::TwentyTwenties => "2020s",
            Era::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_buckets() {
        assert_eq!(Era::from_first_year(Some(1932.0)), Era::Pioneer);
        assert_eq!(Era::from_first_year(Some(1959.0)), Era::Pioneer);
        assert_eq!(Era::from_first_year(Some(1960.0)), Era::Sixties);
        assert_eq!(Era::from_first_year(Some(1985.0)), Era::Eighties);
        assert_eq!(Era::from_first_year(Some(2009.9)), Era::TwoThousands);
        assert_eq!(Era::from_first_year(Some(2019.0)), Era::TwentyTens);
        assert_eq!(Era::from_first_year(Some(2020.0)), Era::TwentyTwenties);
        assert_eq!(Era::from_first_year(Some(2031.0)), Era::TwentyTwenties);
    }

    #[test]
    fn test_unknown_era() {
        assert_eq!(Era::from_first_year(None), Era::Unknown);
        assert_eq!(Era::from_first_year(Some(f64::NAN)), Era::Unknown);
        assert_eq!(Era::Unknown.label(), "Unknown");
    }

    #[test]
    fn test_era_labels() {
        assert_eq!(Era::Pioneer.to_string(), "Pioneer Era (Pre-1960)");
        assert_eq!(Era::TwentyTens.to_string(), "2010s");
    }
}
