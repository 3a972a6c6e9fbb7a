//! Syslog severity levels used by GELF

use std::fmt;
use std::str::FromStr;

/// Syslog severity, 0 (most severe) to 7 (least severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    #[default]
    Info = 6,
    Debug = 7,
}

impl Severity {
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Numeric syslog value written to the `level` field
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl TryFrom<i64> for Severity {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, String> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Severity::ALL.get(idx).copied())
            .ok_or_else(|| format!("severity {} is outside the syslog range 0-7", value))
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Accepts either the numeric syslog value or the level name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Severity::try_from(n);
        }
        match trimmed.to_lowercase().as_str() {
            "emergency" | "emerg" => Ok(Severity::Emergency),
            "alert" => Ok(Severity::Alert),
            "critical" | "crit" => Ok(Severity::Critical),
            "error" | "err" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "info" | "informational" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values() {
        assert_eq!(Severity::Emergency.as_u8(), 0);
        assert_eq!(Severity::Alert.as_u8(), 1);
        assert_eq!(Severity::Critical.as_u8(), 2);
        assert_eq!(Severity::Error.as_u8(), 3);
        assert_eq!(Severity::Warning.as_u8(), 4);
        assert_eq!(Severity::Notice.as_u8(), 5);
        assert_eq!(Severity::Info.as_u8(), 6);
        assert_eq!(Severity::Debug.as_u8(), 7);
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn test_try_from_range() {
        assert_eq!(Severity::try_from(3_i64), Ok(Severity::Error));
        assert!(Severity::try_from(8_i64).is_err());
        assert!(Severity::try_from(-1_i64).is_err());
    }

    #[test]
    fn test_parse_names_and_numbers() {
        assert_eq!("WARN".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("notice".parse::<Severity>(), Ok(Severity::Notice));
        assert_eq!("7".parse::<Severity>(), Ok(Severity::Debug));
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_more_severe_orders_first() {
        assert!(Severity::Emergency < Severity::Debug);
        assert!(Severity::Critical < Severity::Error);
    }
}
