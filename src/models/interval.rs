//! Interval selectors and cache keys

use std::fmt;
use std::str::FromStr;

use crate::error::ProxyError;

// == Interval ==
/// Time aggregation of the upstream statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Last,
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
}

impl Interval {
    /// Every supported selector, in display order.
    pub const ALL: [Interval; 6] = [
        Interval::Last,
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::SixtyMinutes,
    ];

    /// Wire form used both inbound and toward the upstream.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Last => "Last",
            Interval::OneMinute => "1M",
            Interval::FiveMinutes => "5M",
            Interval::FifteenMinutes => "15M",
            Interval::ThirtyMinutes => "30M",
            Interval::SixtyMinutes => "60M",
        }
    }
}

impl FromStr for Interval {
    type Err = ProxyError;

    /// Matching is exact: `"1m"` or `" 1M"` are rejected like any other unknown value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| {
                ProxyError::InvalidInterval(format!(
                    "'{}' is not one of Last, 1M, 5M, 15M, 30M, 60M",
                    s
                ))
            })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Query Key ==
/// Cache key: which upstream table a cached record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// OHLCV statistics for one interval
    Statistics(Interval),
    /// Calendar table (no interval dimension)
    Calendars,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Statistics(interval) => write!(f, "statistics:{}", interval),
            QueryKey::Calendars => f.write_str("calendars"),
        }
    }
}
