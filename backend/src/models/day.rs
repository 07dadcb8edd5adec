//! Fixed weekday enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A teaching day of the week.
///
/// The grid covers Monday through Friday only. The enumeration is closed at
/// the type level; there is no user-defined day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All days in week order. Generation and projection both iterate this.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Human-readable day name.
    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Day;

    #[test]
    fn test_week_order() {
        assert_eq!(Day::ALL.len(), 5);
        assert!(Day::Monday < Day::Friday);
        let mut sorted = Day::ALL;
        sorted.sort();
        assert_eq!(sorted, Day::ALL);
    }

    #[test]
    fn test_names() {
        assert_eq!(Day::Monday.name(), "Monday");
        assert_eq!(Day::Friday.to_string(), "Friday");
    }

    #[test]
    fn test_serde_uses_day_name() {
        let json = serde_json::to_string(&Day::Wednesday).unwrap();
        assert_eq!(json, "\"Wednesday\"");
        let back: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Day::Wednesday);
    }
}
