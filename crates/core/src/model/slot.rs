use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown lesson day: {raw}")]
pub struct ParseDayError {
    raw: String,
}

//
// ─── DAY ──────────────────────────────────────────────────────────────────────
//

/// The four days lessons run on.
///
/// Monday, Wednesday and Friday share the weekday slot pattern; Saturday has
/// its own shorter pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Wednesday,
    Friday,
    Saturday,
}

impl Day {
    /// Generation order: weekday days first, then the weekend day.
    pub const ALL: [Day; 4] = [Day::Monday, Day::Wednesday, Day::Friday, Day::Saturday];

    #[must_use]
    pub fn is_weekend(self) -> bool {
        matches!(self, Day::Saturday)
    }

    /// Slots taught on this day, in pattern order.
    #[must_use]
    pub fn slots(self) -> &'static [TimeSlot] {
        if self.is_weekend() {
            &TimeSlot::WEEKEND
        } else {
            &TimeSlot::WEEKDAY
        }
    }

    #[must_use]
    pub fn weekday(self) -> Weekday {
        match self {
            Day::Monday => Weekday::Mon,
            Day::Wednesday => Weekday::Wed,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Wednesday => "Wednesday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ParseDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Day::Monday),
            "wed" | "wednesday" => Ok(Day::Wednesday),
            "fri" | "friday" => Ok(Day::Friday),
            "sat" | "saturday" => Ok(Day::Saturday),
            _ => Err(ParseDayError { raw: s.to_owned() }),
        }
    }
}

impl TryFrom<Weekday> for Day {
    type Error = ParseDayError;

    fn try_from(value: Weekday) -> Result<Self, Self::Error> {
        Day::ALL
            .into_iter()
            .find(|day| day.weekday() == value)
            .ok_or_else(|| ParseDayError {
                raw: value.to_string(),
            })
    }
}

//
// ─── TIME SLOT ────────────────────────────────────────────────────────────────
//

/// One-hour lesson slots. Slots within a day never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    TwoToThreePm,
    ThreeToFourPm,
    FourToFivePm,
    FiveToSixPm,
    SixToSevenPm,
}

impl TimeSlot {
    pub const WEEKDAY: [TimeSlot; 3] = [
        TimeSlot::FourToFivePm,
        TimeSlot::FiveToSixPm,
        TimeSlot::SixToSevenPm,
    ];

    pub const WEEKEND: [TimeSlot; 2] = [TimeSlot::TwoToThreePm, TimeSlot::ThreeToFourPm];

    fn start_hour(self) -> u32 {
        match self {
            TimeSlot::TwoToThreePm => 14,
            TimeSlot::ThreeToFourPm => 15,
            TimeSlot::FourToFivePm => 16,
            TimeSlot::FiveToSixPm => 17,
            TimeSlot::SixToSevenPm => 18,
        }
    }

    #[must_use]
    pub fn start(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.start_hour(), 0, 0).unwrap_or(NaiveTime::MIN)
    }

    #[must_use]
    pub fn end(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.start_hour() + 1, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Stable storage key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::TwoToThreePm => "2pm-3pm",
            TimeSlot::ThreeToFourPm => "3pm-4pm",
            TimeSlot::FourToFivePm => "4pm-5pm",
            TimeSlot::FiveToSixPm => "5pm-6pm",
            TimeSlot::SixToSevenPm => "6pm-7pm",
        }
    }

    /// Inverse of [`TimeSlot::as_str`].
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        [
            TimeSlot::TwoToThreePm,
            TimeSlot::ThreeToFourPm,
            TimeSlot::FourToFivePm,
            TimeSlot::FiveToSixPm,
            TimeSlot::SixToSevenPm,
        ]
        .into_iter()
        .find(|slot| slot.as_str() == key)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start().format("%H:%M"),
            self.end().format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_days_use_three_slots() {
        for day in [Day::Monday, Day::Wednesday, Day::Friday] {
            assert_eq!(day.slots().len(), 3);
            assert!(!day.is_weekend());
        }
    }

    #[test]
    fn saturday_uses_weekend_pattern() {
        assert!(Day::Saturday.is_weekend());
        assert_eq!(Day::Saturday.slots(), &TimeSlot::WEEKEND);
    }

    #[test]
    fn slots_within_a_pattern_do_not_overlap() {
        for pattern in [&TimeSlot::WEEKDAY[..], &TimeSlot::WEEKEND[..]] {
            for pair in pattern.windows(2) {
                assert!(pair[0].end() <= pair[1].start());
            }
        }
    }

    #[test]
    fn day_parses_short_and_long_names() {
        assert_eq!("Mon".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!(" saturday ".parse::<Day>().unwrap(), Day::Saturday);
        assert!("tuesday".parse::<Day>().is_err());
    }

    #[test]
    fn day_maps_to_chrono_weekday() {
        assert_eq!(Day::Friday.weekday(), Weekday::Fri);
        assert_eq!(Day::try_from(Weekday::Wed).unwrap(), Day::Wednesday);
        assert!(Day::try_from(Weekday::Sun).is_err());
    }

    #[test]
    fn slot_key_round_trips() {
        for slot in TimeSlot::WEEKDAY.into_iter().chain(TimeSlot::WEEKEND) {
            assert_eq!(TimeSlot::from_key(slot.as_str()), Some(slot));
        }
        assert_eq!(TimeSlot::from_key("9am-10am"), None);
    }

    #[test]
    fn slot_display_uses_24h_clock() {
        assert_eq!(TimeSlot::FourToFivePm.to_string(), "16:00 - 17:00");
    }
}
