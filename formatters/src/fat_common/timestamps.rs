// MS-DOS packed date/time used by FAT directory entries

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DosTimestamp {
    pub time: u16,
    pub date: u16,
}

impl DosTimestamp {
    /// time: hour<<11 | minute<<5 | second/2
    /// date: (year-1980)<<9 | month<<5 | day
    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        // Clamp year to FAT range (1980-2107)
        let fat_year = (dt.year().clamp(1980, 2107) - 1980) as u16;

        let date = (fat_year << 9) | ((dt.month() as u16) << 5) | (dt.day() as u16);
        let time =
            ((dt.hour() as u16) << 11) | ((dt.minute() as u16) << 5) | ((dt.second() / 2) as u16);

        Self { time, date }
    }

    pub fn now() -> Self {
        Self::from_datetime(&Local::now().naive_local())
    }

    /// Fixed timestamp if one is configured, local wall-clock otherwise.
    pub fn resolve(fixed: Option<&NaiveDateTime>) -> Self {
        match fixed {
            Some(dt) => Self::from_datetime(dt),
            None => Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_known_packing() {
        let ts = DosTimestamp::from_datetime(&dt("2026-01-09 04:10:00"));
        assert_eq!(ts.time, (4 << 11) | (10 << 5));
        assert_eq!(ts.date, (46 << 9) | (1 << 5) | 9);
    }

    #[test]
    fn test_odd_seconds_round_down() {
        let ts = DosTimestamp::from_datetime(&dt("2024-01-15 14:30:59"));
        assert_eq!(ts.time, (14 << 11) | (30 << 5) | 29);
        assert_eq!(ts.date, (44 << 9) | (1 << 5) | 15);
    }

    #[test]
    fn test_year_clamped() {
        let early = DosTimestamp::from_datetime(&dt("1970-06-01 00:00:00"));
        assert_eq!(early.date >> 9, 0);
        let late = DosTimestamp::from_datetime(&dt("2200-06-01 00:00:00"));
        assert_eq!(late.date >> 9, 127);
    }

    #[test]
    fn test_resolve_prefers_fixed_clock() {
        let fixed = dt("2025-12-24 18:00:00");
        assert_eq!(
            DosTimestamp::resolve(Some(&fixed)),
            DosTimestamp::from_datetime(&fixed)
        );
    }
}
