use chrono::{DateTime, FixedOffset, Utc};

pub fn get_current_datetime() -> DateTime<Utc> {
    Utc::now()
}

pub fn format_time(datetime: DateTime<Utc>, offset: FixedOffset) -> String {
    datetime.with_timezone(&offset).format("%H:%M:%S").to_string()
}

pub fn format_datetime(datetime: DateTime<Utc>, offset: FixedOffset) -> String {
    datetime.with_timezone(&offset).format("%d/%m/%Y %H:%M").to_string()
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.2}h", hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time_in_offset() {
        let dt = Utc.with_ymd_and_hms(2025, 4, 14, 22, 5, 9).unwrap();
        let paris = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(format_time(dt, FixedOffset::east_opt(0).unwrap()), "22:05:09");
        assert_eq!(format_time(dt, paris), "00:05:09");
        assert_eq!(format_datetime(dt, paris), "15/04/2025 00:05");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.5), "0.50h");
        assert_eq!(format_hours(7.0 + 1.0 / 3.0), "7.33h");
        assert_eq!(format_hours(0.0), "0.00h");
    }
}
