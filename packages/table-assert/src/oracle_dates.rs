//! Oracle `to_date` literals for building conditions.
//!
//! The fields are rendered as stored; no timezone conversion takes place.

use time::{OffsetDateTime, PrimitiveDateTime};

/// `to_date('YYYYMMDD HH24:MI:SS', 'YYYYMMDD HH24:MI:SS')`, accurate to a second.
pub fn time_as_oracle_dtm(time: PrimitiveDateTime) -> String {
    format!(
        "to_date('{:04}{:02}{:02} {:02}:{:02}:{:02}', 'YYYYMMDD HH24:MI:SS')",
        time.year(),
        u8::from(time.month()),
        time.day(),
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// `to_date('YYYYMMDD', 'YYYYMMDD')`, accurate to a day.
pub fn time_as_oracle_dt(time: PrimitiveDateTime) -> String {
    format!(
        "to_date('{:04}{:02}{:02}', 'YYYYMMDD')",
        time.year(),
        u8::from(time.month()),
        time.day()
    )
}

/// Same as [`time_as_oracle_dtm`] using the offset's local wall-clock fields.
pub fn time_as_oracle_dtm_offset(time: OffsetDateTime) -> String {
    time_as_oracle_dtm(PrimitiveDateTime::new(time.date(), time.time()))
}

/// Same as [`time_as_oracle_dt`] using the offset's local calendar date.
pub fn time_as_oracle_dt_offset(time: OffsetDateTime) -> String {
    time_as_oracle_dt(PrimitiveDateTime::new(time.date(), time.time()))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_second_precision() {
        assert_eq!(
            time_as_oracle_dtm(datetime!(2024-03-07 13:05:09)),
            "to_date('20240307 13:05:09', 'YYYYMMDD HH24:MI:SS')"
        );
    }

    #[test]
    fn test_day_precision() {
        assert_eq!(
            time_as_oracle_dt(datetime!(2024-03-07 13:05:09)),
            "to_date('20240307', 'YYYYMMDD')"
        );
    }

    #[test]
    fn test_fields_are_zero_padded() {
        assert_eq!(
            time_as_oracle_dtm(datetime!(2024-01-02 03:04:05)),
            "to_date('20240102 03:04:05', 'YYYYMMDD HH24:MI:SS')"
        );
    }

    #[test]
    fn test_subsecond_part_is_dropped() {
        assert_eq!(
            time_as_oracle_dtm(datetime!(2024-12-31 23:59:59.999)),
            "to_date('20241231 23:59:59', 'YYYYMMDD HH24:MI:SS')"
        );
    }

    #[test]
    fn test_offset_keeps_wall_clock() {
        let time = datetime!(2024-03-07 23:30:00 -5);
        assert_eq!(
            time_as_oracle_dtm_offset(time),
            "to_date('20240307 23:30:00', 'YYYYMMDD HH24:MI:SS')"
        );
        assert_eq!(time_as_oracle_dt_offset(time), "to_date('20240307', 'YYYYMMDD')");
    }
}
