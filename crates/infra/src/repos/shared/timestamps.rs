use chrono::{DateTime, TimeZone, Utc};

pub fn datetime_from_millis(millis: i64) -> anyhow::Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| anyhow::anyhow!("Timestamp {} is out of range", millis))
}

pub fn millis_from_datetime(datetime: &DateTime<Utc>) -> i64 {
    datetime.timestamp_millis()
}
