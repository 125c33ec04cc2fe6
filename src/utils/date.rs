pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub(crate) fn parse_date(str_time: &str) -> Option<chrono::NaiveDateTime> {
    // e.g. 2022-09-24T04:40:35.726029+00:00 or 2022-09-24T04:40:35.726029
    if let Ok(date) = chrono::DateTime::parse_from_rfc3339(str_time) {
        return Some(date.naive_utc());
    }
    chrono::NaiveDateTime::parse_from_str(str_time, DATE_FMT).ok()
}

pub mod serializer {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::parse_date;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        parse_date(&str_time).ok_or_else(|| D::Error::custom(format!("invalid date {}", str_time)))
    }

    pub(crate) fn time_to_json(t: NaiveDateTime) -> String {
        DateTime::<Utc>::from_naive_utc_and_offset(t, Utc).to_rfc3339()
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::parse_date;
    use crate::utils::date::serializer::time_to_json;

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(time_to_json).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(str_time) => parse_date(&str_time)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date {}", str_time))),
            None => Ok(None),
        }
    }
}
