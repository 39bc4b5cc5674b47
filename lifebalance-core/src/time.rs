//! Time utilities: the planning date and wall-clock to UTC conversion.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// The local calendar date at `now` in an IANA tz like "Europe/Berlin".
pub fn date_in(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz = parse_tz(tz)?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Today's date in an IANA tz. This is the reference date for overdue checks.
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    date_in(Utc::now(), tz)
}

/// Turn a wall-clock time on `date` in `tz` into UTC.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, tz: &str) -> Result<DateTime<Utc>> {
    let tz = parse_tz(tz)?;
    let ndt = date.and_time(time);

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {ndt} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}
