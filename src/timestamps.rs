use chrono::{Duration, NaiveDateTime, SubsecRound, Utc};

/// Current UTC time at the microsecond precision the database keeps.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// A timestamp strictly later than `previous`, normally the current time.
pub(crate) fn after(previous: NaiveDateTime) -> NaiveDateTime {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}
