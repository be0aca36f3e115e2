//! Helpers for resolving the server's configured timezone.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Look up the UTC offset that `canonical_timezone` currently observes,
/// e.g. "Pacific/Auckland".
pub(crate) fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current wall-clock time in the configured timezone.
pub(crate) fn local_now(canonical_timezone: &str) -> Result<OffsetDateTime, Error> {
    let Some(local_offset) = get_local_offset(canonical_timezone) else {
        tracing::error!("Invalid timezone {}", canonical_timezone);
        return Err(Error::InvalidTimezoneError(canonical_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(local_offset))
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{get_local_offset, local_now};

    #[test]
    fn resolves_utc() {
        let offset = get_local_offset("Etc/UTC").expect("Etc/UTC should resolve");

        assert!(offset.is_utc());
    }

    #[test]
    fn local_now_fails_on_unknown_timezone() {
        let got = local_now("Nowhere/Special");

        assert_eq!(
            got,
            Err(Error::InvalidTimezoneError("Nowhere/Special".to_owned()))
        );
    }
}
