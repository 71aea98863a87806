//! Polling interval to crontab mapping

const MINUTE_MS: u64 = 60 * 1000;
const HOUR_MS: u64 = 60 * MINUTE_MS;

/// Maps a millisecond polling interval onto one of the seven fixed Jenkins
/// cron buckets. Boundaries are inclusive; a tie lands in the tighter bucket.
#[must_use]
pub fn millis_to_crontab(interval_ms: u64) -> &'static str {
    if interval_ms <= 5 * MINUTE_MS {
        "* * * * *"
    } else if interval_ms <= 30 * MINUTE_MS {
        "H/5 * * * *"
    } else if interval_ms <= HOUR_MS {
        "H/15 * * * *"
    } else if interval_ms <= 8 * HOUR_MS {
        "H/30 * * * *"
    } else if interval_ms <= 24 * HOUR_MS {
        "H H/4 * * *"
    } else if interval_ms <= 48 * HOUR_MS {
        "H H/12 * * *"
    } else {
        "H H * * *"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(millis_to_crontab(5 * 60 * 1000), "* * * * *");
        assert_eq!(millis_to_crontab(30 * 60 * 1000), "H/5 * * * *");
        assert_eq!(millis_to_crontab(60 * 60 * 1000), "H/15 * * * *");
        assert_eq!(millis_to_crontab(8 * 60 * 60 * 1000), "H/30 * * * *");
        assert_eq!(millis_to_crontab(24 * 60 * 60 * 1000), "H H/4 * * *");
        assert_eq!(millis_to_crontab(48 * 60 * 60 * 1000), "H H/12 * * *");
        assert_eq!(millis_to_crontab(49 * 60 * 60 * 1000), "H H * * *");
    }

    #[test]
    fn test_just_past_a_boundary_moves_up() {
        assert_eq!(millis_to_crontab(5 * 60 * 1000 + 1), "H/5 * * * *");
        assert_eq!(millis_to_crontab(0), "* * * * *");
    }
}
