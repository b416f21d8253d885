use crate::error::CoreError;
use chrono_tz::Tz;
use std::str::FromStr;

/// Validate an IANA timezone name.
pub fn validate_timezone(timezone: &str) -> Result<(), CoreError> {
    Tz::from_str(timezone)
        .map(|_| ())
        .map_err(|_| CoreError::InvalidTimezone(timezone.to_string()))
}

/// Resolve the timezone an operation should run in: an explicit override
/// wins, then the user's stored preference, then UTC.
pub fn resolve_timezone(
    override_tz: Option<&str>,
    user_tz: Option<&str>,
) -> Result<Tz, CoreError> {
    let name = override_tz.or(user_tz).unwrap_or("UTC");
    name.parse()
        .map_err(|_| CoreError::InvalidTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(validate_timezone("Invalid/Timezone").is_err());
    }

    #[test]
    fn test_resolution_order() {
        let tz = resolve_timezone(Some("Asia/Tokyo"), Some("Europe/Berlin")).unwrap();
        assert_eq!(tz, chrono_tz::Asia::Tokyo);

        let tz = resolve_timezone(None, Some("Europe/Berlin")).unwrap();
        assert_eq!(tz, chrono_tz::Europe::Berlin);

        let tz = resolve_timezone(None, None).unwrap();
        assert_eq!(tz, chrono_tz::UTC);

        assert!(resolve_timezone(Some("Not/AZone"), None).is_err());
    }
}
