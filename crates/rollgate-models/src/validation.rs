//! Format validators for institutional identities.
//!
//! Both predicates are pure. The roll-number window depends on the date, which
//! is always passed in by the caller.

use chrono::Datelike;
use regex::Regex;

/// Digits in a roll number: two-digit admission year followed by five free digits.
pub const ROLL_LENGTH: usize = 7;

/// The three admission-year codes currently allowed to self-register.
///
/// For a date in 2023 the window is `{19, 20, 21}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollWindow {
    oldest: i32,
}

impl RollWindow {
    pub fn for_date<D: Datelike>(now: &D) -> Self {
        Self {
            oldest: now.year() - 2000 - 4,
        }
    }

    pub fn codes(&self) -> [i32; 3] {
        [self.oldest, self.oldest + 1, self.oldest + 2]
    }

    pub fn contains(&self, code: i32) -> bool {
        (self.oldest..=self.oldest + 2).contains(&code)
    }
}

/// `local@domain`, where the local part is ASCII letters, digits, `.` and `_`,
/// and the domain equals `domain` ignoring ASCII case.
pub fn validate_institutional_email(email: &str, domain: &str) -> bool {
    let pattern = format!(r"^[A-Za-z0-9._]+@(?i-u:{})$", regex::escape(domain));
    Regex::new(&pattern).is_ok_and(|re| re.is_match(email))
}

/// Exactly seven ASCII digits whose first two fall inside the [`RollWindow`] for `now`.
pub fn validate_roll_identifier<D: Datelike>(id: &str, now: &D) -> bool {
    if id.len() != ROLL_LENGTH || !id.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    id[..2]
        .parse::<i32>()
        .is_ok_and(|code| RollWindow::for_date(now).contains(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DOMAIN: &str = "nitp.ac.in";

    fn mid_2023() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    #[test]
    fn test_window_for_2023() {
        assert_eq!(RollWindow::for_date(&mid_2023()).codes(), [19, 20, 21]);
    }

    #[test]
    fn test_window_rolls_with_the_year() {
        let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let eve = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

        assert!(validate_roll_identifier("2212345", &new_year));
        assert!(!validate_roll_identifier("1912345", &new_year));
        assert!(!validate_roll_identifier("2212345", &eve));
        assert!(validate_roll_identifier("1912345", &eve));
    }

    #[test]
    fn test_roll_inside_window() {
        let now = mid_2023();
        assert!(validate_roll_identifier("1912345", &now));
        assert!(validate_roll_identifier("2000000", &now));
        assert!(validate_roll_identifier("2199999", &now));
    }

    #[test]
    fn test_roll_outside_window() {
        let now = mid_2023();
        assert!(!validate_roll_identifier("1812345", &now));
        assert!(!validate_roll_identifier("2212345", &now));
    }

    #[test]
    fn test_roll_wrong_shape() {
        let now = mid_2023();
        for id in ["", "191234", "19123456", "19a2345", "19 2345", "-191234", "１９12345"] {
            assert!(!validate_roll_identifier(id, &now), "{id:?} should be rejected");
        }
    }

    #[test]
    fn test_roll_accepts_datetime() {
        let now = chrono::DateTime::parse_from_rfc3339("2023-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        assert!(validate_roll_identifier("2054321", &now));
    }

    #[test]
    fn test_email_valid() {
        assert!(validate_institutional_email("a.b_c@nitp.ac.in", DOMAIN));
        assert!(validate_institutional_email("Rahul.CS19@nitp.ac.in", DOMAIN));
    }

    #[test]
    fn test_email_domain_ignores_case() {
        assert!(validate_institutional_email("student@NITP.AC.IN", DOMAIN));
    }

    #[test]
    fn test_email_invalid() {
        for email in [
            "a+b@nitp.ac.in",
            "a.b@other.edu",
            "@nitp.ac.in",
            "a@nitp.ac.in.evil.com",
            "a@xnitp.ac.in",
            "a@nitpxac.in",
            "a b@nitp.ac.in",
            "nitp.ac.in",
        ] {
            assert!(
                !validate_institutional_email(email, DOMAIN),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_other_configured_domain() {
        assert!(validate_institutional_email("x_y@iitb.ac.in", "iitb.ac.in"));
        assert!(!validate_institutional_email("x_y@nitp.ac.in", "iitb.ac.in"));
    }
}
