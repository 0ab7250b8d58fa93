//! Customer field validation. Per-field errors, collected, not first-fail.

use crate::domain::entities::Customer;
use crate::domain::errors::FieldError;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// International digits with optional leading `+`, after separator stripping.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&stripped)
}

/// Validates the required customer fields. Returns every failure so the UI
/// can annotate each offending field; an empty vec means the step may
/// advance.
pub fn validate_customer(customer: &Customer) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if customer.first_name.trim().is_empty() {
        errors.push(FieldError::new("first_name", "This field is required"));
    }
    if customer.last_name.trim().is_empty() {
        errors.push(FieldError::new("last_name", "This field is required"));
    }

    if customer.email.trim().is_empty() {
        errors.push(FieldError::new("email", "This field is required"));
    } else if !is_valid_email(customer.email.trim()) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address",
        ));
    }

    if customer.phone.trim().is_empty() {
        errors.push(FieldError::new("phone", "This field is required"));
    } else if !is_valid_phone(customer.phone.trim()) {
        errors.push(FieldError::new(
            "phone",
            "Please enter a valid phone number",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_customer() -> Customer {
        Customer {
            first_name: "Asha".into(),
            last_name: "Patel".into(),
            email: "asha@example.com".into(),
            phone: "+91 99134 48866".into(),
            ..Customer::default()
        }
    }

    #[test]
    fn accepts_a_complete_customer() {
        assert!(validate_customer(&valid_customer()).is_empty());
    }

    #[test]
    fn email_grammar() {
        for good in ["a@b.co", "first.last@firm.example.org"] {
            assert!(is_valid_email(good), "{good}");
        }
        for bad in ["", "plain", "a@b", "a b@c.d", "@x.y", "a@.com"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn phone_grammar_strips_separators() {
        for good in ["+91 99 13 44 88 66", "(212) 555-0187", "9913448866"] {
            assert!(is_valid_phone(good), "{good}");
        }
        for bad in ["", "0123", "+", "phone", "12 345 678 901 234 567"] {
            assert!(!is_valid_phone(bad), "{bad}");
        }
    }

    #[test]
    fn reports_every_failing_field() {
        let errors = validate_customer(&Customer::default());
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["first_name", "last_name", "email", "phone"]);
    }

    #[test]
    fn invalid_email_and_phone_are_field_level() {
        let customer = Customer {
            email: "not-an-address".into(),
            phone: "abc".into(),
            ..valid_customer()
        };
        let errors = validate_customer(&customer);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "email"));
        assert!(errors.iter().any(|e| e.field == "phone"));
    }
}
