//! Lead-capture form validation.
//!
//! A lead is a prospective customer's contact request. Name, email and
//! phone are required; the email must look like `a@b.c` and the phone must
//! contain at least eight digits once punctuation is stripped. A valid lead
//! is acknowledged with a short ticket reference. Leads are not stored.
//!
//! The public page checks the form in the browser and issues the ticket
//! there; lead data never leaves the page. The constants below are embedded
//! into the form so both sides apply the same rules.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::error::LeadError;

/// Minimum digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 8;

/// Ticket reference prefix.
pub const TICKET_PREFIX: &str = "VMS-";

/// Characters after the prefix.
pub const TICKET_LEN: usize = 5;

/// Uppercase base-36.
pub const TICKET_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Accepted email shape. Also valid as a JavaScript `RegExp` source.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

// The pattern is a literal; compiling it cannot fail.
#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).unwrap());

/// The contact-request form as submitted.
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub port: String,
    pub category: String,
    pub message: String,
}

impl LeadForm {
    /// Names of the fields that fail validation, in form order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut invalid = Vec::new();
        if self.name.trim().is_empty() {
            invalid.push("name");
        }
        if !is_valid_email(&self.email) {
            invalid.push("email");
        }
        if !is_valid_phone(&self.phone) {
            invalid.push("phone");
        }
        invalid
    }

    /// Validate and, on success, issue a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::Invalid`] listing every failing field.
    pub fn submit(&self) -> Result<LeadTicket, LeadError> {
        let fields = self.invalid_fields();
        if fields.is_empty() {
            Ok(LeadTicket::generate(&mut rand::thread_rng()))
        } else {
            Err(LeadError::Invalid { fields })
        }
    }
}

/// Whether `email` has the shape `local@domain.tld` with no whitespace.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether `phone` contains at least [`MIN_PHONE_DIGITS`] digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Acknowledgement reference shown after a valid submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadTicket(String);

impl LeadTicket {
    /// A new `VMS-XXXXX` reference (uppercase base-36).
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut id = String::with_capacity(TICKET_PREFIX.len() + TICKET_LEN);
        id.push_str(TICKET_PREFIX);
        for _ in 0..TICKET_LEN {
            let i = rng.gen_range(0..TICKET_ALPHABET.len());
            id.push(char::from(TICKET_ALPHABET.as_bytes()[i]));
        }
        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LeadTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn valid_form() -> LeadForm {
        LeadForm {
            name: "Ada Mariner".to_owned(),
            email: "ada@shipyard.example".to_owned(),
            phone: "+91 (22) 5555-0101".to_owned(),
            ..LeadForm::default()
        }
    }

    #[test]
    fn valid_form_gets_a_ticket() {
        let ticket = valid_form().submit().unwrap();
        assert!(ticket.as_str().starts_with(TICKET_PREFIX));
        assert_eq!(ticket.as_str().len(), TICKET_PREFIX.len() + TICKET_LEN);
    }

    #[test]
    fn invalid_email_blocks_submission_and_flags_field() {
        let form = LeadForm {
            email: "not-an-email".to_owned(),
            ..valid_form()
        };
        assert_eq!(
            form.submit(),
            Err(LeadError::Invalid {
                fields: vec!["email"]
            })
        );
    }

    #[test]
    fn empty_form_flags_every_required_field() {
        assert_eq!(LeadForm::default().invalid_fields(), vec!["name", "email", "phone"]);
    }

    #[test]
    fn blank_name_is_missing() {
        let form = LeadForm {
            name: "   ".to_owned(),
            ..valid_form()
        };
        assert_eq!(form.invalid_fields(), vec!["name"]);
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_counts_digits_only() {
        assert!(is_valid_phone("1234-5678"));
        assert!(is_valid_phone("+1 (555) 010-9999"));
        assert!(!is_valid_phone("123-4567"));
        assert!(!is_valid_phone("phone"));
    }

    #[test]
    fn tickets_use_uppercase_base36() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let ticket = LeadTicket::generate(&mut rng);
            let suffix = &ticket.as_str()[TICKET_PREFIX.len()..];
            assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }
}
