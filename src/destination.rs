/// Where a call leg should be connected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Empty,
    /// Decimal digits, optionally behind a single leading `+`
    PhoneNumber(String),
    ClientName(String),
}

/// Classifies a raw `to` parameter. Never fails: an absent or empty value is
/// `Empty`, anything that is not a phone number is a client name.
pub fn classify(raw: Option<&str>) -> Destination {
    let raw = match raw {
        None | Some("") => return Destination::Empty,
        Some(raw) => raw,
    };

    if let Some(rest) = raw.strip_prefix('+') {
        if is_numeric(rest) {
            return Destination::PhoneNumber(raw.to_owned());
        }
    }

    if is_numeric(raw) {
        Destination::PhoneNumber(raw.to_owned())
    } else {
        Destination::ClientName(raw.to_owned())
    }
}

/// True for a non-empty string made only of ASCII decimal digits.
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
