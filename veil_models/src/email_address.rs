use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::macros::nutype_string;

/// Local part, `@`, and a domain containing at least one dot. No whitespace
/// anywhere and exactly one `@`.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

nutype_string!(pub EmailAddress(validate(regex = EMAIL_ADDRESS_REGEX)));

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self
    }
}

/// A mailbox with an optional display name, e.g. `VeilStudio Contact <onboarding@resend.dev>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

impl EmailAddressWithName {
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn address(&self) -> &str {
        self.0.email.as_ref()
    }
}

impl std::fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
