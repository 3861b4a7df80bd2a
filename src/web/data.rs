use serde::{Deserialize, Serialize};

// ###################################
// ->   STRUCTS
// ###################################
/// The registration payload as it arrives over the wire.
/// `email` is optional so that a missing field can be reported as a validation
/// failure rather than a deserialization failure.
#[derive(Deserialize, Debug)]
pub struct RegisterPayload {
    pub email: Option<String>,
}

/// A registrant email address.
/// The address is treated as an opaque string: the only requirement is that it
/// is non-empty. No format validation, no trimming - whatever the caller sent
/// is what gets stored and mailed to.
#[derive(Debug, Clone, derive_more::Display)]
pub struct EmailAddress(String);

// ###################################
// ->   IMPLS
// ###################################
impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl EmailAddress {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.is_empty() {
            return Err(DataParsingError::EmailEmpty);
        }

        Ok(EmailAddress(value.to_owned()))
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, Serialize)]
pub enum DataParsingError {
    EmailMissing,
    EmailEmpty,
}
// Error Boilerplate
impl core::fmt::Display for DataParsingError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for DataParsingError {}
