use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::InvokeError;

/// How the input text is delivered to the external program.
///
/// Host command bindings carry this as a snake_case token (the `through`
/// argument of a command definition); [`DeliveryMode::parse`] turns the token
/// into the variant once, and everything downstream dispatches on the enum.
///
/// # Example
///
/// ```rust
/// use extcmd::DeliveryMode;
///
/// assert_eq!(DeliveryMode::parse("stdin").unwrap(), DeliveryMode::Stdin);
/// assert!(DeliveryMode::parse("carrier_pigeon").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    VariantNames,
    Deserialize,
    Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Write the input to the program's standard input, then close it.
    Stdin,
    /// Append the input as one extra argument.
    SingleArgument,
    /// Persist the input to a scratch file and append its path as one extra
    /// argument.
    TemporaryFile,
    /// Run the program with no input at all.
    Nothing,
}

impl DeliveryMode {
    /// Parse a host-supplied mode token.
    ///
    /// An unrecognized token is a caller/configuration bug, reported as
    /// [`InvokeError::UnsupportedMode`] before any process is spawned.
    pub fn parse(token: &str) -> Result<Self, InvokeError> {
        token.parse().map_err(|_| InvokeError::UnsupportedMode {
            token: token.to_string(),
        })
    }
}
