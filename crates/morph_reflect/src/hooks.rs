//! Custom text hooks.
//!
//! A type that controls its own text form implements [`TextEncodable`],
//! [`TextDecodable`] or both, and reports which through the [`TextHooks`]
//! of its type info. `#[derive(Reflect)]` wires this up with
//! `#[morph(text)]`, `#[morph(encode)]` or `#[morph(decode)]`.
//!
//! Conversion treats hooked values as whole units: the source is encoded,
//! and the destination decodes the result.

use core::{error, fmt};

bitflags::bitflags! {
    /// The custom text hooks a type implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextHooks: u8 {
        /// The type implements [`TextEncodable`].
        const ENCODE = 1 << 0;
        /// The type implements [`TextDecodable`].
        const DECODE = 1 << 1;
    }
}

/// A type that encodes itself as text.
pub trait TextEncodable {
    fn encode_text(&self) -> Result<String, HookError>;
}

/// A type that decodes itself from text.
pub trait TextDecodable {
    fn decode_text(&mut self, text: &str) -> Result<(), HookError>;
}

/// The failure of a custom text hook.
pub struct HookError {
    message: String,
    source: Option<Box<dyn error::Error + Send + Sync>>,
}

impl HookError {
    /// Creates an error with a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps another error, keeping it as the source.
    pub fn from_error(err: impl error::Error + Send + Sync + 'static) -> Self {
        Self {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HookError").field(&self.message).finish()
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl error::Error for HookError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn error::Error + 'static))
    }
}
