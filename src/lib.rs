//! Secure random password generation.
//!
//! A [`PasswordGenerator`] turns a [`GenerationRequest`] (a length and a set of
//! [`CharacterCategory`]s) into a password containing at least one character of every requested
//! category. All randomness comes from a [`RandomSource`], which only accepts cryptographically
//! secure generators and samples without modulo bias.

use zeroize::Zeroize;

mod category;
pub mod config;
pub mod password_generation;
mod random;

pub use category::{CategorySet, CharacterCategory, UnknownCategory};
pub use config::{ConfigError, GeneratorConfig};
pub use password_generation::{
    BoundsError, GenerateError, GenerationRequest, LengthBounds, PasswordGenerator,
};
pub use random::{RandomSource, RandomUnavailable};

/// A generated password. Its `Debug` output never shows the contents, and the buffer is wiped
/// when dropped.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
