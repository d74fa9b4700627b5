//! Utilities for generating passwords.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::category::CategorySet;
use crate::random::{RandomSource, RandomUnavailable};
use crate::Secret;

/// The largest upper bound a caller may declare for password lengths.
pub const LENGTH_CEILING: usize = 1 << 16;

/// The inclusive range of password lengths a caller accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthBounds {
    min: usize,
    max: usize,
}

impl LengthBounds {
    pub fn new(min: usize, max: usize) -> Result<LengthBounds, BoundsError> {
        if min == 0 {
            return Err(BoundsError::ZeroMinimum);
        }
        if min > max {
            return Err(BoundsError::Inverted { min, max });
        }
        if max > LENGTH_CEILING {
            return Err(BoundsError::AboveCeiling { max });
        }
        Ok(LengthBounds { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, length: usize) -> bool {
        (self.min..=self.max).contains(&length)
    }
}

impl Default for LengthBounds {
    fn default() -> LengthBounds {
        LengthBounds { min: 8, max: 128 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    #[error("the minimum password length must be at least 1")]
    ZeroMinimum,
    #[error("the minimum password length ({min}) is greater than the maximum ({max})")]
    Inverted { min: usize, max: usize },
    #[error("the maximum password length ({max}) may not exceed {}", LENGTH_CEILING)]
    AboveCeiling { max: usize },
}

/// What to generate: how long, and which categories must appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub length: usize,
    pub categories: CategorySet,
}

impl GenerationRequest {
    pub fn new(length: usize, categories: CategorySet) -> GenerationRequest {
        GenerationRequest { length, categories }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("password length must be between {min} and {max}, not {length}")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
    #[error("no character category was selected")]
    NoCategorySelected,
    #[error(
        "a password of length {length} cannot contain a character from each of the {categories} \
         selected categories"
    )]
    LengthTooShortForCategories { length: usize, categories: usize },
    #[error("secure random number generator unavailable: {0}")]
    SecureRandomUnavailable(#[from] RandomUnavailable),
}

/// Generates passwords that contain at least one character of every requested category.
pub struct PasswordGenerator<R> {
    source: RandomSource<R>,
    bounds: LengthBounds,
}

impl PasswordGenerator<OsRng> {
    pub fn from_os_rng(bounds: LengthBounds) -> Result<PasswordGenerator<OsRng>, GenerateError> {
        Ok(PasswordGenerator::new(RandomSource::os()?, bounds))
    }
}

impl<R> PasswordGenerator<R>
where
    R: RngCore + CryptoRng,
{
    pub fn new(source: RandomSource<R>, bounds: LengthBounds) -> PasswordGenerator<R> {
        PasswordGenerator { source, bounds }
    }

    pub fn bounds(&self) -> LengthBounds {
        self.bounds
    }

    /// Check a request without drawing any randomness.
    pub fn validate(&self, request: &GenerationRequest) -> Result<(), GenerateError> {
        if !self.bounds.contains(request.length) {
            return Err(GenerateError::InvalidLength {
                length: request.length,
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }
        if request.categories.is_empty() {
            return Err(GenerateError::NoCategorySelected);
        }
        if request.categories.len() > request.length {
            return Err(GenerateError::LengthTooShortForCategories {
                length: request.length,
                categories: request.categories.len(),
            });
        }
        Ok(())
    }

    /// Generate a password of exactly `request.length` characters.
    ///
    /// One character is drawn from each enabled category, the rest come from the combined pool,
    /// and the whole sequence is then shuffled so the guaranteed characters end up anywhere.
    pub fn generate(&mut self, request: &GenerationRequest) -> Result<Secret, GenerateError> {
        self.validate(request)?;

        let pool = request.categories.pool();
        log::debug!(
            "generating a password of length {} from {} categories ({} characters)",
            request.length,
            request.categories.len(),
            pool.len()
        );

        let mut required = Zeroizing::new(Vec::with_capacity(request.categories.len()));
        for category in request.categories.iter() {
            if let Some(ch) = self.source.uniform_character(category.alphabet())? {
                required.push(ch);
            }
        }

        let mut characters = Zeroizing::new(Vec::with_capacity(request.length));
        for _ in 0..request.length.saturating_sub(required.len()) {
            if let Some(ch) = self.source.uniform_character(&pool)? {
                characters.push(ch);
            }
        }
        characters.extend_from_slice(&required);

        self.shuffle(&mut characters)?;

        Ok(Secret(characters.iter().collect()))
    }

    /// Fisher-Yates, back to front.
    fn shuffle(&mut self, characters: &mut [char]) -> Result<(), RandomUnavailable> {
        for i in (1..characters.len()).rev() {
            // Lengths are capped at LENGTH_CEILING, well inside u32.
            let j = self.source.uniform_index((i + 1) as u32)? as usize;
            characters.swap(i, j);
        }
        Ok(())
    }
}
