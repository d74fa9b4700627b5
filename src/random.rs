//! Unbiased sampling on top of a cryptographically secure generator.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// The secure random generator is missing or failed to produce bytes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct RandomUnavailable {
    reason: String,
}

impl From<rand::Error> for RandomUnavailable {
    fn from(err: rand::Error) -> RandomUnavailable {
        RandomUnavailable {
            reason: err.to_string(),
        }
    }
}

/// Draws uniformly distributed values from a secure generator, using rejection sampling so that
/// no value in the range is favoured.
pub struct RandomSource<R> {
    rng: R,
}

impl RandomSource<OsRng> {
    /// A source backed by the operating system's generator.
    pub fn os() -> Result<RandomSource<OsRng>, RandomUnavailable> {
        RandomSource::new(OsRng)
    }
}

impl<R> RandomSource<R>
where
    R: RngCore + CryptoRng,
{
    /// Wrap `rng`, checking up front that it can actually produce bytes.
    pub fn new(mut rng: R) -> Result<RandomSource<R>, RandomUnavailable> {
        let mut probe = [0u8; 1];
        rng.try_fill_bytes(&mut probe)?;
        Ok(RandomSource { rng })
    }

    /// A value in `[0, bound)`. A bound of zero yields zero without drawing.
    pub fn uniform_index(&mut self, bound: u32) -> Result<u32, RandomUnavailable> {
        if bound == 0 {
            return Ok(0);
        }
        let bound = u64::from(bound);
        let limit = (1u64 << 32) / bound * bound;
        loop {
            let mut word = [0u8; 4];
            self.rng.try_fill_bytes(&mut word)?;
            let value = u64::from(u32::from_le_bytes(word));
            if value < limit {
                // `value % bound < bound <= u32::MAX`
                return Ok((value % bound) as u32);
            }
            log::trace!("rejected word {} for bound {}", value, bound);
        }
    }

    /// A character picked uniformly from `pool`, or `None` if the pool is empty.
    ///
    /// Pools that fit in a byte are sampled a byte at a time, which needs far fewer random bytes
    /// than drawing a full word per character.
    pub fn uniform_character(&mut self, pool: &[char]) -> Result<Option<char>, RandomUnavailable> {
        let len = pool.len();
        if len == 0 {
            return Ok(None);
        }
        if len > 256 {
            let bound = u32::try_from(len).unwrap_or(u32::MAX);
            let index = self.uniform_index(bound)? as usize;
            return Ok(pool.get(index).copied());
        }

        let limit = 256 / len * len;
        loop {
            let mut byte = [0u8; 1];
            self.rng.try_fill_bytes(&mut byte)?;
            let value = usize::from(byte[0]);
            if value < limit {
                return Ok(Some(pool[value % len]));
            }
            log::trace!("rejected byte {} for pool of {}", value, len);
        }
    }
}

#[cfg(test)]
impl RandomSource<tests::ScriptedRng> {
    pub(crate) fn rng_consumed(&self) -> usize {
        self.rng.consumed()
    }
}
