//! Business id generation (`CAT-042` style identifiers)

use crate::core::error::ValidationError;
use rand::Rng;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Generates random `PREFIX-NNN` identifiers.
///
/// A single draw is not unique on its own; [`IdGenerator::generate_unique`]
/// retries against a snapshot of the ids already in use. The retry loop is
/// unbounded while free ids remain: with a space of `10^width` values and a
/// small catalog the expected number of draws stays close to one. A
/// saturated space is detected up front and reported instead of looping.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    width: u32,
}

fn id_shape() -> &'static Regex {
    static ID_REGEX: OnceLock<Regex> = OnceLock::new();
    ID_REGEX.get_or_init(|| Regex::new(r"^(.+)-([0-9]+)$").unwrap())
}

impl IdGenerator {
    /// Default number of digits after the prefix
    pub const DEFAULT_WIDTH: u32 = 3;

    /// Create a generator for `prefix` with the default width
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_width(prefix, Self::DEFAULT_WIDTH)
    }

    /// Create a generator with an explicit digit count (1..=9)
    pub fn with_width(prefix: impl Into<String>, width: u32) -> Self {
        Self {
            prefix: prefix.into(),
            width: width.clamp(1, 9),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of distinct identifiers this generator can produce
    pub fn capacity(&self) -> usize {
        10usize.pow(self.width)
    }

    /// Format a number as an identifier
    pub fn format(&self, number: usize) -> String {
        format!(
            "{}-{:0width$}",
            self.prefix,
            number,
            width = self.width as usize
        )
    }

    /// Draw one candidate identifier
    pub fn generate<R: Rng>(&self, rng: &mut R) -> String {
        self.format(rng.gen_range(0..self.capacity()))
    }

    /// Check that `id` has exactly the `PREFIX-NNN` shape
    pub fn is_well_formed(&self, id: &str) -> bool {
        id_shape().captures(id).is_some_and(|caps| {
            &caps[1] == self.prefix && caps[2].len() == self.width as usize
        })
    }

    /// Draw candidates until one is absent from `existing`.
    pub fn generate_unique<'a, I, R>(
        &self,
        existing: I,
        rng: &mut R,
    ) -> Result<String, ValidationError>
    where
        I: IntoIterator<Item = &'a str>,
        R: Rng,
    {
        let taken: HashSet<&str> = existing.into_iter().collect();
        let in_space = taken.iter().filter(|id| self.is_well_formed(id)).count();
        if in_space >= self.capacity() {
            return Err(ValidationError::IdSpaceExhausted {
                prefix: self.prefix.clone(),
                capacity: self.capacity(),
            });
        }

        loop {
            let candidate = self.generate(rng);
            if !taken.contains(candidate.as_str()) {
                return Ok(candidate);
            }
            tracing::trace!(candidate = %candidate, "generated id already taken, retrying");
        }
    }
}
