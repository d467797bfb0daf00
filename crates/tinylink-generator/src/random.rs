use crate::error::Error;
use crate::Generator;
use rand::Rng;
use tinylink_core::ShortCode;
use typed_builder::TypedBuilder;

/// Digits, then upper case, then lower case letters.
pub const BASE62_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
pub const DEFAULT_LENGTH: usize = 6;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of characters per code, in `3..=32`.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
    /// Characters codes are drawn from. Must be non-empty, free of
    /// duplicates, and limited to `[A-Za-z0-9_-]`.
    #[builder(default = BASE62_ALPHABET.to_string(), setter(into))]
    pub alphabet: String,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Produces fixed-length codes drawn uniformly from an alphabet.
///
/// The generator keeps no state between calls. Entropy comes from the
/// thread-local RNG, so a single instance can be shared by any number of
/// concurrent callers, and independent instances on different nodes need no
/// coordination.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    alphabet: String,
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator after validating `settings`.
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, Error> {
        let RandomGeneratorSettings { length, alphabet } = settings;

        if !(ShortCode::MIN_LENGTH..=ShortCode::MAX_LENGTH).contains(&length) {
            return Err(Error::InvalidLength {
                length,
                min: ShortCode::MIN_LENGTH,
                max: ShortCode::MAX_LENGTH,
            });
        }

        if alphabet.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        for (idx, c) in alphabet.char_indices() {
            if !ShortCode::is_valid_char(c) {
                return Err(Error::UnsafeCharacter(c));
            }
            if alphabet[..idx].contains(c) {
                return Err(Error::DuplicateCharacter(c));
            }
        }

        Ok(Self { alphabet, length })
    }

    /// Number of characters in every generated code.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The characters codes are drawn from.
    pub fn alphabet(&self) -> &str {
        &self.alphabet
    }

    /// Number of distinct codes this generator can produce.
    ///
    /// Saturates at `u128::MAX`.
    pub fn keyspace(&self) -> u128 {
        (self.alphabet.len() as u128)
            .checked_pow(self.length as u32)
            .unwrap_or(u128::MAX)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            alphabet: BASE62_ALPHABET.to_string(),
            length: DEFAULT_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        // Validated ASCII, so indexing by byte is indexing by char.
        let chars = self.alphabet.as_bytes();
        let mut rng = rand::thread_rng();
        let code: String = (0..self.length)
            .map(|_| chars[rng.gen_range(0..chars.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_generator_produces_base62_codes() {
        let generator = RandomGenerator::default();

        for _ in 0..100 {
            let code = generator.generate();
            assert_eq!(code.as_str().len(), DEFAULT_LENGTH);
            assert!(code.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(ShortCode::new(code.as_str()).is_ok());
        }
    }

    #[test]
    fn custom_length_and_alphabet() {
        let settings = RandomGeneratorSettings::builder()
            .length(10)
            .alphabet("ab")
            .build();
        let generator = RandomGenerator::new(settings).unwrap();

        let code = generator.generate();
        assert_eq!(code.as_str().len(), 10);
        assert!(code.as_str().chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn codes_are_not_repeated_in_practice() {
        let settings = RandomGeneratorSettings::builder().length(12).build();
        let generator = RandomGenerator::new(settings).unwrap();

        let codes: HashSet<String> = (0..500)
            .map(|_| generator.generate().as_str().to_owned())
            .collect();
        assert_eq!(codes.len(), 500);
    }

    #[test]
    fn rejects_length_out_of_range() {
        let too_short = RandomGeneratorSettings::builder().length(2).build();
        assert_eq!(
            RandomGenerator::new(too_short).unwrap_err(),
            Error::InvalidLength {
                length: 2,
                min: 3,
                max: 32
            }
        );

        let too_long = RandomGeneratorSettings::builder().length(33).build();
        assert!(matches!(
            RandomGenerator::new(too_long),
            Err(Error::InvalidLength { length: 33, .. })
        ));
    }

    #[test]
    fn rejects_bad_alphabets() {
        let empty = RandomGeneratorSettings::builder().alphabet("").build();
        assert_eq!(RandomGenerator::new(empty).unwrap_err(), Error::EmptyAlphabet);

        let unsafe_char = RandomGeneratorSettings::builder().alphabet("ab/").build();
        assert_eq!(
            RandomGenerator::new(unsafe_char).unwrap_err(),
            Error::UnsafeCharacter('/')
        );

        let duplicate = RandomGeneratorSettings::builder().alphabet("abca").build();
        assert_eq!(
            RandomGenerator::new(duplicate).unwrap_err(),
            Error::DuplicateCharacter('a')
        );
    }

    #[test]
    fn keyspace() {
        assert_eq!(RandomGenerator::default().keyspace(), 62_u128.pow(6));

        let settings = RandomGeneratorSettings::builder()
            .length(32)
            .alphabet(BASE62_ALPHABET)
            .build();
        let generator = RandomGenerator::new(settings).unwrap();
        // 62^32 does not fit in a u128.
        assert_eq!(generator.keyspace(), u128::MAX);
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
