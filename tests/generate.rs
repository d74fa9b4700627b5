use passgen::{
    CategorySet, CharacterCategory, GenerateError, GenerationRequest, GeneratorConfig,
    LengthBounds, PasswordGenerator, RandomSource,
};
use rand::{CryptoRng, RngCore};

/// Emits an incrementing byte counter, so every draw is predictable.
struct CountingRng(u8);

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        let mut word = [0u8; 4];
        self.fill_bytes(&mut word);
        u32::from_le_bytes(word)
    }

    fn next_u64(&mut self) -> u64 {
        let mut word = [0u8; 8];
        self.fill_bytes(&mut word);
        u64::from_le_bytes(word)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.0;
            self.0 = self.0.wrapping_add(1);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for CountingRng {}

fn counting_generator() -> PasswordGenerator<CountingRng> {
    let source = RandomSource::new(CountingRng(0)).unwrap();
    PasswordGenerator::new(source, LengthBounds::default())
}

#[test]
fn sixteen_characters_from_all_four_categories() {
    let mut generator = PasswordGenerator::from_os_rng(LengthBounds::default()).unwrap();
    let request = GenerationRequest::new(16, CategorySet::all());
    for _ in 0..100 {
        let password = generator.generate(&request).unwrap();
        let password = password.as_str();
        assert_eq!(password.len(), 16);
        assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password.chars().any(|c| c.is_ascii_punctuation()));
        assert!(password.chars().all(|c| c.is_ascii_graphic()));
    }
}

#[test]
fn injected_generator_is_reproducible() {
    let request = GenerationRequest::new(24, CategorySet::all());
    let first = counting_generator().generate(&request).unwrap();
    let second = counting_generator().generate(&request).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_str().len(), 24);
}

#[test]
fn failure_scenarios() {
    let mut generator = counting_generator();

    let lowercase = [CharacterCategory::Lowercase].into_iter().collect();
    assert!(matches!(
        generator.generate(&GenerationRequest::new(200, lowercase)),
        Err(GenerateError::InvalidLength {
            length: 200,
            min: 8,
            max: 128
        })
    ));

    for _ in 0..2 {
        assert_eq!(
            generator.generate(&GenerationRequest::new(12, CategorySet::empty())),
            Err(GenerateError::NoCategorySelected)
        );
    }
}

#[test]
fn config_drives_the_generator() {
    let config = GeneratorConfig::from_yaml_str(
        "length: 10\nmin_length: 2\nmax_length: 10\ncategories: [uppercase, digits]\n",
    )
    .unwrap();
    let mut generator = PasswordGenerator::from_os_rng(config.bounds().unwrap()).unwrap();
    let password = generator.generate(&config.request()).unwrap();
    assert_eq!(password.as_str().len(), 10);
    assert!(password
        .as_str()
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    let short = GenerationRequest::new(1, config.categories);
    assert_eq!(
        generator.generate(&short),
        Err(GenerateError::InvalidLength {
            length: 1,
            min: 2,
            max: 10
        })
    );
}

#[test]
fn secret_debug_hides_the_password() {
    let password = counting_generator()
        .generate(&GenerationRequest::new(12, CategorySet::all()))
        .unwrap();
    let debug = format!("{password:?}");
    assert!(!debug.contains(password.as_str()));
}
