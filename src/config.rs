//! Generator defaults, loaded from YAML.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::CategorySet;
use crate::password_generation::{BoundsError, GenerationRequest, LengthBounds};

/// Defaults for the generator: the length to use when none is given, the range of lengths that
/// are accepted, and the categories enabled when none are given.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub length: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub categories: CategorySet,
}

impl Default for GeneratorConfig {
    fn default() -> GeneratorConfig {
        let bounds = LengthBounds::default();
        GeneratorConfig {
            length: 20,
            min_length: bounds.min(),
            max_length: bounds.max(),
            categories: CategorySet::all(),
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        let file = File::open(path).map_err(ConfigError::Io)?;
        let config: GeneratorConfig =
            serde_yaml::from_reader(file).map_err(ConfigError::Parse)?;
        config.bounds()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<GeneratorConfig, ConfigError> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml).map_err(ConfigError::Parse)?;
        config.bounds()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Parse)
    }

    pub fn bounds(&self) -> Result<LengthBounds, BoundsError> {
        LengthBounds::new(self.min_length, self.max_length)
    }

    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.length, self.categories)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read the configuration file: {0}")]
    Io(#[source] io::Error),
    #[error("failed to parse the configuration: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("invalid length bounds in the configuration: {0}")]
    Bounds(#[from] BoundsError),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::category::CharacterCategory;

    #[test]
    fn defaults_match_the_generator_form() {
        let config = GeneratorConfig::default();
        assert_eq!(config.length, 20);
        assert_eq!(config.bounds().unwrap(), LengthBounds::default());
        assert_eq!(config.categories, CategorySet::all());
        assert_eq!(config.request().length, 20);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = GeneratorConfig::from_yaml_str("length: 32\ncategories: [digits, lowercase]\n")
            .unwrap();
        assert_eq!(config.length, 32);
        assert_eq!(config.min_length, 8);
        assert_eq!(config.max_length, 128);
        assert_eq!(
            config.categories.iter().collect::<Vec<_>>(),
            vec![CharacterCategory::Lowercase, CharacterCategory::Digit]
        );
    }

    #[test]
    fn unknown_fields_and_bad_bounds_are_rejected() {
        assert!(matches!(
            GeneratorConfig::from_yaml_str("lenght: 12\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_yaml_str("min_length: 30\nmax_length: 10\n"),
            Err(ConfigError::Bounds(BoundsError::Inverted { min: 30, max: 10 }))
        ));
        assert!(matches!(
            GeneratorConfig::from_yaml_str("categories: [emoji]\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn yaml_output_reads_back() {
        let mut config = GeneratorConfig::default();
        config.categories.remove(CharacterCategory::Symbol);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("- uppercase"));
        assert!(!yaml.contains("symbol"));
        assert_eq!(GeneratorConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"length: 12\nmin_length: 4\nmax_length: 64\ncategories: [uppercase]\n")
            .unwrap();
        file.flush().unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.length, 12);
        assert_eq!(config.bounds().unwrap(), LengthBounds::new(4, 64).unwrap());

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            GeneratorConfig::load(&missing),
            Err(ConfigError::Io(_))
        ));
    }
}
