//! Character categories and their alphabets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

static LOWERCASE: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];
static UPPERCASE: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];
static DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
static SYMBOLS: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<', '=',
    '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

/// A named class of characters that a password may be required to contain.
///
/// The derived ordering is the order in which categories contribute to the character pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterCategory {
    Lowercase,
    Uppercase,
    #[serde(alias = "digits", alias = "numbers")]
    Digit,
    #[serde(alias = "symbols")]
    Symbol,
}

impl CharacterCategory {
    pub const ALL: [CharacterCategory; 4] = [
        CharacterCategory::Lowercase,
        CharacterCategory::Uppercase,
        CharacterCategory::Digit,
        CharacterCategory::Symbol,
    ];

    pub fn alphabet(self) -> &'static [char] {
        match self {
            CharacterCategory::Lowercase => LOWERCASE,
            CharacterCategory::Uppercase => UPPERCASE,
            CharacterCategory::Digit => DIGITS,
            CharacterCategory::Symbol => SYMBOLS,
        }
    }

    pub fn contains(self, ch: char) -> bool {
        self.alphabet().contains(&ch)
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterCategory::Lowercase => "lowercase",
            CharacterCategory::Uppercase => "uppercase",
            CharacterCategory::Digit => "digit",
            CharacterCategory::Symbol => "symbol",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for CharacterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown character category {0:?} (expected lowercase, uppercase, digit or symbol)")]
pub struct UnknownCategory(String);

impl FromStr for CharacterCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowercase" | "lower" => Ok(CharacterCategory::Lowercase),
            "uppercase" | "upper" => Ok(CharacterCategory::Uppercase),
            "digit" | "digits" | "numbers" => Ok(CharacterCategory::Digit),
            "symbol" | "symbols" => Ok(CharacterCategory::Symbol),
            _ => Err(UnknownCategory(s.to_owned())),
        }
    }
}

/// A set of enabled categories.
///
/// Iteration always yields categories in their fixed order, regardless of the order they were
/// inserted in.
#[derive(Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<CharacterCategory>", into = "Vec<CharacterCategory>")]
pub struct CategorySet(u8);

impl CategorySet {
    pub fn empty() -> CategorySet {
        CategorySet(0)
    }

    pub fn all() -> CategorySet {
        CharacterCategory::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, category: CharacterCategory) {
        self.0 |= category.bit();
    }

    pub fn remove(&mut self, category: CharacterCategory) {
        self.0 &= !category.bit();
    }

    pub fn contains(&self, category: CharacterCategory) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = CharacterCategory> + '_ {
        CharacterCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }

    /// The concatenated alphabets of every enabled category.
    pub fn pool(&self) -> Vec<char> {
        let mut pool = Vec::new();
        for category in self.iter() {
            pool.extend_from_slice(category.alphabet());
        }
        pool
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<CharacterCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = CharacterCategory>>(iter: I) -> Self {
        let mut set = CategorySet::empty();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl From<Vec<CharacterCategory>> for CategorySet {
    fn from(categories: Vec<CharacterCategory>) -> CategorySet {
        categories.into_iter().collect()
    }
}

impl From<CategorySet> for Vec<CharacterCategory> {
    fn from(set: CategorySet) -> Vec<CharacterCategory> {
        set.iter().collect()
    }
}
