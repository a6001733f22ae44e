//! Location records and the search language.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named place in the catalog, labelled in English and Bengali.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_bn: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
}

impl LocationRecord {
    /// Create a new record.
    pub fn new(name_en: impl Into<String>, name_bn: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name_en: name_en.into(),
            name_bn: name_bn.into(),
            lat,
            lon,
        }
    }

    /// Whether the record carries an English name.
    ///
    /// Fare requests need named endpoints before a route can be looked up.
    pub fn is_named(&self) -> bool {
        !self.name_en.is_empty()
    }

    /// Structural identity of this record.
    pub fn key(&self) -> LocationKey {
        LocationKey {
            name_en: self.name_en.clone(),
            name_bn: self.name_bn.clone(),
            lat_bits: coordinate_bits(self.lat),
            lon_bits: coordinate_bits(self.lon),
        }
    }
}

/// Equality key over all four fields of a [`LocationRecord`].
///
/// Coordinates are compared by value: nearby but distinct coordinates never
/// collide, while `0.0` and `-0.0` are the same coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationKey {
    name_en: String,
    name_bn: String,
    lat_bits: u64,
    lon_bits: u64,
}

/// Bit pattern of a coordinate with negative zero folded into zero.
fn coordinate_bits(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// Which name field a search should match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Bengali,
    /// Match either name field.
    Any,
}

impl Language {
    /// Parse a language code. Unknown codes match either field.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Language::English,
            "bn" => Language::Bengali,
            _ => Language::Any,
        }
    }

    /// The short code, or `"any"` for the fallback.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Bengali => "bn",
            Language::Any => "any",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deserialize_camel_case() {
        let json = r#"{"nameEn":"Mirpur 10","nameBn":"মিরপুর ১০","lat":23.8069,"lon":90.3687}"#;
        let record: LocationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name_en, "Mirpur 10");
        assert_eq!(record.name_bn, "মিরপুর ১০");
        assert_eq!(record.lat, 23.8069);
        assert_eq!(record.lon, 90.3687);
    }

    #[test]
    fn missing_fields_default() {
        let record: LocationRecord = serde_json::from_str("{}").unwrap();
        assert!(!record.is_named());
        assert_eq!(record.lat, 0.0);
    }

    #[test]
    fn key_distinguishes_nearby_coordinates() {
        let a = LocationRecord::new("Farmgate", "ফার্মগেট", 23.7561, 90.3872);
        let b = LocationRecord::new("Farmgate", "ফার্মগেট", 23.7562, 90.3872);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn key_equal_for_identical_records() {
        let a = LocationRecord::new("Farmgate", "ফার্মগেট", 23.7561, 90.3872);
        let b = a.clone();
        let mut set = HashSet::new();
        set.insert(a.key());
        assert!(set.contains(&b.key()));
    }

    #[test]
    fn key_treats_signed_zeros_as_equal() {
        let a = LocationRecord::new("Zero", "শূন্য", 0.0, 90.0);
        let b = LocationRecord::new("Zero", "শূন্য", -0.0, 90.0);
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("bn"), Language::Bengali);
        assert_eq!(Language::from_code("fr"), Language::Any);
        assert_eq!(Language::from_code(""), Language::Any);
        assert_eq!(Language::Bengali.to_string(), "bn");
    }
}
