//! Randomized sample request bodies
//!
//! Values are drawn from a cryptographically strong source ([`OsRng`] by
//! default) so samples look realistic and do not repeat between runs. Any
//! `RngCore + CryptoRng` can be injected, which lets tests pin the output
//! with a seeded generator.
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::model::{Interaction, Property, PropertyType, ResourceDefinition};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde_json::{Map, Value};

/// Candidate entries generated for a batch-shaped interaction
pub const BATCH_SIZE: usize = 3;

/// Width of the range used when a bound is missing
pub const DEFAULT_SPAN: i64 = 32;

/// Longest text or binary sample, in bytes. Larger length bounds are rejected.
pub const MAX_SAMPLE_LEN: i64 = 64 * 1024;

/// Generator for property values and request bodies
#[derive(Debug)]
pub struct SampleGenerator<R = OsRng> {
    rng: R,
}

impl SampleGenerator<OsRng> {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for SampleGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> SampleGenerator<R> {
    /// Use a specific random source
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Build the sample body for an interaction.
    ///
    /// Returns `Ok(None)` when no entry survived, in which case no sample
    /// request should be emitted at all.
    pub fn request_body(
        &mut self,
        resource: &ResourceDefinition,
        interaction: &Interaction,
    ) -> Result<Option<Value>> {
        let candidates = if interaction.accept_many { BATCH_SIZE } else { 1 };

        let mut entries = Vec::with_capacity(candidates);
        for _ in 0..candidates {
            let entry = self.entry(&resource.properties)?;
            if !entry.is_empty() {
                entries.push(Value::Object(entry));
            }
        }

        if entries.is_empty() {
            return Ok(None);
        }

        let mut body = Map::new();
        if interaction.accept_many {
            body.insert(resource.url_prefix.clone(), Value::Array(entries));
        } else if let Some(entry) = entries.pop() {
            body.insert(resource.id.clone(), entry);
        }
        Ok(Some(Value::Object(body)))
    }

    /// One candidate entry: a value for each writable property that was not omitted
    pub fn entry(&mut self, properties: &[Property]) -> Result<Map<String, Value>> {
        let mut entry = Map::new();
        for property in properties.iter().filter(|p| p.is_writable()) {
            if let Some(value) = self.value_for(property)? {
                entry.insert(property.id.clone(), value);
            }
        }
        Ok(entry)
    }

    /// A value for one property, or `None` when an optional field is skipped
    pub fn value_for(&mut self, property: &Property) -> Result<Option<Value>> {
        if let Some(default) = &property.default {
            if !self.random_bool()? {
                return Ok(None);
            }
            return Ok(Some(default.clone()));
        }

        if let Some(values) = property.allowed_values() {
            let index = self.random_int(0, values.len() as i64 - 1)?;
            return Ok(Some(values[index as usize].clone()));
        }

        let value = match property.property_type {
            PropertyType::Text | PropertyType::Binary => {
                let bytes = self.random_bytes(property)?;
                Value::String(STANDARD.encode(bytes))
            }
            PropertyType::Duration | PropertyType::Integer => {
                let (low, high) = value_range(property)?;
                Value::from(self.random_int(low, high)?)
            }
            PropertyType::Boolean => Value::Bool(self.random_bool()?),
            PropertyType::Timestamp | PropertyType::Float => {
                return Err(Error::UnsupportedType {
                    property: property.id.clone(),
                    property_type: property.property_type,
                });
            }
        };
        Ok(Some(value))
    }

    fn random_bytes(&mut self, property: &Property) -> Result<Vec<u8>> {
        let (low, high) = length_range(property)?;
        let len = usize::try_from(self.random_int(low, high)?)
            .map_err(|_| invalid_bounds(property))?;
        let mut bytes = vec![0u8; len];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|source| Error::RandomGeneration { source })?;
        Ok(bytes)
    }

    fn random_bool(&mut self) -> Result<bool> {
        Ok(self.random_int(0, 1)? == 1)
    }

    /// Uniform integer in `[low, high]`, by rejection sampling.
    /// `gen_range` would panic on a failing source; this keeps the error.
    fn random_int(&mut self, low: i64, high: i64) -> Result<i64> {
        debug_assert!(low <= high);
        let span = (high as i128 - low as i128 + 1) as u128;
        if span > u64::MAX as u128 {
            return Ok(self.next_u64()? as i64);
        }

        let span = span as u64;
        let rejected = (u64::MAX % span + 1) % span;
        let limit = u64::MAX - rejected;
        loop {
            let draw = self.next_u64()?;
            if draw <= limit {
                return Ok((low as i128 + (draw % span) as i128) as i64);
            }
        }
    }

    fn next_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.rng
            .try_fill_bytes(&mut buf)
            .map_err(|source| Error::RandomGeneration { source })?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Inclusive value range, treating absent bounds as open by [`DEFAULT_SPAN`]
pub fn value_range(property: &Property) -> Result<(i64, i64)> {
    let range = match (property.minimum, property.maximum) {
        (None, None) => (0, DEFAULT_SPAN),
        (Some(min), None) => (min, min.saturating_add(DEFAULT_SPAN)),
        (None, Some(max)) => (0.min(max), max),
        (Some(min), Some(max)) => (min, max),
    };
    if range.0 > range.1 {
        return Err(invalid_bounds(property));
    }
    Ok(range)
}

/// Inclusive length range; negative lengths are clamped to zero and the
/// upper end may not exceed [`MAX_SAMPLE_LEN`]
pub fn length_range(property: &Property) -> Result<(i64, i64)> {
    let (low, high) = value_range(property)?;
    if high < 0 || high > MAX_SAMPLE_LEN {
        return Err(invalid_bounds(property));
    }
    Ok((low.max(0), high))
}

fn invalid_bounds(property: &Property) -> Error {
    Error::InvalidBounds {
        property: property.id.clone(),
        minimum: property.minimum,
        maximum: property.maximum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn property(id: &str, property_type: PropertyType) -> Property {
        Property {
            id: id.to_string(),
            property_type,
            description: String::new(),
            values: None,
            default: None,
            maximum: None,
            minimum: None,
            permissions: vec!["r".to_string(), "w".to_string()],
            repeated: false,
        }
    }

    fn seeded() -> SampleGenerator<StdRng> {
        SampleGenerator::with_rng(StdRng::seed_from_u64(7))
    }

    /// Random source that always fails
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "entropy unavailable",
            )))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn test_ranges() {
        let mut p = property("n", PropertyType::Integer);
        assert_eq!(value_range(&p).unwrap(), (0, 32));

        p.minimum = Some(5);
        assert_eq!(value_range(&p).unwrap(), (5, 37));

        p.minimum = None;
        p.maximum = Some(-4);
        assert_eq!(value_range(&p).unwrap(), (-4, -4));

        p.minimum = Some(0);
        p.maximum = Some(0);
        assert_eq!(value_range(&p).unwrap(), (0, 0));

        p.minimum = Some(3);
        p.maximum = Some(1);
        assert!(matches!(value_range(&p), Err(Error::InvalidBounds { .. })));

        p.minimum = Some(-10);
        p.maximum = Some(4);
        assert_eq!(length_range(&p).unwrap(), (0, 4));

        p.maximum = Some(-1);
        assert!(length_range(&p).is_err());
    }

    #[test]
    fn test_integer_stays_in_bounds() {
        let mut generator = seeded();
        let mut p = property("n", PropertyType::Duration);
        p.minimum = Some(-3);
        p.maximum = Some(3);
        for _ in 0..200 {
            let value = generator.value_for(&p).unwrap().unwrap();
            let n = value.as_i64().unwrap();
            assert!((-3..=3).contains(&n));
        }
    }

    #[test]
    fn test_text_length_is_exact_when_bounds_match() {
        let mut generator = seeded();
        let mut p = property("name", PropertyType::Text);
        p.minimum = Some(12);
        p.maximum = Some(12);

        let value = generator.value_for(&p).unwrap().unwrap();
        let decoded = STANDARD.decode(value.as_str().unwrap()).unwrap();
        assert_eq!(decoded.len(), 12);
    }

    #[test]
    fn test_binary_is_base64() {
        let mut generator = seeded();
        let mut p = property("blob", PropertyType::Binary);
        p.minimum = Some(4);
        p.maximum = Some(4);

        let value = generator.value_for(&p).unwrap().unwrap();
        let decoded = STANDARD.decode(value.as_str().unwrap()).unwrap();
        assert_eq!(decoded.len(), 4);
    }

    #[test]
    fn test_oversized_length_bound_is_rejected() {
        let mut generator = seeded();
        for property_type in [PropertyType::Text, PropertyType::Binary] {
            let mut p = property("payload", property_type);
            p.minimum = Some(i64::MAX);
            p.maximum = Some(i64::MAX);
            let err = generator.value_for(&p).unwrap_err();
            assert!(matches!(err, Error::InvalidBounds { .. }));

            p.minimum = None;
            p.maximum = Some(MAX_SAMPLE_LEN + 1);
            assert!(generator.value_for(&p).is_err());
        }

        let mut p = property("payload", PropertyType::Text);
        p.minimum = Some(MAX_SAMPLE_LEN);
        p.maximum = Some(MAX_SAMPLE_LEN);
        assert_eq!(length_range(&p).unwrap(), (MAX_SAMPLE_LEN, MAX_SAMPLE_LEN));
    }

    #[test]
    fn test_huge_integer_bounds_are_fine() {
        let mut generator = seeded();
        let mut p = property("n", PropertyType::Integer);
        p.minimum = Some(i64::MAX);
        p.maximum = Some(i64::MAX);
        assert_eq!(generator.value_for(&p).unwrap(), Some(json!(i64::MAX)));
    }

    #[test]
    fn test_enumerated_values_are_respected() {
        let mut generator = seeded();
        let mut p = property("color", PropertyType::Text);
        p.values = Some(vec![json!("red"), json!("green"), json!("blue")]);
        for _ in 0..50 {
            let value = generator.value_for(&p).unwrap().unwrap();
            assert!(p.values.as_ref().unwrap().contains(&value));
        }
    }

    #[test]
    fn test_default_is_used_or_omitted() {
        let mut generator = seeded();
        let mut p = property("size", PropertyType::Integer);
        p.default = Some(json!(10));

        let mut seen_default = false;
        let mut seen_omitted = false;
        for _ in 0..100 {
            match generator.value_for(&p).unwrap() {
                Some(value) => {
                    assert_eq!(value, json!(10));
                    seen_default = true;
                }
                None => seen_omitted = true,
            }
        }
        assert!(seen_default && seen_omitted);
    }

    #[test]
    fn test_timestamp_and_float_are_unsupported() {
        let mut generator = seeded();
        for property_type in [PropertyType::Timestamp, PropertyType::Float] {
            let err = generator.value_for(&property("t", property_type)).unwrap_err();
            assert!(matches!(err, Error::UnsupportedType { .. }));
        }
    }

    #[test]
    fn test_read_only_properties_are_excluded() {
        let mut generator = seeded();
        let mut read_only = property("created_at", PropertyType::Integer);
        read_only.permissions = vec!["R".to_string()];
        let writable = property("name", PropertyType::Text);

        let entry = generator.entry(&[read_only, writable]).unwrap();
        assert_eq!(entry.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_broken_source_reports_error() {
        let mut generator = SampleGenerator::with_rng(BrokenRng);
        let err = generator
            .value_for(&property("flag", PropertyType::Boolean))
            .unwrap_err();
        assert!(matches!(err, Error::RandomGeneration { .. }));
    }

    #[test]
    fn test_seeded_generators_agree() {
        let p = property("name", PropertyType::Text);
        let a = seeded().value_for(&p).unwrap();
        let b = seeded().value_for(&p).unwrap();
        assert_eq!(a, b);
    }
}
