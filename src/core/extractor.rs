use crate::core::patterns::{composite_location_pattern, field_patterns, ADDRESS_PATTERNS};
use crate::domain::model::{ExtractionResult, FieldValue, LocationField, LocationFields};
use crate::domain::ports::ExtractionStrategy;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_FIELD_VALUE_MAX_LENGTH: usize = 150;

/// One row of the address cascade.
#[derive(Debug, Clone)]
pub struct AddressPattern {
    pub label: String,
    pub regex: Regex,
}

static DEFAULT_ADDRESS_PATTERNS: LazyLock<Vec<AddressPattern>> = LazyLock::new(|| {
    ADDRESS_PATTERNS
        .iter()
        .map(|(label, pattern)| AddressPattern {
            label: label.to_string(),
            regex: Regex::new(pattern)
                .unwrap_or_else(|e| panic!("Failed to compile {} address regex: {}", label, e)),
        })
        .collect()
});

static DEFAULT_FIELD_PATTERNS: LazyLock<Vec<(LocationField, Regex)>> = LazyLock::new(|| {
    field_patterns()
        .into_iter()
        .map(|(field, pattern)| {
            let regex = Regex::new(&pattern)
                .unwrap_or_else(|e| panic!("Failed to compile {:?} field regex: {}", field, e));
            (field, regex)
        })
        .collect()
});

static COMPOSITE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&composite_location_pattern()).expect("Failed to compile composite location regex")
});

const COMPOSITE_GROUPS: [(LocationField, &str); 5] = [
    (LocationField::RoadNumber, "road_number"),
    (LocationField::Road, "road"),
    (LocationField::City, "city"),
    (LocationField::Region, "region"),
    (LocationField::Postcode, "postcode"),
];

/// 依部署選定的策略，從正規化文字擷取地址資料
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    strategy: ExtractionStrategy,
    max_value_length: usize,
    address_patterns: Vec<AddressPattern>,
    field_patterns: Vec<(LocationField, Regex)>,
}

impl FieldExtractor {
    pub fn new(strategy: ExtractionStrategy, max_value_length: usize) -> Self {
        Self {
            strategy,
            max_value_length,
            address_patterns: DEFAULT_ADDRESS_PATTERNS.clone(),
            field_patterns: DEFAULT_FIELD_PATTERNS.clone(),
        }
    }

    /// Replaces the cascade table; order is priority.
    pub fn with_address_patterns(mut self, patterns: Vec<AddressPattern>) -> Self {
        self.address_patterns = patterns;
        self
    }

    /// Runs the configured strategy. `None` only when the cascade finds nothing;
    /// structured extraction always yields a tuple, possibly all unknown.
    pub fn extract(&self, text: &str) -> Option<ExtractionResult> {
        match self.strategy {
            ExtractionStrategy::Cascade => self.extract_addresses(text),
            ExtractionStrategy::StructuredFields => {
                Some(ExtractionResult::Fields(self.extract_fields(text)))
            }
        }
    }

    /// Strategy A: the first pattern in table order with any match wins.
    pub fn extract_addresses(&self, text: &str) -> Option<ExtractionResult> {
        for pattern in &self.address_patterns {
            let addresses: Vec<String> = pattern
                .regex
                .find_iter(text)
                .map(|m| m.as_str().trim().to_string())
                .filter(|address| !address.is_empty())
                .collect();

            if !addresses.is_empty() {
                tracing::debug!(
                    "{} address pattern matched {} candidate(s)",
                    pattern.label,
                    addresses.len()
                );
                return Some(ExtractionResult::Addresses {
                    pattern_label: pattern.label.clone(),
                    addresses,
                });
            }
        }
        None
    }

    /// Strategy B: every field regex runs independently. The composite regex
    /// only fills fields its dedicated regex left unknown.
    pub fn extract_fields(&self, text: &str) -> LocationFields {
        let composite = self.extract_composite(text);

        let mut fields = LocationFields::default();
        for (field, regex) in &self.field_patterns {
            let value = first_capture(regex, text)
                .map(|value| FieldValue::capped(value, self.max_value_length))
                .unwrap_or_default();
            fields.set(*field, value.or(composite.get(*field).clone()));
        }
        fields
    }

    fn extract_composite(&self, text: &str) -> LocationFields {
        let mut fields = LocationFields::default();
        if let Some(caps) = COMPOSITE_LOCATION.captures(text) {
            for (field, group) in COMPOSITE_GROUPS {
                if let Some(m) = caps.name(group) {
                    fields.set(field, FieldValue::capped(m.as_str(), self.max_value_length));
                }
            }
        }
        fields
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(ExtractionStrategy::Cascade, DEFAULT_FIELD_VALUE_MAX_LENGTH)
    }
}

/// First capture group that took part in the match.
fn first_capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|caps| caps.iter().skip(1).flatten().next())
        .map(|m| m.as_str())
}
