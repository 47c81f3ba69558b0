use crate::utils::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 不含 scheme 的主機名稱，可帶 `:port`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

impl Domain {
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        let invalid = |reason: &str| ScoutError::InvalidDomainError {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("domain is empty"));
        }
        if value.contains("://") {
            return Err(invalid("domain must not contain a scheme prefix"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid("domain must not contain whitespace"));
        }
        if value.contains('/') {
            return Err(invalid("domain must not contain a path"));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Domain {
    type Error = ScoutError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// 要抓取的頁面：網域加上可選路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub domain: Domain,
    pub path: Option<String>,
}

impl FetchTarget {
    pub fn homepage(domain: Domain) -> Self {
        Self { domain, path: None }
    }

    pub fn with_path(domain: Domain, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        Self {
            domain,
            path: Some(path),
        }
    }

    pub fn url(&self, protocol: Protocol) -> String {
        format!(
            "{}://{}{}",
            protocol.scheme(),
            self.domain,
            self.path.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    Timeout,
    NetworkError,
}

/// 單次嘗試的結果，只存在於一次 fetch 呼叫之內
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success { final_url: String },
    Failed(FetchErrorKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalAttempt {
    pub url: String,
    pub protocol: Protocol,
    pub attempt_number: u32,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub markup: String,
    pub final_url: String,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub kind: FetchErrorKind,
    pub attempts: u32,
    pub message: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} after {} attempt(s): {}",
            self.kind, self.attempts, self.message
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Known(String),
    #[default]
    Unknown,
}

impl FieldValue {
    /// 超過上限的匹配視為雜訊
    pub fn capped(value: &str, max_len: usize) -> Self {
        let value = value.trim();
        if value.is_empty() || value.chars().count() > max_len {
            FieldValue::Unknown
        } else {
            FieldValue::Known(value.to_string())
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldValue::Unknown)
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            FieldValue::Known(value) => Some(value),
            FieldValue::Unknown => None,
        }
    }

    pub fn or(self, other: FieldValue) -> FieldValue {
        match self {
            FieldValue::Unknown => other,
            known => known,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationField {
    City,
    Postcode,
    Road,
    RoadNumber,
    Country,
    Region,
}

impl LocationField {
    pub const ALL: [LocationField; 6] = [
        LocationField::City,
        LocationField::Postcode,
        LocationField::Road,
        LocationField::RoadNumber,
        LocationField::Country,
        LocationField::Region,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFields {
    pub city: FieldValue,
    pub postcode: FieldValue,
    pub road: FieldValue,
    pub road_number: FieldValue,
    pub country: FieldValue,
    pub region: FieldValue,
}

impl LocationFields {
    pub fn get(&self, field: LocationField) -> &FieldValue {
        match field {
            LocationField::City => &self.city,
            LocationField::Postcode => &self.postcode,
            LocationField::Road => &self.road,
            LocationField::RoadNumber => &self.road_number,
            LocationField::Country => &self.country,
            LocationField::Region => &self.region,
        }
    }

    pub fn set(&mut self, field: LocationField, value: FieldValue) {
        let slot = match field {
            LocationField::City => &mut self.city,
            LocationField::Postcode => &mut self.postcode,
            LocationField::Road => &mut self.road,
            LocationField::RoadNumber => &mut self.road_number,
            LocationField::Country => &mut self.country,
            LocationField::Region => &mut self.region,
        };
        *slot = value;
    }

    pub fn is_complete(&self) -> bool {
        LocationField::ALL
            .iter()
            .all(|field| !self.get(*field).is_unknown())
    }

    pub fn is_empty(&self) -> bool {
        LocationField::ALL
            .iter()
            .all(|field| self.get(*field).is_unknown())
    }

    pub fn unknown_fields(&self) -> Vec<LocationField> {
        LocationField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_unknown())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionResult {
    Addresses {
        pattern_label: String,
        addresses: Vec<String>,
    },
    Fields(LocationFields),
}

impl ExtractionResult {
    /// 是否已足夠，不需要再找聯絡頁
    pub fn is_sufficient(&self) -> bool {
        match self {
            ExtractionResult::Addresses { addresses, .. } => !addresses.is_empty(),
            ExtractionResult::Fields(fields) => fields.is_complete(),
        }
    }

    pub fn has_any_value(&self) -> bool {
        match self {
            ExtractionResult::Addresses { addresses, .. } => !addresses.is_empty(),
            ExtractionResult::Fields(fields) => !fields.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionStatus {
    Resolved { result: ExtractionResult },
    NoAddressFound,
    FetchFailed { failure: FetchFailure },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainResult {
    pub domain: Domain,
    #[serde(flatten)]
    pub status: ResolutionStatus,
    pub source_url: Option<String>,
    pub contact_page_used: bool,
}

impl DomainResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self.status, ResolutionStatus::Resolved { .. })
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self.status, ResolutionStatus::FetchFailed { .. })
    }

    pub fn is_address_miss(&self) -> bool {
        matches!(self.status, ResolutionStatus::NoAddressFound)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub successful: usize,
    pub failed_to_fetch: usize,
    pub failed_to_get_address: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn record(&mut self, result: &DomainResult) {
        self.total += 1;
        match result.status {
            ResolutionStatus::Resolved { .. } => self.successful += 1,
            ResolutionStatus::FetchFailed { .. } => self.failed_to_fetch += 1,
            ResolutionStatus::NoAddressFound => self.failed_to_get_address += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_rejects_scheme_and_blank() {
        assert!(Domain::parse("example.com").is_ok());
        assert!(Domain::parse("127.0.0.1:8080").is_ok());
        assert_eq!(Domain::parse("  example.com ").unwrap().as_str(), "example.com");
        assert!(Domain::parse("").is_err());
        assert!(Domain::parse("   ").is_err());
        assert!(Domain::parse("https://example.com").is_err());
        assert!(Domain::parse("example.com/about").is_err());
    }

    #[test]
    fn test_fetch_target_url() {
        let domain = Domain::parse("example.com").unwrap();
        let home = FetchTarget::homepage(domain.clone());
        assert_eq!(home.url(Protocol::Http), "http://example.com");

        let contact = FetchTarget::with_path(domain, "contact");
        assert_eq!(contact.url(Protocol::Https), "https://example.com/contact");
    }

    #[test]
    fn test_field_value_cap() {
        assert_eq!(
            FieldValue::capped(" Springfield ", 150),
            FieldValue::Known("Springfield".to_string())
        );
        assert!(FieldValue::capped(&"a".repeat(200), 150).is_unknown());
        assert!(FieldValue::capped(&"a".repeat(150), 150).as_deref().is_some());
    }

    #[test]
    fn test_location_fields_completeness() {
        let mut fields = LocationFields::default();
        assert!(fields.is_empty());
        assert!(!fields.is_complete());

        for field in LocationField::ALL {
            fields.set(field, FieldValue::Known("x".to_string()));
        }
        assert!(fields.is_complete());

        fields.set(LocationField::Region, FieldValue::Unknown);
        assert!(!fields.is_complete());
        assert_eq!(fields.unknown_fields(), vec![LocationField::Region]);
    }

    #[test]
    fn test_run_summary_counts_each_status_once() {
        let domain = Domain::parse("example.com").unwrap();
        let mut summary = RunSummary::default();
        summary.record(&DomainResult {
            domain: domain.clone(),
            status: ResolutionStatus::NoAddressFound,
            source_url: None,
            contact_page_used: false,
        });
        summary.record(&DomainResult {
            domain,
            status: ResolutionStatus::FetchFailed {
                failure: FetchFailure {
                    kind: FetchErrorKind::Timeout,
                    attempts: 4,
                    message: "timed out".to_string(),
                },
            },
            source_url: None,
            contact_page_used: false,
        });

        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed_to_get_address, 1);
        assert_eq!(summary.failed_to_fetch, 1);
        assert_eq!(summary.successful, 0);
    }
}
