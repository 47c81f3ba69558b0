//! Regex tables driving the field extractor.
//!
//! Tables are plain data iterated in order; adding a country or a keyword
//! only touches this file.

use crate::domain::model::LocationField;

/// (label, pattern) in priority order. The first pattern with a match wins.
pub const ADDRESS_PATTERNS: &[(&str, &str)] = &[
    (
        "US",
        r"\b\d+\s[A-Za-z\s.]+,\s[A-Za-z\s]+(?:,\s[A-Z]{2})?\s\d{5}(?:-\d{4})?\b",
    ),
    (
        "UK",
        r"\b\d+\s[A-Za-z\s.]+,\s[A-Za-z\s]+(?:,\s[A-Za-z]+)?\s[A-Z]{1,2}\d[A-Z\d]?\s\d[A-Z]{2}\b",
    ),
    (
        "Germany",
        r"\b[A-ZÄÖÜ][A-Za-zÄÖÜäöüß\-]*(?:\s[A-ZÄÖÜ][A-Za-zÄÖÜäöüß\-]*)?\.?\s\d{1,4}\s?[a-z]?,\s\d{5}\s[A-ZÄÖÜ][A-Za-zÄÖÜäöüß\-]+",
    ),
    (
        "Canada",
        r"\b\d+\s[A-Za-z\s.]+,\s[A-Za-z\s]+,?\s[A-Z]{2}\s[A-Z]\d[A-Z]\s?\d[A-Z]\d\b",
    ),
    (
        "France",
        r"\b\d+(?:\s?(?:bis|ter))?,?\s(?i:rue|avenue|av\.|boulevard|bd|place|allée|chemin|quai|impasse|route|cours)\s[A-Za-zÀ-ÿ'\-\s]+,\s\d{5}\s[A-ZÀ-Ý][A-Za-zÀ-ÿ\-]+",
    ),
    (
        "Australia",
        r"\b\d+\s[A-Za-z\s.]+,\s[A-Za-z\s]+\s(?:NSW|VIC|QLD|WA|SA|TAS|ACT|NT)\s\d{4}\b",
    ),
    (
        "Japan",
        r"〒?\d{3}-\d{4}\s[A-Za-z\s,\-]+?\d{1,2}-\d{1,2}-\d{1,2}",
    ),
    (
        "Switzerland",
        r"\b[A-Z][A-Za-zäöüéèà\-]*(?:\s[A-Za-zäöüéèà\-]+)?\s\d{1,4}[a-z]?,\s\d{4}\s[A-Z][A-Za-zäöüéèà\-]+",
    ),
];

const STREET_SUFFIX: &str = r"(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Way|Court|Ct|Place|Pl|Parkway|Pkwy|Square|Sq|Terrace|Highway|Hwy)\b\.?";

const REGION_CODES: &str = r"(?:A[LKZR]|C[AOT]|D[EC]|FL|GA|HI|I[DLNA]|K[SY]|LA|M[EDAINSOT]|N[EVHJMYCD]|O[HKR]|PA|RI|S[CD]|T[NX]|UT|V[TA]|W[AVIY]|ON|QC|BC|AB|MB|SK|NS|NB|NL|PE|NSW|VIC|QLD|TAS|ACT|NT)";

const COUNTRY_NAMES: &str = r"(?:United States(?: of America)?|USA|U\.S\.A\.|United Kingdom|UK|Great Britain|England|Scotland|Wales|Germany|Deutschland|Canada|France|Australia|Japan|Switzerland|Schweiz|Suisse|Austria|Österreich|Ireland|Netherlands|Belgium|Spain|España|Italy|Italia|Portugal|Brazil|Brasil|Mexico|México|New Zealand|Singapore|India|Sweden|Norway|Denmark|Finland|Poland)";

/// One dedicated regex per structured field. The value is the first
/// participating capture group.
pub fn field_patterns() -> Vec<(LocationField, String)> {
    vec![
        (
            LocationField::City,
            format!(
                r"{suffix},\s*([A-Z][A-Za-z]+(?:[\s\-][A-Z][A-Za-z]+)*),?\s+{region}\s+\d|\b\d{{4,5}}\s+([A-ZÄÖÜ][a-zäöüß]+(?:[\s\-][A-ZÄÖÜ][a-zäöüß]+)*)\b",
                suffix = STREET_SUFFIX,
                region = REGION_CODES
            ),
        ),
        (
            LocationField::Postcode,
            format!(
                r"\b{region}\s+(\d{{5}}(?:-\d{{4}})?|\d{{4}}|[A-Z]\d[A-Z]\s?\d[A-Z]\d)\b|\b([A-Z]{{1,2}}\d[A-Z\d]?\s\d[A-Z]{{2}})\b|,\s*(\d{{4,5}})\s+[A-ZÄÖÜ][a-zäöüß]+",
                region = REGION_CODES
            ),
        ),
        (
            LocationField::Road,
            format!(
                r"\b\d{{1,5}}\s+((?:[A-Z][A-Za-z]*\.?\s)+{suffix})|\b([A-ZÄÖÜ][a-zäöüß]+(?:straße|strasse|weg|gasse|platz|allee))\s+\d",
                suffix = STREET_SUFFIX
            ),
        ),
        (
            LocationField::RoadNumber,
            format!(
                r"\b(\d{{1,5}})\s+(?:[A-Z][A-Za-z]*\.?\s)+{suffix}|\b[A-ZÄÖÜ][a-zäöüß]+(?:straße|strasse|weg|gasse|platz|allee)\s+(\d{{1,4}}[a-z]?)\b",
                suffix = STREET_SUFFIX
            ),
        ),
        (LocationField::Country, format!(r"\b({})\b", COUNTRY_NAMES)),
        (
            LocationField::Region,
            format!(
                r",\s*[A-Z][A-Za-z]+(?:\s[A-Z][A-Za-z]+)*,?\s+({region})\s+(?:\d{{4,5}}|[A-Z]\d[A-Z])",
                region = REGION_CODES
            ),
        ),
    ]
}

/// US-shaped "number road, city, region postcode" in one pass.
pub fn composite_location_pattern() -> String {
    format!(
        r"\b(?P<road_number>\d{{1,5}})\s+(?P<road>(?:[A-Z][A-Za-z]*\.?\s)+{suffix}),\s*(?P<city>[A-Z][A-Za-z]+(?:\s[A-Z][A-Za-z]+)*),?\s+(?P<region>{region})\s+(?P<postcode>\d{{5}}(?:-\d{{4}})?)\b",
        suffix = STREET_SUFFIX,
        region = REGION_CODES
    )
}

/// Anchor keywords pointing at a contact page, matched case-insensitively.
pub const CONTACT_KEYWORDS: &[&str] = &[
    "contact us",
    "contact",
    "kontaktieren",
    "kontakt",
    "contacto",
    "contactez-nous",
    "contato",
];

/// URL path shapes of pages that are contact pages by convention.
pub const CONTACT_PATH_PREFIXES: &[&str] = &["/contact", "/about", "/kontakt"];

/// Call-to-action phrases found on contact pages.
pub const CONTACT_PHRASES: &[&str] = &[
    "contact us",
    "get a quote",
    "get in touch",
    "kontaktieren sie uns",
    "contáctenos",
    "contactenos",
    "contactez-nous",
    "fale conosco",
    "entre em contato",
];

/// Conventional fallback when no contact link is found on the homepage.
pub const DEFAULT_CONTACT_PATH: &str = "/contact";
