use address_scout::core::extractor::AddressPattern;
use address_scout::core::ConfigProvider;
use address_scout::domain::model::FetchErrorKind;
use address_scout::domain::ports::ExtractionStrategy;
use address_scout::{
    run_batch, Domain, DomainResolver, ExtractionResult, FieldExtractor, HttpTransport,
    ResolutionStatus, ResolverSettings, TomlConfig,
};
use httpmock::prelude::*;
use regex::Regex;
use tempfile::TempDir;

fn server_domain(server: &MockServer) -> Domain {
    Domain::parse(&server.address().to_string()).unwrap()
}

fn fast_settings() -> ResolverSettings {
    ResolverSettings {
        request_timeout_ms: 2000,
        ..Default::default()
    }
}

fn resolver(settings: &ResolverSettings) -> DomainResolver<HttpTransport> {
    let transport = HttpTransport::new(&settings.user_agent).unwrap();
    DomainResolver::new(transport, settings)
}

#[tokio::test]
async fn test_homepage_address_over_real_http() {
    let server = MockServer::start();
    let home = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html><body><footer>Acme Corp, 123 Main St, Springfield, IL 62704</footer></body></html>");
    });

    let result = resolver(&fast_settings()).resolve(&server_domain(&server)).await;

    home.assert();
    assert!(result.is_resolved());
    assert!(!result.contact_page_used);
    let ResolutionStatus::Resolved {
        result: ExtractionResult::Addresses { pattern_label, addresses },
    } = result.status
    else {
        panic!("expected addresses, got {:?}", result.status);
    };
    assert_eq!(pattern_label, "US");
    assert_eq!(addresses, vec!["123 Main St, Springfield, IL 62704"]);
}

#[tokio::test]
async fn test_located_contact_link_is_followed() {
    let server = MockServer::start();
    let home = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body(
            r#"<html><body><nav><a href="/impressum">Impressum</a><a href="/kontakt">Kontakt</a></nav><p>Willkommen</p></body></html>"#,
        );
    });
    let kontakt = server.mock(|when, then| {
        when.method(GET).path("/kontakt");
        then.status(200)
            .body("<html><body><p>Anschrift: Musterstraße 12, 10115 Berlin</p></body></html>");
    });

    let result = resolver(&fast_settings()).resolve(&server_domain(&server)).await;

    home.assert();
    kontakt.assert();
    assert!(result.is_resolved());
    assert!(result.contact_page_used);
    assert!(result.source_url.unwrap().ends_with("/kontakt"));
}

#[tokio::test]
async fn test_server_error_exhausts_budget() {
    let server = MockServer::start();
    let home = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(500);
    });

    let settings = ResolverSettings {
        attempt_budget: 2,
        ..fast_settings()
    };
    let result = resolver(&settings).resolve(&server_domain(&server)).await;

    home.assert_hits(2);
    let ResolutionStatus::FetchFailed { failure } = result.status else {
        panic!("expected fetch failure, got {:?}", result.status);
    };
    assert_eq!(failure.kind, FetchErrorKind::NetworkError);
    assert_eq!(failure.attempts, 2);
    assert!(!result.contact_page_used);
}

#[tokio::test]
async fn test_structured_fields_from_default_contact_path() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("<html><body><h1>Globex</h1><p>Made in Germany</p></body></html>");
    });
    let contact = server.mock(|when, then| {
        when.method(GET).path("/contact");
        then.status(200)
            .body("<html><body><address>Globex, 42 Elm Street, Portland, OR 97205, USA</address></body></html>");
    });

    let settings = ResolverSettings {
        extraction_strategy: ExtractionStrategy::StructuredFields,
        ..fast_settings()
    };
    let result = resolver(&settings).resolve(&server_domain(&server)).await;

    contact.assert();
    let ResolutionStatus::Resolved {
        result: ExtractionResult::Fields(fields),
    } = result.status
    else {
        panic!("expected fields, got {:?}", result.status);
    };
    assert_eq!(fields.city.as_deref(), Some("Portland"));
    assert_eq!(fields.postcode.as_deref(), Some("97205"));
    assert!(result.contact_page_used);
}

#[tokio::test]
async fn test_custom_pattern_table() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("<p>Depot: Pier 39 (North Dock)</p>");
    });

    let settings = fast_settings();
    let extractor = FieldExtractor::new(ExtractionStrategy::Cascade, 150).with_address_patterns(vec![
        AddressPattern {
            label: "Pier".to_string(),
            regex: Regex::new(r"Pier \d+ \([^)]+\)").unwrap(),
        },
    ]);
    let result = resolver(&settings)
        .with_extractor(extractor)
        .resolve(&server_domain(&server))
        .await;

    let ResolutionStatus::Resolved {
        result: ExtractionResult::Addresses { pattern_label, addresses },
    } = result.status
    else {
        panic!("expected addresses, got {:?}", result.status);
    };
    assert_eq!(pattern_label, "Pier");
    assert_eq!(addresses, vec!["Pier 39 (North Dock)"]);
}

#[tokio::test]
async fn test_batch_run_writes_reports() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let input_path = temp_dir.path().join("domains.csv");
    let output_path = temp_dir.path().join("out");

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("<p>1 First Ave, Albany, NY 12207</p>");
    });

    std::fs::write(
        &input_path,
        format!(
            "company,domain\nAcme,{}\nBroken,https://not-a-domain\n",
            server.address()
        ),
    )?;

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[run]
name = "integration"

[input]
path = "{}"

[fetch]
request_timeout_ms = 2000

[output]
path = "{}"
"#,
        input_path.display(),
        output_path.display()
    ))?;
    assert_eq!(config.attempt_budget(), 4);

    let summary = run_batch(&config, false).await?;
    assert_eq!(summary.total, 1);
    assert_eq!(summary.successful, 1);

    let successful: serde_json::Value =
        serde_json::from_slice(&std::fs::read(output_path.join("successful_data.json"))?)?;
    assert_eq!(successful[0]["domain"], server.address().to_string());
    assert_eq!(successful[0]["kind"], "addresses");

    let failed: serde_json::Value =
        serde_json::from_slice(&std::fs::read(output_path.join("failed_data.json"))?)?;
    assert_eq!(failed.as_array().map(Vec::len), Some(0));

    let log = std::fs::read_to_string(output_path.join("fetch_log.txt"))?;
    assert!(log.contains("Domains successfully fetched: 1"));
    Ok(())
}

#[tokio::test]
async fn test_batch_run_missing_input_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[run]
name = "missing"

[input]
path = "{}"

[output]
path = "{}"
"#,
        temp_dir.path().join("nope.txt").display(),
        temp_dir.path().join("out").display()
    ))
    .unwrap();

    let err = run_batch(&config, false).await.unwrap_err();
    assert!(matches!(err, address_scout::ScoutError::IoError(_)));
}
