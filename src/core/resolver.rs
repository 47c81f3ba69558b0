use crate::core::contact;
use crate::core::extractor::FieldExtractor;
use crate::core::fetcher::RetryingFetcher;
use crate::core::normalizer::normalize;
use crate::core::patterns::DEFAULT_CONTACT_PATH;
use crate::core::settings::ResolverSettings;
use crate::domain::model::{
    Domain, DomainResult, ExtractionResult, FetchTarget, FetchedPage, ResolutionStatus,
};
use crate::domain::ports::Transport;
use url::Url;

/// Resolves one domain: homepage first, at most one contact-page fallback.
/// Never fails; every outcome is a [`DomainResult`].
pub struct DomainResolver<T: Transport> {
    fetcher: RetryingFetcher<T>,
    extractor: FieldExtractor,
    confirm_contact_page: bool,
}

impl<T: Transport> DomainResolver<T> {
    pub fn new(transport: T, settings: &ResolverSettings) -> Self {
        Self {
            fetcher: RetryingFetcher::new(
                transport,
                settings.attempt_budget,
                settings.request_timeout(),
            ),
            extractor: FieldExtractor::new(
                settings.extraction_strategy,
                settings.field_value_max_length,
            ),
            confirm_contact_page: settings.confirm_contact_page,
        }
    }

    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub async fn resolve(&self, domain: &Domain) -> DomainResult {
        // Fetching
        let homepage = match self.fetcher.fetch(&FetchTarget::homepage(domain.clone())).await {
            Ok(page) => page,
            Err(failure) => {
                tracing::warn!("❌ Failed to fetch {}: {}", domain, failure);
                return DomainResult {
                    domain: domain.clone(),
                    status: ResolutionStatus::FetchFailed { failure },
                    source_url: None,
                    contact_page_used: false,
                };
            }
        };

        // Extracting
        let first = self.extractor.extract(&normalize(&homepage.markup));
        if let Some(result) = first.as_ref().filter(|r| r.is_sufficient()) {
            tracing::info!("✅ Address found for {}", domain);
            return resolved(domain, result.clone(), &homepage, false);
        }

        if let Some(ExtractionResult::Fields(fields)) = &first {
            tracing::debug!("Fields still unknown for {}: {:?}", domain, fields.unknown_fields());
        }

        // SeekingContact
        let target = self.contact_target(domain, &homepage);
        tracing::info!(
            "🔍 Address not found for {}. Trying contact page {}",
            domain,
            target.path.as_deref().unwrap_or("/")
        );

        // FetchingContact
        let contact_page = match self.fetcher.fetch(&target).await {
            Ok(page) => page,
            Err(failure) => {
                tracing::warn!("❌ Failed to fetch contact page for {}: {}", domain, failure);
                return DomainResult {
                    domain: domain.clone(),
                    status: ResolutionStatus::FetchFailed { failure },
                    source_url: None,
                    contact_page_used: true,
                };
            }
        };

        if self.confirm_contact_page
            && !contact::classify(&contact_page.markup, &contact_page.final_url)
        {
            tracing::info!(
                "Page {} does not look like a contact page, skipping",
                contact_page.final_url
            );
            return no_address(domain, &contact_page);
        }

        // ExtractingContact
        match self.extractor.extract(&normalize(&contact_page.markup)) {
            Some(result) if result.has_any_value() => {
                tracing::info!("✅ Address found on contact page for {}", domain);
                resolved(domain, result, &contact_page, true)
            }
            _ => {
                tracing::info!("No address found for {}", domain);
                no_address(domain, &contact_page)
            }
        }
    }

    /// Located link resolved against the homepage URL, or `/contact`.
    fn contact_target(&self, domain: &Domain, homepage: &FetchedPage) -> FetchTarget {
        contact::locate(&homepage.markup)
            .and_then(|href| target_from_href(domain, &homepage.final_url, &href))
            .unwrap_or_else(|| FetchTarget::with_path(domain.clone(), DEFAULT_CONTACT_PATH))
    }
}

fn target_from_href(domain: &Domain, base_url: &str, href: &str) -> Option<FetchTarget> {
    let base = Url::parse(base_url).ok()?;
    let resolved = base.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }

    let host = match (resolved.host_str(), resolved.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => return None,
    };
    // 同一網站的連結沿用原本的網域字串
    let same_site = base.host_str() == resolved.host_str() && base.port() == resolved.port();
    let domain = if same_site {
        domain.clone()
    } else {
        Domain::parse(&host).ok()?
    };

    let mut path = resolved.path().to_string();
    if let Some(query) = resolved.query() {
        path.push('?');
        path.push_str(query);
    }
    Some(FetchTarget::with_path(domain, path))
}

fn resolved(
    domain: &Domain,
    result: ExtractionResult,
    page: &FetchedPage,
    contact_page_used: bool,
) -> DomainResult {
    DomainResult {
        domain: domain.clone(),
        status: ResolutionStatus::Resolved { result },
        source_url: Some(page.final_url.clone()),
        contact_page_used,
    }
}

fn no_address(domain: &Domain, page: &FetchedPage) -> DomainResult {
    DomainResult {
        domain: domain.clone(),
        status: ResolutionStatus::NoAddressFound,
        source_url: Some(page.final_url.clone()),
        contact_page_used: true,
    }
}
