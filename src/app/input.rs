use crate::domain::model::Domain;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScoutError};

const DOMAIN_COLUMN: &str = "domain";

/// 透過 Storage 讀取網域清單
pub async fn load_domains<S: Storage>(storage: &S, path: &str) -> Result<Vec<Domain>> {
    let bytes = storage.read_file(path).await?;
    let content = String::from_utf8(bytes).map_err(|e| ScoutError::InputError {
        message: format!("{} is not valid UTF-8: {}", path, e),
    })?;

    let domains = parse_domain_list(&content)?;
    tracing::info!("📥 Loaded {} domain(s) from {}", domains.len(), path);
    Ok(domains)
}

/// 解析網域清單。第一個有效行含 `domain` 欄位時視為 CSV，否則每行一個網域。
/// `#` 開頭的行會略過，無效的網域記錄警告後略過。
pub fn parse_domain_list(content: &str) -> Result<Vec<Domain>> {
    let raw = match read_csv_column(content)? {
        Some(values) => values,
        None => read_lines(content),
    };

    let mut domains = Vec::with_capacity(raw.len());
    for value in raw {
        match Domain::parse(&value) {
            Ok(domain) => domains.push(domain),
            Err(e) => tracing::warn!("⚠️ Skipping {:?}: {}", value, e),
        }
    }

    if domains.is_empty() {
        return Err(ScoutError::InputError {
            message: "no valid domains in input".to_string(),
        });
    }
    Ok(domains)
}

fn meaningful_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// 標頭列有 `domain` 欄位時回傳該欄的值，否則回傳 None 交給逐行解析
fn read_csv_column(content: &str) -> Result<Option<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let column = match reader.headers() {
        Ok(headers) => headers
            .iter()
            .position(|cell| cell.eq_ignore_ascii_case(DOMAIN_COLUMN)),
        Err(_) => None,
    };
    let Some(column) = column else {
        return Ok(None);
    };

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(value) if !value.is_empty() => values.push(value.to_string()),
            _ => tracing::debug!("Row {:?} has no domain value", record.position()),
        }
    }
    Ok(Some(values))
}

fn read_lines(content: &str) -> Vec<String> {
    meaningful_lines(content).map(str::to_string).collect()
}
