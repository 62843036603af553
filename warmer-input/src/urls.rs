//! URL lists from CSV files

use std::fs::File;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

use crate::error::{InputError, InputResult};
use warmer_engine::UrlTarget;

/// Read the first column of every row of a CSV file as a URL.
///
/// Blank rows are skipped. Rows whose first cell is not an absolute
/// `http`/`https` URL are skipped with a warning. The file has no header
/// row and rows may have any number of columns.
pub fn read_urls_from_csv(path: impl AsRef<Path>) -> InputResult<Vec<UrlTarget>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut urls = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|source| csv_error(path, source))?;
        let Some(cell) = record.get(0).map(str::trim) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }

        if is_http_url(cell) {
            urls.push(UrlTarget::new(cell));
        } else {
            warn!(
                "Skipping row {} of {}: '{}' is not an http(s) URL",
                line + 1,
                path.display(),
                cell
            );
        }
    }

    Ok(urls)
}

/// Read and concatenate several CSV files, in order
pub fn read_url_files<P: AsRef<Path>>(paths: &[P]) -> InputResult<Vec<UrlTarget>> {
    let mut all = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let urls = read_urls_from_csv(path)?;
        if urls.is_empty() {
            warn!("No URLs found in {}", path.display());
            continue;
        }
        info!("Found {} URLs in {}", urls.len(), path.display());
        all.extend(urls);
    }

    Ok(all)
}

fn is_http_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

fn csv_error(path: &Path, source: csv::Error) -> InputError {
    InputError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.com/a?b=1"));
        assert!(is_http_url("http://localhost:8080/"));
        assert!(!is_http_url("ftp://example.com/file"));
        assert!(!is_http_url("/relative/path"));
        assert!(!is_http_url("url"));
        assert!(!is_http_url("mailto:ops@example.com"));
    }
}
