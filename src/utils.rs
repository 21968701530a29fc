use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;
use url::Url;

pub const LOG_FILE: &str = "querymon.log";

/// Console logging plus a mirror into `querymon.log` when the file can be
/// created; `RUST_LOG` overrides the flag-derived level.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::rfc_3339();

    match File::create(LOG_FILE) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(timer)
            .with_writer(std::io::stderr.and(Arc::new(file)))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(timer)
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// Host part of the site address: `https://example.com/shop` and
/// `example.com/shop` both yield `example.com`.
pub fn domain_from_site_url(site_url: &str) -> String {
    if let Ok(url) = Url::parse(site_url) {
        if let Some(host) = url.host_str() {
            return host.to_string();
        }
    }

    let without_scheme = site_url.rsplit("//").next().unwrap_or(site_url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

pub fn format_number(num: u64) -> String {
    num.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_extracted_with_and_without_scheme() {
        assert_eq!(domain_from_site_url("https://example.com"), "example.com");
        assert_eq!(
            domain_from_site_url("https://example.com/shop/"),
            "example.com"
        );
        assert_eq!(domain_from_site_url("http://site.ru/a/b"), "site.ru");
        assert_eq!(domain_from_site_url("example.com/shop"), "example.com");
        assert_eq!(domain_from_site_url("example.com"), "example.com");
    }

    #[test]
    fn numbers_get_thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
