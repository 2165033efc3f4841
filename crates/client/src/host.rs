//! Host names and the REST endpoints derived from them.

use url::Url;

pub const DEFAULT_HOST: &str = "github.com";

const DEFAULT_API_URL: &str = "https://api.github.com/";

/// Lowercases `host` and folds the well-known aliases of the default host.
#[must_use]
pub fn normalize_hostname(host: &str) -> String {
    let host = host.trim().trim_end_matches('/').to_lowercase();

    match host.as_str() {
        "api.github.com" | "www.github.com" => DEFAULT_HOST.to_owned(),
        _ => host,
    }
}

/// REST base URL for `host`.
pub fn rest_base_url(host: &str) -> Result<Url, url::ParseError> {
    let host = normalize_hostname(host);

    if host == DEFAULT_HOST {
        return Url::parse(DEFAULT_API_URL);
    }

    Url::parse(&format!("https://{host}/api/v3/"))
}

/// Ensures `url` ends with a slash so endpoint paths extend it.
#[must_use]
pub fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
