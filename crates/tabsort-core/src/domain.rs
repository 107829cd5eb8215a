//! URL decomposition for the domain sort rule
//!
//! Hosts come back from the `url` crate already IDNA/punycode-normalized.
//! Registrable-domain extraction is a two-label heuristic, not a
//! public-suffix-list lookup: `mail.google.com` reduces to `google.com`, but
//! multi-part suffixes like `co.uk` are knowingly misgrouped
//! (`bbc.co.uk` reduces to `co.uk`).

use crate::key::SortKey;
use url::Url;

/// Leading key element for URLs that sort by domain
pub const REAL_URL_RANK: i64 = 0;

/// Leading key element for special and unparseable URLs; orders after every
/// real domain whatever the domain text is
pub const SPECIAL_URL_RANK: i64 = 1;

/// Schemes that never sort by domain: internal browser pages, extension
/// pages, and non-hierarchical resources.
const SPECIAL_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "moz-extension",
    "edge",
    "about",
    "data",
    "file",
];

fn is_special_scheme(scheme: &str) -> bool {
    SPECIAL_SCHEMES.contains(&scheme)
}

/// Whether the URL uses a scheme excluded from domain sorting
#[must_use]
pub fn is_special_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => is_special_scheme(parsed.scheme()),
        Err(_) => false,
    }
}

/// The last two dot-separated labels of a host, or the host itself when it
/// has fewer than two labels.
#[must_use]
pub fn registrable_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() >= 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}

/// The host with its registrable domain stripped, empty when they coincide
#[must_use]
pub fn subdomain(host: &str) -> String {
    let registrable = registrable_domain(host);
    if host == registrable {
        return String::new();
    }
    host.strip_suffix(&format!(".{registrable}"))
        .unwrap_or(host)
        .to_string()
}

/// Build the domain-rule key for a tab URL
///
/// Valid URLs produce `(rank, registrable domain, subdomain, path, title)`,
/// all text lower-cased. Unparseable URLs and special schemes carry the
/// special rank so they land after every real domain; special URLs tie-break
/// among themselves on the full URL.
#[must_use]
pub fn domain_key(url: &str, title: &str) -> SortKey {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => {
            return SortKey::seq(vec![
                SortKey::num(SPECIAL_URL_RANK),
                SortKey::text(""),
                SortKey::text(""),
                SortKey::text(""),
                SortKey::text(""),
            ]);
        }
    };

    if is_special_scheme(parsed.scheme()) {
        return SortKey::seq(vec![
            SortKey::num(SPECIAL_URL_RANK),
            SortKey::text(url),
            SortKey::text(""),
            SortKey::text(""),
            SortKey::text(""),
        ]);
    }

    let host = parsed.host_str().unwrap_or("");
    SortKey::seq(vec![
        SortKey::num(REAL_URL_RANK),
        SortKey::text(registrable_domain(host).to_lowercase()),
        SortKey::text(subdomain(host).to_lowercase()),
        SortKey::text(parsed.path().to_lowercase()),
        SortKey::text(title.to_lowercase()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortOrder;
    use std::cmp::Ordering;

    #[test]
    fn registrable_domain_takes_last_two_labels() {
        assert_eq!(registrable_domain("mail.google.com"), "google.com");
        assert_eq!(registrable_domain("google.com"), "google.com");
        assert_eq!(registrable_domain("localhost"), "localhost");
    }

    #[test]
    fn two_label_heuristic_misgroups_multi_part_suffixes() {
        // Known approximation: no public-suffix list, so co.uk wins.
        assert_eq!(registrable_domain("news.bbc.co.uk"), "co.uk");
        assert_eq!(subdomain("news.bbc.co.uk"), "news.bbc");
    }

    #[test]
    fn subdomain_strips_registrable_suffix() {
        assert_eq!(subdomain("mail.google.com"), "mail");
        assert_eq!(subdomain("google.com"), "");
        assert_eq!(subdomain("a.b.example.org"), "a.b");
    }

    #[test]
    fn special_schemes_are_recognized() {
        assert!(is_special_url("chrome://extensions"));
        assert!(is_special_url("about:blank"));
        assert!(is_special_url("file:///tmp/x.html"));
        assert!(is_special_url("data:text/plain,hi"));
        assert!(!is_special_url("https://example.com"));
        assert!(!is_special_url("not a url"));
    }

    #[test]
    fn google_subdomains_share_registrable_domain_and_tie_break() {
        let mail = domain_key("https://mail.google.com/x", "Mail");
        let docs = domain_key("https://docs.google.com/y", "Docs");
        // Same registrable domain, docs before mail on the subdomain element.
        assert_eq!(docs.compare(&mail, SortOrder::Asc), Ordering::Less);
    }

    #[test]
    fn special_url_sorts_after_any_valid_https_url() {
        let special = domain_key("chrome://extensions", "Extensions");
        for url in ["https://zzz.zz/z", "https://aaa.aa/a", "https://zzzz.example"] {
            let real = domain_key(url, "t");
            assert_eq!(
                special.compare(&real, SortOrder::Asc),
                Ordering::Greater,
                "special must sort after {url}"
            );
        }
    }

    #[test]
    fn special_urls_tie_break_on_the_full_url() {
        let extensions = domain_key("chrome://extensions", "Extensions");
        let settings = domain_key("chrome://settings", "Settings");
        assert_eq!(extensions.compare(&settings, SortOrder::Asc), Ordering::Less);
    }

    #[test]
    fn unparseable_url_gets_the_special_rank() {
        let key = domain_key("", "New tab");
        let expected = SortKey::seq(vec![
            SortKey::num(SPECIAL_URL_RANK),
            SortKey::text(""),
            SortKey::text(""),
            SortKey::text(""),
            SortKey::text(""),
        ]);
        assert_eq!(key, expected);
    }

    #[test]
    fn valid_url_key_is_lower_cased() {
        let key = domain_key("https://Mail.Google.com/INBOX", "My INBOX");
        let expected = SortKey::seq(vec![
            SortKey::num(REAL_URL_RANK),
            SortKey::text("google.com"),
            SortKey::text("mail"),
            SortKey::text("/inbox"),
            SortKey::text("my inbox"),
        ]);
        assert_eq!(key, expected);
    }
}
