//! The target site: origin and the local route posts are mounted under.

use crate::types::{MarqueeError, MarqueeResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Origin of the movie-listing site.
pub const DEFAULT_ORIGIN: &str = "https://www.watch-movies.com.pk";

/// Local route prefix that listing links are rewritten under.
pub const DEFAULT_POST_ROUTE: &str = "/post";

/// Where pages come from and how their links are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Scheme and host, no trailing slash.
    pub origin: String,
    pub post_route: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            post_route: DEFAULT_POST_ROUTE.to_string(),
        }
    }
}

impl SiteProfile {
    /// Build a profile for `origin`, which must be an http(s) URL.
    pub fn new(origin: &str) -> MarqueeResult<Self> {
        let parsed = Url::parse(origin)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MarqueeError::InvalidOrigin {
                origin: origin.to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }
        if parsed.host_str().is_none() {
            return Err(MarqueeError::InvalidOrigin {
                origin: origin.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            post_route: DEFAULT_POST_ROUTE.to_string(),
        })
    }

    /// URL of the listing (home) page.
    pub fn listing_url(&self) -> &str {
        &self.origin
    }

    /// Remote URL of the post identified by `id` (its path on the site).
    pub fn post_url(&self, id: &str) -> String {
        format!("{}/{}", self.origin, id.trim_start_matches('/'))
    }

    /// Rewrite a site href into a local post link.
    ///
    /// The first occurrence of the origin is removed and the post route is
    /// prepended; hrefs pointing elsewhere keep their text after the prefix.
    pub fn local_link(&self, href: Option<&str>) -> String {
        let path = href.map(|h| h.replacen(&self.origin, "", 1)).unwrap_or_default();
        format!("{}{}", self.post_route, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let site = SiteProfile::default();
        assert_eq!(site.listing_url(), "https://www.watch-movies.com.pk");
        assert_eq!(
            site.post_url("some-movie/"),
            "https://www.watch-movies.com.pk/some-movie/"
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let site = SiteProfile::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(site.origin, "http://127.0.0.1:8080");
        assert_eq!(site.post_url("/a/b"), "http://127.0.0.1:8080/a/b");
    }

    #[test]
    fn test_new_rejects_non_http() {
        assert!(matches!(
            SiteProfile::new("ftp://example.com"),
            Err(MarqueeError::InvalidOrigin { .. })
        ));
        assert!(matches!(
            SiteProfile::new("not a url"),
            Err(MarqueeError::Url(_))
        ));
    }

    #[test]
    fn test_local_link() {
        let site = SiteProfile::default();
        assert_eq!(
            site.local_link(Some("https://www.watch-movies.com.pk/the-movie-2024/")),
            "/post/the-movie-2024/"
        );
        assert_eq!(site.local_link(Some("/relative/")), "/post/relative/");
        assert_eq!(site.local_link(None), "/post");
    }
}
