//! Core data types for scraped listings and posts.

use serde::{Deserialize, Serialize};

/// One card on the site's listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    pub title: String,
    /// Site-relative path under the post route, e.g. `/post/some-movie/`.
    pub link: String,
    pub image: String,
}

/// A single download anchor found on a post page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub url: String,
    /// Raw trimmed anchor text.
    pub label: String,
}

/// Download links of one provider, split by quality bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLinks {
    pub name: String,
    #[serde(rename = "links360")]
    pub links_360: Vec<DownloadLink>,
    #[serde(rename = "links720")]
    pub links_720: Vec<DownloadLink>,
}

impl ProviderLinks {
    /// Create an empty provider entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links_360: Vec::new(),
            links_720: Vec::new(),
        }
    }

    /// Append a link to the bucket for `quality`.
    pub fn push(&mut self, quality: Quality, link: DownloadLink) {
        match quality {
            Quality::P360 => self.links_360.push(link),
            Quality::P720 => self.links_720.push(link),
        }
    }

    /// Total number of links across both buckets.
    pub fn len(&self) -> usize {
        self.links_360.len() + self.links_720.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything extracted from a post-detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub title: String,
    /// Absolute embed URLs, in document order.
    pub videos: Vec<String>,
    /// Providers in first-seen order; names are unique.
    pub download_links: Vec<ProviderLinks>,
}

/// Quality bucket a download link is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "360p")]
    P360,
    #[serde(rename = "720p")]
    P720,
}

impl Quality {
    /// Classify a label by substring. `360` wins when both are present.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.contains("360") {
            Some(Self::P360)
        } else if label.contains("720") {
            Some(Self::P720)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P360 => "360p",
            Self::P720 => "720p",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed form of a download anchor's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkLabel {
    /// Provider token with hyphens removed.
    pub provider: String,
    /// Bucket from substring checks; `None` means the link is dropped.
    pub quality: Option<Quality>,
}

/// Errors that can occur in the extraction library.
#[derive(thiserror::Error, Debug)]
pub enum MarqueeError {
    #[error("Invalid origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type MarqueeResult<T> = Result<T, MarqueeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_from_label() {
        assert_eq!(Quality::from_label("(Link 1 X 360p)"), Some(Quality::P360));
        assert_eq!(Quality::from_label("(Link 1 X 720p)"), Some(Quality::P720));
        assert_eq!(Quality::from_label("(Link 1 X 1080p)"), None);
        assert_eq!(Quality::from_label("360 and 720"), Some(Quality::P360));
    }

    #[test]
    fn test_provider_push_buckets() {
        let mut p = ProviderLinks::new("Mega");
        assert!(p.is_empty());
        p.push(
            Quality::P720,
            DownloadLink {
                url: "https://a".into(),
                label: "a".into(),
            },
        );
        assert_eq!(p.links_720.len(), 1);
        assert!(p.links_360.is_empty());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_post_serializes_with_camel_case_keys() {
        let post = Post {
            title: "T".into(),
            videos: vec!["https://v".into()],
            download_links: vec![ProviderLinks::new("Mega")],
        };
        let v = serde_json::to_value(&post).unwrap();
        assert!(v.get("downloadLinks").is_some());
        assert!(v["downloadLinks"][0].get("links360").is_some());
        assert!(v["downloadLinks"][0].get("links720").is_some());
    }
}
