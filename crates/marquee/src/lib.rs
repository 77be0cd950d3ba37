//! Marquee — extraction core for a movie-listing site: listing cards, post videos and grouped download links.

pub mod listing;
pub mod post;
pub mod site;
pub mod types;

pub use listing::extract_listing;
pub use post::{extract_post, group_download_links, normalize_video_url, parse_label};
pub use site::{SiteProfile, DEFAULT_ORIGIN, DEFAULT_POST_ROUTE};
pub use types::*;
