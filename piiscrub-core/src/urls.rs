// piiscrub-core/src/urls.rs
//! Rule-based classification of GOV.UK page URLs.
//!
//! Survey responses record the page the respondent was on. Before the page is
//! looked up against the content API it is normalised to the level at which
//! the lookup is meaningful, and some pages are classified outright: site
//! navigation, contact pages, browse sections and overseas country pages.
//! Rules are checked in order and the first match wins.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use serde::{Deserialize, Serialize};

/// Section assigned to the home page, search and help pages.
pub const SITE_NAV: &str = "site-nav";

/// Section assigned to contact pages.
pub const CONTACT: &str = "contact";

/// Organisation that owns every `/government/world` page.
pub const WORLD_ORG: &str = "Foreign & Commonwealth Office";

const WORLD_PREFIX: &str = "/government/world";

const HOST_PREFIXES: [&str; 4] = [
    "https://www.gov.uk",
    "http://www.gov.uk",
    "https://gov.uk",
    "http://gov.uk",
];

/// The normalised page and whatever the rules could decide about it.
/// `None` means "unknown, ask the content API".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedUrl {
    pub full_url: String,
    pub page: String,
    pub org0: Option<String>,
    pub section0: Option<String>,
    pub section1: Option<String>,
}

impl CleanedUrl {
    fn for_page(full_url: &str, page: impl Into<String>) -> Self {
        Self {
            full_url: full_url.to_string(),
            page: page.into(),
            org0: None,
            section0: None,
            section1: None,
        }
    }

    fn with_sections(mut self, section: &str) -> Self {
        self.section0 = Some(section.to_string());
        self.section1 = Some(section.to_string());
        self
    }

    /// True when nothing is left for the content API to fill in.
    pub fn is_classified(&self) -> bool {
        self.org0.is_some() || self.section0.is_some()
    }
}

/// Reduces `full_url` to a path: drops a GOV.UK scheme and host, the query
/// string and the fragment.
fn path_of(full_url: &str) -> &str {
    let mut path = full_url.trim();
    for prefix in HOST_PREFIXES {
        if let Some(rest) = path.strip_prefix(prefix) {
            path = rest;
            break;
        }
    }
    match path.find(['?', '#']) {
        Some(index) => &path[..index],
        None => path,
    }
}

/// Classifies one survey URL.
///
/// Prefixes are matched on the raw path, so `/government-digital-service`
/// counts as a `/government` page. A `/government/world` segment anywhere
/// in the path marks an overseas page.
pub fn clean_url(full_url: &str) -> CleanedUrl {
    let path = path_of(full_url);

    let cleaned = if path.is_empty() || path == "/" {
        CleanedUrl::for_page(full_url, "/").with_sections(SITE_NAV)
    } else if path.contains(WORLD_PREFIX) {
        CleanedUrl {
            org0: Some(WORLD_ORG.to_string()),
            ..CleanedUrl::for_page(full_url, WORLD_PREFIX)
        }
    } else if path.starts_with("/government") || path.starts_with("/guidance") {
        CleanedUrl::for_page(full_url, path)
    } else if let Some(rest) = path.strip_prefix("/browse/") {
        match rest.split('/').next().filter(|s| !s.is_empty()) {
            Some(section) => CleanedUrl {
                section0: Some(section.to_string()),
                ..CleanedUrl::for_page(full_url, format!("/browse/{section}"))
            },
            None => CleanedUrl::for_page(full_url, "/browse"),
        }
    } else if path.starts_with("/search") || path.starts_with("/help") {
        CleanedUrl::for_page(full_url, path).with_sections(SITE_NAV)
    } else if path.starts_with("/contact") {
        CleanedUrl::for_page(full_url, path).with_sections(CONTACT)
    } else {
        let top_level = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        CleanedUrl::for_page(full_url, format!("/{top_level}"))
    };

    debug!("Cleaned URL '{}' to page '{}'.", full_url, cleaned.page);
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_site_nav() {
        let cleaned = clean_url("/");
        assert_eq!(cleaned.full_url, "/");
        assert_eq!(cleaned.page, "/");
        assert_eq!(cleaned.section0.as_deref(), Some(SITE_NAV));
        assert_eq!(cleaned.section1.as_deref(), Some(SITE_NAV));
        assert_eq!(cleaned.org0, None);
    }

    #[test]
    fn test_world_pages_belong_to_fco() {
        let cleaned = clean_url("/government/world/turkey");
        assert_eq!(cleaned.page, "/government/world");
        assert_eq!(cleaned.org0.as_deref(), Some(WORLD_ORG));
        assert_eq!(cleaned.section0, None);
    }

    #[test]
    fn test_government_and_guidance_keep_full_path() {
        for url in [
            "/government/publications/crown-commercial-service-customer-update-september-2016/crown-commercial-service-update-september-2016",
            "/guidance/guidance-for-driving-examiners-carrying-out-driving-tests-dt1/05-candidates-with-an-impairment",
        ] {
            let cleaned = clean_url(url);
            assert_eq!(cleaned.page, url);
            assert!(!cleaned.is_classified());
        }
    }

    #[test]
    fn test_browse_sets_section() {
        let cleaned = clean_url("/browse/births-deaths-marriages");
        assert_eq!(cleaned.page, "/browse/births-deaths-marriages");
        assert_eq!(cleaned.section0.as_deref(), Some("births-deaths-marriages"));
        assert_eq!(cleaned.org0, None);

        let nested = clean_url("/browse/driving/car-tax-discs");
        assert_eq!(nested.page, "/browse/driving");
        assert_eq!(nested.section0.as_deref(), Some("driving"));
    }

    #[test]
    fn test_search_help_and_contact() {
        let search = clean_url("/search/this-is/a-search/url");
        assert_eq!(search.page, "/search/this-is/a-search/url");
        assert_eq!(search.section1.as_deref(), Some(SITE_NAV));

        let help = clean_url("/help/this/is/a/help/url");
        assert_eq!(help.section0.as_deref(), Some(SITE_NAV));

        let contact = clean_url("/contact/this/is/a/contact/url");
        assert_eq!(contact.page, "/contact/this/is/a/contact/url");
        assert_eq!(contact.section0.as_deref(), Some(CONTACT));
        assert_eq!(contact.section1.as_deref(), Some(CONTACT));
    }

    #[test]
    fn test_other_pages_strip_to_top_level() {
        let cleaned = clean_url("https://www.gov.uk/vehicle-tax/renew?step=2");
        assert_eq!(cleaned.full_url, "https://www.gov.uk/vehicle-tax/renew?step=2");
        assert_eq!(cleaned.page, "/vehicle-tax");
        assert!(!cleaned.is_classified());
    }

    #[test]
    fn test_world_segment_anywhere_in_path() {
        let cleaned = clean_url("/en/government/world/france");
        assert_eq!(cleaned.page, "/government/world");
        assert_eq!(cleaned.org0.as_deref(), Some(WORLD_ORG));

        let hosted = clean_url("https://www.gov.uk/world/organisations/government/world/usa?x=1");
        assert_eq!(hosted.org0.as_deref(), Some(WORLD_ORG));
    }

    #[test]
    fn test_government_prefix_is_not_segment_bound() {
        let cleaned = clean_url("/government-digital-service/blog");
        assert_eq!(cleaned.page, "/government-digital-service/blog");
        assert!(!cleaned.is_classified());

        let guidance = clean_url("/guidance-notes/tax");
        assert_eq!(guidance.page, "/guidance-notes/tax");
    }

    #[test]
    fn test_bare_browse_and_lookalike_prefix() {
        assert_eq!(clean_url("/browse").page, "/browse");
        assert_eq!(clean_url("/browse/").section0, None);
        let lookalike = clean_url("/browsers/help");
        assert_eq!(lookalike.page, "/browsers");
        assert!(!lookalike.is_classified());
    }

    #[test]
    fn test_search_prefix_without_slash() {
        let cleaned = clean_url("/search?q=passport");
        assert_eq!(cleaned.page, "/search");
        assert_eq!(cleaned.section0.as_deref(), Some(SITE_NAV));
    }

    #[test]
    fn test_empty_url_is_site_nav() {
        let cleaned = clean_url("  ");
        assert_eq!(cleaned.page, "/");
        assert_eq!(cleaned.section0.as_deref(), Some(SITE_NAV));
    }
}
