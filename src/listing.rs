//! Candidate extraction from the release listing page.
//!
//! The listing is scraped HTML. The page-shape-specific extraction lives
//! behind the [ReleaseListing] trait, so the resolver never touches a
//! selector or a regex.

use crate::error::{GoBumpError, Result};
use regex::Regex;
use scraper::{Html, Selector};

/// Substrings that disqualify a candidate in stable-only mode. Guards the
/// stable pattern against accidentally matching decorated text.
const PRERELEASE_MARKERS: [&str; 4] = ["beta", "rc", "alpha", "dev"];

/// Source of release candidates for one major.minor line.
pub trait ReleaseListing {
    /// Candidate version strings for `line`, in document order.
    ///
    /// With `allow_prerelease`, candidates may carry a `betaN`/`rcN` suffix
    /// as well as a `.N` patch; otherwise only `.N` patches qualify.
    fn candidates(&self, line: &str, allow_prerelease: bool) -> Result<Vec<String>>;
}

/// Extraction from the fetched versions page.
///
/// Primary pass scans anchor hrefs for `/std@go<version>` targets. If the
/// page markup carries no matching links, a fallback pass scans raw text
/// nodes for equivalent `go<version>` tokens.
pub struct HtmlListing {
    document: Html,
}

impl HtmlListing {
    pub fn parse(html: &str) -> Self {
        HtmlListing {
            document: Html::parse_document(html),
        }
    }

    fn anchor_candidates(&self, pattern: &Regex) -> Result<Vec<String>> {
        let anchors = Selector::parse("a")
            .map_err(|e| GoBumpError::parse(format!("anchor selector: {:?}", e)))?;

        let mut found = Vec::new();
        for element in self.document.select(&anchors) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if let Some(caps) = pattern.captures(href) {
                found.push(caps[1].to_string());
            }
        }
        Ok(found)
    }

    fn text_candidates(&self, pattern: &Regex) -> Vec<String> {
        let mut found = Vec::new();
        for text in self.document.root_element().text() {
            if let Some(caps) = pattern.captures(text.trim()) {
                found.push(caps[1].to_string());
            }
        }
        found
    }
}

impl ReleaseListing for HtmlListing {
    fn candidates(&self, line: &str, allow_prerelease: bool) -> Result<Vec<String>> {
        // Patterns are anchored at string end. A bare `/std@go1.25` href is
        // the line's landing anchor, not a concrete release, so a suffix
        // (prerelease tag or patch number) is always required.
        let escaped = regex::escape(line);
        let version = if allow_prerelease {
            format!(r"({}(?:(?:beta|rc)\d+|\.\d+))", escaped)
        } else {
            format!(r"({}\.\d+)", escaped)
        };

        let href_pattern = compile(&format!(r"/std@go{}$", version))?;
        let mut found = self.anchor_candidates(&href_pattern)?;

        if found.is_empty() {
            let text_pattern = compile(&format!(r"go{}$", version))?;
            found = self.text_candidates(&text_pattern);
        }

        if !allow_prerelease {
            found.retain(|candidate| {
                !PRERELEASE_MARKERS
                    .iter()
                    .any(|marker| candidate.contains(marker))
            });
        }

        Ok(found)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| GoBumpError::parse(format!("bad listing pattern '{}': {}", pattern, e)))
}
