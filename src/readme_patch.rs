//! Replacing the interior of a comment-delimited region of a document.
//!
//! A region for key `KEY` looks like this:
//!
//! ```text
//! <!-- KEY START -->
//! ...interior...
//! <!-- KEY END -->
//! ```
//!
//! Whitespace is allowed around `KEY START` and `KEY END` inside the comments. The begin marker
//! must be followed by at least one line break; anything else on the begin marker's line and the
//! line breaks that follow it are kept. Everything from there up to the first end marker is the
//! interior.

use regex::Regex;
use std::borrow::Cow;

/// The section key used when none is configured
pub const DEFAULT_SECTION_KEY: &str = "GITHUB STATS";

// -------------------------------------------------------------------------------------------------
// MarkerRegion
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct MarkerRegion {
    key: String,
    pattern: Regex,
}

impl MarkerRegion {
    /// Build the matcher for regions delimited by `key`.
    ///
    /// The key is matched literally; regex metacharacters in it have no special meaning.
    pub fn new(key: &str) -> Result<Self, regex::Error> {
        let key_pattern = regex::escape(key);
        let pattern = Regex::new(&format!(
            r"(<!-- \s*?{key_pattern} START\s*? -->.*?[\r\n]+)[\s\S]*?(<!-- \s*?{key_pattern} END\s*? -->)"
        ))?;
        Ok(MarkerRegion {
            key: key.to_string(),
            pattern,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Does `document` contain at least one complete region?
    pub fn is_present(&self, document: &str) -> bool {
        self.pattern.is_match(document)
    }

    /// Replace the interior of every region in `document` with `content`.
    ///
    /// The marker lines are kept verbatim and everything outside the regions is untouched. A
    /// document without a complete region is returned as is.
    pub fn patch<'t>(&self, document: &'t str, content: &str) -> Cow<'t, str> {
        self.pattern.replace_all(document, |caps: &regex::Captures| {
            format!("{}{}{}", &caps[1], content, &caps[2])
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn stats() -> MarkerRegion {
        MarkerRegion::new(DEFAULT_SECTION_KEY).unwrap()
    }

    #[test]
    fn replaces_interior_only() {
        let doc = "A\n<!-- GITHUB STATS START -->\nold\n<!-- GITHUB STATS END -->\nB";
        assert_eq!(
            stats().patch(doc, "new"),
            "A\n<!-- GITHUB STATS START -->\nnew<!-- GITHUB STATS END -->\nB"
        );
    }

    #[test]
    fn multiline_interior() {
        let doc = "# Me\n<!-- GITHUB STATS START -->\none\ntwo\n\nthree\n<!-- GITHUB STATS END -->\n";
        assert_eq!(
            stats().patch(doc, "x\n"),
            "# Me\n<!-- GITHUB STATS START -->\nx\n<!-- GITHUB STATS END -->\n"
        );
    }

    #[test]
    fn empty_interior() {
        let doc = "<!-- GITHUB STATS START -->\n<!-- GITHUB STATS END -->";
        assert_eq!(
            stats().patch(doc, "filled\n"),
            "<!-- GITHUB STATS START -->\nfilled\n<!-- GITHUB STATS END -->"
        );
    }

    #[test]
    fn marker_whitespace_is_preserved() {
        let doc = "<!--    GITHUB STATS START   -->  \r\n\r\nold<!-- \tGITHUB STATS END  -->";
        assert_eq!(
            stats().patch(doc, "new"),
            "<!--    GITHUB STATS START   -->  \r\n\r\nnew<!-- \tGITHUB STATS END  -->"
        );
    }

    #[test]
    fn no_markers_is_a_noop() {
        let doc = "# Hello\n\nNothing to see here.\n";
        let patched = stats().patch(doc, "new");
        assert!(matches!(patched, Cow::Borrowed(_)));
        assert_eq!(patched, doc);
        assert!(!stats().is_present(doc));
    }

    #[test]
    fn unterminated_region_is_a_noop() {
        let doc = "<!-- GITHUB STATS START -->\nold\n";
        assert_eq!(stats().patch(doc, "new"), doc);
    }

    #[test]
    fn begin_marker_needs_line_break() {
        let doc = "<!-- GITHUB STATS START -->old<!-- GITHUB STATS END -->";
        assert_eq!(stats().patch(doc, "new"), doc);
    }

    #[test]
    fn other_keys_are_ignored() {
        let doc = "<!-- OTHER START -->\nold\n<!-- OTHER END -->";
        assert_eq!(stats().patch(doc, "new"), doc);
    }

    #[test]
    fn every_region_is_replaced() {
        let doc = "<!-- GITHUB STATS START -->\na\n<!-- GITHUB STATS END -->\nmid\n<!-- GITHUB STATS START -->\nb\n<!-- GITHUB STATS END -->";
        assert_eq!(
            stats().patch(doc, "n\n"),
            "<!-- GITHUB STATS START -->\nn\n<!-- GITHUB STATS END -->\nmid\n<!-- GITHUB STATS START -->\nn\n<!-- GITHUB STATS END -->"
        );
    }

    #[test]
    fn content_is_inserted_literally() {
        let doc = "<!-- GITHUB STATS START -->\nold\n<!-- GITHUB STATS END -->";
        assert_eq!(
            stats().patch(doc, "costs $1 and ${2}"),
            "<!-- GITHUB STATS START -->\ncosts $1 and ${2}<!-- GITHUB STATS END -->"
        );
    }

    #[test]
    fn key_is_matched_literally() {
        let region = MarkerRegion::new("C++ (STATS)").unwrap();
        let doc = "<!-- C++ (STATS) START -->\nold\n<!-- C++ (STATS) END -->";
        assert_eq!(region.patch(doc, "new"), "<!-- C++ (STATS) START -->\nnew<!-- C++ (STATS) END -->");
        assert_eq!(region.patch("<!-- CCC STATS START -->\nx\n<!-- CCC STATS END -->", "new"),
                   "<!-- CCC STATS START -->\nx\n<!-- CCC STATS END -->");
    }

    proptest! {
        #[test]
        fn patching_twice_is_patching_once(
            prefix in "[a-z \n]{0,20}",
            old in "[a-z \n]{0,20}",
            new in "[a-z#][a-z#<>/ \n]{0,40}",
            suffix in "[a-z \n]{0,20}",
        ) {
            let doc = format!("{prefix}<!-- GITHUB STATS START -->\n{old}<!-- GITHUB STATS END -->{suffix}");
            let once = stats().patch(&doc, &new).into_owned();
            let twice = stats().patch(&once, &new).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn documents_without_markers_are_untouched(doc in "[a-zA-Z<>!\\- \n]{0,80}", new in ".{0,20}") {
            prop_assume!(!doc.contains("GITHUB STATS"));
            prop_assert_eq!(stats().patch(&doc, &new), doc.as_str());
        }
    }
}
