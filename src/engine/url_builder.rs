//! Friendly URL generation.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::debug;

use crate::domain::entities::{
    AliasSet, PageRecord, PageReference, PatternField, PortalAlias,
};
use crate::domain::errors::RewriteError;
use crate::domain::repositories::PageRepository;
use crate::engine::patterns::CompiledRules;
use crate::utils::transliterate::to_ascii;

/// Document name of the host's page handler. Never emitted in friendly URLs.
pub const DEFAULT_PAGE_NAME: &str = "Default.aspx";

/// Characters escaped inside a generated path segment. `%` is left alone so
/// already encoded input passes through unchanged.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// Builds friendly URLs for pages under one tenant's compiled rules.
///
/// The builder is pure: the same page, query and rules always produce the
/// same URL.
///
/// # Examples
///
/// ```ignore
/// let builder = UrlBuilder::new(&rules, "http");
/// let url = builder.build_for_page(&page, "", "", &PortalAlias::new("site.com"));
/// assert_eq!(url, "http://site.com/about-us");
/// ```
pub struct UrlBuilder<'a> {
    rules: &'a CompiledRules,
    scheme: &'a str,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(rules: &'a CompiledRules, scheme: &'a str) -> Self {
        Self { rules, scheme }
    }

    /// Resolves `page` and builds its friendly URL under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::PageNotFound`] when the page lookup fails.
    pub fn build(
        &self,
        pages: &dyn PageRepository,
        page: PageReference,
        query_string: &str,
        custom_page_name: &str,
        alias: &PortalAlias,
    ) -> Result<String, RewriteError> {
        let record = resolve(pages, page)?;
        Ok(self.build_for_page(&record, query_string, custom_page_name, alias))
    }

    /// Builds one URL per alias, in alias order.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::PageNotFound`] when the page lookup fails.
    pub fn build_all(
        &self,
        pages: &dyn PageRepository,
        page: PageReference,
        query_string: &str,
        custom_page_name: &str,
        aliases: &AliasSet,
    ) -> Result<Vec<String>, RewriteError> {
        let record = resolve(pages, page)?;
        Ok(aliases
            .iter()
            .map(|alias| self.build_for_page(&record, query_string, custom_page_name, alias))
            .collect())
    }

    /// Builds the friendly URL of an already resolved page.
    pub fn build_for_page(
        &self,
        page: &PageRecord,
        query_string: &str,
        custom_page_name: &str,
        alias: &PortalAlias,
    ) -> String {
        let mut path = String::new();

        for segment in page.segments() {
            let mut normalized = self.normalize_segment(segment);
            if normalized.is_empty() {
                normalized = self.fallback_segment(segment);
                debug!(
                    page_id = page.id,
                    segment,
                    fallback = %normalized,
                    "Page segment normalized to nothing, using encoded name"
                );
            }
            push_segment(&mut path, &normalized);
        }

        let (path_params, query) = self.split_query(query_string);
        for (key, value) in path_params {
            push_segment(&mut path, key);
            push_segment(&mut path, value);
        }

        let page_name = custom_page_name.trim();
        if !page_name.is_empty() && !page_name.eq_ignore_ascii_case(DEFAULT_PAGE_NAME) {
            push_segment(&mut path, &self.normalize_segment(page_name));
        }

        if path.is_empty() {
            path.push('/');
        }

        let mut url = format!(
            "{}://{}{}",
            self.scheme,
            alias.http_alias.trim_end_matches('/'),
            path
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    /// Applies the segment rules in order: space replacement, lower-casing,
    /// ASCII folding, then removal of characters matched by the valid
    /// friendly URL pattern.
    pub fn normalize_segment(&self, segment: &str) -> String {
        let general = self.rules.general();

        let mut text = segment
            .trim()
            .replace(' ', general.replace_space_with.as_str());
        if general.force_lower_case {
            text = text.to_lowercase();
        }
        if general.auto_ascii_convert {
            // Romanized CJK comes back as space-separated syllables.
            text = to_ascii(&text)
                .trim()
                .replace(' ', general.replace_space_with.as_str());
        }
        if self.rules.is_enabled(PatternField::RegexMatch) {
            text = self
                .rules
                .remove_matches(PatternField::RegexMatch, &text)
                .into_owned();
        }

        utf8_percent_encode(&text, SEGMENT).to_string()
    }

    /// Encoded form of a page segment whose normalized form is empty. Never
    /// empty, so a child page cannot collapse onto its parent's URL.
    fn fallback_segment(&self, segment: &str) -> String {
        let general = self.rules.general();
        let text = segment
            .trim()
            .replace(' ', general.replace_space_with.as_str());
        let text = if text.is_empty() { segment } else { &text };

        utf8_percent_encode(text, SEGMENT).to_string()
    }

    /// Splits a query string into pairs moved into the path and the query
    /// that stays.
    ///
    /// Without a keep-in-query pattern the query is kept verbatim. With one,
    /// every well-formed `key=value` pair it does not match moves into the path.
    fn split_query<'q>(&self, query_string: &'q str) -> (Vec<(&'q str, &'q str)>, String) {
        let query = query_string.trim().trim_start_matches(['?', '&']);

        let keep = PatternField::DoNotIncludeInPathRegex;
        if !self.rules.is_enabled(keep) {
            return (Vec::new(), query.to_string());
        }

        let mut path_params = Vec::new();
        let mut kept = Vec::new();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            match pair.split_once('=') {
                Some((key, value))
                    if !self.rules.is_match(keep, pair)
                        && !key.is_empty()
                        && !value.is_empty()
                        && !pair.contains('/') =>
                {
                    path_params.push((key, value));
                }
                _ => kept.push(pair),
            }
        }

        (path_params, kept.join("&"))
    }
}

fn resolve(pages: &dyn PageRepository, page: PageReference) -> Result<PageRecord, RewriteError> {
    pages
        .resolve_page(page.page_id, page.tenant_id)
        .ok_or(RewriteError::PageNotFound {
            page_id: page.page_id,
            tenant_id: page.tenant_id,
        })
}

fn push_segment(path: &mut String, segment: &str) {
    if !segment.is_empty() {
        path.push('/');
        path.push_str(segment);
    }
}
