//! Inbound request evaluation.
//!
//! Evaluation runs a fixed sequence of stages. Each stage either lets the
//! request continue or ends it with a [`RewriteDecision`]:
//!
//! 1. Ignore pattern
//! 2. Do-not-rewrite pattern
//! 3. Redirect suppression (site-URLs-only, do-not-redirect HTTPS, do-not-redirect)
//! 4. No-friendly-URL pattern
//! 5. Page resolution (unfriendly `TabId` URLs, friendly paths, missing pages)
//! 6. Case and extension checks
//! 7. Rewrite to the internal page handler

use std::ops::ControlFlow;

use tracing::debug;
use url::Url;

use crate::domain::entities::{
    DeletedPageHandling, PageRecord, PatternField, PortalAlias, ReasonCode, RewriteAction,
    RewriteDecision, TenantContext,
};
use crate::domain::errors::RewriteError;
use crate::domain::repositories::PageRepository;
use crate::engine::patterns::CompiledRules;
use crate::engine::url_builder::{DEFAULT_PAGE_NAME, UrlBuilder};
use crate::utils::uri::{authority, origin, parse_request_uri, path_and_query, with_path};

/// Extensions that make a URL count as having an extension.
const PAGE_EXTENSIONS: [&str; 3] = ["aspx", "html", "htm"];

type Stage<T = ()> = ControlFlow<RewriteDecision, T>;

/// Evaluates request URIs for one tenant.
///
/// The engine holds no mutable state; evaluating the same URI twice yields
/// identical decisions.
pub struct RewriteEngine<'a> {
    rules: &'a CompiledRules,
    context: &'a TenantContext,
    pages: &'a dyn PageRepository,
}

/// The page a request resolved to, plus what was peeled off the path.
struct Target {
    page: PageRecord,
    locale: Option<String>,
    params: Vec<(String, String)>,
    query: Option<String>,
}

/// Per-request working state.
struct Evaluation<'u> {
    raw: &'u str,
    url: Url,
    alias: Option<PortalAlias>,
    trace: Vec<String>,
}

impl Evaluation<'_> {
    fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(uri = self.raw, "{}", message);
        self.trace.push(message);
    }

    fn finish(
        &mut self,
        action: RewriteAction,
        rewritten_path: Option<String>,
        final_url: String,
        target: Option<&Target>,
        reason: ReasonCode,
    ) -> RewriteDecision {
        RewriteDecision::new(
            action,
            rewritten_path,
            final_url,
            target.and_then(|t| t.locale.clone()),
            target.map(|t| t.page.clone()),
            reason,
            std::mem::take(&mut self.trace),
        )
    }

    fn pass_through(&mut self, reason: ReasonCode) -> RewriteDecision {
        let final_url = self.url.to_string();
        self.finish(RewriteAction::PassThrough, None, final_url, None, reason)
    }
}

impl<'a> RewriteEngine<'a> {
    pub fn new(
        rules: &'a CompiledRules,
        context: &'a TenantContext,
        pages: &'a dyn PageRepository,
    ) -> Self {
        Self {
            rules,
            context,
            pages,
        }
    }

    /// Evaluates one absolute request URI.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::MalformedInput`] when `uri` is not an absolute
    /// `http`/`https` URI.
    pub fn evaluate(&self, uri: &str) -> Result<RewriteDecision, RewriteError> {
        let url = parse_request_uri(uri).map_err(|e| RewriteError::malformed(uri, e.to_string()))?;

        let host_and_path = format!("{}{}", authority(&url), url.path());
        let alias = self.context.aliases.matching(&host_and_path).cloned();

        let mut eval = Evaluation {
            raw: uri,
            url,
            alias,
            trace: Vec::new(),
        };
        eval.note(format!(
            "Evaluating '{}' for tenant {} ({})",
            uri, self.context.tenant.id, self.context.tenant.name
        ));
        let alias_note = match &eval.alias {
            Some(alias) => format!("Matched site alias '{}'", alias.http_alias),
            None => format!("No site alias matches '{host_and_path}'"),
        };
        eval.note(alias_note);

        match self.run(&mut eval) {
            ControlFlow::Break(decision) | ControlFlow::Continue(decision) => Ok(decision),
        }
    }

    fn run(&self, eval: &mut Evaluation) -> Stage<RewriteDecision> {
        self.check_ignore(eval)?;
        self.check_do_not_rewrite(eval)?;
        let no_redirect = self.redirects_suppressed(eval);
        self.check_system_url(eval)?;
        let target = self.resolve(eval, no_redirect)?;
        let invalid_extension = self.check_case_and_extension(eval, &target, no_redirect)?;
        ControlFlow::Continue(self.rewrite(eval, &target, invalid_extension))
    }

    fn check_ignore(&self, eval: &mut Evaluation) -> Stage {
        if self.rules.is_match(PatternField::IgnoreRegex, eval.raw) {
            eval.note("Ignore pattern matched; request passed through unchanged");
            return ControlFlow::Break(eval.pass_through(ReasonCode::Ignored));
        }
        ControlFlow::Continue(())
    }

    fn check_do_not_rewrite(&self, eval: &mut Evaluation) -> Stage {
        if self.rules.is_match(PatternField::DoNotRewriteRegex, eval.raw) {
            eval.note("Do-not-rewrite pattern matched; request excluded from rewriting");
            return ControlFlow::Break(eval.pass_through(ReasonCode::ExplicitExclusion));
        }
        ControlFlow::Continue(())
    }

    /// Any of the three redirect exclusions suppresses every later redirect.
    fn redirects_suppressed(&self, eval: &mut Evaluation) -> bool {
        let mut suppressed = false;

        if eval.alias.is_none() && self.rules.is_match(PatternField::UseSiteUrlsRegex, eval.raw)
        {
            eval.note("Host is not a site alias and the site-URLs-only pattern matched; redirects suppressed");
            suppressed = true;
        }

        if eval.url.scheme() == "https"
            && self
                .rules
                .is_match(PatternField::DoNotRedirectSecureRegex, eval.raw)
        {
            eval.note("Do-not-redirect HTTPS pattern matched a secure request; redirects suppressed");
            suppressed = true;
        }

        if self.rules.is_match(PatternField::DoNotRedirectRegex, eval.raw) {
            eval.note("Do-not-redirect pattern matched; redirects suppressed");
            suppressed = true;
        }

        suppressed
    }

    fn check_system_url(&self, eval: &mut Evaluation) -> Stage {
        if self.rules.is_match(PatternField::NoFriendlyUrlRegex, eval.raw) {
            let internal = path_and_query(&eval.url);
            eval.note(format!(
                "No-friendly-URL pattern matched; '{internal}' handled as a system URL"
            ));
            let final_url = eval.url.to_string();
            return ControlFlow::Break(eval.finish(
                RewriteAction::Rewrite,
                Some(internal),
                final_url,
                None,
                ReasonCode::SystemUrl,
            ));
        }
        ControlFlow::Continue(())
    }

    fn resolve(&self, eval: &mut Evaluation, no_redirect: bool) -> Stage<Target> {
        let tenant = &self.context.tenant;
        let mut segments: Vec<String> = eval
            .url
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if let Some(child) = eval.alias.as_ref().and_then(PortalAlias::child_path) {
            let depth = child.split('/').count();
            segments.drain(..depth.min(segments.len()));
        }

        let mut locale = None;
        if let Some(found) = segments.first().and_then(|s| tenant.find_locale(s)) {
            let found = found.to_string();
            eval.note(format!("Locale segment '{found}' identified"));
            segments.remove(0);
            locale = Some(found);
        }

        let is_default_document = segments.len() == 1
            && segments[0].eq_ignore_ascii_case(DEFAULT_PAGE_NAME);
        if is_default_document {
            if let Some(page_id) = tab_id(&eval.url) {
                return self.resolve_unfriendly(eval, page_id, locale, no_redirect);
            }
            segments.clear();
        }

        let query = eval.url.query().map(str::to_string);

        if segments.is_empty() {
            let Some(home_id) = tenant.home_page_id else {
                eval.note("Tenant has no home page");
                return ControlFlow::Break(self.missing_page(eval, no_redirect));
            };
            let page = self.pages.resolve_page(home_id, tenant.id);
            let page = self.require_live(eval, page, no_redirect)?;
            eval.note(format!("Site root resolved to home page {}", page.id));
            return ControlFlow::Continue(Target {
                page,
                locale,
                params: Vec::new(),
                query,
            });
        }

        let Some((page, consumed)) = self.lookup_longest_prefix(&segments) else {
            eval.note(format!("No page found for '/{}'", segments.join("/")));
            return ControlFlow::Break(self.missing_page(eval, no_redirect));
        };
        let page = self.require_live(eval, Some(page), no_redirect)?;
        eval.note(format!(
            "Resolved '/{}' to page {} '{}'",
            segments[..consumed].join("/"),
            page.id,
            page.name
        ));

        let mut params = Vec::new();
        let mut rest = segments[consumed..].chunks_exact(2);
        for pair in &mut rest {
            eval.note(format!("Path parameter {}={}", pair[0], pair[1]));
            params.push((pair[0].clone(), pair[1].clone()));
        }
        if let [dangling] = rest.remainder() {
            eval.note(format!("Dropped unpaired path segment '{dangling}'"));
        }

        ControlFlow::Continue(Target {
            page,
            locale,
            params,
            query,
        })
    }

    fn resolve_unfriendly(
        &self,
        eval: &mut Evaluation,
        page_id: i64,
        locale: Option<String>,
        no_redirect: bool,
    ) -> Stage<Target> {
        let tenant = &self.context.tenant;
        eval.note(format!("Unfriendly URL requests page {page_id}"));

        let page = self.pages.resolve_page(page_id, tenant.id);
        let page = self.require_live(eval, page, no_redirect)?;

        let remaining = eval
            .url
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty() && !is_tab_id_pair(pair))
            .collect::<Vec<_>>()
            .join("&");

        let target = Target {
            page,
            locale,
            params: Vec::new(),
            query: (!remaining.is_empty()).then_some(remaining),
        };

        if !self.rules.general().redirect_unfriendly {
            eval.note("Redirecting unfriendly URLs is disabled");
            return ControlFlow::Continue(target);
        }
        if no_redirect {
            eval.note("Unfriendly URL kept because redirects are suppressed");
            return ControlFlow::Continue(target);
        }

        let Some(alias) = eval.alias.clone().or_else(|| self.context.aliases.primary().cloned())
        else {
            eval.note("No alias available to build the friendly URL");
            return ControlFlow::Continue(target);
        };

        let friendly = UrlBuilder::new(self.rules, tenant.scheme()).build_for_page(
            &target.page,
            target.query.as_deref().unwrap_or_default(),
            "",
            &alias,
        );
        eval.note(format!("Redirecting unfriendly URL to '{friendly}'"));
        ControlFlow::Break(eval.finish(
            RewriteAction::Redirect,
            None,
            friendly,
            Some(&target),
            ReasonCode::UnfriendlyUrl,
        ))
    }

    /// Finds the page matching the longest leading run of `segments`.
    fn lookup_longest_prefix(&self, segments: &[String]) -> Option<(PageRecord, usize)> {
        let tenant_id = self.context.tenant.id;
        (1..=segments.len()).rev().find_map(|count| {
            let mut candidate = format!("/{}", segments[..count].join("/"));
            if count == segments.len() {
                strip_page_extension(&mut candidate);
            }
            self.pages
                .resolve_path(&candidate, tenant_id)
                .map(|page| (page, count))
        })
    }

    fn require_live(
        &self,
        eval: &mut Evaluation,
        page: Option<PageRecord>,
        no_redirect: bool,
    ) -> Stage<PageRecord> {
        match page {
            Some(page) if !page.deleted => ControlFlow::Continue(page),
            Some(page) => {
                eval.note(format!("Page {} '{}' is deleted", page.id, page.name));
                ControlFlow::Break(self.missing_page(eval, no_redirect))
            }
            None => {
                eval.note("Requested page does not exist");
                ControlFlow::Break(self.missing_page(eval, no_redirect))
            }
        }
    }

    fn missing_page(&self, eval: &mut Evaluation, no_redirect: bool) -> RewriteDecision {
        match self.rules.general().deleted_page_handling {
            DeletedPageHandling::RedirectToHome if !no_redirect => {
                let home = self.home_url(eval);
                eval.note(format!("Redirecting to home page '{home}'"));
                eval.finish(
                    RewriteAction::Redirect,
                    None,
                    home,
                    None,
                    ReasonCode::DeletedPageRedirect,
                )
            }
            DeletedPageHandling::RedirectToHome => {
                eval.note("Home page redirect suppressed; answering 404");
                eval.pass_through(ReasonCode::NotFound)
            }
            DeletedPageHandling::Return404 => {
                eval.note("Answering 404");
                eval.pass_through(ReasonCode::NotFound)
            }
        }
    }

    fn home_url(&self, eval: &Evaluation) -> String {
        match eval.alias.as_ref().or_else(|| self.context.aliases.primary()) {
            Some(alias) => format!(
                "{}://{}/",
                self.context.tenant.scheme(),
                alias.http_alias.trim_end_matches('/')
            ),
            None => format!("{}/", origin(&eval.url)),
        }
    }

    /// Returns whether the URL failed the extensionless check.
    fn check_case_and_extension(
        &self,
        eval: &mut Evaluation,
        target: &Target,
        no_redirect: bool,
    ) -> Stage<bool> {
        let general = self.rules.general();
        let path = eval.url.path().to_string();

        if general.force_lower_case && has_upper_case(&path) {
            if self.rules.is_match(PatternField::ForceLowerCaseRegex, eval.raw) {
                eval.note("Upper case path allowed by the prevent-lower-case pattern");
            } else if !general.redirect_wrong_case {
                eval.note("Upper case path found; wrong-case redirects are disabled");
            } else if no_redirect {
                eval.note("Upper case path found; redirects are suppressed");
            } else {
                let lowered = with_path(&eval.url, &lower_case_path(&path));
                eval.note(format!("Upper case path redirected to '{lowered}'"));
                return ControlFlow::Break(eval.finish(
                    RewriteAction::Redirect,
                    None,
                    lowered,
                    Some(target),
                    ReasonCode::WrongCase,
                ));
            }
        }

        let mut invalid = false;
        let field = PatternField::ValidExtensionlessUrlsRegex;
        if self.rules.is_enabled(field) {
            let last = path.rsplit('/').next().unwrap_or_default();
            if path != "/" && !has_page_extension(last) && !self.rules.is_match(field, eval.raw) {
                eval.note("Extensionless URL does not match the valid extensionless pattern");
                invalid = true;
            }
        }

        ControlFlow::Continue(invalid)
    }

    fn rewrite(&self, eval: &mut Evaluation, target: &Target, invalid_extension: bool) -> RewriteDecision {
        let general = self.rules.general();
        let tenant = &self.context.tenant;

        let locale = target
            .locale
            .clone()
            .or_else(|| {
                general
                    .force_portal_default_language
                    .then(|| tenant.default_locale.clone())
                    .flatten()
            })
            .or_else(|| target.page.locale.clone());

        let mut internal = format!("/{}?TabId={}", DEFAULT_PAGE_NAME, target.page.id);
        if let Some(locale) = &locale {
            internal.push_str("&language=");
            internal.push_str(locale);
        }
        for (key, value) in &target.params {
            internal.push('&');
            internal.push_str(key);
            internal.push('=');
            internal.push_str(value);
        }
        if let Some(query) = target.query.as_deref().filter(|q| !q.is_empty()) {
            internal.push('&');
            internal.push_str(query);
        }

        eval.note(format!("Rewritten to '{internal}'"));

        let reason = if invalid_extension {
            ReasonCode::InvalidExtensionless
        } else {
            ReasonCode::Rewritten
        };
        let final_url = eval.url.to_string();

        RewriteDecision::new(
            RewriteAction::Rewrite,
            Some(internal),
            final_url,
            locale,
            Some(target.page.clone()),
            reason,
            std::mem::take(&mut eval.trace),
        )
    }
}

fn is_tab_id_pair(pair: &str) -> bool {
    pair.split_once('=')
        .is_some_and(|(key, _)| key.eq_ignore_ascii_case("tabid"))
}

fn tab_id(url: &Url) -> Option<i64> {
    url.query_pairs()
        .find(|(key, _)| key.eq_ignore_ascii_case("tabid"))
        .and_then(|(_, value)| value.parse().ok())
}

fn has_page_extension(segment: &str) -> bool {
    segment
        .rsplit_once('.')
        .is_some_and(|(_, ext)| PAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn strip_page_extension(candidate: &mut String) {
    if let Some((stem, ext)) = candidate.rsplit_once('.')
        && !stem.ends_with('/')
        && PAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
    {
        candidate.truncate(stem.len());
    }
}

/// Upper case letters outside percent escapes.
fn has_upper_case(path: &str) -> bool {
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            chars.next();
            chars.next();
        } else if c.is_uppercase() {
            return true;
        }
    }
    false
}

/// Lower-cases `path`, leaving percent escapes untouched.
fn lower_case_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            out.push(c);
            out.extend(chars.next());
            out.extend(chars.next());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
