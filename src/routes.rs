//! Route table and navigation guard decisions.
//!
//! DESIGN
//! ======
//! The table is static data and the guard is a pure function of the target
//! route and a [`SessionSnapshot`], so every branch is testable without a
//! router. `util::auth::install_route_guard` applies the outcome inside the
//! Leptos router.
//!
//! A navigation first goes through [`resolve`], which applies the static
//! redirects (`/` and unmatched paths), then through [`decide`].

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::state::session::SessionSnapshot;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";
pub const REDIRECT_QUERY_KEY: &str = "redirect";

/// Route names that only make sense while signed out.
pub const AUTH_PAGE_NAMES: &[&str] = &["Login", "Register"];

/// One entry of the static route table.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
    pub children: &'static [RouteRecord],
}

impl RouteRecord {
    const fn page(path: &'static str, name: &'static str, requires_auth: bool) -> Self {
        Self { path, name, requires_auth, children: &[] }
    }
}

pub static ROUTES: &[RouteRecord] = &[
    RouteRecord::page("/login", "Login", false),
    RouteRecord::page("/register", "Register", false),
    RouteRecord::page("/find-password", "FindPassword", false),
    RouteRecord::page("/change-password", "ChangePassword", true),
    RouteRecord::page("/update-info", "UpdateInfo", true),
    RouteRecord::page("/update-profile", "UpdateProfile", true),
    RouteRecord::page("/dashboard", "Dashboard", true),
    RouteRecord::page("/course-list", "CourseList", true),
];

/// A matched navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTarget {
    pub name: &'static str,
    /// Full path including any query string, kept for post-login redirects.
    pub full_path: String,
    /// `true` if this route or any ancestor requires auth.
    pub requires_auth: bool,
}

impl RouteTarget {
    pub fn is_auth_page(&self) -> bool {
        AUTH_PAGE_NAMES.contains(&self.name)
    }
}

/// Outcome of resolving a path against the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteTarget),
    /// A static redirect that applies before any guard runs.
    Redirect(String),
}

/// Match `full_path` (path plus optional `?query`) against [`ROUTES`].
///
/// `/` redirects to the dashboard; anything unmatched redirects to login.
pub fn resolve(full_path: &str) -> Resolution {
    let path = full_path.split(['?', '#']).next().unwrap_or_default();
    let normalized = normalize(path);
    if normalized == "/" {
        return Resolution::Redirect(HOME_PATH.to_owned());
    }
    match find(ROUTES, "", &normalized, false) {
        Some((record, requires_auth)) => Resolution::Matched(RouteTarget {
            name: record.name,
            full_path: full_path.to_owned(),
            requires_auth,
        }),
        None => Resolution::Redirect(LOGIN_PATH.to_owned()),
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

fn find(
    records: &'static [RouteRecord],
    prefix: &str,
    path: &str,
    inherited_auth: bool,
) -> Option<(&'static RouteRecord, bool)> {
    for record in records {
        let full = join_paths(prefix, record.path);
        let requires_auth = inherited_auth || record.requires_auth;
        if full == path {
            return Some((record, requires_auth));
        }
        if let Some(hit) = find(record.children, &full, path, requires_auth) {
            return Some(hit);
        }
    }
    None
}

fn join_paths(prefix: &str, segment: &str) -> String {
    if segment.starts_with('/') || prefix.is_empty() {
        normalize(segment)
    } else {
        normalize(&format!("{}/{segment}", prefix.trim_end_matches('/')))
    }
}

// =============================================================================
// GUARD
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardOutcome {
    pub verdict: Verdict,
    /// The session's soft-logout flag should be cleared before proceeding.
    pub clear_soft_logout: bool,
}

/// Decide a single navigation.
///
/// 1. Leaving for a non-auth page re-arms a soft logout.
/// 2. Protected route while signed out: go to login, remembering the target.
/// 3. Auth page while signed in: allowed only during a soft logout,
///    otherwise sent to the dashboard.
/// 4. Everything else proceeds.
pub fn decide(target: &RouteTarget, session: &SessionSnapshot) -> GuardOutcome {
    let clear_soft_logout = session.soft_logged_out && !target.is_auth_page();
    let soft_logged_out = session.soft_logged_out && !clear_soft_logout;

    let verdict = if target.requires_auth && !session.is_logged_in {
        Verdict::Redirect(login_redirect(&target.full_path))
    } else if target.is_auth_page() && session.is_logged_in && !soft_logged_out {
        Verdict::Redirect(HOME_PATH.to_owned())
    } else {
        Verdict::Allow
    };
    GuardOutcome { verdict, clear_soft_logout }
}

/// `/login?redirect=<encoded original path>`.
pub fn login_redirect(original: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(REDIRECT_QUERY_KEY, original)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Where to go after a successful login.
///
/// Only same-origin absolute paths are honoured; anything else (missing,
/// protocol-relative, or an auth page) lands on the dashboard.
pub fn post_login_target(redirect: Option<&str>) -> String {
    let Some(candidate) = redirect.map(str::trim) else {
        return HOME_PATH.to_owned();
    };
    if !candidate.starts_with('/') || candidate.starts_with("//") || candidate.contains('\\') {
        return HOME_PATH.to_owned();
    }
    match resolve(candidate) {
        Resolution::Matched(target) if !target.is_auth_page() => candidate.to_owned(),
        _ => HOME_PATH.to_owned(),
    }
}

/// Rebuild a full path from a router pathname and its search string.
///
/// `search` may arrive with or without the leading `?`.
pub fn join_search(path: &str, search: &str) -> String {
    let query = search.strip_prefix('?').unwrap_or(search);
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{query}")
    }
}
