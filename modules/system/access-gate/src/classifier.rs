use std::borrow::Cow;
use std::fmt;

/// Access requirement of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectionLevel {
    /// Anyone, including anonymous callers.
    Public,
    /// Any signed-in caller regardless of role.
    Authenticated,
    /// Vendors and admins.
    VendorOrAdmin,
    /// Admins only.
    Admin,
}

impl fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Authenticated => "authenticated",
            Self::VendorOrAdmin => "vendor_or_admin",
            Self::Admin => "admin",
        })
    }
}

/// One entry of the route table: any of `prefixes` maps to `level`.
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub prefixes: &'static [&'static str],
    pub level: ProtectionLevel,
}

/// Marketplace route table. Order matters: the first matching rule wins.
pub const MARKETPLACE_ROUTES: &[RouteRule] = &[
    RouteRule {
        prefixes: &["/admin", "/api/admin"],
        level: ProtectionLevel::Admin,
    },
    RouteRule {
        prefixes: &["/vendor", "/api/vendor"],
        level: ProtectionLevel::VendorOrAdmin,
    },
    RouteRule {
        prefixes: &["/dashboard"],
        level: ProtectionLevel::Authenticated,
    },
];

/// Ordered, immutable path-prefix to protection-level table.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    rules: &'static [RouteRule],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::marketplace()
    }
}

impl RouteTable {
    #[must_use]
    pub const fn new(rules: &'static [RouteRule]) -> Self {
        Self { rules }
    }

    /// The marketplace's fixed table (admin, vendor, dashboard).
    #[must_use]
    pub const fn marketplace() -> Self {
        Self::new(MARKETPLACE_ROUTES)
    }

    #[must_use]
    pub fn rules(&self) -> &'static [RouteRule] {
        self.rules
    }

    /// Protection level of `path`, or `Public` when no rule matches.
    #[must_use]
    pub fn classify(&self, path: &str) -> ProtectionLevel {
        let path = normalize_path(path);
        self.rules
            .iter()
            .find(|rule| rule.prefixes.iter().any(|p| matches_prefix(&path, p)))
            .map_or(ProtectionLevel::Public, |rule| rule.level)
    }
}

/// Classify against the marketplace table.
#[must_use]
pub fn classify(path: &str) -> ProtectionLevel {
    RouteTable::marketplace().classify(path)
}

/// Ensure a leading `/` and collapse repeated slashes. Empty becomes `/`.
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') && !path.contains("//") {
        return Cow::Borrowed(path);
    }

    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(segment);
    }
    // Keep a meaningful trailing slash ("/admin/")
    if path.ends_with('/') && !out.ends_with('/') {
        out.push('/');
    }
    Cow::Owned(out)
}

/// Segment-boundary prefix match: `/admin` matches `/admin` and `/admin/...`,
/// never `/administrator`.
#[must_use]
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn admin_prefix_respects_segment_boundary() {
        assert_eq!(classify("/admin"), ProtectionLevel::Admin);
        assert_eq!(classify("/admin/"), ProtectionLevel::Admin);
        assert_eq!(classify("/admin/categories"), ProtectionLevel::Admin);
        assert_eq!(classify("/admin/x/y"), ProtectionLevel::Admin);
        assert_eq!(classify("/administrator"), ProtectionLevel::Public);
        assert_eq!(classify("/admin-panel"), ProtectionLevel::Public);
    }

    #[test]
    fn api_prefixes_share_page_levels() {
        assert_eq!(classify("/api/admin/users"), ProtectionLevel::Admin);
        assert_eq!(classify("/api/vendor/tools"), ProtectionLevel::VendorOrAdmin);
        assert_eq!(classify("/api/vendors"), ProtectionLevel::Public);
        assert_eq!(classify("/api/tools"), ProtectionLevel::Public);
    }

    #[test]
    fn vendor_and_dashboard_levels() {
        assert_eq!(classify("/vendor"), ProtectionLevel::VendorOrAdmin);
        assert_eq!(classify("/vendor/tools/new"), ProtectionLevel::VendorOrAdmin);
        assert_eq!(classify("/dashboard"), ProtectionLevel::Authenticated);
        assert_eq!(classify("/dashboard/account"), ProtectionLevel::Authenticated);
        assert_eq!(classify("/dashboards"), ProtectionLevel::Public);
    }

    #[test]
    fn unmatched_paths_are_public() {
        for path in ["/", "/browse", "/tools/42", "/login", "/api/newsletter", "/x/admin"] {
            assert_eq!(classify(path), ProtectionLevel::Public, "{path}");
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(classify("/Admin"), ProtectionLevel::Public);
    }

    #[test]
    fn normalization_adds_leading_slash_and_collapses_repeats() {
        assert_eq!(normalize_path("admin/x"), "/admin/x");
        assert_eq!(normalize_path("//admin//x"), "/admin/x");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/dashboard/"), "/dashboard/");
        assert!(matches!(normalize_path("/browse"), Cow::Borrowed(_)));

        assert_eq!(classify("admin"), ProtectionLevel::Admin);
        assert_eq!(classify("//admin"), ProtectionLevel::Admin);
    }

    #[test]
    fn first_matching_rule_wins() {
        const OVERLAP: &[RouteRule] = &[
            RouteRule {
                prefixes: &["/shop/private"],
                level: ProtectionLevel::Admin,
            },
            RouteRule {
                prefixes: &["/shop"],
                level: ProtectionLevel::Authenticated,
            },
        ];
        let table = RouteTable::new(OVERLAP);

        assert_eq!(table.classify("/shop/private/x"), ProtectionLevel::Admin);
        assert_eq!(table.classify("/shop/cart"), ProtectionLevel::Authenticated);
    }

    #[test]
    fn root_prefix_matches_everything() {
        assert!(matches_prefix("/anything", "/"));
        assert!(matches_prefix("/admin/x", "/admin/"));
    }

    #[test]
    fn classification_is_deterministic() {
        let table = RouteTable::marketplace();
        for path in ["/admin/a", "/vendor", "/dashboard/x", "/browse"] {
            assert_eq!(table.classify(path), table.classify(path));
        }
    }
}
