//! Navigation Table: ordered route definitions mapping paths to views
//!
//! # Resolution
//!
//! ```text
//! path ──normalize──▶ scan routes in order ──first match──▶ Route
//!                                                            │
//!                        ┌───────────── View(name) ◀─────────┤
//!                        │                                   │
//!                        │        Redirect(route) ──one hop──┘
//!                        ▼
//!                   Resolution { route, view, params, redirected_from }
//! ```
//!
//! The table is validated once at construction: unique names, one root
//! route, one catch-all placed last, and every route ending at a view within
//! [`MAX_REDIRECT_HOPS`]. After that, resolution cannot fail.

mod pattern;
mod table;

pub use pattern::PathPattern;
pub use table::{Resolution, RouteMatch, RouteTable};

use serde::{Deserialize, Serialize};

/// Redirects allowed between the matched route and the rendered view
pub const MAX_REDIRECT_HOPS: usize = 1;

/// Only route config version this build understands
pub const ROUTE_CONFIG_VERSION: u32 = 1;

/// Canonical table shipped with the app
pub const BUILTIN_ROUTES: &str = include_str!("../../config/routes.json");

/// Route table configuration errors. All are detected at construction.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("invalid route config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported route config version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("route '{0}' must set exactly one of 'view' or 'redirect'")]
    InvalidTarget(String),

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("invalid path '{path}' on route '{name}': {reason}")]
    InvalidPattern { name: String, path: String, reason: String },

    #[error("expected exactly one root route ('/'), found {0}")]
    RootRoute(usize),

    #[error("no catch-all route")]
    MissingFallback,

    #[error("more than one catch-all route")]
    MultipleFallbacks,

    #[error("catch-all route '{0}' must be the last entry")]
    FallbackNotLast(String),

    #[error("route '{route}' is never reached: '{by}' matches its paths first")]
    ShadowedRoute { route: String, by: String },

    #[error("route '{route}' redirects to unknown route '{target}'")]
    UnknownTarget { route: String, target: String },

    #[error("route '{0}' does not reach a view within the redirect hop limit")]
    RouteNotResolved(String),
}

/// What a route does once matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteTarget {
    /// Render the named view
    View(String),
    /// Re-resolve to the named route
    Redirect(String),
}

/// Entry in the Navigation Table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub target: RouteTarget,
}

impl Route {
    pub fn view(path: impl Into<String>, name: impl Into<String>, view: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), target: RouteTarget::View(view.into()) }
    }

    pub fn redirect(path: impl Into<String>, name: impl Into<String>, to: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), target: RouteTarget::Redirect(to.into()) }
    }
}

/// Raw route definition (data file form)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDef {
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl TryFrom<RouteDef> for Route {
    type Error = RouteError;

    fn try_from(def: RouteDef) -> Result<Self, RouteError> {
        let target = match (def.view, def.redirect) {
            (Some(view), None) => RouteTarget::View(view),
            (None, Some(to)) => RouteTarget::Redirect(to),
            _ => return Err(RouteError::InvalidTarget(def.name)),
        };
        Ok(Route { path: def.path, name: def.name, target })
    }
}

impl From<&Route> for RouteDef {
    fn from(route: &Route) -> Self {
        let (view, redirect) = match &route.target {
            RouteTarget::View(v) => (Some(v.clone()), None),
            RouteTarget::Redirect(r) => (None, Some(r.clone())),
        };
        RouteDef { path: route.path.clone(), name: route.name.clone(), view, redirect }
    }
}

/// Versioned route table file: `{ "version": 1, "routes": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub version: u32,
    pub routes: Vec<RouteDef>,
}
