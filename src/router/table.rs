//! RouteTable: validated, immutable, first-match-wins

use super::pattern::PathPattern;
use super::{
    Route, RouteConfig, RouteDef, RouteError, RouteTarget, BUILTIN_ROUTES, MAX_REDIRECT_HOPS,
    ROUTE_CONFIG_VERSION,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A path no sensible route declares; only the catch-all should match it.
const UNDECLARED_PATH: &str = "/__undeclared__/x/y";

/// Outcome of resolving a path: the view to mount and how we got there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Name of the route that renders
    pub route: String,
    /// View to mount
    pub view: String,
    /// Canonical path of the rendering route (what the address bar should show)
    pub path: String,
    /// Params captured from the requested path
    pub params: BTreeMap<String, String>,
    /// Route that matched first, if it redirected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
}

impl Resolution {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// First matching route for a path, before redirects are followed.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct Entry {
    route: Route,
    pattern: PathPattern,
    /// Index of the route that finally renders
    terminal: usize,
    /// View rendered by that route
    view: String,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
    root: usize,
    fallback: usize,
}

impl RouteTable {
    /// Validate and build a table. Every configuration defect is reported here
    /// rather than during navigation.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteError> {
        let mut by_name = HashMap::with_capacity(routes.len());
        let mut patterns = Vec::with_capacity(routes.len());
        for (i, route) in routes.iter().enumerate() {
            if by_name.insert(route.name.clone(), i).is_some() {
                return Err(RouteError::DuplicateName(route.name.clone()));
            }
            let pattern = PathPattern::parse(&route.path).map_err(|reason| RouteError::InvalidPattern {
                name: route.name.clone(),
                path: route.path.clone(),
                reason,
            })?;
            patterns.push(pattern);
        }

        let roots: Vec<usize> = (0..patterns.len()).filter(|&i| patterns[i].is_root()).collect();
        let root = match roots[..] {
            [only] => only,
            _ => return Err(RouteError::RootRoute(roots.len())),
        };

        let fallbacks: Vec<usize> = (0..patterns.len()).filter(|&i| patterns[i].is_catch_all()).collect();
        let fallback = match fallbacks[..] {
            [] => return Err(RouteError::MissingFallback),
            [only] => only,
            _ => return Err(RouteError::MultipleFallbacks),
        };
        if fallback != routes.len() - 1 {
            return Err(RouteError::FallbackNotLast(routes[fallback].name.clone()));
        }

        // first match wins, so an earlier route can hide the root or the catch-all
        if let Some(first) = patterns.iter().position(|p| p.matches("/")) {
            if first != root {
                return Err(RouteError::ShadowedRoute {
                    route: routes[root].name.clone(),
                    by: routes[first].name.clone(),
                });
            }
        }
        if let Some(first) = patterns[..fallback].iter().position(|p| p.matches(UNDECLARED_PATH)) {
            return Err(RouteError::ShadowedRoute {
                route: routes[fallback].name.clone(),
                by: routes[first].name.clone(),
            });
        }

        let terminals = routes
            .iter()
            .map(|route| terminal(route, &routes, &by_name))
            .collect::<Result<Vec<_>, _>>()?;

        let entries = routes
            .into_iter()
            .zip(patterns)
            .zip(terminals)
            .map(|((route, pattern), (terminal, view))| Entry { route, pattern, terminal, view })
            .collect();

        let table = Self { entries, by_name, root, fallback };
        tracing::debug!(
            routes = table.entries.len(),
            root = %table.root().name,
            fallback = %table.fallback().name,
            "route table validated"
        );
        Ok(table)
    }

    pub fn from_config(config: RouteConfig) -> Result<Self, RouteError> {
        if config.version != ROUTE_CONFIG_VERSION {
            return Err(RouteError::UnsupportedVersion {
                found: config.version,
                expected: ROUTE_CONFIG_VERSION,
            });
        }
        let routes = config
            .routes
            .into_iter()
            .map(Route::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(routes)
    }

    pub fn from_json(text: &str) -> Result<Self, RouteError> {
        Self::from_config(serde_json::from_str(text)?)
    }

    /// The canonical table embedded from `config/routes.json`.
    pub fn builtin() -> Result<Self, RouteError> {
        Self::from_json(BUILTIN_ROUTES)
    }

    /// Data-file form of this table.
    pub fn to_config(&self) -> RouteConfig {
        RouteConfig {
            version: ROUTE_CONFIG_VERSION,
            routes: self.routes().map(RouteDef::from).collect(),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.entries.iter().map(|e| &e.route)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&i| &self.entries[i].route)
    }

    pub fn root(&self) -> &Route {
        &self.entries[self.root].route
    }

    pub fn fallback(&self) -> &Route {
        &self.entries[self.fallback].route
    }

    // =========================================================================
    // RESOLUTION
    // =========================================================================

    fn find(&self, path: &str) -> (usize, BTreeMap<String, String>) {
        let path = normalize(path);
        self.entries
            .iter()
            .enumerate()
            .find_map(|(i, e)| e.pattern.captures(&path).map(|params| (i, params)))
            // the catch-all matches every normalized path
            .unwrap_or_else(|| (self.fallback, BTreeMap::new()))
    }

    /// First route matching `path`, without following redirects.
    pub fn match_path(&self, path: &str) -> RouteMatch<'_> {
        let (i, params) = self.find(path);
        RouteMatch { route: &self.entries[i].route, params }
    }

    /// Resolve `path` to the view that renders, following at most
    /// [`MAX_REDIRECT_HOPS`] redirect.
    pub fn resolve(&self, path: &str) -> Resolution {
        let (i, params) = self.find(path);
        let resolution = self.resolution(i, params);
        tracing::trace!(path, view = %resolution.view, route = %resolution.route, "resolved");
        resolution
    }

    /// Navigate by route name.
    pub fn resolve_name(&self, name: &str) -> Option<Resolution> {
        let &i = self.by_name.get(name)?;
        Some(self.resolution(i, BTreeMap::new()))
    }

    fn resolution(&self, matched: usize, params: BTreeMap<String, String>) -> Resolution {
        let entry = &self.entries[matched];
        let terminal = &self.entries[entry.terminal];
        Resolution {
            route: terminal.route.name.clone(),
            view: entry.view.clone(),
            path: terminal.route.path.clone(),
            params,
            redirected_from: (entry.terminal != matched).then(|| entry.route.name.clone()),
        }
    }
}

/// Follow redirects from `route` until a view, within the hop limit.
/// Returns the rendering route's index and its view.
fn terminal(
    route: &Route,
    routes: &[Route],
    by_name: &HashMap<String, usize>,
) -> Result<(usize, String), RouteError> {
    let mut current = route;
    let mut index = by_name[&route.name];
    for _ in 0..=MAX_REDIRECT_HOPS {
        match &current.target {
            RouteTarget::View(view) => return Ok((index, view.clone())),
            RouteTarget::Redirect(target) => {
                index = *by_name.get(target).ok_or_else(|| RouteError::UnknownTarget {
                    route: current.name.clone(),
                    target: target.clone(),
                })?;
                current = &routes[index];
            }
        }
    }
    Err(RouteError::RouteNotResolved(route.name.clone()))
}

/// Strip `?query` and `#fragment`, and make sure the path starts with '/'.
fn normalize(path: &str) -> String {
    let end = path.find(&['?', '#'][..]).unwrap_or(path.len());
    let path = &path[..end];
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
