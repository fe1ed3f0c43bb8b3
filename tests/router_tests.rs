//! Navigation Table: resolution and construction-time validation
//!
//! These tests verify:
//! 1. the canonical table routes /, /sdk, /wc and unknown paths
//! 2. every unlisted path lands on the fallback within one redirect hop
//! 3. misconfigured tables fail at construction, not during navigation

use azguard_demo::core::keys::{routes, views};
use azguard_demo::router::{RouteConfig, MAX_REDIRECT_HOPS};
use azguard_demo::{Route, RouteError, RouteTable, RouteTarget};

fn canonical() -> RouteTable {
    RouteTable::builtin().expect("builtin routes")
}

/// Test: declared paths map to their views
#[test]
fn canonical_paths() {
    let table = canonical();
    assert_eq!(table.resolve("/sdk").view, views::AZGUARD_SDK);
    assert_eq!(table.resolve("/wc").view, views::WALLET_CONNECT);
    assert_eq!(table.resolve("/").view, views::AZGUARD_SDK);
    assert_eq!(table.root().name, routes::APP);
    assert_eq!(table.fallback().name, routes::NOT_FOUND);
    assert_eq!(table.resolve_name(routes::WALLET_CONNECT).unwrap().path, "/wc");
}

/// Test: unknown paths resolve like the root, in at most one hop
#[test]
fn unlisted_paths_fall_back() {
    let table = canonical();
    let root = table.resolve("/");
    for path in ["/unknown/path", "/wallet", "/sdk/deeper", "/wcx", "/%20", "/a/b/c/d/e"] {
        let r = table.resolve(path);
        assert_eq!(r.view, root.view, "{path}");
        assert_eq!(r.route, routes::AZGUARD_SDK, "{path}");
        // one hop: the matched route redirects straight to a route that renders
        let from = r.redirected_from.as_deref().expect("unlisted paths redirect");
        let RouteTarget::Redirect(target) = &table.get(from).expect("matched route").target else {
            panic!("{from} should redirect");
        };
        assert_eq!(target, &r.route, "{path}");
        let rendering = table.get(target).expect("redirect target");
        assert_eq!(rendering.target, RouteTarget::View(r.view.clone()), "{path}");
        assert_eq!(table.match_path(path).route.name, "NotFound", "{path}");
    }
}

/// Test: the fallback itself terminates at a view
#[test]
fn fallback_terminates_at_view() {
    let table = canonical();
    let fallback = table.fallback();
    assert!(matches!(fallback.target, RouteTarget::Redirect(_)));
    let r = table.resolve_name(&fallback.name).expect("fallback resolves");
    assert_eq!(r.view, "AzguardSDK");
}

/// Test: duplicate names fail fast
#[test]
fn duplicate_names_fail() {
    let err = RouteTable::new(vec![
        Route::redirect("/", "App", "Azguard SDK"),
        Route::view("/sdk", "Azguard SDK", "AzguardSDK"),
        Route::view("/wc", "Azguard SDK", "WalletConnect"),
        Route::redirect("/:catchAll(.*)*", "NotFound", "Azguard SDK"),
    ])
    .unwrap_err();
    assert!(matches!(err, RouteError::DuplicateName(ref n) if n == "Azguard SDK"));
    assert_eq!(err.to_string(), "duplicate route name 'Azguard SDK'");
}

/// Test: a fallback that redirects into another redirect is rejected
#[test]
fn fallback_redirect_chain_fails() {
    // NotFound -> App -> Azguard SDK is two hops
    assert_eq!(MAX_REDIRECT_HOPS, 1);
    let err = RouteTable::new(vec![
        Route::redirect("/", "App", "Azguard SDK"),
        Route::view("/sdk", "Azguard SDK", "AzguardSDK"),
        Route::redirect("/:catchAll(.*)*", "NotFound", "App"),
    ])
    .unwrap_err();
    assert!(matches!(err, RouteError::RouteNotResolved(ref n) if n == "NotFound"));
}

/// Test: route files are versioned data
#[test]
fn route_config_from_json() {
    let text = r#"{
        "version": 1,
        "routes": [
            { "path": "/", "name": "App", "redirect": "Wallet Connect" },
            { "path": "/wc", "name": "Wallet Connect", "view": "WalletConnect" },
            { "path": "/tx/:hash", "name": "Tx", "view": "TxView" },
            { "path": "/:catchAll(.*)*", "name": "NotFound", "view": "NotFoundView" }
        ]
    }"#;
    let table = RouteTable::from_json(text).expect("valid config");
    assert_eq!(table.resolve("/").view, "WalletConnect");
    assert_eq!(table.resolve("/tx/0xabc").params["hash"], "0xabc");

    // A fallback that renders directly needs no redirect
    let r = table.resolve("/nope");
    assert_eq!(r.view, "NotFoundView");
    assert!(!r.was_redirected());

    let config: RouteConfig = table.to_config();
    assert_eq!(config.routes.len(), 4);
}

/// Test: config shape errors name the offending route
#[test]
fn route_config_shape_errors() {
    let both = r#"{"version":1,"routes":[{"path":"/","name":"App","view":"A","redirect":"B"}]}"#;
    assert!(matches!(RouteTable::from_json(both), Err(RouteError::InvalidTarget(n)) if n == "App"));

    let missing_name = r#"{"version":1,"routes":[{"path":"/","view":"A"}]}"#;
    assert!(matches!(RouteTable::from_json(missing_name), Err(RouteError::Parse(_))));
}
