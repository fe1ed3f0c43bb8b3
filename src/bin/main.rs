//! azguard-demo CLI - route resolution and session storage
//!
//!   azguard-demo routes                 → route table as JSON
//!   azguard-demo check <file>           → validate a route file
//!   azguard-demo resolve <path>         → {route, view, path, params, redirected_from}
//!   azguard-demo get [key]              → snapshot, or one stored field
//!   azguard-demo put <key> <json>       → write one stored field
//!   azguard-demo keys                   → every key in the storage file
//!   azguard-demo clear [--all]          → clear owned keys (or everything)
//!   azguard-demo serve [--port]         → HTTP inspection server
//!
//! Output format:
//!   --json     Output raw JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use anyhow::{anyhow, bail, Context, Result};
use azguard_demo::config::{load_routes_file, AppConfig};
use azguard_demo::core::keys::storage;
use azguard_demo::logging::init_logging;
use azguard_demo::server::{serve, AppState};
use azguard_demo::{FileStorage, Session, SessionStore};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use tracing::debug;

fn main() {
    load_dotenv();
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("azguard-demo {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let config = opts.config();
    debug!(?config, "resolved configuration");

    let result = match opts.command.as_deref() {
        Some("routes") => cmd_routes(&config),
        Some("check") => cmd_check(&opts),
        Some("resolve") => cmd_resolve(&opts, &config),
        Some("get") => cmd_get(&opts, &config),
        Some("put") | Some("set") => cmd_put(&opts, &config),
        Some("keys") => cmd_keys(&config),
        Some("clear") => cmd_clear(&opts, &config),
        Some("serve") => cmd_serve(&config),
        Some(cmd) => Err(anyhow!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = !opts.json && (opts.pretty || std::io::stdout().is_terminal());
    let render = |value: &Value| {
        let text = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.unwrap_or_else(|_| value.to_string())
    };

    match result {
        Ok(output) => println!("{}", render(&output)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": format!("{:#}", e)})));
            std::process::exit(1);
        }
    }
}

/// Load `.env` from the working directory; real env vars win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"');
            if !value.is_empty() && env::var(key.trim()).is_err() {
                env::set_var(key.trim(), value);
            }
        }
    }
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    target: Option<String>,
    data: Option<String>,
    app: Option<String>,
    data_dir: Option<String>,
    routes: Option<String>,
    port: Option<u16>,
    all: bool,
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--all" => opts.all = true,
                "--app" | "-a" => opts.app = iter.next().cloned(),
                "--data-dir" | "-d" => opts.data_dir = iter.next().cloned(),
                "--routes" | "-r" => opts.routes = iter.next().cloned(),
                "--port" | "-p" => opts.port = iter.next().and_then(|p| p.parse().ok()),
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
        }

        let mut positional = positional.into_iter();
        opts.command = positional.next();
        opts.target = positional.next();
        // Rest is data (joined)
        let rest: Vec<String> = positional.collect();
        if !rest.is_empty() {
            opts.data = Some(rest.join(" "));
        }
        opts
    }

    /// Env config with CLI flags applied on top.
    fn config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        if let Some(app) = &self.app {
            config.app = app.clone();
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(routes) = &self.routes {
            config = config.with_routes_file(routes);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        config
    }
}

fn print_usage() {
    println!(
        r#"azguard-demo - navigation table and wallet session storage

USAGE:
    azguard-demo <command> [target] [data] [options]

COMMANDS:
    routes                  Print the route table
    check <file>            Validate a route config file
    resolve <path>          Resolve a path to the view it renders
    get [key]               Read the session snapshot, or one key
    put <key> <json>        Write one key (session|accounts|isConnected)
    keys                    List stored keys, flagging ones the store does not own
    clear [--all]           Clear owned keys; --all wipes the whole storage file
    serve                   Start HTTP inspection server

OPTIONS:
    --app, -a <name>        App name (env: AZGUARD_DEMO_APP)
    --data-dir, -d <path>   Storage directory (env: AZGUARD_DEMO_DATA_DIR)
    --routes, -r <file>     Route config file (env: AZGUARD_DEMO_ROUTES)
    --port, -p <port>       Server port (default: 8080, env: AZGUARD_DEMO_PORT)

OUTPUT OPTIONS:
    --json                  Raw JSON output
    --pretty                Pretty-print JSON
    --version, -V           Print version

EXAMPLES:
    azguard-demo resolve /unknown/path
    azguard-demo put accounts '["0xabc","0xdef"]'
    azguard-demo put isConnected true
    azguard-demo get accounts --json | jq '.[0]'
    azguard-demo clear
"#
    );
}

fn open_store(config: &AppConfig) -> Result<SessionStore<FileStorage>> {
    config
        .open_store()
        .with_context(|| format!("failed to open {}", config.storage_path().display()))
}

fn require<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    value.as_deref().ok_or_else(|| anyhow!("missing {}", what))
}

fn cmd_routes(config: &AppConfig) -> Result<Value> {
    let table = config.load_routes()?;
    Ok(serde_json::to_value(table.to_config())?)
}

fn cmd_check(opts: &ParsedArgs) -> Result<Value> {
    let path = require(&opts.target, "<file>")?;
    let table = load_routes_file(path.as_ref())?;
    Ok(json!({
        "valid": true,
        "routes": table.len(),
        "root": table.root().name,
        "fallback": table.fallback().name,
    }))
}

fn cmd_resolve(opts: &ParsedArgs, config: &AppConfig) -> Result<Value> {
    let path = opts.target.as_deref().unwrap_or("/");
    let table = config.load_routes()?;
    Ok(serde_json::to_value(table.resolve(path))?)
}

fn cmd_get(opts: &ParsedArgs, config: &AppConfig) -> Result<Value> {
    let store = open_store(config)?;
    let value = match opts.target.as_deref() {
        None => serde_json::to_value(store.snapshot()?)?,
        Some(storage::SESSION) => serde_json::to_value(store.get_session()?)?,
        Some(storage::ACCOUNTS) => serde_json::to_value(store.get_accounts()?)?,
        Some(storage::IS_CONNECTED) => serde_json::to_value(store.get_connection_status()?)?,
        Some(other) => bail!("unknown key '{}' (expected one of {:?})", other, storage::ALL),
    };
    Ok(value)
}

fn cmd_put(opts: &ParsedArgs, config: &AppConfig) -> Result<Value> {
    let key = require(&opts.target, "<key>")?;
    if !storage::is_owned(key) {
        bail!("unknown key '{}' (expected one of {:?})", key, storage::ALL);
    }
    let raw = require(&opts.data, "<json>")?;
    let data: Value = serde_json::from_str(raw).with_context(|| format!("invalid JSON: {}", raw))?;
    let store = open_store(config)?;

    match key {
        storage::SESSION => store.update_session(&Session::new(data))?,
        storage::ACCOUNTS => {
            let accounts: Vec<String> =
                serde_json::from_value(data).context("accounts must be an array of strings")?;
            store.update_accounts(&accounts)?
        }
        storage::IS_CONNECTED => {
            let status = data.as_bool().ok_or_else(|| anyhow!("isConnected must be true or false"))?;
            store.update_connection_status(status)?
        }
        other => bail!("unknown key '{}' (expected one of {:?})", other, storage::ALL),
    }
    Ok(json!({"written": key}))
}

fn cmd_keys(config: &AppConfig) -> Result<Value> {
    let keys = open_store(config)?.stored_keys()?;
    let foreign: Vec<&String> = keys.iter().filter(|k| !storage::is_owned(k)).collect();
    Ok(json!({"keys": keys, "foreign": foreign}))
}

fn cmd_clear(opts: &ParsedArgs, config: &AppConfig) -> Result<Value> {
    let store = open_store(config)?;
    if opts.all {
        store.clear_storage()?;
        Ok(json!({"cleared": "all"}))
    } else {
        store.clear_owned_fields()?;
        Ok(json!({"cleared": storage::ALL}))
    }
}

fn cmd_serve(config: &AppConfig) -> Result<Value> {
    let routes = config.load_routes()?;
    let backend = FileStorage::open(config.storage_path())
        .with_context(|| format!("failed to open {}", config.storage_path().display()))?;
    let state = AppState::new(Box::new(backend), routes, &config.app);

    let rt = tokio::runtime::Runtime::new().context("failed to create runtime")?;
    rt.block_on(serve(state, config.port))?;
    Ok(json!({"status": "stopped"}))
}
