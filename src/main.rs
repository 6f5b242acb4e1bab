//! `qsoflag` — highlight recently worked callsigns in a radio application.
//!
//! # Usage
//!
//! ```text
//! qsoflag --days 5 --rebuild if-newer --verbose
//! qsoflag --log ~/wsjtx_log.adi --addr 127.0.0.1 --port 2237 --timeout 30
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use qsoflag::{
    config::{
        Config, DEFAULT_ADDR, DEFAULT_PORT, DEFAULT_THRESHOLD_DAYS, DEFAULT_TIMEOUT_SECS,
        RawConfig, RebuildPolicy,
    },
    context::SessionContext,
    core::{builder::rebuild, index::ActivityIndex},
    history::adif,
    persist::flat::FlatFileStore,
    runtime::{monitor::UdpJsonMonitor, session::Session},
};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "qsoflag",
    version,
    about = "Highlight decoded callsigns worked today (red) or within the last N days (orange)"
)]
struct Args {
    /// Monitor UDP bind address.
    #[arg(short = 'a', long, env = "QSOFLAG_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Monitor UDP port.
    #[arg(short, long, env = "QSOFLAG_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds to wait for an event before giving up.
    #[arg(short, long, env = "QSOFLAG_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// When to rebuild the backing store from the ADIF log.
    #[arg(short, long, value_enum, env = "QSOFLAG_REBUILD", default_value_t = RebuildPolicy::Never)]
    rebuild: RebuildPolicy,

    /// Days within which a contact is highlighted orange (at least 2).
    #[arg(short = 'n', long, env = "QSOFLAG_DAYS", default_value_t = DEFAULT_THRESHOLD_DAYS)]
    days: u32,

    /// Enable debug diagnostics.
    #[arg(short, long)]
    verbose: bool,

    /// ADIF log to build from.
    #[arg(short, long, env = "QSOFLAG_LOG", value_name = "FILE")]
    log: Option<PathBuf>,

    /// Backing store file.
    #[arg(short, long, env = "QSOFLAG_STORE", value_name = "FILE")]
    store: Option<PathBuf>,
}

impl From<Args> for RawConfig {
    fn from(args: Args) -> Self {
        Self {
            addr: args.addr,
            port: args.port,
            timeout_secs: args.timeout,
            rebuild: args.rebuild,
            threshold_days: args.days,
            verbose: args.verbose,
            log_path: args.log,
            store_path: args.store,
        }
    }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cfg = RawConfig::from(Args::parse())
        .validate()
        .context("invalid configuration")?;

    let default_level = if cfg.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();

    let mut store = FlatFileStore::new(&cfg.store_path);
    let index = open_index(&cfg, &mut store)?;
    info!(contacts = index.len(), store = %store.path().display(), "activity index loaded");

    let monitor = UdpJsonMonitor::bind(cfg.server, cfg.timeout)
        .await
        .context("starting monitor")?;

    let ctx = SessionContext::starting_now(cfg.threshold_days);
    let mut session = Session::new(monitor, store, index, ctx);
    let end = session.run(interrupt()).await.context("session failed")?;

    info!(?end, logged = session.logged_count(), highlighted = session.highlighted_count(), "session ended");
    Ok(())
}

/// Rebuilds from the ADIF log when the policy asks for it, else loads the store.
fn open_index(cfg: &Config, store: &mut FlatFileStore) -> Result<ActivityIndex> {
    let store_mtime = store.exists().then(|| store.modified().ok()).flatten();
    let log_mtime = std::fs::metadata(&cfg.log_path).and_then(|m| m.modified()).ok();

    if !cfg.rebuild.should_rebuild(store_mtime, log_mtime) {
        let records = store
            .load()
            .with_context(|| format!("reading {}", store.path().display()))?;
        return Ok(ActivityIndex::from_stored(records));
    }

    info!(log = %cfg.log_path.display(), "building activity index");
    let contacts = adif::read_file(&cfg.log_path)
        .with_context(|| format!("reading ADIF log {}", cfg.log_path.display()))?;
    rebuild(contacts, store).context("building activity index")
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for interrupts");
        std::future::pending::<()>().await;
    }
}
