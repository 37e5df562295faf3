//! `vitrine-scan` -- gallery manifest utility.
//!
//! Scans the configured image folders and rewrites their JSON
//! manifests. Intended to run from the site root before deploying
//! static assets.
//!
//! # Environment variables
//!
//! | Variable                 | Default                | Description              |
//! |--------------------------|------------------------|--------------------------|
//! | `ILLUSTRATIONS_DIR`      | `image/illustrations`  | illustrations folder     |
//! | `ILLUSTRATIONS_MANIFEST` | `illustrations.json`   | illustrations manifest   |
//! | `PORTFOLIO_DIR`          | `image/portfolio`      | portfolio folder         |
//! | `PORTFOLIO_MANIFEST`     | `portfolio.json`       | portfolio manifest       |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_scan::write_manifest;

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.into())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine_scan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let targets = [
        (
            env_or("ILLUSTRATIONS_DIR", "image/illustrations"),
            env_or("ILLUSTRATIONS_MANIFEST", "illustrations.json"),
        ),
        (
            env_or("PORTFOLIO_DIR", "image/portfolio"),
            env_or("PORTFOLIO_MANIFEST", "portfolio.json"),
        ),
    ];

    for (dir, manifest) in &targets {
        match write_manifest(dir, manifest)? {
            Some(count) => tracing::info!(%dir, %manifest, count, "Scan complete"),
            None => tracing::info!(%dir, "Created empty folder; run again once it has images"),
        }
    }

    Ok(())
}
