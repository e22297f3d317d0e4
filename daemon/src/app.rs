//! Wires the store, wallet and bank portal together from a config.

use std::sync::Arc;

use anyhow::Context;
use kavach_ledger::LedgerContext;
use kavach_store_lmdb::{check_integrity, LmdbEnvironment};
use kavach_verification::BankPortal;
use kavach_wallet_core::Wallet;
use tracing::{info, warn};

use crate::config::KavachConfig;

pub struct App {
    /// Kept open for the lifetime of the process.
    pub env: LmdbEnvironment,
    pub wallet: Wallet,
    pub portal: BankPortal,
}

impl App {
    /// Open the LMDB store under `config.data_dir` and build both sides.
    pub fn open(config: &KavachConfig) -> anyhow::Result<Self> {
        let env = LmdbEnvironment::open(&config.data_dir, config.lmdb_map_size)
            .with_context(|| format!("opening store at {}", config.data_dir.display()))?;
        let store = Arc::new(env.kv_store());

        let report = check_integrity(store.as_ref()).context("integrity check")?;
        if report.is_healthy() {
            info!(entries = report.total_entries, "store integrity check passed");
        } else {
            warn!(
                entries = report.total_entries,
                malformed = ?report.malformed_keys,
                "store holds malformed values, defaults will be used for them"
            );
        }

        let ctx = LedgerContext::system(store);
        Ok(Self {
            wallet: Wallet::with_config(ctx.clone(), &config.wallet_config()),
            portal: BankPortal::new(ctx, &config.portal_config()),
            env,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = KavachConfig {
            data_dir: dir.path().join("data"),
            ..Default::default()
        };
        let app = App::open(&config).unwrap();
        assert_eq!(app.wallet.nominees.list().unwrap().len(), 2);
        assert!(app.portal.session().unwrap().is_none());
        assert!(app.env.path().ends_with("data"));
    }
}
