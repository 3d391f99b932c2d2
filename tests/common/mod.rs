//! Shared helpers for the integration flows.
#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Once};

use alloy_primitives::{Address, B256, U256};
use gravity_protocol::custody::{AssetCustody, CustodyError};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs an env-filtered subscriber so `RUST_LOG` works under the test
/// runner.  Safe to call from every test.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    });
}

/// Domain id used across the integration flows.
pub fn bridge_id() -> B256 {
    let mut id = [0u8; 32];
    id[..12].copy_from_slice(b"eth-testcore");
    B256::from(id)
}

/// In-memory custody tracking bridge-held balances per asset.
#[derive(Default, Debug)]
pub struct VaultCustody {
    held: BTreeMap<Address, U256>,
    pub releases: Vec<(Address, Address, U256)>,
}

impl VaultCustody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, asset: Address) -> U256 {
        self.held.get(&asset).copied().unwrap_or(U256::ZERO)
    }
}

impl AssetCustody for VaultCustody {
    fn release(&mut self, asset: Address, to: Address, amount: U256) -> Result<(), CustodyError> {
        let held = self.balance(asset);
        if held < amount {
            return Err(CustodyError(format!(
                "insufficient custody balance for {asset}: held {held}, need {amount}"
            )));
        }
        self.held.insert(asset, held - amount);
        self.releases.push((asset, to, amount));
        Ok(())
    }

    fn collect(&mut self, asset: Address, _from: Address, amount: U256) -> Result<(), CustodyError> {
        let held = self.balance(asset);
        let new_held = held
            .checked_add(amount)
            .ok_or_else(|| CustodyError("custody balance overflow".into()))?;
        self.held.insert(asset, new_held);
        Ok(())
    }
}
