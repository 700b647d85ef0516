use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use newcmd_address::parse_address;
use newcmd_amount::{ETHEREUM_UNITS, NEWCHAIN_UNITS, Unit, UnitNames};
use newcmd_defaults::{
    DEFAULT_CHAIN_ID, DEFAULT_WALLET_PATH, ETHEREUM_RPC_URL, NEWCHAIN_RPC_URL,
};
use newcmd_primitives::{Address, ChainId};

/// The chain family, which determines the unit names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    NewChain,
    Ethereum,
}

impl Chain {
    pub fn unit_names(self) -> &'static UnitNames {
        match self {
            Chain::NewChain => &NEWCHAIN_UNITS,
            Chain::Ethereum => &ETHEREUM_UNITS,
        }
    }

    fn default_rpc_url(self) -> &'static str {
        match self {
            Chain::NewChain => NEWCHAIN_RPC_URL,
            Chain::Ethereum => ETHEREUM_RPC_URL,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Informational only; no command talks to a node.
    pub rpc_url: String,
    pub wallet_path: PathBuf,
    pub chain: Chain,
    pub chain_id: ChainId,
    pub pay_from: Option<Address>,
    pub pay_unit: Option<Unit>,
}

impl Config {
    /// Loads the configuration file at `file_path`, falling back to defaults
    /// when it doesn't exist.
    pub fn load(file_path: &Path) -> anyhow::Result<Self> {
        let file_config = match fs::read_to_string(file_path) {
            Ok(contents) => toml::from_str::<FileConfig>(&contents).with_context(|| {
                format!("Malformed config file {}", file_path.display())
            })?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                log::debug!(
                    "Config file {} not found, using defaults",
                    file_path.display()
                );
                FileConfig::default()
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Failed to read {}", file_path.display()));
            }
        };

        log::debug!("file config: {file_config:?}");
        Config::try_from(file_config)
    }

    pub fn unit_names(&self) -> &'static UnitNames {
        self.chain.unit_names()
    }
}

impl TryFrom<FileConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(value: FileConfig) -> Result<Self, Self::Error> {
        let chain = value.chain.unwrap_or_default();
        let chain_id = value
            .chain_id
            .map(ChainId::try_from)
            .transpose()
            .context("Invalid chain_id in config file")?
            .unwrap_or_else(default_chain_id);

        let pay = value.pay.unwrap_or_default();
        let pay_from = pay.from.and_then(|from| {
            parse_address(&from, chain_id)
                .inspect_err(|error| log::warn!("Ignoring pay.from: {error}"))
                .ok()
        });
        let pay_unit = pay.unit.and_then(|unit| {
            chain
                .unit_names()
                .parse(&unit)
                .inspect_err(|error| log::warn!("Ignoring pay.unit: {error}"))
                .ok()
        });

        Ok(Self {
            rpc_url: value
                .rpc_url
                .unwrap_or_else(|| chain.default_rpc_url().to_string()),
            wallet_path: value
                .wallet_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WALLET_PATH)),
            chain,
            chain_id,
            pay_from,
            pay_unit,
        })
    }
}

fn default_chain_id() -> ChainId {
    ChainId::try_from(DEFAULT_CHAIN_ID).expect("default chain ID is valid")
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    rpc_url: Option<String>,
    wallet_path: Option<PathBuf>,
    chain: Option<Chain>,
    chain_id: Option<u64>,
    pay: Option<PayConfig>,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PayConfig {
    from: Option<String>,
    unit: Option<String>,
}
