/// The chain ID of NewChain mainnet, used when neither the configuration nor
/// the transaction specifies one.
pub const DEFAULT_CHAIN_ID: u64 = 1007;

/// The configuration file that is read when no `--config` is provided.
pub const DEFAULT_CONFIG_FILE: &str = "./config.toml";

/// Directory where the key store lives.
pub const DEFAULT_WALLET_PATH: &str = "./wallet/";

/// Default RPC endpoint for NewChain.
pub const NEWCHAIN_RPC_URL: &str = "https://rpc1.newchain.newtonproject.org";

/// Default RPC endpoint for Ethereum.
pub const ETHEREUM_RPC_URL: &str = "https://ethrpc.service.newtonproject.org";

/// The intrinsic gas cost of a plain value transfer.
pub const MIN_GAS_LIMIT: u64 = 21_000;

/// The gas price, in base units, used when a transaction file omits it.
pub const DEFAULT_GAS_PRICE: u64 = 1;

/// Prefix of chain-specific addresses.
pub const CHAIN_ADDRESS_PREFIX: &str = "NEW";

/// Environment variable holding the hex-encoded secret key used for signing.
pub const SECRET_KEY_ENV: &str = "NEWCMD_SECRET_KEY";

/// Environment variable holding the passphrase that unlocks the signing
/// account.
pub const PASSPHRASE_ENV: &str = "NEWCMD_PASSPHRASE";
