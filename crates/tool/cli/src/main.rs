mod batch;
mod config;
mod convert;
mod decode;
mod tx_file;

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use log::{LevelFilter, Log, Record};
use newcmd_address::to_chain_address;
use newcmd_amount::{Unit, format_with_unit};
use newcmd_block_header::{BlockHeader, recover_block_signer};
use newcmd_defaults::{
    DEFAULT_CONFIG_FILE, DEFAULT_GAS_PRICE, MIN_GAS_LIMIT, PASSPHRASE_ENV, SECRET_KEY_ENV,
};
use newcmd_primitives::{Address, ChainId, U256};
#[allow(deprecated)]
use newcmd_signer::{DangerousSecretKeyStr, InMemoryKeyStore, KeyStore, secret_key_from_str};
use newcmd_transaction::sign_request;

use crate::{
    batch::{BatchParameters, build_batch, parse_batch},
    config::Config,
    convert::{convert_address, convert_amount},
    decode::{DecodedTransaction, TransactionFields},
    tx_file::TransactionFile,
};

const LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser)]
#[clap(name = "newcmd", about = "Offline NewChain and Ethereum transaction tool")]
struct CliArgs {
    /// Enables verbose mode
    #[clap(short, long, global = true, takes_value = false)]
    verbose: bool,
    /// Path of the configuration file
    #[clap(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decodes a signed raw transaction and recovers its sender
    Decode {
        /// Raw transaction in hexadecimal
        raw: String,
        /// Prints the report on a single line
        #[clap(long, takes_value = false)]
        compress: bool,
        /// Only prints the encoded fields, also accepting unsigned transactions
        #[clap(long, takes_value = false)]
        rlp: bool,
    },
    /// Converts between hexadecimal and chain addresses
    Convert {
        #[clap(required = true)]
        addresses: Vec<String>,
        /// Chain ID of the chain addresses, instead of the configured one
        #[clap(long)]
        chain_id: Option<u64>,
    },
    /// Converts an amount between units
    Unit {
        amount: String,
        #[clap(long)]
        from: String,
        #[clap(long)]
        to: String,
    },
    /// Signs the transaction described by a JSON file
    Sign {
        transaction: PathBuf,
        /// Output path, `<transaction>.sign` by default
        #[clap(long)]
        out: Option<PathBuf>,
        /// Environment variable holding the secret key
        #[clap(long, default_value = SECRET_KEY_ENV)]
        key_env: String,
        /// Environment variable holding the passphrase
        #[clap(long, default_value = PASSPHRASE_ENV)]
        passphrase_env: String,
    },
    /// Recovers the signer of a proof-of-authority block header in JSON
    BlockSigner { header: PathBuf },
    /// Builds a batch of payments from `address,amount` lines
    Batch {
        batch: PathBuf,
        /// Nonce of the first payment
        #[clap(long)]
        nonce: u64,
        #[clap(long, default_value_t = DEFAULT_GAS_PRICE)]
        gas_price: u64,
        #[clap(long, default_value_t = MIN_GAS_LIMIT)]
        gas: u64,
        /// Environment variable holding the secret key; signs the batch when
        /// given
        #[clap(long)]
        key_env: Option<String>,
        /// Environment variable holding the passphrase
        #[clap(long, default_value = PASSPHRASE_ENV)]
        passphrase_env: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logger(args.verbose)?;

    let config = Config::load(&args.config)?;
    log::debug!(
        "Using chain {:?} ({}), wallet {}, RPC {}",
        config.chain,
        config.chain_id,
        config.wallet_path.display(),
        config.rpc_url
    );

    run(args.command, &config)
}

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

pub fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(level))
        .map_err(|error| anyhow!(error))
}

fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Decode { raw, compress, rlp } => {
            let raw = hex::decode(raw.trim()).context("Raw transaction is not valid hex")?;
            let json = if rlp {
                let fields = TransactionFields::from_raw(&raw, config.unit_names())?;
                to_json(&fields, compress)?
            } else {
                let decoded = DecodedTransaction::from_raw(&raw, config.unit_names())?;
                to_json(&decoded, compress)?
            };
            println!("{json}");
        }
        Command::Convert {
            addresses,
            chain_id,
        } => {
            let chain_id = chain_id.map_or(Ok(config.chain_id), ChainId::try_from)?;
            for address in addresses {
                println!("{address} -> {}", convert_address(&address, chain_id)?);
            }
        }
        Command::Unit { amount, from, to } => {
            println!("{}", convert_amount(&amount, &from, &to, config.unit_names())?);
        }
        Command::Sign {
            transaction,
            out,
            key_env,
            passphrase_env,
        } => {
            let file = TransactionFile::read(&transaction)?;
            let (from, request) = file.to_request(config.unit_names())?;
            if config.pay_from.is_some_and(|pay_from| pay_from != from) {
                log::warn!("Signing for {from}, not the configured pay.from account");
            }

            let key_store = unlocked_key_store(&key_env, &passphrase_env, &from)?;
            let signed = sign_request(request, &key_store, &from)?;

            let out = out.unwrap_or_else(|| sign_file_path(&transaction));
            std::fs::write(&out, hex::encode_prefixed(signed.encode()))
                .with_context(|| format!("Failed to write {}", out.display()))?;

            log::info!("Wrote signed transaction to {}", out.display());
            println!("{}", signed.transaction_hash());
        }
        Command::BlockSigner { header } => {
            let contents = std::fs::read_to_string(&header)
                .with_context(|| format!("Failed to read {}", header.display()))?;
            let header: BlockHeader =
                serde_json::from_str(&contents).context("Malformed block header")?;

            let signer = recover_block_signer(&header)?;
            println!(
                "Block {} signed by {signer} ({})",
                header.number,
                to_chain_address(config.chain_id, &signer)
            );
            if let Some(proposal) = header.clique_proposal() {
                println!("Proposal: {proposal:?}");
            }
        }
        Command::Batch {
            batch,
            nonce,
            gas_price,
            gas,
            key_env,
            passphrase_env,
        } => {
            let contents = std::fs::read_to_string(&batch)
                .with_context(|| format!("Failed to read {}", batch.display()))?;
            let payments = parse_batch(&contents, config.chain_id)?;

            let batch = build_batch(
                &payments,
                &BatchParameters {
                    chain_id: config.chain_id,
                    nonce,
                    gas_price: U256::from(gas_price),
                    gas_limit: gas.max(MIN_GAS_LIMIT),
                },
            )?;

            let unit_names = config.unit_names();
            let display_unit = config.pay_unit.or(Some(Unit::Display));
            println!("Transactions: {}", batch.requests.len());
            println!(
                "Total value: {}",
                format_with_unit(batch.total_value, display_unit, unit_names)
            );
            println!(
                "Total gas cost: {}",
                format_with_unit(batch.total_gas_cost, display_unit, unit_names)
            );

            if let Some(key_env) = key_env {
                let from = secret_key_address(&key_env)?;
                let key_store = unlocked_key_store(&key_env, &passphrase_env, &from)?;
                for request in batch.requests {
                    let signed = sign_request(request, &key_store, &from)?;
                    println!("{}", hex::encode_prefixed(signed.encode()));
                }
            }
        }
    }

    Ok(())
}

fn to_json(value: &impl serde::Serialize, compress: bool) -> serde_json::Result<String> {
    if compress {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn sign_file_path(transaction: &Path) -> PathBuf {
    let mut path = transaction.as_os_str().to_owned();
    path.push(".sign");
    PathBuf::from(path)
}

fn read_secret_key(key_env: &str) -> anyhow::Result<newcmd_signer::SecretKey> {
    let secret_key = std::env::var(key_env)
        .with_context(|| format!("Environment variable {key_env} is not set"))?;

    // This is the only place where secret keys are parsed from strings.
    #[allow(deprecated)]
    let secret_key = secret_key_from_str(DangerousSecretKeyStr(&secret_key))?;
    Ok(secret_key)
}

fn secret_key_address(key_env: &str) -> anyhow::Result<Address> {
    let secret_key = read_secret_key(key_env)?;
    Ok(newcmd_signer::secret_key_to_address(&secret_key))
}

/// Loads the secret key from `key_env` and unlocks the account of `from`.
fn unlocked_key_store(
    key_env: &str,
    passphrase_env: &str,
    from: &Address,
) -> anyhow::Result<InMemoryKeyStore> {
    let passphrase = std::env::var(passphrase_env).unwrap_or_default();

    let mut key_store = InMemoryKeyStore::new();
    key_store.insert(read_secret_key(key_env)?, passphrase.as_str());
    key_store
        .unlock(from, &passphrase)
        .with_context(|| format!("Failed to unlock {from}"))?;

    Ok(key_store)
}
