//! Command line wallet for the Pigeonium ledger service.

use anyhow::Result;
use colored::Colorize;
use pigeonium_cli::commands::history::HistoryArgs;
use pigeonium_cli::commands::{
    address, balance, call, currency, deploy, export_key, history, import_key, info, init_wallet,
    send, transaction,
};
use pigeonium_cli::{default_wallet_path, resolve_config};
use pigeonium_core::types::format_amount;
use pigeonium_core::Transaction;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the wallet.
#[derive(Debug, StructOpt)]
#[structopt(name = "pigeonium", about = "Pigeonium ledger wallet")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the wallet file
    #[structopt(short, long, parse(from_os_str))]
    wallet: Option<PathBuf>,

    /// Node to connect to
    #[structopt(short, long)]
    node: Option<String>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for the wallet.
#[derive(Debug, StructOpt)]
enum Command {
    /// Create a new wallet from a random mnemonic
    #[structopt(name = "init-wallet")]
    InitWallet {
        /// Account index to derive
        #[structopt(long, default_value = "0")]
        account: u32,
    },

    /// Import an existing private key or mnemonic
    #[structopt(name = "import-key")]
    ImportKey {
        /// Hex encoded private key
        #[structopt(long)]
        private_key: Option<String>,

        /// BIP-39 mnemonic phrase
        #[structopt(long)]
        mnemonic: Option<String>,

        /// Account index to derive from the mnemonic
        #[structopt(long, default_value = "0")]
        account: u32,
    },

    /// Show the wallet's secret key material
    #[structopt(name = "export-key")]
    ExportKey,

    /// Show the wallet address
    #[structopt(name = "address")]
    Address,

    /// Show the network parameters of the node
    #[structopt(name = "info")]
    Info,

    /// Get balances of the wallet or another address
    #[structopt(name = "balance")]
    Balance {
        /// Address to query instead of the wallet's
        #[structopt(long)]
        address: Option<String>,

        /// Only this currency
        #[structopt(long)]
        currency: Option<String>,
    },

    /// Send a currency to another address
    #[structopt(name = "send")]
    Send {
        /// Recipient address
        #[structopt(long)]
        to: String,

        /// Amount in the smallest unit
        #[structopt(long)]
        amount: String,

        /// Currency id, the base currency by default
        #[structopt(long)]
        currency: Option<String>,

        /// Fee in the smallest unit
        #[structopt(long, default_value = "0")]
        fee: String,

        /// Hex encoded input data
        #[structopt(long)]
        data: Option<String>,
    },

    /// Call a deployed contract
    #[structopt(name = "call")]
    Call {
        /// Contract address
        #[structopt(long)]
        contract: String,

        /// Hex encoded call data
        #[structopt(long)]
        data: Option<String>,

        /// Amount sent along with the call
        #[structopt(long, default_value = "0")]
        amount: String,

        /// Currency id, the base currency by default
        #[structopt(long)]
        currency: Option<String>,
    },

    /// Deploy a contract script
    #[structopt(name = "deploy")]
    Deploy {
        /// Path to the script source
        #[structopt(long, parse(from_os_str))]
        script: PathBuf,
    },

    /// Look up a currency
    #[structopt(name = "currency")]
    Currency {
        #[structopt(long)]
        id: Option<String>,

        #[structopt(long)]
        name: Option<String>,

        #[structopt(long)]
        symbol: Option<String>,

        #[structopt(long)]
        issuer: Option<String>,
    },

    /// Show a transaction by indexId
    #[structopt(name = "transaction")]
    Transaction {
        #[structopt(long)]
        index: u64,
    },

    /// List transactions
    #[structopt(name = "history")]
    History(HistoryArgs),
}

fn print_transaction(tx: &Transaction) {
    println!("{}", tx);
    if let Some(timestamp) = tx.timestamp {
        println!("  {} {}", "timestamp:".dimmed(), timestamp);
    }
    if !tx.input_data.is_empty() {
        println!("  {} {}", "inputData:".dimmed(), hex::encode(&tx.input_data));
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let opt = Opt::from_args();
    let config = resolve_config(opt.config.as_deref(), opt.node)?;
    let wallet_file = opt.wallet.unwrap_or_else(default_wallet_path);

    match opt.cmd {
        Command::InitWallet { account } => {
            let (address, mnemonic) = init_wallet::run(&wallet_file, account)?;
            println!("{} {}", "Wallet initialized:".green(), wallet_file.display());
            println!("{} {}", "Address:".green(), address);
            println!("{} {}", "Mnemonic:".green(), mnemonic);
            println!("{}", "WARNING: Write down the mnemonic and keep it private!".red());
        }
        Command::ImportKey {
            private_key,
            mnemonic,
            account,
        } => {
            let address = import_key::run(
                &wallet_file,
                private_key.as_deref(),
                mnemonic.as_deref(),
                account,
            )?;
            println!("{} {}", "Wallet imported:".green(), address);
        }
        Command::ExportKey => {
            let exported = export_key::run(&wallet_file)?;
            println!("{} {}", "Private key:".green(), exported.private_key);
            if let Some(mnemonic) = exported.mnemonic {
                println!("{} {}", "Mnemonic:".green(), mnemonic);
                println!("{} {}", "Account:".green(), exported.account_index);
            }
            println!("{}", "WARNING: Keep this key safe and private!".red());
        }
        Command::Address => {
            let address = address::run(&wallet_file)?;
            println!("{} {}", "Address:".green(), address);
        }
        Command::Info => {
            let network = info::run(&config)?;
            println!("{}", network);
        }
        Command::Balance { address, currency } => {
            let (owner, balances) =
                balance::run(&config, &wallet_file, address.as_deref(), currency.as_deref())?;
            println!("{} {}", "Address:".green(), owner);
            if balances.is_empty() {
                println!("{}", "No balances".yellow());
            }
            for (currency_id, amount) in balances {
                println!("{} {}", currency_id, format_amount(amount));
            }
        }
        Command::Send {
            to,
            amount,
            currency,
            fee,
            data,
        } => {
            let tx = send::run(
                &config,
                &wallet_file,
                &to,
                &amount,
                currency.as_deref(),
                &fee,
                data.as_deref(),
            )?;
            println!("{}", "Transaction accepted:".green());
            print_transaction(&tx);
        }
        Command::Call {
            contract,
            data,
            amount,
            currency,
        } => {
            let tx = call::run(
                &config,
                &wallet_file,
                &contract,
                &amount,
                currency.as_deref(),
                data.as_deref(),
            )?;
            println!("{}", "Contract called:".green());
            print_transaction(&tx);
        }
        Command::Deploy { script } => {
            let deployed = deploy::run(&config, &wallet_file, &script)?;
            println!("{} {}", "Contract deployed:".green(), deployed.address);
            print_transaction(&deployed.transaction);
        }
        Command::Currency {
            id,
            name,
            symbol,
            issuer,
        } => {
            let currency = currency::run(
                &config,
                id.as_deref(),
                name.as_deref(),
                symbol.as_deref(),
                issuer.as_deref(),
            )?;
            println!("{}", currency);
        }
        Command::Transaction { index } => {
            let tx = transaction::run(&config, index)?;
            print_transaction(&tx);
        }
        Command::History(args) => {
            let transactions = history::run(&config, &wallet_file, &args)?;
            if transactions.is_empty() {
                println!("{}", "No transactions".yellow());
            }
            for tx in &transactions {
                print_transaction(tx);
            }
        }
    }

    Ok(())
}
