//! nem-multisig: headless driver for the convert/modify multisig form

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Result, WrapErr};

use nem_multisig_adapters::{
    AdapterConfig, AddressBookAdapter, ConfirmationAdapter, EstimationAdapter, MessageAdapter,
    SystemClockAdapter, WalletAdapter,
};
use nem_multisig_core::{FormConfig, ModificationForm};

mod script;

use script::{FormEvent, Session};

#[derive(Parser)]
#[command(name = "nem-multisig")]
#[command(version)]
#[command(about = "Run a scripted session against the multisig modification form", long_about = None)]
struct Cli {
    /// Wallet snapshot (JSON)
    #[arg(short, long)]
    wallet: PathBuf,

    /// Form events to replay (JSON array)
    #[arg(short, long)]
    script: PathBuf,

    /// Answer fee estimates locally with this fee (micro-XEM) instead of calling NCC
    #[arg(long)]
    offline_fee: Option<u64>,

    /// Keep pumping estimate responses for this long after the last event
    #[arg(long, default_value = "0")]
    settle_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting nem-multisig");

    let wallet_json = fs::read_to_string(&cli.wallet)
        .wrap_err_with(|| format!("failed to read wallet snapshot {}", cli.wallet.display()))?;
    let wallet = WalletAdapter::from_json(&wallet_json)?;

    let script_json = fs::read_to_string(&cli.script)
        .wrap_err_with(|| format!("failed to read script {}", cli.script.display()))?;
    let events: Vec<FormEvent> =
        serde_json::from_str(&script_json).wrap_err("invalid session script")?;

    let estimation = match cli.offline_fee {
        Some(_) => EstimationAdapter::manual(),
        None => EstimationAdapter::with_config(&AdapterConfig::from_env())?,
    };
    let address_book = AddressBookAdapter::new(wallet.snapshot().address_book.clone());
    let form = ModificationForm::new(
        wallet,
        estimation,
        ConfirmationAdapter::default(),
        MessageAdapter::default(),
        address_book,
        SystemClockAdapter,
        FormConfig::default(),
    );

    let mut session = Session::new(form, cli.offline_fee);
    session.run(&events)?;
    session.wait(cli.settle_ms)?;

    if let Some(request) = session.submitted() {
        tracing::info!(
            account = %request.account,
            fee = request.fee,
            "modification ready for confirmation"
        );
    }

    let output = match session.form().confirmation.payload()? {
        Some(payload) => serde_json::to_string_pretty(&payload)?,
        None => {
            tracing::warn!("no modification was submitted; printing form state");
            serde_json::to_string_pretty(&session.form().state().snapshot())?
        }
    };
    println!("{output}");
    Ok(())
}
