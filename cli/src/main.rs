//! Demo CLI — drives the WebLN client against a stub wallet provider.
//!
//! The stand-in for the original browser demo page: each subcommand is one of
//! the page's actions. The wallet is simulated; pass `--no-provider` to see
//! the not-available flow.

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use webln_client::{ScrollPayer, WeblnClient};
use webln_provider::{HostBindings, StubProvider};
use webln_utils::{
    fiat_to_sats, is_valid_lightning_invoice, is_valid_node_pubkey, sats_to_fiat,
};

/// Pubkey receiving scroll payments. Configurable via `--recipient`.
const SCROLL_RECIPIENT: &str = "03e7156ae33b0a208d0744199163177e909e80176e55d97a2f221ede0f934dd9ad";

#[derive(Parser)]
#[command(name = "webln-cli", about = "WebLN demo client")]
struct Cli {
    /// Simulate an environment with no wallet extension installed.
    #[arg(long, env = "WEBLN_NO_PROVIDER")]
    no_provider: bool,

    /// Name the simulated wallet reports.
    #[arg(long, default_value = "Demo Wallet", env = "WEBLN_PROVIDER_NAME")]
    provider_name: String,

    /// Simulate a wallet without keysend support.
    #[arg(long, env = "WEBLN_NO_KEYSEND")]
    no_keysend: bool,

    /// Make the simulated wallet reject the enable handshake with this message.
    #[arg(long, env = "WEBLN_FAIL_ENABLE")]
    fail_enable: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Connect and show wallet info.
    Info,
    /// Create an invoice.
    Invoice {
        /// Amount in sats.
        amount: u64,
        /// Memo (defaults to one derived from the amount).
        #[arg(long)]
        memo: Option<String>,
    },
    /// Pay a BOLT-11 invoice.
    Pay {
        /// The payment request string.
        invoice: String,
    },
    /// Keysend to a node pubkey.
    Keysend {
        /// Destination pubkey (66 hex chars).
        pubkey: String,
        /// Amount in sats.
        amount: u64,
        /// Custom TLV record key (requires --custom-value).
        #[arg(long)]
        custom_key: Option<String>,
        /// Custom TLV record value (requires --custom-key).
        #[arg(long)]
        custom_value: Option<String>,
    },
    /// Pay a Lightning Address.
    PayAddress {
        /// The address, e.g. user@example.com.
        address: String,
        /// Amount in sats.
        amount: u64,
    },
    /// Convert between fiat and sats at the built-in rates.
    Convert {
        /// Fiat amount.
        amount: f64,
        /// Currency code: USD, EUR, GBP, or JPY.
        #[arg(default_value = "USD")]
        currency: String,
    },
    /// Simulate scroll events against the pay-per-scroll cooldown.
    Scroll {
        /// Number of scroll events to fire.
        #[arg(default_value_t = 10)]
        events: u64,
        /// Milliseconds between events.
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
        /// Recipient pubkey.
        #[arg(long, default_value = SCROLL_RECIPIENT)]
        recipient: String,
    },
}

fn build_bindings(cli: &Cli) -> HostBindings {
    if cli.no_provider {
        return HostBindings::empty();
    }
    let mut stub = StubProvider::new().named(cli.provider_name.clone());
    if !cli.no_keysend {
        stub = stub.with_keysend();
    }
    if let Some(message) = &cli.fail_enable {
        stub = stub.failing_enable(message.clone());
    }
    HostBindings::empty().with_webln(Arc::new(stub))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    webln_utils::init_tracing();

    let cli = Cli::parse();
    let client = Arc::new(WeblnClient::new(build_bindings(&cli))?);

    match cli.command {
        Command::Info => {
            if let Some(info) = client.get_info().await {
                println!("alias:  {}", info.node.alias.as_deref().unwrap_or("-"));
                println!("pubkey: {}", info.node.pubkey.as_deref().unwrap_or("-"));
                if let Some(methods) = &info.methods {
                    println!("methods: {}", methods.join(", "));
                }
            }
            let status = client.status().await;
            println!(
                "status: enabled={} connected={} provider={}",
                status.enabled,
                status.connected,
                status.provider.as_deref().unwrap_or("-"),
            );
        }
        Command::Invoice { amount, memo } => {
            if let Some(invoice) = client.make_invoice(amount, memo.as_deref()).await {
                println!("{}", invoice.payment_request);
            }
        }
        Command::Pay { invoice } => {
            if !is_valid_lightning_invoice(&invoice) {
                anyhow::bail!("not a valid Lightning invoice: {invoice:?}");
            }
            if let Some(result) = client.send_payment(&invoice).await {
                println!("preimage: {}", result.preimage);
            }
        }
        Command::Keysend {
            pubkey,
            amount,
            custom_key,
            custom_value,
        } => {
            if !is_valid_node_pubkey(&pubkey) {
                anyhow::bail!("not a valid node pubkey: {pubkey:?}");
            }
            if amount == 0 {
                anyhow::bail!("amount must be positive");
            }
            let result = client
                .keysend(&pubkey, amount, custom_key.as_deref(), custom_value.as_deref())
                .await;
            if let Some(result) = result {
                println!("preimage: {}", result.preimage);
            }
        }
        Command::PayAddress { address, amount } => {
            if !webln_utils::is_valid_lightning_address(&address) {
                anyhow::bail!("not a valid Lightning Address: {address:?}");
            }
            if let Some(result) = client.pay_via_address(&address, amount).await {
                println!("preimage: {}", result.preimage);
            }
        }
        Command::Convert { amount, currency } => {
            let sats = fiat_to_sats(amount, &currency)?;
            let back = sats_to_fiat(sats, &currency)?;
            println!(
                "{amount} {} = {} sats (≈ {back} {} back)",
                currency.to_uppercase(),
                webln_utils::currency::format_number(sats),
                currency.to_uppercase(),
            );
        }
        Command::Scroll {
            events,
            interval_ms,
            recipient,
        } => {
            if !is_valid_node_pubkey(&recipient) {
                anyhow::bail!("not a valid recipient pubkey: {recipient:?}");
            }
            let payer = ScrollPayer::new(client.clone(), recipient);
            for i in 0..events {
                let paid = payer.on_scroll().await;
                tracing::info!("scroll {} -> {}", i + 1, if paid { "paid" } else { "dropped" });
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
            }
            println!(
                "scrolls paid: {} ({} sats total)",
                payer.recent_scrolls(),
                payer.total_paid_sats(),
            );
        }
    }

    Ok(())
}
