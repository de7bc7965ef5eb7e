use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use synthbill::core::{
    AllocatorConfig, DAILY_PAYMENT_CAP, DateStrategy, InvoiceConfig, InvoiceConfigBuilder,
    MAX_INVOICE_VALUE, MIN_INVOICE_VALUE, Party, RosterConfig, SeededRandom, Sizing,
};
use synthbill::generate::{billable_total, generate_ledger, generate_roster};
use synthbill::payments::PaymentAllocator;
use synthbill::tabular::{read_balances, read_receivables, write_invoices, write_payments};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "synthbill", version, about = "Synthetic invoice ledgers and payment schedules")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bill every party down to zero and write the invoice ledger
    Generate(GenerateArgs),
    /// Split an invoice ledger into capped daily payments
    Payments(PaymentArgs),
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Strategy {
    Stepped,
    WeightedPool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SizingArg {
    ValueFirst,
    QuantityFirst,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// First possible invoice date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Last possible invoice date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// First invoice sequence number
    #[arg(long, default_value_t = 1)]
    first_number: u64,

    #[arg(long, default_value = "WHOLE PADDY GRAINS")]
    product: String,

    #[arg(long, default_value = "22.00")]
    min_rate: Decimal,

    #[arg(long, default_value = "23.00")]
    max_rate: Decimal,

    /// Minimum margin percentage
    #[arg(long, default_value = "2.25")]
    min_margin: Decimal,

    /// Maximum margin percentage
    #[arg(long, default_value = "2.65")]
    max_margin: Decimal,

    #[arg(long, default_value_t = MIN_INVOICE_VALUE)]
    min_invoice: Decimal,

    #[arg(long, default_value_t = MAX_INVOICE_VALUE)]
    max_invoice: Decimal,

    /// Seed for a reproducible run; random when omitted
    #[arg(long, env = "SYNTHBILL_SEED")]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Strategy::Stepped)]
    strategy: Strategy,

    /// Largest date step for the stepped strategy
    #[arg(long, default_value_t = 10)]
    max_step: u32,

    #[arg(long, value_enum, default_value_t = SizingArg::ValueFirst)]
    sizing: SizingArg,

    /// Headerless `name,balance` file (default stdin)
    #[arg(long, conflicts_with = "total")]
    parties: Option<PathBuf>,

    /// Synthesize parties sharing this total instead of reading balances
    #[arg(long, requires = "party_limit")]
    total: Option<Decimal>,

    /// Largest balance of a synthesized party
    #[arg(long, requires = "total")]
    party_limit: Option<Decimal>,

    /// Normalize party names to carry this prefix
    #[arg(long)]
    party_prefix: Option<String>,

    /// Output file (default stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PaymentArgs {
    /// Invoice ledger CSV (default stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Most a party may be paid on one day
    #[arg(long, default_value_t = DAILY_PAYMENT_CAP)]
    daily_cap: Decimal,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json)?;

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Payments(args) => payments(args),
    }
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = invoice_config(&args).context("invalid generation parameters")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "starting generation run");
    let mut rng = SeededRandom::from_seed(seed);

    let parties: Vec<Party> = match (args.total, args.party_limit) {
        (Some(total), Some(limit)) => {
            let roster = RosterConfig::new(total, limit).context("invalid roster parameters")?;
            generate_roster(&roster, config.min_invoice_value, &mut rng)
                .context("failed to synthesize parties")?
        }
        _ => read_balances(open_input(args.parties.as_ref())?)
            .context("failed to read party balances")?,
    };
    info!(
        parties = parties.len(),
        billable = %billable_total(&config, &parties),
        "parties loaded"
    );

    let ledger = generate_ledger(&config, parties, &mut rng).context("generation failed")?;

    let mut out = open_output(args.output.as_ref())?;
    write_invoices(&mut out, &ledger).context("failed to write invoices")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn invoice_config(args: &GenerateArgs) -> Result<InvoiceConfig> {
    let defaults = InvoiceConfig::default();
    let date_strategy = match args.strategy {
        Strategy::Stepped => DateStrategy::Stepped {
            max_step: args.max_step,
        },
        Strategy::WeightedPool => DateStrategy::WeightedPool,
    };
    let sizing = match args.sizing {
        SizingArg::ValueFirst => Sizing::ValueFirst,
        SizingArg::QuantityFirst => Sizing::QuantityFirst,
    };

    let mut builder = InvoiceConfigBuilder::new(
        args.start_date.unwrap_or(defaults.start_date),
        args.end_date.unwrap_or(defaults.end_date),
    )
    .first_invoice_number(args.first_number)
    .product(args.product.as_str())
    .rates(args.min_rate, args.max_rate)
    .margins(args.min_margin, args.max_margin)
    .invoice_bounds(args.min_invoice, args.max_invoice)
    .date_strategy(date_strategy)
    .sizing(sizing);
    if let Some(prefix) = &args.party_prefix {
        builder = builder.party_prefix(prefix.as_str());
    }
    Ok(builder.build()?)
}

fn payments(args: PaymentArgs) -> Result<()> {
    let allocator = PaymentAllocator::new(AllocatorConfig::new(args.daily_cap)?)
        .context("invalid daily cap")?;
    let receivables =
        read_receivables(open_input(args.input.as_ref())?).context("failed to read invoices")?;
    let records = allocator
        .allocate(&receivables)
        .context("payment allocation failed")?;

    let mut out = open_output(args.output.as_ref())?;
    write_payments(&mut out, &records).context("failed to write payments")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    })
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}
