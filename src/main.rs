//! Payment Adapter CLI
//!
//! Command-line interface that runs one payment through the selected payment
//! method, prints its status, and optionally refunds it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --amount 49.95
//! cargo run -- --method credit-card --customer CUST123 --amount 50.00
//! cargo run -- --method paypal --amount 100 --refund 25
//! cargo run -- --customer CUST042 --payer CUST042=jan@shop.test --amount 10
//! ```
//!
//! Status lines go to stdout. Processor diagnostics go to stderr through
//! `tracing`; set `RUST_LOG` to change the level (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Payment succeeded (a failed refund is reported but does not change the code)
//! - 1: Payment failed or arguments were invalid

use payment_adapter::cli;
use payment_adapter::logging::TracingLogger;
use payment_adapter::processor::create_processor;
use payment_adapter::SimulatedGateway;
use std::process;
use std::sync::Arc;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let processor = create_processor(
        args.method,
        Arc::new(TracingLogger),
        Arc::new(SimulatedGateway::new()),
        args.to_payer_directory(),
    );

    if !processor.process_payment(&args.customer, args.amount) {
        eprintln!("Error: {} payment for customer {} failed", args.method, args.customer);
        process::exit(1);
    }

    // A successful payment always records its id
    let Some(tx_id) = processor.last_transaction_id() else {
        eprintln!("Error: no transaction id recorded");
        process::exit(1);
    };
    println!("{}", processor.payment_status(&tx_id));

    if let Some(refund) = args.refund {
        if !processor.refund_payment(&tx_id, refund) {
            eprintln!("Error: refund of transaction {} failed", tx_id);
        }
        println!("{}", processor.payment_status(&tx_id));
    }
}
