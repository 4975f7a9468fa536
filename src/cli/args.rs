use crate::core::{PayerDirectory, PayerMapping, DEFAULT_PAYER_DOMAIN};
use crate::processor::PaymentMethod;
use clap::Parser;
use rust_decimal::Decimal;

/// Run a payment through the selected payment method
#[derive(Parser, Debug)]
#[command(name = "payment-adapter")]
#[command(about = "Process a payment, report its status and optionally refund it", long_about = None)]
pub struct CliArgs {
    /// Payment method used to process the payment
    #[arg(
        long = "method",
        value_name = "METHOD",
        default_value = "paypal",
        help = "Payment method: 'credit-card' or 'paypal'"
    )]
    pub method: PaymentMethod,

    /// Customer charged for the payment
    #[arg(
        long = "customer",
        value_name = "ID",
        default_value = "CUST001",
        help = "Customer id to charge"
    )]
    pub customer: String,

    /// Amount to charge
    #[arg(long = "amount", value_name = "AMOUNT", help = "Amount to charge, e.g. 49.95")]
    pub amount: Decimal,

    /// Amount to refund once the payment succeeded
    #[arg(
        long = "refund",
        value_name = "AMOUNT",
        help = "Refund this amount after the payment succeeds"
    )]
    pub refund: Option<Decimal>,

    /// Additional or replacement payer mappings
    #[arg(
        long = "payer",
        value_name = "CUSTOMER=EMAIL",
        help = "Map a customer id to a gateway payer id (repeatable)"
    )]
    pub payers: Vec<PayerMapping>,

    /// Domain for customers without a payer mapping
    #[arg(
        long = "payer-domain",
        value_name = "DOMAIN",
        default_value = DEFAULT_PAYER_DOMAIN,
        help = "Domain used to synthesize payer ids for unmapped customers"
    )]
    pub payer_domain: String,
}

impl CliArgs {
    /// Create a PayerDirectory from CLI arguments
    ///
    /// Starts from the default customer table and applies every `--payer`
    /// mapping in order. Mappings for known customers replace the entry in
    /// place; new customers are appended.
    ///
    /// # Returns
    ///
    /// A `PayerDirectory` using `--payer-domain` for unmapped customers.
    pub fn to_payer_directory(&self) -> PayerDirectory {
        let mut directory = PayerDirectory::default().with_fallback_domain(&self.payer_domain);
        for mapping in &self.payers {
            directory.insert(&mapping.customer_id, &mapping.payer_id);
        }
        directory
    }
}
