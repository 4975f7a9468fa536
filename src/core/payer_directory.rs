//! Customer to payer identifier lookup
//!
//! The external gateway identifies payers by an email-like address while the
//! contract identifies them by customer id. `PayerDirectory` bridges the two:
//! any customer id resolves, falling back to a synthesized address when the
//! customer has no entry.

use std::fmt;

/// Domain used to synthesize payer ids for unmapped customers
pub const DEFAULT_PAYER_DOMAIN: &str = "example.nl";

/// Ordered table of customer id to payer id
///
/// Insertion order is preserved: `first()` returns the earliest entry that was
/// added, which the gateway adapter relies on for refunds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayerDirectory {
    entries: Vec<(String, String)>,
    fallback_domain: String,
}

impl PayerDirectory {
    /// Create an empty directory using `fallback_domain` for unmapped customers
    pub fn empty(fallback_domain: &str) -> Self {
        PayerDirectory {
            entries: Vec::new(),
            fallback_domain: fallback_domain.to_string(),
        }
    }

    /// Add or replace the payer id for `customer_id`
    ///
    /// Replacing an existing entry keeps its position.
    pub fn insert(&mut self, customer_id: &str, payer_id: &str) {
        match self.entries.iter_mut().find(|(c, _)| c == customer_id) {
            Some(entry) => entry.1 = payer_id.to_string(),
            None => self
                .entries
                .push((customer_id.to_string(), payer_id.to_string())),
        }
    }

    /// Builder-style variant of `insert`
    pub fn with_payer(mut self, customer_id: &str, payer_id: &str) -> Self {
        self.insert(customer_id, payer_id);
        self
    }

    /// Payer id registered for `customer_id`, if any
    pub fn get(&self, customer_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == customer_id)
            .map(|(_, p)| p.as_str())
    }

    /// Resolve `customer_id` to a payer id
    ///
    /// Unmapped customers resolve to `<customer_id>@<fallback_domain>`.
    pub fn resolve(&self, customer_id: &str) -> String {
        match self.get(customer_id) {
            Some(payer_id) => payer_id.to_string(),
            None => format!("{}@{}", customer_id, self.fallback_domain),
        }
    }

    /// Payer id of the earliest entry
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(_, p)| p.as_str())
    }

    pub fn fallback_domain(&self) -> &str {
        &self.fallback_domain
    }

    /// Replace the domain used for unmapped customers
    pub fn with_fallback_domain(mut self, fallback_domain: &str) -> Self {
        self.fallback_domain = fallback_domain.to_string();
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PayerDirectory {
    /// The demo customer table
    fn default() -> Self {
        PayerDirectory::empty(DEFAULT_PAYER_DOMAIN)
            .with_payer("CUST001", "klant1@example.nl")
            .with_payer("CUST002", "klant2@example.nl")
            .with_payer("CUST003", "klant3@example.nl")
    }
}

/// A `CUSTOMER=PAYER` pair, as accepted on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayerMapping {
    pub customer_id: String,
    pub payer_id: String,
}

impl std::str::FromStr for PayerMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (customer_id, payer_id) = s
            .split_once('=')
            .ok_or_else(|| format!("expected CUSTOMER=PAYER, got '{}'", s))?;
        let customer_id = customer_id.trim();
        let payer_id = payer_id.trim();

        if customer_id.is_empty() || payer_id.is_empty() {
            return Err(format!("customer and payer must be non-empty in '{}'", s));
        }

        Ok(PayerMapping {
            customer_id: customer_id.to_string(),
            payer_id: payer_id.to_string(),
        })
    }
}

impl fmt::Display for PayerMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.customer_id, self.payer_id)
    }
}
