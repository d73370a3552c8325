//! Bundle parser.
//!
//! Reads concatenated PEM blocks into a [`Collection`]. `CERTIFICATE` blocks
//! are decoded and kept in bundle order, private key blocks are kept
//! verbatim and everything else is skipped. Roles are assigned afterwards by
//! [`ChainOrderPolicy::arrange`].

use kasane_pem::{FromPem, Label, Pem, ToPem};
use tracing::{debug, trace, warn};

use crate::certificate::Certificate;
use crate::collection::Collection;
use crate::error::Result;
use crate::policy::ChainOrderPolicy;

#[derive(Debug, Default)]
struct Scan {
    certificates: Vec<Certificate>,
    private_key: Option<Pem>,
    private_keys: usize,
    skipped: usize,
}

/// Parses a PEM bundle.
///
/// Scanning stops silently at the end of the input or at the first block
/// that cannot be read, so trailing garbage is ignored. When several private
/// key blocks are present the last one wins.
///
/// # Errors
///
/// [`Error::CertificateDecode`](crate::Error::CertificateDecode) when a
/// `CERTIFICATE` block does not hold an X.509 certificate. Nothing is
/// returned in that case.
pub fn parse_bundle(input: &[u8], policy: ChainOrderPolicy) -> Result<Collection> {
    let text = String::from_utf8_lossy(input);
    let scan = kasane_pem::blocks(&text)
        .enumerate()
        .try_fold(Scan::default(), classify)?;

    if scan.private_keys > 1 {
        warn!(
            count = scan.private_keys,
            "bundle carries more than one private key, keeping the last"
        );
    }
    debug!(
        certificates = scan.certificates.len(),
        private_key = scan.private_key.is_some(),
        skipped = scan.skipped,
        %policy,
        "parsed PEM bundle"
    );

    let mut collection = Collection::default();
    if let Some((leaf, chain)) = policy.arrange(scan.certificates) {
        collection.certificate = Some(leaf.to_pem()?.to_string());
        for element in &chain {
            collection.add_chain_element(Some(element))?;
        }
    }
    collection.private_key = scan.private_key.map(|pem| pem.to_string());
    Ok(collection)
}

fn classify(mut scan: Scan, (index, block): (usize, Pem)) -> Result<Scan> {
    match block.label() {
        Label::Certificate => {
            let certificate = Certificate::from_pem(&block)?;
            trace!(index, "certificate block");
            scan.certificates.push(certificate);
        }
        label if label.is_private_key() => {
            trace!(index, %label, "private key block");
            scan.private_keys += 1;
            scan.private_key = Some(block);
        }
        label => {
            trace!(index, %label, "skipping block");
            scan.skipped += 1;
        }
    }
    Ok(scan)
}

impl Collection {
    /// See [`parse_bundle`].
    pub fn from_bundle(input: &[u8], policy: ChainOrderPolicy) -> Result<Self> {
        parse_bundle(input, policy)
    }
}
