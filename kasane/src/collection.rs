//! PEM collection.
//!
//! A [`Collection`] holds the textual PEM form of an end-entity certificate,
//! its chain, a private key and a certificate signing request. Material is
//! only decoded when it is exported.

use kasane_pem::{Pem, ToPem};
use serde::{Deserialize, Serialize};

use crate::certificate::Certificate;
use crate::error::{Error, Result};
use crate::key::{KeyFormat, PrivateKeyEncoder};
use crate::policy::ChainOrderPolicy;

/// Certificate, chain, private key and CSR in PEM form.
///
/// Serializes to a record with `Certificate`, `PrivateKey`, `Chain` and
/// `CSR` fields; empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "Certificate", default, skip_serializing_if = "Option::is_none")]
    pub(crate) certificate: Option<String>,
    #[serde(rename = "PrivateKey", default, skip_serializing_if = "Option::is_none")]
    pub(crate) private_key: Option<String>,
    #[serde(rename = "Chain", default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) chain: Vec<String>,
    #[serde(rename = "CSR", default, skip_serializing_if = "Option::is_none")]
    pub(crate) csr: Option<String>,
}

impl Collection {
    /// Builds a collection from an in-memory certificate and signing key.
    ///
    /// Either may be omitted. The key block is password-protected when
    /// `key_password` is not empty.
    ///
    /// # Errors
    ///
    /// [`Error::KeyEncoding`] when the key cannot be encoded.
    pub fn new(
        certificate: Option<&Certificate>,
        signing_key: Option<&dyn PrivateKeyEncoder>,
        key_password: &[u8],
        format: KeyFormat,
    ) -> Result<Self> {
        let certificate = certificate
            .map(|cert| cert.to_pem().map(|pem| pem.to_string()))
            .transpose()?;
        let private_key = signing_key
            .map(|key| encode_private_key(key, key_password, format))
            .transpose()?;
        Ok(Collection {
            certificate,
            private_key,
            ..Default::default()
        })
    }

    /// Adds the private key. A collection holds at most one.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] when a key is already present,
    /// [`Error::KeyEncoding`] when the key cannot be encoded. The collection
    /// is left unchanged on error.
    pub fn add_private_key(
        &mut self,
        signing_key: &dyn PrivateKeyEncoder,
        key_password: &[u8],
        format: KeyFormat,
    ) -> Result<()> {
        if self.private_key.is_some() {
            return Err(Error::DuplicateKey);
        }
        self.private_key = Some(encode_private_key(signing_key, key_password, format)?);
        Ok(())
    }

    /// Appends a certificate to the chain. Call order is chain order.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when no certificate is given.
    pub fn add_chain_element(&mut self, certificate: Option<&Certificate>) -> Result<()> {
        let certificate = certificate
            .ok_or_else(|| Error::InvalidInput("certificate cannot be absent".to_string()))?;
        let pem = certificate.to_pem()?;
        self.chain.push(pem.to_string());
        Ok(())
    }

    /// Stores a `CERTIFICATE REQUEST` block.
    pub fn set_csr(&mut self, csr: &Pem) -> Result<()> {
        if !csr.label().is_certificate_request() {
            return Err(Error::InvalidInput(format!(
                "expected a certificate request, got {}",
                csr.label()
            )));
        }
        if self.csr.is_some() {
            return Err(Error::InvalidInput(
                "the collection can only contain one certificate request".to_string(),
            ));
        }
        self.csr = Some(csr.to_string());
        Ok(())
    }

    pub fn certificate(&self) -> Option<&str> {
        self.certificate.as_deref()
    }

    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref()
    }

    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    pub fn csr(&self) -> Option<&str> {
        self.csr.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.certificate.is_none()
            && self.private_key.is_none()
            && self.chain.is_empty()
            && self.csr.is_none()
    }

    /// Concatenates the certificate, chain and private key into a bundle
    /// laid out for `policy`.
    ///
    /// - `RootLast`: certificate, chain, key
    /// - `RootFirst`: chain, certificate, key
    /// - `Ignore`: certificate, key
    ///
    /// The CSR is not part of the bundle. Reading the bundle back with
    /// [`Collection::from_bundle`] and the same policy yields the same
    /// certificate, chain and key.
    pub fn to_pem_bundle(&self, policy: ChainOrderPolicy) -> String {
        let certificate = self.certificate.iter().map(String::as_str);
        let chain = self.chain.iter().map(String::as_str);
        let mut parts: Vec<&str> = match policy {
            ChainOrderPolicy::RootLast => certificate.chain(chain).collect(),
            ChainOrderPolicy::RootFirst => chain.chain(certificate).collect(),
            ChainOrderPolicy::Ignore => certificate.collect(),
        };
        parts.extend(self.private_key.as_deref());
        parts.concat()
    }
}

fn encode_private_key(
    signing_key: &dyn PrivateKeyEncoder,
    key_password: &[u8],
    format: KeyFormat,
) -> Result<String> {
    let password = (!key_password.is_empty()).then_some(key_password);
    let pem = signing_key.encode_private_key(password, format)?;
    Ok(pem.to_string())
}
