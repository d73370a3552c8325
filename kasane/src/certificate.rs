//! In-memory X.509 certificate.

use kasane_pem::{FromPem, Label, Pem, ToPem};
use rustls_pki_types::CertificateDer;
use x509_parser::certificate::X509Certificate;
use x509_parser::parse_x509_certificate;

use crate::error::{Error, Result};

/// A DER-encoded certificate that is known to parse as X.509.
///
/// Only the encoding is checked; nothing about the certificate's signature or
/// its place in a trust hierarchy is verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
}

impl Certificate {
    pub fn from_der(der: impl Into<Vec<u8>>) -> Result<Self> {
        let der = der.into();
        parse(&der)?;
        Ok(Certificate { der })
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    pub fn into_der(self) -> Vec<u8> {
        self.der
    }

    /// Subject distinguished name in RFC 4514 form.
    pub fn subject(&self) -> Result<String> {
        parse(&self.der).map(|cert| cert.subject().to_string())
    }

    /// Issuer distinguished name in RFC 4514 form.
    pub fn issuer(&self) -> Result<String> {
        parse(&self.der).map(|cert| cert.issuer().to_string())
    }
}

fn parse(der: &[u8]) -> Result<X509Certificate<'_>> {
    let (rest, cert) =
        parse_x509_certificate(der).map_err(|e| Error::CertificateDecode(format!("{}", e)))?;
    if !rest.is_empty() {
        return Err(Error::CertificateDecode(format!(
            "{} trailing bytes after certificate",
            rest.len()
        )));
    }
    Ok(cert)
}

impl ToPem for Certificate {
    type Error = Error;

    fn pem_label(&self) -> Label {
        Label::Certificate
    }

    fn to_pem(&self) -> Result<Pem> {
        Ok(Pem::from_bytes(self.pem_label(), &self.der))
    }
}

impl FromPem for Certificate {
    type Error = Error;

    fn expected_label() -> Label {
        Label::Certificate
    }

    fn from_pem(pem: &Pem) -> Result<Self> {
        if pem.label() != &Self::expected_label() {
            return Err(Error::InvalidInput(format!(
                "expected a {} block, got {}",
                Self::expected_label(),
                pem.label()
            )));
        }
        let der = pem
            .contents()
            .map_err(|e| Error::CertificateDecode(format!("{}", e)))?;
        Certificate::from_der(der)
    }
}

/// Converts a `CertificateDer` to a `Certificate`.
impl TryFrom<CertificateDer<'_>> for Certificate {
    type Error = Error;

    fn try_from(cert_der: CertificateDer<'_>) -> Result<Self> {
        Certificate::from_der(cert_der.as_ref())
    }
}

/// Converts a `&Certificate` to a `CertificateDer<'static>`.
impl From<&Certificate> for CertificateDer<'static> {
    fn from(cert: &Certificate) -> Self {
        CertificateDer::from(cert.der.clone())
    }
}

impl From<Certificate> for CertificateDer<'static> {
    fn from(cert: Certificate) -> Self {
        CertificateDer::from(cert.der)
    }
}
