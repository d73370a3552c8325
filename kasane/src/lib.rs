//! # kasane
//!
//! Certificate collections assembled from PEM bundles.
//!
//! A [`Collection`] holds an end-entity certificate, its chain, one private key
//! and optionally a certificate signing request, all in PEM form. It can be
//! built from in-memory material, read from a bundle of concatenated PEM
//! blocks, written back out as a bundle, and exported to the DER types a
//! rustls based TLS stack loads.
//!
//! ## Chain order
//!
//! A bundle does not say which certificate is which. The caller declares a
//! [`ChainOrderPolicy`] and roles are assigned by position:
//!
//! ```text
//! RootLast:  leaf, intermediate, ..., root
//! RootFirst: root, intermediate, ..., leaf
//! Ignore:    leaf, (everything else is dropped)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use kasane::{Collection, parse_policy};
//!
//! let bundle = std::fs::read("server.pem").unwrap();
//! let policy = parse_policy("root-first");
//! let collection = Collection::from_bundle(&bundle, policy).unwrap();
//! let runtime = collection.to_runtime_certificate().unwrap();
//! assert_eq!(runtime.certificate_chain().len(), 1 + collection.chain().len());
//! ```

pub mod certificate;
pub mod collection;
pub mod error;
pub mod export;
pub mod key;
pub mod parser;
pub mod policy;

pub use certificate::Certificate;
pub use collection::Collection;
pub use error::{Error, Result};
pub use export::RuntimeCertificate;
pub use key::{KeyEncodingError, KeyFormat, PrivateKeyEncoder};
pub use parser::parse_bundle;
pub use policy::{ChainOrderPolicy, parse_policy};

pub use kasane_pem as pem;
