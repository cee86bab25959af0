// crates/patterns-contract/src/tls.rs
// ============================================================================
// Module: Sandbox TLS
// Description: Client TLS configuration for the loopback sandbox.
// Purpose: Verify certificate chains while optionally skipping the hostname check.
// Dependencies: rustls, rustls-pki-types, webpki-roots, thiserror
// ============================================================================

//! ## Overview
//! The sandbox is reached at a loopback address while presenting the
//! production certificate, so its name never matches the connected host.
//! [`HostnameRelaxedVerifier`] wraps the standard WebPKI verifier and accepts
//! exactly one failure: the certificate not being valid for the server name.
//! Chain, expiry, and signature checks still apply.
//! Invariants:
//! - Relaxation is opt-in per [`ClientConfig`]; no process-wide default changes.
//! - Any error other than a name mismatch is returned unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;

use rustls::CertificateError;
use rustls::ClientConfig;
use rustls::DigitallySignedStruct;
use rustls::RootCertStore;
use rustls::SignatureScheme;
use rustls::client::WebPkiServerVerifier;
use rustls::client::danger::HandshakeSignatureValid;
use rustls::client::danger::ServerCertVerified;
use rustls::client::danger::ServerCertVerifier;
use rustls::crypto::CryptoProvider;
use rustls_pki_types::CertificateDer;
use rustls_pki_types::ServerName;
use rustls_pki_types::UnixTime;
use rustls_pki_types::pem::PemObject;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building the client TLS configuration.
#[derive(Debug, Error)]
pub enum TlsError {
    /// CA bundle could not be read.
    #[error("failed to read CA bundle {path}: {source}")]
    ReadCaFile {
        /// Path of the bundle.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// CA bundle is not valid PEM or holds no certificates.
    #[error("invalid CA bundle {path}: {reason}")]
    InvalidCaFile {
        /// Path of the bundle.
        path: String,
        /// Parse failure description.
        reason: String,
    },
    /// Certificate verifier could not be constructed.
    #[error("failed to build certificate verifier: {0}")]
    Verifier(String),
    /// rustls rejected the configuration.
    #[error("tls configuration rejected: {0}")]
    Config(#[from] rustls::Error),
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// WebPKI verifier that tolerates a certificate/hostname mismatch.
#[derive(Debug)]
pub struct HostnameRelaxedVerifier {
    /// Standard verifier doing the actual chain validation.
    inner: Arc<WebPkiServerVerifier>,
}

impl HostnameRelaxedVerifier {
    /// Builds a relaxed verifier trusting `roots`.
    ///
    /// # Errors
    ///
    /// Returns [`TlsError::Verifier`] when the root store is empty or the
    /// verifier cannot be constructed.
    pub fn new(roots: RootCertStore) -> Result<Self, TlsError> {
        let inner = WebPkiServerVerifier::builder_with_provider(Arc::new(roots), crypto_provider())
            .build()
            .map_err(|err| TlsError::Verifier(err.to_string()))?;
        Ok(Self {
            inner,
        })
    }
}

impl ServerCertVerifier for HostnameRelaxedVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        // The name check runs after chain validation, so a name error means the
        // chain itself was accepted.
        match self.inner.verify_server_cert(
            end_entity,
            intermediates,
            server_name,
            ocsp_response,
            now,
        ) {
            Err(rustls::Error::InvalidCertificate(
                CertificateError::NotValidForName | CertificateError::NotValidForNameContext { .. },
            )) => Ok(ServerCertVerified::assertion()),
            other => other,
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Returns the crypto provider used for every client config built here.
fn crypto_provider() -> Arc<CryptoProvider> {
    Arc::new(rustls::crypto::ring::default_provider())
}

/// Builds a root store with the bundled WebPKI roots plus any certificates
/// in `ca_file`.
///
/// # Errors
///
/// Returns [`TlsError`] when the bundle cannot be read, parsed, or added.
pub fn root_store(ca_file: Option<&Path>) -> Result<RootCertStore, TlsError> {
    let mut roots = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };
    let Some(path) = ca_file else {
        return Ok(roots);
    };
    let label = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| TlsError::ReadCaFile {
        path: label.clone(),
        source,
    })?;
    let mut added = 0usize;
    for cert in CertificateDer::pem_slice_iter(&bytes) {
        let cert = cert.map_err(|err| TlsError::InvalidCaFile {
            path: label.clone(),
            reason: err.to_string(),
        })?;
        roots.add(cert)?;
        added += 1;
    }
    if added == 0 {
        return Err(TlsError::InvalidCaFile {
            path: label,
            reason: "no certificates found".to_string(),
        });
    }
    Ok(roots)
}

/// Builds the client TLS configuration.
///
/// With `verify_hostname = false` the returned config uses
/// [`HostnameRelaxedVerifier`]; otherwise it uses the standard verifier.
///
/// # Errors
///
/// Returns [`TlsError`] when roots or the verifier cannot be built.
pub fn client_config(verify_hostname: bool, ca_file: Option<&Path>) -> Result<ClientConfig, TlsError> {
    let roots = root_store(ca_file)?;
    let builder =
        ClientConfig::builder_with_provider(crypto_provider()).with_safe_default_protocol_versions()?;
    let config = if verify_hostname {
        let verifier = WebPkiServerVerifier::builder_with_provider(Arc::new(roots), crypto_provider())
            .build()
            .map_err(|err| TlsError::Verifier(err.to_string()))?;
        builder.with_webpki_verifier(verifier).with_no_client_auth()
    } else {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(HostnameRelaxedVerifier::new(roots)?))
            .with_no_client_auth()
    };
    Ok(config)
}
