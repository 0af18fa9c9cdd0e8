// src/tls.rs
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use std::sync::Arc;

use crate::config::TlsConfig;
use crate::errors::{HarnessError, Result};

/// Builds the rustls server config from the PEM key/certificate pair.
pub fn load_rustls_config(tls: &TlsConfig) -> Result<rustls::ServerConfig> {
    let certs = CertificateDer::pem_file_iter(&tls.cert_path)
        .and_then(|certs| certs.collect::<std::result::Result<Vec<_>, _>>())
        .map_err(|e| {
            HarnessError::Config(format!(
                "Failed to read certificate {}: {}",
                tls.cert_path.display(),
                e
            ))
        })?;
    if certs.is_empty() {
        return Err(HarnessError::Config(format!(
            "No certificates found in {}",
            tls.cert_path.display()
        )));
    }

    let key = PrivateKeyDer::from_pem_file(&tls.key_path).map_err(|e| {
        HarnessError::Config(format!(
            "Failed to read private key {}: {}",
            tls.key_path.display(),
            e
        ))
    })?;

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| HarnessError::Config(format!("TLS setup failed: {}", e)))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| HarnessError::Config(format!("Invalid TLS key/certificate: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let tls = TlsConfig {
            enabled: true,
            key_path: dir.path().join("key.pem"),
            cert_path: dir.path().join("cert.pem"),
        };
        let err = load_rustls_config(&tls).unwrap_err();
        assert!(err.to_string().contains("cert.pem"));
    }

    #[test]
    fn test_empty_certificate_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cert_path = dir.path().join("cert.pem");
        std::fs::write(&cert_path, "").unwrap();
        let tls = TlsConfig {
            enabled: true,
            key_path: dir.path().join("key.pem"),
            cert_path,
        };
        let err = load_rustls_config(&tls).unwrap_err();
        assert!(err.to_string().contains("No certificates"));
    }
}
