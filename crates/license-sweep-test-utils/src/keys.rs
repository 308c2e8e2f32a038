//! RSA signing key fixtures
//!
//! Throwaway 2048-bit keys generated for tests only.

use std::path::PathBuf;
use tempfile::TempDir;

/// PKCS#8 (`BEGIN PRIVATE KEY`) test key
pub const TEST_KEY_PEM: &str = include_str!("../fixtures/test_key.pem");

/// PKCS#1 (`BEGIN RSA PRIVATE KEY`) test key
pub const TEST_KEY_PKCS1_PEM: &str = include_str!("../fixtures/test_key_pkcs1.pem");

/// Write `pem` into a fresh temporary directory.
///
/// The file is removed when the returned directory is dropped.
pub fn write_key_file(pem: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("oci_api_key.pem");
    std::fs::write(&path, pem)?;
    Ok((dir, path))
}
