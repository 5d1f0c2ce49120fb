use std::path::{Path, PathBuf};

use base64::Engine;
use serde::Serialize;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::keypair::read_keypair_file;

use crate::error::{Error, Result};

pub const DEFAULT_KEYPAIR_PATH: &str = "~/.config/solana/id.json";

/// Expands a leading `~/` to `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => Path::new(&home).join(rest),
        _ => PathBuf::from(path),
    }
}

/// Reads a keypair stored as a JSON array of 64 bytes, the Solana CLI format.
pub fn load_keypair(path: &str) -> Result<Keypair> {
    let resolved = expand_home(path);
    read_keypair_file(&resolved).map_err(|e| Error::InvalidKeypair {
        path: resolved.display().to_string(),
        reason: e.to_string(),
    })
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExportedSecret {
    pub base58: String,
    pub base64: String,
    pub hex: String,
}

impl ExportedSecret {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn export_secret(keypair: &Keypair) -> ExportedSecret {
    let bytes = keypair.to_bytes();
    ExportedSecret {
        base58: keypair.to_base58_string(),
        base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        hex: hex::encode(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;
    use solana_sdk::signer::keypair::write_keypair_file;

    #[test]
    fn test_load_keypair_roundtrips_cli_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let keypair = Keypair::new();
        write_keypair_file(&keypair, &path).unwrap();

        let loaded = load_keypair(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_load_keypair_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = load_keypair(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::InvalidKeypair { .. }));
    }

    #[test]
    fn test_export_secret_encodings() {
        let keypair = Keypair::new();
        let exported = export_secret(&keypair);
        let bytes = keypair.to_bytes();

        assert_eq!(exported.hex.len(), 128);
        assert_eq!(hex::decode(&exported.hex).unwrap(), bytes.to_vec());
        assert_eq!(
            base64::engine::general_purpose::STANDARD
                .decode(&exported.base64)
                .unwrap(),
            bytes.to_vec()
        );
        assert_eq!(bs58::decode(&exported.base58).into_vec().unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_export_secret_json() {
        let exported = export_secret(&Keypair::new());
        let value: serde_json::Value = serde_json::from_str(&exported.to_json().unwrap()).unwrap();
        assert_eq!(value["base58"], exported.base58.as_str());
        assert_eq!(value["base64"], exported.base64.as_str());
        assert_eq!(value["hex"], exported.hex.as_str());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/id.json"), PathBuf::from("/tmp/id.json"));
        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(
                expand_home("~/.config/solana/id.json"),
                Path::new(&home).join(".config/solana/id.json")
            );
        }
    }
}
