//! Parsing of the stored authorized-keys blob

use serde::Serialize;
use ssh_key::{HashAlg, PublicKey};
use tracing::warn;

/// Display form of one public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySummary {
    /// e.g. "ssh-ed25519"
    pub algorithm: String,
    /// "SHA256:..." fingerprint
    pub fingerprint: String,
    pub comment: String,
}

/// Parse every non-empty line of `blob` as an OpenSSH public key.
/// Lines that do not parse are skipped.
pub fn summarize(blob: &str) -> Vec<KeySummary> {
    blob.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match PublicKey::from_openssh(line) {
            Ok(key) => Some(KeySummary {
                algorithm: key.algorithm().to_string(),
                fingerprint: key.fingerprint(HashAlg::Sha256).to_string(),
                comment: key.comment().to_string(),
            }),
            Err(e) => {
                warn!(error = %e, "skipping unparsable key line");
                None
            }
        })
        .collect()
}

/// Number of non-blank lines, i.e. keys as the service reports them
pub fn count_lines(blob: &str) -> usize {
    blob.lines().filter(|l| !l.trim().is_empty()).count()
}
