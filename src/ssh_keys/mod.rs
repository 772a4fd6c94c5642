//! GitHub SSH key management
//!
//! The device accepts SSH logins with whatever public keys the configured
//! GitHub account publishes. This module fetches them, stores them in the
//! parameter store and reports status for display.

pub mod authorized;
mod fetcher;
mod source;

pub use authorized::KeySummary;
pub use fetcher::{FetchOutcome, FetchSession, KeyDisplay, SessionId, SshKeyFetcher, FETCH_TIMEOUT};
pub use source::{FetchError, GithubKeySource, KeySource, GITHUB_BASE_URL};
