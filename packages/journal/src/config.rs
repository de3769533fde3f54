//! # Journal configuration from environment variables
//!
//! Everything deployment-specific (the admin secret, which collection to read, who may
//! read it) is resolved once at startup into a [`JournalConfig`]. Nothing is compiled
//! into the source.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `JOURNAL_ADMIN_SECRET` | plaintext admin secret | unset |
//! | `JOURNAL_ADMIN_SECRET_HASH` | Argon2id PHC hash of the secret, wins over the plaintext | unset |
//! | `JOURNAL_COLLECTION` | collection name | `texts` |
//! | `JOURNAL_READ_POLICY` | `open` or `require-sign-in` | `require-sign-in` |
//! | `JOURNAL_AUTH_TOKEN` | custom sign-in token, anonymous sign-in otherwise | unset |
//! | `JOURNAL_DEFAULT_IMAGE_URL` | placeholder image | [`store::DEFAULT_IMAGE_URL`] |
//! | `JOURNAL_LOCALE` | `pt-PT` or `en` | `pt-PT` |
//! | `JOURNAL_DATA_DIR` | directory for the file-backed store | platform data dir |
//! | `JOURNAL_TITLE` | page heading | `Fragments` |
//! | `JOURNAL_AUTHOR` | byline under the heading | empty |
//!
//! With no secret at all the gate is [`Locked`] and the journal is read-only.
//!
//! [`JournalConfig::from_build_env`] bakes values into the binary, so it only takes the
//! hash. A plaintext `JOURNAL_ADMIN_SECRET` present at build time is refused with
//! [`ConfigError::PlaintextSecretInBundle`]. `web --hash-secret <secret>` prints the
//! hash to use instead.

use std::path::PathBuf;
use std::str::FromStr;

use crate::admin::{AnyCredential, HashedSecret, Locked, SharedSecret};
use crate::dates::Locale;
use crate::error::ConfigError;

const ADMIN_SECRET: &str = "JOURNAL_ADMIN_SECRET";

/// Only whether the plaintext was set is kept; the value itself never reaches the binary.
const BUILD_HAS_PLAINTEXT_SECRET: bool = match option_env!("JOURNAL_ADMIN_SECRET") {
    Some(secret) => !secret.is_empty(),
    None => false,
};

/// Whether snapshots wait for a signed-in identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Subscribe as soon as the journal starts.
    Open,
    /// Subscribe once an identity (anonymous is fine) is established.
    #[default]
    RequireSignIn,
}

impl FromStr for ReadPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "require-sign-in" | "require_sign_in" | "signed-in" => Ok(Self::RequireSignIn),
            _ => Err(ConfigError::InvalidValue {
                name: "JOURNAL_READ_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

/// Application configuration resolved at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct JournalConfig {
    pub credential: AnyCredential,
    pub collection: String,
    pub read_policy: ReadPolicy,
    pub auth_token: Option<String>,
    pub default_image_url: String,
    pub locale: Locale,
    pub data_dir: Option<PathBuf>,
    pub title: String,
    pub author: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            credential: AnyCredential::Locked(Locked),
            collection: "texts".to_string(),
            read_policy: ReadPolicy::default(),
            auth_token: None,
            default_image_url: store::DEFAULT_IMAGE_URL.to_string(),
            locale: Locale::default(),
            data_dir: None,
            title: "Fragments".to_string(),
            author: String::new(),
        }
    }
}

impl JournalConfig {
    /// Read configuration from the process environment, loading `.env` first.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration captured from the build environment. Used where there is no
    /// process environment at run time, as in the browser.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_bundle(BUILD_HAS_PLAINTEXT_SECRET, |name| {
            let value = match name {
                "JOURNAL_ADMIN_SECRET_HASH" => option_env!("JOURNAL_ADMIN_SECRET_HASH"),
                "JOURNAL_COLLECTION" => option_env!("JOURNAL_COLLECTION"),
                "JOURNAL_READ_POLICY" => option_env!("JOURNAL_READ_POLICY"),
                "JOURNAL_AUTH_TOKEN" => option_env!("JOURNAL_AUTH_TOKEN"),
                "JOURNAL_DEFAULT_IMAGE_URL" => option_env!("JOURNAL_DEFAULT_IMAGE_URL"),
                "JOURNAL_LOCALE" => option_env!("JOURNAL_LOCALE"),
                "JOURNAL_DATA_DIR" => option_env!("JOURNAL_DATA_DIR"),
                "JOURNAL_TITLE" => option_env!("JOURNAL_TITLE"),
                "JOURNAL_AUTHOR" => option_env!("JOURNAL_AUTHOR"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Like [`from_lookup`](Self::from_lookup) for values that end up inside a shipped
    /// bundle: the plaintext secret is never read and its presence is an error.
    fn from_bundle(
        plaintext_set: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if plaintext_set {
            return Err(ConfigError::PlaintextSecretInBundle);
        }
        Self::from_lookup(|name| if name == ADMIN_SECRET { None } else { lookup(name) })
    }

    /// Build configuration from any key/value source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let credential = match (
            get("JOURNAL_ADMIN_SECRET_HASH"),
            get(ADMIN_SECRET),
        ) {
            (Some(phc), _) => AnyCredential::Hashed(HashedSecret::new(phc.trim()).map_err(
                |_| ConfigError::InvalidValue {
                    name: "JOURNAL_ADMIN_SECRET_HASH",
                    value: phc.clone(),
                },
            )?),
            (None, Some(secret)) => AnyCredential::Shared(SharedSecret::new(secret)),
            (None, None) => {
                tracing::warn!("no admin secret configured, journal is read-only");
                AnyCredential::Locked(Locked)
            }
        };

        let collection = get("JOURNAL_COLLECTION")
            .map(|c| c.trim().to_string())
            .unwrap_or(defaults.collection);
        if collection.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                name: "JOURNAL_COLLECTION",
                value: collection,
            });
        }

        let read_policy = get("JOURNAL_READ_POLICY")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();
        let locale = get("JOURNAL_LOCALE")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            credential,
            collection,
            read_policy,
            auth_token: get("JOURNAL_AUTH_TOKEN"),
            default_image_url: get("JOURNAL_DEFAULT_IMAGE_URL")
                .unwrap_or(defaults.default_image_url),
            locale,
            data_dir: get("JOURNAL_DATA_DIR").map(PathBuf::from),
            title: get("JOURNAL_TITLE").unwrap_or(defaults.title),
            author: get("JOURNAL_AUTHOR").unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::{hash_secret, CredentialCheck};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = JournalConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.collection, "texts");
        assert_eq!(config.read_policy, ReadPolicy::RequireSignIn);
        assert_eq!(config.default_image_url, store::DEFAULT_IMAGE_URL);
        assert_eq!(config.locale, Locale::PtPt);
        assert!(config.auth_token.is_none());
        assert!(matches!(config.credential, AnyCredential::Locked(_)));
    }

    #[test]
    fn test_plain_secret() {
        let config = JournalConfig::from_lookup(lookup(&[
            ("JOURNAL_ADMIN_SECRET", "23872387"),
            ("JOURNAL_COLLECTION", "textos"),
            ("JOURNAL_READ_POLICY", "open"),
            ("JOURNAL_LOCALE", "en"),
        ]))
        .unwrap();
        assert!(config.credential.verify("23872387").unwrap());
        assert_eq!(config.collection, "textos");
        assert_eq!(config.read_policy, ReadPolicy::Open);
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_hash_wins_over_plaintext() {
        let phc = hash_secret("from-hash").unwrap();
        let config = JournalConfig::from_lookup(lookup(&[
            ("JOURNAL_ADMIN_SECRET", "from-plain"),
            ("JOURNAL_ADMIN_SECRET_HASH", &phc),
        ]))
        .unwrap();
        assert!(config.credential.verify("from-hash").unwrap());
        assert!(!config.credential.verify("from-plain").unwrap());
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config =
            JournalConfig::from_lookup(lookup(&[("JOURNAL_ADMIN_SECRET", ""), ("JOURNAL_TITLE", " ")]))
                .unwrap();
        assert!(matches!(config.credential, AnyCredential::Locked(_)));
        assert_eq!(config.title, "Fragments");
    }

    #[test]
    fn test_bundle_refuses_plaintext_secret() {
        let err = JournalConfig::from_bundle(true, lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::PlaintextSecretInBundle);
        assert!(err.to_string().contains("JOURNAL_ADMIN_SECRET_HASH"));
    }

    #[test]
    fn test_bundle_only_reads_the_hash() {
        let config =
            JournalConfig::from_bundle(false, lookup(&[("JOURNAL_ADMIN_SECRET", "23872387")]))
                .unwrap();
        assert!(matches!(config.credential, AnyCredential::Locked(_)));

        let phc = hash_secret("23872387").unwrap();
        let config = JournalConfig::from_bundle(
            false,
            lookup(&[("JOURNAL_ADMIN_SECRET_HASH", &phc), ("JOURNAL_TITLE", "Textos")]),
        )
        .unwrap();
        assert!(matches!(config.credential, AnyCredential::Hashed(_)));
        assert!(config.credential.verify("23872387").unwrap());
        assert_eq!(config.title, "Textos");
    }

    #[test]
    fn test_invalid_values() {
        let err = JournalConfig::from_lookup(lookup(&[("JOURNAL_READ_POLICY", "sometimes")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "JOURNAL_READ_POLICY",
                value: "sometimes".to_string()
            }
        );

        assert!(JournalConfig::from_lookup(lookup(&[("JOURNAL_ADMIN_SECRET_HASH", "nope")])).is_err());
        assert!(JournalConfig::from_lookup(lookup(&[("JOURNAL_COLLECTION", "a/b")])).is_err());
    }
}
