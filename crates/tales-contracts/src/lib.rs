//! Trait-only contracts for the collaborators the JWT/capability core
//! requires but does not implement.
//!
//! Nothing in this crate performs I/O; every trait describes a shape a
//! hosting service implements, grounded in `toka-runtime::Runtime`'s
//! lifecycle (`start`/`stop`, `async-trait`) and `toka-config-cli::ConfigError`'s
//! structured configuration-error style. Unlike
//! `tales-claims`/`tales-jwt`/`tales-capability`, this crate keeps
//! `async-trait` in its dependency graph on purpose — the collaborators it
//! describes (an HTTP connector, a lifecycle state machine, file-based
//! config loading, TLS keystore loading) are genuinely I/O-bound, unlike
//! the synchronous core. `tokio` itself is only a dev-dependency: these
//! traits never drive a runtime directly, only this crate's own
//! `#[tokio::test]`s do.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use async_trait::async_trait;
use tales_capability::AccessControlDeclaration;
use tales_claims::GenerationConfig;

/// Where a `ConfigSource` implementation should find the signing secret.
/// Describing the *shape* only — no file or environment access happens in
/// this crate.
#[derive(Debug, Clone)]
pub enum SecretLocation {
    /// The secret bytes, already resolved (e.g. by a test harness).
    Inline(Vec<u8>),
    /// Read from an environment variable by this name.
    EnvVar(String),
    /// Read from a file at this path.
    File(PathBuf),
}

/// A single claim name → capability family name binding, as a
/// configuration loader would read it from a settings file before handing
/// it to `tales_capability::AuthorizationRegistry::register_claim_family`
/// (which needs the actual, constructed `CapabilityFamily`, not just its
/// name — resolving `family_name` to a family is the loader's job).
#[derive(Debug, Clone)]
pub struct ClaimFamilyBinding {
    pub claim_name: String,
    pub family_name: String,
}

/// Everything the JWT/capability core needs from configuration, independent
/// of where that configuration actually lives.
#[derive(Debug, Clone)]
pub struct TalesSettings {
    pub secret_location: SecretLocation,
    pub default_generation_config: GenerationConfig,
    pub claim_family_bindings: Vec<ClaimFamilyBinding>,
}

/// Supplies a [`TalesSettings`] value. A real implementation would layer
/// `config`/`toml`/environment sources the way `toka-config-cli` does;
/// that layering is explicitly out of scope here.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Load settings, or fail with whatever `anyhow::Error` the
    /// implementation's underlying source produces (file-not-found,
    /// parse error, validation error — see `toka-config-cli::ConfigError`
    /// for the shape a concrete implementation's errors would take).
    async fn load(&self) -> anyhow::Result<TalesSettings>;
}

/// A TLS certificate/key pair, PEM-encoded.
#[derive(Debug, Clone)]
pub struct TlsIdentity {
    pub certificate_chain_pem: Vec<u8>,
    pub private_key_pem: Vec<u8>,
}

/// Loads the keystore the HTTP connector terminates TLS with. Out of scope
/// for this crate's own logic — described only so a real connector can be
/// written against a stable contract.
#[async_trait]
pub trait KeystoreLoader: Send + Sync {
    async fn load_tls_identity(&self) -> anyhow::Result<TlsIdentity>;
}

/// The lifecycle phases a hosting service moves a component through.
/// Mirrors `toka-runtime::Runtime`'s implicit start/running/stop states,
/// made explicit here since this crate only describes the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStatus {
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// A component the hosting service starts and stops as a unit (the HTTP
/// connector, the token manager's background maintenance if any exists,
/// etc).
#[async_trait]
pub trait ServiceLifecycle: Send + Sync {
    async fn start(&self) -> anyhow::Result<()>;
    async fn stop(&self) -> anyhow::Result<()>;
    fn status(&self) -> LifecycleStatus;
}

/// Registers the declarative `{claim_name, capabilities}` requirements for
/// each protected operation, and looks them up by operation id when a
/// request arrives. Registration/lookup is synchronous — only the hosting
/// service's surrounding request dispatch is async.
pub trait ContractRegistry: Send + Sync {
    fn register_operation(&mut self, operation_id: &str, declarations: Vec<AccessControlDeclaration>);
    fn declarations_for(&self, operation_id: &str) -> Option<&[AccessControlDeclaration]>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticConfigSource(TalesSettings);

    #[async_trait]
    impl ConfigSource for StaticConfigSource {
        async fn load(&self) -> anyhow::Result<TalesSettings> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn config_source_contract_is_callable() {
        let source = StaticConfigSource(TalesSettings {
            secret_location: SecretLocation::EnvVar("TALES_SECRET".to_string()),
            default_generation_config: GenerationConfig::default(),
            claim_family_bindings: vec![],
        });
        let settings = source.load().await.unwrap();
        assert!(matches!(settings.secret_location, SecretLocation::EnvVar(name) if name == "TALES_SECRET"));
    }
}
