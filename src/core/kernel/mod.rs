/// Transport kernel - exchange-agnostic HTTP layer
///
/// The kernel contains only transport logic and generic interfaces: a
/// [`RestClient`] trait with a reqwest-backed implementation, and a
/// [`Signer`] trait for pluggable request authentication. Exchange-specific
/// code lives entirely in the connector modules and reaches the wire through
/// these seams.
///
/// # Key Principles
///
/// 1. **Transport Only**: the kernel contains NO exchange-specific logic
/// 2. **Pluggable**: authentication is injected as a trait object
/// 3. **Type Safe**: strong typing throughout with proper error handling
/// 4. **Observable**: tracing spans on every request
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
