// ============================================================================
// SERVICES MODULE - Acceso HTTP a la API de citas
// ============================================================================

pub mod api_client;

pub use api_client::*;
