//! Helper functions for environment variables

use aurora_rpc_client::AuroraNetwork;

/// Returns the value of the environment variable, or `None` if it is not
/// defined.
///
/// # Panics
///
/// Panics if the variable is defined but empty or not valid unicode.
fn get_non_empty_env_var(name: &'static str) -> Option<String> {
    let result = std::env::var_os(name)?
        .into_string()
        .expect("Couldn't convert OsString into a String");
    if result.is_empty() {
        panic!("{name} environment variable is empty")
    } else {
        Some(result)
    }
}

/// Returns the Aurora JSON-RPC URL used by tests against a live network.
///
/// Reads the `AURORA_URL` environment variable and falls back to the public
/// mainnet endpoint.
pub fn get_aurora_url() -> String {
    get_non_empty_env_var("AURORA_URL")
        .unwrap_or_else(|| AuroraNetwork::Mainnet.http_url().to_string())
}
