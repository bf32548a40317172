/*! Integration tests for HealthConnect.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - account: Signup, login, logout and persistence through AccountDirectory
 * - store: Store implementations exercised through the directory
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("healthconnect=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod account;
mod store;
