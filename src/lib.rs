//! Trajectory of a spacecraft under fixed gravitating bodies, with a heuristic
//! gravity assist on sphere-of-influence entry.
//!
//! The engine lives in the member crates; this façade re-exports them so
//! front-ends (the `simulate` CLI, plotting hosts) depend on a single crate.

pub use slingshot_config as config;
pub use slingshot_core as core;
pub use slingshot_dynamics as dynamics;
pub use slingshot_orbits as orbits;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
