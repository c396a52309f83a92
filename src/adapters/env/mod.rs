//! Environment-variable serialization boundary.

mod profile_env;

pub use profile_env::{env_key, parse_env, render_env_file};
