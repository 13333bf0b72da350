pub mod commands;
mod email;
mod environment;

pub const fn veil_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
