pub mod core;

#[cfg(feature = "std")]
pub(crate) mod std;
