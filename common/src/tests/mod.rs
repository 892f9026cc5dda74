#[cfg(feature = "context")]
mod context;
