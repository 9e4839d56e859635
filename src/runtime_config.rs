//! Environment variable-based configuration for runtime behavior.
//!
//! ## `FLATROUTE_STACK_SIZE`
//!
//! Sets the stack size for handler coroutines. Accepts decimal (`65536`) or
//! hexadecimal (`0x10000`) values. Default: `0x10000` (64 KB).
//!
//! Larger stacks support deeper call chains; smaller stacks reduce memory
//! usage when many coroutines are alive at once.

use std::env;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup using [`RuntimeConfig::from_env()`] before spawning
/// any handler coroutines.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Stack size for handler coroutines in bytes (default: 64 KB / 0x10000)
    pub stack_size: usize,
}

const DEFAULT_STACK_SIZE: usize = 0x10000;

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = match env::var("FLATROUTE_STACK_SIZE") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(DEFAULT_STACK_SIZE)
                } else {
                    val.parse().unwrap_or(DEFAULT_STACK_SIZE)
                }
            }
            Err(_) => DEFAULT_STACK_SIZE,
        };
        RuntimeConfig { stack_size }
    }
}
