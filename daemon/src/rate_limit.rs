use governor::{clock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use std::num::NonZeroU32;

use crate::config::RateLimitConfig;

/// Token bucket guarding the IPC socket against command floods.
///
/// Capture bridges can push recognition events quickly, so every incoming
/// command takes a token before it reaches the daemon state.
pub struct CommandRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, clock::DefaultClock>,
    enabled: bool,
}

impl CommandRateLimiter {
    /// Create a limiter allowing `commands_per_second` sustained with bursts of
    /// up to `burst_capacity`.
    ///
    /// Fails when either value is 0.
    pub fn new(
        commands_per_second: u32,
        burst_capacity: u32,
        enabled: bool,
    ) -> anyhow::Result<Self> {
        let per_second = Self::non_zero("commands_per_second", commands_per_second)?;
        let burst = Self::non_zero("burst_capacity", burst_capacity)?;
        let quota = Quota::per_second(per_second).allow_burst(burst);

        Ok(Self {
            limiter: RateLimiter::direct(quota),
            enabled,
        })
    }

    pub fn from_config(config: &RateLimitConfig) -> anyhow::Result<Self> {
        Self::new(
            config.commands_per_second,
            config.burst_capacity,
            config.enabled,
        )
    }

    /// Immediate check; `false` means the command should be rejected.
    pub fn check(&self) -> bool {
        if !self.enabled {
            return true;
        }

        self.limiter.check().is_ok()
    }

    /// Wait until a token is available.
    pub async fn acquire(&self) -> bool {
        if !self.enabled {
            return true;
        }

        self.limiter.until_ready().await;
        true
    }

    fn non_zero(name: &str, value: u32) -> anyhow::Result<NonZeroU32> {
        NonZeroU32::new(value).ok_or_else(|| anyhow::anyhow!("{} must be non-zero", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_rate_limiter_new() {
        let limiter = CommandRateLimiter::new(10, 20, true).unwrap();
        assert!(limiter.enabled);
    }

    #[test]
    fn test_command_rate_limiter_from_config() {
        let config = RateLimitConfig {
            commands_per_second: 1,
            burst_capacity: 2,
            enabled: true,
        };
        let limiter = CommandRateLimiter::from_config(&config).unwrap();
        assert!(limiter.check());
        assert!(limiter.check());
        assert!(!limiter.check());
    }

    #[test]
    fn test_command_rate_limiter_disabled() {
        let limiter = CommandRateLimiter::new(1, 1, false).unwrap();
        for _ in 0..100 {
            assert!(limiter.check());
        }
    }

    #[test]
    fn test_command_rate_limiter_burst() {
        let limiter = CommandRateLimiter::new(10, 20, true).unwrap();

        for _ in 0..20 {
            assert!(limiter.check(), "Burst capacity should allow 20 requests");
        }

        assert!(!limiter.check(), "Should be rate limited after burst exhausted");
    }

    #[test]
    fn test_command_rate_limiter_zero_commands_per_second() {
        let err = CommandRateLimiter::new(0, 20, true).err().unwrap();
        assert!(err.to_string().contains("commands_per_second must be non-zero"));
    }

    #[test]
    fn test_command_rate_limiter_zero_burst_capacity() {
        let err = CommandRateLimiter::new(10, 0, true).err().unwrap();
        assert!(err.to_string().contains("burst_capacity must be non-zero"));
    }

    #[tokio::test]
    async fn test_command_rate_limiter_acquire() {
        let limiter = CommandRateLimiter::new(10, 20, true).unwrap();
        assert!(limiter.acquire().await);
    }

    #[test]
    fn test_command_rate_limiter_acquire_disabled() {
        let limiter = CommandRateLimiter::new(10, 20, false).unwrap();
        assert!(tokio_test::block_on(limiter.acquire()));
    }
}
