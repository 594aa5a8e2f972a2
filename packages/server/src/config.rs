//! Server configuration.
//!
//! `Default` carries the reference values. The binary overrides them from the
//! command line and calls `validate` before starting.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pong wait must be at least 10ms (got {0:?})")]
    PongWaitTooShort(Duration),

    #[error("maximum message size must be greater than zero")]
    ZeroMessageSize,

    #[error("outbound queue capacity must be greater than zero")]
    ZeroOutboundCapacity,

    #[error("OTP sweep interval must be greater than zero")]
    ZeroSweepInterval,

    #[error("OTP sweep interval ({sweep:?}) must be shorter than the retention window ({retention:?})")]
    SweepNotShorterThanRetention { sweep: Duration, retention: Duration },

    #[error("at least one allowed origin is required")]
    NoAllowedOrigins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// How long a connection may go without a heartbeat reply.
    pub pong_wait: Duration,
    /// Largest inbound message accepted, in bytes.
    pub max_message_size: usize,
    /// Capacity of each connection's outbound queue.
    pub outbound_capacity: usize,
    /// Lifetime of an unused one-time password.
    pub otp_retention: Duration,
    pub otp_sweep_interval: Duration,
    /// Values accepted in the upgrade request's `Origin` header.
    pub allowed_origins: Vec<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            pong_wait: Duration::from_secs(10),
            max_message_size: 512,
            outbound_capacity: 256,
            otp_retention: Duration::from_secs(5),
            otp_sweep_interval: Duration::from_millis(400),
            allowed_origins: vec!["http://localhost:8080".to_string()],
        }
    }
}

impl RelayConfig {
    /// Heartbeat probe interval: 90% of `pong_wait`, so a probe always goes
    /// out before the peer's read deadline.
    pub fn ping_interval(&self) -> Duration {
        self.pong_wait * 9 / 10
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pong_wait < Duration::from_millis(10) {
            return Err(ConfigError::PongWaitTooShort(self.pong_wait));
        }
        if self.max_message_size == 0 {
            return Err(ConfigError::ZeroMessageSize);
        }
        if self.outbound_capacity == 0 {
            return Err(ConfigError::ZeroOutboundCapacity);
        }
        if self.otp_sweep_interval.is_zero() {
            return Err(ConfigError::ZeroSweepInterval);
        }
        if self.otp_sweep_interval >= self.otp_retention {
            return Err(ConfigError::SweepNotShorterThanRetention {
                sweep: self.otp_sweep_interval,
                retention: self.otp_retention,
            });
        }
        if self.allowed_origins.is_empty() {
            return Err(ConfigError::NoAllowedOrigins);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        // given (前提条件):
        let config = RelayConfig::default();

        // when (操作):
        let result = config.validate();

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        assert_eq!(config.ping_interval(), Duration::from_secs(9));
    }

    #[test]
    fn test_ping_interval_is_shorter_than_pong_wait() {
        // テスト項目: ping 間隔は常に pong 待ち時間より短い
        // given (前提条件):
        let config = RelayConfig {
            pong_wait: Duration::from_millis(300),
            ..RelayConfig::default()
        };

        // when (操作):
        let interval = config.ping_interval();

        // then (期待する結果):
        assert_eq!(interval, Duration::from_millis(270));
        assert!(interval < config.pong_wait);
    }

    #[test]
    fn test_sweep_must_be_shorter_than_retention() {
        // given (前提条件):
        let config = RelayConfig {
            otp_sweep_interval: Duration::from_secs(5),
            ..RelayConfig::default()
        };

        // when (操作):
        let result = config.validate();

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ConfigError::SweepNotShorterThanRetention { .. })
        ));
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        // given (前提条件):
        let no_messages = RelayConfig {
            max_message_size: 0,
            ..RelayConfig::default()
        };
        let no_queue = RelayConfig {
            outbound_capacity: 0,
            ..RelayConfig::default()
        };
        let no_origins = RelayConfig {
            allowed_origins: Vec::new(),
            ..RelayConfig::default()
        };

        // when (操作) / then (期待する結果):
        assert_eq!(no_messages.validate(), Err(ConfigError::ZeroMessageSize));
        assert_eq!(no_queue.validate(), Err(ConfigError::ZeroOutboundCapacity));
        assert_eq!(no_origins.validate(), Err(ConfigError::NoAllowedOrigins));
    }
}
