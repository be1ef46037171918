//! Reconnection policy for the WebSocket connection.

use std::time::Duration;

/// Fixed delay between a close and the next connection attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// Fixed-delay reconnect policy.
///
/// The delay never grows. By default attempts are unlimited; a cap counts
/// consecutive failures and is reset by every successful open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    delay: Duration,
    max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            delay: RECONNECT_DELAY,
            max_attempts: None,
        }
    }
}

impl ReconnectPolicy {
    pub fn new(delay: Duration, max_attempts: Option<u32>) -> Self {
        Self {
            delay,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Delay before the next attempt.
    ///
    /// # Arguments
    ///
    /// * `failed_attempts` - Consecutive failed attempts so far (0 right after an open socket closes)
    ///
    /// # Returns
    ///
    /// `Some(delay)` if another attempt should be made, `None` once the cap is reached
    pub fn next_delay(&self, failed_attempts: u32) -> Option<Duration> {
        match self.max_attempts {
            Some(max) if failed_attempts >= max => None,
            _ => Some(self.delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_retries_forever_with_fixed_delay() {
        // テスト項目: デフォルトでは 3000ms 固定で無制限に再接続する
        // given (前提条件):
        let policy = ReconnectPolicy::default();

        // when (操作):
        let delays: Vec<_> = [1, 2, 10, 1_000, u32::MAX]
            .into_iter()
            .map(|n| policy.next_delay(n))
            .collect();

        // then (期待する結果):
        assert!(delays.iter().all(|d| *d == Some(Duration::from_millis(3000))));
    }

    #[test]
    fn test_capped_policy_retries_after_clean_close() {
        // テスト項目: 上限 1 でも、接続成功後の切断では再接続する
        // given (前提条件):
        let policy = ReconnectPolicy::new(RECONNECT_DELAY, Some(1));

        // when (操作):
        let after_close = policy.next_delay(0);
        let after_failure = policy.next_delay(1);

        // then (期待する結果):
        assert_eq!(after_close, Some(RECONNECT_DELAY));
        assert_eq!(after_failure, None);
    }

    #[test]
    fn test_capped_policy_stops_at_limit() {
        // テスト項目: 上限が設定されている場合、上限に達すると再接続しない
        // given (前提条件):
        let policy = ReconnectPolicy::new(RECONNECT_DELAY, Some(5));

        // when (操作):
        let before = policy.next_delay(4);
        let at = policy.next_delay(5);

        // then (期待する結果):
        assert_eq!(before, Some(RECONNECT_DELAY));
        assert_eq!(at, None);
    }
}
