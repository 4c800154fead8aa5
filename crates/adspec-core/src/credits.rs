use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNLIMITED_CREDITS: u64 = 999_999;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBalance {
    pub current: u64,
    pub limit: u64,
    pub last_reset: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("insufficient credits: requested {requested}, available {available}")]
pub struct InsufficientCredits {
    pub requested: u64,
    pub available: u64,
}

impl CreditBalance {
    pub fn new(limit: u64, now: impl Into<String>) -> Self {
        Self { current: limit, limit, last_reset: now.into() }
    }

    pub fn unlimited(now: impl Into<String>) -> Self {
        Self::new(UNLIMITED_CREDITS, now)
    }

    /// Deducts `amount` and returns what is left. The balance is untouched on error.
    pub fn consume(&mut self, amount: u64) -> Result<u64, InsufficientCredits> {
        if self.current < amount {
            return Err(InsufficientCredits { requested: amount, available: self.current });
        }
        self.current -= amount;
        Ok(self.current)
    }

    pub fn reset(&mut self, now: impl Into<String>) {
        self.current = self.limit;
        self.last_reset = now.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_decrements() {
        let mut b = CreditBalance::new(100, "2024-01-01");
        assert_eq!(b.consume(12), Ok(88));
        assert_eq!(b.current, 88);
    }

    #[test]
    fn consume_rejects_overdraw_without_mutating() {
        let mut b = CreditBalance::new(5, "2024-01-01");
        let err = b.consume(6).unwrap_err();
        assert_eq!(err, InsufficientCredits { requested: 6, available: 5 });
        assert_eq!(b.current, 5);
    }

    #[test]
    fn consume_exact_balance_reaches_zero() {
        let mut b = CreditBalance::new(3, "t0");
        assert_eq!(b.consume(3), Ok(0));
        assert!(b.consume(1).is_err());
    }

    #[test]
    fn reset_restores_limit() {
        let mut b = CreditBalance::new(10, "t0");
        b.consume(7).unwrap();
        b.reset("t1");
        assert_eq!(b.current, 10);
        assert_eq!(b.last_reset, "t1");
    }

    #[test]
    fn unlimited_balance() {
        let b = CreditBalance::unlimited("t0");
        assert_eq!(b.current, UNLIMITED_CREDITS);
        assert_eq!(b.limit, UNLIMITED_CREDITS);
    }
}
