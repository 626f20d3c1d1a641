//! Construction-time configuration.

use relay_core::{Address, DispatchError, Role};

/// Options recognized when a dispatcher is deployed.
///
/// The deploying identity becomes Admin implicitly; the only option is the
/// initial Moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Initial Moderator.
    pub moderator: Address,
}

impl DispatcherConfig {
    /// Configure `moderator` as the initial Moderator.
    pub fn new(moderator: Address) -> Self {
        Self { moderator }
    }

    /// Replace the initial Moderator.
    pub fn with_moderator(mut self, moderator: Address) -> Self {
        self.moderator = moderator;
        self
    }

    /// Reject configurations that would start without a Moderator.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.moderator.is_zero() {
            return Err(DispatchError::InvalidSuccessor(Role::Moderator));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DispatcherConfig;
    use relay_core::{Address, DispatchError, Role};

    #[test]
    fn null_moderator_is_invalid() {
        assert_eq!(
            DispatcherConfig::new(Address::ZERO).validate(),
            Err(DispatchError::InvalidSuccessor(Role::Moderator))
        );
        let config = DispatcherConfig::new(Address::ZERO).with_moderator(Address::repeat_byte(2));
        assert!(config.validate().is_ok());
    }
}
