//! Identity collaborator: who is acting on the current request.

/// Supplies the identifier of the acting user.
pub trait Identity: Send + Sync {
    /// The current acting user, or `None` when nobody is signed in.
    fn acting_user(&self) -> Option<String>;
}

/// Identity fixed at construction time, as used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<String>,
}

impl StaticIdentity {
    /// An identity acting as `user`.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    /// An identity with nobody signed in.
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl Identity for StaticIdentity {
    fn acting_user(&self) -> Option<String> {
        self.user.clone().filter(|u| !u.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity() {
        assert_eq!(
            StaticIdentity::new("ABC123").acting_user(),
            Some("ABC123".to_string())
        );
        assert_eq!(StaticIdentity::anonymous().acting_user(), None);
        assert_eq!(StaticIdentity::new("  ").acting_user(), None);
    }
}
