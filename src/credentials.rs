//! Credential resolution for destination APIs and proxy servers.

/// Credentials to present when making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Use the caller's current identity with the destination. This is the
    /// fallback whenever no explicit account is configured.
    Ambient,
    /// An explicitly configured account. When `domain` is absent, a
    /// `domain\user` value embedded in `user` is passed through as-is.
    Explicit {
        user: String,
        password: String,
        domain: Option<String>,
    },
}

impl Credentials {
    /// Resolves an effective credential set from optionally configured values.
    ///
    /// A non-empty user wins and is combined with the password (or empty) and
    /// domain (or absent). An empty or missing user means the ambient identity
    /// is used; any configured password is ignored in that case.
    pub fn resolve(user: Option<&str>, password: Option<&str>, domain: Option<&str>) -> Self {
        match user {
            Some(user) if !user.is_empty() => Credentials::Explicit {
                user: user.to_string(),
                password: password.unwrap_or_default().to_string(),
                domain: domain.filter(|d| !d.is_empty()).map(str::to_string),
            },
            _ => Credentials::Ambient,
        }
    }

    /// The username to present for HTTP authentication, qualified with the
    /// domain when one is configured.
    pub fn qualified_user(&self) -> Option<String> {
        match self {
            Credentials::Ambient => None,
            Credentials::Explicit { user, domain, .. } => match domain {
                Some(domain) => Some(format!("{}\\{}", domain, user)),
                None => Some(user.clone()),
            },
        }
    }

    /// The password to present for HTTP authentication.
    pub fn password(&self) -> Option<&str> {
        match self {
            Credentials::Ambient => None,
            Credentials::Explicit { password, .. } => Some(password),
        }
    }

    /// The identity key for this credential set, used to share one network
    /// client per unique account.
    pub fn key(&self) -> CredentialKey {
        match self {
            Credentials::Ambient => CredentialKey::default(),
            Credentials::Explicit { user, password, .. } => CredentialKey {
                user: user.clone(),
                password: password.clone(),
            },
        }
    }
}

/// Value-equality key over a resolved (user, password) pair.
///
/// Two keys built from identical resolved values compare equal and hash
/// identically, including when both resolve to "no explicit credentials"
/// (both fields empty). This is what makes credential sets usable as cache
/// keys for client reuse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CredentialKey {
    user: String,
    password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(key: &CredentialKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_resolve_empty_user_is_ambient() {
        assert_eq!(Credentials::resolve(None, None, None), Credentials::Ambient);
        assert_eq!(
            Credentials::resolve(Some(""), Some("secret"), None),
            Credentials::Ambient
        );
    }

    #[test]
    fn test_resolve_user_with_empty_password() {
        let creds = Credentials::resolve(Some("alice"), None, None);
        assert_eq!(
            creds,
            Credentials::Explicit {
                user: "alice".to_string(),
                password: String::new(),
                domain: None,
            }
        );
    }

    #[test]
    fn test_resolve_keeps_domain() {
        let creds = Credentials::resolve(Some("alice"), Some("secret"), Some("CORP"));
        assert_eq!(creds.qualified_user().as_deref(), Some("CORP\\alice"));
        assert_eq!(creds.password(), Some("secret"));
    }

    #[test]
    fn test_resolve_empty_domain_is_absent() {
        let creds = Credentials::resolve(Some("alice"), Some("secret"), Some(""));
        assert_eq!(creds.qualified_user().as_deref(), Some("alice"));
    }

    #[test]
    fn test_keys_with_same_values_are_equal() {
        let key1 = Credentials::resolve(Some("user1"), Some("password1"), None).key();
        let key2 = Credentials::resolve(Some("user1"), Some("password1"), None).key();
        assert_eq!(key1, key2);
        assert_eq!(hash_of(&key1), hash_of(&key2));
    }

    #[test]
    fn test_keys_with_empty_values_are_equal() {
        let key1 = Credentials::resolve(None, None, None).key();
        let key2 = Credentials::resolve(Some(""), None, None).key();
        assert_eq!(key1, key2);
        assert_eq!(hash_of(&key1), hash_of(&key2));
    }

    #[test]
    fn test_keys_with_different_users_are_not_equal() {
        let key1 = Credentials::resolve(Some("user1"), Some("password1"), None).key();
        let key2 = Credentials::resolve(Some("user2"), Some("password1"), None).key();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_keys_with_different_passwords_are_not_equal() {
        let key1 = Credentials::resolve(Some("user1"), Some("password1"), None).key();
        let key2 = Credentials::resolve(Some("user1"), Some("password2"), None).key();
        assert_ne!(key1, key2);
    }
}
