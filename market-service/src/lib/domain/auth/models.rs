use std::fmt;

/// Lifetime of a session token, counted from issuance.
pub const TOKEN_VALIDITY_HOURS: i64 = 1;

/// Credential record identifier, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored identity of a registered user.
///
/// Read from the store as an owned snapshot. The email is kept exactly as
/// supplied at signup; no case folding is applied.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Credential record that has not been persisted yet.
#[derive(Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub email: String,
    pub password_hash: String,
}

impl NewCredential {
    /// # Arguments
    /// * `email` - Lookup key for login
    /// * `password_hash` - PHC string produced by the password hasher
    pub fn new(email: impl Into<String>, password_hash: String) -> Self {
        Self {
            email: email.into(),
            password_hash,
        }
    }

    /// Attach a store-assigned identifier.
    pub fn into_record(self, id: UserId) -> CredentialRecord {
        CredentialRecord {
            id,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

impl fmt::Debug for NewCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewCredential")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Signed bearer token handed out by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password_hash() {
        let record = NewCredential::new("a@x.com", "$argon2id$secret".to_string())
            .into_record(UserId(3));

        let rendered = format!("{:?}", record);

        assert!(rendered.contains("a@x.com"));
        assert!(!rendered.contains("$argon2id$secret"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = SessionToken::new("header.payload.signature".to_string());
        assert!(!format!("{:?}", token).contains("payload"));
        assert_eq!(token.as_str(), "header.payload.signature");
    }
}
