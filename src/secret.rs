use secrecy::{ExposeSecret, SecretString};

/// A password read from the command line or a prompt.
///
/// Kept in a [`SecretString`] so it is zeroized on drop and redacted in
/// debug output.
pub struct Password {
    inner: SecretString,
}

impl Password {
    pub fn from_string(password: String) -> Self {
        Self { inner: SecretString::from(password) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password([... {} bytes ...])", self.inner.expose_secret().len())
    }
}
