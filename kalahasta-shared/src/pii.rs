use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps sensitive values (emails, one-time codes) so they are masked in
/// Debug and Display output. Serialization still writes the real value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Shows the first character and the domain of an email, e.g. `p***@example.com`.
pub fn redact_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_value_in_logs() {
        let code = Masked("482913".to_string());
        assert_eq!(format!("{:?}", code), "********");
        assert_eq!(format!("{}", code), "********");
        assert_eq!(code.expose(), "482913");
    }

    #[test]
    fn test_masked_serializes_real_value() {
        let code = Masked("482913".to_string());
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"482913\"");
    }

    #[test]
    fn test_redact_email() {
        assert_eq!(redact_email("priya@example.com"), "p***@example.com");
        assert_eq!(redact_email("not-an-email"), "***");
    }
}
