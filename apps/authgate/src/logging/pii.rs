//! Redaction of personal data and credentials before they reach log output.

use std::sync::LazyLock;

use regex::Regex;

/// Email addresses anywhere in a string
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

/// Compact JWTs: three base64url segments separated by dots
static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
});

/// Mask a single email: keep the first character of the local part and the
/// full domain. Input without an `@` is masked entirely.
pub fn redact_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("@{domain}"),
        },
        None if email.is_empty() => String::new(),
        None => "***".to_string(),
    }
}

/// Redact emails and bearer tokens from free text.
pub fn redact(input: &str) -> String {
    let emails = EMAIL_REGEX.replace_all(input, |caps: &regex::Captures| redact_email(&caps[0]));
    JWT_REGEX
        .replace_all(&emails, "[REDACTED_TOKEN]")
        .into_owned()
}
