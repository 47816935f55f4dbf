use super::ConfigError;

/// Backend that turns a `${...}` reference into its value.
pub trait SecretResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError>;
}

/// Default resolver: environment variables and files.
///
/// - `${VAR_NAME}` and `${env:VAR_NAME}` read an environment variable
/// - `${file:/path/to/secret}` reads a file (trimmed)
pub struct DefaultSecretResolver;

impl SecretResolver for DefaultSecretResolver {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError> {
        let reference = reference.trim();
        if let Some(path) = reference.strip_prefix("file:") {
            let path = path.trim();
            std::fs::read_to_string(path)
                .map(|s| s.trim().to_string())
                .map_err(|e| ConfigError::Load(format!("Secret file '{path}': {e}")))
        } else {
            let var = reference.strip_prefix("env:").unwrap_or(reference).trim();
            std::env::var(var).map_err(|_| ConfigError::NotFound(var.to_string()))
        }
    }
}

/// Resolve every `${...}` placeholder in `value`.
pub fn resolve_placeholders(
    value: &str,
    resolver: &dyn SecretResolver,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let end = rest[start..]
            .find('}')
            .ok_or_else(|| ConfigError::Load(format!("Unclosed placeholder in: {value}")))?;
        out.push_str(&rest[..start]);
        out.push_str(&resolver.resolve(&rest[start + 2..start + end])?);
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_reference_is_resolved() {
        std::env::set_var("CAFE_SECRET_TEST_DB", "sqlite://secret.db");
        let result = resolve_placeholders("${CAFE_SECRET_TEST_DB}", &DefaultSecretResolver).unwrap();
        assert_eq!(result, "sqlite://secret.db");
        std::env::remove_var("CAFE_SECRET_TEST_DB");
    }

    #[test]
    fn explicit_env_prefix_inside_text() {
        std::env::set_var("CAFE_SECRET_TEST_HOST", "example.org");
        let result =
            resolve_placeholders("https://${env:CAFE_SECRET_TEST_HOST}/maps", &DefaultSecretResolver)
                .unwrap();
        assert_eq!(result, "https://example.org/maps");
        std::env::remove_var("CAFE_SECRET_TEST_HOST");
    }

    #[test]
    fn resolved_values_are_not_rescanned() {
        std::env::set_var("CAFE_SECRET_TEST_LITERAL", "${NOT_A_REFERENCE}");
        let result =
            resolve_placeholders("${CAFE_SECRET_TEST_LITERAL}", &DefaultSecretResolver).unwrap();
        assert_eq!(result, "${NOT_A_REFERENCE}");
        std::env::remove_var("CAFE_SECRET_TEST_LITERAL");
    }

    #[test]
    fn missing_variable_is_not_found() {
        let err = resolve_placeholders("${CAFE_SECRET_TEST_MISSING}", &DefaultSecretResolver)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(v) if v == "CAFE_SECRET_TEST_MISSING"));
    }

    #[test]
    fn unclosed_placeholder_fails() {
        assert!(resolve_placeholders("${UNCLOSED", &DefaultSecretResolver).is_err());
    }

    #[test]
    fn file_reference_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let secret = dir.path().join("db_url");
        std::fs::write(&secret, "sqlite://from-file.db\n").unwrap();

        let reference = format!("${{file:{}}}", secret.display());
        let result = resolve_placeholders(&reference, &DefaultSecretResolver).unwrap();
        assert_eq!(result, "sqlite://from-file.db");
    }
}
