//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Returns the original string unchanged if no `${` is present, so bare
/// `$VAR` in an otherwise literal value is kept as written.
///
/// `field` names the configuration field for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |var| std::env::var(var).ok())
}

/// Expand `value` resolving variables through `lookup`.
fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        lookup(var).map(Some).ok_or_else(|| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

/// Variable that is not set in the environment.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("127.0.0.1", "server.host").unwrap(), "127.0.0.1");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let value = expand_with("/srv/$DATA", "storage.data_dir", env(&[("DATA", "x")])).unwrap();

        assert_eq!(value, "/srv/$DATA");
    }

    #[test]
    fn test_set_variable_expands() {
        let lookup = env(&[("GUESTBOOK_DATA", "/var/lib/guestbook")]);

        let value = expand_with("${GUESTBOOK_DATA}", "storage.data_dir", lookup).unwrap();

        assert_eq!(value, "/var/lib/guestbook");
    }

    #[test]
    fn test_set_variable_wins_over_default() {
        let lookup = env(&[("GUESTBOOK_HOST", "0.0.0.0")]);

        let value = expand_with("${GUESTBOOK_HOST:-127.0.0.1}", "server.host", lookup).unwrap();

        assert_eq!(value, "0.0.0.0");
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = expand_with("${GUESTBOOK_DATA:-data}", "storage.data_dir", env(&[])).unwrap();

        assert_eq!(value, "data");
    }

    #[test]
    fn test_embedded_variables() {
        let lookup = env(&[("ROOT", "/srv"), ("NAME", "guestbook")]);

        let value = expand_with("${ROOT}/${NAME}/data", "storage.data_dir", lookup).unwrap();

        assert_eq!(value, "/srv/guestbook/data");
    }

    #[test]
    fn test_missing_variable_reports_field() {
        let err = expand_with("${GUESTBOOK_MISSING}", "server.host", env(&[])).unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("GUESTBOOK_MISSING"));
        assert!(msg.contains("server.host"));
    }

    #[test]
    fn test_process_environment_default() {
        let value = expand_env(
            "${GUESTBOOK_TEST_EXPAND_NEVER_SET:-fallback}",
            "storage.data_dir",
        )
        .unwrap();

        assert_eq!(value, "fallback");
    }
}
