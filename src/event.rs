use notification::{NotifyError, ReleaseContext};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, ResultExt};

/// Where the release context came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSource {
    Event,
    Environment,
}

impl ContextSource {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Event => "release event payload",
            Self::Environment => "environment variables",
        }
    }
}

/// Captures the process environment once, at the boundary
pub fn env_snapshot() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Builds the release context from the event file, filling gaps from `env`.
///
/// An event without a `release` object falls back to the environment when a
/// `RELEASE_BODY` is available there.
pub fn load_release_context(
    event_path: Option<&Path>,
    env: &HashMap<String, String>,
) -> Result<(ReleaseContext, ContextSource)> {
    let from_env = ReleaseContext::from_env_lookup(|name| env.get(name).cloned());

    let Some(path) = event_path else {
        return Ok((from_env, ContextSource::Environment));
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;

    match ReleaseContext::from_event_json(&json) {
        Ok(from_event) => Ok((from_event.fill_missing_from(from_env), ContextSource::Event)),
        Err(NotifyError::InvalidEvent { .. }) if from_env.body().is_ok() => {
            Ok((from_env, ContextSource::Environment))
        }
        Err(err) => Err(err)
            .with_context(|| format!("Failed to parse event file {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_environment_only() {
        let vars = env(&[
            ("GITHUB_REF", "refs/tags/v1.0.0"),
            ("GITHUB_REPOSITORY", "acme/widgets"),
            ("RELEASE_BODY", "## Added\n- x"),
        ]);

        let (context, source) = load_release_context(None, &vars).unwrap();

        assert_eq!(source, ContextSource::Environment);
        assert_eq!(context.tag(), "v1.0.0");
        assert_eq!(context.body().unwrap(), "## Added\n- x");
    }

    #[test]
    fn test_event_file_is_filled_from_environment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(
            &path,
            r#"{"release": {"tag_name": "v2.0.0", "body": "- y", "author": {"login": "octocat"}}}"#,
        )
        .unwrap();
        let vars = env(&[("GITHUB_REPOSITORY", "acme/widgets"), ("GITHUB_REF", "refs/tags/v2.0.0")]);

        let (context, source) = load_release_context(Some(&path), &vars).unwrap();

        assert_eq!(source, ContextSource::Event);
        assert_eq!(context.author(), "octocat");
        assert_eq!(context.repository(), "acme/widgets");
        assert_eq!(
            context.html_url(),
            "https://github.com/acme/widgets/releases/tag/v2.0.0"
        );
    }

    #[test]
    fn test_non_release_event_falls_back_to_environment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(&path, r#"{"ref": "refs/heads/main"}"#).unwrap();

        let vars = env(&[("RELEASE_BODY", "- from env")]);
        let (context, source) = load_release_context(Some(&path), &vars).unwrap();
        assert_eq!(source, ContextSource::Environment);
        assert_eq!(context.body().unwrap(), "- from env");

        let err = load_release_context(Some(&path), &env(&[])).unwrap_err();
        assert!(err.user_message().contains("Failed to parse event file"));
    }

    #[test]
    fn test_missing_event_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_release_context(Some(&path), &env(&[])).unwrap_err();
        assert!(err.user_message().starts_with("Failed to read event file"));
    }
}
