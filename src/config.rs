// Configuration module: everything the classifier needs to know about the
// remote endpoint, resolved once at startup and then passed around by
// reference. Nothing here is mutated after `main` builds it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

/// Hugging Face inference router, without the model segment.
pub const DEFAULT_API_BASE: &str = "https://router.huggingface.co/hf-inference/models";

/// Zero-shot NLI model used when `HF_MODEL_ID` is not set.
pub const DEFAULT_MODEL_ID: &str = "facebook/bart-large-mnli";

/// Candidate labels sent with every headline, in display order.
pub const DEFAULT_TOPICS: [&str; 5] = ["Sports", "Technology", "Business", "Politics", "Health"];

/// Upper bound for a single classification request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct Config {
    pub api_base: String,
    pub model_id: String,
    /// Bearer credential. May be empty; the server decides what that means.
    pub api_key: String,
    pub topics: Vec<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: DEFAULT_API_BASE.into(),
            model_id: DEFAULT_MODEL_ID.into(),
            api_key: String::new(),
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

// Hand-written so the credential never ends up in logs or panic messages.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base", &self.api_base)
            .field("model_id", &self.model_id)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("topics", &self.topics)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// The credential is taken from `HF_API_KEY`, then `HF_TOKEN`, then the
    /// token file the Hugging Face CLI writes under the user's cache dir.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), default_token_path().as_deref())
    }

    /// Same as [`Config::from_env`] but with an injectable variable lookup
    /// and token file location.
    pub fn from_lookup<F>(lookup: F, token_path: Option<&Path>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = non_blank("HF_API_KEY")
            .or_else(|| non_blank("HF_TOKEN"))
            .or_else(|| token_path.and_then(read_token_file))
            .unwrap_or_default();
        if api_key.is_empty() {
            warn!("no Hugging Face credential found (HF_API_KEY, HF_TOKEN or token file)");
        }

        let config = Config {
            api_base: non_blank("HF_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
            model_id: non_blank("HF_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.into()),
            api_key,
            ..Config::default()
        };
        debug!(?config, "configuration resolved");
        config
    }

    /// Full inference URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            self.model_id.trim_start_matches('/')
        )
    }
}

/// `~/.cache/huggingface/token`, if a home directory can be found.
fn default_token_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".cache").join("huggingface").join("token"))
}

/// Read a token file, returning `None` when it is missing or blank.
fn read_token_file(path: &Path) -> Option<String> {
    let data = std::fs::read_to_string(path).ok()?;
    let token = data.trim();
    if token.is_empty() {
        None
    } else {
        debug!(path = %path.display(), "using credential from token file");
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[]), None);
        assert_eq!(config.api_key, "");
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(
            config.topics,
            vec!["Sports", "Technology", "Business", "Politics", "Health"]
        );
        assert_eq!(
            config.endpoint(),
            "https://router.huggingface.co/hf-inference/models/facebook/bart-large-mnli"
        );
    }

    #[test]
    fn api_key_wins_over_hf_token() {
        let config = Config::from_lookup(
            lookup_from(&[("HF_API_KEY", " hf_primary \n"), ("HF_TOKEN", "hf_secondary")]),
            None,
        );
        assert_eq!(config.api_key, "hf_primary");
    }

    #[test]
    fn blank_api_key_falls_through_to_hf_token() {
        let config = Config::from_lookup(
            lookup_from(&[("HF_API_KEY", "   "), ("HF_TOKEN", "hf_secondary")]),
            None,
        );
        assert_eq!(config.api_key, "hf_secondary");
    }

    #[test]
    fn token_file_is_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "hf_from_file\n").unwrap();

        let config = Config::from_lookup(lookup_from(&[]), Some(path.as_path()));
        assert_eq!(config.api_key, "hf_from_file");

        let config = Config::from_lookup(lookup_from(&[("HF_TOKEN", "hf_env")]), Some(path.as_path()));
        assert_eq!(config.api_key, "hf_env");
    }

    #[test]
    fn missing_or_blank_token_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(Config::from_lookup(lookup_from(&[]), Some(missing.as_path())).api_key, "");

        let blank = dir.path().join("blank");
        std::fs::write(&blank, "  \n").unwrap();
        assert_eq!(Config::from_lookup(lookup_from(&[]), Some(blank.as_path())).api_key, "");
    }

    #[test]
    fn endpoint_overrides_join_cleanly() {
        let config = Config::from_lookup(
            lookup_from(&[
                ("HF_API_BASE", "http://127.0.0.1:9000/models/"),
                ("HF_MODEL_ID", "MoritzLaurer/deberta-v3-base-zeroshot-v2.0"),
            ]),
            None,
        );
        assert_eq!(
            config.endpoint(),
            "http://127.0.0.1:9000/models/MoritzLaurer/deberta-v3-base-zeroshot-v2.0"
        );
    }

    #[test]
    fn debug_output_hides_credential() {
        let config = Config {
            api_key: "hf_secret".into(),
            ..Config::default()
        };
        let shown = format!("{:?}", config);
        assert!(!shown.contains("hf_secret"));
        assert!(shown.contains("<redacted>"));
    }
}
