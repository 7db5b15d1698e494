//! Generation provider implementations.
//!
//! Concrete [`LlmProvider`](parley_core::llm::LlmProvider) implementations,
//! plus [`create_backend`], which turns a [`ChatConfig`] into the session's
//! [`ActiveBackend`].

pub mod anthropic;
pub mod openai_compat;

use secrecy::SecretString;

use parley_core::generation::ActiveBackend;
use parley_core::llm::BoxLlmProvider;
use parley_types::config::ChatConfig;
use parley_types::error::ConfigError;
use parley_types::llm::Vendor;

use self::anthropic::AnthropicProvider;
use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config as compat;

/// Build the generation backend described by `config`.
///
/// `lookup` resolves environment variables (the API key). Anthropic and
/// OpenAI require a key; Ollama and custom endpoints use one if present.
pub fn create_backend(
    config: &ChatConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ActiveBackend, ConfigError> {
    let vendor: Vendor = config
        .vendor
        .parse()
        .map_err(|_| ConfigError::UnknownVendor(config.vendor.clone()))?;

    let key_env = config
        .api_key_env
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .or(vendor.default_api_key_env());
    let api_key = key_env
        .and_then(|name| lookup(name))
        .filter(|key| !key.trim().is_empty());
    let required_key = || {
        api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingApiKey(key_env.unwrap_or("API_KEY").to_string()))
    };
    let base_url = config.base_url.as_deref().filter(|url| !url.trim().is_empty());

    let provider = match vendor {
        Vendor::Anthropic => {
            let mut provider = AnthropicProvider::new(SecretString::from(required_key()?))?;
            if let Some(url) = base_url {
                provider = provider.with_base_url(url);
            }
            BoxLlmProvider::new(provider)
        }
        Vendor::OpenAi => BoxLlmProvider::new(OpenAiCompatibleProvider::new(
            compat::openai_defaults(&required_key()?, base_url),
        )),
        Vendor::Ollama => {
            let mut settings = compat::ollama_defaults(base_url);
            if let Some(key) = &api_key {
                settings.api_key = key.clone();
            }
            BoxLlmProvider::new(OpenAiCompatibleProvider::new(settings))
        }
        Vendor::OpenAiCompatible => BoxLlmProvider::new(OpenAiCompatibleProvider::new(
            compat::compatible_defaults(
                api_key.as_deref().unwrap_or_default(),
                base_url.unwrap_or(compat::OPENAI_BASE_URL),
            ),
        )),
    };

    let model = config.model_for(vendor);
    tracing::info!(vendor = %vendor, model = %model, "generation backend ready");

    Ok(ActiveBackend::new(provider, model, config.system_prompt())
        .with_max_tokens(config.max_tokens)
        .with_temperature(config.temperature))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_builds_ollama_without_key() {
        let backend = create_backend(&ChatConfig::default(), no_env).unwrap();
        assert_eq!(backend.provider_name(), "ollama");
        assert_eq!(backend.model(), "llama3.2");
    }

    #[test]
    fn test_anthropic_requires_key() {
        let config = ChatConfig {
            vendor: "anthropic".to_string(),
            ..ChatConfig::default()
        };

        let err = create_backend(&config, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(ref name) if name == "ANTHROPIC_API_KEY"));

        let backend = create_backend(&config, |name| {
            (name == "ANTHROPIC_API_KEY").then(|| "sk-ant-test".to_string())
        })
        .unwrap();
        assert_eq!(backend.provider_name(), "anthropic");
        assert_eq!(backend.model(), "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_custom_key_env_is_used() {
        let config = ChatConfig {
            vendor: "openai".to_string(),
            model: "gpt-4o".to_string(),
            api_key_env: Some("MY_OPENAI_KEY".to_string()),
            ..ChatConfig::default()
        };

        let err = create_backend(&config, |name| {
            (name == "OPENAI_API_KEY").then(|| "wrong-var".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(ref name) if name == "MY_OPENAI_KEY"));

        let backend =
            create_backend(&config, |name| (name == "MY_OPENAI_KEY").then(|| "sk".to_string())).unwrap();
        assert_eq!(backend.provider_name(), "openai");
        assert_eq!(backend.model(), "gpt-4o");
    }

    #[test]
    fn test_unknown_vendor() {
        let config = ChatConfig {
            vendor: "skynet".to_string(),
            ..ChatConfig::default()
        };
        let err = create_backend(&config, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVendor(ref v) if v == "skynet"));
    }

    #[test]
    fn test_request_carries_config_system_prompt() {
        let config = ChatConfig {
            system_prompt: Some("Answer in haiku.".to_string()),
            max_tokens: 128,
            ..ChatConfig::default()
        };
        let backend = create_backend(&config, no_env).unwrap();
        let request = backend.request_for("hello");
        assert_eq!(request.system.as_deref(), Some("Answer in haiku."));
        assert_eq!(request.max_tokens, 128);
    }
}
