use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context as _;
use async_trait::async_trait;
use serde_json::Value;
use ventaro_core::{ConfigProvider, Fields};

// ---------------------------------------------------------------------------
// EnvParameterStore
// ---------------------------------------------------------------------------

/// Resolves parameter names from environment variables.
///
/// `/ventaro-ai/sqs/ai-processing-queue` is read from
/// `VENTARO_AI_SQS_AI_PROCESSING_QUEUE`. Secrets use the same naming and hold
/// a JSON object. Unset and empty variables read as not found.
#[derive(Debug, Clone, Default)]
pub struct EnvParameterStore {
    prefix: Option<String>,
}

impl EnvParameterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `prefix` and an underscore to every variable name.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// The environment variable a parameter name maps to.
    #[must_use]
    pub fn variable_name(&self, name: &str) -> String {
        let mangled = name
            .trim_matches('/')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect::<String>();
        match &self.prefix {
            Some(prefix) => format!("{prefix}_{mangled}"),
            None => mangled,
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(self.variable_name(name))
            .ok()
            .filter(|value| !value.is_empty())
    }
}

#[async_trait]
impl ConfigProvider for EnvParameterStore {
    async fn get_parameter(&self, name: &str, _decrypt: bool) -> anyhow::Result<Option<String>> {
        Ok(self.lookup(name))
    }

    async fn get_secret(&self, name: &str) -> anyhow::Result<Option<Fields>> {
        let Some(raw) = self.lookup(name) else {
            return Ok(None);
        };
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("secret {name} is not valid JSON"))?;
        match value {
            Value::Object(fields) => Ok(Some(fields)),
            _ => anyhow::bail!("secret {name} is not a JSON object"),
        }
    }
}

// ---------------------------------------------------------------------------
// StaticParameterStore
// ---------------------------------------------------------------------------

/// In-memory parameters and secrets, with a switchable failure mode.
#[derive(Debug, Default)]
pub struct StaticParameterStore {
    parameters: HashMap<String, String>,
    secrets: HashMap<String, Fields>,
    failing: AtomicBool,
}

impl StaticParameterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Adds a secret. Non-object values are stored as an empty object.
    #[must_use]
    pub fn with_secret(mut self, name: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(fields) => fields,
            _ => Fields::new(),
        };
        self.secrets.insert(name.into(), fields);
        self
    }

    /// When set, every lookup returns an error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("parameter store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigProvider for StaticParameterStore {
    async fn get_parameter(&self, name: &str, _decrypt: bool) -> anyhow::Result<Option<String>> {
        self.check()?;
        Ok(self.parameters.get(name).cloned())
    }

    async fn get_secret(&self, name: &str) -> anyhow::Result<Option<Fields>> {
        self.check()?;
        Ok(self.secrets.get(name).cloned())
    }
}
