//! Public entry point: read a dotenv file, transparently unwrap its
//! envelope if present, parse it, post-process it, and publish the result.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::env_adapter::{EnvironmentAdapter, ProcessEnvAdapter};
use crate::core::envelope;
use crate::core::error::LoadError;
use crate::core::parser::parse_bytes;
use crate::core::post_process::{post_process, FinalValue, OrderedEnv, PostProcessOptions, SerdeJsonDecoder};

const KEY_ENV_PRIMARY: &str = "SIGNALFORGE_DOTENV_KEY";
const KEY_ENV_FALLBACK: &str = "DOTENV_PRIVATE_KEY";

/// Options accepted by [`load`]. Field-for-field mirror of the documented
/// options table; `override` is renamed to `override_existing` because
/// `override` is a reserved word in Rust.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Force treating input as enveloped (`Some(true)`) or plaintext
    /// (`Some(false)`). `None` auto-detects via the envelope magic.
    pub encrypted: Option<bool>,
    /// Direct passphrase, highest priority in the resolution order.
    pub key: Option<String>,
    /// Name of an environment variable to read the passphrase from.
    pub key_env: Option<String>,
    /// If true, publishing overwrites existing entries on the target
    /// surface(s).
    pub override_existing: bool,
    /// If true, publish results to the host's primary environment surface.
    pub export: bool,
    /// If true, also publish to a per-request scratch surface, when the
    /// host adapter provides one.
    pub export_server: bool,
    /// Enable opportunistic JSON decoding of array/object-shaped values.
    pub arrays: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encrypted: None,
            key: None,
            key_env: None,
            override_existing: false,
            export: true,
            export_server: false,
            arrays: true,
        }
    }
}

/// The ordered, post-processed result of a [`load`] call.
#[derive(Debug, Clone, Default)]
pub struct LoadedEnv {
    entries: OrderedEnv,
}

impl LoadedEnv {
    pub fn get(&self, key: &str) -> Option<&FinalValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FinalValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume this result into a plain string map, stringifying any
    /// JSON-decoded container the way publishing to a process environment
    /// does.
    pub fn into_process_env(self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_env_string()))
            .collect()
    }
}

/// Load `path` per `options`, using the real process environment as both
/// the read-side snapshot and the publish-side target.
pub fn load(path: impl AsRef<Path>, options: LoadOptions) -> Result<LoadedEnv, LoadError> {
    load_with_adapter(path, options, &ProcessEnvAdapter)
}

/// Same as [`load`], but reads existing variables from and publishes
/// results to `adapter` instead of `std::env` directly — the seam tests
/// (and non-process hosts) use.
pub fn load_with_adapter(
    path: impl AsRef<Path>,
    options: LoadOptions,
    adapter: &dyn EnvironmentAdapter,
) -> Result<LoadedEnv, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound { path: path.display().to_string() }
        } else {
            LoadError::FileRead { path: path.display().to_string(), source }
        }
    })?;

    let process_env = adapter.snapshot();
    let is_enveloped = options.encrypted.unwrap_or_else(|| envelope::is_enveloped(&bytes));

    let plaintext = if is_enveloped {
        let passphrase = resolve_passphrase(&options, &process_env);
        let passphrase = passphrase.ok_or(LoadError::KeyRequired)?;
        envelope::unwrap(&bytes, passphrase.as_bytes())?
    } else {
        bytes
    };

    let entries = parse_bytes(&plaintext)?;
    let post_opts = PostProcessOptions { arrays: options.arrays };
    let out = post_process(&entries, process_env, post_opts, &SerdeJsonDecoder);

    if options.export {
        for (key, value) in out.iter() {
            adapter.publish(key, &value.to_env_string(), options.override_existing);
        }
    }
    if options.export_server {
        for (key, value) in out.iter() {
            adapter.publish_scratch(key, value, options.override_existing);
        }
    }

    Ok(LoadedEnv { entries: out })
}

/// `options.key` → env var named by `options.key_env` → `SIGNALFORGE_DOTENV_KEY`
/// → `DOTENV_PRIVATE_KEY`. The first non-empty hit wins.
fn resolve_passphrase(options: &LoadOptions, process_env: &HashMap<String, String>) -> Option<String> {
    if let Some(key) = &options.key {
        if !key.is_empty() {
            return Some(key.clone());
        }
    }
    if let Some(name) = &options.key_env {
        if let Some(v) = process_env.get(name) {
            if !v.is_empty() {
                return Some(v.clone());
            }
        }
    }
    if let Some(v) = process_env.get(KEY_ENV_PRIMARY) {
        if !v.is_empty() {
            return Some(v.clone());
        }
    }
    if let Some(v) = process_env.get(KEY_ENV_FALLBACK) {
        if !v.is_empty() {
            return Some(v.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env_adapter::InMemoryAdapter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_plaintext_dotenv_and_publishes_to_adapter() {
        let file = write_temp("APP_NAME=MyApp\nDEBUG=false\n");
        let adapter = InMemoryAdapter::default();
        let result = load_with_adapter(file.path(), LoadOptions::default(), &adapter).unwrap();

        assert_eq!(result.get("APP_NAME").unwrap().to_env_string(), "MyApp");
        let vars = adapter.snapshot();
        assert_eq!(vars.get("APP_NAME").map(String::as_str), Some("MyApp"));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let adapter = InMemoryAdapter::default();
        let err = load_with_adapter("/does/not/exist.env", LoadOptions::default(), &adapter).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn override_existing_false_does_not_clobber() {
        let file = write_temp("HOME=/from/file\n");
        let mut initial = HashMap::new();
        initial.insert("HOME".to_string(), "/already/set".to_string());
        let adapter = InMemoryAdapter::new(initial);

        load_with_adapter(file.path(), LoadOptions::default(), &adapter).unwrap();
        assert_eq!(adapter.snapshot().get("HOME").map(String::as_str), Some("/already/set"));
    }

    #[test]
    fn export_false_does_not_publish() {
        let file = write_temp("APP_NAME=MyApp\n");
        let adapter = InMemoryAdapter::default();
        let opts = LoadOptions { export: false, ..Default::default() };
        load_with_adapter(file.path(), opts, &adapter).unwrap();
        assert!(adapter.snapshot().is_empty());
    }

    #[test]
    fn encrypted_without_passphrase_requires_key() {
        let wrapped = envelope::wrap(b"APP_KEY=secret", b"pw").unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&wrapped).unwrap();
        let adapter = InMemoryAdapter::default();

        let err = load_with_adapter(file.path(), LoadOptions::default(), &adapter).unwrap_err();
        assert!(matches!(err, LoadError::KeyRequired));
    }

    #[test]
    fn encrypted_with_direct_key_decrypts_and_parses() {
        let wrapped = envelope::wrap(b"APP_KEY=secret\n", b"pw").unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&wrapped).unwrap();
        let adapter = InMemoryAdapter::default();

        let opts = LoadOptions { key: Some("pw".into()), ..Default::default() };
        let result = load_with_adapter(file.path(), opts, &adapter).unwrap();
        assert_eq!(result.get("APP_KEY").unwrap().to_env_string(), "secret");
    }

    #[test]
    fn passphrase_resolution_order_prefers_direct_key_over_env_vars() {
        let wrapped = envelope::wrap(b"X=1\n", b"direct").unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&wrapped).unwrap();

        let mut env = HashMap::new();
        env.insert(KEY_ENV_PRIMARY.to_string(), "wrong".to_string());
        let adapter = InMemoryAdapter::new(env);

        let opts = LoadOptions { key: Some("direct".into()), ..Default::default() };
        let result = load_with_adapter(file.path(), opts, &adapter).unwrap();
        assert_eq!(result.get("X").unwrap().to_env_string(), "1");
    }
}
