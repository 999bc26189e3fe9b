//! Codec Registry Module
//!
//! Name to codec mapping, with a lazily built process-wide default.

use std::fmt;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::debug;

use super::{Codec, JsonCodec};
use crate::error::CodecError;

// == Codec Registry ==
/// Codecs keyed by lower-cased name.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: DashMap<String, Arc<dyn Codec>>,
}

impl CodecRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in codecs.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.codecs.insert(
            JsonCodec.name().to_string(),
            Arc::new(JsonCodec) as Arc<dyn Codec>,
        );
        registry
    }

    // == Global ==
    /// Process-wide registry, created with the built-in codecs on first use.
    pub fn global() -> &'static CodecRegistry {
        static GLOBAL: OnceLock<CodecRegistry> = OnceLock::new();
        GLOBAL.get_or_init(CodecRegistry::with_defaults)
    }

    // == Register ==
    /// Adds `codec`, replacing any codec already registered under its name.
    pub fn register(&self, codec: Arc<dyn Codec>) -> Result<(), CodecError> {
        let name = codec.name().to_lowercase();
        if name.is_empty() {
            return Err(CodecError::EmptyName);
        }

        if self.codecs.insert(name.clone(), codec).is_some() {
            debug!("Codec '{}' replaced", name);
        }
        Ok(())
    }

    // == Get ==
    /// Looks up a codec by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Codec>> {
        self.codecs
            .get(&name.to_lowercase())
            .map(|entry| entry.value().clone())
    }

    /// Like [`get`](Self::get) but reports a missing codec as an error.
    pub fn require(&self, name: &str) -> Result<Arc<dyn Codec>, CodecError> {
        self.get(name)
            .ok_or_else(|| CodecError::NotRegistered(name.to_string()))
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.codecs.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    struct NamedCodec(&'static str);

    impl Codec for NamedCodec {
        fn name(&self) -> &str {
            self.0
        }

        fn marshal(&self, _value: &Value) -> Result<Vec<u8>, CodecError> {
            Ok(self.0.as_bytes().to_vec())
        }

        fn unmarshal(&self, _data: &[u8]) -> Result<Value, CodecError> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_defaults_include_json() {
        let registry = CodecRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["json".to_string()]);
        assert!(registry.get("json").is_some());
    }

    #[test]
    fn test_global_has_json() {
        assert!(CodecRegistry::global().get("JSON").is_some());
    }

    #[test]
    fn test_register_lowercases_name() {
        let registry = CodecRegistry::new();
        registry.register(Arc::new(NamedCodec("YAML"))).unwrap();

        assert!(registry.get("yaml").is_some());
        assert!(registry.get("Yaml").is_some());
    }

    #[test]
    fn test_register_empty_name_fails() {
        let registry = CodecRegistry::new();
        let result = registry.register(Arc::new(NamedCodec("")));
        assert!(matches!(result, Err(CodecError::EmptyName)));
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_register_replaces() {
        let registry = CodecRegistry::new();
        registry.register(Arc::new(NamedCodec("raw"))).unwrap();
        registry.register(Arc::new(NamedCodec("RAW"))).unwrap();

        let codec = registry.require("raw").unwrap();
        assert_eq!(codec.marshal(&Value::Null).unwrap(), b"RAW");
        assert_eq!(registry.names().len(), 1);
    }

    #[test]
    fn test_require_missing() {
        let registry = CodecRegistry::new();
        assert!(matches!(
            registry.require("xml"),
            Err(CodecError::NotRegistered(name)) if name == "xml"
        ));
    }

    #[test]
    fn test_instances_are_independent() {
        let a = CodecRegistry::new();
        let b = CodecRegistry::new();
        a.register(Arc::new(NamedCodec("only-a"))).unwrap();

        assert!(b.get("only-a").is_none());
    }
}
