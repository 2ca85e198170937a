//! Resolution of engine tokens to sink constructors
//!
//! The built-in engines are `Console`, `File` and `Email`. Applications add
//! their own sinks by registering a constructor under a name, which config
//! entries then reference through either `engine` or `className`.

use super::config::SinkConfig;
use super::error::{LoggerError, Result};
use super::sink::Sink;
use crate::sinks::{ConsoleSink, EmailSink, FileSink};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a sink from its configuration
pub type SinkConstructor = Arc<dyn Fn(&SinkConfig) -> Result<Box<dyn Sink>> + Send + Sync>;

/// Closed set of built-in engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinEngine {
    Console,
    File,
    Email,
}

impl BuiltinEngine {
    /// Case-insensitive lookup of an engine token
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "console" => Some(BuiltinEngine::Console),
            "file" => Some(BuiltinEngine::File),
            "email" => Some(BuiltinEngine::Email),
            _ => None,
        }
    }

    pub fn build(self, config: &SinkConfig) -> Result<Box<dyn Sink>> {
        let sink: Box<dyn Sink> = match self {
            BuiltinEngine::Console => Box::new(ConsoleSink::from_config(config)?),
            BuiltinEngine::File => Box::new(FileSink::from_config(config)?),
            BuiltinEngine::Email => Box::new(EmailSink::from_config(config)?),
        };
        Ok(sink)
    }
}

/// Maps engine tokens and custom names to constructors
#[derive(Clone, Default)]
pub struct SinkRegistry {
    custom: HashMap<String, SinkConstructor>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom constructor. Names are matched case-insensitively and
    /// take precedence over a built-in engine of the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&SinkConfig) -> Result<Box<dyn Sink>> + Send + Sync + 'static,
    {
        self.custom
            .insert(name.into().to_ascii_lowercase(), Arc::new(constructor));
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.custom.contains_key(&name.to_ascii_lowercase())
    }

    /// Construct the sink called `name` from `config`.
    ///
    /// `engine` wins over `className`. Unknown tokens fail with
    /// [`LoggerError::SinkResolution`]; constructor errors pass through.
    pub fn build(&self, name: &str, config: &SinkConfig) -> Result<Box<dyn Sink>> {
        if let Some(engine) = config.engine.as_deref() {
            if let Some(ctor) = self.custom.get(&engine.to_ascii_lowercase()) {
                return ctor(config);
            }
            return match BuiltinEngine::from_token(engine) {
                Some(builtin) => builtin.build(config),
                None => Err(LoggerError::resolution(name, engine)),
            };
        }

        match config.class_name.as_deref() {
            Some(class) => match self.custom.get(&class.to_ascii_lowercase()) {
                Some(ctor) => ctor(config),
                None => Err(LoggerError::resolution(name, class)),
            },
            None => Err(LoggerError::resolution(name, "")),
        }
    }
}

impl fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.custom.keys().collect();
        names.sort();
        f.debug_struct("SinkRegistry").field("custom", &names).finish()
    }
}
