pub mod config;
pub mod env_adapter;
pub mod envelope;
pub mod error;
pub mod expand;
pub mod load;
pub mod parser;
pub mod post_process;

pub use config::Config;
pub use env_adapter::{EnvironmentAdapter, InMemoryAdapter, ProcessEnvAdapter};
pub use envelope::{is_enveloped, wrap, unwrap, EnvelopeError};
pub use error::LoadError;
pub use expand::{expand, EnvView};
pub use load::{load, load_with_adapter, LoadOptions, LoadedEnv};
pub use parser::{parse_bytes, parse_str, ParseError, ParsedEntry};
pub use post_process::{post_process, FinalValue, OrderedEnv, PostProcessOptions};
