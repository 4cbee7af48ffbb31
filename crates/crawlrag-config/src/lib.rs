//! Centralized configuration for crawlrag
//!
//! A single flat [`Settings`] bundle covers every option the crawler, the
//! embedding/search pipeline and the MCP server read. Configuration is built
//! like this:
//! 1. Safe defaults (defined as constants)
//! 2. Environment variable overrides (upper-cased field names, `.env` loaded first)
//! 3. Optional sources via [`source::ConfigurationLoader`]: each source yields a
//!    complete bundle and replaces the previous one, so the highest priority
//!    source that loads wins outright. Fields are not merged across sources.
//! 4. Runtime validation

pub mod error;
pub mod source;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use validation::Validate;

use serde::{Deserialize, Serialize};
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use std::path::PathBuf;
use std::str::FromStr;

// =============================================================================
// SAFE DEFAULTS
// =============================================================================

// Models
pub const DEFAULT_MODEL_CHOICE: &str = "gpt-4o-mini";
pub const DEFAULT_SUMMARY_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536; // text-embedding-3-small
pub const DEFAULT_CROSS_ENCODER_MODEL: &str = "cross-encoder/ms-marco-MiniLM-L-6-v2";

// Token budget
pub const DEFAULT_EMBEDDING_MAX_TOKENS: usize = 8000;
pub const DEFAULT_EMBEDDING_CHARS_PER_TOKEN: f64 = 4.0;

// Crawl and retrieval limits
pub const DEFAULT_MAX_DEPTH: u32 = 3;
pub const DEFAULT_MAX_CONCURRENT: usize = 10;
pub const DEFAULT_CHUNK_SIZE: usize = 5000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
pub const DEFAULT_NUM_RESULTS: usize = 5;
pub const DEFAULT_SEMANTIC_THRESHOLD: f64 = 0.5;
pub const DEFAULT_RERANK_THRESHOLD: f64 = 0.3;

// Server binding
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8051;

// PostgreSQL (safe local defaults)
pub const DEFAULT_POSTGRES_HOST: &str = "localhost";
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;
pub const DEFAULT_POSTGRES_DB: &str = "crawl4ai_rag";
pub const DEFAULT_POSTGRES_USER: &str = "postgres";
pub const DEFAULT_POSTGRES_SSLMODE: &str = "prefer";

/// MCP transport the server binds with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Server-sent events over HTTP
    #[default]
    Sse,
    /// Standard input/output
    Stdio,
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Sse => "sse",
            Self::Stdio => "stdio",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Transport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sse" => Ok(Self::Sse),
            "stdio" => Ok(Self::Stdio),
            _ => Err(ConfigError::InvalidValue {
                field: "transport".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Where embeddings are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmbeddingServiceType {
    /// `OpenAI`-compatible embeddings endpoint
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    /// Self-hosted endpoint reachable at `custom_embedding_url`
    #[serde(rename = "custom")]
    Custom,
}

impl std::fmt::Display for EmbeddingServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::OpenAi => "openai",
            Self::Custom => "custom",
        };
        write!(f, "{name}")
    }
}

impl FromStr for EmbeddingServiceType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::InvalidValue {
                field: "embedding_service_type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Which storage backend the settings point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Hosted Supabase project (`supabase_url` + `supabase_service_key`)
    Supabase,
    /// Direct `PostgreSQL` connection (`postgres_*` fields)
    Postgres,
}

/// Every recognized configuration option, flat
///
/// Values are owned, so cloning a bundle never shares state with the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    // API credentials
    pub openai_api_key: String,
    #[serde(default)]
    pub openai_base_url: Option<String>,
    #[serde(default)]
    pub openai_organization: Option<String>,

    // Supabase storage
    pub supabase_url: String,
    pub supabase_service_key: String,

    // Models
    pub model_choice: String,
    pub summary_llm_model: String,

    // Feature toggles
    pub use_contextual_embeddings: bool,
    pub use_hybrid_search: bool,
    pub use_reranking: bool,
    pub use_agentic_rag: bool,

    // Server binding
    pub host: String,
    pub port: u16,
    pub transport: Transport,

    // Embeddings
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub embedding_service_type: EmbeddingServiceType,
    #[serde(default)]
    pub embedding_api_key: Option<String>,
    #[serde(default)]
    pub custom_embedding_url: Option<String>,

    // Reranking
    pub cross_encoder_model: String,
    #[serde(default)]
    pub custom_cross_encoder_url: Option<String>,
    #[serde(default)]
    pub cross_encoder_model_local_path: Option<PathBuf>,

    // Operational limits
    pub default_max_depth: u32,
    pub default_max_concurrent: usize,
    pub default_chunk_size: usize,
    pub default_overlap: usize,
    pub default_num_results: usize,
    pub default_semantic_threshold: f64,
    pub default_rerank_threshold: f64,

    // Token budget
    pub embedding_max_tokens: usize,
    pub embedding_chars_per_token: f64,

    // PostgreSQL alternative to Supabase
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_db: String,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_sslmode: String,

    pub disable_thinking: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: None,
            openai_organization: None,
            supabase_url: String::new(),
            supabase_service_key: String::new(),
            model_choice: DEFAULT_MODEL_CHOICE.to_string(),
            summary_llm_model: DEFAULT_SUMMARY_LLM_MODEL.to_string(),
            use_contextual_embeddings: false,
            use_hybrid_search: false,
            use_reranking: false,
            use_agentic_rag: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            transport: Transport::default(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            embedding_service_type: EmbeddingServiceType::default(),
            embedding_api_key: None,
            custom_embedding_url: None,
            cross_encoder_model: DEFAULT_CROSS_ENCODER_MODEL.to_string(),
            custom_cross_encoder_url: None,
            cross_encoder_model_local_path: None,
            default_max_depth: DEFAULT_MAX_DEPTH,
            default_max_concurrent: DEFAULT_MAX_CONCURRENT,
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            default_overlap: DEFAULT_CHUNK_OVERLAP,
            default_num_results: DEFAULT_NUM_RESULTS,
            default_semantic_threshold: DEFAULT_SEMANTIC_THRESHOLD,
            default_rerank_threshold: DEFAULT_RERANK_THRESHOLD,
            embedding_max_tokens: DEFAULT_EMBEDDING_MAX_TOKENS,
            embedding_chars_per_token: DEFAULT_EMBEDDING_CHARS_PER_TOKEN,
            postgres_host: DEFAULT_POSTGRES_HOST.to_string(),
            postgres_port: DEFAULT_POSTGRES_PORT,
            postgres_db: DEFAULT_POSTGRES_DB.to_string(),
            postgres_user: DEFAULT_POSTGRES_USER.to_string(),
            postgres_password: String::new(),
            postgres_sslmode: DEFAULT_POSTGRES_SSLMODE.to_string(),
            disable_thinking: false,
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_string(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "Ignoring unparseable environment value");
    }
    parsed
}

/// Parse a boolean toggle, accepting the spellings shell users actually type
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let raw = env_string(key)?;
    let parsed = parse_flag(&raw);
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "Ignoring unrecognized boolean toggle");
    }
    parsed
}

impl Settings {
    /// Load settings from environment variables with safe defaults
    ///
    /// A `.env` file is loaded first (once per process). Each field then reads
    /// the upper-cased field name (`OPENAI_API_KEY`, `USE_RERANKING`,
    /// `POSTGRES_PORT`, ...). Unparseable values fall back to the default and
    /// are logged.
    pub fn from_env() -> Self {
        crawlrag_common::initialize_environment();
        let defaults = Self::default();

        Self {
            openai_api_key: env_string("OPENAI_API_KEY").unwrap_or(defaults.openai_api_key),
            openai_base_url: env_string("OPENAI_BASE_URL"),
            openai_organization: env_string("OPENAI_ORGANIZATION"),
            supabase_url: env_string("SUPABASE_URL").unwrap_or(defaults.supabase_url),
            supabase_service_key: env_string("SUPABASE_SERVICE_KEY")
                .unwrap_or(defaults.supabase_service_key),
            model_choice: env_string("MODEL_CHOICE").unwrap_or(defaults.model_choice),
            summary_llm_model: env_string("SUMMARY_LLM_MODEL")
                .unwrap_or(defaults.summary_llm_model),
            use_contextual_embeddings: env_flag("USE_CONTEXTUAL_EMBEDDINGS")
                .unwrap_or(defaults.use_contextual_embeddings),
            use_hybrid_search: env_flag("USE_HYBRID_SEARCH")
                .unwrap_or(defaults.use_hybrid_search),
            use_reranking: env_flag("USE_RERANKING").unwrap_or(defaults.use_reranking),
            use_agentic_rag: env_flag("USE_AGENTIC_RAG").unwrap_or(defaults.use_agentic_rag),
            host: env_string("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT").unwrap_or(defaults.port),
            transport: env_parse("TRANSPORT").unwrap_or(defaults.transport),
            embedding_model: env_string("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            embedding_dimensions: env_parse("EMBEDDING_DIMENSIONS")
                .unwrap_or(defaults.embedding_dimensions),
            embedding_service_type: env_parse("EMBEDDING_SERVICE_TYPE")
                .unwrap_or(defaults.embedding_service_type),
            embedding_api_key: env_string("EMBEDDING_API_KEY"),
            custom_embedding_url: env_string("CUSTOM_EMBEDDING_URL"),
            cross_encoder_model: env_string("CROSS_ENCODER_MODEL")
                .unwrap_or(defaults.cross_encoder_model),
            custom_cross_encoder_url: env_string("CUSTOM_CROSS_ENCODER_URL"),
            cross_encoder_model_local_path: env_string("CROSS_ENCODER_MODEL_LOCAL_PATH")
                .map(PathBuf::from),
            default_max_depth: env_parse("DEFAULT_MAX_DEPTH").unwrap_or(defaults.default_max_depth),
            default_max_concurrent: env_parse("DEFAULT_MAX_CONCURRENT")
                .unwrap_or(defaults.default_max_concurrent),
            default_chunk_size: env_parse("DEFAULT_CHUNK_SIZE")
                .unwrap_or(defaults.default_chunk_size),
            default_overlap: env_parse("DEFAULT_OVERLAP").unwrap_or(defaults.default_overlap),
            default_num_results: env_parse("DEFAULT_NUM_RESULTS")
                .unwrap_or(defaults.default_num_results),
            default_semantic_threshold: env_parse("DEFAULT_SEMANTIC_THRESHOLD")
                .unwrap_or(defaults.default_semantic_threshold),
            default_rerank_threshold: env_parse("DEFAULT_RERANK_THRESHOLD")
                .unwrap_or(defaults.default_rerank_threshold),
            embedding_max_tokens: env_parse("EMBEDDING_MAX_TOKENS")
                .unwrap_or(defaults.embedding_max_tokens),
            embedding_chars_per_token: env_parse("EMBEDDING_CHARS_PER_TOKEN")
                .unwrap_or(defaults.embedding_chars_per_token),
            postgres_host: env_string("POSTGRES_HOST").unwrap_or(defaults.postgres_host),
            postgres_port: env_parse("POSTGRES_PORT").unwrap_or(defaults.postgres_port),
            postgres_db: env_string("POSTGRES_DB").unwrap_or(defaults.postgres_db),
            postgres_user: env_string("POSTGRES_USER").unwrap_or(defaults.postgres_user),
            postgres_password: env_string("POSTGRES_PASSWORD")
                .unwrap_or(defaults.postgres_password),
            postgres_sslmode: env_string("POSTGRES_SSLMODE").unwrap_or(defaults.postgres_sslmode),
            disable_thinking: env_flag("DISABLE_THINKING").unwrap_or(defaults.disable_thinking),
        }
    }

    /// Storage backend these settings select
    ///
    /// A configured Supabase URL wins; otherwise the direct `PostgreSQL`
    /// connection is used.
    pub fn storage_backend(&self) -> StorageBackend {
        if self.supabase_url.trim().is_empty() {
            StorageBackend::Postgres
        } else {
            StorageBackend::Supabase
        }
    }

    /// API key used for embedding requests
    ///
    /// Falls back to the chat key when no dedicated embedding key is set.
    pub fn effective_embedding_api_key(&self) -> Option<&str> {
        self.embedding_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| Some(self.openai_api_key.as_str()).filter(|key| !key.trim().is_empty()))
    }

    /// Approximate character budget for one embedding input
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn embedding_max_chars(&self) -> usize {
        (self.embedding_max_tokens as f64 * self.embedding_chars_per_token) as usize
    }

    fn parse_ssl_mode(&self) -> ConfigResult<PgSslMode> {
        self.postgres_sslmode
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "postgres_sslmode".to_string(),
                value: self.postgres_sslmode.clone(),
            })
    }

    /// Build `PostgreSQL` connection options (no URL with password exposed)
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if `postgres_sslmode` is not a
    /// mode `PostgreSQL` understands
    pub fn connect_options(&self) -> ConfigResult<PgConnectOptions> {
        Ok(PgConnectOptions::new()
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .database(&self.postgres_db)
            .username(&self.postgres_user)
            .password(&self.postgres_password)
            .ssl_mode(self.parse_ssl_mode()?))
    }

    /// Create a `PostgreSQL` connection pool sized by `default_max_concurrent`
    ///
    /// # Errors
    /// Returns an error if the SSL mode is invalid or the connection fails
    pub async fn create_pool(&self) -> ConfigResult<PgPool> {
        let max_connections = u32::try_from(self.default_max_concurrent).unwrap_or(u32::MAX);
        let options = self.connect_options()?;

        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| ConfigError::Generic {
                message: format!(
                    "Failed to connect to {}: {e}",
                    self.safe_connection_string()
                ),
            })
    }

    /// Get connection info for logging (NO PASSWORD!)
    pub fn safe_connection_string(&self) -> String {
        format!(
            "{}@{}:{}/{} (ssl: {})",
            self.postgres_user,
            self.postgres_host,
            self.postgres_port,
            self.postgres_db,
            self.postgres_sslmode
        )
    }
}

impl Validate for Settings {
    #[allow(clippy::cast_precision_loss)]
    fn validate(&self) -> ConfigResult<()> {
        // Server binding
        validation::validate_non_empty(&self.host, "host")?;
        validation::validate_port(self.port, "port")?;

        // Models
        validation::validate_non_empty(&self.model_choice, "model_choice")?;
        validation::validate_non_empty(&self.summary_llm_model, "summary_llm_model")?;
        validation::validate_non_empty(&self.embedding_model, "embedding_model")?;
        validation::validate_non_empty(&self.cross_encoder_model, "cross_encoder_model")?;
        validation::validate_optional_url(self.openai_base_url.as_deref(), "openai_base_url")?;
        validation::validate_optional_url(
            self.custom_cross_encoder_url.as_deref(),
            "custom_cross_encoder_url",
        )?;

        // Embeddings
        validation::validate_range(
            self.embedding_dimensions as f64,
            1.0,
            10_000.0,
            "embedding_dimensions",
        )?;
        validation::validate_range(
            self.embedding_max_tokens as f64,
            1.0,
            1_000_000.0,
            "embedding_max_tokens",
        )?;
        if self.embedding_chars_per_token <= 0.0 || !self.embedding_chars_per_token.is_finite() {
            return Err(ConfigError::Generic {
                message: format!(
                    "embedding_chars_per_token must be positive, got {}",
                    self.embedding_chars_per_token
                ),
            });
        }
        match self.embedding_service_type {
            EmbeddingServiceType::OpenAi => {
                if self.effective_embedding_api_key().is_none() {
                    return Err(ConfigError::MissingField {
                        field: "embedding_api_key or openai_api_key".to_string(),
                    });
                }
            }
            EmbeddingServiceType::Custom => {
                let url = self.custom_embedding_url.as_deref().ok_or_else(|| {
                    ConfigError::MissingField {
                        field: "custom_embedding_url".to_string(),
                    }
                })?;
                validation::validate_url(url, "custom_embedding_url")?;
            }
        }

        // Operational limits
        validation::validate_range(
            f64::from(self.default_max_depth),
            1.0,
            100.0,
            "default_max_depth",
        )?;
        validation::validate_range(
            self.default_max_concurrent as f64,
            1.0,
            1000.0,
            "default_max_concurrent",
        )?;
        validation::validate_range(
            self.default_chunk_size as f64,
            1.0,
            1_000_000.0,
            "default_chunk_size",
        )?;
        if self.default_overlap >= self.default_chunk_size {
            return Err(ConfigError::Generic {
                message: format!(
                    "default_overlap ({}) must be smaller than default_chunk_size ({})",
                    self.default_overlap, self.default_chunk_size
                ),
            });
        }
        validation::validate_range(
            self.default_num_results as f64,
            1.0,
            1000.0,
            "default_num_results",
        )?;
        validation::validate_range(
            self.default_semantic_threshold,
            0.0,
            1.0,
            "default_semantic_threshold",
        )?;
        validation::validate_range(
            self.default_rerank_threshold,
            0.0,
            1.0,
            "default_rerank_threshold",
        )?;

        // Storage
        match self.storage_backend() {
            StorageBackend::Supabase => {
                validation::validate_url(&self.supabase_url, "supabase_url")?;
                validation::validate_non_empty(&self.supabase_service_key, "supabase_service_key")?;
            }
            StorageBackend::Postgres => {
                validation::validate_non_empty(&self.postgres_host, "postgres_host")?;
                validation::validate_port(self.postgres_port, "postgres_port")?;
                validation::validate_non_empty(&self.postgres_db, "postgres_db")?;
                validation::validate_non_empty(&self.postgres_user, "postgres_user")?;
            }
        }
        self.parse_ssl_mode()?;

        Ok(())
    }
}
