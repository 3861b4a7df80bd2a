pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid sender email: {0}")]
    InvalidEmail(String),
    #[error("failed to parse APP_ENVIRONMENT")]
    StringToEnvironmentFail,
    #[error("failed to parse DbConfig from a connection string")]
    StringToDbConfigFail,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    TomlDeser(#[from] toml::de::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}
