use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanitError {
    #[error("dataset directory does not exist: {0}")]
    DatasetNotFound(String),

    #[error("dataset file missing: {0}")]
    DatasetFileMissing(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("no attributes recorded for product: {0}")]
    MissingAttributes(String),

    #[error("duplicate attribute rows for product: {0}")]
    DuplicateAttributes(String),

    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),

    #[error("stats snapshot error: {0}")]
    Snapshot(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("toml render error: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanitError>;
