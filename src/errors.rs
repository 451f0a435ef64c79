use std::fmt;

#[derive(Debug, Clone)]
pub enum TrustPageError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    RateLimitExceeded(String),
    Upstream(String),
    Serialization(String),
    DateParse(String),
}

impl TrustPageError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TrustPageError::DatabaseConfig(_) => "E001",
            TrustPageError::DatabaseConnection(_) => "E002",
            TrustPageError::DatabaseOperation(_) => "E003",
            TrustPageError::Validation(_) => "E004",
            TrustPageError::NotFound(_) => "E005",
            TrustPageError::RateLimitExceeded(_) => "E006",
            TrustPageError::Upstream(_) => "E007",
            TrustPageError::Serialization(_) => "E008",
            TrustPageError::DateParse(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TrustPageError::DatabaseConfig(_) => "Database Configuration Error",
            TrustPageError::DatabaseConnection(_) => "Database Connection Error",
            TrustPageError::DatabaseOperation(_) => "Database Operation Error",
            TrustPageError::Validation(_) => "Validation Error",
            TrustPageError::NotFound(_) => "Resource Not Found",
            TrustPageError::RateLimitExceeded(_) => "Rate Limit Exceeded",
            TrustPageError::Upstream(_) => "Upstream Service Error",
            TrustPageError::Serialization(_) => "Serialization Error",
            TrustPageError::DateParse(_) => "Date Parse Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TrustPageError::DatabaseConfig(msg) => msg,
            TrustPageError::DatabaseConnection(msg) => msg,
            TrustPageError::DatabaseOperation(msg) => msg,
            TrustPageError::Validation(msg) => msg,
            TrustPageError::NotFound(msg) => msg,
            TrustPageError::RateLimitExceeded(msg) => msg,
            TrustPageError::Upstream(msg) => msg,
            TrustPageError::Serialization(msg) => msg,
            TrustPageError::DateParse(msg) => msg,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TrustPageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TrustPageError {}

// 便捷的构造函数
impl TrustPageError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        TrustPageError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        TrustPageError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        TrustPageError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TrustPageError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TrustPageError::NotFound(msg.into())
    }

    pub fn rate_limit_exceeded<T: Into<String>>(msg: T) -> Self {
        TrustPageError::RateLimitExceeded(msg.into())
    }

    pub fn upstream<T: Into<String>>(msg: T) -> Self {
        TrustPageError::Upstream(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TrustPageError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        TrustPageError::DateParse(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TrustPageError {
    fn from(err: sea_orm::DbErr) -> Self {
        TrustPageError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TrustPageError {
    fn from(err: std::io::Error) -> Self {
        TrustPageError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TrustPageError {
    fn from(err: serde_json::Error) -> Self {
        TrustPageError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TrustPageError {
    fn from(err: chrono::ParseError) -> Self {
        TrustPageError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrustPageError>;
