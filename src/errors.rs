use std::fmt;

#[derive(Debug, Clone)]
pub enum DashboardError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    NotFound(String),
    Serialization(String),
    DateParse(String),
    FileOperation(String),
}

impl DashboardError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::DatabaseConfig(_) => "E001",
            DashboardError::DatabaseConnection(_) => "E002",
            DashboardError::DatabaseOperation(_) => "E003",
            DashboardError::NotFound(_) => "E004",
            DashboardError::Serialization(_) => "E005",
            DashboardError::DateParse(_) => "E006",
            DashboardError::FileOperation(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            DashboardError::DatabaseConfig(_) => "Database Configuration Error",
            DashboardError::DatabaseConnection(_) => "Database Connection Error",
            DashboardError::DatabaseOperation(_) => "Database Operation Error",
            DashboardError::NotFound(_) => "Resource Not Found",
            DashboardError::Serialization(_) => "Serialization Error",
            DashboardError::DateParse(_) => "Date Parse Error",
            DashboardError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            DashboardError::DatabaseConfig(msg)
            | DashboardError::DatabaseConnection(msg)
            | DashboardError::DatabaseOperation(msg)
            | DashboardError::NotFound(msg)
            | DashboardError::Serialization(msg)
            | DashboardError::DateParse(msg)
            | DashboardError::FileOperation(msg) => msg,
        }
    }

    /// 对应的 HTTP 状态码：只有 NotFound 是 404，其余一律 500
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DashboardError::NotFound(_))
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DashboardError {}

// 便捷的构造函数
impl DashboardError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        DashboardError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        DashboardError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        DashboardError::DatabaseOperation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        DashboardError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        DashboardError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        DashboardError::DateParse(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        DashboardError::FileOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for DashboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        DashboardError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DashboardError {
    fn from(err: chrono::ParseError) -> Self {
        DashboardError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            DashboardError::database_config("x"),
            DashboardError::database_connection("x"),
            DashboardError::database_operation("x"),
            DashboardError::not_found("x"),
            DashboardError::serialization("x"),
            DashboardError::date_parse("x"),
            DashboardError::file_operation("x"),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            DashboardError::not_found("campaign 7").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DashboardError::date_parse("2024-13-01").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            DashboardError::database_operation("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_err_conversion() {
        let err: DashboardError = sea_orm::DbErr::Custom("disk full".into()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("disk full"));
        assert_eq!(
            err.format_simple(),
            format!("Database Operation Error: {}", err.message())
        );
    }
}
