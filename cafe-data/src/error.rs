use cafe_core::HttpError;

/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    NotFound(String),
    /// A unique constraint rejected the write; `field` is the offending column.
    UniqueViolation { field: String },
    Database(Box<dyn std::error::Error + Send + Sync>),
}

impl DataError {
    /// Construct a `Database` variant from any driver error.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::NotFound(msg) => write!(f, "Not found: {msg}"),
            DataError::UniqueViolation { field } => {
                write!(f, "Unique constraint violated on '{field}'")
            }
            DataError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<DataError> for HttpError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(msg) => HttpError::NotFound(msg),
            DataError::UniqueViolation { field } => {
                HttpError::BadRequest(format!("A record with this {field} already exists."))
            }
            DataError::Database(e) => HttpError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_http_not_found() {
        let err: HttpError = DataError::NotFound("cafe 3".into()).into();
        assert!(matches!(err, HttpError::NotFound(m) if m == "cafe 3"));
    }

    #[test]
    fn unique_violation_maps_to_bad_request() {
        let err: HttpError = DataError::UniqueViolation { field: "name".into() }.into();
        assert!(matches!(err, HttpError::BadRequest(m) if m.contains("name")));
    }

    #[test]
    fn database_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "locked");
        let err = DataError::database(io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Database error: locked");
    }
}
