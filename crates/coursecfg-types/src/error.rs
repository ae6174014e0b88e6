//! Error type shared by every coursecfg crate

use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::types::CastError;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	DbError,
	ValidationError(String),
	ConfigError(String),

	/// The default supplied at declaration does not convert to the declared type
	InvalidDefault {
		name: String,
		cause: CastError,
	},
	/// Direct assignment to a property value
	ReadOnly(String),
	/// Strict registration of a name that is already taken
	DuplicateProperty(String),
	Cast(CastError),

	// externals
	Io(std::io::Error),
}

impl Error {
	/// Short machine-readable code used in API error bodies
	pub fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-CFG-NOTFOUND",
			Error::DbError => "E-CFG-DB",
			Error::ValidationError(_) => "E-CFG-VALIDATION",
			Error::ConfigError(_) => "E-CFG-CONFIG",
			Error::InvalidDefault { .. } => "E-CFG-DEFAULT",
			Error::ReadOnly(_) => "E-CFG-READONLY",
			Error::DuplicateProperty(_) => "E-CFG-DUPLICATE",
			Error::Cast(_) => "E-CFG-CAST",
			Error::Io(_) => "E-CFG-IO",
		}
	}

	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::ValidationError(_) | Error::Cast(_) => StatusCode::BAD_REQUEST,
			Error::ReadOnly(_) => StatusCode::METHOD_NOT_ALLOWED,
			Error::DuplicateProperty(_) => StatusCode::CONFLICT,
			Error::DbError
			| Error::ConfigError(_)
			| Error::InvalidDefault { .. }
			| Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<CastError> for Error {
	fn from(err: CastError) -> Self {
		Self::Cast(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::DbError => write!(f, "database error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::InvalidDefault { name, cause } => {
				write!(f, "invalid default for property '{}': {}", name, cause)
			}
			Error::ReadOnly(name) => {
				write!(f, "property '{}' is read-only; use an override store", name)
			}
			Error::DuplicateProperty(name) => {
				write!(f, "property '{}' is already registered", name)
			}
			Error::Cast(err) => write!(f, "{}", err),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			Error::Cast(err) | Error::InvalidDefault { cause: err, .. } => Some(err),
			_ => None,
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::warn!("Request failed: {}", self);
		}
		let body = serde_json::json!({
			"error": {
				"code": self.code(),
				"message": self.to_string(),
			}
		});
		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::ValueType;

	#[test]
	fn test_status_mapping() {
		assert_eq!(Error::NotFound.status(), StatusCode::NOT_FOUND);
		assert_eq!(Error::ReadOnly("x".into()).status(), StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(Error::DuplicateProperty("x".into()).status(), StatusCode::CONFLICT);
		assert_eq!(Error::DbError.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let cast = ValueType::Integer.cast("nope").unwrap_err();
		assert_eq!(Error::from(cast).status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn test_display_names_property() {
		let err = Error::ReadOnly("gcb-str-prop".into());
		assert!(err.to_string().contains("gcb-str-prop"));
	}
}

// vim: ts=4
