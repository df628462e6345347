use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn conversion(component: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Conversion {
                component: component.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// Wraps `source` with the archetype and field it was raised for.
    pub fn in_field(
        archetype: impl Into<String>,
        field: impl Into<String>,
        source: Error,
    ) -> Error {
        Error(
            ErrorKind::Field {
                archetype: archetype.into(),
                field: field.into(),
                source,
            }
            .into(),
        )
    }

    pub fn unknown_field(archetype: impl Into<String>, field: impl Into<String>) -> Error {
        Error(
            ErrorKind::UnknownField {
                archetype: archetype.into(),
                field: field.into(),
            }
            .into(),
        )
    }

    pub fn length_mismatch(column: impl Into<String>, expected: usize, actual: usize) -> Error {
        Error(
            ErrorKind::LengthMismatch {
                column: column.into(),
                expected,
                actual,
            }
            .into(),
        )
    }

    pub fn arrow<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Arrow {
                context: context.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }

    /// Name of the archetype field this error was raised for, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::Field { field, .. } | ErrorKind::UnknownField { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }

    /// Returns `true` for malformed or type-mismatched field input, including
    /// conversion errors wrapped with field context.
    pub fn is_conversion(&self) -> bool {
        match self.kind() {
            ErrorKind::Conversion { .. } | ErrorKind::UnknownField { .. } => true,
            ErrorKind::Field { source, .. } => source.is_conversion(),
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("cannot convert input to {component}: {message}")]
    Conversion { component: String, message: String },

    #[error("{archetype}.{field}: {source}")]
    Field {
        archetype: String,
        field: String,
        #[source]
        source: Error,
    },

    #[error("{archetype} has no field named '{field}'")]
    UnknownField { archetype: String, field: String },

    #[error("length mismatch for '{column}': expected {expected}, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Arrow error: {context}")]
    Arrow {
        context: String,
        source: StdErrorBoxed,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::convert::Infallible> for Error {
    fn from(_: std::convert::Infallible) -> Self {
        Error::invalid_operation("conversion")
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn test_field_context_preserves_conversion() {
        let err = Error::in_field(
            "Scalar",
            "scalar",
            Error::conversion("arche.components.Scalar", "expected a number"),
        );
        assert!(err.is_conversion());
        assert_eq!(err.field_name(), Some("scalar"));
        assert_eq!(
            err.to_string(),
            "Scalar.scalar: cannot convert input to arche.components.Scalar: expected a number"
        );
    }

    #[test]
    fn test_length_mismatch_is_not_conversion() {
        let err = Error::length_mismatch("Scalar:scalar", 3, 2);
        assert!(!err.is_conversion());
        assert!(err.field_name().is_none());
        assert!(matches!(
            err.into_kind(),
            ErrorKind::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }
}
