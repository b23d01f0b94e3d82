use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigMissing,
    ConfigInvalidJson,

    ValidationMissingArgument,
    ValidationInvalidArgument,

    TemplateNotFound,
    TemplateUndefinedVariable,
    TemplateInvalid,

    XmlSentinelNotFound,

    InstallFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigMissing => "config.missing",
            ErrorCode::ConfigInvalidJson => "config.invalid_json",

            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::TemplateNotFound => "template.not_found",
            ErrorCode::TemplateUndefinedVariable => "template.undefined_variable",
            ErrorCode::TemplateInvalid => "template.invalid",

            ErrorCode::XmlSentinelNotFound => "xml.sentinel_not_found",

            ErrorCode::InstallFailed => "install.failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMissingDetails {
    pub generator: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateNotFoundDetails {
    pub template_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UndefinedVariableDetails {
    pub template_id: String,
    pub variable: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentinelNotFoundDetails {
    pub path: String,
    pub sentinel: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallFailedDetails {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub output: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn config_missing(generator: impl Into<String>, path: impl Into<String>) -> Self {
        let generator = generator.into();
        let details = to_details(ConfigMissingDetails {
            generator: generator.clone(),
            path: path.into(),
        });

        Self::new(
            ErrorCode::ConfigMissing,
            format!("No saved '{}' configuration found", generator),
            details,
        )
        .with_hint("Run 'xlr-scaffold app' in the project root first")
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in session configuration",
            details,
        )
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            to_details(MissingArgumentDetails { args }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn template_not_found(template_id: impl Into<String>) -> Self {
        let template_id = template_id.into();
        Self::new(
            ErrorCode::TemplateNotFound,
            format!("Template not found: {}", template_id),
            to_details(TemplateNotFoundDetails { template_id }),
        )
    }

    pub fn template_undefined_variable(
        template_id: impl Into<String>,
        variable: impl Into<String>,
    ) -> Self {
        let variable = variable.into();
        Self::new(
            ErrorCode::TemplateUndefinedVariable,
            format!("Template references undefined variable '{}'", variable),
            to_details(UndefinedVariableDetails {
                template_id: template_id.into(),
                variable,
            }),
        )
    }

    pub fn template_invalid(template_id: impl Into<String>, problem: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::TemplateInvalid,
            "Malformed template",
            serde_json::json!({
                "templateId": template_id.into(),
                "problem": problem.into(),
            }),
        )
    }

    pub fn sentinel_not_found(path: impl Into<String>, sentinel: impl Into<String>) -> Self {
        let path = path.into();
        let sentinel = sentinel.into();
        Self::new(
            ErrorCode::XmlSentinelNotFound,
            format!("Marker '{}' not found in {}", sentinel, path),
            to_details(SentinelNotFoundDetails { path, sentinel }),
        )
    }

    pub fn install_failed(details: InstallFailedDetails) -> Self {
        Self::new(
            ErrorCode::InstallFailed,
            "Package installation failed",
            to_details(details),
        )
        .with_hint("Re-run with --skip-install and install dependencies manually")
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
