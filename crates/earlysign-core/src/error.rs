use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown risk level: {0}")]
    UnknownRiskLevel(String),

    #[error("unknown screening tool: {0}")]
    UnknownTool(String),

    #[error("{0} is a demo stub and performs no analysis")]
    ToolNotImplemented(String),
}
