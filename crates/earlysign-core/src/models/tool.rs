use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Whether a screening tool does real work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ToolStatus {
    Available,
    /// Demo placeholder. Running it is an error; it never fabricates output.
    Stub,
}

/// The tools offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScreeningTool {
    Questionnaire,
    SpeechAnalysis,
    SignLanguage,
}

impl ScreeningTool {
    pub const ALL: [ScreeningTool; 3] = [
        ScreeningTool::Questionnaire,
        ScreeningTool::SpeechAnalysis,
        ScreeningTool::SignLanguage,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ScreeningTool::Questionnaire => "questionnaire",
            ScreeningTool::SpeechAnalysis => "speech_analysis",
            ScreeningTool::SignLanguage => "sign_language",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScreeningTool::Questionnaire => "Risk Assessment",
            ScreeningTool::SpeechAnalysis => "Speech Analysis",
            ScreeningTool::SignLanguage => "Sign Language",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScreeningTool::Questionnaire => "Scored developmental screening questionnaire",
            ScreeningTool::SpeechAnalysis => "Emotion recognition from speech patterns",
            ScreeningTool::SignLanguage => "Visual recognition of basic sign language gestures",
        }
    }

    pub fn status(&self) -> ToolStatus {
        match self {
            ScreeningTool::Questionnaire => ToolStatus::Available,
            ScreeningTool::SpeechAnalysis | ScreeningTool::SignLanguage => ToolStatus::Stub,
        }
    }

    /// Fail with [`CoreError::ToolNotImplemented`] unless the tool is available.
    pub fn ensure_available(&self) -> Result<(), CoreError> {
        match self.status() {
            ToolStatus::Available => Ok(()),
            ToolStatus::Stub => Err(CoreError::ToolNotImplemented(self.title().to_string())),
        }
    }
}

impl fmt::Display for ScreeningTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ScreeningTool {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreeningTool::ALL
            .into_iter()
            .find(|tool| tool.id() == s)
            .ok_or_else(|| CoreError::UnknownTool(s.to_string()))
    }
}
