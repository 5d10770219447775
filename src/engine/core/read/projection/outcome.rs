use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Why a projection has to go back to the row store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchReason {
    #[serde(rename = "subobject marker")]
    SubObjectMarker,
    #[serde(rename = "sparse data marker")]
    SparseDataMarker,
    #[serde(rename = "no data for path")]
    NoDataForPath,
}

impl FetchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchReason::SubObjectMarker => "subobject marker",
            FetchReason::SparseDataMarker => "sparse data marker",
            FetchReason::NoDataForPath => "no data for path",
        }
    }
}

impl fmt::Display for FetchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of answering one inclusion projection from columns.
///
/// Serializes as `{"answer": ..}` or `{"needsFetch": ..}`, with the ancestor
/// paths looked up along the way under `extraColumnsConsulted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectionOutcome {
    Answered {
        answer: Value,
        #[serde(
            rename = "extraColumnsConsulted",
            default,
            skip_serializing_if = "Vec::is_empty"
        )]
        consulted: Vec<String>,
    },
    NeedsFetch {
        #[serde(rename = "needsFetch")]
        reason: FetchReason,
        #[serde(
            rename = "extraColumnsConsulted",
            default,
            skip_serializing_if = "Vec::is_empty"
        )]
        consulted: Vec<String>,
    },
}

impl ProjectionOutcome {
    pub fn is_answered(&self) -> bool {
        matches!(self, ProjectionOutcome::Answered { .. })
    }

    pub fn answer(&self) -> Option<&Value> {
        match self {
            ProjectionOutcome::Answered { answer, .. } => Some(answer),
            ProjectionOutcome::NeedsFetch { .. } => None,
        }
    }

    pub fn fetch_reason(&self) -> Option<FetchReason> {
        match self {
            ProjectionOutcome::Answered { .. } => None,
            ProjectionOutcome::NeedsFetch { reason, .. } => Some(*reason),
        }
    }

    pub fn consulted(&self) -> &[String] {
        match self {
            ProjectionOutcome::Answered { consulted, .. }
            | ProjectionOutcome::NeedsFetch { consulted, .. } => consulted,
        }
    }
}
