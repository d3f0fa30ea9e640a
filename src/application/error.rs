// Shell errors - None of these stop the shell, callers log and carry on
use crate::domain::layout::WidgetKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown section `{0}`")]
    UnknownSection(String),

    #[error("unknown dashboard `{0}`")]
    UnknownDashboard(String),

    #[error("panel `{panel}` is not part of dashboard `{dashboard}`")]
    UnknownPanel { dashboard: String, panel: String },

    #[error("no {kind:?} widget declared for container `{container}`")]
    UnknownContainer { kind: WidgetKind, container: String },

    #[error("{0:?} backend is not available")]
    CollaboratorUnavailable(WidgetKind),
}
