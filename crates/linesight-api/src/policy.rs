// SPDX-License-Identifier: Apache-2.0

use crate::ApiError;

/// Header carrying the caller role, set by the authenticating proxy.
pub const ROLE_HEADER: &str = "x-linesight-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Viewer,
    QaEngineer,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::QaEngineer => "qa_engineer",
            Self::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Overview,
    Inspections,
    Units,
    LiveMonitor,
    ModelMetrics,
}

impl View {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Inspections => "inspections",
            Self::Units => "units",
            Self::LiveMonitor => "live_monitor",
            Self::ModelMetrics => "model_metrics",
        }
    }

    const fn allows(self, role: Role) -> bool {
        match self {
            Self::ModelMetrics => matches!(role, Role::QaEngineer | Role::Admin),
            Self::Overview | Self::Inspections | Self::Units | Self::LiveMonitor => true,
        }
    }
}

/// Role from the header value; a missing header means `viewer`.
pub fn parse_role(raw: Option<&str>) -> Result<Role, ApiError> {
    match raw.map(str::trim) {
        None | Some("") | Some("viewer") => Ok(Role::Viewer),
        Some("qa_engineer") => Ok(Role::QaEngineer),
        Some("admin") => Ok(Role::Admin),
        Some(other) => Err(ApiError::forbidden(other, "any view")),
    }
}

pub fn authorize(role: Role, view: View) -> Result<(), ApiError> {
    if view.allows(role) {
        Ok(())
    } else {
        Err(ApiError::forbidden(role.as_str(), view.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiErrorCode;

    #[test]
    fn model_metrics_requires_quality_role() {
        assert!(authorize(Role::Viewer, View::ModelMetrics).is_err());
        assert!(authorize(Role::QaEngineer, View::ModelMetrics).is_ok());
        assert!(authorize(Role::Admin, View::ModelMetrics).is_ok());
    }

    #[test]
    fn viewer_reads_every_other_view() {
        for view in [View::Overview, View::Inspections, View::Units, View::LiveMonitor] {
            assert!(authorize(Role::Viewer, view).is_ok(), "{view:?}");
        }
    }

    #[test]
    fn unknown_roles_are_forbidden() {
        assert_eq!(parse_role(None), Ok(Role::Viewer));
        assert_eq!(parse_role(Some(" admin ")), Ok(Role::Admin));
        let err = parse_role(Some("operator")).expect_err("unknown role");
        assert_eq!(err.code, ApiErrorCode::Forbidden);
    }
}
