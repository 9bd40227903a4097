//! Theater application DTOs.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ApplicationStatus;

/// Query parameters for `GET /api/theater-applications`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplicationListParams {
    /// Only applications in this state.
    pub status: Option<ApplicationStatus>,
}

/// Request body for approve/reject.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReviewRequest {
    /// Rejection reason (required to reject) or approval remark.
    #[serde(default, alias = "note")]
    pub reason: Option<String>,
}
