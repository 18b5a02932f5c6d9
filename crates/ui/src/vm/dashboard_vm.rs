use audit_core::model::UserDashboard;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub initial: String,
    pub display_name: String,
    pub designation: Option<String>,
    pub total_audits: u32,
    pub avg_score: String,
    pub pending_count: usize,
}

impl From<&UserDashboard> for DashboardVm {
    fn from(dashboard: &UserDashboard) -> Self {
        Self {
            initial: dashboard.initial(),
            display_name: dashboard.user.display_name().to_string(),
            designation: dashboard
                .employee
                .as_ref()
                .and_then(|e| e.designation.clone()),
            total_audits: dashboard.stats.total_audits,
            avg_score: dashboard.stats.avg_score_label(),
            pending_count: dashboard.pending_progress.len(),
        }
    }
}
