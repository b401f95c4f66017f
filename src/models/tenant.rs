use serde::{Deserialize, Serialize};

use super::enums::{SubscriptionPlan, SubscriptionStatus};

/// A hospital/clinic account on the platform. Counters are aggregated
/// server-side and read-only for the superadmin views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub domain: String,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub user_count: u32,
    #[serde(default)]
    pub monthly_revenue_cents: i64,
}
