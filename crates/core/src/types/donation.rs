//! Donation records consumed by the analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Amount, CampaignId, DonationId};

/// A confirmed donation.
///
/// Field names follow the backend's `donations` table (`snake_case`); the
/// camelCase names used by older dashboard exports are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    /// Opaque row identifier.
    pub id: DonationId,
    /// Donated amount, never negative.
    #[serde(default)]
    pub amount: Amount,
    /// Donor email address, if the donor left one.
    #[serde(default, alias = "donorEmail")]
    pub donor_email: Option<String>,
    /// Donor first name, if the donor left one.
    #[serde(default, alias = "donorFirstName")]
    pub donor_first_name: Option<String>,
    /// Campaign the donation was made for, if any.
    #[serde(default, alias = "campaignId", skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    /// When the donation was recorded.
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl DonationRecord {
    /// Create a record with no donor details.
    #[must_use]
    pub fn new(id: impl Into<DonationId>, amount: Amount, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            amount,
            donor_email: None,
            donor_first_name: None,
            campaign_id: None,
            created_at,
        }
    }

    /// Name to show for the donor: first name, then email, then "Anonymous".
    #[must_use]
    pub fn donor_display_name(&self) -> &str {
        self.donor_first_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.donor_email.as_deref())
            .unwrap_or("Anonymous")
    }
}
