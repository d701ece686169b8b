//! Row types returned by the backend REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paw_haven_core::{Amount, CampaignId, DonationId, DonationRecord, PaymentStatus};

/// Columns requested from the `donations` table.
pub const DONATION_COLUMNS: &str =
    "id,amount,status,donor_email,donor_first_name,campaign_id,created_at";

/// A row of the `donations` table.
///
/// `status` stays a raw string so that a status added on the backend does
/// not break decoding of the whole page; unknown statuses count as not
/// completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRow {
    pub id: DonationId,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "donorEmail")]
    pub donor_email: Option<String>,
    #[serde(default, alias = "donorFirstName")]
    pub donor_first_name: Option<String>,
    #[serde(default, alias = "campaignId")]
    pub campaign_id: Option<CampaignId>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl DonationRow {
    /// Parsed payment status, `None` when absent or unrecognized.
    #[must_use]
    pub fn payment_status(&self) -> Option<PaymentStatus> {
        self.status.as_deref().and_then(|s| s.trim().parse().ok())
    }

    /// Returns true if the row carries the `completed` status.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.payment_status().is_some_and(|s| s.is_completed())
    }
}

impl From<DonationRow> for DonationRecord {
    fn from(row: DonationRow) -> Self {
        Self {
            id: row.id,
            amount: row.amount,
            donor_email: row.donor_email,
            donor_first_name: row.donor_first_name,
            campaign_id: row.campaign_id,
            created_at: row.created_at,
        }
    }
}

/// Keep completed rows only and convert them to analytics records.
#[must_use]
pub fn completed_records(rows: Vec<DonationRow>) -> Vec<DonationRecord> {
    rows.into_iter()
        .filter(DonationRow::is_completed)
        .map(DonationRecord::from)
        .collect()
}
