// directory/src/dashboard.rs

use std::collections::BTreeMap;

use models::ListingKind;
use serde::{Deserialize, Serialize};
use storage_gateway::{Gateway, SelectQuery};
use tracing::warn;

use crate::contact::{ContactInbox, StatusCounts};
use crate::notify::Notifier;

/// Record counts per listing kind (keyed by slug; `None` when the count
/// could not be read) and contact-message counts per status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub listings: BTreeMap<String, Option<usize>>,
    pub messages: StatusCounts,
}

pub async fn dashboard(gateway: &dyn Gateway, inbox: &ContactInbox, notifier: &dyn Notifier) -> DashboardStats {
    let mut listings = BTreeMap::new();
    for kind in ListingKind::ALL {
        let count = match gateway.select(kind.collection(), &SelectQuery::all()).await {
            Ok(rows) => Some(rows.len()),
            Err(e) => {
                warn!(%kind, error = %e, "failed to count listings");
                notifier.error(&format!("Failed to count {}: {e}", kind.collection()));
                None
            }
        };
        listings.insert(kind.slug().to_string(), count);
    }
    DashboardStats {
        listings,
        messages: inbox.counts(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationLog;
    use models::{Collection, GatewayError};
    use serde_json::json;
    use storage_gateway::{InMemoryGateway, Operation};

    #[tokio::test]
    async fn counts_each_kind_and_reports_failures_as_missing() {
        let gateway = InMemoryGateway::new();
        gateway
            .seed(Collection::Doctors, vec![json!({ "name": "A" }), json!({ "name": "B" })])
            .await;
        // Doctors are counted first, so their count is the one that fails.
        gateway.fail_next(Operation::Select, GatewayError::Network("timeout".into()));
        let log = NotificationLog::new();

        let first = dashboard(&gateway, &ContactInbox::new(), &log).await;
        assert_eq!(first.listings["doctors"], None);
        assert!(log.has_errors());

        let stats = dashboard(&gateway, &ContactInbox::with_demo_messages(), &log).await;
        assert_eq!(stats.listings["doctors"], Some(2));
        assert_eq!(stats.listings["hospitals"], Some(0));
        assert_eq!(stats.listings.len(), 4);
        assert_eq!(stats.messages.total, 4);
    }
}
