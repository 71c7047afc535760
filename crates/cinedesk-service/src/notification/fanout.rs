//! Recipient resolution and delivery materialization.

use tracing::debug;

use cinedesk_core::AppResult;
use cinedesk_core::types::NotificationId;
use cinedesk_database::stores::NotificationTx;
use cinedesk_entity::notification::{DeliveryReport, SendingTarget};

/// Stream the recipients of `target` in keyset pages of `batch_size` and
/// insert one delivery row per recipient.
///
/// Rows that already exist are skipped, so running this twice for the same
/// notification inserts only what is missing. The caller owns the
/// transaction and decides whether to commit.
pub async fn fan_out(
    tx: &mut dyn NotificationTx,
    notification_id: NotificationId,
    target: &SendingTarget,
    batch_size: u32,
) -> AppResult<DeliveryReport> {
    let batch_size = batch_size.max(1);
    let mut report = DeliveryReport::default();
    let mut after = None;

    loop {
        let recipients = tx.recipient_page(target, after, batch_size).await?;
        let Some(last) = recipients.last().copied() else {
            break;
        };

        let inserted = tx.insert_deliveries(notification_id, &recipients).await?;
        report.record_batch(recipients.len(), inserted);
        debug!(
            notification_id = %notification_id,
            batch = report.batches,
            recipients = recipients.len(),
            inserted,
            "Delivery batch written"
        );

        if recipients.len() < batch_size as usize {
            break;
        }
        after = Some(last);
    }

    Ok(report)
}
