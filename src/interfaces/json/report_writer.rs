use crate::domain::payment::PaymentResponse;
use crate::domain::transaction::Transaction;
use crate::domain::webhook::WebhookEvent;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditReport<'a> {
    transactions: &'a [Transaction],
    webhook_events: &'a [WebhookEvent],
}

/// Writes payment responses as JSON lines, followed by a final audit report
/// covering all stored transactions and dispatched webhook events.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(&mut self, response: &PaymentResponse) -> Result<()> {
        serde_json::to_writer(&mut self.writer, response)?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn write_audit(
        &mut self,
        transactions: &[Transaction],
        webhook_events: &[WebhookEvent],
    ) -> Result<()> {
        let report = AuditReport {
            transactions,
            webhook_events,
        };
        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        Ok(())
    }
}
