//! One report cycle: fetch, normalize, merge, then filter and format on demand.

use super::csv_export::to_csv;
use super::layout::{Sheet, build_sheet};
use super::mail::{MailDraft, export_file_stem, export_filename};
use super::summary::summary_text;
use crate::core::{
    Entity, EntityTotals, ExclusionPolicy, Ledger, RawInvoiceA, RawInvoiceB, RecordSource,
    ReportConfig, ReportError, ReportRequest, SearchQuery, aggregate_totals, merge_ledgers,
    normalize_source_a, normalize_source_b,
};

/// Result of a report cycle: the unfiltered ledger and what it was built from.
///
/// Holding on to this value replaces re-fetching when only the exclusion
/// controls change.
#[derive(Debug, Clone)]
pub struct ReportRun {
    request: ReportRequest,
    config: ReportConfig,
    ledger: Ledger,
    file_stem: String,
}

/// Fetch both backends and build the merged ledger.
///
/// The BLV backend is queried first, then CRLV. Either failure aborts the
/// whole cycle; no partial ledger is returned.
pub fn generate_report<A, B>(
    source_a: &A,
    source_b: &B,
    request: ReportRequest,
    config: &ReportConfig,
) -> Result<ReportRun, ReportError>
where
    A: RecordSource<RawInvoiceA> + ?Sized,
    B: RecordSource<RawInvoiceB> + ?Sized,
{
    let records_a = source_a
        .search_read(&SearchQuery::for_source_a(&request, config))
        .map_err(|error| ReportError::Fetch {
            entity: Entity::Blv,
            error,
        })?;
    let records_b = source_b
        .search_read(&SearchQuery::for_source_b(&request, config))
        .map_err(|error| ReportError::Fetch {
            entity: Entity::Crlv,
            error,
        })?;

    let ledger = merge_ledgers(
        normalize_source_a(&records_a),
        normalize_source_b(&records_b),
    );
    tracing::info!(
        start = %request.start(),
        end = %request.end(),
        blv = records_a.len(),
        crlv = records_b.len(),
        rows = ledger.len(),
        "report ledger built"
    );
    if ledger.is_empty() {
        tracing::info!("no invoices found for the requested range");
    }

    Ok(ReportRun {
        file_stem: export_file_stem(&config.report_title, &request),
        request,
        config: config.clone(),
        ledger,
    })
}

impl ReportRun {
    pub fn request(&self) -> &ReportRequest {
        &self.request
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The unfiltered ledger, for display.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Export file stem, e.g. `Reporte_Facturas_del_01-01-2024_al_31-01-2024`.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Export file name of the spreadsheet.
    pub fn filename(&self) -> String {
        export_filename(&self.config.report_title, &self.request)
    }

    /// Apply the exclusion controls and aggregate what remains.
    pub fn filtered(&self, policy: &ExclusionPolicy) -> FilteredReport<'_> {
        let ledger = self.ledger.apply_exclusions(policy);
        let totals = aggregate_totals(&ledger);
        FilteredReport {
            run: self,
            ledger,
            totals,
        }
    }
}

/// A filtered ledger with its totals, ready to be exported.
#[derive(Debug, Clone)]
pub struct FilteredReport<'a> {
    run: &'a ReportRun,
    ledger: Ledger,
    totals: EntityTotals,
}

impl FilteredReport<'_> {
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn totals(&self) -> &EntityTotals {
        &self.totals
    }

    /// Cell layout of the export.
    pub fn sheet(&self) -> Sheet {
        build_sheet(&self.ledger, &self.totals, &self.run.config.sheet_name)
    }

    /// CSV rendering of the export.
    pub fn csv(&self) -> String {
        to_csv(&self.sheet())
    }

    /// SpreadsheetML workbook of the export.
    #[cfg(feature = "spreadsheet")]
    pub fn spreadsheet_xml(&self) -> Result<String, ReportError> {
        super::spreadsheet::to_spreadsheet_xml(&self.sheet())
    }

    /// Human-readable totals for the outbound message.
    pub fn summary_text(&self) -> String {
        summary_text(&self.totals, &self.run.request)
    }

    /// Mail draft with the summary as body.
    pub fn mail_draft(&self) -> MailDraft {
        MailDraft::new(&self.run.config, &self.run.file_stem, self.summary_text())
    }
}
