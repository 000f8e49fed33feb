use serde::{Deserialize, Serialize};

/// Configuration of a report cycle: query scope, export naming and mail routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Customer whose invoices are reported (`invoice_partner_display_name`).
    pub customer_name: String,
    /// Title used for the export file name and mail subject.
    pub report_title: String,
    /// Worksheet name of the spreadsheet export.
    pub sheet_name: String,
    /// Recipients of the mail draft.
    pub mail_to: Vec<String>,
    /// Carbon-copy recipients of the mail draft.
    pub mail_cc: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            customer_name: "FARMACIA FARMAGO, C.A.".into(),
            report_title: "Reporte Facturas".into(),
            sheet_name: "Reporte".into(),
            mail_to: Vec::new(),
            mail_cc: Vec::new(),
        }
    }
}

/// Builder for [`ReportConfig`].
///
/// # Example
///
/// ```
/// use facturas::core::ReportConfigBuilder;
///
/// let config = ReportConfigBuilder::new("FARMACIA FARMAGO, C.A.")
///     .report_title("Relación de Facturas")
///     .mail_to("cobranzas@example.com")
///     .mail_cc("gerencia@example.com")
///     .build();
/// assert_eq!(config.mail_to, ["cobranzas@example.com"]);
/// ```
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Create a new builder for the given customer.
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self {
            config: ReportConfig {
                customer_name: customer_name.into(),
                ..Default::default()
            },
        }
    }

    /// Set the report title.
    pub fn report_title(mut self, title: impl Into<String>) -> Self {
        self.config.report_title = title.into();
        self
    }

    /// Set the worksheet name.
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.config.sheet_name = name.into();
        self
    }

    /// Add a recipient.
    pub fn mail_to(mut self, address: impl Into<String>) -> Self {
        self.config.mail_to.push(address.into());
        self
    }

    /// Add a carbon-copy recipient.
    pub fn mail_cc(mut self, address: impl Into<String>) -> Self {
        self.config.mail_cc.push(address.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ReportConfig {
        self.config
    }
}
