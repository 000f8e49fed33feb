//! Export file naming and the pre-filled mail draft.

use unicode_normalization::UnicodeNormalization;

use crate::core::{ReportConfig, ReportRequest};

/// Strip diacritics and non-ASCII characters, replace spaces with `_`.
pub fn ascii_slug(s: &str) -> String {
    s.nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// File stem derived from the title and the request's date range,
/// e.g. `Reporte_Facturas_del_01-01-2024_al_31-01-2024`.
pub fn export_file_stem(title: &str, request: &ReportRequest) -> String {
    ascii_slug(&format!(
        "{title} del {} al {}",
        request.start().format("%d-%m-%Y"),
        request.end().format("%d-%m-%Y"),
    ))
}

/// File name of the spreadsheet export.
pub fn export_filename(title: &str, request: &ReportRequest) -> String {
    format!("{}.xml", export_file_stem(title, request))
}

/// Percent-encode everything except RFC 3986 unreserved characters.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// A pre-filled message announcing the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    /// Draft addressed per `config`, subject taken from the export file stem.
    pub fn new(config: &ReportConfig, file_stem: &str, body: impl Into<String>) -> Self {
        Self {
            to: config.mail_to.clone(),
            cc: config.mail_cc.clone(),
            subject: file_stem.replace('_', " "),
            body: body.into(),
        }
    }

    /// `mailto:` URI with encoded subject and body.
    pub fn mailto_uri(&self) -> String {
        let mut uri = format!("mailto:{}?", self.to.join(","));
        if !self.cc.is_empty() {
            uri.push_str(&format!("cc={}&", self.cc.join(",")));
        }
        uri.push_str(&format!(
            "subject={}&body={}",
            percent_encode(&self.subject),
            percent_encode(&self.body)
        ));
        uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn january() -> ReportRequest {
        ReportRequest::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn slug_strips_accents() {
        assert_eq!(ascii_slug("Relación de Facturas Ñandú"), "Relacion_de_Facturas_Nandu");
    }

    #[test]
    fn stem_and_filename() {
        assert_eq!(
            export_file_stem("Reporte Facturas", &january()),
            "Reporte_Facturas_del_01-01-2024_al_31-01-2024"
        );
        assert_eq!(
            export_filename("Reporte Facturas", &january()),
            "Reporte_Facturas_del_01-01-2024_al_31-01-2024.xml"
        );
    }

    #[test]
    fn percent_encoding() {
        assert_eq!(percent_encode("a b&c"), "a%20b%26c");
        assert_eq!(percent_encode("día\n"), "d%C3%ADa%0A");
        assert_eq!(percent_encode("1.234,56"), "1.234%2C56");
    }

    #[test]
    fn mailto_restores_spaces_in_subject() {
        let config = ReportConfig {
            mail_to: vec!["a@example.com".into()],
            mail_cc: vec!["b@example.com".into(), "c@example.com".into()],
            ..Default::default()
        };
        let draft = MailDraft::new(&config, "Reporte_Facturas", "Total: $ 1,00");
        assert_eq!(draft.subject, "Reporte Facturas");
        assert_eq!(
            draft.mailto_uri(),
            "mailto:a@example.com?cc=b@example.com,c@example.com&subject=Reporte%20Facturas&body=Total%3A%20%24%201%2C00"
        );
    }

    #[test]
    fn mailto_without_cc() {
        let draft = MailDraft::new(&ReportConfig::default(), "x", "");
        assert_eq!(draft.mailto_uri(), "mailto:?subject=x&body=");
    }
}
