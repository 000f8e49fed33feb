//! Excel 2003 SpreadsheetML workbook generation.
//!
//! A single-file XML workbook Excel and LibreOffice open natively. Amount
//! cells are written as numbers with a per-currency number format.

use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::format::CurrencyFormat;
use super::layout::{CellValue, Sheet};
use crate::core::ReportError;

const SS_NAMESPACE: &str = "urn:schemas-microsoft-com:office:spreadsheet";

const STYLE_DOLLAR: &str = "usd";
const STYLE_LOCAL: &str = "ves";
const STYLE_DATE: &str = "date";
const STYLE_NUMBER: &str = "num";
const STYLE_INTEGER: &str = "int";

fn xml_io(e: std::io::Error) -> ReportError {
    ReportError::Export(format!("XML write error: {e}"))
}

struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    fn new() -> Result<Self, ReportError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 1);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        writer
            .get_mut()
            .write_all(b"\n<?mso-application progid=\"Excel.Sheet\"?>")
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    fn into_string(self) -> Result<String, ReportError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| ReportError::Export(format!("XML UTF-8 error: {e}")))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, ReportError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, ReportError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Empty(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn end(&mut self, name: &str) -> Result<&mut Self, ReportError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn text_element(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, ReportError> {
        self.start(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end(name)
    }
}

/// Render the sheet as a SpreadsheetML workbook.
pub fn to_spreadsheet_xml(sheet: &Sheet) -> Result<String, ReportError> {
    let mut w = XmlWriter::new()?;

    w.start("Workbook", &[("xmlns", SS_NAMESPACE), ("xmlns:ss", SS_NAMESPACE)])?;
    write_styles(&mut w)?;

    w.start("Worksheet", &[("ss:Name", sheet.name())])?;
    w.start("Table", &[])?;
    for row in 0..sheet.row_count() {
        let row_index = (row + 1).to_string();
        w.start("Row", &[("ss:Index", &row_index)])?;
        for (col, value) in sheet.row(row) {
            write_cell(&mut w, col, value)?;
        }
        w.end("Row")?;
    }
    w.end("Table")?;
    w.end("Worksheet")?;

    w.end("Workbook")?;
    w.into_string()
}

fn write_styles(w: &mut XmlWriter) -> Result<(), ReportError> {
    w.start("Styles", &[])?;
    for (id, format) in [
        (STYLE_DOLLAR, "\"$\"\\ #,##0.00"),
        (STYLE_LOCAL, "\"Bs.\"\\ #,##0.00"),
        (STYLE_DATE, "dd/mm/yyyy"),
        (STYLE_NUMBER, "#,##0.00"),
        (STYLE_INTEGER, "#,##0"),
    ] {
        w.start("Style", &[("ss:ID", id)])?;
        w.empty("NumberFormat", &[("ss:Format", format)])?;
        w.end("Style")?;
    }
    w.end("Styles")?;
    Ok(())
}

fn write_cell(w: &mut XmlWriter, col: u32, value: &CellValue) -> Result<(), ReportError> {
    let index = (col + 1).to_string();
    let (kind, text, style) = match value {
        CellValue::Text(s) => ("String", s.clone(), None),
        CellValue::Date(d) => (
            "DateTime",
            d.format("%Y-%m-%dT00:00:00.000").to_string(),
            Some(STYLE_DATE),
        ),
        CellValue::Number(n) => ("Number", n.normalize().to_string(), Some(STYLE_NUMBER)),
        CellValue::Integer(n) => ("Number", n.to_string(), Some(STYLE_INTEGER)),
        CellValue::Amount { value, format } => {
            let style = match format {
                CurrencyFormat::Dollar => STYLE_DOLLAR,
                CurrencyFormat::Local => STYLE_LOCAL,
            };
            ("Number", value.round_dp(2).normalize().to_string(), Some(style))
        }
    };

    match style {
        Some(style) => w.start("Cell", &[("ss:Index", &index), ("ss:StyleID", style)])?,
        None => w.start("Cell", &[("ss:Index", &index)])?,
    };
    w.text_element("Data", &text, &[("ss:Type", kind)])?;
    w.end("Cell")?;
    Ok(())
}
