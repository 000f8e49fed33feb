//! Cell layout shared by the CSV and spreadsheet exports.
//!
//! Row 0 is the column header, ledger rows follow from row 1. A fixed
//! summary block occupies columns L:M (0-based 11 and 12) from row 0.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::format::CurrencyFormat;
use crate::core::{DOLLAR_LABEL, Entity, EntityTotals, LOCAL_LABEL, Ledger};

/// Export column headers, in order.
pub const COLUMNS: [&str; 10] = [
    "Empresa",
    "Número",
    "Fecha",
    "Nro. Factura",
    "Cliente",
    "Exento",
    "Total Gravado",
    "Impuesto",
    "Total",
    "Moneda",
];

/// First column of the summary block (column L).
pub const SUMMARY_COLUMN: u32 = 11;

/// A fixed position of the summary block holding one (entity, currency) total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySlot {
    pub entity: Entity,
    pub currency: &'static str,
    pub row: u32,
    pub label: &'static str,
}

/// Known (entity, currency) combinations and where their totals go.
pub const SUMMARY_SLOTS: &[SummarySlot] = &[
    SummarySlot {
        entity: Entity::Blv,
        currency: LOCAL_LABEL,
        row: 1,
        label: "Total BLV Bs.",
    },
    SummarySlot {
        entity: Entity::Blv,
        currency: DOLLAR_LABEL,
        row: 2,
        label: "Total BLV $",
    },
    SummarySlot {
        entity: Entity::Crlv,
        currency: DOLLAR_LABEL,
        row: 3,
        label: "Total CRLV $",
    },
];

const SUMMARY_TITLE_ROW: u32 = 0;
const INVOICE_COUNT_ROW: u32 = 5;
const TAX_TOTAL_ROW: u32 = 6;
const GRAND_TOTAL_ROW: u32 = 7;

/// Value of a single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Date(NaiveDate),
    Number(Decimal),
    Integer(u64),
    Amount {
        value: Decimal,
        format: CurrencyFormat,
    },
}

/// Sparse grid of cells addressed by 0-based (row, column).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&mut self, row: u32, column: u32, value: CellValue) {
        self.cells.insert((row, column), value);
    }

    pub fn get(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cells.get(&(row, column))
    }

    /// Number of rows up to and including the last non-empty one.
    pub fn row_count(&self) -> u32 {
        self.cells.keys().map(|(r, _)| r + 1).max().unwrap_or(0)
    }

    /// Number of columns up to and including the rightmost non-empty one.
    pub fn column_count(&self) -> u32 {
        self.cells.keys().map(|(_, c)| c + 1).max().unwrap_or(0)
    }

    /// Non-empty cells of `row`, left to right.
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u32, &CellValue)> {
        self.cells
            .range((row, 0)..=(row, u32::MAX))
            .map(|((_, c), v)| (*c, v))
    }
}

/// Lay out the ledger and its totals.
pub fn build_sheet(ledger: &Ledger, totals: &EntityTotals, sheet_name: &str) -> Sheet {
    let mut sheet = Sheet::new(sheet_name);

    for (col, header) in (0u32..).zip(COLUMNS) {
        sheet.set(0, col, CellValue::Text(header.to_string()));
    }

    for (row_idx, row) in (1u32..).zip(ledger) {
        let format = CurrencyFormat::for_label(&row.currency_label);
        let amount = |value| CellValue::Amount { value, format };

        sheet.set(row_idx, 0, CellValue::Text(row.entity.tag().to_string()));
        sheet.set(row_idx, 1, CellValue::Text(row.document_id.clone()));
        if let Some(date) = row.issue_date {
            sheet.set(row_idx, 2, CellValue::Date(date));
        }
        sheet.set(row_idx, 3, CellValue::Text(row.next_invoice_number.clone()));
        sheet.set(row_idx, 4, CellValue::Text(row.customer_name.clone()));
        sheet.set(row_idx, 5, amount(row.exempt_amount));
        sheet.set(row_idx, 6, amount(row.taxable_base));
        sheet.set(row_idx, 7, amount(row.tax_amount));
        sheet.set(row_idx, 8, amount(row.total_amount));
        sheet.set(row_idx, 9, CellValue::Text(row.currency_label.clone()));
    }

    write_summary_block(&mut sheet, totals);
    sheet
}

fn write_summary_block(sheet: &mut Sheet, totals: &EntityTotals) {
    let label_col = SUMMARY_COLUMN;
    let value_col = SUMMARY_COLUMN + 1;

    sheet.set(SUMMARY_TITLE_ROW, label_col, CellValue::Text("Resumen".into()));
    for slot in SUMMARY_SLOTS {
        sheet.set(slot.row, label_col, CellValue::Text(slot.label.into()));
        sheet.set(
            slot.row,
            value_col,
            CellValue::Amount {
                value: totals.get(slot.entity, slot.currency),
                format: CurrencyFormat::for_label(slot.currency),
            },
        );
    }

    sheet.set(
        INVOICE_COUNT_ROW,
        label_col,
        CellValue::Text("Total Facturas".into()),
    );
    sheet.set(
        INVOICE_COUNT_ROW,
        value_col,
        CellValue::Integer(totals.row_count() as u64),
    );

    let metrics = [
        (TAX_TOTAL_ROW, "Total Impuesto", totals.tax_total()),
        (GRAND_TOTAL_ROW, "Total General", totals.grand_total()),
    ];
    for (row, label, value) in metrics {
        sheet.set(row, label_col, CellValue::Text(label.into()));
        sheet.set(row, value_col, CellValue::Number(value));
    }
}
