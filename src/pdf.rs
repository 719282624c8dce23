//! Printable report generation.
//!
//! A report is an HTML document string rendered into a fresh browser
//! window; the browser's print dialog produces the PDF. Building the
//! string is pure so the section selection stays testable.

use std::collections::HashMap;

use crate::aggregate::{
    FinanceSummary, HrSummary, ProductionSummary, SalesSummary, WarehouseSummary,
};
use crate::format::{format_percent, format_quantity, format_rupiah};
use crate::models::{Account, AppSettings, Division, DivisionKind, EntriHarian, ValueType};

pub struct ReportPayload<'a> {
    pub date: &'a str,
    pub division: &'a Division,
    pub entries: &'a [EntriHarian],
    pub accounts: &'a [Account],
    pub summary: Option<ReportSummary>,
    pub settings: &'a AppSettings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportSummary {
    Finance(FinanceSummary),
    Sales(SalesSummary),
    Production(ProductionSummary),
    Warehouse(WarehouseSummary),
    Hr(HrSummary),
}

fn esc(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const REPORT_STYLE: &str = "\
body{font-family:Arial,Helvetica,sans-serif;color:#1e293b;margin:24px;}\
h1{font-size:20px;margin:0;}h2{font-size:14px;margin:18px 0 6px;}\
.meta{color:#64748b;font-size:12px;margin-top:4px;}\
table{width:100%;border-collapse:collapse;margin-top:8px;font-size:12px;}\
th,td{border:1px solid #cbd5e1;padding:6px 8px;text-align:left;}\
th{background:#f1f5f9;}td.num{text-align:right;}\
.footer{margin-top:24px;color:#94a3b8;font-size:11px;}";

fn summary_row(out: &mut String, label: &str, value: &str) {
    out.push_str("<tr><th>");
    out.push_str(&esc(label));
    out.push_str("</th><td class=\"num\">");
    out.push_str(&esc(value));
    out.push_str("</td></tr>");
}

fn summary_section(out: &mut String, summary: &ReportSummary) {
    out.push_str("<h2>Ringkasan</h2><table>");
    match summary {
        ReportSummary::Finance(s) => {
            summary_row(out, "Total Penerimaan", &format_rupiah(s.penerimaan));
            summary_row(out, "Total Pengeluaran", &format_rupiah(s.pengeluaran));
            summary_row(out, "Saldo", &format_rupiah(s.saldo));
        }
        ReportSummary::Sales(s) => {
            summary_row(out, "Total Target", &format_quantity(s.total_target));
            summary_row(out, "Total Realisasi", &format_quantity(s.total_realisasi));
            summary_row(out, "Pencapaian", &format_percent(s.rate));
            summary_row(out, "Status", s.tier().general_label());
        }
        ReportSummary::Production(s) => {
            summary_row(out, "Hasil Produksi", &format_quantity(s.total_hasil));
            summary_row(out, "Barang Gagal", &format_quantity(s.total_gagal));
            summary_row(out, "Stock Barang Jadi", &format_quantity(s.total_stock));
            summary_row(out, "HPP Barang Jadi", &format_rupiah(s.total_hpp));
            summary_row(out, "Efisiensi", &format_percent(s.efficiency));
            summary_row(out, "Status", s.tier().production_label());
        }
        ReportSummary::Warehouse(s) => {
            summary_row(out, "Total Pemakaian", &format_quantity(s.total_pemakaian));
            summary_row(out, "Total Stok Akhir", &format_quantity(s.total_stok));
            summary_row(out, "Ketersediaan", &format_percent(s.availability));
            summary_row(out, "Status", s.tier().general_label());
        }
        ReportSummary::Hr(s) => {
            summary_row(out, "Hadir", &s.hadir.to_string());
            summary_row(out, "Tidak Hadir", &s.tidak_hadir.to_string());
            summary_row(out, "Sakit", &s.sakit.to_string());
            summary_row(out, "Izin", &s.izin.to_string());
            summary_row(out, "Total Absen", &s.total_absen.to_string());
            summary_row(out, "Tingkat Kehadiran", &format_percent(s.presence_rate));
            summary_row(out, "Status", s.tier().general_label());
        }
    }
    out.push_str("</table>");
}

/// Column set for a division's detail table; shared by the printable
/// report, the dashboard table, and the CSV export.
pub fn detail_header(kind: DivisionKind) -> &'static [&'static str] {
    match kind {
        DivisionKind::Keuangan => &["Kode", "Akun", "Jenis", "Deskripsi", "Nilai"],
        DivisionKind::Pemasaran => &["Kode", "Akun", "Target", "Realisasi", "Pencapaian"],
        DivisionKind::Produksi => &["Kode", "Akun", "Deskripsi", "Hasil", "HPP"],
        DivisionKind::Gudang => &["Kode", "Akun", "Pemakaian", "Stok Akhir"],
        DivisionKind::Hrd => &["Kode", "Akun", "Status", "Shift", "Jumlah Absen"],
        DivisionKind::Umum => &["Kode", "Akun", "Deskripsi", "Nilai"],
    }
}

fn entri_value(entri: &EntriHarian, account: Option<&Account>) -> String {
    match account.map(|a| a.value_type) {
        Some(ValueType::Kuantitas) => format_quantity(entri.nilai),
        _ => format_rupiah(entri.nilai),
    }
}

pub fn detail_cells(
    kind: DivisionKind,
    entri: &EntriHarian,
    account: Option<&Account>,
) -> Vec<String> {
    let code = account.map(|a| a.account_code.clone()).unwrap_or_default();
    let name = account.map(|a| a.account_name.clone()).unwrap_or_else(|| "-".to_string());
    let description = entri.description.clone().unwrap_or_default();
    match kind {
        DivisionKind::Keuangan => vec![
            code,
            name,
            entri.transaction_type.clone().unwrap_or_default(),
            description,
            entri_value(entri, account),
        ],
        DivisionKind::Pemasaran => {
            let target = entri.target_amount.unwrap_or(0.0);
            let realisasi = entri.realisasi_amount.unwrap_or(entri.nilai);
            vec![
                code,
                name,
                format_quantity(target),
                format_quantity(realisasi),
                format_percent(crate::aggregate::achievement_rate(realisasi, target)),
            ]
        }
        DivisionKind::Produksi => vec![
            code,
            name,
            description,
            format_quantity(entri.nilai),
            format_rupiah(entri.hpp_amount.unwrap_or(0.0)),
        ],
        DivisionKind::Gudang => vec![
            code,
            name,
            format_quantity(entri.pemakaian_amount.unwrap_or(entri.nilai)),
            format_quantity(entri.stok_akhir.unwrap_or(0.0)),
        ],
        DivisionKind::Hrd => vec![
            code,
            name,
            entri.attendance_status.clone().unwrap_or_default(),
            entri.shift.clone().unwrap_or_default(),
            entri.absent_count.unwrap_or(0).to_string(),
        ],
        DivisionKind::Umum => vec![code, name, description, entri_value(entri, account)],
    }
}

/// Build the printable report for one division and date.
pub fn build_report_html(payload: &ReportPayload<'_>) -> String {
    let kind = DivisionKind::from_name(&payload.division.name);
    let index: HashMap<i64, &Account> =
        payload.accounts.iter().map(|a| (a.id, a)).collect();

    let mut out = String::new();
    out.push_str("<style>");
    out.push_str(REPORT_STYLE);
    out.push_str("</style>");

    out.push_str("<h1>");
    out.push_str(&esc(&payload.settings.company_name));
    out.push_str("</h1><div class=\"meta\">Laporan Harian — ");
    out.push_str(&esc(&payload.division.name));
    out.push_str(" — ");
    out.push_str(&esc(payload.date));
    out.push_str("</div>");
    if !payload.settings.company_address.is_empty() {
        out.push_str("<div class=\"meta\">");
        out.push_str(&esc(&payload.settings.company_address));
        out.push_str("</div>");
    }

    if let Some(summary) = &payload.summary {
        summary_section(&mut out, summary);
    }

    out.push_str("<h2>Rincian Entri</h2><table><tr>");
    for head in detail_header(kind) {
        out.push_str("<th>");
        out.push_str(head);
        out.push_str("</th>");
    }
    out.push_str("</tr>");

    if payload.entries.is_empty() {
        out.push_str(&format!(
            "<tr><td colspan=\"{}\">Belum ada entri untuk tanggal ini.</td></tr>",
            detail_header(kind).len()
        ));
    } else {
        for entri in payload.entries {
            let account = index.get(&entri.account_id).copied();
            out.push_str("<tr>");
            for cell in detail_cells(kind, entri, account) {
                out.push_str("<td>");
                out.push_str(&esc(&cell));
                out.push_str("</td>");
            }
            out.push_str("</tr>");
        }
    }
    out.push_str("</table>");

    if !payload.settings.report_footer.is_empty() {
        out.push_str("<div class=\"footer\">");
        out.push_str(&esc(&payload.settings.report_footer));
        out.push_str("</div>");
    }
    out
}

/// Render `html` into a new window; optionally invoke the print dialog.
/// A blocked popup is a silent no-op.
pub fn open_report_window(html: &str, title: &str, auto_print: bool) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(Some(report_window)) = window.open_with_url_and_target("", "_blank") else {
        return;
    };
    let Some(document) = report_window.document() else {
        return;
    };
    document.set_title(title);
    if let Some(body) = document.body() {
        body.set_inner_html(html);
    }
    if auto_print {
        let _ = report_window.print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::sales_summary;
    use crate::models::Division;

    fn division(name: &str) -> Division {
        Division {
            id: 2,
            name: name.to_string(),
        }
    }

    fn account(id: i64, code: &str, name: &str, value_type: ValueType) -> Account {
        Account {
            id,
            account_code: code.to_string(),
            account_name: name.to_string(),
            value_type,
            division: division("PEMASARAN & PENJUALAN"),
            status: "active".to_string(),
            created_by: None,
        }
    }

    fn entri(account_id: i64, nilai: f64) -> EntriHarian {
        EntriHarian {
            id: 1,
            account_id,
            tanggal: "2026-08-07".to_string(),
            nilai,
            description: Some("Penjualan reguler".to_string()),
            created_by: None,
            created_at: None,
            transaction_type: None,
            target_amount: Some(100.0),
            realisasi_amount: Some(nilai),
            hpp_amount: None,
            pemakaian_amount: None,
            stok_akhir: None,
            attendance_status: None,
            shift: None,
            absent_count: None,
        }
    }

    #[test]
    fn sales_division_gets_target_columns() {
        let accounts = vec![account(1, "2-001", "Produk A", ValueType::Kuantitas)];
        let entries = vec![entri(1, 96.0)];
        let settings = AppSettings::default();
        let div = division("PEMASARAN & PENJUALAN");
        let payload = ReportPayload {
            date: "2026-08-07",
            division: &div,
            entries: &entries,
            accounts: &accounts,
            summary: Some(ReportSummary::Sales(sales_summary(&entries))),
            settings: &settings,
        };
        let html = build_report_html(&payload);
        assert!(html.contains("PEMASARAN &amp; PENJUALAN"));
        assert!(html.contains("<th>Target</th>"));
        assert!(html.contains("Pencapaian"));
        assert!(html.contains("Excellent"), "96% realization is Excellent: {html}");
    }

    #[test]
    fn detail_table_has_one_row_per_entry() {
        let accounts = vec![account(1, "2-001", "Produk A", ValueType::Kuantitas)];
        let entries = vec![entri(1, 10.0), entri(1, 20.0), entri(1, 30.0)];
        let settings = AppSettings::default();
        let div = division("Produksi");
        let payload = ReportPayload {
            date: "2026-08-07",
            division: &div,
            entries: &entries,
            accounts: &accounts,
            summary: None,
            settings: &settings,
        };
        let html = build_report_html(&payload);
        let rows = html.matches("<tr>").count();
        assert_eq!(rows, entries.len() + 1, "header row plus one per entry");
    }

    #[test]
    fn empty_day_renders_placeholder_row() {
        let settings = AppSettings::default();
        let div = division("HRD");
        let payload = ReportPayload {
            date: "2026-08-07",
            division: &div,
            entries: &[],
            accounts: &[],
            summary: None,
            settings: &settings,
        };
        let html = build_report_html(&payload);
        assert!(html.contains("Belum ada entri"));
    }

    #[test]
    fn user_text_is_html_escaped() {
        let accounts = vec![account(1, "1-001", "Kas <utama>", ValueType::Nominal)];
        let mut row = entri(1, 1000.0);
        row.description = Some("setoran \"pagi\" & sore".to_string());
        let entries = vec![row];
        let settings = AppSettings::default();
        let div = division("Keuangan & Administrasi");
        let payload = ReportPayload {
            date: "2026-08-07",
            division: &div,
            entries: &entries,
            accounts: &accounts,
            summary: None,
            settings: &settings,
        };
        let html = build_report_html(&payload);
        assert!(html.contains("Kas &lt;utama&gt;"));
        assert!(html.contains("&quot;pagi&quot; &amp; sore"));
        assert!(!html.contains("Kas <utama>"));
    }
}
