//! Pure filter/aggregate helpers behind the report dashboards.
//!
//! Every dashboard renders its summary cards and its detail table from
//! the same filtered entry set, so the filtering and the totals live
//! here instead of being re-implemented per page.

use std::collections::HashMap;

use crate::format::normalize_date;
use crate::models::{Account, EntriHarian, LaporanGudang, LaporanProduksi};

/// Entries whose normalized date equals `date`. Rows with missing or
/// malformed dates are excluded.
pub fn filter_entries_by_date(entries: &[EntriHarian], date: &str) -> Vec<EntriHarian> {
    entries
        .iter()
        .filter(|e| normalize_date(&e.tanggal).as_deref() == Some(date))
        .cloned()
        .collect()
}

pub fn account_index(accounts: &[Account]) -> HashMap<i64, Account> {
    accounts.iter().map(|a| (a.id, a.clone())).collect()
}

/// Entries grouped by the owning account's division id. Entries whose
/// account is unknown are dropped, matching the scoping invariant that
/// every entry belongs to exactly one division via its account.
pub fn entries_by_division(
    entries: &[EntriHarian],
    accounts: &[Account],
) -> HashMap<i64, Vec<EntriHarian>> {
    let index = account_index(accounts);
    let mut grouped: HashMap<i64, Vec<EntriHarian>> = HashMap::new();
    for entri in entries {
        if let Some(account) = index.get(&entri.account_id) {
            grouped
                .entry(account.division.id)
                .or_default()
                .push(entri.clone());
        }
    }
    grouped
}

/// Realization as a percentage of target. A zero or negative target
/// yields 0 so empty days never show a divide-by-zero artifact.
pub fn achievement_rate(realisasi: f64, target: f64) -> f64 {
    if target <= 0.0 {
        0.0
    } else {
        realisasi / target * 100.0
    }
}

/// Deletion guard for accounts: `None` means the delete may proceed,
/// otherwise the message names the usage count blocking it.
pub fn account_delete_block(account_code: &str, usage_count: usize) -> Option<String> {
    if usage_count == 0 {
        None
    } else {
        Some(format!(
            "Akun {account_code} tidak dapat dihapus: masih dipakai {usage_count} entri harian"
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTier {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl StatusTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 95.0 {
            StatusTier::Excellent
        } else if rate >= 75.0 {
            StatusTier::Good
        } else if rate >= 55.0 {
            StatusTier::Fair
        } else {
            StatusTier::NeedsAttention
        }
    }

    pub fn general_label(self) -> &'static str {
        match self {
            StatusTier::Excellent => "Excellent",
            StatusTier::Good => "Good",
            StatusTier::Fair => "Fair",
            StatusTier::NeedsAttention => "Needs Attention",
        }
    }

    pub fn production_label(self) -> &'static str {
        match self {
            StatusTier::Excellent => "Optimal",
            StatusTier::Good => "Good",
            StatusTier::Fair => "Fair",
            StatusTier::NeedsAttention => "Needs Review",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            StatusTier::Excellent => "bg-green-100 text-green-700",
            StatusTier::Good => "bg-sky-100 text-sky-700",
            StatusTier::Fair => "bg-amber-100 text-amber-700",
            StatusTier::NeedsAttention => "bg-red-100 text-red-700",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinanceSummary {
    pub penerimaan: f64,
    pub pengeluaran: f64,
    pub saldo: f64,
}

/// Cash totals from finance entries. `transactionType` tags each row as
/// PENERIMAAN or PENGELUARAN; SALDO_AKHIR rows are backend snapshots and
/// stay out of the sums.
pub fn finance_summary(entries: &[EntriHarian]) -> FinanceSummary {
    let mut summary = FinanceSummary::default();
    for entri in entries {
        match entri.transaction_type.as_deref() {
            Some("PENERIMAAN") => summary.penerimaan += entri.nilai,
            Some("PENGELUARAN") => summary.pengeluaran += entri.nilai,
            _ => {}
        }
    }
    summary.saldo = summary.penerimaan - summary.pengeluaran;
    summary
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesSummary {
    pub total_target: f64,
    pub total_realisasi: f64,
    pub rate: f64,
}

/// Target vs realization for sales entries. Older rows carry the
/// realization in `nilai` only, so `realisasiAmount` falls back to it.
pub fn sales_summary(entries: &[EntriHarian]) -> SalesSummary {
    let mut summary = SalesSummary::default();
    for entri in entries {
        summary.total_target += entri.target_amount.unwrap_or(0.0);
        summary.total_realisasi += entri.realisasi_amount.unwrap_or(entri.nilai);
    }
    summary.rate = achievement_rate(summary.total_realisasi, summary.total_target);
    summary
}

impl SalesSummary {
    pub fn tier(&self) -> StatusTier {
        StatusTier::from_rate(self.rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProductionSummary {
    pub total_hasil: f64,
    pub total_gagal: f64,
    pub total_stock: f64,
    pub total_hpp: f64,
    pub efficiency: f64,
}

/// Output quality for production report rows: efficiency is the good
/// share of total output.
pub fn production_summary(rows: &[LaporanProduksi]) -> ProductionSummary {
    let mut summary = ProductionSummary::default();
    for row in rows {
        summary.total_hasil += row.hasil_produksi;
        summary.total_gagal += row.barang_gagal;
        summary.total_stock += row.stock_barang_jadi;
        summary.total_hpp += row.hp_barang_jadi;
    }
    if summary.total_hasil > 0.0 {
        summary.efficiency =
            (summary.total_hasil - summary.total_gagal) / summary.total_hasil * 100.0;
    }
    summary
}

impl ProductionSummary {
    pub fn tier(&self) -> StatusTier {
        StatusTier::from_rate(self.efficiency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WarehouseSummary {
    pub total_pemakaian: f64,
    pub total_stok: f64,
    pub availability: f64,
}

/// Stock position for warehouse report rows: availability is the share
/// of stock still on hand after the day's usage.
pub fn warehouse_summary(rows: &[LaporanGudang]) -> WarehouseSummary {
    let mut summary = WarehouseSummary::default();
    for row in rows {
        summary.total_pemakaian += row.pemakaian_amount;
        summary.total_stok += row.stok_akhir;
    }
    let base = summary.total_pemakaian + summary.total_stok;
    if base > 0.0 {
        summary.availability = summary.total_stok / base * 100.0;
    }
    summary
}

impl WarehouseSummary {
    pub fn tier(&self) -> StatusTier {
        StatusTier::from_rate(self.availability)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HrSummary {
    pub hadir: u32,
    pub tidak_hadir: u32,
    pub sakit: u32,
    pub izin: u32,
    pub total_absen: i64,
    pub presence_rate: f64,
}

/// Attendance roll-up for HRD entries. `absentCount` rows add to the
/// absence tally on top of the per-status counts.
pub fn hr_summary(entries: &[EntriHarian]) -> HrSummary {
    let mut summary = HrSummary::default();
    for entri in entries {
        match entri.attendance_status.as_deref() {
            Some("HADIR") => summary.hadir += 1,
            Some("TIDAK_HADIR") => summary.tidak_hadir += 1,
            Some("SAKIT") => summary.sakit += 1,
            Some("IZIN") => summary.izin += 1,
            _ => {}
        }
        summary.total_absen += entri.absent_count.unwrap_or(0);
    }
    let recorded = summary.hadir + summary.tidak_hadir + summary.sakit + summary.izin;
    if recorded > 0 {
        summary.presence_rate = f64::from(summary.hadir) / f64::from(recorded) * 100.0;
    }
    summary
}

impl HrSummary {
    pub fn tier(&self) -> StatusTier {
        StatusTier::from_rate(self.presence_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Division, ValueType};

    fn entri(id: i64, account_id: i64, tanggal: &str, nilai: f64) -> EntriHarian {
        EntriHarian {
            id,
            account_id,
            tanggal: tanggal.to_string(),
            nilai,
            description: None,
            created_by: None,
            created_at: None,
            transaction_type: None,
            target_amount: None,
            realisasi_amount: None,
            hpp_amount: None,
            pemakaian_amount: None,
            stok_akhir: None,
            attendance_status: None,
            shift: None,
            absent_count: None,
        }
    }

    fn account(id: i64, division_id: i64, division_name: &str) -> Account {
        Account {
            id,
            account_code: format!("{division_id}-00{id}"),
            account_name: format!("Akun {id}"),
            value_type: ValueType::Nominal,
            division: Division {
                id: division_id,
                name: division_name.to_string(),
            },
            status: "active".to_string(),
            created_by: None,
        }
    }

    #[test]
    fn date_filter_normalizes_timezone_suffixed_input() {
        let entries = vec![
            entri(1, 1, "2026-08-07", 100.0),
            entri(2, 1, "2026-08-07T23:59:00.000Z", 200.0),
            entri(3, 1, "2026-08-06T00:00:00.000Z", 300.0),
            entri(4, 1, "", 400.0),
        ];
        let filtered = filter_entries_by_date(&entries, "2026-08-07");
        assert_eq!(filtered.len(), 2, "plain and T-suffixed dates both match");
        assert!(filtered.iter().all(|e| e.nilai < 300.0));
    }

    #[test]
    fn date_filter_excludes_malformed_dates() {
        let entries = vec![entri(1, 1, "07/08/2026", 100.0), entri(2, 1, "   ", 50.0)];
        assert!(filter_entries_by_date(&entries, "2026-08-07").is_empty());
    }

    #[test]
    fn status_tier_boundaries() {
        assert_eq!(StatusTier::from_rate(96.0), StatusTier::Excellent);
        assert_eq!(StatusTier::from_rate(95.0), StatusTier::Excellent);
        assert_eq!(StatusTier::from_rate(94.9), StatusTier::Good);
        assert_eq!(StatusTier::from_rate(80.0), StatusTier::Good);
        assert_eq!(StatusTier::from_rate(75.0), StatusTier::Good);
        assert_eq!(StatusTier::from_rate(60.0), StatusTier::Fair);
        assert_eq!(StatusTier::from_rate(55.0), StatusTier::Fair);
        assert_eq!(StatusTier::from_rate(40.0), StatusTier::NeedsAttention);
    }

    #[test]
    fn status_labels_per_division_family() {
        assert_eq!(StatusTier::from_rate(96.0).general_label(), "Excellent");
        assert_eq!(StatusTier::from_rate(96.0).production_label(), "Optimal");
        assert_eq!(StatusTier::from_rate(40.0).general_label(), "Needs Attention");
        assert_eq!(StatusTier::from_rate(40.0).production_label(), "Needs Review");
    }

    #[test]
    fn achievement_rate_handles_zero_target() {
        assert_eq!(achievement_rate(50.0, 0.0), 0.0);
        assert_eq!(achievement_rate(80.0, 100.0), 80.0);
    }

    #[test]
    fn finance_summary_splits_by_transaction_type() {
        let mut masuk = entri(1, 1, "2026-08-07", 5_000_000.0);
        masuk.transaction_type = Some("PENERIMAAN".to_string());
        let mut keluar = entri(2, 1, "2026-08-07", 1_250_000.0);
        keluar.transaction_type = Some("PENGELUARAN".to_string());
        let mut snapshot = entri(3, 1, "2026-08-07", 9_999.0);
        snapshot.transaction_type = Some("SALDO_AKHIR".to_string());

        let summary = finance_summary(&[masuk, keluar, snapshot]);
        assert_eq!(summary.penerimaan, 5_000_000.0);
        assert_eq!(summary.pengeluaran, 1_250_000.0);
        assert_eq!(summary.saldo, 3_750_000.0, "snapshot rows stay out of the saldo");
    }

    #[test]
    fn sales_summary_falls_back_to_nilai_for_realisasi() {
        let mut a = entri(1, 1, "2026-08-07", 40.0);
        a.target_amount = Some(50.0);
        let mut b = entri(2, 1, "2026-08-07", 0.0);
        b.target_amount = Some(50.0);
        b.realisasi_amount = Some(56.0);

        let summary = sales_summary(&[a, b]);
        assert_eq!(summary.total_target, 100.0);
        assert_eq!(summary.total_realisasi, 96.0);
        assert_eq!(summary.rate, 96.0);
        assert_eq!(summary.tier(), StatusTier::Excellent);
    }

    #[test]
    fn production_summary_efficiency_is_good_share_of_output() {
        let rows = vec![
            LaporanProduksi {
                id: 1,
                account_id: 1,
                tanggal_laporan: "2026-08-07".to_string(),
                hasil_produksi: 900.0,
                barang_gagal: 100.0,
                stock_barang_jadi: 500.0,
                hp_barang_jadi: 20_000.0,
            },
            LaporanProduksi {
                id: 2,
                account_id: 2,
                tanggal_laporan: "2026-08-07".to_string(),
                hasil_produksi: 100.0,
                barang_gagal: 100.0,
                stock_barang_jadi: 0.0,
                hp_barang_jadi: 0.0,
            },
        ];
        let summary = production_summary(&rows);
        assert_eq!(summary.total_hasil, 1_000.0);
        assert_eq!(summary.efficiency, 80.0);
        assert_eq!(summary.tier(), StatusTier::Good);
    }

    #[test]
    fn hr_summary_counts_statuses_and_absences() {
        let mut hadir = entri(1, 1, "2026-08-07", 1.0);
        hadir.attendance_status = Some("HADIR".to_string());
        let mut hadir2 = entri(2, 1, "2026-08-07", 1.0);
        hadir2.attendance_status = Some("HADIR".to_string());
        let mut sakit = entri(3, 1, "2026-08-07", 1.0);
        sakit.attendance_status = Some("SAKIT".to_string());
        sakit.absent_count = Some(2);
        let mut izin = entri(4, 1, "2026-08-07", 1.0);
        izin.attendance_status = Some("IZIN".to_string());

        let summary = hr_summary(&[hadir, hadir2, sakit, izin]);
        assert_eq!(summary.hadir, 2);
        assert_eq!(summary.total_absen, 2);
        assert_eq!(summary.presence_rate, 50.0);
        assert_eq!(summary.tier(), StatusTier::NeedsAttention);
    }

    #[test]
    fn unused_account_may_be_deleted() {
        assert_eq!(account_delete_block("5-001", 0), None);
    }

    #[test]
    fn referenced_account_delete_is_blocked_with_usage_count() {
        let blocked = account_delete_block("5-001", 3).expect("delete must be blocked");
        assert!(blocked.contains("5-001"));
        assert!(blocked.contains('3'), "message names the usage count: {blocked}");
    }

    #[test]
    fn entries_group_by_owning_division() {
        let accounts = vec![
            account(1, 1, "Keuangan & Administrasi"),
            account(2, 3, "Produksi"),
        ];
        let entries = vec![
            entri(1, 1, "2026-08-07", 10.0),
            entri(2, 2, "2026-08-07", 20.0),
            entri(3, 2, "2026-08-07", 30.0),
            entri(4, 99, "2026-08-07", 40.0),
        ];
        let grouped = entries_by_division(&entries, &accounts);
        assert_eq!(grouped.get(&1).map(Vec::len), Some(1));
        assert_eq!(grouped.get(&3).map(Vec::len), Some(2));
        assert_eq!(grouped.len(), 2, "entries with unknown accounts are dropped");
    }
}
