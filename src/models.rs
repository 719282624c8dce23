//! Wire types shared by the data-access layer and the pages.
//!
//! The backend is inconsistent about camelCase vs snake_case in older
//! endpoints, so deserialization accepts both spellings via `alias` and
//! serialization always writes camelCase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Division {
    pub id: i64,
    pub name: String,
}

/// Division family, derived from the division name in one place so the
/// substring matching is not repeated per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisionKind {
    Keuangan,
    Pemasaran,
    Produksi,
    Gudang,
    Hrd,
    Umum,
}

impl DivisionKind {
    pub fn from_name(name: &str) -> Self {
        let upper = name.to_uppercase();
        if upper.contains("KEUANGAN") || upper.contains("ADMINISTRASI") {
            DivisionKind::Keuangan
        } else if upper.contains("PEMASARAN") || upper.contains("PENJUALAN") {
            DivisionKind::Pemasaran
        } else if upper.contains("PRODUKSI") {
            DivisionKind::Produksi
        } else if upper.contains("BLENDING") || upper.contains("GUDANG") {
            DivisionKind::Gudang
        } else if upper.contains("HRD") || upper.contains("SUMBER DAYA") {
            DivisionKind::Hrd
        } else {
            DivisionKind::Umum
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DivisionKind::Keuangan => "Keuangan & Administrasi",
            DivisionKind::Pemasaran => "Pemasaran & Penjualan",
            DivisionKind::Produksi => "Produksi",
            DivisionKind::Gudang => "Blending & Pergudangan",
            DivisionKind::Hrd => "HRD",
            DivisionKind::Umum => "Umum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ValueType {
    #[serde(rename = "NOMINAL")]
    Nominal,
    #[serde(rename = "KUANTITAS")]
    Kuantitas,
}

impl ValueType {
    pub fn label(self) -> &'static str {
        match self {
            ValueType::Nominal => "Nominal (Rp)",
            ValueType::Kuantitas => "Kuantitas (unit)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Account {
    pub id: i64,
    #[serde(rename = "accountCode", alias = "account_code")]
    pub account_code: String,
    #[serde(rename = "accountName", alias = "account_name")]
    pub account_name: String,
    #[serde(rename = "valueType", alias = "value_type")]
    pub value_type: ValueType,
    pub division: Division,
    #[serde(default = "default_active")]
    pub status: String,
    #[serde(rename = "createdBy", alias = "created_by", default)]
    pub created_by: Option<String>,
}

fn default_active() -> String {
    "active".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAccount {
    #[serde(rename = "accountCode")]
    pub account_code: String,
    #[serde(rename = "accountName")]
    pub account_name: String,
    #[serde(rename = "valueType")]
    pub value_type: ValueType,
    #[serde(rename = "divisionId")]
    pub division_id: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntriHarian {
    pub id: i64,
    #[serde(rename = "accountId", alias = "account_id")]
    pub account_id: i64,
    #[serde(alias = "date")]
    pub tanggal: String,
    pub nilai: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "createdBy", alias = "created_by", default)]
    pub created_by: Option<String>,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
    #[serde(
        rename = "transactionType",
        alias = "transaction_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<String>,
    #[serde(
        rename = "targetAmount",
        alias = "target_amount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_amount: Option<f64>,
    #[serde(
        rename = "realisasiAmount",
        alias = "realisasi_amount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub realisasi_amount: Option<f64>,
    #[serde(
        rename = "hppAmount",
        alias = "hpp_amount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hpp_amount: Option<f64>,
    #[serde(
        rename = "pemakaianAmount",
        alias = "pemakaian_amount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pemakaian_amount: Option<f64>,
    #[serde(
        rename = "stokAkhir",
        alias = "stok_akhir",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stok_akhir: Option<f64>,
    #[serde(
        rename = "attendanceStatus",
        alias = "attendance_status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attendance_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(
        rename = "absentCount",
        alias = "absent_count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub absent_count: Option<i64>,
}

/// Row sent to the batch-save endpoint by the journal forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEntriHarian {
    #[serde(rename = "accountId")]
    pub account_id: i64,
    pub tanggal: String,
    pub nilai: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "transactionType", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(rename = "targetAmount", skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(rename = "realisasiAmount", skip_serializing_if = "Option::is_none")]
    pub realisasi_amount: Option<f64>,
    #[serde(rename = "hppAmount", skip_serializing_if = "Option::is_none")]
    pub hpp_amount: Option<f64>,
    #[serde(rename = "pemakaianAmount", skip_serializing_if = "Option::is_none")]
    pub pemakaian_amount: Option<f64>,
    #[serde(rename = "stokAkhir", skip_serializing_if = "Option::is_none")]
    pub stok_akhir: Option<f64>,
    #[serde(rename = "attendanceStatus", skip_serializing_if = "Option::is_none")]
    pub attendance_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(rename = "absentCount", skip_serializing_if = "Option::is_none")]
    pub absent_count: Option<i64>,
}

impl NewEntriHarian {
    pub fn new(account_id: i64, tanggal: &str, nilai: f64) -> Self {
        NewEntriHarian {
            account_id,
            tanggal: tanggal.to_string(),
            nilai,
            description: None,
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Role {
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
    #[serde(rename = "ADMIN_DIVISI")]
    AdminDivisi,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::AdminDivisi => "Admin Divisi",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub division: Option<Division>,
    #[serde(default = "default_active")]
    pub status: String,
    #[serde(rename = "lastLogin", alias = "last_login", default)]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(rename = "divisionId", skip_serializing_if = "Option::is_none")]
    pub division_id: Option<i64>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Salesperson {
    pub id: i64,
    #[serde(alias = "name")]
    pub nama: String,
    #[serde(default = "default_active")]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaporanPenjualanProduk {
    pub id: i64,
    #[serde(rename = "salespersonId", alias = "salesperson_id", default)]
    pub salesperson_id: Option<i64>,
    #[serde(rename = "accountId", alias = "account_id")]
    pub account_id: i64,
    #[serde(rename = "tanggalLaporan", alias = "tanggal_laporan")]
    pub tanggal_laporan: String,
    #[serde(rename = "targetKuantitas", alias = "target_kuantitas", default)]
    pub target_kuantitas: f64,
    #[serde(rename = "realisasiKuantitas", alias = "realisasi_kuantitas", default)]
    pub realisasi_kuantitas: f64,
    #[serde(default)]
    pub kendala: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaporanProduksi {
    pub id: i64,
    #[serde(rename = "accountId", alias = "account_id")]
    pub account_id: i64,
    #[serde(rename = "tanggalLaporan", alias = "tanggal_laporan")]
    pub tanggal_laporan: String,
    #[serde(rename = "hasilProduksi", alias = "hasil_produksi", default)]
    pub hasil_produksi: f64,
    #[serde(rename = "barangGagal", alias = "barang_gagal", default)]
    pub barang_gagal: f64,
    #[serde(rename = "stockBarangJadi", alias = "stock_barang_jadi", default)]
    pub stock_barang_jadi: f64,
    #[serde(rename = "hpBarangJadi", alias = "hp_barang_jadi", default)]
    pub hp_barang_jadi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLaporanProduksi {
    #[serde(rename = "accountId")]
    pub account_id: i64,
    #[serde(rename = "tanggalLaporan")]
    pub tanggal_laporan: String,
    #[serde(rename = "hasilProduksi")]
    pub hasil_produksi: f64,
    #[serde(rename = "barangGagal")]
    pub barang_gagal: f64,
    #[serde(rename = "stockBarangJadi")]
    pub stock_barang_jadi: f64,
    #[serde(rename = "hpBarangJadi")]
    pub hp_barang_jadi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLaporanPenjualanProduk {
    #[serde(rename = "salespersonId", skip_serializing_if = "Option::is_none")]
    pub salesperson_id: Option<i64>,
    #[serde(rename = "accountId")]
    pub account_id: i64,
    #[serde(rename = "tanggalLaporan")]
    pub tanggal_laporan: String,
    #[serde(rename = "targetKuantitas")]
    pub target_kuantitas: f64,
    #[serde(rename = "realisasiKuantitas")]
    pub realisasi_kuantitas: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kendala: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaporanGudang {
    pub id: i64,
    #[serde(rename = "accountId", alias = "account_id")]
    pub account_id: i64,
    #[serde(rename = "tanggalLaporan", alias = "tanggal_laporan")]
    pub tanggal_laporan: String,
    #[serde(rename = "pemakaianAmount", alias = "pemakaian_amount", default)]
    pub pemakaian_amount: f64,
    #[serde(rename = "stokAkhir", alias = "stok_akhir", default)]
    pub stok_akhir: f64,
    #[serde(rename = "kondisiGudang", alias = "kondisi_gudang", default)]
    pub kondisi_gudang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLaporanGudang {
    #[serde(rename = "accountId")]
    pub account_id: i64,
    #[serde(rename = "tanggalLaporan")]
    pub tanggal_laporan: String,
    #[serde(rename = "pemakaianAmount")]
    pub pemakaian_amount: f64,
    #[serde(rename = "stokAkhir")]
    pub stok_akhir: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kondisi_gudang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    #[serde(rename = "isRead", alias = "is_read", default)]
    pub is_read: bool,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
    #[serde(rename = "linkUrl", alias = "link_url", default)]
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppSettings {
    #[serde(rename = "companyName", alias = "company_name", default)]
    pub company_name: String,
    #[serde(rename = "companyAddress", alias = "company_address", default)]
    pub company_address: String,
    #[serde(rename = "reportFooter", alias = "report_footer", default)]
    pub report_footer: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            company_name: "BukuDivisi".to_string(),
            company_address: String::new(),
            report_footer: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken", alias = "access_token")]
    pub access_token: String,
    pub user: AppUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entri_deserializes_camel_case() {
        let raw = r#"{
            "id": 7,
            "accountId": 12,
            "tanggal": "2026-08-07",
            "nilai": 1500000.0,
            "transactionType": "PENERIMAAN",
            "targetAmount": 2000000.0
        }"#;
        let entri: EntriHarian = serde_json::from_str(raw).expect("camelCase payload");
        assert_eq!(entri.account_id, 12);
        assert_eq!(entri.transaction_type.as_deref(), Some("PENERIMAAN"));
        assert_eq!(entri.target_amount, Some(2000000.0));
    }

    #[test]
    fn entri_deserializes_snake_case_fallback() {
        let raw = r#"{
            "id": 8,
            "account_id": 12,
            "date": "2026-08-07",
            "nilai": 40.0,
            "pemakaian_amount": 12.5,
            "stok_akhir": 320.0
        }"#;
        let entri: EntriHarian = serde_json::from_str(raw).expect("snake_case payload");
        assert_eq!(entri.account_id, 12);
        assert_eq!(entri.tanggal, "2026-08-07");
        assert_eq!(entri.pemakaian_amount, Some(12.5));
        assert_eq!(entri.stok_akhir, Some(320.0));
    }

    #[test]
    fn new_entri_skips_unset_optional_fields() {
        let row = NewEntriHarian::new(3, "2026-08-07", 250.0);
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"accountId\":3"));
        assert!(
            !json.contains("attendanceStatus"),
            "unset optional fields must not be serialized: {json}"
        );
    }

    #[test]
    fn division_kind_matches_known_names() {
        assert_eq!(
            DivisionKind::from_name("Keuangan & Administrasi"),
            DivisionKind::Keuangan
        );
        assert_eq!(
            DivisionKind::from_name("PEMASARAN & PENJUALAN"),
            DivisionKind::Pemasaran
        );
        assert_eq!(DivisionKind::from_name("Produksi"), DivisionKind::Produksi);
        assert_eq!(
            DivisionKind::from_name("Blending & Pergudangan"),
            DivisionKind::Gudang
        );
        assert_eq!(DivisionKind::from_name("HRD"), DivisionKind::Hrd);
        assert_eq!(DivisionKind::from_name("Legal"), DivisionKind::Umum);
    }

    #[test]
    fn role_round_trips_wire_names() {
        let role: Role = serde_json::from_str("\"SUPER_ADMIN\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
        assert_eq!(serde_json::to_string(&Role::AdminDivisi).unwrap(), "\"ADMIN_DIVISI\"");
    }
}
