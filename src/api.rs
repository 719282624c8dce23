//! Data-access layer: thin wrappers over the REST API, one function per
//! concern, all carrying the bearer token from the stored session.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    Account, AppSettings, AppUser, Division, EntriHarian, LaporanGudang, LaporanPenjualanProduk,
    LaporanProduksi, LoginResponse, NewAccount, NewAppUser, NewEntriHarian, NewLaporanGudang,
    NewLaporanPenjualanProduk, NewLaporanProduksi, Notification, Salesperson,
};
use crate::session;

const DEFAULT_API_BASE: &str = "http://localhost:5000";

pub fn api_base() -> &'static str {
    option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE)
}

fn url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Gagal menghubungi server: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("Sesi berakhir, silakan masuk kembali")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn check(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("Permintaan gagal (HTTP {status})")
    } else {
        body
    };
    web_sys::console::error_1(&format!("API {status}: {message}").into());
    Err(ApiError::Status { status, message })
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let resp = authorized(Request::get(&url(path))).send().await?;
    Ok(check(resp).await?.json::<T>().await?)
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let request = authorized(Request::post(&url(path))).json(body)?;
    let resp = request.send().await?;
    Ok(check(resp).await?.json::<T>().await?)
}

async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let request = authorized(Request::put(&url(path))).json(body)?;
    let resp = request.send().await?;
    Ok(check(resp).await?.json::<T>().await?)
}

async fn post_empty(path: &str) -> Result<(), ApiError> {
    let resp = authorized(Request::post(&url(path))).send().await?;
    check(resp).await?;
    Ok(())
}

async fn delete(path: &str) -> Result<(), ApiError> {
    let resp = authorized(Request::delete(&url(path))).send().await?;
    check(resp).await?;
    Ok(())
}

// auth

pub async fn login(username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let body = serde_json::json!({ "username": username, "password": password });
    let request = Request::post(&url("/api/auth/login")).json(&body)?;
    let resp = request.send().await?;
    Ok(check(resp).await?.json::<LoginResponse>().await?)
}

// divisions

pub async fn fetch_divisions() -> Result<Vec<Division>, ApiError> {
    get_json("/api/divisions").await
}

// accounts

pub async fn fetch_accounts() -> Result<Vec<Account>, ApiError> {
    get_json("/api/accounts").await
}

pub async fn fetch_accounts_by_division(division_id: i64) -> Result<Vec<Account>, ApiError> {
    get_json(&format!("/api/accounts?divisionId={division_id}")).await
}

pub async fn create_account(account: &NewAccount) -> Result<Account, ApiError> {
    post_json("/api/accounts", account).await
}

pub async fn update_account(id: i64, account: &NewAccount) -> Result<Account, ApiError> {
    put_json(&format!("/api/accounts/{id}"), account).await
}

pub async fn delete_account(id: i64) -> Result<(), ApiError> {
    delete(&format!("/api/accounts/{id}")).await
}

// daily entries

pub async fn fetch_entries() -> Result<Vec<EntriHarian>, ApiError> {
    get_json("/api/entri-harian").await
}

pub async fn fetch_entries_by_date(date: &str) -> Result<Vec<EntriHarian>, ApiError> {
    get_json(&format!("/api/entri-harian?date={date}")).await
}

pub async fn fetch_entries_by_account(account_id: i64) -> Result<Vec<EntriHarian>, ApiError> {
    get_json(&format!("/api/entri-harian?accountId={account_id}")).await
}

/// Usage count consulted before an account delete is allowed.
pub async fn count_entries_for_account(account_id: i64) -> Result<usize, ApiError> {
    Ok(fetch_entries_by_account(account_id).await?.len())
}

pub async fn batch_create_entries(rows: &[NewEntriHarian]) -> Result<Vec<EntriHarian>, ApiError> {
    post_json("/api/entri-harian/batch", &rows).await
}

pub async fn delete_entry(id: i64) -> Result<(), ApiError> {
    delete(&format!("/api/entri-harian/{id}")).await
}

// users

pub async fn fetch_users() -> Result<Vec<AppUser>, ApiError> {
    get_json("/api/users").await
}

pub async fn create_user(user: &NewAppUser) -> Result<AppUser, ApiError> {
    post_json("/api/users", user).await
}

pub async fn update_user(id: i64, user: &NewAppUser) -> Result<AppUser, ApiError> {
    put_json(&format!("/api/users/{id}"), user).await
}

pub async fn delete_user(id: i64) -> Result<(), ApiError> {
    delete(&format!("/api/users/{id}")).await
}

// salespeople

pub async fn fetch_salespeople() -> Result<Vec<Salesperson>, ApiError> {
    get_json("/api/salespeople").await
}

// specialized reports

pub async fn fetch_laporan_penjualan(date: &str) -> Result<Vec<LaporanPenjualanProduk>, ApiError> {
    get_json(&format!("/api/laporan-penjualan-produk?date={date}")).await
}

pub async fn create_laporan_penjualan(
    laporan: &NewLaporanPenjualanProduk,
) -> Result<LaporanPenjualanProduk, ApiError> {
    post_json("/api/laporan-penjualan-produk", laporan).await
}

pub async fn fetch_laporan_produksi(date: &str) -> Result<Vec<LaporanProduksi>, ApiError> {
    get_json(&format!("/api/laporan-produksi?date={date}")).await
}

pub async fn create_laporan_produksi(
    laporan: &NewLaporanProduksi,
) -> Result<LaporanProduksi, ApiError> {
    post_json("/api/laporan-produksi", laporan).await
}

pub async fn fetch_laporan_gudang(date: &str) -> Result<Vec<LaporanGudang>, ApiError> {
    get_json(&format!("/api/laporan-gudang?date={date}")).await
}

pub async fn create_laporan_gudang(laporan: &NewLaporanGudang) -> Result<LaporanGudang, ApiError> {
    post_json("/api/laporan-gudang", laporan).await
}

// settings

pub async fn fetch_settings() -> Result<AppSettings, ApiError> {
    get_json("/api/settings").await
}

pub async fn save_settings(settings: &AppSettings) -> Result<AppSettings, ApiError> {
    put_json("/api/settings", settings).await
}

// notifications

pub async fn fetch_notifications() -> Result<Vec<Notification>, ApiError> {
    get_json("/api/notifications").await
}

pub async fn mark_notification_read(id: i64) -> Result<(), ApiError> {
    post_empty(&format!("/api/notifications/{id}/read")).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_backend_message() {
        let err = ApiError::Status {
            status: 422,
            message: "Kode akun sudah digunakan".to_string(),
        };
        assert_eq!(err.to_string(), "Kode akun sudah digunakan");
    }

    #[test]
    fn unauthorized_has_indonesian_message() {
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "Sesi berakhir, silakan masuk kembali"
        );
    }
}
