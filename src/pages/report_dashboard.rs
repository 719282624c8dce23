use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::aggregate::{
    filter_entries_by_date, finance_summary, hr_summary, production_summary, sales_summary,
    warehouse_summary, StatusTier,
};
use crate::api;
use crate::app::page_shell;
use crate::components::icons::{icon_download, icon_printer};
use crate::components::{flash, StatCard, Toast};
use crate::csv::{build_csv, download_csv};
use crate::format::{format_percent, format_quantity, format_rupiah, today_string};
use crate::models::{
    Account, AppSettings, Division, DivisionKind, EntriHarian, LaporanGudang,
    LaporanPenjualanProduk, LaporanProduksi, NewLaporanPenjualanProduk, Salesperson,
};
use crate::pdf::{build_report_html, detail_cells, detail_header, open_report_window, ReportPayload, ReportSummary};
use crate::session::Session;

fn status_card(label: &str, rate: f64, tier: StatusTier, tier_label: &str) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border">
            <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest uppercase">{ label.to_string() }</p>
            <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ format_percent(rate) }</h3>
            <span class={format!("inline-block mt-2 px-3 py-1 rounded-full text-[10px] font-bold {}", tier.badge_class())}>
                { tier_label.to_string() }
            </span>
        </div>
    }
}

/// Per-division report dashboard: summary cards, status badge, detail
/// table, and the print/preview/CSV exports — all from one filtered set.
#[function_component(ReportDashboardPage)]
pub fn report_dashboard_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };
    let settings_ctx = use_context::<UseStateHandle<AppSettings>>();

    let divisions = use_state(Vec::<Division>::new);
    let own_division = current.division_id();
    let selected_division = use_state(move || own_division);
    let accounts = use_state(Vec::<Account>::new);
    let entries = use_state(Vec::<EntriHarian>::new);
    let laporan_produksi = use_state(Vec::<LaporanProduksi>::new);
    let laporan_gudang = use_state(Vec::<LaporanGudang>::new);
    let laporan_penjualan = use_state(Vec::<LaporanPenjualanProduk>::new);
    let salespeople = use_state(Vec::<Salesperson>::new);
    let tanggal = use_state(today_string);
    let loading = use_state(|| true);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);

    let sales_salesperson = use_state(String::new);
    let sales_account = use_state(String::new);
    let sales_target = use_state(String::new);
    let sales_realisasi = use_state(String::new);
    let sales_kendala = use_state(String::new);
    let saving_sales = use_state(|| false);

    {
        let divisions = divisions.clone();
        let selected_division = selected_division.clone();
        let is_super = current.is_super_admin();
        use_effect_with_deps(
            move |_| {
                if is_super {
                    spawn_local(async move {
                        if let Ok(list) = api::fetch_divisions().await {
                            if selected_division.is_none() {
                                selected_division.set(list.first().map(|d| d.id));
                            }
                            divisions.set(list);
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let active_division: Option<Division> = if current.is_super_admin() {
        selected_division.and_then(|id| divisions.iter().find(|d| d.id == id).cloned())
    } else {
        current.user.division.clone()
    };
    let kind = active_division
        .as_ref()
        .map(|d| DivisionKind::from_name(&d.name))
        .unwrap_or(DivisionKind::Umum);

    let reload = {
        let accounts = accounts.clone();
        let entries = entries.clone();
        let laporan_produksi = laporan_produksi.clone();
        let laporan_gudang = laporan_gudang.clone();
        let laporan_penjualan = laporan_penjualan.clone();
        let salespeople = salespeople.clone();
        let loading = loading.clone();
        let error = error.clone();
        let selected_division = selected_division.clone();
        let tanggal = tanggal.clone();
        Callback::from(move |kind: DivisionKind| {
            let Some(division_id) = *selected_division else {
                loading.set(false);
                return;
            };
            let date = (*tanggal).clone();
            let accounts = accounts.clone();
            let entries = entries.clone();
            let laporan_produksi = laporan_produksi.clone();
            let laporan_gudang = laporan_gudang.clone();
            let laporan_penjualan = laporan_penjualan.clone();
            let salespeople = salespeople.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            spawn_local(async move {
                let rack = match api::fetch_accounts_by_division(division_id).await {
                    Ok(list) => list,
                    Err(err) => {
                        flash(&error, &err.to_string());
                        loading.set(false);
                        return;
                    }
                };
                let ids: Vec<i64> = rack.iter().map(|a| a.id).collect();

                match api::fetch_entries_by_date(&date).await {
                    Ok(day) => {
                        let scoped: Vec<EntriHarian> = day
                            .into_iter()
                            .filter(|e| ids.contains(&e.account_id))
                            .collect();
                        entries.set(filter_entries_by_date(&scoped, &date));
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }

                match kind {
                    DivisionKind::Produksi => match api::fetch_laporan_produksi(&date).await {
                        Ok(rows) => laporan_produksi
                            .set(rows.into_iter().filter(|r| ids.contains(&r.account_id)).collect()),
                        Err(err) => flash(&error, &err.to_string()),
                    },
                    DivisionKind::Gudang => match api::fetch_laporan_gudang(&date).await {
                        Ok(rows) => laporan_gudang
                            .set(rows.into_iter().filter(|r| ids.contains(&r.account_id)).collect()),
                        Err(err) => flash(&error, &err.to_string()),
                    },
                    DivisionKind::Pemasaran => {
                        match api::fetch_laporan_penjualan(&date).await {
                            Ok(rows) => laporan_penjualan.set(
                                rows.into_iter()
                                    .filter(|r| ids.contains(&r.account_id))
                                    .collect(),
                            ),
                            Err(err) => flash(&error, &err.to_string()),
                        }
                        if let Ok(list) = api::fetch_salespeople().await {
                            salespeople.set(list);
                        }
                    }
                    _ => {}
                }

                accounts.set(rack);
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with_deps(
            move |(_, _, kind): &(Option<i64>, String, DivisionKind)| {
                reload.emit(*kind);
                || ()
            },
            (*selected_division, (*tanggal).clone(), kind),
        );
    }

    let summary = match kind {
        DivisionKind::Keuangan => Some(ReportSummary::Finance(finance_summary(&entries))),
        DivisionKind::Pemasaran => Some(ReportSummary::Sales(sales_summary(&entries))),
        DivisionKind::Produksi => Some(ReportSummary::Production(production_summary(&laporan_produksi))),
        DivisionKind::Gudang => Some(ReportSummary::Warehouse(warehouse_summary(&laporan_gudang))),
        DivisionKind::Hrd => Some(ReportSummary::Hr(hr_summary(&entries))),
        DivisionKind::Umum => None,
    };

    let settings_snapshot = settings_ctx
        .as_ref()
        .map(|s| (**s).clone())
        .unwrap_or_default();

    let make_report_html = {
        let entries = entries.clone();
        let accounts = accounts.clone();
        let tanggal = tanggal.clone();
        let active_division = active_division.clone();
        let settings_snapshot = settings_snapshot.clone();
        move || -> Option<(String, String)> {
            let division = active_division.clone()?;
            let payload = ReportPayload {
                date: &tanggal,
                division: &division,
                entries: &entries,
                accounts: &accounts,
                summary,
                settings: &settings_snapshot,
            };
            let title = format!("Laporan {} {}", division.name, *tanggal);
            Some((build_report_html(&payload), title))
        }
    };

    let on_print = {
        let make_report_html = make_report_html.clone();
        Callback::from(move |_| {
            if let Some((html, title)) = make_report_html() {
                open_report_window(&html, &title, true);
            }
        })
    };

    let on_preview = {
        let make_report_html = make_report_html.clone();
        Callback::from(move |_| {
            if let Some((html, title)) = make_report_html() {
                open_report_window(&html, &title, false);
            }
        })
    };

    let on_export_csv = {
        let entries = entries.clone();
        let accounts = accounts.clone();
        let tanggal = tanggal.clone();
        Callback::from(move |_| {
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|entri| {
                    let account = accounts.iter().find(|a| a.id == entri.account_id);
                    detail_cells(kind, entri, account)
                })
                .collect();
            let csv = build_csv(detail_header(kind), &rows);
            download_csv(&format!("laporan-{}.csv", *tanggal), &csv);
        })
    };

    let on_save_sales = {
        let sales_salesperson = sales_salesperson.clone();
        let sales_account = sales_account.clone();
        let sales_target = sales_target.clone();
        let sales_realisasi = sales_realisasi.clone();
        let sales_kendala = sales_kendala.clone();
        let tanggal = tanggal.clone();
        let message = message.clone();
        let error = error.clone();
        let saving_sales = saving_sales.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let Ok(account_id) = sales_account.parse::<i64>() else {
                flash(&error, "Pilih produk terlebih dahulu");
                return;
            };
            let target = sales_target.trim().parse::<f64>().unwrap_or(0.0);
            let realisasi = sales_realisasi.trim().parse::<f64>().unwrap_or(0.0);
            if target <= 0.0 {
                flash(&error, "Target harus lebih dari nol");
                return;
            }

            let payload = NewLaporanPenjualanProduk {
                salesperson_id: sales_salesperson.parse::<i64>().ok(),
                account_id,
                tanggal_laporan: tanggal.trim().to_string(),
                target_kuantitas: target,
                realisasi_kuantitas: realisasi,
                kendala: {
                    let note = sales_kendala.trim();
                    if note.is_empty() {
                        None
                    } else {
                        Some(note.to_string())
                    }
                },
            };

            saving_sales.set(true);
            let sales_target = sales_target.clone();
            let sales_realisasi = sales_realisasi.clone();
            let sales_kendala = sales_kendala.clone();
            let message = message.clone();
            let error = error.clone();
            let saving_sales = saving_sales.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::create_laporan_penjualan(&payload).await {
                    Ok(_) => {
                        sales_target.set(String::new());
                        sales_realisasi.set(String::new());
                        sales_kendala.set(String::new());
                        flash(&message, "Laporan penjualan disimpan");
                        reload.emit(DivisionKind::Pemasaran);
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
                saving_sales.set(false);
            });
        })
    };

    let summary_cards = match summary {
        Some(ReportSummary::Finance(s)) => html! {
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <StatCard title="Penerimaan" value={format_rupiah(s.penerimaan)} />
                <StatCard title="Pengeluaran" value={format_rupiah(s.pengeluaran)} />
                <StatCard title="Saldo" value={format_rupiah(s.saldo)} hint={Some(format!("{} entri", entries.len()))} />
            </div>
        },
        Some(ReportSummary::Sales(s)) => html! {
            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <StatCard title="Total Target" value={format_quantity(s.total_target)} />
                <StatCard title="Total Realisasi" value={format_quantity(s.total_realisasi)} />
                { status_card("Pencapaian", s.rate, s.tier(), s.tier().general_label()) }
                <StatCard title="Laporan Produk" value={laporan_penjualan.len().to_string()} hint={Some("laporan penjualan hari ini".to_string())} />
            </div>
        },
        Some(ReportSummary::Production(s)) => html! {
            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <StatCard title="Hasil Produksi" value={format_quantity(s.total_hasil)} />
                <StatCard title="Barang Gagal" value={format_quantity(s.total_gagal)} />
                <StatCard title="HPP Barang Jadi" value={format_rupiah(s.total_hpp)} />
                { status_card("Efisiensi", s.efficiency, s.tier(), s.tier().production_label()) }
            </div>
        },
        Some(ReportSummary::Warehouse(s)) => html! {
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <StatCard title="Total Pemakaian" value={format_quantity(s.total_pemakaian)} />
                <StatCard title="Total Stok Akhir" value={format_quantity(s.total_stok)} />
                { status_card("Ketersediaan", s.availability, s.tier(), s.tier().general_label()) }
            </div>
        },
        Some(ReportSummary::Hr(s)) => html! {
            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <StatCard title="Hadir" value={s.hadir.to_string()} />
                <StatCard title="Sakit / Izin" value={format!("{} / {}", s.sakit, s.izin)} />
                <StatCard title="Total Absen" value={s.total_absen.to_string()} />
                { status_card("Tingkat Kehadiran", s.presence_rate, s.tier(), s.tier().general_label()) }
            </div>
        },
        None => html! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <StatCard title="Jumlah Entri" value={entries.len().to_string()} />
                <StatCard title="Total Nilai" value={format_rupiah(entries.iter().map(|e| e.nilai).sum::<f64>())} />
            </div>
        },
    };

    let header = detail_header(kind);
    let actions = html! {
        <div class="flex items-center gap-2">
            {
                if current.is_super_admin() {
                    let on_division_change = {
                        let selected_division = selected_division.clone();
                        Callback::from(move |e: Event| {
                            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                            selected_division.set(input.value().parse::<i64>().ok());
                        })
                    };
                    html! {
                        <select onchange={on_division_change} class="px-4 py-2 bg-input border border-input rounded-lg text-sm text-foreground">
                            { for divisions.iter().map(|d| html! {
                                <option value={d.id.to_string()} selected={*selected_division == Some(d.id)}>{ d.name.clone() }</option>
                            }) }
                        </select>
                    }
                } else {
                    html! {}
                }
            }
            <input type="date" value={(*tanggal).clone()} oninput={{
                let tanggal = tanggal.clone();
                Callback::from(move |e: InputEvent| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    tanggal.set(input.value());
                })
            }} class="px-4 py-2 bg-input border border-input rounded-lg text-sm text-foreground" />
            <button onclick={on_preview} class="flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-xl font-bold text-sm">
                {"Pratinjau"}
            </button>
            <button onclick={on_print} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                { icon_printer() }
                {"Cetak PDF"}
            </button>
            <button onclick={on_export_csv} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                { icon_download() }
                {"CSV"}
            </button>
        </div>
    };

    html! {
        { page_shell(
            "Dashboard Laporan",
            actions,
            html! {
                <>
                    <Toast message={(*message).clone()} />
                    <Toast message={(*error).clone()} error={true} />

                    { summary_cards }

                    {
                        if kind == DivisionKind::Pemasaran {
                            html! {
                                <div class="bg-card rounded-[10px] p-6 border border-border">
                                    <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Catat Laporan Penjualan"}</h4>
                                    <div class="grid grid-cols-2 md:grid-cols-5 gap-3 mb-4">
                                        <div class="space-y-1">
                                            <label class="text-[12px] font-bold text-muted-foreground">{"Salesperson"}</label>
                                            <select onchange={{
                                                let sales_salesperson = sales_salesperson.clone();
                                                Callback::from(move |e: Event| {
                                                    let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                                    sales_salesperson.set(input.value());
                                                })
                                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                                <option value="" selected={sales_salesperson.is_empty()}>{"Pilih"}</option>
                                                { for salespeople.iter().filter(|s| s.status == "active").map(|s| html! {
                                                    <option value={s.id.to_string()} selected={*sales_salesperson == s.id.to_string()}>{ s.nama.clone() }</option>
                                                }) }
                                            </select>
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-[12px] font-bold text-muted-foreground">{"Produk"}</label>
                                            <select onchange={{
                                                let sales_account = sales_account.clone();
                                                Callback::from(move |e: Event| {
                                                    let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                                    sales_account.set(input.value());
                                                })
                                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                                <option value="" selected={sales_account.is_empty()}>{"Pilih"}</option>
                                                { for accounts.iter().map(|a| html! {
                                                    <option value={a.id.to_string()} selected={*sales_account == a.id.to_string()}>
                                                        { format!("{} — {}", a.account_code, a.account_name) }
                                                    </option>
                                                }) }
                                            </select>
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-[12px] font-bold text-muted-foreground">{"Target"}</label>
                                            <input type="number" value={(*sales_target).clone()} oninput={{
                                                let sales_target = sales_target.clone();
                                                Callback::from(move |e: InputEvent| {
                                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                    sales_target.set(input.value());
                                                })
                                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-[12px] font-bold text-muted-foreground">{"Realisasi"}</label>
                                            <input type="number" value={(*sales_realisasi).clone()} oninput={{
                                                let sales_realisasi = sales_realisasi.clone();
                                                Callback::from(move |e: InputEvent| {
                                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                    sales_realisasi.set(input.value());
                                                })
                                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                        </div>
                                        <div class="space-y-1">
                                            <label class="text-[12px] font-bold text-muted-foreground">{"Kendala"}</label>
                                            <input type="text" placeholder="Opsional" value={(*sales_kendala).clone()} oninput={{
                                                let sales_kendala = sales_kendala.clone();
                                                Callback::from(move |e: InputEvent| {
                                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                    sales_kendala.set(input.value());
                                                })
                                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                        </div>
                                    </div>
                                    <button onclick={on_save_sales} disabled={*saving_sales} class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">
                                        { if *saving_sales { "Menyimpan..." } else { "Simpan Laporan" } }
                                    </button>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-5 border-b border-border flex items-center justify-between">
                            <h3 class="font-bold text-lg text-foreground">
                                { active_division.as_ref().map(|d| format!("Rincian {}", d.name)).unwrap_or_else(|| "Rincian Entri".to_string()) }
                            </h3>
                            <span class="text-xs text-muted-foreground">{ format!("{} entri", entries.len()) }</span>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        { for header.iter().map(|h| html! {
                                            <th class="px-8 py-4 font-bold">{ *h }</th>
                                        }) }
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan={header.len().to_string()} class="px-8 py-6 text-center text-muted-foreground">{"Memuat data..."}</td></tr> }
                                    } else if entries.is_empty() {
                                        html! { <tr><td colspan={header.len().to_string()} class="px-8 py-6 text-center text-muted-foreground">{"Belum ada entri untuk tanggal ini."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                            { for entries.iter().map(|entri| {
                                                let account = accounts.iter().find(|a| a.id == entri.account_id);
                                                html! {
                                                    <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                        { for detail_cells(kind, entri, account).into_iter().map(|cell| html! {
                                                            <td class="px-8 py-4 text-foreground">{ cell }</td>
                                                        }) }
                                                    </tr>
                                                }
                                            }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>

                    {
                        if kind == DivisionKind::Pemasaran && !laporan_penjualan.is_empty() {
                            let salesperson_name = |id: Option<i64>| -> String {
                                id.and_then(|id| salespeople.iter().find(|s| s.id == id))
                                    .map(|s| s.nama.clone())
                                    .unwrap_or_else(|| "-".to_string())
                            };
                            html! {
                                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                                    <div class="p-5 border-b border-border">
                                        <h3 class="font-bold text-lg text-foreground">{"Laporan Penjualan Produk"}</h3>
                                    </div>
                                    <div class="overflow-x-auto">
                                        <table class="w-full text-left border-collapse">
                                            <thead>
                                                <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                                    <th class="px-8 py-4 font-bold">{"Salesperson"}</th>
                                                    <th class="px-8 py-4 font-bold">{"Produk"}</th>
                                                    <th class="px-8 py-4 font-bold text-right">{"Target"}</th>
                                                    <th class="px-8 py-4 font-bold text-right">{"Realisasi"}</th>
                                                    <th class="px-8 py-4 font-bold">{"Kendala"}</th>
                                                </tr>
                                            </thead>
                                            <tbody class="divide-y divide-border">
                                                { for laporan_penjualan.iter().map(|row| {
                                                    let product = accounts
                                                        .iter()
                                                        .find(|a| a.id == row.account_id)
                                                        .map(|a| a.account_name.clone())
                                                        .unwrap_or_else(|| "-".to_string());
                                                    html! {
                                                        <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                            <td class="px-8 py-4 text-foreground">{ salesperson_name(row.salesperson_id) }</td>
                                                            <td class="px-8 py-4 text-foreground">{ product }</td>
                                                            <td class="px-8 py-4 text-right font-semibold">{ format_quantity(row.target_kuantitas) }</td>
                                                            <td class="px-8 py-4 text-right font-semibold">{ format_quantity(row.realisasi_kuantitas) }</td>
                                                            <td class="px-8 py-4 text-muted-foreground">{ row.kendala.clone().unwrap_or_default() }</td>
                                                        </tr>
                                                    }
                                                }) }
                                            </tbody>
                                        </table>
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </>
            }
        ) }
    }
}
