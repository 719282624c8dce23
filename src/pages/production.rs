use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::app::page_shell;
use crate::components::{flash, Toast};
use crate::format::{format_quantity, format_rupiah, today_string};
use crate::models::{
    Account, Division, DivisionKind, LaporanGudang, LaporanProduksi, NewEntriHarian,
    NewLaporanGudang, NewLaporanProduksi,
};
use crate::session::Session;

/// Specialized form for the production and blending/warehouse divisions.
/// Saving writes the specialized report row and the matching daily entry
/// in one go.
#[function_component(ProductionPage)]
pub fn production_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };

    let divisions = use_state(Vec::<Division>::new);
    let own_division = current.division_id();
    let selected_division = use_state(move || own_division);
    let accounts = use_state(Vec::<Account>::new);
    let laporan_produksi = use_state(Vec::<LaporanProduksi>::new);
    let laporan_gudang = use_state(Vec::<LaporanGudang>::new);
    let tanggal = use_state(today_string);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let form_account = use_state(String::new);
    let form_hasil = use_state(String::new);
    let form_gagal = use_state(String::new);
    let form_stock = use_state(String::new);
    let form_hpp = use_state(String::new);
    let form_pemakaian = use_state(String::new);
    let form_stok_akhir = use_state(String::new);
    let form_kondisi = use_state(|| "BAIK".to_string());

    {
        let divisions = divisions.clone();
        let is_super = current.is_super_admin();
        use_effect_with_deps(
            move |_| {
                if is_super {
                    spawn_local(async move {
                        if let Ok(list) = api::fetch_divisions().await {
                            divisions.set(list);
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let kind = if current.is_super_admin() {
        selected_division
            .and_then(|id| divisions.iter().find(|d| d.id == id).cloned())
            .map(|d| DivisionKind::from_name(&d.name))
            .unwrap_or(DivisionKind::Produksi)
    } else {
        current.division_kind()
    };

    if !current.is_super_admin()
        && !matches!(kind, DivisionKind::Produksi | DivisionKind::Gudang)
    {
        return page_shell(
            "Form Produksi",
            html! {},
            html! {
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground">{"Halaman ini khusus divisi Produksi dan Blending & Pergudangan."}</p>
                </div>
            },
        );
    }
    let is_gudang = kind == DivisionKind::Gudang;

    let reload = {
        let accounts = accounts.clone();
        let laporan_produksi = laporan_produksi.clone();
        let laporan_gudang = laporan_gudang.clone();
        let error = error.clone();
        let selected_division = selected_division.clone();
        let tanggal = tanggal.clone();
        Callback::from(move |gudang: bool| {
            let Some(division_id) = *selected_division else {
                return;
            };
            let date = (*tanggal).clone();
            let accounts = accounts.clone();
            let laporan_produksi = laporan_produksi.clone();
            let laporan_gudang = laporan_gudang.clone();
            let error = error.clone();
            spawn_local(async move {
                let rack: Vec<Account> = match api::fetch_accounts_by_division(division_id).await {
                    Ok(list) => list.into_iter().filter(|a| a.status == "active").collect(),
                    Err(err) => {
                        flash(&error, &err.to_string());
                        return;
                    }
                };
                let ids: Vec<i64> = rack.iter().map(|a| a.id).collect();
                if gudang {
                    match api::fetch_laporan_gudang(&date).await {
                        Ok(rows) => laporan_gudang.set(
                            rows.into_iter().filter(|r| ids.contains(&r.account_id)).collect(),
                        ),
                        Err(err) => flash(&error, &err.to_string()),
                    }
                } else {
                    match api::fetch_laporan_produksi(&date).await {
                        Ok(rows) => laporan_produksi.set(
                            rows.into_iter().filter(|r| ids.contains(&r.account_id)).collect(),
                        ),
                        Err(err) => flash(&error, &err.to_string()),
                    }
                }
                accounts.set(rack);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with_deps(
            move |_| {
                reload.emit(is_gudang);
                || ()
            },
            (*selected_division, (*tanggal).clone(), is_gudang),
        );
    }

    let on_save = {
        let form_account = form_account.clone();
        let form_hasil = form_hasil.clone();
        let form_gagal = form_gagal.clone();
        let form_stock = form_stock.clone();
        let form_hpp = form_hpp.clone();
        let form_pemakaian = form_pemakaian.clone();
        let form_stok_akhir = form_stok_akhir.clone();
        let form_kondisi = form_kondisi.clone();
        let tanggal = tanggal.clone();
        let message = message.clone();
        let error = error.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let Ok(account_id) = form_account.parse::<i64>() else {
                flash(&error, "Pilih akun terlebih dahulu");
                return;
            };
            let date = tanggal.trim().to_string();
            if date.is_empty() {
                flash(&error, "Tanggal wajib diisi");
                return;
            }

            saving.set(true);
            let form_hasil = form_hasil.clone();
            let form_gagal = form_gagal.clone();
            let form_stock = form_stock.clone();
            let form_hpp = form_hpp.clone();
            let form_pemakaian = form_pemakaian.clone();
            let form_stok_akhir = form_stok_akhir.clone();
            let form_kondisi = form_kondisi.clone();
            let message = message.clone();
            let error = error.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            let gudang = is_gudang;
            spawn_local(async move {
                let result = if gudang {
                    let pemakaian = form_pemakaian.trim().parse::<f64>().unwrap_or(0.0);
                    let stok_akhir = form_stok_akhir.trim().parse::<f64>().unwrap_or(-1.0);
                    if pemakaian <= 0.0 {
                        flash(&error, "Pemakaian harus lebih dari nol");
                        saving.set(false);
                        return;
                    }
                    if stok_akhir < 0.0 {
                        flash(&error, "Stok akhir wajib diisi");
                        saving.set(false);
                        return;
                    }
                    let laporan = NewLaporanGudang {
                        account_id,
                        tanggal_laporan: date.clone(),
                        pemakaian_amount: pemakaian,
                        stok_akhir,
                        kondisi_gudang: Some((*form_kondisi).clone()),
                    };
                    let mut entri = NewEntriHarian::new(account_id, &date, pemakaian);
                    entri.pemakaian_amount = Some(pemakaian);
                    entri.stok_akhir = Some(stok_akhir);
                    match api::create_laporan_gudang(&laporan).await {
                        Ok(_) => api::batch_create_entries(&[entri]).await.map(|_| ()),
                        Err(err) => Err(err),
                    }
                } else {
                    let hasil = form_hasil.trim().parse::<f64>().unwrap_or(0.0);
                    let gagal = form_gagal.trim().parse::<f64>().unwrap_or(0.0);
                    let stock = form_stock.trim().parse::<f64>().unwrap_or(0.0);
                    let hpp = form_hpp.trim().parse::<f64>().unwrap_or(0.0);
                    if hasil <= 0.0 {
                        flash(&error, "Hasil produksi harus lebih dari nol");
                        saving.set(false);
                        return;
                    }
                    if gagal > hasil {
                        flash(&error, "Barang gagal tidak boleh melebihi hasil produksi");
                        saving.set(false);
                        return;
                    }
                    let laporan = NewLaporanProduksi {
                        account_id,
                        tanggal_laporan: date.clone(),
                        hasil_produksi: hasil,
                        barang_gagal: gagal,
                        stock_barang_jadi: stock,
                        hp_barang_jadi: hpp,
                    };
                    let mut entri = NewEntriHarian::new(account_id, &date, hasil);
                    entri.hpp_amount = Some(hpp);
                    match api::create_laporan_produksi(&laporan).await {
                        Ok(_) => api::batch_create_entries(&[entri]).await.map(|_| ()),
                        Err(err) => Err(err),
                    }
                };

                match result {
                    Ok(()) => {
                        form_hasil.set(String::new());
                        form_gagal.set(String::new());
                        form_stock.set(String::new());
                        form_hpp.set(String::new());
                        form_pemakaian.set(String::new());
                        form_stok_akhir.set(String::new());
                        flash(&message, "Laporan berhasil disimpan");
                        reload.emit(gudang);
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
                saving.set(false);
            });
        })
    };

    let number_input = |label: &str,
                        placeholder: &str,
                        handle: &UseStateHandle<String>|
     -> Html {
        let handle_for_input = handle.clone();
        html! {
            <div class="space-y-1">
                <label class="text-[12px] font-bold text-muted-foreground">{ label.to_string() }</label>
                <input type="number" placeholder={placeholder.to_string()} value={(**handle).clone()} oninput={Callback::from(move |e: InputEvent| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    handle_for_input.set(input.value());
                })} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
            </div>
        }
    };

    let account_name = |id: i64| -> String {
        accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| format!("{} — {}", a.account_code, a.account_name))
            .unwrap_or_else(|| "-".to_string())
    };

    let division_picker = if current.is_super_admin() {
        let on_division_change = {
            let selected_division = selected_division.clone();
            Callback::from(move |e: Event| {
                let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                selected_division.set(input.value().parse::<i64>().ok());
            })
        };
        html! {
            <select onchange={on_division_change} class="px-4 py-2 bg-input border border-input rounded-lg text-sm text-foreground">
                <option value="" selected={selected_division.is_none()}>{"Pilih divisi"}</option>
                { for divisions
                    .iter()
                    .filter(|d| matches!(DivisionKind::from_name(&d.name), DivisionKind::Produksi | DivisionKind::Gudang))
                    .map(|d| html! {
                        <option value={d.id.to_string()} selected={*selected_division == Some(d.id)}>{ d.name.clone() }</option>
                    }) }
            </select>
        }
    } else {
        html! {}
    };

    let title = if is_gudang { "Form Blending & Gudang" } else { "Form Produksi" };

    html! {
        { page_shell(
            title,
            division_picker,
            html! {
                <>
                    <Toast message={(*message).clone()} />
                    <Toast message={(*error).clone()} error={true} />

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <div class="flex items-center justify-between mb-4">
                            <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">
                                { if is_gudang { "Laporan Gudang Harian" } else { "Laporan Produksi Harian" } }
                            </h4>
                            <input type="date" value={(*tanggal).clone()} oninput={{
                                let tanggal = tanggal.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    tanggal.set(input.value());
                                })
                            }} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-3 gap-3 mb-4">
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Akun"}</label>
                                <select onchange={{
                                    let form_account = form_account.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        form_account.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                    <option value="" selected={form_account.is_empty()}>{"Pilih akun"}</option>
                                    { for accounts.iter().map(|a| html! {
                                        <option value={a.id.to_string()} selected={*form_account == a.id.to_string()}>
                                            { format!("{} — {}", a.account_code, a.account_name) }
                                        </option>
                                    }) }
                                </select>
                            </div>
                            {
                                if is_gudang {
                                    html! {
                                        <>
                                            { number_input("Pemakaian", "0", &form_pemakaian) }
                                            { number_input("Stok Akhir", "0", &form_stok_akhir) }
                                            <div class="space-y-1">
                                                <label class="text-[12px] font-bold text-muted-foreground">{"Kondisi Gudang"}</label>
                                                <select onchange={{
                                                    let form_kondisi = form_kondisi.clone();
                                                    Callback::from(move |e: Event| {
                                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                                        form_kondisi.set(input.value());
                                                    })
                                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                                    <option value="BAIK" selected={*form_kondisi == "BAIK"}>{"Baik"}</option>
                                                    <option value="PERLU_PERHATIAN" selected={*form_kondisi == "PERLU_PERHATIAN"}>{"Perlu Perhatian"}</option>
                                                    <option value="RUSAK" selected={*form_kondisi == "RUSAK"}>{"Rusak"}</option>
                                                </select>
                                            </div>
                                        </>
                                    }
                                } else {
                                    html! {
                                        <>
                                            { number_input("Hasil Produksi", "0", &form_hasil) }
                                            { number_input("Barang Gagal", "0", &form_gagal) }
                                            { number_input("Stock Barang Jadi", "0", &form_stock) }
                                            { number_input("HPP Barang Jadi (Rp)", "0", &form_hpp) }
                                        </>
                                    }
                                }
                            }
                        </div>

                        <button onclick={on_save} disabled={*saving} class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">
                            { if *saving { "Menyimpan..." } else { "Simpan Laporan" } }
                        </button>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{ format!("Laporan Tanggal {}", *tanggal) }</h3>
                        </div>
                        <div class="overflow-x-auto">
                            {
                                if is_gudang {
                                    html! {
                                        <table class="w-full text-left border-collapse">
                                            <thead>
                                                <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                                    <th class="px-8 py-4 font-bold">{"Akun"}</th>
                                                    <th class="px-8 py-4 font-bold text-right">{"Pemakaian"}</th>
                                                    <th class="px-8 py-4 font-bold text-right">{"Stok Akhir"}</th>
                                                    <th class="px-8 py-4 font-bold">{"Kondisi"}</th>
                                                </tr>
                                            </thead>
                                            <tbody class="divide-y divide-border">
                                                { if laporan_gudang.is_empty() {
                                                    html! { <tr><td colspan="4" class="px-8 py-6 text-center text-muted-foreground">{"Belum ada laporan."}</td></tr> }
                                                } else {
                                                    html! {
                                                        <>
                                                        { for laporan_gudang.iter().map(|row| html! {
                                                            <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                                <td class="px-8 py-4 text-foreground">{ account_name(row.account_id) }</td>
                                                                <td class="px-8 py-4 text-right font-semibold">{ format_quantity(row.pemakaian_amount) }</td>
                                                                <td class="px-8 py-4 text-right font-semibold">{ format_quantity(row.stok_akhir) }</td>
                                                                <td class="px-8 py-4 text-muted-foreground">{ row.kondisi_gudang.clone().unwrap_or_default() }</td>
                                                            </tr>
                                                        }) }
                                                        </>
                                                    }
                                                }}
                                            </tbody>
                                        </table>
                                    }
                                } else {
                                    html! {
                                        <table class="w-full text-left border-collapse">
                                            <thead>
                                                <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                                    <th class="px-8 py-4 font-bold">{"Akun"}</th>
                                                    <th class="px-8 py-4 font-bold text-right">{"Hasil"}</th>
                                                    <th class="px-8 py-4 font-bold text-right">{"Gagal"}</th>
                                                    <th class="px-8 py-4 font-bold text-right">{"Stock Jadi"}</th>
                                                    <th class="px-8 py-4 font-bold text-right">{"HPP"}</th>
                                                </tr>
                                            </thead>
                                            <tbody class="divide-y divide-border">
                                                { if laporan_produksi.is_empty() {
                                                    html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Belum ada laporan."}</td></tr> }
                                                } else {
                                                    html! {
                                                        <>
                                                        { for laporan_produksi.iter().map(|row| html! {
                                                            <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                                <td class="px-8 py-4 text-foreground">{ account_name(row.account_id) }</td>
                                                                <td class="px-8 py-4 text-right font-semibold">{ format_quantity(row.hasil_produksi) }</td>
                                                                <td class="px-8 py-4 text-right font-semibold">{ format_quantity(row.barang_gagal) }</td>
                                                                <td class="px-8 py-4 text-right font-semibold">{ format_quantity(row.stock_barang_jadi) }</td>
                                                                <td class="px-8 py-4 text-right font-semibold">{ format_rupiah(row.hp_barang_jadi) }</td>
                                                            </tr>
                                                        }) }
                                                        </>
                                                    }
                                                }}
                                            </tbody>
                                        </table>
                                    }
                                }
                            }
                        </div>
                    </div>
                </>
            }
        ) }
    }
}
