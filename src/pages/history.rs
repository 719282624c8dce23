use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::app::page_shell;
use crate::components::icons::{icon_download, icon_trash};
use crate::components::{flash, ConfirmDialog, Toast};
use crate::csv::{build_csv, download_csv};
use crate::format::{format_quantity, format_rupiah, normalize_date};
use crate::models::{Account, EntriHarian, ValueType};
use crate::session::Session;

/// Transaction history for the admin's division: filter, export, delete.
#[function_component(HistoryPage)]
pub fn history_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };

    let accounts = use_state(Vec::<Account>::new);
    let entries = use_state(Vec::<EntriHarian>::new);
    let loading = use_state(|| true);
    let filter_date = use_state(String::new);
    let filter_account = use_state(String::new);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let pending_delete = use_state(|| None::<EntriHarian>);

    let division_id = if current.is_super_admin() {
        None
    } else {
        current.division_id()
    };

    let reload = {
        let accounts = accounts.clone();
        let entries = entries.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let accounts = accounts.clone();
            let entries = entries.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            spawn_local(async move {
                let rack = match division_id {
                    Some(id) => api::fetch_accounts_by_division(id).await,
                    None => api::fetch_accounts().await,
                };
                match rack {
                    Ok(list) => {
                        match api::fetch_entries().await {
                            Ok(all) => {
                                let ids: Vec<i64> = list.iter().map(|a| a.id).collect();
                                entries.set(
                                    all.into_iter()
                                        .filter(|e| ids.contains(&e.account_id))
                                        .collect(),
                                );
                            }
                            Err(err) => flash(&error, &err.to_string()),
                        }
                        accounts.set(list);
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with_deps(
            move |_| {
                reload.emit(());
                || ()
            },
            (),
        );
    }

    let account_of = |id: i64| accounts.iter().find(|a| a.id == id);

    let visible: Vec<&EntriHarian> = entries
        .iter()
        .filter(|e| {
            if !filter_date.is_empty()
                && normalize_date(&e.tanggal).as_deref() != Some(filter_date.as_str())
            {
                return false;
            }
            if !filter_account.is_empty() && e.account_id.to_string() != *filter_account {
                return false;
            }
            true
        })
        .collect();

    let on_export = {
        let filter_date = filter_date.clone();
        let rows: Vec<Vec<String>> = visible
            .iter()
            .map(|entri| {
                let account = account_of(entri.account_id);
                vec![
                    normalize_date(&entri.tanggal).unwrap_or_else(|| entri.tanggal.clone()),
                    account.map(|a| a.account_code.clone()).unwrap_or_default(),
                    account
                        .map(|a| a.account_name.clone())
                        .unwrap_or_else(|| "-".to_string()),
                    entri.description.clone().unwrap_or_default(),
                    entri.nilai.to_string(),
                ]
            })
            .collect();
        Callback::from(move |_| {
            let csv = build_csv(&["Tanggal", "Kode Akun", "Nama Akun", "Deskripsi", "Nilai"], &rows);
            let suffix = if filter_date.is_empty() {
                "semua".to_string()
            } else {
                (*filter_date).clone()
            };
            download_csv(&format!("riwayat-transaksi-{suffix}.csv"), &csv);
        })
    };

    let on_confirm_delete = {
        let pending_delete = pending_delete.clone();
        let message = message.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            let Some(entri) = (*pending_delete).clone() else {
                return;
            };
            pending_delete.set(None);
            let message = message.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_entry(entri.id).await {
                    Ok(()) => {
                        flash(&message, "Entri dihapus");
                        reload.emit(());
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
            });
        })
    };

    let on_cancel_delete = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_: ()| pending_delete.set(None))
    };

    let delete_message = pending_delete
        .as_ref()
        .map(|e| {
            format!(
                "Hapus entri tanggal {} senilai {}?",
                normalize_date(&e.tanggal).unwrap_or_else(|| e.tanggal.clone()),
                e.nilai
            )
        })
        .unwrap_or_default();

    html! {
        { page_shell(
            "Riwayat Transaksi",
            html! {
                <button onclick={on_export} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_download() }
                    {"Ekspor CSV"}
                </button>
            },
            html! {
                <>
                    <Toast message={(*message).clone()} />
                    <Toast message={(*error).clone()} error={true} />

                    <div class="bg-card rounded-[10px] p-4 border border-border flex flex-wrap items-end gap-3">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Tanggal"}</label>
                            <input type="date" value={(*filter_date).clone()} oninput={{
                                let filter_date = filter_date.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    filter_date.set(input.value());
                                })
                            }} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Akun"}</label>
                            <select onchange={{
                                let filter_account = filter_account.clone();
                                Callback::from(move |e: Event| {
                                    let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                    filter_account.set(input.value());
                                })
                            }} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                <option value="" selected={filter_account.is_empty()}>{"Semua akun"}</option>
                                { for accounts.iter().map(|a| html! {
                                    <option value={a.id.to_string()} selected={*filter_account == a.id.to_string()}>
                                        { format!("{} — {}", a.account_code, a.account_name) }
                                    </option>
                                }) }
                            </select>
                        </div>
                        {
                            if !filter_date.is_empty() || !filter_account.is_empty() {
                                let filter_date = filter_date.clone();
                                let filter_account = filter_account.clone();
                                html! {
                                    <button onclick={Callback::from(move |_| {
                                        filter_date.set(String::new());
                                        filter_account.set(String::new());
                                    })} class="bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-[10px] text-[10px] font-bold">
                                        {"Hapus Filter"}
                                    </button>
                                }
                            } else {
                                html! {}
                            }
                        }
                        <span class="ml-auto text-xs text-muted-foreground">{ format!("{} entri", visible.len()) }</span>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Tanggal"}</th>
                                        <th class="px-8 py-4 font-bold">{"Akun"}</th>
                                        <th class="px-8 py-4 font-bold">{"Deskripsi"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Nilai"}</th>
                                        <th class="px-8 py-4 font-bold">{"Aksi"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Memuat data..."}</td></tr> }
                                    } else if visible.is_empty() {
                                        html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Tidak ada entri yang cocok."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                            { for visible.iter().map(|entri| {
                                                let account = account_of(entri.account_id);
                                                let nilai = match account.map(|a| a.value_type) {
                                                    Some(ValueType::Kuantitas) => format_quantity(entri.nilai),
                                                    _ => format_rupiah(entri.nilai),
                                                };
                                                let ask_delete = {
                                                    let pending_delete = pending_delete.clone();
                                                    let entri = (*entri).clone();
                                                    Callback::from(move |_| pending_delete.set(Some(entri.clone())))
                                                };
                                                html! {
                                                    <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                        <td class="px-8 py-4 text-muted-foreground">
                                                            { normalize_date(&entri.tanggal).unwrap_or_else(|| entri.tanggal.clone()) }
                                                        </td>
                                                        <td class="px-8 py-4 text-foreground">
                                                            { account.map(|a| format!("{} — {}", a.account_code, a.account_name)).unwrap_or_else(|| "-".to_string()) }
                                                        </td>
                                                        <td class="px-8 py-4 text-muted-foreground">{ entri.description.clone().unwrap_or_default() }</td>
                                                        <td class="px-8 py-4 text-right font-semibold text-foreground">{ nilai }</td>
                                                        <td class="px-8 py-4">
                                                            <button onclick={ask_delete} class="text-red-600" aria-label="Hapus entri">{ icon_trash() }</button>
                                                        </td>
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

                    <ConfirmDialog
                        open={pending_delete.is_some()}
                        title="Hapus Entri"
                        message={delete_message}
                        on_confirm={on_confirm_delete}
                        on_cancel={on_cancel_delete}
                    />
                </>
            }
        ) }
    }
}
