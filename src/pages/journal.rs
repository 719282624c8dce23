use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::app::page_shell;
use crate::components::icons::{icon_plus, icon_trash};
use crate::components::{flash, Toast};
use crate::format::{format_quantity, format_rupiah, today_string};
use crate::models::{Account, Division, DivisionKind, EntriHarian, NewEntriHarian, ValueType};
use crate::session::Session;

#[derive(Clone, PartialEq)]
struct DraftRow {
    account_id: String,
    nilai: String,
    description: String,
    transaction_type: String,
}

impl DraftRow {
    fn empty() -> Self {
        DraftRow {
            account_id: String::new(),
            nilai: String::new(),
            description: String::new(),
            transaction_type: "PENERIMAAN".to_string(),
        }
    }
}

/// Daily journal wizard: build a batch of entries against the division's
/// account rack, validate, save in one request, then reload the day.
#[function_component(JournalPage)]
pub fn journal_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };

    let divisions = use_state(Vec::<Division>::new);
    let own_division = current.division_id();
    let selected_division = use_state(move || own_division);
    let accounts = use_state(Vec::<Account>::new);
    let entries = use_state(Vec::<EntriHarian>::new);
    let tanggal = use_state(today_string);
    let rows = use_state(|| vec![DraftRow::empty()]);
    let saving = use_state(|| false);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);

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

    let reload = {
        let accounts = accounts.clone();
        let entries = entries.clone();
        let error = error.clone();
        let selected_division = selected_division.clone();
        let tanggal = tanggal.clone();
        Callback::from(move |_: ()| {
            let Some(division_id) = *selected_division else {
                return;
            };
            let date = (*tanggal).clone();
            let accounts = accounts.clone();
            let entries = entries.clone();
            let error = error.clone();
            spawn_local(async move {
                match api::fetch_accounts_by_division(division_id).await {
                    Ok(list) => {
                        let active: Vec<Account> =
                            list.into_iter().filter(|a| a.status == "active").collect();
                        match api::fetch_entries_by_date(&date).await {
                            Ok(day) => {
                                let ids: Vec<i64> = active.iter().map(|a| a.id).collect();
                                entries.set(
                                    day.into_iter()
                                        .filter(|e| ids.contains(&e.account_id))
                                        .collect(),
                                );
                            }
                            Err(err) => flash(&error, &err.to_string()),
                        }
                        accounts.set(active);
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
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
            (*selected_division, (*tanggal).clone()),
        );
    }

    let kind = if current.is_super_admin() {
        selected_division
            .and_then(|id| divisions.iter().find(|d| d.id == id).cloned())
            .map(|d| DivisionKind::from_name(&d.name))
            .unwrap_or(DivisionKind::Umum)
    } else {
        current.division_kind()
    };
    let is_finance = kind == DivisionKind::Keuangan;

    let update_row = {
        let rows = rows.clone();
        Callback::from(move |(idx, row): (usize, DraftRow)| {
            let mut next = (*rows).clone();
            if idx < next.len() {
                next[idx] = row;
            }
            rows.set(next);
        })
    };

    let add_row = {
        let rows = rows.clone();
        Callback::from(move |_| {
            let mut next = (*rows).clone();
            next.push(DraftRow::empty());
            rows.set(next);
        })
    };

    let remove_row = {
        let rows = rows.clone();
        Callback::from(move |idx: usize| {
            let mut next = (*rows).clone();
            if next.len() > 1 && idx < next.len() {
                next.remove(idx);
                rows.set(next);
            }
        })
    };

    let on_save = {
        let rows = rows.clone();
        let tanggal = tanggal.clone();
        let message = message.clone();
        let error = error.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let date = tanggal.trim().to_string();
            if date.is_empty() {
                flash(&error, "Tanggal wajib diisi");
                return;
            }

            let mut batch = Vec::with_capacity(rows.len());
            for (idx, row) in rows.iter().enumerate() {
                let Ok(account_id) = row.account_id.parse::<i64>() else {
                    flash(&error, &format!("Baris {}: pilih akun", idx + 1));
                    return;
                };
                let nilai = row.nilai.trim().parse::<f64>().unwrap_or(0.0);
                if nilai <= 0.0 {
                    flash(&error, &format!("Baris {}: nilai harus lebih dari nol", idx + 1));
                    return;
                }
                let mut entri = NewEntriHarian::new(account_id, &date, nilai);
                let description = row.description.trim();
                if !description.is_empty() {
                    entri.description = Some(description.to_string());
                }
                if is_finance {
                    entri.transaction_type = Some(row.transaction_type.clone());
                }
                batch.push(entri);
            }

            if batch.is_empty() {
                flash(&error, "Tambahkan minimal satu baris entri");
                return;
            }

            saving.set(true);
            let rows = rows.clone();
            let message = message.clone();
            let error = error.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::batch_create_entries(&batch).await {
                    Ok(saved) => {
                        rows.set(vec![DraftRow::empty()]);
                        flash(&message, &format!("{} entri berhasil disimpan", saved.len()));
                        reload.emit(());
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
                saving.set(false);
            });
        })
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
                { for divisions.iter().map(|d| html! {
                    <option value={d.id.to_string()} selected={*selected_division == Some(d.id)}>{ d.name.clone() }</option>
                }) }
            </select>
        }
    } else {
        html! {}
    };

    let account_label = |id: i64| -> (String, Option<ValueType>) {
        accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| {
                (
                    format!("{} — {}", a.account_code, a.account_name),
                    Some(a.value_type),
                )
            })
            .unwrap_or_else(|| ("-".to_string(), None))
    };

    html! {
        { page_shell(
            "Jurnal Harian",
            division_picker,
            html! {
                <>
                    <Toast message={(*message).clone()} />
                    <Toast message={(*error).clone()} error={true} />

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <div class="flex items-center justify-between mb-4">
                            <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{"Entri Baru"}</h4>
                            <div class="space-y-1">
                                <input type="date" value={(*tanggal).clone()} oninput={{
                                    let tanggal = tanggal.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        tanggal.set(input.value());
                                    })
                                }} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                            </div>
                        </div>

                        <div class="space-y-3">
                            { for rows.iter().enumerate().map(|(idx, row)| {
                                let on_account = {
                                    let update_row = update_row.clone();
                                    let row = row.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        let mut next = row.clone();
                                        next.account_id = input.value();
                                        update_row.emit((idx, next));
                                    })
                                };
                                let on_nilai = {
                                    let update_row = update_row.clone();
                                    let row = row.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        let mut next = row.clone();
                                        next.nilai = input.value();
                                        update_row.emit((idx, next));
                                    })
                                };
                                let on_description = {
                                    let update_row = update_row.clone();
                                    let row = row.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        let mut next = row.clone();
                                        next.description = input.value();
                                        update_row.emit((idx, next));
                                    })
                                };
                                let on_type = {
                                    let update_row = update_row.clone();
                                    let row = row.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        let mut next = row.clone();
                                        next.transaction_type = input.value();
                                        update_row.emit((idx, next));
                                    })
                                };
                                let on_remove = {
                                    let remove_row = remove_row.clone();
                                    Callback::from(move |_| remove_row.emit(idx))
                                };
                                html! {
                                    <div class="grid grid-cols-1 md:grid-cols-12 gap-3 items-end" key={idx}>
                                        <div class={if is_finance { "md:col-span-4 space-y-1" } else { "md:col-span-5 space-y-1" }}>
                                            <label class="text-[12px] font-bold text-muted-foreground">{"Akun"}</label>
                                            <select onchange={on_account} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                                <option value="" selected={row.account_id.is_empty()}>{"Pilih akun"}</option>
                                                { for accounts.iter().map(|a| html! {
                                                    <option value={a.id.to_string()} selected={row.account_id == a.id.to_string()}>
                                                        { format!("{} — {}", a.account_code, a.account_name) }
                                                    </option>
                                                }) }
                                            </select>
                                        </div>
                                        {
                                            if is_finance {
                                                html! {
                                                    <div class="md:col-span-2 space-y-1">
                                                        <label class="text-[12px] font-bold text-muted-foreground">{"Jenis"}</label>
                                                        <select onchange={on_type} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                                            <option value="PENERIMAAN" selected={row.transaction_type == "PENERIMAAN"}>{"Penerimaan"}</option>
                                                            <option value="PENGELUARAN" selected={row.transaction_type == "PENGELUARAN"}>{"Pengeluaran"}</option>
                                                        </select>
                                                    </div>
                                                }
                                            } else {
                                                html! {}
                                            }
                                        }
                                        <div class="md:col-span-2 space-y-1">
                                            <label class="text-[12px] font-bold text-muted-foreground">{"Nilai"}</label>
                                            <input type="number" placeholder="0" value={row.nilai.clone()} oninput={on_nilai} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                        </div>
                                        <div class={if is_finance { "md:col-span-3 space-y-1" } else { "md:col-span-4 space-y-1" }}>
                                            <label class="text-[12px] font-bold text-muted-foreground">{"Deskripsi"}</label>
                                            <input type="text" placeholder="Keterangan entri" value={row.description.clone()} oninput={on_description} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                                        </div>
                                        <div class="md:col-span-1">
                                            <button onclick={on_remove} class="p-2 text-red-500 hover:bg-red-50 rounded-lg" aria-label="Hapus baris">
                                                { icon_trash() }
                                            </button>
                                        </div>
                                    </div>
                                }
                            }) }
                        </div>

                        <div class="flex gap-3 mt-5">
                            <button onclick={add_row} class="flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-[10px] text-[10px] font-bold">
                                { icon_plus() }
                                {"Tambah Baris"}
                            </button>
                            <button onclick={on_save} disabled={*saving} class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">
                                { if *saving { "Menyimpan..." } else { "Simpan Semua" } }
                            </button>
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{ format!("Entri Tanggal {}", *tanggal) }</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Akun"}</th>
                                        <th class="px-8 py-4 font-bold">{"Deskripsi"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Nilai"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if entries.is_empty() {
                                        html! { <tr><td colspan="3" class="px-8 py-6 text-center text-muted-foreground">{"Belum ada entri untuk tanggal ini."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                            { for entries.iter().map(|entri| {
                                                let (label, value_type) = account_label(entri.account_id);
                                                let nilai = match value_type {
                                                    Some(ValueType::Kuantitas) => format_quantity(entri.nilai),
                                                    _ => format_rupiah(entri.nilai),
                                                };
                                                html! {
                                                    <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                        <td class="px-8 py-4 text-foreground">{ label }</td>
                                                        <td class="px-8 py-4 text-muted-foreground">{ entri.description.clone().unwrap_or_default() }</td>
                                                        <td class="px-8 py-4 text-right font-semibold text-foreground">{ nilai }</td>
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
                </>
            }
        ) }
    }
}
