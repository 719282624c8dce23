use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::aggregate::hr_summary;
use crate::api;
use crate::app::page_shell;
use crate::components::{flash, StatCard, Toast};
use crate::format::{format_percent, today_string};
use crate::models::{Account, DivisionKind, EntriHarian, NewEntriHarian};
use crate::session::Session;

/// Attendance journal for the HR division: one entry per employee group
/// and shift, batch-saved like the other journals.
#[function_component(HrdJournalPage)]
pub fn hrd_journal_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };
    if !current.is_super_admin() && current.division_kind() != DivisionKind::Hrd {
        return page_shell(
            "Jurnal HRD",
            html! {},
            html! {
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground">{"Halaman ini khusus divisi HRD."}</p>
                </div>
            },
        );
    }

    let accounts = use_state(Vec::<Account>::new);
    let entries = use_state(Vec::<EntriHarian>::new);
    let tanggal = use_state(today_string);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let form_account = use_state(String::new);
    let form_status = use_state(|| "HADIR".to_string());
    let form_shift = use_state(|| "REGULER".to_string());
    let form_absen = use_state(|| "0".to_string());
    let form_keterangan = use_state(String::new);

    let division_id = current.division_id();

    let reload = {
        let accounts = accounts.clone();
        let entries = entries.clone();
        let error = error.clone();
        let tanggal = tanggal.clone();
        Callback::from(move |_: ()| {
            let date = (*tanggal).clone();
            let accounts = accounts.clone();
            let entries = entries.clone();
            let error = error.clone();
            spawn_local(async move {
                let rack = match division_id {
                    Some(id) => api::fetch_accounts_by_division(id).await,
                    None => api::fetch_accounts().await,
                };
                match rack {
                    Ok(list) => {
                        let active: Vec<Account> = list
                            .into_iter()
                            .filter(|a| {
                                a.status == "active"
                                    && DivisionKind::from_name(&a.division.name)
                                        == DivisionKind::Hrd
                            })
                            .collect();
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
            (*tanggal).clone(),
        );
    }

    let on_save = {
        let form_account = form_account.clone();
        let form_status = form_status.clone();
        let form_shift = form_shift.clone();
        let form_absen = form_absen.clone();
        let form_keterangan = form_keterangan.clone();
        let tanggal = tanggal.clone();
        let message = message.clone();
        let error = error.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let Ok(account_id) = form_account.parse::<i64>() else {
                flash(&error, "Pilih kelompok pegawai terlebih dahulu");
                return;
            };
            let date = tanggal.trim().to_string();
            if date.is_empty() {
                flash(&error, "Tanggal wajib diisi");
                return;
            }
            let absen = form_absen.trim().parse::<i64>().unwrap_or(-1);
            if absen < 0 {
                flash(&error, "Jumlah absen tidak valid");
                return;
            }

            let mut entri = NewEntriHarian::new(account_id, &date, 1.0);
            entri.attendance_status = Some((*form_status).clone());
            entri.shift = Some((*form_shift).clone());
            entri.absent_count = Some(absen);
            let keterangan = form_keterangan.trim();
            if !keterangan.is_empty() {
                entri.description = Some(keterangan.to_string());
            }

            saving.set(true);
            let form_keterangan = form_keterangan.clone();
            let form_absen = form_absen.clone();
            let message = message.clone();
            let error = error.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::batch_create_entries(&[entri]).await {
                    Ok(_) => {
                        form_keterangan.set(String::new());
                        form_absen.set("0".to_string());
                        flash(&message, "Catatan kehadiran disimpan");
                        reload.emit(());
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
                saving.set(false);
            });
        })
    };

    let summary = hr_summary(&entries);

    let account_name = |id: i64| -> String {
        accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.account_name.clone())
            .unwrap_or_else(|| "-".to_string())
    };

    fn status_label(status: &str) -> &str {
        match status {
            "HADIR" => "Hadir",
            "TIDAK_HADIR" => "Tidak Hadir",
            "SAKIT" => "Sakit",
            "IZIN" => "Izin",
            other => other,
        }
    }

    html! {
        { page_shell(
            "Jurnal HRD",
            html! {},
            html! {
                <>
                    <Toast message={(*message).clone()} />
                    <Toast message={(*error).clone()} error={true} />

                    <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                        <StatCard title="Hadir" value={summary.hadir.to_string()} />
                        <StatCard title="Sakit / Izin" value={format!("{} / {}", summary.sakit, summary.izin)} />
                        <StatCard title="Total Absen" value={summary.total_absen.to_string()} />
                        <StatCard
                            title="Tingkat Kehadiran"
                            value={format_percent(summary.presence_rate)}
                            hint={Some(summary.tier().general_label().to_string())}
                        />
                    </div>

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <div class="flex items-center justify-between mb-4">
                            <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{"Catat Kehadiran"}</h4>
                            <input type="date" value={(*tanggal).clone()} oninput={{
                                let tanggal = tanggal.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    tanggal.set(input.value());
                                })
                            }} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-5 gap-3 mb-4">
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Kelompok Pegawai"}</label>
                                <select onchange={{
                                    let form_account = form_account.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        form_account.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                    <option value="" selected={form_account.is_empty()}>{"Pilih"}</option>
                                    { for accounts.iter().map(|a| html! {
                                        <option value={a.id.to_string()} selected={*form_account == a.id.to_string()}>
                                            { format!("{} — {}", a.account_code, a.account_name) }
                                        </option>
                                    }) }
                                </select>
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Status"}</label>
                                <select onchange={{
                                    let form_status = form_status.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        form_status.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                    <option value="HADIR" selected={*form_status == "HADIR"}>{"Hadir"}</option>
                                    <option value="TIDAK_HADIR" selected={*form_status == "TIDAK_HADIR"}>{"Tidak Hadir"}</option>
                                    <option value="SAKIT" selected={*form_status == "SAKIT"}>{"Sakit"}</option>
                                    <option value="IZIN" selected={*form_status == "IZIN"}>{"Izin"}</option>
                                </select>
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Shift"}</label>
                                <select onchange={{
                                    let form_shift = form_shift.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        form_shift.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                    <option value="REGULER" selected={*form_shift == "REGULER"}>{"Reguler"}</option>
                                    <option value="LEMBUR" selected={*form_shift == "LEMBUR"}>{"Lembur"}</option>
                                </select>
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Jumlah Absen"}</label>
                                <input type="number" value={(*form_absen).clone()} oninput={{
                                    let form_absen = form_absen.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        form_absen.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Keterangan"}</label>
                                <input type="text" placeholder="Opsional" value={(*form_keterangan).clone()} oninput={{
                                    let form_keterangan = form_keterangan.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        form_keterangan.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                            </div>
                        </div>

                        <button onclick={on_save} disabled={*saving} class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">
                            { if *saving { "Menyimpan..." } else { "Simpan Catatan" } }
                        </button>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{ format!("Kehadiran Tanggal {}", *tanggal) }</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Kelompok"}</th>
                                        <th class="px-8 py-4 font-bold">{"Status"}</th>
                                        <th class="px-8 py-4 font-bold">{"Shift"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Jumlah Absen"}</th>
                                        <th class="px-8 py-4 font-bold">{"Keterangan"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if entries.is_empty() {
                                        html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Belum ada catatan untuk tanggal ini."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                            { for entries.iter().map(|entri| html! {
                                                <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                    <td class="px-8 py-4 text-foreground">{ account_name(entri.account_id) }</td>
                                                    <td class="px-8 py-4">
                                                        <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">
                                                            { status_label(entri.attendance_status.as_deref().unwrap_or("-")) }
                                                        </span>
                                                    </td>
                                                    <td class="px-8 py-4 text-muted-foreground">{ entri.shift.clone().unwrap_or_default() }</td>
                                                    <td class="px-8 py-4 text-right font-semibold">{ entri.absent_count.unwrap_or(0) }</td>
                                                    <td class="px-8 py-4 text-muted-foreground">{ entri.description.clone().unwrap_or_default() }</td>
                                                </tr>
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
