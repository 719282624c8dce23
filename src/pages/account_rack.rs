use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::aggregate::account_delete_block;
use crate::api;
use crate::app::page_shell;
use crate::components::icons::{icon_pencil, icon_trash};
use crate::components::{flash, ConfirmDialog, Toast};
use crate::format::{is_valid_account_code, next_account_code};
use crate::models::{Account, Division, NewAccount, ValueType};
use crate::session::Session;

/// Per-division chart-of-accounts manager. Deleting an account is
/// blocked while daily entries still reference it.
#[function_component(AccountRackPage)]
pub fn account_rack_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };

    let divisions = use_state(Vec::<Division>::new);
    let own_division = current.division_id();
    let selected_division = use_state(move || own_division);
    let accounts = use_state(Vec::<Account>::new);
    let loading = use_state(|| false);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);

    let form_code = use_state(String::new);
    let form_name = use_state(String::new);
    let form_type = use_state(|| "NOMINAL".to_string());
    let form_status = use_state(|| "active".to_string());
    let edit_id = use_state(|| None::<i64>);
    let saving = use_state(|| false);

    let pending_delete = use_state(|| None::<Account>);

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
        let loading = loading.clone();
        let error = error.clone();
        let form_code = form_code.clone();
        let edit_id = edit_id.clone();
        let selected_division = selected_division.clone();
        Callback::from(move |_: ()| {
            let Some(division_id) = *selected_division else {
                return;
            };
            let accounts = accounts.clone();
            let loading = loading.clone();
            let error = error.clone();
            let form_code = form_code.clone();
            let edit_id = edit_id.clone();
            loading.set(true);
            spawn_local(async move {
                match api::fetch_accounts_by_division(division_id).await {
                    Ok(list) => {
                        if edit_id.is_none() {
                            form_code.set(next_account_code(division_id, &list));
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
            *selected_division,
        );
    }

    let on_division_change = {
        let selected_division = selected_division.clone();
        let edit_id = edit_id.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            edit_id.set(None);
            selected_division.set(input.value().parse::<i64>().ok());
        })
    };

    let on_edit = {
        let form_code = form_code.clone();
        let form_name = form_name.clone();
        let form_type = form_type.clone();
        let form_status = form_status.clone();
        let edit_id = edit_id.clone();
        Callback::from(move |account: Account| {
            form_code.set(account.account_code.clone());
            form_name.set(account.account_name.clone());
            form_type.set(
                match account.value_type {
                    ValueType::Nominal => "NOMINAL",
                    ValueType::Kuantitas => "KUANTITAS",
                }
                .to_string(),
            );
            form_status.set(account.status.clone());
            edit_id.set(Some(account.id));
        })
    };

    let on_cancel_edit = {
        let form_name = form_name.clone();
        let form_code = form_code.clone();
        let edit_id = edit_id.clone();
        let accounts = accounts.clone();
        let selected_division = selected_division.clone();
        Callback::from(move |_| {
            edit_id.set(None);
            form_name.set(String::new());
            if let Some(division_id) = *selected_division {
                form_code.set(next_account_code(division_id, &accounts));
            }
        })
    };

    let on_submit = {
        let form_code = form_code.clone();
        let form_name = form_name.clone();
        let form_type = form_type.clone();
        let form_status = form_status.clone();
        let edit_id = edit_id.clone();
        let selected_division = selected_division.clone();
        let message = message.clone();
        let error = error.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let Some(division_id) = *selected_division else {
                flash(&error, "Pilih divisi terlebih dahulu");
                return;
            };
            let code_val = form_code.trim().to_string();
            let name_val = form_name.trim().to_string();

            if code_val.is_empty() || name_val.is_empty() {
                flash(&error, "Kode dan nama akun wajib diisi");
                return;
            }
            if !is_valid_account_code(&code_val) {
                flash(&error, "Format kode akun tidak valid, contoh: 5-001");
                return;
            }
            if !code_val.starts_with(&format!("{division_id}-")) {
                flash(&error, "Kode akun harus diawali prefiks divisi");
                return;
            }

            let payload = NewAccount {
                account_code: code_val,
                account_name: name_val,
                value_type: if *form_type == "KUANTITAS" {
                    ValueType::Kuantitas
                } else {
                    ValueType::Nominal
                },
                division_id,
                status: (*form_status).clone(),
            };

            saving.set(true);
            let editing = *edit_id;
            let form_name = form_name.clone();
            let edit_id = edit_id.clone();
            let message = message.clone();
            let error = error.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let result = match editing {
                    Some(id) => api::update_account(id, &payload).await,
                    None => api::create_account(&payload).await,
                };
                match result {
                    Ok(_) => {
                        form_name.set(String::new());
                        edit_id.set(None);
                        flash(
                            &message,
                            if editing.is_some() {
                                "Akun berhasil diperbarui"
                            } else {
                                "Akun baru berhasil ditambahkan"
                            },
                        );
                        reload.emit(());
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
                saving.set(false);
            });
        })
    };

    // Usage check runs before the dialog confirms anything.
    let on_confirm_delete = {
        let pending_delete = pending_delete.clone();
        let message = message.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            let Some(account) = (*pending_delete).clone() else {
                return;
            };
            pending_delete.set(None);
            let message = message.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::count_entries_for_account(account.id).await {
                    Ok(count) => match account_delete_block(&account.account_code, count) {
                        None => match api::delete_account(account.id).await {
                            Ok(()) => {
                                flash(&message, "Akun dihapus");
                                reload.emit(());
                            }
                            Err(err) => flash(&error, &err.to_string()),
                        },
                        Some(blocked) => flash(&error, &blocked),
                    },
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
        .map(|a| format!("Hapus akun {} — {}?", a.account_code, a.account_name))
        .unwrap_or_default();

    let division_picker = if current.is_super_admin() {
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

    html! {
        { page_shell(
            "Rak Akun",
            division_picker,
            html! {
                <>
                    <Toast message={(*message).clone()} />
                    <Toast message={(*error).clone()} error={true} />

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">
                            { if edit_id.is_some() { "Ubah Akun" } else { "Tambah Akun" } }
                        </h4>
                        <div class="grid grid-cols-1 md:grid-cols-4 gap-3 mb-4">
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Kode Akun"}</label>
                                <input type="text" placeholder="mis. 5-001" value={(*form_code).clone()} oninput={{
                                    let form_code = form_code.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        form_code.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Nama Akun"}</label>
                                <input type="text" placeholder="mis. Kas Besar" value={(*form_name).clone()} oninput={{
                                    let form_name = form_name.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        form_name.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Jenis Nilai"}</label>
                                <select onchange={{
                                    let form_type = form_type.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        form_type.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                    <option value="NOMINAL" selected={*form_type == "NOMINAL"}>{"Nominal (Rp)"}</option>
                                    <option value="KUANTITAS" selected={*form_type == "KUANTITAS"}>{"Kuantitas (unit)"}</option>
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
                                    <option value="active" selected={*form_status == "active"}>{"Aktif"}</option>
                                    <option value="inactive" selected={*form_status == "inactive"}>{"Nonaktif"}</option>
                                </select>
                            </div>
                        </div>
                        <div class="flex gap-3">
                            <button onclick={on_submit} disabled={*saving} class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">
                                { if *saving { "Menyimpan..." } else if edit_id.is_some() { "Perbarui Akun" } else { "Simpan Akun" } }
                            </button>
                            {
                                if edit_id.is_some() {
                                    html! {
                                        <button onclick={on_cancel_edit} class="bg-[#B2CBDE] text-[#173E63] px-6 py-2 rounded-[10px] text-[10px] font-bold">
                                            {"Batal"}
                                        </button>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{"Akun Divisi"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Kode"}</th>
                                        <th class="px-8 py-4 font-bold">{"Nama Akun"}</th>
                                        <th class="px-8 py-4 font-bold">{"Jenis Nilai"}</th>
                                        <th class="px-8 py-4 font-bold">{"Status"}</th>
                                        <th class="px-8 py-4 font-bold">{"Aksi"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if selected_division.is_none() {
                                        html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Pilih divisi untuk melihat rak akun."}</td></tr> }
                                    } else if *loading {
                                        html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Memuat data..."}</td></tr> }
                                    } else if accounts.is_empty() {
                                        html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Belum ada akun untuk divisi ini."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                            { for accounts.iter().map(|account| {
                                                let edit = {
                                                    let on_edit = on_edit.clone();
                                                    let account = account.clone();
                                                    Callback::from(move |_| on_edit.emit(account.clone()))
                                                };
                                                let ask_delete = {
                                                    let pending_delete = pending_delete.clone();
                                                    let account = account.clone();
                                                    Callback::from(move |_| pending_delete.set(Some(account.clone())))
                                                };
                                                html! {
                                                    <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                        <td class="px-8 py-4 font-semibold text-foreground">{ account.account_code.clone() }</td>
                                                        <td class="px-8 py-4 text-foreground">{ account.account_name.clone() }</td>
                                                        <td class="px-8 py-4 text-muted-foreground">{ account.value_type.label() }</td>
                                                        <td class="px-8 py-4 text-muted-foreground">{ if account.status == "active" { "Aktif" } else { "Nonaktif" } }</td>
                                                        <td class="px-8 py-4">
                                                            <div class="flex items-center gap-3">
                                                                <button onclick={edit} class="text-sky-600" aria-label="Ubah akun">{ icon_pencil() }</button>
                                                                <button onclick={ask_delete} class="text-red-600" aria-label="Hapus akun">{ icon_trash() }</button>
                                                            </div>
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
                        title="Hapus Akun"
                        message={delete_message}
                        on_confirm={on_confirm_delete}
                        on_cancel={on_cancel_delete}
                    />
                </>
            }
        ) }
    }
}
