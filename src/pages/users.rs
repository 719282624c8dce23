use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::app::page_shell;
use crate::components::{flash, ConfirmDialog, Toast};
use crate::models::{AppUser, Division, NewAppUser, Role};
use crate::session::Session;

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };
    if !current.is_super_admin() {
        return page_shell(
            "Pengguna",
            html! {},
            html! {
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground">{"Halaman ini hanya untuk Super Admin."}</p>
                </div>
            },
        );
    }

    let users = use_state(Vec::<AppUser>::new);
    let divisions = use_state(Vec::<Division>::new);
    let loading = use_state(|| true);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);

    let form_username = use_state(String::new);
    let form_password = use_state(String::new);
    let form_role = use_state(|| "ADMIN_DIVISI".to_string());
    let form_division = use_state(String::new);
    let saving = use_state(|| false);

    let pending_delete = use_state(|| None::<AppUser>);

    let reload = {
        let users = users.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let users = users.clone();
            let loading = loading.clone();
            let error = error.clone();
            spawn_local(async move {
                match api::fetch_users().await {
                    Ok(list) => users.set(list),
                    Err(err) => flash(&error, &err.to_string()),
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        let divisions = divisions.clone();
        use_effect_with_deps(
            move |_| {
                reload.emit(());
                spawn_local(async move {
                    if let Ok(list) = api::fetch_divisions().await {
                        divisions.set(list);
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_create = {
        let form_username = form_username.clone();
        let form_password = form_password.clone();
        let form_role = form_role.clone();
        let form_division = form_division.clone();
        let message = message.clone();
        let error = error.clone();
        let saving = saving.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let username_val = form_username.trim().to_string();
            let password_val = (*form_password).clone();
            let role = if *form_role == "SUPER_ADMIN" {
                Role::SuperAdmin
            } else {
                Role::AdminDivisi
            };
            let division_id = form_division.parse::<i64>().ok();

            if username_val.is_empty() || password_val.is_empty() {
                flash(&error, "Username dan password wajib diisi");
                return;
            }
            if password_val.len() < 8 {
                flash(&error, "Password minimal 8 karakter");
                return;
            }
            if role == Role::AdminDivisi && division_id.is_none() {
                flash(&error, "Admin Divisi harus memiliki divisi");
                return;
            }

            let payload = NewAppUser {
                username: username_val,
                password: password_val,
                role,
                division_id: if role == Role::AdminDivisi { division_id } else { None },
                status: "active".to_string(),
            };

            saving.set(true);
            let form_username = form_username.clone();
            let form_password = form_password.clone();
            let message = message.clone();
            let error = error.clone();
            let saving = saving.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::create_user(&payload).await {
                    Ok(_) => {
                        form_username.set(String::new());
                        form_password.set(String::new());
                        flash(&message, "Pengguna baru berhasil dibuat");
                        reload.emit(());
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
                saving.set(false);
            });
        })
    };

    let on_toggle_status = {
        let message = message.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |user: AppUser| {
            let message = message.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let next_status = if user.status == "active" { "inactive" } else { "active" };
                let payload = NewAppUser {
                    username: user.username.clone(),
                    password: String::new(),
                    role: user.role,
                    division_id: user.division.as_ref().map(|d| d.id),
                    status: next_status.to_string(),
                };
                match api::update_user(user.id, &payload).await {
                    Ok(_) => {
                        flash(&message, "Status pengguna diperbarui");
                        reload.emit(());
                    }
                    Err(err) => flash(&error, &err.to_string()),
                }
            });
        })
    };

    let on_confirm_delete = {
        let pending_delete = pending_delete.clone();
        let message = message.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            let Some(user) = (*pending_delete).clone() else {
                return;
            };
            pending_delete.set(None);
            let message = message.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_user(user.id).await {
                    Ok(()) => {
                        flash(&message, "Pengguna dihapus");
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
        .map(|u| format!("Hapus pengguna \"{}\"? Tindakan ini tidak dapat dibatalkan.", u.username))
        .unwrap_or_default();

    html! {
        { page_shell(
            "Pengguna",
            html! {},
            html! {
                <>
                    <Toast message={(*message).clone()} />
                    <Toast message={(*error).clone()} error={true} />

                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Tambah Pengguna"}</h4>
                        <div class="grid grid-cols-1 md:grid-cols-4 gap-3 mb-4">
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Username"}</label>
                                <input type="text" value={(*form_username).clone()} oninput={{
                                    let form_username = form_username.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        form_username.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Password"}</label>
                                <input type="password" value={(*form_password).clone()} oninput={{
                                    let form_password = form_password.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        form_password.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Peran"}</label>
                                <select onchange={{
                                    let form_role = form_role.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        form_role.set(input.value());
                                    })
                                }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                    <option value="ADMIN_DIVISI" selected={*form_role == "ADMIN_DIVISI"}>{"Admin Divisi"}</option>
                                    <option value="SUPER_ADMIN" selected={*form_role == "SUPER_ADMIN"}>{"Super Admin"}</option>
                                </select>
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Divisi"}</label>
                                <select onchange={{
                                    let form_division = form_division.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        form_division.set(input.value());
                                    })
                                }} disabled={*form_role == "SUPER_ADMIN"} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px]">
                                    <option value="">{"Pilih divisi"}</option>
                                    { for divisions.iter().map(|d| html! {
                                        <option value={d.id.to_string()} selected={*form_division == d.id.to_string()}>{ d.name.clone() }</option>
                                    }) }
                                </select>
                            </div>
                        </div>
                        <button onclick={on_create} disabled={*saving} class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">
                            { if *saving { "Menyimpan..." } else { "Tambah Pengguna" } }
                        </button>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{"Daftar Pengguna"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Username"}</th>
                                        <th class="px-8 py-4 font-bold">{"Peran"}</th>
                                        <th class="px-8 py-4 font-bold">{"Divisi"}</th>
                                        <th class="px-8 py-4 font-bold">{"Status"}</th>
                                        <th class="px-8 py-4 font-bold">{"Login Terakhir"}</th>
                                        <th class="px-8 py-4 font-bold">{"Aksi"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="6" class="px-8 py-6 text-center text-muted-foreground">{"Memuat data..."}</td></tr> }
                                    } else if users.is_empty() {
                                        html! { <tr><td colspan="6" class="px-8 py-6 text-center text-muted-foreground">{"Belum ada pengguna."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                            { for users.iter().map(|user| {
                                                let status_class = if user.status == "active" {
                                                    "bg-green-100 text-green-700 px-3 py-1 rounded-full text-[10px] font-bold"
                                                } else {
                                                    "bg-slate-100 text-slate-500 px-3 py-1 rounded-full text-[10px] font-bold"
                                                };
                                                let toggle = {
                                                    let on_toggle_status = on_toggle_status.clone();
                                                    let user = user.clone();
                                                    Callback::from(move |_| on_toggle_status.emit(user.clone()))
                                                };
                                                let ask_delete = {
                                                    let pending_delete = pending_delete.clone();
                                                    let user = user.clone();
                                                    Callback::from(move |_| pending_delete.set(Some(user.clone())))
                                                };
                                                let is_self = user.id == current.user.id;
                                                html! {
                                                    <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                        <td class="px-8 py-4 font-semibold text-foreground">{ user.username.clone() }</td>
                                                        <td class="px-8 py-4 text-foreground">{ user.role.label() }</td>
                                                        <td class="px-8 py-4 text-muted-foreground">
                                                            { user.division.as_ref().map(|d| d.name.clone()).unwrap_or_else(|| "Semua divisi".to_string()) }
                                                        </td>
                                                        <td class="px-8 py-4"><span class={status_class}>{ if user.status == "active" { "Aktif" } else { "Nonaktif" } }</span></td>
                                                        <td class="px-8 py-4 text-muted-foreground">{ user.last_login.clone().unwrap_or_else(|| "-".to_string()) }</td>
                                                        <td class="px-8 py-4">
                                                            <div class="flex items-center gap-2">
                                                                <button onclick={toggle} disabled={is_self} class="text-[10px] font-bold text-sky-600 uppercase">
                                                                    { if user.status == "active" { "Nonaktifkan" } else { "Aktifkan" } }
                                                                </button>
                                                                <button onclick={ask_delete} disabled={is_self} class="text-[10px] font-bold text-red-600 uppercase">
                                                                    {"Hapus"}
                                                                </button>
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
                        title="Hapus Pengguna"
                        message={delete_message}
                        on_confirm={on_confirm_delete}
                        on_cancel={on_cancel_delete}
                    />
                </>
            }
        ) }
    }
}
