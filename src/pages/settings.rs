use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::app::page_shell;
use crate::components::{flash, Toast};
use crate::models::AppSettings;
use crate::session::{self, Session};

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };
    let settings_ctx = use_context::<UseStateHandle<AppSettings>>();

    let company_name = use_state(String::new);
    let company_address = use_state(String::new);
    let report_footer = use_state(String::new);
    let message = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    {
        let company_name = company_name.clone();
        let company_address = company_address.clone();
        let report_footer = report_footer.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    if let Ok(remote) = api::fetch_settings().await {
                        company_name.set(remote.company_name.clone());
                        company_address.set(remote.company_address.clone());
                        report_footer.set(remote.report_footer);
                    }
                });
                || ()
            },
            (),
        );
    }

    let can_save = current.is_super_admin();

    let on_save = {
        let company_name = company_name.clone();
        let company_address = company_address.clone();
        let report_footer = report_footer.clone();
        let message = message.clone();
        let error = error.clone();
        let saving = saving.clone();
        let settings_ctx = settings_ctx.clone();
        Callback::from(move |_| {
            let name_val = company_name.trim().to_string();
            if name_val.is_empty() {
                flash(&error, "Nama perusahaan wajib diisi");
                return;
            }

            let payload = AppSettings {
                company_name: name_val,
                company_address: company_address.trim().to_string(),
                report_footer: report_footer.trim().to_string(),
            };

            saving.set(true);
            let message = message.clone();
            let error = error.clone();
            let saving = saving.clone();
            let settings_ctx = settings_ctx.clone();
            spawn_local(async move {
                match api::save_settings(&payload).await {
                    Ok(saved) => {
                        session::cache_settings(&saved);
                        if let Some(ctx) = settings_ctx {
                            ctx.set(saved);
                        }
                        flash(&message, "Pengaturan berhasil disimpan");
                    }
                    Err(err) => {
                        flash(&error, &err.to_string());
                    }
                }
                saving.set(false);
            });
        })
    };

    html! {
        { page_shell(
            "Pengaturan",
            html! {},
            html! {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    <div class="bg-card rounded-lg p-6 border border-border">
                        <h2 class="text-xl font-bold text-foreground mb-6">{"Profil Perusahaan"}</h2>
                        <div class="space-y-4">
                            <div>
                                <label class="block text-sm font-medium text-foreground mb-2">{"Nama Perusahaan"}</label>
                                <input
                                    type="text"
                                    value={(*company_name).clone()}
                                    disabled={!can_save}
                                    oninput={{
                                        let company_name = company_name.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                            company_name.set(input.value());
                                        })
                                    }}
                                    class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-foreground mb-2">{"Alamat"}</label>
                                <input
                                    type="text"
                                    value={(*company_address).clone()}
                                    disabled={!can_save}
                                    oninput={{
                                        let company_address = company_address.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                            company_address.set(input.value());
                                        })
                                    }}
                                    class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-foreground mb-2">{"Catatan Kaki Laporan"}</label>
                                <input
                                    type="text"
                                    value={(*report_footer).clone()}
                                    disabled={!can_save}
                                    oninput={{
                                        let report_footer = report_footer.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                            report_footer.set(input.value());
                                        })
                                    }}
                                    class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                />
                                <p class="text-xs text-muted-foreground mt-2">{"Dicetak di bagian bawah setiap laporan PDF."}</p>
                            </div>
                            {
                                if can_save {
                                    html! {
                                        <button onclick={on_save} disabled={*saving} class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                                            { if *saving { "Menyimpan..." } else { "Simpan" } }
                                        </button>
                                    }
                                } else {
                                    html! { <p class="text-xs text-muted-foreground">{"Hanya Super Admin yang dapat mengubah pengaturan."}</p> }
                                }
                            }
                            <Toast message={(*message).clone()} />
                            <Toast message={(*error).clone()} error={true} />
                        </div>
                    </div>

                    <div class="bg-card rounded-lg p-6 border border-border">
                        <h2 class="text-xl font-bold text-foreground mb-6">{"Akun Saya"}</h2>
                        <div class="space-y-3 text-sm">
                            <div class="flex items-center justify-between pb-3 border-b border-border">
                                <span class="text-muted-foreground">{"Username"}</span>
                                <span class="font-semibold text-foreground">{ current.user.username.clone() }</span>
                            </div>
                            <div class="flex items-center justify-between pb-3 border-b border-border">
                                <span class="text-muted-foreground">{"Peran"}</span>
                                <span class="font-semibold text-foreground">{ current.user.role.label() }</span>
                            </div>
                            <div class="flex items-center justify-between">
                                <span class="text-muted-foreground">{"Divisi"}</span>
                                <span class="font-semibold text-foreground">
                                    { current.user.division.as_ref().map(|d| d.name.clone()).unwrap_or_else(|| "Semua divisi".to_string()) }
                                </span>
                            </div>
                        </div>
                    </div>
                </div>
            }
        ) }
    }
}
