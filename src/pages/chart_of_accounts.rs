use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::app::page_shell;
use crate::components::{Loading, Toast};
use crate::models::{Account, Division, ValueType};

/// Read-only overview of every division's account rack.
#[function_component(ChartOfAccountsPage)]
pub fn chart_of_accounts_page() -> Html {
    let accounts = use_state(Vec::<Account>::new);
    let divisions = use_state(Vec::<Division>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);

    {
        let accounts = accounts.clone();
        let divisions = divisions.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::fetch_divisions().await {
                        Ok(list) => divisions.set(list),
                        Err(err) => error.set(Some(err.to_string())),
                    }
                    match api::fetch_accounts().await {
                        Ok(list) => accounts.set(list),
                        Err(err) => error.set(Some(err.to_string())),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let needle = search.to_lowercase();
    let visible: Vec<&Account> = accounts
        .iter()
        .filter(|a| {
            needle.is_empty()
                || a.account_code.to_lowercase().contains(&needle)
                || a.account_name.to_lowercase().contains(&needle)
        })
        .collect();

    html! {
        { page_shell(
            "Daftar Akun",
            html! {
                <input
                    type="text"
                    placeholder="Cari kode atau nama akun..."
                    value={(*search).clone()}
                    oninput={on_search}
                    class="px-4 py-2 bg-input border border-input rounded-lg text-sm text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                />
            },
            html! {
                <>
                    <Toast message={(*error).clone()} error={true} />
                    {
                        if *loading {
                            html! { <Loading /> }
                        } else {
                            html! {
                                <>
                                { for divisions.iter().map(|division| {
                                    let rows: Vec<&&Account> = visible
                                        .iter()
                                        .filter(|a| a.division.id == division.id)
                                        .collect();
                                    if rows.is_empty() {
                                        return html! {};
                                    }
                                    html! {
                                        <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                                            <div class="p-5 border-b border-border flex items-center justify-between">
                                                <h3 class="font-bold text-lg text-foreground">{ division.name.clone() }</h3>
                                                <span class="text-xs text-muted-foreground">{ format!("{} akun", rows.len()) }</span>
                                            </div>
                                            <div class="overflow-x-auto">
                                                <table class="w-full text-left border-collapse">
                                                    <thead>
                                                        <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                                            <th class="px-8 py-4 font-bold">{"Kode"}</th>
                                                            <th class="px-8 py-4 font-bold">{"Nama Akun"}</th>
                                                            <th class="px-8 py-4 font-bold">{"Jenis Nilai"}</th>
                                                            <th class="px-8 py-4 font-bold">{"Status"}</th>
                                                        </tr>
                                                    </thead>
                                                    <tbody class="divide-y divide-border">
                                                        { for rows.iter().map(|account| {
                                                            let type_class = match account.value_type {
                                                                ValueType::Nominal => "bg-sky-100 text-sky-700 px-3 py-1 rounded-full text-[10px] font-bold",
                                                                ValueType::Kuantitas => "bg-amber-100 text-amber-700 px-3 py-1 rounded-full text-[10px] font-bold",
                                                            };
                                                            let status_class = if account.status == "active" {
                                                                "bg-green-100 text-green-700 px-3 py-1 rounded-full text-[10px] font-bold"
                                                            } else {
                                                                "bg-slate-100 text-slate-500 px-3 py-1 rounded-full text-[10px] font-bold"
                                                            };
                                                            html! {
                                                                <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                                    <td class="px-8 py-4 font-semibold text-foreground">{ account.account_code.clone() }</td>
                                                                    <td class="px-8 py-4 text-foreground">{ account.account_name.clone() }</td>
                                                                    <td class="px-8 py-4"><span class={type_class}>{ account.value_type.label() }</span></td>
                                                                    <td class="px-8 py-4"><span class={status_class}>{ if account.status == "active" { "Aktif" } else { "Nonaktif" } }</span></td>
                                                                </tr>
                                                            }
                                                        }) }
                                                    </tbody>
                                                </table>
                                            </div>
                                        </div>
                                    }
                                }) }
                                </>
                            }
                        }
                    }
                </>
            }
        ) }
    }
}
