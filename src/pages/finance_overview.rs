use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::aggregate::{entries_by_division, finance_summary};
use crate::api;
use crate::app::page_shell;
use crate::components::icons::icon_wallet;
use crate::components::{flash, StatCard, Toast};
use crate::format::{format_rupiah, today_string};
use crate::models::{Account, Division, DivisionKind, EntriHarian};
use crate::session::Session;

/// Consolidated finance view: one date, every division's cash totals.
#[function_component(FinanceOverviewPage)]
pub fn finance_overview_page() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(current) = session_ctx else {
        return html! {};
    };
    if !current.is_super_admin() && current.division_kind() != DivisionKind::Keuangan {
        return page_shell(
            "Keuangan Konsolidasi",
            html! {},
            html! {
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <p class="text-sm text-muted-foreground">{"Halaman ini khusus divisi Keuangan dan Super Admin."}</p>
                </div>
            },
        );
    }

    let divisions = use_state(Vec::<Division>::new);
    let accounts = use_state(Vec::<Account>::new);
    let entries = use_state(Vec::<EntriHarian>::new);
    let tanggal = use_state(today_string);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let divisions = divisions.clone();
        let accounts = accounts.clone();
        let entries = entries.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |date: &String| {
                let date = date.clone();
                loading.set(true);
                spawn_local(async move {
                    match api::fetch_divisions().await {
                        Ok(list) => divisions.set(list),
                        Err(err) => flash(&error, &err.to_string()),
                    }
                    match api::fetch_accounts().await {
                        Ok(list) => accounts.set(list),
                        Err(err) => flash(&error, &err.to_string()),
                    }
                    match api::fetch_entries_by_date(&date).await {
                        Ok(list) => entries.set(list),
                        Err(err) => flash(&error, &err.to_string()),
                    }
                    loading.set(false);
                });
                || ()
            },
            (*tanggal).clone(),
        );
    }

    let grand = finance_summary(&entries);
    let grouped = entries_by_division(&entries, &accounts);

    html! {
        { page_shell(
            "Keuangan Konsolidasi",
            html! {
                <input type="date" value={(*tanggal).clone()} oninput={{
                    let tanggal = tanggal.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        tanggal.set(input.value());
                    })
                }} class="px-4 py-2 bg-input border border-input rounded-lg text-sm text-foreground" />
            },
            html! {
                <>
                    <Toast message={(*error).clone()} error={true} />

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <StatCard title="Total Penerimaan" value={format_rupiah(grand.penerimaan)} icon={Some(icon_wallet())} />
                        <StatCard title="Total Pengeluaran" value={format_rupiah(grand.pengeluaran)} icon={Some(icon_wallet())} />
                        <StatCard
                            title="Saldo Konsolidasi"
                            value={format_rupiah(grand.saldo)}
                            hint={Some(format!("{} entri tercatat", entries.len()))}
                        />
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{"Rekap per Divisi"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Divisi"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Jumlah Entri"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Penerimaan"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Pengeluaran"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Saldo"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Memuat data..."}</td></tr> }
                                    } else if divisions.is_empty() {
                                        html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Tidak ada data divisi."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                            { for divisions.iter().map(|division| {
                                                let empty = Vec::new();
                                                let rows = grouped.get(&division.id).unwrap_or(&empty);
                                                let summary = finance_summary(rows);
                                                let saldo_class = if summary.saldo < 0.0 {
                                                    "px-8 py-4 text-right font-semibold text-red-600"
                                                } else {
                                                    "px-8 py-4 text-right font-semibold text-foreground"
                                                };
                                                html! {
                                                    <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                        <td class="px-8 py-4 text-foreground">{ division.name.clone() }</td>
                                                        <td class="px-8 py-4 text-right text-muted-foreground">{ rows.len() }</td>
                                                        <td class="px-8 py-4 text-right font-semibold text-foreground">{ format_rupiah(summary.penerimaan) }</td>
                                                        <td class="px-8 py-4 text-right font-semibold text-foreground">{ format_rupiah(summary.pengeluaran) }</td>
                                                        <td class={saldo_class}>{ format_rupiah(summary.saldo) }</td>
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
