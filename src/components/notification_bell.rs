use std::collections::HashSet;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::icons::icon_bell;
use crate::models::Notification;

const POLL_MS: u32 = 30_000;
const POPUP_MS: u32 = 5_000;

/// Header bell: polls the notifications endpoint every 30 seconds and
/// keeps the ids it has already surfaced so only genuinely new unread
/// items trigger the transient popup.
#[function_component(NotificationBell)]
pub fn notification_bell() -> Html {
    let notifications = use_state(Vec::<Notification>::new);
    let show_dropdown = use_state(|| false);
    let popup = use_state(|| None::<String>);
    let seen_unread = use_mut_ref(HashSet::<i64>::new);
    let primed = use_mut_ref(|| false);

    let refresh = {
        let notifications = notifications.clone();
        let popup = popup.clone();
        let seen_unread = seen_unread.clone();
        let primed = primed.clone();
        Callback::from(move |_: ()| {
            let notifications = notifications.clone();
            let popup = popup.clone();
            let seen_unread = seen_unread.clone();
            let primed = primed.clone();
            spawn_local(async move {
                match api::fetch_notifications().await {
                    Ok(list) => {
                        let mut newest = None;
                        {
                            let mut seen = seen_unread.borrow_mut();
                            for item in list.iter().filter(|n| !n.is_read) {
                                if seen.insert(item.id) {
                                    newest = Some(item.message.clone());
                                }
                            }
                        }
                        // First fetch only seeds the seen set.
                        if *primed.borrow() {
                            if let Some(message) = newest {
                                popup.set(Some(message));
                                let popup = popup.clone();
                                Timeout::new(POPUP_MS, move || popup.set(None)).forget();
                            }
                        } else {
                            *primed.borrow_mut() = true;
                        }
                        notifications.set(list);
                    }
                    Err(err) => {
                        web_sys::console::error_1(&err.to_string().into());
                    }
                }
            });
        })
    };

    {
        use_effect_with_deps(
            move |_| {
                refresh.emit(());
                let interval = Interval::new(POLL_MS, move || refresh.emit(()));
                move || drop(interval)
            },
            (),
        );
    }

    let toggle_dropdown = {
        let show_dropdown = show_dropdown.clone();
        Callback::from(move |_| show_dropdown.set(!*show_dropdown))
    };

    let mark_read = {
        let notifications = notifications.clone();
        Callback::from(move |id: i64| {
            let notifications = notifications.clone();
            spawn_local(async move {
                // Fire and forget; the local list updates regardless.
                let _ = api::mark_notification_read(id).await;
                let next = (*notifications)
                    .iter()
                    .map(|n| {
                        let mut n = n.clone();
                        if n.id == id {
                            n.is_read = true;
                        }
                        n
                    })
                    .collect();
                notifications.set(next);
            });
        })
    };

    let mark_all_read = {
        let notifications = notifications.clone();
        Callback::from(move |_| {
            let notifications = notifications.clone();
            let unread: Vec<i64> = (*notifications)
                .iter()
                .filter(|n| !n.is_read)
                .map(|n| n.id)
                .collect();
            spawn_local(async move {
                // No batch endpoint; one request per item.
                for id in &unread {
                    let _ = api::mark_notification_read(*id).await;
                }
                let next = (*notifications)
                    .iter()
                    .map(|n| {
                        let mut n = n.clone();
                        n.is_read = true;
                        n
                    })
                    .collect();
                notifications.set(next);
            });
        })
    };

    let unread_count = notifications.iter().filter(|n| !n.is_read).count();

    html! {
        <div class="relative">
            <button class="p-2 hover:bg-secondary rounded-full transition-colors relative" aria-label="Notifikasi" onclick={toggle_dropdown}>
                { icon_bell() }
                {
                    if unread_count > 0 {
                        html! { <span class="absolute top-1 right-1 w-2 h-2 bg-red-500 rounded-full"></span> }
                    } else {
                        html! {}
                    }
                }
            </button>

            {
                if let Some(message) = &*popup {
                    html! {
                        <div class="fixed top-20 right-6 w-72 bg-white border border-border rounded-xl shadow-lg p-4 z-50 animate-pulse">
                            <p class="text-sm font-bold text-[#173E63]">{"Notifikasi baru"}</p>
                            <p class="text-xs text-slate-500 mt-1">{ message.clone() }</p>
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            {
                if *show_dropdown {
                    html! {
                        <div class="absolute right-0 top-12 w-80 bg-white border border-border rounded-xl shadow-lg overflow-hidden z-50">
                            <div class="px-4 py-3 border-b border-border flex items-center justify-between">
                                <h4 class="text-sm font-bold text-[#173E63]">{"Notifikasi"}</h4>
                                {
                                    if unread_count > 0 {
                                        html! {
                                            <button class="text-[10px] font-bold text-sky-600 uppercase" onclick={mark_all_read}>
                                                {"Tandai semua"}
                                            </button>
                                        }
                                    } else {
                                        html! {}
                                    }
                                }
                            </div>
                            <div class="divide-y divide-border max-h-80 overflow-y-auto">
                                {
                                    if notifications.is_empty() {
                                        html! { <p class="px-4 py-6 text-center text-xs text-slate-400">{"Belum ada notifikasi."}</p> }
                                    } else {
                                        html! {
                                            <>
                                            { for notifications.iter().map(|item| {
                                                let mark_read = mark_read.clone();
                                                let id = item.id;
                                                let row_class = if item.is_read {
                                                    "px-4 py-3 hover:bg-slate-50"
                                                } else {
                                                    "px-4 py-3 hover:bg-slate-50 bg-sky-50/50"
                                                };
                                                html! {
                                                    <div class={row_class}>
                                                        <div class="flex items-center justify-between gap-2">
                                                            <p class="text-xs text-slate-600 flex-1">{ &item.message }</p>
                                                            {
                                                                if !item.is_read {
                                                                    html! {
                                                                        <button class="text-[9px] font-bold text-sky-600 uppercase shrink-0" onclick={Callback::from(move |_| mark_read.emit(id))}>
                                                                            {"Tandai"}
                                                                        </button>
                                                                    }
                                                                } else {
                                                                    html! {}
                                                                }
                                                            }
                                                        </div>
                                                        {
                                                            if let Some(created) = &item.created_at {
                                                                html! { <span class="text-[10px] text-slate-400">{ created.clone() }</span> }
                                                            } else {
                                                                html! {}
                                                            }
                                                        }
                                                    </div>
                                                }
                                            }) }
                                            </>
                                        }
                                    }
                                }
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
