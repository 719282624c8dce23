//! Application shell: routes, session gate, and the layout chrome.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::components::icons::{
    icon_bar_chart, icon_book, icon_clock, icon_factory, icon_layout_grid, icon_list,
    icon_log_out, icon_settings, icon_users, icon_wallet,
};
use crate::components::NotificationBell;
use crate::models::{AppSettings, DivisionKind};
use crate::pages::{
    AccountRackPage, ChartOfAccountsPage, FinanceOverviewPage, HistoryPage, HrdJournalPage,
    JournalPage, LoginPage, ProductionPage, ReportDashboardPage, SettingsPage, UsersPage,
};
use crate::session::{self, Session};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Beranda,
    #[at("/laporan")]
    Laporan,
    #[at("/rak-akun")]
    RakAkun,
    #[at("/jurnal")]
    Jurnal,
    #[at("/produksi")]
    Produksi,
    #[at("/hrd")]
    Hrd,
    #[at("/riwayat")]
    Riwayat,
    #[at("/akun")]
    DaftarAkun,
    #[at("/keuangan")]
    Keuangan,
    #[at("/pengguna")]
    Pengguna,
    #[at("/pengaturan")]
    Pengaturan,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Beranda | Route::Laporan => html! { <ReportDashboardPage /> },
        Route::RakAkun => html! { <AccountRackPage /> },
        Route::Jurnal => html! { <JournalPage /> },
        Route::Produksi => html! { <ProductionPage /> },
        Route::Hrd => html! { <HrdJournalPage /> },
        Route::Riwayat => html! { <HistoryPage /> },
        Route::DaftarAkun => html! { <ChartOfAccountsPage /> },
        Route::Keuangan => html! { <FinanceOverviewPage /> },
        Route::Pengguna => html! { <UsersPage /> },
        Route::Pengaturan => html! { <SettingsPage /> },
        Route::NotFound => html! {
            <div class="p-6 max-w-7xl mx-auto">
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h1 class="text-xl font-bold text-foreground">{"Halaman tidak ditemukan"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Alamat yang Anda buka tidak dikenal."}</p>
                </div>
            </div>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let active_session = use_state(session::load_session);
    let settings = use_state(session::load_cached_settings);

    {
        let settings = settings.clone();
        let logged_in = active_session.is_some();
        use_effect_with_deps(
            move |_| {
                if logged_in {
                    spawn_local(async move {
                        if let Ok(remote) = api::fetch_settings().await {
                            session::cache_settings(&remote);
                            settings.set(remote);
                        }
                    });
                }
                || ()
            },
            logged_in,
        );
    }

    let on_login = {
        let active_session = active_session.clone();
        Callback::from(move |next: Session| active_session.set(Some(next)))
    };

    match &*active_session {
        None => html! { <LoginPage on_login={on_login} /> },
        Some(current) => html! {
            <ContextProvider<Session> context={current.clone()}>
                <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
                    <BrowserRouter>
                        <Layout>
                            <Switch<Route> render={switch} />
                        </Layout>
                    </BrowserRouter>
                </ContextProvider<UseStateHandle<AppSettings>>>
            </ContextProvider<Session>>
        },
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let session = use_context::<Session>();
    let division_label = session
        .as_ref()
        .map(|s| s.division_kind().label().to_string())
        .unwrap_or_default();
    let username = session
        .as_ref()
        .map(|s| s.user.username.clone())
        .unwrap_or_default();

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex-1">
                <span class="text-xs font-bold text-[#173E63] uppercase tracking-widest">{ division_label }</span>
            </div>
            <div class="relative flex items-center gap-4">
                <NotificationBell />
                <span class="text-sm font-bold text-[#173E63]">{ username }</span>
            </div>
        </header>
    }
}

struct NavItem {
    label: &'static str,
    route: Route,
    icon: fn() -> Html,
}

#[function_component(Sidebar)]
fn sidebar() -> Html {
    let session_ctx = use_context::<Session>();
    let Some(session) = session_ctx else {
        return html! {};
    };
    let current = use_route::<Route>();
    let kind = session.division_kind();
    let is_super = session.is_super_admin();

    let mut nav_items = vec![
        NavItem {
            label: "Beranda",
            route: Route::Beranda,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Jurnal Harian",
            route: Route::Jurnal,
            icon: icon_book,
        },
    ];
    if is_super || matches!(kind, DivisionKind::Produksi | DivisionKind::Gudang) {
        nav_items.push(NavItem {
            label: "Form Produksi",
            route: Route::Produksi,
            icon: icon_factory,
        });
    }
    if is_super || kind == DivisionKind::Hrd {
        nav_items.push(NavItem {
            label: "Jurnal HRD",
            route: Route::Hrd,
            icon: icon_clock,
        });
    }
    nav_items.push(NavItem {
        label: "Riwayat Transaksi",
        route: Route::Riwayat,
        icon: icon_list,
    });
    nav_items.push(NavItem {
        label: "Rak Akun",
        route: Route::RakAkun,
        icon: icon_wallet,
    });
    nav_items.push(NavItem {
        label: "Daftar Akun",
        route: Route::DaftarAkun,
        icon: icon_book,
    });
    nav_items.push(NavItem {
        label: "Laporan",
        route: Route::Laporan,
        icon: icon_bar_chart,
    });
    if is_super || kind == DivisionKind::Keuangan {
        nav_items.push(NavItem {
            label: "Keuangan",
            route: Route::Keuangan,
            icon: icon_wallet,
        });
    }
    if is_super {
        nav_items.push(NavItem {
            label: "Pengguna",
            route: Route::Pengguna,
            icon: icon_users,
        });
    }
    nav_items.push(NavItem {
        label: "Pengaturan",
        route: Route::Pengaturan,
        icon: icon_settings,
    });

    let on_logout = Callback::from(move |_| {
        session::logout_and_reload();
    });

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center text-white font-black">
                    {"BD"}
                </div>
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"BukuDivisi"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg overflow-y-auto">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let is_active = current.as_ref() == Some(&item.route);
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };

                        html! {
                            <Link<Route> to={item.route.clone()} classes={class_name}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </Link<Route>>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                        { icon_log_out() }
                        <span>{"Keluar"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Shared page frame: title bar with optional action buttons.
pub fn page_shell(title: &str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title.to_string() }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}
