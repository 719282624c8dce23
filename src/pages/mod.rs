//! Page components, one per route.

mod account_rack;
mod chart_of_accounts;
mod finance_overview;
mod history;
mod hrd_journal;
mod journal;
mod login;
mod production;
mod report_dashboard;
mod settings;
mod users;

pub use account_rack::AccountRackPage;
pub use chart_of_accounts::ChartOfAccountsPage;
pub use finance_overview::FinanceOverviewPage;
pub use history::HistoryPage;
pub use hrd_journal::HrdJournalPage;
pub use journal::JournalPage;
pub use login::LoginPage;
pub use production::ProductionPage;
pub use report_dashboard::ReportDashboardPage;
pub use settings::SettingsPage;
pub use users::UsersPage;
