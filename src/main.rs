mod aggregate;
mod api;
mod app;
mod components;
mod csv;
mod format;
mod models;
mod pages;
mod pdf;
mod session;

fn main() {
    yew::Renderer::<app::App>::new().render();
}
