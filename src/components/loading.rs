use yew::prelude::*;

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="py-10 text-center text-sm text-muted-foreground">{"Memuat data..."}</div>
    }
}
