use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub open: bool,
    pub title: String,
    pub message: String,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    if !props.open {
        return html! {};
    }
    let on_confirm = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40">
            <div class="w-full max-w-sm bg-white rounded-2xl shadow-lg p-6">
                <h3 class="text-lg font-bold text-foreground">{ &props.title }</h3>
                <p class="mt-2 text-sm text-muted-foreground">{ &props.message }</p>
                <div class="mt-6 flex justify-end gap-3">
                    <button onclick={on_cancel} class="px-4 py-2 rounded-xl text-sm font-bold bg-secondary text-secondary-foreground">
                        {"Batal"}
                    </button>
                    <button onclick={on_confirm} class="px-4 py-2 rounded-xl text-sm font-bold bg-red-600 text-white">
                        {"Hapus"}
                    </button>
                </div>
            </div>
        </div>
    }
}
