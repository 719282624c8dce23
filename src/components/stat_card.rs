use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: String,
    pub value: String,
    #[prop_or_default]
    pub hint: Option<String>,
    #[prop_or_default]
    pub icon: Option<Html>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest uppercase">{ &props.title }</p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ &props.value }</h3>
                {
                    if let Some(hint) = &props.hint {
                        html! { <p class="text-xs text-muted-foreground mt-2">{ hint.clone() }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
            {
                if let Some(icon) = &props.icon {
                    html! { <div class="p-3 bg-[#eef4f9] rounded-[10px]">{ icon.clone() }</div> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
