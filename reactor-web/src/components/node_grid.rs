use crate::i18n::{fmt_pct, t, tr};
use reactor_game::PowerNode;
use reactor_game::numbers::display_pct;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub nodes: Vec<PowerNode>,
    #[prop_or_default]
    pub selected: Option<usize>,
    #[prop_or_default]
    pub can_cool: bool,
    pub on_select: Callback<usize>,
    pub on_cool: Callback<usize>,
}

fn node_label(node: &PowerNode) -> String {
    let id = (node.id + 1).to_string();
    let mut args = BTreeMap::new();
    args.insert("id", id.as_str());
    tr("warp.node", Some(&args))
}

/// The six reactor nodes with power bars and coolant buttons.
#[function_component(NodeGrid)]
pub fn node_grid(p: &Props) -> Html {
    let card = |node: &PowerNode| {
        let id = node.id;
        let pct = display_pct(node.power());
        let selected = p.selected == Some(id);
        let onclick = {
            let cb = p.on_select.clone();
            Callback::from(move |_| cb.emit(id))
        };
        let on_cool = {
            let cb = p.on_cool.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                cb.emit(id);
            })
        };
        html! {
            <div
                key={id}
                class={classes!("node", node.level().css_class(), selected.then_some("selected"))}
                role="button"
                aria-pressed={selected.to_string()}
                {onclick}
            >
                <div class="node-label">{ node_label(node) }</div>
                <div class="bar-wrap">
                    <div class="bar-fill" style={format!("height: {pct}%")}></div>
                </div>
                <div class="node-power">{ fmt_pct(pct) }</div>
                <button type="button" class="cool" disabled={!p.can_cool} onclick={on_cool}>
                    { t("warp.cool") }
                </button>
            </div>
        }
    };
    html! {
        <div class="node-grid">
            { for p.nodes.iter().map(card) }
        </div>
    }
}
