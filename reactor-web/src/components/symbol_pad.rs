use crate::i18n::t;
use reactor_game::Symbol;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub highlighted: Option<Symbol>,
    /// Playback in progress: buttons are dimmed and inert.
    #[prop_or_default]
    pub locked: bool,
    pub on_press: Callback<Symbol>,
}

#[function_component(SymbolPad)]
pub fn symbol_pad(p: &Props) -> Html {
    let button = |symbol: Symbol| {
        let lit = p.highlighted == Some(symbol);
        let onclick = {
            let cb = p.on_press.clone();
            Callback::from(move |_| cb.emit(symbol))
        };
        html! {
            <button
                type="button"
                key={symbol.key()}
                class={classes!(
                    "symbol",
                    format!("symbol-{}", symbol.key()),
                    lit.then_some("lit"),
                    (p.locked && !lit).then_some("dimmed")
                )}
                disabled={p.locked}
                aria-pressed={lit.to_string()}
                {onclick}
            >
                { t(symbol.label_key()) }
            </button>
        }
    };
    html! {
        <div class="symbol-pad" role="group">
            { for Symbol::ALL.into_iter().map(button) }
        </div>
    }
}
