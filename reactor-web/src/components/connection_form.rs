use crate::dom::input_value;
use crate::i18n::t;
use reactor_game::EndpointConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub config: EndpointConfig,
    pub on_change: Callback<EndpointConfig>,
}

/// Server URL and callsign inputs shown while no game is running.
#[function_component(ConnectionForm)]
pub fn connection_form(p: &Props) -> Html {
    let on_server = {
        let config = p.config.clone();
        let cb = p.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                cb.emit(EndpointConfig {
                    base_url: value,
                    ..config.clone()
                });
            }
        })
    };
    let on_callsign = {
        let config = p.config.clone();
        let cb = p.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                cb.emit(EndpointConfig {
                    callsign: value,
                    ..config.clone()
                });
            }
        })
    };
    html! {
        <div class="config">
            <label for="ee-server">{ t("ui.server") }</label>
            <input id="ee-server" type="text" value={p.config.base_url.clone()} oninput={on_server} />
            <label for="ee-callsign">{ t("ui.callsign") }</label>
            <input id="ee-callsign" type="text" value={p.config.callsign.clone()} oninput={on_callsign} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use reactor_game::GameKind;
    use yew::LocalServerRenderer;

    #[test]
    fn shows_current_settings() {
        crate::i18n::set_lang("en");
        let props = Props {
            config: EndpointConfig::for_game(GameKind::WarpCoreBalancing),
            on_change: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ConnectionForm>::with_props(props).render());
        assert!(html.contains("Player Ship Callsign:"));
        assert!(html.contains("PL197"));
        assert!(html.contains("/api"));
    }
}
