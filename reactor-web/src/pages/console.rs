//! Connectivity check: spawns a test planet and shows the raw answer.
use crate::components::button::Button;
use crate::components::connection_form::ConnectionForm;
use crate::endpoint::WebEndpoint;
use crate::i18n::{t, tr};
use reactor_game::{EndpointConfig, ExecResponse, ShipLink};
use std::collections::BTreeMap;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub config: EndpointConfig,
    pub on_config_change: Callback<EndpointConfig>,
}

/// Outcome of the last probe as shown on the page.
#[derive(Clone, Debug, PartialEq)]
pub enum ProbeView {
    Idle,
    Sending,
    Answered(String),
    Failed(String),
}

impl ProbeView {
    #[must_use]
    pub fn from_response(response: &ExecResponse) -> Self {
        match serde_json::to_string_pretty(response) {
            Ok(text) => Self::Answered(text),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

fn render_probe(view: &ProbeView) -> Html {
    match view {
        ProbeView::Idle => Html::default(),
        ProbeView::Sending => html! { <p class="loading">{ t("console.loading") }</p> },
        ProbeView::Answered(text) => html! {
            <figure class="probe-response">
                <figcaption>{ t("console.response") }</figcaption>
                <pre>{ text.clone() }</pre>
            </figure>
        },
        ProbeView::Failed(error) => {
            let mut args = BTreeMap::new();
            args.insert("error", error.as_str());
            html! { <p class="notice notice-failure" role="alert">{ tr("console.error", Some(&args)) }</p> }
        }
    }
}

#[function_component(ConsolePage)]
pub fn console_page(p: &Props) -> Html {
    let view = use_state(|| ProbeView::Idle);

    let on_probe = {
        let view = view.clone();
        let config = p.config.clone();
        Callback::from(move |_: MouseEvent| {
            if *view == ProbeView::Sending {
                return;
            }
            view.set(ProbeView::Sending);
            let view = view.clone();
            let config = config.clone();
            spawn_local(async move {
                let link = ShipLink::new(WebEndpoint::new(&config), config);
                let next = match link.probe().await {
                    Ok(response) => ProbeView::from_response(&response),
                    Err(err) => ProbeView::Failed(err.to_string()),
                };
                view.set(next);
            });
        })
    };

    html! {
        <section class="panel console" aria-labelledby="console-title">
            <h1 id="console-title">{ t("console.title") }</h1>
            <ConnectionForm config={p.config.clone()} on_change={p.on_config_change.clone()} />
            <Button
                label={t("console.button")}
                onclick={on_probe}
                disabled={*view == ProbeView::Sending}
            />
            { render_probe(&view) }
        </section>
    }
}
