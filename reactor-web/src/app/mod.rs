use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod state;
pub mod view;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppShell />
        </BrowserRouter>
    }
}

/// Header, routed main view and footer. Needs a surrounding router.
#[function_component(AppShell)]
pub fn app_shell() -> Html {
    let app_state = state::use_app_state();

    let on_toggle_hc = {
        let high_contrast = app_state.high_contrast.clone();
        Callback::from(move |enabled: bool| {
            crate::a11y::set_high_contrast(enabled);
            high_contrast.set(enabled);
        })
    };
    let render = {
        let app_state = app_state.clone();
        Callback::from(move |route: Route| view::render_route(&app_state, &route))
    };

    html! {
        <>
            <style>{ crate::a11y::visible_focus_css() }</style>
            <Header high_contrast={*app_state.high_contrast} {on_toggle_hc} />
            <main id="main" role="main">
                <Switch<Route> {render} />
            </main>
            <Footer />
        </>
    }
}
