use crate::i18n::t;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub high_contrast: bool,
    pub on_toggle_hc: Callback<bool>,
}

const NAV: [Route; 4] = [Route::Home, Route::Reactor, Route::Warp, Route::Console];

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let toggle_hc = {
        let cb = p.on_toggle_hc.clone();
        let next = !p.high_contrast;
        Callback::from(move |_| cb.emit(next))
    };
    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="header-content">
                <span class="header-title">{ t("app.title") }</span>
                <nav aria-label={t("nav.primary")} class="header-nav">
                    { for NAV.iter().map(|route| html! {
                        <Link<Route> to={route.clone()} classes="nav-link">{ t(route.nav_key()) }</Link<Route>>
                    }) }
                </nav>
                <label class="hc-toggle">
                    <input id="hc-toggle" type="checkbox" checked={p.high_contrast} onclick={toggle_hc} />
                    { t("ui.high_contrast") }
                </label>
            </div>
        </header>
    }
}
