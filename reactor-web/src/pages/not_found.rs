use crate::i18n::t;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

/// Shown for any path the router does not recognise.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section class="panel not-found" aria-live="assertive">
            <h1>{ t("not_found.title") }</h1>
            <p>{ t("not_found.message") }</p>
            <Link<Route> to={Route::Home} classes="ops-button">{ t("not_found.back") }</Link<Route>>
        </section>
    }
}
