use crate::app::state::AppState;
use crate::pages::console::ConsolePage;
use crate::pages::home::HomePage;
use crate::pages::not_found::NotFound;
use crate::pages::reactor::ReactorPage;
use crate::pages::warp::WarpPage;
use crate::router::Route;
use reactor_game::EndpointConfig;
use yew::prelude::*;

fn config_setter(handle: &UseStateHandle<EndpointConfig>) -> Callback<EndpointConfig> {
    let handle = handle.clone();
    Callback::from(move |config: EndpointConfig| handle.set(config))
}

pub fn render_route(state: &AppState, route: &Route) -> Html {
    let handle = state.config_for(route.game());
    let config = (**handle).clone();
    let on_config_change = config_setter(handle);
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Reactor => html! { <ReactorPage {config} {on_config_change} /> },
        Route::Warp => html! { <WarpPage {config} {on_config_change} /> },
        Route::Console => html! { <ConsolePage {config} {on_config_change} /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
