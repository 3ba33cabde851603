use crate::i18n::t;
use crate::router::Route;
use reactor_game::GameKind;
use yew::prelude::*;
use yew_router::prelude::*;

fn game_card(game: GameKind) -> Html {
    let route = Route::from_game(game);
    html! {
        <li class="game-card">
            <Link<Route> to={route.clone()} classes="game-link">{ t(route.nav_key()) }</Link<Route>>
            <p>{ t(&format!("game.{}.blurb", game.key())) }</p>
        </li>
    }
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <section class="panel home" aria-labelledby="home-title">
            <h1 id="home-title">{ t("app.title") }</h1>
            <p class="tagline">{ t("app.tagline") }</p>
            <p>{ t("home.intro") }</p>
            <ul class="game-list">
                { for GameKind::ALL.into_iter().map(game_card) }
                <li class="game-card">
                    <Link<Route> to={Route::Console} classes="game-link">{ t(Route::Console.nav_key()) }</Link<Route>>
                </li>
            </ul>
        </section>
    }
}
