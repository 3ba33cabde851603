use futures::executor::block_on;
use reactor_game::{EndpointConfig, GameKind};
use reactor_web::app::AppShell;
use reactor_web::pages::console::{self, ConsolePage};
use reactor_web::pages::reactor::{self, ReactorPage};
use reactor_web::pages::warp::{self, WarpPage};
use yew::prelude::*;
use yew::LocalServerRenderer;
use yew_router::history::{AnyHistory, History, MemoryHistory};
use yew_router::Router;

#[derive(Properties, PartialEq)]
struct ShellAtProps {
    path: AttrValue,
}

#[function_component(ShellAt)]
fn shell_at(p: &ShellAtProps) -> Html {
    let history = MemoryHistory::new();
    history.push(p.path.as_str());
    let history = AnyHistory::from(history);
    html! {
        <Router {history}>
            <AppShell />
        </Router>
    }
}

fn render_at(path: &'static str) -> String {
    reactor_web::i18n::set_lang("en");
    block_on(
        LocalServerRenderer::<ShellAt>::with_props(ShellAtProps {
            path: AttrValue::from(path),
        })
        .render(),
    )
}

#[test]
fn home_lists_both_games() {
    let html = render_at("/");
    assert!(html.contains("Pick a console"));
    assert!(html.contains("Memorize the realignment sequence"));
    assert!(html.contains("Keep six power nodes"));
    assert!(html.contains("id=\"main\""));
}

#[test]
fn unknown_paths_fall_through_to_not_found() {
    let html = render_at("/engineering/bay-7");
    assert!(html.contains("Console offline"));
}

#[test]
fn routes_pick_their_page() {
    assert!(render_at("/reactor").contains("STABILIZE REACTOR"));
    assert!(render_at("/warp").contains("INITIALIZE WARP CORE"));
    assert!(render_at("/console").contains("Hellorld from EE!"));
}

#[test]
fn idle_reactor_shows_setup_and_start() {
    reactor_web::i18n::set_lang("en");
    let props = reactor::Props {
        config: EndpointConfig::for_game(GameKind::ReactorRealignment),
        on_config_change: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ReactorPage>::with_props(props).render());
    assert!(html.contains("REACTOR CRITICAL"));
    assert!(html.contains("Audacity"));
    assert!(html.contains("STABILIZE REACTOR"));
    assert!(!html.contains("symbol-pad"));
}

#[test]
fn idle_warp_hides_the_node_grid() {
    reactor_web::i18n::set_lang("en");
    let props = warp::Props {
        config: EndpointConfig::for_game(GameKind::WarpCoreBalancing),
        on_config_change: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<WarpPage>::with_props(props).render());
    assert!(html.contains("PL197"));
    assert!(!html.contains("node-grid"));
}

#[test]
fn console_starts_without_a_response() {
    reactor_web::i18n::set_lang("en");
    let props = console::Props {
        config: EndpointConfig::for_game(GameKind::ReactorRealignment),
        on_config_change: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ConsolePage>::with_props(props).render());
    assert!(html.contains("Hello World!"));
    assert!(!html.contains("probe-response"));
}
