use futures::executor::block_on;
use reactor_game::{EndpointConfig, GameKind, Notice, PowerNode, Symbol};
use reactor_web::components::connection_form::{self, ConnectionForm};
use reactor_web::components::footer::Footer;
use reactor_web::components::header::{self, Header};
use reactor_web::components::node_grid::{self, NodeGrid};
use reactor_web::components::notice_banner::{self, NoticeBanner};
use reactor_web::components::symbol_pad::{self, SymbolPad};
use yew::prelude::*;
use yew::LocalServerRenderer;
use yew_router::history::{AnyHistory, MemoryHistory};
use yew_router::Router;

#[derive(Properties, PartialEq)]
struct RoutedHeaderProps {
    high_contrast: bool,
}

#[function_component(RoutedHeader)]
fn routed_header(p: &RoutedHeaderProps) -> Html {
    let history = AnyHistory::from(MemoryHistory::new());
    html! {
        <Router {history}>
            <Header high_contrast={p.high_contrast} on_toggle_hc={Callback::noop()} />
        </Router>
    }
}

#[test]
fn header_links_every_console() {
    reactor_web::i18n::set_lang("en");
    let html = block_on(
        LocalServerRenderer::<RoutedHeader>::with_props(RoutedHeaderProps {
            high_contrast: false,
        })
        .render(),
    );
    for href in ["\"/\"", "\"/reactor\"", "\"/warp\"", "\"/console\""] {
        assert!(html.contains(href), "missing link {href}");
    }
    assert!(html.contains("href=\"#main\""));
    assert!(html.contains("hc-toggle"));
}

#[test]
fn header_props_compare_by_value() {
    let a = header::Props {
        high_contrast: true,
        on_toggle_hc: Callback::noop(),
    };
    let b = a.clone();
    assert!(a == b);
}

#[test]
fn footer_renders_copy() {
    reactor_web::i18n::set_lang("en");
    let html = block_on(LocalServerRenderer::<Footer>::new().render());
    assert!(html.contains("<footer"));
    assert!(html.contains("Empty Epsilon"));
}

#[test]
fn notice_banner_carries_the_live_region() {
    reactor_web::i18n::set_lang("en");
    let props = notice_banner::Props {
        notice: Some(Notice::failure("notice.cannot_connect")),
    };
    let html = block_on(LocalServerRenderer::<NoticeBanner>::with_props(props).render());
    assert!(html.contains(reactor_web::a11y::STATUS_REGION_ID));
    assert!(html.contains("ERROR: Cannot connect to ship"));
}

#[test]
fn symbol_pad_dims_during_playback() {
    reactor_web::i18n::set_lang("en");
    let props = symbol_pad::Props {
        highlighted: Some(Symbol::Green),
        locked: true,
        on_press: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SymbolPad>::with_props(props).render());
    assert_eq!(html.matches("disabled").count(), 4);
    assert!(html.contains("GREEN"));
}

#[test]
fn node_grid_marks_the_armed_node() {
    reactor_web::i18n::set_lang("en");
    let props = node_grid::Props {
        nodes: (0..6).map(|id| PowerNode::new(id, 5_000)).collect(),
        selected: Some(2),
        can_cool: true,
        on_select: Callback::noop(),
        on_cool: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NodeGrid>::with_props(props).render());
    assert!(html.contains("NODE 6"));
    assert_eq!(html.matches("node-balanced").count(), 6);
}

#[test]
fn connection_form_defaults_per_game() {
    reactor_web::i18n::set_lang("en");
    let props = connection_form::Props {
        config: EndpointConfig::for_game(GameKind::ReactorRealignment),
        on_change: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ConnectionForm>::with_props(props).render());
    assert!(html.contains("Audacity"));
    assert!(html.contains("ee-server"));
}
