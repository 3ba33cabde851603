//! Warp Core Balancing: keep six drifting power nodes near 50%.
use crate::components::button::Button;
use crate::components::connection_form::ConnectionForm;
use crate::components::hud::{Hud, HudStat};
use crate::components::node_grid::NodeGrid;
use crate::components::notice_banner::NoticeBanner;
use crate::driver::Driver;
use crate::i18n::{fmt_pct, fmt_seconds, t};
use reactor_game::constants::{COUNTDOWN_PERIOD_MS, WARP_TIME_CRITICAL_SECS};
use reactor_game::numbers::display_pct;
use reactor_game::{Countdown, EndpointConfig, GameKind, PowerGame, PowerGameState};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub config: EndpointConfig,
    pub on_config_change: Callback<EndpointConfig>,
}

fn hud_stats(state: &PowerGameState, clock: Countdown) -> Vec<HudStat> {
    vec![
        HudStat {
            label: t("hud.time"),
            value: fmt_seconds(clock.remaining()),
            critical: clock.is_critical(WARP_TIME_CRITICAL_SECS),
            slug: "time",
        },
        HudStat {
            label: t("hud.stability"),
            value: fmt_pct(display_pct(state.core_stability())),
            critical: state.core_stability() < 50.0,
            slug: "stability",
        },
        HudStat {
            label: t("hud.coolant"),
            value: fmt_pct(display_pct(state.coolant())),
            critical: state.coolant_low(),
            slug: "coolant",
        },
    ]
}

#[function_component(WarpPage)]
pub fn warp_page(p: &Props) -> Html {
    let game = use_mut_ref(|| PowerGame::new(crate::dom::entropy_seed()));
    let driver = Driver::new(game, use_force_update());
    let starting = use_state(|| false);

    let (active, tick_ms) = driver.read(|game| (game.is_active(), game.config().tick_ms));
    {
        let driver = driver.clone();
        use_effect_with((active, p.config.clone()), move |(active, config)| {
            let timers = active.then(|| {
                (
                    driver.every(tick_ms, config.clone(), PowerGame::tick),
                    driver.every(COUNTDOWN_PERIOD_MS, config.clone(), PowerGame::tick_second),
                )
            });
            move || drop(timers)
        });
    }

    let on_start = {
        let driver = driver.clone();
        let config = p.config.clone();
        let starting = starting.clone();
        Callback::from(move |_: MouseEvent| {
            if *starting {
                return;
            }
            starting.set(true);
            let starting = starting.clone();
            driver.launch(
                config.clone(),
                GameKind::WarpCoreBalancing,
                PowerGame::start_with,
                move || starting.set(false),
            );
        })
    };
    let on_select = {
        let driver = driver.clone();
        Callback::from(move |node: usize| {
            let outcome = driver.update(|game| game.select_node(node));
            log::debug!("node {node}: {outcome:?}");
        })
    };
    let on_cool = {
        let driver = driver.clone();
        Callback::from(move |node: usize| {
            if !driver.update(|game| game.cooldown(node)) {
                log::debug!("cooldown on node {node} refused");
            }
        })
    };

    let (state, clock, selected, can_cool, notice) = driver.read(|game| {
        (
            game.state().clone(),
            game.countdown(),
            game.selected(),
            game.can_cool(),
            game.notice().cloned(),
        )
    });
    let start_label = if *starting { t("ui.starting") } else { t("ui.start_warp") };

    html! {
        <section class="panel game warp" aria-labelledby="game-title">
            <h1 id="game-title" class="game-title">
                <span aria-hidden="true">{ "⚠️" }</span>
                { t(GameKind::WarpCoreBalancing.title_key()) }
                <span aria-hidden="true">{ "⚠️" }</span>
            </h1>
            if state.active() {
                <Hud stats={hud_stats(&state, clock)} />
                <div class="instructions">
                    <p>{ t("warp.objective") }</p>
                    <p>{ t("warp.controls") }</p>
                </div>
            } else {
                <ConnectionForm config={p.config.clone()} on_change={p.on_config_change.clone()} />
            }
            <NoticeBanner {notice} />
            if state.active() {
                <NodeGrid nodes={state.nodes().to_vec()} {selected} {can_cool} {on_select} {on_cool} />
            } else {
                <Button label={start_label} onclick={on_start} disabled={*starting} class={classes!("start")} />
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_game::PowerConfig;

    #[test]
    fn fresh_core_reads_full() {
        crate::i18n::set_lang("en");
        let mut game = PowerGame::with_config(7, PowerConfig::calm());
        game.start_with_nodes(&[5_000; 6]);
        let stats = hud_stats(game.state(), game.countdown());
        let values: Vec<&str> = stats.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["60s", "100%", "100%"]);
        assert!(stats.iter().all(|s| !s.critical));
    }

    #[test]
    fn clock_turns_critical_near_the_end() {
        crate::i18n::set_lang("en");
        let mut game = PowerGame::with_config(7, PowerConfig::calm());
        game.start_with_nodes(&[4_000; 6]);
        for _ in 0..41 {
            let _ = game.tick_second();
        }
        let stats = hud_stats(game.state(), game.countdown());
        assert_eq!(stats[0].value, "19s");
        assert!(stats[0].critical);
    }
}
