//! Reactor Realignment: watch the symbol sequence, then repeat it.
use crate::audio::use_alarm;
use crate::components::button::Button;
use crate::components::connection_form::ConnectionForm;
use crate::components::hud::{Hud, HudStat};
use crate::components::notice_banner::NoticeBanner;
use crate::components::symbol_pad::SymbolPad;
use crate::driver::Driver;
use crate::i18n::{fmt_seconds, t, tr};
use reactor_game::constants::{COUNTDOWN_PERIOD_MS, REACTOR_TIME_CRITICAL_SECS};
use reactor_game::{
    Countdown, EndpointConfig, GameKind, SequenceGame, SequenceGameState, SequencePhase, Symbol,
};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub config: EndpointConfig,
    pub on_config_change: Callback<EndpointConfig>,
}

fn hud_stats(state: &SequenceGameState, clock: Countdown) -> Vec<HudStat> {
    let round = state.round.to_string();
    let total = state.total_rounds.to_string();
    let mut args = BTreeMap::new();
    args.insert("round", round.as_str());
    args.insert("total", total.as_str());
    vec![
        HudStat {
            label: t("hud.time"),
            value: fmt_seconds(clock.remaining()),
            critical: clock.is_critical(REACTOR_TIME_CRITICAL_SECS),
            slug: "time",
        },
        HudStat {
            label: t("hud.round"),
            value: tr("hud.round_value", Some(&args)),
            critical: false,
            slug: "round",
        },
    ]
}

fn phase_hint(phase: SequencePhase) -> Option<String> {
    match phase {
        SequencePhase::Playback => Some(t("hud.watch")),
        SequencePhase::Input => Some(t("hud.repeat")),
        SequencePhase::Idle | SequencePhase::Success | SequencePhase::Failure => None,
    }
}

fn progress_line(state: &SequenceGameState) -> String {
    let length = state.sequence.len().to_string();
    let input = state.player_input.len().to_string();
    let mut args = BTreeMap::new();
    args.insert("length", length.as_str());
    args.insert("input", input.as_str());
    tr("hud.progress", Some(&args))
}

#[function_component(ReactorPage)]
pub fn reactor_page(p: &Props) -> Html {
    let game = use_mut_ref(|| SequenceGame::new(crate::dom::entropy_seed()));
    let driver = Driver::new(game, use_force_update());
    let starting = use_state(|| false);
    use_alarm(AttrValue::from(crate::paths::alarm_url()));

    let active = driver.read(SequenceGame::is_active);
    {
        let driver = driver.clone();
        use_effect_with((active, p.config.clone()), move |(active, config)| {
            let countdown = active
                .then(|| driver.every(COUNTDOWN_PERIOD_MS, config.clone(), SequenceGame::tick_second));
            move || drop(countdown)
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
                GameKind::ReactorRealignment,
                SequenceGame::start_with,
                move || starting.set(false),
            );
        })
    };
    let on_press = {
        let driver = driver.clone();
        let config = p.config.clone();
        Callback::from(move |symbol: Symbol| {
            let (outcome, effects) = driver.update(|game| game.press(symbol));
            log::debug!("press {symbol:?}: {outcome:?}");
            driver.apply(&config, effects);
        })
    };
    let on_forfeit = {
        let driver = driver.clone();
        let config = p.config.clone();
        Callback::from(move |_: MouseEvent| {
            let effects = driver.update(SequenceGame::forfeit);
            driver.apply(&config, effects);
        })
    };

    let (state, clock, highlighted, notice) = driver.read(|game| {
        (
            game.state().clone(),
            game.countdown(),
            game.highlighted(),
            game.notice().cloned(),
        )
    });
    let start_label = if *starting { t("ui.starting") } else { t("ui.start") };

    html! {
        <section class="panel game reactor" aria-labelledby="game-title">
            <h1 id="game-title" class="game-title">
                <span class="forfeit" role="button" tabindex="0" aria-label={t("ui.forfeit")} onclick={on_forfeit}>{ "⚠️" }</span>
                { t(GameKind::ReactorRealignment.title_key()) }
                <span aria-hidden="true">{ "⚠️" }</span>
            </h1>
            if state.active {
                <Hud stats={hud_stats(&state, clock)} />
                if let Some(hint) = phase_hint(state.phase) {
                    <div class="phase-hint">{ hint }</div>
                }
                <div class="progress">{ progress_line(&state) }</div>
            } else {
                <ConnectionForm config={p.config.clone()} on_change={p.on_config_change.clone()} />
            }
            <NoticeBanner {notice} />
            if state.active {
                <SymbolPad {highlighted} locked={state.phase == SequencePhase::Playback} {on_press} />
            } else {
                <Button label={start_label} onclick={on_start} disabled={*starting} class={classes!("start")} />
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_follow_the_phase() {
        crate::i18n::set_lang("en");
        assert_eq!(phase_hint(SequencePhase::Playback).as_deref(), Some("WATCH THE SEQUENCE..."));
        assert_eq!(phase_hint(SequencePhase::Input).as_deref(), Some("REPEAT THE SEQUENCE!"));
        assert!(phase_hint(SequencePhase::Failure).is_none());
    }

    #[test]
    fn hud_flags_the_last_seconds() {
        crate::i18n::set_lang("en");
        let state = SequenceGameState {
            round: 2,
            time_remaining: 9,
            ..SequenceGameState::default()
        };
        let stats = hud_stats(&state, Countdown::new(9));
        assert!(stats[0].critical);
        assert_eq!(stats[0].value, "9s");
        assert_eq!(stats[1].value, "2 / 5");
        assert_eq!(progress_line(&state), "Sequence Length: 0 | Your Input: 0");
    }
}
