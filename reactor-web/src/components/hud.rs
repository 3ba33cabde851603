use yew::prelude::*;

/// One labelled readout in the game HUD.
#[derive(Clone, PartialEq, Eq)]
pub struct HudStat {
    pub label: String,
    pub value: String,
    pub critical: bool,
    pub slug: &'static str,
}

#[derive(Properties, Clone, PartialEq, Eq)]
pub struct Props {
    pub stats: Vec<HudStat>,
}

fn stat_chip(stat: &HudStat) -> Html {
    let aria = format!("{} {}", stat.label, stat.value);
    html! {
        <div class={classes!("stat-chip", format!("stat-{}", stat.slug))} role="listitem" aria-label={aria}>
            <span class="stat-label">{ stat.label.clone() }</span>
            <span class={classes!("stat-value", stat.critical.then_some("stat-critical"))}>{ stat.value.clone() }</span>
        </div>
    }
}

#[function_component(Hud)]
pub fn hud(p: &Props) -> Html {
    html! {
        <div class="stat-chip-grid" role="list">
            { for p.stats.iter().map(stat_chip) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn critical_values_are_flagged() {
        let props = Props {
            stats: vec![
                HudStat {
                    label: String::from("TIME"),
                    value: String::from("9s"),
                    critical: true,
                    slug: "time",
                },
                HudStat {
                    label: String::from("ROUND"),
                    value: String::from("2 / 5"),
                    critical: false,
                    slug: "round",
                },
            ],
        };
        let html = block_on(LocalServerRenderer::<Hud>::with_props(props).render());
        assert!(html.contains("stat-critical"));
        assert!(html.contains("2 / 5"));
        assert_eq!(html.matches("stat-critical").count(), 1);
    }
}
