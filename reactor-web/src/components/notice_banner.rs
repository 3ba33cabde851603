use crate::a11y::STATUS_REGION_ID;
use crate::i18n::notice_text;
use reactor_game::Notice;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub notice: Option<Notice>,
}

/// Coloured message line under the game title, also the polite live region.
#[function_component(NoticeBanner)]
pub fn notice_banner(p: &Props) -> Html {
    let (class, text) = p.notice.as_ref().map_or_else(
        || ("notice-empty", String::new()),
        |notice| (notice.tone.css_class(), notice_text(notice)),
    );
    html! {
        <div id={STATUS_REGION_ID} class={classes!("notice", class)} role="status" aria-live="polite">
            { text }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_translated_notice_with_tone() {
        crate::i18n::set_lang("en");
        let props = Props {
            notice: Some(Notice::success("notice.round_complete").with_arg("round", 2)),
        };
        let html = block_on(LocalServerRenderer::<NoticeBanner>::with_props(props).render());
        assert!(html.contains("Round 2 complete!"), "{html}");
        assert!(html.contains("notice-success"));
    }

    #[test]
    fn empty_banner_keeps_live_region() {
        let html = block_on(
            LocalServerRenderer::<NoticeBanner>::with_props(Props { notice: None }).render(),
        );
        assert!(html.contains(STATUS_REGION_ID));
        assert!(html.contains("notice-empty"));
    }
}
