use gloo::events::EventListener;
use std::rc::Rc;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;
use yew::prelude::*;

const ALARM_VOLUME: f64 = 0.5;

/// Looping alarm track. Silent when the element cannot be created.
pub struct Alarm {
    element: Option<HtmlAudioElement>,
}

impl Alarm {
    #[must_use]
    pub fn new(src: &str) -> Self {
        let element = HtmlAudioElement::new_with_src(src).ok();
        if let Some(audio) = &element {
            audio.set_loop(true);
            audio.set_volume(ALARM_VOLUME);
        }
        Self { element }
    }

    /// Try to start playback; browsers may refuse until the user interacts.
    pub fn play(&self) {
        let Some(audio) = &self.element else {
            return;
        };
        match audio.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::info!(
                        "alarm autoplay blocked, waiting for interaction: {}",
                        crate::dom::js_error_message(&err)
                    );
                }
            }),
            Err(err) => crate::dom::console_error(&crate::dom::js_error_message(&err)),
        }
    }

    pub fn stop(&self) {
        if let Some(audio) = &self.element {
            let _ = audio.pause();
        }
    }
}

impl Drop for Alarm {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Play the alarm while the calling component is mounted, retrying on the
/// first click or key press if autoplay was blocked.
#[hook]
pub fn use_alarm(src: AttrValue) {
    use_effect_with(src, |src| {
        let alarm = Rc::new(Alarm::new(src));
        alarm.play();
        let listeners: Vec<EventListener> = crate::dom::document()
            .map(|doc| {
                ["click", "keydown"]
                    .into_iter()
                    .map(|kind| {
                        let alarm = Rc::clone(&alarm);
                        EventListener::once(&doc, kind, move |_| alarm.play())
                    })
                    .collect()
            })
            .unwrap_or_default();
        move || {
            drop(listeners);
            alarm.stop();
        }
    });
}
