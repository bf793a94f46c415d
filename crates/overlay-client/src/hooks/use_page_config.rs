use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::config::{GLOBALS_RETRY_MS, PageConfig};

/// Reads the page globals, retrying on a short interval until the
/// embedding page has populated them.
#[hook]
pub fn use_page_config() -> Option<PageConfig> {
    let config = use_state(PageConfig::from_globals);

    {
        let config = config.clone();
        use_effect_with(config.is_some(), move |&resolved| {
            let poll = (!resolved).then(|| {
                Interval::new(GLOBALS_RETRY_MS, move || {
                    if let Some(found) = PageConfig::from_globals() {
                        config.set(Some(found));
                    }
                })
            });
            move || drop(poll)
        });
    }

    (*config).clone()
}
