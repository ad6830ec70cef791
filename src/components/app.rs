use super::paper::Paper;
use crate::loader::{ImageLoader, RevealStrategy};
use crate::model::BoardConfig;
use crate::state::{InputMode, StackOrder};
use crate::util::{clog, cwarn, describe};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| BoardConfig::load());
    // One counter for the whole board, shared through context.
    let stack = use_memo((), |_| StackOrder::default());
    let mode = use_memo((), |_| InputMode::detect());

    // Start image loading once the papers are in the DOM
    {
        let config = config.clone();
        let mode = *mode;
        use_effect_with((), move |_| {
            clog(&format!("board: {} paper(s), {:?} input", config.papers.len(), mode));
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    let strategy = RevealStrategy::detect(&window);
                    if let Err(err) = ImageLoader::new(document, &config).start(strategy) {
                        cwarn(&format!("image loader failed: {}", describe(&err)));
                    }
                }
            }
            || ()
        });
    }

    html! {
        <ContextProvider<StackOrder> context={(*stack).clone()}>
            <main class="board">
                { for config.papers.iter().enumerate().map(|(i, spec)| html! {
                    <Paper key={i} spec={spec.clone()} mode={*mode} />
                }) }
            </main>
        </ContextProvider<StackOrder>>
    }
}
