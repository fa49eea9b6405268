use yew::prelude::*;

use tweetbase_feed::components::{FeedStatus, StatusCard};
use tweetbase_feed::config::FeedConfig;
use tweetbase_feed::hooks::use_feed::use_feed;

#[function_component(App)]
fn app() -> Html {
    let defaults = FeedConfig::default();
    let state = use_feed(
        defaults.server().to_string(),
        defaults.database().to_string(),
    );

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"TweetBase Live Feed"}</h1>
            </header>

            <main class="app-main">
                <section class="status-section">
                    <FeedStatus state={(*state).clone()} />
                </section>

                <section class="feed-section">
                    { for state.updates.iter().map(|update| html! {
                        <StatusCard key={update.status.id.clone()} update={update.clone()} />
                    }) }
                </section>
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
