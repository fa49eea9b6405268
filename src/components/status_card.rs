use crate::models::status::StatusUpdate;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusCardProps {
    pub update: StatusUpdate,
}

#[function_component(StatusCard)]
pub fn status_card(props: &StatusCardProps) -> Html {
    let StatusUpdate { status, user } = &props.update;

    let posted = status
        .created_at_utc()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    html! {
        <article class="status-card">
            <header class="status-author">
                if let Some(url) = &user.profile_image_url {
                    <img class="avatar" src={url.clone()} alt={user.screen_name.clone()} />
                }
                <span class="author-name">{&user.name}</span>
                <span class="author-handle">{format!("@{}", user.screen_name)}</span>
                if user.verified {
                    <span class="verified">{"✔"}</span>
                }
            </header>
            <p class="status-text">{&status.text}</p>
            <footer class="status-meta">
                <span>{posted}</span>
                if let Some(count) = status.retweet_count.filter(|c| *c > 0) {
                    <span class="retweets">{format!("{count} retweets")}</span>
                }
                if status.is_retweet() {
                    <span class="tag">{"RT"}</span>
                }
            </footer>
        </article>
    }
}
