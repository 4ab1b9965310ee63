use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ScoreboardRowVm, map_scoreboard_rows};

#[component]
pub fn ScoreboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let scoreboard = ctx.scoreboard();

    let resource = use_resource(move || {
        let scoreboard = scoreboard.clone();

        async move {
            let rows = scoreboard.load().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_scoreboard_rows(&rows))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Scoreboard" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No scores yet. Play a round!" }
                    } else {
                        ScoreboardTable { rows }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn ScoreboardTable(rows: Vec<ScoreboardRowVm>) -> Element {
    rsx! {
        table { class: "scoreboard",
            thead {
                tr {
                    th { "#" }
                    th { "Player" }
                    th { "Total" }
                    th { "Rounds" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.user}",
                        td { "{row.rank}" }
                        td { "{row.user}" }
                        td { "{row.total_score}" }
                        td { "{row.rounds}" }
                    }
                }
            }
        }
    }
}
