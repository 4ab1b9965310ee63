use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn IntroView() -> Element {
    let ctx = use_context::<AppContext>();
    let round = ctx.round_loop().current_round();
    let player = ctx.player_name().to_owned();

    rsx! {
        div { class: "page intro",
            h2 { "Ready to play?" }
            p { class: "intro-player", "Player: {player}" }
            p { class: "intro-round", "Round {round}" }
            Link { class: "btn btn-primary intro-start", to: Route::Quiz {}, "Start Quiz" }
            p {
                Link { to: Route::Scoreboard {}, "View scoreboard" }
            }
        }
    }
}
