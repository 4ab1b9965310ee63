use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{IntroView, QuizView, ScoreboardView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", IntroView)] Intro {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/scoreboard", ScoreboardView)] Scoreboard {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    rsx! {
        nav { class: "topbar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Intro {}, "Intro" } }
                li { Link { to: Route::Quiz {}, "Play" } }
                li { Link { to: Route::Scoreboard {}, "Scoreboard" } }
            }
        }
    }
}
