use std::collections::BTreeSet;
use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{AnswerSelection, QuestionKind};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizPhase, QuizVm, RoundOutcome, start_round};

/// Feedback pause before the next question, matching the original app's
/// snackbar delay.
const FEEDBACK_PAUSE: Duration = Duration::from_secs(1);

/// Plain data lifted out of the view-model so rsx never holds a signal read.
#[derive(Clone, Debug, PartialEq)]
struct QuestionDisplay {
    prompt: String,
    choices: Vec<String>,
    kind: QuestionKind,
    position: usize,
    total: usize,
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let round_loop = ctx.round_loop();

    let mut vm = use_signal(|| None::<QuizVm>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut selected_single = use_signal(|| None::<usize>);
    let mut selected_multi = use_signal(BTreeSet::<usize>::new);
    let mut completed = use_signal(|| false);
    // Locks the inputs while the feedback pause is running.
    let mut advancing = use_signal(|| false);

    let round_loop_for_start = round_loop.clone();
    let resource = use_resource(move || {
        let round_loop = round_loop_for_start.clone();
        let mut vm = vm;
        let mut error = error;
        let mut completed = completed;
        let mut selected_single = selected_single;
        let mut selected_multi = selected_multi;

        async move {
            completed.set(false);
            selected_single.set(None);
            selected_multi.set(BTreeSet::new());
            let started = start_round(&round_loop).await?;
            vm.set(Some(started));
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });

    let round_loop_for_submit = round_loop.clone();
    let on_submit = use_callback(move |()| {
        if advancing() {
            return;
        }

        let selection = {
            let guard = vm.read();
            let Some(question) = guard.as_ref().and_then(QuizVm::current_question) else {
                return;
            };
            match question.kind() {
                QuestionKind::SingleChoice => match selected_single() {
                    Some(index) => AnswerSelection::Single(index),
                    None => return,
                },
                QuestionKind::MultiChoice => AnswerSelection::Multiple(selected_multi()),
            }
        };

        let submitted = {
            let mut guard = vm.write();
            let Some(vm_value) = guard.as_mut() else {
                return;
            };
            vm_value.submit(selection)
        };
        if submitted.is_err() {
            error.set(Some(ViewError::Unknown));
            return;
        }

        selected_single.set(None);
        selected_multi.set(BTreeSet::new());
        advancing.set(true);

        // One-shot deferred advance so the feedback stays visible first.
        let round_loop = round_loop_for_submit.clone();
        spawn(async move {
            tokio::time::sleep(FEEDBACK_PAUSE).await;
            let outcome = {
                let mut guard = vm.write();
                guard.as_mut().map(QuizVm::advance)
            };
            advancing.set(false);
            if outcome == Some(RoundOutcome::Completed) {
                // Round end reports the score; the workflow logs sink
                // failures and moves the round counter regardless.
                let finished = vm.write().take();
                if let Some(finished) = finished {
                    let _ = round_loop.finish_round(finished.round()).await;
                    vm.set(Some(finished));
                }
                completed.set(true);
            }
        });
    });

    let state = view_state_from_resource(&resource);
    let vm_guard = vm.read();
    let phase = vm_guard.as_ref().map(QuizVm::phase);
    let score = vm_guard.as_ref().map_or(0, QuizVm::score);
    let round_number = vm_guard.as_ref().map_or(0, QuizVm::round_number);
    let total = vm_guard
        .as_ref()
        .map_or(0, |vm| vm.progress().total);
    let question = vm_guard.as_ref().and_then(|vm| {
        vm.current_question().map(|question| QuestionDisplay {
            prompt: question.prompt().to_owned(),
            choices: question.choices().to_vec(),
            kind: question.kind(),
            position: vm.round().current_index() + 1,
            total: vm.round().total_questions(),
        })
    });
    drop(vm_guard);

    let feedback = match phase {
        Some(QuizPhase::Feedback { correct: true }) => Some("Correct!"),
        Some(QuizPhase::Feedback { correct: false }) => Some("Wrong answer. Try again."),
        _ => None,
    };
    let inputs_locked = advancing() || feedback.is_some();
    let submit_ready = match question.as_ref().map(|q| q.kind) {
        Some(QuestionKind::SingleChoice) => selected_single().is_some(),
        Some(QuestionKind::MultiChoice) => true,
        None => false,
    };

    rsx! {
        div { class: "page quiz-page",
            h2 { "Round {round_number}" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    if err == ViewError::EmptyRound {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                navigator.push(Route::Intro {});
                            },
                            "Back to Intro"
                        }
                    } else {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "quiz-error", "{err.message()}" }
                    }
                    if completed() {
                        div { class: "round-complete",
                            h3 { "Round finished!" }
                            p { "You scored {score} out of {total}." }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| {
                                    navigator.push(Route::Intro {});
                                },
                                "Continue"
                            }
                        }
                    } else if let Some(question) = question {
                        p { class: "quiz-progress", "Question {question.position} of {question.total}" }
                        div { class: "quiz-question",
                            p { class: "quiz-prompt", "{question.prompt}" }
                            match question.kind {
                                QuestionKind::SingleChoice => rsx! {
                                    ul { class: "choices",
                                        for (index, choice) in question.choices.iter().enumerate() {
                                            li { key: "{index}",
                                                label {
                                                    input {
                                                        r#type: "radio",
                                                        name: "choice",
                                                        checked: selected_single() == Some(index),
                                                        disabled: inputs_locked,
                                                        onchange: move |_| selected_single.set(Some(index)),
                                                    }
                                                    span { "{choice}" }
                                                }
                                            }
                                        }
                                    }
                                },
                                QuestionKind::MultiChoice => rsx! {
                                    ul { class: "choices",
                                        for (index, choice) in question.choices.iter().enumerate() {
                                            li { key: "{index}",
                                                label {
                                                    input {
                                                        r#type: "checkbox",
                                                        checked: selected_multi().contains(&index),
                                                        disabled: inputs_locked,
                                                        onchange: move |_| {
                                                            let mut chosen = selected_multi();
                                                            if !chosen.remove(&index) {
                                                                chosen.insert(index);
                                                            }
                                                            selected_multi.set(chosen);
                                                        },
                                                    }
                                                    span { "{choice}" }
                                                }
                                            }
                                        }
                                    }
                                },
                            }
                            button {
                                class: "btn btn-primary quiz-submit",
                                r#type: "button",
                                disabled: inputs_locked || !submit_ready,
                                onclick: move |_| on_submit.call(()),
                                "Submit"
                            }
                        }
                        if let Some(message) = feedback {
                            div { class: "feedback-banner", "{message}" }
                        }
                    }
                },
            }
        }
    }
}
