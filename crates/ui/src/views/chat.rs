use dioxus::prelude::*;

use audit_core::model::{AnswerChoice, FollowUpKind, FollowUpTask, FollowUpValue, QuestionId};
use services::WalkerEvent;
use tracing::warn;

use crate::context::use_translator;
use crate::vm::{ChatInputVm, ChatVm};

/// Modal that plays a category as a conversation.
#[component]
pub fn ChatModal(
    vm: ChatVm,
    on_event: EventHandler<WalkerEvent>,
    on_close: EventHandler<()>,
) -> Element {
    let t = use_translator();
    rsx! {
        div { class: "modal-backdrop",
            div { class: "chat",
                header {
                    h3 { "{vm.title}" }
                    button { class: "close-chat", onclick: move |_| on_close.call(()), "✕" }
                }
                div { class: "messages",
                    for line in vm.lines {
                        div { class: line.class, "{line.body}" }
                    }
                    if vm.typing {
                        div { class: "typing", {t("Typing...")} }
                    }
                }
                match vm.input {
                    ChatInputVm::Hidden => rsx! {},
                    ChatInputVm::Choices { question, choices, secondary_options } => rsx! {
                        AnswerOptions {
                            key: "{question}",
                            question,
                            choices,
                            secondary_options,
                            on_event,
                        }
                    },
                    ChatInputVm::FollowUp(task) => rsx! {
                        FollowUpInput {
                            key: "{task.for_question}-{task.kind:?}",
                            task,
                            on_event,
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn AnswerOptions(
    question: QuestionId,
    choices: Vec<AnswerChoice>,
    secondary_options: Vec<String>,
    on_event: EventHandler<WalkerEvent>,
) -> Element {
    let t = use_translator();
    let mut selected = use_signal(Vec::<String>::new);

    rsx! {
        div { class: "answers",
            if !secondary_options.is_empty() {
                div { class: "secondary-options",
                    p { {t("Additional Items")} }
                    for option in secondary_options {
                        label {
                            input {
                                r#type: "checkbox",
                                checked: selected.read().contains(&option),
                                onchange: {
                                    let option = option.clone();
                                    move |evt: FormEvent| {
                                        let mut list = selected.write();
                                        list.retain(|o| o != &option);
                                        if evt.checked() {
                                            list.push(option.clone());
                                        }
                                    }
                                },
                            }
                            " {option}"
                        }
                    }
                }
            }
            for choice in choices {
                button {
                    class: "answer-btn",
                    onclick: {
                        let question = question.clone();
                        let choice = choice.clone();
                        move |_| {
                            on_event.call(WalkerEvent::Answer {
                                question: question.clone(),
                                choice: choice.clone(),
                                selected_options: selected(),
                            });
                        }
                    },
                    {t(&choice.text)}
                }
            }
        }
    }
}

#[component]
pub(crate) fn FollowUpInput(task: FollowUpTask, on_event: EventHandler<WalkerEvent>) -> Element {
    match task.kind {
        FollowUpKind::Image => rsx! { PhotoInput { task, on_event } },
        FollowUpKind::Comment => rsx! { CommentInput { task, on_event } },
    }
}

#[component]
fn CommentInput(task: FollowUpTask, on_event: EventHandler<WalkerEvent>) -> Element {
    let t = use_translator();
    let mut text = use_signal(String::new);
    let send_task = task.clone();

    rsx! {
        div { class: "answers follow-up",
            textarea {
                placeholder: t("Type your comment..."),
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
            }
            button {
                class: "answer-btn",
                disabled: text.read().trim().is_empty(),
                onclick: move |_| {
                    let value = FollowUpValue::Comment(text().trim().to_string());
                    on_event.call(WalkerEvent::FollowUp { task: send_task.clone(), value });
                },
                {t("Send")}
            }
            SkipButton { task, on_event }
        }
    }
}

/// File picker that turns the chosen photo into a base64 data URI.
#[component]
fn PhotoInput(task: FollowUpTask, on_event: EventHandler<WalkerEvent>) -> Element {
    let t = use_translator();
    let mut photo = use_signal(|| None::<FollowUpValue>);
    let mut rejected = use_signal(|| None::<String>);
    let attach_task = task.clone();

    let pick = move |evt: FormEvent| {
        photo.set(None);
        rejected.set(None);
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        spawn(async move {
            let name = file.name();
            match file.read_bytes().await {
                Ok(bytes) => match FollowUpValue::image_file(&name, &bytes) {
                    Ok(value) => photo.set(Some(value)),
                    Err(err) => rejected.set(Some(err.to_string())),
                },
                Err(err) => {
                    warn!(file = %name, error = %err, "photo not read");
                    rejected.set(Some(format!("{name} could not be read")));
                }
            }
        });
    };

    rsx! {
        div { class: "answers follow-up",
            input {
                r#type: "file",
                accept: "image/*",
                onchange: pick,
            }
            if let Some(message) = rejected() {
                p { class: "error", "{message}" }
            }
            button {
                class: "answer-btn",
                disabled: photo.read().is_none(),
                onclick: move |_| {
                    if let Some(value) = photo() {
                        on_event.call(WalkerEvent::FollowUp { task: attach_task.clone(), value });
                    }
                },
                {t("Attach")}
            }
            SkipButton { task, on_event }
        }
    }
}

#[component]
fn SkipButton(task: FollowUpTask, on_event: EventHandler<WalkerEvent>) -> Element {
    let t = use_translator();
    rsx! {
        button {
            class: "answer-btn skip",
            onclick: move |_| {
                on_event.call(WalkerEvent::FollowUp {
                    task: task.clone(),
                    value: FollowUpValue::Skip,
                });
            },
            {t("Skip")}
        }
    }
}
