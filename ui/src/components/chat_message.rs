//! Chat message component

use crate::types::{Message, MessageRole};
use leptos::prelude::*;
use pulldown_cmark::{html, Event, Options, Parser};

/// Render a single chat message
#[component]
pub fn ChatMessage(message: Message) -> impl IntoView {
    let is_user = message.role == MessageRole::User;

    view! {
        <div class=format!(
            "flex items-start gap-3 message-appear {}",
            if is_user { "flex-row-reverse" } else { "" }
        )>
            // Avatar
            <div class=format!(
                "w-8 h-8 rounded-full flex items-center justify-center text-white text-sm shrink-0 {}",
                if is_user {
                    "bg-gradient-to-br from-sky-500 to-cyan-500"
                } else {
                    "bg-gradient-to-br from-rose-500 to-purple-600"
                }
            )>
                {if is_user { "👤" } else { "🧠" }}
            </div>

            <div class=format!(
                "flex flex-col gap-1 max-w-[80%] {}",
                if is_user { "items-end" } else { "items-start" }
            )>
                <div class=format!(
                    "px-4 py-3 rounded-2xl {}",
                    if is_user {
                        "bg-rose-600 text-white rounded-tr-sm"
                    } else {
                        "bg-white border border-slate-200 text-slate-800 rounded-tl-sm"
                    }
                )>
                    {if is_user {
                        view! {
                            <div class="whitespace-pre-wrap break-words">{message.content.clone()}</div>
                        }.into_any()
                    } else {
                        view! {
                            <div class="prose prose-sm break-words" inner_html=render_markdown(&message.content)></div>
                        }.into_any()
                    }}
                </div>

                // Timestamp
                <span class="text-xs text-slate-400 mt-1">
                    {message.timestamp.format("%H:%M").to_string()}
                </span>
            </div>
        </div>
    }
}

/// Markdown to HTML for assistant replies. Raw HTML in the reply is
/// dropped, so the result is safe for `inner_html`.
pub fn render_markdown(content: &str) -> String {
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH)
        .filter(|event| !matches!(event, Event::Html(_) | Event::InlineHtml(_)));

    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
