//! Lifela AI chatbot page

use crate::api::{fetch_greeting, send_chat};
use crate::components::{ChatMessage, TypingIndicator};
use crate::state::AppState;
use crate::types::{ChatTurn, Message, MessageRole};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

/// Shown when the server cannot be reached at all
const UNREACHABLE_REPLY: &str = "I'm having trouble connecting right now. Please try again later.";

/// Used until the server's greeting arrives
const DEFAULT_GREETING: &str = "Hello! I'm Lifela AI, your intelligent health assistant. \
I'm here to help you with questions about Thalassemia, diet, care, and support. \
How can I assist you today?";

const QUICK_QUESTIONS: [(&str, &str); 4] = [
    (
        "💊 Diet & Nutrition",
        "What should I know about diet for Thalassemia?",
    ),
    ("🏥 Treatment Options", "What are the treatment options?"),
    ("⚠️ Symptoms", "What symptoms should I watch for?"),
    ("🤝 Support Groups", "Where can I find support?"),
];

const FEATURES: [(&str, &str, &str); 4] = [
    (
        "📚",
        "Educational Resources",
        "Clear explanations of Thalassemia, its types and how it is managed.",
    ),
    (
        "🥗",
        "Dietary Guidance",
        "Nutrition tips, including foods to favour and iron-rich foods to limit.",
    ),
    (
        "🏃",
        "Lifestyle Tips",
        "Everyday advice on energy, exercise and staying well between treatments.",
    ),
    (
        "🤝",
        "Resource Connections",
        "Pointers to support groups, donors and the care team questions worth asking.",
    ),
];

/// Id of the greeting bubble; it is not sent back as history
const GREETING_ID: usize = 0;

#[component]
pub fn ChatbotPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let messages = RwSignal::new(vec![Message::new(
        GREETING_ID,
        MessageRole::Assistant,
        DEFAULT_GREETING,
    )]);
    let input = RwSignal::new(String::new());
    let is_sending = RwSignal::new(false);
    let next_id = StoredValue::new(GREETING_ID + 1);
    let messages_end_ref = NodeRef::<leptos::html::Div>::new();

    // Replace the placeholder greeting with the server's
    let state_for_greeting = state.clone();
    Effect::new(move |_| {
        let base = state_for_greeting.api_base.get_untracked();
        spawn_local(async move {
            match fetch_greeting(&base).await {
                Ok(greeting) => messages.update(|msgs| {
                    if let Some(first) = msgs.iter_mut().find(|m| m.id == GREETING_ID) {
                        first.content = greeting;
                    }
                }),
                Err(e) => tracing::warn!("Failed to load greeting: {}", e),
            }
        });
    });

    // Auto-scroll to bottom when new messages arrive
    Effect::new(move |_| {
        messages.track();
        is_sending.track();
        if let Some(el) = messages_end_ref.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let push = move |role: MessageRole, content: String| {
        let id = next_id.get_value();
        next_id.set_value(id + 1);
        messages.update(|msgs| msgs.push(Message::new(id, role, content)));
    };

    let send = move || {
        let text = input.get_untracked().trim().to_string();
        if text.is_empty() || is_sending.get_untracked() {
            return;
        }

        let history: Vec<ChatTurn> = messages.with_untracked(|msgs| {
            msgs.iter()
                .filter(|m| m.id != GREETING_ID)
                .map(Message::as_turn)
                .collect()
        });

        push(MessageRole::User, text.clone());
        input.set(String::new());
        is_sending.set(true);

        let base = state.api_base.get_untracked();
        spawn_local(async move {
            let reply = match send_chat(&base, &text, history).await {
                Ok(resp) => {
                    if resp.fallback {
                        tracing::warn!("Assistant answered with its fallback reply");
                    }
                    resp.reply
                }
                Err(e) => {
                    tracing::error!("Chat request failed: {}", e);
                    UNREACHABLE_REPLY.to_string()
                }
            };
            push(MessageRole::Assistant, reply);
            is_sending.set(false);
        });
    };

    let send_on_click = send.clone();
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        // Enter sends, Shift+Enter inserts a newline
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="max-w-4xl mx-auto px-4 py-10">
            <header class="text-center mb-6">
                <div class="text-5xl mb-2">"🧠"</div>
                <h1 class="text-3xl font-bold">"Lifela AI Assistant"</h1>
                <p class="text-slate-600">
                    "Your intelligent companion for Thalassemia support and guidance"
                </p>
            </header>

            <div class="bg-white rounded-2xl border border-slate-200 flex flex-col h-[60vh]">
                <div class="flex-1 overflow-y-auto p-4 flex flex-col gap-4 bg-slate-50 rounded-t-2xl">
                    <For
                        each=move || messages.get()
                        key=|msg| (msg.id, msg.content.len())
                        children=|msg| view! { <ChatMessage message=msg /> }
                    />
                    <Show when=move || is_sending.get()>
                        <TypingIndicator />
                    </Show>
                    <div node_ref=messages_end_ref></div>
                </div>

                <div class="border-t border-slate-200 p-3 flex items-end gap-2">
                    <textarea
                        class="flex-1 resize-none px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:ring-2 focus:ring-rose-400"
                        rows="2"
                        placeholder="Ask me about Thalassemia, diet, care, or support..."
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=on_keydown
                        disabled=move || is_sending.get()
                    ></textarea>
                    <button
                        class="px-5 py-2 bg-rose-600 hover:bg-rose-700 text-white rounded-lg font-medium disabled:opacity-50"
                        disabled=move || is_sending.get() || input.get().trim().is_empty()
                        on:click=move |_| send_on_click()
                    >
                        "Send"
                    </button>
                </div>
            </div>

            <section class="mt-6">
                <h3 class="font-semibold mb-3">"Quick Questions"</h3>
                <div class="flex flex-wrap gap-2">
                    {QUICK_QUESTIONS.into_iter().map(|(label, question)| view! {
                        <button
                            class="px-3 py-2 rounded-full border border-slate-300 bg-white hover:bg-rose-50 text-sm"
                            on:click=move |_| input.set(question.to_string())
                        >
                            {label}
                        </button>
                    }).collect::<Vec<_>>()}
                </div>
            </section>

            <section class="mt-10">
                <h2 class="text-2xl font-bold text-center mb-6">"How Lifela AI Can Help You"</h2>
                <div class="grid sm:grid-cols-2 gap-4">
                    {FEATURES.into_iter().map(|(icon, title, text)| view! {
                        <div class="bg-white rounded-2xl border border-slate-200 p-6">
                            <div class="text-3xl mb-2">{icon}</div>
                            <h3 class="font-semibold mb-1">{title}</h3>
                            <p class="text-sm text-slate-600">{text}</p>
                        </div>
                    }).collect::<Vec<_>>()}
                </div>
            </section>
        </div>
    }
}
