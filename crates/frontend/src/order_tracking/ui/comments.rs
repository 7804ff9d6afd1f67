use crate::order_tracking::store::use_order_tracking_store;
use crate::shared::components::ui::Textarea;
use contracts::order_tracking::comments::CommentThread;
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::*;

/// Comment thread of an expanded row with the "add comment" form.
///
/// Unsent text lives in `drafts`, keyed by order id, so it survives the
/// table re-rendering when the thread reloads.
#[component]
pub fn CommentPanel(order_id: String, drafts: RwSignal<HashMap<String, String>>) -> impl IntoView {
    let store = use_order_tracking_store();
    let sending = RwSignal::new(false);

    let thread = {
        let id = order_id.clone();
        Memo::new(move |_| store.session.with(|s| s.accordion().thread(&id).cloned()))
    };
    let draft = {
        let id = order_id.clone();
        Signal::derive(move || drafts.with(|d| d.get(&id).cloned().unwrap_or_default()))
    };
    let on_input = {
        let id = order_id.clone();
        Callback::new(move |text: String| {
            drafts.update(|d| {
                d.insert(id.clone(), text);
            })
        })
    };

    let submit = move |_| {
        let text = draft.get_untracked();
        if text.trim().is_empty() || sending.get_untracked() {
            return;
        }
        sending.set(true);
        let id = order_id.clone();
        store.add_comment(order_id.clone(), text, move |stored| {
            sending.set(false);
            if stored {
                drafts.update(|d| {
                    d.remove(&id);
                });
            }
        });
    };

    view! {
        <div class="accordion-content">
            <div class="comments-thread">
                {move || match thread.get() {
                    None | Some(CommentThread::Loading) => view! {
                        <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                            <Spinner />
                            "Loading comments..."
                        </Flex>
                    }.into_any(),
                    Some(CommentThread::Failed) => view! {
                        <div class="comments-thread__error">"Error loading comments"</div>
                    }.into_any(),
                    Some(CommentThread::Loaded(comments)) if comments.is_empty() => view! {
                        <div class="comments-thread__empty">"No comments yet"</div>
                    }.into_any(),
                    Some(CommentThread::Loaded(comments)) => comments
                        .into_iter()
                        .map(|comment| view! {
                            <div class="comment">
                                <div class="comment__meta">
                                    <span class="comment__author">{comment.author}</span>
                                    <span class="comment__date">{comment.date}</span>
                                </div>
                                <div class="comment__text">{comment.text}</div>
                            </div>
                        })
                        .collect_view()
                        .into_any(),
                }}
            </div>
            <Flex gap=FlexGap::Small align=FlexAlign::End>
                <Textarea
                    value=draft
                    on_input=on_input
                    placeholder="Add a comment..."
                    disabled=sending
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || sending.get() || draft.get().trim().is_empty())
                    on_click=submit
                >
                    "Add Comment"
                </Button>
            </Flex>
        </div>
    }
}
