use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lingua_types::{PageEvent, RuntimeMessage, UiUpdate};
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::session::{Completion, Effect, Session};
use crate::state::AppState;

/// Everything a page loop reacts to, merged into one channel
#[derive(Debug)]
pub enum AppEvent {
    Page(PageEvent),
    PageClosed,
    Shutdown,
    LanguageChanged(String),
    Completed(Completion),
    CopyFinished { generation: u64, ok: bool },
    CopyReset { generation: u64 },
}

impl AppEvent {
    /// Handlers that read or write the vocabulary or settings files
    fn touches_storage(&self) -> bool {
        match self {
            AppEvent::Completed(_) => true,
            AppEvent::Page(PageEvent::Message { message }) => matches!(
                message,
                RuntimeMessage::ExportVocab
                    | RuntimeMessage::GetVocabCount
                    | RuntimeMessage::SetLangue { .. }
            ),
            _ => false,
        }
    }
}

/// Drive one page: page events and task results go through the session one
/// at a time, effects are carried out here.
pub async fn page_loop(
    state: Arc<AppState>,
    events: AsyncReceiver<PageEvent>,
    updates: AsyncSender<UiUpdate>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (hover_tooltip, copy_feedback) = {
        let config = state.config.read().await;
        (
            config.ui.hover_tooltip,
            Duration::from_millis(config.ui.copy_feedback_ms),
        )
    };

    let settings = state.settings.clone();
    let lang = tokio::task::spawn_blocking(move || settings.language()).await?;

    let mut session = Session::new(
        lang,
        hover_tooltip,
        state.vocab.clone(),
        state.settings.clone(),
    );

    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    // Dropped with the loop, which aborts forwarders and calls still in flight
    let mut tasks = JoinSet::new();

    tasks.spawn(forward_page_events(events, tx.clone()));
    tasks.spawn(forward_language(state.settings.subscribe(), state.clone(), tx.clone()));
    tasks.spawn({
        let tx = tx.clone();
        async move {
            cancel.cancelled().await;
            let _ = tx.send(AppEvent::Shutdown).await;
        }
    });

    tracing::debug!("Page session started (language {})", session.lang());

    while let Ok(event) = rx.recv().await {
        while let Some(joined) = tasks.try_join_next() {
            if let Err(e) = joined {
                tracing::error!("Page task panicked: {}", e);
            }
        }

        let effects = if event.touches_storage() {
            let (next, effects) = tokio::task::spawn_blocking(move || {
                let effects = dispatch(&mut session, event);
                (session, effects)
            })
            .await?;
            session = next;
            effects
        } else {
            match event {
                AppEvent::PageClosed | AppEvent::Shutdown => break,
                event => dispatch(&mut session, event),
            }
        };

        for effect in effects {
            match effect {
                Effect::Ui(update) => {
                    if updates.send(update).await.is_err() {
                        tracing::debug!("Page gone, stopping session");
                        return Ok(());
                    }
                }
                Effect::Request(request) => {
                    let client = state.client.clone();
                    let tx = tx.clone();
                    tasks.spawn(async move {
                        let result = client
                            .call(
                                &request.prompt.prompt,
                                &request.prompt.system_prompt,
                                &request.lang,
                            )
                            .await;
                        let _ = tx
                            .send(AppEvent::Completed(Completion { request, result }))
                            .await;
                    });
                }
                Effect::Copy { text, generation } => {
                    let clipboard = state.clipboard.clone();
                    let tx = tx.clone();
                    tasks.spawn(async move {
                        let ok = match tokio::task::spawn_blocking(move || {
                            clipboard.set_text(&text)
                        })
                        .await
                        {
                            Ok(Ok(())) => true,
                            Ok(Err(e)) => {
                                tracing::warn!("Copy failed: {}", e);
                                false
                            }
                            Err(e) => {
                                tracing::error!("Copy task failed: {}", e);
                                false
                            }
                        };
                        let _ = tx.send(AppEvent::CopyFinished { generation, ok }).await;
                    });
                }
                Effect::ScheduleCopyReset { generation } => {
                    let tx = tx.clone();
                    tasks.spawn(async move {
                        tokio::time::sleep(copy_feedback).await;
                        let _ = tx.send(AppEvent::CopyReset { generation }).await;
                    });
                }
            }
        }
    }

    tracing::debug!("Page session ended");
    Ok(())
}

fn dispatch(session: &mut Session, event: AppEvent) -> Vec<Effect> {
    match event {
        AppEvent::Page(event) => session.handle(event),
        AppEvent::LanguageChanged(lang) => {
            session.on_language_changed(lang);
            Vec::new()
        }
        AppEvent::Completed(completion) => session.on_completed(completion),
        AppEvent::CopyFinished { generation, ok } => session.copy_finished(generation, ok),
        AppEvent::CopyReset { generation } => session.copy_reset(generation),
        AppEvent::PageClosed | AppEvent::Shutdown => Vec::new(),
    }
}

async fn forward_page_events(events: AsyncReceiver<PageEvent>, tx: AsyncSender<AppEvent>) {
    while let Ok(event) = events.recv().await {
        if tx.send(AppEvent::Page(event)).await.is_err() {
            return;
        }
    }
    let _ = tx.send(AppEvent::PageClosed).await;
}

async fn forward_language(
    mut changes: broadcast::Receiver<String>,
    state: Arc<AppState>,
    tx: AsyncSender<AppEvent>,
) {
    loop {
        let lang = match changes.recv().await {
            Ok(lang) => lang,
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::debug!("Missed {} language changes", n);
                let settings = state.settings.clone();
                match tokio::task::spawn_blocking(move || settings.language()).await {
                    Ok(lang) => lang,
                    Err(e) => {
                        tracing::error!("Language read failed: {}", e);
                        continue;
                    }
                }
            }
            Err(broadcast::error::RecvError::Closed) => return,
        };

        if tx.send(AppEvent::LanguageChanged(lang)).await.is_err() {
            return;
        }
    }
}
