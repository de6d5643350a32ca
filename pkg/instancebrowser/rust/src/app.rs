// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Terminal event loop.
//!
//! Reads run on spawned tasks and report back over a channel; key presses
//! and read results are handled one at a time on this task, which is the only
//! writer of the browser state.

use std::io::{self, Stdout};
use std::ops::ControlFlow;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::api::InstanceApi;
use crate::browser::{Fetched, InstanceBrowser, Request, ViewState};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CursorUp,
    CursorDown,
    Open,
    Home,
    PointPrev,
    PointNext,
}

/// Map a key press to an action for the current view.
pub fn action_for_key(view: &ViewState, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match (view, key.code) {
        (_, KeyCode::Char('q')) => Some(Action::Quit),
        (_, KeyCode::Char('r')) => Some(Action::Home),
        (ViewState::List, KeyCode::Up | KeyCode::Char('k')) => Some(Action::CursorUp),
        (ViewState::List, KeyCode::Down | KeyCode::Char('j')) => Some(Action::CursorDown),
        (ViewState::List, KeyCode::Enter) => Some(Action::Open),
        (ViewState::Detail { .. }, KeyCode::Char('h') | KeyCode::Esc | KeyCode::Backspace) => {
            Some(Action::Home)
        }
        (ViewState::Detail { .. }, KeyCode::Left) => Some(Action::PointPrev),
        (ViewState::Detail { .. }, KeyCode::Right) => Some(Action::PointNext),
        _ => None,
    }
}

/// Restores the terminal even when the loop exits early or panics.
struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn setup_terminal() -> Result<(Terminal<CrosstermBackend<Stdout>>, TerminalCleanup)> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let cleanup = TerminalCleanup;
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")?;
    Ok((terminal, cleanup))
}

/// Performs reads on spawned tasks and reports them back to the loop.
struct Fetcher {
    api: Arc<dyn InstanceApi>,
    tx: mpsc::UnboundedSender<Fetched>,
}

impl Fetcher {
    fn issue(&self, request: Request) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let fetched = request.fetch(api.as_ref()).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(fetched);
        });
    }
}

fn dispatch(action: Action, browser: &mut InstanceBrowser, fetcher: &Fetcher) -> ControlFlow<()> {
    debug!("{action:?}");
    match action {
        Action::Quit => return ControlFlow::Break(()),
        Action::CursorUp => browser.cursor_up(),
        Action::CursorDown => browser.cursor_down(),
        Action::Open => {
            if let Some(request) = browser.open_highlighted() {
                fetcher.issue(request);
            }
        }
        Action::Home => fetcher.issue(browser.home()),
        Action::PointPrev => browser.point_prev(),
        Action::PointNext => browser.point_next(),
    }
    ControlFlow::Continue(())
}

pub async fn run(api: Arc<dyn InstanceApi>) -> Result<()> {
    let (mut terminal, _cleanup) = setup_terminal()?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let fetcher = Fetcher { api, tx };
    let mut browser = InstanceBrowser::new();
    let mut events = EventStream::new();

    fetcher.issue(browser.request_instances());

    loop {
        terminal
            .draw(|frame| ui::draw(frame, &browser))
            .context("Failed to draw")?;

        tokio::select! {
            Some(fetched) = rx.recv() => browser.apply(fetched),
            event = events.next() => {
                let key = match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => key,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!("terminal event error: {e}");
                        continue;
                    }
                    None => break,
                };
                if let Some(action) = action_for_key(browser.view(), key)
                    && dispatch(action, &mut browser, &fetcher).is_break()
                {
                    break;
                }
            }
        }
    }

    info!("exiting");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::errors::FetchError;
    use crate::model::{InstanceDetail, InstanceSummary};
    use async_trait::async_trait;

    /// Serves a fixed list; every instance exists and has no graph data.
    struct StaticApi {
        instances: Vec<InstanceSummary>,
    }

    #[async_trait]
    impl InstanceApi for StaticApi {
        async fn list_instances(&self) -> Result<Vec<InstanceSummary>, FetchError> {
            Ok(self.instances.clone())
        }

        async fn get_instance(&self, id: &str) -> Result<InstanceDetail, FetchError> {
            Ok(InstanceDetail {
                id: id.to_string(),
                cpu: None,
                graph_data: Default::default(),
            })
        }
    }

    fn summary(id: &str) -> InstanceSummary {
        InstanceSummary {
            id: id.to_string(),
            instance_type: "t2.micro".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    fn fetcher(ids: &[&str]) -> (Fetcher, mpsc::UnboundedReceiver<Fetched>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let api = StaticApi {
            instances: ids.iter().map(|id| summary(id)).collect(),
        };
        (
            Fetcher {
                api: Arc::new(api),
                tx,
            },
            rx,
        )
    }

    /// Every read the fetcher issued, once all of them have completed.
    async fn issued(fetcher: Fetcher, mut rx: mpsc::UnboundedReceiver<Fetched>) -> Vec<Fetched> {
        drop(fetcher);
        let mut fetched = Vec::new();
        while let Some(f) = rx.recv().await {
            fetched.push(f);
        }
        fetched
    }

    fn listed(ids: &[&str]) -> InstanceBrowser {
        let mut browser = InstanceBrowser::new();
        browser.apply(Fetched::Instances {
            session: browser.session(),
            result: Ok(ids.iter().map(|id| summary(id)).collect()),
        });
        browser
    }

    #[tokio::test]
    async fn test_home_resets_and_issues_one_list_read() {
        let (fetcher, rx) = fetcher(&["i-1", "i-2"]);
        let mut browser = listed(&["i-1", "i-2"]);
        browser.cursor_down();
        browser.apply(Fetched::Instance {
            session: browser.session(),
            id: "i-2".to_string(),
            result: Ok(InstanceDetail {
                id: "i-2".to_string(),
                cpu: None,
                graph_data: Default::default(),
            }),
        });
        let old = browser.session();

        let flow = dispatch(Action::Home, &mut browser, &fetcher);

        assert_eq!(flow, ControlFlow::Continue(()));
        assert!(browser.view().is_list());
        assert!(browser.instances().is_empty());
        assert_eq!(browser.cursor(), 0);
        assert_ne!(browser.session(), old);

        let mut fetched = issued(fetcher, rx).await;
        assert_eq!(fetched.len(), 1, "{fetched:?}");
        let Some(Fetched::Instances { session, .. }) = fetched.first() else {
            panic!("expected a list read, got {fetched:?}");
        };
        assert_eq!(*session, browser.session());

        browser.apply(fetched.remove(0));
        assert_eq!(browser.instances().len(), 2);
    }

    #[tokio::test]
    async fn test_open_issues_detail_read_for_highlighted_row() {
        let (fetcher, rx) = fetcher(&[]);
        let mut browser = listed(&["i-1", "i-2"]);
        dispatch(Action::CursorDown, &mut browser, &fetcher);

        let flow = dispatch(Action::Open, &mut browser, &fetcher);
        assert_eq!(flow, ControlFlow::Continue(()));
        assert!(browser.view().is_list());

        let mut fetched = issued(fetcher, rx).await;
        assert_eq!(fetched.len(), 1, "{fetched:?}");
        let Some(Fetched::Instance { session, id, .. }) = fetched.first() else {
            panic!("expected a detail read, got {fetched:?}");
        };
        assert_eq!(*session, browser.session());
        assert_eq!(id, "i-2");

        browser.apply(fetched.remove(0));
        assert!(matches!(
            browser.view(),
            ViewState::Detail { instance, .. } if instance.id == "i-2"
        ));
    }

    #[tokio::test]
    async fn test_open_on_empty_list_does_nothing() {
        let (fetcher, rx) = fetcher(&["i-1"]);
        let mut browser = InstanceBrowser::new();

        let flow = dispatch(Action::Open, &mut browser, &fetcher);

        assert_eq!(flow, ControlFlow::Continue(()));
        assert!(browser.view().is_list());
        assert!(issued(fetcher, rx).await.is_empty());
    }

    #[tokio::test]
    async fn test_quit_breaks_without_reads() {
        let (fetcher, rx) = fetcher(&["i-1"]);
        let mut browser = listed(&["i-1"]);

        assert_eq!(
            dispatch(Action::Quit, &mut browser, &fetcher),
            ControlFlow::Break(())
        );
        assert!(issued(fetcher, rx).await.is_empty());
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn detail_view() -> ViewState {
        ViewState::Detail {
            instance: InstanceDetail {
                id: "i-1".to_string(),
                cpu: None,
                graph_data: Default::default(),
            },
            series: None,
        }
    }

    #[test]
    fn test_list_keys() {
        let list = ViewState::List;
        assert_eq!(action_for_key(&list, press(KeyCode::Enter)), Some(Action::Open));
        assert_eq!(action_for_key(&list, press(KeyCode::Up)), Some(Action::CursorUp));
        assert_eq!(action_for_key(&list, press(KeyCode::Char('j'))), Some(Action::CursorDown));
        assert_eq!(action_for_key(&list, press(KeyCode::Char('r'))), Some(Action::Home));
        assert_eq!(action_for_key(&list, press(KeyCode::Esc)), None);
        assert_eq!(action_for_key(&list, press(KeyCode::Left)), None);
    }

    #[test]
    fn test_detail_keys() {
        let detail = detail_view();
        assert_eq!(action_for_key(&detail, press(KeyCode::Char('h'))), Some(Action::Home));
        assert_eq!(action_for_key(&detail, press(KeyCode::Esc)), Some(Action::Home));
        assert_eq!(action_for_key(&detail, press(KeyCode::Backspace)), Some(Action::Home));
        assert_eq!(action_for_key(&detail, press(KeyCode::Right)), Some(Action::PointNext));
        assert_eq!(action_for_key(&detail, press(KeyCode::Enter)), None);
        assert_eq!(action_for_key(&detail, press(KeyCode::Down)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(&ViewState::List, press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            action_for_key(
                &detail_view(),
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Action::Quit)
        );
    }
}
