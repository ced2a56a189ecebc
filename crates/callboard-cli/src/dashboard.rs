//! Live terminal views
//!
//! `watch` shows the polling call list. `dashboard` adds the submission form
//! on top of it, so a created call shows up without waiting for the next tick.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use callboard::{CallListView, CallPage, CallsApi, ListConfig, ListSnapshot, RefreshSignal};
use colored::Colorize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::prompt;
use crate::render::{clear_screen, render_form_status, render_list};

const WATCH_HELP: &str = "[Enter] refresh  [q] quit";
const DASHBOARD_HELP: &str = "[Enter] refresh  [n] new call  [q] quit";

/// A line of user input
#[derive(Debug, PartialEq, Eq)]
enum Key {
    Refresh,
    NewCall,
    Quit,
    Other(String),
}

fn parse_key(line: &str) -> Key {
    match line.trim().to_lowercase().as_str() {
        "" | "r" => Key::Refresh,
        "n" | "new" => Key::NewCall,
        "q" | "quit" | "exit" => Key::Quit,
        other => Key::Other(other.to_string()),
    }
}

/// Read one line from stdin. `None` on end of input.
async fn read_line() -> Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let n = io::stdin().read_line(&mut line)?;
        Ok::<_, io::Error>((n > 0).then_some(line))
    })
    .await
    .context("Input reader stopped unexpectedly")?
    .context("Failed to read input")
}

#[derive(Debug, Clone, Default)]
struct Overlay {
    footer: Option<String>,
    paused: bool,
}

/// Redraws the list whenever its state or the footer changes
struct Screen {
    overlay: watch::Sender<Overlay>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Screen {
    fn start(list_rx: watch::Receiver<ListSnapshot>, help: &'static str) -> Self {
        let (overlay, overlay_rx) = watch::channel(Overlay::default());
        let cancel = CancellationToken::new();
        let task = tokio::spawn(draw_loop(list_rx, overlay_rx, cancel.clone(), help));
        Self {
            overlay,
            cancel,
            task,
        }
    }

    fn set_footer(&self, footer: Option<String>) {
        self.overlay.send_modify(|o| o.footer = footer);
    }

    /// Stop redrawing while a prompt owns the terminal
    fn pause(&self) {
        self.overlay.send_modify(|o| o.paused = true);
    }

    fn resume(&self) {
        self.overlay.send_modify(|o| o.paused = false);
    }

    async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Screen task ended abnormally");
        }
    }
}

async fn draw_loop(
    mut list_rx: watch::Receiver<ListSnapshot>,
    mut overlay_rx: watch::Receiver<Overlay>,
    cancel: CancellationToken,
    help: &'static str,
) {
    loop {
        let overlay = overlay_rx.borrow_and_update().clone();
        let snapshot = list_rx.borrow_and_update().clone();
        if !overlay.paused {
            draw(&snapshot, &overlay, help);
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = list_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = overlay_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
}

fn draw(snapshot: &ListSnapshot, overlay: &Overlay, help: &str) {
    clear_screen();
    print!("{}", render_list(&snapshot.view(), snapshot.is_validating()));
    if let Some(footer) = &overlay.footer {
        println!("\n{}", footer);
    }
    println!("\n{}", help.dimmed());
    let _ = io::stdout().flush();
}

/// Poll and display the call list until the user quits
pub async fn run_watch(api: Arc<dyn CallsApi>, config: ListConfig) -> Result<()> {
    let signal = RefreshSignal::new();
    let list = CallListView::mount(api, signal.subscribe(), config);
    let screen = Screen::start(list.subscribe(), WATCH_HELP);

    while let Some(line) = read_line().await? {
        match parse_key(&line) {
            Key::Quit => break,
            Key::Refresh => {
                screen.set_footer(None);
                list.refresh();
            }
            Key::NewCall | Key::Other(_) => {
                screen.set_footer(Some(format!("{} {}", "?".yellow(), WATCH_HELP)));
            }
        }
    }

    screen.stop().await;
    list.unmount().await;
    Ok(())
}

/// Full page: live list plus the call form
pub async fn run_dashboard(api: Arc<dyn CallsApi>, config: ListConfig) -> Result<()> {
    let mut page = CallPage::mount(api, config);
    let screen = Screen::start(page.list().subscribe(), DASHBOARD_HELP);

    while let Some(line) = read_line().await? {
        match parse_key(&line) {
            Key::Quit => break,
            Key::Refresh => {
                screen.set_footer(None);
                page.list().refresh();
            }
            Key::NewCall => {
                screen.pause();
                clear_screen();
                println!("{}", "New call".bold());

                let mut form = page.form().clone();
                let filled = tokio::task::spawn_blocking(move || {
                    prompt::fill_form(&mut form, None, None, None).map(|_| form)
                })
                .await
                .context("Prompt stopped unexpectedly")?;

                match filled {
                    Ok(form) => {
                        *page.form_mut() = form;
                        screen.set_footer(Some(page.form().submit_label().dimmed().to_string()));
                        screen.resume();

                        let footer = match page.submit().await {
                            Ok(call) => format!(
                                "{} Call started for {} ({})",
                                "✓".green(),
                                call.customer_name,
                                call.id.dimmed()
                            ),
                            Err(_) => render_form_status(page.form()).unwrap_or_default(),
                        };
                        screen.set_footer(Some(footer));
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Call prompt aborted");
                        screen.set_footer(Some(format!("{} {}", "✗".red(), e)));
                        screen.resume();
                    }
                }
            }
            Key::Other(_) => {
                screen.set_footer(Some(format!("{} {}", "?".yellow(), DASHBOARD_HELP)));
            }
        }
    }

    screen.stop().await;
    page.unmount().await;
    Ok(())
}
