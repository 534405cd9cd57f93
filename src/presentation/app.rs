//! Interactive search loop.

use std::io::{self, Write};
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use super::console::Console;
use crate::application::services::{RowBinding, SearchController};
use crate::domain::ports::CatalogPort;
use crate::domain::search_state::SearchState;
use crate::infrastructure::image::FetchCoordinator;

const QUIT_COMMAND: &str = ":q";

/// Main application.
///
/// Reads one query per input line. Each query replaces the running search;
/// results are printed once every visible icon has settled.
pub struct App {
    controller: SearchController,
    coordinator: Arc<FetchCoordinator>,
    rows: Vec<RowBinding>,
}

impl App {
    /// Creates the app with an empty row pool.
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogPort>, coordinator: Arc<FetchCoordinator>) -> Self {
        Self {
            controller: SearchController::new(catalog),
            coordinator,
            rows: Vec::new(),
        }
    }

    /// Runs until `:q` or end of input.
    ///
    /// # Errors
    /// Returns error if reading input or writing output fails.
    pub async fn run<R, W>(
        &mut self,
        input: R,
        console: &mut Console<W>,
        initial_query: Option<String>,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut states = self.controller.subscribe();
        let mut settle: Option<BoxFuture<'static, ()>> = None;

        console.render_status(&self.controller.state())?;

        if let Some(query) = initial_query {
            self.submit(&query);
        }

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("Input closed");
                        break;
                    };
                    let query = line.trim();
                    if query == QUIT_COMMAND {
                        break;
                    }
                    self.submit(query);
                }
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = states.borrow_and_update().clone();
                    console.render_status(&state)?;
                    settle = self.apply(&state);
                }
                () = wait_settled(&mut settle), if settle.is_some() => {
                    settle = None;
                    console.render_rows(&self.rows)?;
                }
            }
        }

        self.controller.cancel();
        for row in &mut self.rows {
            row.unbind();
        }
        info!("Search loop finished");
        Ok(())
    }

    fn submit(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        self.controller.start(query);
    }

    /// Rebinds the row pool to `state` and returns a future resolving once
    /// every bound icon has left the loading state.
    fn apply(&mut self, state: &SearchState) -> Option<BoxFuture<'static, ()>> {
        let items = state.items();

        while self.rows.len() < items.len() {
            let index = self.rows.len();
            self.rows.push(RowBinding::new(index, self.coordinator.clone()));
        }

        for (row, item) in self.rows.iter_mut().zip(items) {
            row.bind(item.clone());
        }
        for row in self.rows.iter_mut().skip(items.len()) {
            row.unbind();
        }

        if !matches!(state, SearchState::Loaded(_)) {
            return None;
        }

        let mut receivers: Vec<_> = self.rows[..items.len()]
            .iter()
            .map(RowBinding::subscribe)
            .collect();

        Some(
            async move {
                join_all(receivers.iter_mut().map(|rx| async move {
                    let _ = rx.wait_for(|icon| !icon.is_loading()).await;
                }))
                .await;
            }
            .boxed(),
        )
    }
}

async fn wait_settled(settle: &mut Option<BoxFuture<'static, ()>>) {
    match settle {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}
