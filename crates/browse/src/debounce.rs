use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(500);

/// Forwards search text only after it has stopped changing for `delay`.
///
/// Each edit restarts the timer. Every quiet period that follows an edit
/// publishes the settled value, even when it equals the previous one; the
/// consumer decides whether the text actually changed.
pub struct SearchDebouncer {
    input: watch::Sender<String>,
    output: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    pub fn spawn(delay: Duration) -> Self {
        let (input, mut edits) = watch::channel(String::new());
        let (settled_tx, output) = watch::channel(String::new());

        let task = tokio::spawn(async move {
            while edits.changed().await.is_ok() {
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => break,
                        changed = edits.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                    }
                }

                let value = edits.borrow_and_update().clone();
                settled_tx.send_replace(value);
            }
        });

        Self {
            input,
            output,
            task,
        }
    }

    /// Record a keystroke-level edit.
    pub fn edit(&self, text: impl Into<String>) {
        self.input.send_replace(text.into());
    }

    /// Latest text still waiting out the quiet period, or already settled.
    pub fn pending(&self) -> String {
        self.input.borrow().clone()
    }

    pub fn settled(&self) -> String {
        self.output.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.output.clone()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_the_settled_value_is_forwarded() {
        let debouncer = SearchDebouncer::spawn(Duration::from_millis(500));
        let mut settled = debouncer.subscribe();

        for text in ["m", "ma", "mat", "matrix"] {
            debouncer.edit(text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(debouncer.settled(), "");

        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow_and_update(), "matrix");
    }

    #[tokio::test(start_paused = true)]
    async fn each_edit_restarts_the_timer() {
        let debouncer = SearchDebouncer::spawn(Duration::from_millis(500));

        debouncer.edit("a");
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.edit("al");
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(debouncer.settled(), "");
        assert_eq!(debouncer.pending(), "al");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(debouncer.settled(), "al");
    }

    #[tokio::test(start_paused = true)]
    async fn settling_on_the_same_text_publishes_again() {
        let debouncer = SearchDebouncer::spawn(Duration::from_millis(500));
        let mut settled = debouncer.subscribe();

        debouncer.edit("heat");
        settled.changed().await.unwrap();
        settled.borrow_and_update();

        debouncer.edit("hea");
        debouncer.edit("heat");
        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow_and_update(), "heat");

        // No edit, no publish.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!settled.has_changed().unwrap());
    }
}
