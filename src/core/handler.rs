//! Runs a command inside the configured middleware pipeline.

use crate::Result;
use crate::core::command::{Command, Payload};
use crate::core::config::Config;
use crate::error::CommandError;

/// Execute `command` with the hooks registered in `config`.
///
/// Order: every `before` (registration order), then the command, then every
/// `after` on success. Any failure runs every `on_error` in registration
/// order and is returned as-is. Hooks run one at a time.
pub async fn handle_request<I, O>(command: &Command<I, O>, config: &Config) -> Result<Option<O>>
where
    I: Payload,
    O: Payload,
{
    let view = command.view();

    let outcome = async {
        for middleware in &config.middlewares {
            middleware.before(view).await?;
        }

        let response = command.execute(config).await?;

        for middleware in &config.middlewares {
            middleware
                .after(view, response.as_ref().map(|r| r as &dyn Payload))
                .await?;
        }

        Ok::<_, CommandError>(response)
    }
    .await;

    if let Err(error) = &outcome {
        tracing::debug!(
            "{} failed, running {} error hooks",
            view.metadata.command_name,
            config.middlewares.len()
        );
        for middleware in &config.middlewares {
            middleware.on_error(view, error).await;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::{CommandMetadata, CommandView, HttpMethod};
    use crate::core::middleware::Middleware;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        journal: Journal,
        fail_before: bool,
    }

    impl Recorder {
        fn new(name: &'static str, journal: &Journal) -> Arc<dyn Middleware> {
            Arc::new(Self {
                name,
                journal: Arc::clone(journal),
                fail_before: false,
            })
        }

        fn record(&self, event: &str) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}.{}", self.name, event));
        }
    }

    #[async_trait]
    impl Middleware for Recorder {
        async fn before(&self, _command: CommandView<'_>) -> Result<()> {
            self.record("before");
            if self.fail_before {
                return Err(CommandError::new(ErrorCode::Unauthorized, "denied by hook"));
            }
            Ok(())
        }

        async fn after(&self, _command: CommandView<'_>, response: Option<&dyn Payload>) -> Result<()> {
            let seen = response
                .and_then(|r| r.as_any().downcast_ref::<u32>())
                .copied();
            self.record(&format!("after({:?})", seen));
            Ok(())
        }

        async fn on_error(&self, _command: CommandView<'_>, error: &CommandError) {
            self.record(&format!("on_error({})", error.code));
        }
    }

    /// Only cares about errors.
    struct ErrorOnly(Journal);

    #[async_trait]
    impl Middleware for ErrorOnly {
        async fn on_error(&self, _command: CommandView<'_>, _error: &CommandError) {
            self.0.lock().unwrap().push("C.on_error".to_string());
        }
    }

    fn command(journal: &Journal, fail: bool) -> Command<(), u32> {
        let journal = Arc::clone(journal);
        Command::new(
            (),
            CommandMetadata::new("GetBalance", "/accounts/a_1/balance", HttpMethod::Get),
            move |_config| {
                let journal = Arc::clone(&journal);
                async move {
                    journal.lock().unwrap().push("execute".to_string());
                    if fail {
                        Err(CommandError::new(ErrorCode::Http, "gone").with_status(404))
                    } else {
                        Ok(Some(7))
                    }
                }
            },
        )
    }

    fn config_with(middlewares: Vec<Arc<dyn Middleware>>) -> Config {
        let mut config = Config::new("https://api.payrail.example");
        config.middlewares = middlewares;
        config
    }

    #[tokio::test]
    async fn test_success_runs_before_then_after_in_order() {
        let journal: Journal = Arc::default();
        let config = config_with(vec![
            Recorder::new("A", &journal),
            Recorder::new("B", &journal),
        ]);

        let result = handle_request(&command(&journal, false), &config).await;

        assert_eq!(result.unwrap(), Some(7));
        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                "A.before",
                "B.before",
                "execute",
                "A.after(Some(7))",
                "B.after(Some(7))"
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_runs_only_error_hooks_and_returns_original_error() {
        let journal: Journal = Arc::default();
        let config = config_with(vec![
            Recorder::new("A", &journal),
            Recorder::new("B", &journal),
            Arc::new(ErrorOnly(Arc::clone(&journal))) as Arc<dyn Middleware>,
        ]);

        let err = handle_request(&command(&journal, true), &config)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Http);
        assert_eq!(err.status_code, Some(404));
        assert_eq!(err.message, "gone");
        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                "A.before",
                "B.before",
                "execute",
                "A.on_error(http_error)",
                "B.on_error(http_error)",
                "C.on_error"
            ]
        );
    }

    #[tokio::test]
    async fn test_before_failure_skips_execution() {
        let journal: Journal = Arc::default();
        let gate: Arc<dyn Middleware> = Arc::new(Recorder {
            name: "A",
            journal: Arc::clone(&journal),
            fail_before: true,
        });
        let config = config_with(vec![gate, Recorder::new("B", &journal)]);

        let err = handle_request(&command(&journal, false), &config)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["A.before", "A.on_error(unauthorized)", "B.on_error(unauthorized)"]
        );
    }

    #[tokio::test]
    async fn test_no_middlewares_passes_result_through() {
        let journal: Journal = Arc::default();
        let config = config_with(Vec::new());

        assert_eq!(
            handle_request(&command(&journal, false), &config).await.unwrap(),
            Some(7)
        );
        assert_eq!(*journal.lock().unwrap(), vec!["execute"]);
    }
}
